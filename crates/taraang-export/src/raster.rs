//! # Rasterizing
//!
//! Paints a [`PageLayout`] onto an RGB canvas at a device scale. The export
//! pipeline holds a `dyn Rasterizer`, so a different painter can be plugged
//! in without touching the pipeline.
//!
//! ```text
//! PageLayout (CSS px) ──► scale ──► RasterImage (device px, white canvas)
//! ```

use taraang_core::document::{Color, ImageData};

use crate::error::{ExportError, ExportResult};
use crate::layout::{DrawOp, PageLayout, Rect};
use crate::text::{Contour, Typesetter};

/// Largest canvas side in device pixels.
pub const MAX_CANVAS_SIDE: u32 = 16_384;

/// `scale`, lowered just enough for `page` to fit within [`MAX_CANVAS_SIDE`].
///
/// Long documents still come out as one page; they are painted at a lower
/// resolution instead.
pub fn fit_scale(page: &PageLayout, scale: f32) -> f32 {
    let longest = page.width.max(page.height);
    if longest.is_nan() || longest <= 0.0 {
        return scale;
    }
    // One pixel of headroom for rounding up in `rasterize`
    let limit = (MAX_CANVAS_SIDE - 1) as f32 / longest;
    scale.min(limit)
}

/// An opaque RGB bitmap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    pub width: u32,
    pub height: u32,
    /// Row-major RGB, `width * height * 3` bytes.
    pub rgb: Vec<u8>,
}

impl RasterImage {
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y * self.width + x) * 3) as usize;
        Some([self.rgb[i], self.rgb[i + 1], self.rgb[i + 2]])
    }
}

/// Turns a measured page into pixels.
pub trait Rasterizer: Send + Sync {
    fn rasterize(&self, page: &PageLayout, scale: f32) -> ExportResult<RasterImage>;
}

/// The built-in CPU painter.
#[derive(Debug, Clone, Default)]
pub struct SoftwareRasterizer {
    typesetter: Typesetter,
}

impl SoftwareRasterizer {
    pub fn new(typesetter: Typesetter) -> Self {
        SoftwareRasterizer { typesetter }
    }
}

impl Rasterizer for SoftwareRasterizer {
    fn rasterize(&self, page: &PageLayout, scale: f32) -> ExportResult<RasterImage> {
        if scale.is_nan() || scale <= 0.0 {
            return Err(ExportError::Raster(format!("Invalid scale {}", scale)));
        }
        let width = (page.width * scale).ceil() as u32;
        let height = (page.height * scale).ceil() as u32;
        if width == 0 || height == 0 {
            return Err(ExportError::Raster("Page has no area".to_string()));
        }
        if width > MAX_CANVAS_SIDE || height > MAX_CANVAS_SIDE {
            return Err(ExportError::Raster(format!(
                "Canvas {}x{} exceeds {} pixels",
                width, height, MAX_CANVAS_SIDE
            )));
        }

        let mut canvas = Canvas::new(width, height, scale);
        for op in &page.ops {
            match op {
                DrawOp::Fill { rect, color } => canvas.fill(*rect, *color),
                DrawOp::Stroke { rect, color } => canvas.stroke(*rect, *color),
                DrawOp::Line { x1, x2, y, color } => canvas.fill(
                    Rect {
                        x: *x1,
                        y: *y,
                        w: x2 - x1,
                        h: 1.0,
                    },
                    *color,
                ),
                DrawOp::Text {
                    x,
                    y,
                    text,
                    size,
                    bold,
                    color,
                } => self.paint_text(&mut canvas, *x, *y, text, *size, *bold, *color),
                DrawOp::Image { rect, data } => canvas.blit(*rect, data),
            }
        }
        Ok(canvas.into_image())
    }
}

impl SoftwareRasterizer {
    #[allow(clippy::too_many_arguments)]
    fn paint_text(
        &self,
        canvas: &mut Canvas,
        x: f32,
        baseline: f32,
        text: &str,
        size: f32,
        bold: bool,
        color: Color,
    ) {
        // Bold is a second pass shifted right by a fraction of a pixel
        let passes: &[f32] = if bold { &[0.0, 0.6] } else { &[0.0] };
        let mut pen = x;
        for c in text.chars() {
            let advance = self.typesetter.advance(c, size, bold);
            if !c.is_whitespace() {
                for dx in passes {
                    match self.typesetter.outline(c, pen + dx, baseline, size) {
                        Some(contours) => canvas.fill_contours(&contours, color),
                        None => {
                            let block = Rect {
                                x: pen + dx + advance * 0.1,
                                y: baseline - size * 0.7,
                                w: advance * 0.75,
                                h: size * 0.7,
                            };
                            canvas.fill(block, color);
                        }
                    }
                }
            }
            pen += advance;
        }
    }
}

struct Canvas {
    width: u32,
    height: u32,
    scale: f32,
    rgb: Vec<u8>,
}

impl Canvas {
    fn new(width: u32, height: u32, scale: f32) -> Self {
        Canvas {
            width,
            height,
            scale,
            rgb: vec![0xff; (width as usize) * (height as usize) * 3],
        }
    }

    fn into_image(self) -> RasterImage {
        RasterImage {
            width: self.width,
            height: self.height,
            rgb: self.rgb,
        }
    }

    fn put(&mut self, x: u32, y: u32, color: Color) {
        if x < self.width && y < self.height {
            let i = ((y * self.width + x) * 3) as usize;
            self.rgb[i] = color.r;
            self.rgb[i + 1] = color.g;
            self.rgb[i + 2] = color.b;
        }
    }

    /// Device-pixel span of a CSS-pixel range, clipped to `limit`.
    fn span(&self, start: f32, len: f32, limit: u32) -> (u32, u32) {
        let a = (start * self.scale).round().max(0.0) as u32;
        let b = ((start + len) * self.scale).round().max(0.0) as u32;
        (a.min(limit), b.min(limit))
    }

    fn fill(&mut self, rect: Rect, color: Color) {
        let (x0, x1) = self.span(rect.x, rect.w, self.width);
        let (y0, y1) = self.span(rect.y, rect.h, self.height);
        for y in y0..y1 {
            for x in x0..x1 {
                self.put(x, y, color);
            }
        }
    }

    fn stroke(&mut self, rect: Rect, color: Color) {
        let t = 1.0;
        self.fill(Rect { h: t, ..rect }, color);
        self.fill(
            Rect {
                y: rect.y + rect.h - t,
                h: t,
                ..rect
            },
            color,
        );
        self.fill(Rect { w: t, ..rect }, color);
        self.fill(
            Rect {
                x: rect.x + rect.w - t,
                w: t,
                ..rect
            },
            color,
        );
    }

    /// Nearest-neighbour copy of `data` into `rect`.
    fn blit(&mut self, rect: Rect, data: &ImageData) {
        if data.width == 0 || data.height == 0 {
            return;
        }
        let (x0, x1) = self.span(rect.x, rect.w, self.width);
        let (y0, y1) = self.span(rect.y, rect.h, self.height);
        let (dw, dh) = (x1.saturating_sub(x0).max(1), y1.saturating_sub(y0).max(1));
        for y in y0..y1 {
            let sy = (((y - y0) as u64 * data.height as u64) / dh as u64) as u32;
            for x in x0..x1 {
                let sx = (((x - x0) as u64 * data.width as u64) / dw as u64) as u32;
                let i = ((sy.min(data.height - 1) * data.width + sx.min(data.width - 1)) * 3) as usize;
                if let Some(px) = data.rgb.get(i..i + 3) {
                    self.put(x, y, Color::rgb(px[0], px[1], px[2]));
                }
            }
        }
    }

    /// Nonzero-winding scanline fill of glyph contours.
    fn fill_contours(&mut self, contours: &[Contour], color: Color) {
        let edges: Vec<((f32, f32), (f32, f32))> = contours
            .iter()
            .flat_map(|c| {
                let n = c.len();
                (0..n).map(move |i| (c[i], c[(i + 1) % n]))
            })
            .map(|((ax, ay), (bx, by))| {
                (
                    (ax * self.scale, ay * self.scale),
                    (bx * self.scale, by * self.scale),
                )
            })
            .filter(|((_, ay), (_, by))| ay != by)
            .collect();
        if edges.is_empty() {
            return;
        }

        let min_y = edges
            .iter()
            .map(|((_, a), (_, b))| a.min(*b))
            .fold(f32::MAX, f32::min);
        let max_y = edges
            .iter()
            .map(|((_, a), (_, b))| a.max(*b))
            .fold(f32::MIN, f32::max);
        let y_start = min_y.floor().max(0.0) as u32;
        let y_end = (max_y.ceil().max(0.0) as u32).min(self.height);

        let mut crossings: Vec<(f32, i32)> = Vec::new();
        for y in y_start..y_end {
            let sample = y as f32 + 0.5;
            crossings.clear();
            for ((ax, ay), (bx, by)) in &edges {
                let (lo, hi) = if ay < by { (ay, by) } else { (by, ay) };
                if sample < *lo || sample >= *hi {
                    continue;
                }
                let t = (sample - ay) / (by - ay);
                let winding = if ay < by { 1 } else { -1 };
                crossings.push((ax + t * (bx - ax), winding));
            }
            crossings.sort_by(|a, b| a.0.total_cmp(&b.0));

            let mut winding = 0;
            for pair in crossings.windows(2) {
                winding += pair[0].1;
                if winding != 0 {
                    let x0 = pair[0].0.round().max(0.0) as u32;
                    let x1 = (pair[1].0.round().max(0.0) as u32).min(self.width);
                    for x in x0..x1 {
                        self.put(x, y, color);
                    }
                }
            }
        }
    }
}
