//! # Text Metrics and Glyph Outlines
//!
//! Layout and painting must agree on how wide text is, so both go through
//! [`Typesetter`]. With a TrueType font, advances and outlines come from
//! `ttf-parser`; without one, every glyph is a fixed-width solid block.

use std::path::Path;
use std::sync::Arc;
use ttf_parser::OutlineBuilder;

use crate::error::{ExportError, ExportResult};

/// Advance of a block glyph, as a fraction of the font size.
const BLOCK_ADVANCE: f32 = 0.55;

/// Extra advance for bold text, as a fraction of the font size.
const BOLD_EXTRA: f32 = 0.04;

/// Line height as a multiple of the font size.
pub const LINE_HEIGHT: f32 = 1.4;

/// A validated TrueType font.
#[derive(Clone)]
pub struct Typeface {
    data: Arc<Vec<u8>>,
}

impl std::fmt::Debug for Typeface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Typeface").field("bytes", &self.data.len()).finish()
    }
}

impl Typeface {
    pub fn from_bytes(data: Vec<u8>) -> ExportResult<Self> {
        ttf_parser::Face::parse(&data, 0)
            .map_err(|e| ExportError::Encode(format!("Failed to parse TTF: {}", e)))?;
        Ok(Typeface {
            data: Arc::new(data),
        })
    }

    pub async fn load(path: impl AsRef<Path>) -> ExportResult<Self> {
        let data = tokio::fs::read(path.as_ref()).await?;
        Typeface::from_bytes(data)
    }

    fn face(&self) -> Option<ttf_parser::Face<'_>> {
        ttf_parser::Face::parse(&self.data, 0).ok()
    }
}

/// Measures and outlines text.
#[derive(Debug, Clone, Default)]
pub struct Typesetter {
    typeface: Option<Typeface>,
}

/// A closed polygon in CSS pixels.
pub type Contour = Vec<(f32, f32)>;

impl Typesetter {
    /// Solid-block glyphs.
    pub fn blocks() -> Self {
        Typesetter { typeface: None }
    }

    pub fn with_typeface(typeface: Typeface) -> Self {
        Typesetter {
            typeface: Some(typeface),
        }
    }

    pub fn has_typeface(&self) -> bool {
        self.typeface.is_some()
    }

    /// Horizontal advance of one character.
    pub fn advance(&self, c: char, size: f32, bold: bool) -> f32 {
        let extra = if bold { BOLD_EXTRA * size } else { 0.0 };
        let from_face = self.typeface.as_ref().and_then(|t| {
            let face = t.face()?;
            let glyph = face.glyph_index(c)?;
            let advance = face.glyph_hor_advance(glyph)?;
            Some(f32::from(advance) * size / f32::from(face.units_per_em()))
        });
        from_face.unwrap_or(BLOCK_ADVANCE * size) + extra
    }

    /// Width of a run of text.
    pub fn width(&self, text: &str, size: f32, bold: bool) -> f32 {
        text.chars().map(|c| self.advance(c, size, bold)).sum()
    }

    /// Distance from the top of a line box to the baseline.
    pub fn baseline(&self, size: f32) -> f32 {
        let line = size * LINE_HEIGHT;
        let ascent = self
            .typeface
            .as_ref()
            .and_then(|t| {
                let face = t.face()?;
                Some(f32::from(face.ascender()) * size / f32::from(face.units_per_em()))
            })
            .unwrap_or(size * 0.8);
        (line - size) / 2.0 + ascent
    }

    /// Outline of one glyph placed with its origin on `(x, baseline_y)`.
    ///
    /// `None` means paint a solid block instead (no font, or the font has no
    /// glyph for this character).
    pub fn outline(&self, c: char, x: f32, baseline_y: f32, size: f32) -> Option<Vec<Contour>> {
        let typeface = self.typeface.as_ref()?;
        let face = typeface.face()?;
        let glyph = face.glyph_index(c)?;
        let scale = size / f32::from(face.units_per_em());
        let mut builder = ContourBuilder {
            contours: Vec::new(),
            current: Vec::new(),
            origin: (x, baseline_y),
            scale,
            last: (0.0, 0.0),
        };
        // Glyphs without outlines (spaces) yield an empty contour list
        face.outline_glyph(glyph, &mut builder);
        builder.close();
        Some(builder.contours)
    }
}

/// Flattens glyph curves into line segments in page space.
struct ContourBuilder {
    contours: Vec<Contour>,
    current: Contour,
    origin: (f32, f32),
    scale: f32,
    last: (f32, f32),
}

const CURVE_STEPS: usize = 8;

impl ContourBuilder {
    fn map(&self, x: f32, y: f32) -> (f32, f32) {
        // Font units grow upward, pixels grow downward
        (self.origin.0 + x * self.scale, self.origin.1 - y * self.scale)
    }

    fn push(&mut self, x: f32, y: f32) {
        let p = self.map(x, y);
        self.current.push(p);
        self.last = (x, y);
    }
}

impl ttf_parser::OutlineBuilder for ContourBuilder {
    fn move_to(&mut self, x: f32, y: f32) {
        self.close();
        self.push(x, y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.push(x, y);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        let (x0, y0) = self.last;
        for step in 1..=CURVE_STEPS {
            let t = step as f32 / CURVE_STEPS as f32;
            let mt = 1.0 - t;
            let px = mt * mt * x0 + 2.0 * mt * t * x1 + t * t * x;
            let py = mt * mt * y0 + 2.0 * mt * t * y1 + t * t * y;
            self.push(px, py);
        }
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        let (x0, y0) = self.last;
        for step in 1..=CURVE_STEPS {
            let t = step as f32 / CURVE_STEPS as f32;
            let mt = 1.0 - t;
            let px = mt * mt * mt * x0 + 3.0 * mt * mt * t * x1 + 3.0 * mt * t * t * x2 + t * t * t * x;
            let py = mt * mt * mt * y0 + 3.0 * mt * mt * t * y1 + 3.0 * mt * t * t * y2 + t * t * t * y;
            self.push(px, py);
        }
    }

    fn close(&mut self) {
        if self.current.len() > 2 {
            let contour = std::mem::take(&mut self.current);
            self.contours.push(contour);
        } else {
            self.current.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_metrics() {
        let t = Typesetter::blocks();
        assert!(!t.has_typeface());
        assert!((t.width("abcd", 10.0, false) - 22.0).abs() < 1e-4);
        assert!(t.width("ab", 10.0, true) > t.width("ab", 10.0, false));
        assert!(t.outline('a', 0.0, 0.0, 10.0).is_none());
    }

    #[test]
    fn test_invalid_font_rejected() {
        assert!(Typeface::from_bytes(vec![0, 1, 2, 3]).is_err());
    }
}
