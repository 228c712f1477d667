//! # Page Layout
//!
//! Measures a staged tree at a fixed content width and flattens it into a
//! display list. The rasterizer only ever sees a [`PageLayout`].
//!
//! ## Box Model
//! ```text
//! ┌──────────────────── content_width ────────────────────┐
//! │ padding                                               │
//! │   ┌─ node ──────────────────────────────────────────┐ │
//! │   │ style.padding                                   │ │
//! │   │   Section: children stacked, SECTION_GAP apart  │ │
//! │   │   Row:     equal columns, ROW_GAP apart         │ │
//! │   │   Text / Markup: word-wrapped lines             │ │
//! │   └─────────────────────────────────────────────────┘ │
//! │                                                       │
//! └───────── height = full content extent + padding ──────┘
//! ```
//!
//! A node's background is emitted before its children and its border after
//! them, so panels paint under their text.

use taraang_core::document::{Align, Color, DocNode, ImageData, NodeKind, Span};

use crate::error::{ExportError, ExportResult};
use crate::text::{Typesetter, LINE_HEIGHT};

/// Vertical gap between children of a section.
pub const SECTION_GAP: f32 = 4.0;

/// Horizontal gap between columns of a row.
pub const ROW_GAP: f32 = 16.0;

/// Space above and below a horizontal rule.
const RULE_MARGIN: f32 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

/// One painting instruction, in CSS pixels.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Fill { rect: Rect, color: Color },
    Stroke { rect: Rect, color: Color },
    Line { x1: f32, x2: f32, y: f32, color: Color },
    /// `y` is the baseline.
    Text {
        x: f32,
        y: f32,
        text: String,
        size: f32,
        bold: bool,
        color: Color,
    },
    Image { rect: Rect, data: ImageData },
}

/// A measured page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
    pub width: f32,
    pub height: f32,
    pub ops: Vec<DrawOp>,
}

impl PageLayout {
    /// Every text run handed to the painter.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn image_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Image { .. }))
            .count()
    }
}

/// Lays out `root` at `content_width` with `padding` around it.
pub fn layout(
    root: &DocNode,
    content_width: u32,
    padding: u32,
    typesetter: &Typesetter,
) -> ExportResult<PageLayout> {
    let width = content_width as f32;
    let pad = padding as f32;
    let inner = width - 2.0 * pad;
    if inner <= 0.0 {
        return Err(ExportError::Layout(format!(
            "Padding {} leaves no room in width {}",
            padding, content_width
        )));
    }

    let mut builder = LayoutBuilder {
        typesetter,
        ops: Vec::new(),
    };
    let content_height = builder.place(root, pad, pad, inner);
    let height = (content_height + 2.0 * pad).ceil();

    Ok(PageLayout {
        width,
        height,
        ops: builder.ops,
    })
}

struct LayoutBuilder<'a> {
    typesetter: &'a Typesetter,
    ops: Vec<DrawOp>,
}

/// A word of a line with its trailing space.
struct Piece<'s> {
    text: &'s str,
    bold: bool,
    width: f32,
    trimmed_width: f32,
}

impl<'a> LayoutBuilder<'a> {
    /// Places `node` at `(x, y)` with outer width `w`; returns its height.
    fn place(&mut self, node: &DocNode, x: f32, y: f32, w: f32) -> f32 {
        let fill_at = self.ops.len();
        let pad = node.style.padding as f32;
        let (ix, iy) = (x + pad, y + pad);
        let iw = (w - 2.0 * pad).max(0.0);

        let content = match &node.kind {
            NodeKind::Section => {
                let mut cy = iy;
                for (i, child) in node.children.iter().enumerate() {
                    if i > 0 {
                        cy += SECTION_GAP;
                    }
                    cy += self.place(child, ix, cy, iw);
                }
                cy - iy
            }
            NodeKind::Row => {
                let n = node.children.len();
                if n == 0 {
                    0.0
                } else {
                    let gaps = ROW_GAP * (n - 1) as f32;
                    let cw = ((iw - gaps) / n as f32).max(0.0);
                    let mut tallest: f32 = 0.0;
                    for (i, child) in node.children.iter().enumerate() {
                        let cx = ix + i as f32 * (cw + ROW_GAP);
                        tallest = tallest.max(self.place(child, cx, iy, cw));
                    }
                    tallest
                }
            }
            NodeKind::Text(text) => {
                let spans = [Span {
                    text: text.clone(),
                    bold: node.style.bold,
                }];
                self.flow(&spans, node, ix, iy, iw)
            }
            NodeKind::Markup(spans) => self.flow(spans, node, ix, iy, iw),
            NodeKind::Image { width, data, .. } => match data {
                Some(data) if data.width > 0 => {
                    let dw = (*width as f32).min(iw);
                    let dh = dw * data.height as f32 / data.width as f32;
                    let dx = ix + align_offset(node.style.align, iw, dw);
                    self.ops.push(DrawOp::Image {
                        rect: Rect {
                            x: dx,
                            y: iy,
                            w: dw,
                            h: dh,
                        },
                        data: data.clone(),
                    });
                    dh
                }
                // Unloaded images take no space
                _ => 0.0,
            },
            NodeKind::Rule => {
                self.ops.push(DrawOp::Line {
                    x1: ix,
                    x2: ix + iw,
                    y: iy + RULE_MARGIN,
                    color: node.style.border.unwrap_or(node.style.color),
                });
                2.0 * RULE_MARGIN
            }
            NodeKind::Spacer(h) => *h as f32,
        };

        let height = content + 2.0 * pad;
        let rect = Rect { x, y, w, h: height };
        if let Some(color) = node.style.background {
            self.ops.insert(fill_at, DrawOp::Fill { rect, color });
        }
        if let Some(color) = node.style.border {
            if !matches!(node.kind, NodeKind::Rule) {
                self.ops.push(DrawOp::Stroke { rect, color });
            }
        }
        height
    }

    /// Word-wraps inline spans into lines; returns the height used.
    fn flow(&mut self, spans: &[Span], node: &DocNode, x: f32, y: f32, w: f32) -> f32 {
        let size = node.style.font_size as f32;
        let line_height = size * LINE_HEIGHT;

        let pieces: Vec<Piece<'_>> = spans
            .iter()
            .flat_map(|span| {
                let bold = span.bold || node.style.bold;
                span.text.split_inclusive(' ').map(move |text| (text, bold))
            })
            .map(|(text, bold)| Piece {
                text,
                bold,
                width: self.typesetter.width(text, size, bold),
                trimmed_width: self.typesetter.width(text.trim_end(), size, bold),
            })
            .collect();

        if pieces.is_empty() {
            return line_height;
        }

        let mut lines: Vec<Vec<&Piece<'_>>> = vec![Vec::new()];
        let mut line_width = 0.0;
        for piece in &pieces {
            let current = lines.last_mut().map(|l| !l.is_empty()).unwrap_or(false);
            if current && line_width + piece.trimmed_width > w {
                lines.push(Vec::new());
                line_width = 0.0;
            }
            if let Some(line) = lines.last_mut() {
                line.push(piece);
            }
            line_width += piece.width;
        }

        let baseline = self.typesetter.baseline(size);
        for (i, line) in lines.iter().enumerate() {
            let used: f32 = match line.split_last() {
                Some((last, rest)) => {
                    rest.iter().map(|p| p.width).sum::<f32>() + last.trimmed_width
                }
                None => 0.0,
            };
            let mut px = x + align_offset(node.style.align, w, used);
            let py = y + i as f32 * line_height + baseline;
            for piece in line {
                let text = piece.text.trim_end();
                if !text.is_empty() {
                    self.ops.push(DrawOp::Text {
                        x: px,
                        y: py,
                        text: text.to_string(),
                        size,
                        bold: piece.bold,
                        color: node.style.color,
                    });
                }
                px += piece.width;
            }
        }
        lines.len() as f32 * line_height
    }
}

fn align_offset(align: Align, available: f32, used: f32) -> f32 {
    let slack = (available - used).max(0.0);
    match align {
        Align::Left => 0.0,
        Align::Center => slack / 2.0,
        Align::Right => slack,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blocks() -> Typesetter {
        Typesetter::blocks()
    }

    #[test]
    fn test_page_width_and_padding() {
        let root = DocNode::section().child(DocNode::text("Hello"));
        let page = layout(&root, 800, 40, &blocks()).unwrap();
        assert_eq!(page.width, 800.0);
        // one 14px line plus padding on both sides
        assert_eq!(page.height, (14.0 * LINE_HEIGHT + 80.0_f32).ceil());
        match &page.ops[0] {
            DrawOp::Text { x, text, .. } => {
                assert_eq!(*x, 40.0);
                assert_eq!(text, "Hello");
            }
            other => panic!("unexpected op {:?}", other),
        }
    }

    #[test]
    fn test_padding_wider_than_page_is_rejected() {
        let root = DocNode::section();
        assert!(matches!(
            layout(&root, 60, 40, &blocks()),
            Err(ExportError::Layout(_))
        ));
    }

    #[test]
    fn test_long_text_wraps() {
        let words = vec!["catering"; 40].join(" ");
        let root = DocNode::section().child(DocNode::text(words));
        let page = layout(&root, 400, 20, &blocks()).unwrap();
        let baselines: std::collections::BTreeSet<i64> = page
            .ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { y, .. } => Some(*y as i64),
                _ => None,
            })
            .collect();
        assert!(baselines.len() > 1);
        for op in &page.ops {
            if let DrawOp::Text { x, text, size, .. } = op {
                let right = x + blocks().width(text, *size, false);
                assert!(right <= 380.0 + 0.01, "{} overflows at {}", text, right);
            }
        }
    }

    #[test]
    fn test_markup_keeps_bold_runs() {
        let root = DocNode::markup(vec![Span::bold("Customer: "), Span::plain("A. Rao")]);
        let page = layout(&root, 800, 40, &blocks()).unwrap();
        let runs: Vec<(String, bool)> = page
            .ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, bold, .. } => Some((text.clone(), *bold)),
                _ => None,
            })
            .collect();
        assert_eq!(
            runs,
            vec![
                ("Customer:".to_string(), true),
                ("A.".to_string(), false),
                ("Rao".to_string(), false)
            ]
        );
    }

    #[test]
    fn test_background_painted_before_children_and_border_after() {
        let root = DocNode::section()
            .background(Color::rgb(0xf0, 0xfd, 0xf4))
            .border(Color::rgb(0xbb, 0xf7, 0xd0))
            .padding(12)
            .child(DocNode::text("Paneer"));
        let page = layout(&root, 800, 40, &blocks()).unwrap();
        assert!(matches!(page.ops.first(), Some(DrawOp::Fill { .. })));
        assert!(matches!(page.ops.get(1), Some(DrawOp::Text { .. })));
        assert!(matches!(page.ops.last(), Some(DrawOp::Stroke { .. })));
    }

    #[test]
    fn test_row_splits_width() {
        let root = DocNode::row()
            .child(DocNode::text("left"))
            .child(DocNode::text("right"));
        let page = layout(&root, 800, 40, &blocks()).unwrap();
        let xs: Vec<f32> = page
            .ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { x, .. } => Some(*x),
                _ => None,
            })
            .collect();
        assert_eq!(xs, vec![40.0, 40.0 + (720.0 - ROW_GAP) / 2.0 + ROW_GAP]);
    }

    #[test]
    fn test_image_keeps_aspect_ratio() {
        let mut logo = DocNode::image("new-logo.png", 250).align(Align::Center);
        if let NodeKind::Image { data, .. } = &mut logo.kind {
            *data = Some(ImageData {
                width: 100,
                height: 50,
                rgb: vec![0; 100 * 50 * 3],
            });
        }
        let page = layout(&DocNode::section().child(logo), 800, 40, &blocks()).unwrap();
        match &page.ops[0] {
            DrawOp::Image { rect, .. } => {
                assert_eq!(rect.w, 250.0);
                assert_eq!(rect.h, 125.0);
                assert_eq!(rect.x, 40.0 + (720.0 - 250.0) / 2.0);
            }
            other => panic!("unexpected op {:?}", other),
        }
        assert_eq!(page.image_count(), 1);
    }

    #[test]
    fn test_unloaded_image_takes_no_space() {
        let root = DocNode::section().child(DocNode::image("missing.png", 250));
        let page = layout(&root, 800, 40, &blocks()).unwrap();
        assert!(page.ops.is_empty());
        assert_eq!(page.height, 80.0);
    }
}
