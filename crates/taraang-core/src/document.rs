//! # Render Tree
//!
//! The styled document tree built by the composer and consumed by the export
//! pipeline.
//!
//! ## Node Kinds
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  DocNode { kind, style, flags, children }                               │
//! │                                                                         │
//! │  Section ── children stacked vertically                                 │
//! │  Row ────── children side by side, equal widths                         │
//! │  Text ───── one run of plain text                                       │
//! │  Markup ─── inline spans (bold / regular) on one line                   │
//! │  Image ──── source + display width, pixels once loaded                  │
//! │  Rule ───── horizontal line                                             │
//! │  Spacer ─── vertical gap                                                │
//! │                                                                         │
//! │  flags: hidden_in_export │ logo │ panel: Veg | NonVeg                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The tree is plain data: `Clone` is a deep copy, which is what the export
//! pipeline relies on to never touch the live tree.

use serde::{Deserialize, Serialize};

use crate::types::DocumentKind;

// =============================================================================
// Style
// =============================================================================

/// An sRGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);
    pub const BLACK: Color = Color::rgb(0x11, 0x18, 0x27);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }

    /// Parses `#rrggbb` (the `#` is optional).
    ///
    /// ## Example
    /// ```rust
    /// use taraang_core::document::Color;
    ///
    /// assert_eq!(Color::from_hex("#f0fdf4"), Some(Color::rgb(0xf0, 0xfd, 0xf4)));
    /// assert_eq!(Color::from_hex("green"), None);
    /// ```
    pub fn from_hex(hex: &str) -> Option<Color> {
        let hex = hex.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Color::rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// Visual style of one node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Style {
    pub background: Option<Color>,
    pub border: Option<Color>,
    pub color: Color,
    /// Inner padding in CSS pixels.
    pub padding: u32,
    pub align: Align,
    /// Font size in CSS pixels.
    pub font_size: u32,
    pub bold: bool,
}

impl Default for Style {
    fn default() -> Self {
        Style {
            background: None,
            border: None,
            color: Color::BLACK,
            padding: 0,
            align: Align::Left,
            font_size: 14,
            bold: false,
        }
    }
}

// =============================================================================
// Flags
// =============================================================================

/// Which menu panel a node is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Panel {
    Veg,
    NonVeg,
}

impl Panel {
    /// Background forced onto the panel in exported output.
    pub fn export_background(&self) -> Color {
        match self {
            Panel::Veg => Color::rgb(0xf0, 0xfd, 0xf4),
            Panel::NonVeg => Color::rgb(0xfe, 0xf2, 0xf2),
        }
    }

    /// Border forced onto the panel in exported output.
    pub fn export_border(&self) -> Color {
        match self {
            Panel::Veg => Color::rgb(0xbb, 0xf7, 0xd0),
            Panel::NonVeg => Color::rgb(0xfe, 0xca, 0xca),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeFlags {
    /// Editor-only controls; removed from exports.
    pub hidden_in_export: bool,
    /// The header logo; reloaded during export.
    pub logo: bool,
    pub panel: Option<Panel>,
}

// =============================================================================
// Nodes
// =============================================================================

/// One inline run inside a markup node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub text: String,
    pub bold: bool,
}

impl Span {
    pub fn plain(text: impl Into<String>) -> Self {
        Span {
            text: text.into(),
            bold: false,
        }
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Span {
            text: text.into(),
            bold: true,
        }
    }
}

/// Decoded RGB pixels of a loaded image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageData {
    pub width: u32,
    pub height: u32,
    /// Row-major RGB, `width * height * 3` bytes.
    pub rgb: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    Section,
    Row,
    Text(String),
    Markup(Vec<Span>),
    Image {
        source: String,
        /// Display width in CSS pixels.
        width: u32,
        data: Option<ImageData>,
    },
    Rule,
    Spacer(u32),
}

/// A node of the render tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocNode {
    pub kind: NodeKind,
    pub style: Style,
    pub flags: NodeFlags,
    pub children: Vec<DocNode>,
}

impl DocNode {
    fn of(kind: NodeKind) -> Self {
        DocNode {
            kind,
            style: Style::default(),
            flags: NodeFlags::default(),
            children: Vec::new(),
        }
    }

    // ===== Constructors =====

    pub fn section() -> Self {
        DocNode::of(NodeKind::Section)
    }

    pub fn row() -> Self {
        DocNode::of(NodeKind::Row)
    }

    pub fn text(text: impl Into<String>) -> Self {
        DocNode::of(NodeKind::Text(text.into()))
    }

    pub fn markup(spans: Vec<Span>) -> Self {
        DocNode::of(NodeKind::Markup(spans))
    }

    /// An image not yet loaded.
    pub fn image(source: impl Into<String>, width: u32) -> Self {
        DocNode::of(NodeKind::Image {
            source: source.into(),
            width,
            data: None,
        })
    }

    pub fn rule() -> Self {
        DocNode::of(NodeKind::Rule)
    }

    pub fn spacer(height: u32) -> Self {
        DocNode::of(NodeKind::Spacer(height))
    }

    // ===== Builders =====

    pub fn child(mut self, child: DocNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = DocNode>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn background(mut self, color: Color) -> Self {
        self.style.background = Some(color);
        self
    }

    pub fn border(mut self, color: Color) -> Self {
        self.style.border = Some(color);
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.style.color = color;
        self
    }

    pub fn padding(mut self, padding: u32) -> Self {
        self.style.padding = padding;
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.style.align = align;
        self
    }

    pub fn size(mut self, font_size: u32) -> Self {
        self.style.font_size = font_size;
        self
    }

    pub fn bold(mut self) -> Self {
        self.style.bold = true;
        self
    }

    pub fn hidden_in_export(mut self) -> Self {
        self.flags.hidden_in_export = true;
        self
    }

    pub fn as_logo(mut self) -> Self {
        self.flags.logo = true;
        self
    }

    pub fn panel(mut self, panel: Panel) -> Self {
        self.flags.panel = Some(panel);
        self
    }

    // ===== Traversal =====

    /// Visits this node and every descendant, depth first.
    pub fn walk<'a>(&'a self, f: &mut impl FnMut(&'a DocNode)) {
        f(self);
        for child in &self.children {
            child.walk(f);
        }
    }

    /// Mutable depth-first visit.
    pub fn walk_mut(&mut self, f: &mut impl FnMut(&mut DocNode)) {
        f(self);
        for child in &mut self.children {
            child.walk_mut(f);
        }
    }

    /// Drops every descendant matching `pred` (with its subtree).
    ///
    /// Returns how many nodes were removed at the top of their subtrees.
    pub fn remove_where(&mut self, pred: &impl Fn(&DocNode) -> bool) -> usize {
        let before = self.children.len();
        self.children.retain(|c| !pred(c));
        let mut removed = before - self.children.len();
        for child in &mut self.children {
            removed += child.remove_where(pred);
        }
        removed
    }

    /// Counts nodes (including this one) matching `pred`.
    pub fn count(&self, pred: impl Fn(&DocNode) -> bool) -> usize {
        let mut n = 0;
        self.walk(&mut |node| {
            if pred(node) {
                n += 1;
            }
        });
        n
    }

    /// The text of this node itself (text or joined markup spans).
    pub fn own_text(&self) -> Option<String> {
        match &self.kind {
            NodeKind::Text(t) => Some(t.clone()),
            NodeKind::Markup(spans) => Some(spans.iter().map(|s| s.text.as_str()).collect()),
            _ => None,
        }
    }

    /// Every text run in document order, one per line.
    pub fn text_content(&self) -> String {
        let mut lines = Vec::new();
        self.walk(&mut |node| {
            if let Some(text) = node.own_text() {
                lines.push(text);
            }
        });
        lines.join("\n")
    }
}

/// A composed document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub kind: DocumentKind,
    pub root: DocNode,
}

impl Document {
    pub fn text_content(&self) -> String {
        self.root.text_content()
    }
}
