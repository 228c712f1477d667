//! # Clone Patching
//!
//! Adjustments applied to the cloned tree before it is staged. Each one is a
//! plain function over `&mut DocNode`; the live tree is never passed here.
//!
//! ```text
//! clone ─► substitute_currency   ₹ → Rs. in text and markup
//!       ─► strip_hidden          drop editor-only controls
//!       ─► replace_logo          fresh image at export width, or no logo
//!       ─► force_panel_colors    veg / non-veg backgrounds and borders
//! ```

use serde::Serialize;

use taraang_core::document::{Align, DocNode, ImageData, NodeKind};
use taraang_core::money::substitute_currency_glyph;

/// Counts of what a patch pass changed, carried into the export report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PatchReport {
    pub glyphs_replaced: usize,
    pub hidden_removed: usize,
    pub panels_forced: usize,
    pub logo_embedded: bool,
}

/// Replaces the rupee glyph in every text node and every markup span.
pub fn substitute_currency(root: &mut DocNode) -> usize {
    let mut replaced = 0;
    root.walk_mut(&mut |node| match &mut node.kind {
        NodeKind::Text(text) => {
            let (patched, n) = substitute_currency_glyph(text);
            if n > 0 {
                *text = patched;
                replaced += n;
            }
        }
        NodeKind::Markup(spans) => {
            for span in spans.iter_mut() {
                let (patched, n) = substitute_currency_glyph(&span.text);
                if n > 0 {
                    span.text = patched;
                    replaced += n;
                }
            }
        }
        _ => {}
    });
    replaced
}

/// Removes nodes flagged `hidden_in_export`.
pub fn strip_hidden(root: &mut DocNode) -> usize {
    root.remove_where(&|node| node.flags.hidden_in_export)
}

/// Source of the first logo node, if the tree has one.
pub fn logo_source(root: &DocNode) -> Option<String> {
    let mut source = None;
    root.walk(&mut |node| {
        if source.is_none() && node.flags.logo {
            if let NodeKind::Image { source: s, .. } = &node.kind {
                source = Some(s.clone());
            }
        }
    });
    source
}

/// Swaps each logo node for a fresh image of the same source at `width`.
///
/// With no loaded image the logo nodes are removed and the export carries on
/// without a logo.
pub fn replace_logo(root: &mut DocNode, image: Option<ImageData>, width: u32) -> bool {
    let Some(image) = image else {
        root.remove_where(&|node| node.flags.logo);
        return false;
    };
    let mut replaced = false;
    root.walk_mut(&mut |node| {
        if !node.flags.logo {
            return;
        }
        if let NodeKind::Image { source, .. } = &node.kind {
            let mut fresh = DocNode::image(source.clone(), width)
                .as_logo()
                .align(Align::Center);
            if let NodeKind::Image { data, .. } = &mut fresh.kind {
                *data = Some(image.clone());
            }
            *node = fresh;
            replaced = true;
        }
    });
    replaced
}

/// Forces panel backgrounds and borders to their export colours.
pub fn force_panel_colors(root: &mut DocNode) -> usize {
    let mut forced = 0;
    root.walk_mut(&mut |node| {
        if let Some(panel) = node.flags.panel {
            node.style.background = Some(panel.export_background());
            node.style.border = Some(panel.export_border());
            forced += 1;
        }
    });
    forced
}
