//! # Gallery Layout
//!
//! The contract between the site and the layout service: a list of images
//! goes in, a span per image comes back for a 4-column grid.
//!
//! ```text
//! ┌───────────┬─────┬─────┐
//! │           │  2  │  3  │   fallback layout:
//! │     1     ├─────┼─────┤   first image 2×2,
//! │   (2×2)   │  4  │  5  │   every other image 1×1
//! ├─────┬─────┼─────┴─────┘
//! │  6  │ ... │
//! └─────┴─────┘
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tera::Context;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::templates::{render, LAYOUT_PROMPT_TEMPLATE};

/// Columns in the gallery grid.
pub const GRID_COLUMNS: u8 = 4;

/// Largest row span an item may take.
pub const MAX_ROW_SPAN: u8 = 2;

/// An image offered to the layout service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GalleryImage {
    pub id: String,
    pub description: String,
    /// Keywords describing the content.
    pub hint: String,
    pub url: String,
}

/// Placement of one image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LayoutItem {
    pub id: String,
    pub col_span: u8,
    pub row_span: u8,
}

/// Where a layout came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum LayoutSource {
    Ai,
    Fallback,
}

/// The layout returned to the site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GalleryLayout {
    pub layout: Vec<LayoutItem>,
    pub source: LayoutSource,
}

/// Images shown on the site gallery.
pub fn default_gallery() -> Vec<GalleryImage> {
    [
        ("gallery-1", "Mandap decorated with marigold and roses", "indian wedding"),
        ("gallery-2", "Stage backdrop with fairy lights", "event decoration"),
        ("gallery-3", "Reception dinner buffet", "catering buffet"),
        ("gallery-4", "Haldi ceremony seating", "haldi ceremony"),
        ("gallery-5", "Birthday party balloon arch", "birthday decoration"),
        ("gallery-6", "Entrance flower tunnel", "event decoration"),
    ]
    .into_iter()
    .map(|(id, description, hint)| GalleryImage {
        id: id.to_string(),
        description: description.to_string(),
        hint: hint.to_string(),
        url: format!("/images/{}.jpg", id),
    })
    .collect()
}

/// Static layout used whenever the service cannot be trusted.
pub fn fallback_layout(images: &[GalleryImage]) -> GalleryLayout {
    let layout = images
        .iter()
        .enumerate()
        .map(|(i, image)| {
            let span = if i == 0 { 2 } else { 1 };
            LayoutItem {
                id: image.id.clone(),
                col_span: span,
                row_span: span,
            }
        })
        .collect();
    GalleryLayout {
        layout,
        source: LayoutSource::Fallback,
    }
}

/// Checks a proposed layout against the images it should place.
///
/// ## Rules
/// - One item per image, same ids, no duplicates
/// - `col_span` in 1..=4, `row_span` in 1..=2
///
/// Items wrap onto a new row when the next span does not fit, so spans
/// within range are enough to keep every row inside the grid.
pub fn validate_layout(images: &[GalleryImage], items: &[LayoutItem]) -> CoreResult<()> {
    let invalid = |reason: String| -> CoreResult<()> { Err(CoreError::InvalidLayout { reason }) };

    if items.len() != images.len() {
        return invalid(format!(
            "expected {} items, got {}",
            images.len(),
            items.len()
        ));
    }

    let expected: HashSet<&str> = images.iter().map(|i| i.id.as_str()).collect();
    let mut seen = HashSet::new();
    for item in items {
        if !expected.contains(item.id.as_str()) {
            return invalid(format!("unknown image id {}", item.id));
        }
        if !seen.insert(item.id.as_str()) {
            return invalid(format!("duplicate image id {}", item.id));
        }
        if !(1..=GRID_COLUMNS).contains(&item.col_span) {
            return invalid(format!("colSpan {} out of range for {}", item.col_span, item.id));
        }
        if !(1..=MAX_ROW_SPAN).contains(&item.row_span) {
            return invalid(format!("rowSpan {} out of range for {}", item.row_span, item.id));
        }
    }
    Ok(())
}

/// Prompt asking the model for a layout.
pub fn layout_prompt(images: &[GalleryImage]) -> CoreResult<String> {
    let mut context = Context::new();
    context.insert("columns", &GRID_COLUMNS);
    context.insert("images", images);
    render(LAYOUT_PROMPT_TEMPLATE, &context)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, col_span: u8, row_span: u8) -> LayoutItem {
        LayoutItem {
            id: id.to_string(),
            col_span,
            row_span,
        }
    }

    #[test]
    fn test_fallback_shape() {
        let images = default_gallery();
        let layout = fallback_layout(&images);
        assert_eq!(layout.source, LayoutSource::Fallback);
        assert_eq!(layout.layout.len(), images.len());
        assert_eq!(layout.layout[0], item("gallery-1", 2, 2));
        assert!(layout.layout[1..].iter().all(|i| i.col_span == 1 && i.row_span == 1));
        assert!(validate_layout(&images, &layout.layout).is_ok());
    }

    #[test]
    fn test_rejects_wrong_ids_and_spans() {
        let all = default_gallery();
        let images = &all[..2];
        assert!(validate_layout(images, &[item("gallery-1", 1, 1)]).is_err());
        assert!(validate_layout(images, &[item("gallery-1", 1, 1), item("gallery-9", 1, 1)]).is_err());
        assert!(validate_layout(images, &[item("gallery-1", 1, 1), item("gallery-1", 1, 1)]).is_err());
        assert!(validate_layout(images, &[item("gallery-1", 5, 1), item("gallery-2", 1, 1)]).is_err());
        assert!(validate_layout(images, &[item("gallery-1", 1, 3), item("gallery-2", 1, 1)]).is_err());
        assert!(validate_layout(images, &[item("gallery-1", 4, 2), item("gallery-2", 2, 1)]).is_ok());
    }

    #[test]
    fn test_full_width_items_are_valid() {
        let images = default_gallery();
        let items: Vec<LayoutItem> = images
            .iter()
            .map(|i| item(&i.id, GRID_COLUMNS, MAX_ROW_SPAN))
            .collect();
        assert!(validate_layout(&images, &items).is_ok());

        let mut mixed = items.clone();
        mixed[1].col_span = 3;
        mixed[2].col_span = 2;
        assert!(validate_layout(&images, &mixed).is_ok());
    }

    #[test]
    fn test_prompt_lists_every_image() {
        let images = default_gallery();
        let prompt = layout_prompt(&images).unwrap();
        assert!(prompt.contains("Generate a layout for a 4-column grid."));
        assert!(prompt.contains(r#"{"layout": [{"id": string"#));
        for image in &images {
            assert!(prompt.contains(&format!("- ID: {}, Description: {}", image.id, image.description)));
        }
    }

    #[test]
    fn test_layout_serializes_camel_case() {
        let json = serde_json::to_string(&fallback_layout(&default_gallery()[..1])).unwrap();
        assert_eq!(
            json,
            r#"{"layout":[{"id":"gallery-1","colSpan":2,"rowSpan":2}],"source":"fallback"}"#
        );
    }
}
