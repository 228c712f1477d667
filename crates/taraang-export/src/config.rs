//! # Export Configuration
//!
//! ```rust
//! use std::time::Duration;
//! use taraang_export::ExportConfig;
//!
//! let config = ExportConfig::new("/tmp/exports")
//!     .logo_timeout(Duration::from_secs(2))
//!     .settle_delay(Duration::ZERO);
//! assert_eq!(config.content_width, 800);
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use taraang_core::DocumentKind;

/// Lowest allowed raster scale.
pub const MIN_SCALE: f32 = 2.0;

/// Highest allowed raster scale.
pub const MAX_SCALE: f32 = 3.0;

/// Tunables of the export pipeline.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Directory exported PDFs are written to.
    pub output_dir: PathBuf,

    /// Raster scale for invoices (default: 3).
    pub invoice_scale: f32,

    /// Raster scale for quotations (default: 2).
    pub quotation_scale: f32,

    /// Wait after staging before measuring (default: 100ms).
    pub settle_delay: Duration,

    /// Upper bound on the logo load (default: 5s).
    pub logo_timeout: Duration,

    /// Width of the laid-out page in CSS pixels (default: 800).
    pub content_width: u32,

    /// Page padding in CSS pixels (default: 40).
    pub padding: u32,

    /// Width of the logo in exports (default: 250).
    pub logo_width: u32,

    /// TrueType font for text; solid blocks are painted without one.
    pub font_path: Option<PathBuf>,
}

impl ExportConfig {
    /// Defaults, writing into `output_dir`.
    pub fn new(output_dir: impl AsRef<Path>) -> Self {
        ExportConfig {
            output_dir: output_dir.as_ref().to_path_buf(),
            invoice_scale: 3.0,
            quotation_scale: 2.0,
            settle_delay: Duration::from_millis(100),
            logo_timeout: Duration::from_secs(5),
            content_width: 800,
            padding: 40,
            logo_width: 250,
            font_path: None,
        }
    }

    pub fn invoice_scale(mut self, scale: f32) -> Self {
        self.invoice_scale = scale;
        self
    }

    pub fn quotation_scale(mut self, scale: f32) -> Self {
        self.quotation_scale = scale;
        self
    }

    pub fn settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    pub fn logo_timeout(mut self, timeout: Duration) -> Self {
        self.logo_timeout = timeout;
        self
    }

    pub fn content_width(mut self, width: u32) -> Self {
        self.content_width = width;
        self
    }

    pub fn padding(mut self, padding: u32) -> Self {
        self.padding = padding;
        self
    }

    pub fn font_path(mut self, path: impl AsRef<Path>) -> Self {
        self.font_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Raster scale for a document kind, clamped to [2, 3].
    pub fn scale_for(&self, kind: DocumentKind) -> f32 {
        let scale = match kind {
            DocumentKind::Invoice => self.invoice_scale,
            DocumentKind::Quotation => self.quotation_scale,
        };
        if scale.is_nan() {
            return MIN_SCALE;
        }
        scale.clamp(MIN_SCALE, MAX_SCALE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ExportConfig::new("out");
        assert_eq!(config.scale_for(DocumentKind::Invoice), 3.0);
        assert_eq!(config.scale_for(DocumentKind::Quotation), 2.0);
        assert_eq!(config.logo_timeout, Duration::from_secs(5));
        assert_eq!(config.settle_delay, Duration::from_millis(100));
        assert_eq!(config.padding, 40);
    }

    #[test]
    fn test_scale_is_clamped() {
        let config = ExportConfig::new("out").invoice_scale(8.0).quotation_scale(0.5);
        assert_eq!(config.scale_for(DocumentKind::Invoice), MAX_SCALE);
        assert_eq!(config.scale_for(DocumentKind::Quotation), MIN_SCALE);
    }
}
