//! # Logo Loading
//!
//! The export replaces the live logo with a freshly loaded image. Loading is
//! behind [`LogoLoader`] so the admin app can read from disk or an asset
//! host, and tests can fail or stall on purpose.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

use taraang_core::document::ImageData;

use crate::error::{ExportError, ExportResult};

/// Loads and decodes an image by source name.
#[async_trait]
pub trait LogoLoader: Send + Sync {
    async fn load(&self, source: &str) -> ExportResult<ImageData>;
}

// =============================================================================
// File Loader
// =============================================================================

/// Reads PNG assets from a directory (or one fixed file).
#[derive(Debug, Clone)]
pub struct FileLogoLoader {
    asset_dir: PathBuf,
    override_path: Option<PathBuf>,
}

impl FileLogoLoader {
    /// Resolves sources relative to `asset_dir`.
    pub fn new(asset_dir: impl AsRef<Path>) -> Self {
        FileLogoLoader {
            asset_dir: asset_dir.as_ref().to_path_buf(),
            override_path: None,
        }
    }

    /// Always loads `path`, whatever the source name.
    pub fn fixed(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        FileLogoLoader {
            asset_dir: path.parent().map(Path::to_path_buf).unwrap_or_default(),
            override_path: Some(path),
        }
    }

    fn resolve(&self, source: &str) -> PathBuf {
        self.override_path
            .clone()
            .unwrap_or_else(|| self.asset_dir.join(source.trim_start_matches('/')))
    }
}

#[async_trait]
impl LogoLoader for FileLogoLoader {
    async fn load(&self, source: &str) -> ExportResult<ImageData> {
        let path = self.resolve(source);
        debug!(path = %path.display(), "Reading logo");
        let bytes = tokio::fs::read(&path).await?;
        decode_png(&bytes)
    }
}

// =============================================================================
// HTTP Loader
// =============================================================================

/// Fetches PNG assets from a base URL.
#[derive(Debug, Clone)]
pub struct HttpLogoLoader {
    client: reqwest::Client,
    base_url: String,
}

impl HttpLogoLoader {
    pub fn new(base_url: impl Into<String>) -> ExportResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| ExportError::Encode(format!("HTTP client: {}", e)))?;
        Ok(HttpLogoLoader {
            client,
            base_url: base_url.into(),
        })
    }
}

#[async_trait]
impl LogoLoader for HttpLogoLoader {
    async fn load(&self, source: &str) -> ExportResult<ImageData> {
        let url = format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            source.trim_start_matches('/')
        );
        debug!(url = %url, "Fetching logo");
        let io = |e: reqwest::Error| ExportError::Io(std::io::Error::other(e.to_string()));
        let bytes = self
            .client
            .get(&url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(io)?
            .bytes()
            .await
            .map_err(io)?;
        decode_png(&bytes)
    }
}

// =============================================================================
// PNG Decoding
// =============================================================================

/// Decodes a PNG into opaque RGB, compositing any alpha over white.
pub fn decode_png(bytes: &[u8]) -> ExportResult<ImageData> {
    let mut decoder = png::Decoder::new(bytes);
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
    let mut reader = decoder.read_info()?;

    let mut buf = vec![0u8; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf)?;
    buf.truncate(info.buffer_size());

    let (width, height) = (info.width, info.height);
    let over_white = |c: u8, a: u8| -> u8 {
        let (c, a) = (u32::from(c), u32::from(a));
        ((c * a + 255 * (255 - a)) / 255) as u8
    };

    let rgb: Vec<u8> = match info.color_type {
        png::ColorType::Rgb => buf,
        png::ColorType::Rgba => buf
            .chunks_exact(4)
            .flat_map(|p| [over_white(p[0], p[3]), over_white(p[1], p[3]), over_white(p[2], p[3])])
            .collect(),
        png::ColorType::Grayscale => buf.iter().flat_map(|g| [*g, *g, *g]).collect(),
        png::ColorType::GrayscaleAlpha => buf
            .chunks_exact(2)
            .flat_map(|p| {
                let g = over_white(p[0], p[1]);
                [g, g, g]
            })
            .collect(),
        other => {
            return Err(ExportError::Encode(format!(
                "Unsupported PNG color type: {:?}",
                other
            )))
        }
    };

    if rgb.len() != (width as usize) * (height as usize) * 3 {
        return Err(ExportError::Encode("PNG pixel data truncated".to_string()));
    }

    Ok(ImageData { width, height, rgb })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// A small RGBA PNG: left half red, right half transparent.
    pub(crate) fn sample_png(width: u32, height: u32) -> Vec<u8> {
        let mut data = Vec::new();
        for _y in 0..height {
            for x in 0..width {
                if x < width / 2 {
                    data.extend_from_slice(&[255, 0, 0, 255]);
                } else {
                    data.extend_from_slice(&[0, 0, 0, 0]);
                }
            }
        }
        let mut out = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut out, width, height);
            encoder.set_color(png::ColorType::Rgba);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(&data).unwrap();
        }
        out
    }

    #[test]
    fn test_decode_composites_alpha_over_white() {
        let image = decode_png(&sample_png(4, 2)).unwrap();
        assert_eq!((image.width, image.height), (4, 2));
        assert_eq!(&image.rgb[0..3], &[255, 0, 0]);
        assert_eq!(&image.rgb[9..12], &[255, 255, 255]);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(decode_png(b"not a png").is_err());
    }

    #[tokio::test]
    async fn test_file_loader_reports_missing_file() {
        let loader = FileLogoLoader::new(std::env::temp_dir().join("taraang-missing-assets"));
        let err = loader.load("new-logo.png").await.unwrap_err();
        assert!(matches!(err, ExportError::Io(_)));
    }

    #[tokio::test]
    async fn test_file_loader_reads_png() {
        let dir = std::env::temp_dir().join(format!("taraang-logo-{}", uuid::Uuid::new_v4()));
        tokio::fs::create_dir_all(&dir).await.unwrap();
        tokio::fs::write(dir.join("new-logo.png"), sample_png(6, 3)).await.unwrap();

        let image = FileLogoLoader::new(&dir).load("/new-logo.png").await.unwrap();
        assert_eq!(image.width, 6);

        let fixed = FileLogoLoader::fixed(dir.join("new-logo.png"));
        assert_eq!(fixed.load("anything.png").await.unwrap().height, 3);

        let _ = tokio::fs::remove_dir_all(&dir).await;
    }
}
