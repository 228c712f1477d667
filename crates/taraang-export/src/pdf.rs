//! # PDF Emitter
//!
//! Wraps one rasterized page in a minimal PDF: a single page 210mm wide whose
//! height follows the image's aspect ratio, with the bitmap as a
//! Flate-compressed RGB image XObject painted from the origin.
//!
//! ## Object Layout
//! ```text
//! 1 Catalog ─► 2 Pages ─► 3 Page ─┬─► 4 Content   q W 0 0 H 0 0 cm /Im1 Do Q
//!                                 └─► 5 Image     /Im1, DeviceRGB, FlateDecode
//! 6 Info (Producer, CreationDate)
//! ```

use std::io::{self, Write};

use flate2::write::ZlibEncoder;
use flate2::Compression;
use serde::Serialize;

use crate::error::{ExportError, ExportResult};
use crate::raster::RasterImage;

/// A4 width in points.
pub const PAGE_WIDTH_PT: f64 = 595.2756;

const PRODUCER: &str = "Taraang Events";

/// Geometry of the emitted document.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub width_pt: f64,
    pub height_pt: f64,
    pub pages: u32,
}

impl PageInfo {
    /// Page size for an image of `width` × `height` pixels.
    pub fn for_image(width: u32, height: u32) -> Self {
        PageInfo {
            width_pt: PAGE_WIDTH_PT,
            height_pt: f64::from(height) * PAGE_WIDTH_PT / f64::from(width),
            pages: 1,
        }
    }
}

/// Encodes `image` as a one-page PDF.
pub fn render_pdf(image: &RasterImage) -> ExportResult<(Vec<u8>, PageInfo)> {
    if image.width == 0 || image.height == 0 {
        return Err(ExportError::Encode("Cannot paginate an empty image".to_string()));
    }
    let expected = (image.width as usize) * (image.height as usize) * 3;
    if image.rgb.len() != expected {
        return Err(ExportError::Encode(format!(
            "Image buffer holds {} bytes, expected {}",
            image.rgb.len(),
            expected
        )));
    }

    let info = PageInfo::for_image(image.width, image.height);
    let pixels = deflate(&image.rgb)
        .map_err(|e| ExportError::Encode(format!("Image compression failed: {}", e)))?;
    let content = format!(
        "q {} 0 0 {} 0 0 cm /Im1 Do Q",
        format_real(info.width_pt),
        format_real(info.height_pt)
    );
    let created = chrono::Utc::now().format("D:%Y%m%d%H%M%SZ").to_string();

    let objects = [
        Obj::dict(vec![("Type", Obj::name("Catalog")), ("Pages", Obj::Ref(2))]),
        Obj::dict(vec![
            ("Type", Obj::name("Pages")),
            ("Kids", Obj::Array(vec![Obj::Ref(3)])),
            ("Count", Obj::Int(1)),
        ]),
        Obj::dict(vec![
            ("Type", Obj::name("Page")),
            ("Parent", Obj::Ref(2)),
            (
                "MediaBox",
                Obj::Array(vec![
                    Obj::Int(0),
                    Obj::Int(0),
                    Obj::Real(info.width_pt),
                    Obj::Real(info.height_pt),
                ]),
            ),
            (
                "Resources",
                Obj::dict(vec![("XObject", Obj::dict(vec![("Im1", Obj::Ref(5))]))]),
            ),
            ("Contents", Obj::Ref(4)),
        ]),
        Obj::Stream {
            dict: Vec::new(),
            data: content.into_bytes(),
        },
        Obj::Stream {
            dict: vec![
                ("Type", Obj::name("XObject")),
                ("Subtype", Obj::name("Image")),
                ("Width", Obj::Int(i64::from(image.width))),
                ("Height", Obj::Int(i64::from(image.height))),
                ("ColorSpace", Obj::name("DeviceRGB")),
                ("BitsPerComponent", Obj::Int(8)),
                ("Filter", Obj::name("FlateDecode")),
            ],
            data: pixels,
        },
        Obj::dict(vec![
            ("Producer", Obj::Str(PRODUCER.to_string())),
            ("CreationDate", Obj::Str(created)),
        ]),
    ];

    let mut writer = PdfWriter::new(Vec::new());
    writer.header()?;
    for (i, obj) in objects.iter().enumerate() {
        writer.object(i as u32 + 1, obj)?;
    }
    writer.trailer(1, 6)?;
    Ok((writer.into_inner(), info))
}

fn deflate(data: &[u8]) -> io::Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}

// =============================================================================
// Objects
// =============================================================================

#[derive(Debug, Clone)]
enum Obj {
    Int(i64),
    Real(f64),
    Name(&'static str),
    Str(String),
    Array(Vec<Obj>),
    /// Ordered so output is deterministic.
    Dict(Vec<(&'static str, Obj)>),
    Stream {
        dict: Vec<(&'static str, Obj)>,
        data: Vec<u8>,
    },
    Ref(u32),
}

impl Obj {
    fn name(name: &'static str) -> Self {
        Obj::Name(name)
    }

    fn dict(entries: Vec<(&'static str, Obj)>) -> Self {
        Obj::Dict(entries)
    }
}

// =============================================================================
// Writer
// =============================================================================

/// Serializes objects while recording byte offsets for the xref table.
struct PdfWriter<W: Write> {
    out: W,
    offset: usize,
    xref: Vec<usize>,
}

impl<W: Write> PdfWriter<W> {
    fn new(out: W) -> Self {
        PdfWriter {
            out,
            offset: 0,
            xref: Vec::new(),
        }
    }

    fn bytes(&mut self, data: &[u8]) -> io::Result<()> {
        self.out.write_all(data)?;
        self.offset += data.len();
        Ok(())
    }

    fn str(&mut self, s: &str) -> io::Result<()> {
        self.bytes(s.as_bytes())
    }

    fn header(&mut self) -> io::Result<()> {
        self.str("%PDF-1.7\n")?;
        // High-bit comment marks the file as binary
        self.bytes(b"%\xe2\xe3\xcf\xd3\n")
    }

    /// Objects must be written in order, starting at 1.
    fn object(&mut self, number: u32, obj: &Obj) -> io::Result<()> {
        self.xref.push(self.offset);
        self.str(&format!("{} 0 obj\n", number))?;
        self.value(obj)?;
        self.str("\nendobj\n")
    }

    fn entries(&mut self, entries: &[(&'static str, Obj)]) -> io::Result<()> {
        for (key, value) in entries {
            self.str(" /")?;
            self.str(key)?;
            self.str(" ")?;
            self.value(value)?;
        }
        Ok(())
    }

    fn value(&mut self, obj: &Obj) -> io::Result<()> {
        match obj {
            Obj::Int(n) => self.str(&n.to_string()),
            Obj::Real(f) => self.str(&format_real(*f)),
            Obj::Name(name) => self.str(&format!("/{}", name)),
            Obj::Str(s) => self.str(&format!("({})", escape_string(s))),
            Obj::Array(items) => {
                self.str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        self.str(" ")?;
                    }
                    self.value(item)?;
                }
                self.str("]")
            }
            Obj::Dict(entries) => {
                self.str("<<")?;
                self.entries(entries)?;
                self.str(" >>")
            }
            Obj::Stream { dict, data } => {
                self.str("<<")?;
                self.entries(dict)?;
                self.str(&format!(" /Length {} >>\nstream\n", data.len()))?;
                self.bytes(data)?;
                self.str("\nendstream")
            }
            Obj::Ref(n) => self.str(&format!("{} 0 R", n)),
        }
    }

    fn trailer(&mut self, root: u32, info: u32) -> io::Result<()> {
        let xref_at = self.offset;
        let size = self.xref.len() + 1;
        self.str(&format!("xref\n0 {}\n", size))?;
        self.bytes(b"0000000000 65535 f\r\n")?;
        let offsets = std::mem::take(&mut self.xref);
        for offset in offsets {
            self.str(&format!("{:010} 00000 n\r\n", offset))?;
        }
        self.str(&format!(
            "trailer\n<< /Size {} /Root {} 0 R /Info {} 0 R >>\nstartxref\n{}\n%%EOF\n",
            size, root, info, xref_at
        ))
    }

    fn into_inner(self) -> W {
        self.out
    }
}

fn escape_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' | '(' | ')' => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}

/// Plain decimal, no exponent, trailing zeros trimmed.
fn format_real(f: f64) -> String {
    if f == f.floor() && f.abs() < 1e15 {
        return format!("{:.1}", f);
    }
    format!("{:.4}", f)
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::ZlibDecoder;
    use std::io::Read;

    fn image(width: u32, height: u32) -> RasterImage {
        RasterImage {
            width,
            height,
            rgb: vec![0xee; (width * height * 3) as usize],
        }
    }

    #[test]
    fn test_page_height_follows_aspect_ratio() {
        let info = PageInfo::for_image(1600, 2400);
        assert_eq!(info.width_pt, PAGE_WIDTH_PT);
        assert!((info.height_pt - PAGE_WIDTH_PT * 1.5).abs() < 1e-9);
        assert_eq!(info.pages, 1);
    }

    #[test]
    fn test_document_structure() {
        let (bytes, info) = render_pdf(&image(8, 4)).unwrap();
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.starts_with("%PDF-1.7\n"));
        assert!(text.contains("/Type /Pages /Kids [3 0 R] /Count 1"));
        assert!(text.contains("/MediaBox [0 0 595.2756 297.6378]"));
        assert!(text.contains("q 595.2756 0 0 297.6378 0 0 cm /Im1 Do Q"));
        assert!(text.contains("/Filter /FlateDecode"));
        assert!(text.contains("/Size 7 /Root 1 0 R /Info 6 0 R"));
        assert!(text.trim_end().ends_with("%%EOF"));
        assert_eq!(text.matches("/Type /Page ").count(), 1);
        assert_eq!(info.pages, 1);
    }

    #[test]
    fn test_xref_offsets_point_at_objects() {
        let (bytes, _) = render_pdf(&image(2, 2)).unwrap();
        let text = String::from_utf8_lossy(&bytes).to_string();
        let xref_at = text.rfind("xref\n").unwrap();
        let entries: Vec<usize> = text[xref_at..]
            .lines()
            .skip(3)
            .take(6)
            .map(|l| l[..10].parse().unwrap())
            .collect();
        for (i, offset) in entries.iter().enumerate() {
            let expected = format!("{} 0 obj", i + 1);
            assert_eq!(&bytes[*offset..*offset + expected.len()], expected.as_bytes());
        }
    }

    #[test]
    fn test_pixels_round_trip_through_flate() {
        let compressed = deflate(&[1, 2, 3, 4, 5, 6]).unwrap();
        let mut out = Vec::new();
        ZlibDecoder::new(&compressed[..]).read_to_end(&mut out).unwrap();
        assert_eq!(out, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_mismatched_buffer_is_rejected() {
        let bad = RasterImage {
            width: 4,
            height: 4,
            rgb: vec![0; 5],
        };
        assert!(matches!(render_pdf(&bad), Err(ExportError::Encode(_))));
    }

    #[test]
    fn test_format_real() {
        assert_eq!(format_real(1.0), "1.0");
        assert_eq!(format_real(595.2756), "595.2756");
        assert_eq!(format_real(0.5), "0.5");
    }
}
