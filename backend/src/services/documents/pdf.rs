use super::signature::SignatureImage;
use chrono::{DateTime, Local};
use genpdf::elements::{Break, Image as PdfImage, Paragraph};
use genpdf::style::{Style, StyledString};
use genpdf::Document;
use image::imageops::FilterType;
use image::{load_from_memory, DynamicImage, GenericImageView};
use png::{BitDepth as PngBitDepth, ColorType as PngColorType, Encoder as PngEncoder};
use std::path::PathBuf;
use tempfile::NamedTempFile;
use thiserror::Error;

const MARGIN_MM: i32 = 10;
const IMAGE_DPI: f64 = 150.0;
const BODY_FONT_SIZE_PT: u8 = 11;
const TITLE_FONT_SIZE_PT: u8 = 18;
const LINE_SPACING: f64 = 1.4;
/// Signatures are shown at most this wide, in CSS pixels (96 per inch).
const SIGNATURE_MAX_WIDTH_PX: f64 = 300.0;
const SIGNED_ON_FORMAT: &str = "%B %d, %Y at %I:%M %p";

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("no usable font family in {}: {reason}", .dir.display())]
    Font { dir: PathBuf, reason: String },
    #[error("cannot decode signature image: {0}")]
    Image(#[from] image::ImageError),
    #[error("cannot encode signature image: {0}")]
    Png(#[from] png::EncodingError),
    #[error("pdf generation failed: {0}")]
    Pdf(#[from] genpdf::error::Error),
    #[error("temporary file error: {0}")]
    Io(#[from] std::io::Error),
}

/// What gets laid out into a PDF.
#[derive(Debug, Clone)]
pub struct DocumentMarkup {
    pub title: String,
    /// Filled text; every newline becomes a line break.
    pub body: String,
    pub signature: Option<SignatureImage>,
    pub signed_at: DateTime<Local>,
}

/// Turns markup into PDF bytes.
pub trait DocumentRenderer: Send + Sync {
    fn render(&self, markup: &DocumentMarkup) -> Result<Vec<u8>, RenderError>;
}

/// genpdf-backed renderer using TTF families from a fonts directory.
pub struct GenPdfRenderer {
    fonts_dir: PathBuf,
    font_families: Vec<String>,
}

impl GenPdfRenderer {
    pub fn new(fonts_dir: impl Into<PathBuf>, font_families: Vec<String>) -> Self {
        GenPdfRenderer {
            fonts_dir: fonts_dir.into(),
            font_families,
        }
    }

    /// Loads the first configured family that has all four styles on disk.
    fn load_font(&self) -> Result<genpdf::fonts::FontFamily<genpdf::fonts::FontData>, RenderError> {
        let mut reason = "no font families configured".to_string();
        for family in &self.font_families {
            match genpdf::fonts::from_files(&self.fonts_dir, family, None) {
                Ok(fonts) => return Ok(fonts),
                Err(e) => reason = format!("{}: {}", family, e),
            }
        }
        Err(RenderError::Font {
            dir: self.fonts_dir.clone(),
            reason,
        })
    }

    fn configure_document(&self, title: &str) -> Result<Document, RenderError> {
        let mut doc = Document::new(self.load_font()?);
        doc.set_title(title);
        doc.set_font_size(BODY_FONT_SIZE_PT);
        doc.set_line_spacing(LINE_SPACING);

        let mut decorator = genpdf::SimplePageDecorator::new();
        decorator.set_margins(MARGIN_MM);
        doc.set_page_decorator(decorator);
        Ok(doc)
    }
}

impl DocumentRenderer for GenPdfRenderer {
    fn render(&self, markup: &DocumentMarkup) -> Result<Vec<u8>, RenderError> {
        let mut doc = self.configure_document(&markup.title)?;

        doc.push(Paragraph::new(StyledString::new(
            markup.title.clone(),
            Style::new().bold().with_font_size(TITLE_FONT_SIZE_PT),
        )));
        doc.push(Break::new(1));
        push_text_with_breaks(&mut doc, &markup.body);

        // The PNG handed to genpdf must outlive rendering.
        let mut temp_files: Vec<NamedTempFile> = Vec::new();
        if let Some(signature) = &markup.signature {
            push_signature(&mut doc, signature, &markup.signed_at, &mut temp_files)?;
        }

        let mut bytes = Vec::new();
        doc.render(&mut bytes)?;
        Ok(bytes)
    }
}

/// Pushes `text` line by line; blank lines become vertical space.
fn push_text_with_breaks(doc: &mut Document, text: &str) {
    for line in text.lines() {
        if line.trim().is_empty() {
            doc.push(Break::new(1));
        } else {
            doc.push(Paragraph::new(line));
        }
    }
}

fn push_signature(
    doc: &mut Document,
    signature: &SignatureImage,
    signed_at: &DateTime<Local>,
    temp_files: &mut Vec<NamedTempFile>,
) -> Result<(), RenderError> {
    doc.push(Break::new(2));
    doc.push(Paragraph::new(StyledString::new(
        "Electronic Signature:",
        Style::new().bold(),
    )));

    let png = signature_png(signature.bytes())?;
    let mut img_elem = PdfImage::from_path(png.path())?;
    img_elem.set_dpi(IMAGE_DPI);
    temp_files.push(png);
    doc.push(img_elem);

    doc.push(Break::new(1));
    doc.push(Paragraph::new(format!(
        "Signed on: {}",
        signed_at.format(SIGNED_ON_FORMAT)
    )));
    Ok(())
}

/// Re-encodes a signature as an opaque RGB PNG no wider than the signature box.
///
/// Transparent pixels are flattened onto white, since signing pads usually
/// produce a transparent background.
fn signature_png(bytes: &[u8]) -> Result<NamedTempFile, RenderError> {
    let max_width_px = SIGNATURE_MAX_WIDTH_PX * IMAGE_DPI / 96.0;

    let img = load_from_memory(bytes)?;
    let (orig_w, orig_h) = img.dimensions();
    let scale = (max_width_px / orig_w as f64).min(1.0);

    let resized: DynamicImage = if scale >= 1.0 {
        img
    } else {
        let new_w = (orig_w as f64 * scale).max(1.0).round() as u32;
        let new_h = (orig_h as f64 * scale).max(1.0).round() as u32;
        img.resize_exact(new_w, new_h, FilterType::Lanczos3)
    };

    let rgba = resized.to_rgba8();
    let (w, h) = rgba.dimensions();
    let mut background = image::RgbaImage::from_pixel(w, h, image::Rgba([255, 255, 255, 255]));
    image::imageops::overlay(&mut background, &rgba, 0, 0);
    let raw = DynamicImage::ImageRgba8(background).to_rgb8().into_raw();

    let mut tmp = tempfile::Builder::new().suffix(".png").tempfile()?;
    {
        let file = tmp.as_file_mut();
        let mut encoder = PngEncoder::new(file, w, h);
        encoder.set_color(PngColorType::Rgb);
        encoder.set_depth(PngBitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(&raw)?;
    }
    Ok(tmp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba, RgbaImage};
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    fn png_bytes(w: u32, h: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(w, h, Rgba([0, 0, 0, 0]));
        let mut out = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(img)
            .write_to(&mut out, ImageFormat::Png)
            .unwrap();
        out.into_inner()
    }

    #[test]
    fn wide_signatures_are_scaled_down() {
        let tmp = signature_png(&png_bytes(600, 200)).unwrap();
        let decoded = image::open(tmp.path()).unwrap();
        assert_eq!(decoded.dimensions(), (469, 156));
    }

    #[test]
    fn transparent_pixels_become_white() {
        let tmp = signature_png(&png_bytes(40, 20)).unwrap();
        let decoded = image::open(tmp.path()).unwrap().to_rgb8();
        assert_eq!(decoded.dimensions(), (40, 20));
        assert_eq!(decoded.get_pixel(0, 0).0, [255, 255, 255]);
    }

    #[test]
    fn garbage_is_not_an_image() {
        assert!(matches!(
            signature_png(b"not an image"),
            Err(RenderError::Image(_))
        ));
    }

    #[test]
    fn missing_fonts_fail_rendering() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = GenPdfRenderer::new(dir.path(), vec!["Nope".to_string()]);
        let markup = DocumentMarkup {
            title: "Lease".to_string(),
            body: "Body".to_string(),
            signature: None,
            signed_at: Local::now(),
        };
        assert!(matches!(
            renderer.render(&markup),
            Err(RenderError::Font { .. })
        ));
    }
}
