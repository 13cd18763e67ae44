//! Page conversion
//!
//! Resizes a rendered page when asked to and encodes it into one of the
//! supported output formats.

mod format;

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::DynamicImage;
use thiserror::Error;

pub use format::OutputFormat;

/// Quality used for JPEG output when the client does not send one
pub const DEFAULT_QUALITY: i64 = 100;

/// Largest width or height a page may be resized to
pub const MAX_DIMENSION: u32 = 32_768;

/// Conversion errors
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Unsupported format. Supported formats: {}", OutputFormat::supported_list())]
    UnsupportedFormat(String),
    #[error("{0}")]
    Resize(String),
    #[error(transparent)]
    Encode(#[from] image::ImageError),
}

/// Validated conversion parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionRequest {
    pub format: OutputFormat,
    /// JPEG quality, 1..=100. Ignored for other formats.
    pub quality: u8,
    pub width: Option<i64>,
    pub height: Option<i64>,
}

impl ConversionRequest {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            quality: DEFAULT_QUALITY as u8,
            width: None,
            height: None,
        }
    }

    /// Set the JPEG quality, clamped to what the encoder accepts
    pub fn with_quality(mut self, quality: i64) -> Self {
        self.quality = quality.clamp(1, 100) as u8;
        self
    }

    /// Set the target size. Zero is treated the same as absent.
    pub fn with_size(mut self, width: Option<i64>, height: Option<i64>) -> Self {
        self.width = width.filter(|w| *w != 0);
        self.height = height.filter(|h| *h != 0);
        self
    }
}

/// Encoded output ready to be sent back
#[derive(Debug, Clone)]
pub struct ConversionResult {
    pub data: Vec<u8>,
    pub content_type: &'static str,
    pub filename: String,
}

/// Work out the size a page should be resized to.
///
/// Returns `None` when no resize was requested. A single given dimension
/// keeps the original aspect ratio; both given are used as-is.
pub fn target_dimensions(
    original: (u32, u32),
    width: Option<i64>,
    height: Option<i64>,
) -> Result<Option<(u32, u32)>, ConvertError> {
    let (orig_w, orig_h) = (original.0 as f64, original.1 as f64);

    let (w, h) = match (width, height) {
        (None, None) => return Ok(None),
        (Some(w), Some(h)) => (w, h),
        (Some(w), None) => (w, scale_axis(w, orig_w, orig_h)?),
        (None, Some(h)) => (scale_axis(h, orig_h, orig_w)?, h),
    };

    if w <= 0 || h <= 0 {
        return Err(ConvertError::Resize(format!(
            "height and width must be > 0, got {}x{}",
            w, h
        )));
    }
    if w > MAX_DIMENSION as i64 || h > MAX_DIMENSION as i64 {
        return Err(ConvertError::Resize(format!(
            "target size {}x{} exceeds the {}px limit",
            w, h, MAX_DIMENSION
        )));
    }

    Ok(Some((w as u32, h as u32)))
}

fn scale_axis(given: i64, given_axis: f64, other_axis: f64) -> Result<i64, ConvertError> {
    if given_axis <= 0.0 {
        return Err(ConvertError::Resize("source image has no area".to_string()));
    }
    Ok((given as f64 / given_axis * other_axis).round() as i64)
}

/// Resize `image` as requested, then encode it
pub fn convert_page(
    image: DynamicImage,
    request: &ConversionRequest,
) -> Result<ConversionResult, ConvertError> {
    let original = (image.width(), image.height());
    let image = match target_dimensions(original, request.width, request.height)? {
        Some((w, h)) => {
            tracing::debug!(
                from_width = original.0,
                from_height = original.1,
                to_width = w,
                to_height = h,
                "Resizing page"
            );
            image.resize_exact(w, h, FilterType::Lanczos3)
        }
        None => image,
    };

    let data = encode(&image, request.format, request.quality)?;

    Ok(ConversionResult {
        data,
        content_type: request.format.content_type(),
        filename: request.format.filename(),
    })
}

/// Encode an image. Only JPEG takes the quality setting.
pub fn encode(
    image: &DynamicImage,
    format: OutputFormat,
    quality: u8,
) -> Result<Vec<u8>, ConvertError> {
    let mut output = Vec::new();
    let mut cursor = Cursor::new(&mut output);

    match format {
        OutputFormat::Jpeg => {
            image.write_with_encoder(JpegEncoder::new_with_quality(&mut cursor, quality))?
        }
        other => image.write_to(&mut cursor, other.image_format())?,
    }

    Ok(output)
}
