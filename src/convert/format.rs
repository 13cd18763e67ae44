//! Output image formats

use std::fmt;
use std::str::FromStr;

use super::ConvertError;

/// Raster formats a page can be converted to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Jpeg,
    Tiff,
    Bmp,
}

impl OutputFormat {
    pub const SUPPORTED: [OutputFormat; 4] = [
        OutputFormat::Png,
        OutputFormat::Jpeg,
        OutputFormat::Tiff,
        OutputFormat::Bmp,
    ];

    /// Canonical uppercase name, as accepted from clients
    pub fn name(&self) -> &'static str {
        match self {
            OutputFormat::Png => "PNG",
            OutputFormat::Jpeg => "JPEG",
            OutputFormat::Tiff => "TIFF",
            OutputFormat::Bmp => "BMP",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Jpeg => "jpeg",
            OutputFormat::Tiff => "tiff",
            OutputFormat::Bmp => "bmp",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            OutputFormat::Png => "image/png",
            OutputFormat::Jpeg => "image/jpeg",
            OutputFormat::Tiff => "image/tiff",
            OutputFormat::Bmp => "image/bmp",
        }
    }

    pub fn filename(&self) -> String {
        format!("converted_image.{}", self.extension())
    }

    pub(crate) fn image_format(&self) -> image::ImageFormat {
        match self {
            OutputFormat::Png => image::ImageFormat::Png,
            OutputFormat::Jpeg => image::ImageFormat::Jpeg,
            OutputFormat::Tiff => image::ImageFormat::Tiff,
            OutputFormat::Bmp => image::ImageFormat::Bmp,
        }
    }

    /// Supported names rendered as `['PNG', 'JPEG', 'TIFF', 'BMP']`
    pub fn supported_list() -> String {
        let names: Vec<String> = Self::SUPPORTED
            .iter()
            .map(|f| format!("'{}'", f.name()))
            .collect();
        format!("[{}]", names.join(", "))
    }
}

impl FromStr for OutputFormat {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_uppercase();
        Self::SUPPORTED
            .into_iter()
            .find(|f| f.name() == upper)
            .ok_or(ConvertError::UnsupportedFormat(upper))
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
