//! PDF rasterization
//!
//! A `Rasterizer` turns raw PDF bytes into an ordered sequence of page
//! images. The production implementation is backed by MuPDF; handlers only
//! see the trait so tests can substitute their own.

mod mupdf;
mod types;

pub use self::mupdf::MupdfRasterizer;
pub use types::{PageImage, PageSequence, RasterError, DEFAULT_DPI};

/// Converts PDF bytes into page images.
///
/// Implementations are blocking and CPU bound; callers are expected to run
/// them on a blocking thread.
pub trait Rasterizer: Send + Sync {
    fn rasterize(&self, data: &[u8]) -> Result<PageSequence, RasterError>;
}
