//! PDF Raster Server Library
//!
//! Converts the first page of an uploaded PDF into a raster image and reports
//! basic page metadata. The binary in main.rs wires these modules into an
//! axum server; the integration tests drive the same router directly.
//!
//! # Modules
//!
//! - `raster`: PDF bytes to page images via MuPDF
//! - `convert`: output formats, resizing and encoding
//! - `routes`: HTTP handlers for `/convert`, `/pdf-info` and `/health`

pub mod config;
pub mod convert;
pub mod error;
pub mod raster;
pub mod routes;
pub mod state;

pub use config::Config;
pub use error::ApiError;
pub use routes::build_router;
pub use state::AppState;
