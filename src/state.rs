//! Application state management

use std::sync::Arc;

use crate::config::Config;
use crate::raster::{MupdfRasterizer, Rasterizer};

/// Shared application state
///
/// Built once at startup and never mutated; requests only read from it.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: Config,
    rasterizer: Arc<dyn Rasterizer>,
}

impl AppState {
    /// Create a new application state backed by MuPDF.
    ///
    /// Handlers only ever look at the first page, so the rasterizer stops
    /// after rendering it.
    pub fn new(config: Config) -> Self {
        let rasterizer = MupdfRasterizer::new(config.render.dpi).with_page_limit(1);
        Self::with_rasterizer(config, Arc::new(rasterizer))
    }

    /// Create a state around an arbitrary rasterizer
    pub fn with_rasterizer(config: Config, rasterizer: Arc<dyn Rasterizer>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, rasterizer }),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Get a handle to the rasterizer
    pub fn rasterizer(&self) -> Arc<dyn Rasterizer> {
        Arc::clone(&self.inner.rasterizer)
    }
}
