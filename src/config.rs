//! Configuration management for PDF Raster Server

use serde::Deserialize;
use std::env;

/// Resolution used when rasterizing pages unless `RENDER_DPI` says otherwise
pub const DEFAULT_RENDER_DPI: u32 = 200;

/// Default upload limit (100 MiB)
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 100 * 1024 * 1024;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub render: RenderConfig,
    pub upload: UploadConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    /// Rasterization resolution in dots per inch
    pub dpi: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadConfig {
    pub max_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8000,
            },
            render: RenderConfig {
                dpi: DEFAULT_RENDER_DPI,
            },
            upload: UploadConfig {
                max_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. Unset keys take their
    /// default; so do unparsable ones, with a warning.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let mut dpi = parse_or(&lookup, "RENDER_DPI", defaults.render.dpi);
        if dpi == 0 {
            tracing::warn!(
                "RENDER_DPI must be positive, using default {}",
                defaults.render.dpi
            );
            dpi = defaults.render.dpi;
        }

        Config {
            server: ServerConfig {
                host: lookup("SERVER_HOST").unwrap_or(defaults.server.host),
                port: parse_or(&lookup, "SERVER_PORT", defaults.server.port),
            },
            render: RenderConfig { dpi },
            upload: UploadConfig {
                max_bytes: parse_or(&lookup, "MAX_UPLOAD_BYTES", defaults.upload.max_bytes),
            },
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr + std::fmt::Display,
{
    match lookup(key) {
        Some(value) => value.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid value for {}: '{}', using default {}", key, value, default);
            default
        }),
        None => default,
    }
}
