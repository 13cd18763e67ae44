//! Shared fixtures for the integration tests

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, Response};
use axum::Router;
use tower::ServiceExt;

use pdf_raster_server::config::Config;
use pdf_raster_server::raster::{PageSequence, RasterError, Rasterizer};
use pdf_raster_server::{build_router, AppState};

/// Page size used by most tests, in points
pub const PAGE_WIDTH: u32 = 200;
pub const PAGE_HEIGHT: u32 = 100;

/// Build a PDF with `count` pages of `width` x `height` points.
///
/// Each page is filled with colored vertical stripes so lossy encoders have
/// something to work on.
pub fn pdf_with_pages(count: usize, width: u32, height: u32) -> Vec<u8> {
    pdf_with_sizes(&vec![(width, height); count])
}

/// Build a PDF whose pages have the given sizes, in order
pub fn pdf_with_sizes(sizes: &[(u32, u32)]) -> Vec<u8> {
    let count = sizes.len();
    let mut objects: Vec<String> = Vec::new();

    let kids: Vec<String> = (0..count).map(|i| format!("{} 0 R", 3 + i * 2)).collect();
    objects.push("<< /Type /Catalog /Pages 2 0 R >>".to_string());
    objects.push(format!(
        "<< /Type /Pages /Kids [{}] /Count {} >>",
        kids.join(" "),
        count
    ));

    for (i, &(width, height)) in sizes.iter().enumerate() {
        let content = stripes(width, height, i);
        objects.push(format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {} {}] /Contents {} 0 R /Resources << >> >>",
            width,
            height,
            4 + i * 2
        ));
        objects.push(format!(
            "<< /Length {} >>\nstream\n{}\nendstream",
            content.len(),
            content
        ));
    }

    let mut pdf = b"%PDF-1.4\n".to_vec();
    let mut offsets = Vec::with_capacity(objects.len());
    for (index, body) in objects.iter().enumerate() {
        offsets.push(pdf.len());
        pdf.extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", index + 1, body).as_bytes());
    }

    let xref_offset = pdf.len();
    let mut xref = format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1);
    for offset in offsets {
        xref.push_str(&format!("{:010} 00000 n \n", offset));
    }
    xref.push_str(&format!(
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
        objects.len() + 1,
        xref_offset
    ));
    pdf.extend_from_slice(xref.as_bytes());
    pdf
}

fn stripes(width: u32, height: u32, seed: usize) -> String {
    let colors = ["1 0 0", "0 0.6 0", "0 0 1", "0.9 0.8 0.1", "0.2 0.2 0.2"];
    let stripe = (width / 10).max(1);
    let mut ops = String::new();
    for (n, x) in (0..width).step_by(stripe as usize).enumerate() {
        let color = colors[(n + seed) % colors.len()];
        ops.push_str(&format!("{} rg {} 0 {} {} re f\n", color, x, stripe, height));
    }
    ops
}

/// Config rendering at 72 dpi so one point maps to one pixel
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.render.dpi = 72;
    config
}

pub fn test_app() -> Router {
    app_with_config(test_config())
}

pub fn app_with_config(config: Config) -> Router {
    build_router(AppState::new(config))
}

pub fn app_with_rasterizer(rasterizer: Arc<dyn Rasterizer>) -> Router {
    build_router(AppState::with_rasterizer(test_config(), rasterizer))
}

/// Rasterizer that accepts anything and yields no pages
pub struct EmptyRasterizer;

impl Rasterizer for EmptyRasterizer {
    fn rasterize(&self, _data: &[u8]) -> Result<PageSequence, RasterError> {
        Ok(PageSequence::default())
    }
}

/// Hand-built multipart/form-data body
pub struct MultipartBody {
    boundary: String,
    body: Vec<u8>,
}

impl MultipartBody {
    pub fn new() -> Self {
        Self {
            boundary: "----pdf-raster-test-boundary".to_string(),
            body: Vec::new(),
        }
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                self.boundary, name, value
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, filename: &str, data: &[u8]) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: application/pdf\r\n\r\n",
                self.boundary, name, filename
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(data);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    pub fn pdf(self, data: &[u8]) -> Self {
        self.file("file", "document.pdf", data)
    }

    pub fn into_request(mut self, uri: &str) -> Request<Body> {
        self.body
            .extend_from_slice(format!("--{}--\r\n", self.boundary).as_bytes());
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", self.boundary),
            )
            .body(Body::from(self.body))
            .unwrap()
    }
}

/// Send a request through the router and collect the response body
pub async fn send(app: Router, request: Request<Body>) -> (Response<Body>, Vec<u8>) {
    let response = app.oneshot(request).await.unwrap();
    let (parts, body) = response.into_parts();
    let bytes = to_bytes(body, usize::MAX).await.unwrap();
    (Response::from_parts(parts, Body::empty()), bytes.to_vec())
}

pub fn detail(body: &[u8]) -> String {
    let json: serde_json::Value = serde_json::from_slice(body).unwrap();
    json["detail"].as_str().unwrap().to_string()
}
