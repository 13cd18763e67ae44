//! Error types for the PDF Raster Server
//!
//! Every failure leaves the service as `{"detail": "<message>"}`. Bad input
//! (unsupported format, unreadable or empty PDF) maps to 400, failures while
//! resizing or encoding map to 500, malformed forms map to 422 and uploads
//! over the body limit map to 413.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::convert::ConvertError;
use crate::raster::RasterError;

/// Application-wide result type
pub type Result<T> = std::result::Result<T, ApiError>;

/// HTTP-facing error type
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Processing(String),

    #[error("{0}")]
    InvalidForm(String),

    #[error("{0}")]
    PayloadTooLarge(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Processing(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::InvalidForm(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
        }
    }
}

impl From<RasterError> for ApiError {
    fn from(e: RasterError) -> Self {
        match e {
            RasterError::NoPages => ApiError::BadRequest(e.to_string()),
            other => ApiError::BadRequest(format!("Error processing the PDF: {}", other)),
        }
    }
}

impl From<ConvertError> for ApiError {
    fn from(e: ConvertError) -> Self {
        match e {
            ConvertError::UnsupportedFormat(ref requested) => {
                tracing::debug!(requested = %requested, "Unsupported output format");
                ApiError::BadRequest(e.to_string())
            }
            ConvertError::Resize(msg) => {
                ApiError::Processing(format!("Error resizing the image: {}", msg))
            }
            ConvertError::Encode(err) => {
                ApiError::Processing(format!("Error saving the image: {}", err))
            }
        }
    }
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    detail: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::warn!("Request rejected ({}): {}", status.as_u16(), self);
        }

        let body = Json(ErrorResponse {
            detail: self.to_string(),
        });

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(err: ApiError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_bad_request_body() {
        let (status, json) = body_json(ApiError::BadRequest("nope".into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json, serde_json::json!({ "detail": "nope" }));
    }

    #[tokio::test]
    async fn test_processing_is_server_error() {
        let (status, json) = body_json(ApiError::Processing("boom".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["detail"], "boom");
    }

    #[tokio::test]
    async fn test_payload_too_large_body() {
        let (status, json) = body_json(ApiError::PayloadTooLarge("too big".into())).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(json, serde_json::json!({ "detail": "too big" }));
    }

    #[test]
    fn test_raster_errors_are_client_errors() {
        let err: ApiError = RasterError::EmptyInput.into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert!(err.to_string().starts_with("Error processing the PDF: "));

        let err: ApiError = RasterError::NoPages.into();
        assert_eq!(err.to_string(), "The PDF does not contain any pages.");
    }

    #[test]
    fn test_convert_error_classification() {
        let err: ApiError = ConvertError::UnsupportedFormat("GIF".into()).into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

        let err: ApiError = ConvertError::Resize("bad size".into()).into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "Error resizing the image: bad size");
    }
}
