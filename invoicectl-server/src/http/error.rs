//! API error type with IntoResponse
//!
//! Fetch failures keep their call-site message in the body; the underlying
//! store error was already logged by the fetcher.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use invoicectl_core::FetchError;

#[derive(Debug)]
pub enum ApiError {
    /// Resource not found (404)
    NotFound { resource: &'static str, id: String },

    /// A fetcher failed (500)
    Fetch(FetchError),

    /// Malformed request parameter (400)
    BadRequest { message: String },
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::NotFound { resource, id } => (
                StatusCode::NOT_FOUND,
                json!({
                    "error": "not_found",
                    "message": format!("{} '{}' not found", resource, id)
                }),
            ),
            Self::Fetch(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({
                    "error": "fetch_failed",
                    "message": e.message()
                }),
            ),
            Self::BadRequest { message } => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": "bad_request",
                    "message": message
                }),
            ),
        };

        (status, Json(body)).into_response()
    }
}

impl From<FetchError> for ApiError {
    fn from(e: FetchError) -> Self {
        Self::Fetch(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn not_found_is_404() {
        let err = ApiError::NotFound {
            resource: "invoice",
            id: "abc123".into(),
        };
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn fetch_error_keeps_call_site_message() {
        let err = ApiError::from(FetchError::new("Failed to fetch card data."));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "fetch_failed");
        assert_eq!(json["message"], "Failed to fetch card data.");
    }

    #[tokio::test]
    async fn bad_request_is_400() {
        let err = ApiError::BadRequest {
            message: "missing tag".into(),
        };
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
