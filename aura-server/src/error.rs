use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

/// Startup and serving failures
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("listen address may not be empty")]
    EmptyListenAddr,
    #[error("invalid listen address `{address}`: {source}")]
    InvalidListenAddr {
        address: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("failed to bind to {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },
    #[error("axum server error: {source}")]
    Serve {
        #[source]
        source: std::io::Error,
    },
    #[error("failed to build data sources: {0}")]
    Sources(#[from] aura_core::Error),
    #[error("failed to configure summarization model: {0}")]
    Model(#[from] aura_llm::LlmError),
}

#[derive(Debug, Clone, Serialize)]
struct ApiErrorBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    success: Option<bool>,
    error: String,
}

/// JSON error response for the HTTP routes
#[derive(Debug, Clone)]
pub struct ApiError {
    status: StatusCode,
    body: ApiErrorBody,
}

impl ApiError {
    /// 400 with `{"error": message}`
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body: ApiErrorBody {
                success: None,
                error: message.into(),
            },
        }
    }

    /// 500 with `{"success": false, "error": message}`
    pub fn conversion_failed(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: ApiErrorBody {
                success: Some(false),
                error: message.into(),
            },
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_bodies() {
        let bad = ApiError::bad_request("No text provided");
        assert_eq!(bad.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            serde_json::to_value(&bad.body).unwrap(),
            json!({"error": "No text provided"})
        );

        let failed = ApiError::conversion_failed("quota exceeded");
        assert_eq!(failed.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            serde_json::to_value(&failed.body).unwrap(),
            json!({"success": false, "error": "quota exceeded"})
        );
    }
}
