//! HTTP-backed implementations of the source traits

pub mod aviation_weather;
pub mod supabase;

use crate::sources::{SourceError, SourceResult};
use reqwest::Response;

/// Turn a non-2xx response into `SourceError::Status`, keeping the body text
pub(crate) async fn ensure_success(response: Response) -> SourceResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    Err(SourceError::Status {
        status: status.as_u16(),
        body,
    })
}
