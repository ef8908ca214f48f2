//! HAL responses for axum handlers

use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Media type of HAL documents
pub const HAL_CONTENT_TYPE: &str = "application/hal+json";

/// Serializes its body as `application/hal+json`
///
/// # Example
///
/// ```rust,ignore
/// async fn list_books(State(state): State<AppState>) -> Result<HalJson<Value>, HalError> {
///     let document = state.normalizer.normalize(&books, FORMAT, &context)?;
///     Ok(HalJson(document))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct HalJson<T>(pub T);

impl<T: Serialize> IntoResponse for HalJson<T> {
    fn into_response(self) -> Response {
        match serde_json::to_vec(&self.0) {
            Ok(body) => (
                [(header::CONTENT_TYPE, HeaderValue::from_static(HAL_CONTENT_TYPE))],
                body,
            )
                .into_response(),
            Err(e) => {
                tracing::error!(error = %e, "Failed to serialize HAL document");
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
            }
        }
    }
}
