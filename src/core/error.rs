//! Typed error handling for HAL serialization
//!
//! Every failure while building a HAL document is fatal to the current
//! serialization call. The error is surfaced to the HTTP layer, which turns it
//! into a JSON error response through [`IntoResponse`].
//!
//! # Example
//!
//! ```rust,ignore
//! use this_hal::prelude::*;
//!
//! match normalizer.normalize(&books, FORMAT, &context) {
//!     Ok(document) => println!("{}", document),
//!     Err(HalError::ResourceNotFound { resource_class }) => {
//!         eprintln!("{} is not a registered resource", resource_class);
//!     }
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

/// Result alias used by every collaborator of the collection normalizer
pub type HalResult<T> = std::result::Result<T, HalError>;

/// The error type for HAL serialization
#[derive(Debug, Error)]
pub enum HalError {
    /// No metadata is registered for the resource class
    #[error("Resource class '{resource_class}' not found")]
    ResourceNotFound { resource_class: String },

    /// The request URI could not be parsed
    #[error("The request URI \"{iri}\" is malformed: {message}")]
    MalformedIri { iri: String, message: String },

    /// No item normalizer is registered for the item type
    #[error("No item normalizer registered for type '{type_name}'")]
    NormalizerNotRegistered { type_name: String },

    /// The item normalizer failed for one item of the collection
    #[error("Failed to normalize {resource_class}: {message}")]
    Normalization {
        resource_class: String,
        message: String,
    },

    /// A normalized item does not expose `_links.self`
    #[error("Normalized {resource_class} item has no self link")]
    MissingSelfLink { resource_class: String },

    /// The requested format is not handled by this normalizer
    #[error("Unsupported format: {format}")]
    UnsupportedFormat { format: String },

    /// Internal errors (poisoned metadata caches)
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl HalError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            HalError::MalformedIri { .. } => StatusCode::BAD_REQUEST,
            HalError::UnsupportedFormat { .. } => StatusCode::NOT_ACCEPTABLE,
            HalError::ResourceNotFound { .. }
            | HalError::NormalizerNotRegistered { .. }
            | HalError::Normalization { .. }
            | HalError::MissingSelfLink { .. }
            | HalError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            HalError::ResourceNotFound { .. } => "RESOURCE_NOT_FOUND",
            HalError::MalformedIri { .. } => "MALFORMED_IRI",
            HalError::NormalizerNotRegistered { .. } => "NORMALIZER_NOT_REGISTERED",
            HalError::Normalization { .. } => "NORMALIZATION_FAILED",
            HalError::MissingSelfLink { .. } => "MISSING_SELF_LINK",
            HalError::UnsupportedFormat { .. } => "UNSUPPORTED_FORMAT",
            HalError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            HalError::ResourceNotFound { resource_class }
            | HalError::Normalization { resource_class, .. }
            | HalError::MissingSelfLink { resource_class } => Some(serde_json::json!({
                "resource_class": resource_class
            })),
            HalError::MalformedIri { iri, .. } => Some(serde_json::json!({ "iri": iri })),
            _ => None,
        }
    }
}

impl IntoResponse for HalError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}
