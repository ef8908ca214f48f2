//! Core module containing the fundamental types of HAL serialization

pub mod error;
pub mod inflector;
pub mod iri;
pub mod pagination;

pub use error::{ErrorResponse, HalError, HalResult};
pub use inflector::{Pluralizer, camel_case_to_snake_case};
pub use iri::ParsedIri;
pub use pagination::{Pagination, PaginationState, ResourceCollection};
