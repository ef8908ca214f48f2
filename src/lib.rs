//! # This-HAL
//!
//! HAL (Hypertext Application Language) serialization of resource collections
//! for REST APIs built with the this-rs framework.
//!
//! ## Features
//!
//! - **Pagination Links**: `self`, `first`, `last`, `prev` and `next` built from the request URI
//! - **Templated Links**: discovery of item and subresource URL templates per resource
//! - **Embedded Items**: every item normalized individually under `_embedded`
//! - **Configuration-Based**: declare resources and operations in YAML
//! - **Cached Metadata**: resource metadata resolved once and shared across requests
//! - **Axum Integration**: `application/hal+json` responses and JSON error bodies
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use this_hal::prelude::*;
//!
//! #[derive(Serialize)]
//! struct Book {
//!     id: u32,
//!     title: String,
//! }
//!
//! let config = HalConfig::from_yaml_str(r#"
//! resources:
//!   - class: App::Entity::Book
//! "#)?;
//!
//! let normalizer = CollectionNormalizer::from_config(Arc::new(config))?
//!     .with_item_normalizer::<Book>(HalItemNormalizer::new(|b: &Book| {
//!         format!("/books/{}", b.id)
//!     }));
//!
//! let books = ResourceCollection::paginated(page_of_books, 2., 2., 5.);
//! let context = SerializationContext::new("App::Entity::Book").with_request_uri("/books?page=2");
//!
//! let document = normalizer.normalize(&books, FORMAT, &context)?;
//! ```

pub mod config;
pub mod core;
pub mod hal;
pub mod metadata;
pub mod server;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        error::{HalError, HalResult},
        inflector::camel_case_to_snake_case,
        iri::ParsedIri,
        pagination::{Pagination, PaginationState, ResourceCollection},
    };

    // === HAL ===
    pub use crate::hal::{
        CollectionNormalizer, CollectionNormalizerBuilder, EmbeddedItemAssembler, FORMAT,
        HalCollectionDocument, HalItemNormalizer, ItemNormalizer, Link, LinkValue,
        NormalizerRegistry, PaginationLinkBuilder, SerializationContext, TemplatedLinkCollector,
    };

    // === Metadata ===
    pub use crate::metadata::{
        CachedResourceMetadataFactory, CachedResourceNameCollectionFactory,
        DefaultOperationPathResolver, Operation, OperationPathResolver, OperationType,
        ResourceMetadata, ResourceMetadataFactory, ResourceNameCollectionFactory,
        ResourceRegistry, SubresourceOperation, SubresourceOperationFactory,
    };

    // === Config ===
    pub use crate::config::{
        HalConfig, OperationConfig, PathSegmentStyle, ResourceConfig, SubresourceConfig,
    };

    // === Server ===
    pub use crate::server::{HAL_CONTENT_TYPE, HalJson};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use serde::{Deserialize, Serialize};
    pub use serde_json::Value;
    pub use std::sync::Arc;
}
