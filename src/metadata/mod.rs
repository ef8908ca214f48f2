//! Resource metadata consumed by the HAL serializer
//!
//! The serializer does not discover resources or build routes itself. It
//! reads them through the collaborator traits defined here:
//!
//! - [`ResourceNameCollectionFactory`]: every known resource class
//! - [`ResourceMetadataFactory`]: short name and item operations of a class
//! - [`OperationPathResolver`]: the URL path template of an operation
//! - [`SubresourceOperationFactory`]: operations nested under a resource
//!
//! [`ResourceRegistry`] implements the factories from a [`HalConfig`], and
//! [`DefaultOperationPathResolver`] generates conventional paths.
//!
//! [`HalConfig`]: crate::config::HalConfig

pub mod cache;
pub mod path_resolver;
pub mod registry;

use crate::core::error::HalResult;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub use cache::{CachedResourceMetadataFactory, CachedResourceNameCollectionFactory};
pub use path_resolver::{DefaultOperationPathResolver, FORMAT_SUFFIX};
pub use registry::ResourceRegistry;

/// Kind of operation a path is resolved for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationType {
    Item,
    Subresource,
}

/// An API operation on a resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    /// HTTP method (e.g., "GET")
    pub method: String,

    /// Explicit path template, if the operation declares one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl Operation {
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: None,
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}

/// Metadata of a resource type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceMetadata {
    /// Display name (e.g., "BookReview")
    pub short_name: String,

    /// Item operations by name, in declaration order
    pub item_operations: IndexMap<String, Operation>,
}

/// An operation addressing a resource nested under another resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubresourceOperation {
    /// Short names along the nesting, the subresource's own name first
    pub short_names: Vec<String>,

    /// Route name of the operation
    pub route_name: String,

    /// Class of the resource returned by the operation
    pub resource_class: String,

    /// Property of the owning resource
    pub property: String,

    /// Whether the operation returns a collection
    pub collection: bool,

    pub operation: Operation,
}

impl SubresourceOperation {
    /// Short name of the nested resource
    pub fn short_name(&self) -> &str {
        self.short_names.first().map(String::as_str).unwrap_or_default()
    }
}

/// Enumerates all known resource classes
pub trait ResourceNameCollectionFactory: Send + Sync {
    fn create(&self) -> HalResult<Vec<String>>;
}

/// Resolves the metadata of a resource class
pub trait ResourceMetadataFactory: Send + Sync {
    fn create(&self, resource_class: &str) -> HalResult<ResourceMetadata>;
}

/// Maps an operation to its URL path template
pub trait OperationPathResolver: Send + Sync {
    fn resolve_operation_path(
        &self,
        resource_short_name: &str,
        operation: &Operation,
        operation_type: OperationType,
        operation_name: &str,
    ) -> String;
}

/// Enumerates the subresource operations of a resource class, keyed by operation id
pub trait SubresourceOperationFactory: Send + Sync {
    fn create(&self, resource_class: &str) -> HalResult<IndexMap<String, SubresourceOperation>>;
}

impl<T: ResourceNameCollectionFactory + ?Sized> ResourceNameCollectionFactory for Arc<T> {
    fn create(&self) -> HalResult<Vec<String>> {
        (**self).create()
    }
}

impl<T: ResourceMetadataFactory + ?Sized> ResourceMetadataFactory for Arc<T> {
    fn create(&self, resource_class: &str) -> HalResult<ResourceMetadata> {
        (**self).create(resource_class)
    }
}

impl<T: SubresourceOperationFactory + ?Sized> SubresourceOperationFactory for Arc<T> {
    fn create(&self, resource_class: &str) -> HalResult<IndexMap<String, SubresourceOperation>> {
        (**self).create(resource_class)
    }
}
