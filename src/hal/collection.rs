//! HAL collection normalizer

use super::embedded::{EmbeddedItemAssembler, normalize_items};
use super::normalizer::{ItemNormalizer, NormalizerRegistry, SerializationContext};
use super::pagination_links::PaginationLinkBuilder;
use super::templated_links::TemplatedLinkCollector;
use super::{FORMAT, LinkValue};
use crate::config::HalConfig;
use crate::core::error::{HalError, HalResult};
use crate::core::pagination::{PaginationState, ResourceCollection};
use crate::metadata::{
    CachedResourceMetadataFactory, CachedResourceNameCollectionFactory,
    DefaultOperationPathResolver, OperationPathResolver, ResourceMetadataFactory,
    ResourceNameCollectionFactory, ResourceRegistry, SubresourceOperationFactory,
};
use anyhow::{Result, anyhow};
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

/// Embedded resources of a collection document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Embedded {
    pub item: Vec<Value>,
}

/// A collection rendered as HAL
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HalCollectionDocument {
    #[serde(rename = "_links")]
    pub links: IndexMap<String, LinkValue>,

    #[serde(rename = "_embedded", skip_serializing_if = "Option::is_none")]
    pub embedded: Option<Embedded>,

    #[serde(rename = "totalItems", skip_serializing_if = "Option::is_none")]
    pub total_items: Option<u64>,

    #[serde(rename = "itemsPerPage", skip_serializing_if = "Option::is_none")]
    pub items_per_page: Option<u64>,
}

/// Normalizes resource collections in the HAL format
///
/// # Example
///
/// ```rust,ignore
/// let normalizer = CollectionNormalizer::from_config(config)?
///     .with_item_normalizer::<Book>(HalItemNormalizer::new(|b: &Book| {
///         format!("/books/{}", b.id)
///     }));
///
/// let context = SerializationContext::new("App::Entity::Book").with_request_uri("/books?page=2");
/// let document = normalizer.normalize(&books, FORMAT, &context)?;
/// ```
pub struct CollectionNormalizer {
    pagination_links: PaginationLinkBuilder,
    assembler: EmbeddedItemAssembler,
    normalizers: NormalizerRegistry,
}

impl CollectionNormalizer {
    pub fn builder() -> CollectionNormalizerBuilder {
        CollectionNormalizerBuilder::new()
    }

    /// Build a normalizer whose metadata comes from a configuration
    ///
    /// Resource names and metadata are cached; paths follow the configured
    /// segment style.
    pub fn from_config(config: Arc<HalConfig>) -> Result<Self> {
        config.validate()?;

        let registry = Arc::new(ResourceRegistry::new(config.clone()));
        Self::builder()
            .with_page_parameter_name(config.page_parameter_name())
            .with_resource_names(CachedResourceNameCollectionFactory::new(registry.clone()))
            .with_resource_metadata(CachedResourceMetadataFactory::new(registry.clone()))
            .with_path_resolver(DefaultOperationPathResolver::new(config.path_segment_style()))
            .with_subresource_operations(registry)
            .build()
    }

    /// Register the item normalizer used for collections of `T`
    pub fn with_item_normalizer<T: 'static>(
        mut self,
        normalizer: impl ItemNormalizer<T> + 'static,
    ) -> Self {
        self.normalizers.register::<T>(normalizer);
        self
    }

    pub fn supports_normalization(&self, format: &str) -> bool {
        format == FORMAT
    }

    /// Normalize a collection into a JSON value
    ///
    /// At sub-level the result is a plain array of normalized items.
    pub fn normalize<T: 'static>(
        &self,
        collection: &ResourceCollection<T>,
        format: &str,
        context: &SerializationContext,
    ) -> HalResult<Value> {
        if context.sub_level {
            self.check_format(format)?;
            let normalizer = self.normalizers.get::<T>()?;
            let items = normalize_items(collection, normalizer.as_ref(), format, context)?;
            return Ok(Value::Array(items));
        }

        let document = self.normalize_document(collection, format, context)?;
        serde_json::to_value(document).map_err(|e| HalError::Internal(e.to_string()))
    }

    /// Normalize a collection into a HAL document
    pub fn normalize_document<T: 'static>(
        &self,
        collection: &ResourceCollection<T>,
        format: &str,
        context: &SerializationContext,
    ) -> HalResult<HalCollectionDocument> {
        self.check_format(format)?;
        let normalizer = self.normalizers.get::<T>()?;

        let state = PaginationState::from_collection(collection);
        let pagination = self
            .pagination_links
            .build(context.request_uri(), &state)?;
        // Collections nested inside an item render as plain arrays
        let item_context = context.clone().at_sub_level();
        let items = self.assembler.assemble(
            collection,
            normalizer.as_ref(),
            format,
            &item_context,
        )?;

        let mut links: IndexMap<String, LinkValue> = pagination
            .links
            .into_iter()
            .map(|(relation, link)| (relation, LinkValue::One(link)))
            .collect();
        for (relation, link) in items.links {
            if links.contains_key(&relation) {
                tracing::warn!(
                    relation = %relation,
                    resource_class = %context.resource_class,
                    "Templated link collides with a pagination relation, skipping"
                );
                continue;
            }
            links.insert(relation, link);
        }

        let embedded = (!items.items.is_empty()).then(|| Embedded { item: items.items });

        tracing::debug!(
            resource_class = %context.resource_class,
            items = collection.len(),
            paginated = state.is_paginated,
            "Normalized HAL collection"
        );

        Ok(HalCollectionDocument {
            links,
            embedded,
            total_items: pagination.total_items,
            items_per_page: pagination.items_per_page,
        })
    }

    fn check_format(&self, format: &str) -> HalResult<()> {
        if self.supports_normalization(format) {
            Ok(())
        } else {
            Err(HalError::UnsupportedFormat {
                format: format.to_string(),
            })
        }
    }
}

/// Builder for [`CollectionNormalizer`]
pub struct CollectionNormalizerBuilder {
    page_parameter_name: String,
    resource_names: Option<Arc<dyn ResourceNameCollectionFactory>>,
    resource_metadata: Option<Arc<dyn ResourceMetadataFactory>>,
    path_resolver: Option<Arc<dyn OperationPathResolver>>,
    subresource_operations: Option<Arc<dyn SubresourceOperationFactory>>,
    normalizers: NormalizerRegistry,
}

impl Default for CollectionNormalizerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CollectionNormalizerBuilder {
    pub fn new() -> Self {
        Self {
            page_parameter_name: "page".to_string(),
            resource_names: None,
            resource_metadata: None,
            path_resolver: None,
            subresource_operations: None,
            normalizers: NormalizerRegistry::new(),
        }
    }

    pub fn with_page_parameter_name(mut self, name: impl Into<String>) -> Self {
        self.page_parameter_name = name.into();
        self
    }

    /// Set the resource name collection factory (required)
    pub fn with_resource_names(
        mut self,
        factory: impl ResourceNameCollectionFactory + 'static,
    ) -> Self {
        self.resource_names = Some(Arc::new(factory));
        self
    }

    /// Set the resource metadata factory (required)
    pub fn with_resource_metadata(
        mut self,
        factory: impl ResourceMetadataFactory + 'static,
    ) -> Self {
        self.resource_metadata = Some(Arc::new(factory));
        self
    }

    /// Set the operation path resolver (required)
    pub fn with_path_resolver(mut self, resolver: impl OperationPathResolver + 'static) -> Self {
        self.path_resolver = Some(Arc::new(resolver));
        self
    }

    /// Set the subresource operation factory; without it no subresource links are emitted
    pub fn with_subresource_operations(
        mut self,
        factory: impl SubresourceOperationFactory + 'static,
    ) -> Self {
        self.subresource_operations = Some(Arc::new(factory));
        self
    }

    pub fn with_item_normalizer<T: 'static>(
        mut self,
        normalizer: impl ItemNormalizer<T> + 'static,
    ) -> Self {
        self.normalizers.register::<T>(normalizer);
        self
    }

    pub fn build(self) -> Result<CollectionNormalizer> {
        let resource_names = self.resource_names.ok_or_else(|| {
            anyhow!("ResourceNameCollectionFactory is required. Call .with_resource_names()")
        })?;
        let resource_metadata = self.resource_metadata.ok_or_else(|| {
            anyhow!("ResourceMetadataFactory is required. Call .with_resource_metadata()")
        })?;
        let path_resolver = self.path_resolver.ok_or_else(|| {
            anyhow!("OperationPathResolver is required. Call .with_path_resolver()")
        })?;

        let mut templated_links =
            TemplatedLinkCollector::new(resource_names, resource_metadata, path_resolver);
        if let Some(subresources) = self.subresource_operations {
            templated_links = templated_links.with_subresources(subresources);
        }

        Ok(CollectionNormalizer {
            pagination_links: PaginationLinkBuilder::new(self.page_parameter_name),
            assembler: EmbeddedItemAssembler::new(templated_links),
            normalizers: self.normalizers,
        })
    }
}
