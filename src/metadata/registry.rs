//! In-memory resource metadata built from configuration

use super::{
    DefaultOperationPathResolver, FORMAT_SUFFIX, Operation, ResourceMetadata,
    ResourceMetadataFactory, ResourceNameCollectionFactory, SubresourceOperation,
    SubresourceOperationFactory,
};
use crate::config::{HalConfig, ResourceConfig};
use crate::core::error::{HalError, HalResult};
use crate::core::inflector::{Pluralizer, tableize};
use indexmap::IndexMap;
use std::sync::Arc;

/// Registry of resource types declared in a [`HalConfig`]
///
/// Serves as resource name collection, metadata and subresource operation
/// factory. Subresources are resolved one level deep.
pub struct ResourceRegistry {
    config: Arc<HalConfig>,
    paths: DefaultOperationPathResolver,
}

impl ResourceRegistry {
    /// Create a new registry from a configuration
    pub fn new(config: Arc<HalConfig>) -> Self {
        let paths = DefaultOperationPathResolver::new(config.path_segment_style());
        Self { config, paths }
    }

    /// Get the underlying configuration
    pub fn config(&self) -> &HalConfig {
        &self.config
    }

    fn resource(&self, resource_class: &str) -> HalResult<&ResourceConfig> {
        self.config
            .find_resource(resource_class)
            .ok_or_else(|| HalError::ResourceNotFound {
                resource_class: resource_class.to_string(),
            })
    }
}

impl ResourceNameCollectionFactory for ResourceRegistry {
    fn create(&self) -> HalResult<Vec<String>> {
        Ok(self.config.resources.iter().map(|r| r.class.clone()).collect())
    }
}

impl ResourceMetadataFactory for ResourceRegistry {
    fn create(&self, resource_class: &str) -> HalResult<ResourceMetadata> {
        let resource = self.resource(resource_class)?;

        let item_operations = resource
            .item_operations
            .iter()
            .map(|op| {
                let operation = Operation {
                    method: op.method(),
                    path: op.path.clone(),
                };
                (op.name.clone(), operation)
            })
            .collect();

        Ok(ResourceMetadata {
            short_name: resource.short_name().to_string(),
            item_operations,
        })
    }
}

impl SubresourceOperationFactory for ResourceRegistry {
    fn create(&self, resource_class: &str) -> HalResult<IndexMap<String, SubresourceOperation>> {
        let owner = self.resource(resource_class)?;
        let owner_short_name = owner.short_name();
        let owner_segment = self.paths.collection_segment(owner_short_name);
        let route_prefix = Pluralizer::pluralize(&tableize(owner_short_name));

        let mut operations = IndexMap::new();
        for subresource in &owner.subresources {
            let target = self.resource(&subresource.resource_class)?;
            let route_name = format!(
                "api_{}_{}_get_subresource",
                route_prefix, subresource.property
            );
            let path = format!(
                "/{}/{{id}}/{}{}",
                owner_segment, subresource.property, FORMAT_SUFFIX
            );

            operations.insert(
                route_name.clone(),
                SubresourceOperation {
                    short_names: vec![
                        target.short_name().to_string(),
                        owner_short_name.to_string(),
                    ],
                    route_name,
                    resource_class: subresource.resource_class.clone(),
                    property: subresource.property.clone(),
                    collection: subresource.collection,
                    operation: Operation::new("GET").with_path(path),
                },
            );
        }

        Ok(operations)
    }
}
