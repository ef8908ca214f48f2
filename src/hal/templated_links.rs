//! Templated links to the item and subresource operations of a resource

use super::Link;
use crate::core::error::HalResult;
use crate::core::inflector::camel_case_to_snake_case;
use crate::metadata::{
    FORMAT_SUFFIX, Operation, OperationPathResolver, OperationType, ResourceMetadataFactory,
    ResourceNameCollectionFactory, SubresourceOperationFactory,
};
use indexmap::IndexMap;
use std::collections::HashSet;
use std::sync::Arc;

/// Collects `{relation -> templated link}` for a resource class
///
/// Relations are the snake_cased short names of the resource and of its
/// subresources. A path is only emitted once: the first relation to claim a
/// path keeps it, in operation declaration order. A relation that is claimed
/// again with a new path takes that path and keeps its position.
pub struct TemplatedLinkCollector {
    resource_names: Arc<dyn ResourceNameCollectionFactory>,
    metadata: Arc<dyn ResourceMetadataFactory>,
    path_resolver: Arc<dyn OperationPathResolver>,
    subresources: Option<Arc<dyn SubresourceOperationFactory>>,
}

/// Relation -> path, with the set of paths already emitted
#[derive(Default)]
struct PathTable {
    paths: IndexMap<String, String>,
    emitted: HashSet<String>,
}

impl PathTable {
    fn claim(&mut self, relation: String, path: String) {
        if self.emitted.contains(&path) {
            tracing::debug!(
                relation = %relation,
                path = %path,
                "Skipping duplicate templated path"
            );
            return;
        }

        self.emitted.insert(path.clone());
        if let Some(previous) = self.paths.insert(relation, path) {
            self.emitted.remove(&previous);
        }
    }
}

impl TemplatedLinkCollector {
    pub fn new(
        resource_names: Arc<dyn ResourceNameCollectionFactory>,
        metadata: Arc<dyn ResourceMetadataFactory>,
        path_resolver: Arc<dyn OperationPathResolver>,
    ) -> Self {
        Self {
            resource_names,
            metadata,
            path_resolver,
            subresources: None,
        }
    }

    /// Also emit links for subresource operations
    pub fn with_subresources(mut self, factory: Arc<dyn SubresourceOperationFactory>) -> Self {
        self.subresources = Some(factory);
        self
    }

    /// Collect the templated links of `resource_class`
    ///
    /// A class missing from the resource name collection yields no links.
    pub fn collect(&self, resource_class: &str) -> HalResult<IndexMap<String, Link>> {
        let known = self.resource_names.create()?;
        if !known.iter().any(|name| name == resource_class) {
            tracing::debug!(resource_class, "Resource class not in name collection");
            return Ok(IndexMap::new());
        }

        let metadata = self.metadata.create(resource_class)?;
        let mut table = PathTable::default();

        let relation = camel_case_to_snake_case(&metadata.short_name);
        for (operation_name, operation) in &metadata.item_operations {
            let path = self.path(
                &metadata.short_name,
                operation_name,
                operation,
                OperationType::Item,
            );
            table.claim(relation.clone(), path);
        }

        if let Some(subresources) = &self.subresources {
            for subresource in subresources.create(resource_class)?.values() {
                let short_name = subresource.short_name();
                let path = self.path(
                    short_name,
                    &subresource.route_name,
                    &subresource.operation,
                    OperationType::Subresource,
                );
                tracing::debug!(
                    property = %subresource.property,
                    resource_class = %subresource.resource_class,
                    collection = subresource.collection,
                    path = %path,
                    "Resolved subresource path"
                );
                table.claim(camel_case_to_snake_case(short_name), path);
            }
        }

        Ok(table
            .paths
            .into_iter()
            .map(|(relation, path)| (relation, Link::templated(path)))
            .collect())
    }

    fn path(
        &self,
        resource_short_name: &str,
        operation_name: &str,
        operation: &Operation,
        operation_type: OperationType,
    ) -> String {
        let path = self.path_resolver.resolve_operation_path(
            resource_short_name,
            operation,
            operation_type,
            operation_name,
        );
        match path.strip_suffix(FORMAT_SUFFIX) {
            Some(stripped) => stripped.to_string(),
            None => path,
        }
    }
}
