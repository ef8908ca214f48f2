//! Process-wide metadata caches
//!
//! Both caches are populated lazily on first lookup and are only read
//! afterwards.

use super::{ResourceMetadata, ResourceMetadataFactory, ResourceNameCollectionFactory};
use crate::core::error::{HalError, HalResult};
use std::collections::HashMap;
use std::sync::{OnceLock, RwLock};

/// Caches the resource name collection of the wrapped factory
pub struct CachedResourceNameCollectionFactory<F> {
    inner: F,
    names: OnceLock<Vec<String>>,
}

impl<F: ResourceNameCollectionFactory> CachedResourceNameCollectionFactory<F> {
    pub fn new(inner: F) -> Self {
        Self {
            inner,
            names: OnceLock::new(),
        }
    }
}

impl<F: ResourceNameCollectionFactory> ResourceNameCollectionFactory
    for CachedResourceNameCollectionFactory<F>
{
    fn create(&self) -> HalResult<Vec<String>> {
        if let Some(names) = self.names.get() {
            return Ok(names.clone());
        }

        let names = self.inner.create()?;
        tracing::debug!(count = names.len(), "Resource name collection cached");
        Ok(self.names.get_or_init(|| names).clone())
    }
}

/// Caches resource metadata per resource class
pub struct CachedResourceMetadataFactory<F> {
    inner: F,
    metadata: RwLock<HashMap<String, ResourceMetadata>>,
}

impl<F: ResourceMetadataFactory> CachedResourceMetadataFactory<F> {
    pub fn new(inner: F) -> Self {
        Self {
            inner,
            metadata: RwLock::new(HashMap::new()),
        }
    }
}

impl<F: ResourceMetadataFactory> ResourceMetadataFactory for CachedResourceMetadataFactory<F> {
    fn create(&self, resource_class: &str) -> HalResult<ResourceMetadata> {
        {
            let cache = self
                .metadata
                .read()
                .map_err(|e| HalError::Internal(format!("Failed to acquire read lock: {}", e)))?;
            if let Some(metadata) = cache.get(resource_class) {
                return Ok(metadata.clone());
            }
        }

        let metadata = self.inner.create(resource_class)?;
        let mut cache = self
            .metadata
            .write()
            .map_err(|e| HalError::Internal(format!("Failed to acquire write lock: {}", e)))?;
        cache.insert(resource_class.to_string(), metadata.clone());

        Ok(metadata)
    }
}
