//! Per-item normalization
//!
//! Each resource type has exactly one [`ItemNormalizer`], looked up by Rust
//! type in a [`NormalizerRegistry`].

use super::Link;
use crate::core::error::{HalError, HalResult};
use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

/// Context of a serialization call
///
/// Deserializable from the context map handed over by the HTTP layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializationContext {
    /// URI of the current request; `/` when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_uri: Option<String>,

    /// Resource class of the collection items
    pub resource_class: String,

    /// Set when the collection is nested inside another document
    #[serde(default, rename = "api_sub_level")]
    pub sub_level: bool,
}

impl SerializationContext {
    pub fn new(resource_class: impl Into<String>) -> Self {
        Self {
            request_uri: None,
            resource_class: resource_class.into(),
            sub_level: false,
        }
    }

    pub fn with_request_uri(mut self, request_uri: impl Into<String>) -> Self {
        self.request_uri = Some(request_uri.into());
        self
    }

    pub fn at_sub_level(mut self) -> Self {
        self.sub_level = true;
        self
    }

    pub fn request_uri(&self) -> &str {
        self.request_uri.as_deref().unwrap_or("/")
    }
}

/// Turns one item into its HAL document
///
/// The document of a top-level item must carry `_links.self`.
pub trait ItemNormalizer<T>: Send + Sync {
    fn normalize(&self, item: &T, format: &str, context: &SerializationContext) -> Result<Value>;
}

impl<T, F> ItemNormalizer<T> for F
where
    F: Fn(&T, &str, &SerializationContext) -> Result<Value> + Send + Sync,
{
    fn normalize(&self, item: &T, format: &str, context: &SerializationContext) -> Result<Value> {
        self(item, format, context)
    }
}

/// Normalizes serde-serializable items, prefixing their `self` link
///
/// # Example
///
/// ```rust,ignore
/// let normalizer = HalItemNormalizer::new(|book: &Book| format!("/books/{}", book.id));
/// ```
pub struct HalItemNormalizer<T> {
    iri: Box<dyn Fn(&T) -> String + Send + Sync>,
}

impl<T> HalItemNormalizer<T> {
    pub fn new(iri: impl Fn(&T) -> String + Send + Sync + 'static) -> Self {
        Self { iri: Box::new(iri) }
    }
}

impl<T: Serialize> ItemNormalizer<T> for HalItemNormalizer<T> {
    fn normalize(&self, item: &T, _format: &str, _context: &SerializationContext) -> Result<Value> {
        let fields = match serde_json::to_value(item)? {
            Value::Object(fields) => fields,
            other => return Err(anyhow!("expected a JSON object, got {}", other)),
        };

        let mut links = Map::new();
        links.insert("self".to_string(), serde_json::to_value(Link::new((self.iri)(item)))?);

        let mut document = Map::with_capacity(fields.len() + 1);
        document.insert("_links".to_string(), Value::Object(links));
        document.extend(fields.into_iter().filter(|(key, _)| key != "_links"));

        Ok(Value::Object(document))
    }
}

/// Item normalizers keyed by item type
#[derive(Default)]
pub struct NormalizerRegistry {
    normalizers: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl NormalizerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the normalizer of `T`, replacing any previous one
    pub fn register<T: 'static>(&mut self, normalizer: impl ItemNormalizer<T> + 'static) {
        let normalizer: Arc<dyn ItemNormalizer<T>> = Arc::new(normalizer);
        self.normalizers
            .insert(TypeId::of::<T>(), Box::new(normalizer));
    }

    /// Get the normalizer of `T`
    pub fn get<T: 'static>(&self) -> HalResult<Arc<dyn ItemNormalizer<T>>> {
        self.normalizers
            .get(&TypeId::of::<T>())
            .and_then(|n| n.downcast_ref::<Arc<dyn ItemNormalizer<T>>>())
            .cloned()
            .ok_or_else(|| HalError::NormalizerNotRegistered {
                type_name: std::any::type_name::<T>().to_string(),
            })
    }

    pub fn len(&self) -> usize {
        self.normalizers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.normalizers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Serialize)]
    struct Book {
        id: u32,
        title: String,
    }

    #[test]
    fn test_context_defaults() {
        let context = SerializationContext::new("Book");
        assert_eq!(context.request_uri(), "/");
        assert!(!context.sub_level);
    }

    #[test]
    fn test_context_from_map() {
        let context: SerializationContext = serde_json::from_value(json!({
            "request_uri": "/books?page=2",
            "resource_class": "App::Entity::Book",
            "api_sub_level": true
        }))
        .unwrap();

        assert_eq!(context.request_uri(), "/books?page=2");
        assert_eq!(context.resource_class, "App::Entity::Book");
        assert!(context.sub_level);
    }

    #[test]
    fn test_hal_item_normalizer() {
        let normalizer = HalItemNormalizer::new(|book: &Book| format!("/books/{}", book.id));
        let book = Book {
            id: 7,
            title: "The Hobbit".to_string(),
        };

        let document = normalizer
            .normalize(&book, "jsonhal", &SerializationContext::new("Book"))
            .unwrap();

        assert_eq!(
            document,
            json!({"_links": {"self": {"href": "/books/7"}}, "id": 7, "title": "The Hobbit"})
        );
        let keys: Vec<_> = document.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["_links", "id", "title"]);
    }

    #[test]
    fn test_hal_item_normalizer_rejects_scalars() {
        let normalizer = HalItemNormalizer::new(|_: &u32| "/numbers/1".to_string());
        let err = normalizer
            .normalize(&1, "jsonhal", &SerializationContext::new("Number"))
            .unwrap_err();
        assert!(err.to_string().contains("expected a JSON object"));
    }

    #[test]
    fn test_registry_lookup_by_type() {
        let mut registry = NormalizerRegistry::new();
        registry.register::<Book>(HalItemNormalizer::new(|book: &Book| {
            format!("/books/{}", book.id)
        }));
        registry.register::<u32>(
            |n: &u32, _: &str, _: &SerializationContext| -> Result<Value> { Ok(json!({ "n": n })) },
        );

        assert_eq!(registry.len(), 2);
        assert!(registry.get::<Book>().is_ok());

        let number = registry
            .get::<u32>()
            .unwrap()
            .normalize(&3, "jsonhal", &SerializationContext::new("Number"))
            .unwrap();
        assert_eq!(number, json!({"n": 3}));
    }

    #[test]
    fn test_registry_missing_type() {
        let registry = NormalizerRegistry::new();
        let err = registry.get::<String>().err().unwrap();
        assert!(matches!(err, HalError::NormalizerNotRegistered { .. }));
    }
}
