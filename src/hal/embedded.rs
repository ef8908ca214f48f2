//! Embedding of normalized collection items

use super::normalizer::{ItemNormalizer, SerializationContext};
use super::templated_links::TemplatedLinkCollector;
use super::{ITEM_RELATION, Link, LinkValue};
use crate::core::error::{HalError, HalResult};
use indexmap::IndexMap;
use serde_json::Value;

/// Links and embedded documents of a collection's items
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ItemsData {
    /// Templated links, then the `item` self links when there are items
    pub links: IndexMap<String, LinkValue>,

    /// Normalized items, in collection order
    pub items: Vec<Value>,
}

/// Normalizes collection items one by one and gathers their self links
pub struct EmbeddedItemAssembler {
    templated_links: TemplatedLinkCollector,
}

impl EmbeddedItemAssembler {
    pub fn new(templated_links: TemplatedLinkCollector) -> Self {
        Self { templated_links }
    }

    /// Assemble `_links` and `_embedded` data for `items`
    ///
    /// The first item that fails to normalize aborts the whole assembly.
    pub fn assemble<'a, T: 'a>(
        &self,
        items: impl IntoIterator<Item = &'a T>,
        normalizer: &dyn ItemNormalizer<T>,
        format: &str,
        context: &SerializationContext,
    ) -> HalResult<ItemsData> {
        let mut links: IndexMap<String, LinkValue> = self
            .templated_links
            .collect(&context.resource_class)?
            .into_iter()
            .filter(|(relation, _)| {
                if relation == ITEM_RELATION {
                    tracing::warn!(
                        resource_class = %context.resource_class,
                        "Templated link collides with the item relation, skipping"
                    );
                    return false;
                }
                true
            })
            .map(|(relation, link)| (relation, LinkValue::One(link)))
            .collect();

        let mut normalized = Vec::new();
        let mut item_links = Vec::new();
        for item in items {
            let document = normalize_item(item, normalizer, format, context)?;
            item_links.push(self_link(&document, &context.resource_class)?);
            normalized.push(document);
        }
        tracing::trace!(
            resource_class = %context.resource_class,
            count = normalized.len(),
            "Normalized collection items"
        );

        if !item_links.is_empty() {
            links.insert(ITEM_RELATION.to_string(), LinkValue::Many(item_links));
        }

        Ok(ItemsData {
            links,
            items: normalized,
        })
    }
}

/// Normalize every item without links, for collections nested in another document
pub fn normalize_items<'a, T: 'a>(
    items: impl IntoIterator<Item = &'a T>,
    normalizer: &dyn ItemNormalizer<T>,
    format: &str,
    context: &SerializationContext,
) -> HalResult<Vec<Value>> {
    items
        .into_iter()
        .map(|item| normalize_item(item, normalizer, format, context))
        .collect()
}

fn normalize_item<T>(
    item: &T,
    normalizer: &dyn ItemNormalizer<T>,
    format: &str,
    context: &SerializationContext,
) -> HalResult<Value> {
    normalizer
        .normalize(item, format, context)
        .map_err(|e| HalError::Normalization {
            resource_class: context.resource_class.clone(),
            message: format!("{:#}", e),
        })
}

fn self_link(document: &Value, resource_class: &str) -> HalResult<Link> {
    document
        .get("_links")
        .and_then(|links| links.get("self"))
        .and_then(|link| serde_json::from_value(link.clone()).ok())
        .ok_or_else(|| HalError::MissingSelfLink {
            resource_class: resource_class.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{HalConfig, ResourceConfig};
    use crate::metadata::{DefaultOperationPathResolver, ResourceRegistry};
    use anyhow::{Result, bail};
    use serde_json::json;
    use std::sync::Arc;

    fn assembler() -> EmbeddedItemAssembler {
        let config = HalConfig {
            resources: vec![ResourceConfig::new("Book")],
            ..HalConfig::default()
        };
        let registry = Arc::new(ResourceRegistry::new(Arc::new(config)));
        EmbeddedItemAssembler::new(TemplatedLinkCollector::new(
            registry.clone(),
            registry,
            Arc::new(DefaultOperationPathResolver::default()),
        ))
    }

    fn book_normalizer(id: &u32, _: &str, _: &SerializationContext) -> Result<Value> {
        if *id == 13 {
            bail!("unlucky book");
        }
        Ok(json!({"_links": {"self": {"href": format!("/books/{}", id)}}, "id": id}))
    }

    #[test]
    fn test_items_keep_collection_order() {
        let context = SerializationContext::new("Book");
        let data = assembler()
            .assemble(&[3u32, 1, 2], &book_normalizer, "jsonhal", &context)
            .unwrap();

        let ids: Vec<_> = data.items.iter().map(|i| i["id"].as_u64().unwrap()).collect();
        assert_eq!(ids, vec![3, 1, 2]);

        let relations: Vec<_> = data.links.keys().map(String::as_str).collect();
        assert_eq!(relations, vec!["book", "item"]);
        assert_eq!(
            data.links["item"],
            LinkValue::Many(vec![
                Link::new("/books/3"),
                Link::new("/books/1"),
                Link::new("/books/2"),
            ])
        );
    }

    #[test]
    fn test_empty_collection_has_no_item_links() {
        let context = SerializationContext::new("Book");
        let data = assembler()
            .assemble(&[] as &[u32], &book_normalizer, "jsonhal", &context)
            .unwrap();

        assert!(data.items.is_empty());
        assert!(!data.links.contains_key("item"));
        assert_eq!(
            data.links["book"],
            LinkValue::One(Link::templated("/books/{id}"))
        );
    }

    #[test]
    fn test_failing_item_aborts_assembly() {
        let context = SerializationContext::new("Book");
        let err = assembler()
            .assemble(&[1u32, 13, 2], &book_normalizer, "jsonhal", &context)
            .unwrap_err();

        match err {
            HalError::Normalization {
                resource_class,
                message,
            } => {
                assert_eq!(resource_class, "Book");
                assert_eq!(message, "unlucky book");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_item_without_self_link() {
        let normalizer = |id: &u32, _: &str, _: &SerializationContext| -> Result<Value> {
            Ok(json!({ "id": id }))
        };
        let context = SerializationContext::new("Book");
        let err = assembler()
            .assemble(&[1u32], &normalizer, "jsonhal", &context)
            .unwrap_err();

        assert!(matches!(err, HalError::MissingSelfLink { .. }));
    }

    #[test]
    fn test_normalize_items_for_sub_level() {
        let context = SerializationContext::new("Book").at_sub_level();
        let items = normalize_items(&[5u32, 6], &book_normalizer, "jsonhal", &context).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1]["id"], 6);
    }
}
