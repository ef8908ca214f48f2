//! Configuration loading and management

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Word separator used when generating URL path segments from short names
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathSegmentStyle {
    /// `BookReview` -> `/book_reviews`
    #[default]
    Underscore,
    /// `BookReview` -> `/book-reviews`
    Dash,
}

/// Configuration for an item operation of a resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationConfig {
    /// Operation name (e.g., "get", "put")
    pub name: String,

    /// HTTP method, defaults to the upper-cased operation name
    #[serde(default)]
    pub method: Option<String>,

    /// Explicit path template; generated from the short name when absent
    #[serde(default)]
    pub path: Option<String>,
}

impl OperationConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            method: None,
            path: None,
        }
    }

    pub fn method(&self) -> String {
        self.method
            .clone()
            .unwrap_or_else(|| self.name.to_ascii_uppercase())
    }
}

/// A property of a resource exposed as a subresource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubresourceConfig {
    /// Property name on the owning resource (e.g., "reviews")
    pub property: String,

    /// Resource class of the subresource
    pub resource_class: String,

    /// Whether the property holds a collection
    #[serde(default)]
    pub collection: bool,
}

/// Configuration for a resource type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceConfig {
    /// Fully qualified resource class (e.g., "App::Entity::BookReview")
    pub class: String,

    /// Display name; defaults to the last segment of the class
    #[serde(default)]
    pub short_name: Option<String>,

    #[serde(default = "default_item_operations")]
    pub item_operations: Vec<OperationConfig>,

    #[serde(default)]
    pub subresources: Vec<SubresourceConfig>,
}

impl ResourceConfig {
    pub fn new(class: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            short_name: None,
            item_operations: default_item_operations(),
            subresources: Vec::new(),
        }
    }

    /// The explicit short name, or the class name without its namespace
    pub fn short_name(&self) -> &str {
        match &self.short_name {
            Some(name) => name.as_str(),
            None => self
                .class
                .rsplit(['\\', ':'])
                .next()
                .unwrap_or(&self.class),
        }
    }
}

fn default_item_operations() -> Vec<OperationConfig> {
    ["get", "put", "delete"]
        .into_iter()
        .map(OperationConfig::new)
        .collect()
}

const DEFAULT_PAGE_PARAMETER_NAME: &str = "page";

/// Complete configuration for HAL serialization
///
/// `page_parameter_name` and `path_segment_style` stay `None` when a file
/// leaves them out, so merging never resets a value set by an earlier file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HalConfig {
    /// Query parameter carrying the page number, `page` when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_parameter_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path_segment_style: Option<PathSegmentStyle>,

    /// Known resource types, in declaration order
    #[serde(default)]
    pub resources: Vec<ResourceConfig>,
}

impl HalConfig {
    pub fn page_parameter_name(&self) -> &str {
        self.page_parameter_name
            .as_deref()
            .unwrap_or(DEFAULT_PAGE_PARAMETER_NAME)
    }

    pub fn path_segment_style(&self) -> PathSegmentStyle {
        self.path_segment_style.unwrap_or_default()
    }

    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Merge multiple configurations into one
    ///
    /// Resources keep the position where their class was first declared; a
    /// later declaration of the same class replaces the earlier one. The page
    /// parameter name and path style come from the last configuration that
    /// sets them.
    pub fn merge(configs: Vec<HalConfig>) -> Self {
        let mut merged = HalConfig::default();

        for config in configs {
            if config.page_parameter_name.is_some() {
                merged.page_parameter_name = config.page_parameter_name;
            }
            if config.path_segment_style.is_some() {
                merged.path_segment_style = config.path_segment_style;
            }

            for resource in config.resources {
                match merged.resources.iter_mut().find(|r| r.class == resource.class) {
                    Some(existing) => *existing = resource,
                    None => merged.resources.push(resource),
                }
            }
        }

        merged
    }

    /// Check the configuration for inconsistencies
    pub fn validate(&self) -> Result<()> {
        if self.page_parameter_name().trim().is_empty() {
            bail!("page_parameter_name must not be empty");
        }

        let mut classes = HashSet::new();
        for resource in &self.resources {
            if !classes.insert(resource.class.as_str()) {
                bail!("Resource class '{}' is declared twice", resource.class);
            }
        }

        for resource in &self.resources {
            for subresource in &resource.subresources {
                if !classes.contains(subresource.resource_class.as_str()) {
                    bail!(
                        "Subresource '{}' of '{}' references unknown resource class '{}'",
                        subresource.property,
                        resource.class,
                        subresource.resource_class
                    );
                }
            }
        }

        Ok(())
    }

    /// Find a resource by class
    pub fn find_resource(&self, class: &str) -> Option<&ResourceConfig> {
        self.resources.iter().find(|r| r.class == class)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOOKSTORE: &str = r#"
page_parameter_name: p
path_segment_style: dash
resources:
  - class: App::Entity::Book
    subresources:
      - property: reviews
        resource_class: App::Entity::BookReview
        collection: true
  - class: App::Entity::BookReview
    item_operations:
      - name: get
      - name: patch
        method: PATCH
        path: /reviews/{id}/edit
"#;

    #[test]
    fn test_defaults() {
        let config = HalConfig::from_yaml_str("resources: []").unwrap();
        assert_eq!(config.page_parameter_name, None);
        assert_eq!(config.page_parameter_name(), "page");
        assert_eq!(config.path_segment_style(), PathSegmentStyle::Underscore);
    }

    #[test]
    fn test_yaml_parsing() {
        let config = HalConfig::from_yaml_str(BOOKSTORE).unwrap();

        assert_eq!(config.page_parameter_name(), "p");
        assert_eq!(config.path_segment_style(), PathSegmentStyle::Dash);
        assert_eq!(config.resources.len(), 2);

        let book = &config.resources[0];
        assert_eq!(book.short_name(), "Book");
        assert_eq!(book.item_operations.len(), 3);
        assert!(book.subresources[0].collection);

        let review = &config.resources[1];
        assert_eq!(review.item_operations[1].method(), "PATCH");
        assert_eq!(review.item_operations[0].method(), "GET");
        assert_eq!(
            review.item_operations[1].path.as_deref(),
            Some("/reviews/{id}/edit")
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_short_name_from_class() {
        assert_eq!(ResourceConfig::new("App\\Entity\\Dummy").short_name(), "Dummy");
        assert_eq!(ResourceConfig::new("Book").short_name(), "Book");

        let mut resource = ResourceConfig::new("App::Entity::Book");
        resource.short_name = Some("Novel".to_string());
        assert_eq!(resource.short_name(), "Novel");
    }

    #[test]
    fn test_validate_rejects_unknown_subresource() {
        let mut config = HalConfig::from_yaml_str(BOOKSTORE).unwrap();
        config.resources.pop();

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("App::Entity::BookReview"));
    }

    #[test]
    fn test_validate_rejects_duplicates_and_empty_page_name() {
        let mut config = HalConfig::default();
        config.resources.push(ResourceConfig::new("Book"));
        config.resources.push(ResourceConfig::new("Book"));
        assert!(config.validate().is_err());

        let config = HalConfig {
            page_parameter_name: Some(" ".to_string()),
            ..HalConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_merge_keeps_settings_omitted_later() {
        let catalog = HalConfig::from_yaml_str(BOOKSTORE).unwrap();
        let authors =
            HalConfig::from_yaml_str("resources:\n  - class: App::Entity::Author\n").unwrap();

        let merged = HalConfig::merge(vec![catalog, authors]);

        assert_eq!(merged.page_parameter_name(), "p");
        assert_eq!(merged.path_segment_style(), PathSegmentStyle::Dash);
        assert_eq!(merged.resources.len(), 3);
    }

    #[test]
    fn test_yaml_serialization() {
        let config = HalConfig::from_yaml_str(BOOKSTORE).unwrap();
        let yaml = serde_yaml::to_string(&config).unwrap();

        let parsed = HalConfig::from_yaml_str(&yaml).unwrap();
        assert_eq!(parsed, config);
    }
}
