//! HAL (Hypertext Application Language) collection serialization
//!
//! A paginated collection is rendered as:
//!
//! ```json
//! {
//!   "_links": {
//!     "self": {"href": "/books?page=2"},
//!     "first": {"href": "/books?page=1"},
//!     "last": {"href": "/books?page=3"},
//!     "prev": {"href": "/books?page=1"},
//!     "next": {"href": "/books?page=3"},
//!     "book": {"href": "/books/{id}", "templated": true},
//!     "item": [{"href": "/books/3"}, {"href": "/books/4"}]
//!   },
//!   "_embedded": {"item": [{"_links": {"self": {"href": "/books/3"}}, "title": "..."}]},
//!   "totalItems": 5,
//!   "itemsPerPage": 2
//! }
//! ```

pub mod collection;
pub mod embedded;
pub mod normalizer;
pub mod pagination_links;
pub mod templated_links;

use serde::{Deserialize, Serialize};

pub use collection::{
    CollectionNormalizer, CollectionNormalizerBuilder, Embedded, HalCollectionDocument,
};
pub use embedded::{EmbeddedItemAssembler, ItemsData};
pub use normalizer::{HalItemNormalizer, ItemNormalizer, NormalizerRegistry, SerializationContext};
pub use pagination_links::{PaginationLinkBuilder, PaginationLinks};
pub use templated_links::TemplatedLinkCollector;

/// Serialization format handled by the collection normalizer
pub const FORMAT: &str = "jsonhal";

/// Relation of an embedded item's self link
pub const ITEM_RELATION: &str = "item";

/// A HAL link object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub href: String,

    /// Whether `href` is a URI template
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub templated: bool,
}

impl Link {
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            templated: false,
        }
    }

    pub fn templated(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            templated: true,
        }
    }
}

/// Value of a relation in `_links`: one link or a list of links
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LinkValue {
    One(Link),
    Many(Vec<Link>),
}

impl From<Link> for LinkValue {
    fn from(link: Link) -> Self {
        LinkValue::One(link)
    }
}

impl From<Vec<Link>> for LinkValue {
    fn from(links: Vec<Link>) -> Self {
        LinkValue::Many(links)
    }
}
