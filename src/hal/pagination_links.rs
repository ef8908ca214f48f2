//! Navigation links of a paginated collection

use super::Link;
use crate::core::error::HalResult;
use crate::core::iri::ParsedIri;
use crate::core::pagination::PaginationState;
use indexmap::IndexMap;

/// Navigation relations and counters of a collection page
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PaginationLinks {
    /// `self`, then `first`, `last`, `prev` and `next` when they apply
    pub links: IndexMap<String, Link>,

    /// Total number of items, when known
    pub total_items: Option<u64>,

    /// Page size, when the collection came from a paginator
    pub items_per_page: Option<u64>,
}

/// Builds `self`/`first`/`last`/`prev`/`next` links from the request URI
#[derive(Debug, Clone)]
pub struct PaginationLinkBuilder {
    page_parameter_name: String,
}

impl PaginationLinkBuilder {
    pub fn new(page_parameter_name: impl Into<String>) -> Self {
        Self {
            page_parameter_name: page_parameter_name.into(),
        }
    }

    pub fn page_parameter_name(&self) -> &str {
        &self.page_parameter_name
    }

    /// Build the links for `base_uri` in the given pagination state
    ///
    /// When the last page is unknown, `next` is emitted as long as the
    /// current page is full.
    #[allow(clippy::float_cmp)]
    pub fn build(&self, base_uri: &str, state: &PaginationState) -> HalResult<PaginationLinks> {
        let parsed = ParsedIri::parse(base_uri, &self.page_parameter_name)?;
        let mut links = IndexMap::new();

        let self_page = state.is_paginated.then_some(state.current_page);
        links.insert("self".to_string(), Link::new(parsed.create(self_page)));

        if state.is_paginated {
            if let Some(last_page) = state.last_page {
                links.insert("first".to_string(), Link::new(parsed.create(Some(1.))));
                links.insert("last".to_string(), Link::new(parsed.create(Some(last_page))));
            }

            if state.current_page != 1. {
                links.insert(
                    "prev".to_string(),
                    Link::new(parsed.create(Some(state.current_page - 1.))),
                );
            }

            let has_next = match state.last_page {
                Some(last_page) => state.current_page != last_page,
                None => state.page_total_items >= state.items_per_page,
            };
            if has_next {
                links.insert(
                    "next".to_string(),
                    Link::new(parsed.create(Some(state.current_page + 1.))),
                );
            }
        }

        Ok(PaginationLinks {
            links,
            total_items: state.total_items.map(|total| total as u64),
            items_per_page: state
                .has_paginator
                .then_some(state.items_per_page as u64),
        })
    }
}
