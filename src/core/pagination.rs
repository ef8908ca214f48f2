//! Resource collections and their pagination state

/// How a collection was paginated by the data provider
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Pagination {
    /// A plain, fully materialized list
    Unpaginated,

    /// Open-ended pagination: the total number of items is unknown
    Partial {
        current_page: f64,
        items_per_page: f64,
    },

    /// Pagination with a known total
    Full {
        current_page: f64,
        items_per_page: f64,
        last_page: f64,
        total_items: f64,
    },
}

/// A page (or the whole) of a resource collection, ready to be normalized
#[derive(Debug, Clone)]
pub struct ResourceCollection<T> {
    items: Vec<T>,
    pagination: Pagination,
}

impl<T> ResourceCollection<T> {
    /// Wrap an unpaginated list of items
    pub fn from_items(items: Vec<T>) -> Self {
        Self {
            items,
            pagination: Pagination::Unpaginated,
        }
    }

    /// Wrap a page from an open-ended paginator
    pub fn partial(items: Vec<T>, current_page: f64, items_per_page: f64) -> Self {
        Self {
            items,
            pagination: Pagination::Partial {
                current_page,
                items_per_page,
            },
        }
    }

    /// Wrap a page from a paginator that knows the total number of items
    ///
    /// The last page is `ceil(total_items / items_per_page)`, never less than 1.
    pub fn paginated(
        items: Vec<T>,
        current_page: f64,
        items_per_page: f64,
        total_items: f64,
    ) -> Self {
        let last_page = if items_per_page <= 0. {
            1.
        } else {
            (total_items / items_per_page).ceil().max(1.)
        };

        Self {
            items,
            pagination: Pagination::Full {
                current_page,
                items_per_page,
                last_page,
                total_items,
            },
        }
    }

    /// Wrap items with a pagination descriptor computed by the data provider
    pub fn with_pagination(items: Vec<T>, pagination: Pagination) -> Self {
        Self { items, pagination }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn pagination(&self) -> Pagination {
        self.pagination
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<'a, T> IntoIterator for &'a ResourceCollection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Pagination figures used to build navigation links
///
/// Page numbers are floats, as handed over by paginators. They are compared
/// with plain float equality: paginators only ever produce whole numbers, so
/// the imprecision is accepted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaginationState {
    /// Current page, starting at 1
    pub current_page: f64,

    /// Last page, when the total is known
    pub last_page: Option<f64>,

    /// Maximum number of items per page
    pub items_per_page: f64,

    /// Number of items on the current page
    pub page_total_items: f64,

    /// Total number of items across all pages, when known
    pub total_items: Option<f64>,

    /// Whether page links should be emitted at all
    pub is_paginated: bool,

    /// Whether the collection came from a paginator
    pub has_paginator: bool,
}

impl PaginationState {
    /// Derive the state from a collection
    ///
    /// A fully paginated collection with a single page is not considered
    /// paginated, so it only gets a `self` link.
    #[allow(clippy::float_cmp)]
    pub fn from_collection<T>(collection: &ResourceCollection<T>) -> Self {
        let page_total_items = collection.len() as f64;

        match collection.pagination() {
            Pagination::Unpaginated => Self {
                current_page: 1.,
                last_page: None,
                items_per_page: page_total_items,
                page_total_items,
                total_items: Some(page_total_items),
                is_paginated: false,
                has_paginator: false,
            },
            Pagination::Partial {
                current_page,
                items_per_page,
            } => Self {
                current_page,
                last_page: None,
                items_per_page,
                page_total_items,
                total_items: None,
                is_paginated: true,
                has_paginator: true,
            },
            Pagination::Full {
                current_page,
                items_per_page,
                last_page,
                total_items,
            } => Self {
                current_page,
                last_page: Some(last_page),
                items_per_page,
                page_total_items,
                total_items: Some(total_items),
                is_paginated: last_page != 1.,
                has_paginator: true,
            },
        }
    }
}
