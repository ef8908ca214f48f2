//! Conventional operation paths

use super::{Operation, OperationPathResolver, OperationType};
use crate::config::PathSegmentStyle;
use crate::core::inflector::{Pluralizer, dasherize, tableize};

/// Format placeholder appended to generated paths
pub const FORMAT_SUFFIX: &str = ".{_format}";

/// Resolves operation paths from explicit paths or naming conventions
///
/// An operation that declares a path keeps it. Otherwise the path is the
/// pluralized short name (`/book_reviews` or `/book-reviews`), followed by
/// `/{id}` for item operations and the format placeholder.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultOperationPathResolver {
    style: PathSegmentStyle,
}

impl DefaultOperationPathResolver {
    pub fn new(style: PathSegmentStyle) -> Self {
        Self { style }
    }

    /// The pluralized path segment of a resource collection
    pub fn collection_segment(&self, resource_short_name: &str) -> String {
        let words = match self.style {
            PathSegmentStyle::Underscore => tableize(resource_short_name),
            PathSegmentStyle::Dash => dasherize(resource_short_name),
        };
        Pluralizer::pluralize(&words)
    }
}

impl OperationPathResolver for DefaultOperationPathResolver {
    fn resolve_operation_path(
        &self,
        resource_short_name: &str,
        operation: &Operation,
        operation_type: OperationType,
        _operation_name: &str,
    ) -> String {
        if let Some(path) = &operation.path {
            return path.clone();
        }

        let mut path = format!("/{}", self.collection_segment(resource_short_name));
        if operation_type == OperationType::Item {
            path.push_str("/{id}");
        }
        path.push_str(FORMAT_SUFFIX);
        path
    }
}
