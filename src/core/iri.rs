//! Parsing and rebuilding of collection IRIs
//!
//! A [`ParsedIri`] keeps the path, the query parameters minus the page
//! parameter, and the fragment of the incoming request URI. Navigation links
//! are rebuilt from it with a different page number.

use crate::core::error::{HalError, HalResult};
use url::{ParseError, Url, form_urlencoded};

/// A request URI split into the parts needed to build pagination links
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedIri {
    path: String,
    parameters: Vec<(String, String)>,
    fragment: Option<String>,
    page_parameter_name: String,
}

impl ParsedIri {
    /// Parse a request URI, dropping every occurrence of the page parameter
    ///
    /// Absolute URIs go through [`Url`]; relative references are split on
    /// `#` and `?`. Scheme and host of an absolute URI are not kept.
    pub fn parse(iri: &str, page_parameter_name: &str) -> HalResult<Self> {
        let (path, query, fragment) = match Url::parse(iri) {
            Ok(url) => (
                url.path().to_string(),
                url.query().map(str::to_string),
                url.fragment().map(str::to_string),
            ),
            Err(ParseError::RelativeUrlWithoutBase) => split_relative(iri),
            Err(e) => {
                return Err(HalError::MalformedIri {
                    iri: iri.to_string(),
                    message: e.to_string(),
                });
            }
        };

        let parameters = query
            .map(|q| {
                form_urlencoded::parse(q.as_bytes())
                    .filter(|(key, _)| key != page_parameter_name)
                    .map(|(key, value)| (key.into_owned(), value.into_owned()))
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            path,
            parameters,
            fragment,
            page_parameter_name: page_parameter_name.to_string(),
        })
    }

    /// The path component
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Query parameters other than the page parameter, in request order
    pub fn parameters(&self) -> &[(String, String)] {
        &self.parameters
    }

    /// Build an IRI for the given page, or without page parameter when `None`
    ///
    /// The page parameter always comes last. Whole page numbers are written
    /// without a decimal part.
    pub fn create(&self, page: Option<f64>) -> String {
        let page = page.map(|p| (self.page_parameter_name.as_str(), format!("{}", p)));
        let query = self
            .parameters
            .iter()
            .map(|(key, value)| (key.as_str(), value.clone()))
            .chain(page)
            .map(|(key, value)| {
                format!(
                    "{}={}",
                    urlencoding::encode(key),
                    urlencoding::encode(&value)
                )
            })
            .collect::<Vec<_>>()
            .join("&");

        let mut iri = self.path.clone();
        if !query.is_empty() {
            iri.push('?');
            iri.push_str(&query);
        }
        if let Some(fragment) = &self.fragment {
            iri.push('#');
            iri.push_str(fragment);
        }
        iri
    }
}

fn split_relative(iri: &str) -> (String, Option<String>, Option<String>) {
    let (rest, fragment) = match iri.split_once('#') {
        Some((rest, fragment)) => (rest, Some(fragment.to_string())),
        None => (iri, None),
    };
    let (path, query) = match rest.split_once('?') {
        Some((path, query)) => (path, Some(query.to_string())),
        None => (rest, None),
    };
    (path.to_string(), query, fragment)
}
