//! Shareable search query carried in the URL query string.

use std::fmt::Display;

use common::search_query::SerializedQuery;

/// Route segment holding a whole [`SerializedQuery`]: arrays repeat the key,
/// objects are JSON text, scalars are plain text.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UrlQuery(pub SerializedQuery);

impl From<SerializedQuery> for UrlQuery {
    fn from(value: SerializedQuery) -> Self {
        UrlQuery(value)
    }
}

impl From<&str> for UrlQuery {
    fn from(query_string: &str) -> Self {
        UrlQuery(SerializedQuery::from_query_string(query_string))
    }
}

impl Display for UrlQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_query_string())
    }
}
