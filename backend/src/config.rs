//! Backend configuration, read from the environment.

use common::search_const::PAGE_SIZE;

pub const DEFAULT_GRAPHQL_URL: &str = "http://127.0.0.1:8080/graphql";

#[derive(Debug, Clone, PartialEq)]
pub struct BackendConfig {
    /// GraphQL endpoint of the remote query service.
    pub graphql_url: String,
    pub auth_token: Option<String>,
    /// JSON file with the search settings; built-in defaults when unset.
    pub dictionary_path: Option<String>,
    pub page_size: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self { graphql_url: DEFAULT_GRAPHQL_URL.to_string(), auth_token: None, dictionary_path: None, page_size: PAGE_SIZE }
    }
}

impl BackendConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Blank values count as unset; an unparsable page size keeps the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();
        let page_size = match var("ANET_PAGE_SIZE") {
            Some(raw) => match raw.parse::<u64>() {
                Ok(size) if size > 0 => size,
                _ => {
                    tracing::warn!("ignoring invalid ANET_PAGE_SIZE={}", raw);
                    defaults.page_size
                }
            },
            None => defaults.page_size,
        };
        Self {
            graphql_url: var("ANET_GRAPHQL_URL").unwrap_or(defaults.graphql_url),
            auth_token: var("ANET_AUTH_TOKEN"),
            dictionary_path: var("ANET_DICTIONARY_PATH"),
            page_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> BackendConfig {
        let vars = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect::<HashMap<_, _>>();
        BackendConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        assert_eq!(config(&[]), BackendConfig::default());
    }

    #[test]
    fn reads_every_variable() {
        let c = config(&[
            ("ANET_GRAPHQL_URL", "https://anet.example/graphql"),
            ("ANET_AUTH_TOKEN", "secret"),
            ("ANET_DICTIONARY_PATH", "/etc/anet/dictionary.json"),
            ("ANET_PAGE_SIZE", "25"),
        ]);
        assert_eq!(c.graphql_url, "https://anet.example/graphql");
        assert_eq!(c.auth_token.as_deref(), Some("secret"));
        assert_eq!(c.dictionary_path.as_deref(), Some("/etc/anet/dictionary.json"));
        assert_eq!(c.page_size, 25);
    }

    #[test]
    fn bad_page_size_and_blank_token_fall_back() {
        let c = config(&[("ANET_PAGE_SIZE", "zero"), ("ANET_AUTH_TOKEN", "  ")]);
        assert_eq!(c.page_size, PAGE_SIZE);
        assert_eq!(c.auth_token, None);
    }
}
