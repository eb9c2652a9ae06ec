//! Searches a user stored under a name, and their descriptions.

use std::rc::Rc;

use futures::future::join_all;
use serde::{Deserialize, Serialize};

use crate::deserialize_registry::rehydrate;
use crate::query_service::QueryService;
use crate::search_const::OBJECT_TYPE_KEY;
use crate::search_description::SearchDescription;
use crate::search_filters::SearchFilters;
use crate::search_object_type::SearchObjectType;
use crate::search_query::SerializedQuery;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedSearch {
    pub uuid: String,
    pub name: String,
    #[serde(default)]
    pub object_type: Option<SearchObjectType>,
    /// Composed query, as JSON text.
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub display_in_homepage: bool,
    #[serde(default)]
    pub priority: Option<f64>,
}

impl SavedSearch {
    /// Stored query; text that is not a JSON object reads as an empty search.
    pub fn parsed_query(&self) -> SerializedQuery {
        match serde_json::from_str::<SerializedQuery>(&self.query) {
            Ok(query) => query,
            Err(e) => {
                tracing::warn!(uuid = %self.uuid, "saved search query does not parse: {}", e);
                SerializedQuery::new()
            }
        }
    }

    /// Stored query plus its object type, as a shareable link carries it.
    pub fn share_query(&self) -> SerializedQuery {
        let mut query = self.parsed_query();
        if let Some(object_type) = self.object_type {
            query.insert(OBJECT_TYPE_KEY, object_type.as_str());
        }
        query
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedSearchInput {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_type: Option<SearchObjectType>,
    pub query: String,
    pub display_in_homepage: bool,
}

impl SavedSearchInput {
    /// The object type moves out of the query into its own field.
    pub fn from_share_query(name: &str, display_in_homepage: bool, share_query: &SerializedQuery) -> Self {
        let (object_type, query) = split_object_type(share_query);
        Self {
            name: name.trim().to_string(),
            object_type,
            query: serde_json::to_string(&query).unwrap_or_else(|_| "{}".to_string()),
            display_in_homepage,
        }
    }
}

fn split_object_type(share_query: &SerializedQuery) -> (Option<SearchObjectType>, SerializedQuery) {
    let mut query = share_query.clone();
    let object_type = query.remove(OBJECT_TYPE_KEY).and_then(|v| v.as_str().and_then(SearchObjectType::parse));
    (object_type, query)
}

/// An identical search (same object type, same query) is already saved.
pub fn is_duplicate(saved: &[SavedSearch], share_query: &SerializedQuery) -> bool {
    let (object_type, query) = split_object_type(share_query);
    saved.iter().any(|s| s.object_type == object_type && s.parsed_query() == query)
}

/// Rehydrates every saved search at once and describes each, in input order.
pub async fn describe_saved_searches(
    search_filters: &SearchFilters,
    saved: &[SavedSearch],
    service: &Rc<dyn QueryService>,
) -> Vec<SearchDescription> {
    join_all(saved.iter().map(|s| async move {
        let state = rehydrate(search_filters, &s.share_query(), service).await;
        SearchDescription::new(search_filters, &state)
    }))
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn saved(uuid: &str, object_type: Option<SearchObjectType>, query: &str) -> SavedSearch {
        SavedSearch {
            uuid: uuid.to_string(),
            name: format!("search {}", uuid),
            object_type,
            query: query.to_string(),
            display_in_homepage: false,
            priority: None,
        }
    }

    #[test]
    fn input_keeps_object_type_out_of_the_query() {
        let share = SerializedQuery::from_query_string("objectType=PEOPLE&text=smith&status=ACTIVE");
        let input = SavedSearchInput::from_share_query(" Active Smiths ", true, &share);
        assert_eq!(input.name, "Active Smiths");
        assert_eq!(input.object_type, Some(SearchObjectType::People));
        assert_eq!(serde_json::from_str::<serde_json::Value>(&input.query).unwrap(), json!({ "status": "ACTIVE", "text": "smith" }));
        assert_eq!(
            serde_json::to_value(&input).unwrap(),
            json!({ "name": "Active Smiths", "objectType": "PEOPLE", "query": input.query, "displayInHomepage": true })
        );
    }

    #[test]
    fn duplicates_match_type_and_query() {
        let existing = vec![saved("s1", Some(SearchObjectType::Reports), r#"{"state":["DRAFT"]}"#)];
        let mut share = SerializedQuery::new();
        share.insert("state", json!(["DRAFT"]));
        assert!(!is_duplicate(&existing, &share));
        share.insert(OBJECT_TYPE_KEY, "REPORTS");
        assert!(is_duplicate(&existing, &share));
        share.insert("text", "late");
        assert!(!is_duplicate(&existing, &share));
    }

    #[test]
    fn unreadable_query_is_an_empty_search() {
        let broken = saved("s2", Some(SearchObjectType::Tasks), "not json");
        assert!(broken.parsed_query().is_empty());
        assert_eq!(broken.share_query().get_str(OBJECT_TYPE_KEY).as_deref(), Some("TASKS"));
    }

    #[test]
    fn rows_read_from_the_listing() {
        let row = json!({
            "uuid": "s3", "name": "Mine", "objectType": "LOCATIONS",
            "query": "{\"text\":\"port\"}", "displayInHomepage": true, "priority": 1.5
        });
        let search: SavedSearch = serde_json::from_value(row).unwrap();
        assert_eq!(search.object_type, Some(SearchObjectType::Locations));
        assert_eq!(search.parsed_query().get_str("text").as_deref(), Some("port"));
        assert_eq!(search.priority, Some(1.5));
    }
}
