use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::search_object_type::SearchObjectType;
use crate::search_query::SerializedQuery;

/// One page of a `<type>List` query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SearchListResult {
    #[serde(default)]
    pub page_num: u64,
    #[serde(default)]
    pub page_size: u64,
    #[serde(default)]
    pub total_count: u64,
    #[serde(default)]
    pub list: Vec<Value>,
}

impl SearchListResult {
    pub fn page_count(&self) -> u64 {
        if self.page_size == 0 {
            return 0;
        }
        self.total_count.div_ceil(self.page_size)
    }

    pub fn has_next_page(&self) -> bool {
        self.page_num + 1 < self.page_count()
    }
}

/// A composed search as sent to the list query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchListRequest {
    pub object_type: SearchObjectType,
    pub query: SerializedQuery,
    pub page_num: u64,
}

/// Row shape shared by every list: enough for a result table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResultItem {
    pub uuid: String,
    pub label: String,
}

impl SearchResultItem {
    /// Picks the first naming field a row carries.
    pub fn from_row(row: &Value) -> Option<Self> {
        let uuid = row.get("uuid")?.as_str()?.to_string();
        let label = ["name", "intent", "longName", "shortName"]
            .into_iter()
            .find_map(|field| row.get(field).and_then(Value::as_str).filter(|s| !s.is_empty()))
            .unwrap_or(uuid.as_str())
            .to_string();
        Some(Self { uuid, label })
    }
}
