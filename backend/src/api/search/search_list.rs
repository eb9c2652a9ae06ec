use common::search_result::{SearchListRequest, SearchListResult};
use serde_json::{Value, json};

use crate::api::search::run_query::run_named_query;
use crate::db_utils::graphql_utils::GraphqlClient;

/// Variables of a list query: the composed filters plus the page window.
pub fn list_variables(request: &SearchListRequest, page_size: u64) -> Value {
    let mut query = serde_json::Map::new();
    for (key, value) in request.query.iter() {
        query.insert(key.clone(), value.clone());
    }
    query.insert("pageNum".to_string(), json!(request.page_num));
    query.insert("pageSize".to_string(), json!(page_size));
    json!({ "query": query })
}

pub async fn search_list(client: &GraphqlClient, request: SearchListRequest, page_size: u64) -> anyhow::Result<SearchListResult> {
    tracing::info!(
        "search_list: type={} page={} filters={}",
        request.object_type,
        request.page_num,
        request.query.len()
    );
    let variables = list_variables(&request, page_size);
    let response = run_named_query(client, request.object_type.list_query_name(), variables).await?;
    if response.is_null() {
        return Ok(SearchListResult { page_num: request.page_num, page_size, ..Default::default() });
    }
    Ok(serde_json::from_value(response)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::search_object_type::SearchObjectType;
    use common::search_query::SerializedQuery;

    #[test]
    fn page_window_overrides_composed_keys() {
        let mut query = SerializedQuery::new();
        query.insert("text", json!("convoy"));
        query.insert("pageNum", json!(9));
        let request = SearchListRequest { object_type: SearchObjectType::Reports, query, page_num: 2 };
        assert_eq!(
            list_variables(&request, 25),
            json!({ "query": { "text": "convoy", "pageNum": 2, "pageSize": 25 } })
        );
    }
}
