use std::rc::Rc;

use anyhow::Context;
use axum::{
    body::Body,
    extract::RawQuery,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::deserialize_registry::rehydrate;
use common::query_composer::compose;
use common::query_service::QueryService;
use common::search_filters::SearchFilters;
use common::search_query::SerializedQuery;
use common::search_result::{SearchListRequest, SearchListResult};
use serde_json::Value;
use tracing::info;

use crate::api::search::search_list;
use crate::api::settings::load_search_settings;
use crate::config::BackendConfig;
use crate::db_utils::graphql_utils::GraphqlClient;
use crate::graphql_query_service::GraphqlQueryService;

/// Upper bound on the pages one export walks through.
pub const MAX_EXPORT_PAGES: u64 = 50;

/// Rehydrates a shared search link and composes the list request for its first page.
/// Unregistered keys and stale references are left out; scalars get their filter's type.
pub async fn export_request(
    search_filters: &SearchFilters,
    raw_query: &str,
    service: &Rc<dyn QueryService>,
) -> anyhow::Result<SearchListRequest> {
    let incoming = SerializedQuery::from_query_string(raw_query);
    let state = rehydrate(search_filters, &incoming, service).await;
    let object_type = state.object_type.context("objectType is required for an export")?;
    Ok(SearchListRequest { object_type, query: compose(&state), page_num: 0 })
}

async fn remote_export_request(config: &BackendConfig, raw_query: &str) -> anyhow::Result<SearchListRequest> {
    let settings = load_search_settings(config).await?;
    let service: Rc<dyn QueryService> = Rc::new(GraphqlQueryService::new(GraphqlClient::new(config)));
    export_request(&SearchFilters::new(&settings), raw_query, &service).await
}

/// Collects every row of the search, page by page.
pub async fn collect_rows(client: &GraphqlClient, mut request: SearchListRequest, page_size: u64) -> anyhow::Result<Vec<Value>> {
    let mut rows = Vec::new();
    loop {
        let page: SearchListResult = search_list(client, request.clone(), page_size).await?;
        let more = page.has_next_page() && !page.list.is_empty();
        rows.extend(page.list);
        request.page_num += 1;
        if !more || request.page_num >= MAX_EXPORT_PAGES {
            break;
        }
    }
    Ok(rows)
}

async fn _export_search(raw_query: Option<String>) -> anyhow::Result<Response> {
    let config = BackendConfig::from_env();
    // rehydration holds an `Rc` service, so it runs off the handler's `Send` future
    let runtime = tokio::runtime::Handle::current();
    let request = {
        let config = config.clone();
        let raw_query = raw_query.unwrap_or_default();
        tokio::task::spawn_blocking(move || runtime.block_on(remote_export_request(&config, &raw_query)))
            .await
            .context("export request task failed")??
    };
    info!("Exporting search: {} ({} filters)", request.object_type, request.query.len());
    let client = GraphqlClient::new(&config);
    let filename = format!("{}.json", request.object_type.as_str().to_lowercase());
    let rows = collect_rows(&client, request, config.page_size).await?;
    info!("Export has {} rows", rows.len());

    let headers: [(String, String); 2] = [
        ("Content-Type".to_string(), "application/json".to_string()),
        ("Content-Disposition".to_string(), format!("attachment; filename=\"{}\"", filename)),
    ];
    let body = Body::from(serde_json::to_vec(&rows)?);
    Ok((headers, body).into_response())
}

pub async fn export_search(RawQuery(raw_query): RawQuery) -> Response {
    match _export_search(raw_query).await {
        Ok(response) => response,
        Err(e) => {
            tracing::error!("export_search: request failed: {:#?}", e);
            (StatusCode::BAD_REQUEST, Body::from(e.to_string())).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::search_object_type::SearchObjectType;
    use common::settings::SearchSettings;
    use futures::future::{FutureExt, LocalBoxFuture};
    use serde_json::json;

    /// Knows no entity at all.
    struct EmptyDirectory;

    impl QueryService for EmptyDirectory {
        fn query(&self, _name: &str, _variables: Value) -> LocalBoxFuture<'static, anyhow::Result<Value>> {
            async { Ok(json!([])) }.boxed_local()
        }
    }

    async fn request_for(raw_query: &str) -> anyhow::Result<SearchListRequest> {
        let service: Rc<dyn QueryService> = Rc::new(EmptyDirectory);
        export_request(&SearchFilters::new(&SearchSettings::default()), raw_query, &service).await
    }

    #[tokio::test]
    async fn export_request_takes_type_out_of_the_filters() {
        let request = request_for("objectType=TASKS&text=water&status=ACTIVE&pageNum=4").await.unwrap();
        assert_eq!(request.object_type, SearchObjectType::Tasks);
        assert_eq!(request.page_num, 0);
        assert_eq!(request.query.get("text"), Some(&json!("water")));
        assert_eq!(request.query.get("status"), Some(&json!("ACTIVE")));
        assert!(!request.query.contains_key("objectType"));
        assert!(!request.query.contains_key("pageNum"));
    }

    #[tokio::test]
    async fn export_keeps_only_registered_typed_filters() {
        let request = request_for("objectType=PEOPLE&isUser=false&retiredFilter=1&orgUuid=O-gone&text=smith")
            .await
            .unwrap();
        let mut expected = SerializedQuery::new();
        expected.insert("text", "smith");
        expected.insert("isUser", false);
        assert_eq!(request.query, expected);
    }

    #[tokio::test]
    async fn export_without_type_is_rejected() {
        assert!(request_for("text=water").await.is_err());
    }
}
