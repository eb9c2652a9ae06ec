//! Client API calls for search endpoints.

use common::search_result::{SearchListRequest, SearchListResult};
use common::settings::SearchSettings;
use dioxus::prelude::*;
use serde_json::Value;

#[server]
pub async fn run_named_query(name: String, variables: Value) -> Result<Value, ServerFnError> {
    let client = backend::db_utils::graphql_utils::get_graphql_client();
    let x = backend::api::search::run_named_query(&client, &name, variables).await;
    x.map_err(|e| ServerFnError::ServerError { message: e.to_string(), code: 500, details: None })
}

#[server]
pub async fn search_list(request: SearchListRequest) -> Result<SearchListResult, ServerFnError> {
    let config = backend::config::BackendConfig::from_env();
    let client = backend::db_utils::graphql_utils::GraphqlClient::new(&config);
    let x = backend::api::search::search_list(&client, request, config.page_size).await;
    x.map_err(|e| ServerFnError::ServerError { message: e.to_string(), code: 500, details: None })
}

#[server]
pub async fn load_search_settings() -> Result<SearchSettings, ServerFnError> {
    let config = backend::config::BackendConfig::from_env();
    let x = backend::api::settings::load_search_settings(&config).await;
    x.map_err(|e| ServerFnError::ServerError { message: e.to_string(), code: 500, details: None })
}
