//! Server functions for the saved searches of the signed-in user.

use common::saved_search::{SavedSearch, SavedSearchInput};
use common::search_query::SerializedQuery;
use dioxus::prelude::*;

#[server]
pub async fn my_saved_searches() -> Result<Vec<SavedSearch>, ServerFnError> {
    let client = backend::db_utils::graphql_utils::get_graphql_client();
    let x = backend::api::saved_searches::my_saved_searches(&client).await;
    x.map_err(|e| ServerFnError::ServerError { message: e.to_string(), code: 500, details: None })
}

#[server]
pub async fn save_search(
    name: String,
    display_in_homepage: bool,
    share_query: SerializedQuery,
) -> Result<String, ServerFnError> {
    let client = backend::db_utils::graphql_utils::get_graphql_client();
    let input = SavedSearchInput::from_share_query(&name, display_in_homepage, &share_query);
    let x = backend::api::saved_searches::create_saved_search(&client, input).await;
    x.map_err(|e| ServerFnError::ServerError { message: e.to_string(), code: 500, details: None })
}

#[server]
pub async fn delete_saved_search(uuid: String) -> Result<(), ServerFnError> {
    let client = backend::db_utils::graphql_utils::get_graphql_client();
    let x = backend::api::saved_searches::delete_saved_search(&client, &uuid).await;
    x.map_err(|e| ServerFnError::ServerError { message: e.to_string(), code: 500, details: None })
}
