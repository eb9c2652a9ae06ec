//! Saved searches of the signed-in user.

use anyhow::Context;
use common::saved_search::{SavedSearch, SavedSearchInput};
use serde_json::{Value, json};

use crate::db_utils::graphql_utils::GraphqlClient;

const MY_SEARCHES: &str = "query { mySearches { uuid name objectType query displayInHomepage priority } }";
const CREATE_SAVED_SEARCH: &str =
    "mutation ($savedSearch: SavedSearchInput!) { createSavedSearch(savedSearch: $savedSearch) { uuid } }";
const DELETE_SAVED_SEARCH: &str = "mutation ($uuid: String!) { deleteSavedSearch(uuid: $uuid) }";

pub async fn my_saved_searches(client: &GraphqlClient) -> anyhow::Result<Vec<SavedSearch>> {
    let data = client.run(MY_SEARCHES, json!({})).await?;
    let rows = match data.get("mySearches") {
        Some(Value::Null) | None => return Ok(Vec::new()),
        Some(rows) => rows.clone(),
    };
    let mut searches: Vec<SavedSearch> = serde_json::from_value(rows).context("Failed to parse saved searches")?;
    searches.sort_by(|a, b| a.priority.unwrap_or(f64::MAX).total_cmp(&b.priority.unwrap_or(f64::MAX)));
    tracing::debug!(count = searches.len(), "saved searches loaded");
    Ok(searches)
}

/// Stores the search and returns the uuid it got.
pub async fn create_saved_search(client: &GraphqlClient, input: SavedSearchInput) -> anyhow::Result<String> {
    anyhow::ensure!(!input.name.is_empty(), "A saved search needs a name");
    let data = client.run(CREATE_SAVED_SEARCH, json!({ "savedSearch": input })).await?;
    let uuid = data
        .pointer("/createSavedSearch/uuid")
        .and_then(Value::as_str)
        .context("createSavedSearch returned no uuid")?;
    tracing::info!("saved search {} created", uuid);
    Ok(uuid.to_string())
}

pub async fn delete_saved_search(client: &GraphqlClient, uuid: &str) -> anyhow::Result<()> {
    client.run(DELETE_SAVED_SEARCH, json!({ "uuid": uuid })).await?;
    tracing::info!("saved search {} deleted", uuid);
    Ok(())
}
