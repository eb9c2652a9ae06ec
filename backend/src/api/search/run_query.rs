use serde_json::Value;

use crate::api::search::query_documents::query_document;
use crate::db_utils::graphql_utils::{GraphqlClient, RemoteQueryError};

/// Runs a named query of the search core and returns the member of `data` it names.
pub async fn run_named_query(client: &GraphqlClient, name: &str, variables: Value) -> anyhow::Result<Value> {
    let document = query_document(name).ok_or_else(|| RemoteQueryError::UnknownQuery(name.to_string()))?;
    let data = client.run(&document, variables).await?;
    let result = match data {
        Value::Object(mut data) => data.remove(name).unwrap_or(Value::Null),
        _ => Value::Null,
    };
    tracing::debug!(query = name, "named query finished");
    Ok(result)
}
