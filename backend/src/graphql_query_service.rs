//! [`QueryService`] over the remote GraphQL endpoint.

use common::query_service::QueryService;
use futures::future::{FutureExt, LocalBoxFuture};
use serde_json::Value;

use crate::api::search::run_named_query;
use crate::db_utils::graphql_utils::GraphqlClient;

#[derive(Debug, Clone)]
pub struct GraphqlQueryService {
    client: GraphqlClient,
}

impl GraphqlQueryService {
    pub fn new(client: GraphqlClient) -> Self {
        Self { client }
    }
}

impl QueryService for GraphqlQueryService {
    fn query(&self, name: &str, variables: Value) -> LocalBoxFuture<'static, anyhow::Result<Value>> {
        let client = self.client.clone();
        let name = name.to_string();
        async move { run_named_query(&client, &name, variables).await }.boxed_local()
    }
}
