//! [`QueryService`] of the browser: every named query goes through the server.

use common::query_service::QueryService;
use futures_util::future::{FutureExt, LocalBoxFuture};
use serde_json::Value;

use crate::api::search_api::run_named_query;

#[derive(Debug, Clone, Copy, Default)]
pub struct ServerQueryService;

impl QueryService for ServerQueryService {
    fn query(&self, name: &str, variables: Value) -> LocalBoxFuture<'static, anyhow::Result<Value>> {
        let name = name.to_string();
        async move { run_named_query(name, variables).await.map_err(|e| anyhow::anyhow!("{}", e)) }.boxed_local()
    }
}
