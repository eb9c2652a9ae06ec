use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::BackendConfig;

#[derive(Debug, Serialize)]
struct GraphqlRequest<'a> {
    query: &'a str,
    variables: Value,
}

#[derive(Debug, Deserialize)]
pub struct RawGraphqlResponse {
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub errors: Vec<RawGraphqlError>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RawGraphqlError {
    pub message: String,
}

#[derive(Debug)]
pub enum RemoteQueryError {
    UnknownQuery(String),
    Http { status: u16, body: String },
    Graphql(Vec<String>),
}

impl std::fmt::Display for RemoteQueryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownQuery(name) => write!(f, "Unknown query: {}", name),
            Self::Http { status, body } => write!(f, "Error: {}: {}", status, body),
            Self::Graphql(messages) => write!(f, "Query failed: {}", messages.join("; ")),
        }
    }
}

impl std::error::Error for RemoteQueryError {}

#[derive(Debug, Clone)]
pub struct GraphqlClient {
    http: reqwest::Client,
    url: String,
    auth_token: Option<String>,
}

impl GraphqlClient {
    pub fn new(config: &BackendConfig) -> Self {
        Self { http: reqwest::Client::new(), url: config.graphql_url.clone(), auth_token: config.auth_token.clone() }
    }

    /// Runs one GraphQL document and returns its `data` member.
    pub async fn run(&self, document: &str, variables: Value) -> anyhow::Result<Value> {
        let t0 = std::time::Instant::now();
        let body = serde_json::to_string(&GraphqlRequest { query: document, variables })?;
        let mut request = self
            .http
            .post(&self.url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body);
        if let Some(token) = &self.auth_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        let response_txt = response.text().await?;
        if status.is_client_error() || status.is_server_error() {
            return Err(RemoteQueryError::Http { status: status.as_u16(), body: response_txt }.into());
        }
        let response: RawGraphqlResponse = serde_json::from_str(&response_txt)?;
        let dt_ms = t0.elapsed().as_millis();
        tracing::debug!(len = response_txt.len(), dt_ms, "graphql response");
        if !response.errors.is_empty() {
            return Err(RemoteQueryError::Graphql(response.errors.into_iter().map(|e| e.message).collect()).into());
        }
        Ok(response.data.unwrap_or(Value::Null))
    }
}

pub fn get_graphql_client() -> GraphqlClient {
    GraphqlClient::new(&BackendConfig::from_env())
}
