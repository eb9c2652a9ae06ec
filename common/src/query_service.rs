//! The remote query service boundary and entity lookups built on it.

use std::rc::Rc;

use futures::future::{FutureExt, LocalBoxFuture};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Opaque request/response capability of the remote query service: a named query
/// with a JSON `variables` object.
///
/// Futures are local: the whole search core runs on one cooperative event loop.
pub trait QueryService {
    fn query(&self, name: &str, variables: Value) -> LocalBoxFuture<'static, anyhow::Result<Value>>;
}

/// A foreign entity as the filters display it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Hash)]
pub struct EntityRef {
    pub uuid: String,
    #[serde(default)]
    pub name: String,
}

impl EntityRef {
    pub fn new(uuid: impl Into<String>, name: impl Into<String>) -> Self {
        Self { uuid: uuid.into(), name: name.into() }
    }
}

/// Entity kinds that filters resolve by identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LookupKind {
    Location,
    Organization,
    Person,
    Position,
    Task,
    EventSeries,
}

impl LookupKind {
    /// Name of the batch query returning one entry (or null) per requested uuid.
    pub fn batch_query_name(&self) -> &'static str {
        match self {
            LookupKind::Location => "locations",
            LookupKind::Organization => "organizations",
            LookupKind::Person => "people",
            LookupKind::Position => "positions",
            LookupKind::Task => "tasks",
            LookupKind::EventSeries => "eventSeriesBatch",
        }
    }

    /// Name of the paginated list query used for autocompletion.
    pub fn list_query_name(&self) -> &'static str {
        match self {
            LookupKind::Location => "locationList",
            LookupKind::Organization => "organizationList",
            LookupKind::Person => "personList",
            LookupKind::Position => "positionList",
            LookupKind::Task => "taskList",
            LookupKind::EventSeries => "eventSeriesList",
        }
    }
}

#[derive(Debug)]
pub enum LookupError {
    MalformedResponse { query: &'static str, detail: String },
}

impl std::fmt::Display for LookupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedResponse { query, detail } => {
                write!(f, "Malformed response to query {}: {}", query, detail)
            }
        }
    }
}

impl std::error::Error for LookupError {}

/// Resolves `uuids` into entities with one batch query.
///
/// Unknown identifiers come back as null entries and are left out of the result;
/// the order of the request is kept.
pub fn lookup_entities(
    service: &Rc<dyn QueryService>,
    kind: LookupKind,
    uuids: Vec<String>,
) -> LocalBoxFuture<'static, anyhow::Result<Vec<EntityRef>>> {
    let request = service.query(kind.batch_query_name(), json!({ "uuids": uuids }));
    async move {
        let response = request.await?;
        let entities = parse_entity_list(kind.batch_query_name(), response)?;
        let ordered = uuids
            .iter()
            .filter_map(|uuid| entities.iter().find(|e| &e.uuid == uuid).cloned())
            .collect::<Vec<_>>();
        tracing::debug!(
            query = kind.batch_query_name(),
            requested = uuids.len(),
            found = ordered.len(),
            "entity lookup finished"
        );
        Ok(ordered)
    }
    .boxed_local()
}

/// Text autocompletion over the paginated list query.
pub fn autocomplete_entities(
    service: &Rc<dyn QueryService>,
    kind: LookupKind,
    text: String,
    page_size: u64,
) -> LocalBoxFuture<'static, anyhow::Result<Vec<EntityRef>>> {
    let request = service.query(
        kind.list_query_name(),
        json!({ "query": { "text": text, "pageNum": 0, "pageSize": page_size } }),
    );
    async move {
        let response = request.await?;
        let list = match response {
            Value::Object(mut obj) => obj.remove("list").unwrap_or(Value::Null),
            other => other,
        };
        Ok(parse_entity_list(kind.list_query_name(), list)?)
    }
    .boxed_local()
}

fn parse_entity_list(query: &'static str, response: Value) -> Result<Vec<EntityRef>, LookupError> {
    let items = match response {
        Value::Array(items) => items,
        Value::Null => return Ok(Vec::new()),
        other => {
            return Err(LookupError::MalformedResponse {
                query,
                detail: format!("expected a list, got {}", other),
            });
        }
    };
    items
        .into_iter()
        .filter(|item| !item.is_null())
        .map(|item| {
            serde_json::from_value::<EntityRef>(item).map_err(|e| LookupError::MalformedResponse {
                query,
                detail: e.to_string(),
            })
        })
        .collect()
}
