//! Rebuilds the aggregate search state from a serialized query.
//!
//! Every registered filter is asked to deserialize at once; synchronous matches
//! and pending lookups are joined concurrently, so a deep link with many entity
//! filters costs one lookup round-trip rather than one per filter.

use std::rc::Rc;

use futures::future::{self, FutureExt, LocalBoxFuture};
use serde::Serialize;

use crate::filters::{FilterDefinition, FilterSlot, FilterValue, Rehydration};
use crate::query_service::QueryService;
use crate::search_const::{OBJECT_TYPE_KEY, TEXT_KEY};
use crate::search_filters::SearchFilters;
use crate::search_object_type::SearchObjectType;
use crate::search_query::SerializedQuery;

/// Free text, object type and the occupied filter slots, in registration order.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateSearchState {
    pub text: String,
    pub object_type: Option<SearchObjectType>,
    pub filters: Vec<FilterSlot>,
}

impl AggregateSearchState {
    pub fn get(&self, key: &str) -> Option<&FilterSlot> {
        self.filters.iter().find(|slot| slot.key == key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

fn settle(
    definition: &FilterDefinition,
    rehydration: Rehydration<FilterValue>,
) -> LocalBoxFuture<'static, Option<FilterSlot>> {
    match rehydration {
        Rehydration::Absent => future::ready(None).boxed_local(),
        Rehydration::Ready(value) => future::ready(Some(definition.slot(value))).boxed_local(),
        Rehydration::Pending(pending) => {
            let definition = definition.clone();
            async move {
                match pending.await {
                    Ok(Some(value)) => Some(definition.slot(value)),
                    Ok(None) => None,
                    Err(err) => {
                        tracing::warn!(filter = %definition.key, "filter lookup failed, dropping it: {:#}", err);
                        None
                    }
                }
            }
            .boxed_local()
        }
    }
}

/// Resolves once every filter has settled. Absent, stale and failed filters
/// leave no slot; keys no definition owns are ignored.
pub async fn rehydrate_filters(
    definitions: &[FilterDefinition],
    query: &SerializedQuery,
    service: &Rc<dyn QueryService>,
) -> Vec<FilterSlot> {
    let pending = definitions
        .iter()
        .map(|definition| settle(definition, definition.spec.deserialize(query, service)))
        .collect::<Vec<_>>();
    future::join_all(pending).await.into_iter().flatten().collect()
}

/// Rehydrates a whole search context: object type and text, then the filters
/// that context registers.
pub async fn rehydrate(
    search_filters: &SearchFilters,
    query: &SerializedQuery,
    service: &Rc<dyn QueryService>,
) -> AggregateSearchState {
    let object_type = query.get_str(OBJECT_TYPE_KEY).and_then(|t| SearchObjectType::parse(&t));
    let text = query.get_str(TEXT_KEY).unwrap_or_default();
    let definitions = search_filters.deserializable(object_type);
    tracing::debug!(object_type = ?object_type, registered = definitions.len(), "rehydrating search");
    let filters = rehydrate_filters(&definitions, query, service).await;
    tracing::debug!(slots = filters.len(), "search rehydrated");
    AggregateSearchState { text, object_type, filters }
}
