//! Filters on foreign entities (locations, organizations), resolved by uuid.

use std::rc::Rc;

use futures::FutureExt;
use serde::Serialize;

use super::recurse_strategy::{RecurseStrategy, Recursion};
use super::{FilterCodec, Rehydration};
use crate::query_service::{EntityRef, LookupKind, QueryService, lookup_entities};
use crate::search_query::SerializedQuery;

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityValue {
    pub value: Option<EntityRef>,
    pub recurse_strategy: RecurseStrategy,
}

/// Single-entity filter, optionally hierarchical.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityFilter {
    pub lookup_kind: LookupKind,
    pub query_key: String,
    pub recursion: Option<Recursion>,
}

impl EntityFilter {
    pub fn new(lookup_kind: LookupKind, query_key: impl Into<String>) -> Self {
        Self { lookup_kind, query_key: query_key.into(), recursion: None }
    }

    pub fn location(query_key: impl Into<String>) -> Self {
        Self { lookup_kind: LookupKind::Location, query_key: query_key.into(), recursion: None }
    }

    pub fn organization(query_key: impl Into<String>) -> Self {
        Self { lookup_kind: LookupKind::Organization, query_key: query_key.into(), recursion: None }
    }

    pub fn with_recursion(mut self, recursion: Recursion) -> Self {
        self.recursion = Some(recursion);
        self
    }
}

fn owned_keys(query_key: &str, recursion: &Option<Recursion>) -> Vec<String> {
    let mut keys = vec![query_key.to_string()];
    if let Some(r) = recursion.as_ref().filter(|r| r.is_selectable()) {
        keys.push(r.query_key.clone());
    }
    keys
}

fn read_strategy(recursion: &Option<Recursion>, query: &SerializedQuery) -> RecurseStrategy {
    recursion.as_ref().map(|r| r.read(query)).unwrap_or_default()
}

fn write_strategy(recursion: &Option<Recursion>, strategy: RecurseStrategy, query: &mut SerializedQuery) {
    if let Some(r) = recursion {
        r.write(strategy, query);
    }
}

fn with_suffix(text: String, recursion: &Option<Recursion>, strategy: RecurseStrategy) -> String {
    match recursion.as_ref().and_then(|r| r.describe(strategy)) {
        Some(suffix) if !text.is_empty() => format!("{} ({})", text, suffix),
        _ => text,
    }
}

impl FilterCodec for EntityFilter {
    type Value = EntityValue;

    fn query_keys(&self) -> Vec<String> {
        owned_keys(&self.query_key, &self.recursion)
    }

    fn default_value(&self) -> EntityValue {
        EntityValue {
            value: None,
            recurse_strategy: self.recursion.as_ref().map(Recursion::initial).unwrap_or_default(),
        }
    }

    fn to_query(&self, value: &EntityValue) -> SerializedQuery {
        let mut query = SerializedQuery::new();
        if let Some(entity) = &value.value {
            query.insert(self.query_key.clone(), entity.uuid.clone());
            write_strategy(&self.recursion, value.recurse_strategy, &mut query);
        }
        query
    }

    fn deserialize(
        &self,
        query: &SerializedQuery,
        service: &Rc<dyn QueryService>,
    ) -> Rehydration<EntityValue> {
        let Some(uuid) = query.get_str(&self.query_key).filter(|u| !u.is_empty()) else {
            return Rehydration::Absent;
        };
        let recurse_strategy = read_strategy(&self.recursion, query);
        let lookup = lookup_entities(service, self.lookup_kind, vec![uuid.clone()]);
        Rehydration::Pending(
            async move {
                let found = lookup.await?.into_iter().next();
                if found.is_none() {
                    tracing::debug!(uuid = %uuid, "stale entity reference dropped");
                }
                Ok(found.map(|entity| EntityValue { value: Some(entity), recurse_strategy }))
            }
            .boxed_local(),
        )
    }

    fn display(&self, value: &EntityValue) -> String {
        let name = value.value.as_ref().map(|e| e.name.clone()).unwrap_or_default();
        with_suffix(name, &self.recursion, value.recurse_strategy)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityMultiValue {
    pub value: Vec<EntityRef>,
    pub recurse_strategy: RecurseStrategy,
}

/// Multi-entity filter; the selection serializes as an array of uuids.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityMultiFilter {
    pub lookup_kind: LookupKind,
    pub query_key: String,
    pub recursion: Option<Recursion>,
}

impl EntityMultiFilter {
    pub fn organizations(query_key: impl Into<String>) -> Self {
        Self { lookup_kind: LookupKind::Organization, query_key: query_key.into(), recursion: None }
    }

    pub fn locations(query_key: impl Into<String>) -> Self {
        Self { lookup_kind: LookupKind::Location, query_key: query_key.into(), recursion: None }
    }

    pub fn with_recursion(mut self, recursion: Recursion) -> Self {
        self.recursion = Some(recursion);
        self
    }
}

impl FilterCodec for EntityMultiFilter {
    type Value = EntityMultiValue;

    fn query_keys(&self) -> Vec<String> {
        owned_keys(&self.query_key, &self.recursion)
    }

    fn default_value(&self) -> EntityMultiValue {
        EntityMultiValue {
            value: Vec::new(),
            recurse_strategy: self.recursion.as_ref().map(Recursion::initial).unwrap_or_default(),
        }
    }

    fn to_query(&self, value: &EntityMultiValue) -> SerializedQuery {
        let mut query = SerializedQuery::new();
        if !value.value.is_empty() {
            let uuids = value.value.iter().map(|e| e.uuid.clone()).collect::<Vec<_>>();
            query.insert(self.query_key.clone(), uuids);
            write_strategy(&self.recursion, value.recurse_strategy, &mut query);
        }
        query
    }

    fn deserialize(
        &self,
        query: &SerializedQuery,
        service: &Rc<dyn QueryService>,
    ) -> Rehydration<EntityMultiValue> {
        let uuids = query
            .get_string_list(&self.query_key)
            .into_iter()
            .filter(|u| !u.is_empty())
            .collect::<Vec<_>>();
        if uuids.is_empty() {
            return Rehydration::Absent;
        }
        let recurse_strategy = read_strategy(&self.recursion, query);
        let lookup = lookup_entities(service, self.lookup_kind, uuids);
        Rehydration::Pending(
            async move {
                let found = lookup.await?;
                Ok((!found.is_empty()).then(|| EntityMultiValue { value: found, recurse_strategy }))
            }
            .boxed_local(),
        )
    }

    fn display(&self, value: &EntityMultiValue) -> String {
        let names = value.value.iter().map(|e| e.name.as_str()).collect::<Vec<_>>().join(", ");
        with_suffix(names, &self.recursion, value.recurse_strategy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn fixed_recursion_is_never_serialized() {
        let filter = EntityMultiFilter::organizations("orgUuid")
            .with_recursion(Recursion::fixed("orgRecurseStrategy", RecurseStrategy::Children));
        let value = EntityMultiValue {
            value: vec![EntityRef::new("o1", "EF 1")],
            recurse_strategy: RecurseStrategy::Children,
        };
        let query = filter.to_query(&value);
        assert_eq!(query.get("orgUuid"), Some(&json!(["o1"])));
        assert!(!query.contains_key("orgRecurseStrategy"));
        assert_eq!(filter.query_keys(), vec!["orgUuid".to_string()]);
    }

    #[test]
    fn selectable_recursion_defaults_to_none() {
        let filter = EntityFilter::organization("orgUuid")
            .with_recursion(Recursion::selectable("orgRecurseStrategy"));
        let mut value = filter.default_value();
        value.value = Some(EntityRef::new("o1", "EF 1"));
        let query = filter.to_query(&value);
        assert_eq!(query.get_str("orgRecurseStrategy").as_deref(), Some("NONE"));
    }

    #[test]
    fn empty_selection_serializes_to_nothing() {
        let filter = EntityFilter::location("locationUuid")
            .with_recursion(Recursion::selectable("locationRecurseStrategy"));
        assert!(filter.to_query(&filter.default_value()).is_empty());
    }

    #[test]
    fn display_appends_user_selected_strategy() {
        let filter = EntityMultiFilter::organizations("orgUuid")
            .with_recursion(Recursion::selectable("orgRecurseStrategy"));
        let value = EntityMultiValue {
            value: vec![EntityRef::new("o1", "EF 1"), EntityRef::new("o2", "EF 2")],
            recurse_strategy: RecurseStrategy::Children,
        };
        assert_eq!(filter.display(&value), "EF 1, EF 2 (and children)");
    }
}
