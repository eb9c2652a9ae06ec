//! Owns the aggregate search state and composes it into one serialized query.
//!
//! In [`ComposeMode::Live`] every edit is committed at once and returns the
//! query to re-issue. In [`ComposeMode::Staged`] edits pile up in a draft that
//! [`QueryComposer::submit`] commits and [`QueryComposer::cancel`] throws away.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use serde_json::Value;

use crate::deserialize_registry::{AggregateSearchState, rehydrate};
use crate::filters::{FilterDefinition, FilterSlot, SlotValue};
use crate::query_service::QueryService;
use crate::search_const::{OBJECT_TYPE_KEY, STORE_PAGE_NUM, STORE_SEARCH_TEXT, TEXT_KEY};
use crate::search_filters::SearchFilters;
use crate::search_object_type::SearchObjectType;
use crate::search_query::SerializedQuery;
use crate::search_result::SearchListRequest;

/// Narrow view of the shared application store.
pub trait SearchStore {
    fn get(&self, key: &str) -> Option<Value>;
    fn set(&self, key: &str, value: Value);
}

#[derive(Debug, Default)]
pub struct MemoryStore(RefCell<BTreeMap<String, Value>>);

impl SearchStore for MemoryStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.0.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: Value) {
        self.0.borrow_mut().insert(key.to_string(), value);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposeMode {
    Live,
    Staged,
}

/// Free text followed by every slot's fragment, in slot order.
pub fn compose(state: &AggregateSearchState) -> SerializedQuery {
    let mut query = SerializedQuery::new();
    if !state.text.is_empty() {
        query.insert(TEXT_KEY, state.text.clone());
    }
    for slot in &state.filters {
        let fragment = slot.value.to_query.invoke();
        debug_assert!(
            !fragment.keys().any(|k| query.contains_key(k)),
            "filter {:?} writes a key another filter already wrote",
            slot.key
        );
        query.merge(fragment);
    }
    query
}

pub struct QueryComposer {
    search_filters: Rc<SearchFilters>,
    mode: ComposeMode,
    store: Rc<dyn SearchStore>,
    submitted: AggregateSearchState,
    draft: AggregateSearchState,
}

impl QueryComposer {
    pub fn new(
        search_filters: Rc<SearchFilters>,
        mode: ComposeMode,
        store: Rc<dyn SearchStore>,
        initial: AggregateSearchState,
    ) -> Self {
        Self { search_filters, mode, store, submitted: initial.clone(), draft: initial }
    }

    /// A composer over the state rehydrated from `incoming`.
    pub async fn rehydrated(
        search_filters: Rc<SearchFilters>,
        mode: ComposeMode,
        store: Rc<dyn SearchStore>,
        incoming: &SerializedQuery,
        service: &Rc<dyn QueryService>,
    ) -> Self {
        let state = rehydrate(&search_filters, incoming, service).await;
        Self::new(search_filters, mode, store, state)
    }

    /// A composer of `mode` over this one's submitted state, sharing its store.
    pub fn fork(&self, mode: ComposeMode) -> Self {
        Self::new(self.search_filters.clone(), mode, self.store.clone(), self.submitted.clone())
    }

    pub fn mode(&self) -> ComposeMode {
        self.mode
    }

    pub fn search_filters(&self) -> &Rc<SearchFilters> {
        &self.search_filters
    }

    /// The state edits apply to; ahead of [`Self::submitted`] only when staged.
    pub fn state(&self) -> &AggregateSearchState {
        &self.draft
    }

    pub fn submitted(&self) -> &AggregateSearchState {
        &self.submitted
    }

    pub fn has_staged_edits(&self) -> bool {
        self.draft != self.submitted
    }

    /// Filters registered for the object type being edited.
    pub fn definitions(&self) -> Vec<FilterDefinition> {
        self.search_filters.active(self.draft.object_type)
    }

    pub fn definition(&self, key: &str) -> Option<FilterDefinition> {
        self.search_filters.find(self.draft.object_type, key)
    }

    /// Registered filters not in use yet.
    pub fn available_filters(&self) -> Vec<FilterDefinition> {
        self.definitions().into_iter().filter(|d| !self.draft.contains(&d.key)).collect()
    }

    fn commit(&mut self) {
        self.submitted = self.draft.clone();
        self.store.set(STORE_PAGE_NUM, Value::from(0));
        self.store.set(STORE_SEARCH_TEXT, Value::from(self.submitted.text.clone()));
    }

    fn edited(&mut self) -> Option<SerializedQuery> {
        match self.mode {
            ComposeMode::Live => {
                self.commit();
                Some(self.composed_query())
            }
            ComposeMode::Staged => None,
        }
    }

    /// Stores a propagated filter value. Returns the query to re-issue when live.
    pub fn set_filter(&mut self, key: &str, value: SlotValue) -> Option<SerializedQuery> {
        if self.definition(key).is_none() {
            tracing::warn!(filter = key, "ignoring value for a filter this search does not register");
            return None;
        }
        match self.draft.filters.iter_mut().find(|slot| slot.key == key) {
            Some(slot) if slot.value == value => return None,
            Some(slot) => slot.value = value,
            None => self.draft.filters.push(FilterSlot { key: key.to_string(), value }),
        }
        self.edited()
    }

    /// Adds a filter with its default value.
    pub fn add_filter(&mut self, key: &str) -> Option<SerializedQuery> {
        if self.draft.contains(key) {
            return None;
        }
        let definition = self.definition(key)?;
        self.draft.filters.push(definition.default_slot());
        self.edited()
    }

    pub fn remove_filter(&mut self, key: &str) -> Option<SerializedQuery> {
        let before = self.draft.filters.len();
        self.draft.filters.retain(|slot| slot.key != key);
        if self.draft.filters.len() == before {
            return None;
        }
        self.edited()
    }

    pub fn set_text(&mut self, text: impl Into<String>) -> Option<SerializedQuery> {
        let text = text.into();
        if self.draft.text == text {
            return None;
        }
        self.draft.text = text;
        self.edited()
    }

    /// Switches object type: filters common to every type survive, then the new
    /// type's default filters are appended, keeping any value they had.
    pub fn set_object_type(&mut self, object_type: Option<SearchObjectType>) -> Option<SerializedQuery> {
        if self.draft.object_type == object_type {
            return None;
        }
        let common = self.search_filters.find_common_filters_for_all_object_types();
        let defaults = object_type
            .map(|t| self.search_filters.for_type(t).iter().filter(|d| d.is_default).cloned().collect::<Vec<_>>())
            .unwrap_or_default();
        let previous = std::mem::take(&mut self.draft.filters);

        let mut filters = previous
            .iter()
            .filter(|slot| common.iter().any(|d| d.key == slot.key))
            .filter(|slot| !defaults.iter().any(|d| d.key == slot.key))
            .cloned()
            .collect::<Vec<_>>();
        filters.extend(defaults.iter().map(|definition| {
            match previous.iter().find(|slot| slot.key == definition.key) {
                Some(slot) => definition.slot(slot.value.value.clone()),
                None => definition.default_slot(),
            }
        }));

        self.draft.filters = filters;
        self.draft.object_type = object_type;
        self.edited()
    }

    /// Commits the draft: resets pagination and publishes the search text.
    pub fn submit(&mut self) -> SerializedQuery {
        self.commit();
        tracing::debug!(filters = self.submitted.filters.len(), "search submitted");
        self.composed_query()
    }

    /// Discards the draft and restores the submitted state.
    pub fn cancel(&mut self) {
        if self.has_staged_edits() {
            tracing::debug!("staged search edits discarded");
        }
        self.draft = self.submitted.clone();
    }

    /// Query of the submitted state, as handed to the list query.
    pub fn composed_query(&self) -> SerializedQuery {
        compose(&self.submitted)
    }

    pub fn draft_query(&self) -> SerializedQuery {
        compose(&self.draft)
    }

    /// Submitted query plus its object type, for the URL.
    pub fn share_query(&self) -> SerializedQuery {
        let mut query = self.composed_query();
        if let Some(object_type) = self.submitted.object_type {
            query.insert(OBJECT_TYPE_KEY, object_type.as_str());
        }
        query
    }

    pub fn page_num(&self) -> u64 {
        self.store.get(STORE_PAGE_NUM).and_then(|v| v.as_u64()).unwrap_or(0)
    }

    pub fn set_page_num(&mut self, page_num: u64) -> SerializedQuery {
        self.store.set(STORE_PAGE_NUM, Value::from(page_num));
        self.composed_query()
    }

    /// The list request of the submitted search; none without an object type.
    pub fn list_request(&self) -> Option<SearchListRequest> {
        Some(SearchListRequest {
            object_type: self.submitted.object_type?,
            query: self.composed_query(),
            page_num: self.page_num(),
        })
    }
}
