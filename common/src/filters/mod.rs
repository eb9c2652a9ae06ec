//! Pluggable search filters.
//!
//! Every filter kind is a [`FilterCodec`]: it turns its in-memory value into a
//! fragment of the flat [`SerializedQuery`], rebuilds the value from a query
//! (possibly through a remote lookup) and renders a one-line summary. The kinds
//! are gathered in the [`FilterSpec`] tagged variant so a search context resolves
//! its filters once, when the [`FilterDefinition`] list is built.

pub mod assessment_filter;
pub mod checkbox_filter;
pub mod date_range_filter;
pub mod entity_filter;
pub mod pass_through_filter;
pub mod recurse_strategy;
pub mod report_state_filter;
pub mod select_filter;

use std::rc::Rc;

use futures::future::{FutureExt, LocalBoxFuture};
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::deep_equal::deep_equal_ignoring;
use crate::query_service::QueryService;
use crate::search_query::SerializedQuery;

use assessment_filter::{AssessmentFilter, AssessmentValue};
use checkbox_filter::{CheckboxFilter, CheckboxValue};
use date_range_filter::{DateRangeFilter, DateRangeValue};
use entity_filter::{EntityFilter, EntityMultiFilter, EntityMultiValue, EntityValue};
use pass_through_filter::PassThroughFilter;
use report_state_filter::{ReportStateFilter, ReportStateValue};
use select_filter::{SelectFilter, SelectValue};

/// Name of the derived member carried by propagated values.
pub const TO_QUERY_FIELD: &str = "toQuery";

/// In-memory value of one filter slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FilterValue {
    Entity(EntityValue),
    EntityMulti(EntityMultiValue),
    DateRange(DateRangeValue),
    Assessment(AssessmentValue),
    ReportState(ReportStateValue),
    Select(SelectValue),
    Checkbox(CheckboxValue),
    Raw(Value),
}

/// A concrete filter value type that can be stored in, and read back from, a
/// [`FilterValue`].
pub trait FilterState: Clone + PartialEq + std::fmt::Debug + 'static {
    /// `None` when `value` belongs to another kind.
    fn from_filter_value(value: &FilterValue) -> Option<Self>;
    fn into_filter_value(self) -> FilterValue;
}

macro_rules! impl_filter_state {
    ($ty:ty, $variant:ident) => {
        impl FilterState for $ty {
            fn from_filter_value(value: &FilterValue) -> Option<Self> {
                match value {
                    FilterValue::$variant(v) => Some(v.clone()),
                    _ => None,
                }
            }

            fn into_filter_value(self) -> FilterValue {
                FilterValue::$variant(self)
            }
        }
    };
}

impl_filter_state!(EntityValue, Entity);
impl_filter_state!(EntityMultiValue, EntityMulti);
impl_filter_state!(DateRangeValue, DateRange);
impl_filter_state!(AssessmentValue, Assessment);
impl_filter_state!(ReportStateValue, ReportState);
impl_filter_state!(SelectValue, Select);
impl_filter_state!(CheckboxValue, Checkbox);
impl_filter_state!(Value, Raw);

/// Outcome of rebuilding one filter from a serialized query.
pub enum Rehydration<V> {
    /// None of the filter's keys are in the query.
    Absent,
    Ready(V),
    /// Waiting on a remote lookup; `Ok(None)` means the reference went stale.
    Pending(LocalBoxFuture<'static, anyhow::Result<Option<V>>>),
}

impl<V: 'static> Rehydration<V> {
    pub fn map<U: 'static>(self, f: impl FnOnce(V) -> U + 'static) -> Rehydration<U> {
        match self {
            Rehydration::Absent => Rehydration::Absent,
            Rehydration::Ready(v) => Rehydration::Ready(f(v)),
            Rehydration::Pending(pending) => {
                Rehydration::Pending(pending.map(|r| r.map(|o| o.map(f))).boxed_local())
            }
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Rehydration::Absent)
    }
}

/// Codec plus summary renderer for one filter kind.
pub trait FilterCodec {
    type Value: FilterState;

    /// Flat query keys this filter owns.
    fn query_keys(&self) -> Vec<String>;

    fn default_value(&self) -> Self::Value;

    /// Pure reshaping of `value` into flat keys.
    fn to_query(&self, value: &Self::Value) -> SerializedQuery;

    fn deserialize(
        &self,
        query: &SerializedQuery,
        service: &Rc<dyn QueryService>,
    ) -> Rehydration<Self::Value>;

    /// Human-readable summary for read-only recaps.
    fn display(&self, value: &Self::Value) -> String;
}

/// Zero-argument producer of a slot's serialized fragment.
#[derive(Clone)]
pub struct ToQuery(Rc<dyn Fn() -> SerializedQuery>);

impl ToQuery {
    pub fn from_fn(f: impl Fn() -> SerializedQuery + 'static) -> Self {
        Self(Rc::new(f))
    }

    /// Wraps an already computed fragment.
    pub fn fragment(query: SerializedQuery) -> Self {
        Self::from_fn(move || query.clone())
    }

    pub fn invoke(&self) -> SerializedQuery {
        (self.0)()
    }
}

impl std::fmt::Debug for ToQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ToQuery").field(&self.invoke()).finish()
    }
}

/// A filter value on its way up to the composer, together with its fragment.
#[derive(Clone, Debug)]
pub struct SlotValue {
    pub value: FilterValue,
    pub to_query: ToQuery,
}

impl SlotValue {
    pub fn to_json(&self) -> Value {
        let fragment = Value::from(self.to_query.invoke());
        match serde_json::to_value(&self.value).unwrap_or(Value::Null) {
            Value::Object(mut obj) => {
                obj.insert(TO_QUERY_FIELD.to_string(), fragment);
                Value::Object(obj)
            }
            other => serde_json::json!({ "value": other, TO_QUERY_FIELD: fragment }),
        }
    }
}

impl Serialize for SlotValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl PartialEq for SlotValue {
    fn eq(&self, other: &Self) -> bool {
        deep_equal_ignoring(&self.to_json(), &other.to_json(), &[TO_QUERY_FIELD])
    }
}

/// One occupied slot of the aggregate search state.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FilterSlot {
    pub key: String,
    pub value: SlotValue,
}

/// Tagged variant over every filter kind.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterSpec {
    Entity(EntityFilter),
    EntityMulti(EntityMultiFilter),
    DateRange(DateRangeFilter),
    Assessment(AssessmentFilter),
    ReportState(ReportStateFilter),
    Select(SelectFilter),
    Checkbox(CheckboxFilter),
    PassThrough(PassThroughFilter),
}

macro_rules! dispatch {
    ($spec:expr, $codec:ident => $body:expr) => {
        match $spec {
            FilterSpec::Entity($codec) => $body,
            FilterSpec::EntityMulti($codec) => $body,
            FilterSpec::DateRange($codec) => $body,
            FilterSpec::Assessment($codec) => $body,
            FilterSpec::ReportState($codec) => $body,
            FilterSpec::Select($codec) => $body,
            FilterSpec::Checkbox($codec) => $body,
            FilterSpec::PassThrough($codec) => $body,
        }
    };
}

fn typed_or_default<C: FilterCodec>(codec: &C, value: &FilterValue) -> C::Value {
    C::Value::from_filter_value(value).unwrap_or_else(|| codec.default_value())
}

impl FilterSpec {
    pub fn query_keys(&self) -> Vec<String> {
        dispatch!(self, c => c.query_keys())
    }

    pub fn default_value(&self) -> FilterValue {
        dispatch!(self, c => c.default_value().into_filter_value())
    }

    /// Replaces a value of the wrong kind with this kind's default.
    pub fn coerce(&self, value: &FilterValue) -> FilterValue {
        dispatch!(self, c => typed_or_default(c, value).into_filter_value())
    }

    pub fn to_query(&self, value: &FilterValue) -> SerializedQuery {
        dispatch!(self, c => c.to_query(&typed_or_default(c, value)))
    }

    pub fn deserialize(
        &self,
        query: &SerializedQuery,
        service: &Rc<dyn QueryService>,
    ) -> Rehydration<FilterValue> {
        dispatch!(self, c => c.deserialize(query, service).map(FilterState::into_filter_value))
    }

    pub fn display(&self, value: &FilterValue) -> String {
        dispatch!(self, c => c.display(&typed_or_default(c, value)))
    }

    /// Pass-through filters are carried along but never rendered.
    pub fn is_hidden(&self) -> bool {
        matches!(self, FilterSpec::PassThrough(_))
    }
}

/// Registration entry: a named slot bound to one filter kind.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterDefinition {
    /// Slot key inside the aggregate search state; also the display label.
    pub key: String,
    pub spec: Rc<FilterSpec>,
    /// Materialized as soon as its object type is selected.
    pub is_default: bool,
}

impl FilterDefinition {
    pub fn new(key: impl Into<String>, spec: FilterSpec) -> Self {
        Self { key: key.into(), spec: Rc::new(spec), is_default: false }
    }

    pub fn default_filter(mut self) -> Self {
        self.is_default = true;
        self
    }

    /// Wraps `value` with a thunk recomputing its fragment on demand.
    pub fn slot_value(&self, value: FilterValue) -> SlotValue {
        let value = self.spec.coerce(&value);
        let spec = self.spec.clone();
        let captured = value.clone();
        SlotValue { value, to_query: ToQuery::from_fn(move || spec.to_query(&captured)) }
    }

    pub fn slot(&self, value: FilterValue) -> FilterSlot {
        FilterSlot { key: self.key.clone(), value: self.slot_value(value) }
    }

    pub fn default_slot(&self) -> FilterSlot {
        self.slot(self.spec.default_value())
    }
}
