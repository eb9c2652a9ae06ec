//! State lifecycle shared by every filter unit.
//!
//! The controller owns the unit's local value and decides when that value must be
//! propagated to the parent. It never calls back by itself: every operation
//! returns the [`SlotValue`] to hand to the parent's `on_change`, if any.

use std::rc::Rc;

use serde_json::Value;

use crate::deep_equal::deep_equal_ignoring;
use crate::filters::{FilterCodec, FilterState, SlotValue, TO_QUERY_FIELD, ToQuery};

/// A local edit: a full value, or an updater applied to the latest value so that
/// edits landing close together compose instead of overwriting each other.
pub enum FilterUpdate<V> {
    Replace(V),
    With(Box<dyn FnOnce(&V) -> V>),
}

impl<V> FilterUpdate<V> {
    pub fn with(f: impl FnOnce(&V) -> V + 'static) -> Self {
        FilterUpdate::With(Box::new(f))
    }
}

pub struct SearchFilterController<C: FilterCodec> {
    codec: Rc<C>,
    as_form_field: bool,
    value: C::Value,
    last_input: Option<Value>,
    initial_propagation_pending: bool,
}

impl<C: FilterCodec + 'static> SearchFilterController<C> {
    /// A missing input, or one of another kind, starts from the codec's default.
    pub fn new(codec: Rc<C>, as_form_field: bool, input: Option<&SlotValue>) -> Self {
        let value = Self::typed_input(&codec, input);
        Self {
            codec,
            as_form_field,
            value,
            last_input: input.map(SlotValue::to_json),
            initial_propagation_pending: as_form_field,
        }
    }

    fn typed_input(codec: &C, input: Option<&SlotValue>) -> C::Value {
        input
            .and_then(|slot| C::Value::from_filter_value(&slot.value))
            .unwrap_or_else(|| codec.default_value())
    }

    pub fn value(&self) -> &C::Value {
        &self.value
    }

    pub fn codec(&self) -> &C {
        &self.codec
    }

    pub fn as_form_field(&self) -> bool {
        self.as_form_field
    }

    pub fn display(&self) -> String {
        self.codec.display(&self.value)
    }

    /// The value as the parent stores it, with a thunk over its fragment.
    pub fn propagated(&self) -> SlotValue {
        let codec = self.codec.clone();
        let value = self.value.clone();
        let captured = value.clone();
        SlotValue {
            value: value.into_filter_value(),
            to_query: ToQuery::from_fn(move || codec.to_query(&captured)),
        }
    }

    /// The first propagation of a freshly mounted form field, so that a newly
    /// added filter takes part in the query before any edit. Yields once.
    pub fn take_initial_propagation(&mut self) -> Option<SlotValue> {
        if !self.initial_propagation_pending {
            return None;
        }
        self.initial_propagation_pending = false;
        Some(self.propagated())
    }

    /// Applies a local edit; returns what to propagate when the value changed.
    pub fn update(&mut self, update: FilterUpdate<C::Value>) -> Option<SlotValue> {
        let next = match update {
            FilterUpdate::Replace(value) => value,
            FilterUpdate::With(f) => f(&self.value),
        };
        if next == self.value {
            return None;
        }
        self.value = next;
        self.initial_propagation_pending = false;
        self.as_form_field.then(|| self.propagated())
    }

    /// Follows a new input from the parent. Only a structural change (ignoring
    /// `toQuery`) replaces the local value; nothing is propagated back.
    pub fn sync_input(&mut self, input: Option<&SlotValue>) -> bool {
        let incoming = input.map(SlotValue::to_json);
        let unchanged = match (&self.last_input, &incoming) {
            (Some(previous), Some(next)) => deep_equal_ignoring(previous, next, &[TO_QUERY_FIELD]),
            (None, None) => true,
            _ => false,
        };
        if unchanged {
            return false;
        }
        self.last_input = incoming;
        self.value = Self::typed_input(&self.codec, input);
        true
    }
}
