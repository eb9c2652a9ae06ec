//! Dioxus binding of the shared filter controller.

use std::rc::Rc;

use common::filters::{FilterCodec, SlotValue};
use common::search_filter_controller::{FilterUpdate, SearchFilterController};
use dioxus::prelude::*;

pub struct SearchFilterHandle<C: FilterCodec + 'static> {
    controller: Signal<SearchFilterController<C>>,
    on_change: Callback<SlotValue>,
}

impl<C: FilterCodec + 'static> Clone for SearchFilterHandle<C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C: FilterCodec + 'static> Copy for SearchFilterHandle<C> {}

impl<C: FilterCodec + 'static> SearchFilterHandle<C> {
    pub fn value(&self) -> C::Value {
        self.controller.read().value().clone()
    }

    pub fn display(&self) -> String {
        self.controller.read().display()
    }

    pub fn update(&mut self, update: FilterUpdate<C::Value>) {
        let propagated = self.controller.write().update(update);
        if let Some(value) = propagated {
            self.on_change.call(value);
        }
    }

    pub fn set(&mut self, value: C::Value) {
        self.update(FilterUpdate::Replace(value));
    }

    pub fn modify(&mut self, f: impl FnOnce(&C::Value) -> C::Value + 'static) {
        self.update(FilterUpdate::with(f));
    }
}

/// Local state of one filter unit, following the parent's value and reporting edits
/// through `on_change`. A form field also reports its starting value once mounted.
pub fn use_search_filter<C: FilterCodec + Clone + 'static>(
    codec: &C,
    as_form_field: bool,
    value: ReadSignal<Option<SlotValue>>,
    on_change: Callback<SlotValue>,
) -> SearchFilterHandle<C> {
    let mut controller =
        use_signal(|| SearchFilterController::new(Rc::new(codec.clone()), as_form_field, value.peek().as_ref()));

    use_effect(move || {
        let input = value.read();
        let changed = controller.write().sync_input(input.as_ref());
        if changed {
            dioxus::logger::tracing::debug!("filter value replaced by its parent");
        }
    });

    use_effect(move || {
        let initial = controller.write().take_initial_propagation();
        if let Some(initial) = initial {
            on_change.call(initial);
        }
    });

    SearchFilterHandle { controller, on_change }
}
