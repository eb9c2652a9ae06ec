//! Location and organization filters, single and multi, with text autocompletion.

use std::rc::Rc;

use common::filters::SlotValue;
use common::filters::entity_filter::{EntityFilter, EntityMultiFilter, EntityMultiValue, EntityValue};
use common::filters::recurse_strategy::{RecurseStrategy, Recursion};
use common::query_service::{EntityRef, LookupKind, QueryService, autocomplete_entities};
use common::search_const::INPUT_DEBOUNCE_MS;
use dioxus::prelude::*;
use dioxus_free_icons::{Icon, icons::md_navigation_icons::MdClose};

use crate::api::server_query_service::ServerQueryService;
use crate::components::search_filters::debounce::{use_debounce, use_latest_request};
use crate::components::search_filters::use_search_filter::use_search_filter;

const AUTOCOMPLETE_PAGE_SIZE: u64 = 10;

#[component]
pub fn EntityUnit(
    codec: EntityFilter,
    as_form_field: bool,
    value: ReadSignal<Option<SlotValue>>,
    on_change: Callback<SlotValue>,
) -> Element {
    let mut filter = use_search_filter(&codec, as_form_field, value, on_change);

    if !as_form_field {
        return rsx! { span { class: "x-filter-display", "{filter.display()}" } };
    }

    let current = filter.value();
    rsx! {
        div {
            class: "x-filter-entity",
            if let Some(entity) = current.value.clone() {
                EntityChip {
                    entity,
                    on_remove: move |_: ()| filter.modify(|v| EntityValue { value: None, ..v.clone() }),
                }
            }
            EntityAutocomplete {
                kind: codec.lookup_kind,
                on_pick: move |entity: EntityRef| {
                    filter.modify(move |v| EntityValue { value: Some(entity), ..v.clone() });
                },
            }
            RecursionPicker {
                recursion: codec.recursion.clone(),
                strategy: current.recurse_strategy,
                on_pick: move |recurse_strategy: RecurseStrategy| filter.modify(move |v| EntityValue { recurse_strategy, ..v.clone() }),
            }
        }
    }
}

#[component]
pub fn EntityMultiUnit(
    codec: EntityMultiFilter,
    as_form_field: bool,
    value: ReadSignal<Option<SlotValue>>,
    on_change: Callback<SlotValue>,
) -> Element {
    let mut filter = use_search_filter(&codec, as_form_field, value, on_change);

    if !as_form_field {
        return rsx! { span { class: "x-filter-display", "{filter.display()}" } };
    }

    let current = filter.value();
    rsx! {
        div {
            class: "x-filter-entity",
            for entity in current.value.iter().cloned() {
                EntityChip {
                    key: "{entity.uuid}",
                    entity: entity.clone(),
                    on_remove: {
                        let uuid = entity.uuid.clone();
                        move |_: ()| {
                            let uuid = uuid.clone();
                            filter.modify(move |v| EntityMultiValue {
                                value: v.value.iter().filter(|e| e.uuid != uuid).cloned().collect(),
                                ..v.clone()
                            });
                        }
                    },
                }
            }
            EntityAutocomplete {
                kind: codec.lookup_kind,
                on_pick: move |entity: EntityRef| {
                    filter.modify(move |v| {
                        let mut next = v.clone();
                        if !next.value.iter().any(|e| e.uuid == entity.uuid) {
                            next.value.push(entity);
                        }
                        next
                    });
                },
            }
            RecursionPicker {
                recursion: codec.recursion.clone(),
                strategy: current.recurse_strategy,
                on_pick: move |recurse_strategy: RecurseStrategy| filter.modify(move |v| EntityMultiValue { recurse_strategy, ..v.clone() }),
            }
        }
    }
}

#[component]
fn EntityChip(entity: EntityRef, on_remove: Callback<()>) -> Element {
    rsx! {
        span {
            class: "x-filter-chip",
            "{entity.name}"
            button {
                class: "x-filter-chip-remove",
                onclick: move |_| on_remove.call(()),
                Icon { icon: MdClose, style: "width: 14px; height: 14px;" }
            }
        }
    }
}

/// Only a user-selectable recursion gets a picker.
#[component]
fn RecursionPicker(recursion: Option<Recursion>, strategy: RecurseStrategy, on_pick: Callback<RecurseStrategy>) -> Element {
    if !recursion.as_ref().is_some_and(Recursion::is_selectable) {
        return rsx! {};
    }
    rsx! {
        select {
            value: "{strategy.as_str()}",
            onchange: move |e: Event<FormData>| {
                if let Some(strategy) = RecurseStrategy::parse(&e.value()) {
                    on_pick.call(strategy);
                }
            },
            for choice in RecurseStrategy::ALL {
                option { key: "{choice.as_str()}", value: "{choice.as_str()}", "{choice.label()}" }
            }
        }
    }
}

#[component]
fn EntityAutocomplete(kind: LookupKind, on_pick: Callback<EntityRef>) -> Element {
    let mut text = use_signal(String::new);
    let mut suggestions = use_signal(Vec::<EntityRef>::new);
    let latest = use_latest_request();
    let lookup = use_debounce(
        INPUT_DEBOUNCE_MS,
        Callback::new(move |text: String| {
            let ticket = latest.issue();
            if text.trim().is_empty() {
                suggestions.set(Vec::new());
                return;
            }
            let latest = latest.clone();
            spawn(async move {
                let service: Rc<dyn QueryService> = Rc::new(ServerQueryService);
                let found = autocomplete_entities(&service, kind, text, AUTOCOMPLETE_PAGE_SIZE).await;
                if !latest.is_current(ticket) {
                    return;
                }
                match found {
                    Ok(found) => suggestions.set(found),
                    Err(e) => dioxus::logger::tracing::warn!("autocomplete failed: {:#}", e),
                }
            });
        }),
    );

    rsx! {
        div {
            class: "x-autocomplete",
            input {
                r#type: "text",
                placeholder: "Search...",
                value: "{text}",
                oninput: move |e: Event<FormData>| {
                    text.set(e.value());
                    lookup.call(e.value());
                },
            }
            if !suggestions.read().is_empty() {
                ul {
                    class: "x-autocomplete-list",
                    for entity in suggestions.read().iter().cloned() {
                        li {
                            key: "{entity.uuid}",
                            onclick: {
                                let entity = entity.clone();
                                move |_| {
                                    text.set(String::new());
                                    suggestions.set(Vec::new());
                                    on_pick.call(entity.clone());
                                }
                            },
                            "{entity.name}"
                        }
                    }
                }
            }
        }
    }
}
