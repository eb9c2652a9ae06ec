//! The filters of a search as edit surfaces, with add and remove controls.

use common::filters::SlotValue;
use common::query_composer::QueryComposer;
use common::search_query::SerializedQuery;
use dioxus::prelude::*;
use dioxus_free_icons::{Icon, icons::md_navigation_icons::MdClose};

use crate::components::search_filters::search_filter_unit::SearchFilterUnit;

fn apply(
    mut composer: Signal<Option<QueryComposer>>,
    on_requery: Callback<()>,
    f: impl FnOnce(&mut QueryComposer) -> Option<SerializedQuery>,
) {
    let requery = composer.write().as_mut().and_then(f);
    if requery.is_some() {
        on_requery.call(());
    }
}

#[component]
pub fn FilterList(composer: Signal<Option<QueryComposer>>, on_requery: Callback<()>) -> Element {
    let guard = composer.read();
    let Some(current) = guard.as_ref() else {
        return rsx! {};
    };
    let definitions = current.definitions();
    let rows = current
        .state()
        .filters
        .iter()
        .filter_map(|slot| {
            let definition = definitions.iter().find(|d| d.key == slot.key && !d.spec.is_hidden())?;
            Some((definition.clone(), slot.value.clone()))
        })
        .collect::<Vec<_>>();
    let available = current.available_filters().into_iter().filter(|d| !d.spec.is_hidden()).collect::<Vec<_>>();
    drop(guard);

    rsx! {
        div {
            class: "x-filter-list",
            for (definition, value) in rows {
                div {
                    key: "{definition.key}",
                    class: "x-filter-row",
                    span { class: "x-filter-label", "{definition.key}" }
                    SearchFilterUnit {
                        definition: definition.clone(),
                        as_form_field: true,
                        value: Some(value),
                        on_change: {
                            let key = definition.key.clone();
                            move |value: SlotValue| {
                                let key = key.clone();
                                apply(composer, on_requery, move |c| c.set_filter(&key, value));
                            }
                        },
                    }
                    button {
                        class: "x-icon-button",
                        title: "Remove filter",
                        onclick: {
                            let key = definition.key.clone();
                            move |_| {
                                let key = key.clone();
                                apply(composer, on_requery, move |c| c.remove_filter(&key));
                            }
                        },
                        Icon { icon: MdClose, style: "width: 16px; height: 16px;" }
                    }
                }
            }
            if !available.is_empty() {
                select {
                    class: "x-add-filter",
                    value: "",
                    onchange: move |e: Event<FormData>| {
                        let key = e.value();
                        if !key.is_empty() {
                            apply(composer, on_requery, move |c| c.add_filter(&key));
                        }
                    },
                    option { value: "", "+ Add another filter" }
                    for definition in available {
                        option { key: "{definition.key}", value: "{definition.key}", "{definition.key}" }
                    }
                }
            }
        }
    }
}
