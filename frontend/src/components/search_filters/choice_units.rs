//! Select, radio and checkbox filters.

use common::filters::SlotValue;
use common::filters::checkbox_filter::{CheckboxFilter, CheckboxValue};
use common::filters::select_filter::{SelectFilter, SelectValue};
use dioxus::prelude::*;

use crate::components::search_filters::use_search_filter::use_search_filter;

#[component]
pub fn SelectUnit(
    codec: SelectFilter,
    as_form_field: bool,
    value: ReadSignal<Option<SlotValue>>,
    on_change: Callback<SlotValue>,
) -> Element {
    let mut filter = use_search_filter(&codec, as_form_field, value, on_change);

    if !as_form_field {
        return rsx! { span { class: "x-filter-display", "{filter.display()}" } };
    }

    let current = filter.value();
    let choices = codec.choices();
    let selected = choices.iter().position(|(option, _)| *option == current.value);
    let selected_text = selected.map(|i| i.to_string()).unwrap_or_default();
    let choices_for_pick = choices.clone();
    let pick = Callback::new(move |index: usize| {
        if let Some((option, _)) = choices_for_pick.get(index).cloned() {
            filter.set(SelectValue { value: option });
        }
    });

    if codec.as_radio {
        let name = codec.query_key.clone();
        return rsx! {
            div {
                class: "x-filter-radio",
                for (index, (_, label)) in choices.into_iter().enumerate() {
                    label {
                        key: "{index}",
                        input {
                            r#type: "radio",
                            name: "{name}",
                            checked: selected == Some(index),
                            onchange: move |_| pick.call(index),
                        }
                        "{label}"
                    }
                }
            }
        };
    }

    rsx! {
        select {
            class: "x-filter-select",
            value: "{selected_text}",
            onchange: move |e: Event<FormData>| {
                if let Ok(index) = e.value().parse::<usize>() {
                    pick.call(index);
                }
            },
            for (index, (_, label)) in choices.into_iter().enumerate() {
                option { key: "{index}", value: "{index}", "{label}" }
            }
        }
    }
}

#[component]
pub fn CheckboxUnit(
    codec: CheckboxFilter,
    as_form_field: bool,
    value: ReadSignal<Option<SlotValue>>,
    on_change: Callback<SlotValue>,
) -> Element {
    let mut filter = use_search_filter(&codec, as_form_field, value, on_change);

    if !as_form_field {
        return rsx! { span { class: "x-filter-display", "{filter.display()}" } };
    }

    rsx! {
        label {
            class: "x-filter-checkbox",
            input {
                r#type: "checkbox",
                checked: filter.value().value,
                onchange: move |e: Event<FormData>| filter.set(CheckboxValue { value: e.checked() }),
            }
            "{codec.msg}"
        }
    }
}
