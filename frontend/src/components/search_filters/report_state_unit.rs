//! Report state checkboxes, with the cancellation reason when only the terminal
//! state is picked.

use common::filters::SlotValue;
use common::filters::report_state_filter::{ReportStateFilter, ReportStateValue};
use dioxus::prelude::*;

use crate::components::search_filters::use_search_filter::use_search_filter;

fn toggle_state(value: &ReportStateValue, state: &str, checked: bool, order: &[(String, String)]) -> ReportStateValue {
    let mut next = value.clone();
    next.state.retain(|s| s != state);
    if checked {
        next.state.push(state.to_string());
    }
    next.state.sort_by_key(|s| order.iter().position(|(v, _)| v == s));
    next
}

#[component]
pub fn ReportStateUnit(
    codec: ReportStateFilter,
    as_form_field: bool,
    value: ReadSignal<Option<SlotValue>>,
    on_change: Callback<SlotValue>,
) -> Element {
    let mut filter = use_search_filter(&codec, as_form_field, value, on_change);

    if !as_form_field {
        return rsx! { span { class: "x-filter-display", "{filter.display()}" } };
    }

    let current = filter.value();
    let show_reason = codec.reason_applies(&current);
    let order = codec.states.clone();
    rsx! {
        div {
            class: "x-filter-report-state",
            for (state, label) in codec.states.clone() {
                label {
                    key: "{state}",
                    input {
                        r#type: "checkbox",
                        checked: current.state.contains(&state),
                        onchange: {
                            let order = order.clone();
                            let state = state.clone();
                            move |e: Event<FormData>| {
                                let state = state.clone();
                                let order = order.clone();
                                let checked = e.checked();
                                filter.modify(move |v| toggle_state(v, &state, checked, &order));
                            }
                        },
                    }
                    "{label}"
                }
            }
            if show_reason {
                select {
                    value: "{current.reason.clone().unwrap_or_default()}",
                    onchange: move |e: Event<FormData>| {
                        let reason = Some(e.value()).filter(|r| !r.is_empty());
                        filter.modify(move |v| ReportStateValue { reason, ..v.clone() });
                    },
                    option { value: "", "Any reason" }
                    for (reason, label) in codec.reasons.clone() {
                        option { key: "{reason}", value: "{reason}", "{label}" }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::filters::report_state_filter::report_states;

    #[test]
    fn toggled_states_keep_declaration_order() {
        let order = report_states();
        let value = ReportStateValue { state: vec!["CANCELLED".to_string()], reason: None };
        let value = toggle_state(&value, "DRAFT", true, &order);
        assert_eq!(value.state, vec!["DRAFT".to_string(), "CANCELLED".to_string()]);
        let value = toggle_state(&value, "CANCELLED", false, &order);
        assert_eq!(value.state, vec!["DRAFT".to_string()]);
    }
}
