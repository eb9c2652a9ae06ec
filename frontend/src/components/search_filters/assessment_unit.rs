//! Assessment filter: pick one assessment, then filter on its sub-questions.

use common::filters::SlotValue;
use common::filters::assessment_filter::{AssessmentFilter, AssessmentQuestion, QuestionFilter, QuestionKind};
use dioxus::prelude::*;

use crate::components::search_filters::use_search_filter::use_search_filter;

#[component]
pub fn AssessmentUnit(
    codec: AssessmentFilter,
    as_form_field: bool,
    value: ReadSignal<Option<SlotValue>>,
    on_change: Callback<SlotValue>,
) -> Element {
    let mut filter = use_search_filter(&codec, as_form_field, value, on_change);

    if !as_form_field {
        return rsx! { span { class: "x-filter-display", "{filter.display()}" } };
    }

    let current = filter.value();
    let questions = codec
        .questions(&current)
        .into_iter()
        .map(|(name, question)| (name.clone(), question.clone()))
        .collect::<Vec<_>>();
    let picker_codec = codec.clone();
    rsx! {
        div {
            class: "x-filter-assessment",
            select {
                value: "{current.key.clone().unwrap_or_default()}",
                onchange: move |e: Event<FormData>| {
                    let next = picker_codec.select_assessment(Some(e.value()).filter(|k| !k.is_empty()));
                    filter.set(next);
                },
                option { value: "", "Select an assessment" }
                for (key, definition) in codec.schema.clone() {
                    option { key: "{key}", value: "{key}", "{definition.label}" }
                }
            }
            for (name, question) in questions {
                QuestionPicker {
                    key: "{name}",
                    question: question.clone(),
                    selected: current.filters.get(&name).cloned(),
                    on_pick: {
                        let codec = codec.clone();
                        let name = name.clone();
                        move |picked: QuestionFilter| {
                            let codec = codec.clone();
                            let name = name.clone();
                            filter.modify(move |v| codec.set_question_filter(v, &name, picked));
                        }
                    },
                }
            }
        }
    }
}

#[component]
fn QuestionPicker(question: AssessmentQuestion, selected: Option<QuestionFilter>, on_pick: Callback<QuestionFilter>) -> Element {
    let chosen = selected.as_ref().map(|f| f.values().into_iter().map(str::to_string).collect::<Vec<_>>()).unwrap_or_default();
    match question.kind {
        QuestionKind::Enum => rsx! {
            label {
                "{question.label} "
                select {
                    value: "{chosen.first().cloned().unwrap_or_default()}",
                    onchange: move |e: Event<FormData>| on_pick.call(QuestionFilter::One(e.value())),
                    option { value: "", "Any" }
                    for choice in question.choices.clone() {
                        option { key: "{choice.value}", value: "{choice.value}", "{choice.label}" }
                    }
                }
            }
        },
        QuestionKind::EnumSet => rsx! {
            fieldset {
                legend { "{question.label}" }
                for choice in question.choices.clone() {
                    label {
                        key: "{choice.value}",
                        input {
                            r#type: "checkbox",
                            checked: chosen.contains(&choice.value),
                            onchange: {
                                let chosen = chosen.clone();
                                let value = choice.value.clone();
                                move |e: Event<FormData>| {
                                    let mut next = chosen.iter().filter(|v| **v != value).cloned().collect::<Vec<_>>();
                                    if e.checked() {
                                        next.push(value.clone());
                                    }
                                    on_pick.call(QuestionFilter::Many(next));
                                }
                            },
                        }
                        "{choice.label}"
                    }
                }
            }
        },
    }
}
