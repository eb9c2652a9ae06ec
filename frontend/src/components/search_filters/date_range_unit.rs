//! Date range filter: relative mode picker, date bounds and a day count.

use chrono::NaiveDate;
use common::filters::SlotValue;
use common::filters::date_range_filter::{DateRangeFilter, DateRangeValue, MAX_DAYS, RangeType};
use common::search_const::INPUT_DEBOUNCE_MS;
use dioxus::prelude::*;

use crate::components::search_filters::debounce::use_debounce;
use crate::components::search_filters::use_search_filter::use_search_filter;

const DATE_INPUT_FORMAT: &str = "%Y-%m-%d";

fn parse_input_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, DATE_INPUT_FORMAT).ok()
}

fn input_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format(DATE_INPUT_FORMAT).to_string()).unwrap_or_default()
}

/// Switching mode keeps the bounds the new mode still shows.
fn with_relative(value: &DateRangeValue, relative: RangeType) -> DateRangeValue {
    DateRangeValue {
        relative,
        start: value.start.filter(|_| relative.uses_start()),
        end: value.end.filter(|_| relative.uses_end()),
        days: value.days.filter(|_| relative.uses_days()),
    }
}

#[component]
pub fn DateRangeUnit(
    codec: DateRangeFilter,
    as_form_field: bool,
    value: ReadSignal<Option<SlotValue>>,
    on_change: Callback<SlotValue>,
) -> Element {
    let mut filter = use_search_filter(&codec, as_form_field, value, on_change);
    let set_days = use_debounce(
        INPUT_DEBOUNCE_MS,
        Callback::new(move |days: Option<u32>| {
            filter.modify(move |v| DateRangeValue { days, ..v.clone() });
        }),
    );

    if !as_form_field {
        return rsx! { span { class: "x-filter-display", "{filter.display()}" } };
    }

    let current = filter.value();
    let days_text = current.days.map(|d| d.to_string()).unwrap_or_default();
    let modes = if codec.only_between { vec![RangeType::Between] } else { RangeType::ALL.to_vec() };
    rsx! {
        div {
            class: "x-filter-date-range",
            if modes.len() > 1 {
                select {
                    value: "{current.relative.as_str()}",
                    onchange: move |e: Event<FormData>| {
                        if let Some(relative) = RangeType::parse(&e.value()) {
                            filter.modify(move |v| with_relative(v, relative));
                        }
                    },
                    for mode in modes {
                        option { key: "{mode.as_str()}", value: "{mode.as_str()}", "{mode.label()}" }
                    }
                }
            }
            if current.relative.uses_start() {
                input {
                    r#type: "date",
                    value: "{input_date(current.start)}",
                    onchange: move |e: Event<FormData>| {
                        let start = parse_input_date(&e.value());
                        filter.modify(move |v| DateRangeValue { start, ..v.clone() });
                    },
                }
            }
            if current.relative == RangeType::Between {
                span { " and " }
            }
            if current.relative.uses_end() {
                input {
                    r#type: "date",
                    value: "{input_date(current.end)}",
                    onchange: move |e: Event<FormData>| {
                        let end = parse_input_date(&e.value());
                        filter.modify(move |v| DateRangeValue { end, ..v.clone() });
                    },
                }
            }
            if current.relative.uses_days() {
                input {
                    r#type: "number",
                    min: "1",
                    max: "{MAX_DAYS}",
                    value: "{days_text}",
                    oninput: move |e: Event<FormData>| {
                        let days = e.value().trim().parse::<u32>().ok().filter(|d| (1..=MAX_DAYS).contains(d));
                        set_days.call(days);
                    },
                }
                span { " days" }
            }
        }
    }
}
