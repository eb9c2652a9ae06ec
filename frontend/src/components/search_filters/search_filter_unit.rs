use common::filters::{FilterDefinition, FilterSpec, SlotValue};
use dioxus::prelude::*;

use crate::components::search_filters::assessment_unit::AssessmentUnit;
use crate::components::search_filters::choice_units::{CheckboxUnit, SelectUnit};
use crate::components::search_filters::date_range_unit::DateRangeUnit;
use crate::components::search_filters::entity_unit::{EntityMultiUnit, EntityUnit};
use crate::components::search_filters::report_state_unit::ReportStateUnit;

/// Renders the unit of one registered filter, as an edit surface or as its
/// one-line summary.
#[component]
pub fn SearchFilterUnit(
    definition: FilterDefinition,
    as_form_field: bool,
    value: ReadSignal<Option<SlotValue>>,
    on_change: Callback<SlotValue>,
) -> Element {
    match definition.spec.as_ref() {
        FilterSpec::Entity(codec) => rsx! { EntityUnit { codec: codec.clone(), as_form_field, value, on_change } },
        FilterSpec::EntityMulti(codec) => rsx! { EntityMultiUnit { codec: codec.clone(), as_form_field, value, on_change } },
        FilterSpec::DateRange(codec) => rsx! { DateRangeUnit { codec: codec.clone(), as_form_field, value, on_change } },
        FilterSpec::Assessment(codec) => rsx! { AssessmentUnit { codec: codec.clone(), as_form_field, value, on_change } },
        FilterSpec::ReportState(codec) => rsx! { ReportStateUnit { codec: codec.clone(), as_form_field, value, on_change } },
        FilterSpec::Select(codec) => rsx! { SelectUnit { codec: codec.clone(), as_form_field, value, on_change } },
        FilterSpec::Checkbox(codec) => rsx! { CheckboxUnit { codec: codec.clone(), as_form_field, value, on_change } },
        FilterSpec::PassThrough(_) => rsx! {},
    }
}
