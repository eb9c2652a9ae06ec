//! Filter units: one component per filter kind over the shared controller.

pub mod assessment_unit;
pub mod choice_units;
pub mod date_range_unit;
pub mod debounce;
pub mod entity_unit;
pub mod report_state_unit;
pub mod search_filter_unit;
pub mod use_search_filter;
