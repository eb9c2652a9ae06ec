//! Filter registrations per searchable object type.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::filters::assessment_filter::AssessmentFilter;
use crate::filters::checkbox_filter::CheckboxFilter;
use crate::filters::date_range_filter::DateRangeFilter;
use crate::filters::entity_filter::{EntityFilter, EntityMultiFilter};
use crate::filters::pass_through_filter::{PassThroughFilter, ScalarKind};
use crate::filters::recurse_strategy::{RecurseStrategy, Recursion};
use crate::filters::report_state_filter::ReportStateFilter;
use crate::filters::select_filter::SelectFilter;
use crate::filters::{FilterDefinition, FilterSpec};
use crate::query_service::LookupKind;
use crate::search_object_type::SearchObjectType;
use crate::settings::SearchSettings;

const POSITION_TYPES: [(&str, &str); 3] =
    [("REGULAR", "Regular"), ("SUPERUSER", "Superuser"), ("ADMINISTRATOR", "Administrator")];

const LOCATION_TYPES: [(&str, &str); 6] = [
    ("POINT_LOCATION", "Point location"),
    ("GEOGRAPHICAL_AREA", "Geographical area"),
    ("TOWN", "Town"),
    ("MUNICIPALITY", "Municipality"),
    ("COUNTRY", "Country"),
    ("VIRTUAL_LOCATION", "Virtual location"),
];

const EVENT_TYPES: [(&str, &str); 4] =
    [("EXERCISE", "Exercise"), ("CONFERENCE", "Conference"), ("VISIT_BAN", "Visit ban"), ("OTHER", "Other")];

/// Resolved filter registrations of every object type.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchFilters {
    by_type: BTreeMap<SearchObjectType, Vec<FilterDefinition>>,
    /// Keys used by the search but absent from the advanced-search surface.
    extra: BTreeMap<SearchObjectType, Vec<FilterDefinition>>,
}

fn def(key: impl Into<String>, spec: FilterSpec) -> FilterDefinition {
    FilterDefinition::new(key, spec)
}

fn select(query_key: &str, options: &[(&str, &str)]) -> FilterSpec {
    FilterSpec::Select(
        SelectFilter::strings(query_key, options.iter().map(|(v, _)| *v)).with_labels(options.iter().map(|(_, l)| *l)),
    )
}

fn yes_no(query_key: &str) -> FilterSpec {
    FilterSpec::Select(SelectFilter::yes_no(query_key))
}

fn date_range(query_key: &str, settings: &SearchSettings) -> FilterSpec {
    FilterSpec::DateRange(DateRangeFilter::new(query_key).with_display_format(settings.date_format.clone()))
}

fn within_orgs(query_key: &str) -> FilterSpec {
    FilterSpec::EntityMulti(
        EntityMultiFilter::organizations(query_key)
            .with_recursion(Recursion::fixed("orgRecurseStrategy", RecurseStrategy::Children)),
    )
}

fn within_location() -> FilterSpec {
    FilterSpec::Entity(
        EntityFilter::location("locationUuid")
            .with_recursion(Recursion::fixed("locationRecurseStrategy", RecurseStrategy::Children)),
    )
}

fn entity(kind: LookupKind, query_key: &str) -> FilterSpec {
    FilterSpec::Entity(EntityFilter::new(kind, query_key))
}

fn assessment(object_type: &str, settings: &SearchSettings) -> FilterSpec {
    FilterSpec::Assessment(AssessmentFilter::new("assessment", object_type, settings.assessments_for(object_type)))
}

fn classification(settings: &SearchSettings) -> FilterSpec {
    let (options, labels) = settings.classification_choices();
    FilterSpec::Select(SelectFilter::strings("classification", options).with_labels(labels))
}

fn report_filters(settings: &SearchSettings) -> Vec<FilterDefinition> {
    let task = &settings.task_short_label;
    vec![
        def("Author", entity(LookupKind::Person, "authorUuid")),
        def("Attendee", entity(LookupKind::Person, "attendeeUuid")),
        def("Pending Approval Of", entity(LookupKind::Person, "pendingApprovalOf")),
        def("Author Position", entity(LookupKind::Position, "authorPositionUuid")),
        def("Attendee Position", entity(LookupKind::Position, "attendeePositionUuid")),
        def("Within Organization", within_orgs("orgUuid")),
        def("Engagement Date", date_range("engagementDate", settings)),
        def("Release Date", date_range("releasedAt", settings)),
        def("Creation Date", date_range("createdAt", settings)),
        def("Update Date", date_range("updatedAt", settings)),
        def("Within Location", within_location()),
        def("State", FilterSpec::ReportState(ReportStateFilter::new("state"))).default_filter(),
        def(
            "Engagement Status",
            select("engagementStatus", &[("HAPPENED", "Happened"), ("FUTURE", "Future"), ("CANCELLED", "Cancelled")]),
        ),
        def(
            "Atmospherics",
            select("atmosphere", &[("POSITIVE", "Positive"), ("NEUTRAL", "Neutral"), ("NEGATIVE", "Negative")]),
        ),
        def("Classifications", classification(settings)),
        def("Sensitive Info", FilterSpec::Checkbox(CheckboxFilter::new("sensitiveInfo"))),
        def(format!("Within {}", task), entity(LookupKind::Task, "taskUuid")),
        def(format!("Not Within {}", task), entity(LookupKind::Task, "notTaskUuid")),
    ]
}

fn people_filters(settings: &SearchSettings) -> Vec<FilterDefinition> {
    vec![
        def("Within Organization", within_orgs("orgUuid")),
        def("Within Location", within_location()),
        def(
            "Rank",
            FilterSpec::Select(SelectFilter::strings("rank", &settings.ranks).with_labels(&settings.ranks)),
        ),
        def("Nationality", entity(LookupKind::Location, "countryUuid")),
        def("Has Biography?", yes_no("hasBiography")),
        def("Is User?", yes_no("isUser")),
        def("Holding Position As", select("positionType", &POSITION_TYPES)),
        def(
            "Pending Verification",
            FilterSpec::Select(SelectFilter::yes_no("pendingVerification").with_default(Value::Bool(false))),
        )
        .default_filter(),
        def("Assessment", assessment("regular.person", settings)),
    ]
}

fn organization_filters(settings: &SearchSettings) -> Vec<FilterDefinition> {
    vec![
        def("Within Organization", within_orgs("parentOrgUuid")),
        def("Within Location", within_location()),
        def("Has Profile?", yes_no("hasProfile")),
        def("Assessment", assessment("organization", settings)),
    ]
}

fn position_filters() -> Vec<FilterDefinition> {
    vec![
        def("Type", select("type", &POSITION_TYPES)),
        def("Within Organization", within_orgs("organizationUuid")),
        def("Within Location", within_location()),
        def("Is Filled?", yes_no("isFilled")),
        def("Has Pending Assessments", FilterSpec::Checkbox(CheckboxFilter::new("hasPendingAssessments"))),
    ]
}

fn location_filters() -> Vec<FilterDefinition> {
    vec![def("Location Type", select("type", &LOCATION_TYPES)), def("Within Location", within_location())]
}

fn task_filters(settings: &SearchSettings) -> Vec<FilterDefinition> {
    vec![
        def("Is Selectable?", yes_no("selectable")),
        def("Is Assigned?", yes_no("isAssigned")),
        def("Within Organization", within_orgs("taskedOrgUuid")),
        def(
            format!("Within {}", settings.task_short_label),
            FilterSpec::Entity(
                EntityFilter::new(LookupKind::Task, "parentTaskUuid")
                    .with_recursion(Recursion::fixed("parentTaskRecurseStrategy", RecurseStrategy::Children)),
            ),
        ),
        def("Projected Completion", date_range("projectedCompletion", settings)),
        def("Planned Completion", date_range("plannedCompletion", settings)),
        def("Assessment", assessment("task", settings)),
    ]
}

fn event_filters(settings: &SearchSettings) -> Vec<FilterDefinition> {
    vec![
        def("Type", select("type", &EVENT_TYPES)),
        def("Event Series", entity(LookupKind::EventSeries, "eventSeriesUuid")),
        def("Within Owner Organization", FilterSpec::EntityMulti(EntityMultiFilter::organizations("ownerOrgUuid"))),
        def("Within Host Organization", FilterSpec::EntityMulti(EntityMultiFilter::organizations("hostOrgUuid"))),
        def("Within Admin Organization", FilterSpec::EntityMulti(EntityMultiFilter::organizations("adminOrgUuid"))),
        def("Within Location", entity(LookupKind::Location, "locationUuid")),
        def(format!("Within {}", settings.task_short_label), entity(LookupKind::Task, "taskUuid")),
    ]
}

/// Filters every object type carries.
fn shared_filters(settings: &SearchSettings) -> Vec<FilterDefinition> {
    vec![
        def("Status", select("status", &[("ACTIVE", "Active"), ("INACTIVE", "Inactive")])).default_filter(),
        def("Subscribed", FilterSpec::Checkbox(CheckboxFilter::new("subscribed").with_msg("By me"))),
        def(
            "With Email",
            FilterSpec::Select(
                SelectFilter::strings("emailNetwork", &settings.email_networks).with_labels(&settings.email_networks),
            ),
        ),
    ]
}

impl SearchFilters {
    pub fn new(settings: &SearchSettings) -> Self {
        let mut by_type = BTreeMap::new();
        for object_type in SearchObjectType::ALL {
            let mut filters = match object_type {
                SearchObjectType::Reports => report_filters(settings),
                SearchObjectType::People => people_filters(settings),
                SearchObjectType::Organizations => organization_filters(settings),
                SearchObjectType::Positions => position_filters(),
                SearchObjectType::Locations => location_filters(),
                SearchObjectType::Tasks => task_filters(settings),
                SearchObjectType::Events => event_filters(settings),
            };
            filters.extend(shared_filters(settings));
            by_type.insert(object_type, filters);
        }

        let mut extra = BTreeMap::new();
        extra.insert(
            SearchObjectType::Reports,
            [("includeEngagementDayOfWeek", ScalarKind::Bool), ("sortOrder", ScalarKind::Text)]
                .into_iter()
                .map(|(key, kind)| def(key, FilterSpec::PassThrough(PassThroughFilter::new(key).with_kind(kind))))
                .collect(),
        );
        Self { by_type, extra }
    }

    pub fn for_type(&self, object_type: SearchObjectType) -> &[FilterDefinition] {
        self.by_type.get(&object_type).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn extra_for(&self, object_type: SearchObjectType) -> &[FilterDefinition] {
        self.extra.get(&object_type).map(Vec::as_slice).unwrap_or_default()
    }

    /// Filters registered, under the same key, for every object type; order and
    /// definitions are those of the first type.
    pub fn find_common_filters_for_all_object_types(&self) -> Vec<FilterDefinition> {
        let mut types = SearchObjectType::ALL.into_iter();
        let Some(first) = types.next() else {
            return Vec::new();
        };
        let rest = types.collect::<Vec<_>>();
        self.for_type(first)
            .iter()
            .filter(|d| rest.iter().all(|t| self.for_type(*t).iter().any(|other| other.key == d.key)))
            .cloned()
            .collect()
    }

    /// Filters of the advanced-search surface for a search context.
    pub fn active(&self, object_type: Option<SearchObjectType>) -> Vec<FilterDefinition> {
        match object_type {
            Some(t) => self.for_type(t).to_vec(),
            None => self.find_common_filters_for_all_object_types(),
        }
    }

    /// Everything a search context deserializes: its visible filters, then the
    /// hidden pass-through keys.
    pub fn deserializable(&self, object_type: Option<SearchObjectType>) -> Vec<FilterDefinition> {
        let mut definitions = object_type.map(|t| self.extra_for(t).to_vec()).unwrap_or_default();
        definitions.extend(self.active(object_type));
        definitions
    }

    pub fn find(&self, object_type: Option<SearchObjectType>, key: &str) -> Option<FilterDefinition> {
        let in_type = |t: SearchObjectType| {
            self.for_type(t).iter().chain(self.extra_for(t)).find(|d| d.key == key).cloned()
        };
        match object_type {
            Some(t) => in_type(t),
            None => self.find_common_filters_for_all_object_types().into_iter().find(|d| d.key == key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn common_filters_are_the_shared_ones() {
        let filters = SearchFilters::new(&SearchSettings::default());
        let keys = filters
            .find_common_filters_for_all_object_types()
            .into_iter()
            .map(|d| d.key)
            .collect::<Vec<_>>();
        assert_eq!(keys, vec!["Status", "Subscribed", "With Email"]);
    }

    #[test]
    fn registration_keys_are_unique_and_claim_distinct_query_keys() {
        let filters = SearchFilters::new(&SearchSettings::default());
        for t in SearchObjectType::ALL {
            let defs = filters.deserializable(Some(t));
            let mut slot_keys = defs.iter().map(|d| d.key.clone()).collect::<Vec<_>>();
            slot_keys.sort();
            slot_keys.dedup();
            assert_eq!(slot_keys.len(), defs.len(), "{t}");

            let mut query_keys = defs.iter().flat_map(|d| d.spec.query_keys()).collect::<Vec<_>>();
            let total = query_keys.len();
            query_keys.sort();
            query_keys.dedup();
            assert_eq!(query_keys.len(), total, "{t}");
        }
    }

    #[test]
    fn reports_carry_pass_through_keys_first() {
        let filters = SearchFilters::new(&SearchSettings::default());
        let defs = filters.deserializable(Some(SearchObjectType::Reports));
        assert_eq!(defs[0].key, "includeEngagementDayOfWeek");
        assert!(defs[0].spec.is_hidden());
        assert!(filters.find(None, "sortOrder").is_none());
        assert!(filters.find(Some(SearchObjectType::Reports), "sortOrder").is_some());
    }
}
