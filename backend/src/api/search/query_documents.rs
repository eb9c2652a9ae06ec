//! GraphQL documents of the named queries the search core issues.

use common::query_service::LookupKind;
use common::search_object_type::SearchObjectType;

const LOOKUP_KINDS: [LookupKind; 6] = [
    LookupKind::Location,
    LookupKind::Organization,
    LookupKind::Person,
    LookupKind::Position,
    LookupKind::Task,
    LookupKind::EventSeries,
];

/// Remote field and the selection that yields `{ uuid name }`.
fn lookup_field(kind: LookupKind) -> (&'static str, &'static str) {
    match kind {
        LookupKind::Location => ("locations", "uuid name"),
        LookupKind::Organization => ("organizations", "uuid name: shortName"),
        LookupKind::Person => ("people", "uuid name"),
        LookupKind::Position => ("positions", "uuid name"),
        LookupKind::Task => ("tasks", "uuid name: shortName"),
        LookupKind::EventSeries => ("eventSeriesBatch: eventSeries", "uuid name"),
    }
}

fn list_input_type(object_type: SearchObjectType) -> &'static str {
    match object_type {
        SearchObjectType::Reports => "ReportSearchQueryInput",
        SearchObjectType::People => "PersonSearchQueryInput",
        SearchObjectType::Organizations => "OrganizationSearchQueryInput",
        SearchObjectType::Positions => "PositionSearchQueryInput",
        SearchObjectType::Locations => "LocationSearchQueryInput",
        SearchObjectType::Tasks => "TaskSearchQueryInput",
        SearchObjectType::Events => "EventSearchQueryInput",
    }
}

fn list_row_fields(object_type: SearchObjectType) -> &'static str {
    match object_type {
        SearchObjectType::Reports => "uuid intent engagementDate state",
        SearchObjectType::People => "uuid name rank status",
        SearchObjectType::Organizations => "uuid shortName longName status",
        SearchObjectType::Positions => "uuid name type status",
        SearchObjectType::Locations => "uuid name type status",
        SearchObjectType::Tasks => "uuid shortName longName status",
        SearchObjectType::Events => "uuid name type startDate endDate",
    }
}

fn autocomplete_input_type(kind: LookupKind) -> &'static str {
    match kind {
        LookupKind::Location => "LocationSearchQueryInput",
        LookupKind::Organization => "OrganizationSearchQueryInput",
        LookupKind::Person => "PersonSearchQueryInput",
        LookupKind::Position => "PositionSearchQueryInput",
        LookupKind::Task => "TaskSearchQueryInput",
        LookupKind::EventSeries => "EventSeriesSearchQueryInput",
    }
}

pub fn batch_lookup_document(kind: LookupKind) -> String {
    let (field, selection) = lookup_field(kind);
    let (alias_or_field, remote_field) = match field.split_once(": ") {
        Some((alias, remote)) => (format!("{}: ", alias), remote),
        None => (String::new(), field),
    };
    format!("query ($uuids: [String]) {{ {alias_or_field}{remote_field}(uuids: $uuids) {{ {selection} }} }}")
}

pub fn list_document(object_type: SearchObjectType) -> String {
    let name = object_type.list_query_name();
    let input = list_input_type(object_type);
    let fields = list_row_fields(object_type);
    format!(
        "query ($query: {input}) {{ {name}(query: $query) {{ pageNum pageSize totalCount list {{ {fields} }} }} }}"
    )
}

/// Autocomplete rows only need `{ uuid name }`.
pub fn autocomplete_document(kind: LookupKind) -> String {
    let name = kind.list_query_name();
    let input = autocomplete_input_type(kind);
    let (_, selection) = lookup_field(kind);
    format!(
        "query ($query: {input}) {{ {name}(query: $query) {{ pageNum pageSize totalCount list {{ {selection} }} }} }}"
    )
}

/// Document of a named query; only names the search core issues are known.
pub fn query_document(name: &str) -> Option<String> {
    if let Some(kind) = LOOKUP_KINDS.into_iter().find(|k| k.batch_query_name() == name) {
        return Some(batch_lookup_document(kind));
    }
    if let Some(object_type) = SearchObjectType::ALL.into_iter().find(|t| t.list_query_name() == name) {
        return Some(list_document(object_type));
    }
    LOOKUP_KINDS.into_iter().find(|k| k.list_query_name() == name).map(autocomplete_document)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_core_query_has_a_document() {
        for kind in LOOKUP_KINDS {
            assert!(query_document(kind.batch_query_name()).is_some(), "{:?}", kind);
            assert!(query_document(kind.list_query_name()).is_some(), "{:?}", kind);
        }
        for object_type in SearchObjectType::ALL {
            assert!(query_document(object_type.list_query_name()).is_some(), "{}", object_type);
        }
        assert!(query_document("deleteEverything").is_none());
    }

    #[test]
    fn batch_documents_alias_to_the_requested_name() {
        assert_eq!(
            batch_lookup_document(LookupKind::Organization),
            "query ($uuids: [String]) { organizations(uuids: $uuids) { uuid name: shortName } }"
        );
        assert_eq!(
            batch_lookup_document(LookupKind::EventSeries),
            "query ($uuids: [String]) { eventSeriesBatch: eventSeries(uuids: $uuids) { uuid name } }"
        );
    }

    #[test]
    fn list_documents_select_the_page_envelope() {
        let doc = list_document(SearchObjectType::Reports);
        assert!(doc.starts_with("query ($query: ReportSearchQueryInput) { reportList(query: $query)"));
        assert!(doc.contains("pageNum pageSize totalCount list { uuid intent"));
    }
}
