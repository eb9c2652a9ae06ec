mod support;

use std::rc::Rc;

use common::deserialize_registry::AggregateSearchState;
use common::filters::FilterValue;
use common::filters::checkbox_filter::CheckboxValue;
use common::filters::report_state_filter::ReportStateValue;
use common::filters::select_filter::SelectValue;
use common::query_composer::{ComposeMode, MemoryStore, QueryComposer, SearchStore};
use common::search_const::{STORE_PAGE_NUM, STORE_SEARCH_TEXT};
use common::search_filters::SearchFilters;
use common::search_object_type::SearchObjectType;
use common::search_query::SerializedQuery;
use common::settings::SearchSettings;
use pretty_assertions::assert_eq;
use serde_json::json;
use support::MockQueryService;

fn composer(mode: ComposeMode) -> (QueryComposer, Rc<MemoryStore>) {
    let store = Rc::new(MemoryStore::default());
    let search_filters = Rc::new(SearchFilters::new(&SearchSettings::default()));
    let composer = QueryComposer::new(search_filters, mode, store.clone(), AggregateSearchState::default());
    (composer, store)
}

fn state_value(states: &[&str]) -> FilterValue {
    FilterValue::ReportState(ReportStateValue { state: states.iter().map(|s| s.to_string()).collect(), reason: None })
}

#[test]
fn live_edits_recompose_immediately() {
    let (mut composer, store) = composer(ComposeMode::Live);
    store.set(STORE_PAGE_NUM, json!(4));
    composer.set_object_type(Some(SearchObjectType::Reports));

    let state = composer.definition("State").unwrap();
    let requery = composer.set_filter("State", state.slot_value(state_value(&["DRAFT"])));

    let requery = requery.expect("live edits re-query");
    assert_eq!(requery.get("state"), Some(&json!(["DRAFT"])));
    assert_eq!(composer.composed_query(), requery);
    assert_eq!(composer.page_num(), 0);
}

#[test]
fn repeated_identical_value_does_not_requery() {
    let (mut composer, _) = composer(ComposeMode::Live);
    let status = composer.definition("Status").unwrap();
    let value = FilterValue::Select(SelectValue { value: json!("ACTIVE") });
    assert!(composer.set_filter("Status", status.slot_value(value.clone())).is_some());
    assert!(composer.set_filter("Status", status.slot_value(value)).is_none());
}

#[test]
fn staged_edits_wait_for_submit() {
    let (mut composer, store) = composer(ComposeMode::Staged);
    store.set(STORE_PAGE_NUM, json!(3));

    assert!(composer.set_object_type(Some(SearchObjectType::People)).is_none());
    assert!(composer.set_text("smith").is_none());
    assert!(composer.composed_query().is_empty());
    assert!(composer.has_staged_edits());
    assert_eq!(composer.page_num(), 3);

    let submitted = composer.submit();

    assert_eq!(submitted.get_str("text").as_deref(), Some("smith"));
    assert_eq!(submitted.get("pendingVerification"), Some(&json!(false)));
    assert_eq!(submitted.get("status"), Some(&json!("ACTIVE")));
    assert_eq!(store.get(STORE_PAGE_NUM), Some(json!(0)));
    assert_eq!(store.get(STORE_SEARCH_TEXT), Some(json!("smith")));
    assert!(!composer.has_staged_edits());
}

#[test]
fn cancel_restores_the_submitted_state() {
    let (mut composer, _) = composer(ComposeMode::Staged);
    composer.set_object_type(Some(SearchObjectType::Reports));
    composer.submit();
    let before = composer.submitted().clone();

    composer.add_filter("Sensitive Info");
    composer.remove_filter("State");
    composer.set_text("draft text");
    composer.cancel();

    assert_eq!(composer.state(), &before);
    assert!(!composer.has_staged_edits());
}

#[test]
fn added_filter_takes_part_with_its_default() {
    let (mut composer, _) = composer(ComposeMode::Staged);
    composer.set_object_type(Some(SearchObjectType::Positions));
    composer.add_filter("Has Pending Assessments");
    assert_eq!(
        composer.state().get("Has Pending Assessments").map(|s| s.value.value.clone()),
        Some(FilterValue::Checkbox(CheckboxValue { value: true }))
    );
    assert_eq!(composer.draft_query().get("hasPendingAssessments"), Some(&json!(true)));
    assert!(composer.add_filter("Has Pending Assessments").is_none());
    assert!(composer.available_filters().iter().all(|d| d.key != "Has Pending Assessments"));
}

#[test]
fn unregistered_filters_are_ignored() {
    let (mut composer, _) = composer(ComposeMode::Live);
    composer.set_object_type(Some(SearchObjectType::Locations));
    let reports = SearchFilters::new(&SearchSettings::default());
    let state = reports.find(Some(SearchObjectType::Reports), "State").unwrap();

    assert!(composer.set_filter("State", state.slot_value(state_value(&["DRAFT"]))).is_none());
    assert!(composer.add_filter("State").is_none());
    assert!(composer.state().get("State").is_none());
}

#[test]
fn switching_type_keeps_common_filters_and_default_values() {
    let (mut composer, _) = composer(ComposeMode::Staged);
    composer.set_object_type(Some(SearchObjectType::Reports));
    composer.add_filter("Subscribed");
    composer.add_filter("Sensitive Info");
    let status = composer.definition("Status").unwrap();
    composer.set_filter("Status", status.slot_value(FilterValue::Select(SelectValue { value: json!("INACTIVE") })));

    composer.set_object_type(Some(SearchObjectType::People));

    let keys = composer.state().filters.iter().map(|s| s.key.as_str()).collect::<Vec<_>>();
    assert_eq!(keys, vec!["Subscribed", "Pending Verification", "Status"]);
    assert_eq!(composer.draft_query().get("status"), Some(&json!("INACTIVE")));

    composer.set_object_type(None);
    let keys = composer.state().filters.iter().map(|s| s.key.as_str()).collect::<Vec<_>>();
    assert_eq!(keys, vec!["Subscribed", "Status"]);
}

#[test]
fn share_query_carries_the_object_type() {
    let (mut composer, _) = composer(ComposeMode::Live);
    composer.set_object_type(Some(SearchObjectType::Tasks));
    composer.set_text("water");

    let shared = composer.share_query();

    assert_eq!(shared.get_str("objectType").as_deref(), Some("TASKS"));
    assert!(!composer.composed_query().contains_key("objectType"));
    let round_tripped = SerializedQuery::from_query_string(&shared.to_query_string());
    assert_eq!(round_tripped.get_str("text").as_deref(), Some("water"));
    assert_eq!(round_tripped.get_str("status").as_deref(), Some("ACTIVE"));
}

#[test]
fn list_request_needs_an_object_type() {
    let (mut composer, store) = composer(ComposeMode::Live);
    assert!(composer.list_request().is_none());
    composer.set_object_type(Some(SearchObjectType::Events));
    store.set(STORE_PAGE_NUM, json!(2));
    let request = composer.list_request().unwrap();
    assert_eq!(request.object_type, SearchObjectType::Events);
    assert_eq!(request.page_num, 2);
}

#[tokio::test]
async fn stale_reference_is_omitted_from_the_composed_query() {
    let (_, service) = MockQueryService::new().with_entity("O1", "EF 1").into_service();
    let incoming = SerializedQuery::from_query_string("objectType=PEOPLE&locationUuid=L-deleted&orgUuid=O1");
    let composer = QueryComposer::rehydrated(
        Rc::new(SearchFilters::new(&SearchSettings::default())),
        ComposeMode::Live,
        Rc::new(MemoryStore::default()),
        &incoming,
        &service,
    )
    .await;

    let query = composer.composed_query();

    assert!(!query.contains_key("locationUuid"));
    assert_eq!(query.get("orgUuid"), Some(&json!(["O1"])));
}

#[test]
fn staged_fork_submits_back_into_a_live_composer() {
    let (mut live, store) = composer(ComposeMode::Live);
    live.set_object_type(Some(SearchObjectType::Locations));
    store.set(STORE_PAGE_NUM, json!(5));

    let mut staged = live.fork(ComposeMode::Staged);
    staged.set_text("harbour");
    assert_eq!(live.composed_query().get_str("text"), None);

    staged.submit();
    let live = staged.fork(ComposeMode::Live);

    assert_eq!(live.mode(), ComposeMode::Live);
    assert_eq!(live.composed_query().get_str("text").as_deref(), Some("harbour"));
    assert_eq!(live.page_num(), 0);
}
