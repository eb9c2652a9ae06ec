mod support;

use std::collections::BTreeMap;

use common::filters::assessment_filter::{
    AssessmentChoice, AssessmentDefinition, AssessmentFilter, AssessmentQuestion, AssessmentSchema, AssessmentValue,
    QuestionFilter, QuestionKind,
};
use common::filters::{FilterCodec, Rehydration};
use common::search_query::SerializedQuery;
use pretty_assertions::assert_eq;
use serde_json::json;
use support::MockQueryService;

fn question(label: &str, kind: QuestionKind, choices: &[(&str, &str)]) -> AssessmentQuestion {
    AssessmentQuestion {
        label: label.to_string(),
        kind,
        choices: choices
            .iter()
            .map(|(value, label)| AssessmentChoice { value: value.to_string(), label: label.to_string() })
            .collect(),
    }
}

fn schema() -> AssessmentSchema {
    let mut a = AssessmentDefinition { label: "Engagement".to_string(), questions: BTreeMap::new() };
    a.questions.insert("q1".to_string(), question("Outcome", QuestionKind::Enum, &[("good", "Good"), ("bad", "Bad")]));
    a.questions.insert(
        "topics".to_string(),
        question("Topics", QuestionKind::EnumSet, &[("water", "Water"), ("power", "Power"), ("roads", "Roads")]),
    );
    let mut b = AssessmentDefinition { label: "Training".to_string(), questions: BTreeMap::new() };
    b.questions.insert("level".to_string(), question("Level", QuestionKind::Enum, &[("low", "Low"), ("high", "High")]));

    let mut schema = AssessmentSchema::new();
    schema.insert("A".to_string(), a);
    schema.insert("B".to_string(), b);
    schema
}

fn filter() -> AssessmentFilter {
    AssessmentFilter::new("assessment", "regular.person", schema())
}

#[test]
fn switching_assessment_drops_previous_sub_questions() {
    let filter = filter();
    let value = filter.select_assessment(Some("A".to_string()));
    let value = filter.set_question_filter(&value, "q1", QuestionFilter::One("good".to_string()));
    assert_eq!(value.filters.len(), 1);

    let switched = filter.select_assessment(Some("B".to_string()));

    assert!(switched.filters.is_empty());
    assert_eq!(
        filter.to_query(&switched).get("assessment"),
        Some(&json!({ "key": "B", "filters": {} }))
    );
}

#[test]
fn empty_selection_removes_the_question() {
    let filter = filter();
    let value = filter.select_assessment(Some("A".to_string()));
    let value = filter.set_question_filter(
        &value,
        "topics",
        QuestionFilter::Many(vec!["water".to_string(), "roads".to_string()]),
    );
    let value = filter.set_question_filter(&value, "q1", QuestionFilter::One("bad".to_string()));
    assert_eq!(
        filter.to_query(&value).get("assessment"),
        Some(&json!({ "key": "A", "filters": { "q1": "bad", "topics": ["water", "roads"] } }))
    );

    let value = filter.set_question_filter(&value, "topics", QuestionFilter::Many(Vec::new()));
    let value = filter.set_question_filter(&value, "q1", QuestionFilter::One(String::new()));

    assert!(value.filters.is_empty());
    assert_eq!(filter.to_query(&value).get("assessment"), Some(&json!({ "key": "A", "filters": {} })));
}

#[test]
fn questions_of_other_assessments_are_not_settable() {
    let filter = filter();
    let value = filter.select_assessment(Some("B".to_string()));
    let value = filter.set_question_filter(&value, "q1", QuestionFilter::One("good".to_string()));
    assert!(value.filters.is_empty());
    assert_eq!(filter.questions(&value).len(), 1);
}

#[test]
fn survives_a_shareable_query_string() {
    let (_, service) = MockQueryService::new().into_service();
    let filter = filter();
    let value = filter.select_assessment(Some("A".to_string()));
    let value = filter.set_question_filter(&value, "topics", QuestionFilter::Many(vec!["power".to_string()]));

    let query = SerializedQuery::from_query_string(&filter.to_query(&value).to_query_string());

    match filter.deserialize(&query, &service) {
        Rehydration::Ready(rehydrated) => assert_eq!(rehydrated, value),
        _ => panic!("expected a ready assessment value"),
    }
    assert_eq!(filter.display(&value), "Engagement (Topics: Power)");
}

#[test]
fn unknown_choices_and_assessments_are_dropped() {
    let (_, service) = MockQueryService::new().into_service();
    let filter = filter();

    let mut query = SerializedQuery::new();
    query.insert("assessment", json!({ "key": "A", "filters": { "q1": "ugly", "topics": ["water", "fire"], "gone": "x" } }));
    match filter.deserialize(&query, &service) {
        Rehydration::Ready(value) => {
            let mut expected = AssessmentValue { key: Some("A".to_string()), filters: BTreeMap::new() };
            expected.filters.insert("topics".to_string(), QuestionFilter::Many(vec!["water".to_string()]));
            assert_eq!(value, expected);
        }
        _ => panic!("expected a ready assessment value"),
    }

    let mut retired = SerializedQuery::new();
    retired.insert("assessment", json!({ "key": "Z", "filters": {} }));
    assert!(filter.deserialize(&retired, &service).is_absent());
    assert!(filter.deserialize(&SerializedQuery::new(), &service).is_absent());
}

#[test]
fn no_assessment_selected_serializes_to_nothing() {
    let filter = filter();
    assert!(filter.to_query(&filter.default_value()).is_empty());
    assert_eq!(filter.display(&filter.default_value()), "");
}
