//! Filter on an assessment and its enumerated sub-questions.
//!
//! Serializes as one nested object under the filter's key:
//! `{ "key": <assessment>, "filters": { <question>: value | [values] } }`.

use std::collections::BTreeMap;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{FilterCodec, Rehydration};
use crate::query_service::QueryService;
use crate::search_query::{SerializedQuery, scalar_to_string};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    #[default]
    Enum,
    EnumSet,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentChoice {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AssessmentQuestion {
    pub label: String,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    pub choices: Vec<AssessmentChoice>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AssessmentDefinition {
    pub label: String,
    pub questions: BTreeMap<String, AssessmentQuestion>,
}

/// Assessments of one entity type, keyed by assessment name.
pub type AssessmentSchema = BTreeMap<String, AssessmentDefinition>;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum QuestionFilter {
    One(String),
    Many(Vec<String>),
}

impl QuestionFilter {
    pub fn is_empty(&self) -> bool {
        match self {
            QuestionFilter::One(v) => v.is_empty(),
            QuestionFilter::Many(v) => v.is_empty(),
        }
    }

    pub fn values(&self) -> Vec<&str> {
        match self {
            QuestionFilter::One(v) => vec![v.as_str()],
            QuestionFilter::Many(v) => v.iter().map(String::as_str).collect(),
        }
    }

    fn to_json(&self) -> Value {
        match self {
            QuestionFilter::One(v) => Value::from(v.clone()),
            QuestionFilter::Many(v) => Value::from(v.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct AssessmentValue {
    pub key: Option<String>,
    pub filters: BTreeMap<String, QuestionFilter>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssessmentFilter {
    pub query_key: String,
    /// Entity type whose assessments are offered, e.g. `regular.person`.
    pub object_type: String,
    pub schema: AssessmentSchema,
}

impl AssessmentFilter {
    pub fn new(query_key: impl Into<String>, object_type: impl Into<String>, schema: AssessmentSchema) -> Self {
        Self { query_key: query_key.into(), object_type: object_type.into(), schema }
    }

    /// Switching assessment drops every sub-question filter.
    pub fn select_assessment(&self, key: Option<String>) -> AssessmentValue {
        AssessmentValue { key: key.filter(|k| self.schema.contains_key(k)), filters: BTreeMap::new() }
    }

    /// Sets one sub-question filter; an empty selection removes the question.
    pub fn set_question_filter(
        &self,
        value: &AssessmentValue,
        question: &str,
        filter: QuestionFilter,
    ) -> AssessmentValue {
        let mut next = value.clone();
        if filter.is_empty() || self.question(value, question).is_none() {
            next.filters.remove(question);
        } else {
            next.filters.insert(question.to_string(), filter);
        }
        next
    }

    /// Sub-questions of the currently selected assessment.
    pub fn questions<'a>(&'a self, value: &AssessmentValue) -> Vec<(&'a String, &'a AssessmentQuestion)> {
        value
            .key
            .as_ref()
            .and_then(|k| self.schema.get(k))
            .map(|def| def.questions.iter().collect())
            .unwrap_or_default()
    }

    fn question(&self, value: &AssessmentValue, question: &str) -> Option<&AssessmentQuestion> {
        self.schema.get(value.key.as_ref()?)?.questions.get(question)
    }

    fn read_question_filter(question: &AssessmentQuestion, raw: &Value) -> Option<QuestionFilter> {
        let allowed = |v: &String| question.choices.iter().any(|c| &c.value == v);
        let values = match raw {
            Value::Array(items) => items.iter().filter_map(scalar_to_string).collect::<Vec<_>>(),
            other => scalar_to_string(other).into_iter().collect(),
        };
        let values = values.into_iter().filter(|v| allowed(v)).collect::<Vec<_>>();
        let filter = match question.kind {
            QuestionKind::Enum => QuestionFilter::One(values.into_iter().next()?),
            QuestionKind::EnumSet => QuestionFilter::Many(values),
        };
        (!filter.is_empty()).then_some(filter)
    }
}

impl FilterCodec for AssessmentFilter {
    type Value = AssessmentValue;

    fn query_keys(&self) -> Vec<String> {
        vec![self.query_key.clone()]
    }

    fn default_value(&self) -> AssessmentValue {
        AssessmentValue::default()
    }

    fn to_query(&self, value: &AssessmentValue) -> SerializedQuery {
        let mut query = SerializedQuery::new();
        let Some(key) = value.key.as_ref().filter(|k| self.schema.contains_key(*k)) else {
            return query;
        };
        let filters = value
            .filters
            .iter()
            .filter(|(q, f)| !f.is_empty() && self.question(value, q).is_some())
            .map(|(q, f)| (q.clone(), f.to_json()))
            .collect::<Map<_, _>>();
        query.insert(self.query_key.clone(), serde_json::json!({ "key": key, "filters": filters }));
        query
    }

    fn deserialize(
        &self,
        query: &SerializedQuery,
        _service: &Rc<dyn QueryService>,
    ) -> Rehydration<AssessmentValue> {
        let Some(Value::Object(raw)) = query.get(&self.query_key) else {
            return Rehydration::Absent;
        };
        let Some(key) = raw.get("key").and_then(scalar_to_string) else {
            return Rehydration::Absent;
        };
        let Some(definition) = self.schema.get(&key) else {
            tracing::debug!(assessment = %key, object_type = %self.object_type, "unknown assessment dropped");
            return Rehydration::Absent;
        };
        let mut value = AssessmentValue { key: Some(key), filters: BTreeMap::new() };
        if let Some(Value::Object(filters)) = raw.get("filters") {
            for (name, raw_filter) in filters {
                let parsed = definition
                    .questions
                    .get(name)
                    .and_then(|question| Self::read_question_filter(question, raw_filter));
                if let Some(parsed) = parsed {
                    value.filters.insert(name.clone(), parsed);
                }
            }
        }
        Rehydration::Ready(value)
    }

    fn display(&self, value: &AssessmentValue) -> String {
        let Some(definition) = value.key.as_ref().and_then(|k| self.schema.get(k)) else {
            return String::new();
        };
        let parts = value
            .filters
            .iter()
            .filter_map(|(name, filter)| {
                let question = definition.questions.get(name)?;
                let labels = filter
                    .values()
                    .into_iter()
                    .map(|v| {
                        question.choices.iter().find(|c| c.value == v).map(|c| c.label.as_str()).unwrap_or(v)
                    })
                    .collect::<Vec<_>>()
                    .join(", ");
                Some(format!("{}: {}", question.label, labels))
            })
            .collect::<Vec<_>>();
        if parts.is_empty() {
            definition.label.clone()
        } else {
            format!("{} ({})", definition.label, parts.join("; "))
        }
    }
}
