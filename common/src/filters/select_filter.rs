//! Single choice among declared options; also backs radio-button filters.

use std::rc::Rc;

use serde::Serialize;
use serde_json::Value;

use super::{FilterCodec, Rehydration};
use crate::query_service::QueryService;
use crate::search_query::{SerializedQuery, scalar_to_string};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectValue {
    pub value: Value,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectFilter {
    pub query_key: String,
    pub options: Vec<Value>,
    /// Parallel to `options`; missing labels fall back to the option text.
    pub labels: Vec<String>,
    pub default_option: Option<Value>,
    /// Rendered as radio buttons instead of a drop-down.
    pub as_radio: bool,
}

impl SelectFilter {
    pub fn new(query_key: impl Into<String>, options: Vec<Value>) -> Self {
        Self { query_key: query_key.into(), options, labels: Vec::new(), default_option: None, as_radio: false }
    }

    pub fn strings<S: AsRef<str>>(query_key: impl Into<String>, options: impl IntoIterator<Item = S>) -> Self {
        Self::new(query_key, options.into_iter().map(|o| Value::from(o.as_ref())).collect())
    }

    /// Yes / No radio buttons over a boolean.
    pub fn yes_no(query_key: impl Into<String>) -> Self {
        Self::new(query_key, vec![Value::Bool(true), Value::Bool(false)])
            .with_labels(&["Yes", "No"])
            .radio()
    }

    pub fn with_labels<S: AsRef<str>>(mut self, labels: impl IntoIterator<Item = S>) -> Self {
        self.labels = labels.into_iter().map(|l| l.as_ref().to_string()).collect();
        self
    }

    pub fn with_default(mut self, option: Value) -> Self {
        self.default_option = Some(option);
        self
    }

    pub fn radio(mut self) -> Self {
        self.as_radio = true;
        self
    }

    /// Options paired with their display labels.
    pub fn choices(&self) -> Vec<(Value, String)> {
        self.options
            .iter()
            .enumerate()
            .map(|(i, option)| {
                let label = self.labels.get(i).cloned().or_else(|| scalar_to_string(option)).unwrap_or_default();
                (option.clone(), label)
            })
            .collect()
    }

    /// Matches a raw value against the options; a value that came through a
    /// query string matches on its text.
    pub fn find_option(&self, raw: &Value) -> Option<&Value> {
        self.options.iter().find(|o| *o == raw).or_else(|| {
            let text = scalar_to_string(raw)?;
            self.options.iter().find(|o| scalar_to_string(o).as_deref() == Some(text.as_str()))
        })
    }
}

impl FilterCodec for SelectFilter {
    type Value = SelectValue;

    fn query_keys(&self) -> Vec<String> {
        vec![self.query_key.clone()]
    }

    fn default_value(&self) -> SelectValue {
        let value = self.default_option.clone().or_else(|| self.options.first().cloned()).unwrap_or(Value::Null);
        SelectValue { value }
    }

    fn to_query(&self, value: &SelectValue) -> SerializedQuery {
        let mut query = SerializedQuery::new();
        if !value.value.is_null() {
            query.insert(self.query_key.clone(), value.value.clone());
        }
        query
    }

    fn deserialize(
        &self,
        query: &SerializedQuery,
        _service: &Rc<dyn QueryService>,
    ) -> Rehydration<SelectValue> {
        match query.get(&self.query_key).and_then(|raw| self.find_option(raw)) {
            Some(option) => Rehydration::Ready(SelectValue { value: option.clone() }),
            None => Rehydration::Absent,
        }
    }

    fn display(&self, value: &SelectValue) -> String {
        self.choices()
            .into_iter()
            .find(|(option, _)| *option == value.value)
            .map(|(_, label)| label)
            .or_else(|| scalar_to_string(&value.value))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::future::LocalBoxFuture;

    struct NoService;

    impl QueryService for NoService {
        fn query(&self, _name: &str, _variables: Value) -> LocalBoxFuture<'static, anyhow::Result<Value>> {
            unreachable!()
        }
    }

    #[test]
    fn booleans_survive_a_query_string() {
        let filter = SelectFilter::yes_no("isUser");
        let query = SerializedQuery::from_query_string(&filter.to_query(&SelectValue { value: Value::Bool(false) }).to_query_string());
        let service: Rc<dyn QueryService> = Rc::new(NoService);
        match filter.deserialize(&query, &service) {
            Rehydration::Ready(v) => {
                assert_eq!(v.value, Value::Bool(false));
                assert_eq!(filter.display(&v), "No");
            }
            _ => panic!("expected a ready value"),
        }
    }

    #[test]
    fn unknown_option_is_absent() {
        let filter = SelectFilter::strings("status", &["ACTIVE", "INACTIVE"]);
        let mut query = SerializedQuery::new();
        query.insert("status", "RETIRED");
        let service: Rc<dyn QueryService> = Rc::new(NoService);
        assert!(filter.deserialize(&query, &service).is_absent());
    }

    #[test]
    fn default_option_wins_over_first() {
        let filter = SelectFilter::yes_no("pendingVerification").with_default(Value::Bool(false));
        assert_eq!(filter.default_value().value, Value::Bool(false));
    }
}
