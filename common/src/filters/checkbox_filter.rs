use std::rc::Rc;

use serde::Serialize;
use serde_json::Value;

use super::{FilterCodec, Rehydration};
use crate::query_service::QueryService;
use crate::search_query::SerializedQuery;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckboxValue {
    pub value: bool,
}

/// Boolean flag; only a checked box is serialized.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckboxFilter {
    pub query_key: String,
    pub msg: String,
}

impl CheckboxFilter {
    pub fn new(query_key: impl Into<String>) -> Self {
        Self { query_key: query_key.into(), msg: "Yes".to_string() }
    }

    pub fn with_msg(mut self, msg: impl Into<String>) -> Self {
        self.msg = msg.into();
        self
    }
}

impl FilterCodec for CheckboxFilter {
    type Value = CheckboxValue;

    fn query_keys(&self) -> Vec<String> {
        vec![self.query_key.clone()]
    }

    fn default_value(&self) -> CheckboxValue {
        CheckboxValue { value: true }
    }

    fn to_query(&self, value: &CheckboxValue) -> SerializedQuery {
        let mut query = SerializedQuery::new();
        if value.value {
            query.insert(self.query_key.clone(), true);
        }
        query
    }

    fn deserialize(
        &self,
        query: &SerializedQuery,
        _service: &Rc<dyn QueryService>,
    ) -> Rehydration<CheckboxValue> {
        match query.get(&self.query_key) {
            Some(Value::Bool(true)) => Rehydration::Ready(CheckboxValue { value: true }),
            Some(Value::String(s)) if s == "true" => Rehydration::Ready(CheckboxValue { value: true }),
            _ => Rehydration::Absent,
        }
    }

    fn display(&self, value: &CheckboxValue) -> String {
        if value.value { self.msg.clone() } else { String::new() }
    }
}
