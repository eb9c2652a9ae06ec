use std::rc::Rc;

use serde_json::Value;

use super::{FilterCodec, Rehydration};
use crate::query_service::QueryService;
use crate::search_query::{SerializedQuery, scalar_to_string};

/// Wire type of a pass-through value. A shared link carries every scalar as
/// text, so the kind decides what it reads back as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    Bool,
    Number,
    Text,
}

impl ScalarKind {
    /// `None` when the incoming value does not fit the kind.
    pub fn parse(&self, value: &Value) -> Option<Value> {
        match (self, value) {
            (ScalarKind::Bool, Value::Bool(_)) | (ScalarKind::Number, Value::Number(_)) => Some(value.clone()),
            (ScalarKind::Bool, Value::String(s)) => s.trim().parse::<bool>().ok().map(Value::Bool),
            (ScalarKind::Number, Value::String(s)) => {
                let s = s.trim();
                match s.parse::<i64>() {
                    Ok(n) => Some(Value::from(n)),
                    Err(_) => s.parse::<f64>().ok().and_then(|f| serde_json::Number::from_f64(f)).map(Value::Number),
                }
            }
            (ScalarKind::Text, Value::Null) => None,
            (ScalarKind::Text, Value::Array(_) | Value::Object(_)) => Some(value.clone()),
            (ScalarKind::Text, scalar) => scalar_to_string(scalar).map(Value::String),
            _ => None,
        }
    }
}

/// A query key that takes part in the search without an edit surface, such as a
/// sort order.
#[derive(Debug, Clone, PartialEq)]
pub struct PassThroughFilter {
    pub query_key: String,
    pub kind: ScalarKind,
}

impl PassThroughFilter {
    pub fn new(query_key: impl Into<String>) -> Self {
        Self { query_key: query_key.into(), kind: ScalarKind::Text }
    }

    pub fn with_kind(mut self, kind: ScalarKind) -> Self {
        self.kind = kind;
        self
    }
}

impl FilterCodec for PassThroughFilter {
    type Value = Value;

    fn query_keys(&self) -> Vec<String> {
        vec![self.query_key.clone()]
    }

    fn default_value(&self) -> Value {
        Value::Null
    }

    fn to_query(&self, value: &Value) -> SerializedQuery {
        let mut query = SerializedQuery::new();
        if let Some(value) = self.kind.parse(value) {
            query.insert(self.query_key.clone(), value);
        }
        query
    }

    fn deserialize(&self, query: &SerializedQuery, _service: &Rc<dyn QueryService>) -> Rehydration<Value> {
        match query.get(&self.query_key).and_then(|v| self.kind.parse(v)) {
            Some(value) => Rehydration::Ready(value),
            None => Rehydration::Absent,
        }
    }

    fn display(&self, value: &Value) -> String {
        scalar_to_string(value).unwrap_or_else(|| value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::future::LocalBoxFuture;
    use serde_json::json;

    struct NoService;

    impl QueryService for NoService {
        fn query(&self, name: &str, _variables: Value) -> LocalBoxFuture<'static, anyhow::Result<Value>> {
            panic!("pass-through keys never look anything up, asked for {}", name)
        }
    }

    fn from_link(filter: &PassThroughFilter, query_string: &str) -> Option<Value> {
        let service: Rc<dyn QueryService> = Rc::new(NoService);
        match filter.deserialize(&SerializedQuery::from_query_string(query_string), &service) {
            Rehydration::Ready(value) => Some(value),
            _ => None,
        }
    }

    #[test]
    fn shared_link_values_read_back_typed() {
        let flag = PassThroughFilter::new("includeEngagementDayOfWeek").with_kind(ScalarKind::Bool);
        let value = from_link(&flag, "includeEngagementDayOfWeek=true");
        assert_eq!(value, Some(json!(true)));
        let again = value.map(|v| flag.to_query(&v).to_query_string());
        assert_eq!(again.as_deref(), Some("includeEngagementDayOfWeek=true"));

        let limit = PassThroughFilter::new("maxDays").with_kind(ScalarKind::Number);
        assert_eq!(from_link(&limit, "maxDays=14"), Some(json!(14)));

        let order = PassThroughFilter::new("sortOrder");
        assert_eq!(from_link(&order, "sortOrder=DESC"), Some(json!("DESC")));
    }

    #[test]
    fn values_of_the_wrong_kind_are_absent() {
        let flag = PassThroughFilter::new("includeEngagementDayOfWeek").with_kind(ScalarKind::Bool);
        assert_eq!(from_link(&flag, "includeEngagementDayOfWeek=maybe"), None);
        assert!(flag.to_query(&json!("maybe")).is_empty());

        let limit = PassThroughFilter::new("maxDays").with_kind(ScalarKind::Number);
        assert_eq!(from_link(&limit, "maxDays=soon"), None);
    }
}
