//! Flat serialized search queries and their shareable query-string form.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The canonical, URL-shareable representation of a whole search.
///
/// Keys are flat; values are primitives, arrays or nested objects. Every filter
/// kind owns a fixed set of keys in here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct SerializedQuery(BTreeMap<String, Value>);

impl SerializedQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Merges `other` into `self`; keys of `other` win.
    pub fn merge(&mut self, other: SerializedQuery) {
        self.0.extend(other.0);
    }

    /// True when at least one of `keys` is present.
    pub fn contains_any<'a>(&self, keys: impl IntoIterator<Item = &'a str>) -> bool {
        keys.into_iter().any(|k| self.contains_key(k))
    }

    /// Reads a scalar as text. Numbers and booleans are stringified, since values
    /// coming back from a query string are always strings.
    pub fn get_str(&self, key: &str) -> Option<String> {
        self.get(key).and_then(scalar_to_string)
    }

    /// Reads a value that may be either a single scalar or an array of scalars.
    pub fn get_string_list(&self, key: &str) -> Vec<String> {
        match self.get(key) {
            Some(Value::Array(items)) => items.iter().filter_map(scalar_to_string).collect(),
            Some(other) => scalar_to_string(other).into_iter().collect(),
            None => Vec::new(),
        }
    }

    pub fn get_i64(&self, key: &str) -> Option<i64> {
        match self.get(key)? {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Encodes as `application/x-www-form-urlencoded`.
    ///
    /// Arrays repeat the key, nested objects are JSON-encoded, nulls are skipped.
    pub fn to_query_string(&self) -> String {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        for (key, value) in self.0.iter() {
            match value {
                Value::Null => {}
                Value::Array(items) => {
                    for item in items {
                        if let Some(text) = value_to_text(item) {
                            serializer.append_pair(key, &text);
                        }
                    }
                }
                other => {
                    if let Some(text) = value_to_text(other) {
                        serializer.append_pair(key, &text);
                    }
                }
            }
        }
        serializer.finish()
    }

    /// Parses a query string produced by [`SerializedQuery::to_query_string`]
    /// (a leading `?` is tolerated).
    ///
    /// Repeated keys become arrays. A value that looks like a JSON object is decoded
    /// as one; if it does not parse it is kept as the plain string.
    pub fn from_query_string(query_string: &str) -> Self {
        let query_string = query_string.strip_prefix('?').unwrap_or(query_string);
        let mut grouped: BTreeMap<String, Vec<Value>> = BTreeMap::new();
        for (key, value) in url::form_urlencoded::parse(query_string.as_bytes()) {
            grouped.entry(key.into_owned()).or_default().push(text_to_value(&value));
        }
        let map = grouped
            .into_iter()
            .map(|(key, mut values)| {
                let value = if values.len() == 1 {
                    values.remove(0)
                } else {
                    Value::Array(values)
                };
                (key, value)
            })
            .collect();
        Self(map)
    }
}

impl FromIterator<(String, Value)> for SerializedQuery {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for SerializedQuery {
    type Item = (String, Value);
    type IntoIter = std::collections::btree_map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl From<SerializedQuery> for Value {
    fn from(query: SerializedQuery) -> Self {
        Value::Object(query.0.into_iter().collect())
    }
}

pub(crate) fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn value_to_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Object(_) | Value::Array(_) => Some(value.to_string()),
        other => scalar_to_string(other),
    }
}

fn text_to_value(text: &str) -> Value {
    if text.starts_with('{') && text.ends_with('}') {
        if let Ok(value @ Value::Object(_)) = serde_json::from_str::<Value>(text) {
            return value;
        }
    }
    Value::String(text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn arrays_repeat_the_key() {
        let mut q = SerializedQuery::new();
        q.insert("orgUuid", json!(["a", "b"]));
        assert_eq!(q.to_query_string(), "orgUuid=a&orgUuid=b");

        let back = SerializedQuery::from_query_string("orgUuid=a&orgUuid=b");
        assert_eq!(back.get_string_list("orgUuid"), vec!["a", "b"]);
    }

    #[test]
    fn nested_objects_are_json_encoded() {
        let mut q = SerializedQuery::new();
        q.insert("assessment", json!({"key": "fitness", "filters": {"q1": "good"}}));
        let encoded = q.to_query_string();
        let back = SerializedQuery::from_query_string(&encoded);
        assert_eq!(back.get("assessment"), q.get("assessment"));
    }

    #[test]
    fn broken_json_stays_a_string() {
        let back = SerializedQuery::from_query_string("?text=%7Bnot+json%7D");
        assert_eq!(back.get_str("text").as_deref(), Some("{not json}"));
    }

    #[test]
    fn scalars_read_back_as_strings() {
        let back = SerializedQuery::from_query_string("isUser=true&engagementDateStart=-86400000");
        assert_eq!(back.get_str("isUser").as_deref(), Some("true"));
        assert_eq!(back.get_i64("engagementDateStart"), Some(-86_400_000));
    }

    #[test]
    fn nulls_are_skipped() {
        let mut q = SerializedQuery::new();
        q.insert("status", Value::Null);
        q.insert("text", "hq");
        assert_eq!(q.to_query_string(), "text=hq");
    }
}
