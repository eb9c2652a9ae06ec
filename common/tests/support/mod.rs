//! Scripted remote query service for headless search tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;
use std::time::Duration;

use common::query_service::QueryService;
use futures::future::{FutureExt, LocalBoxFuture};
use serde_json::{Value, json};

#[derive(Default)]
pub struct MockQueryService {
    names: HashMap<String, String>,
    delays: HashMap<String, Duration>,
    failing: HashSet<String>,
    calls: RefCell<Vec<(String, Value)>>,
}

impl MockQueryService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Known entity, whatever its kind.
    pub fn with_entity(mut self, uuid: &str, name: &str) -> Self {
        self.names.insert(uuid.to_string(), name.to_string());
        self
    }

    /// Lookups including `uuid` answer after `millis`.
    pub fn with_delay(mut self, uuid: &str, millis: u64) -> Self {
        self.delays.insert(uuid.to_string(), Duration::from_millis(millis));
        self
    }

    /// Every call to the named query fails.
    pub fn failing(mut self, query_name: &str) -> Self {
        self.failing.insert(query_name.to_string());
        self
    }

    pub fn calls(&self) -> Vec<(String, Value)> {
        self.calls.borrow().clone()
    }

    pub fn into_service(self) -> (Rc<Self>, Rc<dyn QueryService>) {
        let mock = Rc::new(self);
        let service: Rc<dyn QueryService> = mock.clone();
        (mock, service)
    }
}

impl QueryService for MockQueryService {
    fn query(&self, name: &str, variables: Value) -> LocalBoxFuture<'static, anyhow::Result<Value>> {
        self.calls.borrow_mut().push((name.to_string(), variables.clone()));
        let uuids = variables["uuids"]
            .as_array()
            .map(|items| items.iter().filter_map(Value::as_str).map(String::from).collect::<Vec<_>>())
            .unwrap_or_default();
        let delay = uuids.iter().filter_map(|u| self.delays.get(u)).max().copied();
        let response = uuids
            .iter()
            .map(|u| match self.names.get(u) {
                Some(name) => json!({ "uuid": u, "name": name }),
                None => Value::Null,
            })
            .collect::<Vec<_>>();
        let fails = self.failing.contains(name);
        let name = name.to_string();
        async move {
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            if fails {
                anyhow::bail!("query {} failed", name);
            }
            Ok(Value::Array(response))
        }
        .boxed_local()
    }
}
