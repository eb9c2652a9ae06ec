//! Entity-state filter with a reason sub-filter for the terminal state.

use std::rc::Rc;

use serde::Serialize;

use super::{FilterCodec, Rehydration};
use crate::query_service::QueryService;
use crate::search_query::SerializedQuery;

pub const STATE_DRAFT: &str = "DRAFT";
pub const STATE_PENDING_APPROVAL: &str = "PENDING_APPROVAL";
pub const STATE_APPROVED: &str = "APPROVED";
pub const STATE_PUBLISHED: &str = "PUBLISHED";
pub const STATE_CANCELLED: &str = "CANCELLED";
pub const STATE_REJECTED: &str = "REJECTED";

pub fn report_states() -> Vec<(String, String)> {
    [
        (STATE_DRAFT, "Draft"),
        (STATE_PENDING_APPROVAL, "Pending Approval"),
        (STATE_APPROVED, "Approved"),
        (STATE_PUBLISHED, "Published"),
        (STATE_CANCELLED, "Cancelled"),
        (STATE_REJECTED, "Changes requested"),
    ]
    .into_iter()
    .map(|(v, l)| (v.to_string(), l.to_string()))
    .collect()
}

pub fn cancelled_reasons() -> Vec<(String, String)> {
    [
        ("CANCELLED_BY_ADVISOR", "Advisor"),
        ("CANCELLED_BY_INTERLOCUTOR", "Interlocutor"),
        ("CANCELLED_DUE_TO_TRANSPORTATION", "Transportation"),
        ("CANCELLED_DUE_TO_FORCE_PROTECTION", "Force Protection"),
        ("CANCELLED_DUE_TO_ROUTES", "Routes"),
        ("CANCELLED_DUE_TO_THREAT", "Threat"),
        ("CANCELLED_DUE_TO_AVAILABILITY_OF_INTERPRETERS", "Availability of Interpreters"),
        ("CANCELLED_DUE_TO_NETWORK_ISSUES", "Network Issues"),
        ("NO_REASON_GIVEN", "No reason given"),
    ]
    .into_iter()
    .map(|(v, l)| (v.to_string(), l.to_string()))
    .collect()
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ReportStateValue {
    pub state: Vec<String>,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportStateFilter {
    pub query_key: String,
    pub reason_query_key: String,
    /// The only state for which a reason is meaningful.
    pub terminal_state: String,
    pub states: Vec<(String, String)>,
    pub reasons: Vec<(String, String)>,
}

impl ReportStateFilter {
    pub fn new(query_key: impl Into<String>) -> Self {
        Self {
            query_key: query_key.into(),
            reason_query_key: "cancelledReason".to_string(),
            terminal_state: STATE_CANCELLED.to_string(),
            states: report_states(),
            reasons: cancelled_reasons(),
        }
    }

    pub fn with_reason_key(mut self, key: impl Into<String>) -> Self {
        self.reason_query_key = key.into();
        self
    }

    /// The reason sub-filter only shows when exactly the terminal state is selected.
    pub fn reason_applies(&self, value: &ReportStateValue) -> bool {
        value.state.len() == 1 && value.state[0] == self.terminal_state
    }

    fn label<'a>(options: &'a [(String, String)], key: &'a str) -> &'a str {
        options.iter().find(|(v, _)| v == key).map(|(_, l)| l.as_str()).unwrap_or(key)
    }
}

impl FilterCodec for ReportStateFilter {
    type Value = ReportStateValue;

    fn query_keys(&self) -> Vec<String> {
        vec![self.query_key.clone(), self.reason_query_key.clone()]
    }

    fn default_value(&self) -> ReportStateValue {
        ReportStateValue::default()
    }

    fn to_query(&self, value: &ReportStateValue) -> SerializedQuery {
        let mut query = SerializedQuery::new();
        if value.state.is_empty() {
            return query;
        }
        query.insert(self.query_key.clone(), value.state.clone());
        if self.reason_applies(value) {
            if let Some(reason) = value.reason.as_ref().filter(|r| !r.is_empty()) {
                query.insert(self.reason_query_key.clone(), reason.clone());
            }
        }
        query
    }

    fn deserialize(
        &self,
        query: &SerializedQuery,
        _service: &Rc<dyn QueryService>,
    ) -> Rehydration<ReportStateValue> {
        if !query.contains_key(&self.query_key) {
            return Rehydration::Absent;
        }
        let mut value = ReportStateValue { state: query.get_string_list(&self.query_key), reason: None };
        if self.reason_applies(&value) {
            value.reason = query.get_str(&self.reason_query_key).filter(|r| !r.is_empty());
        }
        Rehydration::Ready(value)
    }

    fn display(&self, value: &ReportStateValue) -> String {
        let states = value
            .state
            .iter()
            .map(|s| Self::label(&self.states, s))
            .collect::<Vec<_>>()
            .join(", ");
        match value.reason.as_deref().filter(|_| self.reason_applies(value)) {
            Some(reason) => format!("{} by reason: {}", states, Self::label(&self.reasons, reason)),
            None => states,
        }
    }
}
