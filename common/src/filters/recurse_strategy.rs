use serde::{Deserialize, Serialize};

use crate::search_query::SerializedQuery;

/// Whether a hierarchical filter also matches descendants or ancestors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecurseStrategy {
    #[default]
    None,
    Children,
    Parents,
}

impl RecurseStrategy {
    pub const ALL: [RecurseStrategy; 3] =
        [RecurseStrategy::None, RecurseStrategy::Children, RecurseStrategy::Parents];

    pub fn as_str(&self) -> &'static str {
        match self {
            RecurseStrategy::None => "NONE",
            RecurseStrategy::Children => "CHILDREN",
            RecurseStrategy::Parents => "PARENTS",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.as_str().eq_ignore_ascii_case(s.trim()))
    }

    pub fn label(&self) -> &'static str {
        match self {
            RecurseStrategy::None => "exactly",
            RecurseStrategy::Children => "and children",
            RecurseStrategy::Parents => "and parents",
        }
    }
}

/// Recursion settings of a hierarchical filter.
///
/// A fixed strategy is hidden from the user and never serialized; otherwise the
/// strategy is user-selectable and always written next to the selection.
#[derive(Debug, Clone, PartialEq)]
pub struct Recursion {
    pub query_key: String,
    pub fixed: Option<RecurseStrategy>,
}

impl Recursion {
    pub fn fixed(query_key: impl Into<String>, strategy: RecurseStrategy) -> Self {
        Self { query_key: query_key.into(), fixed: Some(strategy) }
    }

    pub fn selectable(query_key: impl Into<String>) -> Self {
        Self { query_key: query_key.into(), fixed: None }
    }

    pub fn is_selectable(&self) -> bool {
        self.fixed.is_none()
    }

    pub(crate) fn initial(&self) -> RecurseStrategy {
        self.fixed.unwrap_or_default()
    }

    pub(crate) fn write(&self, strategy: RecurseStrategy, query: &mut SerializedQuery) {
        if self.is_selectable() {
            query.insert(self.query_key.clone(), strategy.as_str());
        }
    }

    pub(crate) fn read(&self, query: &SerializedQuery) -> RecurseStrategy {
        match self.fixed {
            Some(fixed) => fixed,
            None => query
                .get_str(&self.query_key)
                .and_then(|s| RecurseStrategy::parse(&s))
                .unwrap_or_default(),
        }
    }

    /// Summary suffix, only shown when the user picked a strategy.
    pub(crate) fn describe(&self, strategy: RecurseStrategy) -> Option<&'static str> {
        (self.is_selectable() && strategy != RecurseStrategy::None).then(|| strategy.label())
    }
}
