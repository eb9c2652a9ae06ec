//! One-line recap of a search, built from each filter's display string.

use serde::Serialize;

use crate::deserialize_registry::AggregateSearchState;
use crate::search_filters::SearchFilters;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterSummary {
    pub label: String,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchDescription {
    pub text: Option<String>,
    /// Object type label, or `Everything`.
    pub object_label: String,
    pub filters: Vec<FilterSummary>,
}

impl SearchDescription {
    /// Slots the search context does not register, and hidden ones, are skipped.
    pub fn new(search_filters: &SearchFilters, state: &AggregateSearchState) -> Self {
        let filters = state
            .filters
            .iter()
            .filter_map(|slot| {
                let definition = search_filters.find(state.object_type, &slot.key)?;
                if definition.spec.is_hidden() {
                    return None;
                }
                Some(FilterSummary { label: slot.key.clone(), summary: definition.spec.display(&slot.value.value) })
            })
            .collect();
        Self {
            text: Some(state.text.clone()).filter(|t| !t.is_empty()),
            object_label: state.object_type.map(|t| t.label()).unwrap_or("Everything").to_string(),
            filters,
        }
    }

    pub fn render(&self, show_text: bool, show_placeholders: bool) -> String {
        let mut out = String::new();
        if show_text {
            out.push_str("Search for ");
            if let Some(text) = &self.text {
                out.push_str(&format!("\"{}\" in ", text));
            }
        }
        out.push_str(&self.object_label);
        if !self.filters.is_empty() {
            let parts = self
                .filters
                .iter()
                .map(|f| format!("{}: {}", f.label, f.summary))
                .collect::<Vec<_>>();
            out.push_str(" filtered on ");
            out.push_str(&parts.join(", "));
        } else if show_placeholders {
            out.push_str(" - add filters");
        }
        out
    }
}

impl std::fmt::Display for SearchDescription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render(true, false))
    }
}
