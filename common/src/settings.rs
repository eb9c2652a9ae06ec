//! Dictionary-driven settings consumed by the filter registrations.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::filters::assessment_filter::AssessmentSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchSettings {
    /// chrono format used by date-range summaries.
    pub date_format: String,
    pub email_networks: Vec<String>,
    pub ranks: Vec<String>,
    /// Classification value to its label.
    pub classifications: BTreeMap<String, String>,
    pub task_short_label: String,
    pub mime_types: Vec<String>,
    /// Assessment schemas keyed by entity type, e.g. `regular.person`.
    pub assessments: BTreeMap<String, AssessmentSchema>,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            date_format: "%d %B %Y".to_string(),
            email_networks: vec!["Internet".to_string(), "NS".to_string()],
            ranks: ["CIV", "CTR", "OR-1", "OR-5", "OR-9", "OF-1", "OF-5", "OF-9"]
                .into_iter()
                .map(String::from)
                .collect(),
            classifications: BTreeMap::new(),
            task_short_label: "Objective / Effort".to_string(),
            mime_types: ["application/pdf", "image/jpeg", "image/png", "text/plain"]
                .into_iter()
                .map(String::from)
                .collect(),
            assessments: BTreeMap::new(),
        }
    }
}

impl SearchSettings {
    pub fn from_json(text: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn assessments_for(&self, object_type: &str) -> AssessmentSchema {
        self.assessments.get(object_type).cloned().unwrap_or_default()
    }

    /// Classification options led by an explicit "no classification" choice.
    pub fn classification_choices(&self) -> (Vec<String>, Vec<String>) {
        let mut options = vec![String::new()];
        let mut labels = vec!["<none>".to_string()];
        for (value, label) in &self.classifications {
            options.push(value.clone());
            labels.push(label.clone());
        }
        (options, labels)
    }
}
