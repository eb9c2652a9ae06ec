use serde::{Deserialize, Serialize};

/// Entity kind a search can be restricted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SearchObjectType {
    Reports,
    People,
    Organizations,
    Positions,
    Locations,
    Tasks,
    Events,
}

impl SearchObjectType {
    pub const ALL: [SearchObjectType; 7] = [
        SearchObjectType::Reports,
        SearchObjectType::People,
        SearchObjectType::Organizations,
        SearchObjectType::Positions,
        SearchObjectType::Locations,
        SearchObjectType::Tasks,
        SearchObjectType::Events,
    ];

    /// Value carried by the `objectType` key of a shareable query.
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchObjectType::Reports => "REPORTS",
            SearchObjectType::People => "PEOPLE",
            SearchObjectType::Organizations => "ORGANIZATIONS",
            SearchObjectType::Positions => "POSITIONS",
            SearchObjectType::Locations => "LOCATIONS",
            SearchObjectType::Tasks => "TASKS",
            SearchObjectType::Events => "EVENTS",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == s)
    }

    pub fn label(&self) -> &'static str {
        match self {
            SearchObjectType::Reports => "Reports",
            SearchObjectType::People => "People",
            SearchObjectType::Organizations => "Organizations",
            SearchObjectType::Positions => "Positions",
            SearchObjectType::Locations => "Locations",
            SearchObjectType::Tasks => "Tasks",
            SearchObjectType::Events => "Events",
        }
    }

    /// Paginated list query of the remote service.
    pub fn list_query_name(&self) -> &'static str {
        match self {
            SearchObjectType::Reports => "reportList",
            SearchObjectType::People => "personList",
            SearchObjectType::Organizations => "organizationList",
            SearchObjectType::Positions => "positionList",
            SearchObjectType::Locations => "locationList",
            SearchObjectType::Tasks => "taskList",
            SearchObjectType::Events => "eventList",
        }
    }
}

impl std::fmt::Display for SearchObjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_parse_back() {
        for t in SearchObjectType::ALL {
            assert_eq!(SearchObjectType::parse(t.as_str()), Some(t));
            assert_eq!(serde_json::to_value(t).unwrap(), serde_json::json!(t.as_str()));
        }
        assert_eq!(SearchObjectType::parse("AUTHORIZATION_GROUPS"), None);
    }
}
