//! Date range filter with absolute and relative modes.
//!
//! A range owns `<key>Start` and `<key>End`. Absolute bounds are `YYYY-MM-DD`
//! dates; relative bounds are millisecond offsets from now, negative on the
//! start key and positive on the end key. The mode is never stored: it follows
//! from which keys are present and what they hold.

use std::rc::Rc;

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

use super::{FilterCodec, Rehydration};
use crate::query_service::QueryService;
use crate::search_query::SerializedQuery;

pub const LAST_DAY: i64 = -24 * 60 * 60 * 1000;
pub const LAST_WEEK: i64 = 7 * LAST_DAY;
pub const LAST_MONTH: i64 = 30 * LAST_DAY;
pub const NEXT_DAY: i64 = -LAST_DAY;
pub const NEXT_WEEK: i64 = -LAST_WEEK;
pub const NEXT_MONTH: i64 = -LAST_MONTH;

/// Offsets beyond this many milliseconds are absolute epoch times.
pub const MAX_RELATIVE_TIME: i64 = 999 * NEXT_DAY;
pub const MAX_DAYS: u32 = 999;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RangeType {
    Between,
    Before,
    After,
    On,
    LastDay,
    LastWeek,
    LastMonth,
    LastXDays,
    NextDay,
    NextWeek,
    NextMonth,
    NextXDays,
}

impl RangeType {
    pub const ALL: [RangeType; 12] = [
        RangeType::Between,
        RangeType::Before,
        RangeType::After,
        RangeType::On,
        RangeType::LastDay,
        RangeType::LastWeek,
        RangeType::LastMonth,
        RangeType::LastXDays,
        RangeType::NextDay,
        RangeType::NextWeek,
        RangeType::NextMonth,
        RangeType::NextXDays,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            RangeType::Between => "Between",
            RangeType::Before => "Before",
            RangeType::After => "After",
            RangeType::On => "On",
            RangeType::LastDay => "Last 24 hours",
            RangeType::LastWeek => "Last 7 days",
            RangeType::LastMonth => "Last 30 days",
            RangeType::LastXDays => "Last X days",
            RangeType::NextDay => "Next 24 hours",
            RangeType::NextWeek => "Next 7 days",
            RangeType::NextMonth => "Next 30 days",
            RangeType::NextXDays => "Next X days",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RangeType::Between => "between",
            RangeType::Before => "before",
            RangeType::After => "after",
            RangeType::On => "on",
            RangeType::LastDay => "last-day",
            RangeType::LastWeek => "last-week",
            RangeType::LastMonth => "last-month",
            RangeType::LastXDays => "last-x-days",
            RangeType::NextDay => "next-day",
            RangeType::NextWeek => "next-week",
            RangeType::NextMonth => "next-month",
            RangeType::NextXDays => "next-x-days",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.as_str() == s)
    }

    /// Shows a start date picker.
    pub fn uses_start(&self) -> bool {
        matches!(self, RangeType::Between | RangeType::After | RangeType::On)
    }

    /// Shows an end date picker.
    pub fn uses_end(&self) -> bool {
        matches!(self, RangeType::Between | RangeType::Before)
    }

    pub fn uses_days(&self) -> bool {
        matches!(self, RangeType::LastXDays | RangeType::NextXDays)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRangeValue {
    pub relative: RangeType,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub days: Option<u32>,
}

impl Default for DateRangeValue {
    fn default() -> Self {
        Self { relative: RangeType::Between, start: None, end: None, days: None }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DateRangeFilter {
    pub query_key: String,
    /// Restricts the edit surface to `between`.
    pub only_between: bool,
    /// `chrono` format used by the summary.
    pub display_format: String,
}

impl DateRangeFilter {
    pub fn new(query_key: impl Into<String>) -> Self {
        Self { query_key: query_key.into(), only_between: false, display_format: "%d %B %Y".to_string() }
    }

    pub fn only_between(mut self) -> Self {
        self.only_between = true;
        self
    }

    pub fn with_display_format(mut self, format: impl Into<String>) -> Self {
        self.display_format = format.into();
        self
    }

    pub fn start_key(&self) -> String {
        format!("{}Start", self.query_key)
    }

    pub fn end_key(&self) -> String {
        format!("{}End", self.query_key)
    }

    fn format_date(&self, date: Option<NaiveDate>) -> String {
        date.map(|d| d.format(&self.display_format).to_string()).unwrap_or_default()
    }
}

/// One bound as read from the query.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Bound {
    Date(NaiveDate),
    Relative(RangeType, Option<u32>),
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw.get(..10).unwrap_or(raw), DATE_FORMAT).ok()
}

fn days_in(offset: i64, unit: i64) -> Option<u32> {
    let days = (offset as f64 / unit as f64).round() as i64;
    (1..=MAX_DAYS as i64).contains(&days).then_some(days as u32)
}

fn read_bound(raw: &str, is_start: bool) -> Option<Bound> {
    let Ok(offset) = raw.trim().parse::<i64>() else {
        return parse_date(raw).map(Bound::Date);
    };
    if offset.unsigned_abs() > MAX_RELATIVE_TIME.unsigned_abs() {
        return DateTime::from_timestamp_millis(offset).map(|dt| Bound::Date(dt.date_naive()));
    }
    let bound = match (is_start, offset) {
        (true, LAST_DAY) => Bound::Relative(RangeType::LastDay, None),
        (true, LAST_WEEK) => Bound::Relative(RangeType::LastWeek, None),
        (true, LAST_MONTH) => Bound::Relative(RangeType::LastMonth, None),
        (true, o) if o < 0 => Bound::Relative(RangeType::LastXDays, Some(days_in(o, LAST_DAY)?)),
        (false, NEXT_DAY) => Bound::Relative(RangeType::NextDay, None),
        (false, NEXT_WEEK) => Bound::Relative(RangeType::NextWeek, None),
        (false, NEXT_MONTH) => Bound::Relative(RangeType::NextMonth, None),
        (false, o) if o > 0 => Bound::Relative(RangeType::NextXDays, Some(days_in(o, NEXT_DAY)?)),
        _ => return None,
    };
    Some(bound)
}

impl FilterCodec for DateRangeFilter {
    type Value = DateRangeValue;

    fn query_keys(&self) -> Vec<String> {
        vec![self.start_key(), self.end_key()]
    }

    fn default_value(&self) -> DateRangeValue {
        DateRangeValue::default()
    }

    fn to_query(&self, value: &DateRangeValue) -> SerializedQuery {
        let mut query = SerializedQuery::new();
        let date = |d: NaiveDate| d.format(DATE_FORMAT).to_string();
        let days = value.days.filter(|d| (1..=MAX_DAYS).contains(d)).map(i64::from);
        match value.relative {
            RangeType::Between => {
                if let Some(start) = value.start {
                    query.insert(self.start_key(), date(start));
                }
                if let Some(end) = value.end {
                    query.insert(self.end_key(), date(end));
                }
            }
            RangeType::Before => {
                if let Some(end) = value.end {
                    query.insert(self.end_key(), date(end));
                }
            }
            RangeType::After => {
                if let Some(start) = value.start {
                    query.insert(self.start_key(), date(start));
                }
            }
            RangeType::On => {
                if let Some(start) = value.start {
                    query.insert(self.start_key(), date(start));
                    query.insert(self.end_key(), date(start));
                }
            }
            RangeType::LastDay => query.insert(self.start_key(), LAST_DAY),
            RangeType::LastWeek => query.insert(self.start_key(), LAST_WEEK),
            RangeType::LastMonth => query.insert(self.start_key(), LAST_MONTH),
            RangeType::LastXDays => {
                if let Some(days) = days {
                    query.insert(self.start_key(), days * LAST_DAY);
                }
            }
            RangeType::NextDay => query.insert(self.end_key(), NEXT_DAY),
            RangeType::NextWeek => query.insert(self.end_key(), NEXT_WEEK),
            RangeType::NextMonth => query.insert(self.end_key(), NEXT_MONTH),
            RangeType::NextXDays => {
                if let Some(days) = days {
                    query.insert(self.end_key(), days * NEXT_DAY);
                }
            }
        }
        query
    }

    fn deserialize(
        &self,
        query: &SerializedQuery,
        _service: &Rc<dyn QueryService>,
    ) -> Rehydration<DateRangeValue> {
        let start = query.get_str(&self.start_key()).and_then(|raw| read_bound(&raw, true));
        let end = query.get_str(&self.end_key()).and_then(|raw| read_bound(&raw, false));
        let mut value = DateRangeValue::default();
        match (start, end) {
            (None, None) => return Rehydration::Absent,
            (_, Some(Bound::Relative(relative, days))) | (Some(Bound::Relative(relative, days)), _) => {
                value.relative = relative;
                value.days = days;
            }
            (Some(Bound::Date(s)), Some(Bound::Date(e))) => {
                value.relative = if s == e { RangeType::On } else { RangeType::Between };
                value.start = Some(s);
                value.end = (s != e).then_some(e);
            }
            (Some(Bound::Date(s)), None) => {
                value.relative = RangeType::After;
                value.start = Some(s);
            }
            (None, Some(Bound::Date(e))) => {
                value.relative = RangeType::Before;
                value.end = Some(e);
            }
        }
        Rehydration::Ready(value)
    }

    fn display(&self, value: &DateRangeValue) -> String {
        let plural = |days: Option<u32>| if days == Some(1) { "day" } else { "days" };
        let days_text = value.days.map(|d| d.to_string()).unwrap_or_else(|| "?".to_string());
        match value.relative {
            RangeType::LastXDays => format!("Last {} {}", days_text, plural(value.days)),
            RangeType::NextXDays => format!("Next {} {}", days_text, plural(value.days)),
            relative if relative.uses_start() || relative.uses_end() => {
                let mut text = format!("{} ", relative.label());
                if relative.uses_start() {
                    text.push_str(&self.format_date(value.start));
                }
                if relative == RangeType::Between && (value.start.is_some() || value.end.is_some()) {
                    text.push_str(" and ");
                }
                if relative.uses_end() {
                    text.push_str(&self.format_date(value.end));
                }
                text
            }
            relative => relative.label().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query_service::QueryService;
    use futures::future::LocalBoxFuture;
    use serde_json::{Value, json};

    struct NoService;

    impl QueryService for NoService {
        fn query(&self, name: &str, _variables: Value) -> LocalBoxFuture<'static, anyhow::Result<Value>> {
            panic!("date ranges never look anything up, asked for {}", name)
        }
    }

    fn rehydrate(filter: &DateRangeFilter, query: SerializedQuery) -> Option<DateRangeValue> {
        let service: Rc<dyn QueryService> = Rc::new(NoService);
        match filter.deserialize(&query, &service) {
            Rehydration::Ready(v) => Some(v),
            Rehydration::Absent => None,
            Rehydration::Pending(_) => panic!("date range must resolve synchronously"),
        }
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn default_value_displays_without_dates() {
        let filter = DateRangeFilter::new("engagementDate");
        let value = filter.default_value();
        assert_eq!(value, DateRangeValue { relative: RangeType::Between, start: None, end: None, days: None });
        assert_eq!(filter.display(&value), "Between ");
        assert!(filter.to_query(&value).is_empty());
    }

    #[test]
    fn relative_mode_collapses_into_start_key() {
        let filter = DateRangeFilter::new("engagementDate");
        let value = DateRangeValue { relative: RangeType::LastWeek, ..Default::default() };
        let query = filter.to_query(&value);
        assert_eq!(query.get("engagementDateStart"), Some(&json!(LAST_WEEK)));
        assert!(!query.contains_key("engagementDateEnd"));
        assert_eq!(rehydrate(&filter, query), Some(value));
    }

    #[test]
    fn relative_offsets_from_a_url_are_strings() {
        let filter = DateRangeFilter::new("createdAt");
        let query = SerializedQuery::from_query_string("createdAtStart=-864000000");
        let value = rehydrate(&filter, query).unwrap();
        assert_eq!(value.relative, RangeType::LastXDays);
        assert_eq!(value.days, Some(10));
        assert_eq!(filter.display(&value), "Last 10 days");
    }

    #[test]
    fn mode_follows_present_keys() {
        let filter = DateRangeFilter::new("releasedAt");
        let mut query = SerializedQuery::new();
        query.insert("releasedAtEnd", "2024-03-01");
        let value = rehydrate(&filter, query).unwrap();
        assert_eq!(value.relative, RangeType::Before);
        assert_eq!(value.end, Some(ymd(2024, 3, 1)));

        let mut query = SerializedQuery::new();
        query.insert("releasedAtStart", "2024-03-01");
        query.insert("releasedAtEnd", "2024-03-01");
        let value = rehydrate(&filter, query).unwrap();
        assert_eq!(value.relative, RangeType::On);
        assert_eq!(filter.display(&value), "On 01 March 2024");
    }

    #[test]
    fn absolute_epoch_millis_are_dates() {
        let filter = DateRangeFilter::new("updatedAt");
        let mut query = SerializedQuery::new();
        query.insert("updatedAtStart", 1_704_067_200_000_i64);
        let value = rehydrate(&filter, query).unwrap();
        assert_eq!(value.relative, RangeType::After);
        assert_eq!(value.start, Some(ymd(2024, 1, 1)));
    }

    #[test]
    fn out_of_range_millis_read_as_not_set() {
        let filter = DateRangeFilter::new("engagementDate");
        let query = SerializedQuery::from_query_string("engagementDateStart=-9223372036854775808");
        assert_eq!(rehydrate(&filter, query), None);
        let query = SerializedQuery::from_query_string(&format!("engagementDateEnd={}", i64::MAX));
        assert_eq!(rehydrate(&filter, query), None);

        let query = SerializedQuery::from_query_string(&format!(
            "engagementDateStart={}&engagementDateEnd=2024-05-01",
            i64::MIN
        ));
        let value = rehydrate(&filter, query).unwrap();
        assert_eq!(value.relative, RangeType::Before);
        assert_eq!(value.end, Some(ymd(2024, 5, 1)));
    }

    #[test]
    fn other_keys_mean_absent() {
        let filter = DateRangeFilter::new("engagementDate");
        let mut query = SerializedQuery::new();
        query.insert("createdAtStart", "2024-01-01");
        assert_eq!(rehydrate(&filter, query), None);
    }

    #[test]
    fn between_display() {
        let filter = DateRangeFilter::new("engagementDate").with_display_format("%Y-%m-%d");
        let value = DateRangeValue {
            relative: RangeType::Between,
            start: Some(ymd(2024, 1, 1)),
            end: Some(ymd(2024, 2, 1)),
            days: None,
        };
        assert_eq!(filter.display(&value), "Between 2024-01-01 and 2024-02-01");
    }
}
