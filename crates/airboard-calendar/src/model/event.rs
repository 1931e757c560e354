use std::collections::HashSet;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use super::RecurrencePattern;
use crate::error::{CalendarError, CalendarResult};

/// ## Summary
/// An event row as supplied by the event store.
///
/// The recurrence rule and exception list stay in their stored JSON form;
/// see [`Event::pattern`] and [`Event::exceptions`] for the decoded views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub start_date: DateTime<Utc>,
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_all_day: bool,
    /// IANA zone the event's wall-clock time is kept in.
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub category_id: Option<u64>,

    #[serde(default)]
    pub is_recurring: bool,
    #[serde(default)]
    pub recurrence_rule: Option<String>,
    /// Hard stop for generation; wins over the rule's own end date.
    #[serde(default)]
    pub recurrence_end: Option<DateTime<Utc>>,
    /// JSON list of `YYYY-MM-DD` dates whose instance is cancelled.
    #[serde(default)]
    pub recurrence_exceptions: Option<String>,
}

impl Event {
    /// Creates a one-off event starting at `start_date`.
    #[must_use]
    pub fn new(id: u64, title: impl Into<String>, start_date: DateTime<Utc>) -> Self {
        Self {
            id,
            title: title.into(),
            description: None,
            start_date,
            end_date: None,
            is_all_day: false,
            timezone: None,
            location: None,
            color: None,
            category_id: None,
            is_recurring: false,
            recurrence_rule: None,
            recurrence_end: None,
            recurrence_exceptions: None,
        }
    }

    /// ## Summary
    /// Marks the event recurring and stores `pattern` as its rule.
    ///
    /// ## Errors
    /// Returns an error if the pattern cannot be encoded.
    pub fn recurring(mut self, pattern: &RecurrencePattern) -> CalendarResult<Self> {
        self.is_recurring = true;
        self.recurrence_rule = Some(pattern.to_rule()?);
        Ok(self)
    }

    /// Stores the raw rule text as-is, valid or not.
    #[must_use]
    pub fn with_raw_rule(mut self, rule: impl Into<String>) -> Self {
        self.is_recurring = true;
        self.recurrence_rule = Some(rule.into());
        self
    }

    #[must_use]
    pub fn with_end_date(mut self, end_date: DateTime<Utc>) -> Self {
        self.end_date = Some(end_date);
        self
    }

    #[must_use]
    pub fn with_timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timezone = Some(timezone.into());
        self
    }

    #[must_use]
    pub fn with_recurrence_end(mut self, end: DateTime<Utc>) -> Self {
        self.recurrence_end = Some(end);
        self
    }

    /// Stores `dates` (`YYYY-MM-DD`) as the exception list.
    #[must_use]
    pub fn with_exceptions<S: AsRef<str>>(mut self, dates: &[S]) -> Self {
        let dates: Vec<&str> = dates.iter().map(AsRef::as_ref).collect();
        self.recurrence_exceptions = serde_json::to_string(&dates).ok();
        self
    }

    /// Stores the raw exception text as-is, valid or not.
    #[must_use]
    pub fn with_raw_exceptions(mut self, exceptions: impl Into<String>) -> Self {
        self.recurrence_exceptions = Some(exceptions.into());
        self
    }

    /// ## Summary
    /// Decodes the stored recurrence rule.
    ///
    /// ## Errors
    /// Returns `CalendarError::RuleDecode` if the rule is missing or malformed.
    pub fn pattern(&self) -> CalendarResult<RecurrencePattern> {
        RecurrencePattern::from_rule(self.recurrence_rule.as_deref().unwrap_or_default())
    }

    /// ## Summary
    /// Decodes the stored exception list. A missing or empty list is empty.
    ///
    /// ## Errors
    /// Returns `CalendarError::ExceptionDecode` if the list is malformed.
    pub fn exceptions(&self) -> CalendarResult<HashSet<String>> {
        match self.recurrence_exceptions.as_deref() {
            Some(raw) if !raw.trim().is_empty() => decode_exceptions(raw),
            _ => Ok(HashSet::new()),
        }
    }

    /// Length of one occurrence, when the event has a sane end date.
    #[must_use]
    pub fn duration(&self) -> Option<TimeDelta> {
        self.end_date
            .filter(|end| *end >= self.start_date)
            .map(|end| end - self.start_date)
    }
}

/// ## Summary
/// Decodes a JSON list of `YYYY-MM-DD` strings; `null` decodes as empty.
///
/// Entries are kept verbatim and compared as text against each instance's
/// local calendar date.
///
/// ## Errors
/// Returns `CalendarError::ExceptionDecode` if `raw` is not a list of strings.
pub fn decode_exceptions(raw: &str) -> CalendarResult<HashSet<String>> {
    serde_json::from_str::<Option<Vec<String>>>(raw)
        .map(|dates| dates.unwrap_or_default().into_iter().collect())
        .map_err(CalendarError::ExceptionDecode)
}
