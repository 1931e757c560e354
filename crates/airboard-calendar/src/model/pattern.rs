use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::null_as_default;
use crate::error::{CalendarError, CalendarResult};

/// Format of the calendar dates stored in rules and exception lists.
pub(crate) const CALENDAR_DATE_FORMAT: &str = "%Y-%m-%d";

/// ## Summary
/// Unit a recurrence rule steps in.
///
/// Any tag this portal does not know decodes to `Unknown`, which steps one
/// day at a time instead of failing the whole rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecurrenceType {
    Daily,
    Weekly,
    Monthly,
    Yearly,
    #[default]
    #[serde(other)]
    Unknown,
}

/// How a rule says it terminates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndType {
    OnDate,
    AfterCount,
    #[default]
    #[serde(other)]
    Never,
}

/// ## Summary
/// Decoded form of an event's `recurrence_rule` column.
///
/// Field names follow the portal's snake_case JSON; the camelCase spellings
/// some clients send are accepted as aliases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecurrencePattern {
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub recurrence_type: RecurrenceType,

    /// Step size in the rule's unit. Values below one are stepped as one.
    #[serde(deserialize_with = "null_as_default")]
    pub interval: i64,

    /// Weekday indices, 0 = Sunday through 6 = Saturday. Weekly rules only.
    #[serde(alias = "daysOfWeek", deserialize_with = "null_as_default")]
    pub days_of_week: Vec<i32>,

    /// Day of month forced on each monthly step; 0 keeps the rolling day.
    #[serde(alias = "dayOfMonth", deserialize_with = "null_as_default")]
    pub day_of_month: i32,

    #[serde(alias = "endType", deserialize_with = "null_as_default")]
    pub end_type: EndType,

    /// `YYYY-MM-DD`, read only when `end_type` is `on_date`.
    #[serde(alias = "endDate")]
    pub end_date: Option<String>,

    /// Cap on generated occurrences; 0 means no cap of its own.
    #[serde(alias = "occurrenceCount", deserialize_with = "null_as_default")]
    pub occurrence_count: i64,
}

impl Default for RecurrencePattern {
    fn default() -> Self {
        Self {
            recurrence_type: RecurrenceType::default(),
            interval: 1,
            days_of_week: Vec::new(),
            day_of_month: 0,
            end_type: EndType::default(),
            end_date: None,
            occurrence_count: 0,
        }
    }
}

impl RecurrencePattern {
    fn with_type(recurrence_type: RecurrenceType, interval: i64) -> Self {
        Self {
            recurrence_type,
            interval,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn daily(interval: i64) -> Self {
        Self::with_type(RecurrenceType::Daily, interval)
    }

    #[must_use]
    pub fn weekly(interval: i64) -> Self {
        Self::with_type(RecurrenceType::Weekly, interval)
    }

    #[must_use]
    pub fn monthly(interval: i64) -> Self {
        Self::with_type(RecurrenceType::Monthly, interval)
    }

    #[must_use]
    pub fn yearly(interval: i64) -> Self {
        Self::with_type(RecurrenceType::Yearly, interval)
    }

    /// Sets the weekdays (0 = Sunday) a weekly rule lands on.
    #[must_use]
    pub fn with_days_of_week(mut self, days: Vec<i32>) -> Self {
        self.days_of_week = days;
        self
    }

    #[must_use]
    pub fn with_day_of_month(mut self, day: i32) -> Self {
        self.day_of_month = day;
        self
    }

    /// Ends the rule on the given `YYYY-MM-DD` date.
    #[must_use]
    pub fn ending_on(mut self, date: impl Into<String>) -> Self {
        self.end_type = EndType::OnDate;
        self.end_date = Some(date.into());
        self
    }

    /// Ends the rule after `count` occurrences.
    #[must_use]
    pub fn with_count(mut self, count: i64) -> Self {
        self.end_type = EndType::AfterCount;
        self.occurrence_count = count;
        self
    }

    /// ## Summary
    /// Decodes a rule from the JSON text stored on an event.
    ///
    /// A literal `null` decodes to the default rule, stepping daily.
    ///
    /// ## Errors
    /// Returns `CalendarError::RuleDecode` if the text is not a JSON object
    /// of the expected shape.
    pub fn from_rule(rule: &str) -> CalendarResult<Self> {
        serde_json::from_str::<Option<Self>>(rule)
            .map(Option::unwrap_or_default)
            .map_err(CalendarError::RuleDecode)
    }

    /// ## Summary
    /// Encodes the rule back into the JSON text stored on an event.
    ///
    /// ## Errors
    /// Returns `CalendarError::RuleDecode` if serialization fails.
    pub fn to_rule(&self) -> CalendarResult<String> {
        serde_json::to_string(self).map_err(CalendarError::RuleDecode)
    }

    /// Interval actually stepped: anything below one counts as one.
    #[must_use]
    pub fn effective_interval(&self) -> i64 {
        self.interval.max(1)
    }

    /// ## Summary
    /// Number of occurrences a walk may generate, given the hard cap.
    ///
    /// A positive `occurrence_count` is honored up to `cap`; otherwise `cap`
    /// itself applies.
    #[must_use]
    pub fn occurrence_limit(&self, cap: u32) -> u32 {
        if self.occurrence_count > 0 {
            u32::try_from(self.occurrence_count).map_or(cap, |count| count.min(cap))
        } else {
            cap
        }
    }

    /// ## Summary
    /// Returns the rule's own end date when it ends `on_date`.
    ///
    /// ## Errors
    /// Returns `CalendarError::EndDate` if the stored date is not `YYYY-MM-DD`.
    pub fn end_date(&self) -> CalendarResult<Option<NaiveDate>> {
        match (&self.end_type, &self.end_date) {
            (EndType::OnDate, Some(value)) => NaiveDate::parse_from_str(value, CALENDAR_DATE_FORMAT)
                .map(Some)
                .map_err(|source| CalendarError::EndDate {
                    value: value.clone(),
                    source,
                }),
            _ => Ok(None),
        }
    }
}
