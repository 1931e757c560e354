use airboard_core::config::CalendarConfig;
use airboard_core::constants::{DEFAULT_MAX_OCCURRENCES, DEFAULT_SAFETY_HORIZON_YEARS};
use chrono::{DateTime, Months, Utc};
use chrono_tz::Tz;

use crate::error::{CalendarError, CalendarResult};

/// Limits and defaults for recurrence expansion.
#[derive(Debug, Clone)]
pub struct ExpansionOptions {
    /// Occurrences generated per event when its rule has no count, and the
    /// upper bound when it does.
    pub max_occurrences: u32,

    /// A walk stops once it passes `now` plus this many years.
    pub safety_horizon_years: u32,

    /// Zone for events without a (known) zone of their own.
    pub default_timezone: Tz,

    /// Fixed "now"; `None` reads the clock on every expansion.
    pub now: Option<DateTime<Utc>>,
}

impl Default for ExpansionOptions {
    fn default() -> Self {
        Self {
            max_occurrences: DEFAULT_MAX_OCCURRENCES,
            safety_horizon_years: DEFAULT_SAFETY_HORIZON_YEARS,
            default_timezone: Tz::UTC,
            now: None,
        }
    }
}

impl ExpansionOptions {
    /// ## Summary
    /// Builds options from the `[calendar]` section of the settings.
    ///
    /// ## Errors
    /// Returns an error if the limits are invalid or the default timezone is
    /// not a known IANA name.
    pub fn from_config(config: &CalendarConfig) -> CalendarResult<Self> {
        config.validate()?;
        let default_timezone = config
            .default_timezone
            .parse::<Tz>()
            .map_err(|_err| CalendarError::UnknownTimezone(config.default_timezone.clone()))?;

        Ok(Self {
            max_occurrences: config.max_occurrences,
            safety_horizon_years: config.safety_horizon_years,
            default_timezone,
            now: None,
        })
    }

    /// Pins "now", making the safety horizon deterministic.
    #[must_use]
    pub fn with_now(mut self, now: DateTime<Utc>) -> Self {
        self.now = Some(now);
        self
    }

    #[must_use]
    pub fn with_max_occurrences(mut self, max: u32) -> Self {
        self.max_occurrences = max;
        self
    }

    #[must_use]
    pub fn with_safety_horizon_years(mut self, years: u32) -> Self {
        self.safety_horizon_years = years;
        self
    }

    #[must_use]
    pub fn with_default_timezone(mut self, tz: Tz) -> Self {
        self.default_timezone = tz;
        self
    }

    /// Instant past which a walk is abandoned.
    pub(crate) fn safety_limit(&self) -> DateTime<Utc> {
        let now = self.now.unwrap_or_else(Utc::now);
        self.safety_horizon_years
            .checked_mul(12)
            .and_then(|months| now.checked_add_months(Months::new(months)))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }
}
