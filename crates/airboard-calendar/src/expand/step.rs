//! Per-rule stepping on local wall-clock time.

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime};

use crate::model::{RecurrencePattern, RecurrenceType};

/// ## Summary
/// Computes the occurrence following `current` under `pattern`.
///
/// Time of day is preserved; only monthly rules with a fixed day of month
/// rewrite the day. Returns `None` when the next date is not representable,
/// which ends the walk.
#[must_use]
pub fn next_occurrence(current: NaiveDateTime, pattern: &RecurrencePattern) -> Option<NaiveDateTime> {
    let interval = pattern.effective_interval();

    match pattern.recurrence_type {
        RecurrenceType::Daily => add_days(current, interval),
        RecurrenceType::Weekly => next_weekly(current, &pattern.days_of_week, interval),
        RecurrenceType::Monthly => next_monthly(current, pattern.day_of_month, interval),
        RecurrenceType::Yearly => add_months_rollover(current, interval.checked_mul(12)?),
        RecurrenceType::Unknown => add_days(current, 1),
    }
}

fn add_days(current: NaiveDateTime, days: i64) -> Option<NaiveDateTime> {
    current.checked_add_days(Days::new(u64::try_from(days).ok()?))
}

/// Whether `dt` falls on one of the Sunday-based weekday indices.
fn on_listed_weekday(dt: NaiveDateTime, days_of_week: &[i32]) -> bool {
    let weekday = dt.weekday().num_days_from_sunday();
    days_of_week
        .iter()
        .any(|&day| u32::try_from(day).is_ok_and(|day| day == weekday))
}

/// ## Summary
/// Weekly step with explicit weekdays.
///
/// Scans forward day by day for a listed weekday whose distance from
/// `current` in whole weeks is either zero or at least `interval`. Matches in
/// week zero are always taken, so every listed day of the current week is
/// emitted before interval skipping applies. The scan covers at most
/// `14 * interval` days, then falls back to `current + 7 * interval` days.
fn next_weekly(current: NaiveDateTime, days_of_week: &[i32], interval: i64) -> Option<NaiveDateTime> {
    let week_step = interval.checked_mul(7)?;

    // Unlisted or out-of-range weekdays can never match; the scan would end
    // in the fallback anyway.
    if !days_of_week.iter().any(|day| (0..=6).contains(day)) {
        return add_days(current, week_step);
    }

    let max_days = week_step.checked_mul(2)?;
    let mut offset: i64 = 1;
    while offset <= max_days {
        let weeks_elapsed = offset / 7;
        if weeks_elapsed != 0 && weeks_elapsed < interval {
            // Nothing before `interval` whole weeks can qualify.
            offset = week_step;
            continue;
        }

        let next = add_days(current, offset)?;
        if on_listed_weekday(next, days_of_week) {
            return Some(next);
        }
        offset += 1;
    }

    add_days(current, week_step)
}

/// ## Summary
/// Monthly step.
///
/// Without a fixed day the rolling day is kept, overflowing into the next
/// month when the target month is shorter. With a fixed day the target month
/// is `interval` months on and the day is clamped to that month's length.
fn next_monthly(current: NaiveDateTime, day_of_month: i32, interval: i64) -> Option<NaiveDateTime> {
    let Ok(day) = u32::try_from(day_of_month) else {
        return add_months_rollover(current, interval);
    };
    if day == 0 {
        return add_months_rollover(current, interval);
    }

    let (year, month) = shift_month(current.date(), interval)?;
    let day = day.min(days_in_month(year, month)?);

    NaiveDate::from_ymd_opt(year, month, day).map(|date| date.and_time(current.time()))
}

/// Year and month `months` after the month of `date`.
fn shift_month(date: NaiveDate, months: i64) -> Option<(i32, u32)> {
    let total = i64::from(date.year())
        .checked_mul(12)?
        .checked_add(i64::from(date.month0()))?
        .checked_add(months)?;
    let year = i32::try_from(total.div_euclid(12)).ok()?;
    let month = u32::try_from(total.rem_euclid(12)).ok()? + 1;
    Some((year, month))
}

/// ## Summary
/// Adds calendar months keeping the day number, normalizing overflow.
///
/// A day past the end of the target month rolls into the following month:
/// Jan 31 plus one month is Mar 2 in a leap year and Mar 3 otherwise, and
/// Feb 29 plus a year is Mar 1.
fn add_months_rollover(current: NaiveDateTime, months: i64) -> Option<NaiveDateTime> {
    let (year, month) = shift_month(current.date(), months)?;
    NaiveDate::from_ymd_opt(year, month, 1)?
        .checked_add_days(Days::new(u64::from(current.day0())))
        .map(|date| date.and_time(current.time()))
}

/// Returns the number of days in a month.
fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first_of_next = if month == 12 {
        NaiveDate::from_ymd_opt(year.checked_add(1)?, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    first_of_next.pred_opt().map(|last| last.day())
}
