//! Wall-clock handling for events kept in a named zone.

use chrono::{DateTime, NaiveDateTime, Offset, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;

/// Resolves an event's zone name, falling back to `default` when the name is
/// absent or unknown.
pub(crate) fn resolve(name: Option<&str>, default: Tz) -> Tz {
    match name.map(str::trim).filter(|name| !name.is_empty()) {
        Some(name) => name.parse::<Tz>().unwrap_or_else(|_err| {
            tracing::debug!(timezone = %name, fallback = %default, "Unknown event timezone");
            default
        }),
        None => default,
    }
}

/// Wall-clock time of `instant` in `tz`.
pub(crate) fn to_local(instant: DateTime<Utc>, tz: Tz) -> NaiveDateTime {
    instant.with_timezone(&tz).naive_local()
}

/// ## Summary
/// Maps a wall-clock time in `tz` back to an instant.
///
/// An ambiguous time (clocks going back) takes the earlier instant. A time
/// skipped by clocks going forward is read with the offset in effect before
/// the jump, so it lands past the gap by the same distance it had into it,
/// whatever the gap's length.
pub(crate) fn to_utc(local: NaiveDateTime, tz: Tz) -> Option<DateTime<Utc>> {
    if let Some(instant) = tz.from_local_datetime(&local).earliest() {
        return Some(instant.with_timezone(&Utc));
    }

    // No zone has two transitions within a day.
    let before = local.checked_sub_signed(TimeDelta::days(1))?;
    let offset = tz.offset_from_utc_datetime(&before).fix();
    let naive_utc =
        local.checked_sub_signed(TimeDelta::seconds(i64::from(offset.local_minus_utc())))?;

    Some(naive_utc.and_utc())
}
