//! Scenario tests for recurrence expansion.

use chrono::{DateTime, Datelike, TimeDelta, TimeZone, Timelike, Utc};
use chrono_tz::Tz;

use super::*;
use crate::model::{Event, RecurrencePattern, RecurringEventInstance};

fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
}

fn day(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    utc(y, m, d, 0, 0)
}

fn expander() -> RecurrenceExpander {
    RecurrenceExpander::new(ExpansionOptions::default().with_now(day(2024, 1, 1)))
}

fn recurring(id: u64, start: DateTime<Utc>, pattern: &RecurrencePattern) -> Event {
    Event::new(id, format!("event {id}"), start)
        .recurring(pattern)
        .unwrap()
}

fn dates(instances: &[RecurringEventInstance]) -> Vec<DateTime<Utc>> {
    instances.iter().map(|i| i.instance_date).collect()
}

#[test_log::test]
fn test_weekly_mon_wed_fri_scenario() {
    let event = recurring(
        1,
        utc(2024, 1, 1, 10, 0),
        &RecurrencePattern::weekly(1).with_days_of_week(vec![1, 3, 5]),
    );

    let instances = expander().expand(&[event], day(2024, 1, 1), day(2024, 1, 14));

    assert_eq!(
        dates(&instances),
        vec![
            utc(2024, 1, 1, 10, 0),
            utc(2024, 1, 3, 10, 0),
            utc(2024, 1, 5, 10, 0),
            utc(2024, 1, 8, 10, 0),
            utc(2024, 1, 10, 10, 0),
            utc(2024, 1, 12, 10, 0),
        ]
    );
}

#[test_log::test]
fn test_monthly_day_31_scenario() {
    let event = recurring(
        1,
        day(2024, 1, 31),
        &RecurrencePattern::monthly(1).with_day_of_month(31),
    );

    let instances = expander().expand(&[event], day(2024, 1, 1), day(2024, 4, 30));

    assert_eq!(
        dates(&instances),
        vec![day(2024, 1, 31), day(2024, 2, 29), day(2024, 3, 31), day(2024, 4, 30)]
    );
}

#[test_log::test]
fn test_daily_with_exception_scenario() {
    let event = recurring(1, day(2024, 6, 1), &RecurrencePattern::daily(3)).with_exceptions(&["2024-06-07"]);

    let instances = expander().expand(&[event], day(2024, 6, 1), day(2024, 6, 10));

    assert_eq!(
        dates(&instances),
        vec![day(2024, 6, 1), day(2024, 6, 4), day(2024, 6, 7), day(2024, 6, 10)]
    );
    let cancelled: Vec<bool> = instances.iter().map(|i| i.is_cancelled).collect();
    assert_eq!(cancelled, vec![false, false, true, false]);
}

#[test]
fn test_daily_window_of_d_days_yields_d_plus_one() {
    let start = utc(2024, 3, 1, 9, 30);
    let event = recurring(1, start, &RecurrencePattern::daily(1));

    for days in [0_i64, 1, 6, 30, 45] {
        let instances = expander().expand(
            std::slice::from_ref(&event),
            day(2024, 3, 1),
            day(2024, 3, 1) + TimeDelta::days(days),
        );
        assert_eq!(instances.len(), usize::try_from(days + 1).unwrap(), "window of {days} days");
    }
}

#[test]
fn test_non_recurring_events_are_skipped() {
    let one_off = Event::new(1, "All hands", utc(2024, 5, 2, 14, 0));
    let mut flagged_off = recurring(2, utc(2024, 5, 1, 9, 0), &RecurrencePattern::daily(1));
    flagged_off.is_recurring = false;

    let instances = expander().expand(&[one_off, flagged_off], day(2024, 1, 1), day(2024, 12, 31));

    assert!(instances.is_empty());
}

#[test_log::test]
fn test_undecodable_rule_skips_only_that_event() {
    let broken = Event::new(1, "Broken", day(2024, 5, 1)).with_raw_rule("{not json");
    let empty = Event::new(2, "Empty", day(2024, 5, 1)).with_raw_rule("");
    let fine = recurring(3, day(2024, 5, 1), &RecurrencePattern::daily(1));

    let instances = expander().expand(&[broken, empty, fine], day(2024, 5, 1), day(2024, 5, 3));

    assert_eq!(instances.len(), 3);
    assert!(instances.iter().all(|i| i.event.id == 3));
}

#[test_log::test]
fn test_null_rule_steps_daily() {
    let event = Event::new(1, "Null rule", day(2024, 5, 1)).with_raw_rule("null");

    let instances = expander().expand(&[event], day(2024, 5, 1), day(2024, 5, 3));

    assert_eq!(
        dates(&instances),
        vec![day(2024, 5, 1), day(2024, 5, 2), day(2024, 5, 3)]
    );
}

#[test_log::test]
fn test_undecodable_exceptions_are_ignored() {
    let event = recurring(1, day(2024, 5, 1), &RecurrencePattern::daily(1)).with_raw_exceptions("2024-05-02");

    let instances = expander().expand(&[event], day(2024, 5, 1), day(2024, 5, 3));

    assert_eq!(instances.len(), 3);
    assert!(instances.iter().all(|i| !i.is_cancelled));
}

#[test]
fn test_instances_stay_inside_window_and_after_start() {
    let start = utc(2024, 2, 10, 18, 45);
    let events = vec![
        recurring(1, start, &RecurrencePattern::daily(2)),
        recurring(2, start, &RecurrencePattern::weekly(1).with_days_of_week(vec![0, 2, 4, 6])),
        recurring(3, start, &RecurrencePattern::monthly(1).with_day_of_month(30)),
        recurring(4, start, &RecurrencePattern::yearly(1)),
    ];
    let window_start = day(2024, 3, 1);
    let window_end = utc(2024, 6, 30, 6, 0);

    let instances = expander().expand(&events, window_start, window_end);

    assert!(!instances.is_empty());
    for instance in &instances {
        assert!(instance.instance_date >= window_start);
        assert!(instance.instance_date.date_naive() <= window_end.date_naive());
        assert!(instance.instance_date >= instance.event.start_date);
        assert_eq!(instance.original_date, start);
        assert_eq!((instance.instance_date.hour(), instance.instance_date.minute()), (18, 45));
    }
}

#[test]
fn test_output_grouped_by_event_and_chronological() {
    let events = vec![
        recurring(1, day(2024, 1, 1), &RecurrencePattern::daily(5)),
        recurring(2, day(2024, 1, 2), &RecurrencePattern::daily(2)),
    ];

    let instances = expander().expand(&events, day(2024, 1, 1), day(2024, 1, 31));

    let ids: Vec<u64> = instances.iter().map(|i| i.event.id).collect();
    let boundary = ids.iter().position(|id| *id == 2).unwrap();
    assert!(ids[..boundary].iter().all(|id| *id == 1));
    assert!(ids[boundary..].iter().all(|id| *id == 2));
    for pair in instances.windows(2) {
        if pair[0].event.id == pair[1].event.id {
            assert!(pair[0].instance_date < pair[1].instance_date);
        }
    }
}

#[test]
fn test_occurrence_count_caps_generation() {
    let event = recurring(1, day(2024, 1, 1), &RecurrencePattern::daily(1).with_count(5));

    let instances = expander().expand(std::slice::from_ref(&event), day(2024, 1, 1), day(2024, 12, 31));
    assert_eq!(instances.len(), 5);
    assert_eq!(instances.last().unwrap().instance_date, day(2024, 1, 5));

    // Steps before the window still count toward the cap.
    let later = expander().expand(&[event], day(2024, 1, 3), day(2024, 12, 31));
    assert_eq!(dates(&later), vec![day(2024, 1, 3), day(2024, 1, 4), day(2024, 1, 5)]);
}

#[test]
fn test_default_cap_is_one_thousand() {
    let event = recurring(1, day(2020, 1, 1), &RecurrencePattern::daily(1));

    let instances = expander().expand(&[event], day(2020, 1, 1), day(2030, 1, 1));

    assert_eq!(instances.len(), 1000);
}

#[test]
fn test_count_above_cap_is_capped() {
    let expander = RecurrenceExpander::new(
        ExpansionOptions::default()
            .with_now(day(2024, 1, 1))
            .with_max_occurrences(10),
    );
    let capped = recurring(1, day(2024, 1, 1), &RecurrencePattern::daily(1).with_count(50));
    let unset = recurring(2, day(2024, 1, 1), &RecurrencePattern::daily(1));

    let instances = expander.expand(&[capped, unset], day(2024, 1, 1), day(2024, 12, 31));

    assert_eq!(instances.iter().filter(|i| i.event.id == 1).count(), 10);
    assert_eq!(instances.iter().filter(|i| i.event.id == 2).count(), 10);
}

#[test]
fn test_recurrence_end_is_exclusive_hard_stop() {
    let event = recurring(1, utc(2024, 1, 1, 10, 0), &RecurrencePattern::daily(1))
        .with_recurrence_end(day(2024, 1, 5));

    let instances = expander().expand(&[event], day(2024, 1, 1), day(2024, 1, 31));

    assert_eq!(instances.len(), 4);
    assert_eq!(instances.last().unwrap().instance_date, utc(2024, 1, 4, 10, 0));
}

#[test]
fn test_rule_end_date_applies_without_recurrence_end() {
    let event = recurring(
        1,
        utc(2024, 1, 1, 10, 0),
        &RecurrencePattern::daily(1).ending_on("2024-01-05"),
    );

    let instances = expander().expand(&[event], day(2024, 1, 1), day(2024, 1, 31));

    assert_eq!(instances.len(), 4);
}

#[test]
fn test_recurrence_end_wins_over_rule_end_date() {
    let event = recurring(
        1,
        utc(2024, 1, 1, 10, 0),
        &RecurrencePattern::daily(1).ending_on("2024-01-10"),
    )
    .with_recurrence_end(day(2024, 1, 3));

    let instances = expander().expand(&[event], day(2024, 1, 1), day(2024, 1, 31));

    assert_eq!(dates(&instances), vec![utc(2024, 1, 1, 10, 0), utc(2024, 1, 2, 10, 0)]);
}

#[test]
fn test_unparseable_rule_end_date_is_unbounded() {
    let event = recurring(
        1,
        day(2024, 1, 1),
        &RecurrencePattern::daily(1).ending_on("next tuesday"),
    );

    let instances = expander().expand(&[event], day(2024, 1, 1), day(2024, 1, 10));

    assert_eq!(instances.len(), 10);
}

#[test]
fn test_safety_horizon_stops_walk() {
    let expander = RecurrenceExpander::new(
        ExpansionOptions::default()
            .with_now(day(2024, 1, 1))
            .with_safety_horizon_years(1),
    );
    let event = recurring(1, utc(2024, 12, 30, 12, 0), &RecurrencePattern::daily(1));

    let instances = expander.expand(&[event], day(2024, 12, 1), day(2025, 1, 10));

    assert_eq!(dates(&instances), vec![utc(2024, 12, 30, 12, 0), utc(2024, 12, 31, 12, 0)]);
}

#[test]
fn test_unknown_type_falls_back_to_daily() {
    let event = Event::new(1, "Mystery", day(2024, 1, 1)).with_raw_rule(r#"{"type":"lunar","interval":9}"#);

    let instances = expander().expand(&[event], day(2024, 1, 1), day(2024, 1, 3));

    assert_eq!(dates(&instances), vec![day(2024, 1, 1), day(2024, 1, 2), day(2024, 1, 3)]);
}

#[test]
fn test_zero_interval_does_not_repeat_dates() {
    let event = Event::new(1, "Zero", day(2024, 1, 1)).with_raw_rule(r#"{"type":"daily","interval":0}"#);

    let instances = expander().expand(&[event], day(2024, 1, 1), day(2024, 1, 3));

    assert_eq!(dates(&instances), vec![day(2024, 1, 1), day(2024, 1, 2), day(2024, 1, 3)]);
}

#[test]
fn test_event_starting_after_window_yields_nothing() {
    let event = recurring(1, day(2024, 3, 1), &RecurrencePattern::daily(1));

    assert!(expander().expand(&[event], day(2024, 1, 1), day(2024, 2, 28)).is_empty());
}

#[test]
fn test_inverted_window_yields_nothing() {
    let event = recurring(1, day(2024, 1, 1), &RecurrencePattern::daily(1));

    assert!(expander().expand(&[event], day(2024, 2, 1), day(2024, 1, 1)).is_empty());
}

#[test]
fn test_instance_end_follows_event_duration() {
    let event = recurring(1, utc(2024, 4, 1, 9, 0), &RecurrencePattern::weekly(1))
        .with_end_date(utc(2024, 4, 1, 10, 30));

    let instances = expander().expand(&[event], day(2024, 4, 1), day(2024, 4, 30));

    assert_eq!(instances.len(), 5);
    for instance in &instances {
        assert_eq!(
            instance.instance_end_date,
            Some(instance.instance_date + TimeDelta::minutes(90))
        );
    }
}

#[test]
fn test_wall_clock_kept_across_dst() {
    // 09:00 in Paris is 08:00Z before the 2024-03-31 switch and 07:00Z after.
    let event = recurring(1, utc(2024, 3, 29, 8, 0), &RecurrencePattern::daily(1)).with_timezone("Europe/Paris");

    let instances = expander().expand(&[event], day(2024, 3, 29), day(2024, 4, 1));

    assert_eq!(
        dates(&instances),
        vec![
            utc(2024, 3, 29, 8, 0),
            utc(2024, 3, 30, 8, 0),
            utc(2024, 3, 31, 7, 0),
            utc(2024, 4, 1, 7, 0),
        ]
    );
}

#[test_log::test]
fn test_series_continues_through_two_hour_gap() {
    // Troll jumps from +00 to +02 at 01:00Z on 2024-03-31, swallowing 01:30 local.
    let event = recurring(1, utc(2024, 3, 28, 1, 30), &RecurrencePattern::daily(1))
        .with_timezone("Antarctica/Troll");

    let instances = expander().expand(&[event], day(2024, 3, 28), day(2024, 4, 10));

    // Local Mar 28 through Apr 11; Apr 11 01:30 local is Apr 10 23:30Z.
    assert_eq!(instances.len(), 15);
    assert_eq!(
        dates(&instances[..5]),
        vec![
            utc(2024, 3, 28, 1, 30),
            utc(2024, 3, 29, 1, 30),
            utc(2024, 3, 30, 1, 30),
            utc(2024, 3, 31, 1, 30),
            utc(2024, 3, 31, 23, 30),
        ]
    );
    assert_eq!(instances[14].instance_date, utc(2024, 4, 10, 23, 30));
    for instance in &instances[4..] {
        let local = instance.instance_date.with_timezone(&Tz::Antarctica__Troll);
        assert_eq!((local.hour(), local.minute()), (1, 30));
    }
}

#[test]
fn test_exceptions_match_local_calendar_date() {
    // 22:00 in New York on 2024-06-01 is already 2024-06-02 in UTC.
    let event = recurring(1, utc(2024, 6, 2, 2, 0), &RecurrencePattern::daily(1))
        .with_timezone("America/New_York")
        .with_exceptions(&["2024-06-01"]);

    let instances = expander().expand(&[event], day(2024, 6, 1), day(2024, 6, 3));

    assert!(instances[0].is_cancelled);
    assert!(instances[1..].iter().all(|i| !i.is_cancelled));
}

#[test]
fn test_weekly_days_use_local_weekday() {
    // Sunday 23:30 in Los Angeles is Monday in UTC; a Sunday-only rule must
    // still land on Sundays locally.
    let event = recurring(
        1,
        utc(2024, 1, 8, 7, 30),
        &RecurrencePattern::weekly(1).with_days_of_week(vec![0]),
    )
    .with_timezone("America/Los_Angeles");

    let instances = expander().expand(&[event], day(2024, 1, 1), day(2024, 1, 31));

    assert_eq!(instances.len(), 4);
    for instance in &instances {
        let local = instance.instance_date.with_timezone(&Tz::America__Los_Angeles);
        assert_eq!(local.weekday(), chrono::Weekday::Sun);
    }
}

#[test]
fn test_unknown_timezone_uses_default() {
    let expander = RecurrenceExpander::new(
        ExpansionOptions::default()
            .with_now(day(2024, 1, 1))
            .with_default_timezone(Tz::UTC),
    );
    let event = recurring(1, utc(2024, 3, 29, 8, 0), &RecurrencePattern::daily(1)).with_timezone("Atlantis/Capital");

    let instances = expander.expand(&[event], day(2024, 3, 29), day(2024, 4, 1));

    assert!(instances.iter().all(|i| i.instance_date.hour() == 8));
}

#[test]
fn test_expansion_is_repeatable() {
    let events = vec![
        recurring(1, day(2024, 1, 31), &RecurrencePattern::monthly(1).with_day_of_month(31)),
        recurring(2, utc(2024, 1, 1, 10, 0), &RecurrencePattern::weekly(1).with_days_of_week(vec![1, 3, 5]))
            .with_exceptions(&["2024-01-03"]),
    ];
    let snapshot = events.clone();
    let expander = expander();

    let first = expander.expand(&events, day(2024, 1, 1), day(2024, 6, 30));
    let second = expander.expand(&events, day(2024, 1, 1), day(2024, 6, 30));

    assert_eq!(first, second);
    assert_eq!(events, snapshot);
}

#[test]
fn test_default_expansion_function() {
    let event = recurring(1, day(2024, 1, 1), &RecurrencePattern::daily(1));

    let instances = expand_recurring_events(&[event], day(2024, 1, 1), day(2024, 1, 7));

    assert_eq!(instances.len(), 7);
}
