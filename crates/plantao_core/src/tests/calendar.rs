//! Tests for the week and month views

use jiff::civil::date;

use super::fixtures::{inputs, march_sporadic, wednesday_pj};
use crate::calendar::{WeekStart, calendar_month, shift_hours, week_view};
use crate::date_math::YearMonth;
use crate::model::{OccurrenceId, ShiftKind, ShiftId, SporadicId, WorkStatus};

#[test]
fn test_week_starting_monday() {
    let inputs = inputs(vec![wednesday_pj()], vec![march_sporadic()]);
    let week = week_view(&inputs, date(2024, 3, 13), WeekStart::Monday);
    assert_eq!(week.start, date(2024, 3, 11));
    assert_eq!(week.end, date(2024, 3, 17));
    // the Sunday sporadic shift belongs to the previous week
    assert_eq!(week.entries.len(), 1);
    assert_eq!(week.entries[0].id.as_str(), "w-2024-03-13");
    assert_eq!(week.entries_on(date(2024, 3, 13)).count(), 1);
    assert_eq!(week.entries_on(date(2024, 3, 14)).count(), 0);
}

#[test]
fn test_week_starting_sunday() {
    let inputs = inputs(vec![wednesday_pj()], vec![march_sporadic()]);
    let week = week_view(&inputs, date(2024, 3, 13), WeekStart::Sunday);
    assert_eq!(week.start, date(2024, 3, 10));
    assert_eq!(week.end, date(2024, 3, 16));
    let kinds: Vec<_> = week.entries.iter().map(|e| e.kind).collect();
    assert_eq!(kinds, vec![ShiftKind::Sporadic, ShiftKind::Fixed]);
}

#[test]
fn test_week_of_sunday_with_monday_start() {
    assert_eq!(WeekStart::Monday.week_of(date(2024, 3, 10)), date(2024, 3, 4));
    assert_eq!(WeekStart::Sunday.week_of(date(2024, 3, 10)), date(2024, 3, 10));
}

#[test]
fn test_week_shows_work_status() {
    let mut inputs = inputs(vec![wednesday_pj()], vec![]);
    inputs
        .statuses
        .mark_completed(OccurrenceId::fixed(&ShiftId("w".into()), date(2024, 3, 13)));
    let week = week_view(&inputs, date(2024, 3, 15), WeekStart::Monday);
    assert_eq!(week.entries[0].work_status, WorkStatus::Completed);
}

#[test]
fn test_month_uses_shift_dates_and_tallies() {
    let mut inputs = inputs(vec![wednesday_pj()], vec![march_sporadic()]);
    inputs
        .statuses
        .mark_completed(OccurrenceId::fixed(&ShiftId("w".into()), date(2024, 3, 13)));
    inputs
        .statuses
        .mark_completed(OccurrenceId::sporadic(&SporadicId("s1".into())));
    inputs
        .statuses
        .mark_missed(OccurrenceId::fixed(&ShiftId("w".into()), date(2024, 3, 20)));

    let month = calendar_month(&inputs, YearMonth::new(2024, 3));
    let dates: Vec<_> = month.entries.iter().map(|e| e.date.day()).collect();
    assert_eq!(dates, vec![6, 10, 13, 20, 27]);

    assert_eq!(month.stats.planned.total, 5);
    assert_eq!(month.stats.planned.fixed, 4);
    assert_eq!(month.stats.planned.sporadic, 1);
    assert_eq!(month.stats.planned.hours, 60);

    assert_eq!(month.stats.completed.total, 2);
    assert_eq!(month.stats.completed.fixed, 1);
    assert_eq!(month.stats.completed.sporadic, 1);
    assert_eq!(month.stats.completed.hours, 24);
}

#[test]
fn test_shift_hours() {
    assert_eq!(shift_hours("07:00", "19:00"), 12.0);
    assert_eq!(shift_hours("19:00", "07:00"), 12.0);
    assert_eq!(shift_hours("07:00", "07:00"), 24.0);
    assert_eq!(shift_hours("08:00", "14:30"), 6.5);
    assert_eq!(shift_hours("", "10:00"), 0.0);
}
