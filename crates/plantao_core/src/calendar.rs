//! Shift-date views: the current week and a calendar month
//!
//! Unlike reports, these place occurrences on the day they are worked.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::aggregate::PlannerInputs;
use crate::date_math::{YearMonth, add_days};
use crate::model::{OccurrenceId, ShiftKind, WorkStatus, clock_minutes};
use crate::occurrences::expand_occurrences;

/// First day of the displayed week
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Monday,
    Sunday,
}

impl WeekStart {
    /// The first day of the week containing `day`.
    pub fn week_of(self, day: Date) -> Date {
        let back = match self {
            WeekStart::Monday => day.weekday().to_monday_zero_offset(),
            WeekStart::Sunday => day.weekday().to_sunday_zero_offset(),
        };
        add_days(day, -(back as i32))
    }
}

/// One occurrence placed on its shift date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEntry {
    pub id: OccurrenceId,
    pub kind: ShiftKind,
    pub hospital: String,
    pub date: Date,
    pub start_time: String,
    pub end_time: String,
    pub work_status: WorkStatus,
}

impl CalendarEntry {
    pub fn hours(&self) -> f64 {
        shift_hours(&self.start_time, &self.end_time)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekView {
    pub start: Date,
    pub end: Date,
    pub entries: Vec<CalendarEntry>,
}

impl WeekView {
    pub fn entries_on(&self, day: Date) -> impl Iterator<Item = &CalendarEntry> {
        self.entries.iter().filter(move |e| e.date == day)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ShiftTally {
    pub total: u32,
    pub fixed: u32,
    pub sporadic: u32,
    /// Rounded to the nearest hour
    pub hours: u32,
}

/// Planned (every occurrence) and completed (marked completed) tallies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MonthStats {
    pub planned: ShiftTally,
    pub completed: ShiftTally,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarMonth {
    pub month: YearMonth,
    pub entries: Vec<CalendarEntry>,
    pub stats: MonthStats,
}

/// Hours between two `HH:MM` times; a non-positive span is an overnight
/// shift. Unreadable times count as zero hours.
pub fn shift_hours(start: &str, end: &str) -> f64 {
    let (Some(start), Some(end)) = (clock_minutes(start), clock_minutes(end)) else {
        return 0.0;
    };
    let mut hours = (end - start) as f64 / 60.0;
    if hours <= 0.0 {
        hours += 24.0;
    }
    hours
}

/// Occurrences in the week containing `today`.
pub fn week_view(inputs: &PlannerInputs, today: Date, week_start: WeekStart) -> WeekView {
    let start = week_start.week_of(today);
    let end = add_days(start, 6);
    WeekView {
        start,
        end,
        entries: entries_between(inputs, start, end),
    }
}

/// Occurrences worked in `month`, with planned and completed tallies.
pub fn calendar_month(inputs: &PlannerInputs, month: YearMonth) -> CalendarMonth {
    let entries = entries_between(inputs, month.first_day(), month.last_day());

    let mut stats = MonthStats::default();
    let mut planned_hours = 0.0;
    let mut completed_hours = 0.0;
    for entry in &entries {
        tally(&mut stats.planned, entry.kind);
        planned_hours += entry.hours();
        if entry.work_status == WorkStatus::Completed {
            tally(&mut stats.completed, entry.kind);
            completed_hours += entry.hours();
        }
    }
    stats.planned.hours = planned_hours.round() as u32;
    stats.completed.hours = completed_hours.round() as u32;

    CalendarMonth {
        month,
        entries,
        stats,
    }
}

fn tally(t: &mut ShiftTally, kind: ShiftKind) {
    t.total += 1;
    match kind {
        ShiftKind::Fixed => t.fixed += 1,
        ShiftKind::Sporadic => t.sporadic += 1,
    }
}

fn entries_between(inputs: &PlannerInputs, start: Date, end: Date) -> Vec<CalendarEntry> {
    let statuses = &inputs.statuses;
    let mut entries = Vec::new();

    for definition in &inputs.shifts.fixed_shifts {
        for date in expand_occurrences(definition, start, end) {
            let id = OccurrenceId::fixed(&definition.id, date);
            entries.push(CalendarEntry {
                work_status: statuses.work.get(&id),
                id,
                kind: ShiftKind::Fixed,
                hospital: definition.hospital.clone(),
                date,
                start_time: definition.start_time.clone(),
                end_time: definition.end_time.clone(),
            });
        }
    }

    for shift in &inputs.sporadic {
        let Some(date) = shift.date.filter(|d| (start..=end).contains(d)) else {
            continue;
        };
        let id = OccurrenceId::sporadic(&shift.id);
        entries.push(CalendarEntry {
            work_status: statuses.work.get(&id),
            id,
            kind: ShiftKind::Sporadic,
            hospital: shift.hospital.clone(),
            date,
            start_time: shift.start_time.clone(),
            end_time: shift.end_time.clone(),
        });
    }

    entries.sort_by_key(|e| e.date);
    entries
}
