//! Expansion of recurring shift definitions into dated occurrences

use jiff::ToSpan;
use jiff::civil::Date;

use crate::model::ShiftDefinition;

/// Every date in `[start, end]` whose weekday the definition lists.
///
/// The declared cadence does not thin the result: biweekly and monthly
/// shifts expand like weekly ones.
pub fn expand_occurrences(definition: &ShiftDefinition, start: Date, end: Date) -> Vec<Date> {
    if start > end || definition.days_of_week.is_empty() {
        return Vec::new();
    }
    start
        .series(1.day())
        .take_while(|day| *day <= end)
        .filter(|day| definition.occurs_on(day.weekday()))
        .collect()
}

/// `days per week × {4, 2, 1}` for weekly, biweekly and monthly shifts.
pub fn estimated_monthly_shifts(definition: &ShiftDefinition) -> u32 {
    definition.days_of_week.len() as u32 * definition.recurrence().monthly_multiplier()
}
