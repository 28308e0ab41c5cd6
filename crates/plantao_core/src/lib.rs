//! Income projection engine for shift-working doctors
//!
//! This crate turns recorded shifts into money on a calendar:
//! - Recurring shifts are expanded into dated occurrences
//! - Gross values are converted to net per payment-method rates
//! - Each occurrence gets a predicted payment date (cooperative delay and
//!   payment window, or direct same/next-month payment on a given day)
//! - Monthly reports bucket occurrences by *payment* month and split totals
//!   into received and pending using the user's status marks
//! - Goal progress and calendar views are derived from the same inputs
//!
//! Everything here is a pure function of its inputs: no I/O, no clock, no
//! global state. Callers pass `today` explicitly.
//!
//! # Example
//!
//! ```ignore
//! use plantao_core::{PlannerInputs, aggregate_month, date_math::YearMonth};
//!
//! let report = aggregate_month(&inputs, YearMonth::new(2024, 3), today);
//! println!("previsto: {}", plantao_core::money::format_currency(report.predicted_total));
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod aggregate;
pub mod calendar;
pub mod date_math;
pub mod error;
pub mod goals;
pub mod money;
pub mod occurrences;
pub mod payment_date;
pub mod rules;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod builder;
pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use aggregate::{PlannerInputs, aggregate_month, lookback_window};
pub use builder::{ShiftDraft, SporadicDraft};
pub use calendar::{
    CalendarEntry, CalendarMonth, MonthStats, ShiftTally, WeekStart, WeekView, calendar_month,
    shift_hours, week_view,
};
pub use date_math::YearMonth;
pub use error::{DraftError, ParseError};
pub use goals::{GoalProgress, GoalTracking, goal_progress};
pub use occurrences::{estimated_monthly_shifts, expand_occurrences};
pub use payment_date::{payment_delay_days, predict_payment_date};
