//! Scenario tests for the projection engine
//!
//! Tests are organized by topic:
//! - `payment_dates` - Payment-date prediction and overdue days
//! - `occurrences` - Expansion of recurring shifts
//! - `aggregation` - Monthly reports, totals and status overlays
//! - `goals` - Goal progress
//! - `calendar` - Week and month views
//! - `drafts` - Building shifts from drafts
//!
//! `fixtures` holds the shared sample shifts.

mod aggregation;
mod calendar;
mod payment_dates;
