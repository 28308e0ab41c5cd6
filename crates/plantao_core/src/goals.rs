//! Progress against the monthly income goal

use serde::{Deserialize, Serialize};

use crate::model::MonthlyReport;

/// Goal progress for one month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum GoalProgress {
    /// A zero goal; not a target
    NoGoal,
    Tracking(GoalTracking),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalTracking {
    pub goal: f64,
    pub received: f64,
    /// Capped at 100
    pub percentage: f64,
    pub missing: f64,
    pub average_shift_value: f64,
    pub shifts_needed: u32,
    pub reached: bool,
}

/// Compare what was received in the report's month against `goal`.
///
/// The average shift value is the predicted total over the number of
/// shifts in the report; with no shifts, no estimate of shifts needed is
/// made.
pub fn goal_progress(goal: f64, report: &MonthlyReport) -> GoalProgress {
    if goal <= 0.0 {
        return GoalProgress::NoGoal;
    }
    let received = report.received_total;
    let count = report.shift_count();
    let average_shift_value = if count == 0 {
        0.0
    } else {
        report.predicted_total / count as f64
    };
    let missing = (goal - received).max(0.0);
    let shifts_needed = if average_shift_value > 0.0 {
        (missing / average_shift_value).ceil() as u32
    } else {
        0
    };

    GoalProgress::Tracking(GoalTracking {
        goal,
        received,
        percentage: (received / goal * 100.0).min(100.0),
        missing,
        average_shift_value,
        shifts_needed,
        reached: received >= goal,
    })
}
