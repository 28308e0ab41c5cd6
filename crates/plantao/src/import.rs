//! Bulk import of shifts from a YAML file.
//!
//! ```yaml
//! fixedShifts:
//!   - hospital: Hospital das Clínicas
//!     daysOfWeek: [Segunda-feira, Quarta-feira]
//!     startTime: "07:00"
//!     duration: diurno-12h
//!     paymentMethod: cooperativa
//!     cooperativaData:
//!       cooperativa: Coopmed
//!       paymentDelay: "45"
//!       paymentPeriod: 10-15
//!       grossValue: "1.500,00"
//!       taxRate: "35"
//! sporadicShifts:
//!   - hospital: Hospital Albert Einstein
//!     date: 2024-06-10
//!     startTime: "07:00"
//!     endTime: "19:00"
//!     paymentMethod: pj
//!     directPaymentData:
//!       paymentTiming: mesmo-mes
//!       paymentDay: "5"
//!       grossValue: "1.200"
//!       discountRate: "20"
//! sporadicEstimate:
//!   averageShiftsPerMonth: "3"
//!   averageNetValue: "650,00"
//! monthlyGoal: 15000
//! ```
//!
//! Shift entries use the same field names as the stored documents.

use plantao_core::model::SporadicEstimate;
use plantao_core::{ShiftDraft, SporadicDraft};
use serde::Deserialize;

use crate::planner::{Planner, PlannerError};
use crate::platform::{Storage, StorageError};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImportBatch {
    pub fixed_shifts: Vec<ShiftDraft>,
    pub sporadic_shifts: Vec<SporadicDraft>,
    pub sporadic_estimate: Option<SporadicEstimate>,
    pub monthly_goal: Option<f64>,
}

/// Counts of what an import stored
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub fixed_shifts: usize,
    pub sporadic_shifts: usize,
    pub estimate: bool,
    pub goal: bool,
}

impl ImportBatch {
    /// Parse a batch. The YAML is read into JSON values first so that form
    /// fields get the same lenient treatment as stored documents.
    pub fn from_yaml(yaml: &str) -> Result<Self, StorageError> {
        let value: serde_json::Value = serde_saphyr::from_str(yaml)
            .map_err(|e| StorageError::Parse(format!("Failed to parse YAML: {}", e)))?;
        if value.is_null() {
            return Ok(Self::default());
        }
        serde_json::from_value(value)
            .map_err(|e| StorageError::Parse(format!("Failed to read import file: {}", e)))
    }

    /// Store every entry of the batch.
    ///
    /// Entries are validated one by one; the first invalid shift stops the
    /// import, leaving the earlier entries stored.
    pub fn apply<S: Storage>(self, planner: &Planner<S>) -> Result<ImportSummary, PlannerError> {
        let mut summary = ImportSummary::default();

        for draft in self.fixed_shifts {
            planner.add_fixed_shift(draft)?;
            summary.fixed_shifts += 1;
        }
        for draft in self.sporadic_shifts {
            planner.add_sporadic_shift(draft)?;
            summary.sporadic_shifts += 1;
        }
        if let Some(estimate) = self.sporadic_estimate {
            planner.set_sporadic_estimate(&estimate)?;
            summary.estimate = true;
        }
        if let Some(goal) = self.monthly_goal {
            planner.set_monthly_goal(goal)?;
            summary.goal = true;
        }

        tracing::info!(
            fixed = summary.fixed_shifts,
            sporadic = summary.sporadic_shifts,
            "Import finished"
        );
        Ok(summary)
    }
}
