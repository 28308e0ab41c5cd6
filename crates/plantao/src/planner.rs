//! Mutation and recompute service.
//!
//! [`Planner`] is the only writer of the stored documents. Every mutation is
//! saved before the method returns, and every view is recomputed from what
//! is stored: there is no cached report to invalidate.

use std::fmt;

use jiff::civil::Date;
use plantao_core::model::{
    MonthlyReport, OccurrenceId, ShiftDefinition, ShiftId, ShiftType, SporadicEstimate,
    SporadicShift, StatusAction,
};
use plantao_core::{
    CalendarMonth, DraftError, GoalProgress, ShiftDraft, SporadicDraft, WeekStart, WeekView,
    YearMonth,
};

use crate::config::AppConfig;
use crate::documents::{DocumentKeys, Documents};
use crate::platform::{Storage, StorageError};

/// Errors from planner mutations
#[derive(Debug)]
pub enum PlannerError {
    /// The submitted shift failed validation
    Draft(DraftError),
    /// No stored fixed shift has this id
    UnknownShift(ShiftId),
    Storage(StorageError),
}

impl fmt::Display for PlannerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlannerError::Draft(e) => write!(f, "Invalid shift: {}", e),
            PlannerError::UnknownShift(id) => write!(f, "No fixed shift with id {}", id.0),
            PlannerError::Storage(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for PlannerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PlannerError::Draft(e) => Some(e),
            PlannerError::Storage(e) => Some(e),
            PlannerError::UnknownShift(_) => None,
        }
    }
}

impl From<DraftError> for PlannerError {
    fn from(e: DraftError) -> Self {
        PlannerError::Draft(e)
    }
}

impl From<StorageError> for PlannerError {
    fn from(e: StorageError) -> Self {
        PlannerError::Storage(e)
    }
}

pub struct Planner<S: Storage> {
    documents: Documents<S>,
    week_start: WeekStart,
}

impl<S: Storage> Planner<S> {
    pub fn new(storage: S, config: &AppConfig) -> Self {
        Self {
            documents: Documents::new(storage, DocumentKeys::new(config.key_prefix.clone())),
            week_start: config.week_starts_on,
        }
    }

    pub fn documents(&self) -> &Documents<S> {
        &self.documents
    }

    pub fn week_start(&self) -> WeekStart {
        self.week_start
    }

    // ------------------------------------------------------------------
    // Shift definitions
    // ------------------------------------------------------------------

    /// Validate `draft` and append it to the fixed shifts.
    pub fn add_fixed_shift(&self, draft: ShiftDraft) -> Result<ShiftDefinition, PlannerError> {
        let shift = draft.build()?;
        let mut doc = self.documents.shifts()?;
        doc.fixed_shifts.push(shift.clone());
        self.documents.save_shifts(&doc)?;
        tracing::info!(id = %shift.id.0, hospital = %shift.hospital, "Fixed shift added");
        Ok(shift)
    }

    /// Replace a fixed shift with a freshly built one.
    ///
    /// The replacement gets a new id, so status marks of the old occurrences
    /// no longer match it.
    pub fn replace_fixed_shift(
        &self,
        id: &ShiftId,
        draft: ShiftDraft,
    ) -> Result<ShiftDefinition, PlannerError> {
        let shift = draft.build()?;
        let mut doc = self.documents.shifts()?;
        doc.remove(id)
            .ok_or_else(|| PlannerError::UnknownShift(id.clone()))?;
        doc.fixed_shifts.push(shift.clone());
        self.documents.save_shifts(&doc)?;
        tracing::info!(old = %id.0, new = %shift.id.0, "Fixed shift replaced");
        Ok(shift)
    }

    pub fn remove_fixed_shift(&self, id: &ShiftId) -> Result<ShiftDefinition, PlannerError> {
        let mut doc = self.documents.shifts()?;
        let removed = doc
            .remove(id)
            .ok_or_else(|| PlannerError::UnknownShift(id.clone()))?;
        self.documents.save_shifts(&doc)?;
        tracing::info!(id = %id.0, "Fixed shift removed");
        Ok(removed)
    }

    pub fn set_shift_type(&self, kind: ShiftType) -> Result<(), StorageError> {
        let mut doc = self.documents.shifts()?;
        doc.shift_type = Some(kind);
        self.documents.save_shifts(&doc)
    }

    /// Validate `draft` and append it to the sporadic shifts. A shift that
    /// already happened is also marked completed.
    pub fn add_sporadic_shift(&self, draft: SporadicDraft) -> Result<SporadicShift, PlannerError> {
        let shift = draft.build()?;
        let mut list = self.documents.sporadic_shifts()?;
        list.push(shift.clone());
        self.documents.save_sporadic_shifts(&list)?;

        if shift.already_realized {
            self.mark_completed(OccurrenceId::sporadic(&shift.id))?;
        }
        tracing::info!(id = %shift.id.0, hospital = %shift.hospital, "Sporadic shift added");
        Ok(shift)
    }

    pub fn set_sporadic_estimate(&self, estimate: &SporadicEstimate) -> Result<(), StorageError> {
        self.documents.save_sporadic_estimate(estimate)
    }

    pub fn clear_sporadic_estimate(&self) -> Result<(), StorageError> {
        self.documents.clear_sporadic_estimate()
    }

    // ------------------------------------------------------------------
    // Status marks
    // ------------------------------------------------------------------

    /// Apply `action` to one occurrence and save the map it touched.
    pub fn set_status(&self, id: OccurrenceId, action: StatusAction) -> Result<(), StorageError> {
        let mut book = self.documents.statuses()?;
        tracing::debug!(id = %id, ?action, "Status change");
        book.apply(id, action);
        if action.is_payment() {
            self.documents.save_payment_statuses(&book.payment)
        } else {
            self.documents.save_work_statuses(&book.work)
        }
    }

    pub fn mark_completed(&self, id: OccurrenceId) -> Result<(), StorageError> {
        self.set_status(id, StatusAction::Completed)
    }

    pub fn mark_missed(&self, id: OccurrenceId) -> Result<(), StorageError> {
        self.set_status(id, StatusAction::Missed)
    }

    pub fn reset_work_status(&self, id: OccurrenceId) -> Result<(), StorageError> {
        self.set_status(id, StatusAction::ResetWork)
    }

    pub fn mark_received(&self, id: OccurrenceId) -> Result<(), StorageError> {
        self.set_status(id, StatusAction::Received)
    }

    pub fn mark_payment_pending(&self, id: OccurrenceId) -> Result<(), StorageError> {
        self.set_status(id, StatusAction::PaymentPending)
    }

    // ------------------------------------------------------------------
    // Goal
    // ------------------------------------------------------------------

    pub fn monthly_goal(&self) -> Result<f64, StorageError> {
        Ok(self.documents.profile()?.goal())
    }

    /// Store the goal; the other profile answers are written back unchanged.
    pub fn set_monthly_goal(&self, goal: f64) -> Result<(), StorageError> {
        let mut profile = self.documents.profile()?;
        profile.set_goal(goal);
        self.documents.save_profile(&profile)
    }

    // ------------------------------------------------------------------
    // Views
    // ------------------------------------------------------------------

    pub fn monthly_report(&self, month: YearMonth, today: Date) -> Result<MonthlyReport, StorageError> {
        let inputs = self.documents.inputs()?;
        Ok(plantao_core::aggregate_month(&inputs, month, today))
    }

    /// Progress towards the goal in the month containing `today`
    pub fn goal_progress(&self, today: Date) -> Result<GoalProgress, StorageError> {
        let goal = self.monthly_goal()?;
        let report = self.monthly_report(YearMonth::of(today), today)?;
        Ok(plantao_core::goal_progress(goal, &report))
    }

    pub fn week_view(&self, today: Date) -> Result<WeekView, StorageError> {
        let inputs = self.documents.inputs()?;
        Ok(plantao_core::week_view(&inputs, today, self.week_start))
    }

    pub fn calendar_month(&self, month: YearMonth) -> Result<CalendarMonth, StorageError> {
        let inputs = self.documents.inputs()?;
        Ok(plantao_core::calendar_month(&inputs, month))
    }

    /// Delete every stored document in this planner's namespace.
    pub fn clear_all(&self) -> Result<usize, StorageError> {
        self.documents.clear_all()
    }
}
