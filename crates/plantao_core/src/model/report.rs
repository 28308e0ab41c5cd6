use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use super::ids::OccurrenceId;
use super::status::{PaymentStatus, WorkStatus};
use crate::date_math::YearMonth;

/// Where an occurrence came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShiftKind {
    Fixed,
    Sporadic,
}

/// Predicted credit date and the label shown next to it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentPrediction {
    pub label: String,
    pub date: Date,
}

/// One dated shift occurrence with its value and statuses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftRecord {
    pub id: OccurrenceId,
    pub kind: ShiftKind,
    pub hospital: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sector: Option<String>,
    pub date: Date,
    pub start_time: String,
    pub end_time: String,
    pub gross: f64,
    pub net: f64,
    pub tax: f64,
    pub payment: PaymentPrediction,
    pub work_status: WorkStatus,
    pub payment_status: PaymentStatus,
}

impl ShiftRecord {
    /// Days the payment is late, or `None` if it was received or is not due.
    pub fn overdue_days(&self, today: Date) -> Option<i64> {
        match self.payment_status {
            PaymentStatus::Received => None,
            PaymentStatus::Pending => crate::payment_date::payment_delay_days(self.payment.date, today),
        }
    }
}

/// A payment the user confirmed as received
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmedPayment {
    pub date: Date,
    pub amount: f64,
    pub hospital: String,
    pub occurrence_id: OccurrenceId,
}

/// Income expected to be credited in one month
///
/// `pending_total` is always `predicted_total - received_total`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyReport {
    pub month: YearMonth,
    /// Included occurrences, by shift date
    pub shifts: Vec<ShiftRecord>,
    pub predicted_total: f64,
    pub received_total: f64,
    pub pending_total: f64,
    pub taxes_predicted: f64,
    pub taxes_paid: f64,
    /// Part of `predicted_total` coming from the sporadic estimate
    pub estimate_contribution: f64,
    /// Received occurrences, by payment date
    pub confirmed_payments: Vec<ConfirmedPayment>,
}

impl MonthlyReport {
    pub fn shift_count(&self) -> usize {
        self.shifts.len()
    }

    pub fn find(&self, id: &OccurrenceId) -> Option<&ShiftRecord> {
        self.shifts.iter().find(|s| &s.id == id)
    }
}
