//! Monthly aggregation
//!
//! A month's report holds the occurrences whose *predicted payment date*
//! falls in that month, whatever month they were worked in. Every call is a
//! full recomputation from the inputs.

use jiff::civil::Date;

use crate::date_math::YearMonth;
use crate::model::{
    ConfirmedPayment, MonthlyReport, OccurrenceId, PaymentPrediction, PaymentStatus,
    ShiftDefinition, ShiftKind, ShiftRecord, ShiftsDocument, SporadicEstimate, SporadicShift,
    StatusBook,
};
use crate::money::Conversion;
use crate::occurrences::expand_occurrences;
use crate::payment_date::predict_payment_date;

/// Months before the target month searched for shifts paid in it
pub const LOOKBACK_MONTHS: i32 = 3;

/// Everything the engine reads: the persisted documents, already decoded
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlannerInputs {
    pub shifts: ShiftsDocument,
    pub sporadic: Vec<SporadicShift>,
    pub estimate: Option<SporadicEstimate>,
    pub statuses: StatusBook,
}

/// First day of `month - 3` through the last day of `month`.
pub fn lookback_window(month: YearMonth) -> (Date, Date) {
    (month.offset(-LOOKBACK_MONTHS).first_day(), month.last_day())
}

/// Build the report of income expected in `month`.
///
/// The sporadic estimate is added to the predicted total only when `month`
/// is the month containing `today`.
pub fn aggregate_month(inputs: &PlannerInputs, month: YearMonth, today: Date) -> MonthlyReport {
    let (window_start, window_end) = lookback_window(month);
    let mut shifts = Vec::new();

    for definition in &inputs.shifts.fixed_shifts {
        let Some(terms) = definition.terms() else {
            continue;
        };
        let conversion = definition.conversion();
        for date in expand_occurrences(definition, window_start, window_end) {
            let Some(payment) = predict_payment_date(date, terms) else {
                continue;
            };
            if month.contains(payment.date) {
                shifts.push(fixed_record(
                    definition,
                    date,
                    conversion,
                    payment,
                    &inputs.statuses,
                ));
            }
        }
    }

    for shift in &inputs.sporadic {
        let (Some(date), Some(terms)) = (shift.date, shift.terms()) else {
            continue;
        };
        let Some(payment) = predict_payment_date(date, terms) else {
            continue;
        };
        if month.contains(payment.date) {
            shifts.push(sporadic_record(shift, date, payment, &inputs.statuses));
        }
    }

    shifts.sort_by_key(|s| s.date);

    let estimate_contribution = match &inputs.estimate {
        Some(estimate) if month == YearMonth::of(today) => estimate.contribution(),
        _ => 0.0,
    };

    let mut predicted_total = estimate_contribution;
    let mut received_total = 0.0;
    let mut taxes_predicted = 0.0;
    let mut taxes_paid = 0.0;
    let mut confirmed_payments = Vec::new();

    for record in &shifts {
        predicted_total += record.net;
        taxes_predicted += record.tax;
        if record.payment_status == PaymentStatus::Received {
            received_total += record.net;
            taxes_paid += record.tax;
            confirmed_payments.push(ConfirmedPayment {
                date: record.payment.date,
                amount: record.net,
                hospital: record.hospital.clone(),
                occurrence_id: record.id.clone(),
            });
        }
    }
    confirmed_payments.sort_by_key(|p| p.date);

    MonthlyReport {
        month,
        shifts,
        predicted_total,
        received_total,
        pending_total: predicted_total - received_total,
        taxes_predicted,
        taxes_paid,
        estimate_contribution,
        confirmed_payments,
    }
}

fn fixed_record(
    definition: &ShiftDefinition,
    date: Date,
    conversion: Conversion,
    payment: PaymentPrediction,
    statuses: &StatusBook,
) -> ShiftRecord {
    let id = OccurrenceId::fixed(&definition.id, date);
    ShiftRecord {
        work_status: statuses.work.get(&id),
        payment_status: statuses.payment.get(&id),
        id,
        kind: ShiftKind::Fixed,
        hospital: definition.hospital.clone(),
        sector: definition.sector.clone(),
        date,
        start_time: definition.start_time.clone(),
        end_time: definition.end_time.clone(),
        gross: conversion.gross,
        net: conversion.net,
        tax: conversion.tax,
        payment,
    }
}

fn sporadic_record(
    shift: &SporadicShift,
    date: Date,
    payment: PaymentPrediction,
    statuses: &StatusBook,
) -> ShiftRecord {
    let id = OccurrenceId::sporadic(&shift.id);
    let conversion = shift.conversion();
    ShiftRecord {
        work_status: statuses.work.get(&id),
        payment_status: statuses.payment.get(&id),
        id,
        kind: ShiftKind::Sporadic,
        hospital: shift.hospital.clone(),
        sector: shift.sector.clone(),
        date,
        start_time: shift.start_time.clone(),
        end_time: shift.end_time.clone(),
        gross: conversion.gross,
        net: conversion.net,
        tax: conversion.tax,
        payment,
    }
}
