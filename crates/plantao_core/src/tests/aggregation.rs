//! Tests for monthly aggregation

use jiff::civil::date;

use super::fixtures::{
    assert_close, friday_cooperative, inputs, march_sporadic, unrelated_today, wednesday_pj,
};
use crate::aggregate::{aggregate_month, lookback_window};
use crate::date_math::YearMonth;
use crate::model::{
    OccurrenceId, PaymentMethod, PaymentStatus, ShiftId, ShiftKind, SporadicEstimate,
    SporadicId, WorkStatus,
};

fn march() -> YearMonth {
    YearMonth::new(2024, 3)
}

#[test]
fn test_lookback_window() {
    assert_eq!(
        lookback_window(march()),
        (date(2023, 12, 1), date(2024, 3, 31))
    );
}

#[test]
fn test_march_totals() {
    let inputs = inputs(vec![wednesday_pj()], vec![march_sporadic()]);
    let report = aggregate_month(&inputs, march(), unrelated_today());

    // February Wednesdays are paid on March 10, plus the March 10 sporadic shift
    let dates: Vec<_> = report.shifts.iter().map(|s| s.date).collect();
    assert_eq!(
        dates,
        vec![
            date(2024, 2, 7),
            date(2024, 2, 14),
            date(2024, 2, 21),
            date(2024, 2, 28),
            date(2024, 3, 10),
        ]
    );
    assert_eq!(report.shifts[4].kind, ShiftKind::Sporadic);
    assert_eq!(report.shifts[4].id.as_str(), "sporadic-s1");
    assert_eq!(report.shifts[0].id.as_str(), "w-2024-02-07");

    assert_close(report.predicted_total, 4.0 * 800.0 + 720.0);
    assert_close(report.taxes_predicted, 4.0 * 200.0 + 80.0);
    assert_eq!(report.received_total, 0.0);
    assert_eq!(report.taxes_paid, 0.0);
    assert_close(report.pending_total, report.predicted_total);
    assert!(report.confirmed_payments.is_empty());
}

#[test]
fn test_inclusion_follows_payment_month() {
    let inputs = inputs(vec![friday_cooperative()], vec![]);
    let worked = OccurrenceId::fixed(&ShiftId("c".into()), date(2024, 1, 5));

    let january = aggregate_month(&inputs, YearMonth::new(2024, 1), unrelated_today());
    let february = aggregate_month(&inputs, YearMonth::new(2024, 2), unrelated_today());
    let march = aggregate_month(&inputs, march(), unrelated_today());

    assert!(january.find(&worked).is_none());
    assert!(february.find(&worked).is_none());
    let record = march.find(&worked).expect("paid in March");
    assert_eq!(record.payment.date, date(2024, 3, 1));
    assert_close(record.net, 975.0);
    assert_close(record.tax, 525.0);
}

#[test]
fn test_every_record_is_paid_in_its_report_month() {
    let inputs = inputs(
        vec![wednesday_pj(), friday_cooperative()],
        vec![march_sporadic()],
    );
    for month in 1..=12 {
        let month = YearMonth::new(2024, month);
        let report = aggregate_month(&inputs, month, unrelated_today());
        assert!(report.shifts.iter().all(|s| month.contains(s.payment.date)));
        assert!(report.shifts.windows(2).all(|w| w[0].date <= w[1].date));
    }
}

#[test]
fn test_aggregation_is_idempotent() {
    let mut inputs = inputs(
        vec![wednesday_pj(), friday_cooperative()],
        vec![march_sporadic()],
    );
    inputs
        .statuses
        .mark_received(OccurrenceId::fixed(&ShiftId("w".into()), date(2024, 2, 14)));

    let first = aggregate_month(&inputs, march(), unrelated_today());
    let second = aggregate_month(&inputs, march(), unrelated_today());
    assert_eq!(first, second);
    assert_eq!(
        first.predicted_total.to_bits(),
        second.predicted_total.to_bits()
    );
}

#[test]
fn test_predicted_is_received_plus_pending() {
    let mut inputs = inputs(
        vec![wednesday_pj(), friday_cooperative()],
        vec![march_sporadic()],
    );
    inputs.estimate = Some(SporadicEstimate::new(3, 650.0));
    inputs
        .statuses
        .mark_received(OccurrenceId::sporadic(&SporadicId("s1".into())));
    inputs
        .statuses
        .mark_received(OccurrenceId::fixed(&ShiftId("c".into()), date(2024, 1, 5)));

    for month in 1..=6 {
        let report = aggregate_month(&inputs, YearMonth::new(2024, month), date(2024, 3, 20));
        assert_close(
            report.predicted_total,
            report.received_total + report.pending_total,
        );
    }
}

#[test]
fn test_received_then_reset_restores_report() {
    let mut inputs = inputs(vec![wednesday_pj()], vec![march_sporadic()]);
    let before = aggregate_month(&inputs, march(), unrelated_today());

    let id = OccurrenceId::fixed(&ShiftId("w".into()), date(2024, 2, 14));
    inputs.statuses.mark_received(id.clone());
    let marked = aggregate_month(&inputs, march(), unrelated_today());
    assert_close(marked.received_total, 800.0);
    assert_close(marked.taxes_paid, 200.0);
    assert_close(marked.pending_total, before.predicted_total - 800.0);
    assert_eq!(marked.find(&id).map(|s| s.payment_status), Some(PaymentStatus::Received));
    assert_eq!(marked.confirmed_payments.len(), 1);
    assert_eq!(marked.confirmed_payments[0].date, date(2024, 3, 10));
    assert_eq!(marked.confirmed_payments[0].occurrence_id, id);

    inputs.statuses.mark_payment_pending(&id);
    let after = aggregate_month(&inputs, march(), unrelated_today());
    assert_eq!(after, before);
}

#[test]
fn test_unmarked_occurrence_is_pending_and_not_stored() {
    let mut inputs = inputs(vec![wednesday_pj()], vec![]);
    let marked = OccurrenceId::fixed(&ShiftId("w".into()), date(2024, 2, 7));
    inputs.statuses.mark_received(marked.clone());

    let report = aggregate_month(&inputs, march(), unrelated_today());
    let untouched = OccurrenceId::fixed(&ShiftId("w".into()), date(2024, 2, 21));
    assert_eq!(
        report.find(&untouched).map(|s| s.payment_status),
        Some(PaymentStatus::Pending)
    );
    assert_eq!(
        report.find(&untouched).map(|s| s.work_status),
        Some(WorkStatus::Pending)
    );

    let stored = serde_json::to_value(&inputs.statuses.payment).unwrap();
    let keys: Vec<_> = stored.as_object().unwrap().keys().cloned().collect();
    assert_eq!(keys, vec![marked.as_str().to_string()]);
}

#[test]
fn test_work_status_does_not_change_totals() {
    let mut inputs = inputs(vec![wednesday_pj()], vec![]);
    let before = aggregate_month(&inputs, march(), unrelated_today());
    inputs
        .statuses
        .mark_missed(OccurrenceId::fixed(&ShiftId("w".into()), date(2024, 2, 7)));
    let after = aggregate_month(&inputs, march(), unrelated_today());
    assert_eq!(after.predicted_total, before.predicted_total);
    assert_eq!(after.shifts[0].work_status, WorkStatus::Missed);
}

#[test]
fn test_estimate_counts_only_in_current_month() {
    let mut inputs = inputs(vec![], vec![]);
    inputs.estimate = Some(SporadicEstimate::new(4, 500.0));

    let current = aggregate_month(&inputs, march(), date(2024, 3, 20));
    assert_close(current.estimate_contribution, 2000.0);
    assert_close(current.predicted_total, 2000.0);
    assert_close(current.pending_total, 2000.0);
    assert!(current.shifts.is_empty());

    let other = aggregate_month(&inputs, YearMonth::new(2024, 4), date(2024, 3, 20));
    assert_eq!(other.estimate_contribution, 0.0);
    assert_eq!(other.predicted_total, 0.0);
}

#[test]
fn test_shifts_without_terms_are_skipped() {
    let mut no_bundle = wednesday_pj();
    no_bundle.direct_terms = None;

    let mut no_date = march_sporadic();
    no_date.date = None;

    let inputs = inputs(vec![no_bundle], vec![no_date]);
    let report = aggregate_month(&inputs, march(), unrelated_today());
    assert!(report.shifts.is_empty());
    assert_eq!(report.predicted_total, 0.0);
}

#[test]
fn test_cooperative_method_without_bundle_uses_direct_terms() {
    let mut shift = wednesday_pj();
    shift.payment_method = Some(PaymentMethod::Cooperative);
    let report = aggregate_month(&inputs(vec![shift], vec![]), march(), unrelated_today());
    assert_eq!(report.shift_count(), 4);
}

#[test]
fn test_malformed_values_contribute_zero() {
    let mut shift = wednesday_pj();
    shift.gross_value = Some("mil reais".into());
    let report = aggregate_month(&inputs(vec![shift], vec![]), march(), unrelated_today());
    assert_eq!(report.shift_count(), 4);
    assert_eq!(report.predicted_total, 0.0);
    assert_eq!(report.taxes_predicted, 0.0);
}

#[test]
fn test_unrepresentable_payment_date_is_skipped() {
    let mut far_off = friday_cooperative();
    if let Some(terms) = far_off.cooperative_terms.as_mut() {
        terms.payment_delay = Some("outro".into());
        terms.custom_payment_delay = Some("9999999".into());
    }
    let inputs = inputs(vec![far_off, wednesday_pj()], vec![]);

    let report = aggregate_month(&inputs, march(), unrelated_today());
    assert_eq!(report.shifts.len(), 4);
    assert!(report.shifts.iter().all(|s| s.kind == ShiftKind::Fixed));
    assert!(report.shifts.iter().all(|s| s.id.as_str().starts_with("w-")));
    assert_close(report.predicted_total, 4.0 * 800.0);
}
