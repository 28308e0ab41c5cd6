//! Tests for payment-date prediction

use jiff::civil::{Date, date};

use crate::model::{
    CooperativeTerms, DirectTerms, PaymentPeriod, PaymentPrediction, PaymentStatus, PaymentTerms,
    PaymentTiming,
};
use crate::payment_date::{payment_delay_days, predict_payment_date};

fn cooperative(terms: &CooperativeTerms, shift: Date) -> PaymentPrediction {
    predict_payment_date(shift, PaymentTerms::Cooperative(terms)).unwrap()
}

fn direct(terms: &DirectTerms, shift: Date) -> PaymentPrediction {
    predict_payment_date(shift, PaymentTerms::Direct(terms)).unwrap()
}

// ============================================================================
// Cooperative
// ============================================================================

#[test]
fn test_exact_day_after_base_does_not_roll() {
    // Jan 31 + 30 days = Mar 1; day 5 of March is not before it
    let terms = CooperativeTerms::new("Coopmed").delay_days(30).exact_day(5);
    let p = cooperative(&terms, date(2024, 1, 31));
    assert_eq!(p.date, date(2024, 3, 5));
    assert_eq!(p.label, "Dia 5");
}

#[test]
fn test_candidate_equal_to_base_is_accepted() {
    // Feb 4 + 30 days = Mar 5
    let terms = CooperativeTerms::new("Coopmed").delay_days(30).exact_day(5);
    assert_eq!(cooperative(&terms, date(2024, 2, 4)).date, date(2024, 3, 5));
}

#[test]
fn test_candidate_before_base_rolls_one_month() {
    // Feb 10 + 30 days = Mar 11; day 5 of March already passed
    let terms = CooperativeTerms::new("Coopmed")
        .delay_days(30)
        .period(PaymentPeriod::Days1To5);
    let p = cooperative(&terms, date(2024, 2, 10));
    assert_eq!(p.date, date(2024, 4, 5));
    assert_eq!(p.label, "Entre dias 1-5");
}

#[test]
fn test_day_thirty_overflows_february() {
    let terms = CooperativeTerms::new("Coopmed")
        .delay_days(45)
        .period(PaymentPeriod::Days20To30);

    // 2024-01-05 + 45 = 2024-02-19; "Feb 30" is Mar 1 in a leap year
    let p = cooperative(&terms, date(2024, 1, 5));
    assert_eq!(p.date, date(2024, 3, 1));
    assert_eq!(p.label, "Entre dias 20-30");

    // and Mar 2 otherwise
    assert_eq!(cooperative(&terms, date(2023, 1, 5)).date, date(2023, 3, 2));
}

#[test]
fn test_roll_forward_overflows_too() {
    // Jan 1 + 30 = Jan 31; Jan 30 < Jan 31 rolls to "Feb 30" = Mar 1
    let terms = CooperativeTerms::new("Coopmed")
        .delay_days(30)
        .period(PaymentPeriod::Days20To30);
    assert_eq!(cooperative(&terms, date(2024, 1, 1)).date, date(2024, 3, 1));
}

#[test]
fn test_mid_month_period() {
    let terms = CooperativeTerms::new("Coopmed")
        .delay_days(60)
        .period(PaymentPeriod::Days10To15);
    // Mar 1 + 60 = Apr 30 → May 15
    let p = cooperative(&terms, date(2024, 3, 1));
    assert_eq!(p.date, date(2024, 5, 15));
    assert_eq!(p.label, "Entre dias 10-15");
}

#[test]
fn test_without_period_pays_on_base_date() {
    let terms = CooperativeTerms::new("Coopmed").delay_days(45);
    let p = cooperative(&terms, date(2024, 1, 5));
    assert_eq!(p.date, date(2024, 2, 19));
    assert_eq!(p.label, "19 fev");

    // exact day chosen but never filled in
    let mut terms = CooperativeTerms::new("Coopmed").delay_days(30);
    terms.payment_period = Some(PaymentPeriod::ExactDay);
    let p = cooperative(&terms, date(2024, 1, 31));
    assert_eq!(p.date, date(2024, 3, 1));
    assert_eq!(p.label, "1 mar");
}

#[test]
fn test_delay_resolution() {
    let custom = CooperativeTerms::new("Coopmed").delay_days(50);
    assert_eq!(custom.payment_delay.as_deref(), Some("outro"));
    assert_eq!(custom.resolved_delay_days(), 50);

    let mut unreadable = CooperativeTerms::new("Coopmed");
    unreadable.payment_delay = Some("abc".into());
    assert_eq!(unreadable.resolved_delay_days(), 30);
    assert_eq!(CooperativeTerms::default().resolved_delay_days(), 30);

    let mut both = CooperativeTerms::new("Coopmed").delay_days(45);
    both.custom_payment_delay = Some("20".into());
    assert_eq!(both.resolved_delay_days(), 20);
}

#[test]
fn test_reads_wizard_bundle() {
    let terms: CooperativeTerms = serde_json::from_value(serde_json::json!({
        "cooperativa": "Unimed",
        "workPeriod": "21-20",
        "paymentDelay": "outro",
        "customPaymentDelay": 40,
        "paymentPeriod": "exato",
        "customPaymentDay": "12",
        "grossValue": "1.800,00",
        "taxRate": "35"
    }))
    .unwrap();
    assert_eq!(terms.resolved_delay_days(), 40);
    assert_eq!(terms.resolved_exact_day(), Some(12));
    assert_eq!(terms.resolved_work_window(), Some((21, 20)));
    let conversion = PaymentTerms::Cooperative(&terms).conversion();
    assert!((conversion.net - 1170.0).abs() < 1e-9);

    // Mar 1 + 40 = Apr 10 → Apr 12
    assert_eq!(cooperative(&terms, date(2024, 3, 1)).date, date(2024, 4, 12));
}

// ============================================================================
// Direct
// ============================================================================

#[test]
fn test_same_month_day_already_passed_rolls() {
    let terms = DirectTerms::new().same_month().day(5);
    let p = direct(&terms, date(2024, 6, 10));
    assert_eq!(p.date, date(2024, 7, 5));
    assert_eq!(p.label, "Dia 5");
}

#[test]
fn test_same_month_day_ahead_is_kept() {
    let terms = DirectTerms::new().same_month().day(20);
    assert_eq!(direct(&terms, date(2024, 6, 10)).date, date(2024, 6, 20));

    let on_the_day = DirectTerms::new().same_month().day(10);
    assert_eq!(direct(&on_the_day, date(2024, 6, 10)).date, date(2024, 6, 10));
}

#[test]
fn test_next_month_day_always_rolls() {
    let terms = DirectTerms::new().next_month().day(20);
    assert_eq!(direct(&terms, date(2024, 6, 10)).date, date(2024, 7, 20));

    // Jan 31 → "Feb 31" = Mar 2
    let end_of_month = DirectTerms::new().next_month().day(31);
    let p = direct(&end_of_month, date(2024, 1, 15));
    assert_eq!(p.date, date(2024, 3, 2));
    assert_eq!(p.label, "Dia 31");
}

#[test]
fn test_same_month_without_day_is_month_end() {
    let p = direct(&DirectTerms::new().same_month(), date(2024, 2, 10));
    assert_eq!(p.date, date(2024, 2, 29));
    assert_eq!(p.label, "Mesmo mês");
}

#[test]
fn test_next_month_without_day_is_end_of_second_month() {
    let p = direct(&DirectTerms::new().next_month(), date(2024, 1, 10));
    assert_eq!(p.date, date(2024, 3, 31));
    assert_eq!(p.label, "Mês seguinte");

    let p = direct(&DirectTerms::new().next_month(), date(2024, 12, 1));
    assert_eq!(p.date, date(2025, 2, 28));
}

#[test]
fn test_wizard_timing_answer() {
    let wizard = DirectTerms {
        pays_next_month: Some("nao".into()),
        ..Default::default()
    };
    assert_eq!(wizard.resolved_timing(), PaymentTiming::SameMonth);
    assert_eq!(direct(&wizard, date(2024, 4, 3)).date, date(2024, 4, 30));

    let explicit = DirectTerms {
        payment_timing: Some(PaymentTiming::NextMonth),
        pays_next_month: Some("nao".into()),
        ..Default::default()
    };
    assert_eq!(explicit.resolved_timing(), PaymentTiming::NextMonth);

    assert_eq!(DirectTerms::default().resolved_timing(), PaymentTiming::NextMonth);
}

#[test]
fn test_payment_day_out_of_range_is_ignored() {
    let terms = DirectTerms {
        payment_timing: Some(PaymentTiming::SameMonth),
        payment_day: Some("outro".into()),
        custom_payment_day: Some("45".into()),
        ..Default::default()
    };
    assert_eq!(terms.resolved_day(), None);
    assert_eq!(direct(&terms, date(2024, 4, 3)).label, "Mesmo mês");
}

// ============================================================================
// Overdue
// ============================================================================

#[test]
fn test_payment_delay_days() {
    let today = date(2024, 5, 10);
    assert_eq!(payment_delay_days(date(2024, 5, 7), today), Some(3));
    assert_eq!(payment_delay_days(today, today), None);
    assert_eq!(payment_delay_days(date(2024, 5, 11), today), None);
    assert_eq!(payment_delay_days(date(2023, 5, 10), today), Some(366));
}

#[test]
fn test_overdue_days_on_records() {
    use crate::aggregate::aggregate_month;
    use crate::date_math::YearMonth;
    use crate::tests::fixtures;

    let inputs = fixtures::inputs(vec![fixtures::wednesday_pj()], vec![]);
    let report = aggregate_month(&inputs, YearMonth::new(2024, 3), fixtures::unrelated_today());
    let record = &report.shifts[0];
    assert_eq!(record.payment.date, date(2024, 3, 10));
    assert_eq!(record.payment_status, PaymentStatus::Pending);
    assert_eq!(record.overdue_days(date(2024, 3, 15)), Some(5));
    assert_eq!(record.overdue_days(date(2024, 3, 10)), None);

    let mut received = record.clone();
    received.payment_status = PaymentStatus::Received;
    assert_eq!(received.overdue_days(date(2024, 3, 15)), None);
}

#[test]
fn test_no_prediction_past_the_last_date() {
    let terms = CooperativeTerms::new("Coopmed").delay_days(30);
    let mut huge = terms.clone();
    huge.custom_payment_delay = Some("9999999".into());
    assert_eq!(
        predict_payment_date(date(2024, 3, 1), PaymentTerms::Cooperative(&huge)),
        None
    );

    let next_month = DirectTerms::new().next_month();
    assert_eq!(
        predict_payment_date(date(9999, 11, 15), PaymentTerms::Direct(&next_month)),
        None
    );
    assert_eq!(direct(&next_month, date(2024, 3, 15)).date, date(2024, 5, 31));
}
