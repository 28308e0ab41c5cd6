//! Static payment-method rule set
//!
//! Which parameters each payment method uses, the preset values offered for
//! them, and the checks a shift draft must pass before it is stored.

use crate::error::DraftError;
use crate::model::{
    CooperativeTerms, DirectTerms, PaymentMethod, PaymentPeriod, PaymentTiming, WorkPeriod,
};
use crate::money;

pub const COOPERATIVE_DELAY_PRESETS: [u16; 4] = [30, 45, 60, 90];
/// Longest cooperative delay a draft may carry
pub const MAX_PAYMENT_DELAY_DAYS: i64 = 365;
pub const COOPERATIVE_TAX_PRESETS: [u8; 4] = [20, 25, 35, 40];
pub const DIRECT_PAYMENT_DAY_PRESETS: [u8; 7] = [1, 5, 10, 15, 20, 25, 30];
pub const DIRECT_DISCOUNT_PRESETS: [u8; 7] = [15, 20, 25, 27, 30, 32, 33];

pub const WORK_PERIODS: [WorkPeriod; 5] = [
    WorkPeriod::Day21To20,
    WorkPeriod::Day20To20,
    WorkPeriod::FullMonth,
    WorkPeriod::Day25To25,
    WorkPeriod::Custom,
];

pub const PAYMENT_PERIODS: [PaymentPeriod; 4] = [
    PaymentPeriod::Days1To5,
    PaymentPeriod::Days10To15,
    PaymentPeriod::Days20To30,
    PaymentPeriod::ExactDay,
];

pub const PAYMENT_TIMINGS: [PaymentTiming; 2] =
    [PaymentTiming::SameMonth, PaymentTiming::NextMonth];

/// A timing parameter a payment method may ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parameter {
    WorkPeriod,
    PaymentDelay,
    PaymentPeriod,
    TaxRate,
    PaymentTiming,
    PaymentDay,
    DiscountRate,
}

/// Rules for one payment method
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MethodRules {
    pub method: PaymentMethod,
    pub parameters: &'static [Parameter],
    pub rate_presets: &'static [u8],
    pub suggested_rate: u8,
}

const COOPERATIVE_PARAMETERS: [Parameter; 4] = [
    Parameter::WorkPeriod,
    Parameter::PaymentDelay,
    Parameter::PaymentPeriod,
    Parameter::TaxRate,
];

const DIRECT_PARAMETERS: [Parameter; 3] = [
    Parameter::PaymentTiming,
    Parameter::PaymentDay,
    Parameter::DiscountRate,
];

impl MethodRules {
    pub fn uses(&self, parameter: Parameter) -> bool {
        self.parameters.contains(&parameter)
    }
}

pub fn rules_for(method: PaymentMethod) -> MethodRules {
    match method {
        PaymentMethod::Cooperative => MethodRules {
            method,
            parameters: &COOPERATIVE_PARAMETERS,
            rate_presets: &COOPERATIVE_TAX_PRESETS,
            suggested_rate: 35,
        },
        PaymentMethod::Freelance => direct_rules(method, 33),
        PaymentMethod::Incorporated => direct_rules(method, 20),
        PaymentMethod::Salaried => direct_rules(method, 32),
    }
}

fn direct_rules(method: PaymentMethod, suggested_rate: u8) -> MethodRules {
    MethodRules {
        method,
        parameters: &DIRECT_PARAMETERS,
        rate_presets: &DIRECT_DISCOUNT_PRESETS,
        suggested_rate,
    }
}

/// Rate pre-filled when the user picks a payment method.
pub fn suggested_rate(method: PaymentMethod) -> u8 {
    rules_for(method).suggested_rate
}

/// Whether a day-of-month is in the accepted 1–31 domain.
pub fn is_valid_payment_day(day: i64) -> bool {
    (1..=31).contains(&day)
}

/// Check that a method has the bundle it needs and that its values are in
/// domain.
pub fn check_terms(
    method: PaymentMethod,
    cooperative: Option<&CooperativeTerms>,
    direct: Option<&DirectTerms>,
) -> Result<(), DraftError> {
    match method {
        PaymentMethod::Cooperative => {
            let terms = cooperative.ok_or(DraftError::MissingPaymentTerms)?;
            if terms.work_period == Some(WorkPeriod::Custom) {
                check_work_period_day(terms.custom_work_period_start.as_deref())?;
                check_work_period_day(terms.custom_work_period_end.as_deref())?;
            }
            check_delay(terms.entered_delay_days())?;
            if terms.payment_period == Some(PaymentPeriod::ExactDay) {
                check_day(terms.custom_payment_day.as_deref())?;
            }
            check_rate(terms.rate_percent())
        }
        PaymentMethod::Freelance | PaymentMethod::Incorporated | PaymentMethod::Salaried => {
            let terms = direct.ok_or(DraftError::MissingPaymentTerms)?;
            check_day(terms.custom_payment_day.as_deref())?;
            check_rate(terms.rate_percent())
        }
    }
}

fn check_day(raw: Option<&str>) -> Result<(), DraftError> {
    match raw.and_then(money::parse_whole) {
        Some(day) if !is_valid_payment_day(day) => Err(DraftError::PaymentDayOutOfRange(day)),
        _ => Ok(()),
    }
}

fn check_work_period_day(raw: Option<&str>) -> Result<(), DraftError> {
    match raw.and_then(money::parse_whole) {
        Some(day) if !is_valid_payment_day(day) => Err(DraftError::WorkPeriodDayOutOfRange(day)),
        _ => Ok(()),
    }
}

fn check_delay(days: Option<i64>) -> Result<(), DraftError> {
    match days {
        Some(days) if !(0..=MAX_PAYMENT_DELAY_DAYS).contains(&days) => {
            Err(DraftError::PaymentDelayOutOfRange(days))
        }
        _ => Ok(()),
    }
}

fn check_rate(rate: f64) -> Result<(), DraftError> {
    if rate < 0.0 {
        Err(DraftError::NegativeRate(rate))
    } else {
        Ok(())
    }
}
