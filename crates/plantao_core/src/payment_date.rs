//! Payment-date prediction
//!
//! Target dates are built with JavaScript-style overflow (`day 30` of
//! February is the 1st or 2nd of March) and roll forward by one month with
//! the same rule. Comparisons are strict: a candidate that lands exactly on
//! its reference date does not roll.

use jiff::civil::Date;

use crate::date_math::{add_months_overflowing, checked_add_days, days_between, overflowing_date};
use crate::model::{
    CooperativeTerms, DirectTerms, PaymentPeriod, PaymentPrediction, PaymentTerms, PaymentTiming,
};

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "jan", "fev", "mar", "abr", "mai", "jun", "jul", "ago", "set", "out", "nov", "dez",
];

/// Predict when the pay for a shift worked on `date` is credited.
///
/// `None` when the terms push the payment past the last representable date;
/// such an occurrence never lands in any month.
pub fn predict_payment_date(date: Date, terms: PaymentTerms<'_>) -> Option<PaymentPrediction> {
    match terms {
        PaymentTerms::Cooperative(coop) => predict_cooperative(date, coop),
        PaymentTerms::Direct(direct) => predict_direct(date, direct),
    }
}

fn predict_cooperative(date: Date, terms: &CooperativeTerms) -> Option<PaymentPrediction> {
    let base = checked_add_days(date, terms.resolved_delay_days())?;

    let target = match terms.payment_period {
        Some(PaymentPeriod::ExactDay) => terms
            .resolved_exact_day()
            .map(|day| (day, format!("Dia {day}"))),
        Some(period) => period
            .window()
            .map(|(day, label)| (day, label.to_string())),
        None => None,
    };

    match target {
        Some((day, label)) => {
            let candidate = overflowing_date(base.year() as i32, base.month() as i32, day)?;
            Some(PaymentPrediction {
                label,
                date: roll_forward_before(candidate, base)?,
            })
        }
        None => Some(PaymentPrediction {
            label: short_date(base),
            date: base,
        }),
    }
}

fn predict_direct(date: Date, terms: &DirectTerms) -> Option<PaymentPrediction> {
    let timing = terms.resolved_timing();
    let year = date.year() as i32;
    let month = date.month() as i32;

    if let Some(day) = terms.resolved_day() {
        let candidate = overflowing_date(year, month, day)?;
        let accepted = timing == PaymentTiming::SameMonth && candidate >= date;
        return Some(PaymentPrediction {
            label: format!("Dia {day}"),
            date: if accepted {
                candidate
            } else {
                add_months_overflowing(candidate, 1)?
            },
        });
    }

    let prediction = match timing {
        PaymentTiming::SameMonth => PaymentPrediction {
            label: "Mesmo mês".to_string(),
            date: overflowing_date(year, month + 1, 0)?,
        },
        PaymentTiming::NextMonth => PaymentPrediction {
            label: "Mês seguinte".to_string(),
            date: overflowing_date(year, month + 3, 0)?,
        },
    };
    Some(prediction)
}

/// Move `candidate` one month later if it falls strictly before `reference`.
fn roll_forward_before(candidate: Date, reference: Date) -> Option<Date> {
    if candidate < reference {
        add_months_overflowing(candidate, 1)
    } else {
        Some(candidate)
    }
}

/// `"1 mar"`
pub fn short_date(date: Date) -> String {
    format!(
        "{} {}",
        date.day(),
        MONTH_ABBREVIATIONS[(date.month() - 1) as usize]
    )
}

/// `dd/MM/yyyy`
pub fn display_date(date: Date) -> String {
    format!("{:02}/{:02}/{:04}", date.day(), date.month(), date.year())
}

/// Days a payment is overdue, or `None` when it is not yet due.
///
/// Due today is not overdue.
pub fn payment_delay_days(expected: Date, today: Date) -> Option<i64> {
    if today <= expected {
        None
    } else {
        Some(days_between(expected, today) as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;

    #[test]
    fn test_short_and_display_dates() {
        assert_eq!(short_date(date(2024, 3, 1)), "1 mar");
        assert_eq!(short_date(date(2024, 12, 25)), "25 dez");
        assert_eq!(display_date(date(2024, 3, 5)), "05/03/2024");
    }

    #[test]
    fn test_roll_forward_is_strict() {
        let day = date(2024, 3, 5);
        assert_eq!(roll_forward_before(day, day), Some(day));
        assert_eq!(roll_forward_before(day, date(2024, 3, 6)), Some(date(2024, 4, 5)));
    }
}
