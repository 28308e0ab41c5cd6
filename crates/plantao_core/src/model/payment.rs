//! Payment methods and their parameter bundles
//!
//! A shift is paid either through a cooperative (which closes a work period,
//! waits a delay and pays inside a period of the month) or directly by the
//! hospital (freelance/RPA, incorporated/PJ or salaried/CLT, paid on a day of
//! the same or the following month). The bundles keep the raw form values;
//! the accessors below resolve presets, custom overrides and defaults.

use serde::{Deserialize, Serialize};

use super::lenient;
use crate::money::{self, CUSTOM_OPTION, Conversion};

/// Delay applied when a cooperative bundle has no usable delay
pub const DEFAULT_PAYMENT_DELAY_DAYS: i32 = 30;

/// How a shift is paid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[serde(rename = "cooperativa")]
    Cooperative,
    /// Pessoa física, paid through RPA
    #[serde(rename = "pf")]
    Freelance,
    /// Paid against an invoice from the worker's own company
    #[serde(rename = "pj")]
    Incorporated,
    #[serde(rename = "clt")]
    Salaried,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 4] = [
        PaymentMethod::Cooperative,
        PaymentMethod::Freelance,
        PaymentMethod::Incorporated,
        PaymentMethod::Salaried,
    ];

    pub fn is_cooperative(self) -> bool {
        matches!(self, PaymentMethod::Cooperative)
    }

    pub fn label(self) -> &'static str {
        match self {
            PaymentMethod::Cooperative => "Cooperativa",
            PaymentMethod::Freelance => "Pessoa Física (RPA / autônomo)",
            PaymentMethod::Incorporated => "PJ (CNPJ próprio / Nota Fiscal)",
            PaymentMethod::Salaried => "Contratado CLT",
        }
    }
}

/// Window of days a cooperative groups into one payment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkPeriod {
    #[serde(rename = "21-20")]
    Day21To20,
    #[serde(rename = "20-20")]
    Day20To20,
    #[serde(rename = "1-30")]
    FullMonth,
    #[serde(rename = "25-25")]
    Day25To25,
    #[serde(rename = "outro")]
    Custom,
}

impl WorkPeriod {
    /// Start and closing day-of-month; `None` for [`WorkPeriod::Custom`].
    pub fn days(self) -> Option<(i32, i32)> {
        match self {
            WorkPeriod::Day21To20 => Some((21, 20)),
            WorkPeriod::Day20To20 => Some((20, 20)),
            WorkPeriod::FullMonth => Some((1, 31)),
            WorkPeriod::Day25To25 => Some((25, 25)),
            WorkPeriod::Custom => None,
        }
    }
}

/// Part of the month in which a cooperative pays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentPeriod {
    #[serde(rename = "1-5")]
    Days1To5,
    #[serde(rename = "10-15")]
    Days10To15,
    #[serde(rename = "20-30")]
    Days20To30,
    #[serde(rename = "exato")]
    ExactDay,
}

impl PaymentPeriod {
    /// Day payments in a range are assumed to land on (its last day) and the
    /// range's label. `None` for [`PaymentPeriod::ExactDay`], whose day and
    /// label come from the bundle.
    pub fn window(self) -> Option<(i32, &'static str)> {
        match self {
            PaymentPeriod::Days1To5 => Some((5, "Entre dias 1-5")),
            PaymentPeriod::Days10To15 => Some((15, "Entre dias 10-15")),
            PaymentPeriod::Days20To30 => Some((30, "Entre dias 20-30")),
            PaymentPeriod::ExactDay => None,
        }
    }
}

/// Whether a direct payment covers the month it is paid in or the previous one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PaymentTiming {
    #[serde(rename = "mesmo-mes")]
    SameMonth,
    #[default]
    #[serde(rename = "mes-seguinte")]
    NextMonth,
}

/// Cooperative parameter bundle (`cooperativaData`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CooperativeTerms {
    #[serde(
        rename = "cooperativa",
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub cooperative: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::choice",
        skip_serializing_if = "Option::is_none"
    )]
    pub work_period: Option<WorkPeriod>,
    #[serde(
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub custom_work_period_start: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub custom_work_period_end: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub payment_delay: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub custom_payment_delay: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::choice",
        skip_serializing_if = "Option::is_none"
    )]
    pub payment_period: Option<PaymentPeriod>,
    #[serde(
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub custom_payment_day: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub gross_value: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub tax_rate: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub custom_tax_rate: Option<String>,
}

impl CooperativeTerms {
    pub fn new(cooperative: impl Into<String>) -> Self {
        Self {
            cooperative: Some(cooperative.into()),
            ..Default::default()
        }
    }

    pub fn work_period(mut self, period: WorkPeriod) -> Self {
        self.work_period = Some(period);
        self
    }

    pub fn custom_work_period(mut self, start: u8, end: u8) -> Self {
        self.work_period = Some(WorkPeriod::Custom);
        self.custom_work_period_start = Some(start.to_string());
        self.custom_work_period_end = Some(end.to_string());
        self
    }

    /// Set the payment delay, stored as a preset when it is one.
    pub fn delay_days(mut self, days: u16) -> Self {
        if crate::rules::COOPERATIVE_DELAY_PRESETS.contains(&days) {
            self.payment_delay = Some(days.to_string());
            self.custom_payment_delay = None;
        } else {
            self.payment_delay = Some(CUSTOM_OPTION.to_string());
            self.custom_payment_delay = Some(days.to_string());
        }
        self
    }

    pub fn period(mut self, period: PaymentPeriod) -> Self {
        self.payment_period = Some(period);
        self
    }

    pub fn exact_day(mut self, day: u8) -> Self {
        self.payment_period = Some(PaymentPeriod::ExactDay);
        self.custom_payment_day = Some(day.to_string());
        self
    }

    pub fn gross(mut self, gross: impl Into<String>) -> Self {
        self.gross_value = Some(gross.into());
        self
    }

    /// Set the tax rate, stored as a preset when it is one.
    pub fn tax_rate(mut self, rate: impl Into<String>) -> Self {
        let rate = rate.into();
        if crate::rules::COOPERATIVE_TAX_PRESETS
            .iter()
            .any(|p| p.to_string() == rate)
        {
            self.tax_rate = Some(rate);
            self.custom_tax_rate = None;
        } else {
            self.tax_rate = Some(CUSTOM_OPTION.to_string());
            self.custom_tax_rate = Some(rate);
        }
        self
    }

    /// Days between the shift and the start of the payment window.
    ///
    /// A non-empty custom delay wins over the preset; nothing readable falls
    /// back to [`DEFAULT_PAYMENT_DELAY_DAYS`].
    pub fn resolved_delay_days(&self) -> i32 {
        self.entered_delay_days()
            .filter(|d| *d >= 0)
            .and_then(|d| i32::try_from(d).ok())
            .unwrap_or(DEFAULT_PAYMENT_DELAY_DAYS)
    }

    /// The delay as typed (custom value first), before any range check.
    pub fn entered_delay_days(&self) -> Option<i64> {
        first_filled(&self.custom_payment_delay, &self.payment_delay).and_then(money::parse_whole)
    }

    /// The exact payment day, when one was entered and is a valid day-of-month.
    pub fn resolved_exact_day(&self) -> Option<i32> {
        self.custom_payment_day
            .as_deref()
            .and_then(money::parse_whole)
            .and_then(valid_day)
    }

    /// Start and closing day of the work period.
    pub fn resolved_work_window(&self) -> Option<(i32, i32)> {
        match self.work_period? {
            WorkPeriod::Custom => {
                let start = self
                    .custom_work_period_start
                    .as_deref()
                    .and_then(money::parse_whole)
                    .and_then(valid_day)?;
                let end = self
                    .custom_work_period_end
                    .as_deref()
                    .and_then(money::parse_whole)
                    .and_then(valid_day)?;
                Some((start, end))
            }
            preset => preset.days(),
        }
    }

    pub fn rate_percent(&self) -> f64 {
        money::resolve_rate(self.tax_rate.as_deref(), self.custom_tax_rate.as_deref())
    }

    pub fn gross_amount(&self) -> f64 {
        self.gross_value.as_deref().map(money::parse_decimal).unwrap_or(0.0)
    }
}

/// Direct payment bundle (`directPaymentData`), shared by pf/pj/clt
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectTerms {
    #[serde(
        default,
        deserialize_with = "lenient::choice",
        skip_serializing_if = "Option::is_none"
    )]
    pub payment_timing: Option<PaymentTiming>,
    /// Wizard answer to "is this payment for the previous month?" (`sim`/`nao`)
    #[serde(
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub pays_next_month: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub payment_day: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub custom_payment_day: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub gross_value: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub discount_rate: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub custom_discount_rate: Option<String>,
}

impl DirectTerms {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn timing(mut self, timing: PaymentTiming) -> Self {
        self.payment_timing = Some(timing);
        self.pays_next_month = Some(
            match timing {
                PaymentTiming::SameMonth => "nao",
                PaymentTiming::NextMonth => "sim",
            }
            .to_string(),
        );
        self
    }

    pub fn same_month(self) -> Self {
        self.timing(PaymentTiming::SameMonth)
    }

    pub fn next_month(self) -> Self {
        self.timing(PaymentTiming::NextMonth)
    }

    /// Set the payment day, stored as a preset when it is one.
    pub fn day(mut self, day: u8) -> Self {
        if crate::rules::DIRECT_PAYMENT_DAY_PRESETS.contains(&day) {
            self.payment_day = Some(day.to_string());
            self.custom_payment_day = None;
        } else {
            self.payment_day = Some(CUSTOM_OPTION.to_string());
            self.custom_payment_day = Some(day.to_string());
        }
        self
    }

    pub fn gross(mut self, gross: impl Into<String>) -> Self {
        self.gross_value = Some(gross.into());
        self
    }

    /// Set the discount rate, stored as a preset when it is one.
    pub fn discount_rate(mut self, rate: impl Into<String>) -> Self {
        let rate = rate.into();
        if crate::rules::DIRECT_DISCOUNT_PRESETS
            .iter()
            .any(|p| p.to_string() == rate)
        {
            self.discount_rate = Some(rate);
            self.custom_discount_rate = None;
        } else {
            self.discount_rate = Some(CUSTOM_OPTION.to_string());
            self.custom_discount_rate = Some(rate);
        }
        self
    }

    /// Same-month or next-month payment.
    ///
    /// An explicit `paymentTiming` wins; otherwise the wizard's
    /// `paysNextMonth == "nao"` answer means same-month.
    pub fn resolved_timing(&self) -> PaymentTiming {
        if let Some(timing) = self.payment_timing {
            return timing;
        }
        match self.pays_next_month.as_deref().map(str::trim) {
            Some("nao") | Some("não") => PaymentTiming::SameMonth,
            _ => PaymentTiming::NextMonth,
        }
    }

    /// Day-of-month the payment lands on, custom value first.
    pub fn resolved_day(&self) -> Option<i32> {
        first_filled(&self.custom_payment_day, &self.payment_day)
            .and_then(money::parse_whole)
            .and_then(valid_day)
    }

    pub fn rate_percent(&self) -> f64 {
        money::resolve_rate(
            self.discount_rate.as_deref(),
            self.custom_discount_rate.as_deref(),
        )
    }

    pub fn gross_amount(&self) -> f64 {
        self.gross_value.as_deref().map(money::parse_decimal).unwrap_or(0.0)
    }
}

/// The payment bundle that applies to a shift
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PaymentTerms<'a> {
    Cooperative(&'a CooperativeTerms),
    Direct(&'a DirectTerms),
}

impl<'a> PaymentTerms<'a> {
    /// Pick the bundle for a payment method.
    ///
    /// The cooperative bundle is used only for the cooperative method; any
    /// other shift falls back to its direct bundle. A shift with neither has
    /// no terms and therefore no predicted payment.
    pub fn select(
        method: Option<PaymentMethod>,
        cooperative: Option<&'a CooperativeTerms>,
        direct: Option<&'a DirectTerms>,
    ) -> Option<Self> {
        match (method, cooperative, direct) {
            (Some(PaymentMethod::Cooperative), Some(coop), _) => {
                Some(PaymentTerms::Cooperative(coop))
            }
            (_, _, Some(direct)) => Some(PaymentTerms::Direct(direct)),
            _ => None,
        }
    }

    pub fn gross_amount(&self) -> f64 {
        match self {
            PaymentTerms::Cooperative(c) => c.gross_amount(),
            PaymentTerms::Direct(d) => d.gross_amount(),
        }
    }

    pub fn rate_percent(&self) -> f64 {
        match self {
            PaymentTerms::Cooperative(c) => c.rate_percent(),
            PaymentTerms::Direct(d) => d.rate_percent(),
        }
    }

    pub fn conversion(&self) -> Conversion {
        Conversion::new(self.gross_amount(), self.rate_percent())
    }
}

fn first_filled<'s>(custom: &'s Option<String>, preset: &'s Option<String>) -> Option<&'s str> {
    let custom = custom.as_deref().map(str::trim).filter(|s| !s.is_empty());
    let preset = preset
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty() && *s != CUSTOM_OPTION);
    custom.or(preset)
}

fn valid_day(day: i64) -> Option<i32> {
    (1..=31).contains(&day).then_some(day as i32)
}
