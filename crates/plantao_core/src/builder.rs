//! Shift drafts
//!
//! Drafts are what the add-shift flows collect. Building a draft validates
//! it, derives the stored fields and assigns a fresh id.
//!
//! ```ignore
//! use plantao_core::builder::ShiftDraft;
//! use plantao_core::model::{CooperativeTerms, PaymentPeriod, ShiftDuration};
//! use jiff::civil::Weekday;
//!
//! let shift = ShiftDraft::new("Hospital das Clínicas")
//!     .weekdays([Weekday::Monday, Weekday::Thursday])
//!     .starting_at("07:00")
//!     .duration(ShiftDuration::Day12h)
//!     .cooperative(
//!         CooperativeTerms::new("Coopmed")
//!             .delay_days(45)
//!             .period(PaymentPeriod::Days10To15)
//!             .gross("1.500,00")
//!             .tax_rate("35"),
//!     )
//!     .build()?;
//! ```

use jiff::civil::{Date, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{DraftError, ParseError};
use crate::model::{
    CooperativeTerms, DirectTerms, PaymentMethod, PaymentTerms, RecordedPaymentStatus,
    Recurrence, ShiftDefinition, ShiftDuration, ShiftId, SporadicId, SporadicShift,
    clock_minutes, end_time_for, weekday_names,
};
use crate::money;
use crate::payment_date::{display_date, predict_payment_date};
use crate::rules;

/// A recurring shift before it is stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftDraft {
    pub hospital: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sector: Option<String>,
    #[serde(default = "default_duration")]
    pub duration: ShiftDuration,
    #[serde(default)]
    pub recurrence: Recurrence,
    #[serde(default, with = "weekday_names")]
    pub days_of_week: Vec<Weekday>,
    pub start_time: String,
    pub payment_method: PaymentMethod,
    #[serde(rename = "cooperativaData", default, skip_serializing_if = "Option::is_none")]
    pub cooperative_terms: Option<CooperativeTerms>,
    #[serde(rename = "directPaymentData", default, skip_serializing_if = "Option::is_none")]
    pub direct_terms: Option<DirectTerms>,
}

fn default_duration() -> ShiftDuration {
    ShiftDuration::Day12h
}

impl ShiftDraft {
    pub fn new(hospital: impl Into<String>) -> Self {
        Self {
            hospital: hospital.into(),
            sector: None,
            duration: default_duration(),
            recurrence: Recurrence::Weekly,
            days_of_week: Vec::new(),
            start_time: String::new(),
            payment_method: PaymentMethod::Cooperative,
            cooperative_terms: None,
            direct_terms: None,
        }
    }

    pub fn sector(mut self, sector: impl Into<String>) -> Self {
        self.sector = Some(sector.into());
        self
    }

    pub fn duration(mut self, duration: ShiftDuration) -> Self {
        self.duration = duration;
        self
    }

    pub fn recurrence(mut self, recurrence: Recurrence) -> Self {
        self.recurrence = recurrence;
        self
    }

    /// Toggle-style weekday selection: repeats are ignored.
    pub fn weekdays(mut self, days: impl IntoIterator<Item = Weekday>) -> Self {
        for day in days {
            if !self.days_of_week.contains(&day) {
                self.days_of_week.push(day);
            }
        }
        self
    }

    pub fn starting_at(mut self, time: impl Into<String>) -> Self {
        self.start_time = time.into();
        self
    }

    pub fn cooperative(mut self, terms: CooperativeTerms) -> Self {
        self.payment_method = PaymentMethod::Cooperative;
        self.cooperative_terms = Some(terms);
        self.direct_terms = None;
        self
    }

    /// Paid directly by the hospital (`pf`, `pj` or `clt`).
    pub fn direct(mut self, method: PaymentMethod, terms: DirectTerms) -> Self {
        self.payment_method = method;
        self.direct_terms = Some(terms);
        self.cooperative_terms = None;
        self
    }

    pub fn build(self) -> Result<ShiftDefinition, DraftError> {
        let hospital = self.hospital.trim().to_string();
        if hospital.is_empty() {
            return Err(DraftError::MissingHospital);
        }
        if self.days_of_week.is_empty() {
            return Err(DraftError::NoWeekdays);
        }
        let end_time = end_time_for(&self.start_time, self.duration)?;
        let (cooperative_terms, direct_terms) =
            matching_terms(self.payment_method, self.cooperative_terms, self.direct_terms)?;

        let terms = PaymentTerms::select(
            Some(self.payment_method),
            cooperative_terms.as_ref(),
            direct_terms.as_ref(),
        )
        .ok_or(DraftError::MissingPaymentTerms)?;
        let gross_value = match terms {
            PaymentTerms::Cooperative(c) => c.gross_value.clone(),
            PaymentTerms::Direct(d) => d.gross_value.clone(),
        };
        let discount_rate = Some(money::format_rate(terms.rate_percent()));

        Ok(ShiftDefinition {
            id: ShiftId::generate(),
            hospital,
            sector: self.sector.filter(|s| !s.trim().is_empty()),
            duration: Some(self.duration),
            recurrence: Some(self.recurrence),
            days_of_week: self.days_of_week,
            start_time: self.start_time.trim().to_string(),
            end_time,
            payment_method: Some(self.payment_method),
            gross_value,
            discount_rate,
            cooperative_terms,
            direct_terms,
        })
    }
}

/// A one-off shift before it is stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SporadicDraft {
    pub hospital: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sector: Option<String>,
    #[serde(default)]
    pub date: Option<Date>,
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub end_time: String,
    #[serde(default)]
    pub already_realized: bool,
    pub payment_method: PaymentMethod,
    #[serde(rename = "cooperativaData", default, skip_serializing_if = "Option::is_none")]
    pub cooperative_terms: Option<CooperativeTerms>,
    #[serde(rename = "directPaymentData", default, skip_serializing_if = "Option::is_none")]
    pub direct_terms: Option<DirectTerms>,
}

impl SporadicDraft {
    pub fn new(hospital: impl Into<String>, date: Date) -> Self {
        Self {
            hospital: hospital.into(),
            sector: None,
            date: Some(date),
            start_time: String::new(),
            end_time: String::new(),
            already_realized: false,
            payment_method: PaymentMethod::Cooperative,
            cooperative_terms: None,
            direct_terms: None,
        }
    }

    pub fn sector(mut self, sector: impl Into<String>) -> Self {
        self.sector = Some(sector.into());
        self
    }

    pub fn times(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.start_time = start.into();
        self.end_time = end.into();
        self
    }

    pub fn already_realized(mut self) -> Self {
        self.already_realized = true;
        self
    }

    pub fn cooperative(mut self, terms: CooperativeTerms) -> Self {
        self.payment_method = PaymentMethod::Cooperative;
        self.cooperative_terms = Some(terms);
        self.direct_terms = None;
        self
    }

    pub fn direct(mut self, method: PaymentMethod, terms: DirectTerms) -> Self {
        self.payment_method = method;
        self.direct_terms = Some(terms);
        self.cooperative_terms = None;
        self
    }

    /// Validate and stamp the shift. The predicted payment date is cached in
    /// display form.
    pub fn build(self) -> Result<SporadicShift, DraftError> {
        let hospital = self.hospital.trim().to_string();
        if hospital.is_empty() {
            return Err(DraftError::MissingHospital);
        }
        let date = self.date.ok_or(DraftError::MissingDate)?;
        check_time(&self.start_time)?;
        check_time(&self.end_time)?;
        let (cooperative_terms, direct_terms) =
            matching_terms(self.payment_method, self.cooperative_terms, self.direct_terms)?;

        let predicted_payment_date = PaymentTerms::select(
            Some(self.payment_method),
            cooperative_terms.as_ref(),
            direct_terms.as_ref(),
        )
        .and_then(|terms| predict_payment_date(date, terms))
        .map(|payment| display_date(payment.date));

        Ok(SporadicShift {
            id: SporadicId::generate(),
            hospital,
            sector: self.sector.filter(|s| !s.trim().is_empty()),
            date: Some(date),
            start_time: self.start_time.trim().to_string(),
            end_time: self.end_time.trim().to_string(),
            already_realized: self.already_realized,
            payment_method: Some(self.payment_method),
            cooperative_terms,
            direct_terms,
            payment_status: RecordedPaymentStatus::Pending,
            predicted_payment_date,
        })
    }
}

/// Keep only the bundle the method uses, after checking it.
fn matching_terms(
    method: PaymentMethod,
    cooperative: Option<CooperativeTerms>,
    direct: Option<DirectTerms>,
) -> Result<(Option<CooperativeTerms>, Option<DirectTerms>), DraftError> {
    rules::check_terms(method, cooperative.as_ref(), direct.as_ref())?;
    if method.is_cooperative() {
        Ok((cooperative, None))
    } else {
        Ok((None, direct))
    }
}

fn check_time(raw: &str) -> Result<(), ParseError> {
    if raw.trim().is_empty() || clock_minutes(raw).is_some() {
        Ok(())
    } else {
        Err(ParseError::InvalidTime(raw.to_string()))
    }
}
