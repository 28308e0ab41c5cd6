//! One-off ("sporadic") shifts and the coarse monthly estimate

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use super::ids::SporadicId;
use super::lenient;
use super::payment::{CooperativeTerms, DirectTerms, PaymentMethod, PaymentTerms};
use crate::money::{self, Conversion};

/// Payment status recorded on the occurrence itself when it was created.
///
/// Informational only: the payment-status map is authoritative, and
/// `Overdue` is never computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordedPaymentStatus {
    #[default]
    Pending,
    Received,
    Overdue,
}

/// A single dated shift
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SporadicShift {
    #[serde(default)]
    pub id: SporadicId,
    #[serde(default, deserialize_with = "lenient::string")]
    pub hospital: String,
    #[serde(
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub sector: Option<String>,
    /// `yyyy-MM-dd`; a shift without a readable date is never placed
    #[serde(default, deserialize_with = "lenient::date")]
    pub date: Option<Date>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub start_time: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub end_time: String,
    #[serde(default)]
    pub already_realized: bool,
    #[serde(
        default,
        deserialize_with = "lenient::choice",
        skip_serializing_if = "Option::is_none"
    )]
    pub payment_method: Option<PaymentMethod>,
    #[serde(
        rename = "cooperativaData",
        default,
        deserialize_with = "lenient::bundle",
        skip_serializing_if = "Option::is_none"
    )]
    pub cooperative_terms: Option<CooperativeTerms>,
    #[serde(
        rename = "directPaymentData",
        default,
        deserialize_with = "lenient::bundle",
        skip_serializing_if = "Option::is_none"
    )]
    pub direct_terms: Option<DirectTerms>,
    #[serde(default, deserialize_with = "lenient_status")]
    pub payment_status: RecordedPaymentStatus,
    /// `dd/MM/yyyy` cached at creation for display
    #[serde(
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub predicted_payment_date: Option<String>,
}

impl SporadicShift {
    pub fn terms(&self) -> Option<PaymentTerms<'_>> {
        PaymentTerms::select(
            self.payment_method,
            self.cooperative_terms.as_ref(),
            self.direct_terms.as_ref(),
        )
    }

    /// Gross/net/tax from the payment bundle; no bundle converts to zero.
    pub fn conversion(&self) -> Conversion {
        self.terms()
            .map(|t| t.conversion())
            .unwrap_or_default()
    }
}

fn lenient_status<'de, D>(deserializer: D) -> Result<RecordedPaymentStatus, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(lenient::choice(deserializer)?.unwrap_or_default())
}

/// Read the sporadic list element by element, dropping unreadable entries.
///
/// An older onboarding flow stored the estimate object under the same key;
/// anything that is not an array reads as an empty list.
pub fn sporadic_list_from_value(value: serde_json::Value) -> Vec<SporadicShift> {
    match value {
        serde_json::Value::Array(items) => items
            .into_iter()
            .filter_map(|v| serde_json::from_value(v).ok())
            .collect(),
        _ => Vec::new(),
    }
}

/// Average-based stand-in for individually recorded sporadic shifts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SporadicEstimate {
    #[serde(default, deserialize_with = "lenient::string")]
    pub average_shifts_per_month: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub average_net_value: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub payment_period: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub custom_payment_day: String,
}

impl SporadicEstimate {
    pub fn new(shifts_per_month: u32, average_net: f64) -> Self {
        Self {
            average_shifts_per_month: shifts_per_month.to_string(),
            average_net_value: money::format_brl(average_net),
            ..Default::default()
        }
    }

    /// Whole shifts per month; negative input counts as none.
    pub fn shifts_per_month(&self) -> i64 {
        money::parse_whole(&self.average_shifts_per_month)
            .unwrap_or(0)
            .max(0)
    }

    pub fn average_net(&self) -> f64 {
        money::parse_decimal(&self.average_net_value)
    }

    /// Flat `average × count` added to the current month's prediction.
    pub fn contribution(&self) -> f64 {
        self.average_net() * self.shifts_per_month() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sporadic_reads_wizard_output() {
        let value = json!({
            "id": "1717171717171",
            "hospital": "Hospital das Clínicas",
            "sector": "",
            "date": "2024-05-20",
            "startTime": "07:00",
            "endTime": "19:00",
            "alreadyRealized": true,
            "paymentMethod": "pf",
            "directPaymentData": {
                "paysNextMonth": "nao",
                "paymentDay": "10",
                "grossValue": "1.200,00",
                "discountRate": "outro",
                "customDiscountRate": "25"
            },
            "paymentStatus": "pending",
            "predictedPaymentDate": "20/05/2024"
        });
        let shift: SporadicShift = serde_json::from_value(value).unwrap();
        assert_eq!(shift.date, Some(jiff::civil::date(2024, 5, 20)));
        assert_eq!(shift.sector, None);
        let c = shift.conversion();
        assert!((c.net - 900.0).abs() < 1e-9);
    }

    #[test]
    fn test_sporadic_list_is_fail_soft() {
        let list = sporadic_list_from_value(json!([
            {"id": "a", "date": "2024-02-30"},
            42,
            {"id": "b", "date": "2024-02-29", "paymentStatus": "weird"}
        ]));
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].date, None);
        assert_eq!(list[1].payment_status, RecordedPaymentStatus::Pending);

        let legacy = sporadic_list_from_value(json!({"averageShiftsPerMonth": "4"}));
        assert!(legacy.is_empty());
    }

    #[test]
    fn test_estimate_contribution() {
        let estimate = SporadicEstimate {
            average_shifts_per_month: "4".into(),
            average_net_value: "1.100,50".into(),
            ..Default::default()
        };
        assert!((estimate.contribution() - 4402.0).abs() < 1e-9);
        assert_eq!(SporadicEstimate::default().contribution(), 0.0);

        let negative = SporadicEstimate {
            average_shifts_per_month: "-4".into(),
            average_net_value: "1.100,50".into(),
            ..Default::default()
        };
        assert_eq!(negative.shifts_per_month(), 0);
        assert_eq!(negative.contribution(), 0.0);
    }
}
