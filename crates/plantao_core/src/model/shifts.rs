//! Recurring ("fixed") shift definitions and the shifts document

use jiff::civil::Weekday;
use serde::{Deserialize, Serialize};

use super::ids::ShiftId;
use super::lenient;
use super::payment::{CooperativeTerms, DirectTerms, PaymentMethod, PaymentTerms};
use crate::error::ParseError;
use crate::money::{self, Conversion};

/// How the user describes their work pattern during onboarding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShiftType {
    Fixed,
    Sporadic,
    Hybrid,
    Organizing,
}

/// Declared cadence of a fixed shift.
///
/// Occurrence expansion treats every cadence as weekly; the cadence only
/// feeds [`Recurrence::monthly_multiplier`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Recurrence {
    #[default]
    #[serde(rename = "semanal")]
    Weekly,
    #[serde(rename = "quinzenal")]
    Biweekly,
    #[serde(rename = "mensal")]
    Monthly,
}

impl Recurrence {
    pub fn monthly_multiplier(self) -> u32 {
        match self {
            Recurrence::Weekly => 4,
            Recurrence::Biweekly => 2,
            Recurrence::Monthly => 1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Recurrence::Weekly => "Toda semana",
            Recurrence::Biweekly => "A cada 15 dias",
            Recurrence::Monthly => "1x por mês",
        }
    }
}

/// Shift length options offered when creating a fixed shift
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShiftDuration {
    #[serde(rename = "diurno-6h")]
    Day6h,
    #[serde(rename = "diurno-12h")]
    Day12h,
    #[serde(rename = "noturno-12h")]
    Night12h,
}

impl ShiftDuration {
    pub const ALL: [ShiftDuration; 3] = [
        ShiftDuration::Day6h,
        ShiftDuration::Day12h,
        ShiftDuration::Night12h,
    ];

    pub fn hours(self) -> u8 {
        match self {
            ShiftDuration::Day6h => 6,
            ShiftDuration::Day12h | ShiftDuration::Night12h => 12,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ShiftDuration::Day6h => "Plantão diurno 6h",
            ShiftDuration::Day12h => "Plantão diurno 12h",
            ShiftDuration::Night12h => "Plantão noturno 12h",
        }
    }
}

/// A recurring shift as stored in the shifts document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftDefinition {
    #[serde(default)]
    pub id: ShiftId,
    #[serde(default, deserialize_with = "lenient::string")]
    pub hospital: String,
    #[serde(
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub sector: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::choice",
        skip_serializing_if = "Option::is_none"
    )]
    pub duration: Option<ShiftDuration>,
    #[serde(
        default,
        deserialize_with = "lenient::choice",
        skip_serializing_if = "Option::is_none"
    )]
    pub recurrence: Option<Recurrence>,
    /// Weekdays in the order the user picked them
    #[serde(default, with = "weekday_names")]
    pub days_of_week: Vec<Weekday>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub start_time: String,
    /// Derived from `start_time + duration` once, when the shift is created
    #[serde(default, deserialize_with = "lenient::string")]
    pub end_time: String,
    #[serde(
        default,
        deserialize_with = "lenient::choice",
        skip_serializing_if = "Option::is_none"
    )]
    pub payment_method: Option<PaymentMethod>,
    #[serde(
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub gross_value: Option<String>,
    /// Effective rate, already resolved from preset or custom input
    #[serde(
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub discount_rate: Option<String>,
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
}

impl ShiftDefinition {
    pub fn occurs_on(&self, weekday: Weekday) -> bool {
        self.days_of_week.contains(&weekday)
    }

    pub fn recurrence(&self) -> Recurrence {
        self.recurrence.unwrap_or_default()
    }

    pub fn terms(&self) -> Option<PaymentTerms<'_>> {
        PaymentTerms::select(
            self.payment_method,
            self.cooperative_terms.as_ref(),
            self.direct_terms.as_ref(),
        )
    }

    /// Gross/net/tax for one occurrence, from the stored top-level values.
    pub fn conversion(&self) -> Conversion {
        Conversion::new(
            self.gross_value.as_deref().map(money::parse_decimal).unwrap_or(0.0),
            self.discount_rate.as_deref().map(money::parse_decimal).unwrap_or(0.0),
        )
    }
}

/// The per-user shifts document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftsDocument {
    #[serde(
        default,
        deserialize_with = "lenient::choice",
        skip_serializing_if = "Option::is_none"
    )]
    pub shift_type: Option<ShiftType>,
    #[serde(default, deserialize_with = "lenient_shift_list")]
    pub fixed_shifts: Vec<ShiftDefinition>,
}

impl ShiftsDocument {
    pub fn find(&self, id: &ShiftId) -> Option<&ShiftDefinition> {
        self.fixed_shifts.iter().find(|s| &s.id == id)
    }

    /// Remove a definition by id, returning it if present.
    pub fn remove(&mut self, id: &ShiftId) -> Option<ShiftDefinition> {
        let index = self.fixed_shifts.iter().position(|s| &s.id == id)?;
        Some(self.fixed_shifts.remove(index))
    }
}

/// Each element is read on its own so one broken shift does not hide the rest.
fn lenient_shift_list<'de, D>(deserializer: D) -> Result<Vec<ShiftDefinition>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(lenient::elements(deserializer)?
        .into_iter()
        .filter_map(|v| serde_json::from_value(v).ok())
        .collect())
}

/// Minutes since midnight for an `HH:MM` string.
pub fn clock_minutes(raw: &str) -> Option<i32> {
    let (h, m) = raw.trim().split_once(':')?;
    let h = money::parse_whole(h)?;
    let m = money::parse_whole(m)?;
    if !(0..24).contains(&h) || !(0..60).contains(&m) {
        return None;
    }
    Some((h * 60 + m) as i32)
}

/// `HH:MM` of `start + duration`, wrapping past midnight.
pub fn end_time_for(start: &str, duration: ShiftDuration) -> Result<String, ParseError> {
    let minutes =
        clock_minutes(start).ok_or_else(|| ParseError::InvalidTime(start.to_string()))?;
    let hour = (minutes / 60 + i32::from(duration.hours())) % 24;
    Ok(format!("{:02}:{:02}", hour, minutes % 60))
}

/// Portuguese weekday name used in stored documents.
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Sunday => "Domingo",
        Weekday::Monday => "Segunda-feira",
        Weekday::Tuesday => "Terça-feira",
        Weekday::Wednesday => "Quarta-feira",
        Weekday::Thursday => "Quinta-feira",
        Weekday::Friday => "Sexta-feira",
        Weekday::Saturday => "Sábado",
    }
}

pub fn parse_weekday(name: &str) -> Option<Weekday> {
    let name = name.trim();
    [
        Weekday::Sunday,
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
    ]
    .into_iter()
    .find(|&d| weekday_name(d).eq_ignore_ascii_case(name))
}

/// Weekday sets as lists of Portuguese names.
///
/// Unknown names are skipped and repeats collapse, keeping the first position.
pub mod weekday_names {
    use jiff::civil::Weekday;
    use serde::ser::SerializeSeq;
    use serde::{Deserializer, Serializer};

    pub fn serialize<S>(days: &[Weekday], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(days.len()))?;
        for day in days {
            seq.serialize_element(super::weekday_name(*day))?;
        }
        seq.end()
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<Weekday>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = super::lenient::elements(deserializer)?;
        let mut days = Vec::with_capacity(raw.len());
        for day in raw
            .iter()
            .filter_map(|v| v.as_str())
            .filter_map(super::parse_weekday)
        {
            if !days.contains(&day) {
                days.push(day);
            }
        }
        Ok(days)
    }
}
