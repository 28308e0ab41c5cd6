use std::fmt;

/// Errors from parsing user-typed values (CLI arguments, import files).
///
/// Persisted documents never produce these: stored fields are read fail-soft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    InvalidMonth(String),
    InvalidTime(String),
    InvalidDate(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::InvalidMonth(raw) => write!(f, "invalid month {raw:?} (expected YYYY-MM)"),
            ParseError::InvalidTime(raw) => write!(f, "invalid time {raw:?} (expected HH:MM)"),
            ParseError::InvalidDate(raw) => {
                write!(f, "invalid date {raw:?} (expected YYYY-MM-DD)")
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Errors raised when a shift draft cannot become a stored shift
#[derive(Debug, Clone, PartialEq)]
pub enum DraftError {
    MissingHospital,
    NoWeekdays,
    MissingDate,
    MissingPaymentTerms,
    PaymentDayOutOfRange(i64),
    PaymentDelayOutOfRange(i64),
    WorkPeriodDayOutOfRange(i64),
    NegativeRate(f64),
    Parse(ParseError),
}

impl fmt::Display for DraftError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DraftError::MissingHospital => write!(f, "hospital is required"),
            DraftError::NoWeekdays => write!(f, "at least one weekday must be selected"),
            DraftError::MissingDate => write!(f, "shift date is required"),
            DraftError::MissingPaymentTerms => {
                write!(f, "payment terms do not match the payment method")
            }
            DraftError::PaymentDayOutOfRange(day) => {
                write!(f, "payment day {day} is outside 1-31")
            }
            DraftError::PaymentDelayOutOfRange(days) => write!(
                f,
                "payment delay of {days} days is outside 0-{}",
                crate::rules::MAX_PAYMENT_DELAY_DAYS
            ),
            DraftError::WorkPeriodDayOutOfRange(day) => {
                write!(f, "work period day {day} is outside 1-31")
            }
            DraftError::NegativeRate(rate) => write!(f, "rate {rate}% cannot be negative"),
            DraftError::Parse(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for DraftError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DraftError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ParseError> for DraftError {
    fn from(err: ParseError) -> Self {
        DraftError::Parse(err)
    }
}
