mod ids;
pub mod lenient;
mod payment;
mod profile;
mod report;
mod shifts;
mod sporadic;
mod status;

pub use ids::{OccurrenceId, ShiftId, SporadicId};
pub use payment::{
    CooperativeTerms, DEFAULT_PAYMENT_DELAY_DAYS, DirectTerms, PaymentMethod, PaymentPeriod,
    PaymentTerms, PaymentTiming, WorkPeriod,
};
pub use profile::Profile;
pub use report::{
    ConfirmedPayment, MonthlyReport, PaymentPrediction, ShiftKind, ShiftRecord,
};
pub use shifts::{
    Recurrence, ShiftDefinition, ShiftDuration, ShiftType, ShiftsDocument, clock_minutes,
    end_time_for, parse_weekday, weekday_name, weekday_names,
};
pub use sporadic::{
    RecordedPaymentStatus, SporadicEstimate, SporadicShift, sporadic_list_from_value,
};
pub use status::{
    PaymentStatus, StatusAction, StatusBook, StatusMap, UnknownAction, WorkStatus,
};
