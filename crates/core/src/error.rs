//! Domain error types for the trip ledger.

use chrono::NaiveDate;
use journey_shared::AppError;
use journey_shared::types::{Currency, ItineraryId};
use thiserror::Error;

use crate::plan::TravelStatus;

/// Result alias for ledger operations.
pub type LedgerResult<T> = Result<T, LedgerError>;

/// A rejected field value. Carries enough context to tell the client what to fix.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Required text field is blank.
    #[error("{field} must not be empty")]
    Empty {
        /// Field name.
        field: &'static str,
    },

    /// Text length outside the accepted range.
    #[error("{field} must be between {min} and {max} characters")]
    Length {
        /// Field name.
        field: &'static str,
        /// Minimum length.
        min: usize,
        /// Maximum length.
        max: usize,
    },

    /// End date precedes start date.
    #[error("end date {end} is before start date {start}")]
    DateRange {
        /// Start date.
        start: NaiveDate,
        /// End date.
        end: NaiveDate,
    },

    /// A date that must fall inside the plan's range does not.
    #[error("date {date} is outside the plan range {start}..={end}")]
    DateOutsidePlan {
        /// Offending date.
        date: NaiveDate,
        /// Plan start.
        start: NaiveDate,
        /// Plan end.
        end: NaiveDate,
    },

    /// End time precedes start time.
    #[error("end time must not be before start time")]
    TimeRange,

    /// Monetary value below zero.
    #[error("{field} must not be negative")]
    Negative {
        /// Field name.
        field: &'static str,
    },

    /// Numeric value outside its allowed range.
    #[error("{field} is out of range")]
    OutOfRange {
        /// Field name.
        field: &'static str,
    },

    /// Monetary value too large to record, or a derived total that overflows.
    #[error("{field} is too large to record")]
    AmountOutOfRange {
        /// Field name.
        field: &'static str,
    },

    /// Value carries more decimal places than are stored.
    #[error("{field} allows at most {max_scale} decimal places")]
    TooPrecise {
        /// Field name.
        field: &'static str,
        /// Decimal places kept.
        max_scale: u32,
    },

    /// Exchange rate is zero or negative.
    #[error("exchange rate must be positive")]
    NonPositiveRate,

    /// Foreign-currency expense submitted without a rate.
    #[error("an exchange rate is required to record {from} in a {to} plan")]
    RateRequired {
        /// Expense currency.
        from: Currency,
        /// Plan currency.
        to: Currency,
    },

    /// Same-currency expense submitted with a rate other than 1.
    #[error("exchange rate must be 1 when the expense is in the plan currency")]
    RateMustBeOne,

    /// Rating outside 1..=5.
    #[error("rating must be between 1 and 5, got {0}")]
    Rating(i16),

    /// Referenced itinerary item does not belong to the plan.
    #[error("itinerary item {0} does not belong to this plan")]
    ForeignItinerary(ItineraryId),

    /// Plan currency change after expenses were recorded.
    #[error("plan currency cannot change once expenses exist")]
    CurrencyLocked,

    /// Malformed email address.
    #[error("invalid email address")]
    Email,

    /// Phone number with the wrong digit count.
    #[error("phone number must contain 10 to 20 digits")]
    Phone,

    /// Password shorter than the minimum.
    #[error("password must be at least {min} characters")]
    PasswordTooShort {
        /// Minimum length.
        min: usize,
    },
}

/// Errors raised by trip ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Status change not permitted by the lifecycle table.
    #[error("Invalid status transition from {from} to {to}")]
    InvalidTransition {
        /// Current status.
        from: TravelStatus,
        /// Requested status.
        to: TravelStatus,
    },

    /// Input failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Entity missing or hidden from the requester.
    #[error("{entity} {key} not found")]
    NotFound {
        /// Entity kind.
        entity: &'static str,
        /// Lookup key.
        key: String,
    },

    /// Requester may see the entity but not change it.
    #[error("{0}")]
    Forbidden(String),

    /// The plan's status does not accept this kind of write.
    #[error("Cannot {action} while the plan is {status}")]
    PlanNotEditable {
        /// Current plan status.
        status: TravelStatus,
        /// Rejected action.
        action: &'static str,
    },

    /// Unique key clash or stale version.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Storage failure.
    #[error("Database error: {0}")]
    Database(String),
}

impl LedgerError {
    /// Shorthand for [`LedgerError::NotFound`].
    pub fn not_found(entity: &'static str, key: impl std::fmt::Display) -> Self {
        Self::NotFound {
            entity,
            key: key.to_string(),
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::Forbidden(_) => 403,
            Self::NotFound { .. } => 404,
            Self::Conflict(_) => 409,
            Self::InvalidTransition { .. } | Self::PlanNotEditable { .. } => 422,
            Self::Database(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::PlanNotEditable { .. } => "PLAN_NOT_EDITABLE",
            Self::Conflict(_) => "CONFLICT",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        let message = err.to_string();
        match err {
            LedgerError::InvalidTransition { .. } | LedgerError::PlanNotEditable { .. } => {
                Self::BusinessRule(message)
            }
            LedgerError::Validation(_) => Self::Validation(message),
            LedgerError::NotFound { .. } => Self::NotFound(message),
            LedgerError::Forbidden(_) => Self::Forbidden(message),
            LedgerError::Conflict(_) => Self::Conflict(message),
            LedgerError::Database(_) => Self::Database(message),
        }
    }
}
