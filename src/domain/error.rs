//! Domain errors and resolution warnings

use chrono::{DateTime, Duration, Utc};
use thiserror::Error;

use crate::domain::units::ChargingRateUnit;

/// A required unit conversion could not be performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum UnitConversionError {
    #[error("cannot convert {from} to {to}: no nominal voltage configured")]
    MissingVoltage {
        from: ChargingRateUnit,
        to: ChargingRateUnit,
    },
}

/// A supplied charging profile violates a data-model invariant.
///
/// The offending profile is excluded from resolution; the call itself keeps
/// going so one malformed profile cannot deny power to a connector governed
/// by other, valid profiles.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProfileInvariantViolation {
    #[error("schedule has no periods")]
    EmptyPeriods,

    #[error("period {index} does not start strictly after its predecessor")]
    UnsortedPeriods { index: usize },

    #[error("period {index} has a negative start offset")]
    NegativeOffset { index: usize },

    #[error("period {index} has a negative limit {limit}")]
    NegativeLimit { index: usize, limit: f64 },

    #[error("period {index} has a non-finite limit")]
    NonFiniteLimit { index: usize },

    #[error("minChargingRate is negative or non-finite")]
    InvalidMinChargingRate,

    #[error("period {index} has numberPhases = 0")]
    ZeroPhases { index: usize },

    #[error("an Absolute or Recurring profile requires startSchedule")]
    MissingStartSchedule,

    #[error("a Relative profile must not carry startSchedule")]
    UnexpectedStartSchedule,

    #[error("a TxProfile requires a transactionId")]
    MissingTransactionId,

    #[error("recurrencyKind given for a non-Recurring profile")]
    RecurrencyOutsideRecurring,

    #[error("a Recurring profile requires recurrencyKind")]
    MissingRecurrencyKind,

    #[error("validFrom {from} is after validTo {to}")]
    InvertedValidity {
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    },

    #[error("schedule duration must not be negative")]
    NegativeDuration,
}

/// Failure of a `resolve()` call as a whole.
///
/// Returning a schedule in the wrong unit is unsafe, so a conversion failure
/// aborts resolution with no partial result.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResolveError {
    #[error(transparent)]
    UnitConversion(#[from] UnitConversionError),

    #[error("requested schedule duration must be positive")]
    NonPositiveDuration,
}

/// Non-fatal findings reported alongside a valid resolution result.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolveWarning {
    /// A malformed profile was skipped.
    ProfileExcluded {
        profile_id: i32,
        violation: ProfileInvariantViolation,
    },
    /// A `minChargingRate` floor raised a sub-interval above its computed
    /// minimum. The floored value is still returned.
    MinimumExceedsComputedLimit {
        profile_id: i32,
        start_offset: Duration,
        floor: f64,
        computed: f64,
    },
}

impl std::fmt::Display for ResolveWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ProfileExcluded {
                profile_id,
                violation,
            } => write!(f, "profile {} excluded: {}", profile_id, violation),
            Self::MinimumExceedsComputedLimit {
                profile_id,
                start_offset,
                floor,
                computed,
            } => write!(
                f,
                "profile {} minChargingRate {} exceeds computed limit {} at offset {}s",
                profile_id,
                floor,
                computed,
                start_offset.num_seconds()
            ),
        }
    }
}
