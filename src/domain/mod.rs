//! Core business entities and types

pub mod charging_profile;
pub mod error;
pub mod units;

// Re-export commonly used types
pub use charging_profile::{
    ChargingProfile, ChargingProfileKind, ChargingProfilePurpose, ChargingSchedule,
    ChargingSchedulePeriod, ClearProfileCriteria, InMemoryProfileView, ProfileView, RecurrencyKind,
};
pub use error::{ProfileInvariantViolation, ResolveError, ResolveWarning, UnitConversionError};
pub use units::{ChargingRateUnit, RateConverter};
