//! Charging profile aggregate
//!
//! Contains the ChargingProfile entity, related types, and the read-only
//! repository view the engine queries.

pub mod model;
pub mod repository;

pub use model::{
    ChargingProfile, ChargingProfileKind, ChargingProfilePurpose, ChargingSchedule,
    ChargingSchedulePeriod, RecurrencyKind, DEFAULT_NUMBER_PHASES,
};
pub use repository::{ClearProfileCriteria, InMemoryProfileView, InstalledProfile, ProfileView};
