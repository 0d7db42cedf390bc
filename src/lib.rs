//! # OCPP Smart Charging
//!
//! Charge-point-side composite schedule engine for OCPP 1.6 smart charging:
//! resolves the possibly-overlapping, possibly-recurring charging profiles
//! installed on a connector into one unambiguous, time-ordered sequence of
//! power/current limits for any requested window.
//!
//! ## Architecture
//!
//! - **domain**: charging profile entities, invariants, rate units, and the
//!   read-only profile repository view
//! - **application**: the composite schedule engine (recurrence expansion,
//!   precedence, merge and flooring)
//! - **interfaces**: OCPP 1.6 wire types and the adapter mapping between
//!   wire and domain/engine representations
//!
//! Transport, persistence and the surrounding charge-point state machine are
//! deliberately outside this crate; callers hand the engine a consistent
//! profile snapshot and a window, and get back a [`ResolvedSchedule`] or a
//! typed failure.

pub mod application;
pub mod config;
pub mod domain;
pub mod interfaces;

pub use application::{
    CompositeScheduleEngine, Resolution, ResolvedPeriod, ResolvedSchedule, ScheduleRequest,
};
pub use config::ChargingConfig;
pub use domain::{
    ChargingProfile, ChargingProfileKind, ChargingProfilePurpose, ChargingRateUnit,
    ChargingSchedule, ChargingSchedulePeriod, ClearProfileCriteria, InMemoryProfileView,
    ProfileInvariantViolation, ProfileView, RecurrencyKind, ResolveError, ResolveWarning,
    UnitConversionError,
};
