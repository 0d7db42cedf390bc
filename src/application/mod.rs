//! Business logic and use cases

pub mod smart_charging;

pub use smart_charging::{
    CompositeScheduleEngine, Resolution, ResolvedPeriod, ResolvedSchedule, ScheduleRequest,
};
