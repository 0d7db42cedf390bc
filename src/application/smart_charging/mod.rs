//! Smart charging use cases
//!
//! Hosts the composite schedule engine: recurrence expansion plus the
//! precedence/merge resolver that turns installed profiles into one limit
//! curve per request.

mod recurrence;
mod resolver;

pub use resolver::{
    CompositeScheduleEngine, Resolution, ResolvedPeriod, ResolvedSchedule, ScheduleRequest,
};
