//! OCPP 1.6 wire boundary for smart charging

pub mod adapter;
pub mod types;

pub use adapter::to_wire;
