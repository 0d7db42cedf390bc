//! Protocol adapters

pub mod ocpp_v16;
