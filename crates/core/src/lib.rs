//! Domain rules for the CRAVEX companion backend.
//!
//! Everything in this crate is pure: constants, validation, and small value
//! types shared by the repository layer and the HTTP handlers. No I/O.

pub mod device;
pub mod device_config;
pub mod error;
pub mod otp;
pub mod support;
pub mod telemetry;
pub mod types;
