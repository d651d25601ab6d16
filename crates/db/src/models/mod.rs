//! Row structs and DTOs.
//!
//! Each submodule contains a `FromRow` entity struct matching its table and,
//! where rows are created from handler input, a create DTO.

pub mod device;
pub mod device_config;
pub mod session;
pub mod telemetry;
pub mod user;
