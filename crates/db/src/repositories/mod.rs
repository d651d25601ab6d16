//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that accept
//! `&PgPool` as the first argument.

pub mod config_repo;
pub mod device_repo;
pub mod session_repo;
pub mod telemetry_repo;
pub mod user_repo;

pub use config_repo::ConfigRepo;
pub use device_repo::DeviceRepo;
pub use session_repo::SessionRepo;
pub use telemetry_repo::TelemetryRepo;
pub use user_repo::UserRepo;
