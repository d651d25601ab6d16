/// Primary keys of server-generated rows are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// Hardware device ids are caller-supplied UUIDs.
pub type DeviceId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
