/// Users are identified by the auth backend's UUID.
pub type UserId = uuid::Uuid;

/// Application-owned tables use PostgreSQL BIGSERIAL keys.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
