/// Portfolio item identifiers are PostgreSQL BIGSERIAL (or an in-memory counter).
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
