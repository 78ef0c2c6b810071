/// Surrogate primary keys (favorites, user settings) are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// Identity-provider subject id; doubles as the `users` primary key.
pub type UserId = String;

/// Upstream registry item code; the `drugs` natural key.
pub type DrugId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
