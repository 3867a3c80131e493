/// All database primary keys for packs and images are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// User identifiers are opaque strings issued by the authentication provider.
pub type UserId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
