/// Content and catalog primary keys are opaque text ids.
pub type ContentId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
