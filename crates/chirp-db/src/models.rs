//! Database row types — these map directly to SQLite rows.
//! Distinct from chirp-types API models to keep the DB layer independent.
//!
//! `id` is `None` until the row has been saved; rows read back from
//! storage always carry one.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountRow {
    pub id: Option<i64>,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageRow {
    pub id: Option<i64>,
    pub posted_by: i64,
    pub message_text: String,
    pub time_posted: i64,
}
