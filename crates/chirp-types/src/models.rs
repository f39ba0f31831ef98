use serde::Serialize;

/// A registered user identity as it crosses the HTTP boundary.
///
/// The password travels back to the caller unchanged; login compares it
/// verbatim against storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Account {
    pub id: i64,
    pub username: String,
    pub password: String,
}

/// A text post authored by an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: i64,
    pub posted_by: i64,
    pub message_text: String,
    /// Epoch milliseconds.
    pub time_posted: i64,
}
