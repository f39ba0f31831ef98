use serde::{Deserialize, Deserializer};

/// Treat an explicit JSON `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// -- Accounts --

/// Body of `POST /register` and `POST /login`.
///
/// Clients post whole account records, so a stray `id`/`accountId` is
/// ignored rather than rejected. Missing or `null` fields read as empty
/// strings and fail validation downstream.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Credentials {
    #[serde(default, deserialize_with = "null_as_default")]
    pub username: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub password: String,
}

// -- Messages --

/// Body of `POST /messages`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMessage {
    #[serde(default, deserialize_with = "null_as_default")]
    pub posted_by: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message_text: String,
    /// Epoch milliseconds; the server stamps the current time when absent.
    #[serde(default, alias = "timePostedEpoch")]
    pub time_posted: Option<i64>,
}

/// Body of `PATCH /messages/{id}`. Only the text is read.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessagePatch {
    #[serde(default, deserialize_with = "null_as_default")]
    pub message_text: String,
}
