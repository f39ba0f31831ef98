//! Storage contracts the managers are written against.
//!
//! Each call is atomic on its own; nothing here spans a transaction across
//! calls.

use crate::DbResult;
use crate::models::{AccountRow, MessageRow};

pub trait AccountStore: Send + Sync {
    fn find_account_by_id(&self, id: i64) -> DbResult<Option<AccountRow>>;
    fn find_all_accounts(&self) -> DbResult<Vec<AccountRow>>;
    fn find_account_by_username(&self, username: &str) -> DbResult<Option<AccountRow>>;
    /// Exact match on both fields.
    fn find_account_by_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> DbResult<Option<AccountRow>>;
    /// Inserts when `id` is `None`, otherwise updates in place.
    /// A taken username yields `DbError::Conflict`.
    fn save_account(&self, account: &AccountRow) -> DbResult<AccountRow>;
    /// Returns whether a row was removed.
    fn delete_account_by_id(&self, id: i64) -> DbResult<bool>;
    fn account_exists(&self, id: i64) -> DbResult<bool>;
}

pub trait MessageStore: Send + Sync {
    fn find_message_by_id(&self, id: i64) -> DbResult<Option<MessageRow>>;
    fn find_all_messages(&self) -> DbResult<Vec<MessageRow>>;
    fn find_messages_by_author(&self, account_id: i64) -> DbResult<Vec<MessageRow>>;
    /// Inserts when `id` is `None`, otherwise updates in place.
    fn save_message(&self, message: &MessageRow) -> DbResult<MessageRow>;
    /// Returns whether a row was removed.
    fn delete_message_by_id(&self, id: i64) -> DbResult<bool>;
    fn message_exists(&self, id: i64) -> DbResult<bool>;
}
