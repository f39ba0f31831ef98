use std::sync::Arc;

use tracing::{debug, info};

use chirp_db::models::MessageRow;
use chirp_db::{AccountStore, MessageStore};
use chirp_types::api::NewMessage;
use chirp_types::models::Message;

use crate::error::{AppError, AppResult};
use crate::service::account::AccountManager;

/// Upper bound on message text, counted in characters.
pub const MAX_MESSAGE_LEN: usize = 255;

pub struct MessageManager<S> {
    store: Arc<S>,
    accounts: AccountManager<S>,
}

impl<S> Clone for MessageManager<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            accounts: self.accounts.clone(),
        }
    }
}

impl<S: MessageStore + AccountStore> MessageManager<S> {
    pub fn new(store: Arc<S>, accounts: AccountManager<S>) -> Self {
        Self { store, accounts }
    }

    pub fn create(&self, message: &NewMessage) -> AppResult<Message> {
        if let Some(reason) = text_problem(&message.message_text) {
            debug!("Rejected message from {}: {}", message.posted_by, reason);
            return Err(AppError::InvalidMessage(reason.into()));
        }

        // The author is checked here only; later account changes do not
        // touch existing messages.
        if !self.accounts.account_exists(message.posted_by)? {
            debug!("Rejected message: unknown author {}", message.posted_by);
            return Err(AppError::InvalidMessage(format!(
                "account {} does not exist",
                message.posted_by
            )));
        }

        let row = MessageRow {
            id: None,
            posted_by: message.posted_by,
            message_text: message.message_text.clone(),
            time_posted: message
                .time_posted
                .unwrap_or_else(|| chrono::Utc::now().timestamp_millis()),
        };
        let saved = to_message(self.store.save_message(&row)?);

        info!("Account {} posted message {}", saved.posted_by, saved.id);
        Ok(saved)
    }

    pub fn get(&self, id: i64) -> AppResult<Option<Message>> {
        Ok(self.store.find_message_by_id(id)?.map(to_message))
    }

    /// Replace the text of an existing message. Returns `false` when the
    /// text is rejected or the message does not exist.
    pub fn update(&self, id: i64, new_text: &str) -> AppResult<bool> {
        if let Some(reason) = text_problem(new_text) {
            debug!("Rejected update of message {}: {}", id, reason);
            return Ok(false);
        }

        let Some(mut row) = self.store.find_message_by_id(id)? else {
            debug!("Update of missing message {}", id);
            return Ok(false);
        };

        row.message_text = new_text.to_string();
        self.store.save_message(&row)?;

        info!("Updated message {}", id);
        Ok(true)
    }

    /// Returns `false` when there was nothing to delete.
    pub fn delete(&self, id: i64) -> AppResult<bool> {
        let removed = self.store.delete_message_by_id(id)?;
        if removed {
            info!("Deleted message {}", id);
        }
        Ok(removed)
    }

    pub fn list(&self) -> AppResult<Vec<Message>> {
        Ok(self
            .store
            .find_all_messages()?
            .into_iter()
            .map(to_message)
            .collect())
    }

    pub fn list_by_author(&self, account_id: i64) -> AppResult<Vec<Message>> {
        Ok(self
            .store
            .find_messages_by_author(account_id)?
            .into_iter()
            .map(to_message)
            .collect())
    }
}

fn text_problem(text: &str) -> Option<&'static str> {
    if text.trim().is_empty() {
        Some("message text must not be blank")
    } else if text.chars().count() > MAX_MESSAGE_LEN {
        Some("message text exceeds 255 characters")
    } else {
        None
    }
}

fn to_message(row: MessageRow) -> Message {
    Message {
        id: row.id.unwrap_or_default(),
        posted_by: row.posted_by,
        message_text: row.message_text,
        time_posted: row.time_posted,
    }
}
