use std::sync::Arc;

use tracing::{debug, info, warn};

use chirp_db::models::AccountRow;
use chirp_db::{AccountStore, DbError};
use chirp_types::api::Credentials;
use chirp_types::models::Account;

use crate::error::{AppError, AppResult};

pub const MIN_PASSWORD_LEN: usize = 4;

/// Registration, login and the existence check messages rely on.
pub struct AccountManager<S> {
    store: Arc<S>,
}

impl<S> Clone for AccountManager<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: AccountStore> AccountManager<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Validate and persist a new account.
    ///
    /// The username lookup short-circuits the common case; the UNIQUE
    /// constraint on `account.username` catches concurrent registrations
    /// that slip past it.
    pub fn register(&self, candidate: &Credentials) -> AppResult<Account> {
        if candidate.username.trim().is_empty() {
            debug!("Rejected registration: blank username");
            return Err(AppError::InvalidAccount("username must not be blank".into()));
        }
        if candidate.password.chars().count() < MIN_PASSWORD_LEN {
            debug!("Rejected registration for '{}': short password", candidate.username);
            return Err(AppError::InvalidAccount(format!(
                "password must be at least {} characters",
                MIN_PASSWORD_LEN
            )));
        }

        if self
            .store
            .find_account_by_username(&candidate.username)?
            .is_some()
        {
            warn!("Username '{}' already registered", candidate.username);
            return Err(AppError::DuplicateAccount(candidate.username.clone()));
        }

        let row = AccountRow {
            id: None,
            username: candidate.username.clone(),
            password: candidate.password.clone(),
        };
        let saved = self.store.save_account(&row).map_err(|e| match e {
            DbError::Conflict(_) => {
                warn!("Username '{}' registered concurrently", candidate.username);
                AppError::DuplicateAccount(candidate.username.clone())
            }
            other => AppError::Storage(other),
        })?;

        let account = to_account(saved);
        info!("Registered account {} ('{}')", account.id, account.username);
        Ok(account)
    }

    /// Exact username + password match. A wrong username and a wrong
    /// password are indistinguishable to the caller.
    pub fn authenticate(&self, credentials: &Credentials) -> AppResult<Option<Account>> {
        let found = self
            .store
            .find_account_by_credentials(&credentials.username, &credentials.password)?;
        if found.is_none() {
            debug!("Login failed for '{}'", credentials.username);
        }
        Ok(found.map(to_account))
    }

    pub fn account_exists(&self, id: i64) -> AppResult<bool> {
        Ok(self.store.account_exists(id)?)
    }

    pub fn get_account(&self, id: i64) -> AppResult<Option<Account>> {
        Ok(self.store.find_account_by_id(id)?.map(to_account))
    }
}

fn to_account(row: AccountRow) -> Account {
    Account {
        id: row.id.unwrap_or_default(),
        username: row.username,
        password: row.password,
    }
}
