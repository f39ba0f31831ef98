use rusqlite::{Connection, Row};
use tracing::debug;

use crate::models::{AccountRow, MessageRow};
use crate::store::{AccountStore, MessageStore};
use crate::{Database, DbError, DbResult};

const ACCOUNT_COLUMNS: &str = "id, username, password";
const MESSAGE_COLUMNS: &str = "id, posted_by, message_text, time_posted";

// -- Accounts --

impl AccountStore for Database {
    fn find_account_by_id(&self, id: i64) -> DbResult<Option<AccountRow>> {
        self.with_conn(|conn| {
            conn.query_row(
                &format!("SELECT {ACCOUNT_COLUMNS} FROM account WHERE id = ?1"),
                [id],
                account_from_row,
            )
            .optional()
        })
    }

    fn find_all_accounts(&self) -> DbResult<Vec<AccountRow>> {
        self.with_conn(|conn| {
            let mut stmt =
                conn.prepare(&format!("SELECT {ACCOUNT_COLUMNS} FROM account ORDER BY id"))?;
            let rows = stmt
                .query_map([], account_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    fn find_account_by_username(&self, username: &str) -> DbResult<Option<AccountRow>> {
        self.with_conn(|conn| {
            conn.query_row(
                &format!("SELECT {ACCOUNT_COLUMNS} FROM account WHERE username = ?1"),
                [username],
                account_from_row,
            )
            .optional()
        })
    }

    fn find_account_by_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> DbResult<Option<AccountRow>> {
        self.with_conn(|conn| {
            conn.query_row(
                &format!(
                    "SELECT {ACCOUNT_COLUMNS} FROM account WHERE username = ?1 AND password = ?2"
                ),
                [username, password],
                account_from_row,
            )
            .optional()
        })
    }

    fn save_account(&self, account: &AccountRow) -> DbResult<AccountRow> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO account (id, username, password) VALUES (?1, ?2, ?3)
                 ON CONFLICT(id) DO UPDATE SET
                    username = excluded.username,
                    password = excluded.password",
                rusqlite::params![account.id, account.username, account.password],
            )
            .map_err(|e| unique_as_conflict(e, "account.username"))?;

            let id = account.id.unwrap_or_else(|| conn.last_insert_rowid());
            debug!("Saved account {}", id);
            Ok(AccountRow {
                id: Some(id),
                ..account.clone()
            })
        })
    }

    fn delete_account_by_id(&self, id: i64) -> DbResult<bool> {
        self.with_conn(|conn| {
            let removed = conn.execute("DELETE FROM account WHERE id = ?1", [id])?;
            Ok(removed > 0)
        })
    }

    fn account_exists(&self, id: i64) -> DbResult<bool> {
        self.with_conn(|conn| exists(conn, "account", id))
    }
}

// -- Messages --

impl MessageStore for Database {
    fn find_message_by_id(&self, id: i64) -> DbResult<Option<MessageRow>> {
        self.with_conn(|conn| {
            conn.query_row(
                &format!("SELECT {MESSAGE_COLUMNS} FROM message WHERE id = ?1"),
                [id],
                message_from_row,
            )
            .optional()
        })
    }

    fn find_all_messages(&self) -> DbResult<Vec<MessageRow>> {
        self.with_conn(|conn| {
            let mut stmt =
                conn.prepare(&format!("SELECT {MESSAGE_COLUMNS} FROM message ORDER BY id"))?;
            let rows = stmt
                .query_map([], message_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    fn find_messages_by_author(&self, account_id: i64) -> DbResult<Vec<MessageRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {MESSAGE_COLUMNS} FROM message WHERE posted_by = ?1 ORDER BY id"
            ))?;
            let rows = stmt
                .query_map([account_id], message_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    fn save_message(&self, message: &MessageRow) -> DbResult<MessageRow> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO message (id, posted_by, message_text, time_posted)
                 VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT(id) DO UPDATE SET
                    posted_by = excluded.posted_by,
                    message_text = excluded.message_text,
                    time_posted = excluded.time_posted",
                rusqlite::params![
                    message.id,
                    message.posted_by,
                    message.message_text,
                    message.time_posted
                ],
            )?;

            let id = message.id.unwrap_or_else(|| conn.last_insert_rowid());
            debug!("Saved message {}", id);
            Ok(MessageRow {
                id: Some(id),
                ..message.clone()
            })
        })
    }

    fn delete_message_by_id(&self, id: i64) -> DbResult<bool> {
        self.with_conn(|conn| {
            let removed = conn.execute("DELETE FROM message WHERE id = ?1", [id])?;
            Ok(removed > 0)
        })
    }

    fn message_exists(&self, id: i64) -> DbResult<bool> {
        self.with_conn(|conn| exists(conn, "message", id))
    }
}

fn account_from_row(row: &Row<'_>) -> rusqlite::Result<AccountRow> {
    Ok(AccountRow {
        id: Some(row.get(0)?),
        username: row.get(1)?,
        password: row.get(2)?,
    })
}

fn message_from_row(row: &Row<'_>) -> rusqlite::Result<MessageRow> {
    Ok(MessageRow {
        id: Some(row.get(0)?),
        posted_by: row.get(1)?,
        message_text: row.get(2)?,
        time_posted: row.get(3)?,
    })
}

fn exists(conn: &Connection, table: &str, id: i64) -> DbResult<bool> {
    let found: bool = conn.query_row(
        &format!("SELECT EXISTS(SELECT 1 FROM {table} WHERE id = ?1)"),
        [id],
        |row| row.get(0),
    )?;
    Ok(found)
}

fn unique_as_conflict(err: rusqlite::Error, what: &str) -> DbError {
    match &err {
        rusqlite::Error::SqliteFailure(e, _)
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
        {
            DbError::Conflict(what.to_string())
        }
        _ => DbError::Sqlite(err),
    }
}

/// Extension trait for optional query results
trait OptionalExt<T> {
    fn optional(self) -> DbResult<Option<T>>;
}

impl<T> OptionalExt<T> for std::result::Result<T, rusqlite::Error> {
    fn optional(self) -> DbResult<Option<T>> {
        match self {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
