use chrono::{DateTime, Utc};
use rusqlite::{OptionalExtension, params};

use crate::Database;
use crate::error::{Result, StoreError};
use crate::models::MessageRow;

impl Database {
    /// Insert a message. A `None` timestamp means "use the current time"
    /// (the column default).
    pub fn create_message(
        &self,
        id: Option<i64>,
        text: &str,
        user_id: i64,
        timestamp: Option<DateTime<Utc>>,
    ) -> Result<MessageRow> {
        self.with_conn(|conn| {
            let id = match timestamp {
                Some(ts) => {
                    conn.execute(
                        "INSERT INTO messages (id, text, timestamp, user_id)
                         VALUES (?1, ?2, ?3, ?4)",
                        params![id, text, ts.format("%Y-%m-%d %H:%M:%S").to_string(), user_id],
                    )?;
                    id.unwrap_or_else(|| conn.last_insert_rowid())
                }
                None => {
                    conn.execute(
                        "INSERT INTO messages (id, text, user_id) VALUES (?1, ?2, ?3)",
                        params![id, text, user_id],
                    )?;
                    id.unwrap_or_else(|| conn.last_insert_rowid())
                }
            };
            query_message(conn, id)?.ok_or(StoreError::NotFound)
        })
    }

    pub fn get_message(&self, id: i64) -> Result<Option<MessageRow>> {
        self.with_conn(|conn| query_message(conn, id))
    }

    pub fn require_message(&self, id: i64) -> Result<MessageRow> {
        self.get_message(id)?.ok_or(StoreError::NotFound)
    }

    /// All messages posted by a user, most recent first.
    pub fn messages_for_user(&self, user_id: i64) -> Result<Vec<MessageRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, text, timestamp, user_id FROM messages
                 WHERE user_id = ?1
                 ORDER BY timestamp DESC, id DESC",
            )?;
            let rows = stmt
                .query_map([user_id], message_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    pub fn count_messages_for_user(&self, user_id: i64) -> Result<i64> {
        self.with_conn(|conn| {
            Ok(conn.query_row(
                "SELECT COUNT(*) FROM messages WHERE user_id = ?1",
                [user_id],
                |row| row.get(0),
            )?)
        })
    }

    /// Delete a message on behalf of a user. Only the owner may delete:
    /// anyone else gets [`StoreError::Forbidden`] and the row stays intact.
    pub fn delete_message(&self, message_id: i64, requesting_user_id: i64) -> Result<()> {
        self.with_conn(|conn| {
            let owner: Option<i64> = conn
                .query_row(
                    "SELECT user_id FROM messages WHERE id = ?1",
                    [message_id],
                    |row| row.get(0),
                )
                .optional()?;

            match owner {
                None => Err(StoreError::NotFound),
                Some(owner_id) if owner_id != requesting_user_id => Err(StoreError::Forbidden),
                Some(_) => {
                    conn.execute("DELETE FROM messages WHERE id = ?1", [message_id])?;
                    Ok(())
                }
            }
        })
    }
}

fn query_message(conn: &rusqlite::Connection, id: i64) -> Result<Option<MessageRow>> {
    let mut stmt =
        conn.prepare("SELECT id, text, timestamp, user_id FROM messages WHERE id = ?1")?;
    Ok(stmt.query_row([id], message_from_row).optional()?)
}

pub(crate) fn message_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<MessageRow> {
    Ok(MessageRow {
        id: row.get(0)?,
        text: row.get(1)?,
        timestamp: row.get(2)?,
        user_id: row.get(3)?,
    })
}
