use rusqlite::{Connection, OptionalExtension, params};

use crate::Database;
use crate::error::{Result, StoreError};
use crate::models::UserRow;

impl Database {
    /// Insert a user row. Required fields are `Option` so a missing value is
    /// written as NULL and rejected by the NOT NULL constraint, surfacing as
    /// [`StoreError::Integrity`] — same for duplicate usernames or emails.
    ///
    /// `id` is normally `None` (SQLite assigns one); tests pass a fixed id.
    pub fn create_user(
        &self,
        id: Option<i64>,
        username: Option<&str>,
        email: Option<&str>,
        password_hash: Option<&str>,
        image_url: Option<&str>,
    ) -> Result<UserRow> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO users (id, username, email, password, image_url)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![id, username, email, password_hash, image_url],
            )?;
            let id = id.unwrap_or_else(|| conn.last_insert_rowid());
            query_user_by_id(conn, id)?.ok_or(StoreError::NotFound)
        })
    }

    pub fn get_user(&self, id: i64) -> Result<Option<UserRow>> {
        self.with_conn(|conn| query_user_by_id(conn, id))
    }

    /// Fetch-or-404: a missing id is an explicit [`StoreError::NotFound`].
    pub fn require_user(&self, id: i64) -> Result<UserRow> {
        self.get_user(id)?.ok_or(StoreError::NotFound)
    }

    pub fn get_user_by_username(&self, username: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, username, email, password, image_url
                 FROM users WHERE username = ?1",
            )?;
            Ok(stmt.query_row([username], user_from_row).optional()?)
        })
    }

    /// Delete a user; messages, likes and follow edges cascade.
    pub fn delete_user(&self, id: i64) -> Result<()> {
        self.with_conn(|conn| {
            let affected = conn.execute("DELETE FROM users WHERE id = ?1", [id])?;
            if affected == 0 {
                return Err(StoreError::NotFound);
            }
            Ok(())
        })
    }
}

fn query_user_by_id(conn: &Connection, id: i64) -> Result<Option<UserRow>> {
    let mut stmt = conn.prepare(
        "SELECT id, username, email, password, image_url
         FROM users WHERE id = ?1",
    )?;
    Ok(stmt.query_row([id], user_from_row).optional()?)
}

pub(crate) fn user_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<UserRow> {
    Ok(UserRow {
        id: row.get(0)?,
        username: row.get(1)?,
        email: row.get(2)?,
        password: row.get(3)?,
        image_url: row.get(4)?,
    })
}
