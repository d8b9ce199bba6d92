//! Database row types — these map directly to SQLite rows.
//! Distinct from the warbler-types form payloads to keep the DB layer
//! independent.

use std::fmt;

#[derive(Debug)]
pub struct UserRow {
    pub id: i64,
    pub username: String,
    pub email: String,
    /// Argon2 hash, never a raw password.
    pub password: String,
    pub image_url: Option<String>,
}

impl fmt::Display for UserRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<User #{}: {}, {}>", self.id, self.username, self.email)
    }
}

pub struct MessageRow {
    pub id: i64,
    pub text: String,
    /// Stored as SQLite text, `YYYY-MM-DD HH:MM:SS` in UTC.
    pub timestamp: String,
    pub user_id: i64,
}

pub struct LikeRow {
    pub id: i64,
    pub user_id: i64,
    pub message_id: i64,
}
