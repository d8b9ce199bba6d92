//! Types shared between the warbler API crate, the server binary, and the
//! integration tests.

pub mod api;

/// Cookie name under which the logged-in user's session token is stored.
///
/// A fixed, well-known constant: handlers set and clear it, the session
/// middleware reads it, and the test suites forge it to mimic logging in.
pub const CURR_USER_KEY: &str = "curr_user";
