use serde::{Deserialize, Serialize};

// -- Session claims --

/// Session token claims shared between warbler-api (cookie middleware) and
/// the integration tests that forge sessions. Canonical definition lives
/// here in warbler-types to eliminate duplication.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Id of the logged-in user.
    pub sub: i64,
    pub username: String,
    pub exp: usize,
}

// -- Forms --

/// Signup form payload. Required fields are optional at the type level so a
/// missing value reaches the store as NULL and fails there with an
/// integrity error, rather than being rejected at deserialization.
#[derive(Debug, Deserialize)]
pub struct SignupForm {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct NewMessageForm {
    pub text: String,
}
