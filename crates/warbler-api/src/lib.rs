//! HTTP surface of warbler: request handlers, session middleware, page
//! rendering and router assembly.

pub mod auth;
pub mod credentials;
pub mod error;
pub mod messages;
pub mod pages;
pub mod routes;
pub mod session;
pub mod users;
