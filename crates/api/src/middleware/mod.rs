//! Request extractors enforcing authentication.
//!
//! - [`auth::AuthUser`]: the caller identified by a JWT Bearer token.

pub mod auth;
