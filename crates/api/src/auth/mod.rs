//! Bearer token primitives.
//!
//! Tokens are issued by the external identity service; this crate only
//! verifies them. [`jwt::generate_access_token`] exists for tooling and tests.

pub mod jwt;
