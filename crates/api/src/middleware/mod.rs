//! Authentication extractors.
//!
//! - [`auth::AuthUser`] -- Requires a valid JWT Bearer token.
//! - [`auth::MaybeAuthUser`] -- Identifies the caller when a valid token is
//!   present; anonymous otherwise.

pub mod auth;
