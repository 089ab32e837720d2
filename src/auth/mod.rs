//! Client-side session contract for the Legal Eyes API.
//!
//! ## Flow Overview
//!
//! 1. **Login/Register:** the form input is validated locally, then
//!    `SessionClient` posts it to `/auth/login/` or `/auth/register/` and
//!    returns a `Session` (bearer token plus optional profile).
//! 2. **Persist:** the caller hands the session to `AuthGuard::store_session`,
//!    which writes the `token` and `user` entries of the durable store.
//! 3. **Authenticated calls:** every request reads `token` from the store and
//!    sends it as `Authorization: Bearer`.
//! 4. **Gating:** `AuthGuard::is_authenticated` checks the token's `exp` claim
//!    without verifying the signature. It only drives navigation.
//! 5. **Logout:** the server is told first, then `clear_auth_data` removes the
//!    local entries.
//!
//! This module handles bearer tokens and passwords; never log either.

pub mod api;
pub mod claims;
pub mod client;
pub mod config;
pub mod errors;
pub mod guard;
pub mod store;
pub mod types;

pub use client::SessionClient;
pub use config::ApiConfig;
pub use errors::ApiError;
pub use guard::{AuthGuard, Clock, RouteDecision, SystemClock};
pub use store::{FileStore, KeyValueStore, MemoryStore};
pub use types::{Credentials, RegistrationRequest, Session, UserProfile};
