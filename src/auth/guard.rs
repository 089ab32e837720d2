//! Session persistence and route gating. The guard is the only component that
//! writes the durable store; the session client only reads the token from it.
//!
//! `is_authenticated` trusts the unverified `exp` claim, so it is a UX gate
//! only. Real access control must stay on the API.

use crate::auth::{
    claims::decode_claims,
    store::{KeyValueStore, TOKEN_KEY, USER_KEY},
    types::{Session, UserProfile},
};
use anyhow::Result;
use secrecy::ExposeSecret;
use std::{
    sync::Arc,
    time::{SystemTime, UNIX_EPOCH},
};
use tracing::debug;

pub const LOGIN_PATH: &str = "/login";
pub const REGISTER_PATH: &str = "/register";
pub const DASHBOARD_PATH: &str = "/dashboard";
pub const ROOT_PATH: &str = "/";

/// Source of wall-clock time, in whole seconds since the epoch.
pub trait Clock: Send + Sync {
    fn now_unix(&self) -> i64;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_unix(&self) -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| {
                i64::try_from(elapsed.as_secs()).unwrap_or(i64::MAX)
            })
    }
}

/// Outcome of resolving a navigation target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RouteDecision {
    Render(&'static str),
    Redirect(&'static str),
}

#[derive(Clone)]
pub struct AuthGuard {
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
}

impl AuthGuard {
    pub fn new(store: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Guard reading the real wall clock.
    pub fn with_system_clock(store: Arc<dyn KeyValueStore>) -> Self {
        Self::new(store, Arc::new(SystemClock))
    }

    /// True iff a token is stored and its `exp` claim lies in the future.
    /// Undecodable tokens fail closed.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        let Some(token) = self.store.get(TOKEN_KEY) else {
            return false;
        };

        match decode_claims(&token) {
            Ok(claims) => claims.is_live_at(self.clock.now_unix()),
            Err(err) => {
                debug!("Token validation failed: {}", err);
                false
            }
        }
    }

    /// Removes the token and the user blob. Safe to call repeatedly.
    ///
    /// # Errors
    /// Returns an error if the store cannot persist the removal.
    pub fn clear_auth_data(&self) -> Result<()> {
        self.store.remove(TOKEN_KEY)?;
        self.store.remove(USER_KEY)?;
        Ok(())
    }

    /// Persists a freshly issued session. A session without a profile drops
    /// any previously stored one.
    ///
    /// # Errors
    /// Returns an error if the store cannot persist the values.
    pub fn store_session(&self, session: &Session) -> Result<()> {
        self.store.set(TOKEN_KEY, session.token.expose_secret())?;

        match &session.user {
            Some(user) => self.store.set(USER_KEY, &serde_json::to_string(user)?)?,
            None => self.store.remove(USER_KEY)?,
        }

        Ok(())
    }

    /// Stored profile, if any. A malformed blob reads as absent.
    #[must_use]
    pub fn stored_user(&self) -> Option<UserProfile> {
        let blob = self.store.get(USER_KEY)?;
        serde_json::from_str(&blob)
            .map_err(|err| debug!("Ignoring stored user: {}", err))
            .ok()
    }

    /// Decides whether `path` renders or redirects for the current session.
    #[must_use]
    pub fn resolve_route(&self, path: &str) -> RouteDecision {
        resolve_route(path, self.is_authenticated())
    }
}

/// Route table: login/register are public-only, the dashboard is protected,
/// the root forwards by session state, anything else goes to the root.
#[must_use]
pub fn resolve_route(path: &str, authenticated: bool) -> RouteDecision {
    match (path, authenticated) {
        (LOGIN_PATH, false) => RouteDecision::Render(LOGIN_PATH),
        (REGISTER_PATH, false) => RouteDecision::Render(REGISTER_PATH),
        (LOGIN_PATH | REGISTER_PATH | ROOT_PATH, true) => RouteDecision::Redirect(DASHBOARD_PATH),
        (DASHBOARD_PATH, true) => RouteDecision::Render(DASHBOARD_PATH),
        (DASHBOARD_PATH | ROOT_PATH, false) => RouteDecision::Redirect(LOGIN_PATH),
        _ => RouteDecision::Redirect(ROOT_PATH),
    }
}
