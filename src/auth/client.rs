//! Client wrappers for the Legal Eyes auth endpoints. Each operation issues a
//! single request and returns either its result or one `ApiError` message.
//! Nothing here writes the store: callers persist sessions through the guard.

use super::{
    api::ApiClient,
    config::ApiConfig,
    errors::ApiError,
    store::KeyValueStore,
    types::{
        Credentials, ForgotPasswordPayload, LoginPayload, RegisterPayload, RegistrationRequest,
        ResetPasswordPayload, Session, SessionResponse, UserProfile,
    },
};
use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;
use tracing::instrument;

pub const LOGIN_PATH: &str = "/auth/login/";
pub const REGISTER_PATH: &str = "/auth/register/";
pub const LOGOUT_PATH: &str = "/auth/logout/";
pub const ME_PATH: &str = "/auth/me/";
pub const REFRESH_PATH: &str = "/auth/refresh/";
pub const FORGOT_PASSWORD_PATH: &str = "/auth/forgot-password/";
pub const RESET_PASSWORD_PATH: &str = "/auth/reset-password/";

#[derive(Clone)]
pub struct SessionClient {
    api: ApiClient,
}

impl SessionClient {
    /// `store` is where the bearer token is read from before every request.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: ApiConfig, store: Arc<dyn KeyValueStore>) -> Result<Self, ApiError> {
        Ok(Self {
            api: ApiClient::new(config, store)?,
        })
    }

    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        self.api.config()
    }

    /// Exchanges credentials for a session. Must never log the password.
    ///
    /// # Errors
    /// Returns the normalized failure message.
    #[instrument(skip_all)]
    pub async fn login(&self, credentials: &Credentials) -> Result<Session, ApiError> {
        let response: SessionResponse = self
            .api
            .post_json_response(LOGIN_PATH, &LoginPayload::from(credentials))
            .await?;
        into_session(response)
    }

    /// Creates an account and returns its first session.
    ///
    /// # Errors
    /// Returns the normalized failure message.
    #[instrument(skip_all)]
    pub async fn register(&self, request: &RegistrationRequest) -> Result<Session, ApiError> {
        let response: SessionResponse = self
            .api
            .post_json_response(REGISTER_PATH, &RegisterPayload::from(request))
            .await?;
        into_session(response)
    }

    /// Invalidates the session server-side. Local data is left to the caller.
    ///
    /// # Errors
    /// Returns the normalized failure message.
    #[instrument(skip_all)]
    pub async fn logout(&self) -> Result<(), ApiError> {
        self.api.post_empty(LOGOUT_PATH).await
    }

    /// # Errors
    /// Returns the normalized failure message.
    #[instrument(skip_all)]
    pub async fn current_user(&self) -> Result<UserProfile, ApiError> {
        self.api.get_json(ME_PATH).await
    }

    /// Trades the stored token for a new one.
    ///
    /// # Errors
    /// Returns the normalized failure message.
    #[instrument(skip_all)]
    pub async fn refresh(&self) -> Result<Session, ApiError> {
        let response: SessionResponse = self.api.post_empty_response(REFRESH_PATH).await?;
        into_session(response)
    }

    /// Asks the server to email a reset link. Should not log the address.
    ///
    /// # Errors
    /// Returns the normalized failure message.
    #[instrument(skip_all)]
    pub async fn forgot_password(&self, email: &str) -> Result<(), ApiError> {
        self.api
            .post_json(FORGOT_PASSWORD_PATH, &ForgotPasswordPayload { email })
            .await
    }

    /// Sets a new password using the token from the reset link.
    ///
    /// # Errors
    /// Returns the normalized failure message.
    #[instrument(skip_all)]
    pub async fn reset_password(
        &self,
        token: &SecretString,
        new_password: &SecretString,
    ) -> Result<(), ApiError> {
        let payload = ResetPasswordPayload {
            token: token.expose_secret(),
            password: new_password.expose_secret(),
        };
        self.api.post_json(RESET_PASSWORD_PATH, &payload).await
    }
}

fn into_session(response: SessionResponse) -> Result<Session, ApiError> {
    response
        .into_session()
        .ok_or_else(|| ApiError::Response("Server response did not include a token".to_string()))
}
