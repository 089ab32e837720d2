//! Request and response types for the auth endpoints. Passwords and tokens are
//! wrapped in `SecretString` so they never show up in `Debug` output or logs.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Login form input.
#[derive(Debug)]
pub struct Credentials {
    pub email: String,
    pub password: SecretString,
}

/// Register form input. `confirm_password` is checked locally and never sent.
#[derive(Debug)]
pub struct RegistrationRequest {
    pub email: String,
    pub username: String,
    pub password: SecretString,
    pub confirm_password: SecretString,
}

/// Profile blob returned by the server. Unknown fields are kept as-is so the
/// stored copy round-trips whatever the backend sends.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UserProfile {
    /// Name used in greetings: username, then name, then a generic fallback.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.username
            .as_deref()
            .filter(|name| !name.is_empty())
            .or_else(|| self.name.as_deref().filter(|name| !name.is_empty()))
            .unwrap_or("User")
    }
}

/// Bearer token plus whatever profile the server returned with it.
#[derive(Debug)]
pub struct Session {
    pub token: SecretString,
    pub user: Option<UserProfile>,
}

/// Success body of login, register and refresh. `token` is the canonical
/// field; `access` is accepted for backends that follow the access/refresh
/// naming.
#[derive(Debug, Deserialize)]
pub(crate) struct SessionResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub access: Option<String>,
    #[serde(default)]
    pub user: Option<UserProfile>,
}

impl SessionResponse {
    pub(crate) fn into_session(self) -> Option<Session> {
        let token = self
            .token
            .filter(|token| !token.is_empty())
            .or(self.access.filter(|token| !token.is_empty()))?;

        Some(Session {
            token: SecretString::from(token),
            user: self.user,
        })
    }
}

#[derive(Serialize)]
pub(crate) struct LoginPayload<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

impl<'a> From<&'a Credentials> for LoginPayload<'a> {
    fn from(credentials: &'a Credentials) -> Self {
        Self {
            email: &credentials.email,
            password: credentials.password.expose_secret(),
        }
    }
}

#[derive(Serialize)]
pub(crate) struct RegisterPayload<'a> {
    pub email: &'a str,
    pub username: &'a str,
    pub password: &'a str,
}

impl<'a> From<&'a RegistrationRequest> for RegisterPayload<'a> {
    fn from(request: &'a RegistrationRequest) -> Self {
        Self {
            email: &request.email,
            username: &request.username,
            password: request.password.expose_secret(),
        }
    }
}

#[derive(Serialize)]
pub(crate) struct ForgotPasswordPayload<'a> {
    pub email: &'a str,
}

#[derive(Serialize)]
pub(crate) struct ResetPasswordPayload<'a> {
    pub token: &'a str,
    pub password: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{anyhow, Result};
    use serde_json::json;

    #[test]
    fn session_response_prefers_token() -> Result<()> {
        let response: SessionResponse = serde_json::from_value(json!({
            "token": "canonical",
            "access": "alias",
        }))?;
        let session = response
            .into_session()
            .ok_or_else(|| anyhow!("expected session"))?;
        assert_eq!(session.token.expose_secret(), "canonical");
        assert!(session.user.is_none());
        Ok(())
    }

    #[test]
    fn session_response_accepts_access_alias() -> Result<()> {
        let response: SessionResponse = serde_json::from_value(json!({
            "access": "alias",
            "user": {"email": "jane@legaleyes.com"}
        }))?;
        let session = response
            .into_session()
            .ok_or_else(|| anyhow!("expected session"))?;
        assert_eq!(session.token.expose_secret(), "alias");
        assert_eq!(
            session.user.and_then(|user| user.email),
            Some("jane@legaleyes.com".to_string())
        );
        Ok(())
    }

    #[test]
    fn session_response_without_token() -> Result<()> {
        let response: SessionResponse = serde_json::from_value(json!({"token": ""}))?;
        assert!(response.into_session().is_none());
        Ok(())
    }

    #[test]
    fn profile_keeps_unknown_fields() -> Result<()> {
        let value = json!({"id": 7, "username": "jane", "plan": "pro"});
        let profile: UserProfile = serde_json::from_value(value.clone())?;
        assert_eq!(profile.extra.get("plan"), Some(&json!("pro")));
        assert_eq!(serde_json::to_value(&profile)?, value);
        Ok(())
    }

    #[test]
    fn display_name_fallbacks() {
        let mut profile = UserProfile::default();
        assert_eq!(profile.display_name(), "User");
        profile.name = Some("Jane Doe".to_string());
        assert_eq!(profile.display_name(), "Jane Doe");
        profile.username = Some("jane".to_string());
        assert_eq!(profile.display_name(), "jane");
    }

    #[test]
    fn register_payload_omits_confirmation() -> Result<()> {
        let request = RegistrationRequest {
            email: "jane@legaleyes.com".to_string(),
            username: "jane".to_string(),
            password: SecretString::from("Str0ng!pass"),
            confirm_password: SecretString::from("Str0ng!pass"),
        };
        let body = serde_json::to_value(RegisterPayload::from(&request))?;
        assert_eq!(
            body,
            json!({
                "email": "jane@legaleyes.com",
                "username": "jane",
                "password": "Str0ng!pass",
            })
        );
        Ok(())
    }
}
