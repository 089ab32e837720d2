//! HTTP plumbing shared by every session client call: URL building, headers,
//! the request timeout and failure normalization. The bearer token is read from
//! the injected store on each request and is never written back or logged.

use super::{config::ApiConfig, errors::ApiError, store::KeyValueStore, store::TOKEN_KEY};
use reqwest::{
    header::{HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    Client, Method, Response,
};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info_span, Instrument};

pub static APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[derive(Clone)]
pub(crate) struct ApiClient {
    http: Client,
    config: ApiConfig,
    store: Arc<dyn KeyValueStore>,
}

impl ApiClient {
    pub(crate) fn new(config: ApiConfig, store: Arc<dyn KeyValueStore>) -> Result<Self, ApiError> {
        let http = Client::builder()
            .user_agent(APP_USER_AGENT)
            .timeout(config.timeout)
            .build()
            .map_err(|err| ApiError::Request(format!("Failed to initialize HTTP client: {err}")))?;

        Ok(Self {
            http,
            config,
            store,
        })
    }

    pub(crate) fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// GET and decode a JSON body.
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.send(Method::GET, path, None).await?;
        handle_json_response(response).await
    }

    /// POST a JSON body and ignore whatever the server answers on success.
    pub(crate) async fn post_json<B: Serialize>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        let payload = encode(body)?;
        let response = self.send(Method::POST, path, Some(payload)).await?;
        handle_empty_response(response).await
    }

    /// POST a JSON body and decode the JSON response.
    pub(crate) async fn post_json_response<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let payload = encode(body)?;
        let response = self.send(Method::POST, path, Some(payload)).await?;
        handle_json_response(response).await
    }

    /// POST without a body, ignoring the response body.
    pub(crate) async fn post_empty(&self, path: &str) -> Result<(), ApiError> {
        let response = self.send(Method::POST, path, None).await?;
        handle_empty_response(response).await
    }

    /// POST without a body and decode the JSON response.
    pub(crate) async fn post_empty_response<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<T, ApiError> {
        let response = self.send(Method::POST, path, None).await?;
        handle_json_response(response).await
    }

    /// Issues exactly one request. Any stored token is attached, even on
    /// login and register; a token that cannot form a header value is skipped
    /// rather than failing the call.
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<String>,
    ) -> Result<Response, ApiError> {
        let url = self.config.endpoint(path);

        let mut builder = self
            .http
            .request(method.clone(), &url)
            .header(CONTENT_TYPE, "application/json");

        if let Some(token) = self.store.get(TOKEN_KEY).filter(|token| !token.is_empty()) {
            match HeaderValue::from_str(&format!("Bearer {token}")) {
                Ok(mut value) => {
                    value.set_sensitive(true);
                    builder = builder.header(AUTHORIZATION, value);
                }
                Err(_) => debug!("stored token is not a valid header value, sending without it"),
            }
        }

        if let Some(body) = body {
            builder = builder.body(body);
        }

        let span = info_span!(
            "legaleyes.request",
            http.method = %method,
            url = %url
        );
        let response = builder
            .send()
            .instrument(span)
            .await
            .map_err(|err| map_request_error(&err, &self.config.base_url))?;

        if !response.status().is_success() {
            debug!("{} {} returned {}", method, url, response.status());
        }

        Ok(response)
    }
}

fn encode<B: Serialize>(body: &B) -> Result<String, ApiError> {
    serde_json::to_string(body)
        .map_err(|err| ApiError::Request(format!("Failed to encode request: {err}")))
}

/// Message shown when the backend cannot be reached at all.
#[must_use]
pub fn unreachable_message(base_url: &str) -> String {
    format!("Unable to connect to server. Please make sure the backend is running on {base_url}")
}

/// Maps transport failures to user-facing errors. The raw error only goes to
/// the debug log.
fn map_request_error(err: &reqwest::Error, base_url: &str) -> ApiError {
    debug!("request failed before a response: {:?}", err);

    if err.is_timeout() {
        ApiError::Timeout("Request timed out. Please try again.".to_string())
    } else if err.is_builder() {
        ApiError::Request(format!("Failed to build request: {err}"))
    } else {
        ApiError::Network(unreachable_message(base_url))
    }
}

/// Message for a non-2xx response: the JSON `message` field when present,
/// otherwise a line naming the status code.
#[must_use]
pub fn http_error_message(status: u16, body: &[u8]) -> String {
    serde_json::from_slice::<Value>(body)
        .ok()
        .as_ref()
        .and_then(|json| json.get("message"))
        .and_then(Value::as_str)
        .filter(|message| !message.is_empty())
        .map_or_else(
            || format!("Request failed with status {status}"),
            ToString::to_string,
        )
}

async fn http_error(response: Response) -> ApiError {
    let status = response.status().as_u16();
    let body = response.bytes().await.unwrap_or_default();
    ApiError::Http(http_error_message(status, &body))
}

async fn handle_json_response<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    if response.status().is_success() {
        response
            .json::<T>()
            .await
            .map_err(|err| ApiError::Response(format!("Failed to decode response: {err}")))
    } else {
        Err(http_error(response).await)
    }
}

async fn handle_empty_response(response: Response) -> Result<(), ApiError> {
    if response.status().is_success() {
        Ok(())
    } else {
        Err(http_error(response).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_message_prefers_server_message() {
        assert_eq!(
            http_error_message(401, br#"{"message":"bad credentials"}"#),
            "bad credentials"
        );
    }

    #[test]
    fn error_message_falls_back_to_status() {
        assert_eq!(http_error_message(500, b""), "Request failed with status 500");
        assert_eq!(
            http_error_message(502, b"<html>Bad Gateway</html>"),
            "Request failed with status 502"
        );
        assert_eq!(
            http_error_message(400, br#"{"detail":"nope"}"#),
            "Request failed with status 400"
        );
        assert_eq!(
            http_error_message(400, br#"{"message":""}"#),
            "Request failed with status 400"
        );
        assert_eq!(
            http_error_message(400, br#"{"message":{"code":1}}"#),
            "Request failed with status 400"
        );
    }

    #[test]
    fn unreachable_message_names_backend() {
        let message = unreachable_message("http://localhost:8000/api");
        assert!(message.contains("http://localhost:8000/api"));
        assert!(message.starts_with("Unable to connect to server"));
    }
}
