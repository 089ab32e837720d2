use thiserror::Error;

/// Failure of a session client call. Every variant carries one user-facing
/// message and `Display` renders exactly that message, so the view layer can
/// show it inline without further formatting.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    /// Non-2xx response; the server's `message` or a synthesized status line.
    #[error("{0}")]
    Http(String),
    /// The request never reached the server.
    #[error("{0}")]
    Network(String),
    #[error("{0}")]
    Timeout(String),
    /// A 2xx response whose body could not be used.
    #[error("{0}")]
    Response(String),
    /// The request could not be built.
    #[error("{0}")]
    Request(String),
}

impl ApiError {
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            ApiError::Http(message)
            | ApiError::Network(message)
            | ApiError::Timeout(message)
            | ApiError::Response(message)
            | ApiError::Request(message) => message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ApiError;

    #[test]
    fn display_is_the_bare_message() {
        let err = ApiError::Http("bad credentials".to_string());
        assert_eq!(err.to_string(), "bad credentials");
        assert_eq!(err.message(), "bad credentials");
    }
}
