//! Errors from the REST API layer.

use serde_json::Value;

/// Errors returned by [`crate::ApiClient`].
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The HTTP request itself failed (network, DNS, TLS, CORS).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered 401 or 403.
    #[error("Not authorized ({status})")]
    Unauthorized { status: u16 },

    /// The server returned any other non-2xx status code.
    #[error("API error ({status}): {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The response body was not the JSON shape we expected.
    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// A protected call was attempted without a stored token.
    #[error("Not signed in")]
    NotSignedIn,
}

impl ApiError {
    /// Whether the caller should drop the session and send the user to sign-in.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. } | ApiError::NotSignedIn)
    }

    /// Short message suitable for showing inline next to a form or table.
    ///
    /// For API errors the backend's own `message` / `title` / `error` field is
    /// preferred over the raw body.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Request(_) => "Could not reach the server. Check your connection.".to_string(),
            ApiError::Unauthorized { .. } => "Your session has expired. Please sign in again.".to_string(),
            ApiError::NotSignedIn => "Please sign in to continue.".to_string(),
            ApiError::Decode(_) => "The server sent an unexpected response.".to_string(),
            ApiError::Status { status, body } => server_message(body)
                .unwrap_or_else(|| format!("Request failed with status {status}.")),
        }
    }
}

fn server_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }
    match serde_json::from_str::<Value>(trimmed) {
        Ok(Value::Object(map)) => ["message", "title", "error", "detail"]
            .iter()
            .find_map(|k| map.get(*k).and_then(Value::as_str))
            .map(str::to_string),
        Ok(Value::String(s)) => Some(s),
        Ok(_) => None,
        // Plain-text bodies are shown as-is unless they look like an HTML error page.
        Err(_) if !trimmed.starts_with('<') => Some(trimmed.to_string()),
        Err(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_prefers_server_message() {
        let err = ApiError::Status {
            status: 400,
            body: r#"{"message":"Topic already exists for this subject"}"#.to_string(),
        };
        assert_eq!(err.user_message(), "Topic already exists for this subject");

        let err = ApiError::Status {
            status: 422,
            body: r#"{"title":"One or more validation errors occurred."}"#.to_string(),
        };
        assert_eq!(err.user_message(), "One or more validation errors occurred.");
    }

    #[test]
    fn test_user_message_plain_and_empty_bodies() {
        let err = ApiError::Status {
            status: 500,
            body: "Email not verified".to_string(),
        };
        assert_eq!(err.user_message(), "Email not verified");

        let err = ApiError::Status {
            status: 502,
            body: "<html>Bad gateway</html>".to_string(),
        };
        assert_eq!(err.user_message(), "Request failed with status 502.");

        let err = ApiError::Status {
            status: 404,
            body: String::new(),
        };
        assert_eq!(err.user_message(), "Request failed with status 404.");
    }

    #[test]
    fn test_unauthorized_classification() {
        assert!(ApiError::Unauthorized { status: 401 }.is_unauthorized());
        assert!(ApiError::NotSignedIn.is_unauthorized());
        assert!(!ApiError::Status {
            status: 500,
            body: String::new()
        }
        .is_unauthorized());
    }
}
