// Typed failures from the Twitter client.
//
// The engine treats every variant the same way (abort the run), but keeping
// them apart makes the log line and the tests say what actually went wrong.

use thiserror::Error;

use super::models::ErrorEnvelope;

/// Twitter error codes that mean the credentials were rejected.
const AUTH_ERROR_CODES: &[i64] = &[32, 89, 215];

#[derive(Error, Debug)]
pub enum GraphError {
    /// Credentials were malformed or rejected (401, or an auth error code).
    #[error("authentication failed for {endpoint}: {message}")]
    Authentication { endpoint: String, message: String },

    /// The request never produced a response.
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// Any other non-success response.
    #[error("{endpoint} returned {status}: {message}")]
    Api {
        endpoint: String,
        status: u16,
        message: String,
    },

    /// The body could not be parsed into the expected shape.
    #[error("failed to decode {endpoint} response: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
}

impl GraphError {
    /// Classify a non-success response from its status code and raw body.
    pub fn from_response(endpoint: &str, status: u16, body: &str) -> Self {
        let envelope: Option<ErrorEnvelope> = serde_json::from_str(body).ok();
        let first = envelope.as_ref().and_then(|e| e.errors.first());

        let message = match first {
            Some(entry) => format!("{} (code {})", entry.message, entry.code),
            None if body.is_empty() => "empty response body".to_string(),
            None => body.to_string(),
        };

        let auth_code = first.is_some_and(|e| AUTH_ERROR_CODES.contains(&e.code));
        if status == 401 || auth_code {
            return GraphError::Authentication {
                endpoint: endpoint.to_string(),
                message,
            };
        }

        GraphError::Api {
            endpoint: endpoint.to_string(),
            status,
            message,
        }
    }

    pub fn is_authentication(&self) -> bool {
        matches!(self, GraphError::Authentication { .. })
    }
}
