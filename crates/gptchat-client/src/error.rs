use serde::{Deserialize, Serialize};

use crate::de::null_as_default;

/// Client-specific result type
pub type Result<T> = std::result::Result<T, ChatClientError>;

/// Errors from the chat client
#[derive(Debug, thiserror::Error)]
pub enum ChatClientError {
    /// Request could not be encoded as JSON
    #[error("failed to serialize request: {0}")]
    Serialization(#[source] serde_json::Error),

    /// Outbound request could not be constructed (bad base URL or header value)
    #[error("failed to build request: {0}")]
    TransportSetup(String),

    /// Network-level failure (connect, DNS, TLS, timeout, body read)
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// Service rejected the request with a structured error body
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Non-200 status whose body was not a recognizable error payload
    #[error("request failed with status code {status}")]
    UnexpectedStatus {
        /// HTTP status code
        status: u16,
    },

    /// 200 response whose body did not match the expected shape
    #[error("failed to decode response: {0}")]
    Decode(#[source] serde_json::Error),
}

impl ChatClientError {
    /// HTTP status code of the response that produced this error, if any
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api(err) => Some(err.status_code),
            Self::UnexpectedStatus { status } => Some(*status),
            _ => None,
        }
    }

    /// Structured error returned by the service, if any
    pub const fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api(err) => Some(err),
            _ => None,
        }
    }
}

/// Error payload returned by the service on a non-200 response
///
/// Wire shape: `{"error": {"message": "...", "type": "...", "code": "..."}}`.
/// The status code comes from the HTTP response and is never read from or
/// written to the body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("API error ({status_code}): {}", .error.message)]
pub struct ApiError {
    /// Error details supplied by the service
    pub error: ErrorDetails,
    /// HTTP status code of the response
    #[serde(skip)]
    pub status_code: u16,
}

impl ApiError {
    /// Human-readable message from the service
    pub fn message(&self) -> &str {
        &self.error.message
    }

    /// Machine-readable error type (e.g. `invalid_request_error`)
    pub fn error_type(&self) -> &str {
        &self.error.error_type
    }

    /// Machine-readable error code (e.g. `invalid_api_key`)
    pub fn code(&self) -> &str {
        &self.error.code
    }
}

/// Details of a service error
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetails {
    /// Human-readable message
    pub message: String,
    /// Error type identifier
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub error_type: String,
    /// Error code identifier
    #[serde(default, deserialize_with = "null_as_default")]
    pub code: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_decodes_nested_details() {
        let body = r#"{"error":{"message":"bad key","type":"invalid_request_error","code":"invalid_api_key"}}"#;
        let err: ApiError = serde_json::from_str(body).unwrap();

        assert_eq!(err.message(), "bad key");
        assert_eq!(err.error_type(), "invalid_request_error");
        assert_eq!(err.code(), "invalid_api_key");
        assert_eq!(err.status_code, 0);
    }

    #[test]
    fn null_and_missing_code_decode_as_empty() {
        let body = r#"{"error":{"message":"slow down","type":"requests","code":null,"param":null}}"#;
        let err: ApiError = serde_json::from_str(body).unwrap();
        assert_eq!(err.code(), "");

        let body = r#"{"error":{"message":"oops"}}"#;
        let err: ApiError = serde_json::from_str(body).unwrap();
        assert_eq!(err.error_type(), "");
        assert_eq!(err.code(), "");
    }

    #[test]
    fn body_without_error_object_is_rejected() {
        assert!(serde_json::from_str::<ApiError>(r#"{"detail":"nope"}"#).is_err());
        assert!(serde_json::from_str::<ApiError>(r#"{"error":{"type":"x"}}"#).is_err());
    }

    #[test]
    fn status_code_is_not_serialized() {
        let err = ApiError {
            error: ErrorDetails {
                message: "bad key".to_owned(),
                error_type: "invalid_request_error".to_owned(),
                code: "invalid_api_key".to_owned(),
            },
            status_code: 401,
        };

        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "error": {
                    "message": "bad key",
                    "type": "invalid_request_error",
                    "code": "invalid_api_key"
                }
            })
        );
    }

    #[test]
    fn display_includes_status_and_message() {
        let err = ChatClientError::from(ApiError {
            error: ErrorDetails {
                message: "model not found".to_owned(),
                ..Default::default()
            },
            status_code: 404,
        });

        assert_eq!(err.to_string(), "API error (404): model not found");
        assert_eq!(err.status(), Some(404));
        assert!(err.api_error().is_some());
    }

    #[test]
    fn unexpected_status_exposes_status_only() {
        let err = ChatClientError::UnexpectedStatus { status: 502 };
        assert_eq!(err.status(), Some(502));
        assert!(err.api_error().is_none());
        assert_eq!(err.to_string(), "request failed with status code 502");
    }
}
