//! Error taxonomy shared by the HTTP client, request wrappers and hooks.
//!
//! Failures fall into three kinds that propagate unmodified from the HTTP
//! client up to the hook layer:
//! - transport: no connectivity, TLS failure, timeout ([`ApiError::Transport`])
//! - HTTP status: any non-2xx answer ([`ApiError::Status`])
//! - schema: a 2xx body that does not match its schema ([`ApiError::Schema`])
//!
//! Nothing is retried or translated on the way up.

use std::sync::Arc;

use edumall_core::SchemaError;
use thiserror::Error;

/// Errors returned by the HTTP client and request wrappers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced an HTTP response.
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body does not match its schema.
    #[error("Invalid response: {0}")]
    Schema(#[from] SchemaError),

    /// The request body failed its field rules and was not sent.
    #[error("Invalid request: {0}")]
    InvalidRequest(#[from] validator::ValidationErrors),

    /// The request body could not be encoded.
    #[error("JSON encode error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The base URL cannot carry path segments.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// Whether the request gave up waiting on the server.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport(err) if err.is_timeout())
    }

    /// Whether the server rejected the bearer token (or its absence).
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Status { status: 401, .. })
    }

    /// HTTP status, when the server answered at all.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Failure state exposed by the query/mutation layer.
///
/// Cheap to clone: every consumer coalesced onto the same in-flight request
/// receives the same underlying [`ApiError`].
#[derive(Debug, Clone, Error)]
pub enum QueryError {
    /// The request behind the query or mutation failed.
    #[error(transparent)]
    Api(Arc<ApiError>),

    /// The cache holds a different type under this key.
    #[error("cached value for {0} has an unexpected type")]
    TypeMismatch(String),
}

impl QueryError {
    /// The underlying request error, if any.
    #[must_use]
    pub fn api(&self) -> Option<&ApiError> {
        match self {
            Self::Api(err) => Some(err),
            Self::TypeMismatch(_) => None,
        }
    }
}

impl From<ApiError> for QueryError {
    fn from(err: ApiError) -> Self {
        Self::Api(Arc::new(err))
    }
}

impl From<Arc<ApiError>> for QueryError {
    fn from(err: Arc<ApiError>) -> Self {
        Self::Api(err)
    }
}

/// Result type alias for the hook layer.
pub type QueryResult<T> = std::result::Result<T, QueryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_display() {
        let err = ApiError::Status {
            status: 404,
            body: "not found".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 404: not found");
        assert_eq!(err.status(), Some(404));
        assert!(!err.is_unauthorized());
        assert!(!err.is_timeout());
    }

    #[test]
    fn test_schema_error_display() {
        let err = ApiError::from(SchemaError {
            path: "data.isRead".to_string(),
            message: "invalid type".to_string(),
        });
        assert_eq!(
            err.to_string(),
            "Invalid response: schema violation at `data.isRead`: invalid type"
        );
    }

    #[test]
    fn test_query_error_is_transparent() {
        let err = QueryError::from(ApiError::Status {
            status: 401,
            body: String::new(),
        });
        assert_eq!(err.to_string(), "HTTP 401: ");
        assert!(err.api().is_some_and(ApiError::is_unauthorized));
    }
}
