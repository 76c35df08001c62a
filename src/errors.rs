use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Failures of the sync core. `Display` is the message shown to API callers.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error(
        "Missing required environment variables: {}. Set them in the environment or in a .env file.",
        .missing.join(", ")
    )]
    Configuration { missing: Vec<&'static str> },

    #[error("{message}")]
    Authentication {
        message: String,
        #[source]
        cause: Option<BoxError>,
    },

    #[error("{message}")]
    Fetch {
        message: String,
        #[source]
        cause: Option<BoxError>,
    },

    #[error("{message}")]
    Persistence {
        message: String,
        #[source]
        cause: Option<BoxError>,
    },
}

impl SyncError {
    pub fn authentication(message: impl Into<String>, cause: Option<BoxError>) -> Self {
        SyncError::Authentication { message: message.into(), cause }
    }

    pub fn fetch(message: impl Into<String>, cause: Option<BoxError>) -> Self {
        SyncError::Fetch { message: message.into(), cause }
    }

    pub fn persistence(message: impl Into<String>, cause: impl Into<BoxError>) -> Self {
        SyncError::Persistence { message: message.into(), cause: Some(cause.into()) }
    }

    /// Short label used for logs and metric labels.
    pub fn kind(&self) -> &'static str {
        match self {
            SyncError::Configuration { .. } => "configuration",
            SyncError::Authentication { .. } => "authentication",
            SyncError::Fetch { .. } => "fetch",
            SyncError::Persistence { .. } => "persistence",
        }
    }
}

impl IntoResponse for SyncError {
    fn into_response(self) -> Response {
        let cause = std::error::Error::source(&self).map(|c| c.to_string());
        error!(kind = self.kind(), cause = ?cause, "{}", self);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": self.to_string() })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_message_lists_missing_keys_in_order() {
        let err = SyncError::Configuration {
            missing: vec!["XERO_CLIENT_ID", "XERO_CLIENT_SECRET"],
        };
        assert!(err
            .to_string()
            .starts_with("Missing required environment variables: XERO_CLIENT_ID, XERO_CLIENT_SECRET."));
    }

    #[test]
    fn authentication_keeps_upstream_message_and_cause() {
        let cause = std::io::Error::new(std::io::ErrorKind::Other, "connection reset");
        let err = SyncError::authentication("invalid_client", Some(Box::new(cause)));
        assert_eq!(err.to_string(), "invalid_client");
        let source = std::error::Error::source(&err).map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("connection reset"));
    }
}
