use reqwest::header::ACCEPT;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::cache::token::TokenRecord;
use crate::errors::SyncError;

const GRANT_TYPE: &str = "client_credentials";
/// `expires` values below this are relative seconds, not timestamps.
const RELATIVE_EXPIRY_CEILING: u64 = 10 * 365 * 24 * 60 * 60;

/// Client for the OAuth2 token endpoint (client-credentials grant only).
#[derive(Debug, Clone)]
pub struct OAuth2Source {
    pub token_url: String,
    pub client: Client,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    expires_in: Option<Value>,
    expires: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
struct OAuthErrorBody {
    error: Option<String>,
    error_description: Option<String>,
}

impl OAuth2Source {
    pub fn new(token_url: String, client: Client) -> Self {
        Self { token_url, client }
    }

    /// Exchange the client credentials for a token. `scope` is sent only when
    /// present; the record's expiry is absolute, computed against `now`.
    pub async fn exchange(
        &self,
        client_id: &str,
        client_secret: &str,
        scope: Option<&str>,
        now: u64,
    ) -> Result<TokenRecord, SyncError> {
        let mut form = vec![
            ("grant_type", GRANT_TYPE),
            ("client_id", client_id),
            ("client_secret", client_secret),
        ];
        if let Some(scope) = scope {
            form.push(("scope", scope));
        }

        let response = self
            .client
            .post(&self.token_url)
            .header(ACCEPT, "application/json")
            .form(&form)
            .send()
            .await
            .map_err(|err| {
                SyncError::authentication(transport_message(&err), Some(Box::new(err)))
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|err| {
            SyncError::authentication(transport_message(&err), Some(Box::new(err)))
        })?;
        debug!(status = %status, "token endpoint responded");

        if !status.is_success() {
            return Err(SyncError::authentication(error_message(status, &body), None));
        }
        parse_token_response(&body, now)
    }
}

fn parse_token_response(body: &str, now: u64) -> Result<TokenRecord, SyncError> {
    let parsed: TokenResponse = serde_json::from_str(body).map_err(|err| {
        SyncError::authentication(
            format!("Invalid response from token endpoint: {}", err),
            Some(Box::new(err)),
        )
    })?;

    let access_token = parsed
        .access_token
        .filter(|t| !t.is_empty())
        .ok_or_else(|| SyncError::authentication("Required option not passed: \"access_token\"", None))?;

    let expires_at = match (parsed.expires_in.as_ref().and_then(as_seconds), parsed.expires.as_ref().and_then(as_seconds)) {
        (Some(expires_in), _) => now.saturating_add(expires_in),
        (None, Some(expires)) if expires < RELATIVE_EXPIRY_CEILING => now.saturating_add(expires),
        (None, Some(expires)) => expires,
        // no expiry given: store it already stale so the next call refreshes
        (None, None) => now,
    };

    Ok(TokenRecord::new(access_token, expires_at))
}

fn as_seconds(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64().or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn error_message(status: StatusCode, body: &str) -> String {
    let parsed: OAuthErrorBody = serde_json::from_str(body).unwrap_or_default();
    parsed
        .error_description
        .filter(|m| !m.is_empty())
        .or(parsed.error.filter(|m| !m.is_empty()))
        .unwrap_or_else(|| match status.canonical_reason() {
            Some(reason) => format!("Token endpoint returned {} {}", status.as_u16(), reason),
            None => format!("Token endpoint returned {}", status.as_u16()),
        })
}

fn transport_message(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        "Token endpoint request timed out".to_owned()
    } else {
        format!("Token endpoint request failed: {}", err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: u64 = 1_700_000_000;

    #[test]
    fn expires_in_is_relative_to_now() {
        let record = parse_token_response(r#"{"access_token":"abc","expires_in":1800}"#, NOW).unwrap();
        assert_eq!(record, TokenRecord::new("abc".into(), NOW + 1800));
        assert!(record.is_usable(NOW + 1769));
    }

    #[test]
    fn absolute_and_relative_expires_are_told_apart() {
        let absolute = parse_token_response(
            &format!(r#"{{"access_token":"abc","expires":{}}}"#, NOW + 600),
            NOW,
        )
        .unwrap();
        assert_eq!(absolute.expires_at, NOW + 600);

        let relative = parse_token_response(r#"{"access_token":"abc","expires":"600"}"#, NOW).unwrap();
        assert_eq!(relative.expires_at, NOW + 600);
    }

    #[test]
    fn missing_expiry_yields_stale_record() {
        let record = parse_token_response(r#"{"access_token":"abc"}"#, NOW).unwrap();
        assert!(!record.is_usable(NOW));
    }

    #[test]
    fn malformed_bodies_are_authentication_failures() {
        for body in ["", "<html>", r#"{"token_type":"Bearer"}"#, r#"{"access_token":""}"#] {
            let err = parse_token_response(body, NOW).unwrap_err();
            assert!(matches!(err, SyncError::Authentication { .. }), "body {:?}", body);
        }
    }

    #[test]
    fn error_message_prefers_oauth_error_fields() {
        assert_eq!(
            error_message(StatusCode::BAD_REQUEST, r#"{"error":"invalid_client"}"#),
            "invalid_client"
        );
        assert_eq!(
            error_message(
                StatusCode::BAD_REQUEST,
                r#"{"error":"invalid_scope","error_description":"scope not allowed"}"#
            ),
            "scope not allowed"
        );
        assert_eq!(
            error_message(StatusCode::BAD_GATEWAY, "upstream down"),
            "Token endpoint returned 502 Bad Gateway"
        );
    }
}
