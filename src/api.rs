//api.rs
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8081";

/// Hard cap on every request so a hung backend can never leave a form
/// stuck in its loading state.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Conflict(String),
    #[error("Cannot connect to the server. Please ensure the backend is running on {0}.")]
    Unreachable(String),
    #[error("{0}")]
    Unexpected(String),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SignupData {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
}

#[derive(Debug, Deserialize)]
struct AuthResponse {
    user: User,
}

/// Error payload shape used by the backend; either field may carry the
/// human-readable reason.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    error: Option<String>,
    message: Option<String>,
}

impl ErrorBody {
    fn detail(self) -> Option<String> {
        self.error.or(self.message)
    }
}

#[derive(Clone, Copy, Debug)]
enum AuthOp {
    Login,
    Signup,
}

impl AuthOp {
    fn label(self) -> &'static str {
        match self {
            AuthOp::Login => "Login",
            AuthOp::Signup => "Signup",
        }
    }

    fn bad_request_default(self) -> &'static str {
        match self {
            AuthOp::Login => "Invalid request data",
            AuthOp::Signup => "Invalid registration data",
        }
    }
}

/// Map a rejected status to the error surfaced in the form. The server's
/// own message wins when it sent one.
fn classify(op: AuthOp, status: u16, detail: Option<String>) -> ApiError {
    match status {
        401 => ApiError::Unauthorized(
            detail.unwrap_or_else(|| "Invalid username or password".to_string()),
        ),
        400 => ApiError::BadRequest(detail.unwrap_or_else(|| op.bad_request_default().to_string())),
        409 => ApiError::Conflict(detail.unwrap_or_else(|| "User already exists".to_string())),
        _ => ApiError::Unexpected(
            detail.unwrap_or_else(|| format!("{} failed with status {}", op.label(), status)),
        ),
    }
}

/// Thin client for the two auth endpoints plus the connectivity probe.
/// Never touches the session store.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::blocking::Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, reqwest::Error> {
        let http = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn login(&self, credentials: &Credentials) -> Result<User, ApiError> {
        self.auth_request(AuthOp::Login, "/api/users/login", credentials)
    }

    pub fn signup(&self, data: &SignupData) -> Result<User, ApiError> {
        self.auth_request(AuthOp::Signup, "/api/users/signup", data)
    }

    /// Probe `GET /api/users/test`; any 2xx counts as reachable.
    pub fn test_connection(&self) -> Result<(), ApiError> {
        let url = format!("{}/api/users/test", self.base_url);
        let response = self
            .http
            .get(&url)
            .send()
            .map_err(|e| self.transport_error(e))?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(ApiError::Unexpected(format!(
                "connectivity probe failed with status {status}"
            )))
        }
    }

    fn auth_request<B: Serialize>(&self, op: AuthOp, path: &str, body: &B) -> Result<User, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .http
            .post(&url)
            .json(body)
            .send()
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if status.is_success() {
            let parsed: AuthResponse = response
                .json()
                .map_err(|e| ApiError::Unexpected(format!("malformed response from server: {e}")))?;
            return Ok(parsed.user);
        }

        let body: ErrorBody = response.json().unwrap_or_default();
        warn!("{} rejected with status {}", op.label(), status);
        Err(classify(op, status.as_u16(), body.detail()))
    }

    fn transport_error(&self, err: reqwest::Error) -> ApiError {
        warn!("request to {} failed: {err}", self.base_url);
        ApiError::Unreachable(self.base_url.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_uses_class_defaults_without_server_detail() {
        assert_eq!(
            classify(AuthOp::Login, 401, None),
            ApiError::Unauthorized("Invalid username or password".to_string())
        );
        assert_eq!(
            classify(AuthOp::Login, 400, None),
            ApiError::BadRequest("Invalid request data".to_string())
        );
        assert_eq!(
            classify(AuthOp::Signup, 400, None),
            ApiError::BadRequest("Invalid registration data".to_string())
        );
        assert_eq!(
            classify(AuthOp::Signup, 409, None),
            ApiError::Conflict("User already exists".to_string())
        );
        assert_eq!(
            classify(AuthOp::Login, 500, None),
            ApiError::Unexpected("Login failed with status 500".to_string())
        );
    }

    #[test]
    fn classify_prefers_server_detail() {
        assert_eq!(
            classify(AuthOp::Login, 401, Some("account locked".to_string())),
            ApiError::Unauthorized("account locked".to_string())
        );
        assert_eq!(
            classify(AuthOp::Signup, 409, Some("username taken".to_string())),
            ApiError::Conflict("username taken".to_string())
        );
    }

    #[test]
    fn error_body_prefers_error_field_over_message() {
        let body = ErrorBody {
            error: Some("from error".to_string()),
            message: Some("from message".to_string()),
        };
        assert_eq!(body.detail(), Some("from error".to_string()));

        let fallback = ErrorBody {
            error: None,
            message: Some("from message".to_string()),
        };
        assert_eq!(fallback.detail(), Some("from message".to_string()));
    }

    #[test]
    fn unreachable_message_names_the_backend() {
        let err = ApiError::Unreachable("http://localhost:8081".to_string());
        assert_eq!(
            err.to_string(),
            "Cannot connect to the server. Please ensure the backend is running on http://localhost:8081."
        );
    }

    #[test]
    fn base_url_is_normalized() {
        let client = ApiClient::new("http://localhost:8081/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:8081");
    }
}
