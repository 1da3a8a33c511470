//! Client-side error handling for TappedOut API calls.
//!
//! Failed responses are classified by status code into a fixed set of
//! [`ErrorKind`]s. Each kind carries the fallback message shown to the user
//! when the backend does not provide one. Statuses outside the set, and
//! transport failures, stay unclassified.

use reqwest::StatusCode;
use std::collections::HashMap;
use thiserror::Error;

use crate::auth::session::SessionStoreError;

/// Classification of a failed response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// 400
    Validation,
    /// 401, the session is torn down as well
    SessionExpired,
    /// 403
    Forbidden,
    /// 404
    NotFound,
    /// 409
    Conflict,
    /// 500
    Server,
}

impl ErrorKind {
    /// Classify an HTTP status. Only the six known statuses map to a kind.
    pub fn from_status(status: StatusCode) -> Option<Self> {
        match status {
            StatusCode::BAD_REQUEST => Some(ErrorKind::Validation),
            StatusCode::UNAUTHORIZED => Some(ErrorKind::SessionExpired),
            StatusCode::FORBIDDEN => Some(ErrorKind::Forbidden),
            StatusCode::NOT_FOUND => Some(ErrorKind::NotFound),
            StatusCode::CONFLICT => Some(ErrorKind::Conflict),
            StatusCode::INTERNAL_SERVER_ERROR => Some(ErrorKind::Server),
            _ => None,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::SessionExpired => StatusCode::UNAUTHORIZED,
            ErrorKind::Forbidden => StatusCode::FORBIDDEN,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::Server => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "validation_error",
            ErrorKind::SessionExpired => "session_expired",
            ErrorKind::Forbidden => "forbidden",
            ErrorKind::NotFound => "not_found",
            ErrorKind::Conflict => "conflict",
            ErrorKind::Server => "server_error",
        }
    }

    /// Message shown when the backend body carries none
    pub fn fallback_message(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "Validation error.",
            ErrorKind::SessionExpired => "Session expired. Please login again.",
            ErrorKind::Forbidden => "You are not authorized to perform this action.",
            ErrorKind::NotFound => "Resource not found.",
            ErrorKind::Conflict => "Resource already exists.",
            ErrorKind::Server => "Something went wrong. Please try again.",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error body produced by the backend's exception handler. Field errors
/// may carry a null message, so each entry is optional.
#[derive(Debug)]
struct BackendErrorBody {
    message: Option<String>,
    errors: Option<HashMap<String, Option<String>>>,
}

impl BackendErrorBody {
    /// Read each part on its own so a malformed `errors` map never costs
    /// the message.
    fn from_object(object: &serde_json::Map<String, serde_json::Value>) -> Self {
        let message = object
            .get("message")
            .and_then(serde_json::Value::as_str)
            .map(str::to_string);
        let errors = object
            .get("errors")
            .and_then(|errors| serde_json::from_value(errors.clone()).ok());
        Self { message, errors }
    }

    fn field_errors(self) -> Option<HashMap<String, String>> {
        let errors: HashMap<String, String> = self
            .errors?
            .into_iter()
            .filter_map(|(field, message)| Some((field, message?)))
            .collect();
        (!errors.is_empty()).then_some(errors)
    }
}

/// Error returned by every API call
#[derive(Debug, Error)]
pub enum ApiError {
    /// The backend answered with a non-success status
    #[error("{}", describe_status(.status, .kind, .message))]
    Status {
        status: StatusCode,
        kind: Option<ErrorKind>,
        message: Option<String>,
        /// Field-level validation errors, when the backend sends them
        field_errors: Option<HashMap<String, String>>,
    },

    #[error("Request timed out: {0}")]
    Timeout(#[source] reqwest::Error),

    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    #[error("Failed to decode response: {0}")]
    Decode(#[source] reqwest::Error),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Session storage failed: {0}")]
    Session(#[from] SessionStoreError),
}

fn describe_status(
    status: &StatusCode,
    kind: &Option<ErrorKind>,
    message: &Option<String>,
) -> String {
    let text = message
        .as_deref()
        .or_else(|| kind.map(|k| k.fallback_message()))
        .unwrap_or("Request failed");
    match kind {
        Some(kind) => format!("[{}] {} ({})", kind, text, status.as_u16()),
        None => format!("{} ({})", text, status.as_u16()),
    }
}

impl ApiError {
    /// Build the error for a failed response from its status and raw body.
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        let (message, field_errors) = parse_error_body(body);
        ApiError::Status {
            status,
            kind: ErrorKind::from_status(status),
            message,
            field_errors,
        }
    }

    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout(err)
        } else if err.is_decode() {
            ApiError::Decode(err)
        } else if err.is_builder() {
            ApiError::InvalidRequest(err.to_string())
        } else {
            ApiError::Network(err)
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            ApiError::Status { kind, .. } => *kind,
            _ => None,
        }
    }

    /// Message provided by the backend, if any
    pub fn message(&self) -> Option<&str> {
        match self {
            ApiError::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// Text to show the user: backend message, else the kind's fallback.
    /// `None` for errors this layer does not classify.
    pub fn user_message(&self) -> Option<&str> {
        let kind = self.kind()?;
        Some(self.message().unwrap_or_else(|| kind.fallback_message()))
    }

    pub fn field_errors(&self) -> Option<&HashMap<String, String>> {
        match self {
            ApiError::Status { field_errors, .. } => field_errors.as_ref(),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.kind() == Some(ErrorKind::SessionExpired)
    }
}

/// Pull the message out of a backend error body.
///
/// The backend answers either with a JSON object carrying `message` (and
/// sometimes `errors`), a JSON string, or plain text.
fn parse_error_body(body: &str) -> (Option<String>, Option<HashMap<String, String>>) {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return (None, None);
    }

    match serde_json::from_str::<serde_json::Value>(trimmed) {
        Ok(serde_json::Value::Object(object)) => {
            let mut parsed = BackendErrorBody::from_object(&object);
            (non_empty(parsed.message.take()), parsed.field_errors())
        }
        Ok(serde_json::Value::String(text)) => (non_empty(Some(text)), None),
        Ok(_) => (None, None),
        Err(_) => (Some(trimmed.to_string()), None),
    }
}

fn non_empty(message: Option<String>) -> Option<String> {
    message.filter(|m| !m.trim().is_empty())
}
