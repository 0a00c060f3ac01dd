use serde::Deserialize;
use serde_json::Value;

pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please check your connection.";
pub const INVALID_RESPONSE_MESSAGE: &str = "Invalid response from server. Please try again.";
pub const SESSION_EXPIRED_MESSAGE: &str = "Session expired. Please log in again.";
pub const REFRESH_FAILED_MESSAGE: &str = "Failed to refresh session";

/// Every way a call against the nutrition API can fail.
///
/// `status()` is the HTTP status the failure is reported with; transport and
/// decoding failures report `0`.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ApiError {
    #[error("{message}")]
    Validation { message: String, details: Value },

    #[error("{}", SESSION_EXPIRED_MESSAGE)]
    SessionExpired,

    #[error("{message}")]
    RefreshFailed { status: u16, message: String },

    #[error("{message}")]
    Http { status: u16, message: String },

    #[error("{}", NETWORK_ERROR_MESSAGE)]
    Network { cause: String },

    #[error("{}", INVALID_RESPONSE_MESSAGE)]
    InvalidResponse { cause: String },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// Build the error for a non-2xx response from its status and parsed body.
    pub fn from_response(status: u16, status_text: &str, body: Value) -> Self {
        let message = ErrorBody::from_value(&body)
            .message()
            .unwrap_or_else(|| format!("HTTP {}: {}", status, status_text));

        if status == 422 {
            ApiError::Validation {
                message,
                details: body,
            }
        } else {
            ApiError::Http { status, message }
        }
    }

    /// Terminal error for a failed refresh, carrying the refresh call's message and status.
    pub fn refresh_failed(cause: &ApiError) -> Self {
        let message = match cause.message() {
            m if m.is_empty() => REFRESH_FAILED_MESSAGE.to_string(),
            m => m,
        };
        let status = match cause.status() {
            0 => 401,
            s => s,
        };
        ApiError::RefreshFailed { status, message }
    }

    pub fn network(cause: impl std::fmt::Display) -> Self {
        ApiError::Network {
            cause: cause.to_string(),
        }
    }

    pub fn invalid_response(cause: impl std::fmt::Display) -> Self {
        ApiError::InvalidResponse {
            cause: cause.to_string(),
        }
    }

    pub fn status(&self) -> u16 {
        match self {
            Self::Validation { .. } => 422,
            Self::SessionExpired => 401,
            Self::RefreshFailed { status, .. } | Self::Http { status, .. } => *status,
            Self::Network { .. }
            | Self::InvalidResponse { .. }
            | Self::InvalidRequest(_)
            | Self::Config(_) => 0,
        }
    }

    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Structured validation payload. Only present for 422 responses.
    pub fn details(&self) -> Option<&Value> {
        match self {
            Self::Validation { details, .. } => Some(details),
            _ => None,
        }
    }

    /// A plain 401 from the server, before any session recovery was attempted.
    pub fn is_unauthorized_response(&self) -> bool {
        matches!(self, Self::Http { status: 401, .. })
    }

    /// The session is gone and the user has to sign in again.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::SessionExpired | Self::RefreshFailed { .. }) || self.status() == 401
    }
}

/// Custom result type for API calls
pub type ApiResult<T> = Result<T, ApiError>;

/// Error body returned by the backend: `{"detail": string | [{loc, msg, type}]}`.
#[derive(Debug, Default, Deserialize, PartialEq)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<ErrorDetail>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ErrorDetail {
    Validation(Vec<ValidationIssue>),
    Message(String),
    Other(Value),
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ValidationIssue {
    #[serde(default)]
    pub loc: Vec<Value>,
    pub msg: String,
    #[serde(default, rename = "type")]
    pub kind: String,
}

impl ErrorBody {
    /// Decode an error body; anything that is not an object with `detail` decodes as empty.
    pub fn from_value(value: &Value) -> Self {
        serde_json::from_value(value.clone()).unwrap_or_default()
    }

    /// The headline message: first validation message, else a string detail.
    pub fn message(&self) -> Option<String> {
        match self.detail.as_ref()? {
            ErrorDetail::Validation(issues) => issues
                .first()
                .map(|issue| issue.msg.clone())
                .filter(|msg| !msg.is_empty()),
            ErrorDetail::Message(msg) if !msg.is_empty() => Some(msg.clone()),
            ErrorDetail::Message(_) | ErrorDetail::Other(_) => None,
        }
    }
}
