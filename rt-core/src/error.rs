//! Error types for the Rutube API client.
//!
//! Every outcome of an API call that is not a decoded success lands in
//! `RtError`. The HTTP-facing variants form a closed taxonomy driven by the
//! response status; the remaining variants cover local failures
//! (configuration, arguments, file I/O).

use thiserror::Error;

/// Convenience type alias for Results using RtError.
pub type RtResult<T> = Result<T, RtError>;

/// The status-driven error taxonomy of the remote API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Gateway unreachable or timed out; no status available.
    Connection,
    /// 400.
    BadRequest,
    /// 401.
    Unauthorized,
    /// 403.
    Forbidden,
    /// 404.
    NotFound,
    /// 405.
    MethodNotAllowed,
    /// 5xx, or any non-2xx status without a dedicated kind.
    ServerError,
    /// Success status whose body is not valid JSON.
    Decoding,
}

impl ErrorKind {
    /// Map an HTTP status to its error kind. Returns `None` for 2xx.
    pub fn from_status(status: u16) -> Option<Self> {
        match status {
            200..=299 => None,
            400 => Some(Self::BadRequest),
            401 => Some(Self::Unauthorized),
            403 => Some(Self::Forbidden),
            404 => Some(Self::NotFound),
            405 => Some(Self::MethodNotAllowed),
            _ => Some(Self::ServerError),
        }
    }

    /// Message used when the error body carries none.
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::Connection => "Connection Error",
            Self::BadRequest => "Bad Request",
            Self::Unauthorized => "Unauthorized",
            Self::Forbidden => "Forbidden",
            Self::NotFound => "Not Found",
            Self::MethodNotAllowed => "Method Not Allowed",
            Self::ServerError => "Server Error",
            Self::Decoding => "Invalid JSON",
        }
    }
}

/// Unified error type for the Rutube client crates.
#[derive(Error, Debug)]
pub enum RtError {
    // -- Remote API errors --
    /// The gateway could not reach the server (DNS, refused, timeout).
    #[error("connection error: {0}")]
    Connection(String),

    /// Server returned 400.
    #[error("bad request (status {status}): {message}")]
    BadRequest { status: u16, message: String },

    /// Server returned 401.
    #[error("unauthorized (status {status}): {message}")]
    Unauthorized { status: u16, message: String },

    /// Server returned 403.
    #[error("forbidden (status {status}): {message}")]
    Forbidden { status: u16, message: String },

    /// Server returned 404.
    #[error("not found (status {status}): {message}")]
    NotFound { status: u16, message: String },

    /// Server returned 405.
    #[error("method not allowed (status {status}): {message}")]
    MethodNotAllowed { status: u16, message: String },

    /// Server returned 5xx or an unrecognized non-2xx status.
    #[error("server error (status {status}): {message}")]
    ServerError { status: u16, message: String },

    /// A success response carried a body that is not valid JSON.
    #[error("decoding error (status {status}): {message}")]
    Decoding { status: u16, message: String },

    // -- Local errors --
    /// Failed to load or parse client configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// A required argument was missing or malformed.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// File system operation failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization of a request payload failed.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Wrapping anyhow errors for interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RtError {
    /// Build the error for a non-2xx status. `message` falls back to the
    /// kind's default text when `None`.
    pub fn from_status(status: u16, message: Option<String>) -> Self {
        let kind = ErrorKind::from_status(status).unwrap_or(ErrorKind::ServerError);
        let message = message.unwrap_or_else(|| kind.default_message().to_string());
        match kind {
            ErrorKind::BadRequest => Self::BadRequest { status, message },
            ErrorKind::Unauthorized => Self::Unauthorized { status, message },
            ErrorKind::Forbidden => Self::Forbidden { status, message },
            ErrorKind::NotFound => Self::NotFound { status, message },
            ErrorKind::MethodNotAllowed => Self::MethodNotAllowed { status, message },
            _ => Self::ServerError { status, message },
        }
    }

    /// Taxonomy kind of this error, `None` for local errors.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Connection(_) => Some(ErrorKind::Connection),
            Self::BadRequest { .. } => Some(ErrorKind::BadRequest),
            Self::Unauthorized { .. } => Some(ErrorKind::Unauthorized),
            Self::Forbidden { .. } => Some(ErrorKind::Forbidden),
            Self::NotFound { .. } => Some(ErrorKind::NotFound),
            Self::MethodNotAllowed { .. } => Some(ErrorKind::MethodNotAllowed),
            Self::ServerError { .. } => Some(ErrorKind::ServerError),
            Self::Decoding { .. } => Some(ErrorKind::Decoding),
            _ => None,
        }
    }

    /// HTTP status carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::BadRequest { status, .. }
            | Self::Unauthorized { status, .. }
            | Self::Forbidden { status, .. }
            | Self::NotFound { status, .. }
            | Self::MethodNotAllowed { status, .. }
            | Self::ServerError { status, .. }
            | Self::Decoding { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<serde_json::Error> for RtError {
    fn from(e: serde_json::Error) -> Self {
        RtError::Serialization(e.to_string())
    }
}

impl From<toml::de::Error> for RtError {
    fn from(e: toml::de::Error) -> Self {
        RtError::Config(e.to_string())
    }
}

/// Pull a human-readable message out of an error response body.
///
/// Looks at `message`, then `detail`, then falls back to the trimmed raw
/// body when it is not JSON.
pub fn extract_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    match serde_json::from_str::<serde_json::Value>(trimmed) {
        Ok(value) => ["message", "detail"]
            .iter()
            .filter_map(|key| value.get(*key))
            .find_map(|v| match v {
                serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
                serde_json::Value::String(_) | serde_json::Value::Null => None,
                other => Some(other.to_string()),
            }),
        Err(_) => Some(trimmed.to_string()),
    }
}
