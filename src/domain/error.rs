//! Error taxonomy shared by every explorer read.
//!
//! Backends fail in many shapes (HTTP statuses, GraphQL error lists, free-text
//! messages). Transport adapters describe those failures as a
//! [`TransportFailure`]; the classifier in `client::classify` folds them into a
//! [`NormalizedError`] carrying exactly one [`ErrorKind`].

use serde::Serialize;
use thiserror::Error;

// ============================================================================
// Constants
// ============================================================================

/// Fixed guidance attached to every [`ErrorKind::IndexerUnavailable`] error.
///
/// Raw backend text is never surfaced for this kind.
pub const INDEXER_UNAVAILABLE_MESSAGE: &str = "Indexer backend is unavailable for this network; \
     verify the indexer configuration or retry later.";

/// Diagnostic used when a GraphQL response carries neither data nor errors.
pub const MISSING_DATA_MESSAGE: &str = "Indexer response missing data.";

// ============================================================================
// Error Kind
// ============================================================================

/// Closed set of failure categories surfaced to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    /// The requested entity does not exist.
    NotFound,
    /// A caller-supplied key was malformed; nothing was sent to a backend.
    InvalidInput,
    /// The backend rate-limited the request.
    TooManyRequests,
    /// The indexer is absent, misconfigured, unreachable or reports a
    /// missing index.
    IndexerUnavailable,
    /// Anything else. The error message holds best-effort diagnostics.
    Unhandled,
}

impl ErrorKind {
    /// All kinds, in declaration order.
    pub const ALL: [ErrorKind; 5] = [
        Self::NotFound,
        Self::InvalidInput,
        Self::TooManyRequests,
        Self::IndexerUnavailable,
        Self::Unhandled,
    ];

    /// Returns the human-readable label of the kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NotFound => "Not Found",
            Self::InvalidInput => "Invalid Input",
            Self::TooManyRequests => "Too Many Requests",
            Self::IndexerUnavailable => "Indexer Unavailable",
            Self::Unhandled => "Unhandled",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Normalized Error
// ============================================================================

/// A classified failure, safe to show to a user.
///
/// Fields are private so a value cannot change after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("{kind}{}", .message.as_deref().map(|m| format!(": {m}")).unwrap_or_default())]
pub struct NormalizedError {
    kind: ErrorKind,
    message: Option<String>,
}

impl NormalizedError {
    /// Creates an error of the given kind with an optional message.
    #[must_use]
    pub fn new(kind: ErrorKind, message: Option<String>) -> Self {
        Self { kind, message }
    }

    /// Entity absent. No message is carried.
    #[must_use]
    pub fn not_found() -> Self {
        Self::new(ErrorKind::NotFound, None)
    }

    /// Malformed caller input.
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidInput, Some(message.into()))
    }

    /// Rate limited. No message is carried.
    #[must_use]
    pub fn too_many_requests() -> Self {
        Self::new(ErrorKind::TooManyRequests, None)
    }

    /// Indexer unavailable, always with [`INDEXER_UNAVAILABLE_MESSAGE`].
    #[must_use]
    pub fn indexer_unavailable() -> Self {
        Self::new(
            ErrorKind::IndexerUnavailable,
            Some(INDEXER_UNAVAILABLE_MESSAGE.to_string()),
        )
    }

    /// Unclassified failure keeping its diagnostic text verbatim.
    #[must_use]
    pub fn unhandled(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unhandled, Some(message.into()))
    }

    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

/// Outcome of every explorer read.
pub type QueryResult<T> = Result<T, NormalizedError>;

// ============================================================================
// Transport Failure
// ============================================================================

/// Failure reported by a transport adapter before classification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportFailure {
    /// The request did not complete in time.
    #[error("request timed out")]
    Timeout,

    /// The backend could not be reached (DNS, refused connection, TLS).
    #[error("connection refused")]
    ConnectionRefused,

    /// The backend answered with a non-success status.
    #[error("HTTP {status}: {message}")]
    HttpStatus {
        /// Numeric status code.
        status: u16,
        /// Error text extracted from the body, or the status reason.
        message: String,
    },

    /// The exchange produced something that could not be interpreted.
    #[error("{0}")]
    Malformed(String),

    /// The backend answered but reported an error in its payload.
    #[error("{0}")]
    Backend(String),
}

impl TransportFailure {
    /// Best-effort message used for classification.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::HttpStatus { message, .. } | Self::Malformed(message) | Self::Backend(message) => {
                message.clone()
            }
            other => other.to_string(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
