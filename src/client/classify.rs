//! Failure classification.
//!
//! This is the only place where backend text is matched against known
//! phrasings. Everything else works on [`TransportFailure`] and
//! [`NormalizedError`] values.
//!
//! Priority is fixed: HTTP 404, then indexer-unavailable phrases, then
//! "too many requests", then unhandled.

use crate::domain::{NormalizedError, TransportFailure};

// ============================================================================
// Constants
// ============================================================================

/// Lowercase phrases backends use when an index is missing or disabled.
const INDEXER_UNAVAILABLE_PHRASES: &[&str] = &[
    "indexer reader doesn't exist",
    "db indexer reader is not available",
    "internal statekeys index is not enabled",
    "internal event index is not enabled",
    "internal transaction by account index is not enabled",
    "indexer reader",
];

/// Lowercase marker of a rate-limited request.
const TOO_MANY_REQUESTS_PHRASE: &str = "too many requests";

// ============================================================================
// Message Matcher
// ============================================================================

/// Whether `message` says the indexer is unavailable. Case-insensitive.
#[must_use]
pub fn is_indexer_unavailable_message(message: Option<&str>) -> bool {
    let Some(message) = message.filter(|m| !m.is_empty()) else {
        return false;
    };
    let lowered = message.to_lowercase();
    INDEXER_UNAVAILABLE_PHRASES
        .iter()
        .any(|phrase| lowered.contains(phrase))
}

// ============================================================================
// Error Normalizer
// ============================================================================

/// Classifies a transport failure into a [`NormalizedError`].
#[must_use]
pub fn normalize(failure: &TransportFailure) -> NormalizedError {
    tracing::debug!(?failure, "Classifying backend failure");

    if let TransportFailure::HttpStatus { status: 404, .. } = failure {
        return NormalizedError::not_found();
    }

    classify_message(&failure.message())
}

/// Classifies a failure reported by the indexer.
///
/// Only the message rules apply: an indexer 404 means a bad endpoint, not a
/// missing entity, so it never becomes [`crate::domain::ErrorKind::NotFound`].
#[must_use]
pub fn classify_backend(failure: &TransportFailure) -> NormalizedError {
    tracing::debug!(?failure, "Classifying indexer failure");
    classify_message(&failure.message())
}

/// Classifies free backend text, skipping the status check.
#[must_use]
pub fn classify_message(message: &str) -> NormalizedError {
    if is_indexer_unavailable_message(Some(message)) {
        tracing::warn!("Indexer reported unavailable: {message}");
        return NormalizedError::indexer_unavailable();
    }

    if message.to_lowercase().contains(TOO_MANY_REQUESTS_PHRASE) {
        return NormalizedError::too_many_requests();
    }

    NormalizedError::unhandled(message)
}

// ============================================================================
// Tests
// ============================================================================
