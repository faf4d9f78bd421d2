//! User-facing presentation of normalized errors.
//!
//! Each [`ErrorKind`] has exactly one template. The match below is
//! exhaustive, so adding a kind without a template does not compile.

use crate::domain::{ErrorKind, INDEXER_UNAVAILABLE_MESSAGE, NormalizedError};

/// How prominently a presentation should be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Error,
}

/// A rendered error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Presentation {
    pub severity: Severity,
    pub text: String,
}

/// Renders `error`. `subject` names what was being fetched, e.g.
/// `"account 0x1"`, and is used by the templates that mention it.
#[must_use]
pub fn present(error: &NormalizedError, subject: Option<&str>) -> Presentation {
    match error.kind() {
        ErrorKind::NotFound => Presentation {
            severity: Severity::Error,
            text: match subject {
                Some(subject) => format!(
                    "Not found: {subject}. An account that never submitted a transaction may still hold assets."
                ),
                None => "Not found. An account that never submitted a transaction may still hold assets."
                    .to_string(),
            },
        },
        ErrorKind::InvalidInput => Presentation {
            severity: Severity::Error,
            text: match error.message() {
                Some(message) => format!("({}): {message}", error.kind()),
                None => format!("({})", error.kind()),
            },
        },
        ErrorKind::TooManyRequests => Presentation {
            severity: Severity::Error,
            text: "Too many requests. Please try again 5 minutes later.".to_string(),
        },
        ErrorKind::IndexerUnavailable => Presentation {
            severity: Severity::Info,
            text: format!(
                "{INDEXER_UNAVAILABLE_MESSAGE} Please check your INDEXER_URL configuration."
            ),
        },
        ErrorKind::Unhandled => {
            let mut text = match subject {
                Some(subject) => format!("Unknown error ({}) fetching {subject}", error.kind()),
                None => format!("Unknown error ({})", error.kind()),
            };
            if let Some(message) = error.message() {
                text.push_str(": ");
                text.push_str(message);
            }
            text.push_str(". Try again later.");
            Presentation {
                severity: Severity::Error,
                text,
            }
        }
    }
}
