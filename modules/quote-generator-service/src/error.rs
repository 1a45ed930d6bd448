//! Error type shared across the quote generator service.

use std::fmt;

/// Every failure the service can report. None of them is fatal to the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuoteError {
    /// A required field was empty or missing.
    Validation(String),
    /// Serialization or storage failed.
    Storage(String),
    /// Stored data or an imported document could not be parsed.
    Parse(String),
    /// Fetching or decoding the remote batch failed.
    Network(String),
    /// The store has no quotes to pick from.
    NoQuotes,
    /// The selected category has no quotes.
    NoQuotesInCategory(String),
}

impl QuoteError {
    /// Errors caused by the caller's input rather than the service
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            QuoteError::Validation(_) | QuoteError::Parse(_)
        )
    }
}

impl fmt::Display for QuoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuoteError::Validation(msg) => write!(f, "{}", msg),
            QuoteError::Storage(msg) => write!(f, "Storage error: {}", msg),
            QuoteError::Parse(msg) => write!(f, "{}", msg),
            QuoteError::Network(msg) => write!(f, "Network error: {}", msg),
            QuoteError::NoQuotes => write!(f, "No quotes available."),
            QuoteError::NoQuotesInCategory(_) => {
                write!(f, "No quotes available in this category.")
            }
        }
    }
}

impl std::error::Error for QuoteError {}
