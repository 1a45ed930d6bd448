//! Shared types for the quote generator service and its RPC clients.

use serde::{Deserialize, Serialize};

/// Sentinel used by category controls to mean "no category restriction".
pub const ALL_CATEGORIES: &str = "all";

// =====================================================
// Domain Types
// =====================================================

/// A quote record. Two quotes are the same record when both fields match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Quote {
    pub text: String,
    pub category: String,
}

impl Quote {
    pub fn new(text: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            category: category.into(),
        }
    }
}

/// The category selection driving random picks.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CategoryFilter {
    #[default]
    All,
    Category(String),
}

impl CategoryFilter {
    pub fn as_str(&self) -> &str {
        match self {
            CategoryFilter::All => ALL_CATEGORIES,
            CategoryFilter::Category(c) => c,
        }
    }
}

impl From<&str> for CategoryFilter {
    fn from(s: &str) -> Self {
        if s == ALL_CATEGORIES {
            CategoryFilter::All
        } else {
            CategoryFilter::Category(s.to_string())
        }
    }
}

impl From<String> for CategoryFilter {
    fn from(s: String) -> Self {
        if s == ALL_CATEGORIES {
            CategoryFilter::All
        } else {
            CategoryFilter::Category(s)
        }
    }
}

impl From<CategoryFilter> for String {
    fn from(f: CategoryFilter) -> Self {
        match f {
            CategoryFilter::All => ALL_CATEGORIES.to_string(),
            CategoryFilter::Category(c) => c,
        }
    }
}

impl std::fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A quote ready for display, with an HTML-escaped rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteView {
    pub text: String,
    pub category: String,
    pub html: String,
}

/// Options for a category selection control.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryOptions {
    /// Always starts with `"all"`, then categories in first-seen order.
    pub options: Vec<String>,
    pub selected: CategoryFilter,
}

/// Result of importing a transfer document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportReport {
    pub accepted: usize,
    pub total: usize,
}

/// Whether a sync cycle is currently in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncState {
    Idle,
    Syncing,
}

/// What one sync cycle did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SyncOutcome {
    /// Another cycle was already running.
    Skipped,
    /// Fetch or decode failed; nothing changed.
    Failed { error: String },
    Unchanged,
    Updated { total: usize },
}

/// A transient user-facing message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub message: String,
    pub created_at: String,
}

// =====================================================
// RPC Request Types
// =====================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct AddQuoteRequest {
    pub text: String,
    pub category: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FilterQuotesRequest {
    pub category: CategoryFilter,
}

// =====================================================
// RPC Response Types
// =====================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct RpcResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> RpcResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(msg.into()),
        }
    }
}

// =====================================================
// Service Status
// =====================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct ServiceStatus {
    pub running: bool,
    pub uptime_secs: u64,
    pub total_quotes: usize,
    pub category_count: usize,
    pub sync_state: SyncState,
    pub sync_enabled: bool,
    pub sync_interval_secs: u64,
    pub last_sync_at: Option<String>,
}
