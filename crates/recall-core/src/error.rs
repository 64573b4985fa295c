//! Error types for recall operations.
//!
//! This module provides the error hierarchy for the scheduling engine with
//! structured error codes and suggestions for resolution. Validation errors
//! are always raised before any state mutation, so a failed operation leaves
//! stored items untouched.

use std::collections::HashMap;
use thiserror::Error;

/// Result type alias for recall operations.
pub type RecallResult<T> = Result<T, RecallError>;

/// Main error type for all recall operations.
#[derive(Error, Debug)]
pub enum RecallError {
    /// Input validation failed (bad rating, bad limit, bad mode).
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        code: ErrorCode,
        details: HashMap<String, String>,
        suggestion: Option<String>,
    },

    /// Review item not found.
    #[error("Item not found: {message}")]
    NotFound {
        message: String,
        code: ErrorCode,
        item_id: Option<String>,
    },

    /// The item exists but belongs to a different owner.
    #[error("Ownership mismatch: {message}")]
    Ownership {
        message: String,
        code: ErrorCode,
        item_id: String,
        owner_id: String,
    },

    /// Optimistic-concurrency check failed (stale `updated_at` token).
    #[error("Conflict: {message}")]
    Conflict {
        message: String,
        code: ErrorCode,
        item_id: String,
    },

    /// Database operation failed.
    #[error("Database error: {message}")]
    Database {
        message: String,
        code: ErrorCode,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error codes for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Validation (VAL_xxx)
    ValInvalidRating,
    ValInvalidLimit,
    ValInvalidInput,

    // Item (ITEM_xxx)
    ItemNotFound,

    // Ownership (OWN_xxx)
    OwnershipMismatch,

    // Concurrency (CAS_xxx)
    CasStaleState,

    // Database (DB_xxx)
    DbConnectionFailed,
    DbOperationFailed,

    // Configuration (CFG_xxx)
    CfgInvalid,

    // Internal
    Internal,
}

impl ErrorCode {
    /// Get the string representation of the error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ValInvalidRating => "VAL_001",
            ErrorCode::ValInvalidLimit => "VAL_002",
            ErrorCode::ValInvalidInput => "VAL_003",
            ErrorCode::ItemNotFound => "ITEM_001",
            ErrorCode::OwnershipMismatch => "OWN_001",
            ErrorCode::CasStaleState => "CAS_001",
            ErrorCode::DbConnectionFailed => "DB_001",
            ErrorCode::DbOperationFailed => "DB_002",
            ErrorCode::CfgInvalid => "CFG_001",
            ErrorCode::Internal => "INT_001",
        }
    }
}

impl RecallError {
    /// Create an invalid-rating validation error.
    ///
    /// Out-of-range ratings are rejected, never silently clamped.
    pub fn invalid_rating(score: u8) -> Self {
        let mut details = HashMap::new();
        details.insert("rating".to_string(), score.to_string());
        Self::Validation {
            message: format!("rating {} is out of range, expected 0-5", score),
            code: ErrorCode::ValInvalidRating,
            details,
            suggestion: Some("Submit a recall quality between 0 (blackout) and 5 (perfect)".to_string()),
        }
    }

    /// Create an invalid-limit validation error.
    pub fn invalid_limit(limit: usize, max: usize) -> Self {
        let mut details = HashMap::new();
        details.insert("limit".to_string(), limit.to_string());
        details.insert("max".to_string(), max.to_string());
        Self::Validation {
            message: format!("limit {} is out of range, expected 1-{}", limit, max),
            code: ErrorCode::ValInvalidLimit,
            details,
            suggestion: Some(format!("Request between 1 and {} items per session", max)),
        }
    }

    /// Create a generic validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            code: ErrorCode::ValInvalidInput,
            details: HashMap::new(),
            suggestion: None,
        }
    }

    /// Create a not found error.
    pub fn not_found(item_id: impl Into<String>) -> Self {
        let id = item_id.into();
        Self::NotFound {
            message: format!("Review item with id '{}' not found", id),
            code: ErrorCode::ItemNotFound,
            item_id: Some(id),
        }
    }

    /// Create an ownership mismatch error.
    pub fn ownership(item_id: impl Into<String>, owner_id: impl Into<String>) -> Self {
        let item_id = item_id.into();
        let owner_id = owner_id.into();
        Self::Ownership {
            message: format!("Item '{}' does not belong to owner '{}'", item_id, owner_id),
            code: ErrorCode::OwnershipMismatch,
            item_id,
            owner_id,
        }
    }

    /// Create a conflict error for a failed compare-and-swap.
    pub fn conflict(item_id: impl Into<String>) -> Self {
        let id = item_id.into();
        Self::Conflict {
            message: format!("Item '{}' was modified concurrently, review not applied", id),
            code: ErrorCode::CasStaleState,
            item_id: id,
        }
    }

    /// Create a database error.
    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
            code: ErrorCode::DbOperationFailed,
            source: None,
        }
    }

    /// Get the error code.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Validation { code, .. } => *code,
            Self::NotFound { code, .. } => *code,
            Self::Ownership { code, .. } => *code,
            Self::Conflict { code, .. } => *code,
            Self::Database { code, .. } => *code,
            Self::Configuration(_) => ErrorCode::CfgInvalid,
            _ => ErrorCode::Internal,
        }
    }

    /// Get a user-friendly suggestion for resolving this error.
    pub fn suggestion(&self) -> Option<&str> {
        match self {
            Self::Validation { suggestion, .. } => suggestion.as_deref(),
            Self::NotFound { .. } => Some("Please check the item ID and ensure it exists"),
            Self::Ownership { .. } => Some("Items can only be reviewed by their owner"),
            Self::Conflict { .. } => {
                Some("Reload the item and resubmit the review against its current state")
            }
            Self::Database { .. } => Some("Please check the store connection settings"),
            _ => None,
        }
    }

    /// Whether this error maps to a client-side (4xx-equivalent) rejection.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Validation { .. }
                | Self::NotFound { .. }
                | Self::Ownership { .. }
                | Self::Conflict { .. }
        )
    }
}

impl From<rusqlite::Error> for RecallError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Database {
            message: err.to_string(),
            code: ErrorCode::DbOperationFailed,
            source: Some(Box::new(err)),
        }
    }
}
