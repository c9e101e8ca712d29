//! Error types for the Fabric override engine
//!
//! Engine errors (quantity validation, action dispatch, missing spec fields)
//! are plain values for the reconcile loop to inspect. Loader errors only
//! surface from the manifest collaborator and the CLI.

use thiserror::Error;

/// Grammar every quantity string must match, as reported back to the user.
pub const QUANTITY_GRAMMAR: &str =
    "quantities must match the regular expression '^([+-]?[0-9.]+)([eEinumkKMGTP]*[-+]?[0-9]*)$'";

/// Unified error type for the override engine
#[derive(Error, Debug)]
pub enum Error {
    // =========================================================================
    // Engine Errors
    // =========================================================================
    #[error("invalid quantity {value:?}: {reason}; {}", QUANTITY_GRAMMAR)]
    InvalidQuantity { value: String, reason: String },

    #[error("unsupported action {action:?} for {kind}")]
    UnsupportedAction { kind: String, action: String },

    #[error("missing required field: {field}")]
    MissingRequiredField { field: String },

    // =========================================================================
    // Registry Errors
    // =========================================================================
    #[error("no override registered for kind {kind}")]
    UnregisteredKind { kind: String },

    #[error("override for {expected} received a {found} object")]
    ObjectKindMismatch { expected: String, found: String },

    // =========================================================================
    // Manifest Errors
    // =========================================================================
    #[error("Manifest error: {0}")]
    Manifest(String),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    // =========================================================================
    // IO Errors
    // =========================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Action the caller should take for an error during reconciliation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorAction {
    /// Requeue with exponential backoff
    RequeueWithBackoff,
    /// Don't requeue, wait for the CR or the operator to change
    NoRequeue,
}

impl Error {
    /// Determine what action to take for this error
    pub fn action(&self) -> ErrorAction {
        match self {
            // Files may appear or become readable later
            Error::Io(_) => ErrorAction::RequeueWithBackoff,

            // Same input always produces the same failure
            _ => ErrorAction::NoRequeue,
        }
    }

    /// Check if this error is retryable
    pub fn is_retryable(&self) -> bool {
        !matches!(self.action(), ErrorAction::NoRequeue)
    }

    /// Check if this error stems from user-authored configuration and should
    /// be reported back on the CR
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidQuantity { .. }
                | Error::MissingRequiredField { .. }
                | Error::Manifest(_)
                | Error::Yaml(_)
                | Error::JsonParse(_)
        )
    }

    /// Check if this error is an operator bug rather than bad input
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            Error::UnsupportedAction { .. }
                | Error::UnregisteredKind { .. }
                | Error::ObjectKindMismatch { .. }
        )
    }
}

/// Result type alias for the override engine
pub type Result<T> = std::result::Result<T, Error>;
