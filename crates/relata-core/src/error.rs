//! Error types and exit codes for relata
//!
//! Exit codes:
//! - 0: Success
//! - 1: Generic failure
//! - 2: Usage error (bad flags/args)
//! - 3: Data/store error (missing store, bad config, unknown item, rejected snapshot)

mod macros;

use std::fmt::Display;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the relata CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Success = 0,
    Failure = 1,
    /// Bad flags or arguments
    Usage = 2,
    /// Store, config or snapshot content is wrong
    Data = 3,
}

impl From<rusqlite::Error> for RelataError {
    fn from(err: rusqlite::Error) -> Self {
        RelataError::db_operation("query store", err)
    }
}

/// Errors that can occur during relata operations
#[derive(Error, Debug)]
pub enum RelataError {
    #[error("unknown format: {0} (expected: human, json, or records)")]
    UnknownFormat(String),

    #[error("{0}")]
    UsageError(String),

    #[error("unsupported {context}: {value} (supported: {supported})")]
    Unsupported {
        context: String,
        value: String,
        supported: String,
    },

    #[error("store not found (searched from {search_root:?})")]
    StoreNotFound { search_root: PathBuf },

    #[error("invalid store: {reason}")]
    InvalidStore { reason: String },

    /// A `config.toml` value outside its allowed range
    #[error("invalid config {key}: {value}")]
    InvalidConfig { key: String, value: String },

    #[error("content item not found: {id}")]
    ItemNotFound { id: String },

    #[error("invalid snapshot {path:?}: {reason}")]
    InvalidSnapshot { path: PathBuf, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to {operation}: {reason}")]
    FailedOperation { operation: String, reason: String },

    #[error("failed to {operation} {target}: {reason}")]
    FailedOperationWithTarget {
        operation: String,
        target: String,
        reason: String,
    },

    #[error("{failed} of {attempted} related-items writes failed")]
    PartialPersist { failed: usize, attempted: usize },

    #[error("{0}")]
    Other(String),
}

impl RelataError {
    pub fn db_operation(operation: &str, error: impl Display) -> Self {
        RelataError::FailedOperation {
            operation: operation.to_string(),
            reason: error.to_string(),
        }
    }

    pub fn transaction(operation: &str, error: impl Display) -> Self {
        RelataError::FailedOperation {
            operation: format!("{} transaction", operation),
            reason: error.to_string(),
        }
    }

    /// A failed operation on one content item
    pub fn item_operation(item_id: &str, operation: &str, error: impl Display) -> Self {
        RelataError::FailedOperationWithTarget {
            operation: operation.to_string(),
            target: format!("item {}", item_id),
            reason: error.to_string(),
        }
    }

    pub fn io_operation(operation: &str, path: impl Display, error: impl Display) -> Self {
        RelataError::FailedOperationWithTarget {
            operation: operation.to_string(),
            target: path.to_string(),
            reason: error.to_string(),
        }
    }

    pub fn invalid_config(key: &str, value: impl Display) -> Self {
        RelataError::InvalidConfig {
            key: key.to_string(),
            value: value.to_string(),
        }
    }

    pub fn unsupported(context: &str, value: impl Display, supported: impl Display) -> Self {
        RelataError::Unsupported {
            context: context.to_string(),
            value: value.to_string(),
            supported: supported.to_string(),
        }
    }

    pub fn exit_code(&self) -> ExitCode {
        match self {
            RelataError::UnknownFormat(_)
            | RelataError::UsageError(_)
            | RelataError::Unsupported { .. } => ExitCode::Usage,

            RelataError::StoreNotFound { .. }
            | RelataError::InvalidStore { .. }
            | RelataError::InvalidConfig { .. }
            | RelataError::ItemNotFound { .. }
            | RelataError::InvalidSnapshot { .. } => ExitCode::Data,

            RelataError::Io(_)
            | RelataError::Yaml(_)
            | RelataError::Json(_)
            | RelataError::Toml(_)
            | RelataError::FailedOperation { .. }
            | RelataError::FailedOperationWithTarget { .. }
            | RelataError::PartialPersist { .. }
            | RelataError::Other(_) => ExitCode::Failure,
        }
    }

    /// Stable identifier used in the JSON error envelope
    pub fn error_type(&self) -> &'static str {
        match self {
            RelataError::UnknownFormat(_) => "unknown_format",
            RelataError::UsageError(_) => "usage_error",
            RelataError::Unsupported { .. } => "unsupported",
            RelataError::StoreNotFound { .. } => "store_not_found",
            RelataError::InvalidStore { .. } => "invalid_store",
            RelataError::InvalidConfig { .. } => "invalid_config",
            RelataError::ItemNotFound { .. } => "item_not_found",
            RelataError::InvalidSnapshot { .. } => "invalid_snapshot",
            RelataError::Io(_) => "io_error",
            RelataError::Yaml(_) => "yaml_error",
            RelataError::Json(_) => "json_error",
            RelataError::Toml(_) => "toml_error",
            RelataError::FailedOperation { .. } => "failed_operation",
            RelataError::FailedOperationWithTarget { .. } => "failed_operation_with_target",
            RelataError::PartialPersist { .. } => "partial_persist",
            RelataError::Other(_) => "other",
        }
    }

    /// `{"error": {"code", "type", "message"}}`
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.exit_code() as i32,
                "type": self.error_type(),
                "message": self.to_string(),
            }
        })
    }
}

pub type Result<T> = std::result::Result<T, RelataError>;
