//! # UI Error Types
//!
//! All errors that can surface from the toolkit. Layout never fails: a
//! degenerate size is clamped to zero instead of being reported.

use thiserror::Error;

use crate::entity::EntityId;

/// Errors that can occur in the UI system.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UiError {
    /// A required theme texture, font or style file is absent.
    #[error("asset missing: {path}")]
    AssetMissing {
        /// Asset path as requested from the provider.
        path: String,
    },

    /// A theme style document could not be parsed.
    #[error("invalid style document '{file}' at line {line}: {message}")]
    InvalidStyleDocument {
        /// File the document was read from.
        file: String,
        /// 1-based line of the offending element.
        line: usize,
        /// Parser message.
        message: String,
    },

    /// A tree mutation was rejected; the tree is left unmodified.
    #[error("invalid tree operation: {reason}")]
    InvalidTreeOperation {
        /// Why the operation was rejected.
        reason: String,
    },

    /// No entity with this id is alive in the tree.
    #[error("entity not found: {0}")]
    EntityNotFound(EntityId),

    /// Invalid configuration file.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl UiError {
    /// Shorthand for [`UiError::InvalidTreeOperation`].
    pub(crate) fn tree(reason: impl Into<String>) -> Self {
        Self::InvalidTreeOperation {
            reason: reason.into(),
        }
    }

    /// Shorthand for [`UiError::AssetMissing`].
    pub fn missing(path: impl Into<String>) -> Self {
        Self::AssetMissing { path: path.into() }
    }
}

/// Result type for UI operations.
pub type UiResult<T> = Result<T, UiError>;
