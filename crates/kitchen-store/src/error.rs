//! # Store Error Types
//!
//! Error types for the stateful layer.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                            │
//! │                                                                 │
//! │  CoreError (kitchen-core)     io / serde_json errors            │
//! │       │                               │                         │
//! │       └──────────► StoreError ◄───────┘                         │
//! │                        │                                        │
//! │                        ▼                                        │
//! │        Caller renders a user-facing message                     │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use thiserror::Error;

use kitchen_core::CoreError;

/// Errors from the store and its snapshot persistence.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A business rule rejected the operation (validation, stock check,
    /// illegal transition, unknown id, access rule).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Snapshot file could not be read or written.
    #[error("Snapshot I/O failed at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Snapshot contents were not valid JSON for the current schema.
    #[error("Snapshot is not valid: {0}")]
    Corrupt(#[from] serde_json::Error),
}

impl From<kitchen_core::ValidationError> for StoreError {
    fn from(err: kitchen_core::ValidationError) -> Self {
        StoreError::Core(CoreError::Validation(err))
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;
    use kitchen_core::ValidationError;

    #[test]
    fn test_core_error_converts() {
        let core: CoreError = ValidationError::Required { field: "name" }.into();
        let store: StoreError = core.into();
        assert!(matches!(store, StoreError::Core(_)));
    }
}
