//! # Error Types
//!
//! Domain-specific error types for kitchen-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         Error Types                             │
//! │                                                                 │
//! │  kitchen-core errors (this file)                                │
//! │  ├── CoreError        - Business rule violations                │
//! │  └── ValidationError  - Input validation failures               │
//! │                                                                 │
//! │  kitchen-store errors (separate crate)                          │
//! │  └── StoreError       - Store / snapshot failures               │
//! │                                                                 │
//! │  Flow: ValidationError → CoreError → StoreError → caller        │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (entity, id, location)
//! 3. Errors are enum variants, never String
//! 4. Every error is recoverable; none aborts the process

use thiserror::Error;

use crate::types::Location;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These represent business rule violations. The presentation layer is
/// expected to render them; nothing here is fatal.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Requested quantity exceeds available stock at a location.
    ///
    /// ## When This Occurs
    /// - Creating a distribution that would overdraw the source location
    /// - Creating a restock/distribution order larger than what the origin
    ///   holds in `available` batches
    ///
    /// Availability is the sum of available-status batches for the product
    /// at the location, checked before the write; a failing check leaves
    /// the store untouched.
    #[error("Insufficient stock for product {product_id} at {location}: available {available}, requested {requested}")]
    InsufficientStock {
        product_id: String,
        location: Location,
        available: i64,
        requested: i64,
    },

    /// Entity lookup by id failed.
    ///
    /// Updates against unknown ids surface this error rather than
    /// no-opping, so lost writes are visible to the caller.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// A status transition not permitted from the current state.
    ///
    /// ## When This Occurs
    /// - Moving a `received` or `cancelled` purchase order anywhere
    /// - Delivering a distribution that was never in transit
    /// - Completing a production plan straight from `planned`
    #[error("{entity} cannot transition from {from} to {to}")]
    InvalidTransition {
        entity: &'static str,
        from: String,
        to: String,
    },

    /// Login rejected by the directory.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The caller's role does not permit the operation.
    ///
    /// Catalog mutation (products, suppliers, branches) is main-manager
    /// only; the rule lives in the data layer so a server-side deployment
    /// cannot be bypassed by a different client.
    #[error("Role {role} may not {action}")]
    Forbidden {
        role: &'static str,
        action: &'static str,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Creates a NotFound error for a given entity type and id.
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        CoreError::NotFound {
            entity,
            id: id.into(),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised before business logic runs, so a failing create/update never
/// partially mutates anything.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: &'static str },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: &'static str },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: &'static str,
        min: i64,
        max: i64,
    },

    /// Invalid format (bad uuid, expiry before receipt, malformed hours).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat {
        field: &'static str,
        reason: String,
    },

    /// A foreign reference points at nothing (e.g. recipe ingredient
    /// naming a product that does not exist).
    #[error("{field} references unknown {entity}: {id}")]
    UnknownReference {
        field: &'static str,
        entity: &'static str,
        id: String,
    },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_stock_message() {
        let err = CoreError::InsufficientStock {
            product_id: "prod-1".to_string(),
            location: Location::CentralKitchen,
            available: 3,
            requested: 5,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for product prod-1 at Central Kitchen: available 3, requested 5"
        );
    }

    #[test]
    fn test_not_found_message() {
        let err = CoreError::not_found("Product", "abc");
        assert_eq!(err.to_string(), "Product not found: abc");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required { field: "name" };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }

    #[test]
    fn test_invalid_transition_message() {
        let err = CoreError::InvalidTransition {
            entity: "PurchaseOrder",
            from: "received".to_string(),
            to: "pending".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "PurchaseOrder cannot transition from received to pending"
        );
    }
}
