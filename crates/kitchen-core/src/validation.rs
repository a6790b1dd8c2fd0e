//! # Validation Module
//!
//! Field-level validation used by the mutation operations before any
//! state changes. A failing validator means nothing was written.
//!
//! ## Usage
//! ```rust
//! use kitchen_core::validation::{validate_name, validate_quantity};
//!
//! validate_name("name", "Chicken Breast").unwrap();
//! validate_quantity("quantity", 15).unwrap();
//! ```

use chrono::{DateTime, NaiveTime, Utc};

use crate::error::ValidationError;
use crate::types::{OpeningHours, OrderLine, RecipeIngredient, Role, User};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a required display-name field: non-empty after trimming,
/// at most 200 characters.
pub fn validate_name(field: &'static str, value: &str) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required { field });
    }

    if value.len() > 200 {
        return Err(ValidationError::InvalidFormat {
            field,
            reason: "must be at most 200 characters".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a strictly positive quantity.
pub fn validate_quantity(field: &'static str, quantity: i64) -> ValidationResult<()> {
    if quantity <= 0 {
        return Err(ValidationError::MustBePositive { field });
    }
    Ok(())
}

/// Validates a quantity that may be zero (inventory on hand).
pub fn validate_non_negative(field: &'static str, quantity: i64) -> ValidationResult<()> {
    if quantity < 0 {
        return Err(ValidationError::OutOfRange {
            field,
            min: 0,
            max: i64::MAX,
        });
    }
    Ok(())
}

/// Validates a supplier rating: 0.0 to 5.0 inclusive.
pub fn validate_rating(rating: f64) -> ValidationResult<()> {
    if !(0.0..=5.0).contains(&rating) {
        return Err(ValidationError::OutOfRange {
            field: "rating",
            min: 0,
            max: 5,
        });
    }
    Ok(())
}

// =============================================================================
// Date Validators
// =============================================================================

/// A batch cannot expire before it was received.
pub fn validate_batch_dates(
    expiration_date: DateTime<Utc>,
    received_date: DateTime<Utc>,
) -> ValidationResult<()> {
    if expiration_date < received_date {
        return Err(ValidationError::InvalidFormat {
            field: "expiration_date",
            reason: "must not precede received_date".to_string(),
        });
    }
    Ok(())
}

/// Validates `HH:MM` opening hours.
pub fn validate_opening_hours(hours: &OpeningHours) -> ValidationResult<()> {
    for (field, value) in [("opening_hours.open", &hours.open), ("opening_hours.close", &hours.close)]
    {
        if NaiveTime::parse_from_str(value, "%H:%M").is_err() {
            return Err(ValidationError::InvalidFormat {
                field,
                reason: format!("'{value}' is not a HH:MM time"),
            });
        }
    }
    Ok(())
}

// =============================================================================
// Composite Validators
// =============================================================================

/// Validates purchase-order lines: at least one line, positive quantities,
/// non-negative prices, and each line total equal to quantity × unit
/// price.
///
/// Lines built with [`OrderLine::new`] satisfy the total invariant by
/// construction; this re-check catches hand-assembled or deserialized
/// lines.
pub fn validate_order_lines(items: &[OrderLine]) -> ValidationResult<()> {
    if items.is_empty() {
        return Err(ValidationError::Required { field: "items" });
    }

    for line in items {
        validate_quantity("items.quantity", line.quantity)?;
        if line.unit_price.cents() < 0 {
            return Err(ValidationError::OutOfRange {
                field: "items.unit_price",
                min: 0,
                max: i64::MAX,
            });
        }
        if line.total != line.unit_price.times(line.quantity) {
            return Err(ValidationError::InvalidFormat {
                field: "items.total",
                reason: format!(
                    "line total {} does not equal quantity × unit price",
                    line.total
                ),
            });
        }
    }

    Ok(())
}

/// Validates recipe ingredients: at least one, positive quantities, and
/// every product reference resolvable via `product_exists`.
pub fn validate_ingredients(
    ingredients: &[RecipeIngredient],
    mut product_exists: impl FnMut(&str) -> bool,
) -> ValidationResult<()> {
    if ingredients.is_empty() {
        return Err(ValidationError::Required {
            field: "ingredients",
        });
    }

    for ingredient in ingredients {
        if ingredient.quantity <= 0.0 {
            return Err(ValidationError::MustBePositive {
                field: "ingredients.quantity",
            });
        }
        if !product_exists(&ingredient.product_id) {
            return Err(ValidationError::UnknownReference {
                field: "ingredients.product_id",
                entity: "Product",
                id: ingredient.product_id.clone(),
            });
        }
    }

    Ok(())
}

/// A branch manager must carry a branch id; a main manager must not.
pub fn validate_user_branch(user: &User) -> ValidationResult<()> {
    match (user.role, &user.branch_id) {
        (Role::BranchManager, None) => Err(ValidationError::Required { field: "branch_id" }),
        (Role::MainManager, Some(_)) => Err(ValidationError::InvalidFormat {
            field: "branch_id",
            reason: "main managers are not branch-scoped".to_string(),
        }),
        _ => Ok(()),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use chrono::Duration;

    #[test]
    fn test_validate_name() {
        assert!(validate_name("name", "Chicken Breast").is_ok());
        assert!(validate_name("name", "").is_err());
        assert!(validate_name("name", "   ").is_err());
        assert!(validate_name("name", &"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity("quantity", 1).is_ok());
        assert!(validate_quantity("quantity", 0).is_err());
        assert!(validate_quantity("quantity", -5).is_err());
        assert!(validate_non_negative("quantity", 0).is_ok());
    }

    #[test]
    fn test_validate_rating() {
        assert!(validate_rating(0.0).is_ok());
        assert!(validate_rating(4.8).is_ok());
        assert!(validate_rating(5.0).is_ok());
        assert!(validate_rating(5.1).is_err());
        assert!(validate_rating(-0.1).is_err());
    }

    #[test]
    fn test_validate_batch_dates() {
        let now = Utc::now();
        assert!(validate_batch_dates(now + Duration::days(3), now).is_ok());
        assert!(validate_batch_dates(now, now).is_ok());
        assert!(validate_batch_dates(now - Duration::days(1), now).is_err());
    }

    #[test]
    fn test_validate_opening_hours() {
        let good = OpeningHours {
            open: "08:00".to_string(),
            close: "23:00".to_string(),
        };
        assert!(validate_opening_hours(&good).is_ok());

        let bad = OpeningHours {
            open: "8am".to_string(),
            close: "23:00".to_string(),
        };
        assert!(validate_opening_hours(&bad).is_err());
    }

    #[test]
    fn test_validate_order_lines() {
        let good = vec![OrderLine::new("p1", 20, Money::from_cents(2550))];
        assert!(validate_order_lines(&good).is_ok());

        assert!(validate_order_lines(&[]).is_err());

        let mut tampered = OrderLine::new("p1", 20, Money::from_cents(2550));
        tampered.total = Money::from_cents(1);
        assert!(validate_order_lines(&[tampered]).is_err());
    }

    #[test]
    fn test_validate_ingredients() {
        let ingredients = vec![RecipeIngredient {
            product_id: "p1".to_string(),
            quantity: 0.2,
            unit: "kg".to_string(),
        }];
        assert!(validate_ingredients(&ingredients, |id| id == "p1").is_ok());
        assert!(validate_ingredients(&ingredients, |_| false).is_err());
        assert!(validate_ingredients(&[], |_| true).is_err());
    }

    #[test]
    fn test_validate_user_branch() {
        let branch_manager = User {
            id: "u1".to_string(),
            name: "B".to_string(),
            email: "b@example.com".to_string(),
            role: Role::BranchManager,
            branch_id: None,
        };
        assert!(validate_user_branch(&branch_manager).is_err());

        let scoped = User {
            branch_id: Some("b1".to_string()),
            ..branch_manager
        };
        assert!(validate_user_branch(&scoped).is_ok());
    }
}
