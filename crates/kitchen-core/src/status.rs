//! # Status Derivation
//!
//! Computes an inventory batch's status from its quantity, the product's
//! reorder threshold, and the expiry date relative to a caller-supplied
//! "now".
//!
//! ## Derivation Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  derive_status(item, product, now)                              │
//! │                                                                 │
//! │  expiration_date < now ────────────► Expired                    │
//! │       │ no                                                      │
//! │       ▼                                                         │
//! │  quantity == 0 ────────────────────► OutOfStock                 │
//! │       │ no                                                      │
//! │       ▼                                                         │
//! │  quantity <= product.min_stock ────► LowStock                   │
//! │       │ no                                                      │
//! │       ▼                                                         │
//! │  Available                                                      │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Expiry is checked first, unconditionally. The zero-quantity check must
//! come before the low-stock check: 0 <= min_stock always holds, so the
//! opposite order would make OutOfStock unreachable.
//!
//! Statuses are never assigned once and left to rot: the store re-derives
//! on every write and exposes a refresh scan. This module stays pure
//! either way.

use chrono::{DateTime, Utc};

use crate::types::{InventoryItem, InventoryStatus, Product};

/// Items expiring within this many days count as "expiring soon".
pub const EXPIRING_SOON_DAYS: i64 = 3;

/// Derives the status of an inventory batch.
pub fn derive_status(item: &InventoryItem, product: &Product, now: DateTime<Utc>) -> InventoryStatus {
    if item.expiration_date < now {
        return InventoryStatus::Expired;
    }
    if item.quantity == 0 {
        return InventoryStatus::OutOfStock;
    }
    if item.quantity <= product.min_stock {
        return InventoryStatus::LowStock;
    }
    InventoryStatus::Available
}

/// Whole days until the batch expires: ceil((expiration − now) / 1 day).
///
/// Negative for already-expired batches. Used for the expiring-soon window
/// and presentation thresholds; never stored.
pub fn days_until_expiry(item: &InventoryItem, now: DateTime<Utc>) -> i64 {
    let delta = item.expiration_date - now;
    let secs = delta.num_seconds();
    // Integer ceiling that is exact on day boundaries and correct for
    // negative deltas.
    secs.div_euclid(86_400) + i64::from(secs.rem_euclid(86_400) != 0)
}

/// Checks whether the batch falls in the expiring-soon window:
/// `0 < days_until_expiry <= EXPIRING_SOON_DAYS`.
///
/// Expired batches (days <= 0) are excluded; they are a different alert.
pub fn is_expiring_soon(item: &InventoryItem, now: DateTime<Utc>) -> bool {
    let days = days_until_expiry(item, now);
    days > 0 && days <= EXPIRING_SOON_DAYS
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::types::Location;
    use chrono::Duration;

    fn product(min_stock: i64) -> Product {
        Product {
            id: "p1".to_string(),
            name: "Tomatoes".to_string(),
            category: "Vegetables".to_string(),
            unit: "kg".to_string(),
            cost: Money::from_cents(800),
            min_stock,
            max_stock: 50,
            expiration_days: 7,
            description: None,
            created_at: Utc::now(),
        }
    }

    fn item(quantity: i64, expires_in_hours: i64, now: DateTime<Utc>) -> InventoryItem {
        InventoryItem {
            id: "i1".to_string(),
            product_id: "p1".to_string(),
            quantity,
            location: Location::CentralKitchen,
            batch_number: "CK-001".to_string(),
            expiration_date: now + Duration::hours(expires_in_hours),
            received_date: now - Duration::days(1),
            supplier_id: "s1".to_string(),
            cost: Money::from_cents(800),
            status: InventoryStatus::Available,
            version: 0,
        }
    }

    #[test]
    fn test_expired_takes_priority() {
        let now = Utc::now();
        // Expired and zero quantity and under threshold: expired wins.
        let it = item(0, -1, now);
        assert_eq!(derive_status(&it, &product(10), now), InventoryStatus::Expired);
    }

    #[test]
    fn test_out_of_stock_before_low_stock() {
        let now = Utc::now();
        let it = item(0, 48, now);
        assert_eq!(
            derive_status(&it, &product(10), now),
            InventoryStatus::OutOfStock
        );
    }

    #[test]
    fn test_low_stock_at_threshold() {
        let now = Utc::now();
        // quantity == min_stock counts as low.
        let it = item(10, 48, now);
        assert_eq!(derive_status(&it, &product(10), now), InventoryStatus::LowStock);
    }

    #[test]
    fn test_available_above_threshold() {
        let now = Utc::now();
        let it = item(11, 48, now);
        assert_eq!(
            derive_status(&it, &product(10), now),
            InventoryStatus::Available
        );
    }

    #[test]
    fn test_days_until_expiry_ceiling() {
        let now = Utc::now();
        // 1 hour left still counts as 1 day.
        assert_eq!(days_until_expiry(&item(5, 1, now), now), 1);
        // Exactly 48 hours is 2 days, not 3.
        assert_eq!(days_until_expiry(&item(5, 48, now), now), 2);
        // 49 hours rounds up to 3.
        assert_eq!(days_until_expiry(&item(5, 49, now), now), 3);
        // Expired an hour ago: zero, not negative one-off.
        assert_eq!(days_until_expiry(&item(5, -1, now), now), 0);
        assert_eq!(days_until_expiry(&item(5, -25, now), now), -1);
    }

    #[test]
    fn test_expiring_soon_window() {
        let now = Utc::now();
        assert!(is_expiring_soon(&item(5, 48, now), now));
        assert!(is_expiring_soon(&item(5, 72, now), now));
        // 73h ceils to 4 days: outside the window.
        assert!(!is_expiring_soon(&item(5, 73, now), now));
        // Already expired: not "expiring soon".
        assert!(!is_expiring_soon(&item(5, -1, now), now));
    }
}
