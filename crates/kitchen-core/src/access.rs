//! # Access Filtering
//!
//! Role-and-branch-scoped view filtering, applied at read time.
//!
//! ## Visibility Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                  Who Sees What                                  │
//! │                                                                 │
//! │                     main_manager   branch_manager (branch B)    │
//! │  Inventory          everything     location == B                │
//! │  Alerts             everything     location == B                │
//! │  Purchase orders    everything     origin OR destination == B   │
//! │  Distributions      everything     from OR to == B              │
//! │  Products/Recipes   everything     readable                     │
//! │  Suppliers/Branches everything     readable                     │
//! │                                                                 │
//! │  Catalog MUTATION (products, suppliers, branches) is            │
//! │  main-manager only: require_catalog_access().                   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Filters borrow; callers clone only what they hand outward.

use crate::error::{CoreError, CoreResult};
use crate::types::{Alert, Distribution, InventoryItem, OrderKind, PurchaseOrder, Role, User};

/// The branch scope of a user: `None` means unrestricted.
///
/// A branch manager without a branch id is a data error; such a user sees
/// nothing rather than everything.
fn scope(user: &User) -> Option<&str> {
    match user.role {
        Role::MainManager => None,
        Role::BranchManager => Some(user.branch_id().unwrap_or("")),
    }
}

/// Filters inventory to what the user may see.
pub fn filter_inventory<'a>(user: &User, items: &'a [InventoryItem]) -> Vec<&'a InventoryItem> {
    match scope(user) {
        None => items.iter().collect(),
        Some(branch) => items
            .iter()
            .filter(|item| item.location.is_branch(branch))
            .collect(),
    }
}

/// Filters alerts to what the user may see.
pub fn filter_alerts<'a>(user: &User, alerts: &'a [Alert]) -> Vec<&'a Alert> {
    match scope(user) {
        None => alerts.iter().collect(),
        Some(branch) => alerts
            .iter()
            .filter(|alert| alert.location.is_branch(branch))
            .collect(),
    }
}

/// Filters purchase orders: a branch manager sees orders whose origin OR
/// destination is their branch.
pub fn filter_orders<'a>(user: &User, orders: &'a [PurchaseOrder]) -> Vec<&'a PurchaseOrder> {
    match scope(user) {
        None => orders.iter().collect(),
        Some(branch) => orders
            .iter()
            .filter(|order| order_touches_branch(&order.kind, branch))
            .collect(),
    }
}

/// Filters distributions: a branch manager sees transfers from or to their
/// branch.
pub fn filter_distributions<'a>(
    user: &User,
    distributions: &'a [Distribution],
) -> Vec<&'a Distribution> {
    match scope(user) {
        None => distributions.iter().collect(),
        Some(branch) => distributions
            .iter()
            .filter(|d| d.from_location.is_branch(branch) || d.to_location.is_branch(branch))
            .collect(),
    }
}

/// Whether an order's kind involves the given branch on either end.
fn order_touches_branch(kind: &OrderKind, branch: &str) -> bool {
    match kind {
        OrderKind::BranchRestock { from_branch } => from_branch == branch,
        OrderKind::Distribution { to_branch } => to_branch == branch,
        OrderKind::Supplier { .. } => false,
    }
}

/// Gate for catalog mutations (products, suppliers, branches).
pub fn require_catalog_access(user: &User) -> CoreResult<()> {
    match user.role {
        Role::MainManager => Ok(()),
        Role::BranchManager => Err(CoreError::Forbidden {
            role: "branch_manager",
            action: "modify catalog data",
        }),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::types::{InventoryStatus, Location, OrderLine, OrderStatus};
    use chrono::Utc;

    fn main_manager() -> User {
        User {
            id: "u1".to_string(),
            name: "Main".to_string(),
            email: "main@example.com".to_string(),
            role: Role::MainManager,
            branch_id: None,
        }
    }

    fn branch_manager(branch: &str) -> User {
        User {
            id: "u2".to_string(),
            name: "Branch".to_string(),
            email: "branch@example.com".to_string(),
            role: Role::BranchManager,
            branch_id: Some(branch.to_string()),
        }
    }

    fn item_at(location: Location) -> InventoryItem {
        InventoryItem {
            id: uuid::Uuid::new_v4().to_string(),
            product_id: "p1".to_string(),
            quantity: 10,
            location,
            batch_number: "B-1".to_string(),
            expiration_date: Utc::now(),
            received_date: Utc::now(),
            supplier_id: "s1".to_string(),
            cost: Money::from_cents(100),
            status: InventoryStatus::Available,
            version: 0,
        }
    }

    fn order(kind: OrderKind) -> PurchaseOrder {
        PurchaseOrder {
            id: uuid::Uuid::new_v4().to_string(),
            kind,
            items: vec![OrderLine::new("p1", 1, Money::from_cents(100))],
            total: Money::from_cents(100),
            status: OrderStatus::Pending,
            order_date: Utc::now(),
            expected_delivery_date: Utc::now(),
            actual_delivery_date: None,
            requested_by: None,
            approved_by: None,
            notes: None,
            created_at: Utc::now(),
            version: 0,
        }
    }

    #[test]
    fn test_main_manager_sees_all_inventory() {
        let items = vec![
            item_at(Location::CentralKitchen),
            item_at(Location::Branch("b1".to_string())),
        ];
        assert_eq!(filter_inventory(&main_manager(), &items).len(), 2);
    }

    #[test]
    fn test_branch_manager_sees_own_branch_only() {
        let items = vec![
            item_at(Location::CentralKitchen),
            item_at(Location::Branch("b1".to_string())),
            item_at(Location::Branch("b2".to_string())),
        ];
        let visible = filter_inventory(&branch_manager("b1"), &items);
        assert_eq!(visible.len(), 1);
        assert!(visible[0].location.is_branch("b1"));
    }

    #[test]
    fn test_order_filter_matches_either_end() {
        let orders = vec![
            order(OrderKind::BranchRestock {
                from_branch: "b1".to_string(),
            }),
            order(OrderKind::Distribution {
                to_branch: "b1".to_string(),
            }),
            order(OrderKind::Supplier {
                supplier_id: "s1".to_string(),
            }),
        ];
        assert_eq!(filter_orders(&branch_manager("b1"), &orders).len(), 2);
        assert_eq!(filter_orders(&main_manager(), &orders).len(), 3);
    }

    #[test]
    fn test_branch_manager_without_branch_sees_nothing() {
        let mut user = branch_manager("b1");
        user.branch_id = None;
        let items = vec![item_at(Location::Branch("b1".to_string()))];
        assert!(filter_inventory(&user, &items).is_empty());
    }

    #[test]
    fn test_catalog_access() {
        assert!(require_catalog_access(&main_manager()).is_ok());
        assert!(matches!(
            require_catalog_access(&branch_manager("b1")),
            Err(CoreError::Forbidden { .. })
        ));
    }
}
