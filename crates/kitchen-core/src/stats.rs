//! # Dashboard Aggregation
//!
//! Recomputes [`DashboardStats`] from the entity collections. The stats are
//! a pure projection: nothing here is persisted, and computing twice over
//! unchanged inputs yields identical output.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  Products ─┐                                                    │
//! │  Inventory ┤                                                    │
//! │  Suppliers ├──► compute_stats(now) ──► DashboardStats           │
//! │  Orders    ┤        (pure, idempotent)                          │
//! │  Plans     ┤                                                    │
//! │  Branches ─┘                                                    │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::status::is_expiring_soon;
use crate::types::{
    Branch, InventoryItem, InventoryStatus, OrderStatus, Product, ProductionPlan, PurchaseOrder,
    Supplier,
};

// =============================================================================
// Projections
// =============================================================================

/// Per-branch slice of the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchStats {
    /// Display name, carried for the presentation layer.
    pub name: String,
    /// Σ quantity × cost-at-receipt over batches at this branch.
    pub inventory_value: Money,
    pub low_stock_count: usize,
    pub expired_count: usize,
}

/// The dashboard projection. Recomputed on every read, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_products: usize,
    /// Σ quantity × cost-at-receipt over all inventory batches.
    pub total_inventory_value: Money,
    pub low_stock_items: usize,
    pub expired_items: usize,
    /// Batches with 0 < days_until_expiry <= 3.
    pub expiring_items: usize,
    pub total_suppliers: usize,
    pub pending_orders: usize,
    /// Production plans scheduled on the same calendar day as `now`.
    pub today_production: usize,
    /// Keyed by branch id; BTreeMap for deterministic iteration.
    pub branches: BTreeMap<String, BranchStats>,
}

// =============================================================================
// Aggregator
// =============================================================================

/// Recomputes the dashboard from current collections.
///
/// Calendar-day comparison for `today_production` uses `date_naive()` on
/// both sides of the caller-supplied `now`; a presentation layer wanting
/// local-day semantics converts before calling.
pub fn compute_stats(
    products: &[Product],
    inventory: &[InventoryItem],
    suppliers: &[Supplier],
    orders: &[PurchaseOrder],
    plans: &[ProductionPlan],
    branches: &[Branch],
    now: DateTime<Utc>,
) -> DashboardStats {
    let today = now.date_naive();

    let branch_stats = branches
        .iter()
        .map(|branch| {
            let at_branch: Vec<&InventoryItem> = inventory
                .iter()
                .filter(|item| item.location.is_branch(&branch.id))
                .collect();
            (
                branch.id.clone(),
                BranchStats {
                    name: branch.name.clone(),
                    inventory_value: at_branch.iter().map(|item| item.value()).sum(),
                    low_stock_count: at_branch
                        .iter()
                        .filter(|item| item.status == InventoryStatus::LowStock)
                        .count(),
                    expired_count: at_branch
                        .iter()
                        .filter(|item| item.status == InventoryStatus::Expired)
                        .count(),
                },
            )
        })
        .collect();

    DashboardStats {
        total_products: products.len(),
        total_inventory_value: inventory.iter().map(|item| item.value()).sum(),
        low_stock_items: inventory
            .iter()
            .filter(|item| item.status == InventoryStatus::LowStock)
            .count(),
        expired_items: inventory
            .iter()
            .filter(|item| item.status == InventoryStatus::Expired)
            .count(),
        expiring_items: inventory
            .iter()
            .filter(|item| is_expiring_soon(item, now))
            .count(),
        total_suppliers: suppliers.len(),
        pending_orders: orders
            .iter()
            .filter(|order| order.status == OrderStatus::Pending)
            .count(),
        today_production: plans
            .iter()
            .filter(|plan| plan.scheduled_date.date_naive() == today)
            .count(),
        branches: branch_stats,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ActiveStatus, Location, OpeningHours, PlanStatus};
    use chrono::Duration;

    fn branch(id: &str, name: &str) -> Branch {
        Branch {
            id: id.to_string(),
            name: name.to_string(),
            address: "1 Street".to_string(),
            phone: "+966-11-111-1111".to_string(),
            manager: "Manager".to_string(),
            status: ActiveStatus::Active,
            opening_hours: OpeningHours {
                open: "08:00".to_string(),
                close: "23:00".to_string(),
            },
            created_at: Utc::now(),
        }
    }

    fn item(
        location: Location,
        quantity: i64,
        cost_cents: i64,
        status: InventoryStatus,
        expires_in_hours: i64,
        now: DateTime<Utc>,
    ) -> InventoryItem {
        InventoryItem {
            id: uuid::Uuid::new_v4().to_string(),
            product_id: "p1".to_string(),
            quantity,
            location,
            batch_number: "B-1".to_string(),
            expiration_date: now + Duration::hours(expires_in_hours),
            received_date: now - Duration::days(1),
            supplier_id: "s1".to_string(),
            cost: Money::from_cents(cost_cents),
            status,
            version: 0,
        }
    }

    fn plan(scheduled: DateTime<Utc>) -> ProductionPlan {
        ProductionPlan {
            id: uuid::Uuid::new_v4().to_string(),
            recipe_id: "r1".to_string(),
            quantity: 10,
            scheduled_date: scheduled,
            status: PlanStatus::Planned,
            assigned_by: "ops".to_string(),
            notes: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_total_inventory_value() {
        let now = Utc::now();
        let inventory = vec![
            item(Location::CentralKitchen, 45, 2550, InventoryStatus::Available, 480, now),
            item(
                Location::Branch("b1".to_string()),
                8,
                800,
                InventoryStatus::LowStock,
                120,
                now,
            ),
        ];
        let stats = compute_stats(&[], &inventory, &[], &[], &[], &[], now);
        // 45 × 25.50 + 8 × 8.00
        assert_eq!(stats.total_inventory_value.cents(), 114_750 + 6_400);
    }

    #[test]
    fn test_idempotent() {
        let now = Utc::now();
        let branches = vec![branch("b1", "Olaya")];
        let inventory = vec![item(
            Location::Branch("b1".to_string()),
            8,
            800,
            InventoryStatus::LowStock,
            120,
            now,
        )];
        let a = compute_stats(&[], &inventory, &[], &[], &[], &branches, now);
        let b = compute_stats(&[], &inventory, &[], &[], &[], &branches, now);
        assert_eq!(a, b);
    }

    #[test]
    fn test_branch_breakdown() {
        let now = Utc::now();
        let branches = vec![branch("b1", "Olaya"), branch("b2", "Hamra")];
        let inventory = vec![
            item(
                Location::Branch("b1".to_string()),
                8,
                800,
                InventoryStatus::LowStock,
                120,
                now,
            ),
            item(
                Location::Branch("b2".to_string()),
                25,
                600,
                InventoryStatus::Available,
                240,
                now,
            ),
            // Central kitchen stock must not leak into branch buckets.
            item(Location::CentralKitchen, 150, 1200, InventoryStatus::Available, 7200, now),
        ];
        let stats = compute_stats(&[], &inventory, &[], &[], &[], &branches, now);

        let olaya = &stats.branches["b1"];
        assert_eq!(olaya.name, "Olaya");
        assert_eq!(olaya.low_stock_count, 1);
        assert_eq!(olaya.inventory_value.cents(), 6_400);

        let hamra = &stats.branches["b2"];
        assert_eq!(hamra.low_stock_count, 0);
        assert_eq!(hamra.inventory_value.cents(), 15_000);
    }

    #[test]
    fn test_expiring_window_excludes_expired() {
        let now = Utc::now();
        let inventory = vec![
            item(Location::CentralKitchen, 5, 100, InventoryStatus::Available, 48, now),
            item(Location::CentralKitchen, 5, 100, InventoryStatus::Expired, -24, now),
        ];
        let stats = compute_stats(&[], &inventory, &[], &[], &[], &[], now);
        assert_eq!(stats.expiring_items, 1);
        assert_eq!(stats.expired_items, 1);
    }

    #[test]
    fn test_today_production_calendar_day() {
        let now = Utc::now();
        let plans = vec![
            plan(now),
            plan(now + Duration::days(1)),
            plan(now - Duration::days(1)),
        ];
        let stats = compute_stats(&[], &[], &[], &[], &plans, &[], now);
        assert_eq!(stats.today_production, 1);
    }
}
