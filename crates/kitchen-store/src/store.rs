//! # Entity Store
//!
//! In-memory ordered collections for every entity type, keyed by string
//! id. Pure data plus lookup helpers; all behavior (validation, derived
//! state, side effects) lives in [`crate::ops`].
//!
//! ## Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      EntityStore                                │
//! │                                                                 │
//! │  append        push to the collection (insertion order kept)    │
//! │  find-by-id    linear scan; collections are small by design     │
//! │  merge-by-id   partial update in place                          │
//! │  delete-by-id  retain everything else                           │
//! │                                                                 │
//! │  No transactions, no undo. Each mutation is one synchronous     │
//! │  assignment under the service's write lock.                     │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use kitchen_core::{
    Alert, Branch, Distribution, InventoryItem, InventoryStatus, Location, Product, ProductionPlan,
    PurchaseOrder, Recipe, Supplier,
};

/// All entity collections. The store exclusively owns every entity; no
/// list is shared or mutated by two independent owners.
///
/// This is also the snapshot schema: the whole store serializes as one
/// JSON document (see [`crate::snapshot`]).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntityStore {
    pub products: Vec<Product>,
    pub recipes: Vec<Recipe>,
    pub inventory: Vec<InventoryItem>,
    pub production_plans: Vec<ProductionPlan>,
    pub distributions: Vec<Distribution>,
    pub suppliers: Vec<Supplier>,
    pub purchase_orders: Vec<PurchaseOrder>,
    pub alerts: Vec<Alert>,
    pub branches: Vec<Branch>,
}

impl EntityStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Lookups
    // =========================================================================

    pub fn product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn product_mut(&mut self, id: &str) -> Option<&mut Product> {
        self.products.iter_mut().find(|p| p.id == id)
    }

    pub fn recipe_mut(&mut self, id: &str) -> Option<&mut Recipe> {
        self.recipes.iter_mut().find(|r| r.id == id)
    }

    pub fn inventory_item(&self, id: &str) -> Option<&InventoryItem> {
        self.inventory.iter().find(|i| i.id == id)
    }

    pub fn inventory_item_mut(&mut self, id: &str) -> Option<&mut InventoryItem> {
        self.inventory.iter_mut().find(|i| i.id == id)
    }

    pub fn plan_mut(&mut self, id: &str) -> Option<&mut ProductionPlan> {
        self.production_plans.iter_mut().find(|p| p.id == id)
    }

    pub fn distribution_mut(&mut self, id: &str) -> Option<&mut Distribution> {
        self.distributions.iter_mut().find(|d| d.id == id)
    }

    pub fn supplier(&self, id: &str) -> Option<&Supplier> {
        self.suppliers.iter().find(|s| s.id == id)
    }

    pub fn supplier_mut(&mut self, id: &str) -> Option<&mut Supplier> {
        self.suppliers.iter_mut().find(|s| s.id == id)
    }

    pub fn order(&self, id: &str) -> Option<&PurchaseOrder> {
        self.purchase_orders.iter().find(|o| o.id == id)
    }

    pub fn order_mut(&mut self, id: &str) -> Option<&mut PurchaseOrder> {
        self.purchase_orders.iter_mut().find(|o| o.id == id)
    }

    pub fn alert_mut(&mut self, id: &str) -> Option<&mut Alert> {
        self.alerts.iter_mut().find(|a| a.id == id)
    }

    pub fn branch(&self, id: &str) -> Option<&Branch> {
        self.branches.iter().find(|b| b.id == id)
    }

    pub fn branch_mut(&mut self, id: &str) -> Option<&mut Branch> {
        self.branches.iter_mut().find(|b| b.id == id)
    }

    // =========================================================================
    // Derived Lookups
    // =========================================================================

    /// Display name for a location: the branch's name, or the id itself
    /// when the branch is unknown (never panics on dangling data).
    pub fn location_name(&self, location: &Location) -> String {
        match location {
            Location::CentralKitchen => "Central Kitchen".to_string(),
            Location::Branch(id) => self
                .branch(id)
                .map(|b| b.name.clone())
                .unwrap_or_else(|| id.clone()),
        }
    }

    /// Available stock of a product at a location: Σ quantity over
    /// batches with `available` status only. Low, expired, and empty
    /// batches do not count toward fulfilment.
    pub fn available_stock(&self, product_id: &str, location: &Location) -> i64 {
        self.inventory
            .iter()
            .filter(|item| {
                item.product_id == product_id
                    && &item.location == location
                    && item.status == InventoryStatus::Available
            })
            .map(|item| item.quantity)
            .sum()
    }

    /// Removes a product by id. Returns whether anything was removed.
    pub fn remove_product(&mut self, id: &str) -> bool {
        let before = self.products.len();
        self.products.retain(|p| p.id != id);
        self.products.len() != before
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use kitchen_core::Money;

    fn store_with_stock() -> EntityStore {
        let now = Utc::now();
        let mut store = EntityStore::new();
        for (qty, status) in [
            (45, InventoryStatus::Available),
            (30, InventoryStatus::Available),
            (5, InventoryStatus::LowStock),
            (12, InventoryStatus::Expired),
        ] {
            store.inventory.push(InventoryItem {
                id: uuid::Uuid::new_v4().to_string(),
                product_id: "p1".to_string(),
                quantity: qty,
                location: Location::CentralKitchen,
                batch_number: format!("CK-{qty}"),
                expiration_date: now + Duration::days(5),
                received_date: now - Duration::days(1),
                supplier_id: "s1".to_string(),
                cost: Money::from_cents(2550),
                status,
                version: 0,
            });
        }
        store
    }

    #[test]
    fn test_available_stock_counts_only_available_batches() {
        let store = store_with_stock();
        assert_eq!(
            store.available_stock("p1", &Location::CentralKitchen),
            75 // 45 + 30; low/expired batches excluded
        );
        assert_eq!(
            store.available_stock("p1", &Location::Branch("b1".to_string())),
            0
        );
        assert_eq!(store.available_stock("other", &Location::CentralKitchen), 0);
    }

    #[test]
    fn test_location_name_falls_back_to_id() {
        let store = EntityStore::new();
        assert_eq!(
            store.location_name(&Location::CentralKitchen),
            "Central Kitchen"
        );
        assert_eq!(
            store.location_name(&Location::Branch("ghost".to_string())),
            "ghost"
        );
    }

    #[test]
    fn test_remove_product() {
        let mut store = EntityStore::new();
        store.products.push(Product {
            id: "p1".to_string(),
            name: "Rice".to_string(),
            category: "Grains".to_string(),
            unit: "kg".to_string(),
            cost: Money::from_cents(1200),
            min_stock: 20,
            max_stock: 200,
            expiration_days: 365,
            description: None,
            created_at: Utc::now(),
        });
        assert!(store.remove_product("p1"));
        assert!(!store.remove_product("p1"));
        assert!(store.products.is_empty());
    }
}
