//! # Mutation Operations
//!
//! The service object owning the entity store. Every write in the system
//! goes through here: id assignment, timestamping, validation, stock
//! checks, guarded status transitions, and the order-created alert side
//! effect. Every read applies the access filter for the calling user.
//!
//! ## Write Path
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  Caller                  Ops                        Store       │
//! │  ──────                  ───                        ─────       │
//! │  add_x(input) ─────────► validate (pure, core)                  │
//! │                          stock check (reads store)              │
//! │                          assign uuid + created_at               │
//! │                          derive status where relevant           │
//! │                          ────────────────────────► append       │
//! │                          dispatch domain events   ► alerts      │
//! │  ◄───────────── created entity (observable via stats at once)  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Concurrency
//! The store sits behind an `RwLock`: one exclusive writer at a time,
//! which is the explicit policy for multi-user deployments. Share the
//! service as `Arc<Ops>`. Mutable entities carry a `version` bumped on
//! every update as the hook for optimistic concurrency across processes.
//!
//! Failed operations never partially mutate: all validation and stock
//! checks run before the first write.

use std::collections::BTreeMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use kitchen_core::{
    access, alerts as alert_rules, compute_stats, derive_status, transitions, validation,
    ActiveStatus, Alert, Branch, CoreError, DashboardStats, Distribution, DistributionStatus,
    InventoryItem, Location, Money, OpeningHours, OrderKind, OrderLine, OrderStatus, PlanStatus,
    Product, ProductionPlan, PurchaseOrder, Recipe, RecipeIngredient, Supplier, User,
};

use crate::error::StoreResult;
use crate::events::{alert_for_event, DomainEvent};
use crate::store::EntityStore;

// =============================================================================
// Input Types
// =============================================================================
// Create inputs carry everything but id/created_at (assigned here); patch
// inputs are partial merges where `None` means "leave unchanged".

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub category: String,
    pub unit: String,
    pub cost: Money,
    pub min_stock: i64,
    pub max_stock: i64,
    pub expiration_days: i64,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub category: Option<String>,
    pub unit: Option<String>,
    pub cost: Option<Money>,
    pub min_stock: Option<i64>,
    pub max_stock: Option<i64>,
    pub expiration_days: Option<i64>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRecipe {
    pub name: String,
    pub description: String,
    pub ingredients: Vec<RecipeIngredient>,
    pub preparation_minutes: i64,
    pub cooking_minutes: i64,
    pub servings: i64,
    pub instructions: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecipePatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub ingredients: Option<Vec<RecipeIngredient>>,
    pub preparation_minutes: Option<i64>,
    pub cooking_minutes: Option<i64>,
    pub servings: Option<i64>,
    pub instructions: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewInventoryItem {
    pub product_id: String,
    pub quantity: i64,
    pub location: Location,
    pub batch_number: String,
    pub expiration_date: DateTime<Utc>,
    pub received_date: DateTime<Utc>,
    pub supplier_id: String,
    /// Unit cost at receipt; frozen for the batch's lifetime.
    pub cost: Money,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InventoryPatch {
    pub quantity: Option<i64>,
    pub location: Option<Location>,
    pub expiration_date: Option<DateTime<Utc>>,
    pub batch_number: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProductionPlan {
    pub recipe_id: String,
    /// Batches to produce, >= 1.
    pub quantity: i64,
    pub scheduled_date: DateTime<Utc>,
    pub assigned_by: String,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDistribution {
    pub product_id: String,
    pub from_location: Location,
    pub to_location: Location,
    pub quantity: i64,
    pub scheduled_date: DateTime<Utc>,
    pub driver_name: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPurchaseOrder {
    pub kind: OrderKind,
    pub items: Vec<OrderLine>,
    pub expected_delivery_date: DateTime<Utc>,
    pub requested_by: Option<String>,
    pub notes: Option<String>,
    /// Start as `draft` instead of `pending`.
    pub draft: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSupplier {
    pub name: String,
    pub contact_person: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub products: Vec<String>,
    pub rating: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SupplierPatch {
    pub name: Option<String>,
    pub contact_person: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub products: Option<Vec<String>>,
    pub rating: Option<f64>,
    pub status: Option<ActiveStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBranch {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub manager: String,
    pub opening_hours: OpeningHours,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BranchPatch {
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub manager: Option<String>,
    pub status: Option<ActiveStatus>,
    pub opening_hours: Option<OpeningHours>,
}

// =============================================================================
// Service
// =============================================================================

/// The KitchenHub service object.
///
/// Injected wherever handlers need it (share as `Arc<Ops>`); never a
/// process-wide singleton.
#[derive(Debug)]
pub struct Ops {
    store: RwLock<EntityStore>,
}

impl Ops {
    /// Creates a service over an initial store (empty, fixtures, or a
    /// loaded snapshot).
    pub fn new(store: EntityStore) -> Self {
        Ops {
            store: RwLock::new(store),
        }
    }

    /// Runs `f` with read access to the store.
    fn with_store<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&EntityStore) -> R,
    {
        let store = self.store.read().expect("store lock poisoned");
        f(&store)
    }

    /// Runs `f` with exclusive write access to the store.
    fn with_store_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut EntityStore) -> R,
    {
        let mut store = self.store.write().expect("store lock poisoned");
        f(&mut store)
    }

    /// Clones the current store, e.g. for snapshot persistence.
    pub fn export(&self) -> EntityStore {
        self.with_store(|s| s.clone())
    }

    // =========================================================================
    // Reads (access-filtered)
    // =========================================================================
    // Catalog collections (products, recipes, suppliers, branches) are
    // readable by every role; hiding them from branch managers is a
    // navigation concern, not a data rule. Location-scoped collections go
    // through the core access filter.

    pub fn products(&self) -> Vec<Product> {
        self.with_store(|s| s.products.clone())
    }

    pub fn recipes(&self) -> Vec<Recipe> {
        self.with_store(|s| s.recipes.clone())
    }

    pub fn suppliers(&self) -> Vec<Supplier> {
        self.with_store(|s| s.suppliers.clone())
    }

    pub fn branches(&self) -> Vec<Branch> {
        self.with_store(|s| s.branches.clone())
    }

    /// Inventory visible to the user: everything for a main manager,
    /// their branch only for a branch manager.
    pub fn inventory(&self, user: &User) -> Vec<InventoryItem> {
        self.with_store(|s| {
            access::filter_inventory(user, &s.inventory)
                .into_iter()
                .cloned()
                .collect()
        })
    }

    pub fn alerts(&self, user: &User) -> Vec<Alert> {
        self.with_store(|s| {
            access::filter_alerts(user, &s.alerts)
                .into_iter()
                .cloned()
                .collect()
        })
    }

    pub fn purchase_orders(&self, user: &User) -> Vec<PurchaseOrder> {
        self.with_store(|s| {
            access::filter_orders(user, &s.purchase_orders)
                .into_iter()
                .cloned()
                .collect()
        })
    }

    pub fn distributions(&self, user: &User) -> Vec<Distribution> {
        self.with_store(|s| {
            access::filter_distributions(user, &s.distributions)
                .into_iter()
                .cloned()
                .collect()
        })
    }

    /// Recomputes the dashboard projection against the current clock.
    pub fn dashboard_stats(&self) -> DashboardStats {
        self.dashboard_stats_at(Utc::now())
    }

    /// Recomputes the dashboard projection against an explicit "now".
    pub fn dashboard_stats_at(&self, now: DateTime<Utc>) -> DashboardStats {
        self.with_store(|s| {
            debug!("recomputing dashboard stats");
            compute_stats(
                &s.products,
                &s.inventory,
                &s.suppliers,
                &s.purchase_orders,
                &s.production_plans,
                &s.branches,
                now,
            )
        })
    }

    // =========================================================================
    // Products (catalog: main-manager only)
    // =========================================================================

    pub fn add_product(&self, user: &User, new: NewProduct) -> StoreResult<Product> {
        access::require_catalog_access(user)?;
        validation::validate_name("name", &new.name)?;
        validation::validate_non_negative("min_stock", new.min_stock)?;
        validation::validate_quantity("max_stock", new.max_stock)?;
        validation::validate_quantity("expiration_days", new.expiration_days)?;

        let product = Product {
            id: Uuid::new_v4().to_string(),
            name: new.name,
            category: new.category,
            unit: new.unit,
            cost: new.cost,
            min_stock: new.min_stock,
            max_stock: new.max_stock,
            expiration_days: new.expiration_days,
            description: new.description,
            created_at: Utc::now(),
        };
        self.with_store_mut(|s| s.products.push(product.clone()));
        info!(product_id = %product.id, name = %product.name, "product added");
        Ok(product)
    }

    pub fn update_product(&self, user: &User, id: &str, patch: ProductPatch) -> StoreResult<Product> {
        access::require_catalog_access(user)?;
        if let Some(name) = &patch.name {
            validation::validate_name("name", name)?;
        }
        if let Some(min) = patch.min_stock {
            validation::validate_non_negative("min_stock", min)?;
        }

        let updated = self.with_store_mut(|s| {
            let product = s
                .product_mut(id)
                .ok_or_else(|| CoreError::not_found("Product", id))?;
            if let Some(v) = patch.name {
                product.name = v;
            }
            if let Some(v) = patch.category {
                product.category = v;
            }
            if let Some(v) = patch.unit {
                product.unit = v;
            }
            if let Some(v) = patch.cost {
                product.cost = v;
            }
            if let Some(v) = patch.min_stock {
                product.min_stock = v;
            }
            if let Some(v) = patch.max_stock {
                product.max_stock = v;
            }
            if let Some(v) = patch.expiration_days {
                product.expiration_days = v;
            }
            if let Some(v) = patch.description {
                product.description = Some(v);
            }
            Ok::<_, CoreError>(product.clone())
        })?;
        info!(product_id = %id, "product updated");
        Ok(updated)
    }

    pub fn delete_product(&self, user: &User, id: &str) -> StoreResult<()> {
        access::require_catalog_access(user)?;
        let removed = self.with_store_mut(|s| s.remove_product(id));
        if !removed {
            return Err(CoreError::not_found("Product", id).into());
        }
        info!(product_id = %id, "product deleted");
        Ok(())
    }

    // =========================================================================
    // Recipes (catalog: main-manager only)
    // =========================================================================

    pub fn add_recipe(&self, user: &User, new: NewRecipe) -> StoreResult<Recipe> {
        access::require_catalog_access(user)?;
        validation::validate_name("name", &new.name)?;
        validation::validate_quantity("servings", new.servings)?;

        let recipe = self.with_store_mut(|s| {
            validation::validate_ingredients(&new.ingredients, |pid| s.product(pid).is_some())?;
            let recipe = Recipe {
                id: Uuid::new_v4().to_string(),
                name: new.name,
                description: new.description,
                ingredients: new.ingredients,
                preparation_minutes: new.preparation_minutes,
                cooking_minutes: new.cooking_minutes,
                servings: new.servings,
                instructions: new.instructions,
                created_at: Utc::now(),
            };
            s.recipes.push(recipe.clone());
            Ok::<_, CoreError>(recipe)
        })?;
        info!(recipe_id = %recipe.id, name = %recipe.name, "recipe added");
        Ok(recipe)
    }

    pub fn update_recipe(&self, user: &User, id: &str, patch: RecipePatch) -> StoreResult<Recipe> {
        access::require_catalog_access(user)?;
        if let Some(name) = &patch.name {
            validation::validate_name("name", name)?;
        }

        let updated = self.with_store_mut(|s| {
            if let Some(ingredients) = &patch.ingredients {
                validation::validate_ingredients(ingredients, |pid| s.product(pid).is_some())?;
            }
            let recipe = s
                .recipe_mut(id)
                .ok_or_else(|| CoreError::not_found("Recipe", id))?;
            if let Some(v) = patch.name {
                recipe.name = v;
            }
            if let Some(v) = patch.description {
                recipe.description = v;
            }
            if let Some(v) = patch.ingredients {
                recipe.ingredients = v;
            }
            if let Some(v) = patch.preparation_minutes {
                recipe.preparation_minutes = v;
            }
            if let Some(v) = patch.cooking_minutes {
                recipe.cooking_minutes = v;
            }
            if let Some(v) = patch.servings {
                recipe.servings = v;
            }
            if let Some(v) = patch.instructions {
                recipe.instructions = v;
            }
            Ok::<_, CoreError>(recipe.clone())
        })?;
        info!(recipe_id = %id, "recipe updated");
        Ok(updated)
    }

    // =========================================================================
    // Inventory
    // =========================================================================

    /// Receives a batch into stock. Status is derived immediately; the
    /// caller never supplies one.
    pub fn add_inventory_item(&self, new: NewInventoryItem) -> StoreResult<InventoryItem> {
        validation::validate_non_negative("quantity", new.quantity)?;
        validation::validate_name("batch_number", &new.batch_number)?;
        validation::validate_batch_dates(new.expiration_date, new.received_date)?;

        let now = Utc::now();
        let item = self.with_store_mut(|s| {
            let product = s
                .product(&new.product_id)
                .ok_or_else(|| CoreError::not_found("Product", &new.product_id))?
                .clone();
            s.supplier(&new.supplier_id)
                .ok_or_else(|| CoreError::not_found("Supplier", &new.supplier_id))?;
            Self::require_location(s, &new.location)?;

            let mut item = InventoryItem {
                id: Uuid::new_v4().to_string(),
                product_id: new.product_id,
                quantity: new.quantity,
                location: new.location,
                batch_number: new.batch_number,
                expiration_date: new.expiration_date,
                received_date: new.received_date,
                supplier_id: new.supplier_id,
                cost: new.cost,
                status: kitchen_core::InventoryStatus::Available,
                version: 0,
            };
            item.status = derive_status(&item, &product, now);
            s.inventory.push(item.clone());
            Ok::<_, CoreError>(item)
        })?;
        info!(item_id = %item.id, batch = %item.batch_number, status = %item.status, "inventory batch received");
        Ok(item)
    }

    /// Merges a partial update into a batch and re-derives its status.
    pub fn update_inventory_item(&self, id: &str, patch: InventoryPatch) -> StoreResult<InventoryItem> {
        if let Some(quantity) = patch.quantity {
            validation::validate_non_negative("quantity", quantity)?;
        }

        let now = Utc::now();
        let updated = self.with_store_mut(|s| {
            if let Some(location) = &patch.location {
                Self::require_location(s, location)?;
            }
            let product_id = s
                .inventory_item(id)
                .map(|item| item.product_id.clone())
                .ok_or_else(|| CoreError::not_found("InventoryItem", id))?;
            let product = s
                .product(&product_id)
                .ok_or_else(|| CoreError::not_found("Product", &product_id))?
                .clone();
            let Some(item) = s.inventory_item_mut(id) else {
                return Err(CoreError::not_found("InventoryItem", id));
            };
            if let Some(v) = patch.quantity {
                item.quantity = v;
            }
            if let Some(v) = patch.location {
                item.location = v;
            }
            if let Some(v) = patch.expiration_date {
                item.expiration_date = v;
            }
            if let Some(v) = patch.batch_number {
                item.batch_number = v;
            }
            item.status = derive_status(item, &product, now);
            item.version += 1;
            Ok::<_, CoreError>(item.clone())
        })?;
        info!(item_id = %id, status = %updated.status, "inventory batch updated");
        Ok(updated)
    }

    /// Re-derives every batch's status against `now`. Returns how many
    /// changed. Run periodically so statuses cannot silently go stale.
    pub fn refresh_inventory_status(&self, now: DateTime<Utc>) -> usize {
        let changed = self.with_store_mut(|s| {
            let products: BTreeMap<String, Product> = s
                .products
                .iter()
                .map(|p| (p.id.clone(), p.clone()))
                .collect();
            let mut changed = 0;
            for item in &mut s.inventory {
                let Some(product) = products.get(&item.product_id) else {
                    continue; // dangling product reference; leave as-is
                };
                let status = derive_status(item, product, now);
                if status != item.status {
                    item.status = status;
                    item.version += 1;
                    changed += 1;
                }
            }
            changed
        });
        if changed > 0 {
            info!(changed, "inventory statuses refreshed");
        }
        changed
    }

    // =========================================================================
    // Production Plans
    // =========================================================================

    pub fn add_production_plan(&self, new: NewProductionPlan) -> StoreResult<ProductionPlan> {
        validation::validate_quantity("quantity", new.quantity)?;
        validation::validate_name("assigned_by", &new.assigned_by)?;

        let plan = self.with_store_mut(|s| {
            if !s.recipes.iter().any(|r| r.id == new.recipe_id) {
                return Err(CoreError::not_found("Recipe", &new.recipe_id));
            }
            let plan = ProductionPlan {
                id: Uuid::new_v4().to_string(),
                recipe_id: new.recipe_id,
                quantity: new.quantity,
                scheduled_date: new.scheduled_date,
                status: PlanStatus::Planned,
                assigned_by: new.assigned_by,
                notes: new.notes,
                created_at: Utc::now(),
            };
            s.production_plans.push(plan.clone());
            Ok(plan)
        })?;
        info!(plan_id = %plan.id, "production plan added");
        Ok(plan)
    }

    /// Moves a plan through its status machine. Illegal transitions are
    /// rejected; `cancelled → planned` (restart) is legal.
    pub fn set_plan_status(&self, id: &str, to: PlanStatus) -> StoreResult<ProductionPlan> {
        let updated = self.with_store_mut(|s| {
            let plan = s
                .plan_mut(id)
                .ok_or_else(|| CoreError::not_found("ProductionPlan", id))?;
            plan.status = transitions::plan_transition(plan.status, to)?;
            Ok::<_, CoreError>(plan.clone())
        })?;
        info!(plan_id = %id, status = %updated.status, "production plan transitioned");
        Ok(updated)
    }

    // =========================================================================
    // Distributions
    // =========================================================================

    /// Schedules a stock transfer. Fails with `InsufficientStock` when the
    /// source location cannot cover the quantity from available batches;
    /// a failing check leaves the store untouched.
    pub fn add_distribution(&self, new: NewDistribution) -> StoreResult<Distribution> {
        validation::validate_quantity("quantity", new.quantity)?;
        if new.from_location == new.to_location {
            return Err(CoreError::Validation(
                kitchen_core::ValidationError::InvalidFormat {
                    field: "to_location",
                    reason: "destination must differ from origin".to_string(),
                },
            )
            .into());
        }

        let distribution = self.with_store_mut(|s| {
            s.product(&new.product_id)
                .ok_or_else(|| CoreError::not_found("Product", &new.product_id))?;
            Self::require_location(s, &new.from_location)?;
            Self::require_location(s, &new.to_location)?;
            Self::require_stock(s, &new.product_id, &new.from_location, new.quantity)?;

            let distribution = Distribution {
                id: Uuid::new_v4().to_string(),
                product_id: new.product_id,
                from_location: new.from_location,
                to_location: new.to_location,
                quantity: new.quantity,
                scheduled_date: new.scheduled_date,
                delivery_date: None,
                status: DistributionStatus::Pending,
                driver_name: new.driver_name,
                notes: new.notes,
                created_at: Utc::now(),
            };
            s.distributions.push(distribution.clone());
            Ok::<_, CoreError>(distribution)
        })?;
        info!(distribution_id = %distribution.id, "distribution scheduled");
        Ok(distribution)
    }

    /// Moves a distribution through its status machine. Marking
    /// `delivered` stamps the delivery date.
    pub fn set_distribution_status(
        &self,
        id: &str,
        to: DistributionStatus,
    ) -> StoreResult<Distribution> {
        let now = Utc::now();
        let updated = self.with_store_mut(|s| {
            let distribution = s
                .distribution_mut(id)
                .ok_or_else(|| CoreError::not_found("Distribution", id))?;
            distribution.status =
                transitions::distribution_transition(distribution.status, to)?;
            if distribution.status == DistributionStatus::Delivered {
                distribution.delivery_date = Some(now);
            }
            Ok::<_, CoreError>(distribution.clone())
        })?;
        info!(distribution_id = %id, status = %updated.status, "distribution transitioned");
        Ok(updated)
    }

    // =========================================================================
    // Purchase Orders
    // =========================================================================

    /// Creates a purchase order of any kind.
    ///
    /// Restock and distribution orders draw from central-kitchen stock and
    /// are checked against it; external supplier orders are not. The total
    /// is recomputed from the lines, never trusted from the caller. On
    /// success exactly one `missing_product` alert is published via the
    /// `OrderCreated` event.
    pub fn add_purchase_order(&self, new: NewPurchaseOrder) -> StoreResult<PurchaseOrder> {
        validation::validate_order_lines(&new.items)?;

        let now = Utc::now();
        let (order, alert) = self.with_store_mut(|s| {
            Self::require_order_kind(s, &new.kind)?;
            for line in &new.items {
                s.product(&line.product_id)
                    .ok_or_else(|| CoreError::not_found("Product", &line.product_id))?;
            }
            if let Some(source) = new.kind.stock_source() {
                // Lines may repeat a product; check the aggregate.
                let mut requested: BTreeMap<&str, i64> = BTreeMap::new();
                for line in &new.items {
                    *requested.entry(line.product_id.as_str()).or_default() += line.quantity;
                }
                for (product_id, quantity) in requested {
                    Self::require_stock(s, product_id, &source, quantity)?;
                }
            }

            let total = new.items.iter().map(|line| line.total).sum();
            let order = PurchaseOrder {
                id: Uuid::new_v4().to_string(),
                kind: new.kind,
                items: new.items,
                total,
                status: if new.draft {
                    OrderStatus::Draft
                } else {
                    OrderStatus::Pending
                },
                order_date: now,
                expected_delivery_date: new.expected_delivery_date,
                actual_delivery_date: None,
                requested_by: new.requested_by,
                approved_by: None,
                notes: new.notes,
                created_at: now,
                version: 0,
            };
            s.purchase_orders.push(order.clone());

            // The write is committed; fan the event out to the alert
            // subscriber.
            let event = DomainEvent::OrderCreated {
                order: order.clone(),
            };
            let alert = alert_for_event(s, &event, Uuid::new_v4().to_string(), now);
            if let Some(alert) = &alert {
                s.alerts.push(alert.clone());
            }
            Ok::<_, CoreError>((order, alert))
        })?;
        info!(
            order_id = %order.id,
            total = %order.total,
            alert_id = alert.as_ref().map(|a| a.id.as_str()).unwrap_or("-"),
            "purchase order created"
        );
        Ok(order)
    }

    /// Moves an order through its status machine. Approval records the
    /// actor; `received` stamps the actual delivery date.
    pub fn set_order_status(
        &self,
        id: &str,
        to: OrderStatus,
        actor: Option<&str>,
    ) -> StoreResult<PurchaseOrder> {
        let now = Utc::now();
        let updated = self.with_store_mut(|s| {
            let order = s
                .order_mut(id)
                .ok_or_else(|| CoreError::not_found("PurchaseOrder", id))?;
            order.status = transitions::order_transition(order.status, to)?;
            match order.status {
                OrderStatus::Approved => {
                    order.approved_by = actor.map(str::to_string);
                }
                OrderStatus::Received => {
                    order.actual_delivery_date = Some(now);
                }
                _ => {}
            }
            order.version += 1;
            Ok::<_, CoreError>(order.clone())
        })?;
        info!(order_id = %id, status = %updated.status, "purchase order transitioned");
        Ok(updated)
    }

    // =========================================================================
    // Suppliers & Branches (catalog: main-manager only)
    // =========================================================================

    pub fn add_supplier(&self, user: &User, new: NewSupplier) -> StoreResult<Supplier> {
        access::require_catalog_access(user)?;
        validation::validate_name("name", &new.name)?;
        validation::validate_rating(new.rating)?;

        let supplier = Supplier {
            id: Uuid::new_v4().to_string(),
            name: new.name,
            contact_person: new.contact_person,
            email: new.email,
            phone: new.phone,
            address: new.address,
            products: new.products,
            rating: new.rating,
            status: ActiveStatus::Active,
            created_at: Utc::now(),
        };
        self.with_store_mut(|s| s.suppliers.push(supplier.clone()));
        info!(supplier_id = %supplier.id, name = %supplier.name, "supplier added");
        Ok(supplier)
    }

    pub fn update_supplier(&self, user: &User, id: &str, patch: SupplierPatch) -> StoreResult<Supplier> {
        access::require_catalog_access(user)?;
        if let Some(rating) = patch.rating {
            validation::validate_rating(rating)?;
        }

        let updated = self.with_store_mut(|s| {
            let supplier = s
                .supplier_mut(id)
                .ok_or_else(|| CoreError::not_found("Supplier", id))?;
            if let Some(v) = patch.name {
                supplier.name = v;
            }
            if let Some(v) = patch.contact_person {
                supplier.contact_person = v;
            }
            if let Some(v) = patch.email {
                supplier.email = v;
            }
            if let Some(v) = patch.phone {
                supplier.phone = v;
            }
            if let Some(v) = patch.address {
                supplier.address = v;
            }
            if let Some(v) = patch.products {
                supplier.products = v;
            }
            if let Some(v) = patch.rating {
                supplier.rating = v;
            }
            if let Some(v) = patch.status {
                supplier.status = v;
            }
            Ok::<_, CoreError>(supplier.clone())
        })?;
        info!(supplier_id = %id, "supplier updated");
        Ok(updated)
    }

    pub fn add_branch(&self, user: &User, new: NewBranch) -> StoreResult<Branch> {
        access::require_catalog_access(user)?;
        validation::validate_name("name", &new.name)?;
        validation::validate_opening_hours(&new.opening_hours)?;

        let branch = Branch {
            id: Uuid::new_v4().to_string(),
            name: new.name,
            address: new.address,
            phone: new.phone,
            manager: new.manager,
            status: ActiveStatus::Active,
            opening_hours: new.opening_hours,
            created_at: Utc::now(),
        };
        self.with_store_mut(|s| s.branches.push(branch.clone()));
        info!(branch_id = %branch.id, name = %branch.name, "branch added");
        Ok(branch)
    }

    pub fn update_branch(&self, user: &User, id: &str, patch: BranchPatch) -> StoreResult<Branch> {
        access::require_catalog_access(user)?;
        if let Some(hours) = &patch.opening_hours {
            validation::validate_opening_hours(hours)?;
        }

        let updated = self.with_store_mut(|s| {
            let branch = s
                .branch_mut(id)
                .ok_or_else(|| CoreError::not_found("Branch", id))?;
            if let Some(v) = patch.name {
                branch.name = v;
            }
            if let Some(v) = patch.address {
                branch.address = v;
            }
            if let Some(v) = patch.phone {
                branch.phone = v;
            }
            if let Some(v) = patch.manager {
                branch.manager = v;
            }
            if let Some(v) = patch.status {
                branch.status = v;
            }
            if let Some(v) = patch.opening_hours {
                branch.opening_hours = v;
            }
            Ok::<_, CoreError>(branch.clone())
        })?;
        info!(branch_id = %id, "branch updated");
        Ok(updated)
    }

    // =========================================================================
    // Alerts
    // =========================================================================

    /// Marks an alert read - the only permitted edit to an alert.
    pub fn mark_alert_read(&self, id: &str) -> StoreResult<Alert> {
        let updated = self.with_store_mut(|s| {
            let alert = s
                .alert_mut(id)
                .ok_or_else(|| CoreError::not_found("Alert", id))?;
            alert.is_read = true;
            Ok::<_, CoreError>(alert.clone())
        })?;
        debug!(alert_id = %id, "alert marked read");
        Ok(updated)
    }

    /// Scans the inventory and appends alerts for expired, expiring-soon,
    /// and low-stock batches. Statuses are refreshed first so the scan
    /// never reports against stale state. Returns the new alerts.
    pub fn scan_inventory_alerts(&self, now: DateTime<Utc>) -> Vec<Alert> {
        self.refresh_inventory_status(now);
        let new_alerts = self.with_store_mut(|s| {
            let mut new_alerts = Vec::new();
            for item in &s.inventory {
                let Some(product) = s.products.iter().find(|p| p.id == item.product_id) else {
                    continue;
                };
                let location_name = s.location_name(&item.location);
                if let Some(alert) = alert_rules::inventory_alert(
                    Uuid::new_v4().to_string(),
                    item,
                    product,
                    &location_name,
                    now,
                ) {
                    new_alerts.push(alert);
                }
            }
            s.alerts.extend(new_alerts.iter().cloned());
            new_alerts
        });
        info!(count = new_alerts.len(), "inventory scan completed");
        new_alerts
    }

    // =========================================================================
    // Internal Checks
    // =========================================================================

    /// A branch location must reference an existing branch.
    fn require_location(store: &EntityStore, location: &Location) -> Result<(), CoreError> {
        if let Location::Branch(id) = location {
            if store.branch(id).is_none() {
                return Err(CoreError::not_found("Branch", id));
            }
        }
        Ok(())
    }

    /// Order kinds must reference existing branches/suppliers.
    fn require_order_kind(store: &EntityStore, kind: &OrderKind) -> Result<(), CoreError> {
        match kind {
            OrderKind::BranchRestock { from_branch } => {
                store
                    .branch(from_branch)
                    .map(|_| ())
                    .ok_or_else(|| CoreError::not_found("Branch", from_branch))
            }
            OrderKind::Distribution { to_branch } => store
                .branch(to_branch)
                .map(|_| ())
                .ok_or_else(|| CoreError::not_found("Branch", to_branch)),
            OrderKind::Supplier { supplier_id } => store
                .supplier(supplier_id)
                .map(|_| ())
                .ok_or_else(|| CoreError::not_found("Supplier", supplier_id)),
        }
    }

    /// Available stock at `location` must cover `requested`.
    fn require_stock(
        store: &EntityStore,
        product_id: &str,
        location: &Location,
        requested: i64,
    ) -> Result<(), CoreError> {
        let available = store.available_stock(product_id, location);
        if requested > available {
            return Err(CoreError::InsufficientStock {
                product_id: product_id.to_string(),
                location: location.clone(),
                available,
                requested,
            });
        }
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
// Behavior-level coverage lives in tests/ops_tests.rs; these pin the
// internal checks.

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_stock_boundary() {
        let store = EntityStore::new();
        // Empty store: zero available, so only zero passes.
        assert!(Ops::require_stock(&store, "p1", &Location::CentralKitchen, 0).is_ok());
        let err = Ops::require_stock(&store, "p1", &Location::CentralKitchen, 1).unwrap_err();
        assert!(matches!(err, CoreError::InsufficientStock { available: 0, requested: 1, .. }));
    }

    #[test]
    fn test_require_location_unknown_branch() {
        let store = EntityStore::new();
        assert!(Ops::require_location(&store, &Location::CentralKitchen).is_ok());
        assert!(Ops::require_location(&store, &Location::Branch("ghost".to_string())).is_err());
    }
}
