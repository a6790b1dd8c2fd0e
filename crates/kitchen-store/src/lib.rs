//! # kitchen-store: Stateful Layer for KitchenHub
//!
//! Owns the entity collections and every mutation against them. Pure
//! business rules live in `kitchen-core`; this crate adds state, ids,
//! clocks, events, auth, and persistence.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        kitchen-store                            │
//! │                                                                 │
//! │   auth ──► User ──┐                                             │
//! │                   ▼                                             │
//! │   ops (service object, RwLock<EntityStore>)                     │
//! │     │  validate / stock-check / transition   (kitchen-core)     │
//! │     │  assign ids + timestamps                                  │
//! │     ├──► store (collections + lookups)                          │
//! │     └──► events ──► alert subscriber                            │
//! │                                                                 │
//! │   snapshot ◄── export() ── whole-store JSON persistence         │
//! │   fixtures ──► seed data for dev and tests                      │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust,ignore
//! let user = kitchen_store::auth::authenticate(email, password)?;
//! let ops = Ops::new(fixtures::seed_store());
//! let order = ops.add_purchase_order(new_order)?;
//! snapshot.save(&ops.export()).await?;
//! ```

pub mod auth;
pub mod error;
pub mod events;
pub mod fixtures;
pub mod ops;
pub mod snapshot;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use events::DomainEvent;
pub use ops::{
    BranchPatch, InventoryPatch, NewBranch, NewDistribution, NewInventoryItem, NewProduct,
    NewProductionPlan, NewPurchaseOrder, NewRecipe, NewSupplier, Ops, ProductPatch, RecipePatch,
    SupplierPatch,
};
pub use snapshot::JsonSnapshotStore;
pub use store::EntityStore;
