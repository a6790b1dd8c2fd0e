//! # kitchen-core: Pure Business Logic for KitchenHub
//!
//! This crate is the **heart** of KitchenHub: the derived-state and
//! cross-entity consistency rules for a central kitchen feeding several
//! retail branches, as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                   KitchenHub Architecture                       │
//! │                                                                 │
//! │  ┌───────────────────────────────────────────────────────────┐  │
//! │  │              Presentation layer (external)                │  │
//! │  │     dashboards, forms, tables — not this workspace        │  │
//! │  └──────────────────────────┬────────────────────────────────┘  │
//! │                             │                                   │
//! │  ┌──────────────────────────▼────────────────────────────────┐  │
//! │  │           kitchen-store (Entity Store + Ops)              │  │
//! │  │    mutations, events, auth, snapshot persistence          │  │
//! │  └──────────────────────────┬────────────────────────────────┘  │
//! │                             │                                   │
//! │  ┌──────────────────────────▼────────────────────────────────┐  │
//! │  │             ★ kitchen-core (THIS CRATE) ★                 │  │
//! │  │                                                           │  │
//! │  │  ┌────────┐ ┌────────┐ ┌───────┐ ┌─────────────┐ ┌──────┐ │  │
//! │  │  │ types  │ │ status │ │ stats │ │ transitions │ │access│ │  │
//! │  │  └────────┘ └────────┘ └───────┘ └─────────────┘ └──────┘ │  │
//! │  │                                                           │  │
//! │  │  NO I/O • NO CLOCK READS • PURE FUNCTIONS                 │  │
//! │  └───────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain entities (Product, InventoryItem, PurchaseOrder, …)
//! - [`money`] - Integer-cents money (no floating point!)
//! - [`status`] - Inventory status derivation and expiry windows
//! - [`stats`] - Dashboard aggregation (pure projection)
//! - [`transitions`] - Guarded status machines
//! - [`access`] - Role/branch read filtering
//! - [`alerts`] - Alert construction rules
//! - [`validation`] - Field validation
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: every function takes its "now" as a parameter
//! 2. **No I/O**: database, network, file system access is FORBIDDEN here
//! 3. **Integer money**: all monetary values are cents (i64)
//! 4. **Explicit errors**: typed enums, never strings or panics

pub mod access;
pub mod alerts;
pub mod error;
pub mod money;
pub mod stats;
pub mod status;
pub mod transitions;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use stats::{compute_stats, BranchStats, DashboardStats};
pub use status::{days_until_expiry, derive_status, is_expiring_soon, EXPIRING_SOON_DAYS};
pub use types::*;
