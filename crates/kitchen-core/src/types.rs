//! # Domain Types
//!
//! Core domain types for KitchenHub.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                          Domain Types                               │
//! │                                                                     │
//! │  ┌───────────────┐  ┌────────────────┐  ┌──────────────────┐       │
//! │  │   Product     │  │ InventoryItem  │  │  PurchaseOrder   │       │
//! │  │ ───────────── │  │ ────────────── │  │ ──────────────── │       │
//! │  │ id (UUID)     │  │ id (UUID)      │  │ id (UUID)        │       │
//! │  │ cost (Money)  │  │ batch_number   │  │ kind (OrderKind) │       │
//! │  │ min/max stock │  │ location       │  │ items, total     │       │
//! │  │ shelf life    │  │ status derived │  │ status machine   │       │
//! │  └───────────────┘  └────────────────┘  └──────────────────┘       │
//! │                                                                     │
//! │  Recipe · ProductionPlan · Distribution · Supplier · Alert ·        │
//! │  Branch · User                                                      │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Every entity has a UUID v4 string `id`, immutable for its lifetime.
//! Relations are by id only; places are addressed through [`Location`],
//! never by display name.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::money::Money;

// =============================================================================
// Location
// =============================================================================

/// Where stock physically sits, or where an event happened.
///
/// The central kitchen is the sole supply hub; every other location is a
/// retail branch referenced by its surrogate id. Using a tagged enum here
/// (rather than raw branch names) makes "no such location" unrepresentable
/// once the branch id is validated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Location {
    /// The central production/supply hub.
    CentralKitchen,
    /// A retail branch, by branch id.
    Branch(String),
}

impl Location {
    /// Returns the branch id if this is a branch location.
    pub fn branch_id(&self) -> Option<&str> {
        match self {
            Location::CentralKitchen => None,
            Location::Branch(id) => Some(id),
        }
    }

    /// Checks whether this location is the given branch.
    pub fn is_branch(&self, branch_id: &str) -> bool {
        matches!(self, Location::Branch(id) if id == branch_id)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::CentralKitchen => write!(f, "Central Kitchen"),
            Location::Branch(id) => write!(f, "branch {id}"),
        }
    }
}

// =============================================================================
// Product
// =============================================================================

/// A catalog product: an ingredient or good the kitchen stocks.
///
/// Products are referenced by inventory batches, recipes, order lines, and
/// distributions. Edits are explicit; nothing mutates a product as a side
/// effect of stock movements.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name ("Chicken Breast").
    pub name: String,

    /// Free-form category ("Meat", "Vegetables", "Spices").
    pub category: String,

    /// Unit of measure ("kg", "L").
    pub unit: String,

    /// Reference unit cost.
    pub cost: Money,

    /// Reorder threshold: at or below this, stock is low.
    pub min_stock: i64,

    /// Storage ceiling in the same unit.
    pub max_stock: i64,

    /// Shelf life in days from receipt.
    pub expiration_days: i64,

    /// Optional description.
    pub description: Option<String>,

    /// When the product was created.
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Recipe
// =============================================================================

/// One ingredient line of a recipe.
///
/// Quantity is fractional (0.2 kg of chicken per serving); ingredient
/// quantities never enter money math.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeIngredient {
    /// Must reference an existing [`Product`]; enforced on create/update.
    pub product_id: String,
    pub quantity: f64,
    pub unit: String,
}

/// A prepared dish with its ingredient list and method.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Ordered ingredient list.
    pub ingredients: Vec<RecipeIngredient>,
    /// Prep time in minutes.
    pub preparation_minutes: i64,
    /// Cooking time in minutes.
    pub cooking_minutes: i64,
    pub servings: i64,
    /// Step-by-step instructions, in order.
    pub instructions: Vec<String>,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Inventory
// =============================================================================

/// Derived stock status of an inventory batch.
///
/// Never set by callers: [`crate::status::derive_status`] computes it on
/// every write, and a refresh scan re-derives it as time passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InventoryStatus {
    Available,
    LowStock,
    Expired,
    OutOfStock,
}

impl fmt::Display for InventoryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            InventoryStatus::Available => "available",
            InventoryStatus::LowStock => "low_stock",
            InventoryStatus::Expired => "expired",
            InventoryStatus::OutOfStock => "out_of_stock",
        };
        f.write_str(s)
    }
}

/// A distinct received lot of a product, with its own expiry and cost.
///
/// ## Invariants
/// - `quantity >= 0`
/// - `expiration_date >= received_date` at creation
/// - `status` is derived, not caller-assigned
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryItem {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// The catalog product this batch holds.
    pub product_id: String,

    /// On-hand quantity in the product's unit.
    pub quantity: i64,

    /// Where the batch sits.
    pub location: Location,

    /// Lot number, unique per receipt ("CK-001-240115").
    pub batch_number: String,

    pub expiration_date: DateTime<Utc>,
    pub received_date: DateTime<Utc>,

    /// Supplier the batch was received from.
    pub supplier_id: String,

    /// Unit cost at receipt. Frozen: later catalog price edits do not
    /// revalue batches already on the shelf.
    pub cost: Money,

    /// Derived status (see [`crate::status`]).
    pub status: InventoryStatus,

    /// Bumped on every update; hook for optimistic concurrency.
    pub version: i64,
}

impl InventoryItem {
    /// Valuation of this batch: quantity × cost at receipt.
    #[inline]
    pub fn value(&self) -> Money {
        self.cost.times(self.quantity)
    }
}

// =============================================================================
// Production
// =============================================================================

/// Status of a production plan.
///
/// The only status machine here that permits leaving a terminal-looking
/// state: `cancelled → planned` restarts a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanStatus {
    Planned,
    InProgress,
    Completed,
    Cancelled,
}

impl fmt::Display for PlanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PlanStatus::Planned => "planned",
            PlanStatus::InProgress => "in_progress",
            PlanStatus::Completed => "completed",
            PlanStatus::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

/// A scheduled batch-production run of a recipe at the central kitchen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductionPlan {
    pub id: String,
    pub recipe_id: String,
    /// Number of batches, >= 1.
    pub quantity: i64,
    pub scheduled_date: DateTime<Utc>,
    pub status: PlanStatus,
    /// Who scheduled the run.
    pub assigned_by: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Distribution
// =============================================================================

/// Status of a stock transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistributionStatus {
    Pending,
    InTransit,
    Delivered,
    Cancelled,
}

impl fmt::Display for DistributionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DistributionStatus::Pending => "pending",
            DistributionStatus::InTransit => "in_transit",
            DistributionStatus::Delivered => "delivered",
            DistributionStatus::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

/// A physical stock transfer between locations, typically central kitchen
/// to a branch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Distribution {
    pub id: String,
    pub product_id: String,
    pub from_location: Location,
    pub to_location: Location,
    pub quantity: i64,
    pub scheduled_date: DateTime<Utc>,
    /// Set exactly once, when the transfer is marked delivered.
    pub delivery_date: Option<DateTime<Utc>>,
    pub status: DistributionStatus,
    pub driver_name: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Supplier
// =============================================================================

/// Active/inactive flag shared by suppliers and branches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActiveStatus {
    Active,
    Inactive,
}

/// An external vendor the kitchen buys from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Supplier {
    pub id: String,
    pub name: String,
    pub contact_person: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    /// Product ids this supplier can deliver.
    pub products: Vec<String>,
    /// 0.0 – 5.0.
    pub rating: f64,
    pub status: ActiveStatus,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Purchase Orders
// =============================================================================

/// What kind of order this is, and which locations it ties together.
///
/// A tagged union rather than a supplier-id field with sentinel values:
/// each kind carries exactly the reference it needs, and matches must
/// handle all three.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OrderKind {
    /// Branch → central kitchen restock request.
    BranchRestock { from_branch: String },
    /// Central kitchen → branch distribution.
    Distribution { to_branch: String },
    /// Purchase from an external supplier.
    Supplier { supplier_id: String },
}

impl OrderKind {
    /// The location whose stock fulfils this order, if any.
    ///
    /// Restocks and distributions both draw from the central kitchen;
    /// supplier orders bring goods in from outside and check nothing.
    pub fn stock_source(&self) -> Option<Location> {
        match self {
            OrderKind::BranchRestock { .. } | OrderKind::Distribution { .. } => {
                Some(Location::CentralKitchen)
            }
            OrderKind::Supplier { .. } => None,
        }
    }

    /// Where the order-created alert belongs: the destination branch for a
    /// distribution, otherwise the originating location (central kitchen
    /// when no branch is involved).
    pub fn alert_location(&self) -> Location {
        match self {
            OrderKind::Distribution { to_branch } => Location::Branch(to_branch.clone()),
            OrderKind::BranchRestock { from_branch } => Location::Branch(from_branch.clone()),
            OrderKind::Supplier { .. } => Location::CentralKitchen,
        }
    }
}

/// Status of a purchase order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Draft,
    Pending,
    Approved,
    Received,
    Cancelled,
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OrderStatus::Draft => "draft",
            OrderStatus::Pending => "pending",
            OrderStatus::Approved => "approved",
            OrderStatus::Received => "received",
            OrderStatus::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

/// One line of a purchase order.
///
/// `total` is always `unit_price × quantity`; build lines through
/// [`OrderLine::new`] so the invariant holds by construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLine {
    pub product_id: String,
    pub quantity: i64,
    pub unit_price: Money,
    pub total: Money,
}

impl OrderLine {
    /// Creates a line with its total computed from quantity × unit price.
    pub fn new(product_id: impl Into<String>, quantity: i64, unit_price: Money) -> Self {
        OrderLine {
            product_id: product_id.into(),
            quantity,
            unit_price,
            total: unit_price.times(quantity),
        }
    }
}

/// A purchase order: branch restock request, central-kitchen distribution,
/// or external supplier purchase, depending on [`OrderKind`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseOrder {
    pub id: String,
    pub kind: OrderKind,
    pub items: Vec<OrderLine>,
    /// Σ line totals; recomputed by mutation logic, never trusted from
    /// callers.
    pub total: Money,
    pub status: OrderStatus,
    pub order_date: DateTime<Utc>,
    pub expected_delivery_date: DateTime<Utc>,
    /// Set when the order reaches `received`.
    pub actual_delivery_date: Option<DateTime<Utc>>,
    pub requested_by: Option<String>,
    pub approved_by: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Bumped on every update; hook for optimistic concurrency.
    pub version: i64,
}

impl PurchaseOrder {
    /// Σ of line totals.
    pub fn line_total(&self) -> Money {
        self.items.iter().map(|line| line.total).sum()
    }
}

// =============================================================================
// Alerts
// =============================================================================

/// What triggered an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertType {
    LowStock,
    Expired,
    ExpiringSoon,
    MissingProduct,
    DeliveryDelay,
}

/// How urgently someone should look at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

/// A system-generated notification.
///
/// Alerts are created only by derived events (order creation, inventory
/// scans); the single permitted edit afterwards is marking one read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    pub id: String,
    pub alert_type: AlertType,
    pub title: String,
    pub message: String,
    pub severity: Severity,
    pub location: Location,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Branch
// =============================================================================

/// Daily opening hours, `HH:MM` strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpeningHours {
    pub open: String,
    pub close: String,
}

/// A retail location fed by the central kitchen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Branch {
    /// Unique identifier (UUID v4). All stock and order relations use this
    /// id, never the display name.
    pub id: String,
    pub name: String,
    pub address: String,
    pub phone: String,
    /// Manager's display name.
    pub manager: String,
    pub status: ActiveStatus,
    pub opening_hours: OpeningHours,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Users & Roles
// =============================================================================

/// What a user is allowed to see and do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Sees and manages everything, across all locations.
    MainManager,
    /// Scoped to a single branch's inventory, alerts, and orders.
    BranchManager,
}

/// An operator of the system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    /// Required iff `role` is `BranchManager`.
    pub branch_id: Option<String>,
}

impl User {
    /// The branch a branch manager is scoped to.
    pub fn branch_id(&self) -> Option<&str> {
        self.branch_id.as_deref()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_line_total_by_construction() {
        let line = OrderLine::new("prod-1", 20, Money::from_cents(2550));
        assert_eq!(line.total.cents(), 51_000);
    }

    #[test]
    fn test_order_kind_stock_source() {
        let restock = OrderKind::BranchRestock {
            from_branch: "b1".to_string(),
        };
        let supplier = OrderKind::Supplier {
            supplier_id: "s1".to_string(),
        };
        assert_eq!(restock.stock_source(), Some(Location::CentralKitchen));
        assert_eq!(supplier.stock_source(), None);
    }

    #[test]
    fn test_order_kind_alert_location() {
        let dist = OrderKind::Distribution {
            to_branch: "b2".to_string(),
        };
        assert_eq!(dist.alert_location(), Location::Branch("b2".to_string()));

        let supplier = OrderKind::Supplier {
            supplier_id: "s1".to_string(),
        };
        assert_eq!(supplier.alert_location(), Location::CentralKitchen);
    }

    #[test]
    fn test_location_roundtrip() {
        let loc = Location::Branch("b1".to_string());
        let json = serde_json::to_string(&loc).unwrap();
        let back: Location = serde_json::from_str(&json).unwrap();
        assert_eq!(loc, back);
    }

    #[test]
    fn test_inventory_value() {
        let item = InventoryItem {
            id: "i1".to_string(),
            product_id: "p1".to_string(),
            quantity: 45,
            location: Location::CentralKitchen,
            batch_number: "CK-001".to_string(),
            expiration_date: Utc::now(),
            received_date: Utc::now(),
            supplier_id: "s1".to_string(),
            cost: Money::from_cents(2550),
            status: InventoryStatus::Available,
            version: 0,
        };
        assert_eq!(item.value().cents(), 114_750);
    }
}
