//! # Alert Construction Rules
//!
//! Pure rules for turning derived events into [`Alert`] values. Nothing
//! here touches the store: id assignment and persistence belong to the
//! mutation layer, which passes the id and "now" in.
//!
//! Two sources of alerts exist, and only two:
//! 1. Order creation — every new purchase order yields exactly one alert.
//! 2. Inventory scans — expired / expiring-soon / low-stock batches.

use chrono::{DateTime, Utc};

use crate::status::{days_until_expiry, is_expiring_soon};
use crate::types::{
    Alert, AlertType, InventoryItem, InventoryStatus, OrderKind, Product, PurchaseOrder, Severity,
};

// =============================================================================
// Order Creation
// =============================================================================

/// Builds the single alert that accompanies a newly created purchase
/// order.
///
/// Always type `missing_product`, severity `medium`. The alert's location
/// and wording branch on the order kind: a distribution notifies its
/// destination branch, a restock request notifies the central kitchen
/// about its origin branch, and an external supplier order notifies the
/// central kitchen about itself.
///
/// `origin_name` is the resolved display name of the branch the message
/// references ("Olaya"), or "Central Kitchen" for supplier orders.
pub fn order_created_alert(
    id: impl Into<String>,
    order: &PurchaseOrder,
    origin_name: &str,
    now: DateTime<Utc>,
) -> Alert {
    let (title, message) = match &order.kind {
        OrderKind::Distribution { .. } => (
            "New Distribution Created".to_string(),
            format!("New distribution to {origin_name} has been created"),
        ),
        OrderKind::BranchRestock { .. } | OrderKind::Supplier { .. } => (
            "New Order Created".to_string(),
            format!("New order from {origin_name} requires approval"),
        ),
    };

    Alert {
        id: id.into(),
        alert_type: AlertType::MissingProduct,
        title,
        message,
        severity: Severity::Medium,
        location: order.kind.alert_location(),
        is_read: false,
        created_at: now,
    }
}

// =============================================================================
// Inventory Scan
// =============================================================================

/// Builds at most one alert for an inventory batch.
///
/// Precedence per batch: expired > expiring soon > low stock. A batch can
/// be both low on quantity and near expiry; the nearer-term problem wins.
///
/// `location_name` is the resolved display name of the batch's location.
pub fn inventory_alert(
    id: impl Into<String>,
    item: &InventoryItem,
    product: &Product,
    location_name: &str,
    now: DateTime<Utc>,
) -> Option<Alert> {
    let (alert_type, severity, title, message) = if item.status == InventoryStatus::Expired {
        (
            AlertType::Expired,
            Severity::High,
            "Expired Product Alert".to_string(),
            format!(
                "{} (Batch: {}) has expired at {}. Immediate removal required.",
                product.name, item.batch_number, location_name
            ),
        )
    } else if is_expiring_soon(item, now) {
        let days = days_until_expiry(item, now);
        let severity = if days <= 1 { Severity::High } else { Severity::Medium };
        (
            AlertType::ExpiringSoon,
            severity,
            "Product Expiring Soon".to_string(),
            format!(
                "{} (Batch: {}) will expire in {} day{} at {}",
                product.name,
                item.batch_number,
                days,
                if days == 1 { "" } else { "s" },
                location_name
            ),
        )
    } else if item.status == InventoryStatus::LowStock {
        (
            AlertType::LowStock,
            Severity::Medium,
            format!("Low Stock Alert - {}", product.name),
            format!(
                "{} stock is low at {} ({} {} remaining, minimum required: {} {})",
                product.name,
                location_name,
                item.quantity,
                product.unit,
                product.min_stock,
                product.unit
            ),
        )
    } else {
        return None;
    };

    Some(Alert {
        id: id.into(),
        alert_type,
        title,
        message,
        severity,
        location: item.location.clone(),
        is_read: false,
        created_at: now,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
