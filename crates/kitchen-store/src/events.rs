//! # Domain Events
//!
//! Events recorded by mutation operations and fanned out to subscribers
//! after the triggering write commits.
//!
//! ## Why an Event, Not an Inline Call?
//! The write commits first, then the event is handed to the alert
//! subscriber. The notification rule can be exercised (and replaced) on
//! its own, instead of being welded to the function that appends the
//! order.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  add_purchase_order()                                           │
//! │       │                                                         │
//! │       ├── 1. validate + stock check (may fail, store untouched) │
//! │       ├── 2. append order            ← the commit               │
//! │       ├── 3. record OrderCreated                                │
//! │       └── 4. dispatch: alert subscriber appends exactly one     │
//! │              missing_product alert                              │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};

use kitchen_core::{alerts, Alert, PurchaseOrder};

use crate::store::EntityStore;

/// Something that happened to the store and may interest subscribers.
#[derive(Debug, Clone)]
pub enum DomainEvent {
    /// A purchase order was created (any kind).
    OrderCreated { order: PurchaseOrder },
}

/// The alert subscriber: turns an event into the alert it implies, if
/// any. Resolution of branch display names happens here, against the
/// post-commit store.
pub(crate) fn alert_for_event(
    store: &EntityStore,
    event: &DomainEvent,
    alert_id: String,
    now: DateTime<Utc>,
) -> Option<Alert> {
    match event {
        DomainEvent::OrderCreated { order } => {
            let origin_name = store.location_name(&order.kind.alert_location());
            Some(alerts::order_created_alert(alert_id, order, &origin_name, now))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use kitchen_core::{AlertType, Location, Money, OrderKind, OrderLine, OrderStatus};

    #[test]
    fn test_order_created_yields_one_alert() {
        let now = Utc::now();
        let store = EntityStore::new();
        let order = PurchaseOrder {
            id: "o1".to_string(),
            kind: OrderKind::Supplier {
                supplier_id: "s1".to_string(),
            },
            items: vec![OrderLine::new("p1", 5, Money::from_cents(800))],
            total: Money::from_cents(4000),
            status: OrderStatus::Pending,
            order_date: now,
            expected_delivery_date: now + Duration::days(2),
            actual_delivery_date: None,
            requested_by: None,
            approved_by: None,
            notes: None,
            created_at: now,
            version: 0,
        };
        let event = DomainEvent::OrderCreated { order };
        let alert = alert_for_event(&store, &event, "a1".to_string(), now)
            .expect("order creation must alert");
        assert_eq!(alert.alert_type, AlertType::MissingProduct);
        assert_eq!(alert.location, Location::CentralKitchen);
    }
}
