//! # Status Machines
//!
//! Legality tables for every status transition in the system, expressed as
//! `(current, requested) → Result<new, InvalidTransition>`.
//!
//! Enforced in the data layer, not left to whatever buttons a UI shows:
//! the store refuses illegal transitions, so no caller can corrupt an
//! order's lifecycle.
//!
//! ## Lifecycles
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  PurchaseOrder                                                  │
//! │    draft ──► pending ──► approved ──► received (terminal)       │
//! │      │          │                                               │
//! │      └──────────┴──► cancelled (terminal)                       │
//! │                                                                 │
//! │  Distribution                                                   │
//! │    pending ──► in_transit ──► delivered (terminal)              │
//! │      │            │                                             │
//! │      └────────────┴──► cancelled (terminal)                     │
//! │                                                                 │
//! │  ProductionPlan                                                 │
//! │    planned ──► in_progress ──► completed (terminal)             │
//! │      ▲  │          │                                            │
//! │      │  │          └──► planned (pause)                         │
//! │      │  └──► cancelled ──► planned (restart!)                   │
//! │      └──────────┘                                               │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The production-plan restart (`cancelled → planned`) is the one
//! deliberate exit from a terminal-looking state.

use crate::error::{CoreError, CoreResult};
use crate::types::{DistributionStatus, OrderStatus, PlanStatus};

/// Validates a purchase-order status transition.
///
/// `received` and `cancelled` are terminal.
pub fn order_transition(from: OrderStatus, to: OrderStatus) -> CoreResult<OrderStatus> {
    use OrderStatus::*;
    let legal = matches!(
        (from, to),
        (Draft, Pending) | (Draft, Cancelled) | (Pending, Approved) | (Pending, Cancelled) | (Approved, Received)
    );
    if legal {
        Ok(to)
    } else {
        Err(CoreError::InvalidTransition {
            entity: "PurchaseOrder",
            from: from.to_string(),
            to: to.to_string(),
        })
    }
}

/// Validates a distribution status transition.
///
/// Marking `delivered` obliges the caller to stamp the delivery date; the
/// store does that, this table only rules on legality.
pub fn distribution_transition(
    from: DistributionStatus,
    to: DistributionStatus,
) -> CoreResult<DistributionStatus> {
    use DistributionStatus::*;
    let legal = matches!(
        (from, to),
        (Pending, InTransit) | (Pending, Cancelled) | (InTransit, Delivered) | (InTransit, Cancelled)
    );
    if legal {
        Ok(to)
    } else {
        Err(CoreError::InvalidTransition {
            entity: "Distribution",
            from: from.to_string(),
            to: to.to_string(),
        })
    }
}

/// Validates a production-plan status transition.
///
/// `in_progress → planned` pauses a run; `cancelled → planned` restarts
/// one. Only `completed` is truly terminal.
pub fn plan_transition(from: PlanStatus, to: PlanStatus) -> CoreResult<PlanStatus> {
    use PlanStatus::*;
    let legal = matches!(
        (from, to),
        (Planned, InProgress)
            | (Planned, Cancelled)
            | (InProgress, Completed)
            | (InProgress, Planned)
            | (Cancelled, Planned)
    );
    if legal {
        Ok(to)
    } else {
        Err(CoreError::InvalidTransition {
            entity: "ProductionPlan",
            from: from.to_string(),
            to: to.to_string(),
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_happy_path() {
        assert!(order_transition(OrderStatus::Draft, OrderStatus::Pending).is_ok());
        assert!(order_transition(OrderStatus::Pending, OrderStatus::Approved).is_ok());
        assert!(order_transition(OrderStatus::Approved, OrderStatus::Received).is_ok());
    }

    #[test]
    fn test_order_received_is_terminal() {
        for to in [
            OrderStatus::Draft,
            OrderStatus::Pending,
            OrderStatus::Approved,
            OrderStatus::Cancelled,
        ] {
            let err = order_transition(OrderStatus::Received, to).unwrap_err();
            assert!(matches!(err, CoreError::InvalidTransition { .. }));
        }
    }

    #[test]
    fn test_order_cannot_skip_approval() {
        assert!(order_transition(OrderStatus::Pending, OrderStatus::Received).is_err());
    }

    #[test]
    fn test_distribution_happy_path() {
        assert!(
            distribution_transition(DistributionStatus::Pending, DistributionStatus::InTransit)
                .is_ok()
        );
        assert!(
            distribution_transition(DistributionStatus::InTransit, DistributionStatus::Delivered)
                .is_ok()
        );
    }

    #[test]
    fn test_distribution_cannot_deliver_from_pending() {
        assert!(
            distribution_transition(DistributionStatus::Pending, DistributionStatus::Delivered)
                .is_err()
        );
    }

    #[test]
    fn test_plan_pause_and_restart() {
        // Pause.
        assert!(plan_transition(PlanStatus::InProgress, PlanStatus::Planned).is_ok());
        // Restart out of cancelled: explicitly allowed.
        assert!(plan_transition(PlanStatus::Cancelled, PlanStatus::Planned).is_ok());
    }

    #[test]
    fn test_plan_completed_is_terminal() {
        for to in [PlanStatus::Planned, PlanStatus::InProgress, PlanStatus::Cancelled] {
            assert!(plan_transition(PlanStatus::Completed, to).is_err());
        }
    }

    #[test]
    fn test_self_transitions_rejected() {
        assert!(order_transition(OrderStatus::Pending, OrderStatus::Pending).is_err());
        assert!(plan_transition(PlanStatus::Planned, PlanStatus::Planned).is_err());
    }
}
