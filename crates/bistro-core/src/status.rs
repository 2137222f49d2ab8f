//! # Order Status Machine
//!
//! ```text
//!  PENDING ──► IN_PREPARATION ──► READY ──► SERVED
//!     │              │              │         │
//!     └──────────────┴──────────────┴─────────┴──► CANCELLED
//! ```
//!
//! The table is a `match` over every status, so adding a status fails to
//! compile until its outgoing edges are declared.
//!
//! SERVED → CANCELLED is allowed (cancel after service, e.g. a comped
//! meal). CANCELLED has no outgoing edges.

use crate::error::{CoreError, CoreResult};
use crate::types::OrderStatus;

impl OrderStatus {
    /// Statuses reachable from `self` in one step.
    pub const fn allowed_transitions(&self) -> &'static [OrderStatus] {
        match self {
            OrderStatus::Pending => &[OrderStatus::InPreparation, OrderStatus::Cancelled],
            OrderStatus::InPreparation => &[OrderStatus::Ready, OrderStatus::Cancelled],
            OrderStatus::Ready => &[OrderStatus::Served, OrderStatus::Cancelled],
            OrderStatus::Served => &[OrderStatus::Cancelled],
            OrderStatus::Cancelled => &[],
        }
    }

    /// Whether `self → target` is in the transition table.
    pub fn can_transition_to(&self, target: OrderStatus) -> bool {
        self.allowed_transitions().contains(&target)
    }

    /// Validates `self → target`.
    ///
    /// ## Errors
    /// `InvalidTransition` naming both statuses when the edge is missing.
    pub fn transition_to(&self, target: OrderStatus) -> CoreResult<OrderStatus> {
        if self.can_transition_to(target) {
            Ok(target)
        } else {
            Err(CoreError::InvalidTransition {
                from: *self,
                to: target,
            })
        }
    }

    /// Entering this status frees the order's table.
    pub const fn releases_table(&self) -> bool {
        matches!(self, OrderStatus::Served | OrderStatus::Cancelled)
    }

    /// The order still holds its table.
    pub const fn is_open(&self) -> bool {
        !self.releases_table()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use OrderStatus::*;

    #[test]
    fn test_transition_table() {
        let expected: [(OrderStatus, &[OrderStatus]); 5] = [
            (Pending, &[InPreparation, Cancelled]),
            (InPreparation, &[Ready, Cancelled]),
            (Ready, &[Served, Cancelled]),
            (Served, &[Cancelled]),
            (Cancelled, &[]),
        ];
        for (from, allowed) in expected {
            for to in OrderStatus::ALL {
                assert_eq!(
                    from.can_transition_to(to),
                    allowed.contains(&to),
                    "{from} -> {to}"
                );
            }
        }
    }

    #[test]
    fn test_pending_to_ready_rejected() {
        let err = Pending.transition_to(Ready).unwrap_err();
        assert!(matches!(
            err,
            CoreError::InvalidTransition { from: Pending, to: Ready }
        ));
        assert_eq!(Pending.transition_to(InPreparation).unwrap(), InPreparation);
    }

    #[test]
    fn test_served_can_still_be_cancelled() {
        assert!(Served.can_transition_to(Cancelled));
        assert!(!Served.can_transition_to(Ready));
    }

    #[test]
    fn test_no_self_transitions() {
        for status in OrderStatus::ALL {
            assert!(!status.can_transition_to(status));
        }
    }

    #[test]
    fn test_releases_table() {
        assert!(Served.releases_table());
        assert!(Cancelled.releases_table());
        assert!(Pending.is_open());
        assert!(InPreparation.is_open());
        assert!(Ready.is_open());
    }
}
