//! Order status state machine.

use serde::{Deserialize, Serialize};

/// The status of an order in its lifecycle.
///
/// Transitions:
/// ```text
/// Pending ──► Confirmed ──► Processing ──► Shipped ──► Delivered
///    │            │             │             │            │
///    └────────────┴─────────────┴──► Cancelled│            │
///                                             └──► Returned ◄──┘
/// ```
///
/// `Pending → Confirmed` is driven by payment creation and
/// `Confirmed → Processing` by payment completion; `Shipped`, `Delivered`
/// and `Returned` are recorded from external fulfillment events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderStatus {
    /// Order created, awaiting payment.
    #[default]
    Pending,

    /// A payment exists for the order.
    Confirmed,

    /// Payment completed, order is being fulfilled.
    Processing,

    /// Handed to the carrier.
    Shipped,

    /// Received by the customer.
    Delivered,

    /// Order was cancelled; stock has been restored.
    Cancelled,

    /// Order was returned after shipment.
    Returned,
}

impl OrderStatus {
    /// Returns true if the transition from `self` to `to` is legal.
    pub fn can_transition_to(self, to: OrderStatus) -> bool {
        use OrderStatus::*;
        matches!(
            (self, to),
            (Pending, Confirmed)
                | (Confirmed, Processing)
                | (Pending | Confirmed | Processing, Cancelled)
                | (Processing, Shipped)
                | (Shipped, Delivered)
                | (Shipped | Delivered, Returned)
        )
    }

    /// Returns true if an order in this status can still be cancelled.
    ///
    /// Shipped-and-beyond statuses are not reversible through cancellation.
    pub fn can_be_cancelled(self) -> bool {
        matches!(
            self,
            OrderStatus::Pending | OrderStatus::Confirmed | OrderStatus::Processing
        )
    }

    /// Returns true if no automatic transition originates from this status.
    ///
    /// `Delivered` still accepts the manual `Returned` event.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            OrderStatus::Cancelled | OrderStatus::Delivered | OrderStatus::Returned
        )
    }

    /// Returns the status name as a string.
    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Confirmed => "Confirmed",
            OrderStatus::Processing => "Processing",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
            OrderStatus::Returned => "Returned",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [OrderStatus; 7] = [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::Processing,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
        OrderStatus::Returned,
    ];

    #[test]
    fn default_status_is_pending() {
        assert_eq!(OrderStatus::default(), OrderStatus::Pending);
    }

    #[test]
    fn happy_path_transitions() {
        assert!(OrderStatus::Pending.can_transition_to(OrderStatus::Confirmed));
        assert!(OrderStatus::Confirmed.can_transition_to(OrderStatus::Processing));
        assert!(OrderStatus::Processing.can_transition_to(OrderStatus::Shipped));
        assert!(OrderStatus::Shipped.can_transition_to(OrderStatus::Delivered));
    }

    #[test]
    fn cancellation_only_from_cancellable_set() {
        assert!(OrderStatus::Pending.can_transition_to(OrderStatus::Cancelled));
        assert!(OrderStatus::Confirmed.can_transition_to(OrderStatus::Cancelled));
        assert!(OrderStatus::Processing.can_transition_to(OrderStatus::Cancelled));
        assert!(!OrderStatus::Shipped.can_transition_to(OrderStatus::Cancelled));
        assert!(!OrderStatus::Delivered.can_transition_to(OrderStatus::Cancelled));
        assert!(!OrderStatus::Cancelled.can_transition_to(OrderStatus::Cancelled));
        assert!(!OrderStatus::Returned.can_transition_to(OrderStatus::Cancelled));
    }

    #[test]
    fn returns_only_after_shipment() {
        assert!(OrderStatus::Shipped.can_transition_to(OrderStatus::Returned));
        assert!(OrderStatus::Delivered.can_transition_to(OrderStatus::Returned));
        assert!(!OrderStatus::Pending.can_transition_to(OrderStatus::Returned));
        assert!(!OrderStatus::Processing.can_transition_to(OrderStatus::Returned));
        assert!(!OrderStatus::Cancelled.can_transition_to(OrderStatus::Returned));
    }

    #[test]
    fn no_skipping_ahead() {
        assert!(!OrderStatus::Pending.can_transition_to(OrderStatus::Processing));
        assert!(!OrderStatus::Pending.can_transition_to(OrderStatus::Shipped));
        assert!(!OrderStatus::Confirmed.can_transition_to(OrderStatus::Shipped));
        assert!(!OrderStatus::Processing.can_transition_to(OrderStatus::Delivered));
    }

    #[test]
    fn no_moving_backwards() {
        assert!(!OrderStatus::Confirmed.can_transition_to(OrderStatus::Pending));
        assert!(!OrderStatus::Processing.can_transition_to(OrderStatus::Confirmed));
        assert!(!OrderStatus::Delivered.can_transition_to(OrderStatus::Shipped));
    }

    #[test]
    fn nothing_leaves_cancelled_or_returned() {
        for to in ALL {
            assert!(!OrderStatus::Cancelled.can_transition_to(to));
            assert!(!OrderStatus::Returned.can_transition_to(to));
        }
    }

    #[test]
    fn cancellable_set() {
        assert!(OrderStatus::Pending.can_be_cancelled());
        assert!(OrderStatus::Confirmed.can_be_cancelled());
        assert!(OrderStatus::Processing.can_be_cancelled());
        assert!(!OrderStatus::Shipped.can_be_cancelled());
        assert!(!OrderStatus::Delivered.can_be_cancelled());
        assert!(!OrderStatus::Cancelled.can_be_cancelled());
        assert!(!OrderStatus::Returned.can_be_cancelled());
    }

    #[test]
    fn terminal_statuses() {
        assert!(OrderStatus::Cancelled.is_terminal());
        assert!(OrderStatus::Delivered.is_terminal());
        assert!(OrderStatus::Returned.is_terminal());
        assert!(!OrderStatus::Pending.is_terminal());
        assert!(!OrderStatus::Shipped.is_terminal());
    }

    #[test]
    fn display() {
        assert_eq!(OrderStatus::Pending.to_string(), "Pending");
        assert_eq!(OrderStatus::Returned.to_string(), "Returned");
    }

    #[test]
    fn serialization_roundtrip() {
        let status = OrderStatus::Processing;
        let json = serde_json::to_string(&status).unwrap();
        let deserialized: OrderStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(status, deserialized);
    }
}
