//! Order aggregate implementation.

use chrono::{DateTime, Utc};
use common::{Money, OrderId, OrderNumber, PaymentId};
use serde::{Deserialize, Serialize};

use super::{OrderError, OrderItem, OrderStatus};

/// Order aggregate root.
///
/// Owns its line items exclusively and references its payment by id only.
/// Status changes go through [`Order::transition`], which consults the
/// [`OrderStatus`] transition table; the total amount always equals the sum
/// of the item subtotals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,

    /// User-facing order number, unique across orders.
    number: OrderNumber,

    /// Line items in insertion order.
    items: Vec<OrderItem>,

    status: OrderStatus,

    /// Sum of item subtotals.
    total_amount: Money,

    /// Set once, when a payment is created for this order.
    payment_id: Option<PaymentId>,

    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

// Query methods
impl Order {
    /// Returns the internal order ID.
    pub fn id(&self) -> OrderId {
        self.id
    }

    /// Returns the user-facing order number.
    pub fn number(&self) -> &OrderNumber {
        &self.number
    }

    /// Returns the line items in insertion order.
    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    /// Returns the number of line items.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the order has at least one item.
    pub fn has_items(&self) -> bool {
        !self.items.is_empty()
    }

    /// Returns the current status.
    pub fn status(&self) -> OrderStatus {
        self.status
    }

    /// Returns the order total.
    pub fn total_amount(&self) -> Money {
        self.total_amount
    }

    /// Returns the id of the payment linked to this order, if any.
    pub fn payment_id(&self) -> Option<PaymentId> {
        self.payment_id
    }

    /// Returns the creation timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the last-modified timestamp.
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns true if the order can still be cancelled.
    pub fn can_be_cancelled(&self) -> bool {
        self.status.can_be_cancelled()
    }
}

// Command methods
impl Order {
    /// Creates a new empty order in `Pending` status.
    pub fn new(number: OrderNumber) -> Self {
        let now = Utc::now();
        Self {
            id: OrderId::new(),
            number,
            items: Vec::new(),
            status: OrderStatus::Pending,
            total_amount: Money::zero(),
            payment_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Appends a line item with a price snapshot.
    ///
    /// Items can only be added while the order is `Pending`; the quantity
    /// must be strictly positive.
    pub fn add_item(&mut self, item: OrderItem) -> Result<(), OrderError> {
        if self.status != OrderStatus::Pending {
            return Err(OrderError::ItemsLocked {
                status: self.status,
            });
        }
        if item.quantity == 0 {
            return Err(OrderError::InvalidQuantity {
                quantity: item.quantity,
            });
        }

        self.total_amount += item.subtotal();
        self.items.push(item);
        self.touch();
        Ok(())
    }

    /// Recomputes the order total from the current item subtotals.
    pub fn calculate_total(&mut self) {
        self.total_amount = self.items.iter().map(OrderItem::subtotal).sum();
    }

    /// Moves the order to `to` if the transition table allows it.
    pub fn transition(&mut self, to: OrderStatus) -> Result<(), OrderError> {
        if !self.status.can_transition_to(to) {
            return Err(OrderError::InvalidStateTransition {
                from: self.status,
                to,
            });
        }
        self.status = to;
        self.touch();
        Ok(())
    }

    /// Links a payment to this order. The link is set once and never
    /// changed afterwards.
    pub fn attach_payment(&mut self, payment_id: PaymentId) -> Result<(), OrderError> {
        if self.payment_id.is_some() {
            return Err(OrderError::PaymentAlreadyAttached);
        }
        self.payment_id = Some(payment_id);
        self.touch();
        Ok(())
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
