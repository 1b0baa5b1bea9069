//! Fulfillment error taxonomy.

use common::{OrderId, PaymentId, ProductId};
use domain::{OrderError, PaymentError};
use stores::StoreError;
use thiserror::Error;

/// Errors returned by the fulfillment orchestrator.
///
/// Every variant is a typed failure, never an uncontrolled panic, and each
/// one implies the enclosing transaction was rolled back in full.
#[derive(Debug, Error)]
pub enum FulfillmentError {
    /// A requested quantity exceeds the product's available stock.
    /// Recoverable by the caller; never partially applied.
    #[error(
        "insufficient stock for product {product_id}: requested {requested}, available {available}"
    )]
    InsufficientStock {
        product_id: ProductId,
        requested: u32,
        available: i64,
    },

    /// A requested product does not exist in the product store.
    #[error("product not found: {product_id}")]
    ProductNotFound { product_id: ProductId },

    /// The caller supplied an unknown order id.
    #[error("order not found: {0}")]
    OrderNotFound(OrderId),

    /// The caller supplied an unknown payment id.
    #[error("payment not found: {0}")]
    PaymentNotFound(PaymentId),

    /// A second payment was attempted for an order that already has one.
    #[error("order {order_id} already has a payment")]
    DuplicatePayment { order_id: OrderId },

    /// An internal invariant would be violated; indicates a logic bug
    /// upstream and is surfaced rather than silently coerced.
    #[error("inconsistent state: {reason}")]
    InconsistentState { reason: String },

    /// An order aggregate rejected the operation (invalid transition,
    /// empty order, bad quantity).
    #[error(transparent)]
    Order(#[from] OrderError),

    /// A payment aggregate rejected the operation.
    #[error(transparent)]
    Payment(#[from] PaymentError),

    /// A collaborator store failed; distinct from the domain errors above.
    #[error("storage unavailable: {0}")]
    Storage(#[from] StoreError),
}

/// Result type for fulfillment operations.
pub type Result<T> = std::result::Result<T, FulfillmentError>;
