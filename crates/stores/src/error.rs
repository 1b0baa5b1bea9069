use common::ProductId;
use thiserror::Error;

/// Errors raised by the store layer.
///
/// These are collaborator failures, distinct from the domain errors in the
/// fulfillment crate; the orchestrator maps all of them to its generic
/// storage failure and guarantees the enclosing transaction rolled back.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing store could not be reached or refused the operation.
    #[error("storage unavailable: {reason}")]
    Unavailable { reason: String },

    /// A stock adjustment would take a product's stock below zero.
    ///
    /// The ledger checks availability before adjusting, so hitting this
    /// indicates a logic error upstream, like a database CHECK constraint
    /// firing.
    #[error("stock constraint violated for product {product_id}")]
    StockConstraint { product_id: ProductId },

    /// A stock adjustment referenced a product the store does not know.
    #[error("unknown product: {product_id}")]
    UnknownProduct { product_id: ProductId },
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
