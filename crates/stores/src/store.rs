use async_trait::async_trait;
use common::{OrderId, OrderNumber, PaymentId, ProductId};
use domain::{Order, Payment};

use crate::{ProductRecord, Result};

/// Factory for atomic units of work over the three collaborator stores.
///
/// All implementations must be thread-safe (Send + Sync); multiple request
/// handlers begin transactions concurrently.
#[async_trait]
pub trait Stores: Send + Sync {
    /// The transactional view produced by [`Stores::begin`].
    type Tx: StoreTx;

    /// Opens a transaction spanning the product, order and payment stores.
    async fn begin(&self) -> Result<Self::Tx>;
}

/// A transactional view over the product, order and payment stores.
///
/// Reads observe earlier writes made through the same transaction
/// (read-your-writes). Nothing becomes visible to other transactions until
/// [`StoreTx::commit`]; dropping the transaction without committing
/// discards every staged write, which is how rollback happens.
#[async_trait]
pub trait StoreTx: Send {
    // Product store

    /// Reads a product record.
    async fn product(&mut self, id: &ProductId) -> Result<Option<ProductRecord>>;

    /// Applies a stock delta (negative to reserve, positive to restore).
    ///
    /// The store enforces that stock never drops below zero; callers check
    /// availability first and treat a violation here as a logic error.
    async fn adjust_stock(&mut self, id: &ProductId, delta: i64) -> Result<()>;

    // Order store

    /// Reads an order by its internal id.
    async fn order(&mut self, id: OrderId) -> Result<Option<Order>>;

    /// Reads an order by its user-facing number.
    async fn order_by_number(&mut self, number: &OrderNumber) -> Result<Option<Order>>;

    /// Stages an order write (insert or update by id).
    async fn save_order(&mut self, order: &Order) -> Result<()>;

    // Payment store

    /// Reads a payment by id.
    async fn payment(&mut self, id: PaymentId) -> Result<Option<Payment>>;

    /// Reads the payment linked to an order, if one exists.
    async fn payment_for_order(&mut self, order_id: OrderId) -> Result<Option<Payment>>;

    /// Stages a payment write (insert or update by id).
    async fn save_payment(&mut self, payment: &Payment) -> Result<()>;

    /// Reads all payments. Supports derived read queries such as revenue.
    async fn payments(&mut self) -> Result<Vec<Payment>>;

    /// Atomically applies every staged write.
    async fn commit(self) -> Result<()>;
}
