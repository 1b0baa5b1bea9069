//! The fulfillment orchestrator.

use chrono::Utc;
use common::{Money, OrderId, OrderNumber, PaymentId, ProductId};
use domain::{
    Order, OrderError, OrderItem, OrderStatus, Payment, PaymentMethod, PaymentStatus,
};
use serde::{Deserialize, Serialize};
use stores::{StoreTx, Stores};

use crate::config::{Config, FailedPaymentPolicy};
use crate::error::{FulfillmentError, Result};
use crate::ledger;

/// A requested line in a new order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLine {
    pub product_id: ProductId,
    pub quantity: u32,
}

impl OrderLine {
    /// Creates a new order line.
    pub fn new(product_id: impl Into<ProductId>, quantity: u32) -> Self {
        Self {
            product_id: product_id.into(),
            quantity,
        }
    }
}

/// Orchestrates the transactional order and payment use cases.
///
/// Owns the transaction boundary: every operation begins one unit of work
/// on the backend, performs all of its reads, checks and writes through it,
/// and commits at the end. Any typed failure on the way out means the unit
/// was discarded and every entity is exactly as it was before the call.
pub struct FulfillmentService<S: Stores> {
    stores: S,
    config: Config,
}

impl<S: Stores> FulfillmentService<S> {
    /// Creates a service with the default configuration.
    pub fn new(stores: S) -> Self {
        Self::with_config(stores, Config::default())
    }

    /// Creates a service with an explicit configuration.
    pub fn with_config(stores: S, config: Config) -> Self {
        Self { stores, config }
    }

    /// Creates an order from the requested lines.
    ///
    /// All-or-nothing: if any line's quantity exceeds the product's
    /// available stock, no stock is taken and no order is persisted. Unit
    /// prices are snapshotted from the product store at this moment and
    /// never re-read afterwards.
    #[tracing::instrument(skip(self))]
    pub async fn create_order(&self, lines: Vec<OrderLine>) -> Result<Order> {
        if lines.is_empty() {
            return Err(OrderError::NoItems.into());
        }

        let mut tx = self.stores.begin().await?;
        let mut order = Order::new(OrderNumber::generate());

        // Price and validate in request order; items keep insertion order.
        for line in &lines {
            let record = tx.product(&line.product_id).await?.ok_or_else(|| {
                FulfillmentError::ProductNotFound {
                    product_id: line.product_id.clone(),
                }
            })?;
            if !ledger::check_available(&record, line.quantity) {
                metrics::counter!("insufficient_stock_total").increment(1);
                return Err(FulfillmentError::InsufficientStock {
                    product_id: line.product_id.clone(),
                    requested: line.quantity,
                    available: record.available_stock(),
                });
            }
            order.add_item(OrderItem::new(
                line.product_id.clone(),
                line.quantity,
                record.unit_price,
            ))?;
        }
        order.calculate_total();

        ledger::decrease_all(&mut tx, order.items()).await?;
        tx.save_order(&order).await?;
        tx.commit().await?;

        metrics::counter!("orders_created_total").increment(1);
        tracing::info!(
            order_id = %order.id(),
            number = %order.number(),
            total = %order.total_amount(),
            "order created"
        );
        Ok(order)
    }

    /// Cancels an order and restores each item's stock in full.
    #[tracing::instrument(skip(self))]
    pub async fn cancel_order(&self, order_id: OrderId) -> Result<Order> {
        let mut tx = self.stores.begin().await?;
        let mut order = tx
            .order(order_id)
            .await?
            .ok_or(FulfillmentError::OrderNotFound(order_id))?;

        order.transition(OrderStatus::Cancelled)?;
        ledger::restore_all(&mut tx, order.items()).await?;
        tx.save_order(&order).await?;
        tx.commit().await?;

        metrics::counter!("orders_cancelled_total").increment(1);
        tracing::info!(order_id = %order.id(), "order cancelled");
        Ok(order)
    }

    /// Creates the payment for an order and confirms the order.
    ///
    /// The payment amount is fixed to the order's total at this moment.
    #[tracing::instrument(skip(self))]
    pub async fn create_payment(
        &self,
        order_id: OrderId,
        method: PaymentMethod,
    ) -> Result<Payment> {
        let mut tx = self.stores.begin().await?;
        let mut order = tx
            .order(order_id)
            .await?
            .ok_or(FulfillmentError::OrderNotFound(order_id))?;

        if tx.payment_for_order(order_id).await?.is_some() {
            return Err(FulfillmentError::DuplicatePayment { order_id });
        }

        let payment = Payment::new(order_id, order.total_amount(), method);
        order.transition(OrderStatus::Confirmed)?;
        order.attach_payment(payment.id())?;

        tx.save_payment(&payment).await?;
        tx.save_order(&order).await?;
        tx.commit().await?;

        metrics::counter!("payments_created_total").increment(1);
        tracing::info!(
            payment_id = %payment.id(),
            order_id = %order_id,
            amount = %payment.amount(),
            "payment created"
        );
        Ok(payment)
    }

    /// Completes a pending payment and moves its order into processing.
    #[tracing::instrument(skip(self))]
    pub async fn process_payment(&self, payment_id: PaymentId) -> Result<Payment> {
        let mut tx = self.stores.begin().await?;
        let mut payment = tx
            .payment(payment_id)
            .await?
            .ok_or(FulfillmentError::PaymentNotFound(payment_id))?;

        payment.complete(Utc::now())?;

        let mut order = self.order_of(&mut tx, &payment).await?;
        order.transition(OrderStatus::Processing)?;

        tx.save_payment(&payment).await?;
        tx.save_order(&order).await?;
        tx.commit().await?;

        metrics::counter!("payments_processed_total").increment(1);
        tracing::info!(payment_id = %payment.id(), order_id = %order.id(), "payment completed");
        Ok(payment)
    }

    /// Fails a pending payment and cancels its order, restoring stock.
    ///
    /// An order beyond the cancellable set is reported as
    /// [`FulfillmentError::InconsistentState`]; whether a `Processing`
    /// order is cancelled or also treated as a conflict is decided by
    /// [`FailedPaymentPolicy`].
    #[tracing::instrument(skip(self))]
    pub async fn fail_payment(&self, payment_id: PaymentId) -> Result<Payment> {
        let mut tx = self.stores.begin().await?;
        let mut payment = tx
            .payment(payment_id)
            .await?
            .ok_or(FulfillmentError::PaymentNotFound(payment_id))?;

        payment.fail()?;

        let mut order = self.order_of(&mut tx, &payment).await?;
        if !order.can_be_cancelled() {
            return Err(FulfillmentError::InconsistentState {
                reason: format!(
                    "payment {payment_id} failed but order {} is in {} status",
                    order.id(),
                    order.status()
                ),
            });
        }
        if order.status() == OrderStatus::Processing
            && self.config.failed_payment_policy == FailedPaymentPolicy::ConflictOnProcessing
        {
            return Err(FulfillmentError::InconsistentState {
                reason: format!(
                    "payment {payment_id} failed but order {} is already processing",
                    order.id()
                ),
            });
        }

        order.transition(OrderStatus::Cancelled)?;
        ledger::restore_all(&mut tx, order.items()).await?;

        tx.save_payment(&payment).await?;
        tx.save_order(&order).await?;
        tx.commit().await?;

        metrics::counter!("payments_failed_total").increment(1);
        tracing::warn!(payment_id = %payment.id(), order_id = %order.id(), "payment failed, order cancelled");
        Ok(payment)
    }

    /// Records an external fulfillment event as a direct status update.
    ///
    /// Only `Shipped`, `Delivered` and `Returned` are accepted here;
    /// payment-driven transitions and cancellation have dedicated
    /// operations with side effects of their own.
    #[tracing::instrument(skip(self))]
    pub async fn update_order_status(
        &self,
        order_id: OrderId,
        status: OrderStatus,
    ) -> Result<Order> {
        let mut tx = self.stores.begin().await?;
        let mut order = tx
            .order(order_id)
            .await?
            .ok_or(FulfillmentError::OrderNotFound(order_id))?;

        if !matches!(
            status,
            OrderStatus::Shipped | OrderStatus::Delivered | OrderStatus::Returned
        ) {
            return Err(OrderError::InvalidStateTransition {
                from: order.status(),
                to: status,
            }
            .into());
        }

        order.transition(status)?;
        tx.save_order(&order).await?;
        tx.commit().await?;

        tracing::info!(order_id = %order.id(), status = %status, "order status updated");
        Ok(order)
    }

    /// Looks up an order by its internal id.
    pub async fn order(&self, order_id: OrderId) -> Result<Option<Order>> {
        let mut tx = self.stores.begin().await?;
        Ok(tx.order(order_id).await?)
    }

    /// Looks up an order by its user-facing number.
    pub async fn order_by_number(&self, number: &OrderNumber) -> Result<Option<Order>> {
        let mut tx = self.stores.begin().await?;
        Ok(tx.order_by_number(number).await?)
    }

    /// Looks up a payment by id.
    pub async fn payment(&self, payment_id: PaymentId) -> Result<Option<Payment>> {
        let mut tx = self.stores.begin().await?;
        Ok(tx.payment(payment_id).await?)
    }

    /// Looks up the payment linked to an order.
    pub async fn payment_for_order(&self, order_id: OrderId) -> Result<Option<Payment>> {
        let mut tx = self.stores.begin().await?;
        Ok(tx.payment_for_order(order_id).await?)
    }

    /// Total amount across completed payments, derived from the payment
    /// store rather than kept as a running counter.
    pub async fn total_revenue(&self) -> Result<Money> {
        let mut tx = self.stores.begin().await?;
        let payments = tx.payments().await?;
        Ok(payments
            .iter()
            .filter(|p| p.status() == PaymentStatus::Completed)
            .map(Payment::amount)
            .sum())
    }

    async fn order_of(&self, tx: &mut S::Tx, payment: &Payment) -> Result<Order> {
        tx.order(payment.order_id())
            .await?
            .ok_or_else(|| FulfillmentError::InconsistentState {
                reason: format!(
                    "payment {} references missing order {}",
                    payment.id(),
                    payment.order_id()
                ),
            })
    }
}
