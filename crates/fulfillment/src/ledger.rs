//! Stock ledger: read/check/adjust operations on product stock.
//!
//! Every function here runs against a [`StoreTx`] supplied by the
//! orchestrator, so stock movements commit or roll back together with the
//! order and payment writes they support. The bulk helpers touch products
//! in ascending product id order; backends that lock per row inherit a
//! deadlock-free acquisition sequence from that.

use common::ProductId;
use domain::OrderItem;
use stores::{ProductRecord, StoreTx};

use crate::{FulfillmentError, Result};

/// Returns true if `quantity` units of the product are available for sale.
pub fn check_available(record: &ProductRecord, quantity: u32) -> bool {
    record.can_fulfill(quantity)
}

/// Takes `quantity` units of a product's stock.
///
/// Fails with [`FulfillmentError::InsufficientStock`] when the quantity
/// exceeds what is available, leaving the transaction's staged state as it
/// was.
pub async fn decrease<Tx: StoreTx>(
    tx: &mut Tx,
    product_id: &ProductId,
    quantity: u32,
) -> Result<()> {
    let record = tx
        .product(product_id)
        .await?
        .ok_or_else(|| FulfillmentError::ProductNotFound {
            product_id: product_id.clone(),
        })?;
    if !record.can_fulfill(quantity) {
        return Err(FulfillmentError::InsufficientStock {
            product_id: product_id.clone(),
            requested: quantity,
            available: record.available_stock(),
        });
    }
    tx.adjust_stock(product_id, -i64::from(quantity)).await?;
    Ok(())
}

/// Returns `quantity` units to a product's stock. No upper bound is
/// enforced.
pub async fn increase<Tx: StoreTx>(
    tx: &mut Tx,
    product_id: &ProductId,
    quantity: u32,
) -> Result<()> {
    tx.adjust_stock(product_id, i64::from(quantity)).await?;
    Ok(())
}

/// Decrements stock for every item, in ascending product id order.
pub async fn decrease_all<Tx: StoreTx>(tx: &mut Tx, items: &[OrderItem]) -> Result<()> {
    for item in in_lock_order(items) {
        decrease(tx, &item.product_id, item.quantity).await?;
    }
    Ok(())
}

/// Restores stock for every item, in ascending product id order.
pub async fn restore_all<Tx: StoreTx>(tx: &mut Tx, items: &[OrderItem]) -> Result<()> {
    for item in in_lock_order(items) {
        increase(tx, &item.product_id, item.quantity).await?;
    }
    Ok(())
}

fn in_lock_order(items: &[OrderItem]) -> Vec<&OrderItem> {
    let mut sorted: Vec<&OrderItem> = items.iter().collect();
    sorted.sort_by(|a, b| a.product_id.cmp(&b.product_id));
    sorted
}
