use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use common::{OrderId, OrderNumber, PaymentId, ProductId};
use domain::{Order, Payment};
use tokio::sync::{OwnedRwLockWriteGuard, RwLock};

use crate::{ProductRecord, Result, StoreError, StoreTx, Stores};

#[derive(Debug, Default)]
struct State {
    products: HashMap<ProductId, ProductRecord>,
    orders: HashMap<OrderId, Order>,
    payments: HashMap<PaymentId, Payment>,
    fail_on_save: bool,
    fail_on_commit: bool,
}

/// In-memory backend implementing the store contracts.
///
/// A transaction holds the single write lock for its whole lifetime and
/// stages its writes, applying them on commit. Concurrent transactions
/// therefore serialize, and a dropped transaction leaves the committed
/// state untouched. Intended for tests and as the reference semantics for
/// real backends.
#[derive(Clone, Default)]
pub struct InMemoryStores {
    state: Arc<RwLock<State>>,
}

impl InMemoryStores {
    /// Creates a new empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a product record, replacing any existing record with the same id.
    pub async fn insert_product(&self, record: ProductRecord) {
        self.state
            .write()
            .await
            .products
            .insert(record.id.clone(), record);
    }

    /// Returns a product's committed stock count.
    pub async fn product_stock(&self, id: &ProductId) -> Option<i64> {
        self.state.read().await.products.get(id).map(|r| r.stock)
    }

    /// Flips a product's active flag.
    pub async fn set_product_active(&self, id: &ProductId, active: bool) {
        if let Some(record) = self.state.write().await.products.get_mut(id) {
            record.active = active;
        }
    }

    /// Returns the number of committed orders.
    pub async fn order_count(&self) -> usize {
        self.state.read().await.orders.len()
    }

    /// Returns the number of committed payments.
    pub async fn payment_count(&self) -> usize {
        self.state.read().await.payments.len()
    }

    /// Configures save calls to fail until reset.
    pub async fn set_fail_on_save(&self, fail: bool) {
        self.state.write().await.fail_on_save = fail;
    }

    /// Configures commit calls to fail until reset.
    pub async fn set_fail_on_commit(&self, fail: bool) {
        self.state.write().await.fail_on_commit = fail;
    }
}

#[async_trait]
impl Stores for InMemoryStores {
    type Tx = InMemoryTx;

    async fn begin(&self) -> Result<InMemoryTx> {
        let guard = Arc::clone(&self.state).write_owned().await;
        Ok(InMemoryTx {
            guard,
            stock_deltas: HashMap::new(),
            orders: HashMap::new(),
            payments: HashMap::new(),
        })
    }
}

/// Transaction over [`InMemoryStores`].
pub struct InMemoryTx {
    guard: OwnedRwLockWriteGuard<State>,
    stock_deltas: HashMap<ProductId, i64>,
    orders: HashMap<OrderId, Order>,
    payments: HashMap<PaymentId, Payment>,
}

impl InMemoryTx {
    fn effective_stock(&self, id: &ProductId) -> Option<i64> {
        self.guard
            .products
            .get(id)
            .map(|r| r.stock + self.stock_deltas.get(id).copied().unwrap_or(0))
    }
}

#[async_trait]
impl StoreTx for InMemoryTx {
    async fn product(&mut self, id: &ProductId) -> Result<Option<ProductRecord>> {
        let Some(record) = self.guard.products.get(id) else {
            return Ok(None);
        };
        let mut record = record.clone();
        record.stock += self.stock_deltas.get(id).copied().unwrap_or(0);
        Ok(Some(record))
    }

    async fn adjust_stock(&mut self, id: &ProductId, delta: i64) -> Result<()> {
        let current = self
            .effective_stock(id)
            .ok_or_else(|| StoreError::UnknownProduct {
                product_id: id.clone(),
            })?;
        if current + delta < 0 {
            return Err(StoreError::StockConstraint {
                product_id: id.clone(),
            });
        }
        *self.stock_deltas.entry(id.clone()).or_insert(0) += delta;
        Ok(())
    }

    async fn order(&mut self, id: OrderId) -> Result<Option<Order>> {
        if let Some(order) = self.orders.get(&id) {
            return Ok(Some(order.clone()));
        }
        Ok(self.guard.orders.get(&id).cloned())
    }

    async fn order_by_number(&mut self, number: &OrderNumber) -> Result<Option<Order>> {
        if let Some(order) = self.orders.values().find(|o| o.number() == number) {
            return Ok(Some(order.clone()));
        }
        Ok(self
            .guard
            .orders
            .values()
            .find(|o| o.number() == number && !self.orders.contains_key(&o.id()))
            .cloned())
    }

    async fn save_order(&mut self, order: &Order) -> Result<()> {
        if self.guard.fail_on_save {
            return Err(StoreError::Unavailable {
                reason: "order save rejected".to_string(),
            });
        }
        self.orders.insert(order.id(), order.clone());
        Ok(())
    }

    async fn payment(&mut self, id: PaymentId) -> Result<Option<Payment>> {
        if let Some(payment) = self.payments.get(&id) {
            return Ok(Some(payment.clone()));
        }
        Ok(self.guard.payments.get(&id).cloned())
    }

    async fn payment_for_order(&mut self, order_id: OrderId) -> Result<Option<Payment>> {
        if let Some(payment) = self.payments.values().find(|p| p.order_id() == order_id) {
            return Ok(Some(payment.clone()));
        }
        Ok(self
            .guard
            .payments
            .values()
            .find(|p| p.order_id() == order_id && !self.payments.contains_key(&p.id()))
            .cloned())
    }

    async fn save_payment(&mut self, payment: &Payment) -> Result<()> {
        if self.guard.fail_on_save {
            return Err(StoreError::Unavailable {
                reason: "payment save rejected".to_string(),
            });
        }
        self.payments.insert(payment.id(), payment.clone());
        Ok(())
    }

    async fn payments(&mut self) -> Result<Vec<Payment>> {
        let mut all: Vec<Payment> = self
            .guard
            .payments
            .values()
            .filter(|p| !self.payments.contains_key(&p.id()))
            .cloned()
            .collect();
        all.extend(self.payments.values().cloned());
        Ok(all)
    }

    async fn commit(self) -> Result<()> {
        let InMemoryTx {
            mut guard,
            stock_deltas,
            orders,
            payments,
        } = self;

        if guard.fail_on_commit {
            return Err(StoreError::Unavailable {
                reason: "commit rejected".to_string(),
            });
        }

        for (id, delta) in stock_deltas {
            if let Some(record) = guard.products.get_mut(&id) {
                record.stock += delta;
            }
        }
        guard.orders.extend(orders);
        guard.payments.extend(payments);
        Ok(())
    }
}
