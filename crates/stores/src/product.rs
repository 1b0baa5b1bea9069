use common::{Money, ProductId};
use serde::{Deserialize, Serialize};

/// The engine's read model of a product.
///
/// Owned by the Product Store; the engine reads price, stock and the active
/// flag, and requests stock deltas. It never writes any other attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub id: ProductId,
    pub name: String,

    /// Current catalog price; orders snapshot it at creation time.
    pub unit_price: Money,

    /// Units available for new orders. Never negative.
    pub stock: i64,

    /// Inactive products are not sellable.
    pub active: bool,
}

impl ProductRecord {
    /// Creates an active product record.
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        unit_price: Money,
        stock: i64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            unit_price,
            stock,
            active: true,
        }
    }

    /// Stock available for sale: zero when the product is inactive.
    pub fn available_stock(&self) -> i64 {
        if self.active { self.stock } else { 0 }
    }

    /// Returns true if `quantity` units can be taken from available stock.
    pub fn can_fulfill(&self, quantity: u32) -> bool {
        self.available_stock() >= i64::from(quantity)
    }
}
