use common::{Money, ProductId};
use serde::{Deserialize, Serialize};

/// A line item in an order.
///
/// The unit price is a snapshot taken when the order is created; later
/// price changes in the product catalog never affect an existing order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    /// The product this line refers to.
    pub product_id: ProductId,

    /// Quantity ordered, always positive.
    pub quantity: u32,

    /// Price per unit captured at order creation.
    pub unit_price: Money,
}

impl OrderItem {
    /// Creates a new order item.
    pub fn new(product_id: impl Into<ProductId>, quantity: u32, unit_price: Money) -> Self {
        Self {
            product_id: product_id.into(),
            quantity,
            unit_price,
        }
    }

    /// Returns the line subtotal (`unit_price × quantity`).
    ///
    /// Always computed from the fields, so it cannot go stale.
    pub fn subtotal(&self) -> Money {
        self.unit_price.multiply(self.quantity)
    }
}
