//! Shared value types for the order fulfillment engine.
//!
//! Typed identifiers prevent order, payment and product ids from being
//! mixed up at API boundaries, and [`Money`] keeps amounts in fixed-point
//! cents instead of floating point.

mod id;
mod money;

pub use id::{OrderId, OrderNumber, PaymentId, ProductId};
pub use money::Money;
