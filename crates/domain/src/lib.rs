//! Domain layer for the order fulfillment engine.
//!
//! Pure computation, no I/O: the [`Order`] aggregate with its status state
//! machine, the [`Payment`] aggregate with its own lifecycle, and the
//! invariants both enforce. Persistence and transaction boundaries live in
//! the `stores` and `fulfillment` crates.

pub mod order;
pub mod payment;

pub use order::{Order, OrderError, OrderItem, OrderStatus};
pub use payment::{Payment, PaymentError, PaymentMethod, PaymentStatus};
