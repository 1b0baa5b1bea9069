//! Fulfillment orchestrator for the order engine.
//!
//! [`FulfillmentService`] owns the transaction boundary: each use case —
//! create order, cancel order, create/process/fail payment — runs inside a
//! single atomic unit spanning the product, order and payment stores, so a
//! typed failure always means nothing was applied. The [`ledger`] module
//! holds the stock read/check/adjust operations those use cases compose.

pub mod ledger;

mod config;
mod error;
mod service;

pub use config::{Config, FailedPaymentPolicy};
pub use error::{FulfillmentError, Result};
pub use service::{FulfillmentService, OrderLine};
