//! Payment aggregate and related types.

mod aggregate;
mod status;

pub use aggregate::{Payment, PaymentMethod};
pub use status::PaymentStatus;

use thiserror::Error;

/// Errors that can occur during payment operations.
#[derive(Debug, Error)]
pub enum PaymentError {
    /// `Completed` and `Failed` are terminal; only a pending payment moves.
    #[error("invalid payment state transition: {from} -> {to}")]
    InvalidStateTransition {
        from: PaymentStatus,
        to: PaymentStatus,
    },
}
