use chrono::{DateTime, Utc};
use common::{Money, OrderId, PaymentId};
use serde::{Deserialize, Serialize};

use super::{PaymentError, PaymentStatus};

/// How a payment is settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    CreditCard,
    DebitCard,
    BankTransfer,
    CashOnDelivery,
}

impl PaymentMethod {
    /// Returns the method name as a string.
    pub fn as_str(self) -> &'static str {
        match self {
            PaymentMethod::CreditCard => "CreditCard",
            PaymentMethod::DebitCard => "DebitCard",
            PaymentMethod::BankTransfer => "BankTransfer",
            PaymentMethod::CashOnDelivery => "CashOnDelivery",
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Payment aggregate.
///
/// References exactly one order by id; the amount is fixed to the order's
/// total at creation time and never recomputed afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    id: PaymentId,
    order_id: OrderId,

    /// Captured from the order total when the payment was created.
    amount: Money,

    status: PaymentStatus,
    method: PaymentMethod,
    created_at: DateTime<Utc>,

    /// Set only on completion.
    paid_at: Option<DateTime<Utc>>,
}

impl Payment {
    /// Creates a pending payment for an order.
    pub fn new(order_id: OrderId, amount: Money, method: PaymentMethod) -> Self {
        Self {
            id: PaymentId::new(),
            order_id,
            amount,
            status: PaymentStatus::Pending,
            method,
            created_at: Utc::now(),
            paid_at: None,
        }
    }

    pub fn id(&self) -> PaymentId {
        self.id
    }

    pub fn order_id(&self) -> OrderId {
        self.order_id
    }

    pub fn amount(&self) -> Money {
        self.amount
    }

    pub fn status(&self) -> PaymentStatus {
        self.status
    }

    pub fn method(&self) -> PaymentMethod {
        self.method
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the completion timestamp, if the payment completed.
    pub fn paid_at(&self) -> Option<DateTime<Utc>> {
        self.paid_at
    }

    /// Marks the payment as completed and stamps the payment time.
    pub fn complete(&mut self, at: DateTime<Utc>) -> Result<(), PaymentError> {
        self.check_pending(PaymentStatus::Completed)?;
        self.status = PaymentStatus::Completed;
        self.paid_at = Some(at);
        Ok(())
    }

    /// Marks the payment as failed.
    pub fn fail(&mut self) -> Result<(), PaymentError> {
        self.check_pending(PaymentStatus::Failed)?;
        self.status = PaymentStatus::Failed;
        Ok(())
    }

    fn check_pending(&self, to: PaymentStatus) -> Result<(), PaymentError> {
        if self.status != PaymentStatus::Pending {
            return Err(PaymentError::InvalidStateTransition {
                from: self.status,
                to,
            });
        }
        Ok(())
    }
}
