use serde::{Deserialize, Serialize};

/// The status of a payment.
///
/// `Pending → Completed` or `Pending → Failed`; both outcomes are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PaymentStatus {
    /// Payment created, not yet settled.
    #[default]
    Pending,

    /// Payment settled successfully (terminal).
    Completed,

    /// Payment was declined or errored (terminal).
    Failed,
}

impl PaymentStatus {
    /// Returns true if no transition leaves this status.
    pub fn is_terminal(self) -> bool {
        matches!(self, PaymentStatus::Completed | PaymentStatus::Failed)
    }

    /// Returns the status name as a string.
    pub fn as_str(self) -> &'static str {
        match self {
            PaymentStatus::Pending => "Pending",
            PaymentStatus::Completed => "Completed",
            PaymentStatus::Failed => "Failed",
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
