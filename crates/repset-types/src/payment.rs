//! Payment ledger types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{PlanId, SubscriptionId, TenantId};

/// Unique payment identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PaymentId(pub Uuid);

impl PaymentId {
    /// Create a new random payment ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PaymentId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for PaymentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for PaymentId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

/// Payment status
///
/// A payment starts `Pending` and transitions exactly once to `Success` or
/// `Failed`; a `Success` payment may later transition to `Refunded`. No other
/// transitions are valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// Initiated, awaiting completion
    Pending,
    /// Completed successfully
    Success,
    /// Completion reported failure
    Failed,
    /// Successful payment later refunded
    Refunded,
}

impl PaymentStatus {
    /// Get the status as its persisted string form
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Success => "success",
            Self::Failed => "failed",
            Self::Refunded => "refunded",
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for PaymentStatus {
    type Err = PaymentStatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "success" => Ok(Self::Success),
            "failed" => Ok(Self::Failed),
            "refunded" => Ok(Self::Refunded),
            _ => Err(PaymentStatusParseError(s.to_string())),
        }
    }
}

/// Error parsing a payment status string
#[derive(Debug, Clone)]
pub struct PaymentStatusParseError(pub String);

impl std::fmt::Display for PaymentStatusParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid payment status: {}", self.0)
    }
}

impl std::error::Error for PaymentStatusParseError {}

/// One entry in the append-only subscription payment ledger
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    /// Payment ID
    pub id: PaymentId,
    /// Tenant that made the payment
    pub tenant_id: TenantId,
    /// Subscription the payment applies to
    pub subscription_id: SubscriptionId,
    /// Plan being paid for
    pub plan_id: PlanId,
    /// Charged amount
    pub amount: Decimal,
    /// Currency code (e.g. "INR")
    pub currency: String,
    /// Payment method ("upi", "card", gateway name, ...)
    pub payment_method: Option<String>,
    /// Current status
    pub status: PaymentStatus,
    /// Set only on successful completion
    pub payment_date: Option<DateTime<Utc>>,
    /// Free-form notes; completion appends transaction references
    pub notes: Option<String>,
    /// When the ledger entry was created
    pub created_at: DateTime<Utc>,
}
