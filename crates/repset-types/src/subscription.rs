//! Subscription lifecycle types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{PlanId, TenantId};

/// Default free trial length in days
pub const DEFAULT_TRIAL_DAYS: u32 = 7;

/// Default paid billing period in days
pub const DEFAULT_BILLING_PERIOD_DAYS: u32 = 30;

/// Unique subscription identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubscriptionId(pub Uuid);

impl SubscriptionId {
    /// Create a new random subscription ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SubscriptionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for SubscriptionId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

/// Subscription status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    /// Free trial period
    Trial,
    /// Paid and active
    Active,
    /// Trial or paid period lapsed
    Expired,
    /// Manually suspended by platform admin
    Suspended,
    /// Cancelled and lapsed with no renewal
    Cancelled,
}

impl SubscriptionStatus {
    /// Get the status as its persisted string form
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Trial => "trial",
            Self::Active => "active",
            Self::Expired => "expired",
            Self::Suspended => "suspended",
            Self::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for SubscriptionStatus {
    type Err = StatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trial" => Ok(Self::Trial),
            "active" => Ok(Self::Active),
            "expired" => Ok(Self::Expired),
            "suspended" => Ok(Self::Suspended),
            "cancelled" | "canceled" => Ok(Self::Cancelled),
            _ => Err(StatusParseError(s.to_string())),
        }
    }
}

/// Error parsing a subscription status string
#[derive(Debug, Clone)]
pub struct StatusParseError(pub String);

impl std::fmt::Display for StatusParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid subscription status: {}", self.0)
    }
}

impl std::error::Error for StatusParseError {}

/// Per-tenant subscription record (exactly one per tenant)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscription {
    /// Subscription ID
    pub id: SubscriptionId,
    /// Tenant that owns the subscription
    pub tenant_id: TenantId,
    /// Subscribed plan; `None` while trialing
    pub plan_id: Option<PlanId>,
    /// Current status
    pub status: SubscriptionStatus,
    /// Trial window start
    pub trial_start_date: Option<NaiveDate>,
    /// Trial window end (inclusive)
    pub trial_end_date: Option<NaiveDate>,
    /// Set once at trial creation; prevents re-granting a trial
    pub is_trial_used: bool,
    /// Paid period start
    pub subscription_start_date: Option<NaiveDate>,
    /// Paid period end (inclusive)
    pub subscription_end_date: Option<NaiveDate>,
    /// False once the tenant cancels; access continues until the period end
    pub auto_renew: bool,
    /// When the record was created
    pub created_at: DateTime<Utc>,
}
