//! Entitlement and feature types

use serde::{Deserialize, Serialize};

use crate::Quota;

/// Known gated features
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    /// Outbound WhatsApp messaging
    Whatsapp,
    /// Advanced analytics reports
    AdvancedAnalytics,
}

impl Feature {
    /// Get the feature key string
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Whatsapp => "whatsapp",
            Self::AdvancedAnalytics => "advanced_analytics",
        }
    }

    /// Resolve a feature from its string key. Unknown keys yield `None`,
    /// which callers treat as "not available".
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "whatsapp" => Some(Self::Whatsapp),
            "advanced_analytics" => Some(Self::AdvancedAnalytics),
            _ => None,
        }
    }
}

impl std::fmt::Display for Feature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Counted resource kinds subject to quota checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuotaKind {
    /// Gym members
    Member,
    /// Staff user accounts
    Staff,
    /// Membership plans offered by the gym
    Plan,
}

impl QuotaKind {
    /// Get the kind as a string key
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Member => "member",
            Self::Staff => "staff",
            Self::Plan => "plan",
        }
    }

    /// User-facing label used in denial messages
    const fn label(&self) -> &'static str {
        match self {
            Self::Member => "Member",
            Self::Staff => "Staff",
            Self::Plan => "Membership plan",
        }
    }

    /// The action recommended after an upgrade
    const fn action(&self) -> &'static str {
        match self {
            Self::Member => "add more members",
            Self::Staff => "add more staff",
            Self::Plan => "create more plans",
        }
    }

    /// Build the user-facing denial message for this kind
    pub fn denial_message(&self, current: i64, limit: Quota) -> String {
        format!(
            "{} limit reached ({current}/{limit}). Upgrade your plan to {}.",
            self.label(),
            self.action(),
        )
    }
}

impl std::fmt::Display for QuotaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Quota check result
///
/// Denials are values, not errors; the message is surfaced to the caller
/// verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuotaCheck {
    /// Whether one more resource may be created
    pub allowed: bool,
    /// Denial message; empty when allowed
    pub message: String,
}

impl QuotaCheck {
    /// An allowed check
    pub fn allow() -> Self {
        Self {
            allowed: true,
            message: String::new(),
        }
    }

    /// A denied check with a user-facing message
    pub fn deny(message: impl Into<String>) -> Self {
        Self {
            allowed: false,
            message: message.into(),
        }
    }
}

/// Fresh per-tenant counts of active resources.
///
/// Always computed at query time, never cached across requests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageSnapshot {
    /// Active members
    pub members: i64,
    /// Active staff users
    pub staff: i64,
    /// Active membership plans
    pub plans: i64,
}

impl UsageSnapshot {
    /// Get the count for a resource kind
    pub fn count(&self, kind: QuotaKind) -> i64 {
        match kind {
            QuotaKind::Member => self.members,
            QuotaKind::Staff => self.staff,
            QuotaKind::Plan => self.plans,
        }
    }
}

/// Why a tenant is blocked from tenant-scoped operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockReason {
    /// No subscription record exists for the tenant
    NoSubscription,
    /// Trial or paid period lapsed
    Expired,
    /// Manually suspended by platform admin
    Suspended,
    /// Cancelled and lapsed with no renewal
    Cancelled,
    /// Inactive for any other reason
    Inactive,
}

impl BlockReason {
    /// User-facing reason message
    pub const fn message(&self) -> &'static str {
        match self {
            Self::NoSubscription => "No subscription found",
            Self::Expired => "Subscription expired. Please renew to continue.",
            Self::Suspended => "Account suspended. Please contact support.",
            Self::Cancelled => "Subscription cancelled. Please reactivate to continue.",
            Self::Inactive => "Subscription inactive",
        }
    }
}

impl std::fmt::Display for BlockReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}
