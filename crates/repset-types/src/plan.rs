//! Platform plan types
//!
//! Plans are the tiers gym owners subscribe to (Starter, Pro). Each plan
//! carries per-resource quotas and feature flags.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entitlement::{Feature, QuotaKind};

/// Unique plan identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlanId(pub Uuid);

impl PlanId {
    /// Create a new random plan ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PlanId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for PlanId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for PlanId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

/// A per-resource ceiling. `-1` is the UNLIMITED sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quota(pub i32);

impl Quota {
    /// The unlimited sentinel value
    pub const UNLIMITED: Quota = Quota(-1);

    /// Whether this quota places no ceiling on usage
    pub const fn is_unlimited(&self) -> bool {
        self.0 == -1
    }

    /// Whether one more resource may be admitted at the given usage count.
    ///
    /// Strict less-than: usage equal to the ceiling denies.
    pub fn admits(&self, usage: i64) -> bool {
        self.is_unlimited() || usage < self.0 as i64
    }
}

impl std::fmt::Display for Quota {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_unlimited() {
            write!(f, "unlimited")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl From<i32> for Quota {
    fn from(limit: i32) -> Self {
        Self(limit)
    }
}

/// The quota ceilings currently granted to a tenant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanLimits {
    /// Maximum active members
    pub max_members: Quota,
    /// Maximum active staff users
    pub max_staff: Quota,
    /// Maximum active membership plans
    pub max_plans: Quota,
}

impl PlanLimits {
    /// All-zero limits: a hard lockout, not absence of limit
    pub const fn locked_out() -> Self {
        Self {
            max_members: Quota(0),
            max_staff: Quota(0),
            max_plans: Quota(0),
        }
    }

    /// Generous default granted when the trial-equivalent plan cannot be
    /// resolved from the catalog
    pub const fn trial_fallback() -> Self {
        Self {
            max_members: Quota::UNLIMITED,
            max_staff: Quota(5),
            max_plans: Quota::UNLIMITED,
        }
    }

    /// Get the ceiling for a resource kind
    pub fn get(&self, kind: QuotaKind) -> Quota {
        match kind {
            QuotaKind::Member => self.max_members,
            QuotaKind::Staff => self.max_staff,
            QuotaKind::Plan => self.max_plans,
        }
    }
}

/// Platform plan definition (immutable-ish reference data)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanDefinition {
    /// Plan ID
    pub id: PlanId,
    /// Display name, unique among active plans
    pub name: String,
    /// Monthly price
    pub price_monthly: Decimal,
    /// Maximum active members
    pub max_members: Quota,
    /// Maximum active staff users
    pub max_staff: Quota,
    /// Maximum active membership plans
    pub max_plans: Quota,
    /// Maximum diet plan templates
    pub max_diet_templates: Quota,
    /// Whether WhatsApp messaging is enabled
    pub whatsapp_enabled: bool,
    /// Whether advanced analytics reports are enabled
    pub advanced_analytics: bool,
    /// Marketing description
    pub description: Option<String>,
    /// Inactive plans are not offered for new subscriptions but keep
    /// serving tenants already subscribed to them
    pub is_active: bool,
}

impl PlanDefinition {
    /// The quota ceilings this plan grants
    pub fn limits(&self) -> PlanLimits {
        PlanLimits {
            max_members: self.max_members,
            max_staff: self.max_staff,
            max_plans: self.max_plans,
        }
    }

    /// Whether this plan grants a feature
    pub fn feature_enabled(&self, feature: Feature) -> bool {
        match feature {
            Feature::Whatsapp => self.whatsapp_enabled,
            Feature::AdvancedAnalytics => self.advanced_analytics,
        }
    }
}
