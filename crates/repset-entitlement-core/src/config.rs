//! Entitlement engine configuration

use repset_types::{PlanId, DEFAULT_BILLING_PERIOD_DAYS, DEFAULT_TRIAL_DAYS};

/// Entitlement engine configuration
///
/// Trial entitlements mirror a configured "trial-equivalent" plan so that
/// trialing tenants experience the top tier. Resolution order: explicit plan
/// ID, then active plan by name, then a built-in fallback.
#[derive(Debug, Clone)]
pub struct EntitlementConfig {
    /// Trial length in days
    pub trial_days: u32,
    /// Paid billing period length in days
    pub billing_period_days: u32,
    /// Plan whose limits and features trialing tenants receive
    pub trial_plan: Option<PlanId>,
    /// Name looked up when no trial plan ID is configured
    pub trial_plan_name: String,
}

impl Default for EntitlementConfig {
    fn default() -> Self {
        Self {
            trial_days: DEFAULT_TRIAL_DAYS,
            billing_period_days: DEFAULT_BILLING_PERIOD_DAYS,
            trial_plan: None,
            trial_plan_name: "Pro".to_string(),
        }
    }
}

impl EntitlementConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_trial_days(mut self, days: u32) -> Self {
        self.trial_days = days;
        self
    }

    pub fn with_billing_period_days(mut self, days: u32) -> Self {
        self.billing_period_days = days;
        self
    }

    pub fn with_trial_plan(mut self, plan: PlanId) -> Self {
        self.trial_plan = Some(plan);
        self
    }

    pub fn with_trial_plan_name(mut self, name: impl Into<String>) -> Self {
        self.trial_plan_name = name.into();
        self
    }
}
