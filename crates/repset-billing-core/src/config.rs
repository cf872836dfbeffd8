//! Billing configuration

use repset_types::DEFAULT_BILLING_PERIOD_DAYS;

/// Billing configuration
#[derive(Debug, Clone)]
pub struct BillingConfig {
    /// ISO currency code stamped on new payments
    pub currency: String,
    /// Length of the paid period granted per successful payment
    pub billing_period_days: u32,
}

impl Default for BillingConfig {
    fn default() -> Self {
        Self {
            currency: "INR".to_string(),
            billing_period_days: DEFAULT_BILLING_PERIOD_DAYS,
        }
    }
}

impl BillingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    pub fn with_billing_period_days(mut self, days: u32) -> Self {
        self.billing_period_days = days;
        self
    }
}
