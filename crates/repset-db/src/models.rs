//! Database row models
//!
//! These types map directly to database rows using SQLx's FromRow derive.
//! Status columns are persisted as text and parsed into the domain enums on
//! the way out; unparseable values fail closed (deny access, deny completion).

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;
use uuid::Uuid;

use repset_types::{
    Payment, PaymentStatus, PlanDefinition, Subscription, SubscriptionStatus,
};

/// Platform plan row from the database
#[derive(Debug, Clone, FromRow)]
pub struct PlanRow {
    pub id: Uuid,
    pub name: String,
    pub price_monthly: Decimal,
    pub max_members: i32,
    pub max_staff: i32,
    pub max_plans: i32,
    pub max_diet_templates: i32,
    pub whatsapp_enabled: bool,
    pub advanced_analytics: bool,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PlanRow {
    /// Convert to the domain plan definition
    pub fn into_plan(self) -> PlanDefinition {
        PlanDefinition {
            id: self.id.into(),
            name: self.name,
            price_monthly: self.price_monthly,
            max_members: self.max_members.into(),
            max_staff: self.max_staff.into(),
            max_plans: self.max_plans.into(),
            max_diet_templates: self.max_diet_templates.into(),
            whatsapp_enabled: self.whatsapp_enabled,
            advanced_analytics: self.advanced_analytics,
            description: self.description,
            is_active: self.is_active,
        }
    }
}

/// Tenant subscription row from the database
#[derive(Debug, Clone, FromRow)]
pub struct SubscriptionRow {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub plan_id: Option<Uuid>,
    pub status: String,
    pub trial_start_date: Option<NaiveDate>,
    pub trial_end_date: Option<NaiveDate>,
    pub is_trial_used: bool,
    pub subscription_start_date: Option<NaiveDate>,
    pub subscription_end_date: Option<NaiveDate>,
    pub auto_renew: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SubscriptionRow {
    /// Parse the persisted status. Fails closed: an unrecognized value is
    /// treated as suspended so entitlement checks deny access.
    pub fn status(&self) -> SubscriptionStatus {
        self.status
            .parse()
            .unwrap_or(SubscriptionStatus::Suspended)
    }

    /// Convert to the domain subscription
    pub fn into_subscription(self) -> Subscription {
        let status = self.status();
        Subscription {
            id: self.id.into(),
            tenant_id: self.tenant_id.into(),
            plan_id: self.plan_id.map(Into::into),
            status,
            trial_start_date: self.trial_start_date,
            trial_end_date: self.trial_end_date,
            is_trial_used: self.is_trial_used,
            subscription_start_date: self.subscription_start_date,
            subscription_end_date: self.subscription_end_date,
            auto_renew: self.auto_renew,
            created_at: self.created_at,
        }
    }
}

/// Subscription payment row from the database
#[derive(Debug, Clone, FromRow)]
pub struct PaymentRow {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub subscription_id: Uuid,
    pub plan_id: Uuid,
    pub amount: Decimal,
    pub currency: String,
    pub payment_method: Option<String>,
    pub status: String,
    pub payment_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PaymentRow {
    /// Parse the persisted status. Fails closed: an unrecognized value is
    /// treated as failed so it can neither complete nor refund.
    pub fn status(&self) -> PaymentStatus {
        self.status.parse().unwrap_or(PaymentStatus::Failed)
    }

    /// Convert to the domain payment
    pub fn into_payment(self) -> Payment {
        let status = self.status();
        Payment {
            id: self.id.into(),
            tenant_id: self.tenant_id.into(),
            subscription_id: self.subscription_id.into(),
            plan_id: self.plan_id.into(),
            amount: self.amount,
            currency: self.currency,
            payment_method: self.payment_method,
            status,
            payment_date: self.payment_date,
            notes: self.notes,
            created_at: self.created_at,
        }
    }
}
