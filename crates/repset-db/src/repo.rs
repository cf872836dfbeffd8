//! Repository traits
//!
//! Define async repository interfaces for database operations. The
//! entitlement and billing services are generic over these traits; tests use
//! in-memory implementations.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use repset_types::UsageSnapshot;

use crate::error::DbResult;
use crate::models::{PaymentRow, PlanRow, SubscriptionRow};

/// Platform plan repository trait
#[async_trait]
pub trait PlanRepository: Send + Sync {
    /// Find a plan by ID, active or not.
    ///
    /// Existing subscriptions keep resolving through a plan after it has
    /// been soft-disabled; only new activations require an active plan.
    async fn find_by_id(&self, id: Uuid) -> DbResult<Option<PlanRow>>;

    /// Find an active plan by its unique name
    async fn find_active_by_name(&self, name: &str) -> DbResult<Option<PlanRow>>;

    /// List active plans, cheapest first
    async fn list_active(&self) -> DbResult<Vec<PlanRow>>;

    /// Create a new plan
    async fn create(&self, plan: CreatePlan) -> DbResult<PlanRow>;

    /// Soft-disable a plan so it is no longer offered
    async fn deactivate(&self, id: Uuid) -> DbResult<()>;
}

/// Create plan input
#[derive(Debug, Clone)]
pub struct CreatePlan {
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
}

/// Tenant subscription repository trait
#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    /// Find the subscription for a tenant (at most one exists)
    async fn find_by_tenant(&self, tenant_id: Uuid) -> DbResult<Option<SubscriptionRow>>;

    /// Create the trial subscription row for a freshly provisioned tenant
    async fn create_trial(&self, sub: CreateTrial) -> DbResult<SubscriptionRow>;

    /// Put the subscription on a paid plan for a fresh billing period
    async fn activate(
        &self,
        tenant_id: Uuid,
        plan_id: Uuid,
        period_start: NaiveDate,
        period_end: NaiveDate,
    ) -> DbResult<SubscriptionRow>;

    /// Mark a trial or active subscription expired. Idempotent: rows already
    /// past trial/active are left untouched.
    async fn mark_expired(&self, id: Uuid) -> DbResult<()>;

    /// Set the auto-renew flag. Returns false when no subscription exists.
    async fn set_auto_renew(&self, tenant_id: Uuid, auto_renew: bool) -> DbResult<bool>;

    /// Overwrite the status (admin suspension). Returns false when no
    /// subscription exists.
    async fn set_status(&self, tenant_id: Uuid, status: &str) -> DbResult<bool>;
}

/// Create trial subscription input
#[derive(Debug, Clone)]
pub struct CreateTrial {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub trial_start: NaiveDate,
    pub trial_end: NaiveDate,
}

/// Subscription activation write, applied together with a successful payment
#[derive(Debug, Clone)]
pub struct ActivateSubscription {
    pub tenant_id: Uuid,
    pub plan_id: Uuid,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
}

/// Subscription payment ledger repository trait
#[async_trait]
pub trait PaymentRepository: Send + Sync {
    /// Find a payment by ID
    async fn find_by_id(&self, id: Uuid) -> DbResult<Option<PaymentRow>>;

    /// Append a new pending ledger entry
    async fn create(&self, payment: CreatePayment) -> DbResult<PaymentRow>;

    /// Mark a pending payment successful and activate the subscription in
    /// the same transaction. Returns `DbError::NotFound` when the payment is
    /// not pending, leaving everything untouched.
    async fn complete_success(
        &self,
        id: Uuid,
        paid_at: DateTime<Utc>,
        note_suffix: &str,
        activation: ActivateSubscription,
    ) -> DbResult<PaymentRow>;

    /// Mark a pending payment failed. Returns `DbError::NotFound` when the
    /// payment is not pending.
    async fn mark_failed(&self, id: Uuid, note_suffix: &str) -> DbResult<PaymentRow>;

    /// Mark a successful payment refunded. Returns `DbError::NotFound` when
    /// the payment is not in success state.
    async fn mark_refunded(&self, id: Uuid, note_suffix: &str) -> DbResult<PaymentRow>;

    /// List a tenant's payments, newest first
    async fn list_by_tenant(&self, tenant_id: Uuid, limit: i64) -> DbResult<Vec<PaymentRow>>;
}

/// Create payment input
#[derive(Debug, Clone)]
pub struct CreatePayment {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub subscription_id: Uuid,
    pub plan_id: Uuid,
    pub amount: Decimal,
    pub currency: String,
    pub payment_method: String,
    pub notes: Option<String>,
}

/// Usage counter trait
///
/// Counts live in tables owned by the member/staff/plan services; the
/// entitlement engine only ever reads them. Snapshots are computed fresh on
/// every call and never cached.
#[async_trait]
pub trait UsageRepository: Send + Sync {
    /// Count a tenant's active members, staff users, and membership plans
    async fn snapshot(&self, tenant_id: Uuid) -> DbResult<UsageSnapshot>;
}
