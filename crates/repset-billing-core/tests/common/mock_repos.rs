//! In-memory mock repositories for billing tests

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use dashmap::DashMap;
use uuid::Uuid;

use repset_db::{
    ActivateSubscription, CreatePayment, CreatePlan, CreateTrial, DbError, DbResult,
    PaymentRepository, PaymentRow, PlanRepository, PlanRow, SubscriptionRepository,
    SubscriptionRow,
};
use repset_types::{PaymentStatus, SubscriptionStatus};

/// Mock plan repository backed by a DashMap
#[derive(Default)]
pub struct MockPlanRepository {
    plans: DashMap<Uuid, PlanRow>,
}

impl MockPlanRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, row: PlanRow) {
        self.plans.insert(row.id, row);
    }
}

#[async_trait]
impl PlanRepository for MockPlanRepository {
    async fn find_by_id(&self, id: Uuid) -> DbResult<Option<PlanRow>> {
        Ok(self.plans.get(&id).map(|r| r.clone()))
    }

    async fn find_active_by_name(&self, name: &str) -> DbResult<Option<PlanRow>> {
        Ok(self
            .plans
            .iter()
            .find(|r| r.is_active && r.name == name)
            .map(|r| r.clone()))
    }

    async fn list_active(&self) -> DbResult<Vec<PlanRow>> {
        Ok(self
            .plans
            .iter()
            .filter(|r| r.is_active)
            .map(|r| r.clone())
            .collect())
    }

    async fn create(&self, plan: CreatePlan) -> DbResult<PlanRow> {
        let now = Utc::now();
        let row = PlanRow {
            id: plan.id,
            name: plan.name,
            price_monthly: plan.price_monthly,
            max_members: plan.max_members,
            max_staff: plan.max_staff,
            max_plans: plan.max_plans,
            max_diet_templates: plan.max_diet_templates,
            whatsapp_enabled: plan.whatsapp_enabled,
            advanced_analytics: plan.advanced_analytics,
            description: plan.description,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        self.plans.insert(row.id, row.clone());
        Ok(row)
    }

    async fn deactivate(&self, id: Uuid) -> DbResult<()> {
        if let Some(mut row) = self.plans.get_mut(&id) {
            row.is_active = false;
        }
        Ok(())
    }
}

/// Mock subscription repository keyed by tenant ID
#[derive(Default)]
pub struct MockSubscriptionRepository {
    subs: DashMap<Uuid, SubscriptionRow>,
}

impl MockSubscriptionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, tenant_id: Uuid) -> Option<SubscriptionRow> {
        self.subs.get(&tenant_id).map(|r| r.clone())
    }
}

#[async_trait]
impl SubscriptionRepository for MockSubscriptionRepository {
    async fn find_by_tenant(&self, tenant_id: Uuid) -> DbResult<Option<SubscriptionRow>> {
        Ok(self.subs.get(&tenant_id).map(|r| r.clone()))
    }

    async fn create_trial(&self, sub: CreateTrial) -> DbResult<SubscriptionRow> {
        let now = Utc::now();
        let row = SubscriptionRow {
            id: sub.id,
            tenant_id: sub.tenant_id,
            plan_id: None,
            status: SubscriptionStatus::Trial.as_str().to_string(),
            trial_start_date: Some(sub.trial_start),
            trial_end_date: Some(sub.trial_end),
            is_trial_used: true,
            subscription_start_date: None,
            subscription_end_date: None,
            auto_renew: true,
            created_at: now,
            updated_at: now,
        };
        self.subs.insert(row.tenant_id, row.clone());
        Ok(row)
    }

    async fn activate(
        &self,
        tenant_id: Uuid,
        plan_id: Uuid,
        period_start: NaiveDate,
        period_end: NaiveDate,
    ) -> DbResult<SubscriptionRow> {
        let mut row = self.subs.get_mut(&tenant_id).ok_or(DbError::NotFound)?;
        row.plan_id = Some(plan_id);
        row.status = SubscriptionStatus::Active.as_str().to_string();
        row.subscription_start_date = Some(period_start);
        row.subscription_end_date = Some(period_end);
        row.updated_at = Utc::now();
        Ok(row.clone())
    }

    async fn mark_expired(&self, id: Uuid) -> DbResult<()> {
        for mut row in self.subs.iter_mut() {
            if row.id == id {
                row.status = SubscriptionStatus::Expired.as_str().to_string();
            }
        }
        Ok(())
    }

    async fn set_auto_renew(&self, tenant_id: Uuid, auto_renew: bool) -> DbResult<bool> {
        match self.subs.get_mut(&tenant_id) {
            Some(mut row) => {
                row.auto_renew = auto_renew;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn set_status(&self, tenant_id: Uuid, status: &str) -> DbResult<bool> {
        match self.subs.get_mut(&tenant_id) {
            Some(mut row) => {
                row.status = status.to_string();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

/// Mock payment ledger. Holds the subscription repo so a successful
/// completion activates the subscription the way the transactional
/// implementation does.
pub struct MockPaymentRepository {
    payments: DashMap<Uuid, PaymentRow>,
    subs: Arc<MockSubscriptionRepository>,
}

impl MockPaymentRepository {
    pub fn new(subs: Arc<MockSubscriptionRepository>) -> Self {
        Self {
            payments: DashMap::new(),
            subs,
        }
    }

    pub fn get(&self, id: Uuid) -> Option<PaymentRow> {
        self.payments.get(&id).map(|r| r.clone())
    }
}

#[async_trait]
impl PaymentRepository for MockPaymentRepository {
    async fn find_by_id(&self, id: Uuid) -> DbResult<Option<PaymentRow>> {
        Ok(self.payments.get(&id).map(|r| r.clone()))
    }

    async fn create(&self, payment: CreatePayment) -> DbResult<PaymentRow> {
        let now = Utc::now();
        let row = PaymentRow {
            id: payment.id,
            tenant_id: payment.tenant_id,
            subscription_id: payment.subscription_id,
            plan_id: payment.plan_id,
            amount: payment.amount,
            currency: payment.currency,
            payment_method: Some(payment.payment_method),
            status: PaymentStatus::Pending.as_str().to_string(),
            payment_date: None,
            notes: payment.notes,
            created_at: now,
            updated_at: now,
        };
        self.payments.insert(row.id, row.clone());
        Ok(row)
    }

    async fn complete_success(
        &self,
        id: Uuid,
        paid_at: DateTime<Utc>,
        note_suffix: &str,
        activation: ActivateSubscription,
    ) -> DbResult<PaymentRow> {
        let row = {
            let mut entry = self.payments.get_mut(&id).ok_or(DbError::NotFound)?;
            if entry.status() != PaymentStatus::Pending {
                return Err(DbError::NotFound);
            }
            entry.status = PaymentStatus::Success.as_str().to_string();
            entry.payment_date = Some(paid_at);
            let notes = entry.notes.take().unwrap_or_default();
            entry.notes = Some(format!("{notes}{note_suffix}"));
            entry.updated_at = paid_at;
            entry.clone()
        };
        self.subs
            .activate(
                activation.tenant_id,
                activation.plan_id,
                activation.period_start,
                activation.period_end,
            )
            .await?;
        Ok(row)
    }

    async fn mark_failed(&self, id: Uuid, note_suffix: &str) -> DbResult<PaymentRow> {
        let mut entry = self.payments.get_mut(&id).ok_or(DbError::NotFound)?;
        if entry.status() != PaymentStatus::Pending {
            return Err(DbError::NotFound);
        }
        entry.status = PaymentStatus::Failed.as_str().to_string();
        let notes = entry.notes.take().unwrap_or_default();
        entry.notes = Some(format!("{notes}{note_suffix}"));
        entry.updated_at = Utc::now();
        Ok(entry.clone())
    }

    async fn mark_refunded(&self, id: Uuid, note_suffix: &str) -> DbResult<PaymentRow> {
        let mut entry = self.payments.get_mut(&id).ok_or(DbError::NotFound)?;
        if entry.status() != PaymentStatus::Success {
            return Err(DbError::NotFound);
        }
        entry.status = PaymentStatus::Refunded.as_str().to_string();
        let notes = entry.notes.take().unwrap_or_default();
        entry.notes = Some(format!("{notes}{note_suffix}"));
        entry.updated_at = Utc::now();
        Ok(entry.clone())
    }

    async fn list_by_tenant(&self, tenant_id: Uuid, limit: i64) -> DbResult<Vec<PaymentRow>> {
        let mut rows: Vec<PaymentRow> = self
            .payments
            .iter()
            .filter(|r| r.tenant_id == tenant_id)
            .map(|r| r.clone())
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        rows.truncate(limit.max(0) as usize);
        Ok(rows)
    }
}
