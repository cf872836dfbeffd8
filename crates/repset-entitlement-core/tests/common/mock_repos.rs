//! In-memory mock repositories for entitlement tests

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use dashmap::DashMap;
use uuid::Uuid;

use repset_db::{
    CreatePlan, CreateTrial, DbError, DbResult, PlanRepository, PlanRow, SubscriptionRepository,
    SubscriptionRow, UsageRepository,
};
use repset_types::{SubscriptionStatus, UsageSnapshot};

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
        let mut rows: Vec<PlanRow> = self
            .plans
            .iter()
            .filter(|r| r.is_active)
            .map(|r| r.clone())
            .collect();
        rows.sort_by(|a, b| a.price_monthly.cmp(&b.price_monthly));
        Ok(rows)
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
            row.updated_at = Utc::now();
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

    pub fn insert(&self, row: SubscriptionRow) {
        self.subs.insert(row.tenant_id, row);
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
        row.auto_renew = true;
        row.updated_at = Utc::now();
        Ok(row.clone())
    }

    async fn mark_expired(&self, id: Uuid) -> DbResult<()> {
        for mut row in self.subs.iter_mut() {
            if row.id == id
                && matches!(
                    row.status(),
                    SubscriptionStatus::Trial | SubscriptionStatus::Active
                )
            {
                row.status = SubscriptionStatus::Expired.as_str().to_string();
                row.updated_at = Utc::now();
            }
        }
        Ok(())
    }

    async fn set_auto_renew(&self, tenant_id: Uuid, auto_renew: bool) -> DbResult<bool> {
        match self.subs.get_mut(&tenant_id) {
            Some(mut row) => {
                row.auto_renew = auto_renew;
                row.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn set_status(&self, tenant_id: Uuid, status: &str) -> DbResult<bool> {
        match self.subs.get_mut(&tenant_id) {
            Some(mut row) => {
                row.status = status.to_string();
                row.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

/// Mock usage counter with settable counts
#[derive(Default)]
pub struct MockUsageRepository {
    counts: DashMap<Uuid, UsageSnapshot>,
}

impl MockUsageRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, tenant_id: Uuid, members: i64, staff: i64, plans: i64) {
        self.counts.insert(
            tenant_id,
            UsageSnapshot {
                members,
                staff,
                plans,
            },
        );
    }
}

#[async_trait]
impl UsageRepository for MockUsageRepository {
    async fn snapshot(&self, tenant_id: Uuid) -> DbResult<UsageSnapshot> {
        Ok(self
            .counts
            .get(&tenant_id)
            .map(|s| *s)
            .unwrap_or_default())
    }
}
