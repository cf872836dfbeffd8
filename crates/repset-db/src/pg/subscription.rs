//! PostgreSQL subscription repository implementation

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use crate::models::SubscriptionRow;
use crate::repo::{CreateTrial, SubscriptionRepository};

/// PostgreSQL tenant subscription repository
#[derive(Clone)]
pub struct PgSubscriptionRepository {
    pool: PgPool,
}

impl PgSubscriptionRepository {
    /// Create a new subscription repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubscriptionRepository for PgSubscriptionRepository {
    async fn find_by_tenant(&self, tenant_id: Uuid) -> DbResult<Option<SubscriptionRow>> {
        let sub = sqlx::query_as::<_, SubscriptionRow>(
            r#"
            SELECT id, tenant_id, plan_id, status, trial_start_date, trial_end_date,
                   is_trial_used, subscription_start_date, subscription_end_date,
                   auto_renew, created_at, updated_at
            FROM tenant_subscriptions
            WHERE tenant_id = $1
            "#,
        )
        .bind(tenant_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(sub)
    }

    async fn create_trial(&self, sub: CreateTrial) -> DbResult<SubscriptionRow> {
        let row = sqlx::query_as::<_, SubscriptionRow>(
            r#"
            INSERT INTO tenant_subscriptions
                (id, tenant_id, plan_id, status, trial_start_date, trial_end_date,
                 is_trial_used, auto_renew)
            VALUES ($1, $2, NULL, 'trial', $3, $4, TRUE, TRUE)
            RETURNING id, tenant_id, plan_id, status, trial_start_date, trial_end_date,
                      is_trial_used, subscription_start_date, subscription_end_date,
                      auto_renew, created_at, updated_at
            "#,
        )
        .bind(sub.id)
        .bind(sub.tenant_id)
        .bind(sub.trial_start)
        .bind(sub.trial_end)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn activate(
        &self,
        tenant_id: Uuid,
        plan_id: Uuid,
        period_start: NaiveDate,
        period_end: NaiveDate,
    ) -> DbResult<SubscriptionRow> {
        let row = sqlx::query_as::<_, SubscriptionRow>(
            r#"
            UPDATE tenant_subscriptions
            SET plan_id = $2, status = 'active', subscription_start_date = $3,
                subscription_end_date = $4, auto_renew = TRUE, updated_at = NOW()
            WHERE tenant_id = $1
            RETURNING id, tenant_id, plan_id, status, trial_start_date, trial_end_date,
                      is_trial_used, subscription_start_date, subscription_end_date,
                      auto_renew, created_at, updated_at
            "#,
        )
        .bind(tenant_id)
        .bind(plan_id)
        .bind(period_start)
        .bind(period_end)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(DbError::NotFound)?;

        Ok(row)
    }

    async fn mark_expired(&self, id: Uuid) -> DbResult<()> {
        // Guarded so a concurrent lazy-expiry call cannot double-fire.
        sqlx::query(
            r#"
            UPDATE tenant_subscriptions
            SET status = 'expired', updated_at = NOW()
            WHERE id = $1 AND status IN ('trial', 'active')
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn set_auto_renew(&self, tenant_id: Uuid, auto_renew: bool) -> DbResult<bool> {
        let result = sqlx::query(
            "UPDATE tenant_subscriptions SET auto_renew = $2, updated_at = NOW() WHERE tenant_id = $1",
        )
        .bind(tenant_id)
        .bind(auto_renew)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn set_status(&self, tenant_id: Uuid, status: &str) -> DbResult<bool> {
        let result = sqlx::query(
            "UPDATE tenant_subscriptions SET status = $2, updated_at = NOW() WHERE tenant_id = $1",
        )
        .bind(tenant_id)
        .bind(status)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
