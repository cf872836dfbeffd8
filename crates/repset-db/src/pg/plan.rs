//! PostgreSQL plan repository implementation

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::DbResult;
use crate::models::PlanRow;
use crate::repo::{CreatePlan, PlanRepository};

/// PostgreSQL platform plan repository
#[derive(Clone)]
pub struct PgPlanRepository {
    pool: PgPool,
}

impl PgPlanRepository {
    /// Create a new plan repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PlanRepository for PgPlanRepository {
    async fn find_by_id(&self, id: Uuid) -> DbResult<Option<PlanRow>> {
        let plan = sqlx::query_as::<_, PlanRow>(
            r#"
            SELECT id, name, price_monthly, max_members, max_staff, max_plans,
                   max_diet_templates, whatsapp_enabled, advanced_analytics,
                   description, is_active, created_at, updated_at
            FROM subscription_plans
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(plan)
    }

    async fn find_active_by_name(&self, name: &str) -> DbResult<Option<PlanRow>> {
        let plan = sqlx::query_as::<_, PlanRow>(
            r#"
            SELECT id, name, price_monthly, max_members, max_staff, max_plans,
                   max_diet_templates, whatsapp_enabled, advanced_analytics,
                   description, is_active, created_at, updated_at
            FROM subscription_plans
            WHERE name = $1 AND is_active = TRUE
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(plan)
    }

    async fn list_active(&self) -> DbResult<Vec<PlanRow>> {
        let plans = sqlx::query_as::<_, PlanRow>(
            r#"
            SELECT id, name, price_monthly, max_members, max_staff, max_plans,
                   max_diet_templates, whatsapp_enabled, advanced_analytics,
                   description, is_active, created_at, updated_at
            FROM subscription_plans
            WHERE is_active = TRUE
            ORDER BY price_monthly ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(plans)
    }

    async fn create(&self, plan: CreatePlan) -> DbResult<PlanRow> {
        let row = sqlx::query_as::<_, PlanRow>(
            r#"
            INSERT INTO subscription_plans
                (id, name, price_monthly, max_members, max_staff, max_plans,
                 max_diet_templates, whatsapp_enabled, advanced_analytics, description)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id, name, price_monthly, max_members, max_staff, max_plans,
                      max_diet_templates, whatsapp_enabled, advanced_analytics,
                      description, is_active, created_at, updated_at
            "#,
        )
        .bind(plan.id)
        .bind(&plan.name)
        .bind(plan.price_monthly)
        .bind(plan.max_members)
        .bind(plan.max_staff)
        .bind(plan.max_plans)
        .bind(plan.max_diet_templates)
        .bind(plan.whatsapp_enabled)
        .bind(plan.advanced_analytics)
        .bind(&plan.description)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn deactivate(&self, id: Uuid) -> DbResult<()> {
        sqlx::query(
            "UPDATE subscription_plans SET is_active = FALSE, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
