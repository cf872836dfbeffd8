//! PostgreSQL usage counter implementation
//!
//! Counts rows in tables owned by the member/staff/plan services. Reads only.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use repset_types::UsageSnapshot;

use crate::error::DbResult;
use crate::repo::UsageRepository;

/// PostgreSQL usage counter
#[derive(Clone)]
pub struct PgUsageRepository {
    pool: PgPool,
}

impl PgUsageRepository {
    /// Create a new usage counter
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UsageRepository for PgUsageRepository {
    async fn snapshot(&self, tenant_id: Uuid) -> DbResult<UsageSnapshot> {
        let members = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM members WHERE tenant_id = $1 AND is_active = TRUE",
        )
        .bind(tenant_id)
        .fetch_one(&self.pool)
        .await?;

        let staff = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM users WHERE tenant_id = $1 AND is_active = TRUE",
        )
        .bind(tenant_id)
        .fetch_one(&self.pool)
        .await?;

        let plans = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM membership_plans WHERE tenant_id = $1 AND is_active = TRUE",
        )
        .bind(tenant_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(UsageSnapshot {
            members,
            staff,
            plans,
        })
    }
}
