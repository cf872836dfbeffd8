//! PostgreSQL payment ledger repository implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use crate::models::PaymentRow;
use crate::repo::{ActivateSubscription, CreatePayment, PaymentRepository};

/// PostgreSQL subscription payment repository
#[derive(Clone)]
pub struct PgPaymentRepository {
    pool: PgPool,
}

impl PgPaymentRepository {
    /// Create a new payment repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PaymentRepository for PgPaymentRepository {
    async fn find_by_id(&self, id: Uuid) -> DbResult<Option<PaymentRow>> {
        let payment = sqlx::query_as::<_, PaymentRow>(
            r#"
            SELECT id, tenant_id, subscription_id, plan_id, amount, currency,
                   payment_method, status, payment_date, notes, created_at, updated_at
            FROM subscription_payments
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(payment)
    }

    async fn create(&self, payment: CreatePayment) -> DbResult<PaymentRow> {
        let row = sqlx::query_as::<_, PaymentRow>(
            r#"
            INSERT INTO subscription_payments
                (id, tenant_id, subscription_id, plan_id, amount, currency,
                 payment_method, status, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7, 'pending', $8)
            RETURNING id, tenant_id, subscription_id, plan_id, amount, currency,
                      payment_method, status, payment_date, notes, created_at, updated_at
            "#,
        )
        .bind(payment.id)
        .bind(payment.tenant_id)
        .bind(payment.subscription_id)
        .bind(payment.plan_id)
        .bind(payment.amount)
        .bind(&payment.currency)
        .bind(&payment.payment_method)
        .bind(&payment.notes)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn complete_success(
        &self,
        id: Uuid,
        paid_at: DateTime<Utc>,
        note_suffix: &str,
        activation: ActivateSubscription,
    ) -> DbResult<PaymentRow> {
        // Marking the payment and activating the subscription commit
        // together; a crash cannot leave the tenant paid but locked out.
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, PaymentRow>(
            r#"
            UPDATE subscription_payments
            SET status = 'success', payment_date = $2,
                notes = COALESCE(notes, '') || $3, updated_at = NOW()
            WHERE id = $1 AND status = 'pending'
            RETURNING id, tenant_id, subscription_id, plan_id, amount, currency,
                      payment_method, status, payment_date, notes, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(paid_at)
        .bind(note_suffix)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(DbError::NotFound)?;

        sqlx::query(
            r#"
            UPDATE tenant_subscriptions
            SET plan_id = $2, status = 'active', subscription_start_date = $3,
                subscription_end_date = $4, auto_renew = TRUE, updated_at = NOW()
            WHERE tenant_id = $1
            "#,
        )
        .bind(activation.tenant_id)
        .bind(activation.plan_id)
        .bind(activation.period_start)
        .bind(activation.period_end)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(row)
    }

    async fn mark_failed(&self, id: Uuid, note_suffix: &str) -> DbResult<PaymentRow> {
        let row = sqlx::query_as::<_, PaymentRow>(
            r#"
            UPDATE subscription_payments
            SET status = 'failed', notes = COALESCE(notes, '') || $2, updated_at = NOW()
            WHERE id = $1 AND status = 'pending'
            RETURNING id, tenant_id, subscription_id, plan_id, amount, currency,
                      payment_method, status, payment_date, notes, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(note_suffix)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(DbError::NotFound)?;

        Ok(row)
    }

    async fn mark_refunded(&self, id: Uuid, note_suffix: &str) -> DbResult<PaymentRow> {
        let row = sqlx::query_as::<_, PaymentRow>(
            r#"
            UPDATE subscription_payments
            SET status = 'refunded', notes = COALESCE(notes, '') || $2, updated_at = NOW()
            WHERE id = $1 AND status = 'success'
            RETURNING id, tenant_id, subscription_id, plan_id, amount, currency,
                      payment_method, status, payment_date, notes, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(note_suffix)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(DbError::NotFound)?;

        Ok(row)
    }

    async fn list_by_tenant(&self, tenant_id: Uuid, limit: i64) -> DbResult<Vec<PaymentRow>> {
        let payments = sqlx::query_as::<_, PaymentRow>(
            r#"
            SELECT id, tenant_id, subscription_id, plan_id, amount, currency,
                   payment_method, status, payment_date, notes, created_at, updated_at
            FROM subscription_payments
            WHERE tenant_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(tenant_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(payments)
    }
}
