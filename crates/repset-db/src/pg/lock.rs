//! Per-tenant advisory locking
//!
//! Quota checks are check-then-act over counted resources. Callers that need
//! hard enforcement take this transaction-scoped lock before re-verifying the
//! count and inserting, serializing concurrent creations for one tenant
//! without blocking any other tenant.

use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use crate::error::DbResult;

/// Take a transaction-scoped advisory lock keyed on the tenant.
///
/// Released automatically at commit or rollback.
pub async fn acquire_tenant_lock(
    tx: &mut Transaction<'_, Postgres>,
    tenant_id: Uuid,
) -> DbResult<()> {
    // High half of the UUID is enough key space for a per-tenant lock.
    let (key, _) = tenant_id.as_u64_pair();

    sqlx::query("SELECT pg_advisory_xact_lock($1)")
        .bind(key as i64)
        .execute(&mut **tx)
        .await?;

    Ok(())
}
