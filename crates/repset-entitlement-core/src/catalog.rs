//! Plan catalog with caching
//!
//! Plan definitions change rarely and are read on every entitlement check,
//! so lookups go through a short-TTL cache in front of the repository.
//! Usage counts and subscription rows are never cached.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use uuid::Uuid;

use repset_db::PlanRepository;
use repset_types::{PlanDefinition, PlanId};

use crate::error::EntitlementError;

const CACHE_TTL: Duration = Duration::from_secs(60);
const CACHE_CAPACITY: u64 = 1024;

/// Cached read access to the platform plan catalog
pub struct PlanCatalog<P: PlanRepository> {
    repo: Arc<P>,
    cache: Cache<Uuid, PlanDefinition>,
}

impl<P: PlanRepository> Clone for PlanCatalog<P> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
            cache: self.cache.clone(),
        }
    }
}

impl<P: PlanRepository> PlanCatalog<P> {
    pub fn new(repo: Arc<P>) -> Self {
        Self::with_cache_ttl(repo, CACHE_TTL)
    }

    pub fn with_cache_ttl(repo: Arc<P>, ttl: Duration) -> Self {
        Self {
            repo,
            cache: Cache::builder()
                .max_capacity(CACHE_CAPACITY)
                .time_to_live(ttl)
                .build(),
        }
    }

    /// Look up a plan by ID, active or not.
    ///
    /// Soft-disabled plans still resolve so tenants subscribed to a retired
    /// plan keep their entitlements until renewal.
    pub async fn get(&self, id: PlanId) -> Result<Option<PlanDefinition>, EntitlementError> {
        if let Some(plan) = self.cache.get(&id.0).await {
            return Ok(Some(plan));
        }
        let Some(row) = self.repo.find_by_id(id.0).await? else {
            return Ok(None);
        };
        let plan = row.into_plan();
        self.cache.insert(id.0, plan.clone()).await;
        Ok(Some(plan))
    }

    /// Look up a plan by ID, filtering out soft-disabled plans
    pub async fn get_active(&self, id: PlanId) -> Result<Option<PlanDefinition>, EntitlementError> {
        Ok(self.get(id).await?.filter(|plan| plan.is_active))
    }

    /// Look up an active plan by its unique name
    pub async fn get_active_by_name(
        &self,
        name: &str,
    ) -> Result<Option<PlanDefinition>, EntitlementError> {
        let Some(row) = self.repo.find_active_by_name(name).await? else {
            return Ok(None);
        };
        let plan = row.into_plan();
        self.cache.insert(plan.id.0, plan.clone()).await;
        Ok(Some(plan))
    }

    /// List active plans, cheapest first. Bypasses the cache.
    pub async fn list_active(&self) -> Result<Vec<PlanDefinition>, EntitlementError> {
        let rows = self.repo.list_active().await?;
        Ok(rows.into_iter().map(|row| row.into_plan()).collect())
    }

    /// Drop a plan from the cache after it was edited or deactivated
    pub async fn invalidate(&self, id: PlanId) {
        self.cache.invalidate(&id.0).await;
    }
}

impl<P: PlanRepository> std::fmt::Debug for PlanCatalog<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlanCatalog")
            .field("cached", &self.cache.entry_count())
            .finish()
    }
}
