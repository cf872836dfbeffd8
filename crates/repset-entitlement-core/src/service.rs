//! Entitlement service
//!
//! Business logic for the tenant subscription lifecycle and every
//! entitlement question the rest of the platform asks: is the tenant active,
//! may it add another member, does its plan include WhatsApp.
//!
//! Date-sensitive operations come in pairs: `foo()` uses the current UTC
//! date, `foo_on(today)` takes the date explicitly so tests can walk the
//! calendar.

use std::sync::Arc;

use chrono::{Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use repset_db::{
    CreateTrial, DbError, PlanRepository, SubscriptionRepository, UsageRepository,
};
use repset_types::{
    BlockReason, Feature, PlanId, PlanLimits, QuotaCheck, QuotaKind, Subscription,
    SubscriptionStatus, TenantId, UsageSnapshot,
};

use crate::catalog::PlanCatalog;
use crate::config::EntitlementConfig;
use crate::error::EntitlementError;
use crate::lifecycle::{self, LifecycleCheck};

/// Condensed plan info for dashboards
#[derive(Debug, Clone)]
pub struct PlanSummary {
    pub id: PlanId,
    pub name: String,
    pub price_monthly: Decimal,
}

/// Everything the account page needs about a tenant's subscription standing
#[derive(Debug, Clone)]
pub struct SubscriptionOverview {
    pub has_subscription: bool,
    pub is_active: bool,
    pub status: Option<SubscriptionStatus>,
    pub is_trial: bool,
    pub days_remaining: Option<i64>,
    pub plan: Option<PlanSummary>,
    pub usage: UsageSnapshot,
    pub limits: PlanLimits,
    pub whatsapp_enabled: bool,
    pub analytics_enabled: bool,
    pub auto_renew: Option<bool>,
}

/// Entitlement service
pub struct EntitlementService<S, P, U>
where
    S: SubscriptionRepository,
    P: PlanRepository,
    U: UsageRepository,
{
    config: EntitlementConfig,
    subscriptions: Arc<S>,
    catalog: PlanCatalog<P>,
    usage: Arc<U>,
}

impl<S, P, U> EntitlementService<S, P, U>
where
    S: SubscriptionRepository,
    P: PlanRepository,
    U: UsageRepository,
{
    pub fn new(
        config: EntitlementConfig,
        subscriptions: Arc<S>,
        plans: Arc<P>,
        usage: Arc<U>,
    ) -> Self {
        Self {
            config,
            subscriptions,
            catalog: PlanCatalog::new(plans),
            usage,
        }
    }

    /// The shared plan catalog, for admin surfaces that list or edit plans
    pub fn catalog(&self) -> &PlanCatalog<P> {
        &self.catalog
    }

    fn today() -> NaiveDate {
        Utc::now().date_naive()
    }

    /// Fetch the tenant's subscription, if any
    pub async fn current_subscription(
        &self,
        tenant: TenantId,
    ) -> Result<Option<Subscription>, EntitlementError> {
        let row = self.subscriptions.find_by_tenant(tenant.0).await?;
        Ok(row.map(|r| r.into_subscription()))
    }

    /// Start the free trial for a freshly provisioned tenant
    pub async fn start_trial(&self, tenant: TenantId) -> Result<Subscription, EntitlementError> {
        self.start_trial_on(tenant, Self::today()).await
    }

    /// Start the free trial as of `today`. Idempotent: a tenant that already
    /// has a subscription row, in any state, gets that row back unchanged.
    #[instrument(skip(self))]
    pub async fn start_trial_on(
        &self,
        tenant: TenantId,
        today: NaiveDate,
    ) -> Result<Subscription, EntitlementError> {
        if let Some(existing) = self.subscriptions.find_by_tenant(tenant.0).await? {
            warn!(tenant = %tenant, status = %existing.status(), "Tenant already has a subscription, skipping trial creation");
            return Ok(existing.into_subscription());
        }

        let trial_end = today + Duration::days(i64::from(self.config.trial_days));
        let row = self
            .subscriptions
            .create_trial(CreateTrial {
                id: Uuid::new_v4(),
                tenant_id: tenant.0,
                trial_start: today,
                trial_end,
            })
            .await?;
        info!(tenant = %tenant, trial_end = %trial_end, "Started trial");
        Ok(row.into_subscription())
    }

    /// Put the tenant on a paid plan starting today
    pub async fn activate_subscription(
        &self,
        tenant: TenantId,
        plan_id: PlanId,
    ) -> Result<Subscription, EntitlementError> {
        self.activate_subscription_on(tenant, plan_id, Self::today())
            .await
    }

    /// Put the tenant on a paid plan for a billing period starting `today`.
    ///
    /// The plan must be active: retired plans accept no new activations.
    /// Renewing an active subscription restarts the period from `today`.
    #[instrument(skip(self))]
    pub async fn activate_subscription_on(
        &self,
        tenant: TenantId,
        plan_id: PlanId,
        today: NaiveDate,
    ) -> Result<Subscription, EntitlementError> {
        self.subscriptions
            .find_by_tenant(tenant.0)
            .await?
            .ok_or(EntitlementError::SubscriptionNotFound)?;
        let plan = self
            .catalog
            .get_active(plan_id)
            .await?
            .ok_or(EntitlementError::PlanNotFound)?;

        let period_end = today + Duration::days(i64::from(self.config.billing_period_days));
        let row = self
            .subscriptions
            .activate(tenant.0, plan_id.0, today, period_end)
            .await
            .map_err(|err| match err {
                DbError::NotFound => EntitlementError::SubscriptionNotFound,
                other => other.into(),
            })?;
        info!(tenant = %tenant, plan = %plan.name, period_end = %period_end, "Activated subscription");
        Ok(row.into_subscription())
    }

    /// Turn off auto-renew; the subscription serves out its paid period.
    /// Returns false when the tenant has no subscription.
    #[instrument(skip(self))]
    pub async fn cancel_subscription(&self, tenant: TenantId) -> Result<bool, EntitlementError> {
        let cancelled = self.subscriptions.set_auto_renew(tenant.0, false).await?;
        if cancelled {
            info!(tenant = %tenant, "Auto-renew disabled");
        }
        Ok(cancelled)
    }

    /// Re-enable auto-renew. Returns false when the tenant has no
    /// subscription.
    pub async fn resume_auto_renew(&self, tenant: TenantId) -> Result<bool, EntitlementError> {
        Ok(self.subscriptions.set_auto_renew(tenant.0, true).await?)
    }

    /// Administratively suspend the tenant. Returns false when the tenant
    /// has no subscription.
    #[instrument(skip(self))]
    pub async fn suspend_subscription(&self, tenant: TenantId) -> Result<bool, EntitlementError> {
        let suspended = self
            .subscriptions
            .set_status(tenant.0, SubscriptionStatus::Suspended.as_str())
            .await?;
        if suspended {
            warn!(tenant = %tenant, "Subscription suspended");
        }
        Ok(suspended)
    }

    /// Is the tenant inside a live trial or paid period today?
    pub async fn is_active(&self, tenant: TenantId) -> Result<bool, EntitlementError> {
        self.is_active_on(tenant, Self::today()).await
    }

    /// Is the tenant inside a live trial or paid period on `today`?
    ///
    /// Applies lazy expiry: a trial/active row past its end date is flipped
    /// to expired here, on the read path, before answering.
    pub async fn is_active_on(
        &self,
        tenant: TenantId,
        today: NaiveDate,
    ) -> Result<bool, EntitlementError> {
        let Some(row) = self.subscriptions.find_by_tenant(tenant.0).await? else {
            return Ok(false);
        };
        match lifecycle::evaluate(
            row.status(),
            row.trial_end_date,
            row.subscription_end_date,
            today,
        ) {
            LifecycleCheck::Active => Ok(true),
            LifecycleCheck::Expire => {
                self.subscriptions.mark_expired(row.id).await?;
                info!(tenant = %tenant, "Subscription expired");
                Ok(false)
            }
            LifecycleCheck::Inactive => Ok(false),
        }
    }

    /// Limits the trial-equivalent plan grants
    async fn trial_limits(&self) -> Result<PlanLimits, EntitlementError> {
        if let Some(plan_id) = self.config.trial_plan {
            if let Some(plan) = self.catalog.get_active(plan_id).await? {
                return Ok(plan.limits());
            }
        }
        if let Some(plan) = self
            .catalog
            .get_active_by_name(&self.config.trial_plan_name)
            .await?
        {
            return Ok(plan.limits());
        }
        Ok(PlanLimits::trial_fallback())
    }

    /// The quota ceilings the tenant's current standing grants.
    ///
    /// Trialing tenants (and tenants with no subscription row yet) get the
    /// trial-equivalent limits; active tenants get their plan's limits;
    /// everyone else is locked out at zero.
    pub async fn plan_limits(&self, tenant: TenantId) -> Result<PlanLimits, EntitlementError> {
        let Some(row) = self.subscriptions.find_by_tenant(tenant.0).await? else {
            return self.trial_limits().await;
        };
        match row.status() {
            SubscriptionStatus::Trial => self.trial_limits().await,
            SubscriptionStatus::Active => match row.plan_id {
                Some(plan_id) => match self.catalog.get(plan_id.into()).await? {
                    Some(plan) => Ok(plan.limits()),
                    None => Ok(PlanLimits::locked_out()),
                },
                None => Ok(PlanLimits::locked_out()),
            },
            _ => Ok(PlanLimits::locked_out()),
        }
    }

    /// May the tenant add one more of `kind` right now?
    pub async fn check_quota(
        &self,
        tenant: TenantId,
        kind: QuotaKind,
    ) -> Result<QuotaCheck, EntitlementError> {
        let limits = self.plan_limits(tenant).await?;
        let limit = limits.get(kind);
        let usage = self.usage.snapshot(tenant.0).await?;
        let current = usage.count(kind);
        if limit.admits(current) {
            Ok(QuotaCheck::allow())
        } else {
            Ok(QuotaCheck::deny(kind.denial_message(current, limit)))
        }
    }

    /// Does the tenant's current standing include `feature`?
    ///
    /// Trialing tenants get analytics but not WhatsApp (messaging costs real
    /// money per send). Status is taken as persisted; the blanket access
    /// gate handles stale active rows.
    pub async fn check_feature(
        &self,
        tenant: TenantId,
        feature: Feature,
    ) -> Result<bool, EntitlementError> {
        let Some(row) = self.subscriptions.find_by_tenant(tenant.0).await? else {
            return Ok(false);
        };
        match row.status() {
            SubscriptionStatus::Trial => Ok(feature == Feature::AdvancedAnalytics),
            SubscriptionStatus::Active => match row.plan_id {
                Some(plan_id) => match self.catalog.get(plan_id.into()).await? {
                    Some(plan) => Ok(plan.feature_enabled(feature)),
                    None => Ok(false),
                },
                None => Ok(false),
            },
            _ => Ok(false),
        }
    }

    /// String-keyed feature check for request middleware. Unknown keys are
    /// not entitlements and answer false.
    pub async fn has_feature(
        &self,
        tenant: TenantId,
        key: &str,
    ) -> Result<bool, EntitlementError> {
        match Feature::from_key(key) {
            Some(feature) => self.check_feature(tenant, feature).await,
            None => Ok(false),
        }
    }

    /// Why the tenant should be blocked from the app, or `None` when it is
    /// in good standing
    pub async fn should_block_access(
        &self,
        tenant: TenantId,
    ) -> Result<Option<BlockReason>, EntitlementError> {
        self.should_block_access_on(tenant, Self::today()).await
    }

    /// Blanket access gate as of `today`. Runs lazy expiry, then maps the
    /// settled status to a user-facing reason.
    pub async fn should_block_access_on(
        &self,
        tenant: TenantId,
        today: NaiveDate,
    ) -> Result<Option<BlockReason>, EntitlementError> {
        if self.subscriptions.find_by_tenant(tenant.0).await?.is_none() {
            return Ok(Some(BlockReason::NoSubscription));
        }
        if self.is_active_on(tenant, today).await? {
            return Ok(None);
        }
        // Refetch: is_active_on may have just flipped the row to expired.
        let Some(row) = self.subscriptions.find_by_tenant(tenant.0).await? else {
            return Ok(Some(BlockReason::NoSubscription));
        };
        let reason = match row.status() {
            SubscriptionStatus::Expired => BlockReason::Expired,
            SubscriptionStatus::Suspended => BlockReason::Suspended,
            SubscriptionStatus::Cancelled => BlockReason::Cancelled,
            _ => BlockReason::Inactive,
        };
        Ok(Some(reason))
    }

    /// Is the tenant trialing, and how many days are left?
    pub async fn trial_status(
        &self,
        tenant: TenantId,
    ) -> Result<(bool, Option<i64>), EntitlementError> {
        self.trial_status_on(tenant, Self::today()).await
    }

    /// Trial standing as of `today`: `(in_trial, days_remaining)`
    pub async fn trial_status_on(
        &self,
        tenant: TenantId,
        today: NaiveDate,
    ) -> Result<(bool, Option<i64>), EntitlementError> {
        let Some(row) = self.subscriptions.find_by_tenant(tenant.0).await? else {
            return Ok((false, None));
        };
        if row.status() != SubscriptionStatus::Trial {
            return Ok((false, None));
        }
        let Some(end) = row.trial_end_date else {
            return Ok((false, None));
        };
        if today > end {
            return Ok((false, Some(0)));
        }
        Ok((true, Some(end.signed_duration_since(today).num_days())))
    }

    /// Everything the account page shows in one call
    pub async fn subscription_overview(
        &self,
        tenant: TenantId,
    ) -> Result<SubscriptionOverview, EntitlementError> {
        self.subscription_overview_on(tenant, Self::today()).await
    }

    /// Account overview as of `today`
    #[instrument(skip(self))]
    pub async fn subscription_overview_on(
        &self,
        tenant: TenantId,
        today: NaiveDate,
    ) -> Result<SubscriptionOverview, EntitlementError> {
        // Run lazy expiry first so the row read below carries the settled
        // status.
        let is_active = self.is_active_on(tenant, today).await?;
        let usage = self.usage.snapshot(tenant.0).await?;
        let limits = self.plan_limits(tenant).await?;
        let whatsapp_enabled = self.check_feature(tenant, Feature::Whatsapp).await?;
        let analytics_enabled = self
            .check_feature(tenant, Feature::AdvancedAnalytics)
            .await?;

        let Some(row) = self.subscriptions.find_by_tenant(tenant.0).await? else {
            return Ok(SubscriptionOverview {
                has_subscription: false,
                is_active: false,
                status: None,
                is_trial: false,
                days_remaining: None,
                plan: None,
                usage,
                limits,
                whatsapp_enabled,
                analytics_enabled,
                auto_renew: None,
            });
        };

        let status = row.status();
        let days_remaining = lifecycle::days_remaining(
            status,
            row.trial_end_date,
            row.subscription_end_date,
            today,
        );
        let plan = match row.plan_id {
            Some(plan_id) => self.catalog.get(plan_id.into()).await?.map(|p| PlanSummary {
                id: p.id,
                name: p.name,
                price_monthly: p.price_monthly,
            }),
            None => None,
        };

        Ok(SubscriptionOverview {
            has_subscription: true,
            is_active,
            status: Some(status),
            is_trial: status == SubscriptionStatus::Trial,
            days_remaining,
            plan,
            usage,
            limits,
            whatsapp_enabled,
            analytics_enabled,
            auto_renew: Some(row.auto_renew),
        })
    }

    /// Drop a plan from the catalog cache after an admin edit
    pub async fn invalidate_plan(&self, plan_id: PlanId) {
        self.catalog.invalidate(plan_id).await;
    }
}

impl<S, P, U> std::fmt::Debug for EntitlementService<S, P, U>
where
    S: SubscriptionRepository,
    P: PlanRepository,
    U: UsageRepository,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntitlementService")
            .field("config", &self.config)
            .finish()
    }
}
