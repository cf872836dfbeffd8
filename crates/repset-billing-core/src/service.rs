//! Payment service
//!
//! Drives the initiate/complete/refund flow over the payment ledger. A
//! successful completion activates the tenant's subscription for a fresh
//! billing period in the same database transaction, so a crash between the
//! two writes can never leave a paid-but-inactive tenant.

use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use repset_db::{
    ActivateSubscription, CreatePayment, DbError, PaymentRepository, PlanRepository,
    SubscriptionRepository,
};
use repset_types::{Payment, PaymentId, PaymentStatus, PlanId, TenantId};

use crate::config::BillingConfig;
use crate::error::BillingError;
use crate::gateway::{DummyGateway, PaymentGateway};
use crate::notify::ReceiptNotifier;

/// Outcome reported back by the client after the gateway flow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentOutcome {
    Success,
    Failed,
}

impl FromStr for PaymentOutcome {
    type Err = BillingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "success" => Ok(Self::Success),
            "failed" => Ok(Self::Failed),
            _ => Err(BillingError::InvalidOutcome(s.to_string())),
        }
    }
}

/// Payment service
pub struct PaymentService<S, P, Y>
where
    S: SubscriptionRepository,
    P: PlanRepository,
    Y: PaymentRepository,
{
    config: BillingConfig,
    subscriptions: Arc<S>,
    plans: Arc<P>,
    payments: Arc<Y>,
    gateway: Arc<dyn PaymentGateway>,
    notifier: Option<Arc<dyn ReceiptNotifier>>,
}

impl<S, P, Y> PaymentService<S, P, Y>
where
    S: SubscriptionRepository,
    P: PlanRepository,
    Y: PaymentRepository,
{
    pub fn new(
        config: BillingConfig,
        subscriptions: Arc<S>,
        plans: Arc<P>,
        payments: Arc<Y>,
    ) -> Self {
        Self {
            config,
            subscriptions,
            plans,
            payments,
            gateway: Arc::new(DummyGateway::new()),
            notifier: None,
        }
    }

    /// Swap in a real gateway
    pub fn with_gateway(mut self, gateway: Arc<dyn PaymentGateway>) -> Self {
        self.gateway = gateway;
        self
    }

    /// Attach a receipt notifier. Delivery is best-effort.
    pub fn with_notifier(mut self, notifier: Arc<dyn ReceiptNotifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Start a payment for a plan: creates a gateway order and appends a
    /// pending ledger entry priced at the plan's monthly rate.
    ///
    /// `notes` overrides the default ledger annotation. Returns the ledger
    /// entry and the gateway order reference.
    #[instrument(skip(self))]
    pub async fn initiate_payment(
        &self,
        tenant: TenantId,
        plan_id: PlanId,
        method: &str,
        notes: Option<String>,
    ) -> Result<(Payment, String), BillingError> {
        let subscription = self
            .subscriptions
            .find_by_tenant(tenant.0)
            .await?
            .ok_or(BillingError::SubscriptionNotFound)?;
        // Only actively offered plans may be purchased.
        let plan = self
            .plans
            .find_by_id(plan_id.0)
            .await?
            .filter(|p| p.is_active)
            .ok_or(BillingError::PlanNotFound)?
            .into_plan();

        let order_ref = self
            .gateway
            .create_order(plan.price_monthly, &self.config.currency)
            .await?;

        let row = self
            .payments
            .create(CreatePayment {
                id: Uuid::new_v4(),
                tenant_id: tenant.0,
                subscription_id: subscription.id,
                plan_id: plan_id.0,
                amount: plan.price_monthly,
                currency: self.config.currency.clone(),
                payment_method: method.to_string(),
                notes: Some(notes.unwrap_or_else(|| {
                    format!("Subscription payment for {} plan", plan.name)
                })),
            })
            .await?;
        info!(tenant = %tenant, plan = %plan.name, order = %order_ref, "Initiated payment");
        Ok((row.into_payment(), order_ref))
    }

    /// Record the outcome the client reports for a pending payment
    pub async fn complete_payment(
        &self,
        payment_id: PaymentId,
        transaction_ref: &str,
        outcome: &str,
    ) -> Result<Payment, BillingError> {
        self.complete_payment_at(payment_id, transaction_ref, outcome, Utc::now())
            .await
    }

    /// Record a payment outcome as of `now`.
    ///
    /// Success marks the payment paid and activates the subscription for a
    /// billing period starting today, atomically. Failure only annotates the
    /// ledger entry. An unrecognized outcome string mutates nothing.
    #[instrument(skip(self))]
    pub async fn complete_payment_at(
        &self,
        payment_id: PaymentId,
        transaction_ref: &str,
        outcome: &str,
        now: DateTime<Utc>,
    ) -> Result<Payment, BillingError> {
        let payment = self
            .payments
            .find_by_id(payment_id.0)
            .await?
            .ok_or(BillingError::PaymentNotFound)?;
        let status = payment.status();
        if status != PaymentStatus::Pending {
            return Err(BillingError::InvalidState { payment_id, status });
        }
        let outcome: PaymentOutcome = outcome.parse()?;

        let invalid_state = |err: DbError| match err {
            // The guarded update found the row no longer pending: another
            // completion won the race.
            DbError::NotFound => BillingError::InvalidState {
                payment_id,
                status: PaymentStatus::Pending,
            },
            other => other.into(),
        };

        match outcome {
            PaymentOutcome::Success => {
                let period_start = now.date_naive();
                let period_end =
                    period_start + Duration::days(i64::from(self.config.billing_period_days));
                let row = self
                    .payments
                    .complete_success(
                        payment_id.0,
                        now,
                        &format!(" | Transaction ID: {transaction_ref}"),
                        ActivateSubscription {
                            tenant_id: payment.tenant_id,
                            plan_id: payment.plan_id,
                            period_start,
                            period_end,
                        },
                    )
                    .await
                    .map_err(invalid_state)?;
                let paid = row.into_payment();
                info!(
                    payment = %payment_id,
                    tenant = %paid.tenant_id,
                    period_end = %period_end,
                    "Payment succeeded, subscription activated"
                );
                self.send_receipt(&paid).await;
                Ok(paid)
            }
            PaymentOutcome::Failed => {
                let row = self
                    .payments
                    .mark_failed(
                        payment_id.0,
                        &format!(" | Failed Transaction ID: {transaction_ref}"),
                    )
                    .await
                    .map_err(invalid_state)?;
                warn!(payment = %payment_id, "Payment failed");
                Ok(row.into_payment())
            }
        }
    }

    /// Refund a successful payment, annotating the ledger entry with the
    /// reason. Refunds do not touch the subscription.
    #[instrument(skip(self))]
    pub async fn refund_payment(
        &self,
        payment_id: PaymentId,
        reason: &str,
    ) -> Result<Payment, BillingError> {
        let payment = self
            .payments
            .find_by_id(payment_id.0)
            .await?
            .ok_or(BillingError::PaymentNotFound)?;
        let status = payment.status();
        if status != PaymentStatus::Success {
            return Err(BillingError::InvalidState { payment_id, status });
        }

        let row = self
            .payments
            .mark_refunded(payment_id.0, &format!(" | Refunded: {reason}"))
            .await
            .map_err(|err| match err {
                DbError::NotFound => BillingError::InvalidState {
                    payment_id,
                    status: PaymentStatus::Success,
                },
                other => other.into(),
            })?;
        info!(payment = %payment_id, reason = %reason, "Payment refunded");
        Ok(row.into_payment())
    }

    /// A tenant's payments, newest first
    pub async fn payment_history(
        &self,
        tenant: TenantId,
        limit: i64,
    ) -> Result<Vec<Payment>, BillingError> {
        let rows = self.payments.list_by_tenant(tenant.0, limit).await?;
        Ok(rows.into_iter().map(|row| row.into_payment()).collect())
    }

    async fn send_receipt(&self, payment: &Payment) {
        let Some(notifier) = &self.notifier else {
            return;
        };
        if let Err(err) = notifier.payment_receipt(payment.tenant_id, payment).await {
            warn!(payment = %payment.id, "Receipt delivery failed: {}", err);
        }
    }
}

impl<S, P, Y> std::fmt::Debug for PaymentService<S, P, Y>
where
    S: SubscriptionRepository,
    P: PlanRepository,
    Y: PaymentRepository,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaymentService")
            .field("config", &self.config)
            .finish()
    }
}
