//! Shared test fixtures

#![allow(dead_code)]

pub mod mock_repos;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use repset_billing_core::{BillingConfig, NotifyError, PaymentService, ReceiptNotifier};
use repset_db::{CreateTrial, PlanRow, SubscriptionRepository};
use repset_types::{Payment, TenantId};

use mock_repos::{MockPaymentRepository, MockPlanRepository, MockSubscriptionRepository};

pub type TestService =
    PaymentService<MockSubscriptionRepository, MockPlanRepository, MockPaymentRepository>;

pub struct TestHarness {
    pub plans: Arc<MockPlanRepository>,
    pub subs: Arc<MockSubscriptionRepository>,
    pub payments: Arc<MockPaymentRepository>,
    pub service: TestService,
    pub tenant: TenantId,
}

/// Harness with the seed plans and a trialing tenant
pub async fn harness() -> TestHarness {
    let plans = Arc::new(MockPlanRepository::new());
    plans.insert(starter_plan());
    plans.insert(pro_plan());
    let subs = Arc::new(MockSubscriptionRepository::new());
    let payments = Arc::new(MockPaymentRepository::new(Arc::clone(&subs)));
    let service = PaymentService::new(
        BillingConfig::default(),
        Arc::clone(&subs),
        Arc::clone(&plans),
        Arc::clone(&payments),
    );
    let tenant = TenantId::new();
    subs.create_trial(CreateTrial {
        id: Uuid::new_v4(),
        tenant_id: tenant.0,
        trial_start: day(2026, 3, 1),
        trial_end: day(2026, 3, 8),
    })
    .await
    .unwrap();
    TestHarness {
        plans,
        subs,
        payments,
        service,
        tenant,
    }
}

pub fn day(year: i32, month: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, d).unwrap()
}

pub const STARTER_ID: Uuid = Uuid::from_u128(0x2222_0000_0000_0000_0000_0000_0000_0001);
pub const PRO_ID: Uuid = Uuid::from_u128(0x2222_0000_0000_0000_0000_0000_0000_0002);

pub fn starter_plan() -> PlanRow {
    let now = Utc::now();
    PlanRow {
        id: STARTER_ID,
        name: "Starter".to_string(),
        price_monthly: Decimal::new(1_499_00, 2),
        max_members: 100,
        max_staff: 2,
        max_plans: 5,
        max_diet_templates: 2,
        whatsapp_enabled: false,
        advanced_analytics: false,
        description: None,
        is_active: true,
        created_at: now,
        updated_at: now,
    }
}

pub fn pro_plan() -> PlanRow {
    let now = Utc::now();
    PlanRow {
        id: PRO_ID,
        name: "Pro".to_string(),
        price_monthly: Decimal::new(3_499_00, 2),
        max_members: -1,
        max_staff: 5,
        max_plans: -1,
        max_diet_templates: -1,
        whatsapp_enabled: true,
        advanced_analytics: true,
        description: None,
        is_active: true,
        created_at: now,
        updated_at: now,
    }
}

/// Notifier that records deliveries
#[derive(Default)]
pub struct RecordingNotifier {
    pub delivered: AtomicUsize,
}

#[async_trait]
impl ReceiptNotifier for RecordingNotifier {
    async fn payment_receipt(
        &self,
        _tenant: TenantId,
        _payment: &Payment,
    ) -> Result<(), NotifyError> {
        self.delivered.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

impl RecordingNotifier {
    pub fn count(&self) -> usize {
        self.delivered.load(Ordering::SeqCst)
    }
}

/// Notifier that always fails delivery
pub struct FailingNotifier;

#[async_trait]
impl ReceiptNotifier for FailingNotifier {
    async fn payment_receipt(
        &self,
        _tenant: TenantId,
        _payment: &Payment,
    ) -> Result<(), NotifyError> {
        Err(NotifyError::Delivery("whatsapp unreachable".to_string()))
    }
}
