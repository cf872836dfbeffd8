//! Shared test fixtures

#![allow(dead_code)]

pub mod mock_repos;

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use repset_db::PlanRow;
use repset_entitlement_core::{EntitlementConfig, EntitlementService};
use repset_types::TenantId;

use mock_repos::{MockPlanRepository, MockSubscriptionRepository, MockUsageRepository};

pub type TestService =
    EntitlementService<MockSubscriptionRepository, MockPlanRepository, MockUsageRepository>;

pub struct TestHarness {
    pub plans: Arc<MockPlanRepository>,
    pub subs: Arc<MockSubscriptionRepository>,
    pub usage: Arc<MockUsageRepository>,
    pub service: TestService,
    pub tenant: TenantId,
}

pub fn harness() -> TestHarness {
    harness_with_config(EntitlementConfig::default())
}

pub fn harness_with_config(config: EntitlementConfig) -> TestHarness {
    let plans = Arc::new(MockPlanRepository::new());
    plans.insert(starter_plan());
    plans.insert(pro_plan());
    let subs = Arc::new(MockSubscriptionRepository::new());
    let usage = Arc::new(MockUsageRepository::new());
    let service = EntitlementService::new(
        config,
        Arc::clone(&subs),
        Arc::clone(&plans),
        Arc::clone(&usage),
    );
    TestHarness {
        plans,
        subs,
        usage,
        service,
        tenant: TenantId::new(),
    }
}

pub fn day(year: i32, month: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, d).unwrap()
}

pub const STARTER_ID: Uuid = Uuid::from_u128(0x1111_0000_0000_0000_0000_0000_0000_0001);
pub const PRO_ID: Uuid = Uuid::from_u128(0x1111_0000_0000_0000_0000_0000_0000_0002);

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
