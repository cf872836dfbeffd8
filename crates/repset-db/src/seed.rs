//! Default platform plan seed data

use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

use repset_types::Quota;

use crate::error::DbResult;
use crate::repo::{CreatePlan, PlanRepository};

/// The two launch plans: Starter and Pro
pub fn default_plans() -> Vec<CreatePlan> {
    vec![
        CreatePlan {
            id: Uuid::new_v4(),
            name: "Starter".to_string(),
            price_monthly: Decimal::new(1_499_00, 2),
            max_members: 100,
            max_staff: 2,
            max_plans: 5,
            max_diet_templates: 2,
            whatsapp_enabled: false,
            advanced_analytics: false,
            description: Some("Perfect for small gyms and personal trainers".to_string()),
        },
        CreatePlan {
            id: Uuid::new_v4(),
            name: "Pro".to_string(),
            price_monthly: Decimal::new(3_499_00, 2),
            max_members: Quota::UNLIMITED.0,
            max_staff: 5,
            max_plans: Quota::UNLIMITED.0,
            max_diet_templates: Quota::UNLIMITED.0,
            whatsapp_enabled: true,
            advanced_analytics: true,
            description: Some("For established gyms with advanced needs".to_string()),
        },
    ]
}

/// Seed the default plans once. Skips when any active plan already exists.
pub async fn seed_default_plans<P: PlanRepository>(repo: &P) -> DbResult<()> {
    let existing = repo.list_active().await?;
    if !existing.is_empty() {
        info!(count = existing.len(), "plans already seeded, skipping");
        return Ok(());
    }

    for plan in default_plans() {
        let name = plan.name.clone();
        repo.create(plan).await?;
        info!(plan = %name, "created platform plan");
    }

    Ok(())
}
