//! PostgreSQL repository implementations

mod lock;
mod payment;
mod plan;
mod subscription;
mod usage;

pub use lock::acquire_tenant_lock;
pub use payment::PgPaymentRepository;
pub use plan::PgPlanRepository;
pub use subscription::PgSubscriptionRepository;
pub use usage::PgUsageRepository;

use sqlx::PgPool;

/// Bundle of all PostgreSQL repositories sharing one pool
#[derive(Clone)]
pub struct Repositories {
    /// Platform plan repository
    pub plans: PgPlanRepository,
    /// Tenant subscription repository
    pub subscriptions: PgSubscriptionRepository,
    /// Payment ledger repository
    pub payments: PgPaymentRepository,
    /// Usage counter
    pub usage: PgUsageRepository,
}

impl Repositories {
    /// Create all repositories from a shared pool
    pub fn new(pool: PgPool) -> Self {
        Self {
            plans: PgPlanRepository::new(pool.clone()),
            subscriptions: PgSubscriptionRepository::new(pool.clone()),
            payments: PgPaymentRepository::new(pool.clone()),
            usage: PgUsageRepository::new(pool),
        }
    }
}
