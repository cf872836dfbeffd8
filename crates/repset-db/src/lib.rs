//! Repset DB - Database abstractions
//!
//! SQLx-based database layer for Repset services.
//!
//! # Example
//!
//! ```rust,ignore
//! use repset_db::{create_pool, Repositories};
//!
//! let pool = create_pool("postgres://localhost/repset").await?;
//! let repos = Repositories::new(pool);
//!
//! let sub = repos.subscriptions.find_by_tenant(tenant_id).await?;
//! ```

pub mod error;
pub mod models;
pub mod pg;
pub mod pool;
pub mod repo;
pub mod seed;

pub use error::{DbError, DbResult};
pub use models::*;
pub use pg::{acquire_tenant_lock, Repositories};
pub use pool::{create_pool, create_pool_from_env, run_migrations, DbPool};
pub use repo::*;
pub use seed::{default_plans, seed_default_plans};
