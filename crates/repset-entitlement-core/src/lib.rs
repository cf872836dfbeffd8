//! Repset Entitlement Core - Subscription and entitlement business logic
//!
//! Decides, for any tenant at any point in time, whether it is entitled to
//! use the platform: trial/paid lifecycle, quota ceilings, and feature gates.
//! Every gated write path (members, staff, membership plans, messaging) asks
//! this crate before acting.

pub mod catalog;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod service;

pub use catalog::PlanCatalog;
pub use config::EntitlementConfig;
pub use error::EntitlementError;
pub use lifecycle::LifecycleCheck;
pub use service::{EntitlementService, PlanSummary, SubscriptionOverview};
