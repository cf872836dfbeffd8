//! Repset Types - Shared domain types
//!
//! This crate contains domain types used across Repset services:
//! - Tenant identity
//! - Platform plans, quotas and feature flags
//! - Subscription lifecycle and payment ledger types
//! - Entitlement check results

pub mod entitlement;
pub mod payment;
pub mod plan;
pub mod subscription;
pub mod tenant;

pub use entitlement::*;
pub use payment::*;
pub use plan::*;
pub use subscription::*;
pub use tenant::*;
