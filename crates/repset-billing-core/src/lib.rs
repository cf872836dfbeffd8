//! Repset Billing Core - Subscription payment processing
//!
//! Maintains the subscription payment ledger and drives the
//! initiate/complete/refund flow against a payment gateway. Ships with a
//! simulated gateway; a real processor plugs in behind the same trait.

pub mod config;
pub mod error;
pub mod gateway;
pub mod notify;
pub mod service;

pub use config::BillingConfig;
pub use error::BillingError;
pub use gateway::{DummyGateway, PaymentGateway};
pub use notify::{NotifyError, ReceiptNotifier};
pub use service::{PaymentOutcome, PaymentService};
