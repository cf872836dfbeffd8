//! Payment receipt notification seam
//!
//! Receipt delivery (WhatsApp, email) is owned by the messaging service;
//! billing only exposes the hook. Delivery is best-effort: a failed receipt
//! never rolls back or fails a completed payment.

use async_trait::async_trait;
use thiserror::Error;

use repset_types::{Payment, TenantId};

/// Notification delivery errors
#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("receipt delivery failed: {0}")]
    Delivery(String),
}

/// Receipt notifier trait
#[async_trait]
pub trait ReceiptNotifier: Send + Sync {
    /// Deliver a receipt for a successfully completed payment
    async fn payment_receipt(&self, tenant: TenantId, payment: &Payment)
        -> Result<(), NotifyError>;
}
