//! Billing errors

use thiserror::Error;

use repset_types::{PaymentId, PaymentStatus};

/// Billing errors
#[derive(Error, Debug)]
pub enum BillingError {
    /// The tenant has no subscription record
    #[error("subscription not found")]
    SubscriptionNotFound,

    /// The referenced plan does not exist or is not offered
    #[error("plan not found")]
    PlanNotFound,

    /// The referenced payment does not exist
    #[error("payment not found")]
    PaymentNotFound,

    /// The payment is not in the state the operation requires
    #[error("payment {payment_id} is in state {status}")]
    InvalidState {
        payment_id: PaymentId,
        status: PaymentStatus,
    },

    /// The gateway reported an outcome we do not recognize
    #[error("invalid payment outcome: {0}")]
    InvalidOutcome(String),

    /// Database error
    #[error("database error: {0}")]
    Database(String),
}

impl BillingError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::SubscriptionNotFound | Self::PlanNotFound | Self::PaymentNotFound => 404,
            Self::InvalidState { .. } | Self::InvalidOutcome(_) => 400,
            Self::Database(_) => 500,
        }
    }

    /// Whether this error means the referenced record does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::SubscriptionNotFound | Self::PlanNotFound | Self::PaymentNotFound
        )
    }

    /// Get error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::SubscriptionNotFound => "SUBSCRIPTION_NOT_FOUND",
            Self::PlanNotFound => "PLAN_NOT_FOUND",
            Self::PaymentNotFound => "PAYMENT_NOT_FOUND",
            Self::InvalidState { .. } => "INVALID_PAYMENT_STATE",
            Self::InvalidOutcome(_) => "INVALID_PAYMENT_OUTCOME",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }
}

impl From<repset_db::DbError> for BillingError {
    fn from(err: repset_db::DbError) -> Self {
        tracing::error!("Database error: {}", err);
        Self::Database(err.to_string())
    }
}
