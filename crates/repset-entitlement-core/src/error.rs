//! Entitlement errors

use thiserror::Error;

/// Entitlement errors
#[derive(Error, Debug)]
pub enum EntitlementError {
    /// The tenant has no subscription record
    #[error("subscription not found")]
    SubscriptionNotFound,

    /// The referenced plan does not exist or is not offered
    #[error("plan not found")]
    PlanNotFound,

    /// Database error
    #[error("database error: {0}")]
    Database(String),
}

impl EntitlementError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::SubscriptionNotFound | Self::PlanNotFound => 404,
            Self::Database(_) => 500,
        }
    }

    /// Get error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::SubscriptionNotFound => "SUBSCRIPTION_NOT_FOUND",
            Self::PlanNotFound => "PLAN_NOT_FOUND",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }
}

impl From<repset_db::DbError> for EntitlementError {
    fn from(err: repset_db::DbError) -> Self {
        tracing::error!("Database error: {}", err);
        Self::Database(err.to_string())
    }
}
