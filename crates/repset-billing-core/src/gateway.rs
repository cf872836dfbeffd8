//! Payment gateway trait and the simulated gateway

use async_trait::async_trait;
use rand::Rng;
use rust_decimal::Decimal;

use crate::error::BillingError;

/// Payment gateway trait
///
/// One order per payment attempt. The returned order reference is handed to
/// the client, which completes or abandons the order out of band and reports
/// the outcome back.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Create an order for the given amount and return its reference
    async fn create_order(&self, amount: Decimal, currency: &str) -> Result<String, BillingError>;
}

/// Simulated gateway for development and staging
///
/// Never talks to a processor and never fails; references are random and
/// carry a `DUMMY_` prefix so they are unmistakable in the ledger.
#[derive(Debug, Clone, Copy, Default)]
pub struct DummyGateway;

impl DummyGateway {
    pub fn new() -> Self {
        Self
    }

    /// Generate a transaction reference in the same format the simulated
    /// client-side flow reports back
    pub fn transaction_ref() -> String {
        let bytes: [u8; 12] = rand::thread_rng().gen();
        let hex: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
        format!("DUMMY_TXN_{hex}")
    }
}

#[async_trait]
impl PaymentGateway for DummyGateway {
    async fn create_order(&self, _amount: Decimal, _currency: &str) -> Result<String, BillingError> {
        let bytes: [u8; 8] = rand::thread_rng().gen();
        let hex: String = bytes.iter().map(|b| format!("{b:02X}")).collect();
        Ok(format!("DUMMY_ORD_{hex}"))
    }
}
