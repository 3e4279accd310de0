use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use coach_shared::pii::Masked;

/// What the payment step asks the processor to charge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub booking_id: Uuid,
    pub idempotency_key: String,
    pub amount: i32,
    pub currency: String,
    pub payer_name: String,
    pub payer_email: Masked<String>,
    pub reference: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Receipt {
    pub receipt_id: String,
    pub booking_id: Uuid,
    pub idempotency_key: String,
    pub amount: i32,
    pub currency: String,
    pub paid_at: DateTime<Utc>,
}

impl Receipt {
    pub fn for_order(order: &Order) -> Self {
        Self {
            receipt_id: format!("rcpt_{}", Uuid::new_v4().simple()),
            booking_id: order.booking_id,
            idempotency_key: order.idempotency_key.clone(),
            amount: order.amount,
            currency: order.currency.clone(),
            paid_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum PaymentError {
    /// The payer's method was refused; retrying with the same method will not help.
    #[error("Payment declined: {0}")]
    Declined(String),
    #[error("Payment service unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Charge the order once. Implementations must treat a repeated
    /// `idempotency_key` as the same charge.
    async fn submit_payment(&self, order: &Order) -> Result<Receipt, PaymentError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_receipt_echoes_order() {
        let order = Order {
            booking_id: Uuid::new_v4(),
            idempotency_key: "key-1".to_string(),
            amount: 300,
            currency: "USD".to_string(),
            payer_name: "Jane Doe".to_string(),
            payer_email: Masked("jane@example.com".to_string()),
            reference: None,
        };

        let receipt = Receipt::for_order(&order);
        assert!(receipt.receipt_id.starts_with("rcpt_"));
        assert_eq!(receipt.booking_id, order.booking_id);
        assert_eq!(receipt.idempotency_key, "key-1");
        assert_eq!(receipt.amount, 300);
    }

    #[test]
    fn test_payment_error_messages() {
        assert_eq!(PaymentError::Declined("card refused".into()).to_string(), "Payment declined: card refused");
        assert_eq!(PaymentError::Unavailable("timeout".into()).to_string(), "Payment service unavailable: timeout");
    }
}
