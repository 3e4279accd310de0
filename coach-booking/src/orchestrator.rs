use coach_core::calendar::generate_session_slots;
use coach_core::payment::{Order, PaymentError, PaymentGateway, Receipt};
use coach_core::scheduling::{BookingRequest, ConfirmedSlots, SchedulingError, SessionScheduler};
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{info, warn};
use crate::retry::RetryPolicy;

/// Reference that makes the simulated processor refuse the card.
pub const DECLINE_REFERENCE: &str = "decline";
/// Reference that makes the simulated processor look unreachable.
pub const OUTAGE_REFERENCE: &str = "fail-circuit";

#[derive(Debug, Clone)]
pub struct CheckoutOutcome {
    pub receipt: Receipt,
    pub sessions: ConfirmedSlots,
}

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum CheckoutError {
    #[error("{0}")]
    PaymentDeclined(String),
    #[error("{0}")]
    PaymentUnavailable(String),
    /// Paid, but the sessions could not be placed. A retry with the same
    /// idempotency key is not charged twice.
    #[error("{0}")]
    Scheduling(String),
}

/// Pays for a booking, then places its sessions.
pub struct CheckoutOrchestrator {
    payments: Arc<dyn PaymentGateway>,
    scheduler: Arc<dyn SessionScheduler>,
    retry: RetryPolicy,
}

impl CheckoutOrchestrator {
    pub fn new(payments: Arc<dyn PaymentGateway>, scheduler: Arc<dyn SessionScheduler>, retry: RetryPolicy) -> Self {
        Self { payments, scheduler, retry }
    }

    /// Payment is attempted once; scheduling is retried with backoff while
    /// it fails transiently.
    pub async fn checkout(&self, order: &Order, booking: &BookingRequest) -> Result<CheckoutOutcome, CheckoutError> {
        let receipt = self.payments.submit_payment(order).await.map_err(|e| {
            warn!("Payment for booking {} failed: {}", order.booking_id, e);
            match e {
                PaymentError::Declined(_) => CheckoutError::PaymentDeclined(e.to_string()),
                PaymentError::Unavailable(_) => CheckoutError::PaymentUnavailable(e.to_string()),
            }
        })?;

        let sessions = self
            .retry
            .run(
                |_| self.scheduler.schedule_sessions(booking),
                SchedulingError::is_transient,
            )
            .await
            .map_err(|e| CheckoutError::Scheduling(e.to_string()))?;

        info!("Booking {} paid ({}) and scheduled", order.booking_id, receipt.receipt_id);
        Ok(CheckoutOutcome { receipt, sessions })
    }
}

/// Stands in for a real processor: waits a fixed latency, then succeeds
/// unless the order reference asks otherwise. Charges are keyed by
/// idempotency key.
pub struct SimulatedPaymentGateway {
    latency: Duration,
    receipts: Mutex<HashMap<String, Receipt>>,
}

impl SimulatedPaymentGateway {
    pub fn new(latency: Duration) -> Self {
        Self {
            latency,
            receipts: Mutex::new(HashMap::new()),
        }
    }

    pub async fn charge_count(&self) -> usize {
        self.receipts.lock().await.len()
    }
}

#[async_trait::async_trait]
impl PaymentGateway for SimulatedPaymentGateway {
    async fn submit_payment(&self, order: &Order) -> Result<Receipt, PaymentError> {
        if let Some(existing) = self.receipts.lock().await.get(&order.idempotency_key) {
            info!("Replaying receipt {} for key {}", existing.receipt_id, order.idempotency_key);
            return Ok(existing.clone());
        }

        tokio::time::sleep(self.latency).await;

        match order.reference.as_deref() {
            Some(DECLINE_REFERENCE) => return Err(PaymentError::Declined("card was refused".to_string())),
            Some(OUTAGE_REFERENCE) => return Err(PaymentError::Unavailable("simulated gateway failure".to_string())),
            _ => {}
        }

        let receipt = Receipt::for_order(order);
        let mut receipts = self.receipts.lock().await;
        Ok(receipts.entry(order.idempotency_key.clone()).or_insert(receipt).clone())
    }
}

/// Places sessions on the fixed Monday/Wednesday/Friday template, counted
/// from the local date at call time (or a pinned date).
pub struct WeeklyScheduler {
    today: Option<NaiveDate>,
}

impl WeeklyScheduler {
    pub fn new() -> Self {
        Self { today: None }
    }

    pub fn pinned(today: NaiveDate) -> Self {
        Self { today: Some(today) }
    }
}

impl Default for WeeklyScheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl SessionScheduler for WeeklyScheduler {
    async fn schedule_sessions(&self, booking: &BookingRequest) -> Result<ConfirmedSlots, SchedulingError> {
        let today = self.today.unwrap_or_else(|| chrono::Local::now().date_naive());
        ConfirmedSlots::new(generate_session_slots(today, &booking.timezone))
    }
}
