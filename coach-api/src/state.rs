use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use coach_booking::{CheckoutOrchestrator, FlowManager, RetryPolicy, SimulatedPaymentGateway, WeeklyScheduler};
use coach_catalog::Package;
use coach_core::payment::PaymentGateway;
use coach_core::scheduling::SessionScheduler;
use coach_store::app_config::{Config, ContactConfig};
use coach_store::EventProducer;
use crate::middleware::resiliency::Resiliency;

#[derive(Clone)]
pub struct AppState {
    pub flows: Arc<Mutex<FlowManager>>,
    pub checkout: Arc<CheckoutOrchestrator>,
    pub events: EventProducer,
    pub contact: ContactConfig,
    pub rotation_interval: Duration,
    pub resiliency: Arc<Resiliency>,
}

impl AppState {
    /// Simulated processor and the weekly scheduler, as configured.
    pub fn from_config(config: &Config) -> Self {
        let gateway = Arc::new(SimulatedPaymentGateway::new(config.booking.payment_latency()));
        Self::with_adapters(config, gateway, Arc::new(WeeklyScheduler::new()))
    }

    pub fn with_adapters(
        config: &Config,
        payments: Arc<dyn PaymentGateway>,
        scheduler: Arc<dyn SessionScheduler>,
    ) -> Self {
        let retry = RetryPolicy::new(
            config.retry.max_attempts,
            Duration::from_millis(config.retry.base_delay_ms),
            Duration::from_millis(config.retry.max_delay_ms),
        );
        let package = Package::new(config.booking.price, &config.booking.currency);

        Self {
            flows: Arc::new(Mutex::new(FlowManager::new(package))),
            checkout: Arc::new(CheckoutOrchestrator::new(payments, scheduler, retry)),
            events: EventProducer::new(config.events.capacity),
            contact: config.contact.clone(),
            rotation_interval: config.rotation.interval(),
            resiliency: Arc::new(Resiliency::default()),
        }
    }
}
