pub mod models;
pub mod manager;
pub mod retry;
pub mod orchestrator;

pub use models::{BookingFlow, BookingStep, PaymentPhase, Confirmation, OrderSummary};
pub use manager::{FlowManager, FlowError, PaymentStart};
pub use retry::RetryPolicy;
pub use orchestrator::{CheckoutOrchestrator, CheckoutOutcome, CheckoutError, SimulatedPaymentGateway, WeeklyScheduler};
