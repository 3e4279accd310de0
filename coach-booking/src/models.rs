use serde::Serialize;
use uuid::Uuid;
use chrono::{DateTime, Utc};
use coach_core::forms::BookingForm;
use coach_core::payment::Receipt;
use coach_core::scheduling::ConfirmedSlots;
use coach_core::validation::ValidationErrors;

/// Shown once the sessions are booked.
pub const POST_BOOKING_CHECKLIST: [&str; 4] = [
    "Calendar invites sent with Zoom/Meet links",
    "Preparation checklist emailed for each session",
    "Reminder emails sent 24 hours before each session",
    "Resources & templates provided after each session",
];

pub const CALENDAR_ACKNOWLEDGEMENT: &str = "Calendar invites sent! Check your email for .ics files to add to your calendar.";

/// Sub-state of the payment step
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum PaymentPhase {
    Ready,
    Pending { idempotency_key: String },
    /// Last attempt failed; the payer may retry or go back.
    Failed { reason: String },
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Confirmation {
    pub receipt: Receipt,
    pub sessions: ConfirmedSlots,
    pub checklist: Vec<String>,
}

impl Confirmation {
    pub fn new(receipt: Receipt, sessions: ConfirmedSlots) -> Self {
        Self {
            receipt,
            sessions,
            checklist: POST_BOOKING_CHECKLIST.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Where a flow is. Only `Payment -> Booking` moves backwards.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum BookingStep {
    Booking,
    Payment(PaymentPhase),
    Confirmation(Confirmation),
}

impl BookingStep {
    pub fn name(&self) -> &'static str {
        match self {
            BookingStep::Booking => "booking",
            BookingStep::Payment(_) => "payment",
            BookingStep::Confirmation(_) => "confirmation",
        }
    }
}

/// One visit's booking state. Lives only in memory.
#[derive(Debug, Clone, Serialize)]
pub struct BookingFlow {
    pub id: Uuid,
    pub form: BookingForm,
    pub errors: ValidationErrors,
    pub step: BookingStep,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BookingFlow {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            form: BookingForm::default(),
            errors: ValidationErrors::default(),
            step: BookingStep::Booking,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn update_step(&mut self, step: BookingStep) {
        self.step = step;
        self.updated_at = Utc::now();
    }

    pub fn confirmation(&self) -> Option<&Confirmation> {
        match &self.step {
            BookingStep::Confirmation(c) => Some(c),
            _ => None,
        }
    }
}

impl Default for BookingFlow {
    fn default() -> Self {
        Self::new()
    }
}

/// Read-only review shown on the payment step
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct OrderSummary {
    pub package: String,
    pub duration: String,
    pub booking_name: String,
    pub email: String,
    pub timezone: String,
    pub total: i32,
    pub currency: String,
}
