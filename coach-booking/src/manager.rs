use crate::models::{BookingFlow, BookingStep, Confirmation, OrderSummary, PaymentPhase, CALENDAR_ACKNOWLEDGEMENT};
use coach_catalog::Package;
use coach_core::forms::FormFields;
use coach_core::payment::{Order, Receipt};
use coach_core::scheduling::{BookingRequest, ConfirmedSlots};
use coach_core::validation::{booking_schema, Schema};
use coach_core::CoreError;
use coach_shared::pii::Masked;
use uuid::Uuid;
use std::collections::HashMap;

/// Result of asking to pay.
#[derive(Debug, Clone)]
pub enum PaymentStart {
    /// Flow is now pending; run the checkout with these.
    Started { order: Order, booking: BookingRequest },
    /// Same key as the confirmed payment; nothing to do.
    Replay(Confirmation),
}

/// Manages live booking flows and their step transitions
pub struct FlowManager {
    flows: HashMap<Uuid, BookingFlow>,
    package: Package,
    schema: Schema,
}

impl FlowManager {
    pub fn new(package: Package) -> Self {
        Self {
            flows: HashMap::new(),
            package,
            schema: booking_schema(),
        }
    }

    pub fn package(&self) -> &Package {
        &self.package
    }

    /// Enter the flow: empty form, booking step.
    pub fn start(&mut self) -> &BookingFlow {
        let flow = BookingFlow::new();
        let id = flow.id;
        self.flows.entry(id).or_insert(flow)
    }

    pub fn get(&self, flow_id: &Uuid) -> Option<&BookingFlow> {
        self.flows.get(flow_id)
    }

    /// Edit one field. Clears that field's error.
    pub fn update_field(&mut self, flow_id: &Uuid, field: &str, value: String) -> Result<&BookingFlow, FlowError> {
        let flow = self.get_flow_mut(flow_id)?;
        Self::expect_booking(flow, "booking")?;

        flow.form.set_field(field, value)?;
        flow.errors.clear_field(field);
        flow.updated_at = chrono::Utc::now();
        Ok(flow)
    }

    /// Validate the whole form. Booking -> Payment on success; otherwise the
    /// flow stays put with a fresh error map. Returns whether it advanced.
    pub fn submit(&mut self, flow_id: &Uuid) -> Result<bool, FlowError> {
        let flow = self.flows.get_mut(flow_id)
            .ok_or_else(|| FlowError::NotFound(flow_id.to_string()))?;
        Self::expect_booking(flow, "payment")?;

        flow.errors = self.schema.validate(&flow.form);
        if !flow.errors.is_empty() {
            flow.updated_at = chrono::Utc::now();
            return Ok(false);
        }

        flow.update_step(BookingStep::Payment(PaymentPhase::Ready));
        Ok(true)
    }

    pub fn order_summary(&self, flow_id: &Uuid) -> Result<OrderSummary, FlowError> {
        let flow = self.get(flow_id)
            .ok_or_else(|| FlowError::NotFound(flow_id.to_string()))?;

        if !matches!(flow.step, BookingStep::Payment(_)) {
            return Err(FlowError::InvalidTransition {
                from: flow.step.name().to_string(),
                to: "payment".to_string(),
            });
        }

        Ok(OrderSummary {
            package: self.package.name.clone(),
            duration: self.package.duration_label(),
            booking_name: flow.form.full_name.trim().to_string(),
            email: flow.form.email.trim().to_string(),
            timezone: flow.form.timezone.clone(),
            total: self.package.price,
            currency: self.package.currency.clone(),
        })
    }

    /// Transition: Payment -> Booking, keeping the entered values.
    pub fn back(&mut self, flow_id: &Uuid) -> Result<(), FlowError> {
        let flow = self.get_flow_mut(flow_id)?;

        match &flow.step {
            BookingStep::Payment(PaymentPhase::Pending { .. }) => Err(FlowError::PaymentInProgress),
            BookingStep::Payment(_) => {
                flow.update_step(BookingStep::Booking);
                Ok(())
            }
            other => Err(FlowError::InvalidTransition {
                from: other.name().to_string(),
                to: "booking".to_string(),
            }),
        }
    }

    /// Transition: Payment(Ready | Failed) -> Payment(Pending).
    ///
    /// A confirmed flow replays its confirmation for the key that paid and
    /// refuses any other key.
    pub fn begin_payment(&mut self, flow_id: &Uuid, idempotency_key: &str, reference: Option<String>) -> Result<PaymentStart, FlowError> {
        let amount = self.package.price;
        let currency = self.package.currency.clone();
        let flow = self.get_flow_mut(flow_id)?;

        match &flow.step {
            BookingStep::Payment(PaymentPhase::Ready) | BookingStep::Payment(PaymentPhase::Failed { .. }) => {}
            BookingStep::Payment(PaymentPhase::Pending { .. }) => return Err(FlowError::PaymentInProgress),
            BookingStep::Confirmation(confirmation) => {
                if confirmation.receipt.idempotency_key == idempotency_key {
                    return Ok(PaymentStart::Replay(confirmation.clone()));
                }
                return Err(FlowError::AlreadyConfirmed);
            }
            BookingStep::Booking => {
                return Err(FlowError::InvalidTransition {
                    from: "booking".to_string(),
                    to: "confirmation".to_string(),
                });
            }
        }

        let full_name = flow.form.full_name.trim().to_string();
        let email = Masked(flow.form.email.trim().to_string());
        let order = Order {
            booking_id: flow.id,
            idempotency_key: idempotency_key.to_string(),
            amount,
            currency,
            payer_name: full_name.clone(),
            payer_email: email.clone(),
            reference,
        };
        let booking = BookingRequest {
            booking_id: flow.id,
            full_name,
            email,
            timezone: flow.form.timezone.clone(),
            requested_at: chrono::Utc::now(),
        };

        flow.update_step(BookingStep::Payment(PaymentPhase::Pending {
            idempotency_key: idempotency_key.to_string(),
        }));
        Ok(PaymentStart::Started { order, booking })
    }

    /// Transition: Payment(Pending) -> Confirmation. Slots are frozen here.
    pub fn complete_payment(&mut self, flow_id: &Uuid, receipt: Receipt, sessions: ConfirmedSlots) -> Result<&Confirmation, FlowError> {
        let flow = self.get_flow_mut(flow_id)?;
        Self::expect_pending(flow, "confirmation")?;

        flow.update_step(BookingStep::Confirmation(Confirmation::new(receipt, sessions)));
        flow.confirmation().ok_or_else(|| FlowError::NotFound(flow_id.to_string()))
    }

    /// Transition: Payment(Pending) -> Payment(Failed).
    pub fn fail_payment(&mut self, flow_id: &Uuid, reason: String) -> Result<(), FlowError> {
        let flow = self.get_flow_mut(flow_id)?;
        Self::expect_pending(flow, "payment")?;

        flow.update_step(BookingStep::Payment(PaymentPhase::Failed { reason }));
        Ok(())
    }

    /// "Add to calendar": acknowledged, nothing is sent.
    pub fn acknowledge_calendar(&self, flow_id: &Uuid) -> Result<&'static str, FlowError> {
        let flow = self.get(flow_id)
            .ok_or_else(|| FlowError::NotFound(flow_id.to_string()))?;

        match flow.step {
            BookingStep::Confirmation(_) => Ok(CALENDAR_ACKNOWLEDGEMENT),
            ref other => Err(FlowError::InvalidTransition {
                from: other.name().to_string(),
                to: "calendar".to_string(),
            }),
        }
    }

    /// Leave the flow ("return home"). The next visit starts over.
    /// Refused while a payment is in flight.
    pub fn exit(&mut self, flow_id: &Uuid) -> Result<BookingFlow, FlowError> {
        let flow = self.get_flow_mut(flow_id)?;
        if matches!(flow.step, BookingStep::Payment(PaymentPhase::Pending { .. })) {
            return Err(FlowError::PaymentInProgress);
        }
        self.flows.remove(flow_id)
            .ok_or_else(|| FlowError::NotFound(flow_id.to_string()))
    }

    fn get_flow_mut(&mut self, flow_id: &Uuid) -> Result<&mut BookingFlow, FlowError> {
        self.flows.get_mut(flow_id)
            .ok_or_else(|| FlowError::NotFound(flow_id.to_string()))
    }

    fn expect_booking(flow: &BookingFlow, to: &str) -> Result<(), FlowError> {
        if flow.step != BookingStep::Booking {
            return Err(FlowError::InvalidTransition {
                from: flow.step.name().to_string(),
                to: to.to_string(),
            });
        }
        Ok(())
    }

    fn expect_pending(flow: &BookingFlow, to: &str) -> Result<(), FlowError> {
        if !matches!(flow.step, BookingStep::Payment(PaymentPhase::Pending { .. })) {
            return Err(FlowError::InvalidTransition {
                from: flow.step.name().to_string(),
                to: to.to_string(),
            });
        }
        Ok(())
    }
}

impl Default for FlowManager {
    fn default() -> Self {
        Self::new(Package::default())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FlowError {
    #[error("Booking flow not found: {0}")]
    NotFound(String),

    #[error("Invalid step transition from {from} to {to}")]
    InvalidTransition {
        from: String,
        to: String,
    },

    #[error("Payment is already being processed")]
    PaymentInProgress,

    #[error("Booking is already confirmed")]
    AlreadyConfirmed,

    #[error(transparent)]
    Field(#[from] CoreError),
}
