use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::{get, patch, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use coach_booking::{BookingFlow, BookingStep, FlowManager, OrderSummary, PaymentStart};
use coach_core::forms::BookingForm;
use coach_core::payment::Order;
use coach_core::scheduling::BookingRequest;
use coach_core::validation::ValidationErrors;
use coach_shared::models::events::{BookingConfirmedEvent, NotificationEvent};
use crate::{error::AppError, state::AppState};

pub const IDEMPOTENCY_HEADER: &str = "idempotency-key";

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct UpdateFieldRequest {
    pub field: String,
    pub value: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PayRequest {
    /// Passed through to the processor.
    pub reference: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct FlowView {
    pub id: Uuid,
    #[serde(flatten)]
    pub step: BookingStep,
    pub form: BookingForm,
    pub errors: ValidationErrors,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<OrderSummary>,
}

#[derive(Debug, Serialize)]
pub struct CalendarResponse {
    pub message: &'static str,
}

impl FlowView {
    fn build(manager: &FlowManager, flow: &BookingFlow) -> Self {
        let summary = match flow.step {
            BookingStep::Payment(_) => manager.order_summary(&flow.id).ok(),
            _ => None,
        };
        Self {
            id: flow.id,
            step: flow.step.clone(),
            form: flow.form.clone(),
            errors: flow.errors.clone(),
            summary,
        }
    }
}

fn view(manager: &FlowManager, flow_id: &Uuid) -> Result<FlowView, AppError> {
    let flow = manager
        .get(flow_id)
        .ok_or_else(|| AppError::NotFound(format!("Booking flow not found: {}", flow_id)))?;
    Ok(FlowView::build(manager, flow))
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/bookings", post(start_booking))
        .route("/v1/bookings/{id}", get(get_booking).delete(exit_booking))
        .route("/v1/bookings/{id}/fields", patch(update_field))
        .route("/v1/bookings/{id}/submit", post(submit_booking))
        .route("/v1/bookings/{id}/back", post(back_to_booking))
        .route("/v1/bookings/{id}/pay", post(pay_booking))
        .route("/v1/bookings/{id}/calendar", post(add_to_calendar))
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /v1/bookings
/// Enter the booking flow with an empty form
async fn start_booking(State(state): State<AppState>) -> Result<(StatusCode, Json<FlowView>), AppError> {
    let mut flows = state.flows.lock().await;
    let id = flows.start().id;
    tracing::info!("Booking flow {} started", id);
    Ok((StatusCode::CREATED, Json(view(&flows, &id)?)))
}

/// GET /v1/bookings/:id
async fn get_booking(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<FlowView>, AppError> {
    let flows = state.flows.lock().await;
    Ok(Json(view(&flows, &id)?))
}

/// PATCH /v1/bookings/:id/fields
/// Edit one field; its inline error, if any, is cleared
async fn update_field(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateFieldRequest>,
) -> Result<Json<FlowView>, AppError> {
    let mut flows = state.flows.lock().await;
    flows.update_field(&id, &req.field, req.value)?;
    Ok(Json(view(&flows, &id)?))
}

/// POST /v1/bookings/:id/submit
/// Validates the whole form. Advances to payment only when it is clean;
/// otherwise the view carries the per-field messages.
async fn submit_booking(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<FlowView>, AppError> {
    let mut flows = state.flows.lock().await;
    if flows.submit(&id)? {
        tracing::info!("Booking flow {} moved to payment", id);
    } else {
        tracing::debug!("Booking flow {} failed validation", id);
    }
    Ok(Json(view(&flows, &id)?))
}

/// POST /v1/bookings/:id/back
async fn back_to_booking(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<FlowView>, AppError> {
    let mut flows = state.flows.lock().await;
    flows.back(&id)?;
    Ok(Json(view(&flows, &id)?))
}

/// POST /v1/bookings/:id/pay
/// Pays and books the sessions. The `Idempotency-Key` header defaults to the
/// flow id; repeating a confirmed key replays the confirmation.
async fn pay_booking(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    Json(req): Json<PayRequest>,
) -> Result<Json<FlowView>, AppError> {
    let idempotency_key = headers
        .get(IDEMPOTENCY_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| id.to_string());

    // 1. Move to Pending under the lock; the checkout itself runs without it.
    let start = state.flows.lock().await.begin_payment(&id, &idempotency_key, req.reference)?;
    let (order, booking) = match start {
        PaymentStart::Started { order, booking } => (order, booking),
        PaymentStart::Replay(_) => {
            tracing::info!("Replaying confirmation for booking {}", id);
            let flows = state.flows.lock().await;
            return Ok(Json(view(&flows, &id)?));
        }
    };

    // 2. Checkout and settlement are detached; a dropped request still
    // leaves the flow confirmed or failed.
    let task = tokio::spawn(settle_checkout(state.clone(), order, booking));

    match task.await {
        Ok(settled) => settled?,
        Err(e) => {
            if let Err(err) = state.flows.lock().await.fail_payment(&id, "Payment could not be completed".to_string()) {
                tracing::warn!("Could not release booking {} after checkout task failure: {}", id, err);
            }
            return Err(AppError::InternalServerError(format!("Checkout task failed: {}", e)));
        }
    }

    let flows = state.flows.lock().await;
    Ok(Json(view(&flows, &id)?))
}

/// Runs the checkout, then moves the flow out of Pending and publishes the
/// confirmation.
async fn settle_checkout(state: AppState, order: Order, booking: BookingRequest) -> Result<(), AppError> {
    let id = booking.booking_id;
    let outcome = state.checkout.checkout(&order, &booking).await;

    let mut flows = state.flows.lock().await;
    match outcome {
        Ok(outcome) => {
            let confirmation = flows.complete_payment(&id, outcome.receipt, outcome.sessions)?;
            let event = BookingConfirmedEvent {
                booking_id: id,
                receipt_id: confirmation.receipt.receipt_id.clone(),
                full_name: booking.full_name,
                email: booking.email,
                timezone: booking.timezone,
                amount: confirmation.receipt.amount,
                currency: confirmation.receipt.currency.clone(),
                session_dates: confirmation.sessions.date_labels(),
                timestamp: chrono::Utc::now().timestamp(),
            };
            state.events.publish(NotificationEvent::BookingConfirmed(event));
            tracing::info!("Booking {} confirmed", id);
            Ok(())
        }
        Err(e) => {
            flows.fail_payment(&id, e.to_string())?;
            Err(e.into())
        }
    }
}

/// POST /v1/bookings/:id/calendar
async fn add_to_calendar(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CalendarResponse>, AppError> {
    let flows = state.flows.lock().await;
    let message = flows.acknowledge_calendar(&id)?;
    Ok(Json(CalendarResponse { message }))
}

/// DELETE /v1/bookings/:id
/// Return home; the flow and its entered values are discarded
async fn exit_booking(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.flows.lock().await.exit(&id)?;
    tracing::info!("Booking flow {} closed", id);
    Ok(StatusCode::NO_CONTENT)
}
