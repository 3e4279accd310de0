use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde::Serialize;
use uuid::Uuid;
use coach_core::forms::ContactForm;
use coach_core::validation::contact_schema;
use coach_shared::models::events::{ContactSubmittedEvent, NotificationEvent};
use coach_shared::pii::Masked;
use crate::{error::AppError, state::AppState};

pub const SENT_TITLE: &str = "Message sent!";
pub const SENT_DESCRIPTION: &str = "Thank you for reaching out. We'll get back to you within 24 hours.";

#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub inquiry_id: Uuid,
    pub title: &'static str,
    pub description: &'static str,
    /// Cleared form, ready for another message.
    pub form: ContactForm,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/contact", post(submit_contact))
}

/// POST /v1/contact
/// Validate, simulate delivery, then hand the inquiry to the notification worker.
/// Nothing is persisted.
async fn submit_contact(
    State(state): State<AppState>,
    Json(form): Json<ContactForm>,
) -> Result<(StatusCode, Json<ContactResponse>), AppError> {
    let errors = contact_schema().validate(&form);
    if !errors.is_empty() {
        return Err(AppError::Invalid(errors));
    }

    tokio::time::sleep(state.contact.submit_latency()).await;

    let inquiry_id = Uuid::new_v4();
    let event = ContactSubmittedEvent {
        inquiry_id,
        name: form.name.trim().to_string(),
        email: Masked(form.email.trim().to_string()),
        phone: Masked(form.phone.trim().to_string()),
        preferred_contact: form.preferred_contact.clone(),
        message_length: form.message.trim().chars().count(),
        timestamp: chrono::Utc::now().timestamp(),
    };
    state.events.publish(NotificationEvent::ContactSubmitted(event));
    tracing::info!("Contact inquiry {} accepted", inquiry_id);

    Ok((
        StatusCode::ACCEPTED,
        Json(ContactResponse {
            inquiry_id,
            title: SENT_TITLE,
            description: SENT_DESCRIPTION,
            form: ContactForm::default(),
        }),
    ))
}
