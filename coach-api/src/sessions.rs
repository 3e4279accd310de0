use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use coach_catalog::{sample_slots, sessions, CoachingSession, Package, SampleSlot};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SessionsResponse {
    pub package: Package,
    pub duration: String,
    pub sessions: Vec<CoachingSession>,
    pub sample_availability: Vec<SampleSlot>,
    pub availability_note: &'static str,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/sessions", get(list_sessions))
}

/// GET /v1/sessions
/// Package, session details and illustrative (non-bookable) availability
async fn list_sessions(State(state): State<AppState>) -> Json<SessionsResponse> {
    let package = state.flows.lock().await.package().clone();
    let today = chrono::Local::now().date_naive();
    let sample_availability = sample_slots(today, &mut rand::thread_rng());

    Json(SessionsResponse {
        duration: package.duration_label(),
        package,
        sessions: sessions(),
        sample_availability,
        availability_note: "Example availability for next week (UTC timezone). Actual slots assigned after booking.",
    })
}
