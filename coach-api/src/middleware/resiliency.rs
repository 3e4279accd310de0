use axum::{
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CircuitState {
    Closed,   // Normal operation
    Open,     // Failing fast
    HalfOpen, // Letting one probe through
}

pub struct CircuitBreaker {
    pub name: String,
    state: RwLock<CircuitState>,
    failure_count: AtomicUsize,
    failure_threshold: usize,
    reset_timeout: Duration,
    opened_at: RwLock<Option<Instant>>,
}

impl CircuitBreaker {
    pub fn new(name: &str, threshold: usize, timeout: Duration) -> Self {
        Self {
            name: name.to_string(),
            state: RwLock::new(CircuitState::Closed),
            failure_count: AtomicUsize::new(0),
            failure_threshold: threshold.max(1),
            reset_timeout: timeout,
            opened_at: RwLock::new(None),
        }
    }

    pub async fn state(&self) -> CircuitState {
        *self.state.read().await
    }

    /// Whether a call may go through. An open breaker whose timeout has
    /// elapsed moves to half-open and admits the caller as the probe.
    pub async fn allow(&self) -> bool {
        match *self.state.read().await {
            CircuitState::Closed | CircuitState::HalfOpen => return true,
            CircuitState::Open => {}
        }

        let opened_at = *self.opened_at.read().await;
        if opened_at.is_some_and(|at| at.elapsed() > self.reset_timeout) {
            *self.state.write().await = CircuitState::HalfOpen;
            tracing::info!("Circuit Breaker [{}] moving to Half-Open", self.name);
            return true;
        }
        false
    }

    pub async fn record_success(&self) {
        let mut state = self.state.write().await;
        if *state == CircuitState::HalfOpen {
            tracing::info!("Circuit Breaker [{}] recovered to Closed", self.name);
        }
        *state = CircuitState::Closed;
        self.failure_count.store(0, Ordering::SeqCst);
    }

    pub async fn record_failure(&self) {
        let count = self.failure_count.fetch_add(1, Ordering::SeqCst) + 1;
        let mut state = self.state.write().await;

        if count >= self.failure_threshold || *state == CircuitState::HalfOpen {
            *state = CircuitState::Open;
            *self.opened_at.write().await = Some(Instant::now());
            tracing::error!("Circuit Breaker [{}] TRIPPED to Open. Failures: {}", self.name, count);
        }
    }
}

/// Breakers guarding the outbound collaborators.
pub struct Resiliency {
    pub payment_cb: CircuitBreaker,
}

impl Default for Resiliency {
    fn default() -> Self {
        Self {
            payment_cb: CircuitBreaker::new("payment", 5, Duration::from_secs(30)),
        }
    }
}

/// Fails fast on the pay endpoint while the payment breaker is open. A
/// declined card (402) is the payer's problem and does not count.
pub async fn circuit_breaker_middleware(
    State(state): State<AppState>,
    req: Request<axum::body::Body>,
    next: Next,
) -> impl IntoResponse {
    let path = req.uri().path();
    if !(path.starts_with("/v1/bookings/") && path.ends_with("/pay")) {
        return next.run(req).await.into_response();
    }

    let cb = &state.resiliency.payment_cb;
    if !cb.allow().await {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "error": format!("Circuit Breaker [{}] is OPEN", cb.name) })),
        )
            .into_response();
    }

    let response = next.run(req).await;
    if response.status().is_server_error() {
        cb.record_failure().await;
    } else {
        cb.record_success().await;
    }
    response.into_response()
}
