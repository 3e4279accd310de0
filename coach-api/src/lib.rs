use axum::{http::Method, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod bookings;
pub mod contact;
pub mod error;
pub mod middleware;
pub mod sessions;
pub mod site;
pub mod state;
pub mod testimonials;
pub mod worker;

pub use state::AppState;

pub fn app(state: AppState) -> Router {
    // CORS Middleware
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE, Method::OPTIONS])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::USER_AGENT,
            axum::http::HeaderName::from_static(bookings::IDEMPOTENCY_HEADER),
        ]);

    Router::new()
        .merge(site::routes())
        .merge(sessions::routes())
        .merge(testimonials::routes())
        .merge(bookings::routes())
        .merge(contact::routes())
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::circuit_breaker_middleware,
        ))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
