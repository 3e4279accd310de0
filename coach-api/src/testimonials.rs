use std::convert::Infallible;
use std::sync::Arc;
use axum::{
    extract::{Query, State},
    response::sse::{Event, KeepAlive, Sse},
    routing::get,
    Json, Router,
};
use futures_util::stream::{self, Stream, StreamExt};
use serde::{Deserialize, Serialize};
use tokio_stream::wrappers::IntervalStream;
use coach_catalog::{testimonials, Testimonial, TestimonialRotator};
use crate::{error::AppError, state::AppState};

#[derive(Debug, Deserialize)]
pub struct StreamQuery {
    pub start: Option<usize>,
}

#[derive(Debug, Serialize)]
struct ActiveTestimonial<'a> {
    index: usize,
    total: usize,
    testimonial: &'a Testimonial,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/testimonials", get(list_testimonials))
        .route("/v1/testimonials/stream", get(stream_testimonials))
}

async fn list_testimonials() -> Json<Vec<Testimonial>> {
    Json(testimonials())
}

fn testimonial_event(list: &[Testimonial], index: usize) -> Event {
    let payload = ActiveTestimonial { index, total: list.len(), testimonial: &list[index] };
    Event::default()
        .event("testimonial")
        .json_data(&payload)
        .unwrap_or_else(|e| {
            tracing::warn!("Failed to encode testimonial {}: {}", index, e);
            Event::default().event("testimonial").data(index.to_string())
        })
}

/// GET /v1/testimonials/stream?start=i
/// Sends the active testimonial now, then advances it every rotation period.
/// The interval belongs to the response stream and stops when the client goes away.
async fn stream_testimonials(
    State(state): State<AppState>,
    Query(query): Query<StreamQuery>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, AppError> {
    let list = Arc::new(testimonials());
    let mut rotator = TestimonialRotator::starting_at(list.len(), query.start.unwrap_or(0))?;

    let period = state.rotation_interval;
    let ticks = IntervalStream::new(tokio::time::interval_at(tokio::time::Instant::now() + period, period));

    let first = testimonial_event(&list, rotator.index());
    let rotating = ticks.map(move |_| Ok::<_, Infallible>(testimonial_event(&list, rotator.tick())));

    Ok(Sse::new(stream::once(async move { Ok::<_, Infallible>(first) }).chain(rotating)).keep_alive(KeepAlive::default()))
}
