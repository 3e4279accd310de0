use std::sync::Arc;
use std::time::Duration;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::NaiveDate;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;
use coach_api::{app, AppState};
use coach_booking::{SimulatedPaymentGateway, WeeklyScheduler};
use coach_store::app_config::Config;

fn test_app() -> Router {
    test_app_with_latency(0)
}

fn test_app_with_latency(payment_latency_ms: u64) -> Router {
    let mut config = Config::default();
    config.booking.payment_latency_ms = payment_latency_ms;
    config.contact.submit_latency_ms = 0;
    config.retry.base_delay_ms = 1;
    config.retry.max_delay_ms = 1;

    let gateway = Arc::new(SimulatedPaymentGateway::new(config.booking.payment_latency()));
    let scheduler = Arc::new(WeeklyScheduler::pinned(NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()));
    app(AppState::with_adapters(&config, gateway, scheduler))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>, headers: &[(&str, &str)]) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, value)
}

async fn set_field(app: &Router, id: &str, field: &str, value: &str) {
    let (status, _) = send(
        app,
        "PATCH",
        &format!("/v1/bookings/{}/fields", id),
        Some(json!({ "field": field, "value": value })),
        &[],
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

async fn next_event(body: &mut Body) -> Value {
    let frame = body.frame().await.unwrap().unwrap();
    let text = String::from_utf8(frame.into_data().unwrap().to_vec()).unwrap();
    let data = text
        .lines()
        .find_map(|line| line.strip_prefix("data:"))
        .unwrap();
    serde_json::from_str(data.trim_start()).unwrap()
}

/// Starts a flow, fills it in and moves it to the payment step.
async fn flow_at_payment(app: &Router) -> String {
    let (status, flow) = send(app, "POST", "/v1/bookings", None, &[]).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = flow["id"].as_str().unwrap().to_string();

    set_field(app, &id, "fullName", "  Jane Doe ").await;
    set_field(app, &id, "email", "jane@example.com").await;
    set_field(app, &id, "phone", "+1 555 0100").await;
    set_field(app, &id, "timezone", "America/New_York").await;

    let (status, flow) = send(app, "POST", &format!("/v1/bookings/{}/submit", id), None, &[]).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(flow["step"], "payment");
    id
}

#[tokio::test]
async fn test_health_and_site() {
    let app = test_app();

    let (status, body) = send(&app, "GET", "/health", None, &[]).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");

    let (status, site) = send(&app, "GET", "/v1/site", None, &[]).await;
    assert_eq!(status, StatusCode::OK);
    let labels: Vec<&str> = site["navigation"].as_array().unwrap().iter().map(|l| l["label"].as_str().unwrap()).collect();
    assert_eq!(labels, vec!["Home", "About", "Sessions", "Contact"]);
    assert_eq!(site["booking"]["path"], "/book");
    assert_eq!(site["contact_points"]["phone"]["href"], "tel:+14252097368");
    assert_eq!(site["contact_points"]["email"]["href"], "mailto:raysaranya@gmail.com");
}

#[tokio::test]
async fn test_sessions_catalog() {
    let app = test_app();
    let (status, body) = send(&app, "GET", "/v1/sessions", None, &[]).await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(body["package"]["price"], 300);
    assert_eq!(body["duration"], "3 × 60 minutes");
    assert_eq!(body["sessions"].as_array().unwrap().len(), 3);
    let samples = body["sample_availability"].as_array().unwrap();
    assert!(!samples.is_empty() && samples.len() <= 5);
}

#[tokio::test]
async fn test_testimonials_and_stream_first_event() {
    let app = test_app();
    let (status, body) = send(&app, "GET", "/v1/testimonials", None, &[]).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 5);

    let request = Request::builder().uri("/v1/testimonials/stream?start=2").body(Body::empty()).unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let mut body = response.into_body();
    let frame = body.frame().await.unwrap().unwrap();
    let text = String::from_utf8(frame.into_data().unwrap().to_vec()).unwrap();
    assert!(text.contains("event: testimonial"));
    assert!(text.contains("\"index\":2"));

    let (status, _) = send(&app, "GET", "/v1/testimonials/stream?start=5", None, &[]).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_full_booking_flow() {
    let app = test_app();
    let id = flow_at_payment(&app).await;

    let (_, flow) = send(&app, "GET", &format!("/v1/bookings/{}", id), None, &[]).await;
    assert_eq!(flow["phase"], "ready");
    assert_eq!(flow["summary"]["booking_name"], "Jane Doe");
    assert_eq!(flow["summary"]["total"], 300);

    let (status, flow) = send(&app, "POST", &format!("/v1/bookings/{}/pay", id), Some(json!({})), &[]).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(flow["step"], "confirmation");
    assert_eq!(flow["receipt"]["amount"], 300);
    assert_eq!(flow["checklist"].as_array().unwrap().len(), 4);

    let sessions = flow["sessions"].as_array().unwrap();
    assert_eq!(sessions.len(), 3);
    assert_eq!(sessions[0]["date_label"], "Monday, October 26, 2026");
    assert_eq!(sessions[0]["timezone"], "America/New_York");

    let (status, ack) = send(&app, "POST", &format!("/v1/bookings/{}/calendar", id), None, &[]).await;
    assert_eq!(status, StatusCode::OK);
    assert!(ack["message"].as_str().unwrap().starts_with("Calendar invites sent!"));

    let (status, _) = send(&app, "DELETE", &format!("/v1/bookings/{}", id), None, &[]).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, "GET", &format!("/v1/bookings/{}", id), None, &[]).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_submit_stays_on_booking() {
    let app = test_app();
    let (_, flow) = send(&app, "POST", "/v1/bookings", None, &[]).await;
    let id = flow["id"].as_str().unwrap().to_string();
    set_field(&app, &id, "email", "not-an-email").await;

    let (status, flow) = send(&app, "POST", &format!("/v1/bookings/{}/submit", id), None, &[]).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(flow["step"], "booking");
    assert_eq!(flow["errors"]["email"], "Invalid email address");
    assert_eq!(flow["errors"]["fullName"], "Full name is required");
    assert!(flow.get("summary").is_none());

    set_field(&app, &id, "fullName", "Jane").await;
    let (_, flow) = send(&app, "GET", &format!("/v1/bookings/{}", id), None, &[]).await;
    assert!(flow["errors"].get("fullName").is_none());
    assert!(flow["errors"].get("email").is_some());

    let (status, _) = send(&app, "POST", &format!("/v1/bookings/{}/pay", id), Some(json!({})), &[]).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(
        &app,
        "PATCH",
        &format!("/v1/bookings/{}/fields", id),
        Some(json!({ "field": "age", "value": "42" })),
        &[],
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_back_keeps_entered_values() {
    let app = test_app();
    let id = flow_at_payment(&app).await;

    let (status, flow) = send(&app, "POST", &format!("/v1/bookings/{}/back", id), None, &[]).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(flow["step"], "booking");
    assert_eq!(flow["form"]["email"], "jane@example.com");
    assert_eq!(flow["form"]["timezone"], "America/New_York");
}

#[tokio::test]
async fn test_pay_replays_for_same_key() {
    let app = test_app();
    let id = flow_at_payment(&app).await;
    let uri = format!("/v1/bookings/{}/pay", id);

    let (status, first) = send(&app, "POST", &uri, Some(json!({})), &[("Idempotency-Key", "order-1")]).await;
    assert_eq!(status, StatusCode::OK);

    let (status, replay) = send(&app, "POST", &uri, Some(json!({})), &[("Idempotency-Key", "order-1")]).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["receipt"]["receipt_id"], replay["receipt"]["receipt_id"]);

    let (status, _) = send(&app, "POST", &uri, Some(json!({})), &[("Idempotency-Key", "order-2")]).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_declined_payment_can_be_retried() {
    let app = test_app();
    let id = flow_at_payment(&app).await;
    let uri = format!("/v1/bookings/{}/pay", id);

    let (status, body) = send(&app, "POST", &uri, Some(json!({ "reference": "decline" })), &[]).await;
    assert_eq!(status, StatusCode::PAYMENT_REQUIRED);
    assert!(body["error"].is_string());

    let (_, flow) = send(&app, "GET", &format!("/v1/bookings/{}", id), None, &[]).await;
    assert_eq!(flow["step"], "payment");
    assert_eq!(flow["phase"], "failed");

    let (status, flow) = send(&app, "POST", &uri, Some(json!({})), &[]).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(flow["step"], "confirmation");
}

#[tokio::test]
async fn test_processor_outage_is_unavailable() {
    let app = test_app();
    let id = flow_at_payment(&app).await;

    let (status, _) = send(
        &app,
        "POST",
        &format!("/v1/bookings/{}/pay", id),
        Some(json!({ "reference": "fail-circuit" })),
        &[],
    )
    .await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_contact_form() {
    let app = test_app();

    let (status, body) = send(
        &app,
        "POST",
        "/v1/contact",
        Some(json!({ "name": "", "email": "jane@", "phone": "555", "message": "short" })),
        &[],
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["errors"]["name"], "Name is required");
    assert_eq!(body["errors"]["email"], "Invalid email address");
    assert_eq!(body["errors"]["message"], "Message must be at least 10 characters");
    assert!(body["errors"].get("phone").is_none());

    let (status, body) = send(
        &app,
        "POST",
        "/v1/contact",
        Some(json!({
            "name": "Jane",
            "email": "jane@example.com",
            "phone": "555-0100",
            "preferredContact": "phone",
            "message": "Can we talk about the package?"
        })),
        &[],
    )
    .await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(body["title"], "Message sent!");
    assert_eq!(body["form"]["name"], "");
    assert_eq!(body["form"]["preferredContact"], "email");
}

#[tokio::test]
async fn test_unknown_flow_is_not_found() {
    let app = test_app();
    let missing = uuid::Uuid::new_v4();
    let (status, _) = send(&app, "POST", &format!("/v1/bookings/{}/submit", missing), None, &[]).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_about_page() {
    let app = test_app();
    let (status, about) = send(&app, "GET", "/v1/about", None, &[]).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(about["coaches"][0]["name"], "Saranya Ray");
    assert_eq!(about["coaches"].as_array().unwrap().len(), 2);
    assert_eq!(about["outcomes"][0]["metric"], "85%");
    assert_eq!(about["differentiators"].as_array().unwrap().len(), 5);
}

#[tokio::test(start_paused = true)]
async fn test_testimonial_stream_rotates_and_wraps() {
    let app = test_app();
    let request = Request::builder().uri("/v1/testimonials/stream?start=2").body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let mut body = response.into_body();
    let first = next_event(&mut body).await;
    assert_eq!(first["index"], 2);
    assert_eq!(first["total"], 5);

    for expected in [3, 4, 0] {
        tokio::time::advance(Duration::from_millis(6000)).await;
        assert_eq!(next_event(&mut body).await["index"], expected);
    }
}

#[tokio::test(start_paused = true)]
async fn test_dropped_pay_request_still_settles() {
    let app = test_app_with_latency(1500);
    let id = flow_at_payment(&app).await;
    let uri = format!("/v1/bookings/{}/pay", id);

    let pay = send(&app, "POST", &uri, Some(json!({})), &[]);
    assert!(tokio::time::timeout(Duration::from_millis(100), pay).await.is_err());

    tokio::time::sleep(Duration::from_secs(10)).await;

    let (_, flow) = send(&app, "GET", &format!("/v1/bookings/{}", id), None, &[]).await;
    assert_eq!(flow["step"], "confirmation");
    let receipt_id = flow["receipt"]["receipt_id"].clone();

    let (status, replay) = send(&app, "POST", &uri, Some(json!({})), &[]).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(replay["receipt"]["receipt_id"], receipt_id);
}

#[tokio::test(start_paused = true)]
async fn test_exit_refused_while_paying() {
    let app = test_app_with_latency(1500);
    let id = flow_at_payment(&app).await;

    let pay_app = app.clone();
    let pay_uri = format!("/v1/bookings/{}/pay", id);
    let pay = tokio::spawn(async move { send(&pay_app, "POST", &pay_uri, Some(json!({})), &[]).await });

    tokio::time::sleep(Duration::from_millis(100)).await;
    let (status, body) = send(&app, "DELETE", &format!("/v1/bookings/{}", id), None, &[]).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Payment is already being processed");

    let (status, flow) = pay.await.unwrap();
    assert_eq!(status, StatusCode::OK);
    assert_eq!(flow["step"], "confirmation");

    let (status, _) = send(&app, "DELETE", &format!("/v1/bookings/{}", id), None, &[]).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}
