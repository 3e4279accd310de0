use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use coach_catalog::{about_page, AboutPage};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct NavLink {
    pub label: &'static str,
    pub path: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ContactPoint {
    pub label: String,
    pub href: String,
}

#[derive(Debug, Serialize)]
pub struct ContactPoints {
    pub phone: ContactPoint,
    pub email: ContactPoint,
    pub social: ContactPoint,
}

#[derive(Debug, Serialize)]
pub struct SiteResponse {
    pub navigation: Vec<NavLink>,
    pub booking: NavLink,
    pub contact_points: ContactPoints,
}

pub const NAVIGATION: [NavLink; 4] = [
    NavLink { label: "Home", path: "/" },
    NavLink { label: "About", path: "/about" },
    NavLink { label: "Sessions", path: "/sessions" },
    NavLink { label: "Contact", path: "/contact" },
];

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/v1/site", get(site_info))
        .route("/v1/about", get(about))
}

async fn health() -> &'static str {
    "ok"
}

/// GET /v1/about
async fn about() -> Json<AboutPage> {
    Json(about_page())
}

/// GET /v1/site
/// Navigation and the static outbound contact points
async fn site_info(State(state): State<AppState>) -> Json<SiteResponse> {
    let contact = &state.contact;
    let social_label = contact
        .social_url
        .trim_start_matches("https://")
        .trim_start_matches("www.")
        .trim_end_matches('/')
        .to_string();

    Json(SiteResponse {
        navigation: NAVIGATION.into_iter().collect(),
        booking: NavLink { label: "Book Now", path: "/book" },
        contact_points: ContactPoints {
            phone: ContactPoint { label: contact.phone.clone(), href: format!("tel:{}", contact.phone) },
            email: ContactPoint { label: contact.email.clone(), href: format!("mailto:{}", contact.email) },
            social: ContactPoint { label: social_label, href: contact.social_url.clone() },
        },
    })
}
