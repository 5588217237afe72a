//! Home page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::IntoResponse;

/// Template for the home page.
///
/// Renders `templates/home.html`: what the service does and how to embed it.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub version: &'static str,
}

/// Renders the home page.
///
/// # Endpoint
///
/// `GET /`
pub async fn home_handler() -> impl IntoResponse {
    HomeTemplate {
        version: env!("CARGO_PKG_VERSION"),
    }
}
