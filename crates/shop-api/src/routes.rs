//! # Routes
//!
//! Axum router configuration for the storefront API.

use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the main application router
///
/// Routes:
/// - GET  /health - Health check
/// - POST /api/create-checkout-session - Stripe checkout for a kit order
/// - POST /api/submit-form - Order-form submission (notification email)
/// - POST /api/send-discount-email - Welcome-discount signup
/// - GET  /api/download-csv - Order CSV from a base64 query parameter
/// - POST /api/download-csv - Order CSV from a JSON body
pub fn create_router(state: AppState) -> Router {
    // CORS is wide open; the API serves the public storefront
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route(
            "/create-checkout-session",
            post(handlers::create_checkout_session),
        )
        .route("/submit-form", post(handlers::submit_form))
        .route("/send-discount-email", post(handlers::send_discount_email))
        .route(
            "/download-csv",
            get(handlers::download_csv_get).post(handlers::download_csv_post),
        );

    Router::new()
        .route("/health", get(handlers::health))
        .route("/", get(handlers::health))
        .nest("/api", api_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
