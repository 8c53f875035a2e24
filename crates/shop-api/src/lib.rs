//! # shop-api
//!
//! HTTP API layer for the Gathered Grace storefront.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - REST endpoints for checkout, order submission, and CSV export
//! - Best-effort lead forwarding for form submissions
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | POST | `/api/create-checkout-session` | Create Stripe checkout session |
//! | POST | `/api/submit-form` | Submit an order form |
//! | POST | `/api/send-discount-email` | Send the welcome discount |
//! | GET/POST | `/api/download-csv` | Export an order as CSV |

pub mod handlers;
pub mod leads;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppConfig, AppState};
