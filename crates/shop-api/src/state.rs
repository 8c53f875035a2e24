//! # Application State
//!
//! Shared state for the Axum application: the optional Stripe and
//! Resend clients, the optional lead store, and server configuration.
//!
//! Clients are built once at startup. A missing credential leaves the
//! corresponding client unset and logs a warning; the matching endpoints
//! answer with a "not configured" error instead of the process crashing.

use crate::leads::LeadStore;
use shop_resend::ResendMailer;
use shop_stripe::StripeCheckout;
use std::sync::Arc;
use tracing::warn;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Base URL of the storefront, used for checkout redirect URLs
    pub base_url: String,
    /// Environment (development, staging, production)
    pub environment: String,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            base_url: std::env::var("BASE_URL")
                .unwrap_or_else(|_| "https://gatheredgrace.us".to_string()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<std::net::SocketAddr> {
        Ok(format!("{}:{}", self.host, self.port).parse()?)
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Stripe checkout client, `None` when `STRIPE_SECRET_KEY` is unset
    pub stripe: Option<Arc<StripeCheckout>>,
    /// Resend mailer, `None` when `RESEND_API_KEY` is unset
    pub mailer: Option<Arc<ResendMailer>>,
    /// Best-effort lead store, `None` when `LEAD_STORE_URL` is unset
    pub leads: Option<Arc<LeadStore>>,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Build state from the environment. Never fails: unconfigured
    /// providers are logged and left unset.
    pub fn from_env() -> Self {
        let config = AppConfig::from_env();

        let stripe = match StripeCheckout::from_env() {
            Ok(client) => Some(Arc::new(client)),
            Err(e) => {
                warn!("Stripe disabled: {e}");
                None
            }
        };

        let mailer = match ResendMailer::from_env() {
            Ok(client) => Some(Arc::new(client)),
            Err(e) => {
                warn!("Resend disabled: {e}");
                None
            }
        };

        let leads = LeadStore::from_env().map(Arc::new);
        if leads.is_none() {
            warn!("Lead store disabled: LEAD_STORE_URL is unset");
        }

        Self {
            stripe,
            mailer,
            leads,
            config,
        }
    }

    /// Success redirect for Stripe, with the session-ID placeholder the
    /// provider substitutes on completion
    pub fn success_url(&self) -> String {
        format!(
            "{}/?success=true&session_id={{CHECKOUT_SESSION_ID}}",
            self.config.base_url
        )
    }

    /// Cancel redirect for Stripe
    pub fn cancel_url(&self) -> String {
        format!("{}/build-custom-kit?canceled=true", self.config.base_url)
    }
}
