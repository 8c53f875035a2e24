//! # Gathered Grace
//!
//! Storefront backend for the Gathered Grace gift shop.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables
//! export STRIPE_SECRET_KEY=sk_test_...
//! export RESEND_API_KEY=re_...
//!
//! # Run the server
//! gathered-grace
//! ```

use shop_api::{routes, state::AppState};
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    print_banner();

    // Initialize application state
    let state = AppState::from_env();

    let addr = state.config.socket_addr()?;
    let is_prod = state.config.is_production();

    info!("Environment: {}", state.config.environment);
    info!("Storefront base URL: {}", state.config.base_url);
    info!("Stripe: {}", enabled(state.stripe.is_some()));
    info!("Resend: {}", enabled(state.mailer.is_some()));
    info!("Lead store: {}", enabled(state.leads.is_some()));

    // Create router
    let app = routes::create_router(state);

    // Start server
    info!("🎁 Gathered Grace starting on http://{}", addr);

    if !is_prod {
        info!("📝 Health: http://{}/health", addr);
        info!(
            "💳 Checkout: POST http://{}/api/create-checkout-session",
            addr
        );
        info!("✉️  Orders: POST http://{}/api/submit-form", addr);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn enabled(on: bool) -> &'static str {
    if on {
        "enabled"
    } else {
        "disabled"
    }
}

fn print_banner() {
    println!(
        r#"
  🎁 Gathered Grace 🎁
  ━━━━━━━━━━━━━━━━━━━━━
  Gift shop storefront backend
  Version: {}

"#,
        env!("CARGO_PKG_VERSION")
    );
}
