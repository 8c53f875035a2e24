//! # shop-stripe
//!
//! Stripe Checkout Sessions integration for the Gathered Grace
//! storefront.
//!
//! One call, one session: [`StripeCheckout::create_session`] takes a
//! priced order plus submission metadata and returns the hosted payment
//! page URL. Standard kits reference catalog price IDs from the
//! environment; build-your-own orders send inline price data.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use shop_stripe::{SessionRequest, StripeCheckout};
//! use shop_core::{price_order, OrderSelection};
//!
//! let stripe = StripeCheckout::from_env()?;
//!
//! let selection = OrderSelection { eye_pillow: true, ..OrderSelection::build_custom() };
//! let priced = price_order(&selection)?;
//!
//! let session = stripe.create_session(SessionRequest {
//!     selection: &selection,
//!     priced: &priced,
//!     customer_email: None,
//!     form_data: serde_json::json!({}),
//!     success_url: "https://gatheredgrace.us/?success=true".into(),
//!     cancel_url: "https://gatheredgrace.us/build-custom-kit?canceled=true".into(),
//! }).await?;
//!
//! // Redirect the shopper to session.url
//! ```

pub mod checkout;
pub mod config;

// Re-exports
pub use checkout::{CheckoutSession, SessionRequest, StripeCheckout};
pub use config::StripeConfig;
