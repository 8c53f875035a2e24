//! # shop-core
//!
//! Core types for the Gathered Grace storefront backend.
//!
//! This crate provides:
//! - [`pricing`] — the order pricing calculator (kit types, price table,
//!   line items, totals)
//! - [`submission`] — the order-form payload, honeypot check, and email
//!   validation
//! - [`export`] — RFC 4180 CSV rendering of a submission
//! - [`error`] — `ShopError` for typed error handling
//!
//! ## Example
//!
//! ```rust
//! use shop_core::{price_order, OrderSelection};
//!
//! let selection = OrderSelection {
//!     eye_pillow: true,
//!     custom_fabric: true,
//!     ..OrderSelection::build_custom()
//! };
//!
//! let priced = price_order(&selection).unwrap();
//! assert_eq!(priced.total_cents, 2700);
//! ```

pub mod error;
pub mod export;
pub mod pricing;
pub mod submission;

// Re-exports for convenience
pub use error::{ShopError, ShopResult};
pub use export::{csv_filename, generate_csv, CSV_HEADERS};
pub use pricing::{
    price_order, KitType, LineItem, LineItemKind, OrderSelection, PricedOrder,
};
pub use submission::{is_valid_email, OrderSubmission};
