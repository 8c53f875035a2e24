//! # shop-resend
//!
//! Resend transactional-email integration for the Gathered Grace
//! storefront: a thin client over `POST /emails` plus the two fixed
//! templates the shop sends (order notification, welcome discount).
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use shop_resend::{templates, EmailMessage, ResendMailer};
//!
//! let mailer = ResendMailer::from_env()?;
//! let rendered = templates::discount_email(Some("Ana"));
//!
//! let email_id = mailer.send(EmailMessage {
//!     to: "ana@example.com".into(),
//!     reply_to: None,
//!     subject: rendered.subject,
//!     html: rendered.html,
//!     text: rendered.text,
//! }).await?;
//! ```

pub mod client;
pub mod config;
pub mod templates;

// Re-exports
pub use client::{EmailMessage, ResendMailer};
pub use config::ResendConfig;
pub use templates::{discount_email, order_notification, RenderedEmail};
