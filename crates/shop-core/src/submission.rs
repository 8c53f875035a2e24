//! # Order Form Submissions
//!
//! The custom-care order form payload shared by the notification email
//! and the CSV export, plus the email-address check used by the
//! discount-signup endpoint.

use crate::error::{ShopError, ShopResult};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// A submitted order form.
///
/// Every field defaults to empty on deserialization so that a sparse
/// payload still parses; [`OrderSubmission::validate`] enforces the
/// required trio afterwards.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderSubmission {
    #[serde(default)]
    pub recipient_name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub zip: String,
    #[serde(default)]
    pub recipient_email: Option<String>,
    #[serde(default)]
    pub occasion: Option<String>,
    #[serde(default)]
    pub season: Option<String>,
    #[serde(default)]
    pub comforts: Option<String>,
    #[serde(default)]
    pub card_message: Option<String>,
    #[serde(default)]
    pub name_on_card: String,
    #[serde(default)]
    pub budget: String,
    #[serde(default)]
    pub sender_name: String,
    #[serde(default)]
    pub sender_email: String,
    /// Honeypot. Hidden on the real form; bots fill it in.
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub source_page: Option<String>,
    #[serde(default)]
    pub kit_type: Option<String>,
}

impl OrderSubmission {
    /// True when the honeypot field was filled in
    pub fn is_spam(&self) -> bool {
        !self.website.is_empty()
    }

    /// Check the required fields (sender email/name, recipient name)
    pub fn validate(&self) -> ShopResult<()> {
        if self.sender_email.is_empty()
            || self.sender_name.is_empty()
            || self.recipient_name.is_empty()
        {
            return Err(ShopError::InvalidRequest("Missing required fields".into()));
        }
        Ok(())
    }
}

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"))
}

/// Lenient email shape check, matching what the signup form enforces.
pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email)
}
