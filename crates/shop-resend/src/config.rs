//! # Resend Configuration
//!
//! Sender and recipient addresses tolerate sloppy environment values:
//! a bare from-address gets the shop name attached, and a recipient with
//! `Name <addr>` formatting is reduced to the bare address.

use shop_core::ShopError;
use std::env;

/// Default sender when `RESEND_FROM_EMAIL` is unset (Resend's onboarding
/// address, valid without a verified domain)
pub const DEFAULT_FROM_EMAIL: &str = "onboarding@resend.dev";

/// Default inbox for order notifications
pub const DEFAULT_ORDER_RECIPIENT: &str = "gatheredgrace.giving@gmail.com";

/// Resend API configuration
#[derive(Debug, Clone)]
pub struct ResendConfig {
    /// Secret API key (re_...)
    pub api_key: String,

    /// Normalized `From:` value, e.g. `Gathered Grace <hello@gatheredgrace.us>`
    pub from_email: String,

    /// Bare address that receives order-notification emails
    pub order_recipient: String,

    /// API base URL (for testing/mocking)
    pub api_base_url: String,
}

impl ResendConfig {
    /// Load configuration from environment variables.
    ///
    /// Required: `RESEND_API_KEY`. Optional: `RESEND_FROM_EMAIL`,
    /// `FORM_RECIPIENT_EMAIL`.
    pub fn from_env() -> Result<Self, ShopError> {
        dotenvy::dotenv().ok();

        let api_key = env::var("RESEND_API_KEY").map_err(|_| {
            ShopError::Configuration("RESEND_API_KEY environment variable is missing".to_string())
        })?;

        let from_email = normalize_from_email(env::var("RESEND_FROM_EMAIL").ok().as_deref());
        let order_recipient =
            normalize_recipient(env::var("FORM_RECIPIENT_EMAIL").ok().as_deref());

        Ok(Self {
            api_key,
            from_email,
            order_recipient,
            api_base_url: "https://api.resend.com".to_string(),
        })
    }

    /// Create config with explicit values (for testing)
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            from_email: normalize_from_email(None),
            order_recipient: normalize_recipient(None),
            api_base_url: "https://api.resend.com".to_string(),
        }
    }

    /// Get authorization header value
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.api_key)
    }

    /// Builder: set custom API base URL (for testing)
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }
}

/// Normalize the configured sender.
///
/// Empty/unset falls back to [`DEFAULT_FROM_EMAIL`]; a bare address is
/// wrapped as `Gathered Grace <addr>`; anything already carrying a
/// display name is kept as-is.
pub fn normalize_from_email(raw: Option<&str>) -> String {
    let value = match raw.map(str::trim) {
        Some(v) if !v.is_empty() => v,
        _ => DEFAULT_FROM_EMAIL,
    };

    if !value.contains('<') && !value.contains('>') && value.contains('@') {
        format!("Gathered Grace <{value}>")
    } else {
        value.to_string()
    }
}

/// Normalize the order-notification recipient to a bare address,
/// stripping any `Name <addr>` wrapper.
pub fn normalize_recipient(raw: Option<&str>) -> String {
    let value = match raw.map(str::trim) {
        Some(v) if !v.is_empty() => v,
        _ => DEFAULT_ORDER_RECIPIENT,
    };

    if let (Some(start), Some(end)) = (value.find('<'), value.rfind('>')) {
        if start < end {
            return value[start + 1..end].trim().to_string();
        }
    }
    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_from_address_gets_display_name() {
        assert_eq!(
            normalize_from_email(Some("hello@gatheredgrace.us")),
            "Gathered Grace <hello@gatheredgrace.us>"
        );
    }

    #[test]
    fn formatted_from_address_is_kept() {
        assert_eq!(
            normalize_from_email(Some("Shop <shop@example.com>")),
            "Shop <shop@example.com>"
        );
    }

    #[test]
    fn unset_from_address_uses_onboarding_default() {
        assert_eq!(
            normalize_from_email(None),
            "Gathered Grace <onboarding@resend.dev>"
        );
        assert_eq!(
            normalize_from_email(Some("   ")),
            "Gathered Grace <onboarding@resend.dev>"
        );
    }

    #[test]
    fn recipient_wrapper_is_stripped() {
        assert_eq!(
            normalize_recipient(Some("Gathered Grace <orders@example.com>")),
            "orders@example.com"
        );
        assert_eq!(
            normalize_recipient(Some("orders@example.com")),
            "orders@example.com"
        );
        assert_eq!(normalize_recipient(None), DEFAULT_ORDER_RECIPIENT);
    }

    #[test]
    fn from_env_missing_key() {
        std::env::remove_var("RESEND_API_KEY");

        let err = ResendConfig::from_env().unwrap_err();
        assert!(err.to_string().contains("RESEND_API_KEY"));
    }
}
