//! # Stripe Configuration
//!
//! Configuration for the Stripe integration. The secret key comes from
//! the environment; kit price IDs fall back to placeholder defaults so a
//! development environment works without a full Stripe catalog.

use shop_core::{KitType, ShopError};
use std::env;

/// Stripe API configuration
#[derive(Debug, Clone)]
pub struct StripeConfig {
    /// Secret API key (sk_test_... or sk_live_...)
    pub secret_key: String,

    /// API base URL (for testing/mocking)
    pub api_base_url: String,

    /// API version
    pub api_version: String,

    /// Price ID for the Rest Kit
    pub rest_kit_price_id: String,
    /// Price ID for the Reflect Kit
    pub reflect_kit_price_id: String,
    /// Price ID for the Restore Kit
    pub restore_kit_price_id: String,
    /// Price ID for the Rest Kit fabric upcharge
    pub rest_kit_fabric_price_id: String,
    /// Price ID for the Reflect Kit fabric upcharge
    pub reflect_kit_fabric_price_id: String,
    /// Price ID for the Restore Kit fabric upcharge
    pub restore_kit_fabric_price_id: String,
}

fn env_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

impl StripeConfig {
    /// Load configuration from environment variables.
    ///
    /// Required: `STRIPE_SECRET_KEY`. The six `STRIPE_*_PRICE_ID`
    /// variables are optional and default to placeholder IDs.
    pub fn from_env() -> Result<Self, ShopError> {
        dotenvy::dotenv().ok();

        let secret_key = env::var("STRIPE_SECRET_KEY").map_err(|_| {
            ShopError::Configuration("STRIPE_SECRET_KEY environment variable is missing".to_string())
        })?;

        if !secret_key.starts_with("sk_test_") && !secret_key.starts_with("sk_live_") {
            return Err(ShopError::Configuration(
                "STRIPE_SECRET_KEY must start with sk_test_ or sk_live_".to_string(),
            ));
        }

        Ok(Self {
            secret_key,
            api_base_url: "https://api.stripe.com".to_string(),
            api_version: "2024-12-18.acacia".to_string(),
            rest_kit_price_id: env_or("STRIPE_REST_KIT_PRICE_ID", "price_rest_kit"),
            reflect_kit_price_id: env_or("STRIPE_REFLECT_KIT_PRICE_ID", "price_reflect_kit"),
            restore_kit_price_id: env_or("STRIPE_RESTORE_KIT_PRICE_ID", "price_restore_kit"),
            rest_kit_fabric_price_id: env_or(
                "STRIPE_REST_KIT_CUSTOM_FABRIC_PRICE_ID",
                "price_rest_kit_custom_fabric",
            ),
            reflect_kit_fabric_price_id: env_or(
                "STRIPE_REFLECT_KIT_CUSTOM_FABRIC_PRICE_ID",
                "price_reflect_kit_custom_fabric",
            ),
            restore_kit_fabric_price_id: env_or(
                "STRIPE_RESTORE_KIT_CUSTOM_FABRIC_PRICE_ID",
                "price_restore_kit_custom_fabric",
            ),
        })
    }

    /// Create config with an explicit secret key and default price IDs
    /// (for testing)
    pub fn new(secret_key: impl Into<String>) -> Self {
        Self {
            secret_key: secret_key.into(),
            api_base_url: "https://api.stripe.com".to_string(),
            api_version: "2024-12-18.acacia".to_string(),
            rest_kit_price_id: "price_rest_kit".to_string(),
            reflect_kit_price_id: "price_reflect_kit".to_string(),
            restore_kit_price_id: "price_restore_kit".to_string(),
            rest_kit_fabric_price_id: "price_rest_kit_custom_fabric".to_string(),
            reflect_kit_fabric_price_id: "price_reflect_kit_custom_fabric".to_string(),
            restore_kit_fabric_price_id: "price_restore_kit_custom_fabric".to_string(),
        }
    }

    /// Configured price ID for a standard kit, `None` for build-your-own
    pub fn kit_price_id(&self, kit: KitType) -> Option<&str> {
        match kit {
            KitType::Rest => Some(&self.rest_kit_price_id),
            KitType::Reflect => Some(&self.reflect_kit_price_id),
            KitType::Restore => Some(&self.restore_kit_price_id),
            KitType::BuildCustom => None,
        }
    }

    /// Configured fabric-upcharge price ID for a standard kit
    pub fn fabric_price_id(&self, kit: KitType) -> Option<&str> {
        match kit {
            KitType::Rest => Some(&self.rest_kit_fabric_price_id),
            KitType::Reflect => Some(&self.reflect_kit_fabric_price_id),
            KitType::Restore => Some(&self.restore_kit_fabric_price_id),
            KitType::BuildCustom => None,
        }
    }

    /// Check if using test keys
    pub fn is_test_mode(&self) -> bool {
        self.secret_key.starts_with("sk_test_")
    }

    /// Get authorization header value
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.secret_key)
    }

    /// Builder: set custom API base URL (for testing)
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_ids_per_kit() {
        let config = StripeConfig::new("sk_test_abc123");
        assert_eq!(config.kit_price_id(KitType::Rest), Some("price_rest_kit"));
        assert_eq!(
            config.fabric_price_id(KitType::Restore),
            Some("price_restore_kit_custom_fabric")
        );
        assert_eq!(config.kit_price_id(KitType::BuildCustom), None);
        assert_eq!(config.fabric_price_id(KitType::BuildCustom), None);
    }

    #[test]
    fn auth_header() {
        let config = StripeConfig::new("sk_test_abc123");
        assert!(config.is_test_mode());
        assert_eq!(config.auth_header(), "Bearer sk_test_abc123");
    }

    #[test]
    fn from_env_missing_key() {
        std::env::remove_var("STRIPE_SECRET_KEY");

        let err = StripeConfig::from_env().unwrap_err();
        assert_eq!(err.status_code(), 500);
        assert!(err.to_string().contains("STRIPE_SECRET_KEY"));
    }
}
