//! # Stripe Checkout Sessions
//!
//! Creates hosted checkout sessions from a priced order. One remote
//! session is created per call; duplicate submissions create duplicate
//! sessions (no idempotency key is sent).

use crate::config::StripeConfig;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use shop_core::{LineItemKind, OrderSelection, PricedOrder, ShopError, ShopResult};
use tracing::{debug, error, info, instrument};

/// Everything needed to create one checkout session
#[derive(Debug, Clone)]
pub struct SessionRequest<'a> {
    pub selection: &'a OrderSelection,
    pub priced: &'a PricedOrder,
    /// Prefill for the Stripe email field (usually the sender's address)
    pub customer_email: Option<String>,
    /// Raw form payload, forwarded opaquely in session metadata
    pub form_data: Value,
    pub success_url: String,
    pub cancel_url: String,
}

/// A created checkout session: the redirect target for the shopper
#[derive(Debug, Clone)]
pub struct CheckoutSession {
    pub session_id: String,
    pub url: String,
}

/// Client for the Stripe Checkout Sessions API
pub struct StripeCheckout {
    config: StripeConfig,
    client: Client,
}

impl StripeCheckout {
    pub fn new(config: StripeConfig) -> ShopResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| ShopError::Internal(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { config, client })
    }

    /// Create from environment variables
    pub fn from_env() -> ShopResult<Self> {
        Self::new(StripeConfig::from_env()?)
    }

    /// Encode line items as Stripe form parameters.
    ///
    /// Standard-kit and standard-kit-fabric lines reference the catalog
    /// price IDs; everything else carries inline price data.
    fn push_line_items(
        &self,
        params: &mut Vec<(String, String)>,
        selection: &OrderSelection,
        priced: &PricedOrder,
    ) {
        for (i, item) in priced.line_items.iter().enumerate() {
            let price_id = match item.kind {
                LineItemKind::StandardKit => self.config.kit_price_id(selection.kit_type),
                LineItemKind::FabricUpcharge if selection.kit_type.is_standard() => {
                    self.config.fabric_price_id(selection.kit_type)
                }
                _ => None,
            };

            if let Some(id) = price_id {
                params.push((format!("line_items[{i}][price]"), id.to_string()));
            } else {
                params.push((
                    format!("line_items[{i}][price_data][currency]"),
                    "usd".to_string(),
                ));
                params.push((
                    format!("line_items[{i}][price_data][unit_amount]"),
                    item.unit_amount.to_string(),
                ));
                params.push((
                    format!("line_items[{i}][price_data][product_data][name]"),
                    item.name.clone(),
                ));
                if let Some(ref desc) = item.description {
                    params.push((
                        format!("line_items[{i}][price_data][product_data][description]"),
                        desc.clone(),
                    ));
                }
            }
            params.push((format!("line_items[{i}][quantity]"), "1".to_string()));
        }
    }

    /// Create a checkout session and return its redirect URL.
    #[instrument(skip(self, request), fields(kit_type = request.selection.kit_type.as_str()))]
    pub async fn create_session(&self, request: SessionRequest<'_>) -> ShopResult<CheckoutSession> {
        if request.priced.is_empty() {
            return Err(ShopError::InvalidRequest("Order has no items".to_string()));
        }

        debug!(
            items = request.priced.line_items.len(),
            total_cents = request.priced.total_cents,
            "creating Stripe checkout session"
        );

        let mut params: Vec<(String, String)> = vec![
            ("payment_method_types[0]".to_string(), "card".to_string()),
            ("mode".to_string(), "payment".to_string()),
            ("success_url".to_string(), request.success_url.clone()),
            ("cancel_url".to_string(), request.cancel_url.clone()),
            (
                "shipping_address_collection[allowed_countries][0]".to_string(),
                "US".to_string(),
            ),
        ];

        self.push_line_items(&mut params, request.selection, request.priced);

        if let Some(ref email) = request.customer_email {
            params.push(("customer_email".to_string(), email.clone()));
        }

        // Metadata surfaces in the Stripe dashboard for fulfillment
        params.push((
            "metadata[kit_type]".to_string(),
            request.selection.kit_type.as_str().to_string(),
        ));
        params.push((
            "metadata[custom_fabric]".to_string(),
            if request.selection.custom_fabric { "yes" } else { "no" }.to_string(),
        ));
        params.push((
            "metadata[custom_budget]".to_string(),
            request.selection.custom_budget.clone().unwrap_or_default(),
        ));
        params.push((
            "metadata[form_data]".to_string(),
            request.form_data.to_string(),
        ));

        let url = format!("{}/v1/checkout/sessions", self.config.api_base_url);

        let response = self
            .client
            .post(&url)
            .header("Authorization", self.config.auth_header())
            .header("Stripe-Version", &self.config.api_version)
            .form(&params)
            .send()
            .await
            .map_err(|e| ShopError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ShopError::Network(e.to_string()))?;

        if !status.is_success() {
            error!(%status, %body, "Stripe API error");

            if let Ok(error_response) = serde_json::from_str::<StripeErrorResponse>(&body) {
                return Err(ShopError::Provider {
                    provider: "stripe".to_string(),
                    message: error_response.error.message,
                    code: error_response.error.code,
                });
            }

            return Err(ShopError::Provider {
                provider: "stripe".to_string(),
                message: format!("HTTP {status}: {body}"),
                code: None,
            });
        }

        let session: StripeSessionResponse = serde_json::from_str(&body)
            .map_err(|e| ShopError::Serialization(format!("failed to parse Stripe response: {e}")))?;

        info!(session_id = %session.id, "created Stripe checkout session");

        Ok(CheckoutSession {
            session_id: session.id,
            url: session.url,
        })
    }
}

// =============================================================================
// Stripe API Types
// =============================================================================

#[derive(Debug, Deserialize)]
struct StripeSessionResponse {
    id: String,
    url: String,
}

#[derive(Debug, Deserialize)]
struct StripeErrorResponse {
    error: StripeError,
}

#[derive(Debug, Deserialize)]
struct StripeError {
    message: String,
    #[serde(default)]
    code: Option<String>,
}
