//! # Lead Store
//!
//! Best-effort forwarding of order submissions to a hosted lead table.
//! A failed or unconfigured store never fails the primary request; the
//! caller logs the error and moves on.

use reqwest::Client;
use serde_json::json;
use shop_core::{OrderSubmission, ShopError, ShopResult};
use tracing::{debug, instrument};

/// Client for the hosted lead table
pub struct LeadStore {
    client: Client,
    url: String,
    api_key: String,
}

impl LeadStore {
    /// Build from `LEAD_STORE_URL` / `LEAD_STORE_API_KEY`.
    /// Returns `None` when the URL is unset.
    pub fn from_env() -> Option<Self> {
        dotenvy::dotenv().ok();

        let url = std::env::var("LEAD_STORE_URL").ok()?;
        let api_key = std::env::var("LEAD_STORE_API_KEY").unwrap_or_default();

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .ok()?;

        Some(Self {
            client,
            url,
            api_key,
        })
    }

    /// Create with explicit values (for testing)
    pub fn new(url: impl Into<String>, api_key: impl Into<String>) -> ShopResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .map_err(|e| ShopError::Internal(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            url: url.into(),
            api_key: api_key.into(),
        })
    }

    /// Record one submission as a B2C lead.
    #[instrument(skip(self, submission), fields(sender = %submission.sender_email))]
    pub async fn save(&self, submission: &OrderSubmission) -> ShopResult<()> {
        let lead_type = submission
            .kit_type
            .as_deref()
            .map(|kit| format!("{}_form", kit.to_lowercase()))
            .unwrap_or_else(|| "order_form".to_string());

        let payload = json!({
            "email": submission.sender_email.trim(),
            "full_name": submission.sender_name.trim(),
            "lead_type": lead_type,
            "source_page": submission.source_page,
            "website_type": "b2c",
            "metadata": {
                "recipient_name": submission.recipient_name,
                "recipient_email": submission.recipient_email,
                "address": submission.address,
                "city": submission.city,
                "state": submission.state,
                "zip": submission.zip,
                "occasion": submission.occasion,
                "card_message": submission.card_message,
                "name_on_card": submission.name_on_card,
                "budget": submission.budget,
            },
        });

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| ShopError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ShopError::Provider {
                provider: "lead-store".to_string(),
                message: format!("HTTP {status}: {body}"),
                code: None,
            });
        }

        debug!("lead saved");
        Ok(())
    }
}
