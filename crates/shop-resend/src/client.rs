//! # Resend Client
//!
//! Thin wrapper over the Resend `/emails` endpoint. One delivery attempt
//! per call; no retry, no queue, no delivery tracking.

use crate::config::ResendConfig;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use shop_core::{ShopError, ShopResult};
use tracing::{error, info, instrument};

/// An email ready to send
#[derive(Debug, Clone)]
pub struct EmailMessage {
    pub to: String,
    pub reply_to: Option<String>,
    pub subject: String,
    pub html: String,
    pub text: String,
}

/// Client for the Resend transactional-email API
pub struct ResendMailer {
    config: ResendConfig,
    client: Client,
}

impl ResendMailer {
    pub fn new(config: ResendConfig) -> ShopResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| ShopError::Internal(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { config, client })
    }

    /// Create from environment variables
    pub fn from_env() -> ShopResult<Self> {
        Self::new(ResendConfig::from_env()?)
    }

    /// Address that receives order-notification emails
    pub fn order_recipient(&self) -> &str {
        &self.config.order_recipient
    }

    /// Send one email and return the provider's email ID.
    #[instrument(skip(self, message), fields(to = %message.to, subject = %message.subject))]
    pub async fn send(&self, message: EmailMessage) -> ShopResult<String> {
        let payload = SendEmailRequest {
            from: &self.config.from_email,
            to: &message.to,
            reply_to: message.reply_to.as_deref(),
            subject: &message.subject,
            html: &message.html,
            text: &message.text,
        };

        let url = format!("{}/emails", self.config.api_base_url);

        let response = self
            .client
            .post(&url)
            .header("Authorization", self.config.auth_header())
            .json(&payload)
            .send()
            .await
            .map_err(|e| ShopError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ShopError::Network(e.to_string()))?;

        if !status.is_success() {
            error!(%status, %body, "Resend API error");

            let message = serde_json::from_str::<ResendErrorResponse>(&body)
                .map(|e| e.message)
                .unwrap_or_else(|_| format!("HTTP {status}: {body}"));

            return Err(ShopError::Provider {
                provider: "resend".to_string(),
                message,
                code: None,
            });
        }

        let sent: SendEmailResponse = serde_json::from_str(&body)
            .map_err(|e| ShopError::Serialization(format!("failed to parse Resend response: {e}")))?;

        info!(email_id = %sent.id, "email sent");
        Ok(sent.id)
    }
}

#[derive(Debug, Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<&'a str>,
    subject: &'a str,
    html: &'a str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct SendEmailResponse {
    id: String,
}

#[derive(Debug, Deserialize)]
struct ResendErrorResponse {
    message: String,
}
