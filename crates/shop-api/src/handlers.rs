//! # Request Handlers
//!
//! Axum request handlers for the storefront API: checkout-session
//! creation, order-form submission, discount signup, and CSV export.

use crate::state::AppState;
use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use shop_core::{
    csv_filename, generate_csv, is_valid_email, price_order, KitType, OrderSelection,
    OrderSubmission, ShopError,
};
use shop_resend::{templates, EmailMessage};
use shop_stripe::SessionRequest;
use std::collections::HashMap;
use tracing::{error, info, instrument, warn};

// =============================================================================
// Request/Response Types
// =============================================================================

/// Create checkout request, field names matching the storefront forms
#[derive(Debug, Deserialize)]
pub struct CreateCheckoutRequest {
    #[serde(rename = "kitType")]
    pub kit_type: Option<String>,
    #[serde(rename = "basePrice")]
    pub base_price: Option<i64>,
    #[serde(rename = "customFabric", default)]
    pub custom_fabric: bool,
    #[serde(rename = "customBudget")]
    pub custom_budget: Option<String>,
    #[serde(default)]
    pub items_eye_pillow: bool,
    #[serde(default)]
    pub items_balm: bool,
    #[serde(default)]
    pub items_journal: bool,
    #[serde(default)]
    pub items_custom_gift: bool,
    /// Raw form payload, forwarded opaquely in session metadata
    #[serde(rename = "formData")]
    pub form_data: Option<Value>,
}

/// Create checkout response
#[derive(Debug, Serialize)]
pub struct CreateCheckoutResponse {
    #[serde(rename = "sessionId")]
    pub session_id: String,
    pub url: String,
}

/// Discount signup request
#[derive(Debug, Deserialize)]
pub struct DiscountEmailRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// Success body for the email-sending endpoints
#[derive(Debug, Serialize)]
pub struct EmailOkResponse {
    pub ok: bool,
    pub message: String,
    #[serde(rename = "emailId", skip_serializing_if = "Option::is_none")]
    pub email_id: Option<String>,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

type HandlerError = (StatusCode, Json<ErrorResponse>);

fn bad_request(error: impl Into<String>) -> HandlerError {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(error)))
}

/// Map a `ShopError` to a response. Client errors carry their own
/// message in `error`; server-side failures get the endpoint's context
/// label with the underlying message attached for diagnostics.
fn shop_error_to_response(context: &str, err: ShopError) -> HandlerError {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let body = if err.is_client_error() {
        ErrorResponse::new(err.to_string())
    } else {
        ErrorResponse::new(context).with_message(err.to_string())
    };
    (status, Json(body))
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "gathered-grace",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Create a Stripe checkout session for a kit order
#[instrument(skip(state, request), fields(kit_type = request.kit_type.as_deref().unwrap_or("")))]
pub async fn create_checkout_session(
    State(state): State<AppState>,
    Json(request): Json<CreateCheckoutRequest>,
) -> Result<Json<CreateCheckoutResponse>, HandlerError> {
    let stripe = state.stripe.clone().ok_or_else(|| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(
                ErrorResponse::new("Stripe not configured")
                    .with_message("STRIPE_SECRET_KEY environment variable is missing"),
            ),
        )
    })?;

    let kit_type = request
        .kit_type
        .as_deref()
        .ok_or_else(|| bad_request("Missing required field: kitType"))?;
    let kit_type = KitType::parse(kit_type)
        .map_err(|e| shop_error_to_response("Failed to create checkout session", e))?;

    let selection = OrderSelection {
        kit_type,
        base_price: request.base_price,
        custom_fabric: request.custom_fabric,
        custom_budget: request.custom_budget.clone(),
        eye_pillow: request.items_eye_pillow,
        balm: request.items_balm,
        journal: request.items_journal,
        custom_gift: request.items_custom_gift,
    };

    let priced = price_order(&selection)
        .map_err(|e| shop_error_to_response("Failed to create checkout session", e))?;

    let form_data = request.form_data.unwrap_or_else(|| serde_json::json!({}));
    let customer_email = form_data
        .get("sender_email")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    info!(
        items = priced.line_items.len(),
        total_cents = priced.total_cents,
        "creating checkout session"
    );

    let session = stripe
        .create_session(SessionRequest {
            selection: &selection,
            priced: &priced,
            customer_email,
            form_data,
            success_url: state.success_url(),
            cancel_url: state.cancel_url(),
        })
        .await
        .map_err(|e| {
            error!("failed to create checkout session: {e}");
            shop_error_to_response("Failed to create checkout session", e)
        })?;

    Ok(Json(CreateCheckoutResponse {
        session_id: session.session_id,
        url: session.url,
    }))
}

/// Accept an order-form submission and email the shop a summary.
///
/// Honeypot submissions get a fake success with zero outbound calls.
/// The lead store is best effort; an email failure, by contrast, is
/// propagated so the shopper sees the submission did not go through.
#[instrument(skip(state, submission))]
pub async fn submit_form(
    State(state): State<AppState>,
    Json(submission): Json<OrderSubmission>,
) -> Result<Json<EmailOkResponse>, HandlerError> {
    if submission.is_spam() {
        info!("honeypot field set, dropping submission");
        return Ok(Json(EmailOkResponse {
            ok: true,
            message: "Spam detected".to_string(),
            email_id: None,
        }));
    }

    submission
        .validate()
        .map_err(|e| shop_error_to_response("Failed to process form submission", e))?;

    // Best-effort lead capture; never blocks the customer
    if let Some(leads) = &state.leads {
        if let Err(e) = leads.save(&submission).await {
            warn!("lead store save failed (non-blocking): {e}");
        }
    }

    let mailer = state.mailer.clone().ok_or_else(|| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(
                ErrorResponse::new("Email service not configured")
                    .with_message("RESEND_API_KEY environment variable is missing"),
            ),
        )
    })?;

    let rendered = templates::order_notification(&submission, Utc::now());
    let email_id = mailer
        .send(EmailMessage {
            to: mailer.order_recipient().to_string(),
            reply_to: Some(submission.sender_email.clone()),
            subject: rendered.subject,
            html: rendered.html,
            text: rendered.text,
        })
        .await
        .map_err(|e| {
            error!("failed to send order notification: {e}");
            shop_error_to_response("Failed to send email", e)
        })?;

    Ok(Json(EmailOkResponse {
        ok: true,
        message: "Form submitted successfully".to_string(),
        email_id: Some(email_id),
    }))
}

/// Send the welcome-discount email to a newsletter signup
#[instrument(skip(state, request))]
pub async fn send_discount_email(
    State(state): State<AppState>,
    Json(request): Json<DiscountEmailRequest>,
) -> Result<Json<EmailOkResponse>, HandlerError> {
    let email = request
        .email
        .as_deref()
        .filter(|e| !e.is_empty())
        .ok_or_else(|| bad_request("Email is required"))?;

    if !is_valid_email(email) {
        return Err(bad_request("Invalid email address"));
    }

    let mailer = state.mailer.clone().ok_or_else(|| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(
                ErrorResponse::new("Email service not configured")
                    .with_message("RESEND_API_KEY environment variable is missing"),
            ),
        )
    })?;

    let rendered = templates::discount_email(request.name.as_deref());
    let email_id = mailer
        .send(EmailMessage {
            to: email.to_string(),
            reply_to: None,
            subject: rendered.subject,
            html: rendered.html,
            text: rendered.text,
        })
        .await
        .map_err(|e| {
            error!("failed to send discount email: {e}");
            shop_error_to_response("Failed to send email", e)
        })?;

    Ok(Json(EmailOkResponse {
        ok: true,
        message: "Email sent successfully".to_string(),
        email_id: Some(email_id),
    }))
}

fn csv_response(submission: &OrderSubmission) -> Result<impl IntoResponse, HandlerError> {
    submission
        .validate()
        .map_err(|e| shop_error_to_response("Failed to generate CSV", e))?;

    let now = Utc::now();
    let content = generate_csv(submission, now);
    let filename = csv_filename(&submission.recipient_name, now);

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        content,
    ))
}

/// Download an order as CSV; the form payload arrives base64-encoded in
/// the `data` query parameter
#[instrument(skip(params))]
pub async fn download_csv_get(
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, HandlerError> {
    let encoded = params
        .get("data")
        .ok_or_else(|| bad_request("Missing form data parameter"))?;

    let submission = BASE64
        .decode(encoded)
        .ok()
        .and_then(|bytes| serde_json::from_slice::<OrderSubmission>(&bytes).ok())
        .ok_or_else(|| bad_request("Invalid form data format"))?;

    csv_response(&submission)
}

/// Download an order as CSV from a JSON body
#[instrument(skip(submission))]
pub async fn download_csv_post(
    Json(submission): Json<OrderSubmission>,
) -> Result<impl IntoResponse, HandlerError> {
    csv_response(&submission)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::create_router;
    use crate::state::{AppConfig, AppState};
    use axum_test::TestServer;
    use serde_json::json;
    use shop_resend::{ResendConfig, ResendMailer};
    use shop_stripe::{StripeCheckout, StripeConfig};
    use std::sync::Arc;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config() -> AppConfig {
        AppConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            base_url: "https://gatheredgrace.us".to_string(),
            environment: "test".to_string(),
        }
    }

    fn bare_state() -> AppState {
        AppState {
            stripe: None,
            mailer: None,
            leads: None,
            config: test_config(),
        }
    }

    fn server_with(state: AppState) -> TestServer {
        TestServer::new(create_router(state)).unwrap()
    }

    fn stripe_backed_by(mock: &MockServer) -> Arc<StripeCheckout> {
        let config = StripeConfig::new("sk_test_abc").with_api_base_url(mock.uri());
        Arc::new(StripeCheckout::new(config).unwrap())
    }

    fn mailer_backed_by(mock: &MockServer) -> Arc<ResendMailer> {
        let config = ResendConfig::new("re_test").with_api_base_url(mock.uri());
        Arc::new(ResendMailer::new(config).unwrap())
    }

    #[tokio::test]
    async fn checkout_without_stripe_is_a_config_error() {
        let server = server_with(bare_state());

        let response = server
            .post("/api/create-checkout-session")
            .json(&json!({"kitType": "build_custom", "items_balm": true}))
            .await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = response.json();
        assert_eq!(body["error"], "Stripe not configured");
        assert_eq!(
            body["message"],
            "STRIPE_SECRET_KEY environment variable is missing"
        );
    }

    #[tokio::test]
    async fn checkout_missing_kit_type() {
        let mock = MockServer::start().await;
        let state = AppState {
            stripe: Some(stripe_backed_by(&mock)),
            ..bare_state()
        };
        let server = server_with(state);

        let response = server
            .post("/api/create-checkout-session")
            .json(&json!({"customFabric": true}))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["error"], "Missing required field: kitType");
    }

    #[tokio::test]
    async fn checkout_standard_kit_without_base_price() {
        let mock = MockServer::start().await;
        let state = AppState {
            stripe: Some(stripe_backed_by(&mock)),
            ..bare_state()
        };
        let server = server_with(state);

        let response = server
            .post("/api/create-checkout-session")
            .json(&json!({"kitType": "rest"}))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(
            body["error"],
            "Missing required field: basePrice for standard kits"
        );
    }

    #[tokio::test]
    async fn checkout_happy_path_returns_session_and_url() {
        let mock = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/checkout/sessions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "cs_test_789",
                "url": "https://checkout.stripe.com/c/pay/cs_test_789"
            })))
            .expect(1)
            .mount(&mock)
            .await;

        let state = AppState {
            stripe: Some(stripe_backed_by(&mock)),
            ..bare_state()
        };
        let server = server_with(state);

        let response = server
            .post("/api/create-checkout-session")
            .json(&json!({
                "kitType": "build_custom",
                "items_eye_pillow": true,
                "items_balm": true,
                "customFabric": true,
                "formData": {"sender_email": "sam@example.com"}
            }))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["sessionId"], "cs_test_789");
        assert_eq!(body["url"], "https://checkout.stripe.com/c/pay/cs_test_789");
    }

    #[tokio::test]
    async fn honeypot_submission_fakes_success_with_no_outbound_calls() {
        let mock = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock)
            .await;

        let state = AppState {
            mailer: Some(mailer_backed_by(&mock)),
            ..bare_state()
        };
        let server = server_with(state);

        let response = server
            .post("/api/submit-form")
            .json(&json!({
                "sender_name": "Bot",
                "sender_email": "bot@spam.example",
                "recipient_name": "Anyone",
                "website": "http://spam.example"
            }))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["ok"], true);
        assert_eq!(body["message"], "Spam detected");
        assert!(body.get("emailId").is_none());
    }

    #[tokio::test]
    async fn submit_form_sends_notification_email() {
        let mock = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/emails"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"id": "em_order_1"})),
            )
            .expect(1)
            .mount(&mock)
            .await;

        let state = AppState {
            mailer: Some(mailer_backed_by(&mock)),
            ..bare_state()
        };
        let server = server_with(state);

        let response = server
            .post("/api/submit-form")
            .json(&json!({
                "sender_name": "Sam Smith",
                "sender_email": "sam@example.com",
                "recipient_name": "Jane Doe",
                "address": "12 Main St",
                "city": "Portland",
                "state": "OR",
                "zip": "97201",
                "budget": "$20-$30",
                "name_on_card": "Include my name"
            }))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["ok"], true);
        assert_eq!(body["message"], "Form submitted successfully");
        assert_eq!(body["emailId"], "em_order_1");
    }

    #[tokio::test]
    async fn submit_form_missing_required_fields() {
        let server = server_with(bare_state());

        let response = server
            .post("/api/submit-form")
            .json(&json!({"sender_name": "Sam Smith"}))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["error"], "Missing required fields");
    }

    #[tokio::test]
    async fn submit_form_propagates_email_failure() {
        let mock = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/emails"))
            .respond_with(ResponseTemplate::new(422).set_body_json(json!({
                "statusCode": 422,
                "name": "validation_error",
                "message": "The `from` field is invalid"
            })))
            .mount(&mock)
            .await;

        let state = AppState {
            mailer: Some(mailer_backed_by(&mock)),
            ..bare_state()
        };
        let server = server_with(state);

        let response = server
            .post("/api/submit-form")
            .json(&json!({
                "sender_name": "Sam Smith",
                "sender_email": "sam@example.com",
                "recipient_name": "Jane Doe"
            }))
            .await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = response.json();
        assert_eq!(body["error"], "Failed to send email");
        assert_eq!(body["message"], "The `from` field is invalid");
    }

    #[tokio::test]
    async fn discount_email_validation() {
        let server = server_with(bare_state());

        let missing = server.post("/api/send-discount-email").json(&json!({})).await;
        missing.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(missing.json::<Value>()["error"], "Email is required");

        let invalid = server
            .post("/api/send-discount-email")
            .json(&json!({"email": "not-an-email"}))
            .await;
        invalid.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(invalid.json::<Value>()["error"], "Invalid email address");
    }

    #[tokio::test]
    async fn discount_email_happy_path() {
        let mock = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/emails"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"id": "em_discount_1"})),
            )
            .expect(1)
            .mount(&mock)
            .await;

        let state = AppState {
            mailer: Some(mailer_backed_by(&mock)),
            ..bare_state()
        };
        let server = server_with(state);

        let response = server
            .post("/api/send-discount-email")
            .json(&json!({"email": "ana@example.com", "name": "Ana"}))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["ok"], true);
        assert_eq!(body["message"], "Email sent successfully");
        assert_eq!(body["emailId"], "em_discount_1");
    }

    #[tokio::test]
    async fn download_csv_post_returns_attachment() {
        let server = server_with(bare_state());

        let response = server
            .post("/api/download-csv")
            .json(&json!({
                "sender_name": "Sam Smith",
                "sender_email": "sam@example.com",
                "recipient_name": "Jane Doe",
                "city": "Portland"
            }))
            .await;

        response.assert_status_ok();
        assert_eq!(
            response.header("content-type").to_str().unwrap(),
            "text/csv; charset=utf-8"
        );
        let disposition = response.header("content-disposition");
        let disposition = disposition.to_str().unwrap();
        assert!(disposition.starts_with("attachment; filename=\"gathered-grace-order-jane-doe-"));

        let body = response.text();
        assert!(body.starts_with("Sender Name,Sender Email,"));
        assert!(body.contains("Sam Smith,sam@example.com,Jane Doe"));
    }

    #[tokio::test]
    async fn download_csv_get_decodes_base64_payload() {
        let server = server_with(bare_state());

        let payload = json!({
            "sender_name": "Sam Smith",
            "sender_email": "sam@example.com",
            "recipient_name": "Jane Doe"
        });
        let encoded = BASE64.encode(payload.to_string());

        let response = server
            .get("/api/download-csv")
            .add_query_param("data", &encoded)
            .await;

        response.assert_status_ok();
        assert!(response.text().contains("Jane Doe"));
    }

    #[tokio::test]
    async fn download_csv_get_rejects_bad_payloads() {
        let server = server_with(bare_state());

        let missing = server.get("/api/download-csv").await;
        missing.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(
            missing.json::<Value>()["error"],
            "Missing form data parameter"
        );

        let garbled = server
            .get("/api/download-csv")
            .add_query_param("data", "%%%not-base64%%%")
            .await;
        garbled.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(garbled.json::<Value>()["error"], "Invalid form data format");
    }

    #[tokio::test]
    async fn download_csv_missing_required_fields() {
        let server = server_with(bare_state());

        let response = server
            .post("/api/download-csv")
            .json(&json!({"sender_email": "sam@example.com"}))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(
            response.json::<Value>()["error"],
            "Missing required fields"
        );
    }

    #[tokio::test]
    async fn health_reports_service_name() {
        let server = server_with(bare_state());

        let response = server.get("/health").await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["service"], "gathered-grace");
        assert_eq!(body["status"], "healthy");
    }
}
