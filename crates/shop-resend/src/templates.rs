//! # Email Templates
//!
//! Fixed HTML/plain-text templates for the two emails the shop sends:
//! the internal order notification and the welcome-discount email.

use chrono::{DateTime, Utc};
use shop_core::OrderSubmission;

/// Rendered email body pair
#[derive(Debug, Clone)]
pub struct RenderedEmail {
    pub subject: String,
    pub html: String,
    pub text: String,
}

fn optional_field(label: &str, value: &Option<String>) -> String {
    match value {
        Some(v) if !v.is_empty() => format!(
            r#"<div class="field"><div class="label">{label}:</div><div class="value">{v}</div></div>"#
        ),
        _ => String::new(),
    }
}

fn optional_line(label: &str, value: &Option<String>) -> String {
    match value {
        Some(v) if !v.is_empty() => format!("{label}: {v}\n"),
        _ => String::new(),
    }
}

/// Render the internal order-notification email for one submission.
pub fn order_notification(
    submission: &OrderSubmission,
    submitted_at: DateTime<Utc>,
) -> RenderedEmail {
    let subject = format!(
        "🎁 New Gift Order from {} - {}",
        submission.sender_name, submission.recipient_name
    );
    let submitted = submitted_at.format("%Y-%m-%d %H:%M:%S UTC");

    let card_section = match &submission.card_message {
        Some(message) if !message.is_empty() => format!(
            r#"<div class="section">
      <div class="section-title">💌 Card Message</div>
      <div class="field"><div class="label">Message:</div><div class="value">{message}</div></div>
      <div class="field"><div class="label">Name on Card:</div><div class="value">{name_on_card}</div></div>
    </div>"#,
            name_on_card = submission.name_on_card,
        ),
        _ => String::new(),
    };

    let footer = match &submission.source_page {
        Some(source) if !source.is_empty() => format!(
            r#"<div class="footer">
      <p><strong>Source Page:</strong> {source}</p>
      <p><strong>Submitted:</strong> {submitted}</p>
    </div>"#
        ),
        _ => String::new(),
    };

    let html = format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <style>
    body {{ font-family: Arial, sans-serif; line-height: 1.6; color: #333; }}
    .container {{ max-width: 600px; margin: 0 auto; padding: 20px; }}
    .header {{ background-color: #f5f5f5; padding: 20px; border-radius: 8px; margin-bottom: 20px; }}
    .section {{ margin-bottom: 25px; padding: 15px; background-color: #fafafa; border-radius: 5px; }}
    .section-title {{ font-size: 18px; font-weight: bold; margin-bottom: 10px; color: #2c3e50; }}
    .field {{ margin-bottom: 12px; }}
    .label {{ font-weight: bold; color: #555; }}
    .value {{ margin-top: 4px; color: #333; }}
    .footer {{ margin-top: 30px; padding-top: 20px; border-top: 1px solid #ddd; font-size: 12px; color: #666; }}
  </style>
</head>
<body>
  <div class="container">
    <div class="header">
      <h1>🎁 New Gathered Grace Gift Order</h1>
      <p>You have received a new custom care gift form submission.</p>
    </div>

    <div class="section">
      <div class="section-title">👤 Sender Information</div>
      <div class="field"><div class="label">Name:</div><div class="value">{sender_name}</div></div>
      <div class="field"><div class="label">Email:</div><div class="value">{sender_email}</div></div>
    </div>

    <div class="section">
      <div class="section-title">📍 Recipient Details</div>
      <div class="field"><div class="label">Recipient Name:</div><div class="value">{recipient_name}</div></div>
      <div class="field"><div class="label">Shipping Address:</div><div class="value">{address}<br>{city}, {state} {zip}</div></div>
      {recipient_email}
    </div>

    <div class="section">
      <div class="section-title">💝 Gift Details</div>
      {occasion}
      {season}
      {comforts}
      <div class="field"><div class="label">Budget for Custom Gift:</div><div class="value">{budget}</div></div>
    </div>

    {card_section}

    {footer}
  </div>
</body>
</html>"#,
        sender_name = submission.sender_name,
        sender_email = submission.sender_email,
        recipient_name = submission.recipient_name,
        address = submission.address,
        city = submission.city,
        state = submission.state,
        zip = submission.zip,
        recipient_email = optional_field("Recipient Email", &submission.recipient_email),
        occasion = optional_field("Occasion", &submission.occasion),
        season = optional_field("Current Season/Situation", &submission.season),
        comforts = optional_field("Comforts/Preferences", &submission.comforts),
        budget = submission.budget,
    );

    let card_text = match &submission.card_message {
        Some(message) if !message.is_empty() => format!(
            "\nCARD MESSAGE\nMessage: {message}\nName on Card: {name_on_card}\n",
            name_on_card = submission.name_on_card
        ),
        _ => String::new(),
    };

    let text = format!(
        "New Gathered Grace Gift Order\n\n\
         SENDER INFORMATION\n\
         Name: {sender_name}\n\
         Email: {sender_email}\n\n\
         RECIPIENT DETAILS\n\
         Name: {recipient_name}\n\
         Address: {address}\n\
         {city}, {state} {zip}\n\
         {recipient_email}\n\
         GIFT DETAILS\n\
         {occasion}{season}{comforts}\
         Budget: {budget}\n\
         {card_text}\n\
         {source}Submitted: {submitted}",
        sender_name = submission.sender_name,
        sender_email = submission.sender_email,
        recipient_name = submission.recipient_name,
        address = submission.address,
        city = submission.city,
        state = submission.state,
        zip = submission.zip,
        recipient_email = optional_line("Email", &submission.recipient_email),
        occasion = optional_line("Occasion", &submission.occasion),
        season = optional_line("Season/Situation", &submission.season),
        comforts = optional_line("Comforts", &submission.comforts),
        budget = submission.budget,
        source = optional_line("Source", &submission.source_page),
    );

    RenderedEmail {
        subject,
        html,
        text,
    }
}

/// Render the welcome email carrying the `WELCOME10` discount code.
pub fn discount_email(name: Option<&str>) -> RenderedEmail {
    let greeting = match name {
        Some(n) if !n.is_empty() => format!("Hi {n}"),
        _ => "Hello".to_string(),
    };

    let subject = "🎁 Welcome to Gathered Grace - Your 10% Discount Inside!".to_string();

    let html = format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <style>
    body {{ font-family: Georgia, serif; line-height: 1.6; color: #333; background-color: #f9f9f9; margin: 0; padding: 0; }}
    .container {{ max-width: 600px; margin: 40px auto; background-color: #ffffff; border-radius: 8px; overflow: hidden; }}
    .header {{ background: linear-gradient(135deg, #8b5a5a 0%, #6a0505 100%); color: white; padding: 40px 30px; text-align: center; }}
    .content {{ padding: 40px 30px; }}
    .greeting {{ font-size: 18px; margin-bottom: 20px; color: #6a0505; }}
    .discount-box {{ background: linear-gradient(135deg, #f5e6e6 0%, #fef3f3 100%); border-left: 4px solid #6a0505; padding: 25px; margin: 30px 0; text-align: center; border-radius: 4px; }}
    .discount-code {{ font-size: 32px; font-weight: bold; color: #6a0505; letter-spacing: 2px; font-family: 'Courier New', monospace; }}
    .cta-button {{ display: inline-block; padding: 15px 40px; background-color: #6a0505; color: white !important; text-decoration: none; border-radius: 5px; }}
    .footer {{ background-color: #f9f9f9; padding: 30px; text-align: center; font-size: 13px; color: #666; border-top: 1px solid #e0e0e0; }}
  </style>
</head>
<body>
  <div class="container">
    <div class="header">
      <h1>Welcome to Gathered Grace 🎁</h1>
      <p>Your 10% discount is ready!</p>
    </div>

    <div class="content">
      <div class="greeting">{greeting},</div>

      <p>Thank you for joining our community! We're delighted to welcome you.</p>
      <p>At Gathered Grace, we believe in the power of thoughtful care and meaningful connection. Each gift we create is designed to bring comfort, rest, and encouragement to those you care about.</p>

      <div class="discount-box">
        <div>Your Exclusive Discount Code</div>
        <div class="discount-code">WELCOME10</div>
        <div>Save 10% on your first order</div>
      </div>

      <p>Use this code at checkout to receive 10% off your first purchase. Whether you're choosing a curated care kit or building a custom gift, we're here to help you create something truly special.</p>

      <div style="text-align: center; margin: 30px 0;">
        <a href="https://gatheredgrace.us/shop" class="cta-button">Start Shopping</a>
      </div>

      <p style="font-size: 14px; color: #666;">Questions or need help choosing the perfect gift? We're here for you. Simply reply to this email.</p>
    </div>

    <div class="footer">
      <p><strong>Gathered Grace</strong></p>
      <p>Thoughtful gifts for meaningful connection</p>
      <p><a href="https://gatheredgrace.us">Visit our website</a></p>
      <p style="font-size: 11px; color: #999;">You're receiving this email because you signed up for our newsletter. If you'd like to unsubscribe, please reply to this email.</p>
    </div>
  </div>
</body>
</html>"#
    );

    let text = format!(
        "{greeting},\n\n\
         Thank you for joining our community! We're delighted to welcome you to Gathered Grace.\n\n\
         YOUR EXCLUSIVE DISCOUNT CODE: WELCOME10\n\
         Save 10% on your first order!\n\n\
         At Gathered Grace, we believe in the power of thoughtful care and meaningful connection. \
         Each gift we create is designed to bring comfort, rest, and encouragement to those you care about.\n\n\
         Use code WELCOME10 at checkout to receive 10% off your first purchase. Whether you're choosing \
         a curated care kit or building a custom gift, we're here to help you create something truly special.\n\n\
         Start shopping: https://gatheredgrace.us/shop\n\n\
         Questions or need help choosing the perfect gift? We're here for you. Simply reply to this email.\n\n\
         ---\n\
         Gathered Grace\n\
         Thoughtful gifts for meaningful connection\n\
         https://gatheredgrace.us"
    );

    RenderedEmail {
        subject,
        html,
        text,
    }
}
