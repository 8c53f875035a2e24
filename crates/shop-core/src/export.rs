//! # CSV Export
//!
//! Renders an order submission as a one-row CSV document for manual
//! fulfillment. Quoting follows RFC 4180 so the file survives a round
//! trip through any standard reader.

use crate::submission::OrderSubmission;
use chrono::{DateTime, Utc};

/// Column headers, in output order
pub const CSV_HEADERS: [&str; 16] = [
    "Sender Name",
    "Sender Email",
    "Recipient Name",
    "Recipient Email",
    "Street Address",
    "City",
    "State",
    "ZIP Code",
    "Occasion",
    "Season/Situation",
    "Comforts",
    "Budget",
    "Card Message",
    "Name on Card",
    "Source Page",
    "Submission Date",
];

/// Quote a field if it contains a comma, quote, or newline
fn escape_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Render the header row plus one data row for `submission`.
///
/// `submitted_at` is recorded in the last column as RFC 3339; it is the
/// only non-deterministic input.
pub fn generate_csv(submission: &OrderSubmission, submitted_at: DateTime<Utc>) -> String {
    let header = CSV_HEADERS.join(",");

    let opt = |value: &Option<String>| value.clone().unwrap_or_default();
    let fields = [
        submission.sender_name.clone(),
        submission.sender_email.clone(),
        submission.recipient_name.clone(),
        opt(&submission.recipient_email),
        submission.address.clone(),
        submission.city.clone(),
        submission.state.clone(),
        submission.zip.clone(),
        opt(&submission.occasion),
        opt(&submission.season),
        opt(&submission.comforts),
        submission.budget.clone(),
        opt(&submission.card_message),
        submission.name_on_card.clone(),
        opt(&submission.source_page),
        submitted_at.to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
    ];

    let row = fields
        .iter()
        .map(|f| escape_field(f))
        .collect::<Vec<_>>()
        .join(",");

    format!("{header}\n{row}")
}

/// Attachment filename: `gathered-grace-order-{recipient}-{date}.csv`
/// with the recipient name slugified (non-alphanumerics become `-`).
pub fn csv_filename(recipient_name: &str, submitted_at: DateTime<Utc>) -> String {
    let slug: String = recipient_name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect();
    format!(
        "gathered-grace-order-{}-{}.csv",
        slug,
        submitted_at.format("%Y-%m-%d")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn submission() -> OrderSubmission {
        OrderSubmission {
            recipient_name: "Jane Doe".into(),
            address: "12 Main St, Apt 4".into(),
            city: "Portland".into(),
            state: "OR".into(),
            zip: "97201".into(),
            recipient_email: Some("jane@example.com".into()),
            occasion: Some("New baby".into()),
            season: None,
            comforts: Some("Lavender, cozy \"textures\"".into()),
            card_message: Some("Thinking of you.\nWith love".into()),
            name_on_card: "Include my name".into(),
            budget: "$20-$30".into(),
            sender_name: "Sam Smith".into(),
            sender_email: "sam@example.com".into(),
            website: String::new(),
            source_page: Some("https://gatheredgrace.us/build-custom-kit".into()),
            kit_type: None,
        }
    }

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 14, 9, 26, 53).unwrap()
    }

    #[test]
    fn round_trips_through_a_standard_reader() {
        let original = submission();
        let content = generate_csv(&original, fixed_time());

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(content.as_bytes());

        let headers = reader.headers().unwrap().clone();
        assert_eq!(headers.len(), CSV_HEADERS.len());
        assert_eq!(&headers[0], "Sender Name");

        let record = reader.records().next().unwrap().unwrap();
        assert_eq!(&record[0], "Sam Smith");
        assert_eq!(&record[2], "Jane Doe");
        assert_eq!(&record[4], "12 Main St, Apt 4");
        assert_eq!(&record[10], "Lavender, cozy \"textures\"");
        assert_eq!(&record[12], "Thinking of you.\nWith love");
        assert_eq!(&record[14], "https://gatheredgrace.us/build-custom-kit");
    }

    #[test]
    fn plain_fields_are_not_quoted() {
        assert_eq!(escape_field("Portland"), "Portland");
        assert_eq!(escape_field(""), "");
    }

    #[test]
    fn special_fields_are_quoted_and_doubled() {
        assert_eq!(escape_field("a,b"), "\"a,b\"");
        assert_eq!(escape_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape_field("line1\nline2"), "\"line1\nline2\"");
    }

    #[test]
    fn filename_slugifies_recipient() {
        let name = csv_filename("Jane O'Brien Doe!", fixed_time());
        assert_eq!(name, "gathered-grace-order-jane-o-brien-doe--2025-03-14.csv");
    }

    #[test]
    fn missing_optionals_render_empty() {
        let minimal = OrderSubmission {
            sender_name: "A".into(),
            sender_email: "a@b.co".into(),
            recipient_name: "B".into(),
            ..OrderSubmission::default()
        };
        let content = generate_csv(&minimal, fixed_time());
        let data_row = content.lines().nth(1).unwrap();
        assert!(data_row.starts_with("A,a@b.co,B,,"));
    }
}
