//! # Order Pricing
//!
//! Pure pricing calculator for the storefront. Given an [`OrderSelection`]
//! it produces the ordered list of [`LineItem`]s and the total in integer
//! cents. All amounts are fixed constants; no currency math on floats.

use crate::error::{ShopError, ShopResult};
use serde::{Deserialize, Serialize};

/// Price of the Rest Kit, in cents
pub const REST_KIT_CENTS: i64 = 3900;
/// Price of the Reflect Kit, in cents
pub const REFLECT_KIT_CENTS: i64 = 4900;
/// Price of the Restore Kit, in cents
pub const RESTORE_KIT_CENTS: i64 = 6900;
/// Price of the Lavender Eye Pillow, in cents
pub const EYE_PILLOW_CENTS: i64 = 2200;
/// Price of the Handmade Balm, in cents
pub const BALM_CENTS: i64 = 1500;
/// Price of the Journal and Pen Set, in cents
pub const JOURNAL_CENTS: i64 = 1800;
/// Flat surcharge for custom themed fabric, in cents
pub const CUSTOM_FABRIC_CENTS: i64 = 500;

/// Kit discriminator sent by the storefront forms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KitType {
    Rest,
    Reflect,
    Restore,
    BuildCustom,
}

impl KitType {
    /// Parse the wire identifier (`rest`, `reflect`, `restore`, `build_custom`)
    pub fn parse(s: &str) -> ShopResult<Self> {
        match s {
            "rest" => Ok(KitType::Rest),
            "reflect" => Ok(KitType::Reflect),
            "restore" => Ok(KitType::Restore),
            "build_custom" => Ok(KitType::BuildCustom),
            other => Err(ShopError::InvalidRequest(format!(
                "Unknown kit type: {other}"
            ))),
        }
    }

    /// Wire identifier, as accepted by [`KitType::parse`]
    pub fn as_str(&self) -> &'static str {
        match self {
            KitType::Rest => "rest",
            KitType::Reflect => "reflect",
            KitType::Restore => "restore",
            KitType::BuildCustom => "build_custom",
        }
    }

    /// Customer-facing kit name, `None` for build-your-own
    pub fn display_name(&self) -> Option<&'static str> {
        match self {
            KitType::Rest => Some("Rest Kit"),
            KitType::Reflect => Some("Reflect Kit"),
            KitType::Restore => Some("Restore Kit"),
            KitType::BuildCustom => None,
        }
    }

    /// Fixed base price for standard kits, `None` for build-your-own
    pub fn base_price_cents(&self) -> Option<i64> {
        match self {
            KitType::Rest => Some(REST_KIT_CENTS),
            KitType::Reflect => Some(REFLECT_KIT_CENTS),
            KitType::Restore => Some(RESTORE_KIT_CENTS),
            KitType::BuildCustom => None,
        }
    }

    /// True for the predefined kits sold at a single fixed price
    pub fn is_standard(&self) -> bool {
        !matches!(self, KitType::BuildCustom)
    }
}

/// Budget tier table for build-your-own orders (range labels).
///
/// Labels are matched exactly; anything else contributes zero. The range
/// labels map to the middle of the range, `$50+` to its minimum.
pub fn build_custom_budget_cents(label: &str) -> i64 {
    match label {
        "$10-$20" => 1500,
        "$20-$30" => 2500,
        "$30-$50" => 4000,
        "$50+" => 5000,
        _ => 0,
    }
}

/// Budget tier table for standard-kit orders (flat labels).
pub fn standard_budget_cents(label: &str) -> i64 {
    match label {
        "$10" => 1000,
        "$20" => 2000,
        "$30" => 3000,
        "$50" => 5000,
        _ => 0,
    }
}

/// What a line item is for. The Stripe layer uses this to decide between
/// a configured price ID and inline price data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineItemKind {
    StandardKit,
    EyePillow,
    Balm,
    Journal,
    FabricUpcharge,
    CustomGiftBudget,
}

/// A single priced line in an order. Quantity is always 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub kind: LineItemKind,
    /// Display name shown on the checkout page
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Unit amount in integer cents
    pub unit_amount: i64,
}

impl LineItem {
    fn new(kind: LineItemKind, name: &str, unit_amount: i64) -> Self {
        Self {
            kind,
            name: name.to_string(),
            description: None,
            unit_amount,
        }
    }

    fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A buyer's selection, as submitted by a kit order form.
///
/// Immutable once built; pricing never mutates it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSelection {
    pub kit_type: KitType,
    /// Client-computed base price. Required for standard kits, but the
    /// charged amount always comes from the fixed price table.
    pub base_price: Option<i64>,
    pub custom_fabric: bool,
    pub custom_budget: Option<String>,
    pub eye_pillow: bool,
    pub balm: bool,
    pub journal: bool,
    pub custom_gift: bool,
}

impl OrderSelection {
    /// Selection for a standard kit with no extras
    pub fn standard(kit_type: KitType) -> Self {
        Self {
            kit_type,
            base_price: kit_type.base_price_cents(),
            custom_fabric: false,
            custom_budget: None,
            eye_pillow: false,
            balm: false,
            journal: false,
            custom_gift: false,
        }
    }

    /// Empty build-your-own selection
    pub fn build_custom() -> Self {
        Self {
            kit_type: KitType::BuildCustom,
            base_price: None,
            custom_fabric: false,
            custom_budget: None,
            eye_pillow: false,
            balm: false,
            journal: false,
            custom_gift: false,
        }
    }
}

/// The result of pricing a selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PricedOrder {
    pub line_items: Vec<LineItem>,
    /// Sum of all line item amounts, in cents
    pub total_cents: i64,
}

impl PricedOrder {
    pub fn is_empty(&self) -> bool {
        self.line_items.is_empty()
    }
}

/// Price an [`OrderSelection`] into line items and a total.
///
/// Deterministic: the same selection always yields the same items in the
/// same order. Item order matters only for display; the total is the sum
/// regardless.
pub fn price_order(selection: &OrderSelection) -> ShopResult<PricedOrder> {
    let mut line_items = Vec::new();

    if selection.kit_type == KitType::BuildCustom {
        if selection.eye_pillow {
            line_items.push(LineItem::new(
                LineItemKind::EyePillow,
                "Lavender Eye Pillow",
                EYE_PILLOW_CENTS,
            ));
        }
        if selection.balm {
            line_items.push(LineItem::new(LineItemKind::Balm, "Handmade Balm", BALM_CENTS));
        }
        if selection.journal {
            line_items.push(LineItem::new(
                LineItemKind::Journal,
                "Journal and Pen Set",
                JOURNAL_CENTS,
            ));
        }

        // Fabric upcharge only decorates an eye pillow
        if selection.custom_fabric && selection.eye_pillow {
            line_items.push(
                LineItem::new(
                    LineItemKind::FabricUpcharge,
                    "Custom Fabric Upcharge",
                    CUSTOM_FABRIC_CENTS,
                )
                .with_description("Custom themed fabric for eye pillow"),
            );
        }

        if selection.custom_gift {
            if let Some(label) = selection.custom_budget.as_deref() {
                let cents = build_custom_budget_cents(label);
                if cents > 0 {
                    line_items.push(
                        LineItem::new(LineItemKind::CustomGiftBudget, "Custom Gift Budget", cents)
                            .with_description(format!(
                                "Budget for personalized custom gift ({label})"
                            )),
                    );
                }
            }
        }
    } else {
        // Standard kits: the form always sends its computed basePrice and
        // its absence indicates a malformed submission.
        if selection.base_price.is_none() {
            return Err(ShopError::MissingField(
                "basePrice for standard kits".to_string(),
            ));
        }

        let name = selection
            .kit_type
            .display_name()
            .ok_or_else(|| ShopError::Internal("standard kit without display name".into()))?;
        let base = selection
            .kit_type
            .base_price_cents()
            .ok_or_else(|| ShopError::Internal("standard kit without base price".into()))?;

        line_items.push(LineItem::new(LineItemKind::StandardKit, name, base));

        if selection.custom_fabric {
            line_items.push(
                LineItem::new(
                    LineItemKind::FabricUpcharge,
                    "Custom Fabric Upcharge",
                    CUSTOM_FABRIC_CENTS,
                )
                .with_description("Custom themed fabric"),
            );
        }

        if let Some(label) = selection.custom_budget.as_deref() {
            let cents = standard_budget_cents(label);
            if cents > 0 {
                line_items.push(
                    LineItem::new(LineItemKind::CustomGiftBudget, "Custom Gift Budget", cents)
                        .with_description(format!("Budget for personalized custom gift ({label})")),
                );
            }
        }
    }

    let total_cents = line_items.iter().map(|item| item.unit_amount).sum();

    Ok(PricedOrder {
        line_items,
        total_cents,
    })
}
