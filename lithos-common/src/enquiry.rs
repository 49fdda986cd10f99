//! Enquiry domain types
//!
//! Line items, submissions, and status tracking. Serialized field names are
//! camelCase because both the pending-enquiry file and the hosted "enquiries"
//! collection predate this implementation and their formats are fixed.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Separator between rendered line-item blocks in projectDetails
const BLOCK_SEPARATOR: &str = "\n\n---\n\n";

/// Measurement unit for a product enquiry line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Unit {
    /// Square feet (slabs, tiles, pavers)
    #[serde(rename = "SFT")]
    Sft,
    /// Countable pieces (planters, fountains, carved items)
    #[serde(rename = "Each Piece")]
    EachPiece,
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unit::Sft => write!(f, "SFT"),
            Unit::EachPiece => write!(f, "Each Piece"),
        }
    }
}

impl FromStr for Unit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "SFT" => Ok(Unit::Sft),
            "Each Piece" => Ok(Unit::EachPiece),
            other => Err(Error::InvalidInput(format!("Unknown unit: {other}"))),
        }
    }
}

/// One product's enquiry specification
///
/// At most one line item per productId exists in the pending store at any
/// time; upserts replace the existing entry in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnquiryLineItem {
    pub product_id: i64,
    pub product_name: String,
    pub product_image: String,
    pub unit: Unit,
    pub quantity: f64,
    /// Always `"{quantity} {unit}"` for the stored quantity and unit
    pub display_value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub measurement: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl EnquiryLineItem {
    /// Human-readable `"{quantity} {unit}"` value for a quantity/unit pair
    pub fn format_display_value(quantity: f64, unit: Unit) -> String {
        format!("{} {}", quantity, unit)
    }

    /// Render this line item as one projectDetails text block
    pub fn render_block(&self) -> String {
        let mut block = format!(
            "Product: {} (ID: {})\nQuantity: {}",
            self.product_name, self.product_id, self.display_value
        );
        if let Some(measurement) = &self.measurement {
            block.push_str(&format!("\nMeasurements: {}", measurement));
        }
        if let Some(description) = &self.description {
            block.push_str(&format!("\nDescription: {}", description));
        }
        block
    }
}

/// Flatten all line items into the projectDetails text
///
/// Blocks are joined with a blank line, a separator line, and a blank line.
pub fn render_project_details(items: &[EnquiryLineItem]) -> String {
    items
        .iter()
        .map(EnquiryLineItem::render_block)
        .collect::<Vec<_>>()
        .join(BLOCK_SEPARATOR)
}

/// Lifecycle status of a submitted enquiry
///
/// Initialized to New on submission; advanced by the back office.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnquiryStatus {
    New,
    Contacted,
    QuoteSent,
    InProduction,
    Completed,
    Cancelled,
}

impl fmt::Display for EnquiryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EnquiryStatus::New => "New",
            EnquiryStatus::Contacted => "Contacted",
            EnquiryStatus::QuoteSent => "QuoteSent",
            EnquiryStatus::InProduction => "InProduction",
            EnquiryStatus::Completed => "Completed",
            EnquiryStatus::Cancelled => "Cancelled",
        };
        write!(f, "{s}")
    }
}

/// One batch enquiry as written to the hosted "enquiries" collection
///
/// Created once per submit action and never mutated afterwards by the shop;
/// the document store assigns the id and the ordering timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnquirySubmission {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// All line items flattened to text, blank-line separated
    pub project_details: String,
    /// ISO date (YYYY-MM-DD) of the submit action
    pub date: String,
    pub status: EnquiryStatus,
}

impl EnquirySubmission {
    /// Assemble a submission from validated contact details and line items
    pub fn new(
        name: String,
        email: String,
        phone: String,
        message: Option<String>,
        items: &[EnquiryLineItem],
        date: chrono::NaiveDate,
    ) -> Self {
        Self {
            name,
            email,
            phone,
            message,
            project_details: render_project_details(items),
            date: date.format("%Y-%m-%d").to_string(),
            status: EnquiryStatus::New,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(product_id: i64, quantity: f64, unit: Unit) -> EnquiryLineItem {
        EnquiryLineItem {
            product_id,
            product_name: format!("Product {product_id}"),
            product_image: format!("https://img.example.com/{product_id}.jpg"),
            unit,
            quantity,
            display_value: EnquiryLineItem::format_display_value(quantity, unit),
            measurement: None,
            description: None,
        }
    }

    #[test]
    fn display_value_formats_quantity_and_unit() {
        assert_eq!(EnquiryLineItem::format_display_value(3.0, Unit::Sft), "3 SFT");
        assert_eq!(
            EnquiryLineItem::format_display_value(5.0, Unit::EachPiece),
            "5 Each Piece"
        );
        assert_eq!(EnquiryLineItem::format_display_value(2.5, Unit::Sft), "2.5 SFT");
    }

    #[test]
    fn unit_round_trips_through_strings() {
        assert_eq!(Unit::from_str("SFT").unwrap(), Unit::Sft);
        assert_eq!(Unit::from_str("Each Piece").unwrap(), Unit::EachPiece);
        assert!(Unit::from_str("Kilogram").is_err());
        assert_eq!(Unit::Sft.to_string(), "SFT");
        assert_eq!(Unit::EachPiece.to_string(), "Each Piece");
    }

    #[test]
    fn line_item_serializes_with_camel_case_fields() {
        let json = serde_json::to_value(item(7, 3.0, Unit::Sft)).unwrap();
        assert_eq!(json["productId"], 7);
        assert_eq!(json["productName"], "Product 7");
        assert_eq!(json["productImage"], "https://img.example.com/7.jpg");
        assert_eq!(json["unit"], "SFT");
        assert_eq!(json["quantity"], 3.0);
        assert_eq!(json["displayValue"], "3 SFT");
        // Absent optionals are omitted, not null
        assert!(json.get("measurement").is_none());
        assert!(json.get("description").is_none());
    }

    #[test]
    fn render_block_includes_optional_lines_when_present() {
        let mut it = item(4, 12.0, Unit::Sft);
        assert_eq!(
            it.render_block(),
            "Product: Product 4 (ID: 4)\nQuantity: 12 SFT"
        );

        it.measurement = Some("60x30 cm".to_string());
        it.description = Some("Honed finish".to_string());
        assert_eq!(
            it.render_block(),
            "Product: Product 4 (ID: 4)\nQuantity: 12 SFT\nMeasurements: 60x30 cm\nDescription: Honed finish"
        );
    }

    #[test]
    fn project_details_joins_blocks_with_separator() {
        let items = vec![item(7, 3.0, Unit::Sft), item(9, 2.0, Unit::EachPiece)];
        let details = render_project_details(&items);
        assert_eq!(
            details,
            "Product: Product 7 (ID: 7)\nQuantity: 3 SFT\n\n---\n\nProduct: Product 9 (ID: 9)\nQuantity: 2 Each Piece"
        );
    }

    #[test]
    fn submission_initializes_new_with_iso_date() {
        let items = vec![item(9, 2.0, Unit::EachPiece)];
        let submission = EnquirySubmission::new(
            "Asha".to_string(),
            "asha@example.com".to_string(),
            "+91 98 7654 3210".to_string(),
            None,
            &items,
            chrono::NaiveDate::from_ymd_opt(2026, 3, 14).unwrap(),
        );
        assert_eq!(submission.status, EnquiryStatus::New);
        assert_eq!(submission.date, "2026-03-14");
        assert!(submission.project_details.contains("ID: 9"));

        let json = serde_json::to_value(&submission).unwrap();
        assert_eq!(json["projectDetails"], submission.project_details);
        assert_eq!(json["status"], "New");
        assert!(json.get("message").is_none());
    }
}
