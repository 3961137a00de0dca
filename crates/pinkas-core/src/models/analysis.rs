//! The analysis result record handed to the external persistence step.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Business name used when no candidate passes the resolver's rules.
pub const DEFAULT_BUSINESS_NAME: &str = "Unknown Business";

/// Classification of a financial document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    /// Receipt (קבלה).
    #[default]
    Receipt,
    /// Tax invoice (חשבונית מס).
    TaxInvoice,
    /// Combined tax invoice + receipt (חשבונית מס קבלה).
    TaxInvoiceReceipt,
}

/// Structured record recovered from one document's raw text.
///
/// Constructed fresh per analysis call and immutable afterwards. Every field
/// has a documented default; absence of signal never produces an error or a
/// placeholder string in the optional fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Document classification. Always assigned, defaults to `Receipt`.
    pub document_type: DocumentType,

    /// Amount before VAT. Non-negative, zero when no amount was recovered.
    pub amount_before_vat: Decimal,

    /// Amount after VAT. Non-negative, and `>= amount_before_vat` whenever
    /// both were derived together.
    pub amount_after_vat: Decimal,

    /// Transaction date, normalized to the canonical time zone.
    pub transaction_date: NaiveDate,

    /// Issuing business name. Never empty.
    pub business_name: String,

    /// Tax/dealer identifier: 8-9 digits when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_id: Option<String>,

    /// Invoice number, typically digits with a separator.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_number: Option<String>,

    /// Free-text description of goods/services, up to 4 semicolon-joined
    /// phrases.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_provided: Option<String>,
}

impl AnalysisResult {
    /// The all-default record: what an empty or signal-free input yields.
    pub fn default_record(today: NaiveDate) -> Self {
        Self {
            document_type: DocumentType::Receipt,
            amount_before_vat: Decimal::ZERO,
            amount_after_vat: Decimal::ZERO,
            transaction_date: today,
            business_name: DEFAULT_BUSINESS_NAME.to_string(),
            tax_id: None,
            invoice_number: None,
            service_provided: None,
        }
    }

    /// True when every field carries its default value, i.e. the input
    /// contained no recognizable signal.
    pub fn is_all_defaults(&self) -> bool {
        self.document_type == DocumentType::Receipt
            && self.amount_before_vat.is_zero()
            && self.amount_after_vat.is_zero()
            && self.business_name == DEFAULT_BUSINESS_NAME
            && self.tax_id.is_none()
            && self.invoice_number.is_none()
            && self.service_provided.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_record_is_all_defaults() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        let record = AnalysisResult::default_record(today);

        assert!(record.is_all_defaults());
        assert_eq!(record.transaction_date, today);
        assert_eq!(record.business_name, "Unknown Business");
    }

    #[test]
    fn test_document_type_default() {
        assert_eq!(DocumentType::default(), DocumentType::Receipt);
    }

    #[test]
    fn test_serialization_omits_absent_fields() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        let record = AnalysisResult::default_record(today);

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["document_type"], "receipt");
        assert!(json.get("tax_id").is_none());
        assert!(json.get("invoice_number").is_none());
        assert!(json.get("service_provided").is_none());
    }

    #[test]
    fn test_round_trip() {
        let record = AnalysisResult {
            document_type: DocumentType::TaxInvoice,
            amount_before_vat: Decimal::new(100000, 2),
            amount_after_vat: Decimal::new(117000, 2),
            transaction_date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            business_name: "ACME Ltd".to_string(),
            tax_id: Some("514455667".to_string()),
            invoice_number: Some("02/000001".to_string()),
            service_provided: Some("ייעוץ עסקי".to_string()),
        };

        let json = serde_json::to_string(&record).unwrap();
        let back: AnalysisResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
