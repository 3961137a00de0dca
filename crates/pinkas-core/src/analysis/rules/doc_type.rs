//! Three-way document classification.
//!
//! A fixed-order cascade: multi-word phrases are checked before their
//! single-word substrings, so a "tax invoice receipt" is never misread as a
//! plain invoice. When no phrase matches at all, the presence of an invoice
//! number decides between invoice and receipt.

use regex::Regex;

use super::patterns::{
    INVOICE_TOKEN, RECEIPT_TOKEN, TAX_INVOICE, TAX_INVOICE_RECEIPT, TRANSACTION_INVOICE,
};
use crate::analysis::trace::AnalysisTrace;
use crate::models::analysis::DocumentType;

pub fn classify_document(
    text: &str,
    invoice_number: Option<&str>,
    trace: &mut AnalysisTrace,
) -> DocumentType {
    // The combined-phrase rule runs first, so by the time "tax-invoice" is
    // evaluated any "tax invoice" left cannot be followed by "receipt".
    let rules: [(&'static str, &Regex, DocumentType); 5] = [
        (
            "tax-invoice-receipt",
            &TAX_INVOICE_RECEIPT,
            DocumentType::TaxInvoiceReceipt,
        ),
        ("tax-invoice", &TAX_INVOICE, DocumentType::TaxInvoice),
        (
            "transaction-invoice",
            &TRANSACTION_INVOICE,
            DocumentType::TaxInvoice,
        ),
        ("invoice-token", &INVOICE_TOKEN, DocumentType::TaxInvoice),
        ("receipt-token", &RECEIPT_TOKEN, DocumentType::Receipt),
    ];

    for (name, regex, document_type) in rules {
        if regex.is_match(text) {
            trace.record("document_type", name, format!("{document_type:?}"));
            return document_type;
        }
    }

    if invoice_number.is_some() {
        trace.record("document_type", "fallback-invoice-number", "TaxInvoice");
        DocumentType::TaxInvoice
    } else {
        trace.record("document_type", "default", "Receipt");
        DocumentType::Receipt
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn classify(text: &str, invoice_number: Option<&str>) -> DocumentType {
        let mut trace = AnalysisTrace::default();
        classify_document(text, invoice_number, &mut trace)
    }

    #[test]
    fn test_combined_phrase_beats_substrings() {
        assert_eq!(
            classify("Tax Invoice Receipt No. 02/000001", None),
            DocumentType::TaxInvoiceReceipt
        );
        assert_eq!(
            classify("חשבונית מס/קבלה מס' 33", None),
            DocumentType::TaxInvoiceReceipt
        );
    }

    #[test]
    fn test_tax_invoice() {
        assert_eq!(classify("חשבונית מס 123", None), DocumentType::TaxInvoice);
        assert_eq!(classify("Tax Invoice", None), DocumentType::TaxInvoice);
    }

    #[test]
    fn test_transaction_invoice_phrasing() {
        assert_eq!(classify("חשבונית עסקה 7", None), DocumentType::TaxInvoice);
    }

    #[test]
    fn test_standalone_tokens() {
        assert_eq!(classify("חשבונית מספר 4", None), DocumentType::TaxInvoice);
        assert_eq!(classify("קבלה מס' 88", None), DocumentType::Receipt);
        assert_eq!(classify("Receipt number 9", None), DocumentType::Receipt);
    }

    #[test]
    fn test_fallback_keyed_on_invoice_number() {
        assert_eq!(classify("מסמך כלשהו", Some("0052")), DocumentType::TaxInvoice);
        assert_eq!(classify("מסמך כלשהו", None), DocumentType::Receipt);
    }

    #[test]
    fn test_trace_records_winning_rule() {
        let mut trace = AnalysisTrace::default();
        classify_document("חשבונית מס קבלה", None, &mut trace);
        assert_eq!(trace.rules_for("document_type"), vec!["tax-invoice-receipt"]);
    }
}
