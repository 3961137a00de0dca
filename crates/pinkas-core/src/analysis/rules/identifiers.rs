//! Tax/dealer identifier and invoice number extraction.
//!
//! Each identifier has its own ordered cascade with label-before-number and
//! number-before-label variants (RTL OCR frequently flips word order). First
//! successful match wins per identifier; there is no cross-validation.

use super::patterns::{INVOICE_NUMBER_PATTERNS, TAX_ID_PATTERNS};
use super::{ExtractionMatch, NamedPattern};
use crate::analysis::trace::AnalysisTrace;

/// Optional identifiers recovered from one document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentIdentifiers {
    /// 8-9 digit dealer/tax registration number.
    pub tax_id: Option<String>,
    /// Invoice number, typically digits with a separator.
    pub invoice_number: Option<String>,
}

pub fn extract_identifiers(text: &str, trace: &mut AnalysisTrace) -> DocumentIdentifiers {
    let tax_id = first_capture(&TAX_ID_PATTERNS, text).map(|m| {
        trace.record("tax_id", m.rule, m.value.clone());
        m.value
    });

    let invoice_number = first_capture(&INVOICE_NUMBER_PATTERNS, text)
        .map(|m| {
            let value = m.value.trim_end_matches(['/', '-', '.']).to_string();
            trace.record("invoice_number", m.rule, value.clone());
            value
        })
        .filter(|v| !v.is_empty());

    DocumentIdentifiers {
        tax_id,
        invoice_number,
    }
}

/// First capture across an ordered cascade.
fn first_capture(patterns: &[NamedPattern], text: &str) -> Option<ExtractionMatch<String>> {
    for pattern in patterns {
        if let Some(caps) = pattern.regex.captures(text) {
            if let Some(m) = caps.get(1) {
                return Some(
                    ExtractionMatch::new(m.as_str().trim().to_string(), pattern.name)
                        .with_position(m.start(), m.end()),
                );
            }
        }
    }
    None
}
