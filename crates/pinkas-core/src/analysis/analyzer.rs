//! Document analysis orchestrator.
//!
//! Runs every extractor independently over the same raw text and assembles
//! the result record. The only couplings between extractors are internal to
//! the rules: the detected VAT amount gates post-VAT candidate filtering, and
//! invoice-number presence feeds the classifier's fallback. Analysis never
//! fails; empty input yields the all-default record.

use std::time::Instant;

use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::error::Result;
use crate::models::analysis::AnalysisResult;

use super::config::AnalyzerConfig;
use super::rules::{
    classify_document, extract_amounts, extract_identifiers, extract_service_description,
    extract_transaction_date, resolve_business_name,
};
use super::trace::AnalysisTrace;

/// Result of one analysis call: the record plus its decision trace.
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    /// Extracted record, immutable after construction.
    pub result: AnalysisResult,
    /// Which rule produced each field.
    pub trace: AnalysisTrace,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Trait for document text analysis.
pub trait TextAnalyzer {
    /// Analyze one document's raw text.
    fn analyze(&self, text: &str) -> AnalysisOutcome;
}

/// Rule-based analyzer over raw bilingual document text.
pub struct DocumentAnalyzer {
    config: AnalyzerConfig,
}

impl DocumentAnalyzer {
    /// Create an analyzer with default settings (17% VAT, Israel time zone).
    pub fn new() -> Self {
        Self {
            config: AnalyzerConfig::default(),
        }
    }

    /// Create an analyzer from validated settings.
    pub fn with_config(config: AnalyzerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Override the assumed VAT rate (a fraction, e.g. 0.18 for 18%).
    pub fn with_vat_rate(mut self, vat_rate: Decimal) -> Result<Self> {
        self.config.vat_rate = vat_rate;
        self.config.validate()?;
        Ok(self)
    }

    /// Override the canonical time zone.
    pub fn with_timezone(mut self, timezone: chrono_tz::Tz) -> Self {
        self.config.timezone = timezone;
        self
    }

    /// Override the two-digit-year pivot.
    pub fn with_two_digit_year_pivot(mut self, pivot: i32) -> Result<Self> {
        self.config.two_digit_year_pivot = pivot;
        self.config.validate()?;
        Ok(self)
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }
}

impl Default for DocumentAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextAnalyzer for DocumentAnalyzer {
    fn analyze(&self, text: &str) -> AnalysisOutcome {
        let start = Instant::now();
        let mut trace = AnalysisTrace::default();

        info!("Analyzing document text of {} characters", text.len());

        let amounts = extract_amounts(text, &self.config, &mut trace);
        let transaction_date = extract_transaction_date(text, &self.config, &mut trace);
        let business_name = resolve_business_name(text, &mut trace);
        let identifiers = extract_identifiers(text, &mut trace);
        let document_type =
            classify_document(text, identifiers.invoice_number.as_deref(), &mut trace);
        let service_provided = extract_service_description(text, &mut trace);

        let result = AnalysisResult {
            document_type,
            amount_before_vat: amounts.before_vat,
            amount_after_vat: amounts.after_vat,
            transaction_date,
            business_name,
            tax_id: identifiers.tax_id,
            invoice_number: identifiers.invoice_number,
            service_provided,
        };

        debug!(
            "Classified {:?} for {:?}, total {}",
            result.document_type, result.business_name, result.amount_after_vat
        );

        AnalysisOutcome {
            result,
            trace,
            processing_time_ms: start.elapsed().as_millis() as u64,
        }
    }
}
