//! Core library for Hebrew/English invoice and receipt analysis.
//!
//! This crate provides:
//! - Rule-based field extraction from noisy OCR text (amounts, dates,
//!   business names, identifiers, service descriptions)
//! - Three-way document classification (receipt, tax invoice, combined)
//! - A structured decision trace for auditing which rule produced each field
//!
//! The engine is deterministic and side-effect-free: one input text, one
//! output record, no shared state. Missing or unparsable fields resolve to
//! documented defaults, never to errors.

pub mod analysis;
pub mod error;
pub mod models;

pub use analysis::{
    AnalysisOutcome, AnalysisTrace, AnalyzerConfig, DocumentAnalyzer, TextAnalyzer, TraceStep,
    DEFAULT_TIMEZONE, DEFAULT_VAT_RATE, DEFAULT_YEAR_PIVOT,
};
pub use error::{ConfigError, Result};
pub use models::analysis::{AnalysisResult, DocumentType, DEFAULT_BUSINESS_NAME};
