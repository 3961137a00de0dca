//! Document text analysis: orchestration, configuration, and decision trace.

mod analyzer;
mod config;
mod trace;

pub mod rules;

pub use analyzer::{AnalysisOutcome, DocumentAnalyzer, TextAnalyzer};
pub use config::{AnalyzerConfig, DEFAULT_TIMEZONE, DEFAULT_VAT_RATE, DEFAULT_YEAR_PIVOT};
pub use trace::{AnalysisTrace, TraceStep};
