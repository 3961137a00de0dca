//! Data models produced by the analysis engine.

pub mod analysis;

pub use analysis::{AnalysisResult, DocumentType};
