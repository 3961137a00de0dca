//! Rule-based field extractors for invoice and receipt text.
//!
//! Every cascade is an explicit ordered list of named patterns evaluated in
//! sequence, so specificity-over-generality stays auditable and each firing
//! rule is attributable by name in the analysis trace.

pub mod amounts;
pub mod business_name;
pub mod dates;
pub mod doc_type;
pub mod identifiers;
pub mod patterns;
pub mod service;

pub use amounts::{extract_amounts, parse_amount, DocumentAmounts};
pub use business_name::resolve_business_name;
pub use dates::extract_transaction_date;
pub use doc_type::classify_document;
pub use identifiers::{extract_identifiers, DocumentIdentifiers};
pub use service::extract_service_description;

use regex::Regex;

/// A regex rule with a stable name for trace attribution.
pub struct NamedPattern {
    pub name: &'static str,
    pub regex: Regex,
}

impl NamedPattern {
    pub fn new(name: &'static str, pattern: &str) -> Self {
        Self {
            name,
            regex: Regex::new(pattern).unwrap(),
        }
    }
}

/// A single successful rule match.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Name of the rule that matched.
    pub rule: &'static str,
    /// Position in source text.
    pub position: Option<(usize, usize)>,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, rule: &'static str) -> Self {
        Self {
            value,
            rule,
            position: None,
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }
}
