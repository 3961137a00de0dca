//! Error types for the pinkas-core library.
//!
//! The analysis engine itself has no fatal-error category: pattern
//! non-matches, unparsable numerals, and empty input all resolve to default
//! values. The only fallible operation is analyzer configuration.

use thiserror::Error;

/// Errors raised when constructing an analyzer with invalid settings.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The VAT rate must be a positive fraction (e.g. 0.17 for 17%).
    #[error("invalid VAT rate: {0} (expected a fraction in (0, 1))")]
    InvalidVatRate(String),

    /// The two-digit-year pivot must fall within a century.
    #[error("invalid two-digit-year pivot: {0} (expected 0..100)")]
    InvalidYearPivot(i32),
}

/// Result type for the pinkas library.
pub type Result<T> = std::result::Result<T, ConfigError>;
