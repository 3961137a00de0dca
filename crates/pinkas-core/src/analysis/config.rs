//! Analyzer configuration.
//!
//! The jurisdiction-specific assumptions baked into the heuristics (the 17%
//! VAT rate, the Israel time zone, the day-first date convention's two-digit
//! year pivot) live here as named, overridable settings rather than inline
//! literals.

use chrono_tz::Tz;
use rust_decimal::Decimal;

use crate::error::ConfigError;

/// Default VAT rate assumed when no explicit VAT amount is present: 17%.
pub const DEFAULT_VAT_RATE: Decimal = Decimal::from_parts(17, 0, 0, false, 2);

/// Canonical time zone all dates are normalized to.
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::Asia::Jerusalem;

/// Two-digit years above this pivot expand to 19xx, at or below it to 20xx.
pub const DEFAULT_YEAR_PIVOT: i32 = 50;

/// Settings for a [`DocumentAnalyzer`](super::DocumentAnalyzer).
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzerConfig {
    /// VAT rate as a fraction (0.17 for 17%).
    pub vat_rate: Decimal,
    /// Canonical time zone for date normalization and the "now" default.
    pub timezone: Tz,
    /// Pivot for two-digit-year expansion.
    pub two_digit_year_pivot: i32,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            vat_rate: DEFAULT_VAT_RATE,
            timezone: DEFAULT_TIMEZONE,
            two_digit_year_pivot: DEFAULT_YEAR_PIVOT,
        }
    }
}

impl AnalyzerConfig {
    /// Check that the settings are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.vat_rate <= Decimal::ZERO || self.vat_rate >= Decimal::ONE {
            return Err(ConfigError::InvalidVatRate(self.vat_rate.to_string()));
        }
        if !(0..100).contains(&self.two_digit_year_pivot) {
            return Err(ConfigError::InvalidYearPivot(self.two_digit_year_pivot));
        }
        Ok(())
    }

    /// Multiplier from a pre-VAT amount to a post-VAT amount (1.17 for 17%).
    pub fn vat_multiplier(&self) -> Decimal {
        Decimal::ONE + self.vat_rate
    }
}
