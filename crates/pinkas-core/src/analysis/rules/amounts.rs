//! Monetary amount extraction: VAT, pre-VAT, and post-VAT values.
//!
//! Post-VAT candidates are collected from every pattern in the cascade and the
//! largest survivor wins: final totals are listed after subtotals in most
//! layouts and the closing figure is typically the largest on the page.
//! Pre-VAT and VAT amounts use first-match-wins, since their labels are less
//! ambiguous.

use rust_decimal::Decimal;
use std::str::FromStr;

use super::patterns::{AFTER_VAT_PATTERNS, BEFORE_VAT_PATTERNS, VAT_AMOUNT_PATTERNS};
use super::{ExtractionMatch, NamedPattern};
use crate::analysis::config::AnalyzerConfig;
use crate::analysis::trace::AnalysisTrace;

/// Resolved amounts for one document. Both totals are non-negative and
/// `after_vat >= before_vat` whenever both were derived together.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentAmounts {
    pub before_vat: Decimal,
    pub after_vat: Decimal,
    /// Explicit VAT amount, when one was labeled in the text.
    pub vat_amount: Option<Decimal>,
}

/// Extract and derive the amount pair from document text. Never fails;
/// unparsable numerals are skipped and a signal-free text yields zeros.
pub fn extract_amounts(
    text: &str,
    config: &AnalyzerConfig,
    trace: &mut AnalysisTrace,
) -> DocumentAmounts {
    let vat_amount = first_amount(&VAT_AMOUNT_PATTERNS, text).map(|m| {
        trace.record("vat_amount", m.rule, m.value.to_string());
        m.value
    });

    let after_vat = largest_after_vat(text, vat_amount, trace);
    let before_explicit = first_amount(&BEFORE_VAT_PATTERNS, text).map(|m| {
        trace.record("amount_before_vat", m.rule, m.value.to_string());
        m.value
    });

    match (after_vat, before_explicit) {
        (Some(after), explicit) => {
            let before = derive_before_vat(after, explicit, vat_amount, config, trace);
            DocumentAmounts {
                before_vat: before,
                after_vat: after,
                vat_amount,
            }
        }
        (None, Some(before)) => {
            let after = (before * config.vat_multiplier()).round_dp(2);
            trace.record("amount_after_vat", "derived-from-before-vat", after.to_string());
            DocumentAmounts {
                before_vat: before,
                after_vat: after,
                vat_amount,
            }
        }
        (None, None) => {
            trace.record("amount_after_vat", "default", "0");
            trace.record("amount_before_vat", "default", "0");
            DocumentAmounts {
                vat_amount,
                ..DocumentAmounts::default()
            }
        }
    }
}

/// First parsable match across an ordered cascade.
fn first_amount(patterns: &[NamedPattern], text: &str) -> Option<ExtractionMatch<Decimal>> {
    for pattern in patterns {
        for caps in pattern.regex.captures_iter(text) {
            // A trailing percent group means the numeral was a rate, not an
            // amount (e.g. "VAT 17%").
            if caps.get(2).is_some_and(|m| m.as_str() == "%") {
                continue;
            }
            if let Some(amount) = parse_amount(&caps[1]) {
                let m = caps.get(1).unwrap();
                return Some(
                    ExtractionMatch::new(amount, pattern.name).with_position(m.start(), m.end()),
                );
            }
        }
    }
    None
}

/// Collect every post-VAT candidate, drop those not exceeding the detected
/// VAT amount (a total cannot be smaller than its own VAT component), and
/// keep the largest survivor.
fn largest_after_vat(
    text: &str,
    vat_amount: Option<Decimal>,
    trace: &mut AnalysisTrace,
) -> Option<Decimal> {
    let mut candidates: Vec<ExtractionMatch<Decimal>> = Vec::new();

    for pattern in AFTER_VAT_PATTERNS.iter() {
        for caps in pattern.regex.captures_iter(text) {
            if let Some(amount) = parse_amount(&caps[1]) {
                let m = caps.get(1).unwrap();
                candidates.push(
                    ExtractionMatch::new(amount, pattern.name).with_position(m.start(), m.end()),
                );
            }
        }
    }

    if let Some(vat) = vat_amount {
        candidates.retain(|c| {
            let keep = c.value > vat;
            if !keep {
                trace.record(
                    "amount_after_vat",
                    "discarded-below-vat",
                    format!("{} ({})", c.value, c.rule),
                );
            }
            keep
        });
    }

    let best = candidates.into_iter().max_by(|a, b| a.value.cmp(&b.value))?;
    trace.record(
        "amount_after_vat",
        best.rule,
        format!("largest candidate {}", best.value),
    );
    Some(best.value)
}

/// Priority chain for the pre-VAT amount once a post-VAT amount is fixed.
/// A candidate violating `0 <= before <= after` falls through to the next
/// step; the rate division at the end always satisfies the invariant.
fn derive_before_vat(
    after: Decimal,
    explicit: Option<Decimal>,
    vat_amount: Option<Decimal>,
    config: &AnalyzerConfig,
    trace: &mut AnalysisTrace,
) -> Decimal {
    if let Some(before) = explicit {
        if before <= after {
            return before;
        }
        trace.record(
            "amount_before_vat",
            "discarded-above-after-vat",
            before.to_string(),
        );
    }

    if let Some(vat) = vat_amount {
        let before = after - vat;
        if before >= Decimal::ZERO {
            trace.record("amount_before_vat", "after-minus-vat", before.to_string());
            return before;
        }
        trace.record("amount_before_vat", "discarded-negative", before.to_string());
    }

    let before = (after / config.vat_multiplier()).round_dp(2);
    trace.record("amount_before_vat", "divided-by-vat-rate", before.to_string());
    before
}

/// Normalize a raw numeral to a decimal value.
///
/// A numeral with both "," and "." treats "," as a thousands separator; a
/// single "," with at most two trailing digits is a decimal comma; otherwise
/// commas are stripped as thousands separators.
pub fn parse_amount(s: &str) -> Option<Decimal> {
    let cleaned: String = s
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',' || *c == '.')
        .collect();
    if cleaned.is_empty() {
        return None;
    }

    let normalized = if cleaned.contains(',') && cleaned.contains('.') {
        cleaned.replace(',', "")
    } else if cleaned.contains(',') {
        let commas = cleaned.matches(',').count();
        let after_last = cleaned.rsplit(',').next().unwrap_or("");
        if commas == 1 && after_last.len() <= 2 {
            cleaned.replace(',', ".")
        } else {
            cleaned.replace(',', "")
        }
    } else {
        cleaned
    };

    Decimal::from_str(&normalized).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn run(text: &str) -> (DocumentAmounts, AnalysisTrace) {
        let mut trace = AnalysisTrace::default();
        let amounts = extract_amounts(text, &AnalyzerConfig::default(), &mut trace);
        (amounts, trace)
    }

    #[test]
    fn test_parse_amount_normalization() {
        assert_eq!(parse_amount("1,638.00"), Some(dec("1638.00")));
        assert_eq!(parse_amount("1638.00"), Some(dec("1638.00")));
        assert_eq!(parse_amount("1638,00"), Some(dec("1638.00")));
        assert_eq!(parse_amount("1,638"), Some(dec("1638")));
        assert_eq!(parse_amount("12,345,678.90"), Some(dec("12345678.90")));
        assert_eq!(parse_amount("7,5"), Some(dec("7.5")));
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("1.2.3"), None);
    }

    #[test]
    fn test_explicit_before_and_after() {
        let text = "Total before VAT: 1,000.00\nVAT: 170.00\nTotal to pay: ₪1,170.00";
        let (amounts, _) = run(text);

        assert_eq!(amounts.before_vat, dec("1000.00"));
        assert_eq!(amounts.after_vat, dec("1170.00"));
        assert_eq!(amounts.vat_amount, Some(dec("170.00")));
    }

    #[test]
    fn test_after_derived_by_subtracting_vat() {
        let text = "VAT: ₪170.00\nTotal to pay: ₪1,170.00";
        let (amounts, trace) = run(text);

        assert_eq!(amounts.after_vat, dec("1170.00"));
        assert_eq!(amounts.before_vat, dec("1000.00"));
        assert!(trace
            .rules_for("amount_before_vat")
            .contains(&"after-minus-vat"));
    }

    #[test]
    fn test_after_only_divides_by_rate() {
        let (amounts, trace) = run("Total: 117.00");

        assert_eq!(amounts.after_vat, dec("117.00"));
        assert_eq!(amounts.before_vat, dec("100.00"));
        assert!(trace
            .rules_for("amount_before_vat")
            .contains(&"divided-by-vat-rate"));
    }

    #[test]
    fn test_before_only_multiplies_by_rate() {
        let (amounts, _) = run("לפני מע\"מ: 200.00");

        assert_eq!(amounts.before_vat, dec("200.00"));
        assert_eq!(amounts.after_vat, dec("234.00"));
    }

    #[test]
    fn test_incl_vat_label_is_after_vat() {
        let (amounts, _) = run("סה\"כ כולל מע\"מ: 1,170.00");

        assert_eq!(amounts.after_vat, dec("1170.00"));
        assert_eq!(amounts.before_vat, dec("1000.00"));
    }

    #[test]
    fn test_negated_incl_vat_label_is_before_vat() {
        // "לא כולל מע"מ" is a pre-VAT label; its figure must not surface as
        // a post-VAT candidate.
        let (amounts, trace) = run("סה\"כ לא כולל מע\"מ: 1,000.00");

        assert_eq!(amounts.before_vat, dec("1000.00"));
        assert_eq!(amounts.after_vat, dec("1170.00"));
        assert!(trace.rules_for("amount_before_vat").contains(&"excl-vat"));
    }

    #[test]
    fn test_largest_candidate_wins() {
        let text = "סה\"כ 350.00\nסה\"כ לתשלום: 500.00\nסה\"כ 120.00";
        let (amounts, trace) = run(text);

        assert_eq!(amounts.after_vat, dec("500.00"));
        let rules = trace.rules_for("amount_after_vat");
        assert!(rules.contains(&"total-to-pay"));
    }

    #[test]
    fn test_candidates_below_vat_are_discarded() {
        // The bare ₪ on the VAT line is also an after-VAT candidate; the
        // VAT-component filter must drop it.
        let text = "VAT: ₪170.00\nTotal to pay: ₪1,170.00";
        let (_, trace) = run(text);

        assert!(trace
            .rules_for("amount_after_vat")
            .contains(&"discarded-below-vat"));
    }

    #[test]
    fn test_vat_rate_without_amount_is_not_a_vat_amount() {
        let text = "מע\"מ 17%\nסה\"כ לתשלום: 117.00";
        let (amounts, _) = run(text);

        // "17" followed by % must not be read as the VAT amount; the labeled
        // rate pattern still picks up the total that follows elsewhere.
        assert_ne!(amounts.vat_amount, Some(dec("17")));
        assert_eq!(amounts.after_vat, dec("117.00"));
    }

    #[test]
    fn test_explicit_before_above_after_falls_through() {
        let text = "Total before VAT: 2,000.00\nTotal to pay: ₪1,170.00\nVAT: 170.00";
        let (amounts, trace) = run(text);

        assert_eq!(amounts.after_vat, dec("1170.00"));
        assert_eq!(amounts.before_vat, dec("1000.00"));
        assert!(trace
            .rules_for("amount_before_vat")
            .contains(&"discarded-above-after-vat"));
    }

    #[test]
    fn test_no_signal_yields_zeros() {
        let (amounts, _) = run("שלום וברכה");

        assert_eq!(amounts.before_vat, Decimal::ZERO);
        assert_eq!(amounts.after_vat, Decimal::ZERO);
        assert_eq!(amounts.vat_amount, None);
    }

    #[test]
    fn test_invariant_holds_when_both_derived() {
        for text in [
            "Total to pay: 1,170.00\nVAT: 170.00",
            "Total: 80.00\nbefore VAT: 100.00",
            "סה\"כ לתשלום: 234.00",
        ] {
            let (amounts, _) = run(text);
            assert!(amounts.after_vat >= amounts.before_vat);
            assert!(amounts.before_vat >= Decimal::ZERO);
        }
    }
}
