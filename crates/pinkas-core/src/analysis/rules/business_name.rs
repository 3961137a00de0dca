//! Business (issuer) name resolution.
//!
//! The vendor's name typically sits at or near the top of an invoice, so the
//! resolver scans the document header first and only then falls back to
//! explicit labels. The addressee ("לכבוד ...") is the document's recipient,
//! not the issuer, and is excluded from candidacy along with structural lines
//! (invoice numbers, phone rows, dates).

use super::patterns::{ADDRESSEE_PATTERN, BUSINESS_NAME_PATTERNS, NAME_SCRIPT_RUN, TAX_ID_RUN};
use crate::analysis::trace::AnalysisTrace;
use crate::models::analysis::DEFAULT_BUSINESS_NAME;

/// How many non-empty header lines to scan for a name candidate.
const HEADER_SCAN_LINES: usize = 12;

/// Minimum candidate length in characters.
const MIN_NAME_CHARS: usize = 3;

/// Structural/document vocabulary that disqualifies a candidate line.
const NAME_EXCLUDE_KEYWORDS: &[&str] = &[
    "חשבונית",
    "קבלה",
    "לכבוד",
    "כתובת",
    "טלפון",
    "פלאפון",
    "נייד",
    "פקס",
    "תאריך",
    "עמוד",
    "העתק",
    "מקור",
    "מע\"מ",
    "מע״מ",
    "עוסק",
    "ח.פ",
    "ע.מ",
    "בנק",
    "סניף",
    "דוא\"ל",
    "אימייל",
    "invoice",
    "receipt",
    "address",
    "phone",
    "fax",
    "date",
    "page",
    "copy",
    "total",
    "vat",
    "email",
    "attn",
    "attention",
];

/// Tokens that end a name; everything from the token onward is dropped.
const NAME_STOP_WORDS: &[&str] = &["טלפון", "טל'", "טל:", "פקס", "נייד", "ח.פ", "ע.מ", "phone", "fax", "tel:"];

/// Company-form suffixes kept (inclusive) when they terminate a name.
const NAME_KEEP_SUFFIXES: &[&str] = &["בע\"מ", "בע״מ", "ltd.", "ltd"];

/// Resolve the issuing business name, defaulting to "Unknown Business".
pub fn resolve_business_name(text: &str, trace: &mut AnalysisTrace) -> String {
    let addressee = ADDRESSEE_PATTERN
        .captures(text)
        .map(|caps| caps[1].trim().to_string())
        .filter(|a| !a.is_empty());
    if let Some(addr) = &addressee {
        trace.record("business_name", "addressee-detected", addr.clone());
    }

    // Header-position heuristic first.
    for line in text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .take(HEADER_SCAN_LINES)
    {
        if is_excluded(line, addressee.as_deref()) {
            continue;
        }
        if NAME_SCRIPT_RUN.is_match(line) {
            let name = clean_name(line);
            if !name.is_empty() {
                trace.record("business_name", "header-line", name.clone());
                return name;
            }
        }
    }

    // Explicit labels as a fallback.
    for pattern in BUSINESS_NAME_PATTERNS.iter() {
        if let Some(caps) = pattern.regex.captures(text) {
            let candidate = caps[1].trim();
            if !is_excluded(candidate, addressee.as_deref()) {
                let name = clean_name(candidate);
                if !name.is_empty() {
                    trace.record("business_name", pattern.name, name.clone());
                    return name;
                }
            }
        }
    }

    trace.record("business_name", "default", DEFAULT_BUSINESS_NAME);
    DEFAULT_BUSINESS_NAME.to_string()
}

fn is_excluded(candidate: &str, addressee: Option<&str>) -> bool {
    if candidate.chars().count() < MIN_NAME_CHARS {
        return true;
    }

    let lower = candidate.to_lowercase();
    if NAME_EXCLUDE_KEYWORDS.iter().any(|k| lower.contains(k)) {
        return true;
    }

    // Purely numeric/punctuation lines are never names.
    if candidate.chars().all(|c| !c.is_alphabetic()) {
        return true;
    }

    // An 8-9 digit run marks a dealer-id line.
    if TAX_ID_RUN.is_match(candidate) {
        return true;
    }

    if let Some(addr) = addressee {
        if candidate.contains(addr) || addr.contains(candidate) {
            return true;
        }
    }

    false
}

/// Post-process an accepted candidate: first physical line only, separators
/// and embedded dealer-id runs stripped, name truncated at the first stop
/// token (a company-form suffix is kept, anything else is dropped).
fn clean_name(candidate: &str) -> String {
    let first_line = candidate.lines().next().unwrap_or("").trim();
    let stripped = TAX_ID_RUN.replace_all(first_line, "");
    let mut name = stripped
        .trim_matches(|c: char| {
            c.is_whitespace() || matches!(c, '-' | ':' | ',' | '.' | '|' | '*' | '#')
        })
        .to_string();

    // Lowercasing Hebrew and ASCII preserves byte offsets, so positions
    // found in `lower` are valid cut points in `name`.
    let lower = name.to_lowercase();
    let mut cut: Option<(usize, usize)> = None;
    for suffix in NAME_KEEP_SUFFIXES {
        if let Some(pos) = lower.find(suffix) {
            let end = pos + suffix.len();
            if cut.is_none_or(|(p, _)| pos < p) {
                cut = Some((pos, end));
            }
        }
    }
    for stop in NAME_STOP_WORDS {
        if let Some(pos) = lower.find(stop) {
            if cut.is_none_or(|(p, _)| pos < p) {
                cut = Some((pos, pos));
            }
        }
    }
    if let Some((_, end)) = cut {
        if name.is_char_boundary(end) {
            name.truncate(end);
        }
    }

    name.trim_matches(|c: char| c.is_whitespace() || matches!(c, '-' | ':' | ',' | '|'))
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn resolve(text: &str) -> String {
        let mut trace = AnalysisTrace::default();
        resolve_business_name(text, &mut trace)
    }

    #[test]
    fn test_header_line_wins() {
        let text = "מסגריית יוסי בע\"מ\nרחוב הברזל 5\nחשבונית מס 123";
        assert_eq!(resolve(text), "מסגריית יוסי בע\"מ");
    }

    #[test]
    fn test_latin_header_line() {
        let text = "ACME Ltd\nTax Invoice\nTotal to pay: ₪1,170.00";
        assert_eq!(resolve(text), "ACME Ltd");
    }

    #[test]
    fn test_invoice_number_line_never_selected() {
        let text = "Invoice Number: 12345\n05/01/2024\n₪ 99.00";
        assert_eq!(resolve(text), DEFAULT_BUSINESS_NAME);
    }

    #[test]
    fn test_addressee_is_excluded() {
        let text = "לכבוד ישראל ישראלי\nישראל ישראלי\nמאפיית הדגן\nפירוט";
        assert_eq!(resolve(text), "מאפיית הדגן");
    }

    #[test]
    fn test_labeled_fallback() {
        // Every line inside the header-scan window is structural, so the
        // explicit label beyond it must win.
        let header: String = "חשבונית מס 55\nתאריך: 01/01/2024\nטלפון: 03-5551234\nפקס: 03-5551235\nעמוד 1\nהעתק\nמקור\nכתובת: רחוב הרצל 1\nבנק לאומי\nסניף 800\nקבלה\nמע\"מ 17%\n".to_string();
        let text = header + "שם העסק: דפוס אור\n";
        assert_eq!(resolve(&text), "דפוס אור");
    }

    #[test]
    fn test_dealer_id_line_excluded() {
        assert_eq!(resolve("512345678\nמובילי הצפון\n"), "מובילי הצפון");
    }

    #[test]
    fn test_name_truncated_at_stop_word() {
        let text = "דפוס אור טל' 03-1234567\n";
        assert_eq!(resolve(text), "דפוס אור");
    }

    #[test]
    fn test_clean_name_strips_embedded_dealer_id() {
        assert_eq!(clean_name("דפוס אור 512345678"), "דפוס אור");
    }

    #[test]
    fn test_keep_suffix_retained() {
        let text = "Northwind Traders Ltd. 03-5551234\n";
        assert_eq!(resolve(text), "Northwind Traders Ltd.");
    }

    #[test]
    fn test_trace_records_default() {
        let mut trace = AnalysisTrace::default();
        let name = resolve_business_name("", &mut trace);
        assert_eq!(name, DEFAULT_BUSINESS_NAME);
        assert_eq!(trace.rules_for("business_name"), vec!["default"]);
    }
}
