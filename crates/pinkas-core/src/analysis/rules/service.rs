//! Service description extraction.
//!
//! An explicit label ("עבור", "פירוט", "description") wins outright.
//! Otherwise lines are filtered heuristically and the surviving script runs
//! collected, up to four phrases joined by semicolons. All length gates count
//! characters, not bytes.

use super::patterns::{NUMBER_TOKEN, SCRIPT_PHRASE, SERVICE_LABEL_PATTERNS};
use crate::analysis::trace::AnalysisTrace;

/// Maximum number of phrases kept, in discovery order.
const MAX_PHRASES: usize = 4;

/// Overall cap on the joined description.
const MAX_TOTAL_CHARS: usize = 400;

/// Accepted length for a labeled description line.
const LABEL_LEN: std::ops::RangeInclusive<usize> = 5..=100;

/// Accepted line length for the heuristic scan.
const LINE_LEN: std::ops::RangeInclusive<usize> = 10..=100;

/// Minimum length of an extracted phrase.
const MIN_PHRASE_CHARS: usize = 5;

/// Lines carrying structural/total/date/contact vocabulary are not
/// descriptions of goods or services.
const SKIP_KEYWORDS: &[&str] = &[
    "סה\"כ",
    "סה״כ",
    "סהכ",
    "מע\"מ",
    "מע״מ",
    "מעמ",
    "חשבונית",
    "קבלה",
    "לכבוד",
    "תאריך",
    "טלפון",
    "פקס",
    "כתובת",
    "עמוד",
    "בנק",
    "סניף",
    "עוסק",
    "ח.פ",
    "ע.מ",
    "total",
    "vat",
    "invoice",
    "receipt",
    "date",
    "phone",
    "fax",
    "address",
    "page",
    "bank",
];

/// Table column headers are labels, not content.
const COLUMN_LABELS: &[&str] = &[
    "פריט",
    "תיאור",
    "כמות",
    "יחידה",
    "מחיר",
    "item",
    "description",
    "quantity",
    "unit",
    "price",
];

/// Extract up to four semicolon-joined description phrases, if any.
pub fn extract_service_description(text: &str, trace: &mut AnalysisTrace) -> Option<String> {
    for pattern in SERVICE_LABEL_PATTERNS.iter() {
        for caps in pattern.regex.captures_iter(text) {
            let first_line = caps[1].lines().next().unwrap_or("").trim();
            if LABEL_LEN.contains(&first_line.chars().count()) {
                trace.record("service_provided", pattern.name, first_line);
                return Some(first_line.to_string());
            }
        }
    }

    let mut phrases: Vec<String> = Vec::new();
    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if !LINE_LEN.contains(&line.chars().count()) {
            continue;
        }
        let lower = line.to_lowercase();
        if SKIP_KEYWORDS.iter().any(|k| lower.contains(k)) {
            continue;
        }
        if NUMBER_TOKEN.is_match(line) {
            continue;
        }
        let Some(m) = SCRIPT_PHRASE.find(line) else {
            continue;
        };

        let phrase = m.as_str().trim();
        if phrase.chars().count() < MIN_PHRASE_CHARS {
            continue;
        }
        let phrase_lower = phrase.to_lowercase();
        if COLUMN_LABELS.iter().any(|l| phrase_lower == *l) {
            continue;
        }
        if phrases.iter().any(|p| p == phrase) {
            continue;
        }

        trace.record("service_provided", "heuristic-line", phrase);
        phrases.push(phrase.to_string());
        if phrases.len() == MAX_PHRASES {
            break;
        }
    }

    if phrases.is_empty() {
        None
    } else {
        Some(truncate_chars(phrases.join("; "), MAX_TOTAL_CHARS))
    }
}

fn truncate_chars(s: String, max: usize) -> String {
    if s.chars().count() <= max {
        s
    } else {
        s.chars().take(max).collect()
    }
}
