//! Regex patterns for Hebrew/English invoice and receipt extraction.
//!
//! OCR text is noisy: the Hebrew gershayim in מע"מ or סה"כ may come through
//! as a straight quote, a typographic quote, or nothing at all, so the
//! abbreviation patterns accept all three. Numerals are captured raw (digits
//! with embedded commas/periods) and normalized by
//! [`parse_amount`](super::amounts::parse_amount).

use lazy_static::lazy_static;
use regex::Regex;

use super::NamedPattern;

lazy_static! {
    // VAT amount (first match wins)
    pub static ref VAT_AMOUNT_PATTERNS: Vec<NamedPattern> = vec![
        NamedPattern::new(
            "vat-amount-label",
            r#"(?i)(?:סכום\s+(?:ה)?מע["'״]?מ|vat\s+amount)[\s:]*₪?\s*(\d(?:[\d,.]*\d)?)"#,
        ),
        NamedPattern::new(
            "vat-rate-label",
            r#"(?i)(?:מע["'״]?מ|vat)\s*\(?\d{1,2}(?:\.\d+)?\s*%\)?[\s:]*₪?\s*(\d(?:[\d,.]*\d)?)"#,
        ),
        // Line-anchored so the "VAT" inside "total before VAT" or "including
        // VAT" is not read as a VAT-amount label. The second group catches a
        // trailing percent sign so "VAT 17%" is not a 17-shekel VAT amount.
        NamedPattern::new(
            "vat-label",
            r#"(?im)^[\s.:*\-]*(?:מע["'״]?מ|vat)[\s:]*₪?\s*(\d(?:[\d,.]*\d)?)(%?)"#,
        ),
    ];

    // Amount after VAT (all candidates collected, largest wins)
    pub static ref AFTER_VAT_PATTERNS: Vec<NamedPattern> = vec![
        NamedPattern::new(
            "total-to-pay",
            r#"(?i)(?:סה["'״]?כ\s+לתשלום|total\s+to\s+pay|לתשלום)[\s:]*₪?\s*(\d(?:[\d,.]*\d)?)"#,
        ),
        // Line-anchored so the negated "לא כולל מע"מ" / "not including VAT"
        // pre-VAT labels cannot feed a post-VAT candidate.
        NamedPattern::new(
            "total-incl-vat",
            r#"(?im)^[\s.:*\-]*(?:סה["'״]?כ\s+|total\s+)?(?:כולל\s+מע["'״]?מ|incl(?:uding|\.)?\s+vat)[\s:]*₪?\s*(\d(?:[\d,.]*\d)?)"#,
        ),
        NamedPattern::new(
            "total",
            r#"(?i)(?:סה["'״]?כ|סך\s+הכל|total)[\s:]*₪?\s*(\d(?:[\d,.]*\d)?)"#,
        ),
        NamedPattern::new("currency-symbol", r#"₪\s*(\d(?:[\d,.]*\d)?)"#),
    ];

    // Amount before VAT (first match wins; these labels are less ambiguous)
    pub static ref BEFORE_VAT_PATTERNS: Vec<NamedPattern> = vec![
        NamedPattern::new(
            "total-before-vat",
            r#"(?i)(?:סה["'״]?כ\s+לפני\s+מע["'״]?מ|total\s+before\s+vat)[\s:]*₪?\s*(\d(?:[\d,.]*\d)?)"#,
        ),
        NamedPattern::new(
            "before-vat",
            r#"(?i)(?:לפני\s+מע["'״]?מ|before\s+vat)[\s:]*₪?\s*(\d(?:[\d,.]*\d)?)"#,
        ),
        NamedPattern::new(
            "excl-vat",
            r#"(?i)(?:לא\s+כולל\s+מע["'״]?מ|excl(?:uding|\.)?\s+vat)[\s:]*₪?\s*(\d(?:[\d,.]*\d)?)"#,
        ),
    ];

    // Transaction date (day-first; explicit label first, then bare layouts)
    pub static ref DATE_PATTERNS: Vec<NamedPattern> = vec![
        NamedPattern::new(
            "transaction-date-label",
            r#"(?i)(?:תאריך(?:\s+(?:עסקה|החשבונית|הפקה))?|transaction\s+date|\bdate\b)[\s:]*([0-3]?\d)[./\-]([01]?\d)[./\-](\d{4}|\d{2})"#,
        ),
        NamedPattern::new("dmy-4digit-year", r"\b(\d{1,2})[./\-](\d{1,2})[./\-](\d{4})\b"),
        NamedPattern::new("dmy-2digit-year", r"\b(\d{1,2})[./\-](\d{1,2})[./\-](\d{2})\b"),
    ];

    // Explicit addressee: the invoice's recipient, never the issuing business
    pub static ref ADDRESSEE_PATTERN: Regex = Regex::new(
        r#"(?i)(?:לכבוד|to\s+the\s+attention\s+of|attn\.?)[\s:]*(.+?)(?:\n|$)"#
    ).unwrap();

    // Labeled business-name fallbacks (header heuristic runs first)
    pub static ref BUSINESS_NAME_PATTERNS: Vec<NamedPattern> = vec![
        NamedPattern::new(
            "business-name-label",
            r#"(?i)(?:שם\s+(?:ה)?עסק|business\s+name)[\s:]*(.+?)(?:\n|$)"#,
        ),
        NamedPattern::new(
            "company-name-label",
            r#"(?i)(?:שם\s+(?:ה)?חברה|company\s+name)[\s:]*(.+?)(?:\n|$)"#,
        ),
        NamedPattern::new(
            "seller-label",
            r#"(?i)(?:ספק|מוכר|seller|vendor)[\s:]*(.+?)(?:\n|$)"#,
        ),
    ];

    // At least 3 consecutive letters of the target scripts
    pub static ref NAME_SCRIPT_RUN: Regex = Regex::new(r"[A-Za-zא-ת]{3,}").unwrap();

    // An 8-9 digit run is a dealer id, not part of a name
    pub static ref TAX_ID_RUN: Regex = Regex::new(r"\b\d{8,9}\b").unwrap();

    // Tax/dealer identifier (first match wins)
    pub static ref TAX_ID_PATTERNS: Vec<NamedPattern> = vec![
        NamedPattern::new(
            "dealer-label",
            r#"(?i)(?:עוסק\s+מורשה|מס(?:פר)?\s+עוסק|ח\.פ\.?|ע\.מ\.?|tax\s+id|dealer\s+(?:no|number)\.?)[\s.:]*(\d{8,9})\b"#,
        ),
        // OCR on RTL text often flips label/number order
        NamedPattern::new(
            "dealer-number-first",
            r#"(?i)\b(\d{8,9})\s*(?:עוסק\s+מורשה|ח\.פ\.?|ע\.מ\.?|tax\s+id)"#,
        ),
    ];

    // Invoice number (first match wins)
    pub static ref INVOICE_NUMBER_PATTERNS: Vec<NamedPattern> = vec![
        NamedPattern::new(
            "invoice-number-label",
            r#"(?i)(?:(?:tax\s+)?invoice(?:\s+receipt)?\s*(?:no|number|num|#)|חשבונית(?:\s+מס(?:\s+קבלה)?)?\s+מס(?:פר)?['׳]?|מס(?:פר)?['׳]?\s+חשבונית)[\s.:#]*([A-Za-z0-9][A-Za-z0-9/\-]*)"#,
        ),
        NamedPattern::new(
            "invoice-number-first",
            r#"(?i)\b(\d[\d/\-]*\d|\d)\s*(?:מספר\s+חשבונית|חשבונית\s+מספר|invoice\s+(?:no|number))"#,
        ),
        NamedPattern::new(
            "receipt-number-label",
            r#"(?i)(?:קבלה\s+מס(?:פר)?['׳]?|receipt\s*(?:no|number|#))[\s.:#]*([A-Za-z0-9][A-Za-z0-9/\-]*)"#,
        ),
    ];

    // Document classification tokens (checked most-specific first)
    pub static ref TAX_INVOICE_RECEIPT: Regex = Regex::new(
        r#"(?i)(?:חשבונית\s+מס\s*[/\-]?\s*קבלה|tax\s+invoice\s*[/\-]?\s*receipt)"#
    ).unwrap();
    pub static ref TAX_INVOICE: Regex = Regex::new(
        r#"(?i)(?:חשבונית\s+מס|tax\s+invoice)"#
    ).unwrap();
    pub static ref TRANSACTION_INVOICE: Regex = Regex::new(r"חשבונית\s+עסקה").unwrap();
    pub static ref INVOICE_TOKEN: Regex = Regex::new(r"(?i)\b(?:חשבונית|invoice)\b").unwrap();
    pub static ref RECEIPT_TOKEN: Regex = Regex::new(r"(?i)\b(?:קבלה|receipt)\b").unwrap();

    // Service description labels (first match wins)
    pub static ref SERVICE_LABEL_PATTERNS: Vec<NamedPattern> = vec![
        NamedPattern::new("service-for-label", r#"(?i)(?:עבור|בעבור)[\s:]+(.+?)(?:\n|$)"#),
        NamedPattern::new(
            "service-detail-label",
            r#"(?i)(?:פירוט(?:\s+(?:ה)?שירות)?|תיאור(?:\s+(?:ה)?שירות)?)[\s:]*(.+?)(?:\n|$)"#,
        ),
        NamedPattern::new(
            "service-provided-label",
            r#"(?i)(?:service\s+provided|description\s+of\s+(?:goods|services)|description)[\s:]*(.+?)(?:\n|$)"#,
        ),
    ];

    // Contiguous run of target-script words within a line
    pub static ref SCRIPT_PHRASE: Regex = Regex::new(
        r#"[A-Za-zא-ת][A-Za-zא-ת\s'"״׳\-]*[A-Za-zא-ת]"#
    ).unwrap();

    // A line that is only digits, separators, and currency noise
    pub static ref NUMBER_TOKEN: Regex = Regex::new(r"^[\d\s./\-,:₪%]+$").unwrap();
}
