//! Structured decision trace.
//!
//! Every extractor records which rule produced (or defaulted) each field, so
//! tests and callers can audit decision points without capturing log output.

use serde::Serialize;

/// One recorded decision.
#[derive(Debug, Clone, Serialize)]
pub struct TraceStep {
    /// Result field the decision concerns (e.g. `"amount_after_vat"`).
    pub field: &'static str,
    /// Name of the rule that fired, or `"default"`.
    pub rule: &'static str,
    /// Human-readable detail: matched value, discarded candidate, etc.
    pub detail: String,
}

/// Ordered log of extraction decisions for one analysis call.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AnalysisTrace {
    steps: Vec<TraceStep>,
}

impl AnalysisTrace {
    pub fn record(&mut self, field: &'static str, rule: &'static str, detail: impl Into<String>) {
        self.steps.push(TraceStep {
            field,
            rule,
            detail: detail.into(),
        });
    }

    pub fn steps(&self) -> &[TraceStep] {
        &self.steps
    }

    /// Names of the rules that fired for a given field, in order.
    pub fn rules_for(&self, field: &str) -> Vec<&'static str> {
        self.steps
            .iter()
            .filter(|s| s.field == field)
            .map(|s| s.rule)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_rules_for_preserves_order() {
        let mut trace = AnalysisTrace::default();
        trace.record("amount_after_vat", "candidate", "170.00");
        trace.record("amount_after_vat", "largest-candidate", "1170.00");
        trace.record("document_type", "tax-invoice", "matched");

        assert_eq!(
            trace.rules_for("amount_after_vat"),
            vec!["candidate", "largest-candidate"]
        );
        assert_eq!(trace.rules_for("document_type"), vec!["tax-invoice"]);
        assert_eq!(trace.steps().len(), 3);
    }
}
