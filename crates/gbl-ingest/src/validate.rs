//! Record validation against the field schema
//!
//! Each field present in a record is checked against a fixed chain of rules;
//! the first rule that trips produces that field's single violation message.
//! Rule evaluation is total: an evaluator that cannot reach a verdict returns
//! [`RuleOutcome::Indeterminate`], which is logged and treated as passing
//! (fail-open), never as a violation.

use crate::schema;
use tracing::warn;
use url::Url;

/// Message produced for a record with no fields at all.
pub const EMPTY_RECORD_MESSAGE: &str = "Row does not contain record.";

/// Verdict of a single rule evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleOutcome {
    /// The rule is satisfied.
    Pass,
    /// The rule is violated; carries the operator-facing message.
    Fail(String),
    /// The rule could not be evaluated; treated as satisfied after logging.
    Indeterminate(String),
}

/// Result of validating one record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationOutcome {
    violations: Vec<String>,
}

impl ValidationOutcome {
    fn violation(message: impl Into<String>) -> Self {
        Self {
            violations: vec![message.into()],
        }
    }

    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// Violation messages in column order.
    pub fn violations(&self) -> &[String] {
        &self.violations
    }

    /// All violation messages joined for reporting; empty when valid.
    pub fn report(&self) -> String {
        self.violations.join(" ")
    }
}

/// Validate one record against the schema and the field-specific rules.
pub fn validate_record(record: &crate::parser::MetadataRecord) -> ValidationOutcome {
    if record.is_empty() {
        return ValidationOutcome::violation(EMPTY_RECORD_MESSAGE);
    }

    let mut outcome = ValidationOutcome::default();
    for (name, value) in record.iter() {
        fold_outcome(name, check_field(name, value), &mut outcome);
    }
    outcome
}

/// Fold one field's rule outcome into the record outcome. Indeterminate is
/// logged and otherwise ignored (fail-open).
fn fold_outcome(field: &str, rule: RuleOutcome, outcome: &mut ValidationOutcome) {
    match rule {
        RuleOutcome::Pass => {},
        RuleOutcome::Fail(message) => outcome.violations.push(message),
        RuleOutcome::Indeterminate(reason) => {
            warn!(field, reason = %reason, "Could not evaluate validation rule");
        },
    }
}

/// Evaluate the rule chain for one field. First non-passing rule wins, so a
/// field yields at most one message even when several rules would trip.
pub fn check_field(name: &str, value: &str) -> RuleOutcome {
    const RULES: &[fn(&str, &str) -> RuleOutcome] = &[
        required_field_rule,
        identifier_url_rule,
        geom_token_rule,
        geom_number_rule,
    ];

    for rule in RULES {
        match rule(name, value) {
            RuleOutcome::Pass => continue,
            other => return other,
        }
    }
    RuleOutcome::Pass
}

/// Required fields must be non-blank.
fn required_field_rule(name: &str, value: &str) -> RuleOutcome {
    if schema::is_required(name) && value.trim().is_empty() {
        RuleOutcome::Fail(format!("{} is required but empty.", name))
    } else {
        RuleOutcome::Pass
    }
}

/// The identifier must be an absolute http/https URL.
fn identifier_url_rule(name: &str, value: &str) -> RuleOutcome {
    if name == "dc_identifier_s" && !is_http_url(value) {
        RuleOutcome::Fail("dc_identifier_s field is not a valid URL.".to_string())
    } else {
        RuleOutcome::Pass
    }
}

/// The spatial extent must split into exactly four comma-separated tokens.
fn geom_token_rule(name: &str, value: &str) -> RuleOutcome {
    if name == "solr_geom" && value.split(',').count() != 4 {
        RuleOutcome::Fail("solr_geom field is incorrect.".to_string())
    } else {
        RuleOutcome::Pass
    }
}

/// All four spatial extent tokens must be numbers.
fn geom_number_rule(name: &str, value: &str) -> RuleOutcome {
    if name == "solr_geom" && !value.split(',').all(|token| is_number(token)) {
        RuleOutcome::Fail("solr_geom field should be all numbers.".to_string())
    } else {
        RuleOutcome::Pass
    }
}

/// Explicit parse check, replacing exception-as-boolean probing.
pub fn is_number(token: &str) -> bool {
    token.trim().parse::<f64>().is_ok()
}

/// Absolute http/https URL check.
pub fn is_http_url(value: &str) -> bool {
    match Url::parse(value) {
        Ok(url) => matches!(url.scheme(), "http" | "https"),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::MetadataRecord;

    fn valid_record() -> MetadataRecord {
        MetadataRecord::from_pairs([
            ("dc_identifier_s", "https://example.edu/catalog/abc"),
            ("dc_rights_s", "Public"),
            ("dct_provenance_s", "Example"),
            ("solr_geom", "10,20,30,40"),
            ("dc_title_s", "Some Map"),
            ("layer_slug_s", "example-abc"),
            ("geoblacklight_version", "1.0"),
        ])
    }

    #[test]
    fn test_valid_record_passes() {
        let outcome = validate_record(&valid_record());
        assert!(outcome.is_valid());
        assert_eq!(outcome.report(), "");
    }

    #[test]
    fn test_empty_record() {
        let outcome = validate_record(&MetadataRecord::new());
        assert_eq!(outcome.report(), "Row does not contain record.");
    }

    #[test]
    fn test_required_field_empty() {
        let mut record = valid_record();
        record.set("dc_rights_s", "  ".to_string());
        let outcome = validate_record(&record);
        assert_eq!(outcome.report(), "dc_rights_s is required but empty.");
    }

    #[test]
    fn test_identifier_not_a_url() {
        let mut record = valid_record();
        record.set("dc_identifier_s", "not a url".to_string());
        let outcome = validate_record(&record);
        assert_eq!(outcome.report(), "dc_identifier_s field is not a valid URL.");
    }

    #[test]
    fn test_identifier_rejects_non_http_schemes() {
        assert!(!is_http_url("ftp://example.edu/file"));
        assert!(!is_http_url("example.edu/catalog"));
        assert!(is_http_url("http://example.edu"));
        assert!(is_http_url("https://example.edu/catalog?id=1"));
    }

    #[test]
    fn test_empty_identifier_reports_required_not_url() {
        // Rule precedence: the required-but-empty rule wins for a blank value.
        let mut record = valid_record();
        record.set("dc_identifier_s", "".to_string());
        let outcome = validate_record(&record);
        assert_eq!(outcome.report(), "dc_identifier_s is required but empty.");
    }

    #[test]
    fn test_geom_wrong_token_count() {
        let mut record = valid_record();
        record.set("solr_geom", "10,20,30".to_string());
        let outcome = validate_record(&record);
        assert_eq!(outcome.report(), "solr_geom field is incorrect.");
    }

    #[test]
    fn test_geom_non_numeric_token() {
        let mut record = valid_record();
        record.set("solr_geom", "10,20,north,40".to_string());
        let outcome = validate_record(&record);
        assert_eq!(outcome.report(), "solr_geom field should be all numbers.");
    }

    #[test]
    fn test_geom_negative_and_decimal_tokens() {
        let mut record = valid_record();
        record.set("solr_geom", "-10.5,20.25,30,40".to_string());
        assert!(validate_record(&record).is_valid());
    }

    #[test]
    fn test_messages_in_column_order() {
        let record = MetadataRecord::from_pairs([
            ("dc_identifier_s", "nope"),
            ("dc_rights_s", ""),
            ("dct_provenance_s", "Example"),
            ("solr_geom", "1,2"),
            ("dc_title_s", "Map"),
            ("layer_slug_s", "slug"),
            ("geoblacklight_version", "1.0"),
        ]);
        let outcome = validate_record(&record);
        assert_eq!(
            outcome.report(),
            "dc_identifier_s field is not a valid URL. \
             dc_rights_s is required but empty. \
             solr_geom field is incorrect."
        );
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let mut record = valid_record();
        record.set("custom_field", "".to_string());
        assert!(validate_record(&record).is_valid());
    }

    #[test]
    fn test_indeterminate_treated_as_pass() {
        // Fail-open: a rule that cannot be evaluated must not fail the record.
        let mut outcome = ValidationOutcome::default();
        fold_outcome(
            "solr_geom",
            RuleOutcome::Indeterminate("unreadable value".to_string()),
            &mut outcome,
        );
        assert!(outcome.is_valid());
    }

    #[test]
    fn test_is_number() {
        assert!(is_number("10"));
        assert!(is_number("-10.5"));
        assert!(is_number(" 42 "));
        assert!(!is_number("north"));
        assert!(!is_number(""));
    }
}
