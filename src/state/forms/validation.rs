//! Whole-form validation

use super::catalog::Catalog;
use super::field::FieldDefinition;
use super::values::FormValues;
use std::collections::BTreeMap;

/// Field name -> human-readable message
pub type ErrorMap = BTreeMap<String, String>;

const REQUIRED_MESSAGE: &str = "This is required.";

/// Result of one validation pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub error_count: usize,
    pub errors: ErrorMap,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.error_count == 0
    }
}

/// Check a single field; each field is independent of the others
fn validate_field(field: &FieldDefinition, values: &FormValues) -> Option<String> {
    let value = values.get(&field.name);

    if field.kind.is_boolean_like() && field.required && !value.is_some_and(|v| v.is_truthy()) {
        return Some(REQUIRED_MESSAGE.to_string());
    }

    field.rule.as_ref()?.validate(value).err()
}

/// Validate every field of the catalog against the current values
pub fn validate(values: &FormValues, catalog: &Catalog) -> ValidationReport {
    let errors: ErrorMap = catalog
        .fields()
        .filter_map(|field| validate_field(field, values).map(|msg| (field.name.clone(), msg)))
        .collect();

    ValidationReport {
        error_count: errors.len(),
        errors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::forms::catalog::{submission_catalog, AppConstants};
    use crate::state::forms::field::{FieldValue, SelectOption, ValidationRule};
    use crate::state::forms::fixtures::complete_values;
    use crate::state::Session;
    use pretty_assertions::assert_eq;

    fn catalog() -> Catalog {
        submission_catalog(&AppConstants::builtin(), None).unwrap()
    }

    #[test]
    fn test_complete_values_pass() {
        let report = validate(&complete_values(), &catalog());
        assert_eq!(report, ValidationReport::default());
        assert!(report.is_valid());
    }

    #[test]
    fn test_empty_values_flag_every_required_field() {
        let catalog = catalog();
        let report = validate(&FormValues::new(), &catalog);

        let required: Vec<&str> = catalog
            .fields()
            .filter(|f| f.required)
            .map(|f| f.name.as_str())
            .collect();
        for name in &required {
            assert!(report.errors.contains_key(*name), "missing error for {name}");
        }
        assert_eq!(report.error_count, required.len());
    }

    #[test]
    fn test_each_missing_required_field_is_reported_alone() {
        let catalog = catalog();
        for field in catalog.fields().filter(|f| f.required) {
            let values = complete_values().with(&field.name, FieldValue::Null);
            let report = validate(&values, &catalog);
            assert_eq!(
                report.errors.keys().collect::<Vec<_>>(),
                vec![&field.name],
                "only {} should be reported",
                field.name
            );
        }
    }

    #[test]
    fn test_answered_radio_still_runs_its_rule() {
        let field = FieldDefinition::radio(
            "homepage",
            "Homepage",
            vec![
                SelectOption::new("Ours", "https://satoshi.chat"),
                SelectOption::new("Theirs", "theirs"),
            ],
        )
        .required()
        .rule(ValidationRule::new().url("Must be a link."));

        let ours = FormValues::new().with("homepage", FieldValue::text("https://satoshi.chat"));
        assert_eq!(validate_field(&field, &ours), None);

        let theirs = FormValues::new().with("homepage", FieldValue::text("theirs"));
        assert_eq!(validate_field(&field, &theirs), Some("Must be a link.".to_string()));

        let unanswered = FormValues::new();
        assert_eq!(
            validate_field(&field, &unanswered),
            Some(REQUIRED_MESSAGE.to_string())
        );
    }

    #[test]
    fn test_invalid_urls_and_emails_are_reported() {
        let catalog = catalog();
        for website in ["https://.", "https://a.", "http://..", "https://-.-/x"] {
            let values = complete_values().with("website", FieldValue::text(website));
            let report = validate(&values, &catalog);
            assert_eq!(
                report.errors.get("website").map(String::as_str),
                Some("Must be a valid URL with http/https."),
                "{website} should be rejected"
            );
        }
        for email in ["a@.b.co", "a@-.co"] {
            let values = complete_values().with("contactEmail", FieldValue::text(email));
            let report = validate(&values, &catalog);
            assert_eq!(
                report.errors.get("contactEmail").map(String::as_str),
                Some("Please enter a valid email."),
                "{email} should be rejected"
            );
        }
    }

    #[test]
    fn test_missing_category() {
        let mut values = complete_values();
        values.set("category", FieldValue::Null);

        let report = validate(&values, &catalog());
        assert_eq!(report.error_count, 1);
        assert_eq!(
            report.errors.get("category").map(String::as_str),
            Some("Please select a category.")
        );
    }

    #[test]
    fn test_unchecked_agreement_uses_generic_message() {
        let values = complete_values().with("disclaimers", FieldValue::Bool(false));
        let report = validate(&values, &catalog());
        assert_eq!(
            report.errors.get("disclaimers").map(String::as_str),
            Some("This is required.")
        );
    }

    #[test]
    fn test_radio_answer_false_is_still_an_answer() {
        let values = complete_values().with("isSubmittingOwnApp", FieldValue::text("false"));
        assert!(validate(&values, &catalog()).is_valid());
    }

    #[test]
    fn test_rule_messages() {
        let values = complete_values()
            .with("contactEmail", FieldValue::text("not-an-email"))
            .with("website", FieldValue::text("satoshi.chat"))
            .with("openSourceUrl", FieldValue::text("github.com/SatoshiChat"));

        let report = validate(&values, &catalog());
        let expected: ErrorMap = [
            ("contactEmail", "Please enter a valid email."),
            ("openSourceUrl", "Must be a valid URL with http/https."),
            ("website", "Must be a valid URL with http/https."),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        assert_eq!(report.errors, expected);
        assert_eq!(report.error_count, 3);
    }

    #[test]
    fn test_error_keys_are_catalog_fields() {
        let session = Session::new("satoshi.id", "jwt");
        let catalog = submission_catalog(&AppConstants::builtin(), Some(&session)).unwrap();
        let report = validate(&FormValues::new(), &catalog);

        assert!(!report.errors.contains_key("isSubmittingOwnApp"));
        assert!(report.errors.keys().all(|k| catalog.field(k).is_some()));
    }

    #[test]
    fn test_validate_is_idempotent() {
        let catalog = catalog();
        let values = complete_values().with("website", FieldValue::text("nope"));
        assert_eq!(validate(&values, &catalog), validate(&values, &catalog));
    }
}
