//! The sectioned field catalog for the app submission form

use super::field::{FieldDefinition, FieldKind, SelectOption, ValidationRule};
use crate::state::Session;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use thiserror::Error;

/// Field that is only asked when the submitter is not signed in
pub const OWN_APP_FIELD: &str = "isSubmittingOwnApp";

const URL_MESSAGE: &str = "Must be a valid URL with http/https.";

/// Enumerated option lists supplied by the directory configuration.
///
/// Only the keys are used; the values mirror the API's enum objects.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConstants {
    #[serde(default)]
    pub category_enums: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    pub blockchain_enums: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    pub storage_enums: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    pub authentication_enums: BTreeMap<String, serde_json::Value>,
}

impl AppConstants {
    /// Built-in option lists used when the config does not provide any
    pub fn builtin() -> Self {
        fn enums(keys: &[&str]) -> BTreeMap<String, serde_json::Value> {
            keys.iter()
                .map(|k| (k.to_string(), serde_json::Value::String(k.to_string())))
                .collect()
        }

        Self {
            category_enums: enums(&[
                "Social Networking",
                "Business Tools",
                "Marketplaces",
                "Games & Digital Assets",
                "Developer Tools",
                "Health & Fitness",
                "Education & News",
                "Entertainment",
                "Music",
                "Productivity",
                "Wallets",
                "Exchanges",
                "Sample Blockstack Apps",
                "Other",
            ]),
            blockchain_enums: enums(&[
                "Bitcoin",
                "Ethereum",
                "Blockstack",
                "EOS",
                "Steem",
                "NEO",
                "Tron",
            ]),
            storage_enums: enums(&["Gaia", "IPFS", "Swarm", "Storj", "Sia", "Dat"]),
            authentication_enums: enums(&[
                "Blockstack",
                "uPort",
                "Ethereum",
                "Metamask",
                "Scatter",
            ]),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("radio field `{field}` needs exactly 2 options (true/false), found {found}")]
    RadioOptions { field: String, found: usize },
    #[error("field `{field}` is defined more than once in section `{section}`")]
    DuplicateField { section: String, field: String },
}

/// A titled group of fields, rendered together
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSection {
    pub id: &'static str,
    pub fields: Vec<FieldDefinition>,
    pub message: Option<String>,
}

/// All sections of the active form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    sections: Vec<FormSection>,
}

impl Catalog {
    /// Wrap sections, rejecting malformed field configuration
    pub fn new(sections: Vec<FormSection>) -> Result<Self, CatalogError> {
        for section in &sections {
            let mut seen = HashSet::new();
            for field in &section.fields {
                if !seen.insert(field.name.as_str()) {
                    return Err(CatalogError::DuplicateField {
                        section: section.id.to_string(),
                        field: field.name.clone(),
                    });
                }
                if let FieldKind::Radio(options) = &field.kind {
                    if options.len() != 2 {
                        return Err(CatalogError::RadioOptions {
                            field: field.name.clone(),
                            found: options.len(),
                        });
                    }
                }
            }
        }
        Ok(Self { sections })
    }

    pub fn sections(&self) -> &[FormSection] {
        &self.sections
    }

    /// Every field, in display order
    pub fn fields(&self) -> impl Iterator<Item = &FieldDefinition> {
        self.sections.iter().flat_map(|s| s.fields.iter())
    }

    #[cfg(test)]
    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields().find(|f| f.name == name)
    }

    pub fn field_count(&self) -> usize {
        self.sections.iter().map(|s| s.fields.len()).sum()
    }

    /// Field at a flat display index
    pub fn field_at(&self, index: usize) -> Option<&FieldDefinition> {
        self.fields().nth(index)
    }
}

/// Turn an enum map into options sorted case-insensitively by label
pub fn generate_options(enums: &BTreeMap<String, serde_json::Value>) -> Vec<SelectOption> {
    let mut keys: Vec<&String> = enums.keys().collect();
    keys.sort_by_key(|k| k.to_lowercase());
    keys.into_iter().map(|k| SelectOption::new(k, k)).collect()
}

fn personal_fields(session: Option<&Session>) -> Vec<FieldDefinition> {
    let fields = vec![
        FieldDefinition::radio(
            OWN_APP_FIELD,
            "Did you build this app?",
            vec![
                SelectOption::new("Yes, I built this app.", "true"),
                SelectOption::new("No, I want to add an app someone else built.", "false"),
            ],
        )
        .required()
        .rule(ValidationRule::new().required("Required.")),
        FieldDefinition::text("submitterName", "Your Name")
            .required()
            .placeholder("Satoshi Nakamoto")
            .rule(ValidationRule::new().required("Your name is required.")),
        FieldDefinition::email("contactEmail", "Your Email")
            .required()
            .placeholder("satoshi@gmail.com")
            .rule(
                ValidationRule::new()
                    .email("Please enter a valid email.")
                    .required("Your email is required."),
            ),
        FieldDefinition::text(
            "referralSource",
            "How did you learn about App.co or App Mining?",
        )
        .placeholder("Hacker News"),
    ];

    // Signed-in makers already own the listing
    if session.is_some_and(Session::has_token) {
        fields.into_iter().filter(|f| f.name != OWN_APP_FIELD).collect()
    } else {
        fields
    }
}

fn app_detail_fields() -> Vec<FieldDefinition> {
    vec![
        FieldDefinition::text("name", "App Name")
            .required()
            .placeholder("Satoshi Chat")
            .rule(ValidationRule::new().required("Please enter the app name.")),
        FieldDefinition::text("description", "Short description")
            .required()
            .hint("Max 50 char.")
            .message("Will appear on App.co category pages and search.")
            .placeholder("A chat app for crypto.")
            .max_length(50)
            .rule(ValidationRule::new().required("Please enter a short description.")),
        FieldDefinition::url("website", "Website")
            .required()
            .placeholder("https://satoshi.chat/")
            .rule(
                ValidationRule::new()
                    .required("Please enter a website.")
                    .url(URL_MESSAGE),
            ),
        FieldDefinition::url("imageUrl", "App icon URL")
            .required()
            .message("Square icon, other sizes will be distorted. Accepted formats: JPG, PNG, SVG.")
            .placeholder("https://example.com/app_icon.png")
            .rule(
                ValidationRule::new()
                    .required("Please provide an icon.")
                    .url(URL_MESSAGE),
            ),
        FieldDefinition::url("openSourceUrl", "Open source URL")
            .placeholder("https://github.com/SatoshiChat")
            .rule(ValidationRule::new().url(URL_MESSAGE)),
        FieldDefinition::text("twitterHandle", "Application's Twitter handle")
            .placeholder("@SatoshiChat"),
    ]
}

fn category_fields(constants: &AppConstants) -> Vec<FieldDefinition> {
    vec![
        FieldDefinition::select(
            "category",
            "Category",
            generate_options(&constants.category_enums),
        )
        .required()
        .placeholder("Social networking")
        .rule(ValidationRule::new().required("Please select a category.")),
        FieldDefinition::select(
            "blockchain",
            "Blockchain",
            generate_options(&constants.blockchain_enums),
        )
        .placeholder("Bitcoin"),
        FieldDefinition::select(
            "storageNetwork",
            "Storage",
            generate_options(&constants.storage_enums),
        )
        .placeholder("IPFS"),
        FieldDefinition::select(
            "authentication",
            "Authentication",
            generate_options(&constants.authentication_enums),
        )
        .placeholder("Blockstack")
        .message("Blockstack authentication is required to qualify for App Mining."),
    ]
}

fn agreement_fields() -> Vec<FieldDefinition> {
    vec![
        FieldDefinition::checkbox("public", "App is publicly accessible and user-ready")
            .required()
            .message(
                "App.co lists decentralized apps that are user-ready. Part of our review \
                 process is verifying anyone can immediately begin using the app.",
            )
            .rule(ValidationRule::new().required("Required.")),
        FieldDefinition::checkbox(
            "disclaimers",
            "I agree to the App.co Terms, Privacy Policy, and App Mining Terms.",
        )
        .required()
        .rule(ValidationRule::new().required("To submit an app, you must accept these terms.")),
    ]
}

/// Build the submission form for the given configuration and session
pub fn submission_catalog(
    constants: &AppConstants,
    session: Option<&Session>,
) -> Result<Catalog, CatalogError> {
    Catalog::new(vec![
        FormSection {
            id: "personal",
            fields: personal_fields(session),
            message: None,
        },
        FormSection {
            id: "appDetails",
            fields: app_detail_fields(),
            message: None,
        },
        FormSection {
            id: "appCategories",
            fields: category_fields(constants),
            message: Some(
                "Want to add a new category, blockchain, storage, or technology? \
                 Contact us at hello@app.co."
                    .to_string(),
            ),
        },
        FormSection {
            id: "agreements",
            fields: agreement_fields(),
            message: None,
        },
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn names(catalog: &Catalog) -> Vec<&str> {
        catalog.fields().map(|f| f.name.as_str()).collect()
    }

    #[test]
    fn test_generate_options_sorts_case_insensitively() {
        let enums: BTreeMap<String, serde_json::Value> =
            ["uPort", "Blockstack", "Metamask", "ethereum"]
                .iter()
                .map(|k| (k.to_string(), serde_json::Value::Null))
                .collect();
        let labels: Vec<String> = generate_options(&enums)
            .into_iter()
            .map(|o| o.label)
            .collect();
        assert_eq!(labels, vec!["Blockstack", "ethereum", "Metamask", "uPort"]);
    }

    #[test]
    fn test_catalog_without_session_asks_ownership() {
        let catalog = submission_catalog(&AppConstants::builtin(), None).unwrap();
        assert_eq!(catalog.sections().len(), 4);
        assert_eq!(catalog.field_at(0).map(|f| f.name.as_str()), Some(OWN_APP_FIELD));
        assert_eq!(catalog.field_count(), 16);
    }

    #[test]
    fn test_session_removes_ownership_question_by_id() {
        let session = Session::new("satoshi.id", "jwt-token");
        let catalog = submission_catalog(&AppConstants::builtin(), Some(&session)).unwrap();
        let names = names(&catalog);
        assert!(!names.contains(&OWN_APP_FIELD));
        assert_eq!(&names[..3], &["submitterName", "contactEmail", "referralSource"]);
    }

    #[test]
    fn test_session_without_token_keeps_ownership_question() {
        let session = Session::new("satoshi.id", "");
        let catalog = submission_catalog(&AppConstants::builtin(), Some(&session)).unwrap();
        assert!(catalog.field(OWN_APP_FIELD).is_some());
    }

    #[test]
    fn test_category_options_come_from_constants() {
        let catalog = submission_catalog(&AppConstants::builtin(), None).unwrap();
        let auth = catalog.field("authentication").unwrap();
        let values: Vec<&str> = auth.kind.options().iter().map(|o| o.value.as_str()).collect();
        assert_eq!(values, vec!["Blockstack", "Ethereum", "Metamask", "Scatter", "uPort"]);
    }

    #[test]
    fn test_malformed_radio_is_rejected() {
        let result = Catalog::new(vec![FormSection {
            id: "broken",
            fields: vec![FieldDefinition::radio(
                "lonely",
                "Lonely",
                vec![SelectOption::new("Only", "only")],
            )],
            message: None,
        }]);
        assert_eq!(
            result.unwrap_err(),
            CatalogError::RadioOptions {
                field: "lonely".to_string(),
                found: 1
            }
        );
    }

    #[test]
    fn test_duplicate_field_is_rejected() {
        let result = Catalog::new(vec![FormSection {
            id: "dupes",
            fields: vec![
                FieldDefinition::text("name", "Name"),
                FieldDefinition::text("name", "Name again"),
            ],
            message: None,
        }]);
        assert!(matches!(result, Err(CatalogError::DuplicateField { .. })));
    }

    #[test]
    fn test_app_constants_deserialize_camel_case() {
        let json = r#"{"categoryEnums": {"Music": "Music"}, "authenticationEnums": {}}"#;
        let parsed: AppConstants = serde_json::from_str(json).unwrap();
        assert!(parsed.category_enums.contains_key("Music"));
        assert!(parsed.blockchain_enums.is_empty());
    }
}
