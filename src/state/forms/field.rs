//! Form field value objects

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Type-safe field values
///
/// Serialized untagged so a stored snapshot reads as plain JSON
/// (`"text"`, `true`, `null`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Text(String),
    #[default]
    Null,
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    /// Get the text value (None for booleans and null)
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::Bool(_) | FieldValue::Null => None,
        }
    }

    /// Falsy in the browser sense: null, false, or empty text
    pub fn is_truthy(&self) -> bool {
        match self {
            FieldValue::Bool(b) => *b,
            FieldValue::Text(s) => !s.is_empty(),
            FieldValue::Null => false,
        }
    }

    /// Get the display value for rendering
    pub fn display_value(&self) -> String {
        match self {
            FieldValue::Bool(true) => "[x]".to_string(),
            FieldValue::Bool(false) => "[ ]".to_string(),
            FieldValue::Text(s) => s.clone(),
            FieldValue::Null => String::new(),
        }
    }
}

/// A label/value pair for radio and select inputs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
}

impl SelectOption {
    pub fn new(label: &str, value: &str) -> Self {
        Self {
            label: label.to_string(),
            value: value.to_string(),
        }
    }
}

/// Input kind, carrying the options for choice inputs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Url,
    Radio(Vec<SelectOption>),
    Select(Vec<SelectOption>),
    Checkbox,
}

impl FieldKind {
    /// Radio and checkbox fields hold a yes/no answer
    pub fn is_boolean_like(&self) -> bool {
        matches!(self, FieldKind::Radio(_) | FieldKind::Checkbox)
    }

    pub fn options(&self) -> &[SelectOption] {
        match self {
            FieldKind::Radio(options) | FieldKind::Select(options) => options,
            _ => &[],
        }
    }

    pub fn is_free_text(&self) -> bool {
        matches!(self, FieldKind::Text | FieldKind::Email | FieldKind::Url)
    }
}

/// A single check inside a validation rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Check {
    Required(String),
    Email(String),
    Url(String),
}

impl Check {
    /// Returns the failure message when `value` does not pass
    fn evaluate(&self, value: Option<&FieldValue>) -> Option<&str> {
        let text = value.and_then(FieldValue::as_text).unwrap_or_default();
        match self {
            Check::Required(message) => {
                let present = match value {
                    None | Some(FieldValue::Null) => false,
                    Some(FieldValue::Bool(_)) => true,
                    Some(FieldValue::Text(s)) => !s.is_empty(),
                };
                (!present).then_some(message.as_str())
            }
            Check::Email(message) => {
                (!text.is_empty() && !is_email(text)).then_some(message.as_str())
            }
            Check::Url(message) => {
                (!text.is_empty() && !is_http_url(text)).then_some(message.as_str())
            }
        }
    }
}

/// Ordered list of checks; the first failure wins
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationRule {
    checks: Vec<Check>,
}

impl ValidationRule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required(mut self, message: &str) -> Self {
        self.checks.push(Check::Required(message.to_string()));
        self
    }

    pub fn email(mut self, message: &str) -> Self {
        self.checks.push(Check::Email(message.to_string()));
        self
    }

    pub fn url(mut self, message: &str) -> Self {
        self.checks.push(Check::Url(message.to_string()));
        self
    }

    /// Run the checks against a value, returning the first error message
    pub fn validate(&self, value: Option<&FieldValue>) -> Result<(), String> {
        match self.checks.iter().find_map(|check| check.evaluate(value)) {
            Some(message) => Err(message.to_string()),
            None => Ok(()),
        }
    }
}

/// Non-ASCII letters allowed in hosts and local parts
const UCS: &str = r"\x{00A0}-\x{D7FF}\x{F900}-\x{FDCF}\x{FDF0}-\x{FFEF}";

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    let atom = format!(r"[a-z\d!#$%&'*+\-/=?^_`{{|}}~{UCS}]+");
    let alnum = format!(r"[a-z\d{UCS}]");
    let alpha = format!(r"[a-z{UCS}]");
    let inner = format!(r"[a-z\d\-._~{UCS}]");
    let pattern = format!(
        r"(?i)^{atom}(?:\.{atom})*@(?:(?:{alnum}|{alnum}{inner}*{alnum})\.)+(?:{alpha}|{alpha}{inner}*{alpha})$"
    );
    Regex::new(&pattern).expect("email regex is valid")
});

static HTTP_URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    let unreserved = format!(r"[a-z\d\-._~{UCS}]");
    let pct = r"%[\da-f]{2}";
    let sub = r"[!$&'()*+,;=]";
    let pchar = format!(r"(?:{unreserved}|{pct}|{sub}|:|@)");
    let octet = r"(?:25[0-5]|2[0-4]\d|1\d\d|[1-9]\d|\d)";
    let alnum = format!(r"[a-z\d{UCS}]");
    let alpha = format!(r"[a-z{UCS}]");
    let host = format!(
        r"(?:{octet}\.{octet}\.{octet}\.{octet}|(?:(?:{alnum}|{alnum}{unreserved}*{alnum})\.)+(?:{alpha}|{alpha}{unreserved}*{alpha})\.?)"
    );
    let pattern = format!(
        r"(?i)^https?://(?:(?:{unreserved}|{pct}|{sub}|:)*@)?{host}(?::\d*)?(?:/(?:{pchar}+(?:/{pchar}*)*)?)?(?:\?(?:{pchar}|[\x{{E000}}-\x{{F8FF}}]|/|\?)*)?(?:#(?:{pchar}|/|\?)*)?$"
    );
    Regex::new(&pattern).expect("url regex is valid")
});

fn is_email(value: &str) -> bool {
    EMAIL_REGEX.is_match(value)
}

/// Absolute http(s) URL with a dotted host or an IPv4 address
fn is_http_url(value: &str) -> bool {
    HTTP_URL_REGEX.is_match(value)
}

/// Immutable definition of a single form field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDefinition {
    pub name: String,
    pub label: String,
    pub required: bool,
    pub kind: FieldKind,
    pub hint: Option<String>,
    pub message: Option<String>,
    pub placeholder: Option<String>,
    pub max_length: Option<usize>,
    pub rule: Option<ValidationRule>,
}

impl FieldDefinition {
    fn new(name: &str, label: &str, kind: FieldKind) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            required: false,
            kind,
            hint: None,
            message: None,
            placeholder: None,
            max_length: None,
            rule: None,
        }
    }

    /// Create a new text field
    pub fn text(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldKind::Text)
    }

    pub fn email(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldKind::Email)
    }

    pub fn url(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldKind::Url)
    }

    pub fn radio(name: &str, label: &str, options: Vec<SelectOption>) -> Self {
        Self::new(name, label, FieldKind::Radio(options))
    }

    pub fn select(name: &str, label: &str, options: Vec<SelectOption>) -> Self {
        Self::new(name, label, FieldKind::Select(options))
    }

    pub fn checkbox(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldKind::Checkbox)
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn hint(mut self, hint: &str) -> Self {
        self.hint = Some(hint.to_string());
        self
    }

    pub fn message(mut self, message: &str) -> Self {
        self.message = Some(message.to_string());
        self
    }

    pub fn placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = Some(placeholder.to_string());
        self
    }

    pub fn max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    pub fn rule(mut self, rule: ValidationRule) -> Self {
        self.rule = Some(rule);
        self
    }
}
