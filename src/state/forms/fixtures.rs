//! Shared test fixtures

use super::field::FieldValue;
use super::values::FormValues;

/// A submission that passes every check of the anonymous catalog
pub fn complete_values() -> FormValues {
    FormValues::new()
        .with("isSubmittingOwnApp", FieldValue::text("true"))
        .with("submitterName", FieldValue::text("Satoshi Nakamoto"))
        .with("contactEmail", FieldValue::text("satoshi@gmail.com"))
        .with("name", FieldValue::text("Satoshi Chat"))
        .with("description", FieldValue::text("A chat app for crypto."))
        .with("website", FieldValue::text("https://satoshi.chat/"))
        .with("imageUrl", FieldValue::text("https://example.com/app_icon.png"))
        .with("category", FieldValue::text("Social Networking"))
        .with("public", FieldValue::Bool(true))
        .with("disclaimers", FieldValue::Bool(true))
}

/// Complete values that also qualify for App Mining
pub fn eligible_values() -> FormValues {
    complete_values().with("authentication", FieldValue::text("Blockstack"))
}
