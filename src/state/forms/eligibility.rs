//! App Mining eligibility gate

use super::values::FormValues;

/// The only authentication method that qualifies for App Mining
pub const MINING_AUTHENTICATION: &str = "Blockstack";

/// Demo listings never qualify
pub const SAMPLE_CATEGORY: &str = "Sample Blockstack Apps";

/// Whether the current answers qualify the app for App Mining
pub fn is_eligible(values: &FormValues) -> bool {
    values.text("authentication") == Some(MINING_AUTHENTICATION)
        && values.text("category") != Some(SAMPLE_CATEGORY)
}
