//! Referral correlation fields taken from the launch URL

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

static REFERRAL_CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"referralCode=([[:word:]]+)").expect("referral regex is valid"));
static REF_SOURCE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"refSource=([[:word:]]+)").expect("source regex is valid"));

/// `referralCode` / `refSource`, merged into every submission
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferralParams {
    pub referral_code: Option<String>,
    pub ref_source: Option<String>,
}

impl ReferralParams {
    /// Extract the parameters from a URL or a bare query string.
    ///
    /// Values are the ASCII word characters following the first `key=`,
    /// wherever it appears in the query.
    pub fn from_query(url: &str) -> Self {
        let query = match url.split_once('?') {
            Some((_, query)) => query,
            None => url,
        };
        let query = query.split('#').next().unwrap_or_default();
        Self {
            referral_code: capture(&REFERRAL_CODE_REGEX, query),
            ref_source: capture(&REF_SOURCE_REGEX, query),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.referral_code.is_none() && self.ref_source.is_none()
    }
}

fn capture(regex: &Regex, query: &str) -> Option<String> {
    regex
        .captures(query)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}
