//! Request and response bodies for the submission endpoint

use crate::state::{FormValues, ReferralParams};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const TWITTER_FIELD: &str = "twitterHandle";

/// JSON body posted to `/api/submit`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SubmissionPayload(Map<String, Value>);

impl SubmissionPayload {
    /// Flatten the form values, normalise the twitter handle and merge in
    /// the referral fields
    pub fn build(values: &FormValues, referral: &ReferralParams) -> Self {
        let mut body = match serde_json::to_value(values) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        };

        if let Some(handle) = values.text(TWITTER_FIELD) {
            body.insert(
                TWITTER_FIELD.to_string(),
                Value::String(normalize_twitter_handle(handle)),
            );
        }

        body.insert(
            "referralCode".to_string(),
            referral.referral_code.clone().map_or(Value::Null, Value::String),
        );
        body.insert(
            "refSource".to_string(),
            referral.ref_source.clone().map_or(Value::Null, Value::String),
        );

        Self(body)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }
}

/// Drop the first `@` from a handle
pub fn normalize_twitter_handle(handle: &str) -> String {
    handle.replacen('@', "", 1)
}

/// Everything needed to issue one submission request
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitRequest {
    pub payload: SubmissionPayload,
    pub bearer_token: Option<String>,
}

/// The `app` object of a successful response
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedApp {
    pub access_token: String,
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SubmitResponse {
    pub app: SubmittedApp,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::FieldValue;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_twitter_handle_normalisation() {
        assert_eq!(normalize_twitter_handle("@SatoshiChat"), "SatoshiChat");
        assert_eq!(normalize_twitter_handle("SatoshiChat"), "SatoshiChat");
        assert_eq!(normalize_twitter_handle("@@SatoshiChat"), "@SatoshiChat");
    }

    #[test]
    fn test_build_merges_referral_and_handle() {
        let values = FormValues::new()
            .with("name", FieldValue::text("Satoshi Chat"))
            .with("twitterHandle", FieldValue::text("@SatoshiChat"))
            .with("public", FieldValue::Bool(true));
        let referral = ReferralParams {
            referral_code: Some("abc123".to_string()),
            ref_source: Some("twitter".to_string()),
        };

        let payload = SubmissionPayload::build(&values, &referral);
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "name": "Satoshi Chat",
                "twitterHandle": "SatoshiChat",
                "public": true,
                "referralCode": "abc123",
                "refSource": "twitter"
            })
        );
    }

    #[test]
    fn test_build_without_handle_or_referral() {
        let values = FormValues::new().with("name", FieldValue::text("Satoshi Chat"));
        let payload = SubmissionPayload::build(&values, &ReferralParams::default());

        assert!(payload.get("twitterHandle").is_none());
        assert_eq!(payload.get("referralCode"), Some(&Value::Null));
        assert_eq!(payload.get("refSource"), Some(&Value::Null));
    }

    #[test]
    fn test_response_requires_access_token() {
        let ok: SubmitResponse =
            serde_json::from_str(r#"{"app": {"accessToken": "abc123", "id": 4}}"#).unwrap();
        assert_eq!(ok.app.access_token, "abc123");
        assert_eq!(ok.app.id, Some(4));

        assert!(serde_json::from_str::<SubmitResponse>(r#"{"app": {}}"#).is_err());
        assert!(serde_json::from_str::<SubmitResponse>(r#"{"success": true}"#).is_err());
    }
}
