//! Submission workflow: decide what a submit press does, then run the request
//!
//! `Idle/Failed -> Loading -> Success | Failed`. Invalid forms stay where
//! they are with errors attached. Eligible makers without a session are sent
//! to sign in before anything is posted.

use crate::api::{SubmissionApi, SubmissionPayload, SubmitRequest};
use crate::state::{
    is_eligible, validate, Catalog, FormValues, ReferralParams, Session, SubmissionState,
    ValidationReport,
};

/// What a submit press should lead to
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitDecision {
    /// A request is already in flight
    Busy,
    /// The form needs external sign-in first
    RequiresSignIn,
    /// Validation failed; nothing is sent
    Invalid(ValidationReport),
    /// Send this request
    Dispatch(SubmitRequest),
}

/// Decide what to do with the committed values
pub fn prepare_submission(
    state: &SubmissionState,
    values: &FormValues,
    catalog: &Catalog,
    referral: &ReferralParams,
    session: Option<&Session>,
) -> SubmitDecision {
    if state.is_loading() {
        return SubmitDecision::Busy;
    }

    let bearer_token = session.and_then(Session::bearer_token).map(str::to_string);
    if is_eligible(values) && bearer_token.is_none() {
        return SubmitDecision::RequiresSignIn;
    }

    let report = validate(values, catalog);
    if !report.is_valid() {
        tracing::info!(errors = report.error_count, "submission blocked by validation errors");
        return SubmitDecision::Invalid(report);
    }

    SubmitDecision::Dispatch(SubmitRequest {
        payload: SubmissionPayload::build(values, referral),
        bearer_token,
    })
}

/// Post the request and map the outcome onto the workflow state.
///
/// Failures are logged here and never returned; the UI only shows a
/// generic banner for them.
pub async fn run_submission(api: &dyn SubmissionApi, request: SubmitRequest) -> SubmissionState {
    match api.submit(request).await {
        Ok(app) => {
            tracing::info!("submission accepted");
            SubmissionState::Success {
                access_token: app.access_token,
            }
        }
        Err(e) => {
            tracing::error!("submission failed: {e}");
            SubmissionState::Failed
        }
    }
}
