//! Trait abstraction for the submission API to enable mocking in tests

use super::client::SubmitError;
use super::payload::{SubmitRequest, SubmittedApp};
use async_trait::async_trait;

/// Trait for submission API operations, enabling mocking in tests
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmissionApi: Send + Sync {
    /// POST the submission and return the created app
    async fn submit(&self, request: SubmitRequest) -> Result<SubmittedApp, SubmitError>;
}
