//! App.co API module for submitting apps over HTTP

mod client;
mod payload;
mod traits;

pub use client::{HttpSubmissionClient, DEFAULT_API_SERVER};
pub use payload::{SubmissionPayload, SubmitRequest};
pub use traits::SubmissionApi;

#[cfg(test)]
pub use client::SubmitError;
#[cfg(test)]
pub use payload::SubmittedApp;
#[cfg(test)]
pub use traits::MockSubmissionApi;
