//! Form domain layer
//!
//! Field definitions, the submission catalog, value bookkeeping and the
//! pure checks (validation, eligibility) that run over it.

mod catalog;
mod commit_queue;
mod eligibility;
mod field;
#[cfg(test)]
pub(crate) mod fixtures;
mod validation;
mod values;

pub use catalog::{submission_catalog, AppConstants, Catalog};
pub use commit_queue::{commit, CommitQueue, DEFAULT_COMMIT_WINDOW};
pub use eligibility::is_eligible;
pub use field::{FieldDefinition, FieldKind, FieldValue};
#[cfg(test)]
pub use field::SelectOption;
pub use validation::{validate, ErrorMap, ValidationReport};
pub use values::{ChangeEvent, FormValues};
