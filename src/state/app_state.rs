//! Application state definitions

use super::forms::{
    commit, is_eligible, Catalog, ChangeEvent, CommitQueue, ErrorMap, FieldDefinition, FieldKind,
    FieldValue, FormValues, ValidationReport,
};
use super::{ReferralParams, Session};
use std::time::Instant;

/// Current view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Form,
    Success,
}

/// Where the submission workflow stands
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Loading,
    Success {
        access_token: String,
    },
    Failed,
}

impl SubmissionState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn access_token(&self) -> Option<&str> {
        match self {
            Self::Success { access_token } => Some(access_token),
            _ => None,
        }
    }
}

/// Maker-portal path for a freshly created listing
pub fn maker_portal_path(access_token: &str) -> String {
    format!("/maker/{access_token}")
}

/// Main application state
pub struct AppState {
    pub catalog: Catalog,
    /// Committed values; validation and submission read only these
    pub values: FormValues,
    pub commit_queue: CommitQueue,
    pub errors: ErrorMap,
    pub error_count: usize,
    pub submission: SubmissionState,
    /// Flat field index; `field_count()` is the submit button row
    pub active_field: usize,
    pub session: Option<Session>,
    pub referral: ReferralParams,
}

impl AppState {
    pub fn new(
        catalog: Catalog,
        values: FormValues,
        session: Option<Session>,
        referral: ReferralParams,
        commit_queue: CommitQueue,
    ) -> Self {
        Self {
            catalog,
            values,
            commit_queue,
            errors: ErrorMap::new(),
            error_count: 0,
            submission: SubmissionState::Idle,
            active_field: 0,
            session,
            referral,
        }
    }

    pub fn current_view(&self) -> View {
        match self.submission {
            SubmissionState::Success { .. } => View::Success,
            _ => View::Form,
        }
    }

    /// Number of form fields (the button row comes after them)
    pub fn field_count(&self) -> usize {
        self.catalog.field_count()
    }

    pub fn is_button_row_active(&self) -> bool {
        self.active_field == self.field_count()
    }

    pub fn next_field(&mut self) {
        self.active_field = (self.active_field + 1) % (self.field_count() + 1);
    }

    pub fn prev_field(&mut self) {
        if self.active_field == 0 {
            self.active_field = self.field_count();
        } else {
            self.active_field -= 1;
        }
    }

    pub fn active_field_def(&self) -> Option<&FieldDefinition> {
        self.catalog.field_at(self.active_field)
    }

    /// What the user currently sees for a field, queued edits included
    pub fn display_value(&self, name: &str) -> FieldValue {
        match self.commit_queue.pending(name) {
            Some(event) => event.clone().into_value(),
            None => self.values.get(name).cloned().unwrap_or_default(),
        }
    }

    fn record(&mut self, name: String, event: ChangeEvent, now: Instant) {
        self.commit_queue.push(&name, event, now);
    }

    /// Type a character into the active text field
    pub fn input_char(&mut self, c: char, now: Instant) {
        let Some(field) = self.active_field_def() else {
            return;
        };
        if !field.kind.is_free_text() {
            return;
        }
        let name = field.name.clone();
        let max_length = field.max_length;

        let mut text = self
            .display_value(&name)
            .as_text()
            .unwrap_or_default()
            .to_string();
        if max_length.is_some_and(|max| text.chars().count() >= max) {
            return;
        }
        text.push(c);
        self.record(name, ChangeEvent::Text(text), now);
    }

    /// Delete the last character of the active text field
    pub fn backspace(&mut self, now: Instant) {
        let Some(field) = self.active_field_def() else {
            return;
        };
        if !field.kind.is_free_text() {
            return;
        }
        let name = field.name.clone();
        let mut text = self
            .display_value(&name)
            .as_text()
            .unwrap_or_default()
            .to_string();
        if text.pop().is_some() {
            self.record(name, ChangeEvent::Text(text), now);
        }
    }

    /// Toggle the active checkbox
    pub fn toggle_checkbox(&mut self, now: Instant) {
        let Some(field) = self.active_field_def() else {
            return;
        };
        if field.kind != FieldKind::Checkbox {
            return;
        }
        let name = field.name.clone();
        let checked = !self.display_value(&name).is_truthy();
        self.record(name, ChangeEvent::Checkbox { checked }, now);
    }

    /// Move the active radio/select to the next or previous option
    pub fn cycle_option(&mut self, forward: bool, now: Instant) {
        let Some(field) = self.active_field_def() else {
            return;
        };
        let options = field.kind.options();
        if options.is_empty() {
            return;
        }
        let name = field.name.clone();
        let current = self.display_value(&name);
        let position = options
            .iter()
            .position(|o| current.as_text() == Some(o.value.as_str()));
        let next = match (position, forward) {
            (None, true) => 0,
            (None, false) => options.len() - 1,
            (Some(i), true) => (i + 1) % options.len(),
            (Some(i), false) => (i + options.len() - 1) % options.len(),
        };
        let value = options[next].value.clone();

        let event = match field.kind {
            FieldKind::Radio(_) => ChangeEvent::Radio { value },
            _ => ChangeEvent::Select { value: Some(value) },
        };
        self.record(name, event, now);
    }

    /// Clear the active select back to no choice
    pub fn clear_select(&mut self, now: Instant) {
        let Some(field) = self.active_field_def() else {
            return;
        };
        if !matches!(field.kind, FieldKind::Select(_)) {
            return;
        }
        let name = field.name.clone();
        self.record(name, ChangeEvent::Select { value: None }, now);
    }

    /// Commit queued edits once the quiet window has passed.
    /// Returns true if anything was committed.
    pub fn commit_due(&mut self, now: Instant) -> bool {
        match self.commit_queue.take_due(now) {
            Some(batch) => {
                self.values = commit(&self.values, batch);
                true
            }
            None => false,
        }
    }

    /// Commit everything queued right away
    pub fn flush_pending(&mut self) {
        if !self.commit_queue.is_empty() {
            let batch = self.commit_queue.drain();
            self.values = commit(&self.values, batch);
        }
    }

    /// Replace the error map with the result of a validation pass
    pub fn apply_validation(&mut self, report: ValidationReport) {
        self.error_count = report.error_count;
        self.errors = report.errors;
    }

    pub fn error_for(&self, name: &str) -> Option<&str> {
        self.errors.get(name).map(String::as_str)
    }

    /// The generic "check the form" banner
    pub fn show_error_banner(&self) -> bool {
        self.error_count > 0 || self.submission == SubmissionState::Failed
    }

    pub fn is_signed_in(&self) -> bool {
        self.session.as_ref().is_some_and(Session::has_token)
    }

    pub fn is_eligible(&self) -> bool {
        is_eligible(&self.values)
    }

    /// Eligible makers must sign in before the app can be submitted
    pub fn requires_sign_in(&self) -> bool {
        is_eligible(&self.values) && !self.is_signed_in()
    }

    /// Label for the submit button row
    pub fn button_label(&self) -> &'static str {
        if self.submission.is_loading() {
            "Loading..."
        } else if self.requires_sign_in() {
            "Login with Blockstack"
        } else {
            "Submit App"
        }
    }
}
