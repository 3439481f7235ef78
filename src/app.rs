//! Application state and core logic

use crate::api::SubmissionApi;
use crate::config::TuiConfig;
use crate::state::{
    maker_portal_path, submission_catalog, AppState, CommitQueue, FieldKind,
    ReferralParams, Session, SnapshotStore, SubmissionState, ValidationReport, View,
};
use crate::submission::{prepare_submission, run_submission, SubmitDecision};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::oneshot;
use tokio::sync::oneshot::error::TryRecvError;

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Submission API client
    api: Arc<dyn SubmissionApi>,
    /// Durable snapshot store used across the sign-in round trip
    store: SnapshotStore,
    config: TuiConfig,
    /// Result of the in-flight submission, if any
    in_flight: Option<oneshot::Receiver<SubmissionState>>,
    /// Whether the app should quit
    quit: bool,
    /// Status bar feedback message
    pub status_message: Option<String>,
    /// Printed after the terminal is restored
    exit_message: Option<String>,
}

impl App {
    /// Create a new App instance.
    ///
    /// A saved snapshot is restored (and cleared) once a session is present.
    /// Without a session it is only peeked at, so it survives until the
    /// sign-in round trip completes.
    pub fn new(
        config: TuiConfig,
        api: Arc<dyn SubmissionApi>,
        store: SnapshotStore,
        session: Option<Session>,
        referral: ReferralParams,
    ) -> Result<Self> {
        let catalog = submission_catalog(&config.app_constants(), session.as_ref())?;
        let signed_in = session.as_ref().is_some_and(Session::has_token);

        let values = if signed_in {
            store.restore()
        } else {
            store.peek().unwrap_or_default()
        };
        let status_message = (signed_in && !values.is_empty())
            .then(|| "Restored your saved submission".to_string());

        if !referral.is_empty() {
            tracing::info!(?referral, "referral captured from launch URL");
        }

        let state = AppState::new(
            catalog,
            values,
            session,
            referral,
            CommitQueue::new(config.commit_window()),
        );

        Ok(Self {
            state,
            api,
            store,
            config,
            in_flight: None,
            quit: false,
            status_message,
            exit_message: None,
        })
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn exit_message(&self) -> Option<&str> {
        self.exit_message.as_deref()
    }

    /// Full maker-portal link, shown on success for eligible apps
    pub fn management_link(&self) -> Option<String> {
        let token = self.state.submission.access_token()?;
        if !self.state.is_eligible() {
            return None;
        }
        Some(format!(
            "{}{}",
            self.config.site_origin(),
            maker_portal_path(token)
        ))
    }

    /// Periodic work from the event loop: commit settled input and pick up
    /// a finished submission
    pub fn tick(&mut self, now: Instant) {
        self.state.commit_due(now);
        self.poll_submission();
    }

    fn poll_submission(&mut self) {
        let Some(rx) = self.in_flight.as_mut() else {
            return;
        };
        match rx.try_recv() {
            Ok(outcome) => {
                self.in_flight = None;
                self.status_message = match outcome {
                    SubmissionState::Success { .. } => Some("App submitted!".to_string()),
                    _ => None,
                };
                self.state.submission = outcome;
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Closed) => {
                tracing::error!("submission task ended without a result");
                self.in_flight = None;
                self.state.submission = SubmissionState::Failed;
            }
        }
    }

    /// Handle a key event
    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit = true;
            return Ok(());
        }

        // Clear any status messages on key press
        self.status_message = None;

        match self.state.current_view() {
            View::Form => self.handle_form_key(key),
            View::Success => self.handle_success_key(key),
        }
        Ok(())
    }

    fn handle_success_key(&mut self, key: KeyEvent) {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char('q')) {
            self.quit = true;
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) {
        let now = Instant::now();
        let kind = self.state.active_field_def().map(|f| f.kind.clone());

        match key.code {
            KeyCode::Tab | KeyCode::Down => self.state.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.state.prev_field(),
            KeyCode::Char('s') if key.modifiers.contains(crate::platform::SUBMIT_MODIFIER) => {
                self.submit();
            }
            KeyCode::Esc => self.quit = true,
            KeyCode::Enter => {
                if self.state.is_button_row_active() {
                    self.submit();
                } else {
                    self.state.next_field();
                }
            }
            KeyCode::Left => self.state.cycle_option(false, now),
            KeyCode::Right => self.state.cycle_option(true, now),
            KeyCode::Delete => self.state.clear_select(now),
            KeyCode::Char(' ') if kind == Some(FieldKind::Checkbox) => {
                self.state.toggle_checkbox(now);
            }
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.state.input_char(c, now)
            }
            KeyCode::Backspace => self.state.backspace(now),
            _ => {}
        }
    }

    /// Run the submit press through the workflow
    pub fn submit(&mut self) {
        self.state.flush_pending();

        let decision = prepare_submission(
            &self.state.submission,
            &self.state.values,
            &self.state.catalog,
            &self.state.referral,
            self.state.session.as_ref(),
        );

        match decision {
            SubmitDecision::Busy => {
                tracing::debug!("ignoring submit while a submission is in flight");
            }
            SubmitDecision::RequiresSignIn => self.start_sign_in(),
            SubmitDecision::Invalid(report) => self.state.apply_validation(report),
            SubmitDecision::Dispatch(request) => {
                self.state.apply_validation(ValidationReport::default());
                self.state.submission = SubmissionState::Loading;

                let api = Arc::clone(&self.api);
                let (tx, rx) = oneshot::channel();
                tokio::spawn(async move {
                    let outcome = run_submission(api.as_ref(), request).await;
                    let _ = tx.send(outcome);
                });
                self.in_flight = Some(rx);
            }
        }
    }

    /// Save progress and hand the maker over to the external sign-in step
    fn start_sign_in(&mut self) {
        if let Err(e) = self.store.persist(&self.state.values) {
            tracing::error!("could not save submission before sign-in: {e}");
            self.status_message = Some("Could not save your progress".to_string());
            return;
        }

        let url = self.config.sign_in_redirect_url();
        let copied = match copy_to_clipboard(&url) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("failed to copy sign-in URL: {e}");
                false
            }
        };

        tracing::info!(%url, "leaving for Blockstack sign-in");
        self.exit_message = Some(format!(
            "Sign in with Blockstack at {url}{}\nYour answers are saved; relaunch with {} set to continue.",
            if copied { " (copied to clipboard)" } else { "" },
            crate::state::JWT_ENV,
        ));
        self.quit = true;
    }
}

fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard = arboard::Clipboard::new()?;
    clipboard.set_text(text)?;
    Ok(())
}
