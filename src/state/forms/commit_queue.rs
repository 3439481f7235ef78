//! Coalescing write queue that stands in front of the committed form values
//!
//! Keystrokes land here first. A batch is released once no write has been
//! queued for a full window, and can always be drained on demand. Time is
//! passed in by the caller so tests can step it deterministically.

use super::values::{apply_change, ChangeEvent, FormValues};
use std::collections::BTreeMap;
use std::time::{Duration, Instant};

/// Default quiescence window before queued writes are committed
pub const DEFAULT_COMMIT_WINDOW: Duration = Duration::from_millis(100);

#[derive(Debug, Clone)]
pub struct CommitQueue {
    window: Duration,
    pending: BTreeMap<String, ChangeEvent>,
    last_write: Option<Instant>,
}

impl Default for CommitQueue {
    fn default() -> Self {
        Self::new(DEFAULT_COMMIT_WINDOW)
    }
}

impl CommitQueue {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: BTreeMap::new(),
            last_write: None,
        }
    }

    /// Queue a write; a later write to the same field replaces it
    pub fn push(&mut self, field: &str, event: ChangeEvent, now: Instant) {
        self.pending.insert(field.to_string(), event);
        self.last_write = Some(now);
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Uncommitted value for a field, used to echo typing immediately
    pub fn pending(&self, field: &str) -> Option<&ChangeEvent> {
        self.pending.get(field)
    }

    /// Release the batch if the window has passed since the last write
    pub fn take_due(&mut self, now: Instant) -> Option<BTreeMap<String, ChangeEvent>> {
        let last = self.last_write?;
        if now.saturating_duration_since(last) < self.window {
            return None;
        }
        Some(self.drain())
    }

    /// Release everything queued, regardless of timing
    pub fn drain(&mut self) -> BTreeMap<String, ChangeEvent> {
        self.last_write = None;
        std::mem::take(&mut self.pending)
    }
}

/// Fold a released batch into the committed values
pub fn commit(values: &FormValues, batch: BTreeMap<String, ChangeEvent>) -> FormValues {
    batch
        .into_iter()
        .fold(values.clone(), |acc, (field, event)| apply_change(&acc, &field, event))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::forms::FieldValue;

    fn text(s: &str) -> ChangeEvent {
        ChangeEvent::Text(s.to_string())
    }

    #[test]
    fn test_nothing_due_when_empty() {
        let mut queue = CommitQueue::default();
        assert!(queue.take_due(Instant::now()).is_none());
    }

    #[test]
    fn test_batch_waits_for_quiet_window() {
        let start = Instant::now();
        let mut queue = CommitQueue::new(Duration::from_millis(100));

        queue.push("name", text("S"), start);
        assert!(queue.take_due(start + Duration::from_millis(99)).is_none());

        let batch = queue.take_due(start + Duration::from_millis(100)).unwrap();
        assert_eq!(batch.get("name"), Some(&text("S")));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_new_write_restarts_window_and_coalesces() {
        let start = Instant::now();
        let mut queue = CommitQueue::new(Duration::from_millis(100));

        queue.push("name", text("S"), start);
        queue.push("name", text("Sa"), start + Duration::from_millis(80));
        queue.push(
            "public",
            ChangeEvent::Checkbox { checked: true },
            start + Duration::from_millis(90),
        );

        assert!(queue.take_due(start + Duration::from_millis(150)).is_none());
        assert_eq!(queue.pending("name"), Some(&text("Sa")));

        let batch = queue.take_due(start + Duration::from_millis(190)).unwrap();
        assert_eq!(batch.len(), 2);
        assert_eq!(batch.get("name"), Some(&text("Sa")));
    }

    #[test]
    fn test_drain_ignores_timing() {
        let now = Instant::now();
        let mut queue = CommitQueue::default();
        queue.push(
            "category",
            ChangeEvent::Select {
                value: Some("Music".to_string()),
            },
            now,
        );

        let batch = queue.drain();
        assert_eq!(batch.len(), 1);
        assert!(queue.take_due(now + Duration::from_secs(1)).is_none());
    }

    #[test]
    fn test_commit_applies_each_change() {
        let values = FormValues::new()
            .with("name", FieldValue::text("Old"))
            .with("website", FieldValue::text("https://satoshi.chat/"));
        let mut queue = CommitQueue::default();
        let now = Instant::now();
        queue.push("name", text("New"), now);
        queue.push("category", ChangeEvent::Select { value: None }, now);

        let committed = commit(&values, queue.drain());
        assert_eq!(committed.text("name"), Some("New"));
        assert_eq!(committed.get("category"), Some(&FieldValue::Null));
        assert_eq!(committed.text("website"), Some("https://satoshi.chat/"));
    }
}
