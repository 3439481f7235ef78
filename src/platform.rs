//! Platform-specific key bindings

use crossterm::event::KeyModifiers;

/// Modifier for the submit shortcut.
/// Terminals on macOS rarely forward Cmd, so Ctrl is used everywhere.
pub const SUBMIT_MODIFIER: KeyModifiers = KeyModifiers::CONTROL;

/// Submit shortcut display for the status bar
pub const SUBMIT_SHORTCUT: &str = "Ctrl+S";
