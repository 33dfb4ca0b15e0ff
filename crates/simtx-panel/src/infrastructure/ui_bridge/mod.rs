//! UI state bridge for the panel.
//!
//! The vendor tool renders the panel as a form with one input field and
//! three labels (error, echoed data, event count). This module holds that
//! surface as shared state: the panel reports into it through the
//! [`PanelReporter`] trait and the console front end renders snapshots of
//! it.
//!
//! # Why `std::sync::Mutex` here (and not the async one)?
//!
//! The panel's reporter callbacks are synchronous and run inside the
//! dispatch loop; no lock is ever held across an `.await` point. A plain
//! `std::sync::Mutex` is the right tool for that – the async mutex only
//! earns its overhead when a guard must live across a suspension.
//!
//! # Console commands
//!
//! The interactive binary drives the panel from stdin. Each line maps onto
//! one of the form's UI events:
//!
//! ```text
//! set <text>   edit the input field            (typing in the text box)
//! update       validate the field              (Update Data button)
//! mode text    switch to character input       (radio button)
//! mode hex     switch to hex-couplet input     (radio button)
//! ack          validate, then acknowledged send (Send Ack button)
//! status       print the current label state
//! quit         leave the panel
//! ```

use std::sync::{Arc, Mutex, MutexGuard};

use serde::{Deserialize, Serialize};
use simtx_core::{FieldPolicy, InputMode};

use crate::application::panel::PanelReporter;

// ── Shared panel state ────────────────────────────────────────────────────────

/// The user-visible panel surface: field contents, labels, and the active
/// field constraints.
///
/// Shared between the dispatch loop (writes via commands), the panel's
/// reporter callbacks (writes via [`PanelReporter`]), and the renderer
/// (reads via [`PanelState::snapshot`]).
pub struct PanelState {
    /// Current contents of the input field.
    input_text: Mutex<String>,
    /// Error label; empty when the last validation succeeded.
    error_text: Mutex<String>,
    /// Echo label showing the last successfully encoded data.
    echo_text: Mutex<String>,
    /// Event-counter label text.
    event_count_text: Mutex<String>,
    /// Constraints applied to the input field by the active mode.
    field_policy: Mutex<FieldPolicy>,
}

/// Acquires the guard, recovering it if a previous holder panicked.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl PanelState {
    /// Creates panel state for the given starting mode, with the field
    /// pre-filled with that mode's placeholder.
    pub fn new(mode: InputMode) -> Arc<Self> {
        let policy = mode.field_policy();
        Arc::new(Self {
            input_text: Mutex::new(policy.placeholder.to_string()),
            error_text: Mutex::new(String::new()),
            echo_text: Mutex::new(String::new()),
            event_count_text: Mutex::new("0".to_string()),
            field_policy: Mutex::new(policy),
        })
    }

    /// Replaces the input field contents.
    ///
    /// Input beyond the active mode's length cap is dropped, the same way a
    /// capped text box refuses further keystrokes.
    pub fn set_input_text(&self, text: &str) {
        let max_len = lock(&self.field_policy).max_len;
        let capped: String = text.chars().take(max_len).collect();
        *lock(&self.input_text) = capped;
    }

    /// Returns the current input field contents.
    pub fn input_text(&self) -> String {
        lock(&self.input_text).clone()
    }

    /// Applies a new field policy after a mode switch: the cap changes and
    /// the field resets to the mode's placeholder. Labels are untouched.
    pub fn apply_field_policy(&self, policy: FieldPolicy) {
        *lock(&self.field_policy) = policy;
        *lock(&self.input_text) = policy.placeholder.to_string();
    }

    /// Returns a serialisable snapshot of the whole surface.
    pub fn snapshot(&self) -> PanelSnapshotDto {
        let policy = *lock(&self.field_policy);
        PanelSnapshotDto {
            input_text: lock(&self.input_text).clone(),
            error_text: lock(&self.error_text).clone(),
            echo_text: lock(&self.echo_text).clone(),
            event_count_text: lock(&self.event_count_text).clone(),
            placeholder: policy.placeholder.to_string(),
            max_input_len: policy.max_len,
        }
    }
}

impl PanelReporter for PanelState {
    fn on_validated(&self, echo: Option<&str>, error: &str) {
        if let Some(echo) = echo {
            *lock(&self.echo_text) = echo.to_string();
        }
        *lock(&self.error_text) = error.to_string();
    }

    fn on_event_count(&self, count: u64) {
        *lock(&self.event_count_text) = count.to_string();
    }
}

// ── Snapshot DTO ──────────────────────────────────────────────────────────────

/// Plain serialisable snapshot of the panel surface.
///
/// This is what a richer front end would poll; the console front end prints
/// it for the `status` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PanelSnapshotDto {
    pub input_text: String,
    pub error_text: String,
    pub echo_text: String,
    pub event_count_text: String,
    pub placeholder: String,
    pub max_input_len: usize,
}

// ── Console commands ──────────────────────────────────────────────────────────

/// One parsed console command, each mapping onto a UI event of the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelCommand {
    /// Replace the input field contents.
    SetInput(String),
    /// Validate the current field contents.
    Update,
    /// Switch the input interpretation.
    SwitchMode(InputMode),
    /// Validate, then send through the acknowledged path.
    SendAck,
    /// Print the current panel surface.
    ShowStatus,
    /// Leave the panel.
    Quit,
}

/// Parses one stdin line into a [`PanelCommand`].
///
/// # Errors
///
/// Returns a human-readable message for unknown or incomplete commands; the
/// caller shows it and keeps reading.
pub fn parse_command(line: &str) -> Result<PanelCommand, String> {
    let line = line.trim();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    match verb {
        "set" => {
            if rest.is_empty() {
                Err("usage: set <text>".to_string())
            } else {
                Ok(PanelCommand::SetInput(rest.to_string()))
            }
        }
        "update" => Ok(PanelCommand::Update),
        "mode" => match rest {
            "text" => Ok(PanelCommand::SwitchMode(InputMode::Text)),
            "hex" => Ok(PanelCommand::SwitchMode(InputMode::HexBytes)),
            other => Err(format!("unknown mode {other:?}; expected \"text\" or \"hex\"")),
        },
        "ack" => Ok(PanelCommand::SendAck),
        "status" => Ok(PanelCommand::ShowStatus),
        "quit" | "exit" => Ok(PanelCommand::Quit),
        other => Err(format!(
            "unknown command {other:?}; try set/update/mode/ack/status/quit"
        )),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── PanelState ────────────────────────────────────────────────────────────

    #[test]
    fn test_new_state_prefills_field_with_mode_placeholder() {
        let state = PanelState::new(InputMode::HexBytes);
        assert_eq!(state.input_text(), "00,00,00,00,00,00,00,00");
    }

    #[test]
    fn test_set_input_text_caps_at_mode_length() {
        // Arrange – text mode caps the field at 8 characters
        let state = PanelState::new(InputMode::Text);

        // Act
        state.set_input_text("ABCDEFGHIJKL");

        // Assert
        assert_eq!(state.input_text(), "ABCDEFGH");
    }

    #[test]
    fn test_apply_field_policy_resets_field_to_new_placeholder() {
        // Arrange
        let state = PanelState::new(InputMode::Text);
        state.set_input_text("typed");

        // Act
        state.apply_field_policy(InputMode::HexBytes.field_policy());

        // Assert
        assert_eq!(state.input_text(), "00,00,00,00,00,00,00,00");
        assert_eq!(state.snapshot().max_input_len, 23);
    }

    #[test]
    fn test_reporter_success_updates_both_labels() {
        // Arrange
        let state = PanelState::new(InputMode::Text);

        // Act
        state.on_validated(Some("Hi"), "");

        // Assert
        let snap = state.snapshot();
        assert_eq!(snap.echo_text, "Hi");
        assert_eq!(snap.error_text, "");
    }

    #[test]
    fn test_reporter_failure_leaves_echo_untouched() {
        // Arrange
        let state = PanelState::new(InputMode::Text);
        state.on_validated(Some("old echo"), "");

        // Act
        state.on_validated(None, "Error: empty input");

        // Assert
        let snap = state.snapshot();
        assert_eq!(snap.echo_text, "old echo");
        assert_eq!(snap.error_text, "Error: empty input");
    }

    #[test]
    fn test_reporter_event_count_renders_as_text() {
        let state = PanelState::new(InputMode::Text);
        state.on_event_count(42);
        assert_eq!(state.snapshot().event_count_text, "42");
    }

    #[test]
    fn test_snapshot_serialises_round_trippably() {
        let state = PanelState::new(InputMode::Text);
        let snap = state.snapshot();

        let toml_str = toml::to_string(&snap).expect("snapshot must serialise");
        assert!(toml_str.contains("input_text"));
        assert!(toml_str.contains("max_input_len = 8"));
    }

    // ── Command parsing ───────────────────────────────────────────────────────

    #[test]
    fn test_parse_set_keeps_full_argument_including_spaces() {
        assert_eq!(
            parse_command("set FF,00,A1"),
            Ok(PanelCommand::SetInput("FF,00,A1".to_string()))
        );
    }

    #[test]
    fn test_parse_mode_variants() {
        assert_eq!(
            parse_command("mode text"),
            Ok(PanelCommand::SwitchMode(InputMode::Text))
        );
        assert_eq!(
            parse_command("mode hex"),
            Ok(PanelCommand::SwitchMode(InputMode::HexBytes))
        );
        assert!(parse_command("mode octal").is_err());
    }

    #[test]
    fn test_parse_bare_verbs() {
        assert_eq!(parse_command("update"), Ok(PanelCommand::Update));
        assert_eq!(parse_command("ack"), Ok(PanelCommand::SendAck));
        assert_eq!(parse_command("status"), Ok(PanelCommand::ShowStatus));
        assert_eq!(parse_command("quit"), Ok(PanelCommand::Quit));
        assert_eq!(parse_command("exit"), Ok(PanelCommand::Quit));
    }

    #[test]
    fn test_parse_rejects_unknown_and_incomplete_commands() {
        assert!(parse_command("launch").is_err());
        assert!(parse_command("set").is_err());
        assert!(parse_command("").is_err());
    }

    #[test]
    fn test_parse_trims_surrounding_whitespace() {
        assert_eq!(parse_command("  update  "), Ok(PanelCommand::Update));
    }
}
