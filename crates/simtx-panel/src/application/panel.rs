//! TxPanel: the transmit panel use case.
//!
//! This use case is the heart of the panel application. It owns the current
//! [`TxPayload`], the active [`InputMode`], and the cosmetic event counter,
//! and is driven entirely by discrete callbacks: the UI validates input and
//! requests acknowledged sends, the host fires channel events and timer
//! ticks.
//!
//! # Architecture
//!
//! The use case depends only on traits ([`AckTransmitter`],
//! [`PanelReporter`]) and `simtx-core` types. Infrastructure
//! implementations are injected at construction time, making the use case
//! fully unit-testable. All methods are synchronous; every callback runs to
//! completion before control returns to the caller, so no locking is needed
//! inside the panel itself.

use std::sync::Arc;

use simtx_core::{
    encode_input, EncodeError, EventCode, FieldPolicy, InputMode, TxPayload, PAYLOAD_LEN,
};
use thiserror::Error;
use tracing::{debug, trace};

/// Error type for the acknowledged-send path.
///
/// Validation failures are not errors here: the panel reports them through
/// the status labels and still hands the host whatever the payload holds
/// afterwards, exactly like the per-event transmit path would.
#[derive(Debug, Error)]
pub enum SendError {
    /// The host's reliable-send primitive rejected the message.
    #[error("acknowledged send failed: {0}")]
    Transmit(String),
}

/// Trait for the host's reliable-send primitive.
///
/// Delivery, retry, and failure semantics belong entirely to the host and
/// are opaque to the panel. Infrastructure implementations hand the bytes
/// to the host engine; test implementations record calls.
pub trait AckTransmitter: Send + Sync {
    /// Fires one 8-byte message through the acknowledged-delivery path.
    fn request_ack_msg(&self, payload: [u8; PAYLOAD_LEN]) -> Result<(), String>;
}

/// Trait for the user-visible status surface.
///
/// The panel never owns label text; it reports and the UI layer renders.
pub trait PanelReporter: Send + Sync {
    /// Publishes the outcome of a validation attempt.
    ///
    /// On success `echo` carries the new encoded-data display text and
    /// `error` is empty. On failure `echo` is `None` – the previous echo
    /// stays on screen – and `error` carries the message.
    fn on_validated(&self, echo: Option<&str>, error: &str);

    /// Publishes the new value of the cosmetic event counter.
    fn on_event_count(&self, count: u64);
}

/// Whether the panel currently holds a user-validated payload.
///
/// The only way in is a successful validation; the only way back out is a
/// hex-mode validation failure, which wipes the payload. Failures that keep
/// the previous payload keep the state too.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationState {
    /// No validated payload; an all-zero payload is transmitted.
    Idle,
    /// The stored payload came from a successful validation.
    PayloadReady,
}

/// The transmit panel use case.
///
/// Holds the payload that every outgoing frame copies, plus the input mode
/// and event counter. See the module docs for the callback surface.
pub struct TxPanel {
    payload: TxPayload,
    mode: InputMode,
    state: ValidationState,
    event_counter: u64,
    ack: Arc<dyn AckTransmitter>,
    reporter: Arc<dyn PanelReporter>,
}

impl TxPanel {
    /// Creates a panel in text mode with a zeroed payload and counter.
    pub fn new(ack: Arc<dyn AckTransmitter>, reporter: Arc<dyn PanelReporter>) -> Self {
        Self {
            payload: TxPayload::zeroed(),
            mode: InputMode::Text,
            state: ValidationState::Idle,
            event_counter: 0,
            ack,
            reporter,
        }
    }

    /// Resets the event counter and validates the field's initial contents,
    /// so the payload reflects what is on screen before the first transmit
    /// event fires.
    pub fn initialize(&mut self, initial_input: &str) {
        self.event_counter = 0;
        // The initial placeholder may legitimately fail validation (e.g. an
        // empty field); the failure is reported like any other.
        let _ = self.validate_input(initial_input);
    }

    /// Validates `raw` under the current mode and updates the stored payload.
    ///
    /// On success the payload is replaced and the reporter receives the new
    /// echo text with an empty error. On failure the reporter receives only
    /// an error message, and the payload is wiped to zeros exactly when the
    /// error kind demands it (hex-mode failures) – otherwise the previous
    /// payload survives.
    ///
    /// # Errors
    ///
    /// Returns the [`EncodeError`] for the caller's benefit; it has already
    /// been reported and applied to panel state by the time this returns.
    pub fn validate_input(&mut self, raw: &str) -> Result<TxPayload, EncodeError> {
        match encode_input(raw, self.mode) {
            Ok(payload) => {
                self.payload = payload;
                self.state = ValidationState::PayloadReady;
                let echo = match self.mode {
                    InputMode::Text => raw.to_string(),
                    InputMode::HexBytes => payload.to_string(),
                };
                self.reporter.on_validated(Some(&echo), "");
                debug!(payload = %payload, "payload updated");
                Ok(payload)
            }
            Err(e) => {
                if e.resets_payload() {
                    self.payload = TxPayload::zeroed();
                    self.state = ValidationState::Idle;
                }
                self.reporter.on_validated(None, &format!("Error: {e}"));
                Err(e)
            }
        }
    }

    /// Processes a channel event from the host engine.
    ///
    /// On [`EventCode::Tx`] the current payload is copied verbatim into
    /// `tx_buffer` – exactly [`PAYLOAD_LEN`] bytes, no partial writes. Every
    /// other code is a no-op, not an error.
    pub fn handle_channel_event(&self, code: EventCode, tx_buffer: &mut [u8; PAYLOAD_LEN]) {
        match code {
            EventCode::Tx => self.payload.copy_into(tx_buffer),
            other => trace!(code = ?other, "channel event ignored"),
        }
    }

    /// Processes a channel event delivered as the host's raw event byte.
    ///
    /// This is the shape of the host's notification callback; bytes outside
    /// the known vocabulary are ignored exactly like a known non-transmit
    /// code.
    pub fn handle_raw_channel_event(&self, code: u8, tx_buffer: &mut [u8; PAYLOAD_LEN]) {
        match EventCode::try_from(code) {
            Ok(code) => self.handle_channel_event(code, tx_buffer),
            Err(e) => trace!(%e, "channel event ignored"),
        }
    }

    /// Re-validates `raw` and fires the result through the acknowledged path.
    ///
    /// Validation always runs first so stale edits are never transmitted
    /// silently; the message sent is whatever the payload holds afterwards
    /// (the previous payload on empty input, zeros after a hex failure).
    ///
    /// # Errors
    ///
    /// Returns [`SendError::Transmit`] if the host rejects the send.
    pub fn send_acknowledged(&mut self, raw: &str) -> Result<(), SendError> {
        // Failure details were already reported through the status labels.
        let _ = self.validate_input(raw);

        let mut scratch = [0u8; PAYLOAD_LEN];
        self.payload.copy_into(&mut scratch);
        self.ack.request_ack_msg(scratch).map_err(SendError::Transmit)
    }

    /// Advances the cosmetic event counter and republishes it.
    ///
    /// The counter tracks simulated device events only; it has no effect on
    /// encoding or transmission.
    pub fn on_timer_tick(&mut self) -> u64 {
        self.event_counter += 1;
        self.reporter.on_event_count(self.event_counter);
        self.event_counter
    }

    /// Switches the input interpretation and returns the new field policy.
    ///
    /// Only the field constraints change; the stored payload and validation
    /// state are untouched until the next validation.
    pub fn set_mode(&mut self, mode: InputMode) -> FieldPolicy {
        self.mode = mode;
        mode.field_policy()
    }

    /// The payload the next transmit event will copy.
    pub fn payload(&self) -> TxPayload {
        self.payload
    }

    /// The active input interpretation.
    pub fn mode(&self) -> InputMode {
        self.mode
    }

    /// Current value of the cosmetic event counter.
    pub fn event_count(&self) -> u64 {
        self.event_counter
    }

    /// Current validation state.
    pub fn validation_state(&self) -> ValidationState {
        self.state
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
