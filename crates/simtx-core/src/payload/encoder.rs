//! Input validation and encoding for the transmit payload.
//!
//! The user types the next message body into a single text field. Two
//! interpretations exist, selected by [`InputMode`]:
//!
//! - **Text**: each character becomes one payload byte (code point truncated
//!   to 8 bits), at most [`PAYLOAD_LEN`] characters.
//! - **Hex bytes**: the field holds up to eight comma-separated base-16
//!   tokens of one or two digits, e.g. `FF,00,A1`.
//!
//! Encoding is a total function over arbitrary input strings: every
//! malformed input maps to a typed [`EncodeError`], never a panic. Whether a
//! given failure also wipes the previously stored payload is the caller's
//! decision; [`EncodeError::resets_payload`] encodes the rule (hex-mode
//! failures reset, text-mode failures do not).

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::trace;

use crate::payload::data::{TxPayload, PAYLOAD_LEN};

/// Widest accepted hex-mode input: eight two-digit tokens plus seven commas.
pub const HEX_INPUT_MAX_LEN: usize = 23;

// ── Input mode ────────────────────────────────────────────────────────────────

/// Selects how the input field text is interpreted.
///
/// The mode also determines the field's display policy (placeholder text and
/// maximum length); see [`InputMode::field_policy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputMode {
    /// Raw characters, one byte per character.
    Text,
    /// Comma-separated hex byte tokens.
    #[serde(rename = "hex")]
    HexBytes,
}

/// Display constraints the UI applies to the input field for a given mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldPolicy {
    /// Maximum number of characters the field accepts.
    pub max_len: usize,
    /// Text shown in the field right after a mode switch.
    pub placeholder: &'static str,
}

impl InputMode {
    /// Returns the input-field constraints for this mode.
    ///
    /// Switching modes resets only these constraints and the visible field
    /// text; the stored payload is never touched by a mode switch.
    pub fn field_policy(self) -> FieldPolicy {
        match self {
            InputMode::Text => FieldPolicy {
                max_len: PAYLOAD_LEN,
                placeholder: "Max8Char",
            },
            InputMode::HexBytes => FieldPolicy {
                max_len: HEX_INPUT_MAX_LEN,
                placeholder: "00,00,00,00,00,00,00,00",
            },
        }
    }
}

// ── Error taxonomy ────────────────────────────────────────────────────────────

/// Reasons an input string cannot be encoded into a payload.
///
/// All variants are recovered locally by the panel and surfaced through the
/// error label; none propagate to the host.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// The input field is empty. The stored payload stays as it was.
    #[error("empty input")]
    EmptyInput,

    /// Text-mode input has more characters than the payload has bytes.
    #[error("text input is {len} characters, limit is {PAYLOAD_LEN}")]
    TooLong { len: usize },

    /// Hex-mode input split into more than [`PAYLOAD_LEN`] tokens.
    #[error("{count} hex bytes given, limit is {PAYLOAD_LEN}")]
    TooManyTokens { count: usize },

    /// A hex token has more than two digits.
    #[error("hex byte {index} is longer than two digits")]
    TokenTooLong { index: usize },

    /// A hex token does not parse as a base-16 byte value.
    #[error("{token:?} is not a hex byte")]
    InvalidHexDigit { token: String },
}

impl EncodeError {
    /// Whether this failure wipes the previously stored payload.
    ///
    /// Hex-mode failures reset the payload to all zeros so a half-parsed
    /// token list can never leak into a transmit. Text-mode failures leave
    /// the prior payload in place.
    pub fn resets_payload(&self) -> bool {
        matches!(
            self,
            EncodeError::TooManyTokens { .. }
                | EncodeError::TokenTooLong { .. }
                | EncodeError::InvalidHexDigit { .. }
        )
    }
}

// ── Encoder ───────────────────────────────────────────────────────────────────

/// Encodes the input field text into a payload under the given mode.
///
/// Unfilled trailing payload bytes are zero. The function itself has no side
/// effects; updating stored state and status labels is the caller's job.
///
/// # Errors
///
/// Returns [`EncodeError::EmptyInput`] for an empty string in either mode,
/// and the mode-specific variants documented on [`EncodeError`] otherwise.
///
/// # Examples
///
/// ```rust
/// use simtx_core::payload::encoder::{encode_input, InputMode};
///
/// let payload = encode_input("FF,00,A1", InputMode::HexBytes).unwrap();
/// assert_eq!(payload.as_bytes(), &[0xFF, 0x00, 0xA1, 0, 0, 0, 0, 0]);
/// ```
pub fn encode_input(raw: &str, mode: InputMode) -> Result<TxPayload, EncodeError> {
    if raw.is_empty() {
        return Err(EncodeError::EmptyInput);
    }

    let result = match mode {
        InputMode::Text => encode_text(raw),
        InputMode::HexBytes => encode_hex(raw),
    };

    if let Err(ref e) = result {
        trace!(input = raw, mode = ?mode, error = %e, "input rejected");
    }
    result
}

/// One byte per character, code point truncated to 8 bits.
fn encode_text(raw: &str) -> Result<TxPayload, EncodeError> {
    let len = raw.chars().count();
    if len > PAYLOAD_LEN {
        return Err(EncodeError::TooLong { len });
    }

    let mut bytes = [0u8; PAYLOAD_LEN];
    for (i, ch) in raw.chars().enumerate() {
        bytes[i] = ch as u8;
    }
    Ok(TxPayload::from_bytes(bytes))
}

/// Comma-separated base-16 tokens, one payload byte each.
fn encode_hex(raw: &str) -> Result<TxPayload, EncodeError> {
    let tokens: Vec<&str> = raw.split(',').collect();
    if tokens.len() > PAYLOAD_LEN {
        return Err(EncodeError::TooManyTokens {
            count: tokens.len(),
        });
    }

    let mut bytes = [0u8; PAYLOAD_LEN];
    for (i, token) in tokens.iter().enumerate() {
        if token.len() > 2 {
            return Err(EncodeError::TokenTooLong { index: i });
        }
        bytes[i] = u8::from_str_radix(token, 16).map_err(|_| EncodeError::InvalidHexDigit {
            token: (*token).to_string(),
        })?;
    }
    Ok(TxPayload::from_bytes(bytes))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
