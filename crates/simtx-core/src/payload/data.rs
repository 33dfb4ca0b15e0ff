//! The fixed-size transmit payload.
//!
//! Every outgoing simulated wireless packet carries exactly
//! [`PAYLOAD_LEN`] bytes of user data. The payload is recomputed on every
//! validation attempt and persists until the next one; slots the user did
//! not fill are always zero.

use std::fmt;

/// Number of user-data bytes in one transmitted message.
pub const PAYLOAD_LEN: usize = 8;

/// The 8-byte message body about to be transmitted.
///
/// Invariant: always exactly [`PAYLOAD_LEN`] bytes; unused trailing bytes are
/// zero-filled by the encoder. A freshly created payload is all zeros, which
/// is also what the panel falls back to after a hex-mode validation failure.
///
/// # Examples
///
/// ```rust
/// use simtx_core::payload::data::TxPayload;
///
/// let payload = TxPayload::from_bytes([0xFF, 0x00, 0xA1, 0, 0, 0, 0, 0]);
/// assert_eq!(payload.to_string(), "FF,00,A1,00,00,00,00,00");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TxPayload([u8; PAYLOAD_LEN]);

impl TxPayload {
    /// Creates an all-zero payload.
    pub const fn zeroed() -> Self {
        Self([0u8; PAYLOAD_LEN])
    }

    /// Creates a payload from an already-filled byte array.
    pub const fn from_bytes(bytes: [u8; PAYLOAD_LEN]) -> Self {
        Self(bytes)
    }

    /// Returns the payload bytes.
    pub const fn as_bytes(&self) -> &[u8; PAYLOAD_LEN] {
        &self.0
    }

    /// Returns the payload as an owned array, e.g. for a scratch send buffer.
    pub const fn to_array(&self) -> [u8; PAYLOAD_LEN] {
        self.0
    }

    /// Copies the payload verbatim into `buf`.
    ///
    /// Both sides are fixed at [`PAYLOAD_LEN`] bytes, so the copy is always
    /// complete and can never write out of bounds.
    pub fn copy_into(&self, buf: &mut [u8; PAYLOAD_LEN]) {
        buf.copy_from_slice(&self.0);
    }

    /// Returns `true` if every byte is zero.
    pub fn is_zeroed(&self) -> bool {
        self.0.iter().all(|&b| b == 0)
    }
}

impl From<[u8; PAYLOAD_LEN]> for TxPayload {
    fn from(bytes: [u8; PAYLOAD_LEN]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for TxPayload {
    /// Renders the payload as uppercase hex couplets, `FF,00,A1,...` – the
    /// same shape the hex input field uses.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, byte) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{byte:02X}")?;
        }
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zeroed_payload_is_all_zero() {
        let payload = TxPayload::zeroed();
        assert!(payload.is_zeroed());
        assert_eq!(payload.as_bytes(), &[0u8; PAYLOAD_LEN]);
    }

    #[test]
    fn test_default_equals_zeroed() {
        assert_eq!(TxPayload::default(), TxPayload::zeroed());
    }

    #[test]
    fn test_copy_into_writes_all_eight_bytes() {
        // Arrange
        let payload = TxPayload::from_bytes([1, 2, 3, 4, 5, 6, 7, 8]);
        let mut buf = [0xFFu8; PAYLOAD_LEN];

        // Act
        payload.copy_into(&mut buf);

        // Assert
        assert_eq!(buf, [1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_display_renders_uppercase_hex_couplets() {
        let payload = TxPayload::from_bytes([0xFF, 0x00, 0xA1, 0, 0, 0, 0, 0]);
        assert_eq!(payload.to_string(), "FF,00,A1,00,00,00,00,00");
    }

    #[test]
    fn test_is_zeroed_detects_nonzero_byte() {
        let payload = TxPayload::from_bytes([0, 0, 0, 0, 0, 0, 0, 1]);
        assert!(!payload.is_zeroed());
    }
}
