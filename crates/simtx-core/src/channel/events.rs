//! Channel event codes delivered by the host engine.

use thiserror::Error;

/// One-byte channel event codes the host engine reports to the panel.
///
/// Only [`EventCode::Tx`] carries behaviour for this panel: it means the
/// transmit buffer must be filled immediately before the wireless layer
/// sends it. Every other code is informational and the panel ignores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum EventCode {
    /// The receive search window expired without finding a peer.
    RxSearchTimeout = 0x01,
    /// A scheduled receive slot produced no message.
    RxFail = 0x02,
    /// The transmit buffer is about to be sent and must be filled now.
    Tx = 0x03,
    /// An inbound acknowledged transfer failed.
    TransferRxFailed = 0x04,
    /// An outbound acknowledged transfer was acknowledged by the receiver.
    TransferTxCompleted = 0x05,
    /// An outbound acknowledged transfer exhausted its retries.
    TransferTxFailed = 0x06,
    /// The channel was closed.
    ChannelClosed = 0x07,
}

impl TryFrom<u8> for EventCode {
    type Error = UnknownEventCode;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x01 => Ok(EventCode::RxSearchTimeout),
            0x02 => Ok(EventCode::RxFail),
            0x03 => Ok(EventCode::Tx),
            0x04 => Ok(EventCode::TransferRxFailed),
            0x05 => Ok(EventCode::TransferTxCompleted),
            0x06 => Ok(EventCode::TransferTxFailed),
            0x07 => Ok(EventCode::ChannelClosed),
            other => Err(UnknownEventCode(other)),
        }
    }
}

/// Error returned when a raw event byte is not part of the vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unknown channel event code: 0x{0:02X}")]
pub struct UnknownEventCode(pub u8);

// ── Tests ─────────────────────────────────────────────────────────────────────
