//! Application layer use cases for the panel.
//!
//! There is exactly one use case here:
//!
//! - **`panel`** – Owns the current payload, input mode, and event counter,
//!   and reacts to the discrete callbacks the host and the UI fire at it
//!   (validate, transmit event, acknowledged send, timer tick, mode
//!   switch). The host send primitive and the status-label surface are
//!   injected as traits at construction time, which keeps the use case
//!   fully unit-testable.

pub mod panel;

pub use panel::{AckTransmitter, PanelReporter, SendError, TxPanel, ValidationState};
