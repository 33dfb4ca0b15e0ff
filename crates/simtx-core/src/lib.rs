//! # simtx-core
//!
//! Shared library for SimTX containing the transmit payload type, the input
//! encoder, and the channel event vocabulary.
//!
//! This crate is used by the panel application and by any host harness that
//! wants to drive the panel programmatically. It has zero dependencies on OS
//! APIs, UI frameworks, or network sockets.
//!
//! # Architecture overview (for beginners)
//!
//! SimTX is a plug-in panel for a wireless-sensor simulation host: the user
//! types a short message, the panel encodes it into a fixed 8-byte payload,
//! and the host copies that payload into every simulated wireless packet it
//! transmits.
//!
//! This crate (`simtx-core`) is the shared foundation. It defines:
//!
//! - **`payload`** – The 8-byte [`TxPayload`] and the encoder that builds one
//!   from user input, either as raw characters or as a comma-separated list
//!   of hex bytes.
//!
//! - **`channel`** – The one-byte event codes the host engine uses when it
//!   notifies the panel about channel activity. The panel only acts on the
//!   transmit event and ignores everything else.

// Declare the two top-level modules. Rust will look for each in a
// subdirectory with the same name (e.g., src/payload/mod.rs).
pub mod channel;
pub mod payload;

// Re-export the most-used types at the crate root so callers can write
// `simtx_core::TxPayload` instead of `simtx_core::payload::data::TxPayload`.
pub use channel::events::EventCode;
pub use payload::data::{TxPayload, PAYLOAD_LEN};
pub use payload::encoder::{encode_input, EncodeError, FieldPolicy, InputMode};
