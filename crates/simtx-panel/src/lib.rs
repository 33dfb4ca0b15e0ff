//! simtx-panel library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.
//!
//! # What does simtx-panel do? (for beginners)
//!
//! The *panel* is the piece of the simulator the user actually touches: a
//! text field, a mode selector, and two buttons. The user types the next
//! message body, the panel validates and encodes it into a fixed 8-byte
//! payload, and from then on:
//!
//! 1. Every time the host engine fires a transmit event, the panel copies
//!    the payload into the outgoing frame buffer.
//! 2. When the user asks for an acknowledged send, the panel re-validates
//!    the field, then hands the payload to the host's reliable-send
//!    primitive.
//! 3. A periodic timer tick advances a purely cosmetic event counter shown
//!    next to the field.
//!
//! The panel logic itself is synchronous and single-threaded; the
//! infrastructure layer owns the async event pump that stands in for the
//! host engine.

/// Application layer: the transmit panel use case.
pub mod application;

/// Infrastructure layer: simulated host adapters, UI state bridge, and
/// configuration storage.
pub mod infrastructure;
