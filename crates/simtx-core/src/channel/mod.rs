//! Channel event vocabulary shared with the simulation host.
//!
//! The host engine notifies the panel about channel activity with a one-byte
//! event code. The panel cares about exactly one of them – the transmit
//! event – but the full vocabulary is modelled so unknown bytes are rejected
//! at the boundary instead of being silently misread.

pub mod events;

pub use events::{EventCode, UnknownEventCode};
