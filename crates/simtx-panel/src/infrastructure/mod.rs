//! Infrastructure layer for the panel application.
//!
//! Contains everything that touches the outside world: the simulated host
//! engine, the UI state bridge, and configuration persistence.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `simtx_core`, but MUST NOT be imported by the application layer.
//!
//! # Sub-modules
//!
//! - **`host`** – Stand-in for the vendor simulation engine: an async event
//!   pump that fires transmit events and timer ticks at the configured
//!   periods, plus the adapter that receives acknowledged sends. In the
//!   vendor tool these callbacks arrive from the real channel scheduler;
//!   the panel cannot tell the difference.
//!
//! - **`ui_bridge`** – The shared label/field state the panel reports into
//!   and the UI renders from, the snapshot DTO, and the parser for the
//!   interactive console commands that stand in for button clicks.
//!
//! - **`storage`** – TOML configuration persistence (default mode, log
//!   level, host timing).

pub mod host;
pub mod storage;
pub mod ui_bridge;
