//! SimTX panel application entry point.
//!
//! Wires together the simulated host engine, the transmit panel use case,
//! and the console front end, then runs the Tokio event loop.
//!
//! # Architecture
//!
//! ```text
//! main()
//!  └─ load_config()            -- TOML settings (mode, log level, timing)
//!  └─ PanelState::new()        -- shared label/field state
//!  └─ TxPanel::new()           -- the use case, reporter + ack injected
//!  └─ HostSimulator::start()   -- interval-driven TX events + timer ticks
//!  └─ dispatch loop
//!       ├─ Channel(Tx)         -> fill the transmit buffer
//!       ├─ TimerTick           -> advance the event counter
//!       └─ stdin commands      -> validate / mode switch / ack send
//! ```
//!
//! # Dispatch loop (for beginners)
//!
//! The `tokio::select!` loop is the heart of the binary. It waits on two
//! streams at once – host events from the simulator and parsed commands
//! from stdin – and handles one at a time. Each handler calls the panel
//! synchronously and returns before the next event is taken, so the panel
//! itself never sees concurrency.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::time::Duration;

use tokio::io::AsyncBufReadExt;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use simtx_core::{EventCode, TxPayload, PAYLOAD_LEN};
use simtx_panel::application::panel::{PanelReporter, TxPanel};
use simtx_panel::infrastructure::{
    host::{HostEvent, HostSimulator, HostTiming, LoggingAckTransmitter},
    storage::config::{load_config, PanelConfig},
    ui_bridge::{parse_command, PanelCommand, PanelState},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Configuration must load before logging so the configured level can
    // seed the filter. A broken config file falls back to defaults rather
    // than keeping the panel from starting.
    let config = load_config().unwrap_or_else(|e| {
        eprintln!("config unavailable ({e}); using defaults");
        PanelConfig::default()
    });

    // Initialise structured logging. RUST_LOG wins over the config level.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.panel.log_level)),
        )
        .init();

    info!("SimTX panel starting");

    // ── Panel wiring ──────────────────────────────────────────────────────────
    let state = PanelState::new(config.panel.default_mode);
    let ack = Arc::new(LoggingAckTransmitter);
    let mut panel = TxPanel::new(ack, Arc::clone(&state) as Arc<dyn PanelReporter>);
    panel.set_mode(config.panel.default_mode);

    // First-run validation of whatever the field shows, so the payload
    // matches the screen before the first transmit event fires.
    panel.initialize(&state.input_text());

    // Shutdown flag shared with the host simulator.
    let running = Arc::new(AtomicBool::new(true));

    // ── Ctrl-C handler ────────────────────────────────────────────────────────
    let running_clone = Arc::clone(&running);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("shutdown signal received");
            running_clone.store(false, Ordering::Relaxed);
        }
    });

    // ── Simulated host ────────────────────────────────────────────────────────
    let timing = HostTiming {
        message_period: Duration::from_millis(config.timing.message_period_ms),
        event_tick: Duration::from_millis(config.timing.event_tick_ms),
    };
    let mut host_rx = HostSimulator::new(timing).start(Arc::clone(&running));

    // ── Console commands ──────────────────────────────────────────────────────
    let mut cmd_rx = spawn_command_reader();
    let mut stdin_open = true;

    println!("SimTX panel ready. Commands: set <text> | update | mode text|hex | ack | status | quit");

    // ── Main dispatch loop ────────────────────────────────────────────────────
    let mut tx_buffer = [0u8; PAYLOAD_LEN];

    loop {
        if !running.load(Ordering::Relaxed) {
            break;
        }

        tokio::select! {
            maybe_event = host_rx.recv() => match maybe_event {
                Some(HostEvent::Channel(code)) => {
                    panel.handle_channel_event(code, &mut tx_buffer);
                    if code == EventCode::Tx {
                        debug!(frame = %TxPayload::from_bytes(tx_buffer), "broadcast frame filled");
                    }
                }
                Some(HostEvent::TimerTick) => {
                    panel.on_timer_tick();
                }
                // Simulator stopped; nothing left to drive the panel.
                None => break,
            },

            maybe_cmd = cmd_rx.recv(), if stdin_open => match maybe_cmd {
                Some(cmd) => {
                    if !handle_command(&mut panel, &state, cmd) {
                        running.store(false, Ordering::Relaxed);
                    }
                }
                None => {
                    // stdin closed (piped input exhausted); keep simulating.
                    stdin_open = false;
                }
            },
        }
    }

    info!("SimTX panel stopped");
    Ok(())
}

/// Applies one console command to the panel. Returns `false` on `quit`.
fn handle_command(panel: &mut TxPanel, state: &PanelState, cmd: PanelCommand) -> bool {
    match cmd {
        PanelCommand::SetInput(text) => {
            state.set_input_text(&text);
            debug!(input = %state.input_text(), "input field updated");
        }
        PanelCommand::Update => {
            let input = state.input_text();
            match panel.validate_input(&input) {
                Ok(payload) => info!(payload = %payload, "input validated"),
                Err(e) => warn!(error = %e, "validation failed"),
            }
        }
        PanelCommand::SwitchMode(mode) => {
            let policy = panel.set_mode(mode);
            state.apply_field_policy(policy);
            info!(mode = ?mode, max_len = policy.max_len, "input mode switched");
        }
        PanelCommand::SendAck => {
            let input = state.input_text();
            match panel.send_acknowledged(&input) {
                Ok(()) => info!("acknowledged send requested"),
                Err(e) => warn!(error = %e, "acknowledged send failed"),
            }
        }
        PanelCommand::ShowStatus => {
            let snap = state.snapshot();
            println!("input : {:?} (max {})", snap.input_text, snap.max_input_len);
            println!("echo  : {}", snap.echo_text);
            println!("error : {}", snap.error_text);
            println!("events: {}", snap.event_count_text);
        }
        PanelCommand::Quit => return false,
    }
    true
}

/// Spawns the stdin reader task and returns the parsed-command stream.
///
/// Lines that fail to parse are reported and skipped; the channel closes
/// when stdin does.
fn spawn_command_reader() -> mpsc::Receiver<PanelCommand> {
    let (tx, rx) = mpsc::channel(16);

    tokio::spawn(async move {
        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        let mut lines = stdin.lines();

        while let Ok(Some(line)) = lines.next_line().await {
            if line.trim().is_empty() {
                continue;
            }
            match parse_command(&line) {
                Ok(cmd) => {
                    let quit = cmd == PanelCommand::Quit;
                    if tx.send(cmd).await.is_err() || quit {
                        break;
                    }
                }
                Err(e) => println!("{e}"),
            }
        }
    });

    rx
}
