//! appraise: terminal client for searching apps and reviewing them.
//!
//! Entry point for the `appraise` binary. Wires together configuration
//! (`config`), logging (`telemetry`), the terminal lifecycle (`tui`), the
//! unified event bus (`event`), the network worker (`net`), and the domain
//! coordinator from `appraise-core`.
//!
//! # Startup sequence
//!
//! 1. Load config. Read-only, so safe before terminal init.
//! 2. Create the data dir and install the file logger.
//! 3. Open the session database and read the persisted token. Failures here
//!    abort before the terminal is touched, so the error stays readable.
//! 4. Build the HTTP backend.
//! 5. `install_panic_hook()` then `register_sigterm()`.
//! 6. `init_tui()`, spawn the event task and the network worker.
//!
//! `restore_tui()` runs after the event loop exits. Inside the loop `?` is only
//! used in the Render arm, and that error is carried out via `break`.

mod app;
mod config;
mod event;
mod net;
mod telemetry;
mod theme;
mod tui;
mod ui;

use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;

use appraise_core::api::{Backend, HttpBackend};
use appraise_core::coordinator::Coordinator;
use appraise_core::session::SessionStore;

use crate::ui::keybindings::{handle_key, handle_mouse, KeyAction};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let config = config::load();

    std::fs::create_dir_all(&config.data_dir)?;
    telemetry::init(&config.log_path(), &config.log_filter)?;
    tracing::info!(api = %config.api_base_url, data_dir = ?config.data_dir, "starting");

    let theme = theme::Theme::from_name(&config.theme);

    let conn = appraise_core::db::open_db(&config.db_path().to_string_lossy())
        .await
        .map_err(std::io::Error::other)?;
    let session = SessionStore::open(conn).await.map_err(std::io::Error::other)?;

    let backend: Arc<dyn Backend> = Arc::new(
        HttpBackend::new(&config.api_base_url, Duration::from_secs(config.request_timeout_secs))
            .map_err(std::io::Error::other)?,
    );

    tui::install_panic_hook();
    let term_flag = tui::register_sigterm()?;

    let mut terminal = tui::init_tui()?;

    let handler = event::EventHandler::new();
    event::spawn_event_task(handler.tx.clone(), event::Cadence::default());
    let (net_tx, net_rx) = mpsc::unbounded_channel();
    tokio::spawn(net::net_worker_loop(backend, net_rx, handler.tx.clone()));
    let mut rx = handler.rx;

    let mut state = app::AppState::new(Coordinator::new(session), net_tx);
    let mut outcome = Ok(());

    'event_loop: loop {
        tokio::select! {
            // Heartbeat so SIGTERM is noticed even when no events arrive.
            _ = tokio::time::sleep(Duration::from_millis(50)) => {
                if term_flag.load(Ordering::Relaxed) {
                    break 'event_loop;
                }
            }
            maybe_event = rx.recv() => {
                match maybe_event {
                    Some(event::AppEvent::Render) => {
                        if let Err(e) = terminal.draw(|frame| ui::render(frame, &mut state, &theme)) {
                            outcome = Err(e);
                            break 'event_loop;
                        }
                    }
                    Some(event::AppEvent::Key(key)) => match handle_key(key, &mut state) {
                        KeyAction::Quit => break 'event_loop,
                        KeyAction::Logout => state.logout().await,
                        KeyAction::Continue => {}
                    },
                    Some(event::AppEvent::Mouse(mouse)) => {
                        handle_mouse(mouse, &mut state);
                    }
                    Some(event::AppEvent::Net(response)) => state.apply_net(*response).await,
                    Some(event::AppEvent::Tick) => state.on_tick(),
                    // ratatui picks up the new size from frame.area() on the next Render.
                    Some(event::AppEvent::Resize(_, _)) => {}
                    Some(event::AppEvent::Quit) | None => break 'event_loop,
                }
                if term_flag.load(Ordering::Relaxed) {
                    break 'event_loop;
                }
            }
        }
    }

    tui::restore_tui()?;
    tracing::info!("exiting");
    outcome
}
