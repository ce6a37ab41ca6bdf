//! Event bus for appraise.
//!
//! All user input, timer ticks, and completed network requests are normalised
//! into a single `AppEvent` enum and sent over a tokio unbounded MPSC channel.
//! The main loop receives from this channel and dispatches accordingly.
//!
//! Two independent intervals drive the render and logic cycles (see
//! [`Cadence`]): render at about 30 FPS, tick at 4 Hz for the spinner.

use crossterm::event::{Event, EventStream, KeyEvent, KeyEventKind, MouseEvent};
use futures::{FutureExt, StreamExt};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::interval;

use appraise_core::api::NetResponse;

/// All events the application can receive from any source.
#[derive(Debug)]
pub enum AppEvent {
    /// A key press from the terminal (`KeyEventKind::Press` only).
    Key(KeyEvent),
    /// A mouse event from the terminal (only the wheel is used).
    Mouse(MouseEvent),
    /// Terminal was resized to (columns, rows).
    Resize(u16, u16),
    /// Logic tick (4 Hz / 250 ms).
    Tick,
    /// Render tick: triggers a `terminal.draw()` call (≈30 FPS / 33 ms).
    Render,
    /// A network request finished; routed to the coordinator.
    Net(Box<NetResponse>),
    /// Quit signal.
    Quit,
}

/// Holds the sender and receiver ends of the unified event channel.
///
/// The sender (`tx`) is cloned and distributed to background tasks;
/// the receiver (`rx`) is owned by the main event loop.
pub struct EventHandler {
    pub tx: mpsc::UnboundedSender<AppEvent>,
    pub rx: mpsc::UnboundedReceiver<AppEvent>,
}

impl EventHandler {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { tx, rx }
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Logic and render rates for [`spawn_event_task`].
#[derive(Debug, Clone, Copy)]
pub struct Cadence {
    pub tick: Duration,
    pub render: Duration,
}

impl Default for Cadence {
    fn default() -> Self {
        Self { tick: Duration::from_millis(250), render: Duration::from_millis(33) }
    }
}

/// Maps a terminal event onto the bus. Key releases and repeats map to `None`
/// so each keystroke arrives once.
fn translate(event: Event) -> Option<AppEvent> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => Some(AppEvent::Key(key)),
        Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        Event::Mouse(mouse) => Some(AppEvent::Mouse(mouse)),
        _ => None,
    }
}

/// Spawns the background task that feeds terminal input and timers into `tx`.
///
/// The task ends when the input stream closes or fails; a failure is reported
/// as `AppEvent::Quit`. Send errors are ignored since a dropped receiver means
/// the app is already shutting down.
pub fn spawn_event_task(tx: mpsc::UnboundedSender<AppEvent>, cadence: Cadence) {
    tokio::spawn(async move {
        let mut tick = interval(cadence.tick);
        let mut render = interval(cadence.render);
        let mut reader = EventStream::new();

        loop {
            // fuse() keeps select! from polling a finished stream.
            let input = reader.next().fuse();
            let event = tokio::select! {
                _ = tick.tick() => AppEvent::Tick,
                _ = render.tick() => AppEvent::Render,
                maybe_input = input => match maybe_input {
                    Some(Ok(raw)) => match translate(raw) {
                        Some(event) => event,
                        None => continue,
                    },
                    Some(Err(e)) => {
                        tracing::warn!(error = %e, "terminal input stream failed");
                        let _ = tx.send(AppEvent::Quit);
                        break;
                    }
                    None => break,
                },
            };
            let _ = tx.send(event);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyEventState, KeyModifiers};

    fn key(kind: KeyEventKind) -> Event {
        Event::Key(KeyEvent {
            code: KeyCode::Char('x'),
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        })
    }

    #[test]
    fn only_key_presses_reach_the_bus() {
        assert!(matches!(translate(key(KeyEventKind::Press)), Some(AppEvent::Key(_))));
        assert!(translate(key(KeyEventKind::Release)).is_none());
        assert!(translate(key(KeyEventKind::Repeat)).is_none());
    }

    #[test]
    fn resize_and_focus() {
        assert!(matches!(translate(Event::Resize(80, 24)), Some(AppEvent::Resize(80, 24))));
        assert!(translate(Event::FocusGained).is_none());
    }
}
