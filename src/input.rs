//! Terminal input.
//!
//! A dedicated thread blocks on `crossterm::event::read` and forwards
//! everything through a channel, so the game loop never blocks on I/O.
//!
//! Held keys: we keep a `key_frame` map recording the poll number at which
//! each key was last pressed or repeated. A key counts as held while that
//! record is at most `hold_frames` polls old. Terminals with keyboard
//! enhancement also send `Release`, which drops the key immediately;
//! classic terminals only send repeated `Press` events and the key expires
//! on its own once the repeats stop.

use std::collections::HashMap;
use std::sync::mpsc;
use std::thread;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEventKind,
};
use tracing::debug;

use crate::boundary::{HeldKeys, InputEvent, InputSource, Key};

/// How long a key stays held after its last press/repeat event.
pub const HOLD_WINDOW_MS: u32 = 150;

/// Hold window in polls for a loop running at `tick_rate`.
pub fn hold_frames_for(tick_rate: u32) -> u64 {
    (tick_rate as u64 * HOLD_WINDOW_MS as u64 / 1000).max(1)
}

/// Spawn the blocking reader thread. It exits on the first read error or
/// once the receiver is dropped.
pub fn spawn_event_reader() -> mpsc::Receiver<Event> {
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break;
                }
            }
            Err(err) => {
                debug!(%err, "event reader stopped");
                break;
            }
        }
    });
    rx
}

fn key_for(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Key::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Key::Right),
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(Key::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(Key::Down),
        KeyCode::Char(' ') => Some(Key::Fire),
        _ => None,
    }
}

fn is_quit(code: KeyCode, modifiers: KeyModifiers) -> bool {
    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        KeyCode::Char('c') => modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

pub struct TerminalInput {
    rx: mpsc::Receiver<Event>,
    key_frame: HashMap<Key, u64>,
    hold_frames: u64,
    frame: u64,
}

impl TerminalInput {
    pub fn new(rx: mpsc::Receiver<Event>, hold_frames: u64) -> Self {
        TerminalInput {
            rx,
            key_frame: HashMap::new(),
            hold_frames,
            frame: 0,
        }
    }

    fn translate(&mut self, ev: Event) -> InputEvent {
        match ev {
            Event::Key(KeyEvent {
                code,
                kind,
                modifiers,
                ..
            }) => match kind {
                KeyEventKind::Press | KeyEventKind::Repeat => {
                    if kind == KeyEventKind::Press && is_quit(code, modifiers) {
                        return InputEvent::Quit;
                    }
                    if let Some(key) = key_for(code) {
                        self.key_frame.insert(key, self.frame);
                    }
                    if kind == KeyEventKind::Press && code == KeyCode::Enter {
                        InputEvent::Confirm
                    } else {
                        InputEvent::Other
                    }
                }
                KeyEventKind::Release => {
                    if let Some(key) = key_for(code) {
                        self.key_frame.remove(&key);
                    }
                    InputEvent::Other
                }
            },
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::Down(_) => InputEvent::MouseDown,
                _ => InputEvent::Other,
            },
            _ => InputEvent::Other,
        }
    }

    fn is_held(&self, key: Key) -> bool {
        self.key_frame
            .get(&key)
            .map(|&last| self.frame.saturating_sub(last) <= self.hold_frames)
            .unwrap_or(false)
    }
}

impl InputSource for TerminalInput {
    fn poll_events(&mut self) -> Vec<InputEvent> {
        self.frame += 1;
        let mut events = Vec::new();
        while let Ok(ev) = self.rx.try_recv() {
            events.push(self.translate(ev));
        }
        events
    }

    fn key_state(&self) -> HeldKeys {
        Key::ALL.into_iter().filter(|&key| self.is_held(key)).collect()
    }
}
