//! Terminal input: crossterm events to host events, and frame pacing.

use crate::core::{FrameScheduler, HostEvent};
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind,
};
use std::io;
use std::time::{Duration, Instant};

/// Map a crossterm event. Keys count on press only; releases and repeats
/// (reported by some terminals) are ignored.
pub fn map_event(event: &Event) -> Option<HostEvent> {
    match event {
        Event::Key(key) => map_key(key),
        Event::Mouse(mouse) => match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => Some(HostEvent::Click),
            _ => None,
        },
        _ => None,
    }
}

fn map_key(key: &KeyEvent) -> Option<HostEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(HostEvent::Quit)
        }
        KeyCode::Char(' ') | KeyCode::Enter | KeyCode::Up => Some(HostEvent::Click),
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => Some(HostEvent::Quit),
        _ => None,
    }
}

/// Paces frames at a fixed rate, collecting terminal input while it waits.
pub struct TerminalScheduler {
    interval: Duration,
    deadline: Instant,
}

impl TerminalScheduler {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            deadline: Instant::now(),
        }
    }
}

/// Collect mapped events until `deadline`. Once it has passed, everything
/// already queued is still drained without blocking.
fn collect_events<P, R>(
    deadline: Instant,
    mut poll: P,
    mut read: R,
    events: &mut Vec<HostEvent>,
) -> io::Result<()>
where
    P: FnMut(Duration) -> io::Result<bool>,
    R: FnMut() -> io::Result<Event>,
{
    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if !poll(remaining)? {
            return Ok(());
        }
        if let Some(mapped) = map_event(&read()?) {
            events.push(mapped);
        }
    }
}

impl FrameScheduler for TerminalScheduler {
    fn next_frame(&mut self, events: &mut Vec<HostEvent>) -> io::Result<()> {
        collect_events(self.deadline, event::poll, event::read, events)?;

        // Fell behind (slow draw, suspended terminal): restart the cadence
        // instead of running a burst of catch-up frames.
        let now = Instant::now();
        self.deadline += self.interval;
        if self.deadline < now {
            self.deadline = now + self.interval;
        }
        Ok(())
    }
}
