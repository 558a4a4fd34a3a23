//! Frame loop driven by a host-provided "next frame" primitive.
//!
//! The host blocks until the next display refresh and reports the input that
//! arrived in between. The loop runs one frame callback per refresh, never
//! overlapping, until its `StopToken` is triggered or the host reports `Quit`.

use std::cell::Cell;
use std::collections::VecDeque;
use std::io;
use std::rc::Rc;

/// Input delivered by the host between two frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    /// Pointer click or an equivalent key.
    Click,
    /// The host is closing.
    Quit,
}

/// Host primitive that paces the loop.
pub trait FrameScheduler {
    /// Wait for the next display refresh, appending input that arrived
    /// meanwhile to `events`.
    fn next_frame(&mut self, events: &mut Vec<HostEvent>) -> io::Result<()>;
}

/// Cancels a running loop. Clones share the same flag.
#[derive(Debug, Clone, Default)]
pub struct StopToken {
    stopped: Rc<Cell<bool>>,
}

impl StopToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.stopped.set(true);
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.get()
    }
}

/// Runs frame callbacks until stopped.
#[derive(Debug, Default)]
pub struct FrameLoop {
    stop: StopToken,
    frames: u64,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop_token(&self) -> StopToken {
        self.stop.clone()
    }

    /// Frames run so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Drive `on_frame` once per refresh. Returns the number of frames run by
    /// this call. Errors from the host or the callback end the loop.
    pub fn run<S, F>(&mut self, scheduler: &mut S, mut on_frame: F) -> io::Result<u64>
    where
        S: FrameScheduler + ?Sized,
        F: FnMut(&[HostEvent]) -> io::Result<()>,
    {
        let start = self.frames;
        let mut events = Vec::new();

        while !self.stop.is_stopped() {
            events.clear();
            scheduler.next_frame(&mut events)?;

            if events.contains(&HostEvent::Quit) {
                tracing::info!(frames = self.frames, "host closed, stopping frame loop");
                self.stop.stop();
                break;
            }
            if self.stop.is_stopped() {
                break;
            }

            on_frame(&events)?;
            self.frames += 1;
        }

        Ok(self.frames - start)
    }
}

/// Scheduler replaying a fixed script of per-frame input, then reporting
/// `Quit`. Drives the loop headlessly.
#[derive(Debug, Clone, Default)]
pub struct ScriptedScheduler {
    script: VecDeque<Vec<HostEvent>>,
}

impl ScriptedScheduler {
    pub fn new(script: impl IntoIterator<Item = Vec<HostEvent>>) -> Self {
        Self {
            script: script.into_iter().collect(),
        }
    }

    /// `frames` refreshes without input.
    pub fn idle(frames: usize) -> Self {
        Self::new(std::iter::repeat_with(Vec::new).take(frames))
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl FrameScheduler for ScriptedScheduler {
    fn next_frame(&mut self, events: &mut Vec<HostEvent>) -> io::Result<()> {
        match self.script.pop_front() {
            Some(frame_events) => events.extend(frame_events),
            None => events.push(HostEvent::Quit),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runs_until_script_ends() {
        let mut frame_loop = FrameLoop::new();
        let mut scheduler = ScriptedScheduler::idle(5);
        let mut seen = 0;

        let ran = frame_loop
            .run(&mut scheduler, |_| {
                seen += 1;
                Ok(())
            })
            .unwrap();

        assert_eq!(ran, 5);
        assert_eq!(seen, 5);
        assert_eq!(frame_loop.frames(), 5);
        assert!(frame_loop.stop_token().is_stopped());
    }

    #[test]
    fn test_stop_token_cancels_from_callback() {
        let mut frame_loop = FrameLoop::new();
        let stop = frame_loop.stop_token();
        let mut scheduler = ScriptedScheduler::idle(100);

        let ran = frame_loop
            .run(&mut scheduler, |_| {
                stop.stop();
                Ok(())
            })
            .unwrap();

        assert_eq!(ran, 1);
        assert_eq!(scheduler.remaining(), 99);
    }

    #[test]
    fn test_stopped_before_start_runs_nothing() {
        let mut frame_loop = FrameLoop::new();
        frame_loop.stop_token().stop();
        let mut scheduler = ScriptedScheduler::idle(3);

        let ran = frame_loop.run(&mut scheduler, |_| Ok(())).unwrap();

        assert_eq!(ran, 0);
        assert_eq!(scheduler.remaining(), 3);
    }

    #[test]
    fn test_events_reach_their_frame() {
        let mut frame_loop = FrameLoop::new();
        let mut scheduler = ScriptedScheduler::new(vec![
            vec![],
            vec![HostEvent::Click, HostEvent::Click],
            vec![HostEvent::Click],
        ]);
        let mut clicks_per_frame = Vec::new();

        frame_loop
            .run(&mut scheduler, |events| {
                clicks_per_frame.push(events.len());
                Ok(())
            })
            .unwrap();

        assert_eq!(clicks_per_frame, vec![0, 2, 1]);
    }

    #[test]
    fn test_callback_error_ends_loop() {
        let mut frame_loop = FrameLoop::new();
        let mut scheduler = ScriptedScheduler::idle(10);
        let mut calls = 0;

        let result = frame_loop.run(&mut scheduler, |_| {
            calls += 1;
            if calls == 3 {
                return Err(io::Error::new(io::ErrorKind::Other, "draw failed"));
            }
            Ok(())
        });

        assert!(result.is_err());
        assert_eq!(frame_loop.frames(), 2);
    }
}
