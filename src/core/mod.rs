//! Host-independent runtime: frame scheduling and click listeners.

pub mod frame_loop;
pub mod listeners;

pub use frame_loop::{FrameLoop, FrameScheduler, HostEvent, ScriptedScheduler, StopToken};
pub use listeners::{ClickBus, ClickListener, ListenerId, Subscription};
