//! motionkit events core (engine-agnostic)
//!
//! Hosts drive these types explicitly: `enter()` when the tracked animation
//! state starts, `tick(progress)` every update, `exit()` when it ends. Nothing
//! here reads a clock or hooks an engine lifecycle.

pub mod config;
pub mod error;
pub mod receiver;
pub mod timer;
pub mod trigger;

pub use config::{parse_state_events_json, TriggerConfig};
pub use error::EventError;
pub use receiver::{EventReceiver, StateEvents};
pub use timer::{CooldownTimer, StopwatchTimer, TimerEvent};
pub use trigger::{StateTrigger, TriggerPhase};
