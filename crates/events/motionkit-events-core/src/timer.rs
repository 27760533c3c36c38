//! Countdown and stopwatch timers advanced by explicit `tick(dt)` calls.
//!
//! Start/stop transitions are reported as return values so the caller decides
//! what to notify.

use serde::{Deserialize, Serialize};

use crate::error::EventError;

#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum TimerEvent {
    Started,
    Stopped,
}

fn check_duration(seconds: f32) -> Result<f32, EventError> {
    if !seconds.is_finite() || seconds < 0.0 {
        return Err(EventError::InvalidDuration(seconds));
    }
    Ok(seconds)
}

/// Counts down from an initial duration and stops itself at zero.
#[derive(Clone, Debug, PartialEq)]
pub struct CooldownTimer {
    initial: f32,
    time: f32,
    running: bool,
}

impl CooldownTimer {
    pub fn new(seconds: f32) -> Result<Self, EventError> {
        Ok(Self {
            initial: check_duration(seconds)?,
            time: 0.0,
            running: false,
        })
    }

    /// Reload the full duration. Reports `Started` only when not already running.
    pub fn start(&mut self) -> Option<TimerEvent> {
        self.time = self.initial;
        if self.running {
            return None;
        }
        self.running = true;
        Some(TimerEvent::Started)
    }

    pub fn stop(&mut self) -> Option<TimerEvent> {
        if !self.running {
            return None;
        }
        self.running = false;
        Some(TimerEvent::Stopped)
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    pub fn resume(&mut self) {
        self.running = true;
    }

    /// Advance by `dt` seconds. Returns `Stopped` on the tick that reaches zero.
    pub fn tick(&mut self, dt: f32) -> Option<TimerEvent> {
        if self.running && self.time > 0.0 {
            self.time -= dt;
        }
        if self.running && self.time <= 0.0 {
            return self.stop();
        }
        None
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.time <= 0.0
    }

    /// Remaining time.
    #[inline]
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Remaining fraction of the initial duration; 0 for a zero-length timer.
    pub fn progress(&self) -> f32 {
        if self.initial == 0.0 {
            0.0
        } else {
            self.time / self.initial
        }
    }

    pub fn reset(&mut self) {
        self.time = self.initial;
    }

    /// Replace the duration and reload it.
    pub fn reset_to(&mut self, seconds: f32) -> Result<(), EventError> {
        self.initial = check_duration(seconds)?;
        self.reset();
        Ok(())
    }
}

/// Accumulates elapsed time while running.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StopwatchTimer {
    time: f32,
    running: bool,
}

impl StopwatchTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restart from zero. Reports `Started` only when not already running.
    pub fn start(&mut self) -> Option<TimerEvent> {
        self.time = 0.0;
        if self.running {
            return None;
        }
        self.running = true;
        Some(TimerEvent::Started)
    }

    pub fn stop(&mut self) -> Option<TimerEvent> {
        if !self.running {
            return None;
        }
        self.running = false;
        Some(TimerEvent::Stopped)
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    pub fn resume(&mut self) {
        self.running = true;
    }

    pub fn tick(&mut self, dt: f32) {
        if self.running {
            self.time += dt;
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    #[inline]
    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn reset(&mut self) {
        self.time = 0.0;
    }
}
