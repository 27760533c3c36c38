//! One-shot trigger fired when state progress crosses a fraction.

use serde::{Deserialize, Serialize};

use crate::error::EventError;

#[derive(Copy, Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TriggerPhase {
    /// Tracked state is not active.
    #[default]
    Idle,
    /// State entered; waiting for progress to reach the trigger time.
    Armed,
    /// Fired for the current state entry.
    Fired,
}

/// Named one-shot event at a normalized point of a looping state.
///
/// `Idle -> Armed` on [`enter`](Self::enter), `Armed -> Fired` exactly once
/// when wrapped progress reaches `trigger_time`, back to `Idle` on
/// [`exit`](Self::exit). Re-entering re-arms.
#[derive(Clone, Debug, PartialEq)]
pub struct StateTrigger {
    event_name: String,
    trigger_time: f32,
    phase: TriggerPhase,
}

impl StateTrigger {
    /// `trigger_time` is clamped to [0,1]; NaN becomes 0.
    pub fn new(event_name: impl Into<String>, trigger_time: f32) -> Self {
        let trigger_time = if trigger_time.is_nan() {
            0.0
        } else {
            trigger_time.clamp(0.0, 1.0)
        };
        Self {
            event_name: event_name.into(),
            trigger_time,
            phase: TriggerPhase::Idle,
        }
    }

    /// Like [`new`](Self::new) but rejects NaN instead of coercing it.
    pub fn try_new(event_name: impl Into<String>, trigger_time: f32) -> Result<Self, EventError> {
        if trigger_time.is_nan() {
            return Err(EventError::InvalidTriggerTime(trigger_time));
        }
        Ok(Self::new(event_name, trigger_time))
    }

    #[inline]
    pub fn event_name(&self) -> &str {
        &self.event_name
    }

    #[inline]
    pub fn trigger_time(&self) -> f32 {
        self.trigger_time
    }

    #[inline]
    pub fn phase(&self) -> TriggerPhase {
        self.phase
    }

    #[inline]
    pub fn has_fired(&self) -> bool {
        self.phase == TriggerPhase::Fired
    }

    pub fn enter(&mut self) {
        self.phase = TriggerPhase::Armed;
    }

    pub fn exit(&mut self) {
        self.phase = TriggerPhase::Idle;
    }

    /// Feed the state's normalized time. Values past 1.0 wrap, so a looping
    /// state still fires only once per entry. Returns the event name when it fires.
    pub fn tick(&mut self, progress: f32) -> Option<&str> {
        if self.phase != TriggerPhase::Armed {
            return None;
        }
        let wrapped = progress % 1.0;
        if wrapped >= self.trigger_time {
            self.phase = TriggerPhase::Fired;
            log::debug!(
                "trigger '{}' fired at progress {progress} (threshold {})",
                self.event_name,
                self.trigger_time
            );
            Some(&self.event_name)
        } else {
            None
        }
    }
}
