//! Serializable trigger configuration, as authored per animation state.

use serde::{Deserialize, Serialize};

use crate::error::EventError;
use crate::receiver::StateEvents;
use crate::trigger::StateTrigger;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TriggerConfig {
    pub event_name: String,
    /// Normalized [0,1] point in the state at which the event fires.
    #[serde(default)]
    pub trigger_time: f32,
}

impl TriggerConfig {
    pub fn build(&self) -> Result<StateTrigger, EventError> {
        StateTrigger::try_new(self.event_name.clone(), self.trigger_time)
    }
}

/// Parse a JSON array of [`TriggerConfig`] into the triggers for one state.
pub fn parse_state_events_json(s: &str) -> Result<StateEvents, EventError> {
    let configs: Vec<TriggerConfig> =
        serde_json::from_str(s).map_err(|e| EventError::Parse(e.to_string()))?;
    let triggers = configs
        .iter()
        .map(TriggerConfig::build)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(StateEvents::new(triggers))
}
