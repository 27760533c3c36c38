use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EventError {
    #[error("trigger time must be a number, got {0}")]
    InvalidTriggerTime(f32),
    #[error("timer duration must be finite and non-negative, got {0}")]
    InvalidDuration(f32),
    #[error("trigger config json: {0}")]
    Parse(String),
}
