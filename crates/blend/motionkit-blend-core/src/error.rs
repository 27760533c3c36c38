use thiserror::Error;

use crate::data::BlendMode;

/// Failures surfaced by the resolver and the stored-tree loader.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BlendError {
    /// The tree has no children; the caller must fix its configuration.
    #[error("blend tree has no children")]
    EmptyTree,
    /// Every raw weight came out as zero, so there is nothing to normalize against.
    #[error("degenerate blend: raw weight total {total} cannot be normalized")]
    DegenerateBlend { total: f32 },
    #[error("{query} query cannot drive a {mode:?} blend tree")]
    ModeMismatch {
        mode: BlendMode,
        query: &'static str,
    },
    #[error("blend tree json: {0}")]
    Parse(String),
}
