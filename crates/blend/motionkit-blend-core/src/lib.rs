//! motionkit blend core (engine-agnostic)
//!
//! Resolves normalized per-child weights for 1-D and 2-D blend trees from an
//! explicit query point. Mixing the weighted samples is left to the host.

pub mod config;
pub mod data;
pub mod error;
pub mod math;
pub mod query;
pub mod resolver;
pub mod stored_tree;

// Re-exports for consumers (adapters)
pub use config::ResolverConfig;
pub use data::{BlendMode, BlendTree, ChildMotion, Motion, Vec2};
pub use error::BlendError;
pub use query::Query;
pub use resolver::{resolve, resolve_with, WeightResult};
pub use stored_tree::parse_blend_tree_json;
