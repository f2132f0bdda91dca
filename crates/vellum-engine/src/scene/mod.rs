//! Per-draw inputs taken from the scene graph.
//!
//! The scene graph itself lives outside this crate; these are the narrow
//! read-only views the key builder consumes.

mod inputs;
mod lights;

pub use inputs::{ClippingCounts, DrawObject, FogKind, SceneInputs};
pub use lights::LightCounts;
