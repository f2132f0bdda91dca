//! Program selection: parameter snapshots, canonical keys, generated GLSL
//! and the reference-counted program cache.

mod cache;
mod family;
mod key;
mod params;
pub mod source;

pub use cache::{CacheStats, CompiledProgram, ProgramCache, ProgramHandle};
pub use family::ShaderFamily;
pub use key::{ProgramKey, PARAMETER_NAMES};
pub use params::{resolve_encoding, ProgramParameters};
pub use source::{build_sources, ProgramSources};
