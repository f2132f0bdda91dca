//! Per-draw orchestration on top of the state mirror and the program cache.

mod material_state;
pub mod pipeline_state;
mod renderer;

pub use material_state::apply_material_state;
pub use pipeline_state::PipelineState;
pub use renderer::RenderCore;
