//! The narrow seam between the core and the native graphics API.
//!
//! Every method maps to one primitive call. Implementations must not cache or
//! elide anything: redundancy elimination is the job of [`crate::state::StateMirror`].

mod gl;
mod recording;
mod types;

pub use gl::GlowBackend;
pub use recording::{BackendCall, RecordingBackend};
pub use types::{
    BackendError, BackendLimits, BlendEquation, BlendFactor, Capability, CompareFunc, Face,
    ProgramId, ShaderStage, StencilOp, TextureId, TextureTarget, Winding,
};

use crate::coords::{ColorRgba, PixelRect};

/// Primitive graphics-API calls consumed by the state mirror and the program cache.
///
/// All calls are synchronous and execute on the thread owning the context.
pub trait GraphicsBackend {
    fn limits(&self) -> BackendLimits;

    fn enable(&mut self, cap: Capability);
    fn disable(&mut self, cap: Capability);

    fn use_program(&mut self, program: Option<ProgramId>);

    fn blend_equation(&mut self, equation: BlendEquation);
    fn blend_equation_separate(&mut self, color: BlendEquation, alpha: BlendEquation);
    fn blend_func(&mut self, src: BlendFactor, dst: BlendFactor);
    fn blend_func_separate(
        &mut self,
        src_color: BlendFactor,
        dst_color: BlendFactor,
        src_alpha: BlendFactor,
        dst_alpha: BlendFactor,
    );

    fn color_mask(&mut self, write: bool);
    fn clear_color(&mut self, color: ColorRgba);

    fn depth_func(&mut self, func: CompareFunc);
    fn depth_mask(&mut self, write: bool);
    fn clear_depth(&mut self, depth: f64);

    fn stencil_mask(&mut self, mask: u32);
    fn stencil_func(&mut self, func: CompareFunc, reference: i32, mask: u32);
    fn stencil_op(&mut self, fail: StencilOp, depth_fail: StencilOp, pass: StencilOp);
    fn clear_stencil(&mut self, value: i32);

    fn cull_face(&mut self, face: Face);
    fn front_face(&mut self, winding: Winding);
    fn line_width(&mut self, width: f32);
    fn polygon_offset(&mut self, factor: f32, units: f32);

    fn scissor(&mut self, rect: PixelRect);
    fn viewport(&mut self, rect: PixelRect);

    fn active_texture(&mut self, unit: u32);
    fn bind_texture(&mut self, target: TextureTarget, texture: TextureId);

    /// Creates a 1x1 (per face) texture used when a sampler has nothing bound.
    fn create_placeholder_texture(&mut self, target: TextureTarget) -> Result<TextureId, BackendError>;

    fn enable_vertex_attrib(&mut self, index: u32);
    fn disable_vertex_attrib(&mut self, index: u32);
    fn vertex_attrib_divisor(&mut self, index: u32, divisor: u32);

    /// Compiles both stages and links them.
    fn create_program(&mut self, vertex: &str, fragment: &str) -> Result<ProgramId, BackendError>;
    fn delete_program(&mut self, program: ProgramId);
}
