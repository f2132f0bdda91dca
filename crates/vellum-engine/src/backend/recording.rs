use std::collections::HashSet;

use crate::coords::{ColorRgba, PixelRect};

use super::{
    BackendError, BackendLimits, BlendEquation, BlendFactor, Capability, CompareFunc, Face,
    GraphicsBackend, ProgramId, ShaderStage, StencilOp, TextureId, TextureTarget, Winding,
};

/// One primitive call as issued to a [`RecordingBackend`].
#[derive(Debug, Clone, PartialEq)]
pub enum BackendCall {
    Enable(Capability),
    Disable(Capability),
    UseProgram(Option<ProgramId>),
    BlendEquation(BlendEquation),
    BlendEquationSeparate(BlendEquation, BlendEquation),
    BlendFunc(BlendFactor, BlendFactor),
    BlendFuncSeparate(BlendFactor, BlendFactor, BlendFactor, BlendFactor),
    ColorMask(bool),
    ClearColor(ColorRgba),
    DepthFunc(CompareFunc),
    DepthMask(bool),
    ClearDepth(f64),
    StencilMask(u32),
    StencilFunc(CompareFunc, i32, u32),
    StencilOp(StencilOp, StencilOp, StencilOp),
    ClearStencil(i32),
    CullFace(Face),
    FrontFace(Winding),
    LineWidth(f32),
    PolygonOffset(f32, f32),
    Scissor(PixelRect),
    Viewport(PixelRect),
    ActiveTexture(u32),
    BindTexture(TextureTarget, TextureId),
    CreatePlaceholderTexture(TextureTarget, TextureId),
    EnableVertexAttrib(u32),
    DisableVertexAttrib(u32),
    VertexAttribDivisor(u32, u32),
    CreateProgram(ProgramId),
    DeleteProgram(ProgramId),
}

/// In-memory backend that records every call instead of talking to a GPU.
///
/// Used by tests to count issued calls and by `vellum-studio` for headless
/// frame traces. Program creation can be made to fail for sources containing
/// a marker string.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    limits: BackendLimits,
    calls: Vec<BackendCall>,
    next_id: u32,
    live_programs: HashSet<ProgramId>,
    fail_marker: Option<String>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(limits: BackendLimits) -> Self {
        Self { limits, ..Self::default() }
    }

    /// Makes `create_program` fail at the fragment stage when either source contains `marker`.
    pub fn fail_compiles_containing(&mut self, marker: impl Into<String>) {
        self.fail_marker = Some(marker.into());
    }

    #[inline]
    pub fn calls(&self) -> &[BackendCall] {
        &self.calls
    }

    /// Returns and clears the recorded calls.
    pub fn take_calls(&mut self) -> Vec<BackendCall> {
        std::mem::take(&mut self.calls)
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    /// Counts recorded calls matching `pred`.
    pub fn count(&self, pred: impl Fn(&BackendCall) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }

    /// Programs created and not yet deleted.
    #[inline]
    pub fn live_programs(&self) -> usize {
        self.live_programs.len()
    }

    #[inline]
    pub fn is_live(&self, program: ProgramId) -> bool {
        self.live_programs.contains(&program)
    }

    fn alloc_id(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }
}

impl GraphicsBackend for RecordingBackend {
    fn limits(&self) -> BackendLimits {
        self.limits
    }

    fn enable(&mut self, cap: Capability) {
        self.calls.push(BackendCall::Enable(cap));
    }

    fn disable(&mut self, cap: Capability) {
        self.calls.push(BackendCall::Disable(cap));
    }

    fn use_program(&mut self, program: Option<ProgramId>) {
        self.calls.push(BackendCall::UseProgram(program));
    }

    fn blend_equation(&mut self, equation: BlendEquation) {
        self.calls.push(BackendCall::BlendEquation(equation));
    }

    fn blend_equation_separate(&mut self, color: BlendEquation, alpha: BlendEquation) {
        self.calls.push(BackendCall::BlendEquationSeparate(color, alpha));
    }

    fn blend_func(&mut self, src: BlendFactor, dst: BlendFactor) {
        self.calls.push(BackendCall::BlendFunc(src, dst));
    }

    fn blend_func_separate(
        &mut self,
        src_color: BlendFactor,
        dst_color: BlendFactor,
        src_alpha: BlendFactor,
        dst_alpha: BlendFactor,
    ) {
        self.calls
            .push(BackendCall::BlendFuncSeparate(src_color, dst_color, src_alpha, dst_alpha));
    }

    fn color_mask(&mut self, write: bool) {
        self.calls.push(BackendCall::ColorMask(write));
    }

    fn clear_color(&mut self, color: ColorRgba) {
        self.calls.push(BackendCall::ClearColor(color));
    }

    fn depth_func(&mut self, func: CompareFunc) {
        self.calls.push(BackendCall::DepthFunc(func));
    }

    fn depth_mask(&mut self, write: bool) {
        self.calls.push(BackendCall::DepthMask(write));
    }

    fn clear_depth(&mut self, depth: f64) {
        self.calls.push(BackendCall::ClearDepth(depth));
    }

    fn stencil_mask(&mut self, mask: u32) {
        self.calls.push(BackendCall::StencilMask(mask));
    }

    fn stencil_func(&mut self, func: CompareFunc, reference: i32, mask: u32) {
        self.calls.push(BackendCall::StencilFunc(func, reference, mask));
    }

    fn stencil_op(&mut self, fail: StencilOp, depth_fail: StencilOp, pass: StencilOp) {
        self.calls.push(BackendCall::StencilOp(fail, depth_fail, pass));
    }

    fn clear_stencil(&mut self, value: i32) {
        self.calls.push(BackendCall::ClearStencil(value));
    }

    fn cull_face(&mut self, face: Face) {
        self.calls.push(BackendCall::CullFace(face));
    }

    fn front_face(&mut self, winding: Winding) {
        self.calls.push(BackendCall::FrontFace(winding));
    }

    fn line_width(&mut self, width: f32) {
        self.calls.push(BackendCall::LineWidth(width));
    }

    fn polygon_offset(&mut self, factor: f32, units: f32) {
        self.calls.push(BackendCall::PolygonOffset(factor, units));
    }

    fn scissor(&mut self, rect: PixelRect) {
        self.calls.push(BackendCall::Scissor(rect));
    }

    fn viewport(&mut self, rect: PixelRect) {
        self.calls.push(BackendCall::Viewport(rect));
    }

    fn active_texture(&mut self, unit: u32) {
        self.calls.push(BackendCall::ActiveTexture(unit));
    }

    fn bind_texture(&mut self, target: TextureTarget, texture: TextureId) {
        self.calls.push(BackendCall::BindTexture(target, texture));
    }

    fn create_placeholder_texture(&mut self, target: TextureTarget) -> Result<TextureId, BackendError> {
        let id = TextureId(self.alloc_id());
        self.calls.push(BackendCall::CreatePlaceholderTexture(target, id));
        Ok(id)
    }

    fn enable_vertex_attrib(&mut self, index: u32) {
        self.calls.push(BackendCall::EnableVertexAttrib(index));
    }

    fn disable_vertex_attrib(&mut self, index: u32) {
        self.calls.push(BackendCall::DisableVertexAttrib(index));
    }

    fn vertex_attrib_divisor(&mut self, index: u32, divisor: u32) {
        self.calls.push(BackendCall::VertexAttribDivisor(index, divisor));
    }

    fn create_program(&mut self, vertex: &str, fragment: &str) -> Result<ProgramId, BackendError> {
        if let Some(marker) = self.fail_marker.as_deref() {
            if vertex.contains(marker) || fragment.contains(marker) {
                return Err(BackendError::Compile {
                    stage: ShaderStage::Fragment,
                    log: format!("0:1: error: rejected source containing '{marker}'"),
                });
            }
        }
        let id = ProgramId(self.alloc_id());
        self.live_programs.insert(id);
        self.calls.push(BackendCall::CreateProgram(id));
        Ok(id)
    }

    fn delete_program(&mut self, program: ProgramId) {
        self.live_programs.remove(&program);
        self.calls.push(BackendCall::DeleteProgram(program));
    }
}
