use crate::backend::{
    BackendError, Capability, CompareFunc, Face, GraphicsBackend, ProgramId, StencilOp,
    TextureId, TextureTarget, Winding,
};
use crate::config::Capabilities;
use crate::coords::{ColorRgba, PixelRect};

use super::attributes::VertexAttributes;
use super::blend::{BlendParams, BlendTracker, Blending};
use super::buffers::{ColorBuffer, DepthBuffer, StencilBuffer};
use super::capabilities::CapabilitySet;
use super::textures::{BoundTexture, TextureUnits};

/// Requested face culling.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum CullFace {
    None,
    Back,
    Front,
    FrontAndBack,
}

impl CullFace {
    #[inline]
    pub const fn face(self) -> Option<Face> {
        match self {
            CullFace::None => None,
            CullFace::Back => Some(Face::Back),
            CullFace::Front => Some(Face::Front),
            CullFace::FrontAndBack => Some(Face::FrontAndBack),
        }
    }
}

/// Believed current state of the graphics context.
///
/// Owns the backend so that its setters are the only path that mutates the
/// mirrored state. Anything that touches the context through
/// [`StateMirror::backend_mut`] (or out of band) must be followed by
/// [`StateMirror::reset`] if it changed mirrored state.
///
/// Affine to the thread owning the context.
pub struct StateMirror<B: GraphicsBackend> {
    gl: B,
    capabilities: Capabilities,

    caps: CapabilitySet,
    program: Option<ProgramId>,
    blend: BlendTracker,

    color: ColorBuffer,
    depth: DepthBuffer,
    stencil: StencilBuffer,

    flip_sided: Option<bool>,
    cull_face: Option<Face>,
    line_width: Option<f32>,
    polygon_offset: Option<(f32, f32)>,

    scissor: Option<PixelRect>,
    viewport: Option<PixelRect>,

    textures: TextureUnits,
    attributes: VertexAttributes,

    warned_line_width: bool,
}

impl<B: GraphicsBackend> StateMirror<B> {
    /// Queries limits, creates the placeholder textures and applies the
    /// initial state: clears (0,0,0,1)/1.0/0, depth test on with LessEqual,
    /// culling on, blending off.
    pub fn new(mut gl: B) -> Result<Self, BackendError> {
        let capabilities = Capabilities::from_limits(&gl.limits());
        let placeholder_2d = gl.create_placeholder_texture(TextureTarget::Texture2D)?;
        let placeholder_cube = gl.create_placeholder_texture(TextureTarget::CubeMap)?;

        let mut state = Self {
            gl,
            capabilities,
            caps: CapabilitySet::default(),
            program: None,
            blend: BlendTracker::default(),
            color: ColorBuffer::default(),
            depth: DepthBuffer::default(),
            stencil: StencilBuffer::default(),
            flip_sided: None,
            cull_face: None,
            line_width: None,
            polygon_offset: None,
            scissor: None,
            viewport: None,
            textures: TextureUnits::new(capabilities.max_texture_units, placeholder_2d, placeholder_cube),
            attributes: VertexAttributes::new(capabilities.max_vertex_attributes),
            warned_line_width: false,
        };

        state.set_clear_color(ColorRgba::BLACK, false);
        state.set_clear_depth(1.0);
        state.set_clear_stencil(0);

        state.enable(Capability::DepthTest);
        state.set_depth_func(CompareFunc::LessEqual);
        state.enable(Capability::CullFace);
        state.set_blending(&BlendParams::NONE);

        Ok(state)
    }

    #[inline]
    pub fn backend(&self) -> &B {
        &self.gl
    }

    /// Direct backend access. See the type docs for the desync hazard.
    #[inline]
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.gl
    }

    pub fn into_backend(self) -> B {
        self.gl
    }

    #[inline]
    pub fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    // ── capabilities ──────────────────────────────────────────────────────

    pub fn enable(&mut self, cap: Capability) {
        self.caps.enable(&mut self.gl, cap);
    }

    pub fn disable(&mut self, cap: Capability) {
        self.caps.disable(&mut self.gl, cap);
    }

    /// Mirrored flag, `None` while unknown.
    #[inline]
    pub fn is_enabled(&self, cap: Capability) -> Option<bool> {
        self.caps.get(cap)
    }

    pub fn set_scissor_test(&mut self, enabled: bool) {
        self.caps.set(&mut self.gl, Capability::ScissorTest, enabled);
    }

    // ── program ───────────────────────────────────────────────────────────

    /// Binds `program`. Returns `true` if a call was issued.
    pub fn use_program(&mut self, program: ProgramId) -> bool {
        if self.program != Some(program) {
            self.gl.use_program(Some(program));
            self.program = Some(program);
            return true;
        }
        false
    }

    #[inline]
    pub fn current_program(&self) -> Option<ProgramId> {
        self.program
    }

    /// Marks the current program unknown if it is `program` (e.g. after deletion).
    pub fn forget_program(&mut self, program: ProgramId) {
        if self.program == Some(program) {
            self.program = None;
        }
    }

    // ── blending ──────────────────────────────────────────────────────────

    pub fn set_blending(&mut self, params: &BlendParams) {
        self.blend.apply(&mut self.gl, &mut self.caps, params);
    }

    /// Last non-`None` mode applied, `None` while unknown.
    #[inline]
    pub fn blending(&self) -> Option<Blending> {
        self.blend.mode()
    }

    // ── buffers ───────────────────────────────────────────────────────────

    pub fn set_color_mask(&mut self, write: bool) {
        self.color.set_mask(&mut self.gl, write);
    }

    pub fn set_clear_color(&mut self, color: ColorRgba, premultiplied_alpha: bool) {
        debug_assert!(color.is_finite(), "non-finite clear color {color:?}");
        self.color.set_clear(&mut self.gl, color, premultiplied_alpha);
    }

    pub fn lock_color_mask(&mut self, locked: bool) {
        self.color.locked = locked;
    }

    pub fn set_depth_test(&mut self, enabled: bool) {
        self.depth.set_test(&mut self.gl, &mut self.caps, enabled);
    }

    pub fn set_depth_mask(&mut self, write: bool) {
        self.depth.set_mask(&mut self.gl, write);
    }

    pub fn set_depth_func(&mut self, func: CompareFunc) {
        self.depth.set_func(&mut self.gl, func);
    }

    pub fn set_clear_depth(&mut self, depth: f64) {
        self.depth.set_clear(&mut self.gl, depth);
    }

    pub fn lock_depth_mask(&mut self, locked: bool) {
        self.depth.locked = locked;
    }

    pub fn set_stencil_test(&mut self, enabled: bool) {
        self.stencil.set_test(&mut self.gl, &mut self.caps, enabled);
    }

    pub fn set_stencil_mask(&mut self, mask: u32) {
        self.stencil.set_mask(&mut self.gl, mask);
    }

    pub fn set_stencil_func(&mut self, func: CompareFunc, reference: i32, mask: u32) {
        self.stencil.set_func(&mut self.gl, func, reference, mask);
    }

    pub fn set_stencil_op(&mut self, fail: StencilOp, depth_fail: StencilOp, pass: StencilOp) {
        self.stencil.set_op(&mut self.gl, fail, depth_fail, pass);
    }

    pub fn set_clear_stencil(&mut self, value: i32) {
        self.stencil.set_clear(&mut self.gl, value);
    }

    pub fn lock_stencil_mask(&mut self, locked: bool) {
        self.stencil.locked = locked;
    }

    // ── rasterizer ────────────────────────────────────────────────────────

    /// Inverts the front-face winding (CW instead of CCW) when `flip_sided`.
    pub fn set_flip_sided(&mut self, flip_sided: bool) {
        if self.flip_sided != Some(flip_sided) {
            self.gl.front_face(if flip_sided { Winding::Cw } else { Winding::Ccw });
            self.flip_sided = Some(flip_sided);
        }
    }

    pub fn set_cull_face(&mut self, mode: CullFace) {
        match mode.face() {
            Some(face) => {
                self.caps.enable(&mut self.gl, Capability::CullFace);
                if self.cull_face != Some(face) {
                    self.gl.cull_face(face);
                    self.cull_face = Some(face);
                }
            }
            // The GL face survives a disable.
            None => self.caps.disable(&mut self.gl, Capability::CullFace),
        }
    }

    /// Records the width; the call is only issued when wide lines are supported.
    pub fn set_line_width(&mut self, width: f32) {
        assert!(width.is_finite() && width > 0.0, "invalid line width {width}");
        if self.line_width != Some(width) {
            if self.capabilities.line_width_available {
                self.gl.line_width(width);
            } else if !self.warned_line_width {
                log::debug!("StateMirror: line width unsupported by context; ignoring");
                self.warned_line_width = true;
            }
            self.line_width = Some(width);
        }
    }

    pub fn set_polygon_offset(&mut self, enabled: bool, factor: f32, units: f32) {
        if !enabled {
            self.caps.disable(&mut self.gl, Capability::PolygonOffsetFill);
            return;
        }

        assert!(
            !factor.is_nan() && !units.is_nan(),
            "polygon offset must not be NaN (factor {factor}, units {units})"
        );
        self.caps.enable(&mut self.gl, Capability::PolygonOffsetFill);
        if self.polygon_offset != Some((factor, units)) {
            self.gl.polygon_offset(factor, units);
            self.polygon_offset = Some((factor, units));
        }
    }

    pub fn set_scissor(&mut self, rect: PixelRect) {
        if self.scissor != Some(rect) {
            self.gl.scissor(rect);
            self.scissor = Some(rect);
        }
    }

    pub fn set_viewport(&mut self, rect: PixelRect) {
        if self.viewport != Some(rect) {
            self.gl.viewport(rect);
            self.viewport = Some(rect);
        }
    }

    // ── textures ──────────────────────────────────────────────────────────

    /// Selects a texture unit; `None` selects the last unit.
    ///
    /// # Panics
    /// Panics if `unit` is not below the context's texture unit count.
    pub fn active_texture(&mut self, unit: Option<u32>) -> u32 {
        self.textures.activate(&mut self.gl, unit)
    }

    /// Binds `texture` on the active unit, or the placeholder for `target` when `None`.
    pub fn bind_texture(&mut self, target: TextureTarget, texture: Option<TextureId>) {
        self.textures.bind(&mut self.gl, target, texture);
    }

    #[inline]
    pub fn active_texture_unit(&self) -> Option<u32> {
        self.textures.active()
    }

    #[inline]
    pub fn bound_texture(&self, unit: u32) -> Option<BoundTexture> {
        self.textures.bound(unit)
    }

    #[inline]
    pub fn placeholder_texture(&self, target: TextureTarget) -> TextureId {
        self.textures.placeholder(target)
    }

    // ── vertex attributes ─────────────────────────────────────────────────

    /// Starts an attribute pass: nothing is requested yet.
    pub fn init_attributes(&mut self) {
        self.attributes.begin_pass();
    }

    pub fn enable_attribute(&mut self, index: u32) {
        self.attributes.enable(&mut self.gl, index, 0);
    }

    /// # Panics
    /// Panics if `index` is not below the context's attribute count.
    pub fn enable_attribute_and_divisor(&mut self, index: u32, divisor: u32) {
        self.attributes.enable(&mut self.gl, index, divisor);
    }

    /// Disables attributes enabled earlier but not requested in this pass.
    pub fn disable_unused_attributes(&mut self) {
        self.attributes.disable_unused(&mut self.gl);
    }

    #[inline]
    pub fn is_attribute_enabled(&self, index: u32) -> bool {
        self.attributes.is_enabled(index)
    }

    // ── reset ─────────────────────────────────────────────────────────────

    /// Forgets all mirrored state after an out-of-band context mutation.
    ///
    /// Attributes believed enabled are disabled; everything else becomes
    /// unknown without touching the context.
    pub fn reset(&mut self) {
        log::debug!("StateMirror: reset");

        self.attributes.reset(&mut self.gl);
        self.caps.reset();
        self.textures.reset();
        self.program = None;
        self.blend.reset();
        self.flip_sided = None;
        self.cull_face = None;
        self.line_width = None;
        self.polygon_offset = None;
        self.scissor = None;
        self.viewport = None;

        self.color.reset();
        self.depth.reset();
        self.stencil.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{BackendCall, BackendLimits, BlendEquation, BlendFactor, RecordingBackend};

    fn mirror() -> StateMirror<RecordingBackend> {
        let mut state = StateMirror::new(RecordingBackend::new()).unwrap();
        state.backend_mut().clear_calls();
        state
    }

    fn calls(state: &mut StateMirror<RecordingBackend>) -> Vec<BackendCall> {
        state.backend_mut().take_calls()
    }

    #[test]
    fn construction_applies_initial_state() {
        let state = StateMirror::new(RecordingBackend::new()).unwrap();
        let calls = state.backend().calls();
        assert!(calls.contains(&BackendCall::Enable(Capability::DepthTest)));
        assert!(calls.contains(&BackendCall::Enable(Capability::CullFace)));
        assert!(calls.contains(&BackendCall::Disable(Capability::Blend)));
        assert!(calls.contains(&BackendCall::DepthFunc(CompareFunc::LessEqual)));
        assert!(calls.contains(&BackendCall::ClearColor(ColorRgba::BLACK)));
        assert!(calls.contains(&BackendCall::ClearDepth(1.0)));
        assert!(calls.contains(&BackendCall::ClearStencil(0)));
        assert_eq!(state.is_enabled(Capability::DepthTest), Some(true));
        assert_eq!(state.is_enabled(Capability::ScissorTest), None);
    }

    #[test]
    fn setters_are_idempotent() {
        let mut s = mirror();

        for _ in 0..3 {
            s.set_scissor_test(true);
            s.set_stencil_test(true);
            s.set_clear_color(ColorRgba::rgb(0.2, 0.3, 0.4), false);
            s.set_clear_depth(0.5);
            s.set_clear_stencil(1);
            s.use_program(ProgramId(7));
            s.set_depth_func(CompareFunc::Greater);
            s.set_depth_mask(false);
            s.set_color_mask(false);
            s.set_stencil_mask(0xff);
            s.set_stencil_func(CompareFunc::Equal, 1, 0xff);
            s.set_stencil_op(StencilOp::Keep, StencilOp::Keep, StencilOp::Replace);
            s.set_cull_face(CullFace::Front);
            s.set_flip_sided(true);
            s.set_line_width(2.0);
            s.set_polygon_offset(true, 1.0, 2.0);
            s.set_scissor(PixelRect::new(0, 0, 10, 10));
            s.set_viewport(PixelRect::new(0, 0, 640, 480));
            s.active_texture(Some(3));
        }

        let issued = calls(&mut s);
        assert_eq!(issued.len(), 20, "{issued:#?}");
        assert!(issued.contains(&BackendCall::Enable(Capability::StencilTest)));
        assert!(issued.contains(&BackendCall::ClearDepth(0.5)));
        assert!(issued.contains(&BackendCall::CullFace(Face::Front)));
        assert!(issued.contains(&BackendCall::Enable(Capability::PolygonOffsetFill)));
    }

    #[test]
    fn use_program_reports_change() {
        let mut s = mirror();
        assert!(s.use_program(ProgramId(1)));
        assert!(!s.use_program(ProgramId(1)));
        assert!(s.use_program(ProgramId(2)));
        assert_eq!(s.current_program(), Some(ProgramId(2)));
    }

    #[test]
    fn forget_program_only_clears_matching() {
        let mut s = mirror();
        s.use_program(ProgramId(1));
        s.forget_program(ProgramId(2));
        assert_eq!(s.current_program(), Some(ProgramId(1)));
        s.forget_program(ProgramId(1));
        assert_eq!(s.current_program(), None);
        assert!(s.use_program(ProgramId(1)));
    }

    #[test]
    fn no_blending_only_disables_when_enabled() {
        let mut s = mirror();
        s.set_blending(&BlendParams::NONE);
        assert!(calls(&mut s).is_empty());

        s.set_blending(&BlendParams::normal());
        s.set_blending(&BlendParams::NONE);
        let issued = calls(&mut s);
        assert_eq!(issued.last(), Some(&BackendCall::Disable(Capability::Blend)));
    }

    #[test]
    fn canonical_blend_skips_when_mode_and_premultiplied_unchanged() {
        let mut s = mirror();
        s.set_blending(&BlendParams::normal());
        assert_eq!(
            calls(&mut s),
            vec![
                BackendCall::Enable(Capability::Blend),
                BackendCall::BlendEquation(BlendEquation::Add),
                BackendCall::BlendFuncSeparate(
                    BlendFactor::SrcAlpha,
                    BlendFactor::OneMinusSrcAlpha,
                    BlendFactor::One,
                    BlendFactor::OneMinusSrcAlpha,
                ),
            ]
        );

        s.set_blending(&BlendParams::normal());
        assert!(calls(&mut s).is_empty());

        s.set_blending(&BlendParams::normal().premultiplied(true));
        assert_eq!(
            calls(&mut s),
            vec![BackendCall::BlendFuncSeparate(
                BlendFactor::One,
                BlendFactor::OneMinusSrcAlpha,
                BlendFactor::One,
                BlendFactor::OneMinusSrcAlpha,
            )]
        );
        assert_eq!(s.blending(), Some(Blending::Normal));
    }

    #[test]
    fn blend_reenabled_after_none() {
        let mut s = mirror();
        s.set_blending(&BlendParams::mode(Blending::Additive));
        s.set_blending(&BlendParams::NONE);
        s.backend_mut().clear_calls();

        s.set_blending(&BlendParams::mode(Blending::Additive));
        assert_eq!(calls(&mut s), vec![BackendCall::Enable(Capability::Blend)]);
    }

    #[test]
    fn custom_blend_gates_equation_and_factors_separately() {
        let mut s = mirror();
        let mut custom = BlendParams::custom(BlendEquation::Add, BlendFactor::One, BlendFactor::One);
        s.set_blending(&BlendParams::normal());
        s.backend_mut().clear_calls();

        // Equation already Add/Add from the canonical mode; factors were invalidated.
        s.set_blending(&custom);
        assert_eq!(
            calls(&mut s),
            vec![BackendCall::BlendFuncSeparate(
                BlendFactor::One,
                BlendFactor::One,
                BlendFactor::One,
                BlendFactor::One,
            )]
        );

        custom.equation_alpha = Some(BlendEquation::Max);
        s.set_blending(&custom);
        assert_eq!(
            calls(&mut s),
            vec![BackendCall::BlendEquationSeparate(BlendEquation::Add, BlendEquation::Max)]
        );

        s.set_blending(&custom);
        assert!(calls(&mut s).is_empty());
    }

    #[test]
    fn cull_face_none_disables_capability() {
        let mut s = mirror();
        s.set_cull_face(CullFace::None);
        assert_eq!(calls(&mut s), vec![BackendCall::Disable(Capability::CullFace)]);

        s.set_cull_face(CullFace::Back);
        assert_eq!(
            calls(&mut s),
            vec![
                BackendCall::Enable(Capability::CullFace),
                BackendCall::CullFace(Face::Back),
            ]
        );

        s.set_cull_face(CullFace::Back);
        assert!(calls(&mut s).is_empty());
    }

    #[test]
    fn cull_face_remembered_across_none() {
        let mut s = mirror();
        s.set_cull_face(CullFace::Back);
        calls(&mut s);

        s.set_cull_face(CullFace::None);
        s.set_cull_face(CullFace::Back);
        assert_eq!(
            calls(&mut s),
            vec![
                BackendCall::Disable(Capability::CullFace),
                BackendCall::Enable(Capability::CullFace),
            ]
        );

        s.set_cull_face(CullFace::None);
        s.set_cull_face(CullFace::Front);
        assert!(calls(&mut s).contains(&BackendCall::CullFace(Face::Front)));
    }

    #[test]
    fn flip_sided_selects_winding() {
        let mut s = mirror();
        s.set_flip_sided(false);
        s.set_flip_sided(true);
        assert_eq!(
            calls(&mut s),
            vec![BackendCall::FrontFace(Winding::Ccw), BackendCall::FrontFace(Winding::Cw)]
        );
    }

    #[test]
    fn unbound_unit_gets_matching_placeholder() {
        let mut s = mirror();
        let tex = TextureId(100);
        s.active_texture(Some(0));
        s.bind_texture(TextureTarget::Texture2D, Some(tex));
        s.backend_mut().clear_calls();

        s.bind_texture(TextureTarget::Texture2D, None);
        let placeholder = s.placeholder_texture(TextureTarget::Texture2D);
        assert_ne!(placeholder, s.placeholder_texture(TextureTarget::CubeMap));
        assert_eq!(
            calls(&mut s),
            vec![BackendCall::BindTexture(TextureTarget::Texture2D, placeholder)]
        );
        assert_eq!(
            s.bound_texture(0),
            Some(BoundTexture { target: Some(TextureTarget::Texture2D), texture: None })
        );

        s.bind_texture(TextureTarget::Texture2D, None);
        assert!(calls(&mut s).is_empty());
    }

    #[test]
    fn bind_without_active_unit_selects_last_unit() {
        let mut s = StateMirror::new(RecordingBackend::with_limits(BackendLimits {
            max_texture_units: 8,
            ..BackendLimits::default()
        }))
        .unwrap();
        s.backend_mut().clear_calls();

        s.bind_texture(TextureTarget::CubeMap, Some(TextureId(42)));
        assert_eq!(
            calls(&mut s),
            vec![
                BackendCall::ActiveTexture(7),
                BackendCall::BindTexture(TextureTarget::CubeMap, TextureId(42)),
            ]
        );
        assert!(s.bound_texture(0).is_none());
    }

    #[test]
    #[should_panic(expected = "texture unit")]
    fn out_of_range_texture_unit_panics() {
        let mut s = mirror();
        s.active_texture(Some(10_000));
    }

    #[test]
    fn attribute_pass_disables_only_stale_attributes() {
        let mut s = mirror();
        s.init_attributes();
        for i in [0, 1, 2] {
            s.enable_attribute(i);
        }
        s.disable_unused_attributes();
        s.backend_mut().clear_calls();

        s.init_attributes();
        s.enable_attribute(1);
        s.enable_attribute(3);
        s.disable_unused_attributes();

        let issued = calls(&mut s);
        assert_eq!(
            issued,
            vec![
                BackendCall::EnableVertexAttrib(3),
                BackendCall::VertexAttribDivisor(3, 0),
                BackendCall::DisableVertexAttrib(0),
                BackendCall::DisableVertexAttrib(2),
            ]
        );
        assert!(s.is_attribute_enabled(1));
        assert!(!s.is_attribute_enabled(2));
    }

    #[test]
    fn divisor_reconciled_independently_of_enable() {
        let mut s = mirror();
        s.init_attributes();
        s.enable_attribute_and_divisor(4, 0);
        s.backend_mut().clear_calls();

        s.enable_attribute_and_divisor(4, 1);
        assert_eq!(calls(&mut s), vec![BackendCall::VertexAttribDivisor(4, 1)]);
    }

    #[test]
    fn locked_masks_are_skipped() {
        let mut s = mirror();
        s.set_depth_mask(true);
        s.lock_depth_mask(true);
        s.lock_color_mask(true);
        s.lock_stencil_mask(true);
        s.backend_mut().clear_calls();

        s.set_depth_mask(false);
        s.set_color_mask(false);
        s.set_stencil_mask(0);
        assert!(calls(&mut s).is_empty());

        s.lock_depth_mask(false);
        s.set_depth_mask(false);
        assert_eq!(calls(&mut s), vec![BackendCall::DepthMask(false)]);
    }

    #[test]
    fn clear_color_premultiplies_when_asked() {
        let mut s = mirror();
        s.set_clear_color(ColorRgba::new(1.0, 0.5, 0.0, 0.5), true);
        assert_eq!(
            calls(&mut s),
            vec![BackendCall::ClearColor(ColorRgba::new(0.5, 0.25, 0.0, 0.5))]
        );
    }

    #[test]
    fn line_width_recorded_but_not_issued_when_unsupported() {
        let mut s = StateMirror::new(RecordingBackend::with_limits(BackendLimits {
            line_width_available: false,
            ..BackendLimits::default()
        }))
        .unwrap();
        s.backend_mut().clear_calls();
        s.set_line_width(3.0);
        assert!(calls(&mut s).is_empty());
    }

    #[test]
    fn disabled_polygon_offset_leaves_factors() {
        let mut s = mirror();
        s.set_polygon_offset(true, 1.0, 1.0);
        s.set_polygon_offset(false, 5.0, 5.0);
        s.set_polygon_offset(true, 1.0, 1.0);
        assert_eq!(
            calls(&mut s),
            vec![
                BackendCall::Enable(Capability::PolygonOffsetFill),
                BackendCall::PolygonOffset(1.0, 1.0),
                BackendCall::Disable(Capability::PolygonOffsetFill),
                BackendCall::Enable(Capability::PolygonOffsetFill),
            ]
        );
    }

    #[test]
    fn reset_forgets_everything_and_disables_attributes() {
        let mut s = mirror();
        s.init_attributes();
        s.enable_attribute(2);
        s.use_program(ProgramId(1));
        s.set_depth_mask(true);
        s.set_cull_face(CullFace::Back);
        s.set_blending(&BlendParams::normal());
        s.set_viewport(PixelRect::new(0, 0, 1, 1));
        s.active_texture(Some(0));
        s.backend_mut().clear_calls();

        s.reset();
        assert_eq!(calls(&mut s), vec![BackendCall::DisableVertexAttrib(2)]);
        assert_eq!(s.current_program(), None);
        assert_eq!(s.is_enabled(Capability::DepthTest), None);
        assert_eq!(s.active_texture_unit(), None);

        s.use_program(ProgramId(1));
        s.set_depth_mask(true);
        s.set_cull_face(CullFace::Back);
        s.set_blending(&BlendParams::normal());
        s.set_viewport(PixelRect::new(0, 0, 1, 1));
        let issued = calls(&mut s);
        assert!(issued.contains(&BackendCall::UseProgram(Some(ProgramId(1)))));
        assert!(issued.contains(&BackendCall::DepthMask(true)));
        assert!(issued.contains(&BackendCall::CullFace(Face::Back)));
        assert!(issued.contains(&BackendCall::BlendEquation(BlendEquation::Add)));
        assert!(issued.contains(&BackendCall::Viewport(PixelRect::new(0, 0, 1, 1))));
    }

    #[test]
    fn reset_clears_locks() {
        let mut s = mirror();
        s.lock_color_mask(true);
        s.reset();
        s.set_color_mask(false);
        assert_eq!(calls(&mut s), vec![BackendCall::ColorMask(false)]);
    }
}
