//! OpenGL 3.3 core / GLES 3 backend built on `glow`.
//!
//! Every `unsafe` block here is a plain GL call on the context owned by this
//! backend; callers guarantee the context is current on the calling thread.

use std::collections::HashMap;

use bytemuck::{Pod, Zeroable};
use glow::HasContext;

use crate::config::Precision;
use crate::coords::{ColorRgba, PixelRect};

use super::{
    BackendError, BackendLimits, BlendEquation, BlendFactor, Capability, CompareFunc, Face,
    GraphicsBackend, ProgramId, ShaderStage, StencilOp, TextureId, TextureTarget, Winding,
};

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct Texel {
    rgba: [u8; 4],
}

const PLACEHOLDER_TEXEL: Texel = Texel { rgba: [0, 0, 0, 255] };

/// [`GraphicsBackend`] over a live `glow::Context`.
///
/// Program and texture objects are exposed to the core as small integer ids;
/// textures created elsewhere (uploads are not this crate's concern) must be
/// registered with [`GlowBackend::register_texture`] before they can be bound
/// through the state mirror.
pub struct GlowBackend {
    gl: glow::Context,
    next_id: u32,
    programs: HashMap<ProgramId, glow::Program>,
    textures: HashMap<TextureId, glow::Texture>,
}

impl GlowBackend {
    pub fn new(gl: glow::Context) -> Self {
        Self {
            gl,
            next_id: 0,
            programs: HashMap::new(),
            textures: HashMap::new(),
        }
    }

    /// Raw context access for calls outside the mirrored state (uploads, draws).
    ///
    /// Mutating mirrored state through this handle desynchronizes the mirror;
    /// call `StateMirror::reset` afterwards if that happens.
    #[inline]
    pub fn gl(&self) -> &glow::Context {
        &self.gl
    }

    pub fn register_texture(&mut self, texture: glow::Texture) -> TextureId {
        let id = TextureId(self.alloc_id());
        self.textures.insert(id, texture);
        id
    }

    /// Forgets a registered texture; the GL object itself is not deleted.
    pub fn unregister_texture(&mut self, id: TextureId) -> Option<glow::Texture> {
        self.textures.remove(&id)
    }

    /// Returns the GL program object behind `id`, e.g. for uniform lookups.
    pub fn program(&self, id: ProgramId) -> Option<glow::Program> {
        self.programs.get(&id).copied()
    }

    fn alloc_id(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }

    fn compile_stage(&self, stage: ShaderStage, src: &str) -> Result<glow::Shader, BackendError> {
        let ty = match stage {
            ShaderStage::Vertex => glow::VERTEX_SHADER,
            ShaderStage::Fragment => glow::FRAGMENT_SHADER,
        };
        unsafe {
            let sh = self.gl.create_shader(ty).map_err(BackendError::Allocation)?;
            self.gl.shader_source(sh, src);
            self.gl.compile_shader(sh);
            if !self.gl.get_shader_compile_status(sh) {
                let log = self.gl.get_shader_info_log(sh);
                self.gl.delete_shader(sh);
                return Err(BackendError::Compile { stage, log });
            }
            Ok(sh)
        }
    }
}

impl GraphicsBackend for GlowBackend {
    fn limits(&self) -> BackendLimits {
        unsafe {
            let version = self.gl.version();
            let max_precision = if version.is_embedded {
                match self
                    .gl
                    .get_shader_precision_format(glow::FRAGMENT_SHADER, glow::HIGH_FLOAT)
                {
                    Some(f) if f.precision > 0 => Precision::High,
                    _ => Precision::Medium,
                }
            } else {
                Precision::High
            };

            let mut line_range = [1.0f32; 2];
            self.gl
                .get_parameter_f32_slice(glow::ALIASED_LINE_WIDTH_RANGE, &mut line_range);

            BackendLimits {
                max_vertex_attributes: self.gl.get_parameter_i32(glow::MAX_VERTEX_ATTRIBS).max(0) as u32,
                max_texture_units: self
                    .gl
                    .get_parameter_i32(glow::MAX_COMBINED_TEXTURE_IMAGE_UNITS)
                    .max(0) as u32,
                max_vertex_texture_units: self
                    .gl
                    .get_parameter_i32(glow::MAX_VERTEX_TEXTURE_IMAGE_UNITS)
                    .max(0) as u32,
                max_precision,
                float_textures: !version.is_embedded || version.major >= 3,
                line_width_available: line_range[1] > 1.0,
            }
        }
    }

    fn enable(&mut self, cap: Capability) {
        unsafe { self.gl.enable(capability_to_gl(cap)) }
    }

    fn disable(&mut self, cap: Capability) {
        unsafe { self.gl.disable(capability_to_gl(cap)) }
    }

    fn use_program(&mut self, program: Option<ProgramId>) {
        let program = program.and_then(|id| self.programs.get(&id).copied());
        unsafe { self.gl.use_program(program) }
    }

    fn blend_equation(&mut self, equation: BlendEquation) {
        unsafe { self.gl.blend_equation(equation_to_gl(equation)) }
    }

    fn blend_equation_separate(&mut self, color: BlendEquation, alpha: BlendEquation) {
        unsafe {
            self.gl
                .blend_equation_separate(equation_to_gl(color), equation_to_gl(alpha))
        }
    }

    fn blend_func(&mut self, src: BlendFactor, dst: BlendFactor) {
        unsafe { self.gl.blend_func(factor_to_gl(src), factor_to_gl(dst)) }
    }

    fn blend_func_separate(
        &mut self,
        src_color: BlendFactor,
        dst_color: BlendFactor,
        src_alpha: BlendFactor,
        dst_alpha: BlendFactor,
    ) {
        unsafe {
            self.gl.blend_func_separate(
                factor_to_gl(src_color),
                factor_to_gl(dst_color),
                factor_to_gl(src_alpha),
                factor_to_gl(dst_alpha),
            )
        }
    }

    fn color_mask(&mut self, write: bool) {
        unsafe { self.gl.color_mask(write, write, write, write) }
    }

    fn clear_color(&mut self, color: ColorRgba) {
        unsafe { self.gl.clear_color(color.r, color.g, color.b, color.a) }
    }

    fn depth_func(&mut self, func: CompareFunc) {
        unsafe { self.gl.depth_func(compare_to_gl(func)) }
    }

    fn depth_mask(&mut self, write: bool) {
        unsafe { self.gl.depth_mask(write) }
    }

    fn clear_depth(&mut self, depth: f64) {
        unsafe { self.gl.clear_depth_f64(depth) }
    }

    fn stencil_mask(&mut self, mask: u32) {
        unsafe { self.gl.stencil_mask(mask) }
    }

    fn stencil_func(&mut self, func: CompareFunc, reference: i32, mask: u32) {
        unsafe { self.gl.stencil_func(compare_to_gl(func), reference, mask) }
    }

    fn stencil_op(&mut self, fail: StencilOp, depth_fail: StencilOp, pass: StencilOp) {
        unsafe {
            self.gl.stencil_op(
                stencil_op_to_gl(fail),
                stencil_op_to_gl(depth_fail),
                stencil_op_to_gl(pass),
            )
        }
    }

    fn clear_stencil(&mut self, value: i32) {
        unsafe { self.gl.clear_stencil(value) }
    }

    fn cull_face(&mut self, face: Face) {
        let face = match face {
            Face::Back => glow::BACK,
            Face::Front => glow::FRONT,
            Face::FrontAndBack => glow::FRONT_AND_BACK,
        };
        unsafe { self.gl.cull_face(face) }
    }

    fn front_face(&mut self, winding: Winding) {
        let mode = match winding {
            Winding::Ccw => glow::CCW,
            Winding::Cw => glow::CW,
        };
        unsafe { self.gl.front_face(mode) }
    }

    fn line_width(&mut self, width: f32) {
        unsafe { self.gl.line_width(width) }
    }

    fn polygon_offset(&mut self, factor: f32, units: f32) {
        unsafe { self.gl.polygon_offset(factor, units) }
    }

    fn scissor(&mut self, rect: PixelRect) {
        unsafe { self.gl.scissor(rect.x, rect.y, rect.width, rect.height) }
    }

    fn viewport(&mut self, rect: PixelRect) {
        unsafe { self.gl.viewport(rect.x, rect.y, rect.width, rect.height) }
    }

    fn active_texture(&mut self, unit: u32) {
        unsafe { self.gl.active_texture(glow::TEXTURE0 + unit) }
    }

    fn bind_texture(&mut self, target: TextureTarget, texture: TextureId) {
        let texture = self.textures.get(&texture).copied();
        if texture.is_none() {
            log::debug!("GlowBackend: binding unregistered texture id; unbinding instead");
        }
        unsafe { self.gl.bind_texture(target_to_gl(target), texture) }
    }

    fn create_placeholder_texture(&mut self, target: TextureTarget) -> Result<TextureId, BackendError> {
        let ty = target_to_gl(target);
        let faces: &[u32] = match target {
            TextureTarget::Texture2D => &[glow::TEXTURE_2D],
            TextureTarget::CubeMap => &[
                glow::TEXTURE_CUBE_MAP_POSITIVE_X,
                glow::TEXTURE_CUBE_MAP_NEGATIVE_X,
                glow::TEXTURE_CUBE_MAP_POSITIVE_Y,
                glow::TEXTURE_CUBE_MAP_NEGATIVE_Y,
                glow::TEXTURE_CUBE_MAP_POSITIVE_Z,
                glow::TEXTURE_CUBE_MAP_NEGATIVE_Z,
            ],
        };

        let texture = unsafe {
            let texture = self.gl.create_texture().map_err(BackendError::Allocation)?;
            self.gl.bind_texture(ty, Some(texture));
            self.gl
                .tex_parameter_i32(ty, glow::TEXTURE_MIN_FILTER, glow::NEAREST as i32);
            self.gl
                .tex_parameter_i32(ty, glow::TEXTURE_MAG_FILTER, glow::NEAREST as i32);
            for &face in faces {
                self.gl.tex_image_2d(
                    face,
                    0,
                    glow::RGBA as i32,
                    1,
                    1,
                    0,
                    glow::RGBA,
                    glow::UNSIGNED_BYTE,
                    glow::PixelUnpackData::Slice(Some(bytemuck::bytes_of(&PLACEHOLDER_TEXEL))),
                );
            }
            self.gl.bind_texture(ty, None);
            texture
        };

        Ok(self.register_texture(texture))
    }

    fn enable_vertex_attrib(&mut self, index: u32) {
        unsafe { self.gl.enable_vertex_attrib_array(index) }
    }

    fn disable_vertex_attrib(&mut self, index: u32) {
        unsafe { self.gl.disable_vertex_attrib_array(index) }
    }

    fn vertex_attrib_divisor(&mut self, index: u32, divisor: u32) {
        unsafe { self.gl.vertex_attrib_divisor(index, divisor) }
    }

    fn create_program(&mut self, vertex: &str, fragment: &str) -> Result<ProgramId, BackendError> {
        let vert = self.compile_stage(ShaderStage::Vertex, vertex)?;
        let frag = match self.compile_stage(ShaderStage::Fragment, fragment) {
            Ok(frag) => frag,
            Err(err) => {
                unsafe { self.gl.delete_shader(vert) };
                return Err(err);
            }
        };

        let program = unsafe {
            let program = match self.gl.create_program() {
                Ok(p) => p,
                Err(msg) => {
                    self.gl.delete_shader(vert);
                    self.gl.delete_shader(frag);
                    return Err(BackendError::Allocation(msg));
                }
            };
            self.gl.attach_shader(program, vert);
            self.gl.attach_shader(program, frag);
            self.gl.link_program(program);
            let linked = self.gl.get_program_link_status(program);
            let log = if linked { String::new() } else { self.gl.get_program_info_log(program) };

            self.gl.detach_shader(program, vert);
            self.gl.detach_shader(program, frag);
            self.gl.delete_shader(vert);
            self.gl.delete_shader(frag);

            if !linked {
                self.gl.delete_program(program);
                return Err(BackendError::Link { log });
            }
            program
        };

        let id = ProgramId(self.alloc_id());
        self.programs.insert(id, program);
        Ok(id)
    }

    fn delete_program(&mut self, program: ProgramId) {
        if let Some(p) = self.programs.remove(&program) {
            unsafe { self.gl.delete_program(p) }
        }
    }
}

fn capability_to_gl(cap: Capability) -> u32 {
    match cap {
        Capability::CullFace => glow::CULL_FACE,
        Capability::DepthTest => glow::DEPTH_TEST,
        Capability::Blend => glow::BLEND,
        Capability::ScissorTest => glow::SCISSOR_TEST,
        Capability::PolygonOffsetFill => glow::POLYGON_OFFSET_FILL,
        Capability::StencilTest => glow::STENCIL_TEST,
    }
}

fn target_to_gl(target: TextureTarget) -> u32 {
    match target {
        TextureTarget::Texture2D => glow::TEXTURE_2D,
        TextureTarget::CubeMap => glow::TEXTURE_CUBE_MAP,
    }
}

fn equation_to_gl(eq: BlendEquation) -> u32 {
    match eq {
        BlendEquation::Add => glow::FUNC_ADD,
        BlendEquation::Subtract => glow::FUNC_SUBTRACT,
        BlendEquation::ReverseSubtract => glow::FUNC_REVERSE_SUBTRACT,
        BlendEquation::Min => glow::MIN,
        BlendEquation::Max => glow::MAX,
    }
}

fn factor_to_gl(factor: BlendFactor) -> u32 {
    match factor {
        BlendFactor::Zero => glow::ZERO,
        BlendFactor::One => glow::ONE,
        BlendFactor::SrcColor => glow::SRC_COLOR,
        BlendFactor::OneMinusSrcColor => glow::ONE_MINUS_SRC_COLOR,
        BlendFactor::SrcAlpha => glow::SRC_ALPHA,
        BlendFactor::OneMinusSrcAlpha => glow::ONE_MINUS_SRC_ALPHA,
        BlendFactor::DstAlpha => glow::DST_ALPHA,
        BlendFactor::OneMinusDstAlpha => glow::ONE_MINUS_DST_ALPHA,
        BlendFactor::DstColor => glow::DST_COLOR,
        BlendFactor::OneMinusDstColor => glow::ONE_MINUS_DST_COLOR,
        BlendFactor::SrcAlphaSaturate => glow::SRC_ALPHA_SATURATE,
    }
}

fn compare_to_gl(func: CompareFunc) -> u32 {
    match func {
        CompareFunc::Never => glow::NEVER,
        CompareFunc::Always => glow::ALWAYS,
        CompareFunc::Less => glow::LESS,
        CompareFunc::LessEqual => glow::LEQUAL,
        CompareFunc::Equal => glow::EQUAL,
        CompareFunc::GreaterEqual => glow::GEQUAL,
        CompareFunc::Greater => glow::GREATER,
        CompareFunc::NotEqual => glow::NOTEQUAL,
    }
}

fn stencil_op_to_gl(op: StencilOp) -> u32 {
    match op {
        StencilOp::Keep => glow::KEEP,
        StencilOp::Zero => glow::ZERO,
        StencilOp::Replace => glow::REPLACE,
        StencilOp::Increment => glow::INCR,
        StencilOp::IncrementWrap => glow::INCR_WRAP,
        StencilOp::Decrement => glow::DECR,
        StencilOp::DecrementWrap => glow::DECR_WRAP,
        StencilOp::Invert => glow::INVERT,
    }
}
