//! Native-API vocabulary shared by the backend seam, the state mirror and materials.

use crate::config::Precision;

/// Binary pipeline feature toggled with enable/disable.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Capability {
    CullFace,
    DepthTest,
    Blend,
    ScissorTest,
    PolygonOffsetFill,
    StencilTest,
}

impl Capability {
    pub const COUNT: usize = 6;

    pub const ALL: [Capability; Self::COUNT] = [
        Capability::CullFace,
        Capability::DepthTest,
        Capability::Blend,
        Capability::ScissorTest,
        Capability::PolygonOffsetFill,
        Capability::StencilTest,
    ];

    #[inline]
    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

/// Texture binding target.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum TextureTarget {
    Texture2D,
    CubeMap,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum BlendEquation {
    Add,
    Subtract,
    ReverseSubtract,
    Min,
    Max,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum BlendFactor {
    Zero,
    One,
    SrcColor,
    OneMinusSrcColor,
    SrcAlpha,
    OneMinusSrcAlpha,
    DstAlpha,
    OneMinusDstAlpha,
    DstColor,
    OneMinusDstColor,
    SrcAlphaSaturate,
}

/// Comparison used by both the depth and the stencil test.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum CompareFunc {
    Never,
    Always,
    Less,
    #[default]
    LessEqual,
    Equal,
    GreaterEqual,
    Greater,
    NotEqual,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum StencilOp {
    Keep,
    Zero,
    Replace,
    Increment,
    IncrementWrap,
    Decrement,
    DecrementWrap,
    Invert,
}

/// Faces discarded by the cull test.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Face {
    Back,
    Front,
    FrontAndBack,
}

/// Vertex order that defines a front face.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Winding {
    Ccw,
    Cw,
}

/// Compiled program object owned by the backend.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct ProgramId(pub u32);

/// Texture object owned by the backend.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct TextureId(pub u32);

/// Limits and feature support reported by the context at init.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BackendLimits {
    pub max_vertex_attributes: u32,
    pub max_texture_units: u32,
    pub max_vertex_texture_units: u32,
    pub max_precision: Precision,
    pub float_textures: bool,
    pub line_width_available: bool,
}

impl Default for BackendLimits {
    fn default() -> Self {
        Self {
            max_vertex_attributes: 16,
            max_texture_units: 16,
            max_vertex_texture_units: 16,
            max_precision: Precision::High,
            float_textures: true,
            line_width_available: true,
        }
    }
}

/// Failure reported by the native API.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BackendError {
    #[error("{stage:?} shader failed to compile: {log}")]
    Compile { stage: ShaderStage, log: String },
    #[error("program failed to link: {log}")]
    Link { log: String },
    #[error("backend could not allocate {0}")]
    Allocation(String),
}
