//! Renderer-wide configuration and GPU capabilities.
//!
//! Both are plain values handed to the key builder explicitly; nothing here is
//! global state.

mod capabilities;

pub use capabilities::Capabilities;

use crate::material::TextureEncoding;

/// Shader float precision qualifier.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum Precision {
    Low,
    Medium,
    High,
}

impl Precision {
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Precision::Low => "lowp",
            Precision::Medium => "mediump",
            Precision::High => "highp",
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum ToneMapping {
    #[default]
    None,
    Linear,
    Reinhard,
    Uncharted2,
    Cineon,
    AcesFilmic,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum ShadowMapType {
    Basic,
    #[default]
    Pcf,
    PcfSoft,
    Vsm,
}

/// Shadow-mapping switches read when deciding whether a draw samples shadows.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub struct ShadowMapConfig {
    pub enabled: bool,
    pub kind: ShadowMapType,
}

/// Renderer-wide flags that influence generated shader source.
///
/// Changing any field changes the parameters of subsequently built programs;
/// already-compiled programs stay valid for the keys they were built from.
#[derive(Debug, Clone, PartialEq)]
pub struct RendererConfig {
    /// Treat linear-encoded input textures as gamma encoded.
    pub gamma_input: bool,

    /// Encode fragment output with gamma when the target texture is linear.
    pub gamma_output: bool,

    /// Exponent used by gamma encode/decode.
    pub gamma_factor: f32,

    pub tone_mapping: ToneMapping,

    pub physically_correct_lights: bool,

    pub shadow_map: ShadowMapConfig,

    pub max_morph_targets: u32,
    pub max_morph_normals: u32,

    /// Bone budget for skinned meshes. Zero disables skinning.
    pub max_bones: u32,

    pub logarithmic_depth_buffer: bool,

    /// Encoding of the current render target's color texture.
    ///
    /// `None` renders to the default framebuffer.
    pub output_encoding: Option<TextureEncoding>,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            gamma_input: false,
            gamma_output: false,
            gamma_factor: 2.0,
            tone_mapping: ToneMapping::None,
            physically_correct_lights: false,
            shadow_map: ShadowMapConfig::default(),
            max_morph_targets: 8,
            max_morph_normals: 4,
            max_bones: 0,
            logarithmic_depth_buffer: false,
            output_encoding: None,
        }
    }
}
