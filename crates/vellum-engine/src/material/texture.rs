/// Color encoding of texel data.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum TextureEncoding {
    #[default]
    Linear,
    Srgb,
    Gamma,
    Rgbe,
    LogLuv,
    RgbM7,
    RgbM16,
    RgbD,
}

impl TextureEncoding {
    /// GLSL helper name and argument list used by the encode/decode wrappers.
    ///
    /// `Gamma` reads `GAMMA_FACTOR`, which the generated prefix always defines.
    pub const fn shader_components(self) -> (&'static str, &'static str) {
        match self {
            TextureEncoding::Linear => ("Linear", "( value )"),
            TextureEncoding::Srgb => ("sRGB", "( value )"),
            TextureEncoding::Gamma => ("Gamma", "( value, float( GAMMA_FACTOR ) )"),
            TextureEncoding::Rgbe => ("RGBE", "( value )"),
            TextureEncoding::LogLuv => ("LogLuv", "( value )"),
            TextureEncoding::RgbM7 => ("RGBM", "( value, 7.0 )"),
            TextureEncoding::RgbM16 => ("RGBM", "( value, 16.0 )"),
            TextureEncoding::RgbD => ("RGBD", "( value, 256.0 )"),
        }
    }
}

/// How texture coordinates are derived when sampling.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum TextureMapping {
    #[default]
    Uv,
    CubeReflection,
    CubeRefraction,
    EquirectangularReflection,
    EquirectangularRefraction,
    SphericalReflection,
    CubeUvReflection,
    CubeUvRefraction,
}

impl TextureMapping {
    #[inline]
    pub const fn is_cube_uv(self) -> bool {
        matches!(self, TextureMapping::CubeUvReflection | TextureMapping::CubeUvRefraction)
    }
}

/// The parts of a texture that affect generated shader source.
///
/// Pixel data and GPU handles live with the texture-upload layer; only the
/// encoding and mapping are read here.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct TextureInfo {
    pub encoding: TextureEncoding,
    pub mapping: TextureMapping,
}

impl TextureInfo {
    #[inline]
    pub const fn new(encoding: TextureEncoding, mapping: TextureMapping) -> Self {
        Self { encoding, mapping }
    }

    #[inline]
    pub const fn linear() -> Self {
        Self::new(TextureEncoding::Linear, TextureMapping::Uv)
    }
}
