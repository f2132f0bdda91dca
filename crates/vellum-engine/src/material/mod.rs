//! Material records read by the key builder and the state applier.
//!
//! A material is a flat base record plus a [`MaterialFeatures`] flag set; the
//! concrete kind only selects the builtin shader family.

mod features;
mod texture;

pub use features::MaterialFeatures;
pub use texture::{TextureEncoding, TextureInfo, TextureMapping};

use crate::backend::CompareFunc;
use crate::config::Precision;
use crate::state::{BlendParams, Blending};

/// Builtin material kinds. Each maps to one shader family.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum BuiltinMaterial {
    MeshDepth,
    MeshDistance,
    MeshNormal,
    MeshBasic,
    MeshLambert,
    MeshPhong,
    MeshToon,
    MeshStandard,
    MeshPhysical,
    MeshMatcap,
    LineBasic,
    LineDashed,
    Points,
    Shadow,
    Sprite,
}

/// Source of a material's shader.
#[derive(Debug, Clone, PartialEq)]
pub enum MaterialKind {
    Builtin(BuiltinMaterial),
    /// User-supplied GLSL bodies.
    Shader { vertex: String, fragment: String },
}

/// Which faces of a mesh are rendered.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum Side {
    #[default]
    Front,
    Back,
    Double,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum Combine {
    #[default]
    Multiply,
    Mix,
    Add,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum NormalMapType {
    #[default]
    TangentSpace,
    ObjectSpace,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum DepthPacking {
    Basic,
    Rgba,
}

/// Texture slots. `None` means the slot is unused.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaterialMaps {
    pub map: Option<TextureInfo>,
    pub matcap: Option<TextureInfo>,
    pub env_map: Option<TextureInfo>,
    pub light_map: Option<TextureInfo>,
    pub ao_map: Option<TextureInfo>,
    pub emissive_map: Option<TextureInfo>,
    pub bump_map: Option<TextureInfo>,
    pub normal_map: Option<TextureInfo>,
    pub displacement_map: Option<TextureInfo>,
    pub roughness_map: Option<TextureInfo>,
    pub metalness_map: Option<TextureInfo>,
    pub specular_map: Option<TextureInfo>,
    pub alpha_map: Option<TextureInfo>,
    pub gradient_map: Option<TextureInfo>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    /// Diagnostic label; never part of a program key.
    pub name: String,
    pub kind: MaterialKind,

    pub side: Side,
    pub blend: BlendParams,
    pub transparent: bool,
    pub opacity: f32,

    pub depth_func: CompareFunc,
    pub depth_test: bool,
    pub depth_write: bool,
    pub color_write: bool,

    pub polygon_offset: bool,
    pub polygon_offset_factor: f32,
    pub polygon_offset_units: f32,

    pub maps: MaterialMaps,
    pub normal_map_type: NormalMapType,

    /// Preprocessor defines, emitted in insertion order.
    pub defines: Vec<(String, String)>,
    /// Requested precision; `None` uses the best the context supports.
    pub precision: Option<Precision>,
    pub alpha_test: f32,
    pub vertex_colors: bool,
    pub vertex_tangents: bool,
    pub flat_shading: bool,
    pub fog: bool,
    pub dithering: bool,
    pub combine: Combine,
    pub features: MaterialFeatures,
    /// Only meaningful for depth materials.
    pub depth_packing: Option<DepthPacking>,
}

impl Material {
    pub fn new(kind: MaterialKind) -> Self {
        Self {
            name: String::new(),
            kind,
            side: Side::Front,
            blend: BlendParams::normal(),
            transparent: false,
            opacity: 1.0,
            depth_func: CompareFunc::LessEqual,
            depth_test: true,
            depth_write: true,
            color_write: true,
            polygon_offset: false,
            polygon_offset_factor: 0.0,
            polygon_offset_units: 0.0,
            maps: MaterialMaps::default(),
            normal_map_type: NormalMapType::TangentSpace,
            defines: Vec::new(),
            precision: None,
            alpha_test: 0.0,
            vertex_colors: false,
            vertex_tangents: false,
            flat_shading: false,
            fog: true,
            dithering: false,
            combine: Combine::Multiply,
            features: MaterialFeatures::empty(),
            depth_packing: None,
        }
    }

    #[inline]
    pub fn builtin(kind: BuiltinMaterial) -> Self {
        Self::new(MaterialKind::Builtin(kind))
    }

    pub fn shader(vertex: impl Into<String>, fragment: impl Into<String>) -> Self {
        Self::new(MaterialKind::Shader {
            vertex: vertex.into(),
            fragment: fragment.into(),
        })
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_define(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.defines.push((name.into(), value.into()));
        self
    }

    #[inline]
    pub fn has_feature(&self, feature: MaterialFeatures) -> bool {
        self.features.contains(feature)
    }

    /// Normal blending at full opacity on a non-transparent material looks
    /// identical to no blending.
    #[inline]
    pub fn blends_opaque(&self) -> bool {
        self.blend.mode == Blending::Normal && !self.transparent && self.opacity >= 1.0
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::builtin(BuiltinMaterial::MeshBasic)
    }
}
