//! GLSL generation for compiled programs.
//!
//! Each stage is a generated prefix (version, precision, `#define`s derived
//! from [`ProgramParameters`]) followed by the body: the builtin unlit pair for
//! builtin families, or the material's own text for user shaders.

use std::fmt::Display;

use crate::config::{ShadowMapType, ToneMapping};
use crate::material::{Combine, DepthPacking, Material, MaterialKind, TextureEncoding, TextureMapping};

use super::ProgramParameters;

pub const GLSL_VERSION: &str = "#version 330 core";

const BUILTIN_VERTEX: &str = include_str!("shaders/builtin.vert");
const BUILTIN_FRAGMENT: &str = include_str!("shaders/builtin.frag");
const ENCODINGS: &str = include_str!("shaders/encodings.glsl");
const TONE_MAPPING: &str = include_str!("shaders/tonemapping.glsl");

/// Complete vertex and fragment text handed to the backend.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ProgramSources {
    pub vertex: String,
    pub fragment: String,
}

pub fn build_sources(material: &Material, params: &ProgramParameters) -> ProgramSources {
    let (vertex_body, fragment_body) = match &material.kind {
        MaterialKind::Builtin(_) => (BUILTIN_VERTEX, BUILTIN_FRAGMENT),
        MaterialKind::Shader { vertex, fragment } => (vertex.as_str(), fragment.as_str()),
    };

    let shader_name = match params.family {
        Some(family) => family.id(),
        None if material.name.is_empty() => "ShaderMaterial",
        None => material.name.as_str(),
    };

    let mut vertex = Prefix::new(params, shader_name, material);
    vertex.vertex_defines(params);
    vertex.push(vertex_body);

    let mut fragment = Prefix::new(params, shader_name, material);
    fragment.fragment_defines(params);
    fragment.push(fragment_body);

    ProgramSources {
        vertex: vertex.finish(),
        fragment: fragment.finish(),
    }
}

struct Prefix(String);

impl Prefix {
    /// Lines shared by both stages.
    fn new(params: &ProgramParameters, shader_name: &str, material: &Material) -> Self {
        let mut p = Prefix(String::with_capacity(4096));
        p.push(GLSL_VERSION);
        p.push(&format!("precision {} float;", params.precision.as_str()));
        p.push(&format!("precision {} int;", params.precision.as_str()));
        p.define_value("SHADER_NAME", shader_name);
        p.define_value("GAMMA_FACTOR", format!("{:?}", params.gamma_factor));

        for (name, value) in &material.defines {
            p.define_value(name, value);
        }

        let lights = &params.lights;
        p.define_value("NUM_DIR_LIGHTS", lights.directional);
        p.define_value("NUM_SPOT_LIGHTS", lights.spot);
        p.define_value("NUM_RECT_AREA_LIGHTS", lights.rect_area);
        p.define_value("NUM_POINT_LIGHTS", lights.point);
        p.define_value("NUM_HEMI_LIGHTS", lights.hemi);
        p.define_value("NUM_CLIPPING_PLANES", params.clipping.planes);
        p.define_value("UNION_CLIPPING_PLANES", params.union_clipping_planes());

        if params.fog && params.use_fog {
            p.define("USE_FOG");
            p.define_if(params.fog_exp, "FOG_EXP2");
        }

        p.define_if(params.has_map(), "USE_MAP");
        p.define_if(params.matcap_encoding.is_some(), "USE_MATCAP");
        if let Some(mapping) = params.env_map_mode {
            p.define("USE_ENVMAP");
            p.define(envmap_type(mapping));
            p.define(envmap_mode(mapping));
            p.define(match params.combine {
                Combine::Multiply => "ENVMAP_BLENDING_MULTIPLY",
                Combine::Mix => "ENVMAP_BLENDING_MIX",
                Combine::Add => "ENVMAP_BLENDING_ADD",
            });
        }
        p.define_if(params.light_map, "USE_LIGHTMAP");
        p.define_if(params.ao_map, "USE_AOMAP");
        p.define_if(params.emissive_map_encoding.is_some(), "USE_EMISSIVEMAP");
        p.define_if(params.bump_map, "USE_BUMPMAP");
        p.define_if(params.normal_map, "USE_NORMALMAP");
        p.define_if(params.normal_map && params.object_space_normal_map, "OBJECTSPACE_NORMALMAP");
        p.define_if(params.displacement_map && params.supports_vertex_textures, "USE_DISPLACEMENTMAP");
        p.define_if(params.specular_map, "USE_SPECULARMAP");
        p.define_if(params.roughness_map, "USE_ROUGHNESSMAP");
        p.define_if(params.metalness_map, "USE_METALNESSMAP");
        p.define_if(params.alpha_map, "USE_ALPHAMAP");
        p.define_if(params.gradient_map, "USE_GRADIENTMAP");

        p.define_if(params.vertex_tangents, "USE_TANGENT");
        p.define_if(params.vertex_colors, "USE_COLOR");
        p.define_if(params.flat_shading, "FLAT_SHADED");
        p.define_if(params.double_sided, "DOUBLE_SIDED");
        p.define_if(params.flip_sided, "FLIP_SIDED");

        if params.shadow_map_enabled {
            p.define("USE_SHADOWMAP");
            p.define(match params.shadow_map_type {
                ShadowMapType::Basic => "SHADOWMAP_TYPE_BASIC",
                ShadowMapType::Pcf => "SHADOWMAP_TYPE_PCF",
                ShadowMapType::PcfSoft => "SHADOWMAP_TYPE_PCF_SOFT",
                ShadowMapType::Vsm => "SHADOWMAP_TYPE_VSM",
            });
        }

        p.define_if(params.physically_correct_lights, "PHYSICALLY_CORRECT_LIGHTS");
        p.define_if(params.logarithmic_depth_buffer, "USE_LOGDEPTHBUF");
        p
    }

    fn vertex_defines(&mut self, params: &ProgramParameters) {
        self.define_if(params.supports_vertex_textures, "VERTEX_TEXTURES");

        if params.skinning {
            self.define("USE_SKINNING");
            self.define_value("MAX_BONES", params.max_bones);
            self.define_if(params.use_vertex_texture, "BONE_TEXTURE");
        }
        if params.morph_targets {
            self.define("USE_MORPHTARGETS");
            self.define_value("MAX_MORPH_TARGETS", params.max_morph_targets);
        }
        if params.morph_normals && !params.flat_shading {
            self.define("USE_MORPHNORMALS");
            self.define_value("MAX_MORPH_NORMALS", params.max_morph_normals);
        }
        self.define_if(params.size_attenuation, "USE_SIZEATTENUATION");
    }

    fn fragment_defines(&mut self, params: &ProgramParameters) {
        if params.alpha_test > 0.0 {
            self.define_value("ALPHATEST", format!("{:?}", params.alpha_test));
        }
        self.define_if(params.dithering, "DITHERING");
        self.define_if(params.premultiplied_alpha, "PREMULTIPLIED_ALPHA");

        if let Some(packing) = params.depth_packing {
            self.define_value(
                "DEPTH_PACKING",
                match packing {
                    DepthPacking::Basic => 3200,
                    DepthPacking::Rgba => 3201,
                },
            );
        }

        if let Some(name) = tone_mapping_fn(params.tone_mapping) {
            self.define("TONE_MAPPING");
            self.push(TONE_MAPPING);
            self.push(&format!(
                "vec3 toneMapping( vec3 color ) {{ return {name}ToneMapping( color ); }}"
            ));
        }

        self.push(ENCODINGS);
        let encoded = [
            ("mapTexelToLinear", params.map_encoding),
            ("matcapTexelToLinear", params.matcap_encoding),
            ("envMapTexelToLinear", params.env_map_encoding),
            ("emissiveMapTexelToLinear", params.emissive_map_encoding),
        ];
        for (function, encoding) in encoded.into_iter().filter_map(|(f, e)| e.map(|e| (f, e))) {
            self.push(&decoding_fn(function, encoding));
        }
        self.push(&encoding_fn("linearToOutputTexel", params.output_encoding));
    }

    fn define(&mut self, name: &str) {
        self.push(&format!("#define {name}"));
    }

    fn define_if(&mut self, enabled: bool, name: &str) {
        if enabled {
            self.define(name);
        }
    }

    fn define_value(&mut self, name: &str, value: impl Display) {
        self.push(&format!("#define {name} {value}"));
    }

    fn push(&mut self, text: &str) {
        self.0.push_str(text);
        if !text.ends_with('\n') {
            self.0.push('\n');
        }
    }

    fn finish(self) -> String {
        self.0
    }
}

fn decoding_fn(function: &str, encoding: TextureEncoding) -> String {
    let (name, args) = encoding.shader_components();
    format!("vec4 {function}( vec4 value ) {{ return {name}ToLinear{args}; }}")
}

fn encoding_fn(function: &str, encoding: TextureEncoding) -> String {
    let (name, args) = encoding.shader_components();
    format!("vec4 {function}( vec4 value ) {{ return LinearTo{name}{args}; }}")
}

fn tone_mapping_fn(tone_mapping: ToneMapping) -> Option<&'static str> {
    match tone_mapping {
        ToneMapping::None => None,
        ToneMapping::Linear => Some("Linear"),
        ToneMapping::Reinhard => Some("Reinhard"),
        ToneMapping::Uncharted2 => Some("Uncharted2"),
        ToneMapping::Cineon => Some("OptimizedCineon"),
        ToneMapping::AcesFilmic => Some("ACESFilmic"),
    }
}

fn envmap_type(mapping: TextureMapping) -> &'static str {
    match mapping {
        TextureMapping::CubeReflection | TextureMapping::CubeRefraction => "ENVMAP_TYPE_CUBE",
        TextureMapping::CubeUvReflection | TextureMapping::CubeUvRefraction => "ENVMAP_TYPE_CUBE_UV",
        TextureMapping::EquirectangularReflection | TextureMapping::EquirectangularRefraction => {
            "ENVMAP_TYPE_EQUIREC"
        }
        TextureMapping::SphericalReflection => "ENVMAP_TYPE_SPHERE",
        TextureMapping::Uv => "ENVMAP_TYPE_CUBE",
    }
}

fn envmap_mode(mapping: TextureMapping) -> &'static str {
    match mapping {
        TextureMapping::CubeRefraction
        | TextureMapping::CubeUvRefraction
        | TextureMapping::EquirectangularRefraction => "ENVMAP_MODE_REFRACTION",
        _ => "ENVMAP_MODE_REFLECTION",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::BackendLimits;
    use crate::config::{Capabilities, RendererConfig};
    use crate::material::{BuiltinMaterial, TextureInfo};
    use crate::scene::{FogKind, LightCounts, SceneInputs};

    fn sources(material: &Material, scene: &SceneInputs, config: &RendererConfig) -> ProgramSources {
        let caps = Capabilities::from_limits(&BackendLimits::default());
        let params = ProgramParameters::build(material, scene, config, &caps);
        build_sources(material, &params)
    }

    #[test]
    fn prefix_starts_with_version_and_precision() {
        let s = sources(&Material::default(), &SceneInputs::default(), &RendererConfig::default());
        for stage in [&s.vertex, &s.fragment] {
            let mut lines = stage.lines();
            assert_eq!(lines.next(), Some(GLSL_VERSION));
            assert_eq!(lines.next(), Some("precision highp float;"));
            assert!(stage.contains("#define SHADER_NAME basic\n"));
        }
    }

    #[test]
    fn map_decoding_follows_resolved_encoding() {
        let mut m = Material::builtin(BuiltinMaterial::MeshBasic);
        m.maps.map = Some(TextureInfo::linear());
        let config = RendererConfig { gamma_input: true, ..RendererConfig::default() };
        let s = sources(&m, &SceneInputs::default(), &config);

        assert!(s.fragment.contains("#define USE_MAP\n"));
        assert!(s.fragment.contains(
            "vec4 mapTexelToLinear( vec4 value ) { return GammaToLinear( value, float( GAMMA_FACTOR ) ); }"
        ));
        assert!(s.fragment.contains("return LinearToLinear( value ); }"));
        assert!(!s.fragment.contains("matcapTexelToLinear"));
    }

    #[test]
    fn scene_counts_become_defines() {
        let scene = SceneInputs {
            lights: LightCounts { directional: 2, point: 3, ..LightCounts::default() },
            fog: FogKind::Exp2,
            clipping: crate::scene::ClippingCounts { planes: 4, intersection: 1 },
            ..SceneInputs::default()
        };
        let s = sources(&Material::default(), &scene, &RendererConfig::default());
        assert!(s.vertex.contains("#define NUM_DIR_LIGHTS 2\n"));
        assert!(s.vertex.contains("#define NUM_POINT_LIGHTS 3\n"));
        assert!(s.fragment.contains("#define FOG_EXP2\n"));
        assert!(s.fragment.contains("#define UNION_CLIPPING_PLANES 3\n"));
    }

    #[test]
    fn fog_needs_material_opt_in() {
        let scene = SceneInputs { fog: FogKind::Linear, ..SceneInputs::default() };
        let mut m = Material::default();
        m.fog = false;
        let s = sources(&m, &scene, &RendererConfig::default());
        assert!(!s.fragment.contains("#define USE_FOG\n"));

        m.fog = true;
        let s = sources(&m, &scene, &RendererConfig::default());
        assert!(s.fragment.contains("#define USE_FOG\n"));
    }

    #[test]
    fn tone_mapping_only_in_fragment() {
        let config = RendererConfig { tone_mapping: ToneMapping::AcesFilmic, ..RendererConfig::default() };
        let s = sources(&Material::default(), &SceneInputs::default(), &config);
        assert!(s.fragment.contains("return ACESFilmicToneMapping( color );"));
        assert!(!s.vertex.contains("TONE_MAPPING"));
    }

    #[test]
    fn user_shader_body_and_defines() {
        let m = Material::shader("void main() { gl_Position = vec4( 0.0 ); }", "out vec4 c; void main() { c = vec4( 1.0 ); }")
            .named("flat-white")
            .with_define("SCALE", "2.0");
        let s = sources(&m, &SceneInputs::default(), &RendererConfig::default());
        assert!(s.vertex.contains("#define SHADER_NAME flat-white\n"));
        assert!(s.fragment.contains("#define SCALE 2.0\n"));
        assert!(s.vertex.ends_with("void main() { gl_Position = vec4( 0.0 ); }\n"));
        assert!(s.fragment.ends_with("out vec4 c; void main() { c = vec4( 1.0 ); }\n"));
    }

    #[test]
    fn equal_snapshots_give_identical_sources() {
        let m = Material::builtin(BuiltinMaterial::MeshLambert);
        let a = sources(&m, &SceneInputs::default(), &RendererConfig::default());
        let b = sources(&m.clone().named("b"), &SceneInputs::default(), &RendererConfig::default());
        assert_eq!(a, b);
    }
}
