use crate::config::{Capabilities, Precision, RendererConfig, ShadowMapType, ToneMapping};
use crate::material::{
    Combine, DepthPacking, Material, MaterialFeatures, NormalMapType, Side, TextureEncoding,
    TextureInfo, TextureMapping,
};
use crate::scene::{ClippingCounts, FogKind, LightCounts, SceneInputs};

use super::ShaderFamily;

/// Renderer, scene and material inputs that shape generated shader source.
///
/// Built fresh per draw and never mutated. Custom shader bodies and user defines
/// are carried by the [`super::ProgramKey`] rather than here, so a program is
/// identified by its (key, snapshot) pair, not by the snapshot alone. The
/// `SHADER_NAME` line is diagnostic and comes from whichever material compiled
/// the program first.
///
/// Texture slots that only matter by presence are `bool`; slots whose encoding
/// shapes the source carry `Option<TextureEncoding>` (`None` = slot unused).
#[derive(Debug, Clone, PartialEq)]
pub struct ProgramParameters {
    pub family: Option<ShaderFamily>,

    pub precision: Precision,
    pub supports_vertex_textures: bool,
    pub output_encoding: TextureEncoding,
    pub gamma_factor: f32,

    pub map_encoding: Option<TextureEncoding>,
    pub matcap_encoding: Option<TextureEncoding>,
    pub env_map_encoding: Option<TextureEncoding>,
    pub env_map_mode: Option<TextureMapping>,
    pub env_map_cube_uv: bool,
    pub emissive_map_encoding: Option<TextureEncoding>,

    pub light_map: bool,
    pub ao_map: bool,
    pub bump_map: bool,
    pub normal_map: bool,
    pub object_space_normal_map: bool,
    pub displacement_map: bool,
    pub specular_map: bool,
    pub roughness_map: bool,
    pub metalness_map: bool,
    pub alpha_map: bool,
    pub gradient_map: bool,

    pub combine: Combine,
    pub vertex_colors: bool,
    pub vertex_tangents: bool,

    /// Scene has fog.
    pub fog: bool,
    /// Material opts into fog.
    pub use_fog: bool,
    pub fog_exp: bool,

    pub flat_shading: bool,
    pub size_attenuation: bool,
    pub logarithmic_depth_buffer: bool,

    pub skinning: bool,
    pub max_bones: u32,
    pub use_vertex_texture: bool,

    pub morph_targets: bool,
    pub morph_normals: bool,
    pub max_morph_targets: u32,
    pub max_morph_normals: u32,

    pub premultiplied_alpha: bool,

    pub lights: LightCounts,

    pub shadow_map_enabled: bool,
    pub shadow_map_type: ShadowMapType,

    pub tone_mapping: ToneMapping,
    pub physically_correct_lights: bool,

    pub alpha_test: f32,
    pub double_sided: bool,
    pub flip_sided: bool,

    pub clipping: ClippingCounts,

    pub depth_packing: Option<DepthPacking>,
    pub dithering: bool,
}

/// Encoding a present texture is sampled with.
///
/// Linear textures are promoted to gamma when the matching gamma override is set.
#[inline]
pub fn resolve_encoding(texture: Option<&TextureInfo>, gamma_override: bool) -> Option<TextureEncoding> {
    texture.map(|t| promote(t.encoding, gamma_override))
}

#[inline]
fn promote(encoding: TextureEncoding, gamma_override: bool) -> TextureEncoding {
    if encoding == TextureEncoding::Linear && gamma_override {
        TextureEncoding::Gamma
    } else {
        encoding
    }
}

impl ProgramParameters {
    /// Snapshots `material` against the current scene, renderer flags and context support.
    ///
    /// # Panics
    /// Panics if `material.alpha_test` or `config.gamma_factor` is not finite; a
    /// NaN snapshot never compares equal to itself and could not be cached.
    pub fn build(
        material: &Material,
        scene: &SceneInputs,
        config: &RendererConfig,
        caps: &Capabilities,
    ) -> Self {
        assert!(
            material.alpha_test.is_finite(),
            "material '{}' has non-finite alpha test {}",
            material.name,
            material.alpha_test
        );
        assert!(config.gamma_factor.is_finite(), "non-finite gamma factor {}", config.gamma_factor);

        let family = ShaderFamily::for_kind(&material.kind);
        let maps = &material.maps;

        let precision = material.precision.map_or(caps.precision, |p| caps.max_precision(p));

        // The default framebuffer counts as a linear target.
        let output_encoding = promote(
            config.output_encoding.unwrap_or(TextureEncoding::Linear),
            config.gamma_output,
        );

        let env_map_mode = maps.env_map.map(|t| t.mapping);
        let normal_map = maps.normal_map.is_some();
        let fog = scene.fog != FogKind::None;

        Self {
            family,
            precision,
            supports_vertex_textures: caps.vertex_textures,
            output_encoding,
            gamma_factor: config.gamma_factor,

            map_encoding: resolve_encoding(maps.map.as_ref(), config.gamma_input),
            matcap_encoding: resolve_encoding(maps.matcap.as_ref(), config.gamma_input),
            env_map_encoding: resolve_encoding(maps.env_map.as_ref(), config.gamma_input),
            env_map_mode,
            env_map_cube_uv: env_map_mode.is_some_and(TextureMapping::is_cube_uv),
            emissive_map_encoding: resolve_encoding(maps.emissive_map.as_ref(), config.gamma_input),

            light_map: maps.light_map.is_some(),
            ao_map: maps.ao_map.is_some(),
            bump_map: maps.bump_map.is_some(),
            normal_map,
            object_space_normal_map: material.normal_map_type == NormalMapType::ObjectSpace,
            displacement_map: maps.displacement_map.is_some(),
            specular_map: maps.specular_map.is_some(),
            roughness_map: maps.roughness_map.is_some(),
            metalness_map: maps.metalness_map.is_some(),
            alpha_map: maps.alpha_map.is_some(),
            gradient_map: maps.gradient_map.is_some(),

            combine: material.combine,
            vertex_colors: material.vertex_colors,
            vertex_tangents: normal_map && material.vertex_tangents,

            fog,
            use_fog: material.fog,
            fog_exp: scene.fog == FogKind::Exp2,

            flat_shading: material.flat_shading,
            size_attenuation: material.has_feature(MaterialFeatures::SIZE_ATTENUATION),
            logarithmic_depth_buffer: config.logarithmic_depth_buffer,

            skinning: material.has_feature(MaterialFeatures::SKINNING) && config.max_bones > 0,
            max_bones: config.max_bones,
            use_vertex_texture: caps.float_vertex_textures,

            morph_targets: material.has_feature(MaterialFeatures::MORPH_TARGETS),
            morph_normals: material.has_feature(MaterialFeatures::MORPH_NORMALS),
            max_morph_targets: config.max_morph_targets,
            max_morph_normals: config.max_morph_normals,

            premultiplied_alpha: material.blend.premultiplied_alpha,

            lights: scene.lights,

            shadow_map_enabled: config.shadow_map.enabled
                && scene.object.receive_shadow
                && scene.shadow_casters > 0,
            shadow_map_type: config.shadow_map.kind,

            tone_mapping: config.tone_mapping,
            physically_correct_lights: config.physically_correct_lights,

            alpha_test: material.alpha_test,
            double_sided: material.side == Side::Double,
            flip_sided: material.side == Side::Back,

            clipping: scene.clipping,

            depth_packing: match family {
                Some(ShaderFamily::Depth) => material.depth_packing,
                _ => None,
            },
            dithering: material.dithering,
        }
    }

    #[inline]
    pub fn has_map(&self) -> bool {
        self.map_encoding.is_some()
    }

    #[inline]
    pub fn has_env_map(&self) -> bool {
        self.env_map_encoding.is_some()
    }

    /// Clipping planes combined with union semantics.
    #[inline]
    pub fn union_clipping_planes(&self) -> u32 {
        self.clipping.planes.saturating_sub(self.clipping.intersection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::BackendLimits;
    use crate::config::ShadowMapConfig;
    use crate::material::BuiltinMaterial;
    use crate::scene::DrawObject;

    fn caps() -> Capabilities {
        Capabilities::from_limits(&BackendLimits::default())
    }

    fn build(material: &Material, scene: &SceneInputs, config: &RendererConfig) -> ProgramParameters {
        ProgramParameters::build(material, scene, config, &caps())
    }

    #[test]
    fn absent_texture_has_no_encoding() {
        let config = RendererConfig { gamma_input: true, ..RendererConfig::default() };
        let p = build(&Material::default(), &SceneInputs::default(), &config);
        assert_eq!(p.map_encoding, None);
        assert!(!p.has_map());
    }

    #[test]
    fn linear_input_promoted_to_gamma() {
        let mut m = Material::default();
        m.maps.map = Some(TextureInfo::linear());
        m.maps.emissive_map = Some(TextureInfo::new(TextureEncoding::Srgb, TextureMapping::Uv));

        let plain = build(&m, &SceneInputs::default(), &RendererConfig::default());
        assert_eq!(plain.map_encoding, Some(TextureEncoding::Linear));

        let config = RendererConfig { gamma_input: true, ..RendererConfig::default() };
        let gamma = build(&m, &SceneInputs::default(), &config);
        assert_eq!(gamma.map_encoding, Some(TextureEncoding::Gamma));
        assert_eq!(gamma.emissive_map_encoding, Some(TextureEncoding::Srgb));
        // Input gamma never touches the output.
        assert_eq!(gamma.output_encoding, TextureEncoding::Linear);
    }

    #[test]
    fn output_uses_output_gamma_flag() {
        let config = RendererConfig { gamma_output: true, ..RendererConfig::default() };
        let p = build(&Material::default(), &SceneInputs::default(), &config);
        assert_eq!(p.output_encoding, TextureEncoding::Gamma);

        let config = RendererConfig {
            gamma_output: true,
            output_encoding: Some(TextureEncoding::Srgb),
            ..RendererConfig::default()
        };
        let p = build(&Material::default(), &SceneInputs::default(), &config);
        assert_eq!(p.output_encoding, TextureEncoding::Srgb);
    }

    #[test]
    fn shadows_need_config_receiver_and_casters() {
        let config = RendererConfig {
            shadow_map: ShadowMapConfig { enabled: true, kind: ShadowMapType::PcfSoft },
            ..RendererConfig::default()
        };
        let mut scene = SceneInputs {
            shadow_casters: 1,
            object: DrawObject { receive_shadow: true },
            ..SceneInputs::default()
        };
        let m = Material::default();
        assert!(build(&m, &scene, &config).shadow_map_enabled);

        scene.shadow_casters = 0;
        assert!(!build(&m, &scene, &config).shadow_map_enabled);

        scene.shadow_casters = 2;
        scene.object.receive_shadow = false;
        assert!(!build(&m, &scene, &config).shadow_map_enabled);

        scene.object.receive_shadow = true;
        assert!(!build(&m, &scene, &RendererConfig::default()).shadow_map_enabled);
    }

    #[test]
    fn skinning_requires_bone_budget() {
        let mut m = Material::default();
        m.features |= MaterialFeatures::SKINNING;
        assert!(!build(&m, &SceneInputs::default(), &RendererConfig::default()).skinning);

        let config = RendererConfig { max_bones: 64, ..RendererConfig::default() };
        let p = build(&m, &SceneInputs::default(), &config);
        assert!(p.skinning);
        assert_eq!(p.max_bones, 64);
    }

    #[test]
    fn tangents_only_with_normal_map() {
        let mut m = Material::default();
        m.vertex_tangents = true;
        assert!(!build(&m, &SceneInputs::default(), &RendererConfig::default()).vertex_tangents);
        m.maps.normal_map = Some(TextureInfo::linear());
        assert!(build(&m, &SceneInputs::default(), &RendererConfig::default()).vertex_tangents);
    }

    #[test]
    fn fog_kind_and_sides() {
        let scene = SceneInputs { fog: FogKind::Exp2, ..SceneInputs::default() };
        let mut m = Material::default();
        m.side = Side::Back;
        let p = build(&m, &scene, &RendererConfig::default());
        assert!(p.fog && p.fog_exp && p.use_fog);
        assert!(p.flip_sided && !p.double_sided);
    }

    #[test]
    fn depth_packing_only_for_depth_family() {
        let mut m = Material::builtin(BuiltinMaterial::MeshDepth);
        m.depth_packing = Some(DepthPacking::Rgba);
        assert_eq!(
            build(&m, &SceneInputs::default(), &RendererConfig::default()).depth_packing,
            Some(DepthPacking::Rgba)
        );

        m.kind = crate::material::MaterialKind::Builtin(BuiltinMaterial::MeshBasic);
        assert_eq!(build(&m, &SceneInputs::default(), &RendererConfig::default()).depth_packing, None);
    }

    #[test]
    fn precision_is_clamped() {
        let caps = Capabilities::from_limits(&BackendLimits {
            max_precision: Precision::Medium,
            ..BackendLimits::default()
        });
        let mut m = Material::default();
        m.precision = Some(Precision::High);
        let p = ProgramParameters::build(&m, &SceneInputs::default(), &RendererConfig::default(), &caps);
        assert_eq!(p.precision, Precision::Medium);

        m.precision = None;
        let p = ProgramParameters::build(&m, &SceneInputs::default(), &RendererConfig::default(), &caps);
        assert_eq!(p.precision, Precision::Medium);
    }

    #[test]
    fn equal_inputs_give_equal_snapshots() {
        let m = Material::builtin(BuiltinMaterial::MeshPhong);
        let scene = SceneInputs {
            lights: LightCounts { directional: 2, point: 1, ..LightCounts::default() },
            ..SceneInputs::default()
        };
        let a = build(&m, &scene, &RendererConfig::default());
        let b = build(&m.clone().named("other"), &scene, &RendererConfig::default());
        assert_eq!(a, b);
    }

    #[test]
    #[should_panic(expected = "non-finite alpha test")]
    fn nan_alpha_test_is_rejected() {
        let mut m = Material::default();
        m.alpha_test = f32::NAN;
        build(&m, &SceneInputs::default(), &RendererConfig::default());
    }

    #[test]
    #[should_panic(expected = "non-finite gamma factor")]
    fn infinite_gamma_factor_is_rejected() {
        let config = RendererConfig { gamma_factor: f32::INFINITY, ..RendererConfig::default() };
        build(&Material::default(), &SceneInputs::default(), &config);
    }
}
