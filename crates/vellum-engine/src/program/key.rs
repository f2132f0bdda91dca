use std::fmt;

use crate::config::RendererConfig;
use crate::material::{Material, MaterialKind};

use super::{ProgramParameters, ShaderFamily};

/// Names of the tunable parameters, appended verbatim to every key.
///
/// Only the names are written, not the values: keys group programs by
/// structure, and the cache compares full snapshots to tell values apart.
pub const PARAMETER_NAMES: [&str; 55] = [
    "precision",
    "supportsVertexTextures",
    "additionalDetails",
    "mapEncoding",
    "matcap",
    "matcapEncoding",
    "envMap",
    "envMapMode",
    "envMapEncoding",
    "lightMap",
    "aoMap",
    "emissiveMap",
    "emissiveMapEncoding",
    "bumpMap",
    "normalMap",
    "objectSpaceNormalMap",
    "displacementMap",
    "specularMap",
    "roughnessMap",
    "metalnessMap",
    "gradientMap",
    "alphaMap",
    "combine",
    "vertexColors",
    "vertexTangents",
    "fog",
    "useFog",
    "fogExp",
    "flatShading",
    "sizeAttenuation",
    "logarithmicDepthBuffer",
    "skinning",
    "maxBones",
    "useVertexTexture",
    "morphTargets",
    "morphNormals",
    "maxMorphTargets",
    "maxMorphNormals",
    "premultipliedAlpha",
    "numDirLights",
    "numPointLights",
    "numSpotLights",
    "numHemiLights",
    "numRectAreaLights",
    "shadowMapEnabled",
    "shadowMapType",
    "toneMapping",
    "physicallyCorrectLights",
    "alphaTest",
    "doubleSided",
    "flipSided",
    "numClippingPlanes",
    "numClipIntersection",
    "depthPacking",
    "dithering",
];

/// Canonical program key.
///
/// Layout, comma-joined: the family id (or fragment then vertex source for
/// user shaders), each define's name and value in stored order, the
/// [`PARAMETER_NAMES`], then the renderer's gamma-output flag and gamma factor.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct ProgramKey(String);

impl ProgramKey {
    pub fn build(material: &Material, params: &ProgramParameters, config: &RendererConfig) -> Self {
        let gamma_output = if config.gamma_output { "true" } else { "false" };
        let gamma_factor = format!("{:?}", config.gamma_factor);

        let mut parts: Vec<&str> = Vec::with_capacity(PARAMETER_NAMES.len() + 2 * material.defines.len() + 4);

        match (params.family, &material.kind) {
            (Some(family), _) => parts.push(family.id()),
            (None, MaterialKind::Builtin(builtin)) => parts.push(ShaderFamily::of(*builtin).id()),
            (None, MaterialKind::Shader { vertex, fragment }) => {
                parts.push(fragment);
                parts.push(vertex);
            }
        }

        for (name, value) in &material.defines {
            parts.push(name);
            parts.push(value);
        }

        parts.extend_from_slice(&PARAMETER_NAMES);
        parts.push(gamma_output);
        parts.push(&gamma_factor);

        Self(parts.join(","))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ProgramKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
