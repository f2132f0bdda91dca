use crate::material::{BuiltinMaterial, MaterialKind};

/// Builtin shader family. Several material kinds may share one family.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ShaderFamily {
    Depth,
    DistanceRgba,
    Normal,
    Basic,
    Lambert,
    Phong,
    Physical,
    Matcap,
    Dashed,
    Points,
    Shadow,
    Sprite,
}

impl ShaderFamily {
    pub const fn of(material: BuiltinMaterial) -> Self {
        match material {
            BuiltinMaterial::MeshDepth => ShaderFamily::Depth,
            BuiltinMaterial::MeshDistance => ShaderFamily::DistanceRgba,
            BuiltinMaterial::MeshNormal => ShaderFamily::Normal,
            BuiltinMaterial::MeshBasic | BuiltinMaterial::LineBasic => ShaderFamily::Basic,
            BuiltinMaterial::MeshLambert => ShaderFamily::Lambert,
            BuiltinMaterial::MeshPhong | BuiltinMaterial::MeshToon => ShaderFamily::Phong,
            BuiltinMaterial::MeshStandard | BuiltinMaterial::MeshPhysical => ShaderFamily::Physical,
            BuiltinMaterial::MeshMatcap => ShaderFamily::Matcap,
            BuiltinMaterial::LineDashed => ShaderFamily::Dashed,
            BuiltinMaterial::Points => ShaderFamily::Points,
            BuiltinMaterial::Shadow => ShaderFamily::Shadow,
            BuiltinMaterial::Sprite => ShaderFamily::Sprite,
        }
    }

    /// Family of a material kind; `None` for user shaders.
    #[inline]
    pub fn for_kind(kind: &MaterialKind) -> Option<Self> {
        match kind {
            MaterialKind::Builtin(b) => Some(Self::of(*b)),
            MaterialKind::Shader { .. } => None,
        }
    }

    /// Short id written into program keys and `SHADER_NAME`.
    pub const fn id(self) -> &'static str {
        match self {
            ShaderFamily::Depth => "depth",
            ShaderFamily::DistanceRgba => "distanceRGBA",
            ShaderFamily::Normal => "normal",
            ShaderFamily::Basic => "basic",
            ShaderFamily::Lambert => "lambert",
            ShaderFamily::Phong => "phong",
            ShaderFamily::Physical => "physical",
            ShaderFamily::Matcap => "matcap",
            ShaderFamily::Dashed => "dashed",
            ShaderFamily::Points => "points",
            ShaderFamily::Shadow => "shadow",
            ShaderFamily::Sprite => "sprite",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shared_families() {
        assert_eq!(ShaderFamily::of(BuiltinMaterial::MeshToon), ShaderFamily::Phong);
        assert_eq!(ShaderFamily::of(BuiltinMaterial::MeshStandard), ShaderFamily::Physical);
        assert_eq!(ShaderFamily::of(BuiltinMaterial::LineBasic).id(), "basic");
        assert_eq!(ShaderFamily::of(BuiltinMaterial::MeshDistance).id(), "distanceRGBA");
    }

    #[test]
    fn user_shaders_have_no_family() {
        let kind = MaterialKind::Shader {
            vertex: "void main() {}".into(),
            fragment: "void main() {}".into(),
        };
        assert_eq!(ShaderFamily::for_kind(&kind), None);
    }
}
