use super::LightCounts;

/// Scene fog, reduced to the only property that shapes shader source.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum FogKind {
    #[default]
    None,
    Linear,
    Exp2,
}

/// Active user clipping planes.
///
/// `intersection` counts the planes combined with intersection semantics;
/// it never exceeds `planes`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct ClippingCounts {
    pub planes: u32,
    pub intersection: u32,
}

/// Per-object flags of the draw target.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub struct DrawObject {
    pub receive_shadow: bool,
}

/// Read-only snapshot of everything outside the material that feeds a program key.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct SceneInputs {
    pub lights: LightCounts,
    /// Number of shadow-casting lights this frame.
    pub shadow_casters: usize,
    pub fog: FogKind,
    pub clipping: ClippingCounts,
    pub object: DrawObject,
}
