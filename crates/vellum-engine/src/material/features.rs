use bitflags::bitflags;

bitflags! {
    /// Optional vertex-stage capabilities a material opts into.
    ///
    /// Only some material kinds can use each flag; the key builder checks the
    /// flag rather than the material kind.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MaterialFeatures: u8 {
        const SKINNING = 1 << 0;
        const MORPH_TARGETS = 1 << 1;
        const MORPH_NORMALS = 1 << 2;
        /// Point size shrinks with distance (points and sprites).
        const SIZE_ATTENUATION = 1 << 3;
    }
}
