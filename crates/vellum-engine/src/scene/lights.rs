/// Number of active lights per type for the current draw.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct LightCounts {
    pub directional: u32,
    pub point: u32,
    pub spot: u32,
    pub rect_area: u32,
    pub hemi: u32,
}

impl LightCounts {
    #[inline]
    pub fn total(&self) -> u32 {
        self.directional + self.point + self.spot + self.rect_area + self.hemi
    }
}
