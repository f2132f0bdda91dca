/// Integer rectangle in framebuffer pixels (bottom-left origin, GL convention).
///
/// Used for viewport and scissor state. Callers working in fractional
/// coordinates round through [`PixelRect::from_f32`].
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl PixelRect {
    #[inline]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// Rounds each component to the nearest pixel.
    #[inline]
    pub fn from_f32(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x: x.round() as i32,
            y: y.round() as i32,
            width: width.round() as i32,
            height: height.round() as i32,
        }
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_f32_rounds_to_nearest() {
        assert_eq!(PixelRect::from_f32(0.4, 0.6, 99.5, 10.49), PixelRect::new(0, 1, 100, 10));
    }

    #[test]
    fn zero_area_is_empty() {
        assert!(PixelRect::new(0, 0, 0, 10).is_empty());
        assert!(!PixelRect::new(0, 0, 1, 1).is_empty());
    }
}
