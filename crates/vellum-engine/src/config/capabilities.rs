use crate::backend::BackendLimits;

use super::Precision;

/// What the current context supports, captured once at renderer init.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Capabilities {
    pub max_vertex_attributes: u32,
    pub max_texture_units: u32,
    pub precision: Precision,
    pub vertex_textures: bool,
    pub float_vertex_textures: bool,
    pub line_width_available: bool,
}

impl Capabilities {
    pub fn from_limits(limits: &BackendLimits) -> Self {
        let vertex_textures = limits.max_vertex_texture_units > 0;
        Self {
            max_vertex_attributes: limits.max_vertex_attributes,
            max_texture_units: limits.max_texture_units,
            precision: limits.max_precision,
            vertex_textures,
            float_vertex_textures: vertex_textures && limits.float_textures,
            line_width_available: limits.line_width_available,
        }
    }

    /// Clamps a requested precision to what the context supports.
    #[inline]
    pub fn max_precision(&self, requested: Precision) -> Precision {
        requested.min(self.precision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precision_is_clamped_to_support() {
        let caps = Capabilities::from_limits(&BackendLimits {
            max_precision: Precision::Medium,
            ..BackendLimits::default()
        });
        assert_eq!(caps.max_precision(Precision::High), Precision::Medium);
        assert_eq!(caps.max_precision(Precision::Low), Precision::Low);
    }

    #[test]
    fn float_vertex_textures_need_vertex_texture_units() {
        let caps = Capabilities::from_limits(&BackendLimits {
            max_vertex_texture_units: 0,
            ..BackendLimits::default()
        });
        assert!(!caps.vertex_textures);
        assert!(!caps.float_vertex_textures);
    }
}
