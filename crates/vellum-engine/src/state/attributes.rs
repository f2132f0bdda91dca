use crate::backend::GraphicsBackend;

/// Vertex attribute enable flags and instancing divisors.
///
/// A draw pass starts with [`VertexAttributes::begin_pass`], enables what it
/// needs, then calls [`VertexAttributes::disable_unused`] to turn off whatever
/// the previous pass left enabled.
#[derive(Debug)]
pub(crate) struct VertexAttributes {
    requested: Vec<bool>,
    enabled: Vec<bool>,
    divisors: Vec<Option<u32>>,
}

impl VertexAttributes {
    pub(crate) fn new(max_attributes: u32) -> Self {
        let n = max_attributes as usize;
        Self {
            requested: vec![false; n],
            enabled: vec![false; n],
            divisors: vec![None; n],
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.enabled.len()
    }

    pub(crate) fn begin_pass(&mut self) {
        self.requested.fill(false);
    }

    pub(crate) fn enable(&mut self, gl: &mut dyn GraphicsBackend, index: u32, divisor: u32) {
        let i = index as usize;
        assert!(
            i < self.len(),
            "vertex attribute {index} out of range (max {})",
            self.len()
        );

        self.requested[i] = true;

        if !self.enabled[i] {
            gl.enable_vertex_attrib(index);
            self.enabled[i] = true;
        }

        if self.divisors[i] != Some(divisor) {
            gl.vertex_attrib_divisor(index, divisor);
            self.divisors[i] = Some(divisor);
        }
    }

    pub(crate) fn disable_unused(&mut self, gl: &mut dyn GraphicsBackend) {
        for (i, (enabled, requested)) in self.enabled.iter_mut().zip(&self.requested).enumerate() {
            if *enabled && !*requested {
                gl.disable_vertex_attrib(i as u32);
                *enabled = false;
            }
        }
    }

    #[inline]
    pub(crate) fn is_enabled(&self, index: u32) -> bool {
        self.enabled.get(index as usize).copied().unwrap_or(false)
    }

    /// Disables every attribute believed enabled and forgets divisors.
    pub(crate) fn reset(&mut self, gl: &mut dyn GraphicsBackend) {
        for (i, enabled) in self.enabled.iter_mut().enumerate() {
            if *enabled {
                gl.disable_vertex_attrib(i as u32);
                *enabled = false;
            }
        }
        self.requested.fill(false);
        self.divisors.fill(None);
    }
}
