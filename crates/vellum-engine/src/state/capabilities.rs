use crate::backend::{Capability, GraphicsBackend};

/// Mirrored enable/disable flags, `None` while unknown.
#[derive(Debug, Default)]
pub(crate) struct CapabilitySet {
    enabled: [Option<bool>; Capability::COUNT],
}

impl CapabilitySet {
    pub(crate) fn enable(&mut self, gl: &mut dyn GraphicsBackend, cap: Capability) {
        let slot = &mut self.enabled[cap.index()];
        if *slot != Some(true) {
            gl.enable(cap);
            *slot = Some(true);
        }
    }

    pub(crate) fn disable(&mut self, gl: &mut dyn GraphicsBackend, cap: Capability) {
        let slot = &mut self.enabled[cap.index()];
        if *slot != Some(false) {
            gl.disable(cap);
            *slot = Some(false);
        }
    }

    #[inline]
    pub(crate) fn set(&mut self, gl: &mut dyn GraphicsBackend, cap: Capability, enabled: bool) {
        if enabled {
            self.enable(gl, cap);
        } else {
            self.disable(gl, cap);
        }
    }

    #[inline]
    pub(crate) fn get(&self, cap: Capability) -> Option<bool> {
        self.enabled[cap.index()]
    }

    pub(crate) fn reset(&mut self) {
        self.enabled = [None; Capability::COUNT];
    }
}
