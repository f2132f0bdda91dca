use std::collections::HashMap;

use crate::backend::{GraphicsBackend, TextureId, TextureTarget};

/// What the mirror believes is bound on one texture unit.
///
/// `texture == None` with a known target means the placeholder of that target is bound.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub struct BoundTexture {
    pub target: Option<TextureTarget>,
    pub texture: Option<TextureId>,
}

#[derive(Debug)]
pub(crate) struct TextureUnits {
    max_units: u32,
    active: Option<u32>,
    bound: HashMap<u32, BoundTexture>,
    placeholder_2d: TextureId,
    placeholder_cube: TextureId,
}

impl TextureUnits {
    pub(crate) fn new(max_units: u32, placeholder_2d: TextureId, placeholder_cube: TextureId) -> Self {
        Self {
            max_units,
            active: None,
            bound: HashMap::new(),
            placeholder_2d,
            placeholder_cube,
        }
    }

    /// Selects `unit`, or the last unit when `None`. Returns the selected unit.
    pub(crate) fn activate(&mut self, gl: &mut dyn GraphicsBackend, unit: Option<u32>) -> u32 {
        let unit = unit.unwrap_or(self.max_units.saturating_sub(1));
        assert!(
            unit < self.max_units,
            "texture unit {unit} out of range (max {})",
            self.max_units
        );

        if self.active != Some(unit) {
            gl.active_texture(unit);
            self.active = Some(unit);
        }
        unit
    }

    pub(crate) fn bind(&mut self, gl: &mut dyn GraphicsBackend, target: TextureTarget, texture: Option<TextureId>) {
        let unit = match self.active {
            Some(unit) => unit,
            None => self.activate(gl, None),
        };

        let slot = self.bound.entry(unit).or_default();
        if slot.target != Some(target) || slot.texture != texture {
            let placeholder = match target {
                TextureTarget::Texture2D => self.placeholder_2d,
                TextureTarget::CubeMap => self.placeholder_cube,
            };
            gl.bind_texture(target, texture.unwrap_or(placeholder));
            slot.target = Some(target);
            slot.texture = texture;
        }
    }

    #[inline]
    pub(crate) fn active(&self) -> Option<u32> {
        self.active
    }

    #[inline]
    pub(crate) fn bound(&self, unit: u32) -> Option<BoundTexture> {
        self.bound.get(&unit).copied()
    }

    pub(crate) fn placeholder(&self, target: TextureTarget) -> TextureId {
        match target {
            TextureTarget::Texture2D => self.placeholder_2d,
            TextureTarget::CubeMap => self.placeholder_cube,
        }
    }

    pub(crate) fn reset(&mut self) {
        self.active = None;
        self.bound.clear();
    }
}
