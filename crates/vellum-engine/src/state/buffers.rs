//! Color, depth and stencil buffer state.
//!
//! Each tracker carries a `locked` flag. While locked, mask requests are
//! accepted and dropped, so an operation that needs fixed masks (e.g. clearing
//! several targets) is not disturbed by unrelated material state.

use crate::backend::{Capability, CompareFunc, GraphicsBackend, StencilOp};
use crate::coords::ColorRgba;

use super::capabilities::CapabilitySet;

#[derive(Debug, Default)]
pub(crate) struct ColorBuffer {
    pub(crate) locked: bool,
    mask: Option<bool>,
    clear: Option<ColorRgba>,
}

impl ColorBuffer {
    pub(crate) fn set_mask(&mut self, gl: &mut dyn GraphicsBackend, write: bool) {
        if self.mask != Some(write) && !self.locked {
            gl.color_mask(write);
            self.mask = Some(write);
        }
    }

    pub(crate) fn set_clear(&mut self, gl: &mut dyn GraphicsBackend, color: ColorRgba, premultiplied_alpha: bool) {
        let color = if premultiplied_alpha { color.premultiplied() } else { color };
        if self.clear != Some(color) {
            gl.clear_color(color);
            self.clear = Some(color);
        }
    }

    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Default)]
pub(crate) struct DepthBuffer {
    pub(crate) locked: bool,
    mask: Option<bool>,
    func: Option<CompareFunc>,
    clear: Option<f64>,
}

impl DepthBuffer {
    pub(crate) fn set_test(&self, gl: &mut dyn GraphicsBackend, caps: &mut CapabilitySet, enabled: bool) {
        caps.set(gl, Capability::DepthTest, enabled);
    }

    pub(crate) fn set_mask(&mut self, gl: &mut dyn GraphicsBackend, write: bool) {
        if self.mask != Some(write) && !self.locked {
            gl.depth_mask(write);
            self.mask = Some(write);
        }
    }

    pub(crate) fn set_func(&mut self, gl: &mut dyn GraphicsBackend, func: CompareFunc) {
        if self.func != Some(func) {
            gl.depth_func(func);
            self.func = Some(func);
        }
    }

    pub(crate) fn set_clear(&mut self, gl: &mut dyn GraphicsBackend, depth: f64) {
        if self.clear != Some(depth) {
            gl.clear_depth(depth);
            self.clear = Some(depth);
        }
    }

    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Default)]
pub(crate) struct StencilBuffer {
    pub(crate) locked: bool,
    mask: Option<u32>,
    func: Option<(CompareFunc, i32, u32)>,
    op: Option<(StencilOp, StencilOp, StencilOp)>,
    clear: Option<i32>,
}

impl StencilBuffer {
    pub(crate) fn set_test(&self, gl: &mut dyn GraphicsBackend, caps: &mut CapabilitySet, enabled: bool) {
        caps.set(gl, Capability::StencilTest, enabled);
    }

    pub(crate) fn set_mask(&mut self, gl: &mut dyn GraphicsBackend, mask: u32) {
        if self.mask != Some(mask) && !self.locked {
            gl.stencil_mask(mask);
            self.mask = Some(mask);
        }
    }

    pub(crate) fn set_func(&mut self, gl: &mut dyn GraphicsBackend, func: CompareFunc, reference: i32, mask: u32) {
        let value = (func, reference, mask);
        if self.func != Some(value) {
            gl.stencil_func(func, reference, mask);
            self.func = Some(value);
        }
    }

    pub(crate) fn set_op(&mut self, gl: &mut dyn GraphicsBackend, fail: StencilOp, depth_fail: StencilOp, pass: StencilOp) {
        let value = (fail, depth_fail, pass);
        if self.op != Some(value) {
            gl.stencil_op(fail, depth_fail, pass);
            self.op = Some(value);
        }
    }

    pub(crate) fn set_clear(&mut self, gl: &mut dyn GraphicsBackend, value: i32) {
        if self.clear != Some(value) {
            gl.clear_stencil(value);
            self.clear = Some(value);
        }
    }

    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }
}
