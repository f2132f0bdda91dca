use crate::backend::{BlendEquation, BlendFactor, Capability, GraphicsBackend};

use super::capabilities::CapabilitySet;

/// Blend mode. Every mode except `Custom` derives its factors from a fixed table.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum Blending {
    None,
    #[default]
    Normal,
    Additive,
    Subtractive,
    Multiply,
    Custom,
}

/// Full blend request.
///
/// The equation and factor fields are only read for [`Blending::Custom`]. Absent
/// alpha-channel values fall back to the color-channel value.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct BlendParams {
    pub mode: Blending,
    pub equation: BlendEquation,
    pub src: BlendFactor,
    pub dst: BlendFactor,
    pub equation_alpha: Option<BlendEquation>,
    pub src_alpha: Option<BlendFactor>,
    pub dst_alpha: Option<BlendFactor>,
    pub premultiplied_alpha: bool,
}

impl BlendParams {
    pub const NONE: Self = Self::mode(Blending::None);

    /// A non-custom mode with default custom fields.
    pub const fn mode(mode: Blending) -> Self {
        Self {
            mode,
            equation: BlendEquation::Add,
            src: BlendFactor::SrcAlpha,
            dst: BlendFactor::OneMinusSrcAlpha,
            equation_alpha: None,
            src_alpha: None,
            dst_alpha: None,
            premultiplied_alpha: false,
        }
    }

    #[inline]
    pub const fn normal() -> Self {
        Self::mode(Blending::Normal)
    }

    pub const fn custom(equation: BlendEquation, src: BlendFactor, dst: BlendFactor) -> Self {
        Self {
            mode: Blending::Custom,
            equation,
            src,
            dst,
            equation_alpha: None,
            src_alpha: None,
            dst_alpha: None,
            premultiplied_alpha: false,
        }
    }

    pub const fn premultiplied(mut self, premultiplied_alpha: bool) -> Self {
        self.premultiplied_alpha = premultiplied_alpha;
        self
    }

    /// Resolved `(color, alpha)` equations, or `None` when blending is off.
    pub fn equations(&self) -> Option<(BlendEquation, BlendEquation)> {
        match self.mode {
            Blending::None => None,
            Blending::Custom => Some((self.equation, self.equation_alpha.unwrap_or(self.equation))),
            _ => Some((BlendEquation::Add, BlendEquation::Add)),
        }
    }

    /// Resolved `[src_color, dst_color, src_alpha, dst_alpha]`, or `None` when blending is off.
    pub fn factors(&self) -> Option<[BlendFactor; 4]> {
        match self.mode {
            Blending::None => None,
            Blending::Custom => Some([
                self.src,
                self.dst,
                self.src_alpha.unwrap_or(self.src),
                self.dst_alpha.unwrap_or(self.dst),
            ]),
            mode => canonical_func(mode, self.premultiplied_alpha).map(CanonicalFunc::factors),
        }
    }
}

impl Default for BlendParams {
    fn default() -> Self {
        Self::normal()
    }
}

/// The call a canonical mode is realized with.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum CanonicalFunc {
    Single(BlendFactor, BlendFactor),
    Separate(BlendFactor, BlendFactor, BlendFactor, BlendFactor),
}

impl CanonicalFunc {
    fn factors(self) -> [BlendFactor; 4] {
        match self {
            CanonicalFunc::Single(s, d) => [s, d, s, d],
            CanonicalFunc::Separate(a, b, c, d) => [a, b, c, d],
        }
    }
}

fn canonical_func(mode: Blending, premultiplied_alpha: bool) -> Option<CanonicalFunc> {
    use BlendFactor::*;
    use CanonicalFunc::{Separate, Single};

    let func = match (mode, premultiplied_alpha) {
        (Blending::Normal, true) => Separate(One, OneMinusSrcAlpha, One, OneMinusSrcAlpha),
        (Blending::Additive, true) => Single(One, One),
        (Blending::Subtractive, true) => Separate(Zero, Zero, OneMinusSrcColor, OneMinusSrcAlpha),
        (Blending::Multiply, true) => Separate(Zero, SrcColor, Zero, SrcAlpha),
        (Blending::Normal, false) => Separate(SrcAlpha, OneMinusSrcAlpha, One, OneMinusSrcAlpha),
        (Blending::Additive, false) => Single(SrcAlpha, One),
        (Blending::Subtractive, false) => Single(Zero, OneMinusSrcColor),
        (Blending::Multiply, false) => Single(Zero, SrcColor),
        (Blending::None | Blending::Custom, _) => return None,
    };
    Some(func)
}

/// Mirrored blend equation/factor state.
#[derive(Debug, Default)]
pub(crate) struct BlendTracker {
    mode: Option<Blending>,
    premultiplied_alpha: Option<bool>,
    equation: Option<BlendEquation>,
    equation_alpha: Option<BlendEquation>,
    src: Option<BlendFactor>,
    dst: Option<BlendFactor>,
    src_alpha: Option<BlendFactor>,
    dst_alpha: Option<BlendFactor>,
}

impl BlendTracker {
    #[inline]
    pub(crate) fn mode(&self) -> Option<Blending> {
        self.mode
    }

    pub(crate) fn apply(
        &mut self,
        gl: &mut dyn GraphicsBackend,
        caps: &mut CapabilitySet,
        params: &BlendParams,
    ) {
        if params.mode == Blending::None {
            caps.disable(gl, Capability::Blend);
            return;
        }

        caps.enable(gl, Capability::Blend);

        if params.mode != Blending::Custom {
            self.apply_canonical(gl, params.mode, params.premultiplied_alpha);
            return;
        }

        let equation = params.equation;
        let equation_alpha = params.equation_alpha.unwrap_or(equation);
        let src_alpha = params.src_alpha.unwrap_or(params.src);
        let dst_alpha = params.dst_alpha.unwrap_or(params.dst);

        if self.equation != Some(equation) || self.equation_alpha != Some(equation_alpha) {
            gl.blend_equation_separate(equation, equation_alpha);
            self.equation = Some(equation);
            self.equation_alpha = Some(equation_alpha);
        }

        if self.src != Some(params.src)
            || self.dst != Some(params.dst)
            || self.src_alpha != Some(src_alpha)
            || self.dst_alpha != Some(dst_alpha)
        {
            gl.blend_func_separate(params.src, params.dst, src_alpha, dst_alpha);
            self.src = Some(params.src);
            self.dst = Some(params.dst);
            self.src_alpha = Some(src_alpha);
            self.dst_alpha = Some(dst_alpha);
        }

        self.mode = Some(Blending::Custom);
        self.premultiplied_alpha = None;
    }

    fn apply_canonical(&mut self, gl: &mut dyn GraphicsBackend, mode: Blending, premultiplied_alpha: bool) {
        if self.mode == Some(mode) && self.premultiplied_alpha == Some(premultiplied_alpha) {
            return;
        }

        if self.equation != Some(BlendEquation::Add) || self.equation_alpha != Some(BlendEquation::Add) {
            gl.blend_equation(BlendEquation::Add);
            self.equation = Some(BlendEquation::Add);
            self.equation_alpha = Some(BlendEquation::Add);
        }

        match canonical_func(mode, premultiplied_alpha) {
            Some(CanonicalFunc::Single(src, dst)) => gl.blend_func(src, dst),
            Some(CanonicalFunc::Separate(a, b, c, d)) => gl.blend_func_separate(a, b, c, d),
            None => {}
        }

        // Custom factors are now stale; force the next custom blend to re-issue.
        self.src = None;
        self.dst = None;
        self.src_alpha = None;
        self.dst_alpha = None;

        self.mode = Some(mode);
        self.premultiplied_alpha = Some(premultiplied_alpha);
    }

    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }
}
