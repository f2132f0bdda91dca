//! Material contract expressed as wgpu pipeline pieces.
//!
//! wgpu bakes blend, depth and rasterizer state into render pipelines, so a
//! wgpu renderer builds these once per pipeline variant instead of driving a
//! [`crate::state::StateMirror`].

use crate::backend::{BlendEquation, BlendFactor, CompareFunc};
use crate::material::{Material, Side};
use crate::state::BlendParams;

/// Everything a material decides about a wgpu pipeline.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PipelineState {
    pub blend: Option<wgpu::BlendState>,
    pub front_face: wgpu::FrontFace,
    pub cull_mode: Option<wgpu::Face>,
    pub depth_compare: wgpu::CompareFunction,
    pub depth_write_enabled: bool,
    pub depth_bias: wgpu::DepthBiasState,
    pub color_writes: wgpu::ColorWrites,
}

impl PipelineState {
    pub fn from_material(material: &Material, front_face_cw: bool) -> Self {
        let flip_sided = (material.side == Side::Back) ^ front_face_cw;
        let blend = if material.blends_opaque() { BlendParams::NONE } else { material.blend };

        Self {
            blend: blend_state(&blend),
            front_face: if flip_sided { wgpu::FrontFace::Cw } else { wgpu::FrontFace::Ccw },
            cull_mode: match material.side {
                Side::Double => None,
                Side::Front | Side::Back => Some(wgpu::Face::Back),
            },
            depth_compare: if material.depth_test {
                compare_function(material.depth_func)
            } else {
                wgpu::CompareFunction::Always
            },
            // Without a depth test nothing is written either.
            depth_write_enabled: material.depth_test && material.depth_write,
            depth_bias: depth_bias(material),
            color_writes: if material.color_write {
                wgpu::ColorWrites::ALL
            } else {
                wgpu::ColorWrites::empty()
            },
        }
    }
}

/// `None` when blending is off.
pub fn blend_state(params: &BlendParams) -> Option<wgpu::BlendState> {
    let (eq_color, eq_alpha) = params.equations()?;
    let [src, dst, src_alpha, dst_alpha] = params.factors()?;
    Some(wgpu::BlendState {
        color: blend_component(eq_color, src, dst),
        alpha: blend_component(eq_alpha, src_alpha, dst_alpha),
    })
}

fn blend_component(equation: BlendEquation, src: BlendFactor, dst: BlendFactor) -> wgpu::BlendComponent {
    let operation = blend_operation(equation);
    // wgpu rejects Min/Max with factors other than One; GL ignores them.
    let (src_factor, dst_factor) = match operation {
        wgpu::BlendOperation::Min | wgpu::BlendOperation::Max => {
            (wgpu::BlendFactor::One, wgpu::BlendFactor::One)
        }
        _ => (blend_factor(src), blend_factor(dst)),
    };
    wgpu::BlendComponent { src_factor, dst_factor, operation }
}

pub fn blend_operation(equation: BlendEquation) -> wgpu::BlendOperation {
    match equation {
        BlendEquation::Add => wgpu::BlendOperation::Add,
        BlendEquation::Subtract => wgpu::BlendOperation::Subtract,
        BlendEquation::ReverseSubtract => wgpu::BlendOperation::ReverseSubtract,
        BlendEquation::Min => wgpu::BlendOperation::Min,
        BlendEquation::Max => wgpu::BlendOperation::Max,
    }
}

pub fn blend_factor(factor: BlendFactor) -> wgpu::BlendFactor {
    match factor {
        BlendFactor::Zero => wgpu::BlendFactor::Zero,
        BlendFactor::One => wgpu::BlendFactor::One,
        BlendFactor::SrcColor => wgpu::BlendFactor::Src,
        BlendFactor::OneMinusSrcColor => wgpu::BlendFactor::OneMinusSrc,
        BlendFactor::SrcAlpha => wgpu::BlendFactor::SrcAlpha,
        BlendFactor::OneMinusSrcAlpha => wgpu::BlendFactor::OneMinusSrcAlpha,
        BlendFactor::DstAlpha => wgpu::BlendFactor::DstAlpha,
        BlendFactor::OneMinusDstAlpha => wgpu::BlendFactor::OneMinusDstAlpha,
        BlendFactor::DstColor => wgpu::BlendFactor::Dst,
        BlendFactor::OneMinusDstColor => wgpu::BlendFactor::OneMinusDst,
        BlendFactor::SrcAlphaSaturate => wgpu::BlendFactor::SrcAlphaSaturated,
    }
}

pub fn compare_function(func: CompareFunc) -> wgpu::CompareFunction {
    match func {
        CompareFunc::Never => wgpu::CompareFunction::Never,
        CompareFunc::Always => wgpu::CompareFunction::Always,
        CompareFunc::Less => wgpu::CompareFunction::Less,
        CompareFunc::LessEqual => wgpu::CompareFunction::LessEqual,
        CompareFunc::Equal => wgpu::CompareFunction::Equal,
        CompareFunc::GreaterEqual => wgpu::CompareFunction::GreaterEqual,
        CompareFunc::Greater => wgpu::CompareFunction::Greater,
        CompareFunc::NotEqual => wgpu::CompareFunction::NotEqual,
    }
}

fn depth_bias(material: &Material) -> wgpu::DepthBiasState {
    if !material.polygon_offset {
        return wgpu::DepthBiasState::default();
    }
    wgpu::DepthBiasState {
        constant: material.polygon_offset_units.round() as i32,
        slope_scale: material.polygon_offset_factor,
        clamp: 0.0,
    }
}
