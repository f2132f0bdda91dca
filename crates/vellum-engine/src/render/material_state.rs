use crate::backend::{Capability, GraphicsBackend};
use crate::material::{Material, Side};
use crate::state::{BlendParams, StateMirror};

/// Converges the mirrored pipeline state to what `material` needs for a draw.
///
/// `front_face_cw` reports whether the current transform flips winding to
/// clockwise (e.g. a negatively scaled object).
pub fn apply_material_state<B: GraphicsBackend>(
    state: &mut StateMirror<B>,
    material: &Material,
    front_face_cw: bool,
) {
    if material.side == Side::Double {
        state.disable(Capability::CullFace);
    } else {
        state.enable(Capability::CullFace);
    }

    let flip_sided = (material.side == Side::Back) ^ front_face_cw;
    state.set_flip_sided(flip_sided);

    if material.blends_opaque() {
        state.set_blending(&BlendParams::NONE);
    } else {
        state.set_blending(&material.blend);
    }

    state.set_depth_func(material.depth_func);
    state.set_depth_test(material.depth_test);
    state.set_depth_mask(material.depth_write);
    state.set_color_mask(material.color_write);

    state.set_polygon_offset(
        material.polygon_offset,
        material.polygon_offset_factor,
        material.polygon_offset_units,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{BackendCall, RecordingBackend, Winding};
    use crate::state::Blending;

    fn mirror() -> StateMirror<RecordingBackend> {
        let mut state = StateMirror::new(RecordingBackend::new()).unwrap();
        state.backend_mut().clear_calls();
        state
    }

    #[test]
    fn opaque_front_material_collapses_blending() {
        let mut s = mirror();
        // Make blending observable so a collapse has to disable it.
        s.set_blending(&BlendParams::normal());

        let m = Material::default();
        assert!(m.maps.map.is_none());
        apply_material_state(&mut s, &m, false);

        assert_eq!(s.is_enabled(Capability::CullFace), Some(true));
        assert_eq!(s.is_enabled(Capability::Blend), Some(false));
        let calls = s.backend().calls();
        assert!(calls.contains(&BackendCall::FrontFace(Winding::Ccw)));
        assert!(calls.contains(&BackendCall::Disable(Capability::Blend)));
    }

    #[test]
    fn opaque_normal_matches_explicit_none() {
        let mut a = mirror();
        let mut b = mirror();

        let normal = Material::default();
        let mut none = Material::default();
        none.blend = BlendParams::NONE;

        apply_material_state(&mut a, &normal, false);
        apply_material_state(&mut b, &none, false);
        assert_eq!(a.backend().calls(), b.backend().calls());
    }

    #[test]
    fn transparent_material_keeps_its_blending() {
        let mut s = mirror();
        let mut m = Material::default();
        m.transparent = true;
        m.opacity = 0.5;
        apply_material_state(&mut s, &m, false);
        assert_eq!(s.is_enabled(Capability::Blend), Some(true));
        assert_eq!(s.blending(), Some(Blending::Normal));
    }

    #[test]
    fn partial_opacity_keeps_blending_without_transparent_flag() {
        let mut s = mirror();
        let mut m = Material::default();
        m.opacity = 0.3;
        assert!(!m.transparent);
        apply_material_state(&mut s, &m, false);
        assert_eq!(s.is_enabled(Capability::Blend), Some(true));
        assert_eq!(s.blending(), Some(Blending::Normal));
        assert!(!s.backend().calls().contains(&BackendCall::Disable(Capability::Blend)));
    }

    #[test]
    fn flip_sided_is_back_xor_clockwise() {
        let cases = [
            (Side::Front, false, Winding::Ccw),
            (Side::Front, true, Winding::Cw),
            (Side::Back, false, Winding::Cw),
            (Side::Back, true, Winding::Ccw),
        ];
        for (side, cw, expected) in cases {
            let mut s = mirror();
            let mut m = Material::default();
            m.side = side;
            apply_material_state(&mut s, &m, cw);
            assert!(
                s.backend().calls().contains(&BackendCall::FrontFace(expected)),
                "{side:?} cw={cw}"
            );
        }
    }

    #[test]
    fn double_sided_disables_culling() {
        let mut s = mirror();
        let mut m = Material::default();
        m.side = Side::Double;
        apply_material_state(&mut s, &m, false);
        assert_eq!(s.is_enabled(Capability::CullFace), Some(false));
    }

    #[test]
    fn second_apply_is_free() {
        let mut s = mirror();
        let mut m = Material::default();
        m.polygon_offset = true;
        m.polygon_offset_factor = 1.0;
        m.polygon_offset_units = 4.0;
        apply_material_state(&mut s, &m, false);
        s.backend_mut().clear_calls();

        apply_material_state(&mut s, &m, false);
        assert!(s.backend().calls().is_empty());
    }
}
