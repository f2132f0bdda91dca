use crate::backend::{BackendError, GraphicsBackend};
use crate::config::{Capabilities, RendererConfig};
use crate::error::ProgramError;
use crate::material::Material;
use crate::program::{ProgramCache, ProgramHandle, ProgramKey, ProgramParameters};
use crate::scene::SceneInputs;
use crate::state::StateMirror;

use super::apply_material_state;

/// Per-draw entry point of the renderer core.
///
/// Owns the state mirror (and through it the backend), the program cache and
/// the renderer-wide flags. Programs acquired through it must be released
/// through it so the mirror forgets destroyed programs.
pub struct RenderCore<B: GraphicsBackend> {
    state: StateMirror<B>,
    programs: ProgramCache,
    config: RendererConfig,
}

impl<B: GraphicsBackend> RenderCore<B> {
    pub fn new(backend: B, config: RendererConfig) -> Result<Self, BackendError> {
        let state = StateMirror::new(backend)?;
        log::debug!("RenderCore: {:?}", state.capabilities());
        Ok(Self {
            state,
            programs: ProgramCache::new(),
            config,
        })
    }

    #[inline]
    pub fn capabilities(&self) -> &Capabilities {
        self.state.capabilities()
    }

    #[inline]
    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    /// Replaces the renderer flags. Cached programs stay valid for their own keys.
    pub fn set_config(&mut self, config: RendererConfig) {
        self.config = config;
    }

    #[inline]
    pub fn state(&self) -> &StateMirror<B> {
        &self.state
    }

    #[inline]
    pub fn state_mut(&mut self) -> &mut StateMirror<B> {
        &mut self.state
    }

    #[inline]
    pub fn programs(&self) -> &ProgramCache {
        &self.programs
    }

    pub fn program_parameters(&self, material: &Material, scene: &SceneInputs) -> ProgramParameters {
        ProgramParameters::build(material, scene, &self.config, self.state.capabilities())
    }

    pub fn program_key(&self, material: &Material, params: &ProgramParameters) -> ProgramKey {
        ProgramKey::build(material, params, &self.config)
    }

    /// Builds the snapshot and key for `material` and acquires its program.
    pub fn acquire_program(
        &mut self,
        material: &Material,
        scene: &SceneInputs,
    ) -> Result<ProgramHandle, ProgramError> {
        let params = self.program_parameters(material, scene);
        let key = self.program_key(material, &params);
        self.programs
            .acquire(self.state.backend_mut(), material, &params, &key)
    }

    /// Releases one acquire of `handle`.
    ///
    /// # Panics
    /// Panics if `handle` is not cached.
    pub fn release_program(&mut self, handle: ProgramHandle) {
        if let Some(program) = self.programs.release(self.state.backend_mut(), handle) {
            self.state.forget_program(program);
        }
    }

    /// Binds the program behind `handle`. Returns `true` if a bind call was issued.
    ///
    /// # Panics
    /// Panics if `handle` is not cached.
    pub fn use_program(&mut self, handle: ProgramHandle) -> bool {
        let Some(compiled) = self.programs.get(handle) else {
            panic!("use of {handle:?} which is not in the program cache");
        };
        let program = compiled.program();
        self.state.use_program(program)
    }

    pub fn apply_material_state(&mut self, material: &Material, front_face_cw: bool) {
        apply_material_state(&mut self.state, material, front_face_cw);
    }

    /// Readies state for drawing `material`.
    ///
    /// `bound` is the program the object used last time, if any. It is kept
    /// when its key and snapshot still match; otherwise a program is acquired
    /// for the current inputs and `bound` is released. The returned handle
    /// replaces `bound` in the caller's bookkeeping.
    pub fn prepare_draw(
        &mut self,
        material: &Material,
        scene: &SceneInputs,
        front_face_cw: bool,
        bound: Option<ProgramHandle>,
    ) -> Result<ProgramHandle, ProgramError> {
        let params = self.program_parameters(material, scene);
        let key = self.program_key(material, &params);

        let current = bound.filter(|&h| {
            self.programs
                .get(h)
                .is_some_and(|p| *p.key() == key && *p.parameters() == params)
        });

        let handle = match current {
            Some(handle) => handle,
            None => {
                let handle = self
                    .programs
                    .acquire(self.state.backend_mut(), material, &params, &key)?;
                if let Some(stale) = bound {
                    self.release_program(stale);
                }
                handle
            }
        };

        self.use_program(handle);
        self.apply_material_state(material, front_face_cw);
        Ok(handle)
    }

    /// Forgets all mirrored state after an out-of-band context mutation.
    pub fn reset(&mut self) {
        self.state.reset();
    }

    /// Destroys every cached program and returns the backend.
    pub fn dispose(mut self) -> B {
        let destroyed = self.programs.clear(self.state.backend_mut());
        for program in destroyed {
            self.state.forget_program(program);
        }
        self.state.into_backend()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{BackendCall, RecordingBackend};
    use crate::material::{BuiltinMaterial, TextureInfo};
    use crate::scene::LightCounts;

    fn render_core() -> RenderCore<RecordingBackend> {
        RenderCore::new(RecordingBackend::new(), RendererConfig::default()).unwrap()
    }

    fn creates(core: &RenderCore<RecordingBackend>) -> usize {
        core.state()
            .backend()
            .count(|c| matches!(c, BackendCall::CreateProgram(_)))
    }

    #[test]
    fn acquire_release_round_trip() {
        let mut core = render_core();
        let m = Material::builtin(BuiltinMaterial::MeshLambert);
        let scene = SceneInputs::default();

        let a = core.acquire_program(&m, &scene).unwrap();
        let b = core.acquire_program(&m, &scene).unwrap();
        assert_eq!(a, b);
        assert_eq!(core.programs().usage(a), Some(2));

        core.release_program(a);
        assert_eq!(core.programs().len(), 1);
        core.release_program(b);
        assert!(core.programs().is_empty());
        assert_eq!(core.state().backend().live_programs(), 0);
    }

    #[test]
    fn release_forgets_bound_program() {
        let mut core = render_core();
        let m = Material::default();
        let h = core.acquire_program(&m, &SceneInputs::default()).unwrap();
        assert!(core.use_program(h));
        assert!(!core.use_program(h));

        core.release_program(h);
        assert_eq!(core.state().current_program(), None);
    }

    #[test]
    fn prepare_draw_keeps_matching_program() {
        let mut core = render_core();
        let m = Material::builtin(BuiltinMaterial::MeshPhong);
        let scene = SceneInputs::default();

        let h = core.prepare_draw(&m, &scene, false, None).unwrap();
        core.state_mut().backend_mut().clear_calls();

        let again = core.prepare_draw(&m, &scene, false, Some(h)).unwrap();
        assert_eq!(h, again);
        assert_eq!(core.programs().usage(h), Some(1));
        assert!(core.state().backend().calls().is_empty());
    }

    #[test]
    fn prepare_draw_swaps_program_when_inputs_change() {
        let mut core = render_core();
        let m = Material::builtin(BuiltinMaterial::MeshPhong);
        let h = core.prepare_draw(&m, &SceneInputs::default(), false, None).unwrap();

        let lit = SceneInputs {
            lights: LightCounts { point: 1, ..LightCounts::default() },
            ..SceneInputs::default()
        };
        let next = core.prepare_draw(&m, &lit, false, Some(h)).unwrap();
        assert_ne!(h, next);
        assert_eq!(core.programs().len(), 1);
        assert_eq!(core.programs().usage(h), None);
        assert_eq!(core.state().current_program(), core.programs().get(next).map(|p| p.program()));
        assert_eq!(creates(&core), 2);
    }

    #[test]
    fn config_change_reaches_new_programs() {
        let mut core = render_core();
        let mut m = Material::default();
        m.maps.map = Some(TextureInfo::linear());
        let scene = SceneInputs::default();

        let before = core.program_parameters(&m, &scene);
        core.set_config(RendererConfig { gamma_input: true, ..RendererConfig::default() });
        let after = core.program_parameters(&m, &scene);
        assert_ne!(before.map_encoding, after.map_encoding);
        // Input gamma is not a key field; the snapshot alone tells the programs apart.
        assert_eq!(
            core.program_key(&m, &after),
            ProgramKey::build(&m, &before, &RendererConfig::default())
        );

        core.set_config(RendererConfig::default());
        let linear = core.acquire_program(&m, &scene).unwrap();
        core.set_config(RendererConfig { gamma_input: true, ..RendererConfig::default() });
        let gamma = core.acquire_program(&m, &scene).unwrap();
        assert_ne!(linear, gamma);
        assert_eq!(core.programs().len(), 2);
    }

    #[test]
    fn compile_error_surfaces() {
        let mut backend = RecordingBackend::new();
        backend.fail_compiles_containing("oops");
        let mut core = RenderCore::new(backend, RendererConfig::default()).unwrap();
        let m = Material::shader("void main() {}", "oops");
        let err = core.prepare_draw(&m, &SceneInputs::default(), false, None).unwrap_err();
        assert!(matches!(err, ProgramError::Compile { .. }));
        assert!(core.programs().is_empty());
    }

    #[test]
    fn dispose_destroys_outstanding_programs() {
        let mut core = render_core();
        core.acquire_program(&Material::default(), &SceneInputs::default()).unwrap();
        core.acquire_program(&Material::builtin(BuiltinMaterial::Points), &SceneInputs::default())
            .unwrap();
        let backend = core.dispose();
        assert_eq!(backend.live_programs(), 0);
    }
}
