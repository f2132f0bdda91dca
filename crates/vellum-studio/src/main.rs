//! Headless frame trace.
//!
//! Drives a scripted scene through `RenderCore` on a recording backend and
//! reports how many API calls each frame issued and how the program cache
//! behaved.

use anyhow::{Context, Result};
use vellum_engine::backend::{BackendCall, RecordingBackend};
use vellum_engine::config::{RendererConfig, ShadowMapConfig, ToneMapping};
use vellum_engine::coords::{ColorRgba, PixelRect};
use vellum_engine::logging::{init_logging, LoggingConfig};
use vellum_engine::material::{
    BuiltinMaterial, Material, MaterialFeatures, Side, TextureEncoding, TextureInfo, TextureMapping,
};
use vellum_engine::program::ProgramHandle;
use vellum_engine::render::RenderCore;
use vellum_engine::scene::{DrawObject, FogKind, LightCounts, SceneInputs};
use vellum_engine::state::{BlendParams, Blending};

const DEFAULT_FRAMES: u32 = 3;

struct SceneObject {
    material: Material,
    object: DrawObject,
    front_face_cw: bool,
    program: Option<ProgramHandle>,
}

impl SceneObject {
    fn new(material: Material) -> Self {
        Self {
            material,
            object: DrawObject { receive_shadow: true },
            front_face_cw: false,
            program: None,
        }
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let frames = parse_frames(std::env::args().skip(1))?;

    let config = RendererConfig {
        gamma_output: true,
        tone_mapping: ToneMapping::AcesFilmic,
        shadow_map: ShadowMapConfig { enabled: true, ..ShadowMapConfig::default() },
        ..RendererConfig::default()
    };
    let mut core = RenderCore::new(RecordingBackend::new(), config)
        .context("failed to initialize render core")?;

    let mut objects = scripted_objects();
    let viewport = PixelRect::new(0, 0, 1280, 720);
    let sky = ColorRgba::rgb(0.05, 0.07, 0.12);

    for frame in 0..frames {
        let scene = frame_inputs(frame);
        core.state_mut().backend_mut().clear_calls();
        core.state_mut().set_viewport(viewport);
        core.state_mut().set_clear_color(sky, false);

        for obj in &mut objects {
            let inputs = SceneInputs { object: obj.object, ..scene };
            let handle = core
                .prepare_draw(&obj.material, &inputs, obj.front_face_cw, obj.program)
                .with_context(|| format!("failed to prepare '{}'", obj.material.name))?;
            obj.program = Some(handle);
        }

        let backend = core.state().backend();
        let state_calls = backend.count(|c| {
            !matches!(c, BackendCall::CreateProgram(_) | BackendCall::DeleteProgram(_))
        });
        log::info!(
            "frame {frame}: {} objects, {state_calls} state calls, {} programs cached",
            objects.len(),
            core.programs().len()
        );
    }

    let stats = core.programs().stats();
    log::info!(
        "programs: {} compiled, {} reused, {} destroyed",
        stats.compiled,
        stats.reused,
        stats.destroyed
    );

    for obj in &mut objects {
        if let Some(handle) = obj.program.take() {
            core.release_program(handle);
        }
    }

    anyhow::ensure!(
        core.programs().is_empty(),
        "{} programs still cached after releasing every object",
        core.programs().len()
    );
    let backend = core.dispose();
    anyhow::ensure!(
        backend.live_programs() == 0,
        "{} backend programs leaked",
        backend.live_programs()
    );

    log::info!("program cache empty, all backend programs deleted");
    Ok(())
}

fn parse_frames(mut args: impl Iterator<Item = String>) -> Result<u32> {
    let mut frames = DEFAULT_FRAMES;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--frames" => {
                let value = args.next().context("--frames needs a value")?;
                frames = value
                    .parse()
                    .with_context(|| format!("invalid frame count '{value}'"))?;
            }
            other => anyhow::bail!("unknown argument '{other}' (usage: vellum-studio [--frames N])"),
        }
    }
    Ok(frames)
}

/// Lighting changes after the first frame so programs are swapped once.
fn frame_inputs(frame: u32) -> SceneInputs {
    let lights = if frame == 0 {
        LightCounts { directional: 1, ..LightCounts::default() }
    } else {
        LightCounts { directional: 1, point: 2, ..LightCounts::default() }
    };
    SceneInputs {
        lights,
        shadow_casters: 1,
        fog: FogKind::Linear,
        ..SceneInputs::default()
    }
}

fn scripted_objects() -> Vec<SceneObject> {
    let srgb = TextureInfo::new(TextureEncoding::Srgb, TextureMapping::Uv);

    let mut ground = Material::builtin(BuiltinMaterial::MeshStandard).named("ground");
    ground.maps.map = Some(srgb);
    ground.maps.roughness_map = Some(TextureInfo::linear());

    let crate_a = Material::builtin(BuiltinMaterial::MeshPhong).named("crate-a");
    let crate_b = Material::builtin(BuiltinMaterial::MeshPhong).named("crate-b");

    let mut glass = Material::builtin(BuiltinMaterial::MeshPhysical).named("glass");
    glass.transparent = true;
    glass.opacity = 0.3;
    glass.side = Side::Double;
    glass.depth_write = false;

    let mut character = Material::builtin(BuiltinMaterial::MeshToon).named("character");
    character.features |= MaterialFeatures::MORPH_TARGETS;

    let mut sparks = Material::builtin(BuiltinMaterial::Points).named("sparks");
    sparks.blend = BlendParams::mode(Blending::Additive);
    sparks.features |= MaterialFeatures::SIZE_ATTENUATION;
    sparks.depth_write = false;

    let mut decal = Material::builtin(BuiltinMaterial::MeshBasic).named("decal");
    decal.polygon_offset = true;
    decal.polygon_offset_factor = -1.0;
    decal.polygon_offset_units = -4.0;
    decal.transparent = true;

    let outline = Material::shader(
        "in vec3 position;\nuniform mat4 mvp;\nvoid main() { gl_Position = mvp * vec4( position, 1.0 ); }",
        "out vec4 fragColor;\nuniform vec3 tint;\nvoid main() { fragColor = vec4( tint, 1.0 ); }",
    )
    .named("outline")
    .with_define("OUTLINE_WIDTH", "2.0");

    let mut objects: Vec<SceneObject> = [ground, crate_a, crate_b, glass, character, sparks, decal, outline]
        .into_iter()
        .map(SceneObject::new)
        .collect();

    // Mirrored instance of the second crate.
    objects[2].front_face_cw = true;
    objects
}
