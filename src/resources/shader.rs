//! The shader pipeline: compile sub-shaders, link them into programs, and
//! drop the sub-shaders once every program is linked.

use std::{fs, path::Path};

use crate::{
    backend::{GraphicsBackend, ShaderId},
    context::Context,
    data_structures::shader::{Shader, ShaderStage, SubShader},
    diagnostics::{IoError, ShaderError},
    json::{FieldReader, read_array},
    store::ResourceStore,
    validation::Comparator,
};

use super::{is_duplicate, read_id, read_name, resolve};

/// Reads `shaders/<path>` and compiles it as a `stage` shader.
///
/// Returns `None` after reporting [`IoError::CantOpenFile`] or the stage's
/// compile error, with the compiler log as detail.
pub fn load_shader(ctx: &mut Context, path: &Path, stage: ShaderStage) -> Option<ShaderId> {
    let file = ctx.config.shader_file(path);
    let display = file.display().to_string();
    let source = match fs::read_to_string(&file) {
        Ok(source) => source,
        Err(e) => {
            ctx.reporter
                .report(IoError::CantOpenFile, Some(&display), &e.to_string(), &[]);
            return None;
        }
    };
    match ctx.gl.create_shader(stage, &source) {
        Ok(shader) => Some(shader),
        Err(log) => {
            ctx.reporter
                .report(stage.compile_error(), Some(&display), log.trim_end(), &[]);
            None
        }
    }
}

/// Links the given stages into a program.
///
/// On failure reports [`ShaderError::CantLink`] with the link log and the
/// names of the stages (an empty name for a missing geometry stage).
pub fn link_shaders(
    ctx: &mut Context,
    id: u32,
    name: &str,
    vertex: &SubShader,
    geometry: Option<&SubShader>,
    fragment: &SubShader,
) -> Option<Shader> {
    let stages: Vec<ShaderId> = [Some(vertex), geometry, Some(fragment)]
        .into_iter()
        .flatten()
        .map(|sub| sub.shader)
        .collect();
    let program = match ctx.gl.link_program(&stages) {
        Ok(program) => program,
        Err(log) => {
            let geometry_name = geometry.map_or("", |sub| sub.name.as_str());
            ctx.reporter.report(
                ShaderError::CantLink,
                None,
                log.trim_end(),
                &[&vertex.name, geometry_name, &fragment.name],
            );
            return None;
        }
    };
    let attribute_count = ctx.gl.active_attribute_count(program);
    log::debug!("Shader \"{}\" has {} active attributes", name, attribute_count);
    Some(Shader {
        id,
        name: name.to_string(),
        program,
        vertex: vertex.shader,
        geometry: geometry.map(|sub| sub.shader),
        fragment: fragment.shader,
        attribute_count,
    })
}

/// Compiles every source listed in the stage's data file into its
/// sub-shader arena. Paths must carry the stage's extension.
pub fn read_sub_shaders(ctx: &mut Context, store: &mut ResourceStore, stage: ShaderStage) {
    let path = ctx.config.data_file(stage.data_file());
    let Some(items) = read_array(&path, ctx.reporter) else {
        return;
    };
    let extension = Comparator::EndsWith(stage.extension().to_string());

    for (index, item) in items.iter().enumerate() {
        let mut reader = FieldReader::new(ctx.reporter, &path, stage.kind());
        let Some(object) = reader.object(index, item) else {
            continue;
        };
        let id = read_id(&mut reader, object, index);
        let name = read_name(&mut reader, object, index);
        let source = reader.string(object, index, "path", &extension, "");
        if source.is_empty() || is_duplicate(&mut reader, store.sub_shaders(stage), index, id) {
            continue;
        }
        let Some(shader) = load_shader(ctx, Path::new(&source), stage) else {
            continue;
        };
        let sub = SubShader {
            id,
            name,
            stage,
            path: source.into(),
            shader,
        };
        if let Err(e) = store.sub_shaders_mut(stage).insert(sub) {
            log::error!("Couldn't store {}: {}", stage.kind(), e);
            ctx.gl.delete_shader(shader);
        }
    }
}

/// Deletes every remaining sub-shader. Stages still attached to a program
/// are freed when that program is released.
pub fn drop_sub_shaders(gl: &mut dyn GraphicsBackend, store: &mut ResourceStore) {
    for stage in ShaderStage::ALL {
        for sub in store.sub_shaders_mut(stage).drain() {
            gl.delete_shader(sub.shader);
        }
    }
}

/// Loads the three sub-shader files, then links every program listed in
/// `data/shaders.json`.
///
/// Entries whose vertex or fragment stage is unusable are skipped without
/// touching the backend. `geometry` is optional; -1 means no geometry
/// stage. All sub-shaders are deleted afterwards, linked or not.
pub fn read_shaders(ctx: &mut Context, store: &mut ResourceStore) {
    for stage in ShaderStage::ALL {
        read_sub_shaders(ctx, store, stage);
    }
    log::info!(
        "Loaded {} vertex, {} geometry and {} fragment shaders",
        store.vertex_shaders.len(),
        store.geometry_shaders.len(),
        store.fragment_shaders.len()
    );

    let path = ctx.config.data_file("shaders.json");
    if let Some(items) = read_array(&path, ctx.reporter) {
        for (index, item) in items.iter().enumerate() {
            let mut reader = FieldReader::new(ctx.reporter, &path, "shader");
            let Some(object) = reader.object(index, item) else {
                continue;
            };
            let id = read_id(&mut reader, object, index);
            let name = read_name(&mut reader, object, index);
            let stage_id = Comparator::GreaterEqual(0);
            let vertex = reader.int(object, index, "vertex", &stage_id, -1);
            let geometry =
                reader.optional_int(object, index, "geometry", &Comparator::GreaterEqual(-1), -1);
            let fragment = reader.int(object, index, "fragment", &stage_id, -1);
            if vertex < 0 || fragment < 0 {
                log::warn!("Shader \"{}\" skipped, it lacks a vertex or fragment stage", name);
                continue;
            }
            if is_duplicate(&mut reader, &store.shaders, index, id) {
                continue;
            }

            let Some(vertex) = resolve(&mut reader, &store.vertex_shaders, index, "vertex", vertex)
            else {
                continue;
            };
            let geometry = match geometry {
                None | Some(-1) => None,
                Some(geometry) => {
                    match resolve(&mut reader, &store.geometry_shaders, index, "geometry", geometry) {
                        Some(handle) => Some(handle),
                        None => continue,
                    }
                }
            };
            let Some(fragment) =
                resolve(&mut reader, &store.fragment_shaders, index, "fragment", fragment)
            else {
                continue;
            };

            let stages = (
                store.vertex_shaders.get(vertex),
                geometry.map(|handle| store.geometry_shaders.get(handle)).transpose(),
                store.fragment_shaders.get(fragment),
            );
            let (Ok(vertex), Ok(geometry), Ok(fragment)) = stages else {
                continue;
            };
            if let Some(shader) = link_shaders(ctx, id, &name, vertex, geometry, fragment) {
                if let Err(e) = store.shaders.insert(shader) {
                    log::error!("Couldn't store shader \"{}\": {}", name, e);
                }
            }
        }
    }

    drop_sub_shaders(ctx.gl, store);
    log::info!("Loaded {} shaders", store.shaders.len());
}
