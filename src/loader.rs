//! Loading orchestration and teardown.
//!
//! A [`LoadPlan`] is an ordered list of [`LoadStage`]s. Each stage declares
//! the stages it needs, and a plan built with [`LoadPlan::for_stages`] always
//! contains those too, ordered before it. [`Loader`] runs a plan against a
//! [`GraphicsBackend`] and returns the populated [`ResourceStore`];
//! [`Loader::destroy`] releases it again in reverse dependency order.

use std::fmt;

use anyhow::bail;

use crate::{
    backend::{BufferTarget, GraphicsBackend},
    config::LoaderConfig,
    context::{Context, GpuObjects},
    data_structures::model::RawModel,
    diagnostics::Reporter,
    resources,
    store::ResourceStore,
};

/// One step of a loading pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LoadStage {
    /// `errors.json` into the error catalog.
    Errors,
    Textures,
    /// The built-in unit quad.
    BaseQuad,
    /// Sub-shaders and linked programs.
    Shaders,
    Materials,
    GameObjects,
    Renderers,
}

impl LoadStage {
    /// Every stage, in the order preferred when dependencies leave a choice.
    pub const ALL: [LoadStage; 7] = [
        Self::Errors,
        Self::Textures,
        Self::BaseQuad,
        Self::Materials,
        Self::GameObjects,
        Self::Shaders,
        Self::Renderers,
    ];

    /// Stages that must have run before this one.
    pub fn dependencies(self) -> &'static [LoadStage] {
        match self {
            Self::Materials => &[Self::Shaders],
            Self::Renderers => &[Self::GameObjects, Self::Textures, Self::Materials],
            _ => &[],
        }
    }

    fn preference(self) -> usize {
        Self::ALL.iter().position(|s| *s == self).unwrap_or(usize::MAX)
    }
}

impl fmt::Display for LoadStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Errors => "errors",
            Self::Textures => "textures",
            Self::BaseQuad => "base quad",
            Self::Shaders => "shaders",
            Self::Materials => "materials",
            Self::GameObjects => "game objects",
            Self::Renderers => "renderers",
        };
        f.write_str(name)
    }
}

/// Dependency-ordered list of stages.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadPlan {
    stages: Vec<LoadStage>,
}

impl LoadPlan {
    /// Every stage: errors, textures, quad, game objects, shaders, materials,
    /// renderers.
    pub fn full() -> anyhow::Result<Self> {
        Self::for_stages(&LoadStage::ALL)
    }

    /// Plan running `requested` and everything they depend on.
    ///
    /// Among the stages whose dependencies are met, the one coming first in
    /// [`LoadStage::ALL`] runs first.
    pub fn for_stages(requested: &[LoadStage]) -> anyhow::Result<Self> {
        let mut pending: Vec<LoadStage> = Vec::new();
        let mut queue = requested.to_vec();
        while let Some(stage) = queue.pop() {
            if !pending.contains(&stage) {
                pending.push(stage);
                queue.extend_from_slice(stage.dependencies());
            }
        }

        let mut stages = Vec::with_capacity(pending.len());
        while !pending.is_empty() {
            let ready = pending
                .iter()
                .enumerate()
                .filter(|(_, stage)| stage.dependencies().iter().all(|d| stages.contains(d)))
                .min_by_key(|(_, stage)| stage.preference())
                .map(|(i, _)| i);
            let Some(i) = ready else {
                bail!("load stages {:?} depend on each other", pending);
            };
            stages.push(pending.swap_remove(i));
        }
        Ok(Self { stages })
    }

    pub fn stages(&self) -> &[LoadStage] {
        &self.stages
    }

    pub fn contains(&self, stage: LoadStage) -> bool {
        self.stages.contains(&stage)
    }
}

/// Uploads an indexed model into a new vertex array.
///
/// `positions` and `tex_coords` are 2D and go to attributes 0 and 1. The
/// vertex array and its buffers are tracked in `ctx.gpu`.
pub fn load_to_vao(
    ctx: &mut Context,
    id: u32,
    name: &str,
    positions: &[f32],
    indices: &[u32],
    tex_coords: &[f32],
) -> anyhow::Result<RawModel> {
    let vao = ctx.gl.create_vertex_array()?;
    ctx.gpu.vaos.push(vao);
    ctx.gl.bind_vertex_array(Some(vao));

    let index_buffer = ctx
        .gl
        .create_buffer(BufferTarget::ElementArray, bytemuck::cast_slice(indices))?;
    ctx.gpu.vbos.push(index_buffer);
    for (location, data) in [(0, positions), (1, tex_coords)] {
        let buffer = ctx
            .gl
            .create_buffer(BufferTarget::Array, bytemuck::cast_slice(data))?;
        ctx.gpu.vbos.push(buffer);
        ctx.gl.vertex_attribute(location, 2);
    }
    ctx.gl.bind_vertex_array(None);

    Ok(RawModel {
        id,
        name: name.to_string(),
        vao,
        index_buffer,
        vertex_count: indices.len() as u32,
    })
}

/// Uploads the unit quad every sprite is drawn with.
pub fn generate_quad(ctx: &mut Context, store: &mut ResourceStore) -> anyhow::Result<()> {
    let quad = load_to_vao(
        ctx,
        RawModel::QUAD_ID,
        RawModel::QUAD_NAME,
        &RawModel::QUAD_POSITIONS,
        &RawModel::QUAD_INDICES,
        &RawModel::QUAD_TEX_COORDS,
    )?;
    store.raw_models.insert(quad)?;
    log::info!("Loaded {} raw models", store.raw_models.len());
    Ok(())
}

/// Runs load plans and owns what they create outside the store.
#[derive(Debug)]
pub struct Loader {
    config: LoaderConfig,
    reporter: Reporter,
    gpu: GpuObjects,
}

impl Loader {
    pub fn new(config: LoaderConfig) -> Self {
        let reporter = Reporter::new(config.echo_diagnostics);
        Self {
            config,
            reporter,
            gpu: GpuObjects::default(),
        }
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Diagnostics reported so far.
    pub fn reporter(&self) -> &Reporter {
        &self.reporter
    }

    pub fn reporter_mut(&mut self) -> &mut Reporter {
        &mut self.reporter
    }

    /// Vertex arrays, buffers and textures not yet released.
    pub fn gpu_objects(&self) -> &GpuObjects {
        &self.gpu
    }

    /// Loads everything the resource directory describes.
    pub fn init(&mut self, gl: &mut dyn GraphicsBackend) -> anyhow::Result<ResourceStore> {
        let plan = LoadPlan::full()?;
        self.run(&plan, gl)
    }

    /// Runs `plan` into a new store.
    pub fn run(
        &mut self,
        plan: &LoadPlan,
        gl: &mut dyn GraphicsBackend,
    ) -> anyhow::Result<ResourceStore> {
        let mut store = ResourceStore::new();
        for stage in plan.stages() {
            self.load_stage(*stage, &mut store, gl)?;
        }
        log::info!("Loading completed: {}", store.summary());
        Ok(store)
    }

    /// Runs a single stage. Its dependencies must already be in `store`.
    pub fn load_stage(
        &mut self,
        stage: LoadStage,
        store: &mut ResourceStore,
        gl: &mut dyn GraphicsBackend,
    ) -> anyhow::Result<()> {
        log::debug!("Loading {}", stage);
        let mut ctx = Context::new(&self.config, &mut self.reporter, gl, &mut self.gpu);
        match stage {
            LoadStage::Errors => resources::read_errors(&mut ctx),
            LoadStage::Textures => resources::read_textures(&mut ctx, store)?,
            LoadStage::BaseQuad => generate_quad(&mut ctx, store)?,
            LoadStage::Shaders => resources::read_shaders(&mut ctx, store),
            LoadStage::Materials => resources::read_materials(&mut ctx, store)?,
            LoadStage::GameObjects => resources::read_game_objects(&mut ctx, store)?,
            LoadStage::Renderers => resources::read_renderers(&mut ctx, store)?,
        }
        Ok(())
    }

    /// Releases everything `store` holds and every tracked graphics object.
    ///
    /// Entities go in reverse dependency order: renderers, game objects,
    /// materials, shader programs, leftover sub-shaders. Vertex arrays,
    /// buffers and textures are then deleted in bulk and the error catalog
    /// goes back to its built-in messages.
    pub fn destroy(&mut self, store: &mut ResourceStore, gl: &mut dyn GraphicsBackend) {
        let renderers = store.renderers.drain().len();
        let game_objects = store.game_objects.drain().len();
        let materials = store.materials.drain().len();
        let shaders = store.shaders.drain();
        let programs = shaders.len();
        for shader in shaders {
            shader.release(gl);
        }
        resources::drop_sub_shaders(gl, store);
        store.raw_models.drain();
        store.textures.drain();
        self.gpu.release(gl);
        self.reporter.catalog_mut().reset();
        log::info!(
            "Released {} renderers, {} game objects, {} materials and {} shaders",
            renderers,
            game_objects,
            materials,
            programs
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_plan_links_shaders_before_materials() {
        let plan = LoadPlan::full().unwrap();
        assert_eq!(
            plan.stages(),
            &[
                LoadStage::Errors,
                LoadStage::Textures,
                LoadStage::BaseQuad,
                LoadStage::GameObjects,
                LoadStage::Shaders,
                LoadStage::Materials,
                LoadStage::Renderers,
            ]
        );
    }

    #[test]
    fn plan_pulls_in_dependencies() {
        let plan = LoadPlan::for_stages(&[LoadStage::Renderers]).unwrap();
        assert_eq!(
            plan.stages(),
            &[
                LoadStage::Textures,
                LoadStage::GameObjects,
                LoadStage::Shaders,
                LoadStage::Materials,
                LoadStage::Renderers,
            ]
        );
        assert!(!plan.contains(LoadStage::Errors));
    }
}
