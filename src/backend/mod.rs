//! The graphics calls the loader needs, behind one trait.
//!
//! [`GraphicsBackend`] covers shader compilation and linking, vertex array
//! and buffer creation, texture upload, and deletion of all of these. Two
//! implementations exist:
//!
//! - [`GlowBackend`] issues real OpenGL calls through `glow` and needs a
//!   current context (created by the windowing layer, which is outside this
//!   crate).
//! - [`HeadlessBackend`] keeps every object in memory and follows the same
//!   object rules as OpenGL (deferred shader deletion, link checks). It is
//!   used by `ngin-check` and the tests.

mod gl;
mod headless;

use std::num::NonZeroU32;

pub use gl::GlowBackend;
pub use headless::HeadlessBackend;

use crate::data_structures::shader::ShaderStage;

/// Compiled shader stage object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShaderId(pub NonZeroU32);

/// Linked program object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProgramId(pub NonZeroU32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexArrayId(pub NonZeroU32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BufferId(pub NonZeroU32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureId(pub NonZeroU32);

/// Binding point of a buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BufferTarget {
    /// Per-vertex attribute data.
    Array,
    /// Indices of an indexed draw.
    ElementArray,
}

/// Graphics operations used while loading and unloading resources.
///
/// Compile and link failures are expected (they come from user data) and are
/// returned as the backend's info log. Failing to create an object at all is
/// an infrastructure problem and is returned as an [`anyhow::Error`].
pub trait GraphicsBackend {
    /// Compiles `source` as a shader of the given stage.
    fn create_shader(&mut self, stage: ShaderStage, source: &str) -> Result<ShaderId, String>;

    /// Deletes a shader. If it is still attached to a program the deletion is
    /// deferred until it is detached from all of them.
    fn delete_shader(&mut self, shader: ShaderId);

    /// Attaches `stages` to a new program and links it. On failure the
    /// program is deleted and the link log returned.
    fn link_program(&mut self, stages: &[ShaderId]) -> Result<ProgramId, String>;

    fn active_attribute_count(&mut self, program: ProgramId) -> u32;

    fn detach_shader(&mut self, program: ProgramId, shader: ShaderId);

    fn delete_program(&mut self, program: ProgramId);

    fn create_vertex_array(&mut self) -> anyhow::Result<VertexArrayId>;

    fn bind_vertex_array(&mut self, vao: Option<VertexArrayId>);

    /// Creates a buffer, binds it to `target` and fills it with `data`.
    fn create_buffer(&mut self, target: BufferTarget, data: &[u8]) -> anyhow::Result<BufferId>;

    /// Points attribute `location` of the bound vertex array at the bound
    /// array buffer, as tightly packed `f32` tuples of `components`.
    fn vertex_attribute(&mut self, location: u32, components: i32);

    /// Uploads an RGBA8 image with linear filtering.
    fn create_texture(&mut self, width: u32, height: u32, rgba: &[u8]) -> anyhow::Result<TextureId>;

    fn delete_vertex_arrays(&mut self, vaos: &[VertexArrayId]);

    fn delete_buffers(&mut self, buffers: &[BufferId]);

    fn delete_textures(&mut self, textures: &[TextureId]);
}
