//! State shared by the resource readers during one loading pass.

use crate::{
    backend::{BufferId, GraphicsBackend, TextureId, VertexArrayId},
    config::LoaderConfig,
    diagnostics::Reporter,
};

/// Raw graphics objects created while loading, released in one pass by
/// [`Loader::destroy`](crate::loader::Loader::destroy).
///
/// Shader and program objects aren't listed here: they are owned by the
/// [`Shader`](crate::data_structures::shader::Shader)s and sub-shaders.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GpuObjects {
    pub vaos: Vec<VertexArrayId>,
    pub vbos: Vec<BufferId>,
    pub textures: Vec<TextureId>,
}

impl GpuObjects {
    pub fn is_empty(&self) -> bool {
        self.vaos.is_empty() && self.vbos.is_empty() && self.textures.is_empty()
    }

    /// Deletes every listed object and clears the lists.
    pub fn release(&mut self, gl: &mut dyn GraphicsBackend) {
        gl.delete_vertex_arrays(&self.vaos);
        gl.delete_buffers(&self.vbos);
        gl.delete_textures(&self.textures);
        log::debug!(
            "Released {} vertex arrays, {} buffers and {} textures",
            self.vaos.len(),
            self.vbos.len(),
            self.textures.len()
        );
        self.vaos.clear();
        self.vbos.clear();
        self.textures.clear();
    }
}

/// Borrowed view of everything a reader needs: where the files are, where
/// problems go, and the graphics backend with its object lists.
pub struct Context<'a> {
    pub config: &'a LoaderConfig,
    pub reporter: &'a mut Reporter,
    pub gl: &'a mut dyn GraphicsBackend,
    pub gpu: &'a mut GpuObjects,
}

impl<'a> Context<'a> {
    pub fn new(
        config: &'a LoaderConfig,
        reporter: &'a mut Reporter,
        gl: &'a mut dyn GraphicsBackend,
        gpu: &'a mut GpuObjects,
    ) -> Self {
        Self {
            config,
            reporter,
            gl,
            gpu,
        }
    }
}
