//! Shader stages and linked shader programs.

use std::path::PathBuf;

use crate::{
    backend::{GraphicsBackend, ProgramId, ShaderId},
    diagnostics::ShaderError,
    store::Entity,
};

/// Pipeline stage of a sub-shader.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Geometry,
    Fragment,
}

impl ShaderStage {
    pub const ALL: [ShaderStage; 3] = [Self::Vertex, Self::Geometry, Self::Fragment];

    pub fn name(self) -> &'static str {
        match self {
            Self::Vertex => "vertex",
            Self::Geometry => "geometry",
            Self::Fragment => "fragment",
        }
    }

    /// Entity kind of the stage's temporaries, e.g. `vertex shader`.
    pub fn kind(self) -> &'static str {
        match self {
            Self::Vertex => "vertex shader",
            Self::Geometry => "geometry shader",
            Self::Fragment => "fragment shader",
        }
    }

    /// Error reported when a source of this stage doesn't compile.
    pub fn compile_error(self) -> ShaderError {
        match self {
            Self::Vertex => ShaderError::CantCompileVertex,
            Self::Geometry => ShaderError::CantCompileGeometry,
            Self::Fragment => ShaderError::CantCompileFragment,
        }
    }

    /// Required file extension of the stage's sources.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Vertex => ".vert",
            Self::Geometry => ".geom",
            Self::Fragment => ".frag",
        }
    }

    /// Data file listing the stage's sources.
    pub fn data_file(self) -> &'static str {
        match self {
            Self::Vertex => "vertexshaders.json",
            Self::Geometry => "geometryshaders.json",
            Self::Fragment => "fragmentshaders.json",
        }
    }
}

/// A compiled stage waiting to be linked.
///
/// Sub-shaders only live during loading: once every program is linked the
/// loader drains their arenas and deletes the stage objects.
#[derive(Clone, Debug, PartialEq)]
pub struct SubShader {
    pub id: u32,
    pub name: String,
    pub stage: ShaderStage,
    /// Source path relative to the shader directory.
    pub path: PathBuf,
    pub shader: ShaderId,
}

impl Entity for SubShader {
    const KIND: &'static str = "sub-shader";

    fn id(&self) -> u32 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// A linked shader program and the stages it was linked from.
#[derive(Clone, Debug, PartialEq)]
pub struct Shader {
    pub id: u32,
    pub name: String,
    pub program: ProgramId,
    pub vertex: ShaderId,
    pub geometry: Option<ShaderId>,
    pub fragment: ShaderId,
    pub attribute_count: u32,
}

impl Entity for Shader {
    const KIND: &'static str = "shader";

    fn id(&self) -> u32 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Shader {
    /// Attached stages in pipeline order.
    pub fn stages(&self) -> impl Iterator<Item = ShaderId> {
        [Some(self.vertex), self.geometry, Some(self.fragment)]
            .into_iter()
            .flatten()
    }

    /// Detaches the stages and deletes the program.
    ///
    /// The stage objects were already flagged for deletion when the
    /// sub-shaders were dropped, so detaching them here frees them.
    pub fn release(self, gl: &mut dyn GraphicsBackend) {
        for stage in self.stages() {
            gl.detach_shader(self.program, stage);
        }
        gl.delete_program(self.program);
    }
}
