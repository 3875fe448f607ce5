use std::{
    collections::{BTreeMap, BTreeSet},
    num::NonZeroU32,
};

use anyhow::bail;

use super::{
    BufferId, BufferTarget, GraphicsBackend, ProgramId, ShaderId, TextureId, VertexArrayId,
};
use crate::data_structures::shader::ShaderStage;

#[derive(Debug)]
struct ShaderObject {
    stage: ShaderStage,
    source: String,
    attached: usize,
    delete_pending: bool,
}

#[derive(Debug)]
struct ProgramObject {
    stages: Vec<ShaderId>,
    attributes: u32,
}

/// An in-memory stand-in for an OpenGL context.
///
/// Objects get increasing non-zero names. Shader objects follow the GL
/// deletion rules: deleting an attached shader only flags it, and it goes
/// away once detached from every program. Compilation fails for empty
/// sources and for sources containing an `#error` directive; linking fails
/// when a stage has no `main` or the program lacks a vertex or fragment stage.
#[derive(Debug, Default)]
pub struct HeadlessBackend {
    issued: u32,
    shaders: BTreeMap<ShaderId, ShaderObject>,
    programs: BTreeMap<ProgramId, ProgramObject>,
    vertex_arrays: BTreeSet<VertexArrayId>,
    buffers: BTreeMap<BufferId, (BufferTarget, usize)>,
    textures: BTreeMap<TextureId, (u32, u32)>,
    bound_vertex_array: Option<VertexArrayId>,
    bound_array_buffer: Option<BufferId>,
    attributes: BTreeMap<(VertexArrayId, u32), (BufferId, i32)>,
}

impl HeadlessBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_name(&mut self) -> NonZeroU32 {
        let name = NonZeroU32::MIN.saturating_add(self.issued);
        self.issued += 1;
        name
    }

    /// Number of objects of any kind that have not been freed.
    pub fn live_objects(&self) -> usize {
        self.shaders.len()
            + self.programs.len()
            + self.vertex_arrays.len()
            + self.buffers.len()
            + self.textures.len()
    }

    pub fn shader_count(&self) -> usize {
        self.shaders.len()
    }

    pub fn program_count(&self) -> usize {
        self.programs.len()
    }

    pub fn vertex_array_count(&self) -> usize {
        self.vertex_arrays.len()
    }

    pub fn buffer_count(&self) -> usize {
        self.buffers.len()
    }

    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    pub fn is_shader_alive(&self, shader: ShaderId) -> bool {
        self.shaders.contains_key(&shader)
    }

    pub fn shader_stage(&self, shader: ShaderId) -> Option<ShaderStage> {
        self.shaders.get(&shader).map(|s| s.stage)
    }

    /// Stages currently attached to `program`.
    pub fn program_stages(&self, program: ProgramId) -> Option<&[ShaderId]> {
        self.programs.get(&program).map(|p| p.stages.as_slice())
    }

    pub fn texture_size(&self, texture: TextureId) -> Option<(u32, u32)> {
        self.textures.get(&texture).copied()
    }

    /// Byte length and target of a buffer.
    pub fn buffer_info(&self, buffer: BufferId) -> Option<(BufferTarget, usize)> {
        self.buffers.get(&buffer).copied()
    }

    /// Component count of an enabled attribute of `vao`.
    pub fn attribute_components(&self, vao: VertexArrayId, location: u32) -> Option<i32> {
        self.attributes.get(&(vao, location)).map(|(_, c)| *c)
    }

    /// Removes a shader once nothing references it anymore.
    fn collect_shader(&mut self, shader: ShaderId) {
        if let Some(object) = self.shaders.get(&shader) {
            if object.delete_pending && object.attached == 0 {
                self.shaders.remove(&shader);
            }
        }
    }
}

fn compile_error(source: &str) -> Option<String> {
    if source.trim().is_empty() {
        return Some("ERROR: 0:1: '' : syntax error: empty shader source".to_string());
    }
    source.lines().enumerate().find_map(|(i, line)| {
        let line = line.trim_start();
        line.strip_prefix("#error")
            .map(|message| format!("ERROR: 0:{}: '#error' : {}", i + 1, message.trim()))
    })
}

fn count_inputs(source: &str) -> u32 {
    source
        .lines()
        .map(str::trim)
        .filter(|line| line.ends_with(';'))
        .filter(|line| {
            line.starts_with("in ") || (line.starts_with("layout") && line.contains(") in "))
        })
        .count() as u32
}

impl GraphicsBackend for HeadlessBackend {
    fn create_shader(&mut self, stage: ShaderStage, source: &str) -> Result<ShaderId, String> {
        if let Some(log) = compile_error(source) {
            // the failed object is created and deleted right away, like GL
            self.next_name();
            return Err(log);
        }
        let id = ShaderId(self.next_name());
        self.shaders.insert(
            id,
            ShaderObject {
                stage,
                source: source.to_string(),
                attached: 0,
                delete_pending: false,
            },
        );
        Ok(id)
    }

    fn delete_shader(&mut self, shader: ShaderId) {
        if let Some(object) = self.shaders.get_mut(&shader) {
            object.delete_pending = true;
        }
        self.collect_shader(shader);
    }

    fn link_program(&mut self, stages: &[ShaderId]) -> Result<ProgramId, String> {
        let id = ProgramId(self.next_name());
        let mut log = Vec::new();
        let mut has_vertex = false;
        let mut has_fragment = false;
        for stage in stages {
            match self.shaders.get(stage) {
                None => log.push(format!("error: shader object {} does not exist", stage.0)),
                Some(object) => {
                    has_vertex |= object.stage == ShaderStage::Vertex;
                    has_fragment |= object.stage == ShaderStage::Fragment;
                    if !object.source.contains("main(") {
                        log.push(format!(
                            "error: no function main() in {} shader",
                            object.stage.name()
                        ));
                    }
                }
            }
        }
        if !has_vertex {
            log.push("error: no vertex shader attached".to_string());
        }
        if !has_fragment {
            log.push("error: no fragment shader attached".to_string());
        }
        if !log.is_empty() {
            return Err(log.join("\n"));
        }

        let mut attributes = 0;
        for stage in stages {
            if let Some(object) = self.shaders.get_mut(stage) {
                object.attached += 1;
                if object.stage == ShaderStage::Vertex {
                    attributes += count_inputs(&object.source);
                }
            }
        }
        self.programs.insert(
            id,
            ProgramObject {
                stages: stages.to_vec(),
                attributes,
            },
        );
        Ok(id)
    }

    fn active_attribute_count(&mut self, program: ProgramId) -> u32 {
        self.programs.get(&program).map_or(0, |p| p.attributes)
    }

    fn detach_shader(&mut self, program: ProgramId, shader: ShaderId) {
        let Some(object) = self.programs.get_mut(&program) else {
            return;
        };
        let Some(pos) = object.stages.iter().position(|s| *s == shader) else {
            return;
        };
        object.stages.remove(pos);
        if let Some(shader_object) = self.shaders.get_mut(&shader) {
            shader_object.attached -= 1;
        }
        self.collect_shader(shader);
    }

    fn delete_program(&mut self, program: ProgramId) {
        let Some(object) = self.programs.remove(&program) else {
            return;
        };
        for shader in object.stages {
            if let Some(shader_object) = self.shaders.get_mut(&shader) {
                shader_object.attached -= 1;
            }
            self.collect_shader(shader);
        }
    }

    fn create_vertex_array(&mut self) -> anyhow::Result<VertexArrayId> {
        let id = VertexArrayId(self.next_name());
        self.vertex_arrays.insert(id);
        Ok(id)
    }

    fn bind_vertex_array(&mut self, vao: Option<VertexArrayId>) {
        self.bound_vertex_array = vao;
    }

    fn create_buffer(&mut self, target: BufferTarget, data: &[u8]) -> anyhow::Result<BufferId> {
        let id = BufferId(self.next_name());
        self.buffers.insert(id, (target, data.len()));
        if target == BufferTarget::Array {
            self.bound_array_buffer = Some(id);
        }
        Ok(id)
    }

    fn vertex_attribute(&mut self, location: u32, components: i32) {
        if let (Some(vao), Some(buffer)) = (self.bound_vertex_array, self.bound_array_buffer) {
            self.attributes.insert((vao, location), (buffer, components));
        }
    }

    fn create_texture(&mut self, width: u32, height: u32, rgba: &[u8]) -> anyhow::Result<TextureId> {
        let expected = width as usize * height as usize * 4;
        if rgba.len() != expected {
            bail!(
                "texture data is {} bytes, a {}x{} RGBA image needs {}",
                rgba.len(),
                width,
                height,
                expected
            );
        }
        let id = TextureId(self.next_name());
        self.textures.insert(id, (width, height));
        Ok(id)
    }

    fn delete_vertex_arrays(&mut self, vaos: &[VertexArrayId]) {
        for vao in vaos {
            self.vertex_arrays.remove(vao);
            self.attributes.retain(|(owner, _), _| owner != vao);
            if self.bound_vertex_array == Some(*vao) {
                self.bound_vertex_array = None;
            }
        }
    }

    fn delete_buffers(&mut self, buffers: &[BufferId]) {
        for buffer in buffers {
            self.buffers.remove(buffer);
            if self.bound_array_buffer == Some(*buffer) {
                self.bound_array_buffer = None;
            }
        }
    }

    fn delete_textures(&mut self, textures: &[TextureId]) {
        for texture in textures {
            self.textures.remove(texture);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VERT: &str = "#version 330 core\nlayout(location = 0) in vec2 pos;\nin vec2 uv;\nvoid main() {}\n";
    const FRAG: &str = "#version 330 core\nout vec4 color;\nvoid main() {}\n";

    #[test]
    fn attached_shader_outlives_delete_until_detached() {
        let mut gl = HeadlessBackend::new();
        let v = gl.create_shader(ShaderStage::Vertex, VERT).unwrap();
        let f = gl.create_shader(ShaderStage::Fragment, FRAG).unwrap();
        let program = gl.link_program(&[v, f]).unwrap();
        assert_eq!(gl.active_attribute_count(program), 2);

        gl.delete_shader(v);
        assert!(gl.is_shader_alive(v));
        gl.detach_shader(program, v);
        assert!(!gl.is_shader_alive(v));

        gl.delete_shader(f);
        gl.delete_program(program);
        assert_eq!(gl.live_objects(), 0);
    }

    #[test]
    fn error_directive_fails_compilation_with_line() {
        let mut gl = HeadlessBackend::new();
        let log = gl
            .create_shader(ShaderStage::Fragment, "void main() {}\n#error broken")
            .unwrap_err();
        assert_eq!(log, "ERROR: 0:2: '#error' : broken");
        assert_eq!(gl.shader_count(), 0);
    }
}
