use anyhow::anyhow;
use glow::HasContext;

use super::{
    BufferId, BufferTarget, GraphicsBackend, ProgramId, ShaderId, TextureId, VertexArrayId,
};
use crate::data_structures::shader::ShaderStage;

/// OpenGL backend on top of a `glow` context.
///
/// # Safety
///
/// Every method issues raw GL calls. The context handed to
/// [`GlowBackend::new`] must be current on the calling thread for as long as
/// the backend is used.
pub struct GlowBackend {
    gl: glow::Context,
}

impl GlowBackend {
    pub fn new(gl: glow::Context) -> Self {
        Self { gl }
    }

    pub fn context(&self) -> &glow::Context {
        &self.gl
    }

    pub fn into_inner(self) -> glow::Context {
        self.gl
    }
}

fn gl_stage(stage: ShaderStage) -> u32 {
    match stage {
        ShaderStage::Vertex => glow::VERTEX_SHADER,
        ShaderStage::Geometry => glow::GEOMETRY_SHADER,
        ShaderStage::Fragment => glow::FRAGMENT_SHADER,
    }
}

fn gl_target(target: BufferTarget) -> u32 {
    match target {
        BufferTarget::Array => glow::ARRAY_BUFFER,
        BufferTarget::ElementArray => glow::ELEMENT_ARRAY_BUFFER,
    }
}

impl GraphicsBackend for GlowBackend {
    fn create_shader(&mut self, stage: ShaderStage, source: &str) -> Result<ShaderId, String> {
        unsafe {
            let shader = self.gl.create_shader(gl_stage(stage))?;
            self.gl.shader_source(shader, source);
            self.gl.compile_shader(shader);
            if !self.gl.get_shader_compile_status(shader) {
                let log = self.gl.get_shader_info_log(shader);
                self.gl.delete_shader(shader);
                return Err(log);
            }
            Ok(ShaderId(shader.0))
        }
    }

    fn delete_shader(&mut self, shader: ShaderId) {
        unsafe { self.gl.delete_shader(glow::NativeShader(shader.0)) }
    }

    fn link_program(&mut self, stages: &[ShaderId]) -> Result<ProgramId, String> {
        unsafe {
            let program = self.gl.create_program()?;
            for stage in stages {
                self.gl.attach_shader(program, glow::NativeShader(stage.0));
            }
            self.gl.link_program(program);
            if !self.gl.get_program_link_status(program) {
                let log = self.gl.get_program_info_log(program);
                for stage in stages {
                    self.gl.detach_shader(program, glow::NativeShader(stage.0));
                }
                self.gl.delete_program(program);
                return Err(log);
            }
            Ok(ProgramId(program.0))
        }
    }

    fn active_attribute_count(&mut self, program: ProgramId) -> u32 {
        unsafe { self.gl.get_active_attributes(glow::NativeProgram(program.0)) }
    }

    fn detach_shader(&mut self, program: ProgramId, shader: ShaderId) {
        unsafe {
            self.gl
                .detach_shader(glow::NativeProgram(program.0), glow::NativeShader(shader.0))
        }
    }

    fn delete_program(&mut self, program: ProgramId) {
        unsafe { self.gl.delete_program(glow::NativeProgram(program.0)) }
    }

    fn create_vertex_array(&mut self) -> anyhow::Result<VertexArrayId> {
        let vao = unsafe { self.gl.create_vertex_array() }.map_err(|e| anyhow!(e))?;
        Ok(VertexArrayId(vao.0))
    }

    fn bind_vertex_array(&mut self, vao: Option<VertexArrayId>) {
        unsafe {
            self.gl
                .bind_vertex_array(vao.map(|v| glow::NativeVertexArray(v.0)))
        }
    }

    fn create_buffer(&mut self, target: BufferTarget, data: &[u8]) -> anyhow::Result<BufferId> {
        unsafe {
            let buffer = self.gl.create_buffer().map_err(|e| anyhow!(e))?;
            self.gl.bind_buffer(gl_target(target), Some(buffer));
            self.gl
                .buffer_data_u8_slice(gl_target(target), data, glow::STATIC_DRAW);
            Ok(BufferId(buffer.0))
        }
    }

    fn vertex_attribute(&mut self, location: u32, components: i32) {
        let stride = components * std::mem::size_of::<f32>() as i32;
        unsafe {
            self.gl
                .vertex_attrib_pointer_f32(location, components, glow::FLOAT, false, stride, 0);
            self.gl.enable_vertex_attrib_array(location);
        }
    }

    fn create_texture(&mut self, width: u32, height: u32, rgba: &[u8]) -> anyhow::Result<TextureId> {
        unsafe {
            let texture = self.gl.create_texture().map_err(|e| anyhow!(e))?;
            self.gl.bind_texture(glow::TEXTURE_2D, Some(texture));
            self.gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MIN_FILTER,
                glow::LINEAR as i32,
            );
            self.gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MAG_FILTER,
                glow::LINEAR as i32,
            );
            self.gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                glow::RGBA as i32,
                width as i32,
                height as i32,
                0,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                Some(rgba),
            );
            self.gl.bind_texture(glow::TEXTURE_2D, None);
            Ok(TextureId(texture.0))
        }
    }

    fn delete_vertex_arrays(&mut self, vaos: &[VertexArrayId]) {
        for vao in vaos {
            unsafe { self.gl.delete_vertex_array(glow::NativeVertexArray(vao.0)) }
        }
    }

    fn delete_buffers(&mut self, buffers: &[BufferId]) {
        for buffer in buffers {
            unsafe { self.gl.delete_buffer(glow::NativeBuffer(buffer.0)) }
        }
    }

    fn delete_textures(&mut self, textures: &[TextureId]) {
        for texture in textures {
            unsafe { self.gl.delete_texture(glow::NativeTexture(texture.0)) }
        }
    }
}
