//! The slice of OpenGL the renderer talks to.
//!
//! [`Gpu`] lists every call the mesh, shader and render loop code makes. The
//! real implementation forwards to [`glow::Context`]; tests substitute a
//! recording fake.

use glow::HasContext;

use super::shader::StageKind;

/// Binding point for a buffer object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferTarget {
    Array,
    ElementArray,
}

impl BufferTarget {
    fn gl_enum(self) -> u32 {
        match self {
            BufferTarget::Array => glow::ARRAY_BUFFER,
            BufferTarget::ElementArray => glow::ELEMENT_ARRAY_BUFFER,
        }
    }
}

/// GPU API service.
///
/// Every method assumes the context that produced `self` is current on the
/// calling thread. Handles are only meaningful for the context that created
/// them and are never shared outside the component that created them.
pub trait Gpu {
    type Buffer: Copy;
    type VertexArray: Copy;
    type Shader: Copy;
    type Program: Copy;
    type UniformLocation;

    fn version(&self) -> String;

    fn create_buffer(&self) -> Result<Self::Buffer, String>;
    fn bind_buffer(&self, target: BufferTarget, buffer: Option<Self::Buffer>);
    /// Uploads static data to the buffer currently bound at `target`.
    fn buffer_data(&self, target: BufferTarget, data: &[u8]);
    fn delete_buffer(&self, buffer: Self::Buffer);

    fn create_vertex_array(&self) -> Result<Self::VertexArray, String>;
    fn bind_vertex_array(&self, vertex_array: Option<Self::VertexArray>);
    /// Describes attribute `index` as `components` tightly packed floats.
    fn vertex_attrib_pointer_f32(&self, index: u32, components: i32);
    fn enable_vertex_attrib_array(&self, index: u32);
    fn delete_vertex_array(&self, vertex_array: Self::VertexArray);

    fn create_shader(&self, stage: StageKind) -> Result<Self::Shader, String>;
    fn shader_source(&self, shader: Self::Shader, source: &str);
    fn compile_shader(&self, shader: Self::Shader);
    fn shader_compile_status(&self, shader: Self::Shader) -> bool;
    fn shader_info_log(&self, shader: Self::Shader) -> String;
    fn delete_shader(&self, shader: Self::Shader);

    fn create_program(&self) -> Result<Self::Program, String>;
    fn attach_shader(&self, program: Self::Program, shader: Self::Shader);
    fn detach_shader(&self, program: Self::Program, shader: Self::Shader);
    fn link_program(&self, program: Self::Program);
    fn program_link_status(&self, program: Self::Program) -> bool;
    fn program_info_log(&self, program: Self::Program) -> String;
    fn use_program(&self, program: Option<Self::Program>);
    fn delete_program(&self, program: Self::Program);

    fn uniform_location(
        &self,
        program: Self::Program,
        name: &str,
    ) -> Option<Self::UniformLocation>;
    fn uniform_matrix4(&self, location: &Self::UniformLocation, columns: &[f32; 16]);

    fn clear_color(&self, red: f32, green: f32, blue: f32, alpha: f32);
    fn clear(&self, depth: bool);
    fn enable_depth_test(&self);
    /// Draws `count` vertices of the bound vertex array as a triangle list.
    fn draw_arrays(&self, count: i32);
    /// Draws `count` `u32` indices of the bound element buffer as a triangle list.
    fn draw_elements(&self, count: i32);
}

impl Gpu for glow::Context {
    type Buffer = <glow::Context as HasContext>::Buffer;
    type VertexArray = <glow::Context as HasContext>::VertexArray;
    type Shader = <glow::Context as HasContext>::Shader;
    type Program = <glow::Context as HasContext>::Program;
    type UniformLocation = <glow::Context as HasContext>::UniformLocation;

    fn version(&self) -> String {
        unsafe { self.get_parameter_string(glow::VERSION) }
    }

    fn create_buffer(&self) -> Result<Self::Buffer, String> {
        unsafe { HasContext::create_buffer(self) }
    }

    fn bind_buffer(&self, target: BufferTarget, buffer: Option<Self::Buffer>) {
        unsafe { HasContext::bind_buffer(self, target.gl_enum(), buffer) }
    }

    fn buffer_data(&self, target: BufferTarget, data: &[u8]) {
        unsafe { self.buffer_data_u8_slice(target.gl_enum(), data, glow::STATIC_DRAW) }
    }

    fn delete_buffer(&self, buffer: Self::Buffer) {
        unsafe { HasContext::delete_buffer(self, buffer) }
    }

    fn create_vertex_array(&self) -> Result<Self::VertexArray, String> {
        unsafe { HasContext::create_vertex_array(self) }
    }

    fn bind_vertex_array(&self, vertex_array: Option<Self::VertexArray>) {
        unsafe { HasContext::bind_vertex_array(self, vertex_array) }
    }

    fn vertex_attrib_pointer_f32(&self, index: u32, components: i32) {
        unsafe {
            HasContext::vertex_attrib_pointer_f32(
                self,
                index,
                components,
                glow::FLOAT,
                false,
                0,
                0,
            )
        }
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        unsafe { HasContext::enable_vertex_attrib_array(self, index) }
    }

    fn delete_vertex_array(&self, vertex_array: Self::VertexArray) {
        unsafe { HasContext::delete_vertex_array(self, vertex_array) }
    }

    fn create_shader(&self, stage: StageKind) -> Result<Self::Shader, String> {
        let shader_type = match stage {
            StageKind::Vertex => glow::VERTEX_SHADER,
            StageKind::Fragment => glow::FRAGMENT_SHADER,
        };
        unsafe { HasContext::create_shader(self, shader_type) }
    }

    fn shader_source(&self, shader: Self::Shader, source: &str) {
        unsafe { HasContext::shader_source(self, shader, source) }
    }

    fn compile_shader(&self, shader: Self::Shader) {
        unsafe { HasContext::compile_shader(self, shader) }
    }

    fn shader_compile_status(&self, shader: Self::Shader) -> bool {
        unsafe { self.get_shader_compile_status(shader) }
    }

    fn shader_info_log(&self, shader: Self::Shader) -> String {
        unsafe { self.get_shader_info_log(shader) }
    }

    fn delete_shader(&self, shader: Self::Shader) {
        unsafe { HasContext::delete_shader(self, shader) }
    }

    fn create_program(&self) -> Result<Self::Program, String> {
        unsafe { HasContext::create_program(self) }
    }

    fn attach_shader(&self, program: Self::Program, shader: Self::Shader) {
        unsafe { HasContext::attach_shader(self, program, shader) }
    }

    fn detach_shader(&self, program: Self::Program, shader: Self::Shader) {
        unsafe { HasContext::detach_shader(self, program, shader) }
    }

    fn link_program(&self, program: Self::Program) {
        unsafe { HasContext::link_program(self, program) }
    }

    fn program_link_status(&self, program: Self::Program) -> bool {
        unsafe { self.get_program_link_status(program) }
    }

    fn program_info_log(&self, program: Self::Program) -> String {
        unsafe { self.get_program_info_log(program) }
    }

    fn use_program(&self, program: Option<Self::Program>) {
        unsafe { HasContext::use_program(self, program) }
    }

    fn delete_program(&self, program: Self::Program) {
        unsafe { HasContext::delete_program(self, program) }
    }

    fn uniform_location(
        &self,
        program: Self::Program,
        name: &str,
    ) -> Option<Self::UniformLocation> {
        unsafe { self.get_uniform_location(program, name) }
    }

    fn uniform_matrix4(&self, location: &Self::UniformLocation, columns: &[f32; 16]) {
        unsafe { self.uniform_matrix_4_f32_slice(Some(location), false, columns) }
    }

    fn clear_color(&self, red: f32, green: f32, blue: f32, alpha: f32) {
        unsafe { HasContext::clear_color(self, red, green, blue, alpha) }
    }

    fn clear(&self, depth: bool) {
        let mut mask = glow::COLOR_BUFFER_BIT;
        if depth {
            mask |= glow::DEPTH_BUFFER_BIT;
        }
        unsafe { HasContext::clear(self, mask) }
    }

    fn enable_depth_test(&self) {
        unsafe { self.enable(glow::DEPTH_TEST) }
    }

    fn draw_arrays(&self, count: i32) {
        unsafe { HasContext::draw_arrays(self, glow::TRIANGLES, 0, count) }
    }

    fn draw_elements(&self, count: i32) {
        unsafe {
            HasContext::draw_elements(self, glow::TRIANGLES, count, glow::UNSIGNED_INT, 0)
        }
    }
}
