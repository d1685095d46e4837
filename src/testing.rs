//! Test doubles for the GPU and windowing services.
//!
//! Both fakes append to one shared call log so tests can assert on the
//! relative order of GPU and platform operations.

use std::{
    cell::{Cell, RefCell},
    collections::{HashMap, HashSet},
    rc::Rc,
    sync::Arc,
};

use crate::abs::{BufferTarget, Gpu, Platform, StageKind};

pub const VERTEX_SOURCE: &str = "#version 330 core
layout (location = 0) in vec3 position;
uniform mat4 projection;
void main() { gl_Position = projection * vec4(position, 1.0); }
";

pub const FRAGMENT_SOURCE: &str = "#version 330 core
out vec4 frag_color;
void main() { frag_color = vec4(1.0); }
";

/// Source the fake compiler rejects.
pub const BAD_SOURCE: &str = "#version 330 core
void main() { gl_Position = vec4(position 1.0); }
";

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CreateBuffer(u32),
    BindBuffer(BufferTarget, Option<u32>),
    BufferData(BufferTarget, usize),
    DeleteBuffer(u32),
    CreateVertexArray(u32),
    BindVertexArray(Option<u32>),
    VertexAttribPointer { index: u32, components: i32 },
    EnableVertexAttribArray(u32),
    DeleteVertexArray(u32),
    CreateShader(u32, StageKind),
    CompileShader(u32),
    DeleteShader(u32),
    CreateProgram(u32),
    AttachShader(u32, u32),
    DetachShader(u32, u32),
    LinkProgram(u32),
    UseProgram(Option<u32>),
    DeleteProgram(u32),
    UniformMatrix4(String, [f32; 16]),
    ClearColor([f32; 4]),
    Clear { depth: bool },
    EnableDepthTest,
    DrawArrays(i32),
    DrawElements(i32),
    SetSwapInterval(i32),
    ShowWindow,
    PollEvents,
    SwapBuffers,
    SetTitle(String),
    Terminate,
}

pub type CallLog = Rc<RefCell<Vec<Call>>>;

/// In-memory GPU that records calls and tracks object lifetimes.
///
/// A shader fails to compile when its source lacks `void main` or contains
/// the malformed constructor from [`BAD_SOURCE`]. Uniform lookups succeed for `uniform mat4 <name>;`
/// declarations present in the sources linked into the program. Deleting an
/// object twice panics.
#[derive(Default)]
pub struct FakeGpu {
    calls: CallLog,
    next_id: Cell<u32>,
    live: RefCell<HashSet<u32>>,
    sources: RefCell<HashMap<u32, String>>,
    attached: RefCell<HashMap<u32, Vec<u32>>>,
    linked_sources: RefCell<HashMap<u32, String>>,
    pub fail_link: Cell<bool>,
}

impl FakeGpu {
    pub fn with_log(calls: &CallLog) -> Self {
        Self {
            calls: Rc::clone(calls),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn count(&self, predicate: impl Fn(&Call) -> bool) -> usize {
        self.calls.borrow().iter().filter(|c| predicate(c)).count()
    }

    pub fn live_objects(&self) -> usize {
        self.live.borrow().len()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn allocate(&self) -> u32 {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        self.live.borrow_mut().insert(id);
        id
    }

    fn release(&self, id: u32) {
        assert!(self.live.borrow_mut().remove(&id), "object {id} deleted twice");
    }
}

impl Gpu for FakeGpu {
    type Buffer = u32;
    type VertexArray = u32;
    type Shader = u32;
    type Program = u32;
    type UniformLocation = String;

    fn version(&self) -> String {
        "3.3.0 Fake".to_owned()
    }

    fn create_buffer(&self) -> Result<u32, String> {
        let id = self.allocate();
        self.record(Call::CreateBuffer(id));
        Ok(id)
    }

    fn bind_buffer(&self, target: BufferTarget, buffer: Option<u32>) {
        self.record(Call::BindBuffer(target, buffer));
    }

    fn buffer_data(&self, target: BufferTarget, data: &[u8]) {
        self.record(Call::BufferData(target, data.len()));
    }

    fn delete_buffer(&self, buffer: u32) {
        self.release(buffer);
        self.record(Call::DeleteBuffer(buffer));
    }

    fn create_vertex_array(&self) -> Result<u32, String> {
        let id = self.allocate();
        self.record(Call::CreateVertexArray(id));
        Ok(id)
    }

    fn bind_vertex_array(&self, vertex_array: Option<u32>) {
        self.record(Call::BindVertexArray(vertex_array));
    }

    fn vertex_attrib_pointer_f32(&self, index: u32, components: i32) {
        self.record(Call::VertexAttribPointer { index, components });
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        self.record(Call::EnableVertexAttribArray(index));
    }

    fn delete_vertex_array(&self, vertex_array: u32) {
        self.release(vertex_array);
        self.record(Call::DeleteVertexArray(vertex_array));
    }

    fn create_shader(&self, stage: StageKind) -> Result<u32, String> {
        let id = self.allocate();
        self.record(Call::CreateShader(id, stage));
        Ok(id)
    }

    fn shader_source(&self, shader: u32, source: &str) {
        self.sources.borrow_mut().insert(shader, source.to_owned());
    }

    fn compile_shader(&self, shader: u32) {
        self.record(Call::CompileShader(shader));
    }

    fn shader_compile_status(&self, shader: u32) -> bool {
        let sources = self.sources.borrow();
        let source = sources.get(&shader).map(String::as_str).unwrap_or("");
        source.contains("void main") && !source.contains("position 1.0")
    }

    fn shader_info_log(&self, shader: u32) -> String {
        if self.shader_compile_status(shader) {
            String::new()
        } else {
            "0:2(41): error: syntax error, unexpected FLOATCONSTANT".to_owned()
        }
    }

    fn delete_shader(&self, shader: u32) {
        self.release(shader);
        self.record(Call::DeleteShader(shader));
    }

    fn create_program(&self) -> Result<u32, String> {
        let id = self.allocate();
        self.record(Call::CreateProgram(id));
        Ok(id)
    }

    fn attach_shader(&self, program: u32, shader: u32) {
        self.attached
            .borrow_mut()
            .entry(program)
            .or_default()
            .push(shader);
        self.record(Call::AttachShader(program, shader));
    }

    fn detach_shader(&self, program: u32, shader: u32) {
        if let Some(shaders) = self.attached.borrow_mut().get_mut(&program) {
            shaders.retain(|s| *s != shader);
        }
        self.record(Call::DetachShader(program, shader));
    }

    fn link_program(&self, program: u32) {
        let sources = self.sources.borrow();
        let linked = self
            .attached
            .borrow()
            .get(&program)
            .into_iter()
            .flatten()
            .filter_map(|shader| sources.get(shader))
            .cloned()
            .collect::<Vec<_>>()
            .join("\n");
        self.linked_sources.borrow_mut().insert(program, linked);
        self.record(Call::LinkProgram(program));
    }

    fn program_link_status(&self, _program: u32) -> bool {
        !self.fail_link.get()
    }

    fn program_info_log(&self, _program: u32) -> String {
        if self.fail_link.get() {
            "error: failed to link: fragment shader output mismatch".to_owned()
        } else {
            String::new()
        }
    }

    fn use_program(&self, program: Option<u32>) {
        self.record(Call::UseProgram(program));
    }

    fn delete_program(&self, program: u32) {
        self.release(program);
        self.record(Call::DeleteProgram(program));
    }

    fn uniform_location(&self, program: u32, name: &str) -> Option<String> {
        let declaration = format!("uniform mat4 {name};");
        self.linked_sources
            .borrow()
            .get(&program)
            .filter(|source| source.contains(&declaration))
            .map(|_| name.to_owned())
    }

    fn uniform_matrix4(&self, location: &String, columns: &[f32; 16]) {
        self.record(Call::UniformMatrix4(location.clone(), *columns));
    }

    fn clear_color(&self, red: f32, green: f32, blue: f32, alpha: f32) {
        self.record(Call::ClearColor([red, green, blue, alpha]));
    }

    fn clear(&self, depth: bool) {
        self.record(Call::Clear { depth });
    }

    fn enable_depth_test(&self) {
        self.record(Call::EnableDepthTest);
    }

    fn draw_arrays(&self, count: i32) {
        self.record(Call::DrawArrays(count));
    }

    fn draw_elements(&self, count: i32) {
        self.record(Call::DrawElements(count));
    }
}

/// Platform that requests close after a fixed number of polled frames.
pub struct FakePlatform {
    gpu: Arc<FakeGpu>,
    calls: CallLog,
    frames: usize,
    polled: usize,
}

impl FakePlatform {
    pub fn new(frames: usize) -> Self {
        let calls = CallLog::default();
        Self {
            gpu: Arc::new(FakeGpu::with_log(&calls)),
            calls,
            frames,
            polled: 0,
        }
    }

    pub fn calls(&self) -> CallLog {
        Rc::clone(&self.calls)
    }
}

impl Platform for FakePlatform {
    type Gpu = FakeGpu;

    fn gpu(&self) -> &Arc<FakeGpu> {
        &self.gpu
    }

    fn set_swap_interval(&mut self, interval: i32) {
        self.calls.borrow_mut().push(Call::SetSwapInterval(interval));
    }

    fn show_window(&mut self) {
        self.calls.borrow_mut().push(Call::ShowWindow);
    }

    fn poll_events(&mut self) {
        self.polled += 1;
        self.calls.borrow_mut().push(Call::PollEvents);
    }

    fn should_close(&self) -> bool {
        self.polled >= self.frames
    }

    fn swap_buffers(&mut self) {
        self.calls.borrow_mut().push(Call::SwapBuffers);
    }

    fn set_title(&mut self, title: &str) {
        self.calls.borrow_mut().push(Call::SetTitle(title.to_owned()));
    }

    fn terminate(self) {
        self.calls.borrow_mut().push(Call::Terminate);
    }
}
