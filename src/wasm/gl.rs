use js_sys::{Float32Array, Object, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    HtmlCanvasElement, WebGl2RenderingContext as GL, WebGlBuffer, WebGlProgram, WebGlShader,
    WebGlUniformLocation, WebGlVertexArrayObject,
};

use crate::backend::Backend;
use crate::error::SkyError;
use crate::shader::{FRAGMENT_SRC, POSITION_ATTRIBUTE, QUAD_VERTICES, VERTEX_SRC};
use crate::uniforms::{Uniform, UniformValue};

/// WebGL2 program drawing the sky quad.
pub struct GlBackend {
    gl: GL,
    canvas: HtmlCanvasElement,
    program: WebGlProgram,
    vao: WebGlVertexArrayObject,
    _quad: WebGlBuffer,
    locations: Vec<Option<WebGlUniformLocation>>,
}

impl GlBackend {
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, SkyError> {
        let options = Object::new();
        Reflect::set(&options, &"antialias".into(), &JsValue::FALSE)?;
        Reflect::set(&options, &"alpha".into(), &JsValue::FALSE)?;
        let gl: GL = canvas
            .get_context_with_context_options("webgl2", &options)?
            .ok_or(SkyError::WebGl2Unavailable)?
            .dyn_into()
            .map_err(|_| SkyError::WebGl2Unavailable)?;

        let vertex = compile(&gl, GL::VERTEX_SHADER, "vertex", VERTEX_SRC)?;
        let fragment = compile(&gl, GL::FRAGMENT_SHADER, "fragment", FRAGMENT_SRC)?;
        let program = link(&gl, &vertex, &fragment)?;
        gl.use_program(Some(&program));

        let vao = gl
            .create_vertex_array()
            .ok_or(SkyError::ResourceCreation("vertex array"))?;
        gl.bind_vertex_array(Some(&vao));
        let quad = gl
            .create_buffer()
            .ok_or(SkyError::ResourceCreation("quad buffer"))?;
        gl.bind_buffer(GL::ARRAY_BUFFER, Some(&quad));
        let vertices = Float32Array::from(&QUAD_VERTICES[..]);
        gl.buffer_data_with_array_buffer_view(GL::ARRAY_BUFFER, &vertices, GL::STATIC_DRAW);

        let position = gl.get_attrib_location(&program, POSITION_ATTRIBUTE);
        if position < 0 {
            return Err(SkyError::ResourceCreation("position attribute"));
        }
        gl.enable_vertex_attrib_array(position as u32);
        gl.vertex_attrib_pointer_with_i32(position as u32, 2, GL::FLOAT, false, 0, 0);

        // Inputs the compiler optimised away come back as None; writes to
        // them are no-ops.
        let locations = Uniform::ALL
            .iter()
            .map(|u| gl.get_uniform_location(&program, u.name()))
            .collect();

        log::info!("sky program linked");
        Ok(Self {
            gl,
            canvas: canvas.clone(),
            program,
            vao,
            _quad: quad,
            locations,
        })
    }
}

impl Backend for GlBackend {
    fn set_uniform(&mut self, uniform: Uniform, value: UniformValue) {
        let location = self.locations.get(uniform.index()).and_then(Option::as_ref);
        match value {
            UniformValue::Float(v) => self.gl.uniform1f(location, v),
            UniformValue::Vec2([x, y]) => self.gl.uniform2f(location, x, y),
            UniformValue::Vec3([x, y, z]) => self.gl.uniform3f(location, x, y, z),
        }
    }

    fn resize(&mut self, width: u32, height: u32) {
        if self.canvas.width() != width {
            self.canvas.set_width(width);
        }
        if self.canvas.height() != height {
            self.canvas.set_height(height);
        }
        self.gl.viewport(0, 0, width as i32, height as i32);
    }

    fn draw(&mut self) {
        self.gl.use_program(Some(&self.program));
        self.gl.bind_vertex_array(Some(&self.vao));
        self.gl.draw_arrays(GL::TRIANGLE_STRIP, 0, 4);
    }
}

fn compile(gl: &GL, kind: u32, stage: &'static str, src: &str) -> Result<WebGlShader, SkyError> {
    let shader = gl
        .create_shader(kind)
        .ok_or(SkyError::ResourceCreation("shader"))?;
    gl.shader_source(&shader, src);
    gl.compile_shader(&shader);
    let ok = gl
        .get_shader_parameter(&shader, GL::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false);
    if ok {
        Ok(shader)
    } else {
        let log = gl.get_shader_info_log(&shader).unwrap_or_default();
        gl.delete_shader(Some(&shader));
        Err(SkyError::ShaderCompile { stage, log })
    }
}

fn link(gl: &GL, vertex: &WebGlShader, fragment: &WebGlShader) -> Result<WebGlProgram, SkyError> {
    let program = gl
        .create_program()
        .ok_or(SkyError::ResourceCreation("program"))?;
    gl.attach_shader(&program, vertex);
    gl.attach_shader(&program, fragment);
    gl.link_program(&program);
    let ok = gl
        .get_program_parameter(&program, GL::LINK_STATUS)
        .as_bool()
        .unwrap_or(false);
    if ok {
        Ok(program)
    } else {
        let log = gl.get_program_info_log(&program).unwrap_or_default();
        gl.delete_program(Some(&program));
        Err(SkyError::ProgramLink(log))
    }
}
