/// WebGL2 render backend for the globe
use globe_core::geometry::FLOATS_PER_VERTEX;
use globe_core::{GlobeError, Mesh, RenderBackend, Scene, Surface, TextureId, Viewport};
use js_sys::{Float32Array, Object, Reflect, Uint32Array};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    HtmlCanvasElement, HtmlImageElement, WebGl2RenderingContext as Gl, WebGlProgram,
    WebGlShader, WebGlTexture, WebGlUniformLocation, WebGlVertexArrayObject,
};

const VERTEX_SHADER: &str = r#"#version 300 es
layout(location = 0) in vec3 a_position;
layout(location = 1) in vec3 a_normal;
layout(location = 2) in vec2 a_uv;

uniform mat4 u_model;
uniform mat4 u_view_projection;

out vec3 v_normal;
out vec2 v_uv;

void main() {
    v_normal = mat3(u_model) * a_normal;
    v_uv = a_uv;
    gl_Position = u_view_projection * u_model * vec4(a_position, 1.0);
}
"#;

const FRAGMENT_SHADER: &str = r#"#version 300 es
precision highp float;

in vec3 v_normal;
in vec2 v_uv;

uniform vec3 u_base_color;
uniform bool u_use_map;
uniform sampler2D u_map;
uniform float u_roughness;
uniform float u_metalness;
uniform vec3 u_ambient;
uniform vec3 u_sun_color;
uniform vec3 u_sun_direction;

out vec4 out_color;

vec3 linear_to_srgb(vec3 c) {
    vec3 low = c * 12.92;
    vec3 high = 1.055 * pow(c, vec3(1.0 / 2.4)) - 0.055;
    return mix(low, high, step(vec3(0.0031308), c));
}

void main() {
    vec3 albedo = u_use_map ? texture(u_map, v_uv).rgb : u_base_color;
    vec3 diffuse = albedo * (1.0 - u_metalness);

    float lambert = max(dot(normalize(v_normal), u_sun_direction), 0.0);
    // Dielectric highlight, gone entirely on a fully rough surface
    vec3 specular = vec3(0.04) * (1.0 - u_roughness) * lambert * u_sun_color;

    vec3 color = diffuse * (u_ambient + u_sun_color * lambert) + specular;
    out_color = vec4(linear_to_srgb(color), 1.0);
}
"#;

const POSITION_LOCATION: u32 = 0;
const NORMAL_LOCATION: u32 = 1;
const UV_LOCATION: u32 = 2;

struct Uniforms {
    model: Option<WebGlUniformLocation>,
    view_projection: Option<WebGlUniformLocation>,
    base_color: Option<WebGlUniformLocation>,
    use_map: Option<WebGlUniformLocation>,
    map: Option<WebGlUniformLocation>,
    roughness: Option<WebGlUniformLocation>,
    metalness: Option<WebGlUniformLocation>,
    ambient: Option<WebGlUniformLocation>,
    sun_color: Option<WebGlUniformLocation>,
    sun_direction: Option<WebGlUniformLocation>,
}

impl Uniforms {
    fn locate(gl: &Gl, program: &WebGlProgram) -> Self {
        let at = |name: &str| gl.get_uniform_location(program, name);
        Self {
            model: at("u_model"),
            view_projection: at("u_view_projection"),
            base_color: at("u_base_color"),
            use_map: at("u_use_map"),
            map: at("u_map"),
            roughness: at("u_roughness"),
            metalness: at("u_metalness"),
            ambient: at("u_ambient"),
            sun_color: at("u_sun_color"),
            sun_direction: at("u_sun_direction"),
        }
    }
}

/// Antialiased, transparent WebGL2 surface on one canvas
pub struct WebGlBackend {
    canvas: HtmlCanvasElement,
    gl: Gl,
    program: WebGlProgram,
    uniforms: Uniforms,
    vao: Option<WebGlVertexArrayObject>,
    index_count: i32,
    textures: Vec<WebGlTexture>,
}

impl WebGlBackend {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, GlobeError> {
        let gl = context(&canvas)?;
        let program = link_program(&gl, VERTEX_SHADER, FRAGMENT_SHADER)?;
        let uniforms = Uniforms::locate(&gl, &program);

        gl.enable(Gl::DEPTH_TEST);
        gl.clear_color(0.0, 0.0, 0.0, 0.0);

        Ok(Self {
            canvas,
            gl,
            program,
            uniforms,
            vao: None,
            index_count: 0,
            textures: Vec::new(),
        })
    }
}

fn context(canvas: &HtmlCanvasElement) -> Result<Gl, GlobeError> {
    let options = Object::new();
    for flag in ["antialias", "alpha"] {
        Reflect::set(&options, &JsValue::from_str(flag), &JsValue::TRUE)
            .map_err(|e| GlobeError::Dom(format!("{:?}", e)))?;
    }

    canvas
        .get_context_with_context_options("webgl2", &options)
        .ok()
        .flatten()
        .and_then(|ctx| ctx.dyn_into::<Gl>().ok())
        .ok_or(GlobeError::ContextUnavailable)
}

fn compile_shader(gl: &Gl, kind: u32, source: &str) -> Result<WebGlShader, GlobeError> {
    let shader = gl.create_shader(kind).ok_or(GlobeError::Resource("shader"))?;
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);

    let compiled = gl
        .get_shader_parameter(&shader, Gl::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false);
    if compiled {
        Ok(shader)
    } else {
        let log = gl.get_shader_info_log(&shader).unwrap_or_default();
        gl.delete_shader(Some(&shader));
        Err(GlobeError::Shader(log))
    }
}

fn link_program(gl: &Gl, vertex: &str, fragment: &str) -> Result<WebGlProgram, GlobeError> {
    let vs = compile_shader(gl, Gl::VERTEX_SHADER, vertex)?;
    let fs = compile_shader(gl, Gl::FRAGMENT_SHADER, fragment)?;
    let program = gl.create_program().ok_or(GlobeError::Resource("program"))?;
    gl.attach_shader(&program, &vs);
    gl.attach_shader(&program, &fs);
    gl.link_program(&program);

    // Shaders are no longer needed once linked
    gl.delete_shader(Some(&vs));
    gl.delete_shader(Some(&fs));

    let linked = gl
        .get_program_parameter(&program, Gl::LINK_STATUS)
        .as_bool()
        .unwrap_or(false);
    if linked {
        Ok(program)
    } else {
        let log = gl.get_program_info_log(&program).unwrap_or_default();
        gl.delete_program(Some(&program));
        Err(GlobeError::Program(log))
    }
}

impl RenderBackend for WebGlBackend {
    type Image = HtmlImageElement;

    fn layout_size(&self) -> Viewport {
        Viewport::new(
            self.canvas.client_width().max(0) as u32,
            self.canvas.client_height().max(0) as u32,
        )
    }

    fn set_size(&mut self, viewport: Viewport) {
        // Style size is left to CSS; only the drawing buffer follows layout
        self.canvas.set_width(viewport.width);
        self.canvas.set_height(viewport.height);
        self.gl.viewport(0, 0, viewport.width as i32, viewport.height as i32);
    }

    fn upload_mesh(&mut self, mesh: &Mesh) -> Result<(), GlobeError> {
        let gl = &self.gl;
        let vao = gl.create_vertex_array().ok_or(GlobeError::Resource("vertex array"))?;
        gl.bind_vertex_array(Some(&vao));

        let vertex_buffer = gl.create_buffer().ok_or(GlobeError::Resource("vertex buffer"))?;
        gl.bind_buffer(Gl::ARRAY_BUFFER, Some(&vertex_buffer));
        let vertices = Float32Array::from(mesh.interleaved().as_slice());
        gl.buffer_data_with_array_buffer_view(Gl::ARRAY_BUFFER, &vertices, Gl::STATIC_DRAW);

        let stride = (FLOATS_PER_VERTEX * 4) as i32;
        for (location, size, offset) in [
            (POSITION_LOCATION, 3, 0),
            (NORMAL_LOCATION, 3, 12),
            (UV_LOCATION, 2, 24),
        ] {
            gl.enable_vertex_attrib_array(location);
            gl.vertex_attrib_pointer_with_i32(location, size, Gl::FLOAT, false, stride, offset);
        }

        let index_buffer = gl.create_buffer().ok_or(GlobeError::Resource("index buffer"))?;
        gl.bind_buffer(Gl::ELEMENT_ARRAY_BUFFER, Some(&index_buffer));
        let indices = Uint32Array::from(mesh.indices.as_slice());
        gl.buffer_data_with_array_buffer_view(
            Gl::ELEMENT_ARRAY_BUFFER,
            &indices,
            Gl::STATIC_DRAW,
        );

        gl.bind_vertex_array(None);
        self.vao = Some(vao);
        self.index_count = mesh.indices.len() as i32;
        Ok(())
    }

    fn upload_texture(&mut self, image: &HtmlImageElement) -> Result<TextureId, GlobeError> {
        let gl = &self.gl;
        let texture = gl.create_texture().ok_or(GlobeError::Resource("texture"))?;
        gl.bind_texture(Gl::TEXTURE_2D, Some(&texture));
        gl.pixel_storei(Gl::UNPACK_FLIP_Y_WEBGL, 1);

        // The GPU decodes sRGB texels to linear on sampling
        let uploaded = gl.tex_image_2d_with_u32_and_u32_and_html_image_element(
            Gl::TEXTURE_2D,
            0,
            Gl::SRGB8_ALPHA8 as i32,
            Gl::RGBA,
            Gl::UNSIGNED_BYTE,
            image,
        );
        gl.pixel_storei(Gl::UNPACK_FLIP_Y_WEBGL, 0);

        if let Err(e) = uploaded {
            gl.bind_texture(Gl::TEXTURE_2D, None);
            gl.delete_texture(Some(&texture));
            return Err(GlobeError::TextureUpload(format!("{:?}", e)));
        }

        gl.generate_mipmap(Gl::TEXTURE_2D);
        gl.tex_parameteri(
            Gl::TEXTURE_2D,
            Gl::TEXTURE_MIN_FILTER,
            Gl::LINEAR_MIPMAP_LINEAR as i32,
        );
        gl.tex_parameteri(Gl::TEXTURE_2D, Gl::TEXTURE_MAG_FILTER, Gl::LINEAR as i32);
        gl.tex_parameteri(Gl::TEXTURE_2D, Gl::TEXTURE_WRAP_S, Gl::REPEAT as i32);
        gl.tex_parameteri(Gl::TEXTURE_2D, Gl::TEXTURE_WRAP_T, Gl::CLAMP_TO_EDGE as i32);
        gl.bind_texture(Gl::TEXTURE_2D, None);

        self.textures.push(texture);
        Ok(TextureId(self.textures.len() as u32 - 1))
    }

    fn render(&mut self, scene: &Scene) {
        let gl = &self.gl;
        let u = &self.uniforms;

        gl.clear(Gl::COLOR_BUFFER_BIT | Gl::DEPTH_BUFFER_BIT);
        let Some(vao) = &self.vao else {
            return;
        };

        gl.use_program(Some(&self.program));
        gl.uniform_matrix4fv_with_f32_array(
            u.model.as_ref(),
            false,
            scene.model_matrix().as_slice(),
        );
        gl.uniform_matrix4fv_with_f32_array(
            u.view_projection.as_ref(),
            false,
            scene.view_projection().as_slice(),
        );

        let material = &scene.material;
        gl.uniform1f(u.roughness.as_ref(), material.roughness);
        gl.uniform1f(u.metalness.as_ref(), material.metalness);
        let texture = match material.surface {
            Surface::Flat(color) => {
                gl.uniform3fv_with_f32_array(u.base_color.as_ref(), &color.to_array());
                None
            }
            Surface::Textured(TextureId(index)) => self.textures.get(index as usize),
        };
        gl.uniform1i(u.use_map.as_ref(), texture.is_some() as i32);
        gl.active_texture(Gl::TEXTURE0);
        gl.bind_texture(Gl::TEXTURE_2D, texture);
        gl.uniform1i(u.map.as_ref(), 0);

        let lights = scene.shading_lights();
        gl.uniform3fv_with_f32_array(u.ambient.as_ref(), &lights.ambient.to_array());
        gl.uniform3fv_with_f32_array(u.sun_color.as_ref(), &lights.sun.to_array());
        gl.uniform3fv_with_f32_array(u.sun_direction.as_ref(), lights.sun_direction.as_slice());

        gl.bind_vertex_array(Some(vao));
        gl.draw_elements_with_i32(Gl::TRIANGLES, self.index_count, Gl::UNSIGNED_INT, 0);
        gl.bind_vertex_array(None);
    }
}
