use glam::{Mat4, Vec3};
use wasm_bindgen::JsCast;
use web_sys::{
    HtmlCanvasElement, WebGl2RenderingContext as GL, WebGlBuffer, WebGlProgram, WebGlShader,
    WebGlTexture, WebGlUniformLocation, WebGlVertexArrayObject,
};

use crate::config::GalleryConfig;
use crate::curves::about::DIVIDER_Y;
use crate::curves::gallery::{PanelLayout, REFLECTION_BLEND, REFLECTION_OPACITY};
use crate::error::{Result, VizError};
use crate::mesh::{self, MeshData};
use crate::scene::{Blend, Node, SceneGraph};

use super::textures::TextureSet;

const VERTEX_SHADER: &str = r#"#version 300 es
layout(location = 0) in vec3 a_position;
layout(location = 1) in vec2 a_uv;

uniform mat4 u_model;
uniform mat4 u_view;
uniform mat4 u_proj;

out vec2 v_uv;
out float v_depth;

void main() {
    vec4 view_pos = u_view * u_model * vec4(a_position, 1.0);
    v_uv = a_uv;
    v_depth = -view_pos.z;
    gl_Position = u_proj * view_pos;
}
"#;

const FRAGMENT_SHADER: &str = r#"#version 300 es
precision highp float;

in vec2 v_uv;
in float v_depth;

uniform sampler2D u_texture;
uniform bool u_textured;
uniform vec3 u_color;
uniform float u_opacity;
// near, far, amount
uniform vec3 u_fog;

out vec4 out_color;

void main() {
    vec4 base = u_textured ? texture(u_texture, v_uv) : vec4(1.0);
    float fog = smoothstep(u_fog.x, u_fog.y, v_depth) * u_fog.z;
    vec3 rgb = mix(base.rgb * u_color, vec3(0.0), fog);
    out_color = vec4(rgb, base.a * u_opacity);
}
"#;

const FOG_NEAR: f32 = 10.0;
const FOG_FAR: f32 = 50.0;

const TILE_SIZE: (f32, f32) = (4.8, 2.7);
const TILE_CURVE_RADIUS: f32 = 8.8;
const RIBBON_SIZE: (f32, f32) = (0.2, 5.0);
const RIBBON_COLOR: Vec3 = Vec3::new(0.302, 0.933, 0.918);
const ABOUT_SIZE: (f32, f32) = (14.0, 9.0);
const ABOUT_BG_COLOR: Vec3 = Vec3::splat(0.02);
const ABOUT_BG_OPACITY: f32 = 0.95;
const DIVIDER_SIZE: (f32, f32) = (2.0, 0.02);
const DIVIDER_COLOR: Vec3 = Vec3::new(0.231, 0.510, 0.965);
const DIVIDER_OPACITY: f32 = 0.5;
const PANEL_SEGMENTS: u16 = 32;

struct Uniforms {
    model: Option<WebGlUniformLocation>,
    view: Option<WebGlUniformLocation>,
    proj: Option<WebGlUniformLocation>,
    texture: Option<WebGlUniformLocation>,
    textured: Option<WebGlUniformLocation>,
    color: Option<WebGlUniformLocation>,
    opacity: Option<WebGlUniformLocation>,
    fog: Option<WebGlUniformLocation>,
}

impl Uniforms {
    fn locate(gl: &GL, program: &WebGlProgram) -> Self {
        Self {
            model: gl.get_uniform_location(program, "u_model"),
            view: gl.get_uniform_location(program, "u_view"),
            proj: gl.get_uniform_location(program, "u_proj"),
            texture: gl.get_uniform_location(program, "u_texture"),
            textured: gl.get_uniform_location(program, "u_textured"),
            color: gl.get_uniform_location(program, "u_color"),
            opacity: gl.get_uniform_location(program, "u_opacity"),
            fog: gl.get_uniform_location(program, "u_fog"),
        }
    }
}

/// An uploaded mesh: vertex array plus the buffers it references.
struct GpuMesh {
    vao: WebGlVertexArrayObject,
    buffers: [WebGlBuffer; 3],
    index_count: i32,
}

impl GpuMesh {
    fn upload(gl: &GL, data: &MeshData) -> Result<Self> {
        let vao = gl
            .create_vertex_array()
            .ok_or_else(|| VizError::Js("failed to create vertex array".into()))?;
        gl.bind_vertex_array(Some(&vao));

        let positions = array_buffer(gl, &data.positions, 0, 3)?;
        let uvs = array_buffer(gl, &data.uvs, 1, 2)?;

        let indices = create_buffer(gl)?;
        gl.bind_buffer(GL::ELEMENT_ARRAY_BUFFER, Some(&indices));
        gl.buffer_data_with_array_buffer_view(
            GL::ELEMENT_ARRAY_BUFFER,
            &js_sys::Uint16Array::from(data.indices.as_slice()),
            GL::STATIC_DRAW,
        );

        gl.bind_vertex_array(None);
        Ok(Self {
            vao,
            buffers: [positions, uvs, indices],
            index_count: data.indices.len() as i32,
        })
    }

    fn draw(&self, gl: &GL) {
        gl.bind_vertex_array(Some(&self.vao));
        gl.draw_elements_with_i32(GL::TRIANGLES, self.index_count, GL::UNSIGNED_SHORT, 0);
    }

    fn delete(&self, gl: &GL) {
        gl.delete_vertex_array(Some(&self.vao));
        for buffer in &self.buffers {
            gl.delete_buffer(Some(buffer));
        }
    }
}

fn create_buffer(gl: &GL) -> Result<WebGlBuffer> {
    gl.create_buffer()
        .ok_or_else(|| VizError::Js("failed to create buffer".into()))
}

fn array_buffer(gl: &GL, data: &[f32], location: u32, size: i32) -> Result<WebGlBuffer> {
    let buffer = create_buffer(gl)?;
    gl.bind_buffer(GL::ARRAY_BUFFER, Some(&buffer));
    gl.buffer_data_with_array_buffer_view(
        GL::ARRAY_BUFFER,
        &js_sys::Float32Array::from(data),
        GL::STATIC_DRAW,
    );
    gl.enable_vertex_attrib_array(location);
    gl.vertex_attrib_pointer_with_i32(location, size, GL::FLOAT, false, 0, 0);
    Ok(buffer)
}

fn compile_shader(gl: &GL, kind: u32, source: &str) -> Result<WebGlShader> {
    let shader = gl
        .create_shader(kind)
        .ok_or_else(|| VizError::Shader("unable to create shader object".into()))?;
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);

    if gl
        .get_shader_parameter(&shader, GL::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(shader)
    } else {
        let log = gl.get_shader_info_log(&shader).unwrap_or_default();
        gl.delete_shader(Some(&shader));
        Err(VizError::Shader(log))
    }
}

fn link_program(gl: &GL, vertex: &WebGlShader, fragment: &WebGlShader) -> Result<WebGlProgram> {
    let program = gl
        .create_program()
        .ok_or_else(|| VizError::Shader("unable to create program object".into()))?;
    gl.attach_shader(&program, vertex);
    gl.attach_shader(&program, fragment);
    gl.link_program(&program);

    if gl
        .get_program_parameter(&program, GL::LINK_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(program)
    } else {
        let log = gl.get_program_info_log(&program).unwrap_or_default();
        gl.delete_program(Some(&program));
        Err(VizError::Shader(log))
    }
}

/// Panels are seen from inside the cylinder, so mirror u to keep images
/// readable.
fn inside_out(mut data: MeshData) -> MeshData {
    for uv in data.uvs.chunks_exact_mut(2) {
        uv[0] = 1.0 - uv[0];
    }
    data
}

pub struct Renderer {
    gl: GL,
    program: WebGlProgram,
    uniforms: Uniforms,
    tile: GpuMesh,
    ribbon: GpuMesh,
    about_plane: GpuMesh,
    divider: GpuMesh,
    panels: Vec<GpuMesh>,
    /// Drop from the gallery's center line to its floor mirror.
    reflection_offset: f32,
    /// Scratch list for back-to-front tile sorting.
    draw_order: Vec<usize>,
}

impl Renderer {
    pub fn new(canvas: &HtmlCanvasElement, gallery: &GalleryConfig, panels: &[PanelLayout]) -> Result<Self> {
        let gl: GL = canvas
            .get_context("webgl2")?
            .ok_or(VizError::WebGl2Unsupported)?
            .dyn_into()
            .map_err(|_| VizError::WebGl2Unsupported)?;

        let vertex = compile_shader(&gl, GL::VERTEX_SHADER, VERTEX_SHADER)?;
        let fragment = compile_shader(&gl, GL::FRAGMENT_SHADER, FRAGMENT_SHADER)?;
        let program = link_program(&gl, &vertex, &fragment)?;
        gl.delete_shader(Some(&vertex));
        gl.delete_shader(Some(&fragment));
        let uniforms = Uniforms::locate(&gl, &program);

        let tile = GpuMesh::upload(
            &gl,
            &mesh::curved_tile(TILE_SIZE.0, TILE_SIZE.1, TILE_CURVE_RADIUS, 16),
        )?;
        let ribbon = GpuMesh::upload(&gl, &mesh::plane(RIBBON_SIZE.0, RIBBON_SIZE.1, 1, 1))?;
        let about_plane = GpuMesh::upload(&gl, &mesh::plane(ABOUT_SIZE.0, ABOUT_SIZE.1, 1, 1))?;
        let divider = GpuMesh::upload(&gl, &mesh::plane(DIVIDER_SIZE.0, DIVIDER_SIZE.1, 1, 1))?;
        let panels = panels
            .iter()
            .map(|p| {
                let data = mesh::cylinder_segment(
                    p.radius,
                    p.height,
                    PANEL_SEGMENTS,
                    p.theta_start,
                    p.theta_length,
                );
                GpuMesh::upload(&gl, &inside_out(data))
            })
            .collect::<Result<Vec<_>>>()?;

        log::info!("WebGL2 renderer ready ({} gallery panels)", panels.len());

        Ok(Self {
            gl,
            program,
            uniforms,
            tile,
            ribbon,
            about_plane,
            divider,
            panels,
            reflection_offset: -gallery.height + 0.1,
            draw_order: Vec::new(),
        })
    }

    pub fn gl(&self) -> &GL {
        &self.gl
    }

    fn set_blend(&self, blend: Blend) {
        match blend {
            Blend::Normal => self.gl.blend_func(GL::SRC_ALPHA, GL::ONE_MINUS_SRC_ALPHA),
            Blend::Additive => self.gl.blend_func(GL::SRC_ALPHA, GL::ONE),
        }
    }

    fn set_fog(&self, enabled: bool) {
        let amount = if enabled { 1.0 } else { 0.0 };
        self.gl
            .uniform3f(self.uniforms.fog.as_ref(), FOG_NEAR, FOG_FAR, amount);
    }

    fn draw_mesh(
        &self,
        mesh: &GpuMesh,
        model: &Mat4,
        texture: Option<&WebGlTexture>,
        color: Vec3,
        opacity: f32,
    ) {
        if opacity <= 0.0 {
            return;
        }
        let gl = &self.gl;
        gl.uniform_matrix4fv_with_f32_array(self.uniforms.model.as_ref(), false, &model.to_cols_array());
        gl.uniform3f(self.uniforms.color.as_ref(), color.x, color.y, color.z);
        gl.uniform1f(self.uniforms.opacity.as_ref(), opacity.min(1.0));
        match texture {
            Some(tex) => {
                gl.active_texture(GL::TEXTURE0);
                gl.bind_texture(GL::TEXTURE_2D, Some(tex));
                gl.uniform1i(self.uniforms.textured.as_ref(), 1);
            }
            None => gl.uniform1i(self.uniforms.textured.as_ref(), 0),
        }
        mesh.draw(gl);
    }

    /// Draw one frame of the scene into a `width x height` drawing buffer.
    pub fn draw(&mut self, graph: &SceneGraph, textures: &TextureSet, width: u32, height: u32) {
        let gl = &self.gl;
        let aspect = width as f32 / height.max(1) as f32;

        gl.viewport(0, 0, width as i32, height as i32);
        gl.clear_color(0.0, 0.0, 0.0, 1.0);
        gl.clear(GL::COLOR_BUFFER_BIT | GL::DEPTH_BUFFER_BIT);

        gl.use_program(Some(&self.program));
        gl.uniform_matrix4fv_with_f32_array(
            self.uniforms.view.as_ref(),
            false,
            &graph.camera.view().to_cols_array(),
        );
        gl.uniform_matrix4fv_with_f32_array(
            self.uniforms.proj.as_ref(),
            false,
            &graph.camera.projection(aspect).to_cols_array(),
        );
        gl.uniform1i(self.uniforms.texture.as_ref(), 0);

        gl.disable(GL::CULL_FACE);
        gl.enable(GL::DEPTH_TEST);
        gl.depth_func(GL::LEQUAL);
        gl.enable(GL::BLEND);
        // Everything is translucent; test against depth but never write it.
        gl.depth_mask(false);

        if graph.tunnel_group.is_some_and(|g| g.visible) {
            self.draw_tunnel(graph, textures);
        }
        if let Some(group) = graph.about_group.filter(|g| g.visible) {
            self.draw_about(&group, textures);
        }
        if let Some(group) = graph.gallery_group.filter(|g| g.visible) {
            self.draw_gallery(graph, &group, textures);
        }

        self.gl.depth_mask(true);
        self.gl.bind_vertex_array(None);
    }

    fn draw_tunnel(&mut self, graph: &SceneGraph, textures: &TextureSet) {
        self.set_fog(true);

        let mut order = std::mem::take(&mut self.draw_order);
        order.clear();
        order.extend(
            graph
                .tiles
                .iter()
                .enumerate()
                .filter(|(_, slot)| slot.is_some_and(|n| n.visible))
                .map(|(i, _)| i),
        );
        // Farthest first.
        order.sort_by(|&a, &b| {
            let za = graph.tiles[a].map_or(0.0, |n| n.transform.position.z);
            let zb = graph.tiles[b].map_or(0.0, |n| n.transform.position.z);
            za.total_cmp(&zb)
        });

        self.set_blend(Blend::Normal);
        for &i in &order {
            let Some(node) = graph.tiles[i] else { continue };
            let Some(tex) = textures.tunnel(node.texture) else {
                continue;
            };
            self.draw_mesh(
                &self.tile,
                &node.transform.matrix(),
                Some(&tex),
                Vec3::ONE,
                node.transform.opacity,
            );
        }
        self.draw_order = order;

        self.set_blend(Blend::Additive);
        for node in graph.ribbons.iter().flatten().filter(|n| n.visible) {
            self.draw_mesh(
                &self.ribbon,
                &node.transform.matrix(),
                None,
                RIBBON_COLOR,
                graph.ribbon_opacity,
            );
        }

        self.set_blend(Blend::Normal);
        self.set_fog(false);
    }

    fn draw_about(&self, group: &Node, textures: &TextureSet) {
        self.set_fog(false);
        self.set_blend(Blend::Normal);
        let base = group.transform.matrix();
        let opacity = group.transform.opacity;

        self.draw_mesh(
            &self.about_plane,
            &base,
            None,
            ABOUT_BG_COLOR,
            opacity * ABOUT_BG_OPACITY,
        );
        if let Some(tex) = textures.about() {
            let text = base * Mat4::from_translation(Vec3::new(0.0, 0.0, 0.01));
            self.draw_mesh(&self.about_plane, &text, Some(tex), Vec3::ONE, opacity);
        }
        let divider = base * Mat4::from_translation(Vec3::new(0.0, DIVIDER_Y, 0.02));
        self.draw_mesh(
            &self.divider,
            &divider,
            None,
            DIVIDER_COLOR,
            opacity * DIVIDER_OPACITY,
        );
    }

    fn draw_gallery(&self, graph: &SceneGraph, group: &Node, textures: &TextureSet) {
        self.set_fog(false);
        let base = group.transform.matrix();
        let mirror = base
            * Mat4::from_translation(Vec3::new(0.0, self.reflection_offset, 0.0))
            * Mat4::from_scale(Vec3::new(1.0, -1.0, 1.0));

        for (i, (slot, mesh)) in graph.panels.iter().zip(&self.panels).enumerate() {
            let Some(node) = slot.filter(|n| n.visible) else {
                continue;
            };
            let Some(tex) = textures.gallery(node.texture) else {
                log::trace!("panel {i} attached without texture");
                continue;
            };
            let opacity = node.transform.opacity;
            self.set_blend(REFLECTION_BLEND);
            self.draw_mesh(mesh, &mirror, Some(&tex), Vec3::ONE, opacity * REFLECTION_OPACITY);
            self.set_blend(Blend::Normal);
            self.draw_mesh(mesh, &base, Some(&tex), Vec3::ONE, opacity);
        }
    }

    pub fn release(&mut self) {
        let gl = &self.gl;
        for mesh in [&self.tile, &self.ribbon, &self.about_plane, &self.divider]
            .into_iter()
            .chain(&self.panels)
        {
            mesh.delete(gl);
        }
        self.panels.clear();
        gl.delete_program(Some(&self.program));
    }
}
