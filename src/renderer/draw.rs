use glium::{
    glutin::surface::WindowSurface,
    implement_vertex,
    uniforms::{AsUniformValue, Uniforms, UniformsStorage},
    Display, DrawParameters, Frame, Surface,
};

use super::{shapes, Vertex};
use crate::simulator::Snapshot;

// Palette of the original site background.
const CYAN: [f32; 3] = [0.0, 0.961, 1.0];
const PURPLE: [f32; 3] = [0.659, 0.333, 0.969];

const LINE_ALPHA_SCALE: f32 = 0.3;
const NODE_ALPHA: f32 = 0.8;
const GLOW_ALPHA: f32 = 0.05;
const GLOW_RADIUS_SCALE: f32 = 3.0;
const CIRCLE_RESOLUTION: usize = 24;

static VERTEX_SHADER_SRC: &str = r#"
#version 150

in vec3 position;
in vec4 color;
out vec4 vertex_color;

uniform mat4 projection;

void main() {
    vertex_color = color;
    gl_Position = projection * vec4(position, 1.0);
}
"#;

static INSTANCE_SHADER_SRC: &str = r#"
#version 150

in vec3 position;
in vec4 color;
in vec4 color_attr;
in vec3 world_position;
in float scale;

out vec4 vertex_color;

uniform mat4 projection;

void main() {
    vertex_color = color_attr;
    gl_Position = projection * vec4((position * scale) + world_position, 1.0);
}
"#;

static FRAGMENT_SHADER_SRC: &str = r#"
#version 140

in vec4 vertex_color;
out vec4 color;

void main() {
    color = vec4(vertex_color);
}
"#;

#[derive(Copy, Clone)]
struct Attr {
    color_attr: [f32; 4],
    world_position: [f32; 3],
    scale: f32,
}
implement_vertex!(Attr, color_attr, world_position, scale);

/// One line per connection, fading cyan to purple, alpha from the
/// connection opacity.
pub fn draw_connections<H, R>(
    snapshot: &Snapshot,
    target: &mut Frame,
    display: &Display<WindowSurface>,
    uniform: &UniformsStorage<H, R>,
    params: &DrawParameters,
) where
    H: AsUniformValue,
    R: Uniforms,
{
    let program =
        glium::Program::from_source(display, VERTEX_SHADER_SRC, FRAGMENT_SHADER_SRC, None).unwrap();

    let mut shape: Vec<Vertex> = vec![];

    for connection in &snapshot.connections {
        let p1 = snapshot.nodes[connection.a].position;
        let p2 = snapshot.nodes[connection.b].position;
        let alpha = connection.opacity * LINE_ALPHA_SCALE;

        shape.append(&mut shapes::line(
            [p1.x, p1.y, 0.0],
            [p2.x, p2.y, 0.0],
            [CYAN[0], CYAN[1], CYAN[2], alpha],
            [PURPLE[0], PURPLE[1], PURPLE[2], alpha],
        ));
    }

    let vertex_buffer = glium::VertexBuffer::new(display, &shape).unwrap();
    let indices = glium::index::NoIndices(glium::index::PrimitiveType::LinesList);

    target
        .draw(&vertex_buffer, indices, &program, uniform, params)
        .unwrap();
}

/// Instanced circles: a faint glow disc per node, then the node body on top.
pub fn draw_nodes<H, R>(
    snapshot: &Snapshot,
    target: &mut Frame,
    display: &Display<WindowSurface>,
    uniform: &UniformsStorage<H, R>,
    params: &DrawParameters,
) where
    H: AsUniformValue,
    R: Uniforms,
{
    let program =
        glium::Program::from_source(display, INSTANCE_SHADER_SRC, FRAGMENT_SHADER_SRC, None)
            .unwrap();

    let shape = shapes::circle([0.0, 0.0, 0.0], [0.0, 0.0, 0.0, 0.0], 1.0, CIRCLE_RESOLUTION);

    let mut attr_list: Vec<Attr> = Vec::with_capacity(snapshot.nodes.len() * 2);

    // Glow instances first so the bodies blend over them.
    for node in snapshot.nodes {
        attr_list.push(Attr {
            color_attr: [CYAN[0], CYAN[1], CYAN[2], GLOW_ALPHA],
            world_position: [node.position.x, node.position.y, 0.0],
            scale: node.radius * GLOW_RADIUS_SCALE,
        });
    }
    for node in snapshot.nodes {
        attr_list.push(Attr {
            color_attr: [CYAN[0], CYAN[1], CYAN[2], NODE_ALPHA],
            world_position: [node.position.x, node.position.y, 0.0],
            scale: node.radius,
        });
    }

    let vertex_buffer = glium::VertexBuffer::new(display, &shape).unwrap();
    let instance_buffer = glium::vertex::VertexBuffer::dynamic(display, &attr_list).unwrap();
    let indices = glium::index::NoIndices(glium::index::PrimitiveType::TrianglesList);

    target
        .draw(
            (&vertex_buffer, instance_buffer.per_instance().unwrap()),
            indices,
            &program,
            uniform,
            params,
        )
        .unwrap();
}
