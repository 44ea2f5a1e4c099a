use std::time::Instant;

use crate::simulator::Simulator;
use glam::Mat4;
use glium::{glutin::surface::WindowSurface, implement_vertex, uniform, Display, Surface};
use winit::{
    event::{Event, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    window::Window,
};

mod draw;
mod shapes;

const FRAME_INTERVAL_MS: u128 = 16;

#[derive(Copy, Clone, Debug)]
struct Vertex {
    position: [f32; 3],
    color: [f32; 4],
}
implement_vertex!(Vertex, position, color);

/// Thin window wrapper around a [`Simulator`].
///
/// Owns the event loop and maps the environment onto explicit simulator
/// calls: window resize to `resize`, cursor movement to `set_pointer`, the
/// cursor leaving the window to `clear_pointer`. Once per frame interval it
/// calls `tick` and paints the snapshot.
pub struct Renderer {
    simulator: Simulator,
}

impl Renderer {
    pub fn new(simulator: Simulator) -> Self {
        Self { simulator }
    }

    pub fn create_window(self) {
        let event_loop = winit::event_loop::EventLoopBuilder::new().build();

        let (window, display) = glium::backend::glutin::SimpleWindowBuilder::new()
            .with_title("netplex")
            .build(&event_loop);

        self.run_render_loop(event_loop, display, window);
    }

    fn run_render_loop(
        self,
        event_loop: EventLoop<()>,
        display: Display<WindowSurface>,
        window: Window,
    ) {
        let mut last_redraw = Instant::now();
        let mut simulator = self.simulator;

        // Adopt the actual window size before the first frame.
        let size = window.inner_size();
        simulator.resize(size.width as f32, size.height as f32);

        event_loop.run(move |event, _, control_flow| {
            *control_flow = ControlFlow::Poll;

            #[allow(clippy::single_match)]
            match event {
                Event::WindowEvent { event, .. } => match event {
                    WindowEvent::CloseRequested | WindowEvent::Destroyed => {
                        *control_flow = ControlFlow::Exit;
                    }
                    WindowEvent::Resized(size) => {
                        display.resize(size.into());
                        simulator.resize(size.width as f32, size.height as f32);
                    }
                    WindowEvent::CursorMoved { position, .. } => {
                        simulator.set_pointer(position.x as f32, position.y as f32);
                    }
                    WindowEvent::CursorLeft { .. } => {
                        simulator.clear_pointer();
                    }
                    _ => (),
                },
                _ => (),
            }

            if last_redraw.elapsed().as_millis() >= FRAME_INTERVAL_MS {
                last_redraw = Instant::now();

                draw_frame(&display, &mut simulator);
            }
        });
    }
}

fn draw_frame(display: &Display<WindowSurface>, simulator: &mut Simulator) {
    let projection = build_projection_matrix(simulator.width(), simulator.height());
    let snapshot = simulator.tick();

    let mut target = display.draw();
    target.clear_color(0.02, 0.02, 0.03, 1.0);

    let uniforms = uniform! {
        projection: projection.to_cols_array_2d(),
    };

    let params = glium::DrawParameters {
        blend: glium::Blend::alpha_blending(),
        ..Default::default()
    };

    draw::draw_connections(&snapshot, &mut target, display, &uniforms, &params);
    draw::draw_nodes(&snapshot, &mut target, display, &uniforms, &params);

    target.finish().unwrap();
}

/// Surface pixels to clip space, origin top-left, y growing downwards.
fn build_projection_matrix(width: f32, height: f32) -> Mat4 {
    Mat4::orthographic_rh_gl(0.0, width, height, 0.0, -1.0, 1.0)
}
