use netplex::renderer::Renderer;
use netplex::simulator::SimulatorBuilder;

fn main() {
    // Configure the simulator
    let simulator = SimulatorBuilder::new()
        .node_count(50)
        .max_distance(150.0)
        .build(1280.0, 720.0);

    // Start the renderer; the window drives one tick per frame
    let renderer = Renderer::new(simulator);
    renderer.create_window();
}
