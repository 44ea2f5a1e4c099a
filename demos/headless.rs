use netplex::simulator::SimulatorBuilder;

fn main() {
    // Configure the simulator
    let mut simulator = SimulatorBuilder::new()
        .node_count(200)
        .seed(42)
        .build(1920.0, 1080.0);

    // Run 10k frames without a window
    for _ in 0..10_000 {
        simulator.update();
    }

    let snapshot = simulator.snapshot();
    println!(
        "{} nodes, {} connections",
        snapshot.nodes.len(),
        snapshot.connections.len()
    );
}
