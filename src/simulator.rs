use glam::Vec2;
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{
    grid::SpatialGrid,
    properties::{Connection, Node},
};

/// Above this node count `connections` prunes candidate pairs with a
/// `SpatialGrid` instead of scanning every pair.
const GRID_CUTOFF: usize = 128;

/// Drives the point-mass nodes of the background animation.
///
/// The simulator owns plain data only. It never schedules itself and never
/// touches a drawing API: a host clock calls [`Simulator::tick`] once per
/// frame and hands the returned [`Snapshot`] to a renderer. Window resize and
/// mouse events are fed in through [`Simulator::resize`],
/// [`Simulator::set_pointer`] and [`Simulator::clear_pointer`].
#[derive(Clone, Debug)]
pub struct Simulator {
    nodes: Vec<Node>,
    width: f32,
    height: f32,
    pointer: Option<Vec2>,
    node_count: usize,
    max_distance: f32,
    pointer_radius: f32,
    pointer_strength: f32,
    rng: StdRng,
}

/// Read-only per-frame view for the renderer.
pub struct Snapshot<'a> {
    pub nodes: &'a [Node],
    pub connections: Vec<Connection>,
}

impl Simulator {
    pub fn builder() -> SimulatorBuilder {
        SimulatorBuilder::default()
    }

    /// Replaces the node vector with freshly drawn nodes: position uniform
    /// over the surface, velocity components in `[-0.25, 0.25)`, radius in
    /// `[1, 3)`.
    pub fn initialize(&mut self) {
        self.nodes = (0..self.node_count)
            .map(|_| {
                Node::new(
                    Vec2::new(
                        self.rng.gen_range(0.0..self.width),
                        self.rng.gen_range(0.0..self.height),
                    ),
                    Vec2::new(
                        self.rng.gen_range(-0.25..0.25),
                        self.rng.gen_range(-0.25..0.25),
                    ),
                    self.rng.gen_range(1.0..3.0),
                )
            })
            .collect();
    }

    /// Adopts the new surface dimensions and re-initializes every node.
    /// Positions are re-drawn, not rescaled to the new bounds.
    pub fn resize(&mut self, width: f32, height: f32) {
        assert_surface(width, height);
        self.width = width;
        self.height = height;
        self.initialize();
    }

    /// Last known cursor position, in surface coordinates.
    /// Takes effect on the next `update`.
    pub fn set_pointer(&mut self, x: f32, y: f32) {
        self.pointer = Some(Vec2::new(x, y));
    }

    pub fn clear_pointer(&mut self) {
        self.pointer = None;
    }

    /// Advances the simulation by one frame.
    ///
    /// Per node: integrate the position, reflect the velocity component when
    /// the matching coordinate leaves `[0, extent]`, then nudge the node
    /// toward the pointer when one is set and closer than `pointer_radius`.
    /// The position is not clamped on reflection, so a node overshoots the
    /// edge for a frame before the reversed velocity pulls it back.
    pub fn update(&mut self) {
        for node in self.nodes.iter_mut() {
            node.position += node.velocity;

            if node.position.x < 0.0 || node.position.x > self.width {
                node.velocity.x = -node.velocity.x;
            }
            if node.position.y < 0.0 || node.position.y > self.height {
                node.velocity.y = -node.velocity.y;
            }

            if let Some(pointer) = self.pointer {
                let delta = pointer - node.position;
                if delta.length() < self.pointer_radius {
                    // Exponential approach, proportional to the remaining
                    // distance. Never reaches the pointer in finite frames.
                    node.position += delta * self.pointer_strength;
                }
            }
        }
    }

    /// All unordered node pairs `(a, b)`, `a < b`, strictly closer than
    /// `max_distance`, ordered by `(a, b)`.
    ///
    /// The pair set is recomputed on every call. Both enumeration strategies
    /// apply the same strict distance test, so the grid path returns exactly
    /// the pairs of the full scan.
    pub fn connections(&self) -> Vec<Connection> {
        if self.nodes.len() > GRID_CUTOFF {
            self.connections_grid()
        } else {
            self.connections_scan()
        }
    }

    /// One frame step: `update` followed by `snapshot`.
    pub fn tick(&mut self) -> Snapshot<'_> {
        self.update();
        self.snapshot()
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            nodes: &self.nodes,
            connections: self.connections(),
        }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    fn connections_scan(&self) -> Vec<Connection> {
        let mut connections = vec![];

        for a in 0..self.nodes.len() {
            for b in (a + 1)..self.nodes.len() {
                if let Some(connection) = self.connection_between(a, b) {
                    connections.push(connection);
                }
            }
        }
        connections
    }

    fn connections_grid(&self) -> Vec<Connection> {
        let mut grid = SpatialGrid::new(self.width, self.height, self.max_distance);
        for (i, node) in self.nodes.iter().enumerate() {
            grid.insert(i, node.position);
        }

        let mut connections = vec![];
        for (a, node) in self.nodes.iter().enumerate() {
            for b in grid.neighborhood(node.position) {
                if b <= a {
                    continue;
                }
                if let Some(connection) = self.connection_between(a, b) {
                    connections.push(connection);
                }
            }
        }

        // Cell iteration order is not pair order, sort to match the scan.
        connections.sort_unstable_by(|x, y| (x.a, x.b).cmp(&(y.a, y.b)));
        connections
    }

    fn connection_between(&self, a: usize, b: usize) -> Option<Connection> {
        let distance = self.nodes[a].position.distance(self.nodes[b].position);
        if distance < self.max_distance {
            Some(Connection {
                a,
                b,
                opacity: 1.0 - distance / self.max_distance,
            })
        } else {
            None
        }
    }
}

fn assert_surface(width: f32, height: f32) {
    assert!(
        width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0,
        "surface dimensions must be positive and finite, got {width}x{height}"
    );
}

/// Builder for `Simulator`
pub struct SimulatorBuilder {
    node_count: usize,
    max_distance: f32,
    pointer_radius: f32,
    pointer_strength: f32,
    seed: Option<u64>,
}

impl SimulatorBuilder {
    /// Get a Instance of `SimulatorBuilder` with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// How many nodes drift across the surface.
    /// The count is fixed for the lifetime of the simulator.
    pub fn node_count(mut self, node_count: usize) -> Self {
        self.node_count = node_count;
        self
    }

    /// Below this distance two nodes are connected by a line.
    pub fn max_distance(mut self, max_distance: f32) -> Self {
        self.max_distance = max_distance;
        self
    }

    /// How close the cursor has to be before it pulls on a node.
    pub fn pointer_radius(mut self, pointer_radius: f32) -> Self {
        self.pointer_radius = pointer_radius;
        self
    }

    /// Fraction of the remaining distance a node moves toward the cursor
    /// each frame.
    pub fn pointer_strength(mut self, pointer_strength: f32) -> Self {
        self.pointer_strength = pointer_strength;
        self
    }

    /// Seed the RNG for a reproducible node layout.
    /// Unseeded simulators draw from entropy.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Constructs an initialized `Simulator` for the given surface.
    /// Panics when the dimensions are not positive finite numbers.
    pub fn build(self, width: f32, height: f32) -> Simulator {
        assert_surface(width, height);

        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut simulator = Simulator {
            nodes: vec![],
            width,
            height,
            pointer: None,
            node_count: self.node_count,
            max_distance: self.max_distance,
            pointer_radius: self.pointer_radius,
            pointer_strength: self.pointer_strength,
            rng,
        };
        simulator.initialize();
        simulator
    }
}

impl Default for SimulatorBuilder {
    /// Get a Instance of `SimulatorBuilder` with default values
    fn default() -> Self {
        Self {
            node_count: 50,
            max_distance: 150.0,
            pointer_radius: 200.0,
            pointer_strength: 0.001,
            seed: None,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    /// Simulator with a hand-placed node vector, bypassing the random draw.
    fn fixed_sim(nodes: Vec<Node>, width: f32, height: f32) -> Simulator {
        Simulator {
            node_count: nodes.len(),
            nodes,
            width,
            height,
            pointer: None,
            max_distance: 150.0,
            pointer_radius: 200.0,
            pointer_strength: 0.001,
            rng: StdRng::seed_from_u64(0),
        }
    }

    fn node_at(x: f32, y: f32) -> Node {
        Node::new(Vec2::new(x, y), Vec2::ZERO, 1.5)
    }

    #[test]
    fn initialize_populates_within_bounds() {
        let (w, h) = (800.0, 600.0);
        let sim = SimulatorBuilder::new().seed(7).build(w, h);

        assert_eq!(sim.nodes().len(), 50);
        for node in sim.nodes() {
            assert!(node.position.x >= 0.0 && node.position.x < w);
            assert!(node.position.y >= 0.0 && node.position.y < h);
            assert!(node.velocity.x.abs() < 0.25);
            assert!(node.velocity.y.abs() < 0.25);
            assert!(node.radius >= 1.0 && node.radius < 3.0);
        }
    }

    #[test]
    fn zero_nodes_is_a_valid_simulation() {
        let mut sim = SimulatorBuilder::new().node_count(0).build(100.0, 100.0);
        sim.update();
        assert!(sim.snapshot().connections.is_empty());
    }

    #[test]
    #[should_panic(expected = "surface dimensions")]
    fn rejects_non_positive_surface() {
        SimulatorBuilder::new().build(-1.0, 100.0);
    }

    #[test]
    fn connections_idempotent_within_frame() {
        let mut sim = SimulatorBuilder::new().seed(3).build(640.0, 480.0);
        sim.update();

        assert_eq!(sim.connections(), sim.connections());
    }

    #[test]
    fn connections_yield_each_pair_once_ordered() {
        let sim = SimulatorBuilder::new().seed(11).build(640.0, 480.0);

        let connections = sim.connections();
        assert!(!connections.is_empty());

        let mut seen = std::collections::HashSet::new();
        for connection in &connections {
            assert!(connection.a < connection.b);
            assert!(seen.insert((connection.a, connection.b)));
        }
    }

    #[test]
    fn boundary_reflection_flips_velocity_without_clamping() {
        let mut node = node_at(0.0, 50.0);
        node.velocity = Vec2::new(-0.1, 0.0);
        let mut sim = fixed_sim(vec![node], 100.0, 100.0);

        sim.update();

        // One full step past the edge, velocity reversed for the next frame.
        assert_eq!(sim.nodes()[0].position.x, -0.1);
        assert_eq!(sim.nodes()[0].velocity.x, 0.1);
    }

    #[test]
    fn distance_threshold_is_strict() {
        let sim = fixed_sim(vec![node_at(0.0, 0.0), node_at(150.0, 0.0)], 400.0, 400.0);
        assert!(sim.connections().is_empty());

        let sim = fixed_sim(vec![node_at(0.0, 0.0), node_at(149.0, 0.0)], 400.0, 400.0);
        let connections = sim.connections();
        assert_eq!(connections.len(), 1);
        assert_eq!(connections[0].a, 0);
        assert_eq!(connections[0].b, 1);
        assert!((connections[0].opacity - 1.0 / 150.0).abs() < 1e-6);
    }

    #[test]
    fn pointer_attraction_decreases_distance_every_frame() {
        let pointer = Vec2::new(200.0, 100.0);
        let mut sim = fixed_sim(vec![node_at(100.0, 100.0)], 400.0, 400.0);
        sim.set_pointer(pointer.x, pointer.y);

        let mut last_distance = sim.nodes()[0].position.distance(pointer);
        for _ in 0..100 {
            sim.update();
            let distance = sim.nodes()[0].position.distance(pointer);
            assert!(distance < last_distance);
            assert!(distance > 0.0);
            last_distance = distance;
        }
    }

    #[test]
    fn clear_pointer_stops_the_attraction() {
        let mut sim = fixed_sim(vec![node_at(100.0, 100.0)], 400.0, 400.0);
        sim.set_pointer(200.0, 100.0);
        sim.clear_pointer();

        sim.update();
        assert_eq!(sim.nodes()[0].position, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn resize_redraws_nodes_instead_of_rescaling() {
        let (w1, h1) = (800.0, 600.0);
        let (w2, h2) = (1024.0, 512.0);
        let mut sim = SimulatorBuilder::new().seed(21).build(w1, h1);
        for _ in 0..5 {
            sim.update();
        }
        let before: Vec<Vec2> = sim.nodes().iter().map(|n| n.position).collect();

        sim.resize(w2, h2);

        assert_eq!(sim.nodes().len(), before.len());
        for node in sim.nodes() {
            assert!(node.position.x >= 0.0 && node.position.x < w2);
            assert!(node.position.y >= 0.0 && node.position.y < h2);
        }
        let scale = Vec2::new(w2 / w1, h2 / h1);
        let rescaled = sim
            .nodes()
            .iter()
            .zip(&before)
            .all(|(node, old)| node.position == *old * scale);
        assert!(!rescaled);
    }

    #[test]
    fn grid_pruning_matches_the_full_scan() {
        // Well above GRID_CUTOFF so `connections` takes the grid path.
        let mut sim = SimulatorBuilder::new()
            .node_count(300)
            .seed(5)
            .build(800.0, 600.0);
        sim.update();

        assert!(!sim.connections().is_empty());
        assert_eq!(sim.connections(), sim.connections_scan());
    }
}
