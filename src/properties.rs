use glam::Vec2;

#[derive(Debug, Clone)]
pub struct Node {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Rendering hint only, the radius has no effect on the simulation.
    pub radius: f32,
}

impl Node {
    pub fn new(position: Vec2, velocity: Vec2, radius: f32) -> Self {
        Self {
            position,
            velocity,
            radius,
        }
    }
}

/// A pair of nodes close enough to be drawn as a line.
/// Recomputed every frame, never cached across frames.
#[derive(Debug, Clone, PartialEq)]
pub struct Connection {
    pub a: usize,
    pub b: usize,
    /// `1 - distance / max_distance`, in `(0, 1]`. Drives the line alpha.
    pub opacity: f32,
}
