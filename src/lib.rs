//! # Example
//! ```no_run
//! use netplex::renderer::Renderer;
//! use netplex::simulator::SimulatorBuilder;
//!
//! let simulator = SimulatorBuilder::new()
//!     .node_count(50)
//!     .build(1280.0, 720.0);
//!
//! let renderer = Renderer::new(simulator);
//! renderer.create_window();
//! ```

pub mod grid;
pub mod properties;
pub mod renderer;
pub mod simulator;
