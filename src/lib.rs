//! Tank Battle - a top-down tank combat arcade simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, AI, levels, game state)
//! - `config`: Immutable simulation configuration
//! - `driver`: Fixed-timestep loop driver for frame-based hosts

pub mod config;
pub mod driver;
pub mod sim;

pub use config::{ConfigError, SimConfig};
pub use driver::Driver;

/// Game loop constants
pub mod consts {
    /// Simulation tick rate (one tick per rendered frame)
    pub const TICK_RATE: u32 = 60;
    /// Fixed simulation timestep in seconds
    pub const SIM_DT: f32 = 1.0 / TICK_RATE as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
}
