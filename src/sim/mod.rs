//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one call to [`tick`] per frame)
//! - Injected, seedable RNG only
//! - Stable iteration order (insertion order of every collection)
//! - No rendering or platform dependencies

pub mod aabb;
pub mod ai;
pub mod collision;
pub mod level;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use aabb::{Aabb, intersects};
pub use level::generate_level;
pub use snapshot::{Hud, Renderer, Snapshot};
pub use state::{
    AiTimers, Bullet, Direction, Enemy, Explosion, GamePhase, GameState, Intent, Player, Side,
    Tank, Wall, WallKind,
};
pub use tick::{TickInput, tick};
