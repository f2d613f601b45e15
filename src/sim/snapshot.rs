//! Read-only view of the simulation for renderers
//!
//! A [`Snapshot`] copies out everything a frame needs. [`Snapshot::render`]
//! walks it in layer order so grass hides tanks and explosions sit on top.

use serde::Serialize;

use super::state::{Bullet, Enemy, Explosion, GamePhase, GameState, Player, Tank, Wall, WallKind};

/// Heads-up display values
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hud {
    pub phase: GamePhase,
    pub level: u32,
    pub lives: u32,
    pub health: u32,
    pub enemies_remaining: usize,
    pub kills: u32,
    pub score: u64,
}

/// Everything visible at the end of a tick
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub tick: u64,
    pub hud: Hud,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub bullets: Vec<Bullet>,
    /// Active Brick and Stone tiles
    pub walls: Vec<Wall>,
    /// Grass tiles, drawn above tanks
    pub grass: Vec<Wall>,
    pub explosions: Vec<Explosion>,
}

/// Drawing backend driven by [`Snapshot::render`]
pub trait Renderer {
    fn draw_wall(&mut self, wall: &Wall);
    fn draw_tank(&mut self, tank: &Tank);
    fn draw_bullet(&mut self, bullet: &Bullet);
    fn draw_explosion(&mut self, explosion: &Explosion);
    fn draw_hud(&mut self, hud: &Hud);
}

impl Snapshot {
    pub fn capture<R>(state: &GameState<R>) -> Self {
        let (grass, walls): (Vec<Wall>, Vec<Wall>) = state
            .walls
            .iter()
            .filter(|w| w.active)
            .cloned()
            .partition(|w| w.kind == WallKind::Grass);

        Self {
            tick: state.time_ticks,
            hud: Hud {
                phase: state.phase,
                level: state.level,
                lives: state.player.lives,
                health: state.player.tank.health,
                enemies_remaining: state.enemies.len(),
                kills: state.kills,
                score: state.score,
            },
            player: state.player.clone(),
            enemies: state.enemies.clone(),
            bullets: state.bullets.iter().filter(|b| b.active).cloned().collect(),
            walls,
            grass,
            explosions: state.explosions.iter().filter(|e| e.active).cloned().collect(),
        }
    }

    /// Draw in layer order: solid walls, tanks, bullets, grass, explosions, HUD.
    /// A player with no lives left is not drawn.
    pub fn render(&self, renderer: &mut impl Renderer) {
        for wall in &self.walls {
            renderer.draw_wall(wall);
        }
        if !self.player.tank.is_destroyed() {
            renderer.draw_tank(&self.player.tank);
        }
        for enemy in &self.enemies {
            renderer.draw_tank(&enemy.tank);
        }
        for bullet in &self.bullets {
            renderer.draw_bullet(bullet);
        }
        for wall in &self.grass {
            renderer.draw_wall(wall);
        }
        for explosion in &self.explosions {
            renderer.draw_explosion(explosion);
        }
        renderer.draw_hud(&self.hud);
    }

    /// Serialize for external tooling
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl<R> GameState<R> {
    /// Capture the current frame
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(self)
    }
}
