//! Fixed timestep simulation tick
//!
//! Core game loop that advances the simulation deterministically, one frame
//! per call.

use rand::Rng;

use super::ai;
use super::collision::{move_player, resolve_bullets};
use super::state::{Direction, GamePhase, GameState, Intent};

/// Input for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Movement keys currently held
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Fire pressed this tick
    pub fire: bool,
    /// Start the next level (only honored in LevelComplete)
    pub advance: bool,
    /// Start a new game (only honored in GameOver)
    pub restart: bool,
    /// Leave the game; no further ticks are processed
    pub quit: bool,
}

impl TickInput {
    /// The player's intent. Only one direction is taken per tick, checked in
    /// the order Up, Down, Left, Right.
    pub fn intent(&self) -> Intent {
        let direction = if self.up {
            Some(Direction::Up)
        } else if self.down {
            Some(Direction::Down)
        } else if self.left {
            Some(Direction::Left)
        } else if self.right {
            Some(Direction::Right)
        } else {
            None
        };
        Intent {
            direction,
            fire: self.fire,
        }
    }
}

/// Advance the game state by one tick
pub fn tick<R: Rng>(state: &mut GameState<R>, input: &TickInput) {
    if state.quit_requested {
        return;
    }
    if input.quit {
        state.quit_requested = true;
        log::info!("Quit requested at tick {}", state.time_ticks);
        return;
    }

    if input.restart {
        if state.phase == GamePhase::GameOver {
            state.restart();
        } else {
            log::debug!("Ignoring restart while {:?}", state.phase);
        }
    }
    if input.advance {
        if state.phase == GamePhase::LevelComplete {
            state.advance_level();
        } else {
            log::debug!("Ignoring advance while {:?}", state.phase);
        }
    }

    // Only Playing advances the world
    if state.phase != GamePhase::Playing {
        return;
    }
    step(state, input.intent());
}

fn step<R: Rng>(state: &mut GameState<R>, intent: Intent) {
    state.time_ticks += 1;
    let playfield = state.config.screen_size();

    // Player: trigger, then tracks, then cooldown
    if intent.fire && state.player.tank.can_shoot() {
        let id = state.next_entity_id();
        let bullet = state.player.tank.shoot(id, &state.config);
        state.bullets.push(bullet);
    }
    if let Some(direction) = intent.direction {
        move_player(&mut state.player.tank, direction, &state.walls, playfield);
    }
    state.player.tank.update();

    // Enemies, in spawn order
    for i in 0..state.enemies.len() {
        let intent = ai::update_enemy(
            &mut state.enemies[i],
            &state.walls,
            playfield,
            &state.config,
            &mut state.rng,
        );
        if intent.fire && state.enemies[i].tank.can_shoot() {
            let id = state.next_entity_id();
            let bullet = state.enemies[i].tank.shoot(id, &state.config);
            state.bullets.push(bullet);
        }
    }

    for bullet in state.bullets.iter_mut() {
        bullet.update(playfield);
    }

    for explosion in state.explosions.iter_mut() {
        explosion.update();
    }
    state.explosions.retain(|e| e.active);

    resolve_bullets(state);

    if state.phase == GamePhase::Playing && state.enemies.is_empty() {
        state.phase = GamePhase::LevelComplete;
        log::info!(
            "Level {} complete at tick {} ({} kills)",
            state.level,
            state.time_ticks,
            state.kills
        );
    }
}
