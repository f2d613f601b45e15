//! Collision detection and response
//!
//! Movement is optimistic: a tank steps forward, then steps back if it ended
//! up somewhere it may not be. Bullets are resolved once per tick, walls
//! first, then tanks. Every scan runs in insertion order and stops at the
//! first hit, which keeps outcomes deterministic.

use glam::Vec2;
use rand::Rng;

use super::aabb::{Aabb, intersects};
use super::state::{Bullet, Direction, Explosion, GamePhase, GameState, Side, Tank, Wall};

/// Index of the first active solid wall overlapping `bbox`
pub fn first_blocking_wall(bbox: &Aabb, walls: &[Wall]) -> Option<usize> {
    walls
        .iter()
        .position(|wall| wall.blocks() && intersects(bbox, &wall.bounding_box()))
}

/// Drive the player one step. The screen edge clamps; a wall undoes the whole
/// step. Returns true if the tank ended up somewhere new.
pub fn move_player(tank: &mut Tank, direction: Direction, walls: &[Wall], playfield: Vec2) -> bool {
    let old_pos = tank.pos;
    tank.direction = direction;

    let max = (playfield - tank.size).max(Vec2::ZERO);
    tank.pos = (tank.pos + direction.delta() * tank.speed).clamp(Vec2::ZERO, max);

    if first_blocking_wall(&tank.bounding_box(), walls).is_some() {
        tank.pos = old_pos;
    }
    tank.pos != old_pos
}

/// Drive an enemy one step along its current facing. Leaving the screen or
/// running into a wall undoes the step and turns the tank to a random
/// direction. Returns true if the step was blocked.
pub fn move_enemy<R: Rng + ?Sized>(
    tank: &mut Tank,
    walls: &[Wall],
    playfield: Vec2,
    rng: &mut R,
) -> bool {
    let old_pos = tank.pos;
    let mut blocked = false;

    tank.pos += tank.direction.delta() * tank.speed;

    let screen = Aabb::from_corner(Vec2::ZERO, playfield);
    if !tank.bounding_box().is_within(&screen) {
        tank.pos = old_pos;
        tank.direction = Direction::random(rng);
        blocked = true;
    }

    if first_blocking_wall(&tank.bounding_box(), walls).is_some() {
        tank.pos = old_pos;
        tank.direction = Direction::random(rng);
        blocked = true;
    }
    blocked
}

/// Stop bullets at solid walls. Each bullet is absorbed by the first wall it
/// overlaps; bricks break, stone holds.
pub fn resolve_bullet_walls(bullets: &mut [Bullet], walls: &mut [Wall]) {
    for bullet in bullets.iter_mut().filter(|b| b.active) {
        if let Some(index) = first_blocking_wall(&bullet.bounding_box(), walls) {
            bullet.active = false;
            walls[index].hit();
            log::trace!("Bullet {} absorbed by {:?} wall", bullet.id, walls[index].kind);
        }
    }
}

/// Apply bullet hits on tanks. Player bullets only test enemies, enemy
/// bullets only test the player. Each bullet damages at most one tank.
pub fn resolve_bullet_tanks<R: Rng>(state: &mut GameState<R>) {
    for i in 0..state.bullets.len() {
        if !state.bullets[i].active {
            continue;
        }
        let bullet_box = state.bullets[i].bounding_box();

        match state.bullets[i].owner {
            Side::Player => {
                let Some(index) = state
                    .enemies
                    .iter()
                    .position(|e| intersects(&bullet_box, &e.tank.bounding_box()))
                else {
                    continue;
                };

                state.bullets[i].active = false;
                let target = &mut state.enemies[index].tank;
                let destroyed = target.take_hit();
                let center = target.center();
                state.explosions.push(Explosion::new(center, &state.config));

                if destroyed {
                    let enemy = state.enemies.remove(index);
                    state.kills += 1;
                    state.score += state.config.score_per_kill;
                    log::debug!("Enemy {} destroyed ({} kills)", enemy.tank.id, state.kills);
                }
            }
            Side::Enemy => {
                // Nothing left to lose once the last life is gone
                if state.player.lives == 0 {
                    continue;
                }
                if !intersects(&bullet_box, &state.player.tank.bounding_box()) {
                    continue;
                }

                state.bullets[i].active = false;
                let destroyed = state.player.tank.take_hit();
                let center = state.player.tank.center();
                state.explosions.push(Explosion::new(center, &state.config));

                if destroyed {
                    state.player.lives -= 1;
                    if state.player.lives > 0 {
                        state.player.respawn(&state.config);
                        log::info!("Player lost a life, {} remaining", state.player.lives);
                    } else {
                        state.phase = GamePhase::GameOver;
                        log::info!(
                            "Game over at level {} with {} kills",
                            state.level,
                            state.kills
                        );
                    }
                }
            }
        }
    }
}

/// Full bullet pass: walls, then tanks, then drop spent bullets
pub fn resolve_bullets<R: Rng>(state: &mut GameState<R>) {
    resolve_bullet_walls(&mut state.bullets, &mut state.walls);
    resolve_bullet_tanks(state);
    state.bullets.retain(|b| b.active);
}
