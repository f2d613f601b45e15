//! Level and wave generation
//!
//! A level is a wave of enemies plus a scattered terrain layout inside a
//! permanent Stone border. Placement is purely random: walls may land on
//! spawn points and enemies may overlap walls or each other.

use glam::Vec2;
use rand::Rng;

use super::state::{Enemy, GameState, Wall, WallKind};
use crate::config::SimConfig;

/// Terrain kinds drawn for scattered tiles; bricks are twice as likely
const TERRAIN_KINDS: [WallKind; 3] = [WallKind::Brick, WallKind::Brick, WallKind::Stone];

/// Replace enemies, bullets, walls and explosions with a fresh layout for
/// `state.level`. The player is left untouched.
pub fn generate_level<R: Rng>(state: &mut GameState<R>) {
    state.enemies.clear();
    state.bullets.clear();
    state.walls.clear();
    state.explosions.clear();

    let level = state.level;
    let count = state.config.enemies_for_level(level);
    for _ in 0..count {
        let pos = enemy_spawn_point(&state.config, &mut state.rng);
        let id = state.next_entity_id();
        let enemy = Enemy::new(id, pos, level, &state.config, &mut state.rng);
        state.enemies.push(enemy);
    }

    for _ in 0..state.config.terrain_tiles {
        let pos = random_tile(&state.config, &mut state.rng);
        let kind = TERRAIN_KINDS[state.rng.random_range(0..TERRAIN_KINDS.len())];
        let id = state.next_entity_id();
        state.walls.push(Wall::new(id, pos, kind, state.config.tile_size));
    }

    for _ in 0..state.config.grass_tiles {
        let pos = random_tile(&state.config, &mut state.rng);
        let id = state.next_entity_id();
        state
            .walls
            .push(Wall::new(id, pos, WallKind::Grass, state.config.tile_size));
    }

    for pos in border_tiles(&state.config) {
        let id = state.next_entity_id();
        state
            .walls
            .push(Wall::new(id, pos, WallKind::Stone, state.config.tile_size));
    }

    log::info!(
        "Level {}: {} enemies at speed {}, {} walls",
        level,
        state.enemies.len(),
        state.config.enemy_speed_for_level(level),
        state.walls.len()
    );
}

/// Integer top-left corner inside the enemy spawn band
fn enemy_spawn_point<R: Rng + ?Sized>(config: &SimConfig, rng: &mut R) -> Vec2 {
    let x = rng.random_range(config.enemy_spawn_min.x as i32..=config.enemy_spawn_max.x as i32);
    let y = rng.random_range(config.enemy_spawn_min.y as i32..=config.enemy_spawn_max.y as i32);
    Vec2::new(x as f32, y as f32)
}

/// Tile-aligned corner in the play area: clear of the border columns and of
/// the top and bottom bands
fn random_tile<R: Rng + ?Sized>(config: &SimConfig, rng: &mut R) -> Vec2 {
    let column = rng.random_range(1..=config.columns() - 2);
    let row = rng.random_range(3..=config.rows() - 3);
    Vec2::new(column as f32, row as f32) * config.tile_size
}

/// Stone ring one tile thick around the screen. Corner tiles appear twice,
/// once from the row pass and once from the column pass.
pub fn border_tiles(config: &SimConfig) -> Vec<Vec2> {
    let tile = config.tile_size;
    let columns = config.columns();
    let rows = config.rows();
    let mut tiles = Vec::with_capacity(2 * (columns + rows) as usize);

    for column in 0..columns {
        let x = column as f32 * tile;
        tiles.push(Vec2::new(x, 0.0));
        tiles.push(Vec2::new(x, config.screen_height - tile));
    }
    for row in 0..rows {
        let y = row as f32 * tile;
        tiles.push(Vec2::new(0.0, y));
        tiles.push(Vec2::new(config.screen_width - tile, y));
    }
    tiles
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::GamePhase;

    fn state_at_level(level: u32, seed: u64) -> GameState {
        let mut state = GameState::new(seed, SimConfig::default()).expect("default config is valid");
        state.level = level;
        generate_level(&mut state);
        state
    }

    #[test]
    fn test_wave_size_scales_with_level() {
        assert_eq!(state_at_level(1, 1).enemies.len(), 3);
        assert_eq!(state_at_level(3, 1).enemies.len(), 5);
        assert_eq!(state_at_level(10, 1).enemies.len(), 12);
    }

    #[test]
    fn test_enemy_speed_scales_with_level() {
        let state = state_at_level(3, 9);
        assert!(state.enemies.iter().all(|e| e.tank.speed == 3.0));
    }

    #[test]
    fn test_enemies_spawn_inside_band() {
        let state = state_at_level(5, 11);
        for enemy in &state.enemies {
            let pos = enemy.tank.pos;
            assert!((50.0..=700.0).contains(&pos.x));
            assert!((50.0..=200.0).contains(&pos.y));
            assert_eq!(pos.x.fract(), 0.0);
            assert_eq!(pos.y.fract(), 0.0);
            assert!((60..=180).contains(&enemy.ai.shoot_interval));
            assert_eq!(enemy.ai.move_interval, 120);
        }
    }

    #[test]
    fn test_terrain_counts() {
        let state = state_at_level(1, 3);
        let config = &state.config;
        let border = border_tiles(config).len();
        let grass = state
            .walls
            .iter()
            .filter(|w| w.kind == WallKind::Grass)
            .count();

        assert_eq!(border, 2 * 20 + 2 * 15);
        assert_eq!(grass, 10);
        assert_eq!(state.walls.len(), 15 + 10 + border);
    }

    #[test]
    fn test_scattered_tiles_are_tile_aligned_inside_play_area() {
        let state = state_at_level(1, 21);
        // Scattered tiles come before the border
        for wall in state.walls.iter().take(25) {
            let column = wall.pos.x / 40.0;
            let row = wall.pos.y / 40.0;
            assert_eq!(column.fract(), 0.0);
            assert_eq!(row.fract(), 0.0);
            assert!((1.0..=18.0).contains(&column));
            assert!((3.0..=12.0).contains(&row));
        }
    }

    #[test]
    fn test_border_encloses_screen() {
        let config = SimConfig::default();
        let tiles = border_tiles(&config);
        assert!(tiles.contains(&Vec2::new(0.0, 0.0)));
        assert!(tiles.contains(&Vec2::new(760.0, 0.0)));
        assert!(tiles.contains(&Vec2::new(0.0, 560.0)));
        assert!(tiles.contains(&Vec2::new(760.0, 560.0)));
        assert!(tiles.contains(&Vec2::new(400.0, 560.0)));
        assert!(tiles.contains(&Vec2::new(760.0, 280.0)));
    }

    #[test]
    fn test_border_is_stone() {
        let state = state_at_level(2, 5);
        assert!(
            state
                .walls
                .iter()
                .skip(25)
                .all(|w| w.kind == WallKind::Stone && w.active)
        );
    }

    #[test]
    fn test_generation_resets_transient_entities() {
        let mut state = GameState::new(17, SimConfig::default()).expect("default config is valid");
        let bullet_id = state.next_entity_id();
        let bullet = state.player.tank.shoot(bullet_id, &SimConfig::default());
        state.bullets.push(bullet);
        state.walls[0].active = false;

        generate_level(&mut state);

        assert!(state.bullets.is_empty());
        assert!(state.explosions.is_empty());
        assert!(state.walls.iter().all(|w| w.active));
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_same_seed_same_layout() {
        let a = state_at_level(4, 1234);
        let b = state_at_level(4, 1234);
        let walls_a: Vec<_> = a.walls.iter().map(|w| (w.pos, w.kind)).collect();
        let walls_b: Vec<_> = b.walls.iter().map(|w| (w.pos, w.kind)).collect();
        assert_eq!(walls_a, walls_b);
        let enemies_a: Vec<_> = a.enemies.iter().map(|e| (e.tank.pos, e.tank.direction)).collect();
        let enemies_b: Vec<_> = b.enemies.iter().map(|e| (e.tank.pos, e.tank.direction)).collect();
        assert_eq!(enemies_a, enemies_b);
    }
}
