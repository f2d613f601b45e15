//! Game state and core simulation types
//!
//! All mutable game data lives in [`GameState`]. Entities are plain records
//! with no references back to the state; the collision resolver and the tick
//! function mutate them in place.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::aabb::Aabb;
use super::level;
use crate::config::{ConfigError, SimConfig};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// All player lives lost; waiting for restart
    GameOver,
    /// Wave cleared; waiting for advance
    LevelComplete,
}

/// Facing and movement direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Unit step in screen space (y grows downward)
    pub fn delta(self) -> Vec2 {
        match self {
            Direction::Up => Vec2::new(0.0, -1.0),
            Direction::Down => Vec2::new(0.0, 1.0),
            Direction::Left => Vec2::new(-1.0, 0.0),
            Direction::Right => Vec2::new(1.0, 0.0),
        }
    }

    /// Uniformly random direction
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

/// Which side a tank or bullet fights for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Player,
    Enemy,
}

/// What a tank wants to do this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Intent {
    /// Direction to drive in, if any
    pub direction: Option<Direction>,
    pub fire: bool,
}

/// Data shared by player and enemy tanks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tank {
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub direction: Direction,
    /// Distance moved per tick
    pub speed: f32,
    pub health: u32,
    /// Ticks remaining before the next shot is allowed
    pub shoot_cooldown: u32,
    pub shoot_delay: u32,
    pub side: Side,
}

impl Tank {
    pub fn bounding_box(&self) -> Aabb {
        Aabb::from_corner(self.pos, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    pub fn is_destroyed(&self) -> bool {
        self.health == 0
    }

    /// Per-tick bookkeeping: the shot cooldown runs down
    pub fn update(&mut self) {
        self.shoot_cooldown = self.shoot_cooldown.saturating_sub(1);
    }

    pub fn can_shoot(&self) -> bool {
        self.shoot_cooldown == 0
    }

    /// Fire unconditionally: spawns a bullet at the muzzle and restarts the
    /// cooldown. Callers gate this on [`Tank::can_shoot`].
    pub fn shoot(&mut self, bullet_id: u32, config: &SimConfig) -> Bullet {
        let muzzle = self.center() + self.direction.delta() * config.muzzle_offset;
        self.shoot_cooldown = self.shoot_delay;
        Bullet::new(bullet_id, muzzle, self.direction, self.side, config)
    }

    /// [`Tank::shoot`] if the cooldown allows it, otherwise `None`
    pub fn try_shoot(&mut self, bullet_id: u32, config: &SimConfig) -> Option<Bullet> {
        if self.can_shoot() {
            Some(self.shoot(bullet_id, config))
        } else {
            None
        }
    }

    /// Take one point of damage; returns true if this destroyed the tank
    pub fn take_hit(&mut self) -> bool {
        self.health = self.health.saturating_sub(1);
        self.is_destroyed()
    }
}

/// The human-controlled tank
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub tank: Tank,
    pub lives: u32,
}

impl Player {
    pub fn new(id: u32, config: &SimConfig) -> Self {
        Self {
            tank: Tank {
                id,
                pos: config.player_spawn,
                size: Vec2::splat(config.tank_size),
                direction: Direction::Up,
                speed: config.player_speed,
                health: config.player_health,
                shoot_cooldown: 0,
                shoot_delay: config.shoot_delay,
                side: Side::Player,
            },
            lives: config.player_lives,
        }
    }

    /// Put the player back at the spawn point with full health.
    /// Facing and cooldown carry over.
    pub fn respawn(&mut self, config: &SimConfig) {
        self.tank.pos = config.player_spawn;
        self.tank.health = config.player_health;
    }
}

/// AI decision timers, all counted in ticks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiTimers {
    pub move_timer: u32,
    pub move_interval: u32,
    pub shoot_timer: u32,
    pub shoot_interval: u32,
}

/// A computer-controlled tank
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub tank: Tank,
    pub ai: AiTimers,
}

impl Enemy {
    /// Create an enemy for `level`. Draws the first shoot interval, then
    /// the starting direction.
    pub fn new<R: Rng + ?Sized>(
        id: u32,
        pos: Vec2,
        level: u32,
        config: &SimConfig,
        rng: &mut R,
    ) -> Self {
        let shoot_interval = rng.random_range(config.ai_interval_range());
        let direction = Direction::random(rng);
        Self {
            tank: Tank {
                id,
                pos,
                size: Vec2::splat(config.tank_size),
                direction,
                speed: config.enemy_speed_for_level(level),
                health: config.enemy_health,
                shoot_cooldown: 0,
                shoot_delay: config.shoot_delay,
                side: Side::Enemy,
            },
            ai: AiTimers {
                move_timer: 0,
                move_interval: config.initial_move_interval,
                shoot_timer: 0,
                shoot_interval,
            },
        }
    }
}

/// A projectile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub id: u32,
    /// Center point
    pub pos: Vec2,
    pub direction: Direction,
    pub speed: f32,
    pub size: Vec2,
    pub owner: Side,
    pub active: bool,
}

impl Bullet {
    pub fn new(id: u32, pos: Vec2, direction: Direction, owner: Side, config: &SimConfig) -> Self {
        Self {
            id,
            pos,
            direction,
            speed: config.bullet_speed,
            size: Vec2::splat(config.bullet_size),
            owner,
            active: true,
        }
    }

    pub fn bounding_box(&self) -> Aabb {
        Aabb::centered(self.pos, self.size)
    }

    /// Advance one tick; leaving the playfield deactivates the bullet
    pub fn update(&mut self, playfield: Vec2) {
        if !self.active {
            return;
        }
        self.pos += self.direction.delta() * self.speed;
        if self.pos.x < 0.0 || self.pos.x > playfield.x || self.pos.y < 0.0 || self.pos.y > playfield.y
        {
            self.active = false;
        }
    }
}

/// Terrain tile types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WallKind {
    /// Destroyed by a single bullet
    Brick,
    /// Indestructible
    Stone,
    /// Cosmetic cover drawn above tanks; blocks nothing
    Grass,
}

impl WallKind {
    pub fn blocks(self) -> bool {
        self != WallKind::Grass
    }
}

/// A terrain tile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wall {
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub kind: WallKind,
    pub active: bool,
}

impl Wall {
    pub fn new(id: u32, pos: Vec2, kind: WallKind, tile_size: f32) -> Self {
        Self {
            id,
            pos,
            size: Vec2::splat(tile_size),
            kind,
            active: true,
        }
    }

    pub fn bounding_box(&self) -> Aabb {
        Aabb::from_corner(self.pos, self.size)
    }

    /// Active and solid to tanks and bullets
    pub fn blocks(&self) -> bool {
        self.active && self.kind.blocks()
    }

    /// Absorb a bullet; bricks break
    pub fn hit(&mut self) {
        if self.kind == WallKind::Brick {
            self.active = false;
        }
    }
}

/// Fraction of an explosion's life spent expanding
const EXPLOSION_GROW_PHASE: f32 = 0.3;

/// A purely visual blast
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Explosion {
    /// Center point
    pub pos: Vec2,
    pub frame: u32,
    pub max_frames: u32,
    pub max_radius: f32,
    pub active: bool,
}

impl Explosion {
    pub fn new(pos: Vec2, config: &SimConfig) -> Self {
        Self {
            pos,
            frame: 0,
            max_frames: config.explosion_frames,
            max_radius: config.explosion_radius,
            active: true,
        }
    }

    pub fn update(&mut self) {
        self.frame += 1;
        if self.frame >= self.max_frames {
            self.active = false;
        }
    }

    /// Elapsed share of the lifetime, 0..=1
    pub fn progress(&self) -> f32 {
        if self.max_frames == 0 {
            return 1.0;
        }
        (self.frame as f32 / self.max_frames as f32).min(1.0)
    }

    /// Blast radius: grows during the first part of the life, then holds
    pub fn radius(&self) -> f32 {
        let progress = self.progress();
        if progress < EXPLOSION_GROW_PHASE {
            self.max_radius * (progress / EXPLOSION_GROW_PHASE)
        } else {
            self.max_radius
        }
    }

    /// Opacity 0..=255: opaque while growing, then fading out
    pub fn alpha(&self) -> u8 {
        let progress = self.progress();
        if progress < EXPLOSION_GROW_PHASE {
            255
        } else {
            let fade = 1.0 - (progress - EXPLOSION_GROW_PHASE) / (1.0 - EXPLOSION_GROW_PHASE);
            (255.0 * fade.clamp(0.0, 1.0)) as u8
        }
    }
}

/// Complete simulation state
///
/// Generic over the random source so tests can inject their own; the
/// default is a seeded PCG generator.
#[derive(Debug, Clone)]
pub struct GameState<R = Pcg32> {
    pub config: SimConfig,
    pub rng: R,
    /// Current level (1-based)
    pub level: u32,
    /// Enemies destroyed this game
    pub kills: u32,
    pub score: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub phase: GamePhase,
    /// Set by a quit command; ticking stops for good
    pub quit_requested: bool,
    pub player: Player,
    /// Active enemies in spawn order
    pub enemies: Vec<Enemy>,
    /// Bullets in firing order
    pub bullets: Vec<Bullet>,
    /// Walls in generation order
    pub walls: Vec<Wall>,
    pub explosions: Vec<Explosion>,
    next_id: u32,
}

impl GameState<Pcg32> {
    /// Create a new game seeded with `seed`
    pub fn new(seed: u64, config: SimConfig) -> Result<Self, ConfigError> {
        log::info!("New game with seed {}", seed);
        Self::with_rng(config, Pcg32::seed_from_u64(seed))
    }
}

impl<R: Rng> GameState<R> {
    /// Create a new game drawing randomness from `rng`; level 1 is generated
    /// immediately. Fails if `config` does not validate.
    pub fn with_rng(config: SimConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        let player = Player::new(1, &config);
        let mut state = Self {
            config,
            rng,
            level: 1,
            kills: 0,
            score: 0,
            time_ticks: 0,
            phase: GamePhase::Playing,
            quit_requested: false,
            player,
            enemies: Vec::new(),
            bullets: Vec::new(),
            walls: Vec::new(),
            explosions: Vec::new(),
            next_id: 2,
        };
        level::generate_level(&mut state);
        Ok(state)
    }

    /// Allocate a new entity ID. The counter wraps rather than overflowing.
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    /// Start the next level from LevelComplete. The player keeps lives,
    /// health and position.
    pub fn advance_level(&mut self) {
        self.level += 1;
        level::generate_level(self);
        self.phase = GamePhase::Playing;
        log::info!("Advanced to level {}", self.level);
    }

    /// Start over from level 1 with a fresh player
    pub fn restart(&mut self) {
        self.level = 1;
        self.kills = 0;
        self.score = 0;
        self.player = Player::new(self.player.tank.id, &self.config);
        level::generate_level(self);
        self.phase = GamePhase::Playing;
        log::info!("Game restarted");
    }

    /// Whole-screen box
    pub fn playfield(&self) -> Aabb {
        Aabb::from_corner(Vec2::ZERO, self.config.screen_size())
    }
}
