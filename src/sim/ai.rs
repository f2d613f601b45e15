//! Enemy AI
//!
//! Enemies wander: they drive straight along their facing every tick and
//! re-roll the facing when their move timer expires (or when blocked, see
//! [`move_enemy`]). A second timer decides when to pull the trigger; the
//! shot itself is still subject to the tank's cooldown.

use glam::Vec2;
use rand::Rng;

use super::collision::move_enemy;
use super::state::{Direction, Enemy, Intent, Wall};
use crate::config::SimConfig;

/// Advance the AI timers and pick this tick's intent. An expired move timer
/// turns the tank to a fresh random direction and draws a new interval.
pub fn decide<R: Rng + ?Sized>(enemy: &mut Enemy, config: &SimConfig, rng: &mut R) -> Intent {
    let ai = &mut enemy.ai;
    ai.move_timer += 1;
    ai.shoot_timer += 1;

    if ai.move_timer >= ai.move_interval {
        enemy.tank.direction = Direction::random(rng);
        ai.move_timer = 0;
        ai.move_interval = rng.random_range(config.ai_interval_range());
    }

    Intent {
        direction: Some(enemy.tank.direction),
        fire: false,
    }
}

/// Check the shoot timer. On expiry the timer restarts with a fresh interval
/// and the enemy wants to fire.
pub fn ready_to_fire<R: Rng + ?Sized>(enemy: &mut Enemy, config: &SimConfig, rng: &mut R) -> bool {
    let ai = &mut enemy.ai;
    if ai.shoot_timer < ai.shoot_interval {
        return false;
    }
    ai.shoot_timer = 0;
    ai.shoot_interval = rng.random_range(config.ai_interval_range());
    true
}

/// One full AI tick for an enemy: timers, movement, cooldown, trigger.
/// Returns the intent actually carried out; `fire` is set when the shoot
/// timer expired, whether or not the cooldown will allow the shot.
pub fn update_enemy<R: Rng + ?Sized>(
    enemy: &mut Enemy,
    walls: &[Wall],
    playfield: Vec2,
    config: &SimConfig,
    rng: &mut R,
) -> Intent {
    let mut intent = decide(enemy, config, rng);
    if move_enemy(&mut enemy.tank, walls, playfield, rng) {
        intent.direction = Some(enemy.tank.direction);
    }
    enemy.tank.update();
    intent.fire = ready_to_fire(enemy, config, rng);
    intent
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::WallKind;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn enemy_at(pos: Vec2, rng: &mut Pcg32) -> Enemy {
        Enemy::new(1, pos, 1, &SimConfig::default(), rng)
    }

    #[test]
    fn test_move_timer_rerolls_interval() {
        let config = SimConfig::default();
        let mut rng = Pcg32::seed_from_u64(10);
        let mut enemy = enemy_at(Vec2::new(300.0, 300.0), &mut rng);

        for _ in 0..119 {
            decide(&mut enemy, &config, &mut rng);
        }
        assert_eq!(enemy.ai.move_timer, 119);
        assert_eq!(enemy.ai.move_interval, 120);

        decide(&mut enemy, &config, &mut rng);
        assert_eq!(enemy.ai.move_timer, 0);
        assert!((60..=180).contains(&enemy.ai.move_interval));
    }

    #[test]
    fn test_shoot_timer_expiry() {
        let config = SimConfig::default();
        let mut rng = Pcg32::seed_from_u64(11);
        let mut enemy = enemy_at(Vec2::new(300.0, 300.0), &mut rng);
        enemy.ai.shoot_interval = 3;

        assert!(!ready_to_fire(&mut enemy, &config, &mut rng));
        enemy.ai.shoot_timer = 3;
        assert!(ready_to_fire(&mut enemy, &config, &mut rng));
        assert_eq!(enemy.ai.shoot_timer, 0);
        assert!((60..=180).contains(&enemy.ai.shoot_interval));
    }

    #[test]
    fn test_update_moves_every_tick() {
        let config = SimConfig::default();
        let mut rng = Pcg32::seed_from_u64(12);
        let mut enemy = enemy_at(Vec2::new(300.0, 300.0), &mut rng);
        enemy.tank.direction = Direction::Down;

        let intent = update_enemy(&mut enemy, &[], config.screen_size(), &config, &mut rng);

        assert_eq!(intent.direction, Some(Direction::Down));
        assert_eq!(enemy.tank.pos, Vec2::new(300.0, 302.0));
        assert_eq!(enemy.ai.move_timer, 1);
        assert_eq!(enemy.ai.shoot_timer, 1);
    }

    #[test]
    fn test_update_fires_on_timer_even_when_on_cooldown() {
        let config = SimConfig::default();
        let mut rng = Pcg32::seed_from_u64(13);
        let mut enemy = enemy_at(Vec2::new(300.0, 300.0), &mut rng);
        enemy.ai.shoot_interval = 1;
        enemy.tank.shoot_cooldown = 10;

        let intent = update_enemy(&mut enemy, &[], config.screen_size(), &config, &mut rng);

        assert!(intent.fire);
        assert_eq!(enemy.tank.shoot_cooldown, 9);
        assert!(!enemy.tank.can_shoot());
    }

    #[test]
    fn test_blocked_enemy_stays_put() {
        let config = SimConfig::default();
        let mut rng = Pcg32::seed_from_u64(14);
        let walls = vec![Wall::new(9, Vec2::new(300.0, 340.0), WallKind::Stone, 40.0)];
        let mut enemy = enemy_at(Vec2::new(300.0, 304.0), &mut rng);
        enemy.tank.direction = Direction::Down;

        update_enemy(&mut enemy, &walls, config.screen_size(), &config, &mut rng);

        assert_eq!(enemy.tank.pos, Vec2::new(300.0, 304.0));
    }

    #[test]
    fn test_wandering_never_leaves_screen() {
        let config = SimConfig::default();
        let mut rng = Pcg32::seed_from_u64(15);
        let mut enemy = enemy_at(Vec2::new(10.0, 10.0), &mut rng);

        for _ in 0..5_000 {
            update_enemy(&mut enemy, &[], config.screen_size(), &config, &mut rng);
            let pos = enemy.tank.pos;
            assert!(pos.x >= 0.0 && pos.x <= 765.0);
            assert!(pos.y >= 0.0 && pos.y <= 565.0);
        }
    }
}
