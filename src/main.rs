//! Tank Battle headless runner
//!
//! Plays the simulation with a simple autopilot and prints the final frame.
//! Useful for checking level generation and replaying a seed.
//!
//! Usage: tank-battle [--seed N] [--ticks N] [--config PATH] [--snapshot]

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::time::{SystemTime, UNIX_EPOCH};

    use tank_battle::SimConfig;
    use tank_battle::driver::Driver;
    use tank_battle::sim::{
        Bullet, Explosion, GamePhase, GameState, Hud, Renderer, Side, Tank, TickInput, Wall,
        WallKind,
    };

    const DEFAULT_TICKS: u64 = 60 * 60;

    struct Options {
        seed: Option<u64>,
        ticks: u64,
        config: Option<String>,
        snapshot: bool,
    }

    fn parse_options(args: &[String]) -> Options {
        let mut options = Options {
            seed: None,
            ticks: DEFAULT_TICKS,
            config: None,
            snapshot: false,
        };
        let mut iter = args.iter().skip(1);
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--seed" => options.seed = iter.next().and_then(|v| v.parse().ok()),
                "--ticks" => {
                    if let Some(ticks) = iter.next().and_then(|v| v.parse().ok()) {
                        options.ticks = ticks;
                    }
                }
                "--config" => options.config = iter.next().cloned(),
                "--snapshot" => options.snapshot = true,
                other => log::warn!("Ignoring unknown argument {}", other),
            }
        }
        options
    }

    fn system_seed() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos() as u64
    }

    /// Line up under the nearest enemy, then drive at it with the trigger held
    fn autopilot(state: &GameState) -> TickInput {
        let mut input = TickInput::default();
        match state.phase {
            GamePhase::LevelComplete => input.advance = true,
            GamePhase::GameOver => input.quit = true,
            GamePhase::Playing => {
                let me = state.player.tank.center();
                let target = state
                    .enemies
                    .iter()
                    .map(|e| e.tank.center())
                    .min_by(|a, b| a.distance(me).total_cmp(&b.distance(me)));
                if let Some(target) = target {
                    let dx = target.x - me.x;
                    if dx.abs() > 4.0 {
                        input.left = dx < 0.0;
                        input.right = dx > 0.0;
                    } else if target.y < me.y {
                        input.up = true;
                    } else {
                        input.down = true;
                    }
                    input.fire = dx.abs() <= 4.0;
                }
            }
        }
        input
    }

    /// Renders a frame as one character per tile
    struct AsciiFrame {
        tile: f32,
        columns: usize,
        cells: Vec<char>,
        hud: String,
    }

    impl AsciiFrame {
        fn new(config: &SimConfig) -> Self {
            let columns = config.columns() as usize;
            let rows = config.rows() as usize;
            Self {
                tile: config.tile_size,
                columns,
                cells: vec![' '; columns * rows],
                hud: String::new(),
            }
        }

        fn plot(&mut self, x: f32, y: f32, glyph: char) {
            if x < 0.0 || y < 0.0 {
                return;
            }
            let column = (x / self.tile) as usize;
            let row = (y / self.tile) as usize;
            if column < self.columns {
                if let Some(cell) = self.cells.get_mut(row * self.columns + column) {
                    *cell = glyph;
                }
            }
        }

        fn print(&self) {
            for row in self.cells.chunks(self.columns) {
                println!("{}", row.iter().collect::<String>());
            }
            println!("{}", self.hud);
        }
    }

    impl Renderer for AsciiFrame {
        fn draw_wall(&mut self, wall: &Wall) {
            let glyph = match wall.kind {
                WallKind::Brick => 'B',
                WallKind::Stone => '#',
                WallKind::Grass => '"',
            };
            self.plot(wall.pos.x, wall.pos.y, glyph);
        }

        fn draw_tank(&mut self, tank: &Tank) {
            let center = tank.center();
            let glyph = match tank.side {
                Side::Player => 'P',
                Side::Enemy => 'E',
            };
            self.plot(center.x, center.y, glyph);
        }

        fn draw_bullet(&mut self, bullet: &Bullet) {
            self.plot(bullet.pos.x, bullet.pos.y, '*');
        }

        fn draw_explosion(&mut self, explosion: &Explosion) {
            self.plot(explosion.pos.x, explosion.pos.y, 'x');
        }

        fn draw_hud(&mut self, hud: &Hud) {
            self.hud = format!(
                "{:?} | level {} | lives {} | health {} | enemies {} | kills {} | score {}",
                hud.phase,
                hud.level,
                hud.lives,
                hud.health,
                hud.enemies_remaining,
                hud.kills,
                hud.score
            );
        }
    }

    pub fn run() -> i32 {
        env_logger::init();

        let args: Vec<String> = std::env::args().collect();
        let options = parse_options(&args);

        let config = match &options.config {
            Some(path) => match SimConfig::load(path) {
                Ok(config) => config,
                Err(e) => {
                    log::error!("{}", e);
                    return 1;
                }
            },
            None => SimConfig::default(),
        };

        let seed = options.seed.unwrap_or_else(system_seed);
        log::info!("Tank Battle (headless) seed {} for {} ticks", seed, options.ticks);

        let state = match GameState::new(seed, config.clone()) {
            Ok(state) => state,
            Err(e) => {
                log::error!("{}", e);
                return 1;
            }
        };
        let mut driver = Driver::new(state);
        let mut last_phase = driver.state.phase;
        for _ in 0..options.ticks {
            if !driver.is_running() {
                break;
            }
            driver.input = autopilot(&driver.state);
            driver.step();

            if driver.state.phase != last_phase {
                log::info!("Phase {:?} -> {:?}", last_phase, driver.state.phase);
                last_phase = driver.state.phase;
            }
        }

        let snapshot = driver.snapshot();
        let mut frame = AsciiFrame::new(&config);
        snapshot.render(&mut frame);
        frame.print();

        if options.snapshot {
            match snapshot.to_json() {
                Ok(json) => println!("{}", json),
                Err(e) => {
                    log::error!("Failed to serialize snapshot: {}", e);
                    return 1;
                }
            }
        }
        0
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    std::process::exit(native::run());
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No wasm host yet; the library is driven by the embedding page
}
