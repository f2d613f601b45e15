//! Fixed-timestep driver
//!
//! Hosts deliver variable frame times; the simulation only understands whole
//! ticks. The driver accumulates time, runs as many ticks as fit (capped),
//! and makes sure one-shot commands are seen by exactly one tick.

use rand::Rng;
use rand_pcg::Pcg32;

use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::sim::{GameState, Snapshot, TickInput, tick};

/// Longest frame time accepted in one update, in seconds
const MAX_FRAME_TIME: f32 = 0.25;

/// Owns a game and feeds it ticks at [`SIM_DT`]
#[derive(Debug)]
pub struct Driver<R = Pcg32> {
    pub state: GameState<R>,
    /// Input applied to the next tick(s)
    pub input: TickInput,
    accumulator: f32,
}

impl<R: Rng> Driver<R> {
    pub fn new(state: GameState<R>) -> Self {
        Self {
            state,
            input: TickInput::default(),
            accumulator: 0.0,
        }
    }

    /// Feed `dt` seconds of wall time; returns the number of ticks run
    pub fn update(&mut self, dt: f32) -> u32 {
        let dt = dt.clamp(0.0, MAX_FRAME_TIME);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            if self.state.quit_requested {
                self.accumulator = 0.0;
                break;
            }
            tick(&mut self.state, &self.input);
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Clear one-shot inputs after processing
            self.input.fire = false;
            self.input.advance = false;
            self.input.restart = false;
            self.input.quit = false;
        }
        substeps
    }

    /// Run exactly one tick with the current input
    pub fn step(&mut self) {
        tick(&mut self.state, &self.input);
        self.input.fire = false;
        self.input.advance = false;
        self.input.restart = false;
        self.input.quit = false;
    }

    /// Ask the game to stop; honored at the next tick boundary
    pub fn request_quit(&mut self) {
        self.input.quit = true;
    }

    pub fn is_running(&self) -> bool {
        !self.state.quit_requested
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }
}
