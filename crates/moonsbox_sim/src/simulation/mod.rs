//! Tick scheduling: one simulation step over the whole map.
//!
//! A tick runs three strictly ordered passes:
//!
//! 1. **Heat exchange**: snapshot-based, see [`heat`].
//! 2. **Non-gas behavior + movement**: row-major, bottom row first. Falling
//!    entities move into rows the scan has already left, so a grain drops at
//!    most one row per tick.
//! 3. **Gas behavior + movement**: rows in *descending* order. Rising gas
//!    moves into rows the scan has already left; without the reverse order a
//!    single gas dot would cascade several rows in one tick.
//!
//! Passes 2 and 3 mutate the map immediately through its accessors; reading
//! neighbors that already moved this tick is an accepted property of the
//! model, bounded by the scan orders above.

mod heat;
mod movement;

use crate::config::SimConfig;
use crate::map::GameMap;
use crate::material::{Tags, behavior};
use crate::rng::SimRng;

/// Runs the per-tick update rules against a [`GameMap`].
pub struct Simulation {
  config: SimConfig,
  rng: SimRng,
  ticks: u64,
}

impl Simulation {
  pub fn new(config: SimConfig) -> Self {
    let rng = SimRng::new(config.seed);
    Self {
      config,
      rng,
      ticks: 0,
    }
  }

  pub fn config(&self) -> &SimConfig {
    &self.config
  }

  /// Number of completed ticks.
  pub fn ticks(&self) -> u64 {
    self.ticks
  }

  /// The engine PRNG, exposed so drawing factories can share it.
  pub fn rng_mut(&mut self) -> &mut SimRng {
    &mut self.rng
  }

  /// Advances the simulation by one step. Never fails; calling it twice
  /// advances simulated time by two steps.
  pub fn tick(&mut self, map: &mut GameMap) {
    if self.config.temp_exchange {
      heat::exchange(map);
    }

    let width = map.width() as i32;
    let height = map.height() as i32;

    for y in 0..height {
      for x in 0..width {
        let Some(dot) = map.get(x, y) else { continue };
        if dot.tags().contains(Tags::GAS) {
          continue;
        }
        behavior::update(map, x, y, &mut self.rng, &self.config);
        let Some(dot) = map.get(x, y) else { continue };
        if !dot.tags().contains(Tags::GAS) {
          movement::resolve(map, x, y, &mut self.rng, &self.config);
        }
      }
    }

    for y in (0..height).rev() {
      for x in 0..width {
        let Some(dot) = map.get(x, y) else { continue };
        if !dot.tags().contains(Tags::GAS) {
          continue;
        }
        behavior::update(map, x, y, &mut self.rng, &self.config);
        let Some(dot) = map.get(x, y) else { continue };
        if dot.tags().contains(Tags::GAS) {
          movement::resolve(map, x, y, &mut self.rng, &self.config);
        }
      }
    }

    self.ticks += 1;
  }
}

impl Default for Simulation {
  fn default() -> Self {
    Self::new(SimConfig::default())
  }
}
