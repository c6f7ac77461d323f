//! Movement resolution for the four movability classes.
//!
//! Each class tries a fixed priority list of neighbor swaps and stops at the
//! first success. When everything is blocked, a low-probability diffusion
//! swap against a like-tagged neighbor keeps pools and clouds visually alive
//! instead of freezing into plateaus.

use crate::config::SimConfig;
use crate::map::GameMap;
use crate::material::behavior::{MOORE, VON_NEUMANN};
use crate::material::{Mobility, Tags};
use crate::rng::SimRng;

/// Attempts to move the dot at (x, y) according to its movability class.
pub(crate) fn resolve(map: &mut GameMap, x: i32, y: i32, rng: &mut SimRng, config: &SimConfig) {
  let Some(dot) = map.get(x, y) else {
    return;
  };
  match dot.mobility() {
    Mobility::None => {}
    Mobility::Sand => move_sand(map, x, y, rng),
    Mobility::Liquid => move_liquid(map, x, y, rng, config),
    Mobility::LightGas => move_light_gas(map, x, y, rng, config),
    Mobility::HeavyGas => move_heavy_gas(map, x, y, rng, config),
  }
}

/// Swaps (x, y) with the target if the target carries any of `wanted`.
fn try_swap(map: &mut GameMap, from: (i32, i32), to: (i32, i32), wanted: Tags) -> bool {
  let Some(target) = map.get(to.0, to.1) else {
    return false;
  };
  if !target.tags().intersects(wanted) {
    return false;
  }
  map.swap(from, to);
  true
}

/// Random swap with one cardinal neighbor carrying `partner` tags.
fn diffuse(map: &mut GameMap, x: i32, y: i32, rng: &mut SimRng, probability: f32, partner: Tags) {
  if !rng.chance(probability) {
    return;
  }
  let (dx, dy) = VON_NEUMANN[(rng.next_u64() % 4) as usize];
  try_swap(map, (x, y), (x + dx, y + dy), partner);
}

fn move_sand(map: &mut GameMap, x: i32, y: i32, rng: &mut SimRng) {
  if try_swap(map, (x, y), (x, y - 1), Tags::FLOWABLE) {
    return;
  }
  let dx = rng.pick(-1, 1);
  try_swap(map, (x, y), (x + dx, y - 1), Tags::FLOWABLE);
}

fn move_liquid(map: &mut GameMap, x: i32, y: i32, rng: &mut SimRng, config: &SimConfig) {
  // Percolates straight down through granular material.
  if try_swap(map, (x, y), (x, y - 1), Tags::BULK) {
    return;
  }
  if try_swap(map, (x, y), (x, y - 1), Tags::SPARSENESS) {
    return;
  }
  let first = rng.pick(-1, 1);
  if try_swap(map, (x, y), (x + first, y - 1), Tags::SPARSENESS) {
    return;
  }
  if try_swap(map, (x, y), (x - first, y - 1), Tags::SPARSENESS) {
    return;
  }
  let first = rng.pick(-1, 1);
  if try_swap(map, (x, y), (x + first, y), Tags::SPARSENESS) {
    return;
  }
  if try_swap(map, (x, y), (x - first, y), Tags::SPARSENESS) {
    return;
  }
  diffuse(map, x, y, rng, config.liquid_diffusion, Tags::LIQUID);
}

fn move_light_gas(map: &mut GameMap, x: i32, y: i32, rng: &mut SimRng, config: &SimConfig) {
  if try_swap(map, (x, y), (x, y + 1), Tags::SPACE) {
    return;
  }
  let first = rng.pick(-1, 1);
  if try_swap(map, (x, y), (x + first, y + 1), Tags::SPACE) {
    return;
  }
  if try_swap(map, (x, y), (x - first, y + 1), Tags::SPACE) {
    return;
  }
  let first = rng.pick(-1, 1);
  if try_swap(map, (x, y), (x + first, y), Tags::SPACE) {
    return;
  }
  if try_swap(map, (x, y), (x - first, y), Tags::SPACE) {
    return;
  }
  diffuse(map, x, y, rng, config.gas_diffusion, Tags::GAS);
}

fn move_heavy_gas(map: &mut GameMap, x: i32, y: i32, rng: &mut SimRng, config: &SimConfig) {
  let mut dirs = MOORE;
  rng.shuffle(&mut dirs);
  for (dx, dy) in dirs {
    if try_swap(map, (x, y), (x + dx, y + dy), Tags::SPACE) {
      return;
    }
  }
  diffuse(map, x, y, rng, config.gas_diffusion, Tags::GAS);
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::material::{Dot, Material, MaterialKind};

  fn sand(rng: &mut SimRng) -> Dot {
    MaterialKind::Sand.spawn(rng)
  }

  #[test]
  fn sand_falls_straight_down() {
    let mut rng = SimRng::new(1);
    let config = SimConfig::default();
    let mut map = GameMap::new(3, 3);
    map.set(1, 2, sand(&mut rng));

    resolve(&mut map, 1, 2, &mut rng, &config);
    assert_eq!(map.get(1, 1).unwrap().kind(), MaterialKind::Sand);
    assert_eq!(map.get(1, 2).unwrap().material, Material::Space);
  }

  #[test]
  fn sand_slides_off_a_pillar() {
    let mut rng = SimRng::new(2);
    let config = SimConfig::default();
    let mut map = GameMap::new(3, 2);
    map.set(1, 0, MaterialKind::Wall.spawn(&mut rng));
    map.set(1, 1, sand(&mut rng));

    resolve(&mut map, 1, 1, &mut rng, &config);
    let left = map.get(0, 0).unwrap().kind() == MaterialKind::Sand;
    let right = map.get(2, 0).unwrap().kind() == MaterialKind::Sand;
    assert!(left ^ right);
  }

  #[test]
  fn boxed_in_sand_stays_put() {
    let mut rng = SimRng::new(3);
    let config = SimConfig::default();
    let mut map = GameMap::new(3, 2);
    for x in 0..3 {
      map.set(x, 0, MaterialKind::Wall.spawn(&mut rng));
    }
    map.set(1, 1, sand(&mut rng));

    for _ in 0..50 {
      resolve(&mut map, 1, 1, &mut rng, &config);
    }
    assert_eq!(map.get(1, 1).unwrap().kind(), MaterialKind::Sand);
  }

  #[test]
  fn sand_sinks_into_liquid() {
    let mut rng = SimRng::new(4);
    let config = SimConfig::default();
    let mut map = GameMap::new(1, 2);
    map.set(0, 0, MaterialKind::Water.spawn(&mut rng));
    map.set(0, 1, sand(&mut rng));

    resolve(&mut map, 0, 1, &mut rng, &config);
    assert_eq!(map.get(0, 0).unwrap().kind(), MaterialKind::Sand);
    assert_eq!(map.get(0, 1).unwrap().kind(), MaterialKind::Water);
  }

  #[test]
  fn liquid_percolates_through_powder() {
    let mut rng = SimRng::new(5);
    let config = SimConfig::default();
    let mut map = GameMap::new(1, 2);
    map.set(0, 0, sand(&mut rng));
    map.set(0, 1, MaterialKind::Water.spawn(&mut rng));

    resolve(&mut map, 0, 1, &mut rng, &config);
    assert_eq!(map.get(0, 0).unwrap().kind(), MaterialKind::Water);
    assert_eq!(map.get(0, 1).unwrap().kind(), MaterialKind::Sand);
  }

  #[test]
  fn liquid_spreads_sideways_on_a_floor() {
    let mut rng = SimRng::new(6);
    let config = SimConfig::default();
    let mut map = GameMap::new(3, 2);
    for x in 0..3 {
      map.set(x, 0, MaterialKind::Wall.spawn(&mut rng));
    }
    map.set(1, 1, MaterialKind::Water.spawn(&mut rng));

    resolve(&mut map, 1, 1, &mut rng, &config);
    let moved = map.get(0, 1).unwrap().kind() == MaterialKind::Water
      || map.get(2, 1).unwrap().kind() == MaterialKind::Water;
    assert!(moved);
    assert_eq!(map.get(1, 1).unwrap().material, Material::Space);
  }

  #[test]
  fn light_gas_rises_through_space_only() {
    let mut rng = SimRng::new(7);
    let config = SimConfig::default();
    let mut map = GameMap::new(1, 3);
    map.set(0, 0, Dot::new(Material::Fire { ttl: 10 }, 1000.0));
    map.set(0, 1, MaterialKind::Water.spawn(&mut rng));

    // Water above blocks it; gas does not displace liquid.
    resolve(&mut map, 0, 0, &mut rng, &config);
    assert_eq!(map.get(0, 0).unwrap().kind(), MaterialKind::Fire);

    map.set(0, 1, Dot::space());
    resolve(&mut map, 0, 0, &mut rng, &config);
    assert_eq!(map.get(0, 1).unwrap().kind(), MaterialKind::Fire);
  }

  #[test]
  fn heavy_gas_disperses_into_space() {
    let mut rng = SimRng::new(8);
    let config = SimConfig::default();
    let mut map = GameMap::new(3, 3);
    let mut ice = MaterialKind::DryIce.spawn(&mut rng);
    ice.temp = 200.0; // heavy gas band
    map.set(1, 1, ice);

    resolve(&mut map, 1, 1, &mut rng, &config);
    let moved = map.get(1, 1).unwrap().material == Material::Space;
    assert!(moved);
  }

  #[test]
  fn diagonal_tie_breaks_are_balanced() {
    let mut rng = SimRng::new(9);
    let config = SimConfig::default();
    let mut lefts = 0u32;
    let mut rights = 0u32;
    for _ in 0..2_000 {
      let mut map = GameMap::new(3, 2);
      map.set(1, 0, Dot::new(Material::Wall, 300.0));
      map.set(1, 1, Dot::new(Material::Sand { glass: false, grain: crate::render::rgb(0xFF, 0xAA, 0) }, 300.0));
      resolve(&mut map, 1, 1, &mut rng, &config);
      if map.get(0, 0).unwrap().kind() == MaterialKind::Sand {
        lefts += 1;
      } else if map.get(2, 0).unwrap().kind() == MaterialKind::Sand {
        rights += 1;
      }
    }
    assert_eq!(lefts + rights, 2_000);
    let bias = (lefts as i64 - rights as i64).abs();
    assert!(bias < 300, "lefts = {lefts}, rights = {rights}");
  }
}
