//! Per-kind update rules: phase latches, decay, spawning, neighborhood
//! effects.
//!
//! Behaviors read and write cells only through the map's indexed accessors;
//! a rule never holds a neighbor reference past a single call. Mutation is
//! immediate and in place, which the tick scheduler's pass ordering is
//! built around.

use crate::config::SimConfig;
use crate::map::GameMap;
use crate::material::{
  COPPER_CHARGE_TTL, Dot, FlourState, Material, MaterialKind, PropanePhase, Tags,
};
use crate::render::Rgba;
use crate::rng::SimRng;

/// Cardinal neighbor offsets.
pub(crate) const VON_NEUMANN: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Cardinal plus diagonal neighbor offsets.
pub(crate) const MOORE: [(i32, i32); 8] = [
  (1, 0),
  (-1, 0),
  (0, 1),
  (0, -1),
  (1, 1),
  (-1, -1),
  (1, -1),
  (-1, 1),
];

/// Runs one behavior step for the dot at (x, y).
pub fn update(map: &mut GameMap, x: i32, y: i32, rng: &mut SimRng, config: &SimConfig) {
  let Some(dot) = map.get(x, y).copied() else {
    return;
  };

  match dot.material {
    Material::Sand { glass, grain } => {
      if !glass && dot.temp >= 1973.0 {
        // 1700 C, one-way
        map.set(
          x,
          y,
          Dot::new(Material::Sand { glass: true, grain }, dot.temp),
        );
      }
    }
    Material::Water { .. } => update_water(map, x, y, dot, config),
    Material::Fire { ttl } => update_fire(map, x, y, dot, ttl),
    Material::Propane { phase } => update_propane(map, x, y, dot, phase, rng),
    Material::BlackHole => update_black_hole(map, x, y),
    Material::Tap { learned } => update_tap(map, x, y, dot, learned, rng),
    Material::Absorbent { ttl, shade } => update_absorbent(map, x, y, dot, ttl, shade),
    Material::DryIce { .. } => {
      if dot.temp > 250.0 {
        map.set(x, y, Dot::space());
      }
    }
    Material::Flour { state } => update_flour(map, x, y, dot, state),
    Material::Copper { charge } => update_copper(map, x, y, dot, charge),
    Material::LightBulb { .. } => update_light_bulb(map, x, y, dot),
    Material::Space
    | Material::Wall
    | Material::Lava
    | Material::Glass
    | Material::Aerogel { .. }
    | Material::PotentialSource => {}
  }
}

fn update_water(map: &mut GameMap, x: i32, y: i32, mut dot: Dot, config: &SimConfig) {
  // Vapor stuck under the ceiling sheds heat so it eventually rains back.
  if dot.temp >= 373.0 && y == map.height() as i32 - 1 {
    dot.temp = (dot.temp - config.steam_top_cooling).max(0.0);
    map.set(x, y, dot);
  }
}

fn update_fire(map: &mut GameMap, x: i32, y: i32, mut dot: Dot, ttl: u8) {
  if ttl == 0 {
    map.set(x, y, Dot::space());
    return;
  }
  dot.material = Material::Fire { ttl: ttl - 1 };
  map.set(x, y, dot);
}

fn update_propane(
  map: &mut GameMap,
  x: i32,
  y: i32,
  mut dot: Dot,
  phase: PropanePhase,
  rng: &mut SimRng,
) {
  if dot.temp > 700.0 {
    // ~500 C: the whole connected gas pocket flashes over.
    ignite(map, x, y, rng);
    for (dx, dy) in MOORE {
      let (nx, ny) = (x + dx, y + dy);
      if map.get(nx, ny).is_some_and(|d| d.tags().contains(Tags::GAS)) {
        ignite(map, nx, ny, rng);
      }
    }
    return;
  }

  let next = match phase {
    PropanePhase::Solid if dot.temp > 85.0 => Some(PropanePhase::Liquid),
    PropanePhase::Liquid if dot.temp < 80.0 => Some(PropanePhase::Solid),
    PropanePhase::Liquid if dot.temp > 235.0 => Some(PropanePhase::Gas),
    PropanePhase::Gas if dot.temp < 230.0 => Some(PropanePhase::Liquid),
    _ => None,
  };
  if let Some(phase) = next {
    dot.material = Material::Propane { phase };
    map.set(x, y, dot);
  }
}

fn ignite(map: &mut GameMap, x: i32, y: i32, rng: &mut SimRng) {
  let mut fire = MaterialKind::Fire.spawn(rng);
  fire.temp = 2800.0;
  map.set(x, y, fire);
}

fn update_black_hole(map: &mut GameMap, x: i32, y: i32) {
  for (dx, dy) in VON_NEUMANN {
    let (nx, ny) = (x + dx, y + dy);
    if map
      .get(nx, ny)
      .is_some_and(|d| d.tags().intersects(Tags::MOVABLE))
    {
      map.set(nx, ny, Dot::space());
    }
  }
}

fn update_tap(
  map: &mut GameMap,
  x: i32,
  y: i32,
  mut dot: Dot,
  learned: Option<MaterialKind>,
  rng: &mut SimRng,
) {
  let Some(kind) = learned else {
    for (dx, dy) in VON_NEUMANN {
      let (nx, ny) = (x + dx, y + dy);
      if let Some(neighbor) = map.get(nx, ny) {
        if neighbor.tags().intersects(Tags::MOVABLE) {
          dot.material = Material::Tap {
            learned: Some(neighbor.kind()),
          };
          map.set(x, y, dot);
          break;
        }
      }
    }
    return;
  };

  if rng.range_inclusive(1, 6) == 6 {
    for (dx, dy) in VON_NEUMANN {
      let (nx, ny) = (x + dx, y + dy);
      if map
        .get(nx, ny)
        .is_some_and(|d| d.tags().contains(Tags::SPACE))
      {
        let spawned = kind.spawn(rng);
        map.set(nx, ny, spawned);
      }
    }
  } else if rng.range_inclusive(1, 30) == 16 {
    // Slowly infect neighboring taps with this tap's output kind.
    for (dx, dy) in MOORE {
      let (nx, ny) = (x + dx, y + dy);
      if let Some(neighbor) = map.get(nx, ny).copied() {
        if let Material::Tap { .. } = neighbor.material {
          map.set(
            nx,
            ny,
            Dot::new(
              Material::Tap {
                learned: Some(kind),
              },
              neighbor.temp,
            ),
          );
        }
      }
    }
  }
}

fn update_absorbent(map: &mut GameMap, x: i32, y: i32, mut dot: Dot, mut ttl: i16, shade: Rgba) {
  for (dx, dy) in MOORE {
    let (nx, ny) = (x + dx, y + dy);
    if map
      .get(nx, ny)
      .is_some_and(|d| d.tags().contains(Tags::LIQUID))
    {
      map.set(nx, ny, Dot::space());
      ttl -= 50;
    }
  }

  if ttl < 0 {
    map.set(x, y, Dot::space());
  } else {
    dot.material = Material::Absorbent { ttl: ttl - 1, shade };
    map.set(x, y, dot);
  }
}

fn update_flour(map: &mut GameMap, x: i32, y: i32, mut dot: Dot, state: FlourState) {
  let next = match state {
    FlourState::Dry => VON_NEUMANN
      .iter()
      .any(|&(dx, dy)| {
        map
          .get(x + dx, y + dy)
          .is_some_and(|d| d.tags().contains(Tags::LIQUID))
      })
      .then_some(FlourState::Dough),
    FlourState::Dough => (dot.temp > 455.0).then_some(FlourState::Baked),
    FlourState::Baked => None,
  };
  if let Some(state) = next {
    dot.material = Material::Flour { state };
    map.set(x, y, dot);
  }
}

fn update_copper(map: &mut GameMap, x: i32, y: i32, mut dot: Dot, charge: u8) {
  let fed = VON_NEUMANN.iter().any(|&(dx, dy)| {
    map
      .get(x + dx, y + dy)
      .is_some_and(|d| d.material.energized())
  });
  let next = if fed {
    COPPER_CHARGE_TTL
  } else {
    charge.saturating_sub(1)
  };
  if next != charge {
    dot.material = Material::Copper { charge: next };
    map.set(x, y, dot);
  }
}

fn update_light_bulb(map: &mut GameMap, x: i32, y: i32, mut dot: Dot) {
  let lit = VON_NEUMANN.iter().any(|&(dx, dy)| {
    map
      .get(x + dx, y + dy)
      .is_some_and(|d| d.material.energized())
  });
  dot.material = Material::LightBulb { lit };
  if lit {
    // A working filament stays warm to the touch.
    dot.temp = dot.temp.max(320.0);
  }
  map.set(x, y, dot);
}
