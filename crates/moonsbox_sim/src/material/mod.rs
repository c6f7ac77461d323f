//! Material model: the closed set of dot kinds and their physical properties.
//!
//! Every grid cell holds one [`Dot`]: a temperature plus a [`Material`]
//! variant with its kind-specific payload. Movement and heat rules never
//! branch on concrete kinds; they only look at the [`Tags`] bitset and the
//! [`Mobility`] class, both computed as pure functions of the dot's state.

pub mod behavior;
pub mod registry;

use bitflags::bitflags;

use crate::config::DEFAULT_TEMP;
use crate::render::{Rgba, TRANSPARENT, blend, rgb, rgba};
use crate::rng::SimRng;

bitflags! {
  /// Physical classification of a dot's current phase.
  #[derive(Clone, Copy, Debug, PartialEq, Eq)]
  pub struct Tags: u8 {
    const SOLID = 1 << 0;
    const BULK = 1 << 1;
    const LIQUID = 1 << 2;
    const GAS = 1 << 3;
    const SPACE = 1 << 4;
    const FLOAT = 1 << 5;
    const WET = 1 << 6;
    const ELECTRIC = 1 << 7;
  }
}

impl Tags {
  /// Gas or vacuum: what light things rise through.
  pub const SPARSENESS: Self = Self::GAS.union(Self::SPACE);
  /// Anything a falling grain may displace.
  pub const FLOWABLE: Self = Self::SPARSENESS.union(Self::LIQUID);
  /// Anything subject to movement or consumption.
  pub const MOVABLE: Self = Self::BULK
    .union(Self::LIQUID)
    .union(Self::GAS)
    .union(Self::FLOAT);
}

/// Movement rule bucket used by the movement resolver.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mobility {
  None,
  Sand,
  Liquid,
  LightGas,
  HeavyGas,
}

/// Stored phase for propane, which keeps hysteresis between thresholds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PropanePhase {
  Solid,
  Liquid,
  Gas,
}

/// One-way flour state machine: powder, then dough, then crust.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlourState {
  Dry,
  Dough,
  Baked,
}

/// Ticks of fire lifetime at spawn (inclusive upper bound).
pub(crate) const FIRE_TTL_MAX: u8 = 20;

/// Ticks a copper cell stays energized after losing its feed.
pub(crate) const COPPER_CHARGE_TTL: u8 = 2;

/// A material instance with its kind-specific payload.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Material {
  Space,
  Sand { glass: bool, grain: Rgba },
  Water { tint: Rgba },
  Wall,
  Lava,
  Glass,
  Fire { ttl: u8 },
  Propane { phase: PropanePhase },
  BlackHole,
  Tap { learned: Option<MaterialKind> },
  Absorbent { ttl: i16, shade: Rgba },
  Aerogel { shade: Rgba },
  DryIce { shade: Rgba },
  Flour { state: FlourState },
  Copper { charge: u8 },
  PotentialSource,
  LightBulb { lit: bool },
}

/// Payload-free material discriminant, used by the palette registry, the
/// tap's learned-kind memory and the save format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MaterialKind {
  Space,
  Sand,
  Water,
  Wall,
  Lava,
  Glass,
  Fire,
  Propane,
  BlackHole,
  Tap,
  Absorbent,
  Aerogel,
  DryIce,
  Flour,
  Copper,
  PotentialSource,
  LightBulb,
}

impl MaterialKind {
  /// Stable numeric id for the save format.
  pub const fn id(self) -> u8 {
    match self {
      Self::Space => 0,
      Self::Sand => 1,
      Self::Water => 2,
      Self::Wall => 3,
      Self::Lava => 4,
      Self::Glass => 5,
      Self::Fire => 6,
      Self::Propane => 7,
      Self::BlackHole => 8,
      Self::Tap => 9,
      Self::Absorbent => 10,
      Self::Aerogel => 11,
      Self::DryIce => 12,
      Self::Flour => 13,
      Self::Copper => 14,
      Self::PotentialSource => 15,
      Self::LightBulb => 16,
    }
  }

  /// Inverse of [`MaterialKind::id`].
  pub const fn from_id(id: u8) -> Option<Self> {
    Some(match id {
      0 => Self::Space,
      1 => Self::Sand,
      2 => Self::Water,
      3 => Self::Wall,
      4 => Self::Lava,
      5 => Self::Glass,
      6 => Self::Fire,
      7 => Self::Propane,
      8 => Self::BlackHole,
      9 => Self::Tap,
      10 => Self::Absorbent,
      11 => Self::Aerogel,
      12 => Self::DryIce,
      13 => Self::Flour,
      14 => Self::Copper,
      15 => Self::PotentialSource,
      16 => Self::LightBulb,
      _ => return None,
    })
  }

  /// Temperature a fresh instance starts at.
  pub const fn initial_temp(self) -> f32 {
    match self {
      Self::Lava => 1200.0, // 927 C
      Self::Fire => 1000.0, // about the temperature of burning wood
      Self::DryIce => 175.0,
      _ => DEFAULT_TEMP,
    }
  }

  /// Constructs a fresh dot of this kind with randomized cosmetic state.
  pub fn spawn(self, rng: &mut SimRng) -> Dot {
    let material = match self {
      Self::Space => Material::Space,
      Self::Sand => Material::Sand {
        glass: false,
        grain: rgb(0xFF, rng.range_inclusive(0x99, 0xFF) as u8, 0),
      },
      Self::Water => Material::Water {
        tint: rgb(0, rng.range_inclusive(0x95, 0xBB) as u8, 0x99),
      },
      Self::Wall => Material::Wall,
      Self::Lava => Material::Lava,
      Self::Glass => Material::Glass,
      Self::Fire => Material::Fire {
        ttl: rng.range_inclusive(0, FIRE_TTL_MAX as i32) as u8,
      },
      Self::Propane => Material::Propane {
        phase: PropanePhase::Gas,
      },
      Self::BlackHole => Material::BlackHole,
      Self::Tap => Material::Tap { learned: None },
      Self::Absorbent => {
        let grayscale = rng.range_inclusive(0xDD, 0xFF) as u8;
        let yellowness = rng.range_inclusive(0x11, 0x33) as u8;
        Material::Absorbent {
          ttl: rng.range_inclusive(0, 200) as i16,
          shade: rgb(grayscale, grayscale, grayscale - yellowness),
        }
      }
      Self::Aerogel => {
        let grayscale = rng.range_inclusive(0xAA, 0xBB) as u8;
        Material::Aerogel {
          shade: rgba(grayscale, grayscale, grayscale, 0x25),
        }
      }
      Self::DryIce => Material::DryIce {
        shade: blend(rgb(0xDB, 0xE2, 0xEE), rgb(0xC2, 0xD9, 0xDF), rng.random()),
      },
      Self::Flour => Material::Flour {
        state: FlourState::Dry,
      },
      Self::Copper => Material::Copper { charge: 0 },
      Self::PotentialSource => Material::PotentialSource,
      Self::LightBulb => Material::LightBulb { lit: false },
    };
    Dot {
      temp: self.initial_temp(),
      material,
    }
  }
}

/// One grid cell: temperature plus material state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dot {
  pub temp: f32,
  pub material: Material,
}

impl Dot {
  /// The vacuum/background dot every empty cell holds.
  pub const fn space() -> Self {
    Self {
      temp: DEFAULT_TEMP,
      material: Material::Space,
    }
  }

  pub const fn new(material: Material, temp: f32) -> Self {
    Self { temp, material }
  }

  pub fn kind(&self) -> MaterialKind {
    self.material.kind()
  }

  pub fn color(&self) -> Rgba {
    self.material.color(self.temp)
  }

  pub fn heat_capacity(&self) -> f32 {
    self.material.heat_capacity()
  }

  pub fn thermal_conductivity(&self) -> f32 {
    self.material.thermal_conductivity()
  }

  pub fn tags(&self) -> Tags {
    self.material.tags(self.temp)
  }

  pub fn mobility(&self) -> Mobility {
    self.material.mobility(self.temp)
  }
}

impl Material {
  pub fn kind(&self) -> MaterialKind {
    match self {
      Self::Space => MaterialKind::Space,
      Self::Sand { .. } => MaterialKind::Sand,
      Self::Water { .. } => MaterialKind::Water,
      Self::Wall => MaterialKind::Wall,
      Self::Lava => MaterialKind::Lava,
      Self::Glass => MaterialKind::Glass,
      Self::Fire { .. } => MaterialKind::Fire,
      Self::Propane { .. } => MaterialKind::Propane,
      Self::BlackHole => MaterialKind::BlackHole,
      Self::Tap { .. } => MaterialKind::Tap,
      Self::Absorbent { .. } => MaterialKind::Absorbent,
      Self::Aerogel { .. } => MaterialKind::Aerogel,
      Self::DryIce { .. } => MaterialKind::DryIce,
      Self::Flour { .. } => MaterialKind::Flour,
      Self::Copper { .. } => MaterialKind::Copper,
      Self::PotentialSource => MaterialKind::PotentialSource,
      Self::LightBulb { .. } => MaterialKind::LightBulb,
    }
  }

  /// Fraction of heat this material retains per exchange.
  pub fn heat_capacity(&self) -> f32 {
    match self {
      Self::Space => 0.3,
      Self::Sand { glass: false, .. } => 0.3,
      Self::Sand { glass: true, .. } => 0.5, // glassified grains hold heat like glass
      Self::Water { .. } => 0.7,
      Self::Wall => 0.6,
      Self::Lava => 0.8,
      Self::Glass => 0.5,
      Self::Fire { .. } => 1.0, // retains everything, fire never cools itself
      Self::Propane { .. } => 0.3,
      Self::BlackHole => 0.0,
      Self::Tap { .. } => 0.2,
      Self::Absorbent { .. } => 0.2,
      Self::Aerogel { .. } => 0.99,
      Self::DryIce { .. } => 0.95,
      Self::Flour { .. } => 0.4,
      Self::Copper { .. } => 0.2,
      Self::PotentialSource => 0.5,
      Self::LightBulb { .. } => 0.4,
    }
  }

  /// Fraction of a neighbor temperature delta this material can conduct.
  pub fn thermal_conductivity(&self) -> f32 {
    match self {
      Self::Space => 1.0,
      Self::Sand { glass: false, .. } => 0.1,
      Self::Sand { glass: true, .. } => 0.05,
      Self::Water { .. } => 0.3,
      Self::Wall => 0.4,
      Self::Lava => 0.5,
      Self::Glass => 0.05,
      Self::Fire { .. } => 1.0,
      Self::Propane { .. } => 0.5,
      Self::BlackHole => 0.0,
      Self::Tap { .. } => 0.6,
      Self::Absorbent { .. } => 0.9,
      Self::Aerogel { .. } => 0.01,
      Self::DryIce { .. } => 1.0,
      Self::Flour { .. } => 0.15,
      Self::Copper { .. } => 0.95,
      Self::PotentialSource => 0.4,
      Self::LightBulb { .. } => 0.3,
    }
  }

  /// Phase tags at the given temperature.
  pub fn tags(&self, temp: f32) -> Tags {
    match self {
      Self::Space => Tags::SPACE,
      Self::Sand { glass: false, .. } => Tags::BULK,
      Self::Sand { glass: true, .. } => {
        if temp > 1973.0 {
          Tags::LIQUID
        } else {
          Tags::SOLID
        }
      }
      Self::Water { .. } => {
        if temp < 273.0 {
          Tags::SOLID
        } else if temp < 373.0 {
          Tags::LIQUID
        } else {
          Tags::GAS
        }
      }
      Self::Wall => Tags::SOLID,
      Self::Lava => {
        if temp > 400.0 {
          Tags::LIQUID
        } else {
          Tags::SOLID
        }
      }
      Self::Glass => {
        if temp > 1773.0 {
          Tags::LIQUID
        } else {
          Tags::SOLID
        }
      }
      Self::Fire { .. } => Tags::GAS,
      Self::Propane { phase } => match phase {
        PropanePhase::Solid => Tags::SOLID,
        PropanePhase::Liquid => Tags::LIQUID,
        PropanePhase::Gas => Tags::GAS,
      },
      Self::BlackHole => Tags::SOLID,
      Self::Tap { .. } => Tags::SOLID,
      Self::Absorbent { .. } => Tags::FLOAT,
      Self::Aerogel { .. } => Tags::FLOAT,
      Self::DryIce { .. } => {
        if temp > 195.0 {
          Tags::GAS
        } else {
          Tags::BULK
        }
      }
      Self::Flour { state } => match state {
        FlourState::Dry => Tags::BULK,
        FlourState::Dough => Tags::SOLID.union(Tags::WET),
        FlourState::Baked => Tags::SOLID,
      },
      Self::Copper { .. } => Tags::SOLID.union(Tags::ELECTRIC),
      Self::PotentialSource => Tags::SOLID.union(Tags::ELECTRIC),
      Self::LightBulb { .. } => Tags::SOLID.union(Tags::ELECTRIC),
    }
  }

  /// Movement class at the given temperature.
  pub fn mobility(&self, temp: f32) -> Mobility {
    match self {
      Self::Sand { glass: false, .. } => Mobility::Sand,
      Self::Sand { glass: true, .. } => {
        if temp > 1973.0 {
          Mobility::Liquid
        } else {
          Mobility::None
        }
      }
      Self::Water { .. } => {
        if temp < 273.0 {
          Mobility::None
        } else if temp < 373.0 {
          Mobility::Liquid
        } else {
          Mobility::LightGas
        }
      }
      Self::Lava => {
        if temp > 400.0 {
          Mobility::Liquid
        } else {
          Mobility::None
        }
      }
      Self::Glass => {
        if temp > 1773.0 {
          Mobility::Liquid
        } else {
          Mobility::None
        }
      }
      Self::Fire { .. } => Mobility::LightGas,
      Self::Propane { phase } => match phase {
        PropanePhase::Solid => Mobility::None,
        PropanePhase::Liquid => Mobility::Liquid,
        PropanePhase::Gas => Mobility::LightGas,
      },
      Self::Absorbent { .. } => Mobility::Sand,
      Self::DryIce { .. } => {
        if temp > 195.0 {
          Mobility::HeavyGas
        } else {
          Mobility::Sand
        }
      }
      Self::Flour {
        state: FlourState::Dry,
      } => Mobility::Sand,
      _ => Mobility::None,
    }
  }

  /// Display color at the given temperature.
  pub fn color(&self, temp: f32) -> Rgba {
    match self {
      Self::Space => TRANSPARENT,
      Self::Sand { glass, grain } => {
        let t = (temp - 400.0) / (1973.0 - 400.0);
        if *glass {
          blend(rgba(0x96, 0x94, 0x77, 0x55), rgba(0xFF, 0x88, 0x00, 0x85), t)
        } else {
          blend(*grain, rgba(0xFF, 0x66, 0x00, 0xAA), t)
        }
      }
      Self::Water { tint } => {
        if temp < 273.0 {
          rgba(0x66, 0xC8, 0xE0, 0xB7)
        } else if temp < 373.0 {
          *tint
        } else {
          rgba(0x28, 0xBB, 0xC5, 0x3D)
        }
      }
      Self::Wall => rgb(0xFF, 0xFF, 0xFF),
      Self::Lava => {
        let factor = (temp - 400.0) / (1200.0 - 400.0);
        if factor > 0.5 {
          blend(rgb(0xFF, 0x00, 0x00), rgb(0xFF, 0xFF, 0x00), (factor - 0.5) * 2.0)
        } else {
          blend(rgb(0x44, 0x00, 0x00), rgb(0xFF, 0x00, 0x00), factor * 2.0)
        }
      }
      Self::Glass => {
        let t = (temp - 400.0) / (1773.0 - 400.0);
        blend(rgba(0x53, 0xD4, 0x98, 0x20), rgba(0xFF, 0x88, 0x00, 0x85), t)
      }
      Self::Fire { ttl } => {
        let factor = *ttl as f32 / FIRE_TTL_MAX as f32;
        blend(rgba(0xFF, 0x00, 0x00, 0x44), rgb(0xFF, 0xFF, 0x00), factor)
      }
      Self::Propane { phase } => match phase {
        PropanePhase::Solid => rgba(0x6D, 0x8E, 0xC9, 0xB8),
        PropanePhase::Liquid => rgba(0x53, 0x76, 0xB8, 0x85),
        PropanePhase::Gas => rgba(0x38, 0x5D, 0xA3, 0x45),
      },
      Self::BlackHole => rgb(0x1F, 0x1F, 0x1F),
      Self::Tap { .. } => rgb(0x67, 0xA0, 0x46),
      Self::Absorbent { shade, .. } => *shade,
      Self::Aerogel { shade } => *shade,
      Self::DryIce { shade } => {
        let factor = 1.0 - (temp - 175.0) / (250.0 - 175.0);
        let alpha = (factor * 255.0).clamp(0.0, 255.0) as u8;
        rgba(shade.red, shade.green, shade.blue, alpha)
      }
      Self::Flour { state } => match state {
        FlourState::Dry => rgb(0xF5, 0xEE, 0xDC),
        FlourState::Dough => rgb(0xD9, 0xC8, 0xA9),
        FlourState::Baked => rgb(0xA8, 0x76, 0x3C),
      },
      Self::Copper { charge } => {
        if *charge > 0 {
          blend(rgb(0xB8, 0x73, 0x33), rgb(0xFF, 0xD2, 0x7F), 0.6)
        } else {
          rgb(0xB8, 0x73, 0x33)
        }
      }
      Self::PotentialSource => rgb(0xDD, 0xCC, 0x22),
      Self::LightBulb { lit } => {
        if *lit {
          rgb(0xFF, 0xF2, 0xA0)
        } else {
          rgb(0x8A, 0x8A, 0x92)
        }
      }
    }
  }

  /// Whether this dot currently drives current into ELECTRIC neighbors.
  pub(crate) fn energized(&self) -> bool {
    match self {
      Self::PotentialSource => true,
      Self::Copper { charge } => *charge > 0,
      _ => false,
    }
  }

  /// Packs the kind-specific payload into a fixed save record field.
  pub(crate) fn encode_payload(&self) -> [u8; 8] {
    let mut p = [0u8; 8];
    match self {
      Self::Sand { glass, grain } => {
        p[0] = *glass as u8;
        p[1] = grain.red;
        p[2] = grain.green;
        p[3] = grain.blue;
        p[4] = grain.alpha;
      }
      Self::Water { tint } => {
        p[0] = tint.red;
        p[1] = tint.green;
        p[2] = tint.blue;
        p[3] = tint.alpha;
      }
      Self::Fire { ttl } => p[0] = *ttl,
      Self::Propane { phase } => {
        p[0] = match phase {
          PropanePhase::Solid => 0,
          PropanePhase::Liquid => 1,
          PropanePhase::Gas => 2,
        }
      }
      Self::Tap { learned } => {
        if let Some(kind) = learned {
          p[0] = 1;
          p[1] = kind.id();
        }
      }
      Self::Absorbent { ttl, shade } => {
        p[..2].copy_from_slice(&ttl.to_le_bytes());
        p[2] = shade.red;
        p[3] = shade.green;
        p[4] = shade.blue;
        p[5] = shade.alpha;
      }
      Self::Aerogel { shade } | Self::DryIce { shade } => {
        p[0] = shade.red;
        p[1] = shade.green;
        p[2] = shade.blue;
        p[3] = shade.alpha;
      }
      Self::Flour { state } => {
        p[0] = match state {
          FlourState::Dry => 0,
          FlourState::Dough => 1,
          FlourState::Baked => 2,
        }
      }
      Self::Copper { charge } => p[0] = *charge,
      Self::LightBulb { lit } => p[0] = *lit as u8,
      Self::Space | Self::Wall | Self::Lava | Self::Glass | Self::BlackHole | Self::PotentialSource => {}
    }
    p
  }

  /// Rebuilds a material from a save record. Unknown payload bytes degrade
  /// to the nearest valid state rather than failing the whole load.
  pub(crate) fn decode(kind: MaterialKind, p: [u8; 8]) -> Self {
    match kind {
      MaterialKind::Space => Self::Space,
      MaterialKind::Sand => Self::Sand {
        glass: p[0] != 0,
        grain: rgba(p[1], p[2], p[3], p[4]),
      },
      MaterialKind::Water => Self::Water {
        tint: rgba(p[0], p[1], p[2], p[3]),
      },
      MaterialKind::Wall => Self::Wall,
      MaterialKind::Lava => Self::Lava,
      MaterialKind::Glass => Self::Glass,
      MaterialKind::Fire => Self::Fire {
        ttl: p[0].min(FIRE_TTL_MAX),
      },
      MaterialKind::Propane => Self::Propane {
        phase: match p[0] {
          0 => PropanePhase::Solid,
          1 => PropanePhase::Liquid,
          _ => PropanePhase::Gas,
        },
      },
      MaterialKind::BlackHole => Self::BlackHole,
      MaterialKind::Tap => Self::Tap {
        learned: if p[0] != 0 {
          MaterialKind::from_id(p[1])
        } else {
          None
        },
      },
      MaterialKind::Absorbent => Self::Absorbent {
        ttl: i16::from_le_bytes([p[0], p[1]]),
        shade: rgba(p[2], p[3], p[4], p[5]),
      },
      MaterialKind::Aerogel => Self::Aerogel {
        shade: rgba(p[0], p[1], p[2], p[3]),
      },
      MaterialKind::DryIce => Self::DryIce {
        shade: rgba(p[0], p[1], p[2], p[3]),
      },
      MaterialKind::Flour => Self::Flour {
        state: match p[0] {
          1 => FlourState::Dough,
          2 => FlourState::Baked,
          _ => FlourState::Dry,
        },
      },
      MaterialKind::Copper => Self::Copper { charge: p[0] },
      MaterialKind::PotentialSource => Self::PotentialSource,
      MaterialKind::LightBulb => Self::LightBulb { lit: p[0] != 0 },
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn derived_tag_sets() {
    assert_eq!(Tags::SPARSENESS, Tags::GAS | Tags::SPACE);
    assert_eq!(Tags::FLOWABLE, Tags::GAS | Tags::SPACE | Tags::LIQUID);
    assert!(Tags::MOVABLE.contains(Tags::FLOAT));
    assert!(!Tags::MOVABLE.contains(Tags::SOLID));
  }

  #[test]
  fn water_phase_thresholds_are_exact() {
    let water = Material::Water {
      tint: rgb(0, 0x99, 0x99),
    };
    assert_eq!(water.tags(272.0), Tags::SOLID);
    assert_eq!(water.tags(274.0), Tags::LIQUID);
    assert_eq!(water.tags(372.0), Tags::LIQUID);
    assert_eq!(water.tags(373.0), Tags::GAS);
    assert_eq!(water.mobility(272.0), Mobility::None);
    assert_eq!(water.mobility(300.0), Mobility::Liquid);
    assert_eq!(water.mobility(400.0), Mobility::LightGas);
  }

  #[test]
  fn sand_is_granular_until_glassified() {
    let grain = rgb(0xFF, 0xAA, 0);
    let sand = Material::Sand {
      glass: false,
      grain,
    };
    assert_eq!(sand.tags(2200.0), Tags::BULK);

    let glass = Material::Sand { glass: true, grain };
    assert_eq!(glass.tags(2200.0), Tags::LIQUID);
    assert_eq!(glass.tags(300.0), Tags::SOLID);
    assert_eq!(glass.mobility(300.0), Mobility::None);
  }

  #[test]
  fn lava_solidifies_below_400() {
    assert_eq!(Material::Lava.tags(1200.0), Tags::LIQUID);
    assert_eq!(Material::Lava.tags(399.0), Tags::SOLID);
  }

  #[test]
  fn dry_ice_walks_its_phases() {
    let ice = Material::DryIce {
      shade: rgb(0xDB, 0xE2, 0xEE),
    };
    assert_eq!(ice.mobility(180.0), Mobility::Sand);
    assert_eq!(ice.mobility(200.0), Mobility::HeavyGas);
    assert_eq!(ice.tags(200.0), Tags::GAS);
  }

  #[test]
  fn fire_color_fades_with_lifetime() {
    let fresh = Material::Fire { ttl: FIRE_TTL_MAX };
    let dying = Material::Fire { ttl: 0 };
    assert_eq!(fresh.color(1000.0), rgb(0xFF, 0xFF, 0x00));
    assert_eq!(dying.color(1000.0), rgba(0xFF, 0x00, 0x00, 0x44));
  }

  #[test]
  fn lava_color_is_two_stage() {
    // Below the midpoint of 400..1200 the gradient tops out at pure red.
    assert_eq!(Material::Lava.color(800.0), rgb(0xFF, 0x00, 0x00));
    assert_eq!(Material::Lava.color(1200.0), rgb(0xFF, 0xFF, 0x00));
    assert_eq!(Material::Lava.color(400.0), rgb(0x44, 0x00, 0x00));
  }

  #[test]
  fn kind_ids_round_trip() {
    let kinds = [
      MaterialKind::Space,
      MaterialKind::Sand,
      MaterialKind::Water,
      MaterialKind::Wall,
      MaterialKind::Lava,
      MaterialKind::Glass,
      MaterialKind::Fire,
      MaterialKind::Propane,
      MaterialKind::BlackHole,
      MaterialKind::Tap,
      MaterialKind::Absorbent,
      MaterialKind::Aerogel,
      MaterialKind::DryIce,
      MaterialKind::Flour,
      MaterialKind::Copper,
      MaterialKind::PotentialSource,
      MaterialKind::LightBulb,
    ];
    for kind in kinds {
      assert_eq!(MaterialKind::from_id(kind.id()), Some(kind));
    }
    assert_eq!(MaterialKind::from_id(200), None);
  }

  #[test]
  fn payloads_round_trip() {
    let mut rng = SimRng::new(11);
    for kind in [
      MaterialKind::Sand,
      MaterialKind::Water,
      MaterialKind::Fire,
      MaterialKind::Propane,
      MaterialKind::Tap,
      MaterialKind::Absorbent,
      MaterialKind::Aerogel,
      MaterialKind::DryIce,
      MaterialKind::Flour,
      MaterialKind::Copper,
      MaterialKind::LightBulb,
    ] {
      let dot = kind.spawn(&mut rng);
      let decoded = Material::decode(kind, dot.material.encode_payload());
      assert_eq!(decoded, dot.material, "{kind:?}");
    }

    let learned = Material::Tap {
      learned: Some(MaterialKind::Water),
    };
    assert_eq!(Material::decode(MaterialKind::Tap, learned.encode_payload()), learned);
  }
}
