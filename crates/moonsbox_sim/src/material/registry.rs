//! Palette registry: display identifiers mapped to brush constructors.
//!
//! The UI-facing palette iterates [`PALETTE`] in order; the hot simulation
//! core never touches this module. Brushes produce dots through the same
//! factory contract the map's draw primitives consume, so policy (erase,
//! preserve, tools) composes at the factory layer.

use crate::map::GameMap;
use crate::material::{Dot, MaterialKind, Tags};
use crate::rng::SimRng;

/// One-shot temperature tools; they mutate the cell they are stamped on
/// instead of inserting a new material.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tool {
  Plus100K,
  Minus100K,
}

/// What a palette slot stamps onto the map.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Brush {
  /// A fresh instance of a material kind.
  Material(MaterialKind),
  /// A material kind with a preset starting temperature (Ice, Steam).
  Preset { kind: MaterialKind, temp: f32 },
  /// A temperature tool.
  Tool(Tool),
}

impl Brush {
  /// Produces the dot this brush leaves at (x, y).
  pub fn make(&self, map: &GameMap, x: i32, y: i32, rng: &mut SimRng) -> Dot {
    match self {
      Self::Material(kind) => kind.spawn(rng),
      Self::Preset { kind, temp } => {
        let mut dot = kind.spawn(rng);
        dot.temp = *temp;
        dot
      }
      Self::Tool(Tool::Plus100K) => {
        let mut dot = map.get(x, y).copied().unwrap_or_else(Dot::space);
        dot.temp += 100.0;
        dot
      }
      Self::Tool(Tool::Minus100K) => {
        let mut dot = map.get(x, y).copied().unwrap_or_else(Dot::space);
        dot.temp = (dot.temp - 100.0).max(0.0);
        dot
      }
    }
  }

  /// Adapts the brush to the factory signature of the draw primitives.
  pub fn factory<'a>(
    &'a self,
    rng: &'a mut SimRng,
  ) -> impl FnMut(&GameMap, i32, i32) -> Dot + 'a {
    move |map, x, y| self.make(map, x, y, rng)
  }
}

/// Wraps a factory with non-destructive semantics: occupied cells keep their
/// material unless the brush erases (stamps Space) or produces the same kind
/// (which is how the temperature tools pass through).
pub fn preserving<F>(mut factory: F) -> impl FnMut(&GameMap, i32, i32) -> Dot
where
  F: FnMut(&GameMap, i32, i32) -> Dot,
{
  move |map, x, y| {
    let fresh = factory(map, x, y);
    if fresh.tags().contains(Tags::SPACE) {
      return fresh;
    }
    match map.get(x, y) {
      Some(existing)
        if !existing.tags().contains(Tags::SPACE) && existing.kind() != fresh.kind() =>
      {
        *existing
      }
      _ => fresh,
    }
  }
}

/// A named palette slot.
#[derive(Clone, Copy, Debug)]
pub struct PaletteEntry {
  pub name: &'static str,
  pub brush: Brush,
}

/// All brushes in display order.
pub const PALETTE: &[PaletteEntry] = &[
  PaletteEntry {
    name: "Space",
    brush: Brush::Material(MaterialKind::Space),
  },
  PaletteEntry {
    name: "Sand",
    brush: Brush::Material(MaterialKind::Sand),
  },
  PaletteEntry {
    name: "Water",
    brush: Brush::Material(MaterialKind::Water),
  },
  PaletteEntry {
    name: "Ice",
    brush: Brush::Preset {
      kind: MaterialKind::Water,
      temp: 220.0,
    },
  },
  PaletteEntry {
    name: "Steam",
    brush: Brush::Preset {
      kind: MaterialKind::Water,
      temp: 420.0,
    },
  },
  PaletteEntry {
    name: "Unbreakable Wall",
    brush: Brush::Material(MaterialKind::Wall),
  },
  PaletteEntry {
    name: "Lava",
    brush: Brush::Material(MaterialKind::Lava),
  },
  PaletteEntry {
    name: "+100 K",
    brush: Brush::Tool(Tool::Plus100K),
  },
  PaletteEntry {
    name: "-100 K",
    brush: Brush::Tool(Tool::Minus100K),
  },
  PaletteEntry {
    name: "Black Hole",
    brush: Brush::Material(MaterialKind::BlackHole),
  },
  PaletteEntry {
    name: "Tap",
    brush: Brush::Material(MaterialKind::Tap),
  },
  PaletteEntry {
    name: "Propane",
    brush: Brush::Material(MaterialKind::Propane),
  },
  PaletteEntry {
    name: "Fire",
    brush: Brush::Material(MaterialKind::Fire),
  },
  PaletteEntry {
    name: "Glass",
    brush: Brush::Material(MaterialKind::Glass),
  },
  PaletteEntry {
    name: "Absorbent",
    brush: Brush::Material(MaterialKind::Absorbent),
  },
  PaletteEntry {
    name: "Aerogel",
    brush: Brush::Material(MaterialKind::Aerogel),
  },
  PaletteEntry {
    name: "Dry Ice",
    brush: Brush::Material(MaterialKind::DryIce),
  },
  PaletteEntry {
    name: "Flour",
    brush: Brush::Material(MaterialKind::Flour),
  },
  PaletteEntry {
    name: "Copper",
    brush: Brush::Material(MaterialKind::Copper),
  },
  PaletteEntry {
    name: "Potential Source",
    brush: Brush::Material(MaterialKind::PotentialSource),
  },
  PaletteEntry {
    name: "Light Bulb",
    brush: Brush::Material(MaterialKind::LightBulb),
  },
];

/// Looks up a palette entry by display name.
pub fn find(name: &str) -> Option<&'static PaletteEntry> {
  PALETTE.iter().find(|entry| entry.name == name)
}
