//! moonsbox simulation core - a falling-sand cellular automaton engine.
//!
//! This crate provides the physical model of a powder-toy style sandbox:
//! a bounds-safe grid of material dots, a three-pass tick scheduler (heat
//! exchange, behavior updates, movement resolution) and a versioned save
//! container. Display, input, audio and UI are external collaborators; they
//! talk to the engine through [`GameMap`]'s accessors, the palette registry
//! and [`Simulation::tick`].

pub mod config;
pub mod map;
pub mod material;
pub mod persistence;
pub mod render;
pub mod rng;
pub mod simulation;

pub use config::{ConfigError, DEFAULT_TEMP, SimConfig};
pub use map::{CapStyle, GameMap, MapRect};
pub use material::registry::{Brush, PALETTE, PaletteEntry, Tool, find as find_brush, preserving};
pub use material::{Dot, Material, MaterialKind, Mobility, Tags};
pub use persistence::{LoadError, SaveError, dump, dump_to, load};
pub use render::{RenderMask, Rgba, blend, color_mask, rgb, rgba, temperature_mask};
pub use rng::SimRng;
pub use simulation::Simulation;
