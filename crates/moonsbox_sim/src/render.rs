//! Color types and render masks.
//!
//! The engine never rasterizes anything; it only hands out per-dot colors.
//! A [`RenderMask`] is the pluggable mapping a display collaborator uses to
//! turn a dot into a pixel (normal colors, temperature view, ...).

use crate::material::Dot;

/// RGBA pixel with 8 bits per channel, using sRGB color space.
///
/// Re-exported from the `palette` crate for color handling.
pub type Rgba = palette::Srgba<u8>;

/// Creates an opaque RGB color (alpha = 255).
#[inline]
pub const fn rgb(r: u8, g: u8, b: u8) -> Rgba {
  Rgba::new(r, g, b, 255)
}

/// Creates an RGBA color.
#[inline]
pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Rgba {
  Rgba::new(r, g, b, a)
}

/// Transparent black.
pub const TRANSPARENT: Rgba = rgba(0, 0, 0, 0);

/// Linearly interpolates between two colors, all four channels included.
///
/// `t` is clamped to `[0, 1]`; 0 yields `bg`, 1 yields `fg`.
pub fn blend(bg: Rgba, fg: Rgba, t: f32) -> Rgba {
  let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
  let lerp = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
  Rgba::new(
    lerp(bg.red, fg.red),
    lerp(bg.green, fg.green),
    lerp(bg.blue, fg.blue),
    lerp(bg.alpha, fg.alpha),
  )
}

/// Maps a dot to the color a display collaborator should draw.
pub type RenderMask = fn(&Dot) -> Rgba;

/// Default mask: the material's own color.
pub fn color_mask(dot: &Dot) -> Rgba {
  dot.color()
}

/// Thermal view: cold blue through black at ambient to hot orange.
pub fn temperature_mask(dot: &Dot) -> Rgba {
  const COLD: Rgba = rgb(0x22, 0x44, 0xFF);
  const AMBIENT: Rgba = rgb(0x00, 0x00, 0x00);
  const HOT: Rgba = rgb(0xFF, 0x33, 0x00);

  let temp = dot.temp;
  if temp <= 300.0 {
    blend(COLD, AMBIENT, temp / 300.0)
  } else {
    blend(AMBIENT, HOT, (temp - 300.0) / 900.0)
  }
}
