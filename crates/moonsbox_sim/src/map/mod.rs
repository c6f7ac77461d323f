//! The game map: a bounds-safe 2D arena of dots.
//!
//! Storage is row-major with y = 0 at the *bottom*; display coordinates put
//! y = 0 at the top. [`GameMap::invy`] is the single authoritative inversion
//! between the two; nothing else in the engine re-derives it.
//!
//! Out-of-bounds reads are `None` and out-of-bounds writes are silent no-ops.
//! Behavior code scans neighborhoods without per-call bounds branching, and
//! edge-adjacent rules simply see "no cell" past the border.

mod drawing;

pub use drawing::CapStyle;

use log::debug;

use crate::material::Dot;
use crate::render::Rgba;

/// An axis-aligned cell rectangle (position plus size).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MapRect {
  pub x: i32,
  pub y: i32,
  pub w: i32,
  pub h: i32,
}

impl MapRect {
  pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
    Self { x, y, w, h }
  }

  /// Rectangle of the given size centered on a cell.
  pub const fn centered_on(x: i32, y: i32, w: i32, h: i32) -> Self {
    Self::new(x - w / 2, y - h / 2, w, h)
  }
}

/// Physical model of the play field. Owns every dot exclusively; all reads
/// and writes go through indexed accessors.
#[derive(Debug)]
pub struct GameMap {
  dots: Vec<Dot>,
  width: u32,
  height: u32,
}

impl GameMap {
  /// Creates a map filled with Space.
  pub fn new(width: u32, height: u32) -> Self {
    Self {
      dots: vec![Dot::space(); (width as usize) * (height as usize)],
      width,
      height,
    }
  }

  /// Rebuilds a map from raw parts; used by the save loader.
  pub(crate) fn from_raw(width: u32, height: u32, dots: Vec<Dot>) -> Self {
    debug_assert_eq!(dots.len(), (width as usize) * (height as usize));
    Self { dots, width, height }
  }

  #[inline]
  pub fn width(&self) -> u32 {
    self.width
  }

  #[inline]
  pub fn height(&self) -> u32 {
    self.height
  }

  #[inline]
  pub fn size(&self) -> (u32, u32) {
    (self.width, self.height)
  }

  /// Checks whether (x, y) is inside the map.
  #[inline]
  pub fn in_bounds(&self, x: i32, y: i32) -> bool {
    x >= 0 && (x as u32) < self.width && y >= 0 && (y as u32) < self.height
  }

  #[inline]
  fn index_of(&self, x: i32, y: i32) -> Option<usize> {
    if self.in_bounds(x, y) {
      Some((y as usize) * (self.width as usize) + (x as usize))
    } else {
      None
    }
  }

  /// Returns the dot at (x, y), or `None` when out of bounds.
  #[inline]
  pub fn get(&self, x: i32, y: i32) -> Option<&Dot> {
    self.index_of(x, y).map(|i| &self.dots[i])
  }

  /// Mutable access to the dot at (x, y).
  #[inline]
  pub fn get_mut(&mut self, x: i32, y: i32) -> Option<&mut Dot> {
    self.index_of(x, y).map(|i| &mut self.dots[i])
  }

  /// Replaces the dot at (x, y); a no-op when out of bounds.
  #[inline]
  pub fn set(&mut self, x: i32, y: i32, dot: Dot) {
    if let Some(i) = self.index_of(x, y) {
      self.dots[i] = dot;
    }
  }

  /// Exchanges two cells. A no-op unless both are in bounds.
  #[inline]
  pub fn swap(&mut self, a: (i32, i32), b: (i32, i32)) {
    if let (Some(i), Some(j)) = (self.index_of(a.0, a.1), self.index_of(b.0, b.1)) {
      self.dots.swap(i, j);
    }
  }

  /// Inverts the Y axis between storage and display orientation.
  #[inline]
  pub fn invy(&self, y: i32) -> i32 {
    self.height as i32 - 1 - y
  }

  /// Inverts the Y axis of a position.
  #[inline]
  pub fn invy_pos(&self, pos: (i32, i32)) -> (i32, i32) {
    (pos.0, self.height as i32 - 1 - pos.1)
  }

  /// Replaces every cell using a per-coordinate factory.
  pub fn fill<F>(&mut self, mut factory: F)
  where
    F: FnMut(&Self, i32, i32) -> Dot,
  {
    for y in 0..self.height as i32 {
      for x in 0..self.width as i32 {
        let dot = factory(&*self, x, y);
        let i = (y as usize) * (self.width as usize) + (x as usize);
        self.dots[i] = dot;
      }
    }
  }

  /// Resets the whole map to Space.
  pub fn clear(&mut self) {
    self.dots.fill(Dot::space());
    debug!("cleared {}x{} map", self.width, self.height);
  }

  /// Resizes the map, preserving cells by position. New cells are Space.
  pub fn resize(&mut self, new_width: u32, new_height: u32) {
    let mut dots = vec![Dot::space(); (new_width as usize) * (new_height as usize)];
    for y in 0..self.height.min(new_height) {
      for x in 0..self.width.min(new_width) {
        dots[(y as usize) * (new_width as usize) + (x as usize)] =
          self.dots[(y as usize) * (self.width as usize) + (x as usize)];
      }
    }
    debug!(
      "resized map from {}x{} to {}x{}",
      self.width, self.height, new_width, new_height
    );
    self.dots = dots;
    self.width = new_width;
    self.height = new_height;
  }

  /// All dots in storage order.
  #[inline]
  pub fn dots(&self) -> &[Dot] {
    &self.dots
  }

  #[inline]
  pub(crate) fn dots_mut(&mut self) -> &mut [Dot] {
    &mut self.dots
  }

  /// Renders a display-oriented viewport through a color mask.
  ///
  /// `area` is given in display coordinates (y = 0 at the top). The returned
  /// rect is the clipped region actually sampled; pixels are row-major,
  /// top row first.
  pub fn snapshot_area<F>(&self, area: MapRect, mask: F) -> (MapRect, Vec<Rgba>)
  where
    F: Fn(&Dot) -> Rgba,
  {
    let x0 = area.x.max(0);
    let y0 = area.y.max(0);
    let x1 = area.x.saturating_add(area.w).min(self.width as i32);
    let y1 = area.y.saturating_add(area.h).min(self.height as i32);
    if x0 >= x1 || y0 >= y1 {
      return (MapRect::new(x0, y0, 0, 0), Vec::new());
    }

    let mut pixels = Vec::with_capacity(((x1 - x0) * (y1 - y0)) as usize);
    for display_y in y0..y1 {
      let row = self.invy(display_y) as usize * self.width as usize;
      for x in x0..x1 {
        pixels.push(mask(&self.dots[row + x as usize]));
      }
    }
    (MapRect::new(x0, y0, x1 - x0, y1 - y0), pixels)
  }

  /// Full-map color snapshot in display orientation, for screenshots.
  pub fn snapshot_colors(&self) -> Vec<Rgba> {
    self
      .snapshot_area(
        MapRect::new(0, 0, self.width as i32, self.height as i32),
        crate::render::color_mask,
      )
      .1
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::material::{Material, MaterialKind};
  use crate::rng::SimRng;

  #[test]
  fn out_of_bounds_get_is_none() {
    let map = GameMap::new(10, 10);
    assert!(map.get(-1, 0).is_none());
    assert!(map.get(0, -1).is_none());
    assert!(map.get(10, 0).is_none());
    assert!(map.get(0, 10).is_none());
    assert!(map.get(5, 5).is_some());
  }

  #[test]
  fn out_of_bounds_set_leaves_map_unchanged() {
    let mut rng = SimRng::new(1);
    let mut map = GameMap::new(4, 4);
    map.set(1, 2, MaterialKind::Sand.spawn(&mut rng));
    let before = map.dots().to_vec();

    let intruder = MaterialKind::Lava.spawn(&mut rng);
    for (x, y) in [(-1, 0), (0, -1), (4, 0), (0, 4), (i32::MIN, i32::MAX)] {
      map.set(x, y, intruder);
    }
    assert_eq!(map.dots(), before.as_slice());
  }

  #[test]
  fn fill_replaces_every_cell() {
    let mut rng = SimRng::new(2);
    let mut map = GameMap::new(6, 5);
    map.set(3, 3, MaterialKind::Sand.spawn(&mut rng));
    map.set(0, 0, MaterialKind::Wall.spawn(&mut rng));

    map.fill(|_, _, _| Dot::space());
    assert!(map.dots().iter().all(|d| d.material == Material::Space));
  }

  #[test]
  fn invy_round_trips() {
    let map = GameMap::new(8, 5);
    assert_eq!(map.invy(0), 4);
    assert_eq!(map.invy(4), 0);
    assert_eq!(map.invy_pos((3, 1)), (3, 3));
    for y in 0..5 {
      assert_eq!(map.invy(map.invy(y)), y);
    }
  }

  #[test]
  fn swap_exchanges_cells() {
    let mut rng = SimRng::new(3);
    let mut map = GameMap::new(3, 3);
    let sand = MaterialKind::Sand.spawn(&mut rng);
    map.set(0, 0, sand);

    map.swap((0, 0), (2, 2));
    assert_eq!(map.get(2, 2).unwrap(), &sand);
    assert_eq!(map.get(0, 0).unwrap().material, Material::Space);

    // Swapping with an out-of-bounds partner does nothing.
    map.swap((2, 2), (3, 0));
    assert_eq!(map.get(2, 2).unwrap(), &sand);
  }

  #[test]
  fn resize_preserves_cells_by_position() {
    let mut rng = SimRng::new(4);
    let mut map = GameMap::new(4, 4);
    let wall = MaterialKind::Wall.spawn(&mut rng);
    map.set(1, 1, wall);
    map.set(3, 3, MaterialKind::Sand.spawn(&mut rng));

    map.resize(6, 2);
    assert_eq!(map.size(), (6, 2));
    assert_eq!(map.get(1, 1).unwrap(), &wall);
    assert!(map.get(3, 3).is_none());
    assert_eq!(map.get(5, 0).unwrap().material, Material::Space);

    map.resize(8, 8);
    assert_eq!(map.get(1, 1).unwrap(), &wall);
    assert_eq!(map.get(7, 7).unwrap().material, Material::Space);
  }

  #[test]
  fn snapshot_is_display_oriented() {
    let mut rng = SimRng::new(5);
    let mut map = GameMap::new(4, 3);
    map.set(0, 0, MaterialKind::Wall.spawn(&mut rng)); // bottom-left in storage

    let pixels = map.snapshot_colors();
    assert_eq!(pixels.len(), 12);
    // Bottom-left in storage is the first pixel of the last display row.
    assert_eq!(pixels[8], map.get(0, 0).unwrap().color());
    assert_eq!(pixels[0].alpha, 0); // top-left is Space
  }

  #[test]
  fn snapshot_area_clips_to_map() {
    let map = GameMap::new(5, 5);
    let (rect, pixels) = map.snapshot_area(MapRect::new(-2, 3, 10, 10), crate::render::color_mask);
    assert_eq!(rect, MapRect::new(0, 3, 5, 2));
    assert_eq!(pixels.len(), 10);

    let (rect, pixels) = map.snapshot_area(MapRect::new(9, 9, 3, 3), crate::render::color_mask);
    assert_eq!(rect.w, 0);
    assert!(pixels.is_empty());
  }
}
