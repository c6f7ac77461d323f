//! Shape stamps: rect, ellipse and wide-line drawing primitives.
//!
//! These are the primitives the input collaborator builds continuous brush
//! strokes from. Every painted cell goes through the caller-supplied factory,
//! which decides policy (destructive overwrite, preserve-existing, tools that
//! mutate in place); the map itself stays policy-free.

use super::{GameMap, MapRect};
use crate::material::Dot;

/// End/joint shape for wide lines.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CapStyle {
  Square,
  Round,
}

impl GameMap {
  /// Stamps a filled rectangle, clipped to the map.
  pub fn draw_rect<F>(&mut self, area: MapRect, mut factory: F)
  where
    F: FnMut(&Self, i32, i32) -> Dot,
  {
    let x_start = area.x.max(0);
    let x_end = area.x.saturating_add(area.w).min(self.width as i32);
    let y_start = area.y.max(0);
    let y_end = area.y.saturating_add(area.h).min(self.height as i32);

    for y in y_start..y_end {
      for x in x_start..x_end {
        let dot = factory(&*self, x, y);
        self.set(x, y, dot);
      }
    }
  }

  /// Stamps a filled ellipse inscribed in `area`, clipped to the map.
  pub fn draw_ellipse<F>(&mut self, area: MapRect, mut factory: F)
  where
    F: FnMut(&Self, i32, i32) -> Dot,
  {
    if area.w <= 0 || area.h <= 0 {
      return;
    }
    let cx = area.x as f64 + area.w as f64 / 2.0;
    let cy = area.y as f64 + area.h as f64 / 2.0;
    let a = area.w as f64 / 2.0;
    let b = area.h as f64 / 2.0;

    let x_start = area.x.max(0);
    let x_end = area.x.saturating_add(area.w).min(self.width as i32);
    let y_start = area.y.max(0);
    let y_end = area.y.saturating_add(area.h).min(self.height as i32);

    for y in y_start..y_end {
      for x in x_start..x_end {
        let dx = (x as f64 - cx) / a;
        let dy = (y as f64 - cy) / b;
        if dx * dx + dy * dy <= 1.0 {
          let dot = factory(&*self, x, y);
          self.set(x, y, dot);
        }
      }
    }
  }

  /// Stamps a `width`-wide line from `start` to `end`.
  ///
  /// Walks the segment with integer Bresenham stepping and stamps a square
  /// (or disk, for [`CapStyle::Round`]) of radius `width / 2` at every
  /// sampled point.
  pub fn draw_line<F>(
    &mut self,
    start: (i32, i32),
    end: (i32, i32),
    width: u32,
    mut factory: F,
    cap: CapStyle,
  ) where
    F: FnMut(&Self, i32, i32) -> Dot,
  {
    let delta_x = (start.0 - end.0).abs();
    let delta_y = (start.1 - end.1).abs();

    let mut current = start;
    let step_x = if start.0 < end.0 { 1 } else { -1 };
    let step_y = if start.1 < end.1 { 1 } else { -1 };

    let mut points = Vec::with_capacity((delta_x.max(delta_y) + 1) as usize);
    if delta_x > delta_y {
      let mut error = delta_x as f64 / 2.0;
      while current.0 != end.0 {
        points.push(current);
        current.0 += step_x;
        error -= delta_y as f64;
        if error < 0.0 {
          current.1 += step_y;
          error += delta_x as f64;
        }
      }
    } else {
      let mut error = delta_y as f64 / 2.0;
      while current.1 != end.1 {
        points.push(current);
        current.1 += step_y;
        error -= delta_x as f64;
        if error < 0.0 {
          current.0 += step_x;
          error += delta_y as f64;
        }
      }
    }
    points.push(current);

    let radius = (width / 2) as i32;
    let radius_sq = radius * radius;
    for (px, py) in points {
      for dy in -radius..=radius {
        for dx in -radius..=radius {
          if cap == CapStyle::Round && dx * dx + dy * dy > radius_sq {
            continue;
          }
          let (tx, ty) = (px + dx, py + dy);
          if !self.in_bounds(tx, ty) {
            continue;
          }
          let dot = factory(&*self, tx, ty);
          self.set(tx, ty, dot);
        }
      }
    }
  }
}
