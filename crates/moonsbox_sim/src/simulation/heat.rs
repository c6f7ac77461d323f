//! Heat exchange pass.
//!
//! Every cell trades temperature with its in-bounds cardinal neighbors. The
//! pass reads a pre-pass snapshot and writes into a scratch buffer, so cell
//! order cannot influence the result and rows can be processed in parallel.
//!
//! The transfer rule, held invariant across the engine:
//!
//! ```text
//! T' = T + (1 - hc) / N * sum((T_nb - T) * min(cond_nb, cond))
//! ```
//!
//! where `hc` is the cell's heat capacity (fraction of heat retained), `cond`
//! the thermal conductivities (a pair conducts no better than its worse
//! conductor) and `N` the number of in-bounds neighbors. With both factors in
//! `[0, 1]` the new temperature stays inside the convex hull of the old
//! neighborhood temperatures: monotonic convergence, no overshoot.

use rayon::prelude::*;

use crate::map::GameMap;

/// Runs one snapshot-based heat exchange over the whole map.
///
/// Temperatures are clamped to zero and non-finite results are zeroed.
pub(crate) fn exchange(map: &mut GameMap) {
  let w = map.width() as usize;
  let h = map.height() as usize;
  if w == 0 || h == 0 {
    return;
  }

  let temps: Vec<f32> = map.dots().iter().map(|d| d.temp).collect();
  let caps: Vec<f32> = map.dots().iter().map(|d| d.heat_capacity()).collect();
  let conds: Vec<f32> = map.dots().iter().map(|d| d.thermal_conductivity()).collect();

  let mut next = vec![0.0f32; w * h];
  next.par_chunks_mut(w).enumerate().for_each(|(y, row)| {
    for (x, out) in row.iter_mut().enumerate() {
      let i = y * w + x;
      let temp = temps[i];
      let cond = conds[i];

      let mut delta = 0.0f32;
      let mut neighbors = 0u32;
      if x > 0 {
        delta += (temps[i - 1] - temp) * conds[i - 1].min(cond);
        neighbors += 1;
      }
      if x + 1 < w {
        delta += (temps[i + 1] - temp) * conds[i + 1].min(cond);
        neighbors += 1;
      }
      if y > 0 {
        delta += (temps[i - w] - temp) * conds[i - w].min(cond);
        neighbors += 1;
      }
      if y + 1 < h {
        delta += (temps[i + w] - temp) * conds[i + w].min(cond);
        neighbors += 1;
      }

      let new_temp = if neighbors > 0 {
        temp + delta / neighbors as f32 * (1.0 - caps[i])
      } else {
        temp
      };
      *out = if new_temp.is_finite() {
        new_temp.max(0.0)
      } else {
        0.0
      };
    }
  });

  for (dot, temp) in map.dots_mut().iter_mut().zip(next) {
    dot.temp = temp;
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::material::{Dot, Material, MaterialKind};
  use crate::rng::SimRng;

  #[test]
  fn exchange_converges_without_overshoot() {
    let mut rng = SimRng::new(1);
    let mut map = GameMap::new(2, 1);
    let mut hot = MaterialKind::Sand.spawn(&mut rng);
    hot.temp = 500.0;
    let mut cold = MaterialKind::Sand.spawn(&mut rng);
    cold.temp = 300.0;
    map.set(0, 0, hot);
    map.set(1, 0, cold);

    for _ in 0..100 {
      let t1 = map.get(0, 0).unwrap().temp;
      let t2 = map.get(1, 0).unwrap().temp;
      exchange(&mut map);
      let t1_new = map.get(0, 0).unwrap().temp;
      let t2_new = map.get(1, 0).unwrap().temp;
      assert!(t1_new <= t1 && t2_new >= t2);
      assert!(t1_new >= t2_new);
      assert!((300.0..=500.0).contains(&t1_new));
      assert!((300.0..=500.0).contains(&t2_new));
    }
  }

  #[test]
  fn lava_warms_adjacent_sand() {
    let mut rng = SimRng::new(2);
    let mut map = GameMap::new(2, 1);
    map.set(0, 0, MaterialKind::Lava.spawn(&mut rng)); // 1200 K
    map.set(1, 0, MaterialKind::Sand.spawn(&mut rng)); // 300 K

    exchange(&mut map);

    // min(cond) = 0.1, one neighbor each:
    // lava: 1200 + (300 - 1200) * 0.1 * (1 - 0.8) = 1182
    // sand:  300 + (1200 - 300) * 0.1 * (1 - 0.3) = 363
    let lava = map.get(0, 0).unwrap().temp;
    let sand = map.get(1, 0).unwrap().temp;
    assert!((lava - 1182.0).abs() < 0.01, "lava = {lava}");
    assert!((sand - 363.0).abs() < 0.01, "sand = {sand}");
  }

  #[test]
  fn temperature_never_drops_below_zero() {
    let mut map = GameMap::new(3, 1);
    let mut frozen = Dot::space();
    frozen.temp = 0.0;
    map.set(0, 0, frozen);
    map.set(1, 0, Dot::new(Material::Space, 10.0));
    map.set(2, 0, frozen);

    for _ in 0..50 {
      exchange(&mut map);
      assert!(map.dots().iter().all(|d| d.temp >= 0.0));
    }
  }

  #[test]
  fn non_finite_temperatures_are_zeroed() {
    let mut map = GameMap::new(2, 1);
    map.set(0, 0, Dot::new(Material::Space, f32::NAN));

    exchange(&mut map);
    assert!(map.dots().iter().all(|d| d.temp.is_finite()));
    assert!(map.dots().iter().all(|d| d.temp >= 0.0));
  }

  #[test]
  fn insulators_barely_move() {
    let mut rng = SimRng::new(3);
    let mut map = GameMap::new(2, 1);
    let mut gel = MaterialKind::Aerogel.spawn(&mut rng);
    gel.temp = 300.0;
    map.set(0, 0, gel);
    map.set(1, 0, Dot::new(Material::Lava, 1200.0));

    exchange(&mut map);
    let gel_temp = map.get(0, 0).unwrap().temp;
    // min(0.01, 0.5) * (1 - 0.99) = 1e-4 of the 900 K delta.
    assert!(gel_temp < 301.0, "gel = {gel_temp}");
  }
}
