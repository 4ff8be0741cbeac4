//! Random sampling primitives behind a small trait, so generators never reach
//! for a process-wide RNG directly.

use rand::rngs::ThreadRng;
use rand::Rng;

pub trait Sampler {
  /// Integer in `[min, max]`; returns `min` when `max < min`.
  fn uniform_int_range(&mut self, min: i64, max: i64) -> i64;

  /// True with probability `p`.
  fn chance(&mut self, p: f64) -> bool;

  /// Integer in `[0, max_inclusive]`.
  fn uniform_int(&mut self, max_inclusive: i64) -> i64 {
    self.uniform_int_range(0, max_inclusive)
  }

  /// Uniformly chosen element. `items` must not be empty.
  fn pick_one<'a, T>(&mut self, items: &'a [T]) -> &'a T {
    let last = items.len().saturating_sub(1) as i64;
    &items[self.uniform_int_range(0, last) as usize]
  }
}

/// [`Sampler`] backed by any `rand` generator.
pub struct RngSampler<R: Rng> {
  rng: R,
}

impl<R: Rng> RngSampler<R> {
  pub fn new(rng: R) -> Self { Self { rng } }
}

impl RngSampler<ThreadRng> {
  pub fn thread() -> Self { Self::new(rand::thread_rng()) }
}

impl<R: Rng> Sampler for RngSampler<R> {
  fn uniform_int_range(&mut self, min: i64, max: i64) -> i64 {
    if max < min {
      return min;
    }
    self.rng.gen_range(min..=max)
  }

  fn chance(&mut self, p: f64) -> bool {
    self.rng.gen_bool(p.clamp(0.0, 1.0))
  }
}
