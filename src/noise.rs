//! Coherent noise source for the orbit simulation.
//!
//! Wraps Perlin noise into a 1D unit-interval sampler: smooth, deterministic,
//! and always in [0, 1], matching what the orbit math expects.

use noise::{NoiseFn, Perlin};

/// Unit-interval coherent noise generator
pub struct NoiseGenerator {
    perlin: Perlin,
}

impl NoiseGenerator {
    /// Create new noise generator with seed
    pub fn new(seed: u32) -> Self {
        Self {
            perlin: Perlin::new(seed),
        }
    }

    /// Sample 1D coherent noise at position
    ///
    /// Returns value in range [0, 1]. Deterministic: equal inputs always
    /// produce equal outputs.
    pub fn sample(&self, x: f32) -> f32 {
        // 2D perlin along a fixed line; raw output is in [-1, 1]
        let raw = self.perlin.get([x as f64, 0.5]) as f32;
        (raw * 0.5 + 0.5).clamp(0.0, 1.0)
    }
}
