//! Orbit simulation: a drifting noise field driving four rotating points.
//!
//! Once per display frame the rotation phase advances, the four noise
//! accumulators creep forward, and the four orbit points are recomputed.
//! Everything downstream (modulation, synthesis, beams) is a pure function
//! of the resulting positions.

use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::noise::NoiseGenerator;
use crate::params::OrbitParams;

/// Number of orbit points (and of independent noise channels)
pub const POINT_COUNT: usize = 4;

/// Four seeded noise accumulators advancing with the rotation phase.
///
/// Each channel integrates `noise(rotation + seed)^k * gain` per frame, so
/// the accumulators are monotonically non-decreasing and move fastest when
/// the first-order noise is near its peak.
pub struct NoiseField {
    noise: NoiseGenerator,
    seeds: [f32; POINT_COUNT],
    accumulators: [f32; POINT_COUNT],
}

impl NoiseField {
    pub fn new(noise: NoiseGenerator, seeds: [f32; POINT_COUNT]) -> Self {
        Self {
            noise,
            seeds,
            accumulators: [0.0; POINT_COUNT],
        }
    }

    /// Advance all four accumulators for the given rotation phase
    pub fn advance(&mut self, rotation: f32, params: &OrbitParams) {
        for (acc, seed) in self.accumulators.iter_mut().zip(&self.seeds) {
            let sample = self.noise.sample(rotation + seed);
            *acc += sample.powf(params.noise_exponent) * params.noise_gain;
        }
    }

    /// Current accumulator values
    pub fn accumulators(&self) -> [f32; POINT_COUNT] {
        self.accumulators
    }

    /// Second-order noise for one channel: the accumulator fed back through
    /// the noise function at its own seed offset. Range [0, 1].
    pub fn orbit_sample(&self, channel: usize) -> f32 {
        self.noise
            .sample(self.accumulators[channel] + self.seeds[channel])
    }
}

/// The full orbit simulation: rotation phase, noise field, four points
pub struct OrbitSystem {
    field: NoiseField,
    rotation: f32,
    points: [Vec2; POINT_COUNT],
    center: Vec2,
    params: OrbitParams,
}

impl OrbitSystem {
    /// Create a new simulation, drawing the four noise seeds from `rng_seed`
    /// (entropy-seeded when `None`, so every launch gets fresh orbits)
    pub fn new(params: OrbitParams, center: Vec2, rng_seed: Option<u64>) -> Self {
        let mut rng = match rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut seeds = [0.0; POINT_COUNT];
        for seed in &mut seeds {
            *seed = rng.gen_range(0.0..params.seed_range);
        }
        Self::with_seeds(params, center, seeds)
    }

    /// Create a simulation with explicit seeds (deterministic)
    pub fn with_seeds(params: OrbitParams, center: Vec2, seeds: [f32; POINT_COUNT]) -> Self {
        let field = NoiseField::new(NoiseGenerator::new(0), seeds);
        Self {
            field,
            rotation: 0.0,
            points: [center; POINT_COUNT],
            center,
            params,
        }
    }

    /// Advance one display frame: rotation, accumulators, point positions
    pub fn update(&mut self) -> &[Vec2; POINT_COUNT] {
        self.rotation += self.params.rotation_step;
        self.field.advance(self.rotation, &self.params);

        for i in 0..POINT_COUNT {
            let angle = self.rotation * self.params.angle_rates[i] + self.params.angle_phases[i];
            let radius = self.field.orbit_sample(i) * self.params.orbit_radius_px;
            self.points[i] = self.center + Vec2::new(angle.cos(), angle.sin()) * radius;
        }

        &self.points
    }

    /// Current noise accumulators
    pub fn accumulators(&self) -> [f32; POINT_COUNT] {
        self.field.accumulators()
    }
}
