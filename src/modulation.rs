//! Modulation mixer: inter-point distances -> synth coefficients.
//!
//! Six pairwise distances collapse into six power-law coefficients plus one
//! aggregate amount. The result is a plain `Copy` snapshot shared with the
//! audio thread once per frame.

use glam::Vec2;

use crate::orbit::POINT_COUNT;
use crate::params::ModulationParams;

/// One frame's worth of modulation coefficients.
///
/// `amt_a`/`amt_b` scale the two FM modulators, `amt_c..amt_f` the four
/// carriers, and `amt` is the aggregate driving the tremolo LFO rate and
/// the display colors. All fields are finite and the six pair coefficients
/// sit in [0, 1].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ModulationSnapshot {
    pub amt_a: f32,
    pub amt_b: f32,
    pub amt_c: f32,
    pub amt_d: f32,
    pub amt_e: f32,
    pub amt_f: f32,
    /// Aggregate amount: (amt_a + amt_b) * (amt_c + .. + amt_f) * gain
    pub amt: f32,
}

impl ModulationSnapshot {
    /// The six pair coefficients in amtA..amtF order
    pub fn coefficients(&self) -> [f32; 6] {
        [
            self.amt_a, self.amt_b, self.amt_c, self.amt_d, self.amt_e, self.amt_f,
        ]
    }
}

/// Compute one coefficient from a single inter-point distance.
///
/// The base `1 - d/norm` is clamped to be non-negative before the power is
/// applied: beyond the normalization distance the coefficient is exactly 0.
/// Without the clamp, the fractional exponents would turn a negative base
/// into NaN and poison the synth downstream.
fn distance_coefficient(distance: f32, norm: f32, exponent: f32) -> f32 {
    (1.0 - distance / norm).max(0.0).powf(exponent)
}

/// Derive the modulation snapshot for one frame from the four orbit points.
/// Pure function; no state.
pub fn mix(points: &[Vec2; POINT_COUNT], params: &ModulationParams) -> ModulationSnapshot {
    let mut coefficients = [0.0f32; 6];
    for (slot, (&(a, b), &exponent)) in coefficients
        .iter_mut()
        .zip(params.pairs.iter().zip(&params.exponents))
    {
        let distance = points[a].distance(points[b]);
        *slot = distance_coefficient(distance, params.distance_norm_px, exponent);
    }

    let [amt_a, amt_b, amt_c, amt_d, amt_e, amt_f] = coefficients;
    let amt = (amt_a + amt_b) * (amt_c + amt_d + amt_e + amt_f) * params.aggregate_gain;

    ModulationSnapshot {
        amt_a,
        amt_b,
        amt_c,
        amt_d,
        amt_e,
        amt_f,
        amt,
    }
}
