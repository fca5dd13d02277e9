//! Parameter definitions with units and documented semantics.
//!
//! Every magic number of the sketch lives here with:
//! - Units (pixels, Hz, per-frame increments)
//! - Documented ranges and meanings
//! - `Default` impls carrying the canonical values

use std::f32::consts::PI;

/// Orbit simulation parameters (noise field + rotating points)
#[derive(Debug, Clone)]
pub struct OrbitParams {
    /// Rotation phase increment per display frame (radians, unbounded
    /// accumulator; only ever fed to trig and noise functions)
    pub rotation_step: f32,

    /// Exponent applied to the first-order noise sample before accumulation.
    /// Higher values make the accumulators crawl except at noise peaks.
    pub noise_exponent: f32,

    /// Accumulator gain per frame (scales the exponentiated noise sample)
    pub noise_gain: f32,

    /// Orbit radius scale (pixels); noise in [0,1] keeps each point within
    /// this distance of the center
    pub orbit_radius_px: f32,

    /// Per-point angular motion: angle = rotation * rate + phase.
    /// Rates and phases are fixed design choices producing four visually
    /// distinct, never-synchronized orbits. Preserve exactly.
    pub angle_rates: [f32; 4],

    /// Per-point angular phase offsets (radians)
    pub angle_phases: [f32; 4],

    /// Upper bound (exclusive) for the four random noise seeds
    pub seed_range: f32,
}

impl Default for OrbitParams {
    fn default() -> Self {
        Self {
            rotation_step: 0.0015,
            noise_exponent: 4.0,
            noise_gain: 0.01,
            orbit_radius_px: 100.0,
            angle_rates: [1.0, 1.0 / 1.5, -0.5, -1.0 / 2.5],
            angle_phases: [0.0, PI, 0.0, PI],
            seed_range: 10000.0,
        }
    }
}

/// Modulation mixer parameters (point distances -> synth coefficients)
#[derive(Debug, Clone)]
pub struct ModulationParams {
    /// Distance normalization (pixels); coefficient base is 1 - d / this
    pub distance_norm_px: f32,

    /// Point-index pairs feeding the six coefficients, in amtA..amtF order:
    /// (0,1) and (2,3) drive the two modulators, the four cross pairs drive
    /// the carriers
    pub pairs: [(usize, usize); 6],

    /// Power-law exponent per coefficient. The modulator coefficients fall
    /// off sharply (8); the carrier coefficients stay hot over most of the
    /// field (0.5, 0.25).
    pub exponents: [f32; 6],

    /// Gain on the aggregate amount: AMT = (a+b)*(c+d+e+f) * this
    pub aggregate_gain: f32,
}

impl Default for ModulationParams {
    fn default() -> Self {
        Self {
            distance_norm_px: 200.0,
            pairs: [(0, 1), (2, 3), (0, 2), (0, 3), (1, 2), (1, 3)],
            exponents: [8.0, 8.0, 0.5, 0.5, 0.25, 0.25],
            aggregate_gain: 10.0,
        }
    }
}

/// FM voice bank parameters (two modulators, four carriers, one LFO)
#[derive(Debug, Clone)]
pub struct SynthParams {
    /// Base frequency (Hz); every oscillator is a fixed ratio of this
    pub base_freq_hz: f32,

    /// Modulator frequency ratios: A (triangle), B (sine)
    pub mod_ratios: [f32; 2],

    /// Carrier frequency ratios: C, D, E, F
    pub carrier_ratios: [f32; 4],

    /// Global FM depth; scales the weighted modulator sum into Hz offset
    pub fm_depth: f32,

    /// Per-carrier (modA weight, modB weight) into the FM sum
    pub mod_weights: [(f32, f32); 4],

    /// Per-carrier output gains
    pub carrier_gains: [f32; 4],

    /// Per-carrier stereo pans in [0,1]; L weight = 1-pan, R weight = pan
    pub carrier_pans: [f32; 4],

    /// Tremolo floor: channel gain = floor + lfo * depth
    pub tremolo_floor: f32,

    /// Tremolo depth on top of the floor
    pub tremolo_depth: f32,

    /// LFO frequency per unit of aggregate modulation (Hz)
    pub lfo_rate_per_amt_hz: f32,
}

impl Default for SynthParams {
    fn default() -> Self {
        Self {
            base_freq_hz: 35.0,
            mod_ratios: [1.0, 14.0],
            carrier_ratios: [14.0 / 3.0, 7.0 / 2.0, 4.0 / 3.0, 3.0 / 5.0],
            fm_depth: 64.0,
            mod_weights: [(0.7, 0.7), (0.6, 0.8), (0.5, 0.9), (0.9, 0.5)],
            carrier_gains: [0.2, 0.4, 0.5, 0.8],
            carrier_pans: [0.1, 0.7, 0.4, 0.5],
            tremolo_floor: 0.7,
            tremolo_depth: 0.12,
            lfo_rate_per_amt_hz: 3.0,
        }
    }
}

/// Feed-forward compressor parameters (one instance per channel)
#[derive(Debug, Clone, Copy)]
pub struct CompressorParams {
    /// Envelope level above which gain reduction engages
    pub threshold: f32,

    /// Slope of the over-threshold region; 1.0 = no reduction
    pub ratio: f32,

    /// Per-sample envelope smoothing while rising (fast)
    pub attack: f32,

    /// Per-sample envelope retention while falling (slow; close to 1)
    pub release: f32,
}

impl Default for CompressorParams {
    fn default() -> Self {
        Self {
            threshold: 0.25,
            ratio: 0.8,
            attack: 0.1,
            release: 0.9999,
        }
    }
}

/// Radial beam display parameters
#[derive(Debug, Clone)]
pub struct BeamParams {
    /// Number of equally-spaced beams per orbit point
    pub beam_count: usize,

    /// Inner radius of each of the three concentric segments (pixels)
    pub inner_radii_px: [f32; 3],

    /// Half-extent of each segment at the outer radius (pixels)
    pub half_widths_px: [f32; 3],

    /// Outer radius shared by all segments (pixels; well past the window
    /// edge so beams always reach off-screen)
    pub outer_radius_px: f32,
}

impl Default for BeamParams {
    fn default() -> Self {
        Self {
            beam_count: 144,
            inner_radii_px: [25.0, 150.0, 275.0],
            half_widths_px: [5.0, 10.0, 15.0],
            outer_radius_px: 1000.0,
        }
    }
}

/// Rendering configuration
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Window width (pixels)
    pub window_width: u32,

    /// Window height (pixels)
    pub window_height: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            window_width: 1280,
            window_height: 720,
        }
    }
}

impl RenderConfig {
    /// Screen center, the shared origin of the four orbits (pixels)
    pub fn center(&self) -> glam::Vec2 {
        glam::Vec2::new(
            self.window_width as f32 / 2.0,
            self.window_height as f32 / 2.0,
        )
    }
}
