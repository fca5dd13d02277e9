//! FM voice bank: two modulators, four carriers, one tremolo LFO.
//!
//! All seven oscillators are bare phase accumulators; the per-frame
//! modulation snapshot scales the modulators, the carriers, and the LFO
//! rate. Carrier frequency is recomputed every sample from the modulator
//! outputs, so the phase increment always uses the current instantaneous
//! frequency and the signal stays phase-continuous under deep modulation.

use crate::modulation::ModulationSnapshot;
use crate::params::SynthParams;

use std::f32::consts::TAU;

/// A single phase-accumulator oscillator. Phase lives in [0, 1); output is
/// computed from the pre-advance phase, then the phase steps by
/// `freq / sample_rate`.
#[derive(Debug, Default)]
pub struct Oscillator {
    phase: f32,
}

impl Oscillator {
    /// Step the phase by one sample at the given instantaneous frequency.
    /// Negative frequencies (deep FM) wrap cleanly back into [0, 1).
    fn advance(&mut self, freq_hz: f32, sample_rate: f32) {
        self.phase = (self.phase + freq_hz / sample_rate).rem_euclid(1.0);
    }

    /// Sine wave in [-1, 1]
    pub fn sine(&mut self, freq_hz: f32, sample_rate: f32) -> f32 {
        let out = (self.phase * TAU).sin();
        self.advance(freq_hz, sample_rate);
        out
    }

    /// Piecewise-linear triangle wave in [-1, 1]: rises through the first
    /// half of the cycle, falls through the second
    pub fn triangle(&mut self, freq_hz: f32, sample_rate: f32) -> f32 {
        let out = if self.phase <= 0.5 {
            (self.phase - 0.25) * 4.0
        } else {
            (0.75 - self.phase) * 4.0
        };
        self.advance(freq_hz, sample_rate);
        out
    }

    /// Unipolar sine in [0, 1], for tremolo
    pub fn unipolar_sine(&mut self, freq_hz: f32, sample_rate: f32) -> f32 {
        0.5 + 0.5 * self.sine(freq_hz, sample_rate)
    }

    /// Current phase in [0, 1)
    pub fn phase(&self) -> f32 {
        self.phase
    }
}

/// The six band oscillators plus tremolo LFO, rendered one stereo frame at
/// a time from a modulation snapshot.
pub struct VoiceBank {
    sample_rate: f32,
    params: SynthParams,
    mod_a: Oscillator,
    mod_b: Oscillator,
    carriers: [Oscillator; 4],
    lfo: Oscillator,
}

impl VoiceBank {
    pub fn new(params: SynthParams, sample_rate: f32) -> Self {
        Self {
            sample_rate,
            params,
            mod_a: Oscillator::default(),
            mod_b: Oscillator::default(),
            carriers: Default::default(),
            lfo: Oscillator::default(),
        }
    }

    /// Render one stereo frame. Allocation-free; every call advances the
    /// seven oscillator phases exactly once.
    pub fn render_frame(&mut self, m: &ModulationSnapshot) -> (f32, f32) {
        let sample_rate = self.sample_rate;
        let p = &self.params;

        // Modulator bank: triangle A, sine B, each scaled by its
        // coefficient and its own frequency
        let freq_a = p.base_freq_hz * p.mod_ratios[0];
        let freq_b = p.base_freq_hz * p.mod_ratios[1];
        let mod_a = self.mod_a.triangle(freq_a, sample_rate) * m.amt_a * freq_a;
        let mod_b = self.mod_b.sine(freq_b, sample_rate) * m.amt_b * freq_b;

        // Carrier bank: frequency-modulated sines, panned into the mix
        let carrier_amts = [m.amt_c, m.amt_d, m.amt_e, m.amt_f];
        let mut left = 0.0;
        let mut right = 0.0;
        for i in 0..4 {
            let (weight_a, weight_b) = p.mod_weights[i];
            let freq = p.base_freq_hz * p.carrier_ratios[i]
                + (mod_a * weight_a + mod_b * weight_b) * carrier_amts[i] * p.fm_depth;
            let out =
                self.carriers[i].sine(freq, sample_rate) * carrier_amts[i] * p.carrier_gains[i];

            let pan = p.carrier_pans[i];
            left += out * (1.0 - pan);
            right += out * pan;
        }

        // Out-of-phase stereo tremolo, rate driven by the aggregate amount
        let lfo = self
            .lfo
            .unipolar_sine(p.lfo_rate_per_amt_hz * m.amt, sample_rate);
        left *= p.tremolo_floor + lfo * p.tremolo_depth;
        right *= p.tremolo_floor + (1.0 - lfo) * p.tremolo_depth;

        (left, right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustfft::{num_complex::Complex, FftPlanner};

    const SAMPLE_RATE: f32 = 44100.0;

    /// Snapshot lighting up a single unmodulated carrier
    fn solo_carrier(index: usize) -> ModulationSnapshot {
        let mut snapshot = ModulationSnapshot::default();
        match index {
            0 => snapshot.amt_c = 1.0,
            1 => snapshot.amt_d = 1.0,
            2 => snapshot.amt_e = 1.0,
            _ => snapshot.amt_f = 1.0,
        }
        snapshot
    }

    fn full_snapshot() -> ModulationSnapshot {
        ModulationSnapshot {
            amt_a: 1.0,
            amt_b: 1.0,
            amt_c: 1.0,
            amt_d: 1.0,
            amt_e: 1.0,
            amt_f: 1.0,
            amt: 80.0,
        }
    }

    #[test]
    fn test_oscillator_phase_stays_in_unit_interval() {
        let mut osc = Oscillator::default();
        for freq in [-5000.0, -35.0, 0.0, 35.0, 21000.0] {
            for _ in 0..1000 {
                osc.sine(freq, SAMPLE_RATE);
                assert!((0.0..1.0).contains(&osc.phase()), "phase {}", osc.phase());
            }
        }
    }

    #[test]
    fn test_triangle_shape() {
        let mut osc = Oscillator::default();
        // Quarter-cycle steps: phase 0, 0.25, 0.5, 0.75
        let freq = SAMPLE_RATE / 4.0;
        assert_eq!(osc.triangle(freq, SAMPLE_RATE), -1.0);
        assert_eq!(osc.triangle(freq, SAMPLE_RATE), 0.0);
        assert_eq!(osc.triangle(freq, SAMPLE_RATE), 1.0);
        assert_eq!(osc.triangle(freq, SAMPLE_RATE), 0.0);
    }

    #[test]
    fn test_unipolar_sine_range() {
        let mut osc = Oscillator::default();
        for _ in 0..2000 {
            let v = osc.unipolar_sine(240.0, SAMPLE_RATE);
            assert!((0.0..=1.0).contains(&v));
        }
    }

    #[test]
    fn test_solo_carrier_spectral_peak() {
        // A single carrier with no modulation must be a pure tone at its
        // design frequency; verify the FFT magnitude peak lands in the
        // expected bin for each of the four carriers.
        let params = SynthParams::default();
        let fft_size = 8192;

        for index in 0..4 {
            let mut voice = VoiceBank::new(params.clone(), SAMPLE_RATE);
            let snapshot = solo_carrier(index);

            let mut signal: Vec<Complex<f32>> = (0..fft_size)
                .map(|_| Complex::new(voice.render_frame(&snapshot).0, 0.0))
                .collect();

            let mut planner = FftPlanner::new();
            planner.plan_fft_forward(fft_size).process(&mut signal);

            let peak_bin = signal[1..fft_size / 2]
                .iter()
                .enumerate()
                .max_by(|(_, a), (_, b)| a.norm().total_cmp(&b.norm()))
                .map(|(i, _)| i + 1)
                .unwrap();

            let freq = params.base_freq_hz * params.carrier_ratios[index];
            let expected_bin = (freq * fft_size as f32 / SAMPLE_RATE).round() as usize;
            assert!(
                peak_bin.abs_diff(expected_bin) <= 1,
                "carrier {index}: peak at bin {peak_bin}, expected {expected_bin}"
            );
        }
    }

    #[test]
    fn test_phase_continuity_across_calls() {
        // Constant coefficients: the output must have no discontinuities,
        // including across simulated buffer boundaries.
        let mut voice = VoiceBank::new(SynthParams::default(), SAMPLE_RATE);
        let snapshot = solo_carrier(0);
        let freq = 35.0 * 14.0 / 3.0;

        // Amplitude-scaled bound on the per-sample delta of a sine at this
        // frequency, with slack for the tremolo factor
        let max_delta = TAU * freq / SAMPLE_RATE * 0.2 + 1e-4;

        let mut previous = voice.render_frame(&snapshot).0;
        for _buffer in 0..8 {
            for _ in 0..512 {
                let current = voice.render_frame(&snapshot).0;
                assert!(
                    (current - previous).abs() <= max_delta,
                    "discontinuity: {previous} -> {current}"
                );
                previous = current;
            }
        }
    }

    #[test]
    fn test_full_modulation_stays_finite_and_bounded() {
        let mut voice = VoiceBank::new(SynthParams::default(), SAMPLE_RATE);
        let snapshot = full_snapshot();
        for _ in 0..44100 {
            let (left, right) = voice.render_frame(&snapshot);
            assert!(left.is_finite() && right.is_finite());
            // Mix bound: sum of gain*pan weights times max tremolo gain
            assert!(left.abs() <= 1.0 && right.abs() <= 1.0);
        }
    }

    #[test]
    fn test_silent_snapshot_renders_silence() {
        let mut voice = VoiceBank::new(SynthParams::default(), SAMPLE_RATE);
        let snapshot = ModulationSnapshot::default();
        for _ in 0..1000 {
            let (left, right) = voice.render_frame(&snapshot);
            assert_eq!(left, 0.0);
            assert_eq!(right, 0.0);
        }
    }

    #[test]
    fn test_tremolo_channels_out_of_phase() {
        // With a hot aggregate amount the two channel gains must move in
        // opposition: when L is at its loudest, R is at its quietest.
        let params = SynthParams::default();
        let mut voice = VoiceBank::new(params.clone(), SAMPLE_RATE);
        // Only carrier F, panned dead center, so L and R differ only by
        // the tremolo factor
        let snapshot = ModulationSnapshot {
            amt_f: 1.0,
            amt: 10.0,
            ..ModulationSnapshot::default()
        };

        let mut ratio_min = f32::MAX;
        let mut ratio_max = f32::MIN;
        for _ in 0..44100 {
            let (left, right) = voice.render_frame(&snapshot);
            if right.abs() > 1e-4 {
                let ratio = left / right;
                ratio_min = ratio_min.min(ratio);
                ratio_max = ratio_max.max(ratio);
            }
        }

        let floor = params.tremolo_floor;
        let depth = params.tremolo_depth;
        // L/R spans [floor/(floor+depth), (floor+depth)/floor]
        assert!((ratio_min - floor / (floor + depth)).abs() < 0.01);
        assert!((ratio_max - (floor + depth) / floor).abs() < 0.01);
    }
}
