//! Per-channel feed-forward compressor.
//!
//! An envelope follower tracks input magnitude with a fast attack and a
//! slow release; above the threshold the gain curve bends by the ratio.
//! Two independent instances compress the stereo pair (no linking).

use crate::params::CompressorParams;

/// Feed-forward compressor with asymmetric envelope smoothing
pub struct Compressor {
    params: CompressorParams,
    envelope: f32,
}

impl Compressor {
    pub fn new(params: CompressorParams) -> Self {
        Self {
            params,
            envelope: 0.0,
        }
    }

    /// Process one sample. Stable for all finite input: the envelope never
    /// goes negative and the gain never exceeds 1.
    pub fn process(&mut self, input: f32) -> f32 {
        let magnitude = input.abs();

        if magnitude > self.envelope {
            // Attack: move quickly toward the incoming peak
            self.envelope += self.params.attack * (magnitude - self.envelope);
        } else {
            // Release: decay slowly toward the current magnitude
            self.envelope = magnitude + (self.envelope - magnitude) * self.params.release;
        }

        if self.envelope > self.params.threshold {
            let compressed =
                self.params.threshold + (self.envelope - self.params.threshold) * self.params.ratio;
            input * compressed / self.envelope
        } else {
            input
        }
    }

    /// Current envelope level (magnitude domain)
    pub fn envelope(&self) -> f32 {
        self.envelope
    }
}
