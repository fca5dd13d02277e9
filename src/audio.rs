//! Audio output: cpal stream wrapping the FM voice bank.
//!
//! The frame thread publishes a modulation snapshot once per display frame;
//! the audio callback copies it at most once per buffer (a `try_lock` miss
//! just keeps the previous copy, so the callback never blocks) and renders
//! the whole buffer from that one coherent snapshot.

use std::sync::{Arc, Mutex};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};

use crate::dynamics::Compressor;
use crate::modulation::ModulationSnapshot;
use crate::params::{CompressorParams, SynthParams};
use crate::synth::VoiceBank;

/// Audio system owning the output stream and the shared snapshot slot
pub struct AudioSystem {
    snapshot: Arc<Mutex<ModulationSnapshot>>,

    /// Audio output stream (kept alive)
    _stream: cpal::Stream,
}

impl AudioSystem {
    /// Open the default output device and start rendering
    pub fn new(synth_params: SynthParams, comp_params: CompressorParams) -> Result<Self, String> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or("No audio output device found")?;
        let device_name = device.name().unwrap_or_else(|_| "Unknown".to_string());

        let config = device
            .default_output_config()
            .map_err(|e| format!("Failed to get audio config: {}", e))?;
        let channels = config.channels() as usize;
        let sample_rate = config.sample_rate().0;

        println!("Audio: {} @ {}Hz", device_name, sample_rate);

        let snapshot = Arc::new(Mutex::new(ModulationSnapshot::default()));
        let shared = Arc::clone(&snapshot);

        // Synthesis state lives inside the callback closure: mutated in
        // place, never locked, never allocated
        let mut voice = VoiceBank::new(synth_params, sample_rate as f32);
        let mut comp_left = Compressor::new(comp_params);
        let mut comp_right = Compressor::new(comp_params);
        let mut current = ModulationSnapshot::default();

        let stream = device
            .build_output_stream(
                &config.into(),
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    if let Ok(guard) = shared.try_lock() {
                        current = *guard;
                    }
                    fill_buffer(
                        data,
                        channels,
                        &mut voice,
                        &mut comp_left,
                        &mut comp_right,
                        &current,
                    );
                },
                |err| eprintln!("Audio stream error: {}", err),
                None,
            )
            .map_err(|e| format!("Failed to build audio stream: {}", e))?;

        stream
            .play()
            .map_err(|e| format!("Failed to start audio stream: {}", e))?;

        Ok(Self {
            snapshot,
            _stream: stream,
        })
    }

    /// Publish this frame's modulation snapshot to the audio thread
    pub fn publish(&self, snapshot: ModulationSnapshot) {
        *self.snapshot.lock().unwrap() = snapshot;
    }
}

/// Fill an interleaved output buffer from one modulation snapshot.
///
/// Stereo goes to the first two channels; any extra channels get the L/R
/// mean. Mono devices get the left channel.
pub fn fill_buffer(
    output: &mut [f32],
    channels: usize,
    voice: &mut VoiceBank,
    comp_left: &mut Compressor,
    comp_right: &mut Compressor,
    snapshot: &ModulationSnapshot,
) {
    for frame in output.chunks_mut(channels) {
        let (left, right) = voice.render_frame(snapshot);
        let left = comp_left.process(left);
        let right = comp_right.process(right);

        frame[0] = left;
        if channels > 1 {
            frame[1] = right;
            for sample in &mut frame[2..] {
                *sample = 0.5 * (left + right);
            }
        }
    }
}
