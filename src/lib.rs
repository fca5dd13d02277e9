//! Orbitone library - perlin-orbit FM drone with radial-beam visuals

pub mod audio;
pub mod cli;
pub mod dynamics;
pub mod modulation;
pub mod noise;
pub mod orbit;
pub mod params;
pub mod radial;
pub mod rendering;
pub mod synth;
