//! Command-line argument parsing.

use clap::Parser;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "Orbitone")]
#[command(about = "Perlin-orbit FM drone with radial-beam visuals", long_about = None)]
pub struct Args {
    /// Fix the RNG drawing the four noise seeds (reproducible runs);
    /// omitted = fresh seeds every launch
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Run the visuals without opening an audio device
    #[arg(long)]
    pub mute: bool,
}
