use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "birdscape")]
#[command(about = "Discover bird species near a location and generate a soundscape")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Resolve nearby species and request a generated soundscape
    Soundscape {
        /// Latitude of the selected location
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        /// Longitude of the selected location
        #[arg(long, allow_hyphen_values = true)]
        lng: f64,

        /// Search radius in kilometers
        #[arg(long, default_value = "25")]
        radius_km: f64,

        /// Soundscape length in seconds
        #[arg(long, default_value = "60")]
        duration: u32,

        /// Optional style hint for the audio model, e.g. "dawn chorus"
        #[arg(long)]
        style: Option<String>,

        /// Where to write the audio artifact when the model returns bytes
        #[arg(long, default_value = "./output/soundscape.mp3")]
        output: String,
    },

    /// List birding hotspots near a location, most active first
    Hotspots {
        /// Latitude of the selected location
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        /// Longitude of the selected location
        #[arg(long, allow_hyphen_values = true)]
        lng: f64,

        /// Search radius in kilometers
        #[arg(long, default_value = "25")]
        radius_km: f64,

        /// Days of observation history to include at the chosen hotspot
        #[arg(long, default_value = "30")]
        back: u32,
    },
}
