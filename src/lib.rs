pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::{cli::Cli, AppConfig};
pub use core::hotspots::HotspotExplorer;
pub use core::resolver::SpeciesResolver;
pub use core::session::{SessionOutcome, SoundscapeSession};
pub use core::soundscape::{HttpSoundscapeGenerator, SoundscapeParams, SoundscapeRequestBuilder};
pub use domain::model::{
    most_active, GeoWindow, Hotspot, Location, SoundscapeArtifact, SoundscapeRequest, Species,
    SpeciesList, MAX_RADIUS_KM,
};
pub use domain::ports::{ConfigProvider, ObservationProvider, SoundscapeGenerator};
pub use utils::error::{BirdscapeError, Result};
