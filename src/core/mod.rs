pub(crate) mod http;
pub mod hotspots;
pub mod resolver;
pub mod session;
pub mod soundscape;

pub use crate::domain::model::{
    GeoWindow, Hotspot, Location, SoundscapeArtifact, SoundscapeRequest, Species, SpeciesList,
};
pub use crate::domain::ports::{ConfigProvider, ObservationProvider, SoundscapeGenerator};
pub use crate::utils::error::Result;
