use serde::{Deserialize, Serialize};

use crate::utils::error::{BirdscapeError, Result};

/// Maximum query radius accepted by the observation provider's
/// nearby-observation endpoints, in kilometers.
pub const MAX_RADIUS_KM: f64 = 50.0;

/// A validated geographic point. Immutable once constructed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    lat: f64,
    lng: f64,
}

impl Location {
    pub fn new(lat: f64, lng: f64) -> Result<Self> {
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
            return Err(BirdscapeError::InvalidLocation { lat, lng });
        }
        Ok(Self { lat, lng })
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lng(&self) -> f64 {
        self.lng
    }
}

/// The bounded query region derived from a point and radius. Derived per
/// request, never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoWindow {
    center: Location,
    radius_km: f64,
}

impl GeoWindow {
    /// Validates coordinates and radius and produces the query window.
    /// Pure computation, no I/O.
    pub fn build(lat: f64, lng: f64, radius_km: f64) -> Result<Self> {
        let center = Location::new(lat, lng)?;
        if radius_km <= 0.0 || radius_km > MAX_RADIUS_KM {
            return Err(BirdscapeError::InvalidRadius {
                radius_km,
                max_km: MAX_RADIUS_KM,
            });
        }
        Ok(Self { center, radius_km })
    }

    pub fn center(&self) -> Location {
        self.center
    }

    pub fn radius_km(&self) -> f64 {
        self.radius_km
    }
}

/// A single bird species as reported by the observation provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Species {
    pub common_name: String,
    pub scientific_name: String,
    /// Provider-specific species code, e.g. eBird's "norcar".
    pub code: Option<String>,
}

impl Species {
    /// Deduplication key: the provider code when present, otherwise the
    /// case-folded common name.
    pub fn identity(&self) -> String {
        match &self.code {
            Some(code) if !code.trim().is_empty() => code.trim().to_lowercase(),
            _ => self.common_name.trim().to_lowercase(),
        }
    }
}

/// Ordered, duplicate-free list of species resolved for one window query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpeciesList {
    species: Vec<Species>,
}

impl SpeciesList {
    pub fn new(species: Vec<Species>) -> Self {
        Self { species }
    }

    pub fn len(&self) -> usize {
        self.species.len()
    }

    pub fn is_empty(&self) -> bool {
        self.species.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Species> {
        self.species.iter()
    }

    pub fn common_names(&self) -> Vec<&str> {
        self.species.iter().map(|s| s.common_name.as_str()).collect()
    }
}

impl From<Vec<Species>> for SpeciesList {
    fn from(species: Vec<Species>) -> Self {
        Self::new(species)
    }
}

impl<'a> IntoIterator for &'a SpeciesList {
    type Item = &'a Species;
    type IntoIter = std::slice::Iter<'a, Species>;

    fn into_iter(self) -> Self::IntoIter {
        self.species.iter()
    }
}

/// Payload shaped for the external soundscape generation model.
/// Built per request, never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct SoundscapeRequest {
    pub prompt: String,
    pub species: Vec<String>,
    pub duration_secs: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
}

/// What the soundscape model hands back: either the audio itself or a
/// link to fetch it from.
#[derive(Debug, Clone)]
pub enum SoundscapeArtifact {
    Audio { bytes: Vec<u8>, content_type: String },
    Url(String),
}

/// A birding hotspot near the query window, from the provider's hotspot
/// reference endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct Hotspot {
    #[serde(rename = "locId")]
    pub loc_id: String,
    #[serde(rename = "locName")]
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    #[serde(rename = "countryCode")]
    pub country_code: Option<String>,
    #[serde(rename = "subnational1Code")]
    pub region_code: Option<String>,
    #[serde(rename = "numSpeciesAllTime")]
    pub num_species_all_time: Option<u32>,
}

/// The hotspot with the largest all-time species count, if any reports one.
pub fn most_active(hotspots: &[Hotspot]) -> Option<&Hotspot> {
    hotspots
        .iter()
        .filter(|h| h.num_species_all_time.is_some())
        .max_by_key(|h| h.num_species_all_time)
}
