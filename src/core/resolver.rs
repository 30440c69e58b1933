use std::collections::HashSet;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::core::http;
use crate::domain::model::{GeoWindow, Species, SpeciesList};
use crate::domain::ports::{ConfigProvider, ObservationProvider};
use crate::utils::error::{BirdscapeError, Result};

/// Shape of one observation record as the provider returns it.
/// `comName` and `sciName` are required; anything missing them is an
/// invalid response.
#[derive(Debug, Deserialize)]
pub(crate) struct RawObservation {
    #[serde(rename = "comName")]
    pub com_name: String,
    #[serde(rename = "sciName")]
    pub sci_name: String,
    #[serde(rename = "speciesCode")]
    pub species_code: Option<String>,
}

/// Fetches and normalizes the species observed within a window.
///
/// Stateless between calls: results for an equal window may differ over
/// time as upstream data changes, but nothing is cached or mutated here.
pub struct SpeciesResolver<C: ConfigProvider> {
    config: C,
    client: Client,
}

impl<C: ConfigProvider> SpeciesResolver<C> {
    pub fn new(config: C) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    fn observations_url(&self) -> String {
        format!(
            "{}/data/obs/geo/recent",
            self.config.api_base().trim_end_matches('/')
        )
    }
}

#[async_trait]
impl<C: ConfigProvider> ObservationProvider for SpeciesResolver<C> {
    async fn resolve(&self, window: &GeoWindow) -> Result<SpeciesList> {
        let query = [
            ("lat", format!("{:.2}", window.center().lat())),
            ("lng", format!("{:.2}", window.center().lng())),
            ("dist", format!("{}", window.radius_km())),
        ];

        tracing::debug!(
            "resolving species within {} km of ({}, {})",
            window.radius_km(),
            window.center().lat(),
            window.center().lng()
        );

        let body = http::get_body_with_retry(
            &self.client,
            &self.observations_url(),
            self.config.api_key(),
            self.config.lookup_timeout(),
            &query,
            self.config.max_retries(),
        )
        .await?;

        let raw: Vec<RawObservation> =
            serde_json::from_str(&body).map_err(|e| BirdscapeError::InvalidProviderResponse {
                reason: e.to_string(),
            })?;

        let list = normalize_observations(raw)?;
        tracing::info!("resolved {} species", list.len());
        Ok(list)
    }
}

/// Turns raw observation records into the canonical species list: names
/// trimmed, duplicates collapsed case-insensitively by identity keeping
/// the first-seen record, then sorted alphabetically by common name so
/// two calls over the same data produce the same order.
pub(crate) fn normalize_observations(raw: Vec<RawObservation>) -> Result<SpeciesList> {
    let mut seen = HashSet::new();
    let mut species = Vec::new();

    for obs in raw {
        let common_name = obs.com_name.trim().to_string();
        let scientific_name = obs.sci_name.trim().to_string();
        if common_name.is_empty() || scientific_name.is_empty() {
            return Err(BirdscapeError::InvalidProviderResponse {
                reason: "observation record with empty species name".to_string(),
            });
        }

        let code = obs
            .species_code
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(String::from);

        let candidate = Species {
            common_name,
            scientific_name,
            code,
        };
        if seen.insert(candidate.identity()) {
            species.push(candidate);
        }
    }

    species.sort_by(|a, b| {
        a.common_name
            .to_lowercase()
            .cmp(&b.common_name.to_lowercase())
    });
    Ok(SpeciesList::new(species))
}
