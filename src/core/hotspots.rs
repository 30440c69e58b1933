use reqwest::Client;

use crate::core::http;
use crate::core::resolver::{normalize_observations, RawObservation};
use crate::domain::model::{GeoWindow, Hotspot, SpeciesList};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{BirdscapeError, Result};

/// How many days back a hotspot species query may look. Provider limit.
pub const MAX_BACK_DAYS: u32 = 30;

/// Queries the provider's hotspot reference endpoints: nearby hotspots
/// for a window, and the recent species list at a specific hotspot.
pub struct HotspotExplorer<C: ConfigProvider> {
    config: C,
    client: Client,
}

impl<C: ConfigProvider> HotspotExplorer<C> {
    pub fn new(config: C) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.api_base().trim_end_matches('/'), path)
    }

    pub async fn nearby(&self, window: &GeoWindow) -> Result<Vec<Hotspot>> {
        let query = [
            ("lat", format!("{:.2}", window.center().lat())),
            ("lng", format!("{:.2}", window.center().lng())),
            ("dist", format!("{}", window.radius_km())),
            ("fmt", "json".to_string()),
        ];

        let body = http::get_body_with_retry(
            &self.client,
            &self.url("ref/hotspot/geo"),
            self.config.api_key(),
            self.config.lookup_timeout(),
            &query,
            self.config.max_retries(),
        )
        .await?;

        let hotspots: Vec<Hotspot> =
            serde_json::from_str(&body).map_err(|e| BirdscapeError::InvalidProviderResponse {
                reason: e.to_string(),
            })?;
        tracing::info!("found {} hotspots", hotspots.len());
        Ok(hotspots)
    }

    /// Species observed at one hotspot over the last `back_days` days,
    /// normalized through the same pipeline as the window resolver.
    pub async fn species_at(&self, loc_id: &str, back_days: u32) -> Result<SpeciesList> {
        if !(1..=MAX_BACK_DAYS).contains(&back_days) {
            return Err(BirdscapeError::InvalidBackDays {
                back_days,
                max_days: MAX_BACK_DAYS,
            });
        }

        let query = [
            ("back", back_days.to_string()),
            ("fmt", "json".to_string()),
        ];

        let body = http::get_body_with_retry(
            &self.client,
            &self.url(&format!("data/obs/{}/recent", loc_id)),
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
        normalize_observations(raw)
    }
}
