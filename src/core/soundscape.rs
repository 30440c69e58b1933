use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::core::http;
use crate::domain::model::{SoundscapeArtifact, SoundscapeRequest, SpeciesList};
use crate::domain::ports::{ConfigProvider, SoundscapeGenerator};
use crate::utils::error::{BirdscapeError, Result};

pub const DEFAULT_DURATION_SECS: u32 = 60;
pub const MAX_DURATION_SECS: u32 = 300;

/// Optional knobs for the generated soundscape.
#[derive(Debug, Clone)]
pub struct SoundscapeParams {
    pub duration_secs: u32,
    pub style: Option<String>,
}

impl Default for SoundscapeParams {
    fn default() -> Self {
        Self {
            duration_secs: DEFAULT_DURATION_SECS,
            style: None,
        }
    }
}

/// Shapes a species list into the payload the audio model expects.
/// Pass-through adapter; the only rule of its own is that an empty
/// species list is rejected.
pub struct SoundscapeRequestBuilder;

impl SoundscapeRequestBuilder {
    pub fn build(species: &SpeciesList, params: &SoundscapeParams) -> Result<SoundscapeRequest> {
        if species.is_empty() {
            return Err(BirdscapeError::EmptySpeciesList);
        }
        if params.duration_secs == 0 || params.duration_secs > MAX_DURATION_SECS {
            return Err(BirdscapeError::InvalidDuration {
                duration_secs: params.duration_secs,
                max_secs: MAX_DURATION_SECS,
            });
        }

        let names: Vec<String> = species
            .iter()
            .map(|s| s.common_name.clone())
            .collect();

        let mut prompt = format!(
            "A natural ambient soundscape featuring the calls of {}",
            names.join(", ")
        );
        if let Some(style) = &params.style {
            prompt.push_str(&format!(", in a {} style", style));
        }

        Ok(SoundscapeRequest {
            prompt,
            species: names,
            duration_secs: params.duration_secs,
            style: params.style.clone(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct GeneratedUrl {
    url: String,
}

/// HTTP client for the external audio-generation service: POSTs the
/// request payload and hands back either audio bytes or a URL to fetch
/// the artifact from, depending on the response content type.
pub struct HttpSoundscapeGenerator<C: ConfigProvider> {
    config: C,
    client: Client,
}

impl<C: ConfigProvider> HttpSoundscapeGenerator<C> {
    pub fn new(config: C) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }
}

#[async_trait]
impl<C: ConfigProvider> SoundscapeGenerator for HttpSoundscapeGenerator<C> {
    async fn generate(&self, request: &SoundscapeRequest) -> Result<SoundscapeArtifact> {
        let timeout = self.config.generation_timeout();
        tracing::debug!(
            "requesting {}s soundscape for {} species",
            request.duration_secs,
            request.species.len()
        );

        let response = self
            .client
            .post(self.config.audio_endpoint())
            .json(request)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| http::map_transport_error(e, timeout))?;

        let status = response.status();
        if !status.is_success() {
            return Err(BirdscapeError::ProviderUnavailable {
                status: Some(status.as_u16()),
                reason: status
                    .canonical_reason()
                    .unwrap_or("generation request failed")
                    .to_string(),
            });
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("application/octet-stream")
            .to_string();

        if content_type.starts_with("application/json") {
            let body = response
                .text()
                .await
                .map_err(|e| http::map_transport_error(e, timeout))?;
            let generated: GeneratedUrl = serde_json::from_str(&body).map_err(|e| {
                BirdscapeError::InvalidProviderResponse {
                    reason: format!("generation response missing url: {}", e),
                }
            })?;
            Ok(SoundscapeArtifact::Url(generated.url))
        } else {
            let bytes = response
                .bytes()
                .await
                .map_err(|e| http::map_transport_error(e, timeout))?;
            Ok(SoundscapeArtifact::Audio {
                bytes: bytes.to_vec(),
                content_type,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Species;

    fn list(names: &[(&str, &str)]) -> SpeciesList {
        SpeciesList::new(
            names
                .iter()
                .map(|(com, code)| Species {
                    common_name: com.to_string(),
                    scientific_name: format!("{} sci", com),
                    code: Some(code.to_string()),
                })
                .collect(),
        )
    }

    #[test]
    fn rejects_empty_species_list() {
        let err =
            SoundscapeRequestBuilder::build(&SpeciesList::default(), &SoundscapeParams::default())
                .unwrap_err();
        assert!(matches!(err, BirdscapeError::EmptySpeciesList));
    }

    #[test]
    fn payload_references_every_species_once() {
        let species = list(&[("Northern Cardinal", "norcar"), ("Blue Jay", "blujay")]);
        let request =
            SoundscapeRequestBuilder::build(&species, &SoundscapeParams::default()).unwrap();

        assert_eq!(request.species, vec!["Northern Cardinal", "Blue Jay"]);
        assert_eq!(request.prompt.matches("Northern Cardinal").count(), 1);
        assert_eq!(request.prompt.matches("Blue Jay").count(), 1);
        assert_eq!(request.duration_secs, DEFAULT_DURATION_SECS);
    }

    #[test]
    fn style_flows_into_prompt_and_payload() {
        let species = list(&[("Wood Thrush", "woothr")]);
        let params = SoundscapeParams {
            duration_secs: 120,
            style: Some("dawn chorus".to_string()),
        };
        let request = SoundscapeRequestBuilder::build(&species, &params).unwrap();
        assert!(request.prompt.contains("dawn chorus"));
        assert_eq!(request.style.as_deref(), Some("dawn chorus"));
        assert_eq!(request.duration_secs, 120);
    }

    #[test]
    fn rejects_out_of_range_duration_as_user_input() {
        use crate::utils::error::{ErrorCategory, ErrorSeverity};

        let species = list(&[("Wood Thrush", "woothr")]);
        for duration in [0, MAX_DURATION_SECS + 1] {
            let params = SoundscapeParams {
                duration_secs: duration,
                style: None,
            };
            let err = SoundscapeRequestBuilder::build(&species, &params).unwrap_err();
            assert!(matches!(err, BirdscapeError::InvalidDuration { .. }));
            assert_eq!(err.category(), ErrorCategory::Validation);
            assert_eq!(err.severity(), ErrorSeverity::Medium);
        }
    }
}
