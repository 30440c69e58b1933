use crate::core::soundscape::{SoundscapeParams, SoundscapeRequestBuilder};
use crate::domain::model::{GeoWindow, SoundscapeArtifact, SpeciesList};
use crate::domain::ports::{ObservationProvider, SoundscapeGenerator};
use crate::utils::error::Result;

#[derive(Debug)]
pub struct SessionOutcome {
    pub species: SpeciesList,
    pub artifact: SoundscapeArtifact,
}

/// Runs one user action end to end: resolve the species for a window,
/// shape the request, call the generator. Errors propagate to the caller
/// for presentation; nothing here retries or swallows them.
pub struct SoundscapeSession<P: ObservationProvider, G: SoundscapeGenerator> {
    provider: P,
    generator: G,
}

impl<P: ObservationProvider, G: SoundscapeGenerator> SoundscapeSession<P, G> {
    pub fn new(provider: P, generator: G) -> Self {
        Self { provider, generator }
    }

    pub async fn run(
        &self,
        window: &GeoWindow,
        params: &SoundscapeParams,
    ) -> Result<SessionOutcome> {
        tracing::info!(
            "resolving species within {} km of ({}, {})",
            window.radius_km(),
            window.center().lat(),
            window.center().lng()
        );
        let species = self.provider.resolve(window).await?;
        for s in &species {
            tracing::debug!("  {} ({})", s.common_name, s.scientific_name);
        }

        let request = SoundscapeRequestBuilder::build(&species, params)?;
        tracing::info!(
            "requesting {}s soundscape for {} species",
            request.duration_secs,
            species.len()
        );
        let artifact = self.generator.generate(&request).await?;

        Ok(SessionOutcome { species, artifact })
    }
}
