use std::time::Duration;

use async_trait::async_trait;

use crate::domain::model::{GeoWindow, SoundscapeArtifact, SoundscapeRequest, SpeciesList};
use crate::utils::error::Result;

/// Resolves the species observed within a query window. Implementations
/// must not hold mutable state across calls; each resolve is independent.
#[async_trait]
pub trait ObservationProvider: Send + Sync {
    async fn resolve(&self, window: &GeoWindow) -> Result<SpeciesList>;
}

/// Turns a shaped soundscape request into an audio artifact.
#[async_trait]
pub trait SoundscapeGenerator: Send + Sync {
    async fn generate(&self, request: &SoundscapeRequest) -> Result<SoundscapeArtifact>;
}

/// Read-only view of the startup configuration, constructed once and
/// handed to components. No ambient lookup inside the core.
pub trait ConfigProvider: Send + Sync {
    fn api_base(&self) -> &str;
    fn api_key(&self) -> &str;
    fn audio_endpoint(&self) -> &str;
    fn lookup_timeout(&self) -> Duration;
    fn generation_timeout(&self) -> Duration;
    fn max_retries(&self) -> u32;
}
