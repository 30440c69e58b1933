use thiserror::Error;

#[derive(Error, Debug)]
pub enum BirdscapeError {
    #[error("invalid location: latitude {lat}, longitude {lng}")]
    InvalidLocation { lat: f64, lng: f64 },

    #[error("invalid radius: {radius_km} km (must be > 0 and at most {max_km} km)")]
    InvalidRadius { radius_km: f64, max_km: f64 },

    #[error("invalid duration: {duration_secs}s (must be between 1 and {max_secs}s)")]
    InvalidDuration { duration_secs: u32, max_secs: u32 },

    #[error("invalid look-back window: {back_days} days (must be between 1 and {max_days})")]
    InvalidBackDays { back_days: u32, max_days: u32 },

    #[error("observation provider unavailable: {reason}")]
    ProviderUnavailable { status: Option<u16>, reason: String },

    #[error("provider request timed out after {timeout_secs}s")]
    ProviderTimeout { timeout_secs: u64 },

    #[error("provider returned an unexpected payload: {reason}")]
    InvalidProviderResponse { reason: String },

    #[error("species list is empty, nothing to build a soundscape from")]
    EmptySpeciesList,

    #[error("missing API key: set the {var} environment variable")]
    MissingApiKey { var: String },

    #[error("invalid configuration value for {field}: {value} ({reason})")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BirdscapeError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Provider,
    BusinessRule,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Guidance, not a failure. Process may still exit cleanly.
    Low,
    /// Bad user input, recoverable by re-prompting.
    Medium,
    /// Upstream or processing failure, worth a retry.
    High,
    /// Startup configuration failure, nothing can run.
    Critical,
}

impl BirdscapeError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidLocation { .. }
            | Self::InvalidRadius { .. }
            | Self::InvalidDuration { .. }
            | Self::InvalidBackDays { .. } => ErrorCategory::Validation,
            Self::ProviderUnavailable { .. }
            | Self::ProviderTimeout { .. }
            | Self::InvalidProviderResponse { .. }
            | Self::HttpError(_) => ErrorCategory::Provider,
            Self::EmptySpeciesList => ErrorCategory::BusinessRule,
            Self::MissingApiKey { .. } | Self::InvalidConfigValue { .. } => {
                ErrorCategory::Configuration
            }
            Self::SerializationError(_) | Self::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::BusinessRule => ErrorSeverity::Low,
            ErrorCategory::Validation => ErrorSeverity::Medium,
            ErrorCategory::Provider | ErrorCategory::System => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::Critical,
        }
    }

    /// Whether a retry could plausibly succeed: timeouts, transport
    /// failures and 5xx responses. Client errors (4xx) are not retried.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::ProviderTimeout { .. } => true,
            Self::ProviderUnavailable { status, .. } => match status {
                Some(code) => *code >= 500,
                None => true,
            },
            _ => false,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::InvalidLocation { lat, lng } => format!(
                "The location ({}, {}) is not on the map. Latitude must be between -90 and 90, longitude between -180 and 180.",
                lat, lng
            ),
            Self::InvalidRadius { radius_km, max_km } => format!(
                "A search radius of {} km is not usable. Pick a radius above 0 and up to {} km.",
                radius_km, max_km
            ),
            Self::InvalidDuration {
                duration_secs,
                max_secs,
            } => format!(
                "A duration of {} seconds is not usable. Pick a length between 1 and {} seconds.",
                duration_secs, max_secs
            ),
            Self::InvalidBackDays { back_days, max_days } => format!(
                "Cannot look back {} days. The provider accepts between 1 and {} days of history.",
                back_days, max_days
            ),
            Self::ProviderUnavailable { status, .. } => match status {
                Some(code) => format!(
                    "The bird observation service is not responding (HTTP {}). Please try again shortly.",
                    code
                ),
                None => "Could not reach the bird observation service. Check your network and try again.".to_string(),
            },
            Self::ProviderTimeout { timeout_secs } => format!(
                "The request took longer than {} seconds and was abandoned. Please try again.",
                timeout_secs
            ),
            Self::InvalidProviderResponse { .. } => {
                "The observation service answered in a format we did not expect. Please try again later.".to_string()
            }
            Self::EmptySpeciesList => {
                "No bird species were found for this area, so there is nothing to turn into a soundscape. Try a wider radius or a different spot.".to_string()
            }
            Self::MissingApiKey { var } => format!(
                "No observation API key is configured. Set the {} environment variable before starting.",
                var
            ),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Validation => "Adjust the inputs and run again",
            ErrorCategory::Provider => "Wait a moment and retry; the upstream service may recover",
            ErrorCategory::BusinessRule => "Try a wider radius or a more bird-rich location",
            ErrorCategory::Configuration => "Fix the configuration and restart",
            ErrorCategory::System => "Check disk space and file permissions",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transient_classification() {
        let timeout = BirdscapeError::ProviderTimeout { timeout_secs: 10 };
        assert!(timeout.is_transient());

        let server_error = BirdscapeError::ProviderUnavailable {
            status: Some(503),
            reason: "service unavailable".to_string(),
        };
        assert!(server_error.is_transient());

        let client_error = BirdscapeError::ProviderUnavailable {
            status: Some(404),
            reason: "not found".to_string(),
        };
        assert!(!client_error.is_transient());

        let bad_payload = BirdscapeError::InvalidProviderResponse {
            reason: "not an array".to_string(),
        };
        assert!(!bad_payload.is_transient());
    }

    #[test]
    fn per_request_input_errors_are_validation_class() {
        // Bad user input must re-prompt (exit 2), never read as a startup
        // configuration failure (exit 3).
        let duration = BirdscapeError::InvalidDuration {
            duration_secs: 500,
            max_secs: 300,
        };
        assert_eq!(duration.category(), ErrorCategory::Validation);
        assert_eq!(duration.severity(), ErrorSeverity::Medium);

        let back = BirdscapeError::InvalidBackDays {
            back_days: 31,
            max_days: 30,
        };
        assert_eq!(back.category(), ErrorCategory::Validation);
        assert_eq!(back.severity(), ErrorSeverity::Medium);
    }

    #[test]
    fn severity_maps_categories() {
        assert_eq!(
            BirdscapeError::EmptySpeciesList.severity(),
            ErrorSeverity::Low
        );
        assert_eq!(
            BirdscapeError::InvalidRadius {
                radius_km: -1.0,
                max_km: 50.0
            }
            .severity(),
            ErrorSeverity::Medium
        );
        assert_eq!(
            BirdscapeError::MissingApiKey {
                var: "EBIRD_API_KEY".to_string()
            }
            .severity(),
            ErrorSeverity::Critical
        );
    }
}
