//! Client configuration.

/// Default Resource Service base URL for local development.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

/// Environment variable overriding the base URL.
pub const BASE_URL_ENV: &str = "SHOWROOM_API_URL";

/// Configuration for [`crate::ShowroomClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the Resource Service, without a trailing slash.
    pub base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl ClientConfig {
    /// Build a configuration from the environment, falling back to the
    /// default base URL when the variable is unset or empty.
    #[must_use]
    pub fn from_env() -> Self {
        let base_url = std::env::var(BASE_URL_ENV)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Self {
            base_url: normalize_base_url(&base_url),
        }
    }

    /// Override the base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = normalize_base_url(&base_url.into());
        self
    }
}

/// Strip trailing slashes so path joins stay single-slashed.
fn normalize_base_url(base_url: &str) -> String {
    base_url.trim().trim_end_matches('/').to_string()
}
