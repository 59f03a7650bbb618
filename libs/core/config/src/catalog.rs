use crate::{env_parse_or, ConfigError, FromEnv};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Settings for the bundled catalog provider
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CatalogConfig {
    /// JSON fixture to serve instead of the embedded one
    pub fixture_path: Option<PathBuf>,
    /// Artificial delay applied to every provider request
    pub latency: Duration,
    /// Lookup policy name as given; the domain crate owns its vocabulary
    pub lookup_policy: Option<String>,
}

impl CatalogConfig {
    pub fn with_fixture_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.fixture_path = Some(path.into());
        self
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn with_lookup_policy(mut self, policy: impl Into<String>) -> Self {
        self.lookup_policy = Some(policy.into());
        self
    }
}

fn non_blank(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

impl FromEnv for CatalogConfig {
    /// Reads:
    /// - CATALOG_FIXTURE_PATH: optional, embedded fixture when unset or blank
    /// - CATALOG_LATENCY_MS: defaults to 0
    /// - CATALOG_LOOKUP_POLICY: optional, kept verbatim for the caller to parse
    fn from_env() -> Result<Self, ConfigError> {
        let latency_ms: u64 = env_parse_or("CATALOG_LATENCY_MS", 0)?;

        Ok(Self {
            fixture_path: non_blank("CATALOG_FIXTURE_PATH").map(PathBuf::from),
            latency: Duration::from_millis(latency_ms),
            lookup_policy: non_blank("CATALOG_LOOKUP_POLICY"),
        })
    }
}
