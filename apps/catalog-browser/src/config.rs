//! Configuration for the catalog browser

use core_config::catalog::CatalogConfig;
use core_config::{ConfigError, FromEnv};
use domain_products::{BundledProductProvider, LookupPolicy};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub use core_config::Environment;

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub environment: Environment,
    pub catalog: CatalogConfig,
    lookup_policy: LookupPolicy,
}

/// Command line values that take precedence over the environment
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub fixture: Option<PathBuf>,
    pub latency_ms: Option<u64>,
    pub strict: bool,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let catalog = CatalogConfig::from_env()?;
        let lookup_policy = parse_lookup_policy(catalog.lookup_policy.as_deref())?;

        Ok(Self {
            environment: Environment::from_env(),
            catalog,
            lookup_policy,
        })
    }

    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        if let Some(path) = overrides.fixture {
            self.catalog = self.catalog.with_fixture_path(path);
        }
        if let Some(ms) = overrides.latency_ms {
            self.catalog = self.catalog.with_latency(Duration::from_millis(ms));
        }
        if overrides.strict {
            self.lookup_policy = LookupPolicy::Strict;
            self.catalog = self.catalog.with_lookup_policy(LookupPolicy::Strict.to_string());
        }
        self
    }

    pub fn lookup_policy(&self) -> LookupPolicy {
        self.lookup_policy
    }

    pub fn provider(&self) -> BundledProductProvider {
        let provider = BundledProductProvider::new().with_latency(self.catalog.latency);
        match &self.catalog.fixture_path {
            Some(path) => provider.with_fixture_path(path.clone()),
            None => provider,
        }
    }
}

/// Parse `CATALOG_LOOKUP_POLICY` with the policy's own names; unset means default
fn parse_lookup_policy(raw: Option<&str>) -> Result<LookupPolicy, ConfigError> {
    match raw {
        None => Ok(LookupPolicy::default()),
        Some(name) => LookupPolicy::from_str(name).map_err(|e| ConfigError::ParseError {
            key: "CATALOG_LOOKUP_POLICY".to_string(),
            details: format!("unknown lookup policy '{}': {}", name, e),
        }),
    }
}
