mod he_config;
mod lsh_config;
mod observability_config;
mod orchestrator_config;
mod storage_config;
mod store_config;

pub use he_config::HeConfig;
pub use lsh_config::LshConfig;
pub use observability_config::ObservabilityConfig;
pub use orchestrator_config::OrchestratorConfig;
pub use storage_config::StorageConfig;
pub use store_config::StoreConfig;

use serde::{Deserialize, Serialize};

/// Top-level engine configuration, assembled from one `#[serde(default)]`
/// section per component. Missing sections and missing fields within a
/// present section fall back to their defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SsConfig {
    pub he: HeConfig,
    pub lsh: LshConfig,
    pub store: StoreConfig,
    pub storage: StorageConfig,
    pub orchestrator: OrchestratorConfig,
    pub observability: ObservabilityConfig,
}

impl SsConfig {
    /// Parse configuration from a TOML document, falling back to defaults
    /// for any section or field the document omits.
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }
}
