use std::env;

use serde::{Deserialize, Serialize};

use self::bridge::BridgeConfig;
use self::resources::ResourcesConfig;
use self::storage::StorageConfig;
use self::translator::TranslatorConfig;

pub mod bridge;
pub mod resources;
pub mod storage;
pub mod translator;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub storage: StorageConfig,
    pub resources: ResourcesConfig,
    pub translator: TranslatorConfig,
    pub bridge: BridgeConfig,

    /// App main loop delta time
    pub delta_time: u64,
}

impl Config {
    pub fn new() -> Self {
        let delta_time = env::var("DELTA_TIME_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(100); // 100ms default

        Config {
            storage: StorageConfig::new(),
            resources: ResourcesConfig::new(),
            translator: TranslatorConfig::new(),
            bridge: BridgeConfig::new(),

            delta_time,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage: StorageConfig::default(),
            resources: ResourcesConfig::default(),
            translator: TranslatorConfig::default(),
            bridge: BridgeConfig::default(),
            delta_time: 100,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_profile_fills_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"translator":{"model":"gpt-test"}}"#).unwrap();
        assert_eq!(config.translator.model, "gpt-test");
        assert_eq!(config.translator.api_url, TranslatorConfig::default().api_url);
        assert_eq!(config.delta_time, 100);
        assert!(!config.bridge.listen_to_ws);
    }
}
