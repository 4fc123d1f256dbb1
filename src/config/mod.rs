use anyhow::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub cache: CacheConfig,
    pub descriptions: DescriptionConfig,
}

/// Settings for the image cache worker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Name of the live cache bucket; changing it retires all other buckets
    /// on the next activation.
    pub cache_name: String,
    /// File extensions (without the dot) treated as image requests.
    pub image_extensions: Vec<String>,
    /// Hostname substrings treated as image CDNs regardless of extension.
    pub cdn_hosts: Vec<String>,
    /// Response policy for intercepted requests.
    pub policy: CachePolicy,
    /// Activate a newly installed worker without waiting for old instances.
    pub skip_waiting: bool,
}

/// Response policy for intercepted image requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CachePolicy {
    /// Serve from cache when present, otherwise fetch and store.
    CacheFirst,
    /// Serve a cached response immediately and refresh it in the background.
    StaleWhileRevalidate,
}

/// Settings for the description toggle component
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DescriptionConfig {
    /// Prefix of description container element ids.
    pub id_prefix: String,
    /// Class applied to an expanded container.
    pub expanded_class: String,
    /// Class applied to a collapsed container.
    pub collapsed_class: String,
    /// Class of the nested toggle control.
    pub toggle_button_class: String,
    /// Class marking scrollable description blocks.
    pub container_class: String,
    /// Class that hides a toggle button.
    pub hidden_class: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache: CacheConfig::default(),
            descriptions: DescriptionConfig::default(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            cache_name: "podcast-image-cache-v1".to_string(),
            image_extensions: ["jpg", "jpeg", "png", "gif", "webp"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            cdn_hosts: ["imgix.net", "simplecastcdn.com", "npr.org"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            policy: CachePolicy::CacheFirst,
            skip_waiting: true,
        }
    }
}

impl Default for DescriptionConfig {
    fn default() -> Self {
        Self {
            id_prefix: "desc-".to_string(),
            expanded_class: "desc-expanded".to_string(),
            collapsed_class: "desc-collapsed".to_string(),
            toggle_button_class: "toggle-desc-btn".to_string(),
            container_class: "episode-description-container".to_string(),
            hidden_class: "hidden".to_string(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_file =
            std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".to_string());

        if std::path::Path::new(&config_file).exists() {
            let contents = std::fs::read_to_string(&config_file)?;
            Ok(toml::from_str(&contents)?)
        } else {
            let default_config = Self::default();
            let contents = toml::to_string_pretty(&default_config)?;
            std::fs::write(&config_file, contents)?;
            Ok(default_config)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_contract() {
        let config = Config::default();
        assert_eq!(config.cache.cache_name, "podcast-image-cache-v1");
        assert_eq!(config.cache.policy, CachePolicy::CacheFirst);
        assert!(config.cache.skip_waiting);
        assert_eq!(config.descriptions.expanded_class, "desc-expanded");
        assert_eq!(config.descriptions.collapsed_class, "desc-collapsed");
    }

    #[test]
    fn test_toml_round_trip() {
        let config = Config::default();
        let contents = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&contents).unwrap();
        assert_eq!(parsed.cache.cache_name, config.cache.cache_name);
        assert_eq!(parsed.cache.cdn_hosts, config.cache.cdn_hosts);
        assert_eq!(parsed.descriptions.id_prefix, config.descriptions.id_prefix);
    }

    #[test]
    fn test_policy_kebab_case() {
        let toml_str = r#"
            cache_name = "podcast-image-cache-v1"
            image_extensions = ["jpg"]
            cdn_hosts = []
            policy = "stale-while-revalidate"
            skip_waiting = false
        "#;
        let cache: CacheConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(cache.policy, CachePolicy::StaleWhileRevalidate);
    }
}
