//! CLI configuration.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use rocket_cache::DEFAULT_CART_SLOT;
use rocket_data::{FetchPolicy, LookupMode, RetryPolicy, TimeoutConfig};
use rocket_store::{RemovePolicy, StoreConfig};
use serde::{Deserialize, Serialize};

/// File names searched for when no `--config` is given.
pub const CONFIG_NAMES: [&str; 3] = ["rocket-cart.toml", ".rocket-cart.toml", "rocket-cart.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Storefront API settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Persistence settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Cart behaviour.
    #[serde(default)]
    pub cart: CartConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if is_json(path) {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// Request policy for catalog calls.
    pub fn fetch_policy(&self) -> FetchPolicy {
        FetchPolicy::new(
            TimeoutConfig::from_total(Duration::from_millis(self.api.timeout_ms)),
            RetryPolicy::new(self.api.max_retries),
        )
    }

    /// Settings for the cart store.
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig::default()
            .with_slot(self.storage.slot.clone())
            .with_missing_remove(self.cart.missing_remove)
    }

    /// Check the config, returning `(errors, warnings)`.
    pub fn validate(&self) -> (Vec<String>, Vec<String>) {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        if !(self.api.base_url.starts_with("http://") || self.api.base_url.starts_with("https://")) {
            errors.push(format!(
                "api.base_url must start with http:// or https:// (got '{}')",
                self.api.base_url
            ));
        }
        if self.api.timeout_ms == 0 {
            errors.push("api.timeout_ms must be greater than 0".to_string());
        }
        if self.api.max_retries > 5 {
            warnings.push(format!(
                "api.max_retries = {} will make failures slow to surface",
                self.api.max_retries
            ));
        }
        if self.storage.slot.trim().is_empty() {
            errors.push("storage.slot must not be empty".to_string());
        }
        if self.storage.dir.trim().is_empty() {
            errors.push("storage.dir must not be empty".to_string());
        }

        (errors, warnings)
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

/// Storefront API settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL serving `/stock` and `/products`.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-id or bulk endpoints.
    #[serde(default)]
    pub lookup: LookupMode,

    /// Total request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Retries after a transport failure.
    #[serde(default)]
    pub max_retries: u32,
}

fn default_base_url() -> String {
    "http://localhost:3333".to_string()
}

fn default_timeout_ms() -> u64 {
    5000
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            lookup: LookupMode::default(),
            timeout_ms: default_timeout_ms(),
            max_retries: 0,
        }
    }
}

/// Persistence settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory of the file store, relative to the working directory.
    #[serde(default = "default_dir")]
    pub dir: String,

    /// Key of the cart slot.
    #[serde(default = "default_slot")]
    pub slot: String,
}

fn default_dir() -> String {
    ".rocket-cart".to_string()
}

fn default_slot() -> String {
    DEFAULT_CART_SLOT.to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: default_dir(),
            slot: default_slot(),
        }
    }
}

/// Cart behaviour.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CartConfig {
    /// What removing a product that is not in the cart does.
    #[serde(default)]
    pub missing_remove: RemovePolicy,
}

/// Generate a default rocket-cart.toml config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# RocketCart configuration

[api]
base_url = "{base_url}"
# "per_id" uses /stock/{{id}} and /products/{{id}}; "bulk" uses /stock and /products
lookup = "per_id"
timeout_ms = {timeout_ms}
max_retries = 0

[storage]
dir = "{dir}"
slot = "{slot}"

[cart]
# "reject" reports an error when removing a product that is not in the cart
missing_remove = "reject"
"#,
        base_url = default_base_url(),
        timeout_ms = default_timeout_ms(),
        dir = default_dir(),
        slot = DEFAULT_CART_SLOT,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_config_parses_to_default() {
        let config: CliConfig = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn test_partial_config() {
        let config: CliConfig = toml::from_str(
            r#"
            [api]
            lookup = "bulk"

            [cart]
            missing_remove = "ignore"
            "#,
        )
        .unwrap();

        assert_eq!(config.api.lookup, LookupMode::Bulk);
        assert_eq!(config.api.base_url, "http://localhost:3333");
        assert_eq!(config.storage.slot, DEFAULT_CART_SLOT);
        assert_eq!(config.store_config().missing_remove, RemovePolicy::Ignore);
    }

    #[test]
    fn test_fetch_policy() {
        let mut config = CliConfig::default();
        config.api.timeout_ms = 2000;
        config.api.max_retries = 2;

        let policy = config.fetch_policy();
        assert_eq!(policy.timeout.total, Duration::from_secs(2));
        assert_eq!(policy.retry.max_attempts, 2);
    }

    #[test]
    fn test_validate() {
        let mut config = CliConfig::default();
        assert_eq!(config.validate(), (vec![], vec![]));

        config.api.base_url = "localhost".to_string();
        config.api.max_retries = 9;
        config.storage.slot = " ".to_string();
        let (errors, warnings) = config.validate();
        assert_eq!(errors.len(), 2);
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_save_and_load_json() {
        let path = std::env::temp_dir().join(format!("rocket-cart-{}.json", std::process::id()));
        let mut config = CliConfig::default();
        config.storage.dir = "/var/lib/rocket-cart".to_string();

        config.save(&path).unwrap();
        assert_eq!(CliConfig::load(&path).unwrap(), config);

        let _ = std::fs::remove_file(&path);
    }
}
