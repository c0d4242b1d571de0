//! CLI configuration management

use erc_rpc::ClientConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::CliError;

/// CLI configuration
///
/// The client settings sit at the top level of the file, so `rpc_url` and
/// `network` are plain keys and `[retry]`/`[codec]` are tables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Settings for the RPC client
    #[serde(flatten)]
    pub client: ClientConfig,
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".erc-tools"))
    }

    /// Get the default config file path
    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|d| d.join("config.toml"))
    }

    /// Load config from `path` (or the default location), falling back to
    /// defaults when the file is missing or unreadable
    pub fn load(path: Option<&Path>) -> Self {
        let path = match path.map(Path::to_path_buf).or_else(Self::config_path) {
            Some(path) => path,
            None => return Self::default(),
        };
        if !path.exists() {
            return Self::default();
        }
        Self::load_from(&path).unwrap_or_else(|e| {
            warn!(path = %path.display(), error = %e, "ignoring unreadable config");
            Self::default()
        })
    }

    /// Load config from a specific file
    pub fn load_from(path: &Path) -> Result<Self, CliError> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::Config(e.to_string()))
    }

    /// Save config to `path` (or the default location)
    pub fn save(&self, path: Option<&Path>) -> Result<PathBuf, CliError> {
        let path = path
            .map(Path::to_path_buf)
            .or_else(Self::config_path)
            .ok_or_else(|| CliError::Config("Cannot determine config path".to_string()))?;

        // Create parent directory if needed
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| CliError::Config(e.to_string()))?;
        std::fs::write(&path, content)?;
        Ok(path)
    }

    /// Settings for building an RPC client
    pub fn client_config(&self) -> &ClientConfig {
        &self.client
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use erc_abi::{AddressPolicy, BoundsPolicy, CodecConfig};
    use erc_rpc::{Network, RetryPolicy, DEFAULT_RPC_URL};

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.client.rpc_url, DEFAULT_RPC_URL);
        assert_eq!(config.client.network, Network::Mainnet);
        assert_eq!(config.client.codec, CodecConfig::default());
    }

    #[test]
    fn test_config_default_matches_client_default() {
        assert_eq!(Config::default().client_config(), &ClientConfig::default());

        let empty: Config = toml::from_str("").unwrap();
        assert_eq!(empty.client_config(), &ClientConfig::default());
    }

    #[test]
    fn test_config_serialize() {
        let toml = toml::to_string(&Config::default()).unwrap();
        assert!(toml.contains("rpc_url = \"http://localhost:8545\""));
        assert!(toml.contains("network = \"mainnet\""));
        assert!(toml.contains("[codec]"));
        assert!(!toml.contains("[client]"));
    }

    #[test]
    fn test_config_deserialize() {
        let toml = r#"
            rpc_url = "http://example.com:8545"
            network = "rinkeby"

            [codec]
            bounds = "clamp"
            addresses = "permissive"
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.client.rpc_url, "http://example.com:8545");
        assert_eq!(config.client.network, Network::Rinkeby);
        assert_eq!(config.client.codec.bounds, BoundsPolicy::Clamp);
        assert_eq!(config.client.codec.addresses, AddressPolicy::Permissive);
        assert_eq!(config.client.retry, RetryPolicy::default());
    }

    #[test]
    fn test_config_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config {
            client: ClientConfig {
                network: Network::Ropsten,
                ..ClientConfig::new("http://node:8545")
            },
        };
        assert_eq!(config.save(Some(&path)).unwrap(), path);
        assert_eq!(Config::load(Some(&path)), config);
    }

    #[test]
    fn test_config_load_missing_or_broken_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        assert_eq!(Config::load(Some(&missing)), Config::default());

        let broken = dir.path().join("broken.toml");
        std::fs::write(&broken, "rpc_url = [").unwrap();
        assert!(Config::load_from(&broken).is_err());
        assert_eq!(Config::load(Some(&broken)), Config::default());
    }
}
