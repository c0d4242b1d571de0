//! Client configuration

use erc_abi::CodecConfig;
use serde::{Deserialize, Serialize};

use crate::retry::RetryPolicy;
use crate::types::Network;

/// Endpoint used when no RPC URL is configured
pub const DEFAULT_RPC_URL: &str = "http://localhost:8545";

/// Settings for building an [`EthClient`](crate::EthClient)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// JSON-RPC endpoint
    #[serde(default = "default_rpc_url")]
    pub rpc_url: String,

    /// Network the endpoint serves
    #[serde(default)]
    pub network: Network,

    /// Retry schedule for transport failures
    #[serde(default)]
    pub retry: RetryPolicy,

    /// Codec policies for encoding calls and extracting results
    #[serde(default)]
    pub codec: CodecConfig,
}

fn default_rpc_url() -> String {
    DEFAULT_RPC_URL.to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            rpc_url: default_rpc_url(),
            network: Network::default(),
            retry: RetryPolicy::default(),
            codec: CodecConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Config pointing at an endpoint, other settings default
    pub fn new(rpc_url: impl Into<String>) -> Self {
        Self {
            rpc_url: rpc_url.into(),
            ..Self::default()
        }
    }

    /// Config for an Infura project on `network`
    pub fn infura(network: Network, project_id: &str) -> Self {
        Self {
            rpc_url: network.infura_http_url(project_id),
            network,
            ..Self::default()
        }
    }

    /// Replace the codec policies
    pub fn with_codec(mut self, codec: CodecConfig) -> Self {
        self.codec = codec;
        self
    }

    /// Replace the retry schedule
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use erc_abi::BoundsPolicy;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.rpc_url, "http://localhost:8545");
        assert_eq!(config.network, Network::Mainnet);
        assert_eq!(config.codec, CodecConfig::default());
    }

    #[test]
    fn test_infura_config() {
        let config = ClientConfig::infura(Network::Rinkeby, "key");
        assert_eq!(config.rpc_url, "https://rinkeby.infura.io/v3/key");
        assert_eq!(config.network, Network::Rinkeby);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: ClientConfig = serde_json::from_str(
            r#"{"network": "ropsten", "codec": {"bounds": "clamp"}}"#,
        )
        .unwrap();
        assert_eq!(config.rpc_url, DEFAULT_RPC_URL);
        assert_eq!(config.network, Network::Ropsten);
        assert_eq!(config.codec.bounds, BoundsPolicy::Clamp);
        assert_eq!(config.retry, RetryPolicy::default());
    }
}
