//! RPC request and response types

use primitive_types::{H160, H256, U256};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use erc_abi::AbiError;

use crate::RpcError;

/// Block identifier for RPC queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlockId {
    /// Block number
    Number(u64),
    /// Latest block
    #[default]
    Latest,
    /// Pending block (includes pending transactions)
    Pending,
    /// Earliest block (genesis)
    Earliest,
}

impl Serialize for BlockId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            BlockId::Number(n) => serializer.serialize_str(&format!("0x{:x}", n)),
            BlockId::Latest => serializer.serialize_str("latest"),
            BlockId::Pending => serializer.serialize_str("pending"),
            BlockId::Earliest => serializer.serialize_str("earliest"),
        }
    }
}

/// Call object for `eth_call`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallRequest {
    /// Sender address
    pub from: Option<H160>,
    /// Contract address
    pub to: Option<H160>,
    /// ABI-encoded call data, `0x` prefixed
    pub data: Option<String>,
}

impl CallRequest {
    /// Call `to` with already-encoded `data`
    pub fn new(to: H160, data: impl Into<String>) -> Self {
        Self {
            from: None,
            to: Some(to),
            data: Some(data.into()),
        }
    }

    /// Set the sender
    pub fn from(mut self, from: H160) -> Self {
        self.from = Some(from);
        self
    }
}

impl Serialize for CallRequest {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;

        let count = [self.from.is_some(), self.to.is_some(), self.data.is_some()]
            .iter()
            .filter(|present| **present)
            .count();
        let mut map = serializer.serialize_map(Some(count))?;

        if let Some(from) = &self.from {
            map.serialize_entry("from", &address_hex(from))?;
        }
        if let Some(to) = &self.to {
            map.serialize_entry("to", &address_hex(to))?;
        }
        if let Some(data) = &self.data {
            map.serialize_entry("data", data)?;
        }

        map.end()
    }
}

/// Transaction receipt, reduced to what callers check after submission
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TxReceipt {
    /// Transaction hash
    pub transaction_hash: H256,
    /// Block the transaction was included in
    #[serde(default)]
    pub block_number: Option<U256>,
    /// `0x1` on success, `0x0` on revert; absent before Byzantium
    #[serde(default)]
    pub status: Option<U256>,
    /// Gas used by this transaction
    #[serde(default)]
    pub gas_used: Option<U256>,
    /// Address of a created contract
    #[serde(default)]
    pub contract_address: Option<H160>,
}

impl TxReceipt {
    /// Whether the transaction succeeded; `None` for pre-Byzantium receipts
    pub fn succeeded(&self) -> Option<bool> {
        self.status.map(|status| !status.is_zero())
    }
}

/// Known public networks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    /// Ethereum mainnet
    #[default]
    Mainnet,
    /// Ropsten testnet
    Ropsten,
    /// Rinkeby testnet
    Rinkeby,
}

impl Network {
    /// EIP-155 chain id
    pub fn chain_id(&self) -> u64 {
        match self {
            Network::Mainnet => 1,
            Network::Ropsten => 3,
            Network::Rinkeby => 4,
        }
    }

    /// Lowercase network name
    pub fn name(&self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Ropsten => "ropsten",
            Network::Rinkeby => "rinkeby",
        }
    }

    /// Network for a chain id
    pub fn from_chain_id(chain_id: u64) -> Option<Self> {
        match chain_id {
            1 => Some(Network::Mainnet),
            3 => Some(Network::Ropsten),
            4 => Some(Network::Rinkeby),
            _ => None,
        }
    }

    /// Infura websocket endpoint
    pub fn infura_ws_url(&self) -> String {
        format!("wss://{}.infura.io/ws", self.name())
    }

    /// Infura HTTPS endpoint for a project id
    pub fn infura_http_url(&self, project_id: &str) -> String {
        format!("https://{}.infura.io/v3/{}", self.name(), project_id)
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Network {
    type Err = RpcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mainnet" => Ok(Network::Mainnet),
            "ropsten" => Ok(Network::Ropsten),
            "rinkeby" => Ok(Network::Rinkeby),
            other => Err(RpcError::UnknownNetwork(other.to_string())),
        }
    }
}

/// Parse a 20-byte address from hex text (`0x` optional)
pub fn parse_address(s: &str) -> Result<H160, RpcError> {
    let digits = s.trim().strip_prefix("0x").unwrap_or(s.trim());
    if digits.len() != 40 {
        return Err(AbiError::InvalidAddress(s.to_string()).into());
    }
    let bytes = hex::decode(digits).map_err(|_| AbiError::InvalidAddress(s.to_string()))?;
    Ok(H160::from_slice(&bytes))
}

/// Parse a 32-byte hash from hex text (`0x` optional)
pub fn parse_hash(s: &str) -> Result<H256, RpcError> {
    let digits = s.trim().strip_prefix("0x").unwrap_or(s.trim());
    let bytes = hex::decode(digits)?;
    if bytes.len() != 32 {
        return Err(RpcError::InvalidHex(format!("expected 32 bytes, got {}", bytes.len())));
    }
    Ok(H256::from_slice(&bytes))
}

/// `0x`-prefixed lowercase hex of an address
pub fn address_hex(address: &H160) -> String {
    format!("0x{}", hex::encode(address.as_bytes()))
}

/// `0x`-prefixed lowercase hex of a hash
pub fn hash_hex(hash: &H256) -> String {
    format!("0x{}", hex::encode(hash.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== BlockId ====================

    #[test]
    fn test_block_id_serialize() {
        assert_eq!(serde_json::to_string(&BlockId::Latest).unwrap(), "\"latest\"");
        assert_eq!(serde_json::to_string(&BlockId::Pending).unwrap(), "\"pending\"");
        assert_eq!(serde_json::to_string(&BlockId::Earliest).unwrap(), "\"earliest\"");
        assert_eq!(serde_json::to_string(&BlockId::Number(100)).unwrap(), "\"0x64\"");
    }

    // ==================== CallRequest ====================

    #[test]
    fn test_call_request_skips_missing_fields() {
        let to = parse_address("0x000000000000000000000000000000000000dEaD").unwrap();
        let request = CallRequest::new(to, "0x18160ddd");
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["to"], "0x000000000000000000000000000000000000dead");
        assert_eq!(json["data"], "0x18160ddd");
        assert!(json.get("from").is_none());
    }

    #[test]
    fn test_call_request_with_sender() {
        let to = H160::repeat_byte(0x11);
        let from = H160::repeat_byte(0x22);
        let json = serde_json::to_value(CallRequest::new(to, "0x").from(from)).unwrap();
        assert_eq!(json["from"], format!("0x{}", "22".repeat(20)));
        assert_eq!(json.as_object().unwrap().len(), 3);
    }

    // ==================== TxReceipt ====================

    #[test]
    fn test_receipt_deserialize() {
        let json = serde_json::json!({
            "transactionHash": format!("0x{}", "ab".repeat(32)),
            "blockNumber": "0x10",
            "status": "0x1",
            "gasUsed": "0x5208",
            "contractAddress": null,
            "logs": [],
        });
        let receipt: TxReceipt = serde_json::from_value(json).unwrap();
        assert_eq!(receipt.transaction_hash, H256::repeat_byte(0xab));
        assert_eq!(receipt.block_number, Some(U256::from(16)));
        assert_eq!(receipt.gas_used, Some(U256::from(21000)));
        assert_eq!(receipt.contract_address, None);
        assert_eq!(receipt.succeeded(), Some(true));
    }

    #[test]
    fn test_receipt_failed_and_legacy_status() {
        let failed: TxReceipt = serde_json::from_value(serde_json::json!({
            "transactionHash": format!("0x{}", "00".repeat(32)),
            "status": "0x0",
        }))
        .unwrap();
        assert_eq!(failed.succeeded(), Some(false));

        let legacy: TxReceipt = serde_json::from_value(serde_json::json!({
            "transactionHash": format!("0x{}", "00".repeat(32)),
        }))
        .unwrap();
        assert_eq!(legacy.succeeded(), None);
    }

    // ==================== Network ====================

    #[test]
    fn test_network_chain_ids() {
        assert_eq!(Network::Mainnet.chain_id(), 1);
        assert_eq!(Network::Ropsten.chain_id(), 3);
        assert_eq!(Network::Rinkeby.chain_id(), 4);
        assert_eq!(Network::from_chain_id(4), Some(Network::Rinkeby));
        assert_eq!(Network::from_chain_id(5), None);
    }

    #[test]
    fn test_network_urls() {
        assert_eq!(Network::Ropsten.infura_ws_url(), "wss://ropsten.infura.io/ws");
        assert_eq!(
            Network::Mainnet.infura_http_url("abc123"),
            "https://mainnet.infura.io/v3/abc123"
        );
    }

    #[test]
    fn test_network_parse() {
        assert_eq!("Rinkeby".parse::<Network>().unwrap(), Network::Rinkeby);
        assert!(matches!(
            "kovan".parse::<Network>(),
            Err(RpcError::UnknownNetwork(_))
        ));
        assert_eq!(serde_json::to_string(&Network::Mainnet).unwrap(), "\"mainnet\"");
    }

    // ==================== Hex helpers ====================

    #[test]
    fn test_parse_address() {
        let address = parse_address("0xABCDEFabcdef0123456789abcdef0123456789ab").unwrap();
        assert_eq!(address_hex(&address), "0xabcdefabcdef0123456789abcdef0123456789ab");
        assert!(parse_address("0x1234").is_err());
        assert!(parse_address(&format!("0x{}", "zz".repeat(20))).is_err());
    }

    #[test]
    fn test_parse_hash() {
        let hash = parse_hash(&format!("0x{}", "01".repeat(32))).unwrap();
        assert_eq!(hash_hex(&hash), format!("0x{}", "01".repeat(32)));
        assert!(parse_hash("0x01").is_err());
    }
}
