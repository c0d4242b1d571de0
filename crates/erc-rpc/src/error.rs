//! RPC error types

use erc_abi::AbiError;
use thiserror::Error;

/// RPC client error type
#[derive(Debug, Error)]
pub enum RpcError {
    /// Transport/network error
    #[error("Transport error: {0}")]
    Transport(String),

    /// RPC error from node
    #[error("RPC error: {code} - {message}")]
    Rpc {
        /// Error code
        code: i64,
        /// Error message
        message: String,
    },

    /// The node answered `0x`: no contract code or a reverted call
    #[error("Empty result from {0}")]
    EmptyResult(String),

    /// Invalid hex string
    #[error("Invalid hex: {0}")]
    InvalidHex(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Encoding or extraction failed
    #[error(transparent)]
    Abi(#[from] AbiError),

    /// Unknown network name
    #[error("Unknown network: {0}")]
    UnknownNetwork(String),

    /// Request abandoned by the caller
    #[error("Request cancelled")]
    Cancelled,
}

impl RpcError {
    /// Whether retrying the same request might succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, RpcError::Transport(_))
    }
}

impl From<hex::FromHexError> for RpcError {
    fn from(e: hex::FromHexError) -> Self {
        RpcError::InvalidHex(e.to_string())
    }
}

impl From<serde_json::Error> for RpcError {
    fn from(e: serde_json::Error) -> Self {
        RpcError::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_transport_errors_retry() {
        assert!(RpcError::Transport("reset".into()).is_retryable());
        assert!(!RpcError::EmptyResult("eth_call".into()).is_retryable());
        assert!(!RpcError::Cancelled.is_retryable());
        assert!(!RpcError::Rpc {
            code: -32000,
            message: "execution reverted".into()
        }
        .is_retryable());
    }

    #[test]
    fn test_abi_error_is_transparent() {
        let err: RpcError = AbiError::InvalidAddress("0x12".into()).into();
        assert_eq!(err.to_string(), AbiError::InvalidAddress("0x12".into()).to_string());
    }
}
