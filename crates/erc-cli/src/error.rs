//! CLI error types

use erc_abi::AbiError;
use erc_rpc::RpcError;
use thiserror::Error;

/// CLI error type
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Encoding, decoding or argument parsing failed
    #[error("ABI error: {0}")]
    Abi(#[from] AbiError),

    /// Node request failed
    #[error("RPC error: {0}")]
    Rpc(#[from] RpcError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Config error
    #[error("Config error: {0}")]
    Config(String),
}
