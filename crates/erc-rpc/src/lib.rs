//! # erc-rpc
//!
//! JSON-RPC client for Ethereum nodes, built on the `erc-abi` codec.
//!
//! - Pluggable [`Transport`] (HTTP, or an in-memory mock for tests)
//! - Contract calls that encode, `eth_call` and decode in one step
//! - Account and transaction queries
//! - ERC-20 helpers
//! - Retry with exponential backoff and cooperative cancellation
//!
//! # Example
//!
//! ```rust,no_run
//! use erc_abi::{FunctionCall, OutputType, U256};
//! use erc_rpc::{parse_address, ClientConfig, EthClient};
//!
//! # async fn example() -> Result<(), erc_rpc::RpcError> {
//! let client = EthClient::from_config(&ClientConfig::new("http://localhost:8545"));
//! let token = parse_address("0x6B175474E89094C44Da98b954EedeAC495271d0F")?;
//!
//! let supply = client
//!     .call(&FunctionCall::new("totalSupply", vec![]), &token, &[OutputType::Int])
//!     .await?;
//! let supply: U256 = supply.extract(0)?;
//!
//! let symbol = client.erc20(token).symbol().await?;
//! println!("{} {}", supply, symbol);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod client;
mod config;
pub mod erc20;
mod error;
mod retry;
pub mod transport;
mod types;

pub use client::EthClient;
pub use config::{ClientConfig, DEFAULT_RPC_URL};
pub use erc20::{Erc20, TokenInfo};
pub use error::RpcError;
pub use retry::RetryPolicy;
pub use transport::{MockTransport, Transport};
pub use types::{
    address_hex, hash_hex, parse_address, parse_hash, BlockId, CallRequest, Network, TxReceipt,
};

#[cfg(feature = "http")]
pub use transport::HttpTransport;

// Re-export primitive-types for addresses and hashes
pub use primitive_types::{H160, H256, U256};

// Re-export for callers that manage cancellation
pub use tokio_util::sync::CancellationToken;
