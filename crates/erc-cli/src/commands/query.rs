//! Query commands

use clap::Subcommand;
use erc_rpc::{address_hex, hash_hex, parse_address, parse_hash, CancellationToken};

use crate::commands::{client, parse_block};
use crate::{config::Config, output::Output, CliError};

/// Query subcommands
#[derive(Debug, Subcommand)]
pub enum QueryCommand {
    /// Query account balance in wei
    Balance {
        /// Account address
        address: String,
        /// Block number or tag
        #[arg(long, default_value = "latest")]
        block: String,
    },
    /// Query account transaction count
    Nonce {
        /// Account address
        address: String,
        /// Block number or tag
        #[arg(long, default_value = "latest")]
        block: String,
    },
    /// Query current gas price in wei
    GasPrice,
    /// Query chain ID
    ChainId,
    /// Query transaction receipt
    Receipt {
        /// Transaction hash
        hash: String,
    },
}

impl QueryCommand {
    pub async fn execute(
        self,
        config: &Config,
        cancel: &CancellationToken,
        json: bool,
    ) -> Result<(), CliError> {
        let client = client(config, cancel);
        match self {
            QueryCommand::Balance { address, block } => {
                let address = parse_address(&address)?;
                let balance = client.get_balance(&address, parse_block(&block)?).await?;
                Output::new(json)
                    .field("address", &address_hex(&address))
                    .field("balance", &balance.to_string())
                    .message(&format!("Balance: {} wei", balance))
                    .print();
            }
            QueryCommand::Nonce { address, block } => {
                let address = parse_address(&address)?;
                let nonce = client
                    .get_transaction_count(&address, parse_block(&block)?)
                    .await?;
                Output::new(json)
                    .field("address", &address_hex(&address))
                    .field_u64("nonce", nonce)
                    .message(&format!("Nonce: {}", nonce))
                    .print();
            }
            QueryCommand::GasPrice => {
                let gas_price = client.gas_price().await?;
                Output::new(json)
                    .field("gas_price", &gas_price.to_string())
                    .message(&format!("Gas price: {} wei", gas_price))
                    .print();
            }
            QueryCommand::ChainId => {
                let chain_id = client.chain_id().await?;
                Output::new(json)
                    .field_u64("chain_id", chain_id)
                    .message(&format!("Chain ID: {}", chain_id))
                    .print();
            }
            QueryCommand::Receipt { hash } => {
                let hash = parse_hash(&hash)?;
                match client.get_transaction_receipt(&hash).await? {
                    Some(receipt) => {
                        let status = match receipt.succeeded() {
                            Some(true) => "success",
                            Some(false) => "failed",
                            None => "unknown",
                        };
                        Output::new(json)
                            .field("hash", &hash_hex(&hash))
                            .field("status", status)
                            .message(&format!("Receipt {}: {}", hash_hex(&hash), status))
                            .print();
                    }
                    None => {
                        Output::new(json)
                            .field("hash", &hash_hex(&hash))
                            .field("status", "pending")
                            .message(&format!("Receipt {}: pending", hash_hex(&hash)))
                            .print();
                    }
                }
            }
        }
        Ok(())
    }
}
