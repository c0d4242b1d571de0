//! Subcommand implementations

pub mod abi;
pub mod call;
pub mod query;

use erc_rpc::{BlockId, CancellationToken, EthClient};

use crate::{config::Config, CliError};

/// Build an HTTP client from the loaded config
pub(crate) fn client(config: &Config, cancel: &CancellationToken) -> EthClient {
    EthClient::from_config(config.client_config()).with_cancellation(cancel.clone())
}

/// Parse `latest`, `pending`, `earliest`, a decimal number or a `0x` number
pub(crate) fn parse_block(block: &str) -> Result<BlockId, CliError> {
    match block {
        "latest" => Ok(BlockId::Latest),
        "pending" => Ok(BlockId::Pending),
        "earliest" => Ok(BlockId::Earliest),
        other => {
            let number = match other.strip_prefix("0x") {
                Some(digits) => u64::from_str_radix(digits, 16),
                None => other.parse::<u64>(),
            };
            number
                .map(BlockId::Number)
                .map_err(|_| CliError::InvalidInput(format!("Invalid block: {}", other)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_block() {
        assert_eq!(parse_block("latest").unwrap(), BlockId::Latest);
        assert_eq!(parse_block("pending").unwrap(), BlockId::Pending);
        assert_eq!(parse_block("100").unwrap(), BlockId::Number(100));
        assert_eq!(parse_block("0x64").unwrap(), BlockId::Number(100));
        assert!(parse_block("soon").is_err());
    }
}
