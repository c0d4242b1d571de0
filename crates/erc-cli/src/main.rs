//! # erc
//!
//! Command-line tool for Ethereum contract ABI work.
//!
//! ## Usage
//!
//! ```bash
//! # Offline ABI commands
//! erc abi selector transfer address uint256
//! erc abi encode transfer address:0x742d35Cc6634C0532925a3b844Bc9e7595f0aB3d uint256:1000
//! erc abi decode 0x...0001 bool
//!
//! # Contract calls
//! erc call --to 0x... --returns uint256 balanceOf address:0x...
//!
//! # Query commands
//! erc query balance 0x...
//! erc query nonce 0x...
//! erc query gas-price
//! erc query receipt 0x...
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use erc_rpc::{CancellationToken, Network};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod error;
mod output;

pub use config::Config;
pub use error::CliError;
pub use output::Output;

/// Ethereum ABI and contract-call CLI
#[derive(Parser, Debug)]
#[command(name = "erc")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// RPC endpoint URL
    #[arg(long, global = true)]
    rpc_url: Option<String>,

    /// Config file (default: ~/.erc-tools/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

/// CLI commands
#[derive(Debug, Subcommand)]
enum Commands {
    /// Offline encoding and decoding
    #[command(subcommand)]
    Abi(commands::abi::AbiCommand),
    /// Call a contract function
    Call(commands::call::CallCommand),
    /// Query chain state
    #[command(subcommand)]
    Query(commands::query::QueryCommand),
    /// Show or edit configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,
        /// Set RPC URL
        #[arg(long)]
        set_rpc: Option<String>,
        /// Set network (mainnet, ropsten, rinkeby)
        #[arg(long)]
        set_network: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so JSON output stays parseable
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    // Load config
    let mut config = Config::load(cli.config.as_deref());

    // Override RPC URL if provided
    if let Some(rpc_url) = &cli.rpc_url {
        config.client.rpc_url = rpc_url.clone();
    }

    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_signal.cancel();
        }
    });

    let result = match cli.command {
        Commands::Abi(cmd) => cmd.execute(&config, cli.json),
        Commands::Call(cmd) => cmd.execute(&config, &cancel, cli.json).await,
        Commands::Query(cmd) => cmd.execute(&config, &cancel, cli.json).await,
        Commands::Config {
            show,
            set_rpc,
            set_network,
        } => handle_config(
            &mut config,
            cli.config.as_deref(),
            show,
            set_rpc,
            set_network,
            cli.json,
        ),
    };

    if let Err(e) = result {
        if cli.json {
            println!(
                "{}",
                serde_json::json!({
                    "error": e.to_string(),
                    "success": false
                })
            );
        } else {
            eprintln!("Error: {}", e);
        }
        std::process::exit(1);
    }
}

fn handle_config(
    config: &mut Config,
    path: Option<&std::path::Path>,
    show: bool,
    set_rpc: Option<String>,
    set_network: Option<String>,
    json: bool,
) -> Result<(), CliError> {
    let mut modified = false;

    if let Some(rpc) = set_rpc {
        config.client.rpc_url = rpc;
        modified = true;
    }

    if let Some(network) = set_network {
        config.client.network = network.parse::<Network>()?;
        modified = true;
    }

    if modified {
        let saved = config.save(path)?;
        Output::new(json)
            .field("status", "saved")
            .field("path", &saved.display().to_string())
            .message(&format!("Configuration saved to {}", saved.display()))
            .print();
    } else if show {
        Output::new(json)
            .field("rpc_url", &config.client.rpc_url)
            .field("network", config.client.network.name())
            .field_u64("chain_id", config.client.network.chain_id())
            .field_value("codec", serde_json::to_value(config.client.codec)?)
            .message(&format!(
                "RPC URL: {}\nNetwork: {} (chain {})",
                config.client.rpc_url,
                config.client.network,
                config.client.network.chain_id()
            ))
            .print();
    } else {
        Output::new(json)
            .message("Use --show to display config, or --set-rpc/--set-network to modify")
            .print();
    }

    Ok(())
}
