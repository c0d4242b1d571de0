//! Offline ABI commands

use clap::Subcommand;
use erc_abi::{
    decode_with, function_selector, parse_output_type, parse_value, selector_hex,
    signature_from_types, CodecConfig, FunctionCall, OutputType, ReturnValue,
};

use crate::output::{render_values, Output};
use crate::{config::Config, CliError};

/// ABI subcommands
#[derive(Debug, Subcommand)]
pub enum AbiCommand {
    /// Compute a function selector, e.g. `transfer address uint256`
    Selector {
        /// Function name
        name: String,
        /// Argument types
        types: Vec<String>,
    },
    /// Encode a function call, e.g. `transfer address:0x.. uint256:100`
    Encode {
        /// Function name
        name: String,
        /// Arguments as type:value
        args: Vec<String>,
        /// Use permissive address and bounds handling
        #[arg(long)]
        compat: bool,
    },
    /// Decode return data, e.g. `0x.. uint256 string`
    Decode {
        /// Hex return data
        data: String,
        /// Output types in order
        types: Vec<String>,
        /// Clamp out-of-range reads instead of failing
        #[arg(long)]
        compat: bool,
    },
}

impl AbiCommand {
    pub fn execute(self, config: &Config, json: bool) -> Result<(), CliError> {
        match self {
            AbiCommand::Selector { name, types } => selector(&name, &types, json),
            AbiCommand::Encode { name, args, compat } => {
                encode(&name, &args, &codec(config, compat), json)
            }
            AbiCommand::Decode {
                data,
                types,
                compat,
            } => decode(&data, &types, &codec(config, compat), json),
        }
    }
}

fn codec(config: &Config, compat: bool) -> CodecConfig {
    if compat {
        CodecConfig::compat()
    } else {
        config.client.codec
    }
}

fn selector(name: &str, types: &[String], json: bool) -> Result<(), CliError> {
    if name.is_empty() {
        return Err(CliError::InvalidInput("Function name is empty".to_string()));
    }
    let types: Vec<&str> = types.iter().map(String::as_str).collect();
    let signature = signature_from_types(name, &types)?;
    let selector = selector_hex(function_selector(&signature));

    Output::new(json)
        .field("signature", &signature)
        .field("selector", &selector)
        .message(&format!("{}  {}", selector, signature))
        .print();
    Ok(())
}

fn encode(name: &str, args: &[String], codec: &CodecConfig, json: bool) -> Result<(), CliError> {
    let values = args
        .iter()
        .map(|arg| parse_value(arg))
        .collect::<Result<Vec<_>, _>>()?;
    let call = FunctionCall::new(name, values);
    let data = call.encode_with(codec)?;

    Output::new(json)
        .field("signature", &call.signature())
        .field("selector", &call.selector_hex())
        .field("data", &data)
        .message(&data)
        .print();
    Ok(())
}

fn decode(data: &str, types: &[String], codec: &CodecConfig, json: bool) -> Result<(), CliError> {
    let outputs = types
        .iter()
        .map(|t| parse_output_type(t))
        .collect::<Result<Vec<OutputType>, _>>()?;
    let decoded = decode_with(data, &outputs, codec);
    let values = (0..outputs.len())
        .map(|i| decoded.get(i))
        .collect::<Result<Vec<ReturnValue>, _>>()?;

    let (values_json, text) = render_values(&values);
    Output::new(json)
        .field_value("values", values_json)
        .message(&text)
        .print();
    Ok(())
}
