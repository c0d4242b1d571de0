//! Contract call command

use clap::Args;
use erc_abi::{parse_output_type, parse_value, CodecConfig, FunctionCall, ReturnValue};
use erc_rpc::{parse_address, CallRequest, CancellationToken};

use crate::commands::{client, parse_block};
use crate::output::{render_values, Output};
use crate::{config::Config, CliError};

/// Call a contract function with `eth_call` and decode the result
#[derive(Debug, Args)]
pub struct CallCommand {
    /// Contract address
    #[arg(long)]
    to: String,
    /// Sender address
    #[arg(long)]
    from: Option<String>,
    /// Comma-separated output types, e.g. `uint256,string`
    #[arg(long, value_delimiter = ',')]
    returns: Vec<String>,
    /// Block number or tag
    #[arg(long, default_value = "latest")]
    block: String,
    /// Use permissive address and bounds handling
    #[arg(long)]
    compat: bool,
    /// Function name
    name: String,
    /// Arguments as type:value
    args: Vec<String>,
}

impl CallCommand {
    pub async fn execute(
        self,
        config: &Config,
        cancel: &CancellationToken,
        json: bool,
    ) -> Result<(), CliError> {
        let mut config = config.clone();
        if self.compat {
            config.client.codec = CodecConfig::compat();
        }

        let values = self
            .args
            .iter()
            .map(|arg| parse_value(arg))
            .collect::<Result<Vec<_>, _>>()?;
        let outputs = self
            .returns
            .iter()
            .map(|t| parse_output_type(t))
            .collect::<Result<Vec<_>, _>>()?;
        let call = FunctionCall::new(self.name, values);

        let mut request = CallRequest {
            to: Some(parse_address(&self.to)?),
            ..CallRequest::default()
        };
        if let Some(from) = &self.from {
            request.from = Some(parse_address(from)?);
        }
        let block = parse_block(&self.block)?;

        let client = client(&config, cancel);
        let decoded = client.call_at(&call, request, &outputs, block).await?;
        let values = (0..outputs.len())
            .map(|i| decoded.get(i))
            .collect::<Result<Vec<ReturnValue>, _>>()?;

        let (values_json, text) = render_values(&values);
        Output::new(json)
            .field("signature", &call.signature())
            .field_value("values", values_json)
            .message(&text)
            .print();
        Ok(())
    }
}
