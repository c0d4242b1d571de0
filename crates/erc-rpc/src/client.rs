//! EthClient - JSON-RPC client for contract calls and account queries

use std::sync::Arc;

use erc_abi::{decode_with, CodecConfig, DecodedReturn, FunctionCall, OutputType};
use primitive_types::{H160, H256, U256};
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::config::ClientConfig;
use crate::retry::RetryPolicy;
use crate::transport::{deserialize_response, MockTransport, Transport};
use crate::types::{address_hex, hash_hex, parse_hash, BlockId, CallRequest, TxReceipt};
use crate::RpcError;

#[cfg(feature = "http")]
use crate::transport::HttpTransport;

/// Ethereum JSON-RPC client.
///
/// Owns its transport; every request goes through the retry policy and can be
/// abandoned through the client's cancellation token.
pub struct EthClient {
    transport: Arc<dyn Transport>,
    retry: RetryPolicy,
    codec: CodecConfig,
    cancel: CancellationToken,
}

impl EthClient {
    /// Create a client with HTTP transport from a config
    #[cfg(feature = "http")]
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::with_config(HttpTransport::new(&config.rpc_url), config)
    }

    /// Create a client with a custom transport and default settings
    pub fn with_transport(transport: impl Transport + 'static) -> Self {
        Self::with_config(transport, &ClientConfig::default())
    }

    /// Create a client with a custom transport
    pub fn with_config(transport: impl Transport + 'static, config: &ClientConfig) -> Self {
        Self {
            transport: Arc::new(transport),
            retry: config.retry,
            codec: config.codec,
            cancel: CancellationToken::new(),
        }
    }

    /// Create a client backed by a mock; the returned handle shares its responses
    pub fn new_mock() -> (Self, MockTransport) {
        let mock = MockTransport::new();
        (Self::with_transport(mock.clone()), mock)
    }

    /// Use a caller-owned cancellation token
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Replace the retry schedule
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Token that aborts in-flight and future requests when cancelled
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Codec policies used by [`call`](Self::call)
    pub fn codec(&self) -> &CodecConfig {
        &self.codec
    }

    /// Make one RPC request through the retry loop and deserialize the result
    async fn request<T: serde::de::DeserializeOwned>(
        &self,
        method: &str,
        params: Vec<Value>,
    ) -> Result<T, RpcError> {
        let transport: &dyn Transport = self.transport.as_ref();
        let value = self
            .retry
            .run(method, &self.cancel, move || {
                transport.request_json(method, params.clone())
            })
            .await?;
        deserialize_response(value)
    }

    // ==================== Chain Info ====================

    /// Get the chain ID
    pub async fn chain_id(&self) -> Result<u64, RpcError> {
        let result: String = self.request("eth_chainId", vec![]).await?;
        parse_hex_u64(&result)
    }

    /// Get the current gas price in wei
    pub async fn gas_price(&self) -> Result<U256, RpcError> {
        let result: String = self.request("eth_gasPrice", vec![]).await?;
        parse_hex_u256(&result)
    }

    // ==================== Account Queries ====================

    /// Get the balance of an address in wei
    pub async fn get_balance(&self, address: &H160, block: BlockId) -> Result<U256, RpcError> {
        let result: String = self
            .request(
                "eth_getBalance",
                vec![Value::String(address_hex(address)), serde_json::to_value(block)?],
            )
            .await?;
        parse_hex_u256(&result)
    }

    /// Get the transaction count (nonce) of an address
    pub async fn get_transaction_count(
        &self,
        address: &H160,
        block: BlockId,
    ) -> Result<u64, RpcError> {
        let result: String = self
            .request(
                "eth_getTransactionCount",
                vec![Value::String(address_hex(address)), serde_json::to_value(block)?],
            )
            .await?;
        parse_hex_u64(&result)
    }

    // ==================== Transactions ====================

    /// Submit a signed transaction and return its hash
    pub async fn send_raw_transaction(&self, raw: &[u8]) -> Result<H256, RpcError> {
        let result: String = self
            .request(
                "eth_sendRawTransaction",
                vec![Value::String(format!("0x{}", hex::encode(raw)))],
            )
            .await?;
        parse_hash(&result)
    }

    /// Get a transaction receipt, `None` while the transaction is pending
    pub async fn get_transaction_receipt(
        &self,
        hash: &H256,
    ) -> Result<Option<TxReceipt>, RpcError> {
        self.request("eth_getTransactionReceipt", vec![Value::String(hash_hex(hash))])
            .await
    }

    // ==================== Contract Calls ====================

    /// Execute `eth_call` and return the raw hex result.
    ///
    /// A bare `0x` result (no code at the address, or a revert without data) is
    /// [`RpcError::EmptyResult`].
    pub async fn eth_call(&self, request: &CallRequest, block: BlockId) -> Result<String, RpcError> {
        let result: String = self
            .request(
                "eth_call",
                vec![serde_json::to_value(request)?, serde_json::to_value(block)?],
            )
            .await?;

        let digits = result.strip_prefix("0x").unwrap_or(&result);
        if digits.is_empty() {
            return Err(RpcError::EmptyResult("eth_call".to_string()));
        }
        Ok(result)
    }

    /// Encode `function`, call it on `to` at the latest block and decode the
    /// result against `outputs`
    pub async fn call(
        &self,
        function: &FunctionCall,
        to: &H160,
        outputs: &[OutputType],
    ) -> Result<DecodedReturn, RpcError> {
        let request = CallRequest {
            to: Some(*to),
            ..CallRequest::default()
        };
        self.call_at(function, request, outputs, BlockId::Latest).await
    }

    /// Like [`call`](Self::call), with an explicit sender and block.
    ///
    /// `request.data` is replaced by the encoded call.
    pub async fn call_at(
        &self,
        function: &FunctionCall,
        mut request: CallRequest,
        outputs: &[OutputType],
        block: BlockId,
    ) -> Result<DecodedReturn, RpcError> {
        let data = function.encode_with(&self.codec)?;
        debug!(
            function = %function.signature(),
            to = ?request.to,
            outputs = outputs.len(),
            "eth_call"
        );
        request.data = Some(data);

        let raw = self.eth_call(&request, block).await?;
        Ok(decode_with(&raw, outputs, &self.codec))
    }
}

pub(crate) fn parse_hex_u64(s: &str) -> Result<u64, RpcError> {
    let s = s.strip_prefix("0x").unwrap_or(s);
    u64::from_str_radix(s, 16).map_err(|e| RpcError::InvalidHex(e.to_string()))
}

pub(crate) fn parse_hex_u256(s: &str) -> Result<U256, RpcError> {
    let s = s.strip_prefix("0x").unwrap_or(s);
    if s.is_empty() {
        return Err(RpcError::InvalidHex("empty quantity".to_string()));
    }
    U256::from_str_radix(s, 16).map_err(|e| RpcError::InvalidHex(format!("{}: {:?}", s, e)))
}
