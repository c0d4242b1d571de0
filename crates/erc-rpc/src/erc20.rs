//! ERC-20 token helpers

use erc_abi::{FunctionCall, OutputType, SolidityValue};
use primitive_types::{H160, U256};

use crate::types::{address_hex, BlockId, CallRequest};
use crate::{EthClient, RpcError};

/// `name()`
pub fn name_call() -> FunctionCall {
    FunctionCall::new("name", vec![])
}

/// `symbol()`
pub fn symbol_call() -> FunctionCall {
    FunctionCall::new("symbol", vec![])
}

/// `decimals()`
pub fn decimals_call() -> FunctionCall {
    FunctionCall::new("decimals", vec![])
}

/// `totalSupply()`
pub fn total_supply_call() -> FunctionCall {
    FunctionCall::new("totalSupply", vec![])
}

/// `balanceOf(address)`
pub fn balance_of_call(owner: &H160) -> FunctionCall {
    FunctionCall::new("balanceOf", vec![SolidityValue::address(address_hex(owner))])
}

/// `transfer(address,uint256)`
pub fn transfer_call(to: &H160, amount: U256) -> FunctionCall {
    FunctionCall::new(
        "transfer",
        vec![SolidityValue::address(address_hex(to)), SolidityValue::uint256(amount)],
    )
}

/// `approve(address,uint256)`
pub fn approve_call(spender: &H160, amount: U256) -> FunctionCall {
    FunctionCall::new(
        "approve",
        vec![SolidityValue::address(address_hex(spender)), SolidityValue::uint256(amount)],
    )
}

/// `allowance(address,address)`
pub fn allowance_call(owner: &H160, spender: &H160) -> FunctionCall {
    FunctionCall::new(
        "allowance",
        vec![
            SolidityValue::address(address_hex(owner)),
            SolidityValue::address(address_hex(spender)),
        ],
    )
}

/// Token metadata gathered from the four read-only getters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenInfo {
    /// Token name
    pub name: String,
    /// Token symbol
    pub symbol: String,
    /// Display decimals
    pub decimals: u8,
    /// Total supply in base units
    pub total_supply: U256,
}

/// An ERC-20 contract reachable through a client
pub struct Erc20<'a> {
    client: &'a EthClient,
    address: H160,
}

impl<'a> Erc20<'a> {
    /// Bind a token address to a client
    pub fn new(client: &'a EthClient, address: H160) -> Self {
        Self { client, address }
    }

    /// Token contract address
    pub fn address(&self) -> &H160 {
        &self.address
    }

    /// Token name
    pub async fn name(&self) -> Result<String, RpcError> {
        self.read(&name_call(), OutputType::String).await
    }

    /// Token symbol
    pub async fn symbol(&self) -> Result<String, RpcError> {
        self.read(&symbol_call(), OutputType::String).await
    }

    /// Display decimals
    pub async fn decimals(&self) -> Result<u8, RpcError> {
        self.read(&decimals_call(), OutputType::Int).await
    }

    /// Total supply in base units
    pub async fn total_supply(&self) -> Result<U256, RpcError> {
        self.read(&total_supply_call(), OutputType::Int).await
    }

    /// Balance of `owner` in base units
    pub async fn balance_of(&self, owner: &H160) -> Result<U256, RpcError> {
        self.read(&balance_of_call(owner), OutputType::Int).await
    }

    /// Remaining amount `spender` may move on behalf of `owner`
    pub async fn allowance(&self, owner: &H160, spender: &H160) -> Result<U256, RpcError> {
        self.read(&allowance_call(owner, spender), OutputType::Int).await
    }

    /// Dry-run `transfer` from `from`; returns the contract's boolean result
    pub async fn transfer(&self, from: &H160, to: &H160, amount: U256) -> Result<bool, RpcError> {
        self.simulate(from, &transfer_call(to, amount)).await
    }

    /// Dry-run `approve` from `owner`; returns the contract's boolean result
    pub async fn approve(
        &self,
        owner: &H160,
        spender: &H160,
        amount: U256,
    ) -> Result<bool, RpcError> {
        self.simulate(owner, &approve_call(spender, amount)).await
    }

    /// Fetch name, symbol, decimals and total supply concurrently
    pub async fn info(&self) -> Result<TokenInfo, RpcError> {
        let (name, symbol, decimals, total_supply) = tokio::try_join!(
            self.name(),
            self.symbol(),
            self.decimals(),
            self.total_supply()
        )?;
        Ok(TokenInfo {
            name,
            symbol,
            decimals,
            total_supply,
        })
    }

    async fn read<T: erc_abi::FromReturnValue>(
        &self,
        call: &FunctionCall,
        output: OutputType,
    ) -> Result<T, RpcError> {
        let decoded = self.client.call(call, &self.address, &[output]).await?;
        Ok(decoded.extract(0)?)
    }

    async fn simulate(&self, from: &H160, call: &FunctionCall) -> Result<bool, RpcError> {
        let request = CallRequest {
            from: Some(*from),
            to: Some(self.address),
            data: None,
        };
        let decoded = self
            .client
            .call_at(call, request, &[OutputType::Bool], BlockId::Latest)
            .await?;
        Ok(decoded.extract(0)?)
    }
}

impl EthClient {
    /// ERC-20 view of the contract at `address`
    pub fn erc20(&self, address: H160) -> Erc20<'_> {
        Erc20::new(self, address)
    }
}
