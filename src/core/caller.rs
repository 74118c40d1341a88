use alloy_primitives::Address;
use async_trait::async_trait;

use super::error::CallError;
use super::types::Wei;

pub type CallResult<T> = std::result::Result<T, CallError>;

/// Read-only on-chain capability the optimizer is built on.
///
/// Every method maps to exactly one `eth_call` (or `eth_chainId`). Calls are
/// stateless, so one caller is shared by every concurrent probe and quote of an
/// invocation without synchronisation.
#[async_trait]
pub trait ContractCaller: Send + Sync {
    async fn chain_id(&self) -> CallResult<u64>;

    /// ERC-20 `decimals()`
    async fn decimals(&self, token: Address) -> CallResult<u8>;

    /// ERC-20 `symbol()`
    async fn symbol(&self, token: Address) -> CallResult<String>;

    /// UniswapV2Factory `getPair(tokenA, tokenB)`; zero address when no pair exists
    async fn get_pair(
        &self,
        factory: Address,
        token_a: Address,
        token_b: Address,
    ) -> CallResult<Address>;

    /// UniswapV3Factory `getPool(tokenA, tokenB, fee)`; zero address when no pool exists
    async fn get_pool(
        &self,
        factory: Address,
        token_a: Address,
        token_b: Address,
        fee: u32,
    ) -> CallResult<Address>;

    /// UniswapV2Router02 `getAmountsOut(amountIn, path)`
    async fn get_amounts_out(
        &self,
        router: Address,
        amount_in: &Wei,
        path: &[Address],
    ) -> CallResult<Vec<Wei>>;

    /// Quoter `quoteExactInput(path, amountIn)` over a packed V3 path
    async fn quote_exact_input(
        &self,
        quoter: Address,
        path: &[u8],
        amount_in: &Wei,
    ) -> CallResult<Wei>;
}
