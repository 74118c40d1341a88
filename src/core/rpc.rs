use alloy::network::Ethereum;
use alloy::primitives::aliases::U24;
use alloy::primitives::{Address, Bytes, U256};
use alloy::providers::{Provider, RootProvider};
use alloy::sol;
use async_trait::async_trait;
use num_bigint::BigUint;
use url::Url;

use super::caller::{CallResult, ContractCaller};
use super::error::{CallError, Result, SmartPathError};
use super::types::Wei;

sol! {
    #[sol(rpc)]
    interface IERC20 {
        function decimals() external view returns (uint8);
        function symbol() external view returns (string memory);
    }

    #[sol(rpc)]
    interface IUniswapV2Factory {
        function getPair(address tokenA, address tokenB) external view returns (address pair);
    }

    #[sol(rpc)]
    interface IUniswapV3Factory {
        function getPool(address tokenA, address tokenB, uint24 fee) external view returns (address pool);
    }

    #[sol(rpc)]
    interface IUniswapV2Router02 {
        function getAmountsOut(uint256 amountIn, address[] calldata path) external view returns (uint256[] memory amounts);
    }

    #[sol(rpc)]
    interface IQuoter {
        function quoteExactInput(bytes memory path, uint256 amountIn) external returns (uint256 amountOut);
    }
}

pub type HttpProvider = RootProvider<Ethereum>;

/// [`ContractCaller`] backed by an alloy JSON-RPC provider.
#[derive(Clone)]
pub struct AlloyCaller {
    provider: HttpProvider,
}

impl AlloyCaller {
    pub fn new(provider: HttpProvider) -> Self {
        Self { provider }
    }

    pub fn http(rpc_url: &str) -> Result<Self> {
        let url = Url::parse(rpc_url).map_err(|e| SmartPathError::InvalidRpcUrl(e.to_string()))?;
        Ok(Self::new(RootProvider::new_http(url)))
    }
}

fn rpc_error(e: impl std::fmt::Display) -> CallError {
    let message = e.to_string();
    if message.contains("revert") {
        CallError::Reverted(message)
    } else {
        CallError::Rpc(message)
    }
}

pub fn to_u256(value: &BigUint) -> CallResult<U256> {
    U256::try_from_be_slice(&value.to_bytes_be())
        .ok_or_else(|| CallError::Conversion(format!("{value} does not fit in 256 bits")))
}

pub fn from_u256(value: U256) -> BigUint {
    BigUint::from_bytes_be(&value.to_be_bytes::<32>())
}

#[async_trait]
impl ContractCaller for AlloyCaller {
    async fn chain_id(&self) -> CallResult<u64> {
        self.provider.get_chain_id().await.map_err(rpc_error)
    }

    async fn decimals(&self, token: Address) -> CallResult<u8> {
        let erc20 = IERC20::new(token, self.provider.clone());
        erc20.decimals().call().await.map_err(rpc_error)
    }

    async fn symbol(&self, token: Address) -> CallResult<String> {
        let erc20 = IERC20::new(token, self.provider.clone());
        erc20.symbol().call().await.map_err(rpc_error)
    }

    async fn get_pair(
        &self,
        factory: Address,
        token_a: Address,
        token_b: Address,
    ) -> CallResult<Address> {
        let factory = IUniswapV2Factory::new(factory, self.provider.clone());
        factory.getPair(token_a, token_b).call().await.map_err(rpc_error)
    }

    async fn get_pool(
        &self,
        factory: Address,
        token_a: Address,
        token_b: Address,
        fee: u32,
    ) -> CallResult<Address> {
        let fee = U24::try_from(fee).map_err(|e| CallError::Conversion(e.to_string()))?;
        let factory = IUniswapV3Factory::new(factory, self.provider.clone());
        factory
            .getPool(token_a, token_b, fee)
            .call()
            .await
            .map_err(rpc_error)
    }

    async fn get_amounts_out(
        &self,
        router: Address,
        amount_in: &Wei,
        path: &[Address],
    ) -> CallResult<Vec<Wei>> {
        let router = IUniswapV2Router02::new(router, self.provider.clone());
        let amounts = router
            .getAmountsOut(to_u256(amount_in)?, path.to_vec())
            .call()
            .await
            .map_err(rpc_error)?;
        Ok(amounts.into_iter().map(from_u256).collect())
    }

    async fn quote_exact_input(
        &self,
        quoter: Address,
        path: &[u8],
        amount_in: &Wei,
    ) -> CallResult<Wei> {
        let quoter = IQuoter::new(quoter, self.provider.clone());
        let amount_out = quoter
            .quoteExactInput(Bytes::copy_from_slice(path), to_u256(amount_in)?)
            .call()
            .await
            .map_err(rpc_error)?;
        Ok(from_u256(amount_out))
    }
}
