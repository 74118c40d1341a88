use alloy_primitives::Address;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

use super::caller::{CallResult, ContractCaller};
use super::constants::ChainConfig;
use super::types::{FeeTier, Token};

/// Asks the factories whether a pool exists. Any failure, including a timeout,
/// counts as "no pool" so that one bad probe only shrinks the search space.
#[derive(Clone)]
pub struct PoolProbe {
    caller: Arc<dyn ContractCaller>,
    v2_factory: Address,
    v3_factory: Address,
    probe_timeout: Duration,
}

impl PoolProbe {
    pub fn new(caller: Arc<dyn ContractCaller>, chain: &ChainConfig) -> Self {
        Self {
            caller,
            v2_factory: chain.v2_factory,
            v3_factory: chain.v3_factory,
            probe_timeout: chain.probe_timeout,
        }
    }

    pub async fn v2_pool_exists(&self, token_a: &Token, token_b: &Token) -> bool {
        let lookup = self
            .caller
            .get_pair(self.v2_factory, token_a.address, token_b.address);
        self.exists(lookup, || format!("V2 {}/{}", token_a.symbol, token_b.symbol))
            .await
    }

    pub async fn v3_pool_exists(&self, token_a: &Token, token_b: &Token, fee: FeeTier) -> bool {
        let lookup = self.caller.get_pool(
            self.v3_factory,
            token_a.address,
            token_b.address,
            fee.as_u32(),
        );
        self.exists(lookup, || {
            format!("V3 {}/{}/{}", token_a.symbol, token_b.symbol, fee.as_u32())
        })
        .await
    }

    async fn exists<F, D>(&self, lookup: F, describe: D) -> bool
    where
        F: Future<Output = CallResult<Address>>,
        D: FnOnce() -> String,
    {
        match timeout(self.probe_timeout, lookup).await {
            Ok(Ok(pool)) => pool != Address::ZERO,
            Ok(Err(e)) => {
                tracing::debug!(pool = %describe(), error = %e, "pool lookup failed, treating as absent");
                false
            }
            Err(_) => {
                tracing::debug!(pool = %describe(), timeout = ?self.probe_timeout, "pool lookup timed out, treating as absent");
                false
            }
        }
    }
}
