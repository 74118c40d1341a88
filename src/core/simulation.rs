use alloy_primitives::Address;
use num_traits::Zero;
use std::sync::Arc;

use super::caller::ContractCaller;
use super::constants::ChainConfig;
use super::types::{PoolPath, V2PoolPath, V3PoolPath, Wei};

/// Quotes a path on chain. The AMM math, tick crossing included, is left to
/// the router and quoter contracts; a failed quote is worth zero.
#[derive(Clone)]
pub struct PathSimulator {
    caller: Arc<dyn ContractCaller>,
    v2_router: Address,
    v3_quoter: Address,
}

impl PathSimulator {
    pub fn new(caller: Arc<dyn ContractCaller>, chain: &ChainConfig) -> Self {
        Self {
            caller,
            v2_router: chain.v2_router,
            v3_quoter: chain.v3_quoter,
        }
    }

    pub async fn compute_path_value(&self, path: &PoolPath, amount_in: &Wei) -> Wei {
        if amount_in.is_zero() {
            return Wei::zero();
        }
        match path {
            PoolPath::V2(path) => self.quote_v2(path, amount_in).await,
            PoolPath::V3(path) => self.quote_v3(path, amount_in).await,
        }
    }

    async fn quote_v2(&self, path: &V2PoolPath, amount_in: &Wei) -> Wei {
        match self
            .caller
            .get_amounts_out(self.v2_router, amount_in, &path.tokens())
            .await
        {
            Ok(amounts) => amounts.last().cloned().unwrap_or_default(),
            Err(e) => {
                tracing::debug!(path = %PoolPath::V2(path.clone()), %amount_in, error = %e, "V2 quote failed, valuing path at zero");
                Wei::zero()
            }
        }
    }

    async fn quote_v3(&self, path: &V3PoolPath, amount_in: &Wei) -> Wei {
        match self
            .caller
            .quote_exact_input(self.v3_quoter, &path.encode(), amount_in)
            .await
        {
            Ok(amount_out) => amount_out,
            Err(e) => {
                tracing::debug!(path = %PoolPath::V3(path.clone()), %amount_in, error = %e, "V3 quote failed, valuing path at zero");
                Wei::zero()
            }
        }
    }
}
