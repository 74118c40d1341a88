use futures::future::join_all;
use num_bigint::BigUint;
use num_traits::Zero;

use super::error::{Result, SmartPathError};
use super::simulation::PathSimulator;
use super::types::{PoolPath, RouterFunction, Wei, WeightedPathResult};

pub const FULL_WEIGHT: u8 = 100;

/// Routes `weight` percent of the trade through `pool_path`.
#[derive(Clone, Debug)]
pub struct WeightedPath {
    pub router_function: RouterFunction,
    pub pool_path: PoolPath,
    pub weight: u8,
    value: Option<Wei>,
}

impl WeightedPath {
    pub fn new(pool_path: PoolPath, weight: u8) -> Self {
        Self {
            router_function: pool_path.router_function(),
            pool_path,
            weight,
            value: None,
        }
    }

    // floor(total * weight / 100), as on-chain integer math would do it
    pub fn amount_in(&self, total_amount_in: &Wei) -> Wei {
        total_amount_in * BigUint::from(self.weight) / BigUint::from(FULL_WEIGHT)
    }

    pub async fn compute_path_value(
        &mut self,
        simulator: &PathSimulator,
        total_amount_in: &Wei,
    ) -> Wei {
        let amount_in = self.amount_in(total_amount_in);
        let value = simulator
            .compute_path_value(&self.pool_path, &amount_in)
            .await;
        self.value = Some(value.clone());
        value
    }

    pub fn value(&self) -> Option<&Wei> {
        self.value.as_ref()
    }

    pub fn output(&self) -> WeightedPathResult {
        WeightedPathResult {
            router_function: self.router_function,
            pool_path: self.pool_path.clone(),
            weight: self.weight,
        }
    }
}

/// One or two weighted sub-paths covering the whole trade.
#[derive(Clone, Debug)]
pub struct MixedWeightedPath {
    paths: Vec<WeightedPath>,
    total_value: Option<Wei>,
}

impl MixedWeightedPath {
    pub fn new(paths: Vec<WeightedPath>) -> Result<Self> {
        if paths.is_empty() || paths.len() > 2 {
            return Err(SmartPathError::InvalidWeights(format!(
                "expected one or two sub-paths, got {}",
                paths.len()
            )));
        }
        if paths.iter().any(|path| path.weight == 0) {
            return Err(SmartPathError::InvalidWeights(
                "sub-path weights must be at least 1".to_string(),
            ));
        }
        let total: u32 = paths.iter().map(|path| u32::from(path.weight)).sum();
        if total != u32::from(FULL_WEIGHT) {
            return Err(SmartPathError::InvalidWeights(format!(
                "weights sum to {total}, expected {FULL_WEIGHT}"
            )));
        }
        Ok(Self {
            paths,
            total_value: None,
        })
    }

    pub fn single(pool_path: PoolPath) -> Self {
        Self {
            paths: vec![WeightedPath::new(pool_path, FULL_WEIGHT)],
            total_value: None,
        }
    }

    pub fn paths(&self) -> &[WeightedPath] {
        &self.paths
    }

    /// Aggregate simulated output; `None` until [`Self::compute_path_values`] ran.
    pub fn total_value(&self) -> Option<&Wei> {
        self.total_value.as_ref()
    }

    /// Comparison key for ranking, unsimulated paths count as zero.
    pub fn value_or_zero(&self) -> Wei {
        self.total_value.clone().unwrap_or_else(Wei::zero)
    }

    pub async fn compute_path_values(
        &mut self,
        simulator: &PathSimulator,
        total_amount_in: &Wei,
    ) -> Wei {
        let values = join_all(
            self.paths
                .iter_mut()
                .map(|path| path.compute_path_value(simulator, total_amount_in)),
        )
        .await;
        let total = values.into_iter().fold(Wei::zero(), |acc, value| acc + value);
        self.total_value = Some(total.clone());
        total
    }

    pub fn output(&self) -> Vec<WeightedPathResult> {
        self.paths.iter().map(WeightedPath::output).collect()
    }
}
