use alloy_primitives::Address;
use futures::future::join_all;
use num_bigint::BigUint;
use num_traits::Zero;
use std::sync::Arc;

use super::caller::ContractCaller;
use super::constants::ChainConfig;
use super::error::{Result, SmartPathError};
use super::paths::PathBuilder;
use super::pool::PoolProbe;
use super::rpc::AlloyCaller;
use super::simulation::PathSimulator;
use super::token::TokenResolver;
use super::types::{PoolPath, SwapQuote, Wei, WeightedPathResult};
use super::weighted::{MixedWeightedPath, WeightedPath};
use crate::types::SmartPathConfig;

// Filter multiplier resolution when applied to integer values
const MULTIPLIER_SCALE: u64 = 1_000_000;

/// Finds the best exact-in route between two tokens across Uniswap V2 and V3,
/// optionally splitting the trade between the best path of each version.
pub struct SmartPath {
    chain: ChainConfig,
    resolver: TokenResolver,
    builder: PathBuilder,
    simulator: PathSimulator,
}

#[derive(Default)]
pub struct SmartPathBuilder {
    caller: Option<Arc<dyn ContractCaller>>,
    rpc_url: Option<String>,
    chain: Option<ChainConfig>,
    settings: Option<SmartPathConfig>,
}

impl SmartPathBuilder {
    pub fn caller(mut self, caller: Arc<dyn ContractCaller>) -> Self {
        self.caller = Some(caller);
        self
    }

    pub fn rpc_url(mut self, rpc_url: impl Into<String>) -> Self {
        self.rpc_url = Some(rpc_url.into());
        self
    }

    pub fn chain_config(mut self, chain: ChainConfig) -> Self {
        self.chain = Some(chain);
        self
    }

    pub fn settings(mut self, settings: SmartPathConfig) -> Self {
        self.settings = Some(settings);
        self
    }

    pub async fn build(self) -> Result<SmartPath> {
        let caller: Arc<dyn ContractCaller> = match (self.caller, self.rpc_url) {
            (Some(caller), _) => caller,
            (None, Some(rpc_url)) => Arc::new(AlloyCaller::http(&rpc_url)?),
            (None, None) => return Err(SmartPathError::MissingProvider),
        };

        let chain = match self.chain {
            Some(chain) => chain,
            None => ChainConfig::for_chain(caller.chain_id().await?)?,
        };
        let chain = match &self.settings {
            Some(settings) => chain.with_settings(settings)?,
            None => chain,
        };
        SmartPath::new(caller, chain)
    }
}

impl SmartPath {
    pub fn builder() -> SmartPathBuilder {
        SmartPathBuilder::default()
    }

    /// Fails with `InvalidWeights` or `InvalidInput` when the chain's tuning
    /// tables are unusable.
    pub fn new(caller: Arc<dyn ContractCaller>, chain: ChainConfig) -> Result<Self> {
        chain.validate()?;
        let probe = PoolProbe::new(caller.clone(), &chain);
        let builder = PathBuilder::new(probe, chain.pivot_tokens.clone(), chain.fee_tiers.clone());
        let simulator = PathSimulator::new(caller.clone(), &chain);

        tracing::info!(
            chain_id = chain.chain_id,
            pivots = chain.pivot_tokens.len(),
            fee_tiers = chain.fee_tiers.len(),
            "smart path initialized"
        );
        Ok(Self {
            resolver: TokenResolver::new(caller),
            builder,
            simulator,
            chain,
        })
    }

    pub fn chain_config(&self) -> &ChainConfig {
        &self.chain
    }

    pub fn resolver(&self) -> &TokenResolver {
        &self.resolver
    }

    pub fn simulator(&self) -> &PathSimulator {
        &self.simulator
    }

    /// Best exact-in route for `amount` of `token_in` into `token_out`.
    /// Empty when no pool of either version connects the two tokens.
    pub async fn get_swap_in_path(
        &self,
        amount: &Wei,
        token_in: Address,
        token_out: Address,
    ) -> Result<Vec<WeightedPathResult>> {
        Ok(self
            .quote_swap_in_path(amount, token_in, token_out)
            .await?
            .map(|quote| quote.paths)
            .unwrap_or_default())
    }

    #[tracing::instrument(skip(self), fields(chain_id = self.chain.chain_id))]
    pub async fn quote_swap_in_path(
        &self,
        amount: &Wei,
        token_in: Address,
        token_out: Address,
    ) -> Result<Option<SwapQuote>> {
        if amount.is_zero() {
            return Err(SmartPathError::InvalidInput("amount must be positive".to_string()));
        }
        if token_in == token_out {
            return Err(SmartPathError::InvalidInput(
                "token_in and token_out must differ".to_string(),
            ));
        }

        let (token_in, token_out) = futures::try_join!(
            self.resolver.resolve(token_in),
            self.resolver.resolve(token_out)
        )?;

        let (v2_paths, v3_paths) = futures::join!(
            self.builder.build_v2_paths(&token_in, &token_out),
            self.builder.build_v3_paths(&token_in, &token_out)
        );

        let mut v2_candidates: Vec<MixedWeightedPath> = v2_paths
            .into_iter()
            .map(|path| MixedWeightedPath::single(PoolPath::V2(path)))
            .collect();
        let mut v3_candidates: Vec<MixedWeightedPath> = v3_paths
            .into_iter()
            .map(|path| MixedWeightedPath::single(PoolPath::V3(path)))
            .collect();

        self.simulate_all(v2_candidates.iter_mut().chain(v3_candidates.iter_mut()), amount)
            .await;

        sort_by_value_desc(&mut v2_candidates);
        sort_by_value_desc(&mut v3_candidates);
        let best_value = [v2_candidates.first(), v3_candidates.first()]
            .into_iter()
            .flatten()
            .map(MixedWeightedPath::value_or_zero)
            .max()
            .unwrap_or_default();
        let multiplier = self.chain.irrelevant_value_filter_multiplier;
        let v2_candidates = filter_irrelevant(v2_candidates, &best_value, multiplier);
        let v3_candidates = filter_irrelevant(v3_candidates, &best_value, multiplier);
        tracing::debug!(
            v2 = v2_candidates.len(),
            v3 = v3_candidates.len(),
            %best_value,
            "candidates after filtering"
        );

        let best = match (
            v2_candidates.into_iter().next(),
            v3_candidates.into_iter().next(),
        ) {
            (None, None) => {
                tracing::info!(%token_in, %token_out, "no route found");
                return Ok(None);
            }
            (Some(single), None) | (None, Some(single)) => single,
            (Some(best_v2), Some(best_v3)) => self.mix(best_v2, best_v3, amount).await?,
        };

        let amount_out = best.value_or_zero();
        tracing::info!(
            %token_in,
            %token_out,
            %amount,
            %amount_out,
            paths = best.paths().len(),
            "selected swap path"
        );
        Ok(Some(SwapQuote {
            token_in,
            token_out,
            amount_in: amount.clone(),
            amount_out,
            paths: best.output(),
        }))
    }

    // Tries every weight split between the two version winners, keeps the best
    async fn mix(
        &self,
        best_v2: MixedWeightedPath,
        best_v3: MixedWeightedPath,
        amount: &Wei,
    ) -> Result<MixedWeightedPath> {
        let (lower, higher) = if best_v2.value_or_zero() <= best_v3.value_or_zero() {
            (best_v2, best_v3)
        } else {
            (best_v3, best_v2)
        };
        let lower_path = lower.paths()[0].pool_path.clone();
        let higher_path = higher.paths()[0].pool_path.clone();

        let mut mixed = self
            .chain
            .weight_combinations
            .iter()
            .map(|&(low_weight, high_weight)| {
                MixedWeightedPath::new(vec![
                    WeightedPath::new(lower_path.clone(), low_weight),
                    WeightedPath::new(higher_path.clone(), high_weight),
                ])
            })
            .collect::<Result<Vec<_>>>()?;
        self.simulate_all(mixed.iter_mut(), amount).await;

        // Unmixed paths go first so that they win ties against a split
        let mut candidates = vec![higher, lower];
        candidates.extend(mixed);
        sort_by_value_desc(&mut candidates);
        candidates
            .into_iter()
            .next()
            .ok_or_else(|| SmartPathError::InvalidWeights("no candidate to select".to_string()))
    }

    async fn simulate_all<'a>(
        &self,
        candidates: impl Iterator<Item = &'a mut MixedWeightedPath>,
        amount: &Wei,
    ) {
        join_all(candidates.map(|candidate| candidate.compute_path_values(&self.simulator, amount)))
            .await;
    }
}

fn sort_by_value_desc(candidates: &mut [MixedWeightedPath]) {
    candidates.sort_by(|a, b| b.value_or_zero().cmp(&a.value_or_zero()));
}

/// Drops candidates worth less than `best_value * multiplier`, and any that
/// yield nothing at all.
pub fn filter_irrelevant(
    candidates: Vec<MixedWeightedPath>,
    best_value: &Wei,
    multiplier: f64,
) -> Vec<MixedWeightedPath> {
    let scaled = (multiplier.clamp(0.0, 1.0) * MULTIPLIER_SCALE as f64).round() as u64;
    // value >= best * scaled / SCALE, cross-multiplied
    let threshold = best_value * BigUint::from(scaled);
    let scale = BigUint::from(MULTIPLIER_SCALE);
    candidates
        .into_iter()
        .filter(|candidate| {
            let value = candidate.value_or_zero();
            !value.is_zero() && &value * &scale >= threshold
        })
        .collect()
}

impl std::fmt::Debug for SmartPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmartPath")
            .field("chain_id", &self.chain.chain_id)
            .field("pivots", &self.chain.pivot_tokens.len())
            .finish()
    }
}
