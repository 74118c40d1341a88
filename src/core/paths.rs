use futures::future::join_all;

use super::pool::PoolProbe;
use super::types::{FeeTier, Token, V2OrderedPool, V2PoolPath, V3OrderedPool, V3PoolPath};

/// Enumerates the 1-hop and 2-hop (via one pivot) paths whose pools all exist.
///
/// Every probe of a build is in flight at the same time. `join_all` hands the
/// results back in input order, and candidates are paired with their probe
/// results by position, never by completion order.
#[derive(Clone)]
pub struct PathBuilder {
    probe: PoolProbe,
    pivots: Vec<Token>,
    fee_tiers: Vec<FeeTier>,
}

impl PathBuilder {
    pub fn new(probe: PoolProbe, pivots: Vec<Token>, fee_tiers: Vec<FeeTier>) -> Self {
        Self {
            probe,
            pivots,
            fee_tiers,
        }
    }

    pub async fn build_v2_paths(&self, token_in: &Token, token_out: &Token) -> Vec<V2PoolPath> {
        let mut candidates: Vec<Vec<V2OrderedPool>> = vec![];
        if let Some(direct) = V2OrderedPool::new(token_in.clone(), token_out.clone()) {
            candidates.push(vec![direct]);
        }
        for pivot in self
            .pivots
            .iter()
            .filter(|pivot| *pivot != token_in && *pivot != token_out)
        {
            let first = V2OrderedPool::new(token_in.clone(), pivot.clone());
            let second = V2OrderedPool::new(pivot.clone(), token_out.clone());
            if let (Some(first), Some(second)) = (first, second) {
                candidates.push(vec![first, second]);
            }
        }

        let probes = candidates.iter().map(|hops| async move {
            let hop_probes = hops
                .iter()
                .map(|hop| self.probe.v2_pool_exists(&hop.token_in, &hop.token_out));
            join_all(hop_probes).await.into_iter().all(|exists| exists)
        });
        let live = join_all(probes).await;

        let paths: Vec<V2PoolPath> = candidates
            .into_iter()
            .zip(live)
            .filter(|(_, live)| *live)
            .filter_map(|(hops, _)| V2PoolPath::new(hops))
            .collect();
        tracing::debug!(
            token_in = %token_in,
            token_out = %token_out,
            count = paths.len(),
            "built V2 paths"
        );
        paths
    }

    pub async fn build_v3_paths(&self, token_in: &Token, token_out: &Token) -> Vec<V3PoolPath> {
        let direct: Vec<V3OrderedPool> = self
            .fee_tiers
            .iter()
            .filter_map(|&fee| V3OrderedPool::new(token_in.clone(), fee, token_out.clone()))
            .collect();

        // Pools out of token_in and pools into token_out are probed separately
        // and joined on the pivot afterwards.
        let from_token_in: Vec<V3OrderedPool> = self
            .pivot_fee_combinations(token_in, token_out)
            .filter_map(|(pivot, fee)| V3OrderedPool::new(token_in.clone(), fee, pivot.clone()))
            .collect();
        let into_token_out: Vec<V3OrderedPool> = self
            .pivot_fee_combinations(token_in, token_out)
            .filter_map(|(pivot, fee)| V3OrderedPool::new(pivot.clone(), fee, token_out.clone()))
            .collect();

        let (direct, from_token_in, into_token_out) = futures::join!(
            self.live_v3_pools(direct),
            self.live_v3_pools(from_token_in),
            self.live_v3_pools(into_token_out),
        );

        let mut paths: Vec<V3PoolPath> = direct
            .into_iter()
            .filter_map(|pool| V3PoolPath::new(vec![pool]))
            .collect();
        for first in &from_token_in {
            for second in into_token_out
                .iter()
                .filter(|second| second.token_in == first.token_out)
            {
                if let Some(path) = V3PoolPath::new(vec![first.clone(), second.clone()]) {
                    paths.push(path);
                }
            }
        }

        tracing::debug!(
            token_in = %token_in,
            token_out = %token_out,
            count = paths.len(),
            "built V3 paths"
        );
        paths
    }

    // An endpoint used as pivot would only re-probe the direct pools
    fn pivot_fee_combinations<'a>(
        &'a self,
        token_in: &'a Token,
        token_out: &'a Token,
    ) -> impl Iterator<Item = (&'a Token, FeeTier)> + 'a {
        self.pivots
            .iter()
            .filter(move |pivot| *pivot != token_in && *pivot != token_out)
            .flat_map(move |pivot| self.fee_tiers.iter().map(move |&fee| (pivot, fee)))
    }

    async fn live_v3_pools(&self, pools: Vec<V3OrderedPool>) -> Vec<V3OrderedPool> {
        let probes = pools
            .iter()
            .map(|pool| self.probe.v3_pool_exists(&pool.token_in, &pool.token_out, pool.fee));
        let live = join_all(probes).await;
        pools
            .into_iter()
            .zip(live)
            .filter_map(|(pool, live)| live.then_some(pool))
            .collect()
    }
}
