#![allow(dead_code)]

use alloy_primitives::Address;
use async_trait::async_trait;
use num_bigint::BigUint;
use num_traits::Zero;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use smart_path::core::caller::{CallResult, ContractCaller};
use smart_path::core::constants::{ChainConfig, DEFAULT_WEIGHT_COMBINATIONS};
use smart_path::core::types::{FeeTier, Token, Wei};
use smart_path::core::CallError;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

pub const V2_FACTORY: Address = Address::repeat_byte(0xf1);
pub const V2_ROUTER: Address = Address::repeat_byte(0xf2);
pub const V3_FACTORY: Address = Address::repeat_byte(0xf3);
pub const V3_QUOTER: Address = Address::repeat_byte(0xf4);

pub fn token(byte: u8, symbol: &str) -> Token {
    Token::new(Address::repeat_byte(byte), symbol, 18)
}

pub fn token_in() -> Token {
    token(0x01, "IN")
}

pub fn token_out() -> Token {
    token(0x02, "OUT")
}

pub fn pivots(count: u8) -> Vec<Token> {
    (0..count)
        .map(|i| token(0x10 + i, &format!("PIV{i}")))
        .collect()
}

pub fn chain_config(pivot_tokens: Vec<Token>) -> ChainConfig {
    ChainConfig {
        chain_id: 31337,
        v2_factory: V2_FACTORY,
        v2_router: V2_ROUTER,
        v3_factory: V3_FACTORY,
        v3_quoter: V3_QUOTER,
        pivot_tokens,
        fee_tiers: FeeTier::ALL.to_vec(),
        weight_combinations: DEFAULT_WEIGHT_COMBINATIONS.to_vec(),
        irrelevant_value_filter_multiplier: 0.9,
        probe_timeout: Duration::from_millis(200),
    }
}

fn pair_key(a: Address, b: Address) -> (Address, Address) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

#[derive(Clone, Debug)]
struct Reserves {
    token0: Address,
    reserve0: Wei,
    reserve1: Wei,
}

impl Reserves {
    fn new(token_a: Address, reserve_a: u128, reserve_b: u128) -> Self {
        Self {
            token0: token_a,
            reserve0: BigUint::from(reserve_a),
            reserve1: BigUint::from(reserve_b),
        }
    }

    // Constant product with a fee in hundredths of a basis point
    fn amount_out(&self, token_in: Address, amount_in: &Wei, fee: u32) -> Wei {
        let (reserve_in, reserve_out) = if token_in == self.token0 {
            (&self.reserve0, &self.reserve1)
        } else {
            (&self.reserve1, &self.reserve0)
        };
        let amount_in_with_fee = amount_in * BigUint::from(1_000_000 - fee);
        let numerator = &amount_in_with_fee * reserve_out;
        let denominator = reserve_in * BigUint::from(1_000_000u32) + &amount_in_with_fee;
        if denominator.is_zero() {
            return Wei::zero();
        }
        numerator / denominator
    }
}

/// In-memory chain with Uniswap-like factories, router and quoter.
pub struct FakeChain {
    chain_id: u64,
    decimals: HashMap<Address, u8>,
    symbols: HashMap<Address, String>,
    v2_pools: HashMap<(Address, Address), Reserves>,
    v3_pools: HashMap<(Address, Address, u32), Reserves>,
    failing_probes: HashSet<(Address, Address)>,
    slow_probes: HashSet<(Address, Address)>,
    reverting_v3_quotes: bool,
    fixed_v2_outputs: HashMap<Vec<Address>, Wei>,
    delays: Option<Mutex<StdRng>>,
    pub pool_lookups: AtomicUsize,
    pub v2_amounts_in: Mutex<Vec<Wei>>,
}

impl FakeChain {
    pub fn new() -> Self {
        Self {
            chain_id: 31337,
            decimals: HashMap::new(),
            symbols: HashMap::new(),
            v2_pools: HashMap::new(),
            v3_pools: HashMap::new(),
            failing_probes: HashSet::new(),
            slow_probes: HashSet::new(),
            reverting_v3_quotes: false,
            fixed_v2_outputs: HashMap::new(),
            delays: None,
            pool_lookups: AtomicUsize::new(0),
            v2_amounts_in: Mutex::new(vec![]),
        }
    }

    /// Registers metadata for both tokens of the default pair and every pivot.
    pub fn with_standard_tokens(mut self, pivots: &[Token]) -> Self {
        for token in [token_in(), token_out()].iter().chain(pivots) {
            self = self.with_token(token);
        }
        self
    }

    pub fn with_chain_id(mut self, chain_id: u64) -> Self {
        self.chain_id = chain_id;
        self
    }

    pub fn with_token(mut self, token: &Token) -> Self {
        self.decimals.insert(token.address, token.decimals);
        self.symbols.insert(token.address, token.symbol.clone());
        self
    }

    pub fn without_symbol(mut self, token: &Token) -> Self {
        self.symbols.remove(&token.address);
        self
    }

    pub fn without_decimals(mut self, token: &Token) -> Self {
        self.decimals.remove(&token.address);
        self
    }

    pub fn with_v2_pool(mut self, a: &Token, b: &Token, reserve_a: u128, reserve_b: u128) -> Self {
        self.v2_pools.insert(
            pair_key(a.address, b.address),
            Reserves::new(a.address, reserve_a, reserve_b),
        );
        self
    }

    pub fn with_v3_pool(
        mut self,
        a: &Token,
        b: &Token,
        fee: FeeTier,
        reserve_a: u128,
        reserve_b: u128,
    ) -> Self {
        let (x, y) = pair_key(a.address, b.address);
        self.v3_pools.insert(
            (x, y, fee.as_u32()),
            Reserves::new(a.address, reserve_a, reserve_b),
        );
        self
    }

    pub fn with_failing_probe(mut self, a: &Token, b: &Token) -> Self {
        self.failing_probes.insert(pair_key(a.address, b.address));
        self
    }

    pub fn with_slow_probe(mut self, a: &Token, b: &Token) -> Self {
        self.slow_probes.insert(pair_key(a.address, b.address));
        self
    }

    pub fn with_reverting_v3_quotes(mut self) -> Self {
        self.reverting_v3_quotes = true;
        self
    }

    /// The router quotes exactly `amount_out` along `tokens`, whatever goes in.
    pub fn with_fixed_v2_output(mut self, tokens: &[Token], amount_out: u128) -> Self {
        let path = tokens.iter().map(|token| token.address).collect();
        self.fixed_v2_outputs.insert(path, BigUint::from(amount_out));
        self
    }

    /// Every call sleeps a random few milliseconds, scrambling completion order.
    pub fn with_random_delays(mut self, seed: u64) -> Self {
        self.delays = Some(Mutex::new(StdRng::seed_from_u64(seed)));
        self
    }

    async fn jitter(&self) {
        let delay = match &self.delays {
            Some(rng) => rng.lock().unwrap().gen_range(0..15u64),
            None => return,
        };
        tokio::time::sleep(Duration::from_millis(delay)).await;
    }

    async fn probe_guard(&self, a: Address, b: Address) -> CallResult<()> {
        self.pool_lookups.fetch_add(1, Ordering::SeqCst);
        self.jitter().await;
        let key = pair_key(a, b);
        if self.slow_probes.contains(&key) {
            tokio::time::sleep(Duration::from_secs(5)).await;
        }
        if self.failing_probes.contains(&key) {
            return Err(CallError::Rpc("connection reset".to_string()));
        }
        Ok(())
    }

    fn pool_address(a: Address, b: Address, fee: u32) -> Address {
        let mut bytes = [0u8; 20];
        bytes[0] = 0xaa;
        bytes[1..4].copy_from_slice(&fee.to_be_bytes()[1..]);
        bytes[4] = a.0[0];
        bytes[5] = b.0[0];
        Address::from(bytes)
    }
}

fn decode_v3_path(path: &[u8]) -> CallResult<(Address, Vec<(u32, Address)>)> {
    if path.len() < 43 || (path.len() - 20) % 23 != 0 {
        return Err(CallError::Reverted("malformed path".to_string()));
    }
    let first = Address::from_slice(&path[..20]);
    let hops = path[20..]
        .chunks(23)
        .map(|chunk| {
            let fee = u32::from_be_bytes([0, chunk[0], chunk[1], chunk[2]]);
            (fee, Address::from_slice(&chunk[3..]))
        })
        .collect();
    Ok((first, hops))
}

#[async_trait]
impl ContractCaller for FakeChain {
    async fn chain_id(&self) -> CallResult<u64> {
        Ok(self.chain_id)
    }

    async fn decimals(&self, token: Address) -> CallResult<u8> {
        self.jitter().await;
        self.decimals
            .get(&token)
            .copied()
            .ok_or_else(|| CallError::Reverted("execution reverted".to_string()))
    }

    async fn symbol(&self, token: Address) -> CallResult<String> {
        self.jitter().await;
        self.symbols
            .get(&token)
            .cloned()
            .ok_or_else(|| CallError::Reverted("execution reverted".to_string()))
    }

    async fn get_pair(
        &self,
        factory: Address,
        token_a: Address,
        token_b: Address,
    ) -> CallResult<Address> {
        assert_eq!(factory, V2_FACTORY);
        self.probe_guard(token_a, token_b).await?;
        let (x, y) = pair_key(token_a, token_b);
        Ok(if self.v2_pools.contains_key(&(x, y)) {
            Self::pool_address(x, y, 0)
        } else {
            Address::ZERO
        })
    }

    async fn get_pool(
        &self,
        factory: Address,
        token_a: Address,
        token_b: Address,
        fee: u32,
    ) -> CallResult<Address> {
        assert_eq!(factory, V3_FACTORY);
        self.probe_guard(token_a, token_b).await?;
        let (x, y) = pair_key(token_a, token_b);
        Ok(if self.v3_pools.contains_key(&(x, y, fee)) {
            Self::pool_address(x, y, fee)
        } else {
            Address::ZERO
        })
    }

    async fn get_amounts_out(
        &self,
        router: Address,
        amount_in: &Wei,
        path: &[Address],
    ) -> CallResult<Vec<Wei>> {
        assert_eq!(router, V2_ROUTER);
        self.jitter().await;
        self.v2_amounts_in.lock().unwrap().push(amount_in.clone());
        if let Some(amount_out) = self.fixed_v2_outputs.get(path) {
            return Ok(vec![amount_in.clone(), amount_out.clone()]);
        }
        let mut amounts = vec![amount_in.clone()];
        for hop in path.windows(2) {
            let reserves = self
                .v2_pools
                .get(&pair_key(hop[0], hop[1]))
                .ok_or_else(|| CallError::Reverted("UniswapV2Library: INVALID_PATH".to_string()))?;
            let last = amounts.last().cloned().unwrap_or_default();
            amounts.push(reserves.amount_out(hop[0], &last, 3000));
        }
        Ok(amounts)
    }

    async fn quote_exact_input(
        &self,
        quoter: Address,
        path: &[u8],
        amount_in: &Wei,
    ) -> CallResult<Wei> {
        assert_eq!(quoter, V3_QUOTER);
        self.jitter().await;
        if self.reverting_v3_quotes {
            return Err(CallError::Reverted("execution reverted: SPL".to_string()));
        }
        let (mut current, hops) = decode_v3_path(path)?;
        let mut amount = amount_in.clone();
        for (fee, next) in hops {
            let (x, y) = pair_key(current, next);
            let reserves = self
                .v3_pools
                .get(&(x, y, fee))
                .ok_or_else(|| CallError::Reverted("pool missing".to_string()))?;
            amount = reserves.amount_out(current, &amount, fee);
            current = next;
        }
        Ok(amount)
    }
}
