use alloy_primitives::Address;
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

use super::error::{Result, SmartPathError};

/// Amount in the smallest unit of a token.
pub type Wei = BigUint;

pub const UNKNOWN_SYMBOL: &str = "???";

/// A resolved ERC-20 token. Identity is the address alone, so a token whose
/// symbol lookup failed still compares equal to a fully resolved one.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Token {
    pub address: Address,
    pub symbol: String,
    pub decimals: u8,
}

impl Token {
    pub fn new(address: Address, symbol: impl Into<String>, decimals: u8) -> Self {
        Self {
            address,
            symbol: symbol.into(),
            decimals,
        }
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.address == other.address
    }
}

impl Eq for Token {}

impl Hash for Token {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.address.hash(state);
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.symbol, self.address)
    }
}

/// Uniswap V3 fee tiers, in hundredths of a basis point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum FeeTier {
    Lowest,
    Low,
    Medium,
    High,
}

impl FeeTier {
    pub const ALL: [FeeTier; 4] = [FeeTier::Lowest, FeeTier::Low, FeeTier::Medium, FeeTier::High];

    pub const fn as_u32(self) -> u32 {
        match self {
            FeeTier::Lowest => 100,
            FeeTier::Low => 500,
            FeeTier::Medium => 3000,
            FeeTier::High => 10000,
        }
    }
}

impl TryFrom<u32> for FeeTier {
    type Error = SmartPathError;

    fn try_from(fee: u32) -> Result<Self> {
        FeeTier::ALL
            .into_iter()
            .find(|tier| tier.as_u32() == fee)
            .ok_or_else(|| SmartPathError::InvalidInput(format!("unsupported V3 fee tier {fee}")))
    }
}

impl From<FeeTier> for u32 {
    fn from(tier: FeeTier) -> u32 {
        tier.as_u32()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct V2OrderedPool {
    pub token_in: Token,
    pub token_out: Token,
}

impl V2OrderedPool {
    // None when both sides are the same token
    pub fn new(token_in: Token, token_out: Token) -> Option<Self> {
        (token_in != token_out).then_some(Self {
            token_in,
            token_out,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct V3OrderedPool {
    pub token_in: Token,
    pub fee: FeeTier,
    pub token_out: Token,
}

impl V3OrderedPool {
    pub fn new(token_in: Token, fee: FeeTier, token_out: Token) -> Option<Self> {
        (token_in != token_out).then_some(Self {
            token_in,
            fee,
            token_out,
        })
    }
}

/// A single hop of either AMM version.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "version")]
pub enum Pool {
    V2(V2OrderedPool),
    V3(V3OrderedPool),
}

impl Pool {
    pub fn token_in(&self) -> &Token {
        match self {
            Pool::V2(pool) => &pool.token_in,
            Pool::V3(pool) => &pool.token_in,
        }
    }

    pub fn token_out(&self) -> &Token {
        match self {
            Pool::V2(pool) => &pool.token_out,
            Pool::V3(pool) => &pool.token_out,
        }
    }

    pub fn fee(&self) -> Option<FeeTier> {
        match self {
            Pool::V2(_) => None,
            Pool::V3(pool) => Some(pool.fee),
        }
    }
}

/// Ordered V2 hops where each hop's output token feeds the next hop.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct V2PoolPath(Vec<V2OrderedPool>);

impl V2PoolPath {
    pub fn new(hops: Vec<V2OrderedPool>) -> Option<Self> {
        let chained = hops.windows(2).all(|w| w[0].token_out == w[1].token_in);
        (!hops.is_empty() && chained).then_some(Self(hops))
    }

    pub fn hops(&self) -> &[V2OrderedPool] {
        &self.0
    }

    // Token sequence as taken by the router's getAmountsOut
    pub fn tokens(&self) -> Vec<Address> {
        let mut tokens = Vec::with_capacity(self.0.len() + 1);
        tokens.push(self.0[0].token_in.address);
        tokens.extend(self.0.iter().map(|hop| hop.token_out.address));
        tokens
    }
}

/// Ordered V3 hops, chained like [`V2PoolPath`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct V3PoolPath(Vec<V3OrderedPool>);

impl V3PoolPath {
    pub fn new(hops: Vec<V3OrderedPool>) -> Option<Self> {
        let chained = hops.windows(2).all(|w| w[0].token_out == w[1].token_in);
        (!hops.is_empty() && chained).then_some(Self(hops))
    }

    pub fn hops(&self) -> &[V3OrderedPool] {
        &self.0
    }

    /// Packed path as read by the quoter and the swap router:
    /// `token_in (20) | fee (3) | token_out (20) | fee (3) | ...`
    pub fn encode(&self) -> Vec<u8> {
        let mut encoded = Vec::with_capacity(20 + self.0.len() * 23);
        encoded.extend_from_slice(self.0[0].token_in.address.as_slice());
        for hop in &self.0 {
            encoded.extend_from_slice(&hop.fee.as_u32().to_be_bytes()[1..]);
            encoded.extend_from_slice(hop.token_out.address.as_slice());
        }
        encoded
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PoolPath {
    V2(V2PoolPath),
    V3(V3PoolPath),
}

impl PoolPath {
    pub fn router_function(&self) -> RouterFunction {
        match self {
            PoolPath::V2(_) => RouterFunction::V2SwapExactIn,
            PoolPath::V3(_) => RouterFunction::V3SwapExactIn,
        }
    }

    pub fn hops(&self) -> Vec<Pool> {
        match self {
            PoolPath::V2(path) => path.hops().iter().cloned().map(Pool::V2).collect(),
            PoolPath::V3(path) => path.hops().iter().cloned().map(Pool::V3).collect(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            PoolPath::V2(path) => path.hops().len(),
            PoolPath::V3(path) => path.hops().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for PoolPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hops = self.hops();
        if let Some(first) = hops.first() {
            write!(f, "{}", first.token_in().symbol)?;
        }
        for hop in &hops {
            match hop.fee() {
                Some(fee) => write!(f, " -({})-> {}", fee.as_u32(), hop.token_out().symbol)?,
                None => write!(f, " -> {}", hop.token_out().symbol)?,
            }
        }
        Ok(())
    }
}

/// Router entry point a sub-path must be executed through.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RouterFunction {
    V2SwapExactIn,
    V3SwapExactIn,
}

impl RouterFunction {
    /// Universal Router command byte.
    pub const fn command(self) -> u8 {
        match self {
            RouterFunction::V2SwapExactIn => 0x08,
            RouterFunction::V3SwapExactIn => 0x00,
        }
    }
}

impl fmt::Display for RouterFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouterFunction::V2SwapExactIn => write!(f, "V2_SWAP_EXACT_IN"),
            RouterFunction::V3SwapExactIn => write!(f, "V3_SWAP_EXACT_IN"),
        }
    }
}

/// Flattened sub-path of the winning route, ready for execution payload building.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightedPathResult {
    pub router_function: RouterFunction,
    pub pool_path: PoolPath,
    pub weight: u8,
}

/// Winning route together with what it is expected to yield.
#[derive(Clone, Debug)]
pub struct SwapQuote {
    pub token_in: Token,
    pub token_out: Token,
    pub amount_in: Wei,
    pub amount_out: Wei,
    pub paths: Vec<WeightedPathResult>,
}
