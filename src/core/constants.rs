use alloy_primitives::{address, Address};
use std::time::Duration;

use super::error::{Result, SmartPathError};
use super::types::{FeeTier, Token};
use crate::types::SmartPathConfig;

pub const MAINNET: u64 = 1;
pub const ARBITRUM_ONE: u64 = 42161;

// (weight of the lower-valued path, weight of the higher-valued path)
pub const DEFAULT_WEIGHT_COMBINATIONS: [(u8, u8); 5] = [(10, 90), (20, 80), (30, 70), (40, 60), (50, 50)];
pub const DEFAULT_IRRELEVANT_VALUE_FILTER_MULTIPLIER: f64 = 0.9;
pub const DEFAULT_PROBE_TIMEOUT_MS: u64 = 5_000;

const UNISWAP_V3_FACTORY: Address = address!("1F98431c8aD98523631AE4a59f267346ea31F984");
const UNISWAP_V3_QUOTER: Address = address!("b27308f9F90D607463bb33eA1BeBb41C27CE5AB6");

/// Per-chain constant tables, fixed when a `SmartPath` is built.
#[derive(Clone, Debug)]
pub struct ChainConfig {
    pub chain_id: u64,
    pub v2_factory: Address,
    pub v2_router: Address,
    pub v3_factory: Address,
    pub v3_quoter: Address,
    pub pivot_tokens: Vec<Token>,
    pub fee_tiers: Vec<FeeTier>,
    pub weight_combinations: Vec<(u8, u8)>,
    pub irrelevant_value_filter_multiplier: f64,
    pub probe_timeout: Duration,
}

impl ChainConfig {
    pub fn for_chain(chain_id: u64) -> Result<Self> {
        let (v2_factory, v2_router, pivot_tokens) = match chain_id {
            MAINNET => (
                address!("5C69bEe701ef814a2B6a3EDD4B1652CB9cc5aA6f"),
                address!("7a250d5630B4cF539739dF2C5dAcb4c659F2488D"),
                vec![
                    Token::new(address!("C02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2"), "WETH", 18),
                    Token::new(address!("A0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48"), "USDC", 6),
                    Token::new(address!("dAC17F958D2ee523a2206206994597C13D831ec7"), "USDT", 6),
                    Token::new(address!("6B175474E89094C44Da98b954EedeAC495271d0F"), "DAI", 18),
                    Token::new(address!("2260FAC5E5542a773Aa44fBCfeDf7C193bc2C599"), "WBTC", 8),
                ],
            ),
            ARBITRUM_ONE => (
                address!("f1D7CC64Fb4452F05c498126312eBE29f30Fbcf9"),
                address!("4752ba5DBc23f44D87826276BF6Fd6b1C372aD24"),
                vec![
                    Token::new(address!("82aF49447D8a07e3bd95BD0d56f35241523fBab1"), "WETH", 18),
                    Token::new(address!("af88d065e77c8cC2239327C5EDb3A432268e5831"), "USDC", 6),
                    Token::new(address!("Fd086bC7CD5C481DCC9C85ebE478A1C0b69FCbb9"), "USDT", 6),
                    Token::new(address!("DA10009cBd5D07dd0CeCc66161FC93D7c9000da1"), "DAI", 18),
                    Token::new(address!("2f2a2543B76A4166549F7aaB2e75Bef0aefC5B0f"), "WBTC", 8),
                ],
            ),
            other => return Err(SmartPathError::UnsupportedChain(other)),
        };

        Ok(Self {
            chain_id,
            v2_factory,
            v2_router,
            v3_factory: UNISWAP_V3_FACTORY,
            v3_quoter: UNISWAP_V3_QUOTER,
            pivot_tokens,
            fee_tiers: FeeTier::ALL.to_vec(),
            weight_combinations: DEFAULT_WEIGHT_COMBINATIONS.to_vec(),
            irrelevant_value_filter_multiplier: DEFAULT_IRRELEVANT_VALUE_FILTER_MULTIPLIER,
            probe_timeout: Duration::from_millis(DEFAULT_PROBE_TIMEOUT_MS),
        })
    }

    /// Applies the tuning knobs of a loaded config file on top of the chain tables.
    pub fn with_settings(mut self, settings: &SmartPathConfig) -> Result<Self> {
        self.weight_combinations = settings.weight_combinations.clone();
        self.irrelevant_value_filter_multiplier = settings.irrelevant_value_filter_multiplier;
        self.probe_timeout = Duration::from_millis(settings.probe_timeout_ms);
        self.validate()?;
        Ok(self)
    }

    /// Checks the tuning tables once, so a search never fails on them later.
    pub fn validate(&self) -> Result<()> {
        validate_weight_combinations(&self.weight_combinations)?;
        let multiplier = self.irrelevant_value_filter_multiplier;
        // NaN fails the range check too
        if !(0.0..=1.0).contains(&multiplier) {
            return Err(SmartPathError::InvalidInput(format!(
                "irrelevant value filter multiplier must be within [0, 1], got {multiplier}"
            )));
        }
        Ok(())
    }
}

pub fn validate_weight_combinations(combinations: &[(u8, u8)]) -> Result<()> {
    for &(low, high) in combinations {
        if low == 0 || high == 0 || u16::from(low) + u16::from(high) != 100 {
            return Err(SmartPathError::InvalidWeights(format!(
                "({low}, {high}) must be two non-zero weights summing to 100"
            )));
        }
    }
    Ok(())
}
