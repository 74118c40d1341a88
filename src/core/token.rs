use alloy_primitives::Address;
use std::str::FromStr;
use std::sync::Arc;

use super::caller::ContractCaller;
use super::error::{Result, SmartPathError};
use super::types::{Token, UNKNOWN_SYMBOL};

/// Parses a textual address. Mixed-case input must carry a valid EIP-55 checksum.
pub fn parse_address(value: &str) -> Result<Address> {
    let value = value.trim();
    let hex = value.strip_prefix("0x").unwrap_or(value);
    let has_lower = hex.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = hex.chars().any(|c| c.is_ascii_uppercase());

    let parsed = if has_lower && has_upper {
        Address::parse_checksummed(value, None).ok()
    } else {
        Address::from_str(value).ok()
    };
    parsed.ok_or_else(|| SmartPathError::InvalidAddress(value.to_string()))
}

#[derive(Clone)]
pub struct TokenResolver {
    caller: Arc<dyn ContractCaller>,
}

impl TokenResolver {
    pub fn new(caller: Arc<dyn ContractCaller>) -> Self {
        Self { caller }
    }

    // decimals() is required to price anything, symbol() is cosmetic
    pub async fn resolve(&self, address: Address) -> Result<Token> {
        let (decimals, symbol) =
            futures::join!(self.caller.decimals(address), self.caller.symbol(address));

        let decimals = decimals.map_err(|source| SmartPathError::Metadata { address, source })?;
        let symbol = symbol.unwrap_or_else(|e| {
            tracing::warn!(%address, error = %e, "symbol() lookup failed, using placeholder");
            UNKNOWN_SYMBOL.to_string()
        });

        Ok(Token::new(address, symbol, decimals))
    }
}
