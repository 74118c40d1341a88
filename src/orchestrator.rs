use super::core::optimization::SmartPath;
use super::core::token::parse_address;
use super::core::types::{Pool, PoolPath, SwapQuote, Wei, WeightedPathResult};
use super::types::{ResponsePool, Route, SwapPathRequest, SwapPathResponse};
use anyhow::{anyhow, Context, Result};
use num_traits::Zero;
use std::str::FromStr;

pub fn validate_request(request: &SwapPathRequest) -> Result<()> {
    if request.token_in.trim().is_empty() || request.token_out.trim().is_empty() {
        return Err(anyhow!("Token in and token out addresses cannot be empty"));
    }
    let token_in = parse_address(&request.token_in)?;
    let token_out = parse_address(&request.token_out)?;
    if token_in == token_out {
        return Err(anyhow!("Token in and token out must differ"));
    }

    let amount = parse_amount(&request.amount)?;
    if amount.is_zero() {
        return Err(anyhow!("Amount must be positive"));
    }
    Ok(())
}

pub fn parse_amount(amount: &str) -> Result<Wei> {
    Wei::from_str(amount.trim()).map_err(|_| anyhow!("Amount must be a decimal integer, got {amount:?}"))
}

pub async fn get_swap_in_path_quote(
    smart_path: &SmartPath,
    request: SwapPathRequest,
) -> Result<SwapPathResponse> {
    validate_request(&request)?;
    let amount = parse_amount(&request.amount)?;
    let token_in = parse_address(&request.token_in)?;
    let token_out = parse_address(&request.token_out)?;

    let quote = smart_path
        .quote_swap_in_path(&amount, token_in, token_out)
        .await
        .context("Error computing swap path")?;

    let chain_id = smart_path.chain_config().chain_id;
    Ok(match quote {
        Some(quote) => build_response(quote, chain_id),
        None => SwapPathResponse {
            token_in: token_in.to_checksum(None),
            token_out: token_out.to_checksum(None),
            token_in_symbol: String::new(),
            token_out_symbol: String::new(),
            amount_in: amount.to_string(),
            amount_out: "0".to_string(),
            chain_id,
            routes: vec![],
        },
    })
}

fn build_response(quote: SwapQuote, chain_id: u64) -> SwapPathResponse {
    SwapPathResponse {
        token_in: quote.token_in.address.to_checksum(None),
        token_out: quote.token_out.address.to_checksum(None),
        token_in_symbol: quote.token_in.symbol.clone(),
        token_out_symbol: quote.token_out.symbol.clone(),
        amount_in: quote.amount_in.to_string(),
        amount_out: quote.amount_out.to_string(),
        chain_id,
        routes: quote.paths.iter().map(build_route).collect(),
    }
}

fn build_route(result: &WeightedPathResult) -> Route {
    let encoded_path = match &result.pool_path {
        PoolPath::V2(_) => None,
        PoolPath::V3(path) => Some(format!("0x{}", alloy_primitives::hex::encode(path.encode()))),
    };
    Route {
        router_function: result.router_function.to_string(),
        command: result.router_function.command(),
        weight: result.weight,
        encoded_path,
        path: result.pool_path.hops().iter().map(build_response_pool).collect(),
    }
}

fn build_response_pool(pool: &Pool) -> ResponsePool {
    let version = match pool {
        Pool::V2(_) => "V2",
        Pool::V3(_) => "V3",
    };
    ResponsePool {
        version: version.to_string(),
        token_in: pool.token_in().address.to_checksum(None),
        token_out: pool.token_out().address.to_checksum(None),
        token_in_symbol: pool.token_in().symbol.clone(),
        token_out_symbol: pool.token_out().symbol.clone(),
        fee: pool.fee().map(|fee| fee.as_u32()),
    }
}
