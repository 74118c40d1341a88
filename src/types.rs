use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SmartPathConfig {
    pub rpc_url: Option<String>,
    pub listen_addr: String,
    pub log_level: String,
    pub probe_timeout_ms: u64,
    pub irrelevant_value_filter_multiplier: f64,
    pub weight_combinations: Vec<(u8, u8)>,
}

#[derive(Serialize, Deserialize, ToSchema, IntoParams, Clone, Debug)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct SwapPathRequest {
    /// Amount of token in, in its smallest unit
    #[schema(example = "1000000000000000000")]
    pub amount: String,

    #[schema(example = "0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2")]
    pub token_in: String,

    #[schema(example = "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48")]
    pub token_out: String,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SwapPathResponse {
    pub token_in: String,
    pub token_out: String,
    pub token_in_symbol: String,
    pub token_out_symbol: String,
    pub amount_in: String,
    pub amount_out: String,
    pub chain_id: u64,
    pub routes: Vec<Route>,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    #[schema(example = "V3_SWAP_EXACT_IN")]
    pub router_function: String,
    pub command: u8,
    pub weight: u8,
    /// Packed V3 path as hex, absent for V2 routes
    pub encoded_path: Option<String>,
    pub path: Vec<ResponsePool>,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResponsePool {
    pub version: String,
    pub token_in: String,
    pub token_out: String,
    pub token_in_symbol: String,
    pub token_out_symbol: String,
    pub fee: Option<u32>,
}
