use alloy_primitives::Address;
use thiserror::Error;

// Failure of a single on-chain view call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CallError {
    #[error("RPC call failed: {0}")]
    Rpc(String),

    #[error("Call reverted: {0}")]
    Reverted(String),

    #[error("Value conversion failed: {0}")]
    Conversion(String),
}

#[derive(Error, Debug)]
pub enum SmartPathError {
    #[error("Neither a contract caller nor an RPC endpoint was supplied")]
    MissingProvider,

    #[error("Invalid RPC URL: {0}")]
    InvalidRpcUrl(String),

    #[error("Chain id {0} has no Uniswap configuration")]
    UnsupportedChain(u64),

    #[error("Address {0} is invalid or not checksummed")]
    InvalidAddress(String),

    #[error("Could not resolve token metadata for {address}: {source}")]
    Metadata {
        address: Address,
        #[source]
        source: CallError,
    },

    #[error("Invalid swap request: {0}")]
    InvalidInput(String),

    #[error("Invalid path weights: {0}")]
    InvalidWeights(String),

    #[error(transparent)]
    Call(#[from] CallError),
}

pub type Result<T> = std::result::Result<T, SmartPathError>;
