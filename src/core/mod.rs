pub mod caller;
pub mod constants;
pub mod error;
pub mod optimization;
pub mod paths;
pub mod pool;
pub mod rpc;
pub mod simulation;
pub mod token;
pub mod types;
pub mod weighted;
pub use error::{CallError, Result, SmartPathError};
