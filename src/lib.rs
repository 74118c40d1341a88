pub mod config;
pub mod core;
pub mod logging;
pub mod orchestrator;
pub mod types;

pub use crate::core::caller::ContractCaller;
pub use crate::core::optimization::SmartPath;
