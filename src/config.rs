use super::core::constants::{
    validate_weight_combinations, DEFAULT_IRRELEVANT_VALUE_FILTER_MULTIPLIER,
    DEFAULT_PROBE_TIMEOUT_MS, DEFAULT_WEIGHT_COMBINATIONS,
};
use super::types::SmartPathConfig;
use anyhow::{Context, Result};
use confy;
use std::path::PathBuf;

impl Default for SmartPathConfig {
    fn default() -> Self {
        Self {
            rpc_url: None,
            listen_addr: "127.0.0.1:3000".to_string(),
            log_level: "info".to_string(),
            probe_timeout_ms: DEFAULT_PROBE_TIMEOUT_MS,
            irrelevant_value_filter_multiplier: DEFAULT_IRRELEVANT_VALUE_FILTER_MULTIPLIER,
            weight_combinations: DEFAULT_WEIGHT_COMBINATIONS.to_vec(),
        }
    }
}

impl SmartPathConfig {
    // Load from a specific path, writing the defaults there if the file is missing
    pub fn load_from(path: PathBuf) -> Result<Self> {
        let config: Self = confy::load_path(&path)
            .with_context(|| format!("Error loading config from {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        validate_weight_combinations(&self.weight_combinations)?;
        if !(0.0..=1.0).contains(&self.irrelevant_value_filter_multiplier) {
            anyhow::bail!(
                "irrelevant_value_filter_multiplier must be within [0, 1], got {}",
                self.irrelevant_value_filter_multiplier
            );
        }
        if self.probe_timeout_ms == 0 {
            anyhow::bail!("probe_timeout_ms must be positive");
        }
        Ok(())
    }
}
