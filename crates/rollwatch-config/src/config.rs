//! rollwatch.toml configuration parser.
//!
//! ```toml
//! [exit_codes]
//! success = 0
//! unclassified = 1
//! process_crashing = 42
//! ```
//!
//! Every key is optional; missing keys keep their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use rollwatch_status::ExitCodes;

use crate::error::ConfigResult;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollwatchConfig {
    #[serde(default)]
    pub exit_codes: ExitCodes,
}

impl RollwatchConfig {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_toml_str(&content)?)
    }

    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let config: RollwatchConfig = toml::from_str(content)?;
        config.exit_codes.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}
