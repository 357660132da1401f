//! Optimizer configuration.
//!
//! Configuration precedence (highest to lowest):
//! 1. Environment variables (`QUILL_` prefix)
//! 2. JSON document
//! 3. Default values

use serde::{Deserialize, Serialize};

use crate::error::{OptError, OptResult};
use crate::fixpoint::DEFAULT_MAX_ITERATIONS;

/// Highest supported optimization level.
pub const MAX_OPTIMIZATION_LEVEL: u8 = 2;

/// Settings for [`crate::optimize_with`] and [`crate::PassManagerBuilder`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimizerConfig {
    /// Cap on forward/backward rounds of the fixpoint driver.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,

    /// Run the fixpoint driver before cutting phase blocks.
    #[serde(default = "default_true")]
    pub pre_optimize: bool,

    /// 0 = no optimization, 1 = fixpoint driver, 2 = phase blocks.
    #[serde(default = "default_optimization_level")]
    pub optimization_level: u8,
}

fn default_max_iterations() -> usize {
    DEFAULT_MAX_ITERATIONS
}

fn default_true() -> bool {
    true
}

fn default_optimization_level() -> u8 {
    MAX_OPTIMIZATION_LEVEL
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        OptimizerConfig {
            max_iterations: default_max_iterations(),
            pre_optimize: default_true(),
            optimization_level: default_optimization_level(),
        }
    }
}

impl OptimizerConfig {
    /// Parse a JSON document. Missing fields take their defaults.
    pub fn from_json(json: &str) -> OptResult<Self> {
        let config: OptimizerConfig = serde_json::from_str(json)
            .map_err(|e| OptError::InvalidConfiguration(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults overridden by environment variables.
    ///
    /// Reads `QUILL_MAX_ITERATIONS`, `QUILL_PRE_OPTIMIZE` and
    /// `QUILL_OPT_LEVEL`. Values that do not parse are ignored.
    pub fn from_env() -> Self {
        OptimizerConfig::default().merge_env()
    }

    /// Apply the environment variables that are set on top of `self`.
    pub fn merge_env(mut self) -> Self {
        if let Ok(v) = std::env::var("QUILL_MAX_ITERATIONS") {
            if let Ok(val) = v.parse() {
                self.max_iterations = val;
            }
        }
        if let Ok(v) = std::env::var("QUILL_PRE_OPTIMIZE") {
            if let Ok(val) = v.parse() {
                self.pre_optimize = val;
            }
        }
        if let Ok(v) = std::env::var("QUILL_OPT_LEVEL") {
            if let Ok(val) = v.parse() {
                self.optimization_level = val;
            }
        }
        self
    }

    /// Validate configuration values.
    pub fn validate(&self) -> OptResult<()> {
        if self.max_iterations == 0 {
            return Err(OptError::InvalidConfiguration(
                "max_iterations must be greater than 0".to_string(),
            ));
        }
        if self.optimization_level > MAX_OPTIMIZATION_LEVEL {
            return Err(OptError::InvalidConfiguration(format!(
                "optimization_level {} is above the maximum of {MAX_OPTIMIZATION_LEVEL}",
                self.optimization_level
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = OptimizerConfig::default();
        assert_eq!(config.max_iterations, 1000);
        assert!(config.pre_optimize);
        assert_eq!(config.optimization_level, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json_fills_missing_fields() {
        let config = OptimizerConfig::from_json(r#"{"optimization_level": 1}"#).unwrap();
        assert_eq!(config.optimization_level, 1);
        assert_eq!(config.max_iterations, 1000);
        assert!(config.pre_optimize);

        let config = OptimizerConfig::from_json("{}").unwrap();
        assert_eq!(config, OptimizerConfig::default());
    }

    #[test]
    fn test_from_json_rejects_bad_values() {
        let err = OptimizerConfig::from_json(r#"{"optimization_level": 3}"#).unwrap_err();
        assert!(matches!(err, OptError::InvalidConfiguration(_)));

        let err = OptimizerConfig::from_json(r#"{"max_iterations": 0}"#).unwrap_err();
        assert!(matches!(err, OptError::InvalidConfiguration(_)));

        let err = OptimizerConfig::from_json("not json").unwrap_err();
        assert!(matches!(err, OptError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_env_overrides() {
        // SAFETY: No other test reads or writes the QUILL_ variables
        unsafe {
            std::env::set_var("QUILL_MAX_ITERATIONS", "25");
            std::env::set_var("QUILL_PRE_OPTIMIZE", "maybe");
            std::env::set_var("QUILL_OPT_LEVEL", "1");
        }

        let config = OptimizerConfig::from_env();
        assert_eq!(config.max_iterations, 25);
        assert_eq!(config.optimization_level, 1);
        assert!(config.pre_optimize);

        let base = OptimizerConfig {
            pre_optimize: false,
            ..OptimizerConfig::default()
        };
        let merged = base.merge_env();
        assert!(!merged.pre_optimize);
        assert_eq!(merged.max_iterations, 25);

        // SAFETY: Cleaning up test variables
        unsafe {
            std::env::remove_var("QUILL_MAX_ITERATIONS");
            std::env::remove_var("QUILL_PRE_OPTIMIZE");
            std::env::remove_var("QUILL_OPT_LEVEL");
        }
    }

    #[test]
    fn test_serde_roundtrip() {
        let config = OptimizerConfig {
            max_iterations: 7,
            pre_optimize: false,
            optimization_level: 1,
        };
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(OptimizerConfig::from_json(&json).unwrap(), config);
    }
}
