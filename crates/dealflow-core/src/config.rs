//! Engine configuration.
//!
//! Layered, lowest precedence first: built-in defaults, an optional JSON file,
//! then `DEALFLOW_*` environment variables.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::{DealflowError, Result};

pub const ENV_REPLY_DELAY_MS: &str = "DEALFLOW_REPLY_DELAY_MS";
pub const ENV_RNG_SEED: &str = "DEALFLOW_RNG_SEED";

pub const DEFAULT_REPLY_DELAY_MS: u64 = 1_200;

/// Tunables for the conversation simulator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Delay between a submission and its counterpart reply.
    pub reply_delay_ms: u64,
    /// Fixed seed for reply selection. `None` seeds from OS entropy.
    pub rng_seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            reply_delay_ms: DEFAULT_REPLY_DELAY_MS,
            rng_seed: None,
        }
    }
}

impl EngineConfig {
    pub fn reply_delay(&self) -> Duration {
        Duration::from_millis(self.reply_delay_ms)
    }

    pub fn with_reply_delay_ms(mut self, ms: u64) -> Self {
        self.reply_delay_ms = ms;
        self
    }

    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    /// Read a JSON config file. Missing fields take their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Defaults overlaid with the process environment.
    pub fn from_env() -> Result<Self> {
        Self::default().overlay(|key| std::env::var(key).ok())
    }

    /// Overlay `DEALFLOW_*` variables obtained through `lookup`.
    ///
    /// Taking a lookup function keeps tests away from process-global state.
    pub fn overlay<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(ENV_REPLY_DELAY_MS) {
            self.reply_delay_ms = raw.trim().parse().map_err(|_| {
                DealflowError::Config(format!("{ENV_REPLY_DELAY_MS} is not a number: {raw:?}"))
            })?;
        }
        if let Some(raw) = lookup(ENV_RNG_SEED) {
            let seed = raw.trim().parse().map_err(|_| {
                DealflowError::Config(format!("{ENV_RNG_SEED} is not a number: {raw:?}"))
            })?;
            self.rng_seed = Some(seed);
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.reply_delay(), Duration::from_millis(1_200));
        assert_eq!(config.rng_seed, None);
    }

    #[test]
    fn test_overlay_reads_variables() {
        let config = EngineConfig::default()
            .overlay(env(&[(ENV_REPLY_DELAY_MS, "250"), (ENV_RNG_SEED, " 42 ")]))
            .unwrap();
        assert_eq!(config.reply_delay_ms, 250);
        assert_eq!(config.rng_seed, Some(42));
    }

    #[test]
    fn test_overlay_rejects_garbage() {
        let err = EngineConfig::default()
            .overlay(env(&[(ENV_REPLY_DELAY_MS, "soon")]))
            .unwrap_err();
        assert!(matches!(err, DealflowError::Config(msg) if msg.contains(ENV_REPLY_DELAY_MS)));
    }

    #[test]
    fn test_overlay_without_variables_is_identity() {
        let base = EngineConfig::default().with_rng_seed(7);
        let config = base.clone().overlay(env(&[])).unwrap();
        assert_eq!(config, base);
    }

    #[test]
    fn test_json_file_partial() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "rng_seed": 9 }}"#).unwrap();
        let config = EngineConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.rng_seed, Some(9));
        assert_eq!(config.reply_delay_ms, DEFAULT_REPLY_DELAY_MS);
    }

    #[test]
    fn test_json_file_unknown_field() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "reply_delay": 9 }}"#).unwrap();
        let err = EngineConfig::from_json_file(file.path()).unwrap_err();
        assert!(matches!(err, DealflowError::Serialization(_)));
    }

    #[test]
    fn test_json_file_missing() {
        let err = EngineConfig::from_json_file(Path::new("/nonexistent/dealflow.json"))
            .unwrap_err();
        assert!(matches!(err, DealflowError::Io(_)));
    }
}
