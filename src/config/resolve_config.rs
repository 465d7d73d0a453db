use std::time::Duration;

use crate::types::{LogLevel, SelectorConfig};
use crate::{Result, SelectorError};

#[derive(Debug, Clone)]
pub struct NormalizedConfig {
    /// Number of worker threads, and the number of candidates probed at once
    pub pool_size: usize,
    /// Sequential probe attempts per candidate
    pub attempts: u32,
    /// Upper bound on a single connect attempt
    pub probe_timeout: Duration,
    /// How long `release` waits for in-flight work before dropping threads
    pub shutdown_timeout: Duration,
    /// Level the selection outcome is logged at
    pub log_level: LogLevel,
}

pub fn resolve_config(config: SelectorConfig) -> Result<NormalizedConfig> {
    if config.pool_size == 0 {
        return Err(SelectorError::InvalidConfig("pool_size must be at least 1".to_string()));
    }
    if config.attempts == 0 {
        return Err(SelectorError::InvalidConfig("attempts must be at least 1".to_string()));
    }
    if config.probe_timeout_ms == 0 {
        return Err(SelectorError::InvalidConfig("probe_timeout_ms must be at least 1".to_string()));
    }

    Ok(NormalizedConfig {
        pool_size: config.pool_size,
        attempts: config.attempts,
        probe_timeout: Duration::from_millis(config.probe_timeout_ms),
        shutdown_timeout: Duration::from_millis(config.shutdown_timeout_ms),
        log_level: config.log_level,
    })
}
