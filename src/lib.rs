pub mod candidates;
pub mod config;
pub mod error;
pub mod performance;
pub mod prober;
pub mod selector;
pub mod types;

pub use error::{Result, SelectorError};
pub use selector::Selector;
pub use types::{
    Candidate, LogLevel, SelectorConfig, Target, DEFAULT_ATTEMPTS, DEFAULT_POOL_SIZE, DEFAULT_PORT,
    DEFAULT_PROBE_TIMEOUT_MS, DEFAULT_SHUTDOWN_TIMEOUT_MS, SENTINEL_LATENCY_MS,
};

// Re-export commonly used items
pub use config::{NormalizedConfig, resolve_config};
pub use performance::{ProbeFailure, ProbeOutcome, ProbeReport};
pub use prober::{Prober, TcpProber};
