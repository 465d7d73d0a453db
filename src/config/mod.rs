pub mod resolve_config;

pub use resolve_config::{NormalizedConfig, resolve_config};
