#[derive(Debug, thiserror::Error)]
pub enum SelectorError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid candidate URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Worker pool could not be started: {0}")]
    PoolStart(#[from] std::io::Error),

    #[error("Probe task failed: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),

    #[error("Worker pool is closed")]
    PoolClosed(#[from] tokio::sync::AcquireError),
}

pub type Result<T> = std::result::Result<T, SelectorError>;
