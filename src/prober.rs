use std::{
    net::SocketAddr,
    time::{Duration, Instant},
};

use async_trait::async_trait;
use tokio::{net::TcpStream, time::timeout};

use crate::{
    performance::{ProbeFailure, ProbeOutcome},
    Target,
};

/// A single reachability check against a target.
///
/// Implementations must not error out: every problem is reported as
/// [`ProbeOutcome::Failed`] so one bad host can never abort a selection run.
#[async_trait]
pub trait Prober: Send + Sync {
    async fn probe(&self, target: &Target, timeout: Duration) -> ProbeOutcome;
}

/// Resolves the target with the platform resolver and times a TCP connect to it.
#[derive(Debug, Clone, Copy, Default)]
pub struct TcpProber;

impl TcpProber {
    pub fn new() -> Self {
        Self
    }

    pub async fn resolve(&self, target: &Target) -> Result<SocketAddr, ProbeFailure> {
        let mut addrs = tokio::net::lookup_host((target.host.as_str(), target.port))
            .await
            .map_err(|e| ProbeFailure::Resolution(e.to_string()))?;

        addrs
            .next()
            .ok_or_else(|| ProbeFailure::Resolution(format!("no addresses for {}", target.host)))
    }

    /// Time a connect to an already resolved address.
    pub async fn connect(&self, addr: SocketAddr, timeout_duration: Duration) -> ProbeOutcome {
        let start = Instant::now();

        let response = timeout(timeout_duration, TcpStream::connect(addr)).await;

        match response {
            Ok(Ok(_stream)) => ProbeOutcome::Reachable(start.elapsed()),
            Ok(Err(e)) => ProbeOutcome::Failed(ProbeFailure::Unreachable(e.to_string())),
            Err(_) => ProbeOutcome::Failed(ProbeFailure::Timeout {
                duration_ms: timeout_duration.as_millis() as u64,
            }),
        }
    }
}

#[async_trait]
impl Prober for TcpProber {
    async fn probe(&self, target: &Target, timeout_duration: Duration) -> ProbeOutcome {
        match self.resolve(target).await {
            Ok(addr) => self.connect(addr, timeout_duration).await,
            Err(failure) => ProbeOutcome::Failed(failure),
        }
    }
}
