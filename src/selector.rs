use std::sync::Arc;

use futures::future::join_all;
use tokio::{
    runtime::{Handle, Runtime, RuntimeFlavor},
    sync::Semaphore,
};

use crate::{
    config::{NormalizedConfig, resolve_config},
    performance::{measure_target, pick_fastest, rank, ProbeReport},
    prober::{Prober, TcpProber},
    Candidate, LogLevel, Result, SelectorConfig,
};

/**
 * Probes a batch of candidates concurrently and picks the one with the lowest
 * mean latency.
 *
 * The selector owns a fixed-size worker pool. It is released explicitly with
 * [`Selector::release`], or on drop if the owner never got that far, so every
 * exit path of the owning scope tears the pool down.
 *
 * `select_best` blocks the calling thread. Called from a worker of a
 * multi-thread runtime it moves that worker aside with `block_in_place`;
 * from a current-thread runtime it cannot block and returns `None`.
 */
pub struct Selector {
    config: NormalizedConfig,
    runtime: Option<Runtime>,
    permits: Arc<Semaphore>,
    prober: Arc<dyn Prober>,
}

impl std::fmt::Debug for Selector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Selector")
            .field("config", &self.config)
            .field("available_permits", &self.permits.available_permits())
            .field("released", &self.runtime.is_none())
            .finish()
    }
}

impl Selector {
    pub fn new() -> Result<Self> {
        Self::with_config(SelectorConfig::default())
    }

    pub fn with_config(config: SelectorConfig) -> Result<Self> {
        Self::with_prober(config, Arc::new(TcpProber::new()))
    }

    pub fn with_prober(config: SelectorConfig, prober: Arc<dyn Prober>) -> Result<Self> {
        let config = resolve_config(config)?;

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(config.pool_size)
            .thread_name("hostpick-worker")
            .enable_all()
            .build()?;

        tracing::debug!(pool_size = config.pool_size, "worker pool started");

        Ok(Self {
            permits: Arc::new(Semaphore::new(config.pool_size)),
            runtime: Some(runtime),
            prober,
            config,
        })
    }

    /// Run `f` with a fresh selector and release it afterwards, even if `f` panics.
    pub fn scoped<F, T>(config: SelectorConfig, f: F) -> Result<T>
    where
        F: FnOnce(&Selector) -> T,
    {
        let selector = Self::with_config(config)?;
        let output = f(&selector);
        selector.release();
        Ok(output)
    }

    pub fn config(&self) -> &NormalizedConfig {
        &self.config
    }

    /// Probe every candidate and return a copy of the fastest one.
    ///
    /// Each candidate's latency is filled in place. Returns `None` when the
    /// input is empty, when no candidate answered a single attempt, or when
    /// the pool itself failed mid-run; individual probe failures never
    /// surface as errors.
    pub fn select_best(&self, candidates: &mut [Candidate]) -> Option<Candidate> {
        if candidates.is_empty() {
            self.log(0, None, "no candidates to probe");
            return None;
        }

        let runtime = self.runtime.as_ref()?;

        let batch = match Handle::try_current() {
            Err(_) => runtime.block_on(self.probe_all(candidates)),
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| runtime.block_on(self.probe_all(candidates)))
            }
            Ok(_) => {
                tracing::warn!("selection skipped, cannot block inside a current-thread runtime");
                return None;
            }
        };

        let reports = match batch {
            Ok(reports) => reports,
            Err(e) => {
                tracing::warn!(error = %e, "selection aborted, worker pool failed");
                return None;
            }
        };

        for (idx, report) in reports {
            candidates[idx].record(report);
        }

        for (position, candidate) in rank(candidates).into_iter().enumerate() {
            tracing::debug!(rank = position + 1, candidate = %candidate, "ranked");
        }

        match pick_fastest(candidates) {
            Some(idx) => {
                let best = candidates[idx].clone();
                self.log(candidates.len(), Some(&best), "selected fastest candidate");
                Some(best)
            }
            None => {
                self.log(candidates.len(), None, "no reachable candidate");
                None
            }
        }
    }

    /// Fan out one task per candidate and wait for all of them.
    async fn probe_all(&self, candidates: &[Candidate]) -> Result<Vec<(usize, ProbeReport)>> {
        let tasks: Vec<_> = candidates
            .iter()
            .enumerate()
            .map(|(idx, candidate)| {
                let permits = Arc::clone(&self.permits);
                let prober = Arc::clone(&self.prober);
                let target = candidate.target().clone();
                let attempts = self.config.attempts;
                let timeout = self.config.probe_timeout;

                tokio::spawn(async move {
                    let _permit = permits.acquire_owned().await?;
                    let report = measure_target(prober.as_ref(), &target, attempts, timeout).await;
                    Ok::<_, crate::SelectorError>((idx, report))
                })
            })
            .collect();

        let mut reports = Vec::with_capacity(tasks.len());
        for joined in join_all(tasks).await {
            reports.push(joined??);
        }

        Ok(reports)
    }

    /// Shut the worker pool down, waiting up to the configured timeout for its threads.
    pub fn release(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        if let Some(runtime) = self.runtime.take() {
            // blocking on shutdown from inside another runtime would panic
            if Handle::try_current().is_ok() {
                runtime.shutdown_background();
            } else {
                runtime.shutdown_timeout(self.config.shutdown_timeout);
            }
            tracing::debug!("worker pool released");
        }
    }

    fn log(&self, candidates: usize, best: Option<&Candidate>, msg: &str) {
        let winner = best.map(|c| c.label()).unwrap_or("none");
        let latency_ms = best.and_then(|c| c.latency());

        match self.config.log_level {
            LogLevel::Info => tracing::info!(candidates, winner = %winner, latency_ms, "{msg}"),
            LogLevel::Error => tracing::error!(candidates, winner = %winner, latency_ms, "{msg}"),
            LogLevel::Debug => tracing::debug!(candidates, winner = %winner, latency_ms, "{msg}"),
            LogLevel::Trace => tracing::trace!(candidates, winner = %winner, latency_ms, "{msg}"),
            LogLevel::Warn => tracing::warn!(candidates, winner = %winner, latency_ms, "{msg}"),
        }
    }
}

impl Drop for Selector {
    fn drop(&mut self) {
        self.shutdown();
    }
}
