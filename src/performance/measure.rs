use std::{fmt, time::Duration};

use crate::{prober::Prober, Target, SENTINEL_LATENCY_MS};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeFailure {
    /// The host name did not resolve to any address
    Resolution(String),
    /// The address answered with an error (refused, no route, ...)
    Unreachable(String),
    /// No answer within the probe timeout
    Timeout { duration_ms: u64 },
}

impl fmt::Display for ProbeFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeFailure::Resolution(reason) => write!(f, "resolution failed: {reason}"),
            ProbeFailure::Unreachable(reason) => write!(f, "unreachable: {reason}"),
            ProbeFailure::Timeout { duration_ms } => write!(f, "timed out after {duration_ms}ms"),
        }
    }
}

/// Result of a single probe attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    Reachable(Duration),
    Failed(ProbeFailure),
}

impl ProbeOutcome {
    pub fn is_reachable(&self) -> bool {
        matches!(self, ProbeOutcome::Reachable(_))
    }

    /// Milliseconds this attempt contributes to the mean; failures count as the sentinel.
    pub fn latency_ms(&self) -> u64 {
        match self {
            ProbeOutcome::Reachable(elapsed) => {
                u64::try_from(elapsed.as_millis()).unwrap_or(SENTINEL_LATENCY_MS)
            }
            ProbeOutcome::Failed(_) => SENTINEL_LATENCY_MS,
        }
    }
}

/// Every attempt made against one candidate, in the order they ran.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProbeReport {
    attempts: Vec<ProbeOutcome>,
}

impl ProbeReport {
    pub fn new(attempts: Vec<ProbeOutcome>) -> Self {
        Self { attempts }
    }

    pub fn attempts(&self) -> &[ProbeOutcome] {
        &self.attempts
    }

    pub fn failures(&self) -> usize {
        self.attempts.iter().filter(|a| !a.is_reachable()).count()
    }

    /// Arithmetic mean of all attempts, truncated to whole milliseconds.
    ///
    /// Failed attempts are averaged in as [`SENTINEL_LATENCY_MS`], so a flaky
    /// candidate ranks behind a consistent one. An empty report, or one where
    /// every attempt failed, yields the sentinel itself.
    pub fn mean_latency_ms(&self) -> u64 {
        if self.attempts.is_empty() {
            return SENTINEL_LATENCY_MS;
        }

        let sum: u128 = self.attempts.iter().map(|a| a.latency_ms() as u128).sum();
        let mean = sum / self.attempts.len() as u128;

        // the mean never exceeds the largest term, so this cannot saturate
        u64::try_from(mean).unwrap_or(SENTINEL_LATENCY_MS)
    }
}

/// Probe `target` `attempts` times, one attempt after another.
///
/// Attempts against the same target never overlap.
pub async fn measure_target(
    prober: &dyn Prober,
    target: &Target,
    attempts: u32,
    timeout: Duration,
) -> ProbeReport {
    let mut outcomes = Vec::with_capacity(attempts as usize);

    for attempt in 0..attempts {
        let outcome = prober.probe(target, timeout).await;

        match &outcome {
            ProbeOutcome::Reachable(elapsed) => tracing::debug!(
                host = %target,
                attempt = attempt + 1,
                elapsed_ms = elapsed.as_millis() as u64,
                "probe reachable"
            ),
            ProbeOutcome::Failed(failure) => tracing::debug!(
                host = %target,
                attempt = attempt + 1,
                %failure,
                "probe failed"
            ),
        }

        outcomes.push(outcome);
    }

    ProbeReport::new(outcomes)
}
