use std::fmt;

use serde::{Deserialize, Serialize};

use crate::performance::ProbeReport;

pub const DEFAULT_POOL_SIZE: usize = 4;
pub const DEFAULT_ATTEMPTS: u32 = 3;
pub const DEFAULT_PROBE_TIMEOUT_MS: u64 = 500;
pub const DEFAULT_SHUTDOWN_TIMEOUT_MS: u64 = 5000;
pub const DEFAULT_PORT: u16 = 443;

/// Latency recorded for a failed attempt, and the mean of a candidate that never answered.
pub const SENTINEL_LATENCY_MS: u64 = u64::MAX;

/// Network address a candidate is probed at.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Target {
    pub host: String,
    pub port: u16,
}

impl Target {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self { host: host.into(), port }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // bare IPv6 literals need brackets to stay parseable as host:port
        if self.host.contains(':') {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}

/**
 * One endpoint under consideration.
 *
 * `label` and `target` are fixed at construction. The measured latency starts
 * out unset and is filled in once by the selector that probes the candidate,
 * together with the per-attempt report it was computed from.
 */
#[derive(Debug, Clone)]
pub struct Candidate {
    label: String,
    target: Target,
    latency_ms: Option<u64>,
    report: Option<ProbeReport>,
}

impl Candidate {
    pub fn new(label: impl Into<String>, target: Target) -> Self {
        Self {
            label: label.into(),
            target,
            latency_ms: None,
            report: None,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    /// Mean latency in milliseconds, `None` until the candidate has been probed.
    pub fn latency(&self) -> Option<u64> {
        self.latency_ms
    }

    pub fn report(&self) -> Option<&ProbeReport> {
        self.report.as_ref()
    }

    /// Number of failed attempts out of the total, once probed.
    pub fn failed_attempts(&self) -> Option<(usize, usize)> {
        self.report.as_ref().map(|r| (r.failures(), r.attempts().len()))
    }

    /// A candidate can win only if at least one attempt got through.
    pub fn is_selectable(&self) -> bool {
        matches!(self.latency_ms, Some(ms) if ms < SENTINEL_LATENCY_MS)
    }

    pub(crate) fn record(&mut self, report: ProbeReport) {
        self.latency_ms = Some(report.mean_latency_ms());
        self.report = Some(report);
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.latency_ms {
            Some(SENTINEL_LATENCY_MS) => write!(f, "{} ({}) unreachable", self.label, self.target),
            Some(ms) => write!(f, "{} ({}) {}ms", self.label, self.target, ms),
            None => write!(f, "{} ({}) not probed", self.label, self.target),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SelectorConfig {
    pub pool_size: usize,
    pub attempts: u32,
    pub probe_timeout_ms: u64,
    pub shutdown_timeout_ms: u64,
    pub default_port: u16,
    pub log_level: LogLevel,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            pool_size: DEFAULT_POOL_SIZE,
            attempts: DEFAULT_ATTEMPTS,
            probe_timeout_ms: DEFAULT_PROBE_TIMEOUT_MS,
            shutdown_timeout_ms: DEFAULT_SHUTDOWN_TIMEOUT_MS,
            default_port: DEFAULT_PORT,
            log_level: LogLevel::Info,
        }
    }
}
