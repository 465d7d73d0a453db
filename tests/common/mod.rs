#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::atomic::{AtomicUsize, Ordering},
    time::Duration,
};

use async_trait::async_trait;
use hostpick::{Candidate, ProbeFailure, ProbeOutcome, Prober, Target};
use parking_lot::Mutex;

pub fn ok(ms: u64) -> ProbeOutcome {
    ProbeOutcome::Reachable(Duration::from_millis(ms))
}

pub fn unreachable() -> ProbeOutcome {
    ProbeOutcome::Failed(ProbeFailure::Unreachable("connection refused".to_string()))
}

pub fn candidate(host: &str) -> Candidate {
    Candidate::new(format!("https://{host}"), Target::new(host, 443))
}

/// Replays canned outcomes per host; unknown hosts fail resolution.
#[derive(Default)]
pub struct ScriptedProber {
    scripts: HashMap<String, Vec<ProbeOutcome>>,
    calls: Mutex<HashMap<String, usize>>,
    delay: Duration,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    panic_on: Option<String>,
}

impl ScriptedProber {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script(mut self, host: &str, outcomes: Vec<ProbeOutcome>) -> Self {
        self.scripts.insert(host.to_string(), outcomes);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn panic_on(mut self, host: &str) -> Self {
        self.panic_on = Some(host.to_string());
        self
    }

    pub fn calls(&self, host: &str) -> usize {
        self.calls.lock().get(host).copied().unwrap_or(0)
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Prober for ScriptedProber {
    async fn probe(&self, target: &Target, _timeout: Duration) -> ProbeOutcome {
        if self.panic_on.as_deref() == Some(target.host.as_str()) {
            panic!("scripted prober blew up on {}", target.host);
        }

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let call = {
            let mut calls = self.calls.lock();
            let count = calls.entry(target.host.clone()).or_insert(0);
            *count += 1;
            *count - 1
        };

        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        match self.scripts.get(&target.host) {
            Some(outcomes) if !outcomes.is_empty() => outcomes[call % outcomes.len()].clone(),
            _ => ProbeOutcome::Failed(ProbeFailure::Resolution(format!("unknown host {}", target.host))),
        }
    }
}
