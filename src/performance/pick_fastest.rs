use std::cmp::Ordering;

use crate::{Candidate, SENTINEL_LATENCY_MS};

/// Orders two candidates by mean latency, ascending.
///
/// Unprobed candidates compare as the sentinel so they sort last instead of
/// breaking the order. Equal latencies compare `Equal`; callers rely on a
/// stable sort to keep input order among them.
pub fn compare_latency(a: &Candidate, b: &Candidate) -> Ordering {
    let a = a.latency().unwrap_or(SENTINEL_LATENCY_MS);
    let b = b.latency().unwrap_or(SENTINEL_LATENCY_MS);
    a.cmp(&b)
}

/// All candidates, fastest first, ties in input order.
pub fn rank(candidates: &[Candidate]) -> Vec<&Candidate> {
    let mut ranked: Vec<&Candidate> = candidates.iter().collect();
    ranked.sort_by(|a, b| compare_latency(a, b));
    ranked
}

/// Index of the fastest selectable candidate, if any got through at all.
pub fn pick_fastest(candidates: &[Candidate]) -> Option<usize> {
    candidates
        .iter()
        .enumerate()
        .filter(|(_, candidate)| candidate.is_selectable())
        .min_by(|(_, a), (_, b)| compare_latency(a, b))
        .map(|(idx, _)| idx)
}
