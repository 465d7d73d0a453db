pub mod measure;
pub mod pick_fastest;

pub use measure::{measure_target, ProbeFailure, ProbeOutcome, ProbeReport};
pub use pick_fastest::{compare_latency, pick_fastest, rank};
