use anyhow::{bail, Context};
use hostpick::{candidates, Selector, SelectorConfig};

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key).ok().and_then(|v| v.parse().ok()).unwrap_or(default)
}

// Not a tokio main: selection blocks, and the selector brings its own pool.
fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let urls: Vec<String> = std::env::args().skip(1).collect();
    if urls.is_empty() {
        bail!("usage: hostpick <url>...");
    }

    let defaults = SelectorConfig::default();
    let config = SelectorConfig {
        pool_size: env_or("HOSTPICK_POOL_SIZE", defaults.pool_size),
        attempts: env_or("HOSTPICK_ATTEMPTS", defaults.attempts),
        probe_timeout_ms: env_or("HOSTPICK_TIMEOUT_MS", defaults.probe_timeout_ms),
        ..defaults
    };

    let mut candidates = candidates::from_urls(&urls, config.default_port);
    println!("[hostpick] probing {} of {} candidates", candidates.len(), urls.len());

    let selector = Selector::with_config(config).context("failed to start selector")?;
    let best = selector.select_best(&mut candidates);
    selector.release();

    for candidate in &candidates {
        match candidate.failed_attempts() {
            Some((failed, total)) => println!("  {candidate} ({failed}/{total} attempts failed)"),
            None => println!("  {candidate}"),
        }
    }

    match best {
        Some(best) => println!("best host: {}", best.label()),
        None => println!("no suitable host found"),
    }

    Ok(())
}
