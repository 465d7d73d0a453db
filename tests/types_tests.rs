use std::time::Duration;

use hostpick::*;

#[test]
fn test_selector_config_defaults() {
    let d = SelectorConfig::default();
    assert_eq!(d.pool_size, 4);
    assert_eq!(d.attempts, 3);
    assert_eq!(d.probe_timeout_ms, 500);
    assert_eq!(d.default_port, 443);
    assert_eq!(d.log_level, LogLevel::Info);
}

#[test]
fn test_selector_config_partial_json_fills_defaults() {
    let cfg: SelectorConfig = serde_json::from_str(r#"{"attempts":5,"log_level":"Debug"}"#).unwrap();
    assert_eq!(cfg.attempts, 5);
    assert_eq!(cfg.log_level, LogLevel::Debug);
    assert_eq!(cfg.pool_size, DEFAULT_POOL_SIZE);
    assert_eq!(cfg.probe_timeout_ms, DEFAULT_PROBE_TIMEOUT_MS);
}

#[test]
fn test_resolve_config_converts_durations() {
    let cfg = SelectorConfig { probe_timeout_ms: 250, shutdown_timeout_ms: 1000, ..SelectorConfig::default() };
    let normalized = resolve_config(cfg).unwrap();
    assert_eq!(normalized.probe_timeout, Duration::from_millis(250));
    assert_eq!(normalized.shutdown_timeout, Duration::from_secs(1));
    assert_eq!(normalized.pool_size, 4);
}

#[test]
fn test_resolve_config_rejects_zero_values() {
    for cfg in [
        SelectorConfig { pool_size: 0, ..SelectorConfig::default() },
        SelectorConfig { attempts: 0, ..SelectorConfig::default() },
        SelectorConfig { probe_timeout_ms: 0, ..SelectorConfig::default() },
    ] {
        assert!(matches!(resolve_config(cfg), Err(SelectorError::InvalidConfig(_))));
    }
}

#[test]
fn test_new_candidate_is_unprobed() {
    let c = Candidate::new("primary", Target::new("10.0.0.1", 22));
    assert_eq!(c.label(), "primary");
    assert_eq!(c.target().to_string(), "10.0.0.1:22");
    assert_eq!(c.latency(), None);
    assert!(c.report().is_none());
    assert!(!c.is_selectable());
    assert_eq!(c.to_string(), "primary (10.0.0.1:22) not probed");
}

#[test]
fn test_candidate_from_url_uses_known_ports() {
    let https = Candidate::from_url("https://www.baidu.com", DEFAULT_PORT).unwrap();
    assert_eq!(https.label(), "https://www.baidu.com");
    assert_eq!(https.target(), &Target::new("www.baidu.com", 443));

    let http = Candidate::from_url("http://www.google.com", DEFAULT_PORT).unwrap();
    assert_eq!(http.target().port, 80);

    let explicit = Candidate::from_url("http://127.0.0.1:8080/health", DEFAULT_PORT).unwrap();
    assert_eq!(explicit.target(), &Target::new("127.0.0.1", 8080));

    let unknown_scheme = Candidate::from_url("gopher2://mirror.example", 7070).unwrap();
    assert_eq!(unknown_scheme.target().port, 7070);
}

#[test]
fn test_candidate_from_url_ipv6_host() {
    let c = Candidate::from_url("https://[::1]/", DEFAULT_PORT).unwrap();
    assert_eq!(c.target().host, "::1");
    assert_eq!(c.target().to_string(), "[::1]:443");
}

#[test]
fn test_candidate_from_url_rejects_garbage() {
    assert!(matches!(
        Candidate::from_url("not a url", DEFAULT_PORT),
        Err(SelectorError::InvalidUrl { .. })
    ));
    assert!(matches!(
        Candidate::from_url("mailto:someone@example.com", DEFAULT_PORT),
        Err(SelectorError::InvalidUrl { .. })
    ));
}

#[test]
fn test_from_urls_drops_invalid_and_keeps_order() {
    let urls = ["https://juejin.cn", "::::", "https://www.qq.com", "https://weixin.qq.com"];
    let candidates = candidates::from_urls(urls, DEFAULT_PORT);

    let labels: Vec<&str> = candidates.iter().map(|c| c.label()).collect();
    assert_eq!(labels, vec!["https://juejin.cn", "https://www.qq.com", "https://weixin.qq.com"]);
}

#[test]
fn test_log_level_serialization() {
    assert_eq!(serde_json::to_string(&LogLevel::Warn).unwrap(), "\"Warn\"");
    let level: LogLevel = serde_json::from_str("\"Trace\"").unwrap();
    assert_eq!(level, LogLevel::Trace);
}
