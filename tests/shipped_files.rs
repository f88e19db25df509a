//! The files shipped next to the binary must load cleanly.

use std::path::Path;

use no_as_a_service::config::loader::parse_config;
use no_as_a_service::ReasonList;

#[test]
fn example_config_matches_defaults() {
    let config = parse_config(include_str!("../noaas.example.toml")).unwrap();
    let defaults = no_as_a_service::ServiceConfig::default();

    assert_eq!(config.listener.bind_address, defaults.listener.bind_address);
    assert_eq!(config.reasons.path, defaults.reasons.path);
    assert_eq!(config.timeouts.read_secs, defaults.timeouts.read_secs);
    assert_eq!(config.timeouts.write_secs, defaults.timeouts.write_secs);
    assert_eq!(config.timeouts.idle_secs, defaults.timeouts.idle_secs);
    assert_eq!(config.rate_limit.min_interval_ms, defaults.rate_limit.min_interval_ms);
    assert_eq!(config.rate_limit.retention_secs, defaults.rate_limit.retention_secs);
}

#[test]
fn bundled_reasons_load() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("reasons.json");
    let reasons = ReasonList::load(&path).unwrap();
    assert!(reasons.len() >= 10);
    assert!(reasons.iter().all(|r| !r.trim().is_empty()));
}
