use std::path::PathBuf;

use talent_finder::{load_config, ConfigError, InactivityWindow};

fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/config")
}

#[test]
fn load_full_config_from_fixture() {
    let config = load_config(&fixtures_root().join("full.toml")).unwrap();

    assert_eq!(config.seed_pool, 60);
    assert_eq!(config.max_candidates, 5);
    assert_eq!(config.max_inactive_days, InactivityWindow::Days(120));
    assert_eq!(config.max_queries, Some(4));
    assert_eq!(config.scoring.language_overlap, 0.40);
    assert_eq!(config.scoring.seed_repo_bonus_min_stars, 1000);
    assert_eq!(
        config.api_base_url().map(|u| u.to_string()),
        Some("https://github.example.com/api/v3/".to_string())
    );

    let limits = config.discovery_limits();
    assert_eq!(limits.contributor_cap, 20);
    assert_eq!(limits.per_page, 30);

    let policy = config.ranking_policy();
    assert_eq!(policy.max_inactive_days, Some(120));
    assert_eq!(config.query_settings().pushed_within_days, 120);
}

#[test]
fn disabled_recency_keeps_default_search_window() {
    let config = load_config(&fixtures_root().join("disabled-recency.toml")).unwrap();

    assert_eq!(config.max_inactive_days, InactivityWindow::Disabled);
    assert_eq!(config.ranking_policy().max_inactive_days, None);
    assert_eq!(config.query_settings().pushed_within_days, 365);
    // Unset keys keep their defaults.
    assert_eq!(config.seed_pool, 120);
    assert_eq!(config.discovery_limits().contributor_cap, 120);
}

#[test]
fn load_config_rejects_weights_not_summing_to_one() {
    let result = load_config(&fixtures_root().join("bad-weights.toml"));

    let Err(ConfigError::ValidationError { message, .. }) = result else {
        panic!("expected a validation error, got {result:?}");
    };
    assert!(message.contains("sum to 1.0"));
}

#[test]
fn load_config_rejects_unknown_keys() {
    let result = load_config(&fixtures_root().join("unknown-key.toml"));
    assert!(matches!(result, Err(ConfigError::TomlError { .. })));
}

#[test]
fn load_config_rejects_unknown_inactivity_keyword() {
    let result = load_config(&fixtures_root().join("bad-inactivity.toml"));
    assert!(matches!(result, Err(ConfigError::TomlError { .. })));
}
