//! Tests for token resolution and the typed accessors (`search_settings`,
//! `retry_policy`, `rate_limit_guard`, `scan_settings`).

use std::time::Duration;

use rstest::rstest;

use crate::ScoutConfig;
use crate::github::ScanError;

#[rstest]
fn resolve_token_returns_value_when_present() {
    let config = ScoutConfig {
        token: Some("my-token".to_owned()),
        ..Default::default()
    };

    let token = config.resolve_token().expect("token should resolve");
    assert_eq!(token.value(), "my-token", "should return the token");
}

#[rstest]
fn resolve_token_returns_error_when_none() {
    // Lock and clear GITHUB_TOKEN to ensure test isolation
    let _guard = env_lock::lock_env([("GITHUB_TOKEN", None::<&str>)]);
    let config = ScoutConfig::default();

    let result = config.resolve_token();
    assert!(
        matches!(result, Err(ScanError::MissingToken)),
        "should return MissingToken, got {result:?}"
    );
}

#[rstest]
fn resolve_token_falls_back_to_github_token() {
    let _guard = env_lock::lock_env([("GITHUB_TOKEN", Some("legacy-token"))]);
    let config = ScoutConfig::default();

    assert_eq!(
        config.resolve_token().ok().as_ref().map(|token| token.value()),
        Some("legacy-token"),
        "GITHUB_TOKEN should be used when no token is configured"
    );
}

#[rstest]
fn blank_token_is_rejected() {
    let _guard = env_lock::lock_env([("GITHUB_TOKEN", None::<&str>)]);
    let config = ScoutConfig {
        token: Some("   ".to_owned()),
        ..Default::default()
    };

    assert!(matches!(config.resolve_token(), Err(ScanError::MissingToken)));
}

#[rstest]
#[case::zero_pr_pages(0, 10)]
#[case::oversized_file_pages(10, 101)]
fn invalid_page_sizes_are_configuration_errors(#[case] pr_page_size: u8, #[case] file_page_size: u8) {
    let config = ScoutConfig {
        pr_page_size,
        file_page_size,
        ..Default::default()
    };

    let result = config.search_settings();
    assert!(
        matches!(result, Err(ScanError::Configuration { .. })),
        "expected Configuration error, got {result:?}"
    );
}

#[rstest]
fn retry_policy_uses_millisecond_fields() {
    let config = ScoutConfig {
        max_retries: 5,
        retry_base_delay_ms: 250,
        retry_max_delay_ms: 2_000,
        ..Default::default()
    };

    let policy = config.retry_policy();
    assert_eq!(policy.max_retries, 5);
    assert_eq!(policy.base_delay, Duration::from_millis(250));
    assert_eq!(policy.max_delay, Duration::from_secs(2));
}

#[rstest]
fn scan_settings_carry_threshold_and_host() {
    let config = ScoutConfig {
        web_host: " github.example.com ".to_owned(),
        stop_threshold: 400,
        skip_failed_repositories: true,
        ..Default::default()
    };

    let settings = config.scan_settings().expect("settings should be valid");
    assert_eq!(settings.web_host, "github.example.com");
    assert_eq!(settings.guard.threshold(), 400);
    assert!(settings.skip_failed_repositories);
    assert_eq!(settings.search.pull_request_page_size.get(), 10);
}

#[rstest]
fn blank_web_host_is_rejected() {
    let config = ScoutConfig {
        web_host: String::new(),
        ..Default::default()
    };

    assert!(matches!(
        config.scan_settings(),
        Err(ScanError::Configuration { .. })
    ));
}
