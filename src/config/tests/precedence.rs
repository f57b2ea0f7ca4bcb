//! Tests for configuration layer precedence.

use ortho_config::MergeComposer;
use rstest::rstest;
use serde_json::{Value, json};

use super::helpers::{apply_layer, build_config_from_layers};
use crate::ScoutConfig;

#[rstest]
#[case::file_overrides_defaults(
    vec![("defaults", json!({"input": "default.csv"})), ("file", json!({"input": "file.csv"}))],
    "input",
    "file.csv",
    "file should override default"
)]
#[case::environment_overrides_file(
    vec![("file", json!({"token": "file-token"})), ("environment", json!({"token": "env-token"}))],
    "token",
    "env-token",
    "environment should override file"
)]
#[case::cli_overrides_environment(
    vec![("environment", json!({"output": "env.csv"})), ("cli", json!({"output": "cli.csv"}))],
    "output",
    "cli.csv",
    "CLI should override environment"
)]
#[case::url_column_defaults_file_env_cli(
    vec![
        ("defaults", json!({"url_column": "default_col"})),
        ("file", json!({"url_column": "file_col"})),
        ("environment", json!({"url_column": "env_col"})),
        ("cli", json!({"url_column": "cli_col"}))
    ],
    "url_column",
    "cli_col",
    "CLI should win for url_column"
)]
fn test_layer_precedence(
    #[case] layers: Vec<(&str, Value)>,
    #[case] field: &str,
    #[case] expected: &str,
    #[case] message: &str,
) {
    let mut composer = MergeComposer::new();

    for (layer_type, value) in layers {
        apply_layer(&mut composer, layer_type, value);
    }

    let config = ScoutConfig::merge_from_layers(composer.layers()).expect("merge should succeed");

    let actual = match field {
        "input" => Some(config.input.as_str()),
        "output" => Some(config.output.as_str()),
        "url_column" => Some(config.url_column.as_str()),
        "token" => config.token.as_deref(),
        _ => panic!("unknown field: {field}"),
    };

    assert_eq!(actual, Some(expected), "{message}");
}

#[rstest]
fn defaults_apply_when_no_sources_provided() {
    let config = build_config_from_layers(&[]);

    assert!(config.token.is_none(), "token should be None");
    assert_eq!(config.input, "github_auto_repos.csv");
    assert_eq!(config.url_column, "issue_tracker");
    assert_eq!(config.output, "repo_test_results.csv");
    assert_eq!(config.api_base, "https://api.github.com");
    assert_eq!(config.web_host, "github.com");
    assert_eq!(config.pr_page_size, 10);
    assert_eq!(config.file_page_size, 10);
    assert_eq!(config.stop_threshold, 100);
    assert_eq!(config.max_retries, 3);
    assert!(
        !config.skip_failed_repositories,
        "failed repositories should abort by default"
    );
}

#[rstest]
fn numeric_fields_follow_precedence() {
    let config = build_config_from_layers(&[
        ("file", json!({"stop_threshold": 250, "pr_page_size": 50})),
        ("environment", json!({"stop_threshold": 500})),
    ]);

    assert_eq!(config.stop_threshold, 500, "environment should win");
    assert_eq!(config.pr_page_size, 50, "file value should be kept");
    assert_eq!(config.file_page_size, 10, "default should be kept");
}

#[rstest]
fn full_precedence_chain() {
    let config = build_config_from_layers(&[
        ("defaults", json!({"input": "default.csv", "token": "default-token"})),
        ("file", json!({"input": "file.csv", "token": "file-token"})),
        ("environment", json!({"input": "env.csv"})),
        ("cli", json!({"input": "cli.csv"})),
    ]);

    assert_eq!(config.input, "cli.csv", "CLI wins for input");
    assert_eq!(
        config.token.as_deref(),
        Some("file-token"),
        "file wins for token (no env/cli override)"
    );
}

#[rstest]
fn file_can_enable_skipping_failed_repositories() {
    let config = build_config_from_layers(&[("file", json!({"skip_failed_repositories": true}))]);

    assert!(config.skip_failed_repositories);
}
