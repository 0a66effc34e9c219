//! Tests to ensure error messages are actionable and consistent
//!
//! Configuration errors name the offending CLI option so the user knows what
//! to change; LLM errors carry the upstream status.

use drop_analyzer::error_handling::{ConfigError, DomainError, LlmError};
use drop_analyzer::domain::normalize_domain;
use drop_analyzer::Config;

#[test]
fn test_config_validation_errors_name_the_option() {
    let cases = [
        (
            Config {
                dns_timeout_secs: 0,
                ..Config::default()
            },
            "--dns-timeout-secs",
        ),
        (
            Config {
                archive_timeout_secs: 0,
                ..Config::default()
            },
            "--archive-timeout-secs",
        ),
        (
            Config {
                max_domains_per_batch: 0,
                ..Config::default()
            },
            "--max-domains-per-batch",
        ),
        (
            Config {
                batch_timeout_secs: Some(0),
                ..Config::default()
            },
            "--batch-timeout-secs",
        ),
    ];

    for (config, option) in cases {
        let err = config.validate().expect_err("validation should fail");
        let message = err.to_string();
        assert!(
            message.contains(option),
            "error should name {option}: {message}"
        );
    }
}

#[test]
fn test_missing_llm_key_explains_fix() {
    let config = Config {
        llm: true,
        ..Config::default()
    };
    let message = config.validate().unwrap_err().to_string();
    assert!(message.contains("OPENROUTER_API_KEY"));
    assert!(message.contains("--llm-api-key"));
}

#[test]
fn test_batch_limit_message() {
    let err = ConfigError::TooManyDomains {
        count: 11,
        limit: 10,
    };
    assert_eq!(
        err.to_string(),
        "11 domains supplied but at most 10 are accepted per batch"
    );
}

#[test]
fn test_invalid_domain_message_includes_name() {
    let err = normalize_domain("exa_mple.com").unwrap_err();
    assert!(matches!(err, DomainError::Invalid { .. }));
    assert!(err.to_string().contains("exa_mple.com"));
}

#[test]
fn test_llm_api_error_message() {
    let err = LlmError::Api {
        status: 401,
        body: "invalid key".to_string(),
    };
    assert_eq!(err.to_string(), "LLM API error: 401 - invalid key");
}
