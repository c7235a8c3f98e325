/*!
 * Tests for application configuration functionality
 */

use std::str::FromStr;

use subresync::app_config::{Config, LinePreset, LogLevel, UnmappedPolicy};

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.sync.preset, LinePreset::Standard);
    assert_eq!(config.sync.line_limits(), (42, 30));
    assert!(config.sync.split_at_punctuation);
    assert_eq!(config.sync.punctuations, vec!['.', ',', '?', ':', '!']);
    assert_eq!(config.sync.unmapped_policy, UnmappedPolicy::Fail);
    assert!(config.sync.prepare_reference);
    assert_eq!(config.overlap.buffer_ms, 5);
    assert!(config.overlap.resolve_output);
    assert_eq!(config.log_level, LogLevel::Info);
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = Config::default();
    assert!(config.validate().is_ok());

    config.sync = config.sync.clone().with_limits(0, 0);
    assert!(config.validate().is_err());

    config.sync = config.sync.clone().with_limits(20, 30);
    assert!(config.validate().is_err());

    config.sync = config.sync.clone().with_limits(30, 30);
    assert!(config.validate().is_ok());

    config.sync.punctuations.push(' ');
    assert!(config.validate().is_err());
}

/// Test that a saved config loads back unchanged
#[test]
fn test_config_serialization_withCustomValues_shouldRoundTrip() {
    let mut config = Config::default();
    config.sync = config.sync.clone().with_limits(36, 12);
    config.sync.unmapped_policy = UnmappedPolicy::Placeholder;
    config.overlap.buffer_ms = 40;

    let json = serde_json::to_string_pretty(&config).unwrap();
    assert!(json.contains("\"preset\": \"custom\""));
    assert!(json.contains("\"unmapped_policy\": \"placeholder\""));

    let loaded: Config = serde_json::from_str(&json).unwrap();
    assert_eq!(loaded.sync.line_limits(), (36, 12));
    assert_eq!(loaded.sync.unmapped_policy, UnmappedPolicy::Placeholder);
    assert_eq!(loaded.overlap.buffer_ms, 40);
}

/// Test that an empty JSON object yields defaults
#[test]
fn test_config_deserialization_withEmptyObject_shouldUseDefaults() {
    let config: Config = serde_json::from_str("{}").unwrap();
    assert_eq!(config.sync.line_limits(), (42, 30));
    assert_eq!(config.overlap.buffer_ms, 5);
}

/// Test preset and policy parsing
#[test]
fn test_from_str_withNames_shouldParse() {
    assert_eq!(LinePreset::from_str("compact").unwrap(), LinePreset::Compact);
    assert_eq!(LinePreset::Compact.to_string(), "compact");
    assert_eq!(UnmappedPolicy::from_str("placeholder").unwrap(), UnmappedPolicy::Placeholder);
    assert_eq!(UnmappedPolicy::Skip.to_string(), "skip");
    assert!(UnmappedPolicy::from_str("ignore").is_err());
}
