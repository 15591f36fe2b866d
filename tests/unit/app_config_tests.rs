/*!
 * Tests for application configuration functionality
 */

use anyhow::Result;
use subcue::app_config::{Config, EngineConfig, LogLevel};
use subcue::errors::ConfigError;

use crate::common;

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.log_level, LogLevel::Warn);
    assert_eq!(config.engine.min_cue_duration_ms, 50);
    assert_eq!(config.engine.fallback_slot_ms, 5_000);
    assert_eq!(config.engine.failure_cue_duration_ms, 10_000);
    assert_eq!(config.engine.linear_scan_threshold, 100);
    assert_eq!(config.engine.sniff_line_limit, 50);
    assert!(!config.engine.failure_message.is_empty());
    assert!(config.validate().is_ok());
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = Config::default();

    config.engine.min_cue_duration_ms = 0;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidValue { field: "min_cue_duration_ms", .. })
    ));
    config.engine.min_cue_duration_ms = 50;

    config.engine.fallback_slot_ms = 10;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidValue { field: "fallback_slot_ms", .. })
    ));
    config.engine.fallback_slot_ms = 5_000;

    config.engine.failure_cue_duration_ms = 0;
    assert!(config.validate().is_err());
    config.engine.failure_cue_duration_ms = 10_000;

    config.engine.sniff_line_limit = 0;
    assert!(config.validate().is_err());
    config.engine.sniff_line_limit = 50;

    assert!(config.validate().is_ok());
}

#[test]
fn test_fromJson_withPartialEngineSection_shouldFillDefaults() {
    let config = Config::from_json(r#"{"log_level": "debug", "engine": {"fallback_slot_ms": 3000}}"#)
        .expect("valid json");

    assert_eq!(config.log_level, LogLevel::Debug);
    assert_eq!(config.engine.fallback_slot_ms, 3_000);
    assert_eq!(config.engine.min_cue_duration_ms, 50);
    assert_eq!(config.log_level.to_level_filter(), log::LevelFilter::Debug);
}

#[test]
fn test_fromJson_withEmptyObject_shouldEqualDefault() {
    assert_eq!(Config::from_json("{}").expect("valid json"), Config::default());
}

#[test]
fn test_fromJson_withMalformedJson_shouldReturnParseError() {
    assert!(matches!(Config::from_json("{ not json"), Err(ConfigError::Parse(_))));
}

#[test]
fn test_loadOrDefault_withMissingFile_shouldUseDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let config = Config::load_or_default(temp_dir.path().join("missing.json"))?;
    assert_eq!(config, Config::default());
    Ok(())
}

#[test]
fn test_saveAndLoad_withCustomValues_shouldRoundTrip() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("subcue.json");

    let config = Config {
        log_level: LogLevel::Info,
        engine: EngineConfig {
            linear_scan_threshold: 10,
            failure_message: "nothing to show".to_string(),
            ..EngineConfig::default()
        },
    };
    config.save(&path)?;

    assert_eq!(Config::load_or_default(&path)?, config);
    Ok(())
}

#[test]
fn test_loadOrDefault_withInvalidValues_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "bad.json", r#"{"engine": {"min_cue_duration_ms": 0}}"#)?;

    let err = Config::load_or_default(&path).expect_err("validation should fail");
    assert!(format!("{:#}", err).contains("min_cue_duration_ms"));
    Ok(())
}
