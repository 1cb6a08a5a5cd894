// Configuration unit tests

use brandmark::config::Config;
use brandmark::logging::LogFormat;
use brandmark::watermark::{WatermarkConfig, WatermarkPosition};
use rstest::rstest;

#[test]
fn test_can_deserialize_full_yaml_config() {
    let yaml = r#"
logo_path: "assets/brand.png"
watermark:
  fetch_timeout_secs: 10
  size_ratio: 0.25
  margin: 16
  center_bottom_margin: 40
  quality: 90
  default_position: top-left
  default_opacity: 0.6
logging:
  level: debug
  format: pretty
"#;
    let config = Config::from_yaml_with_env(yaml).expect("Failed to parse config");

    assert_eq!(config.logo_path, "assets/brand.png");
    assert_eq!(config.watermark.fetch_timeout_secs, 10);
    assert_eq!(config.watermark.size_ratio, 0.25);
    assert_eq!(config.watermark.margin, 16);
    assert_eq!(config.watermark.center_bottom_margin, 40);
    assert_eq!(config.watermark.quality, 90);
    assert_eq!(config.watermark.default_position, WatermarkPosition::TopLeft);
    assert_eq!(config.watermark.default_opacity, 0.6);
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.logging.format, LogFormat::Pretty);
    assert!(config.validate().is_ok());
}

#[test]
fn test_partial_watermark_section_keeps_other_defaults() {
    let yaml = r#"
watermark:
  margin: 5
"#;
    let config = Config::from_yaml_with_env(yaml).unwrap();
    assert_eq!(config.watermark.margin, 5);
    assert_eq!(config.watermark.size_ratio, 0.3);
    assert_eq!(config.watermark.quality, 95);
    assert_eq!(config.watermark.center_bottom_margin, 30);
    assert_eq!(config.logo_path, "logo.png");
}

#[test]
fn test_unknown_position_in_yaml_is_rejected() {
    let yaml = r#"
watermark:
  default_position: middle
"#;
    assert!(Config::from_yaml_with_env(yaml).is_err());
}

#[rstest]
#[case::zero_ratio(WatermarkConfig { size_ratio: 0.0, ..Default::default() })]
#[case::ratio_above_one(WatermarkConfig { size_ratio: 1.5, ..Default::default() })]
#[case::nan_ratio(WatermarkConfig { size_ratio: f64::NAN, ..Default::default() })]
#[case::zero_quality(WatermarkConfig { quality: 0, ..Default::default() })]
#[case::quality_above_100(WatermarkConfig { quality: 101, ..Default::default() })]
#[case::zero_timeout(WatermarkConfig { fetch_timeout_secs: 0, ..Default::default() })]
#[case::negative_opacity(WatermarkConfig { default_opacity: -0.1, ..Default::default() })]
fn test_invalid_watermark_config_fails_validation(#[case] watermark: WatermarkConfig) {
    let config = Config {
        watermark,
        ..Default::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn test_empty_logo_path_fails_validation() {
    let config = Config {
        logo_path: "   ".to_string(),
        ..Default::default()
    };
    let err = config.validate().unwrap_err();
    assert!(err.contains("logo_path"));
}

#[test]
fn test_env_substitution_in_logo_path() {
    std::env::set_var("BRANDMARK_UNIT_LOGO_DIR", "/srv/brand");
    let yaml = r#"logo_path: "${BRANDMARK_UNIT_LOGO_DIR}/logo.png""#;
    let config = Config::from_yaml_with_env(yaml).unwrap();
    assert_eq!(config.logo_path, "/srv/brand/logo.png");
    std::env::remove_var("BRANDMARK_UNIT_LOGO_DIR");
}

#[test]
fn test_missing_config_file_is_error() {
    let err = Config::from_file("/nonexistent/brandmark.yaml").unwrap_err();
    assert!(err.contains("Failed to read config file"));
}
