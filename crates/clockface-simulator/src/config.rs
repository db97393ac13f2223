//! Clock configuration loading

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use clockface_core::ClockConfig;
use log::info;

/// Load a JSON config file, or the reference look when no path is given.
///
/// Fields left out of the file keep their default values.
pub fn load(path: Option<&Path>) -> Result<ClockConfig> {
    let Some(path) = path else {
        return Ok(ClockConfig::default());
    };

    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let config = parse(&text).with_context(|| format!("Invalid config {}", path.display()))?;
    info!("Loaded clock config from {}", path.display());
    Ok(config)
}

/// Parse and validate a JSON config document.
pub fn parse(text: &str) -> Result<ClockConfig> {
    let config: ClockConfig = serde_json::from_str(text)?;
    config.validate().map_err(|e| anyhow!("{}", e))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clockface_core::Color;

    #[test]
    fn test_missing_path_gives_default() {
        assert_eq!(load(None).unwrap(), ClockConfig::default());
    }

    #[test]
    fn test_partial_document_keeps_defaults() {
        let config = parse(r#"{ "foreground": { "r": 255, "g": 0, "b": 0 }, "hub_radius": 6 }"#)
            .unwrap();
        assert_eq!(config.foreground, Color::new(255, 0, 0));
        assert_eq!(config.hub_radius, 6.0);
        assert_eq!(config.refresh_period_ms, 1000);
        assert_eq!(config.numeral_angle_offset_deg, -60.0);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = parse(r#"{ "refresh_period_ms": 0 }"#).unwrap_err();
        assert!(err.to_string().contains("refresh_period_ms"));

        let err = parse(r#"{ "refresh_period_ms": 18446744073709551615 }"#).unwrap_err();
        assert!(err.to_string().contains("refresh_period_ms"));

        assert!(parse("not json").is_err());
    }
}
