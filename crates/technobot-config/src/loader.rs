//! JSON5 config loading and validation.

use crate::{ConfigError, TechnobotConfig};
use log::{debug, info};
use std::fs;
use std::path::Path;

impl TechnobotConfig {
    /// Load a config from a JSON5 file.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        info!("loading config from path: {}", path.as_ref().display());
        let contents = fs::read_to_string(path)?;
        Self::load_from_str(&contents)
    }

    /// Load a config from JSON5 contents.
    pub fn load_from_str(contents: &str) -> Result<Self, ConfigError> {
        debug!("loading config from raw contents (len={})", contents.len());
        let value: serde_json::Value = json5::from_str(contents)?;
        let config: TechnobotConfig = serde_json::from_value(value)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate invariants that cannot be expressed in serde.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.endpoints.intent_urls.is_empty() {
            return Err(ConfigError::Invalid(
                "at least one intent URL is required".to_string(),
            ));
        }
        if self.endpoints.timeout_secs == 0 || self.endpoints.extraction_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "endpoint timeouts must be non-zero".to_string(),
            ));
        }
        if self.server.port_scan_limit == 0 {
            return Err(ConfigError::Invalid(
                "port_scan_limit must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{ConfigError, EndpointsConfig, TechnobotConfig};
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn defaults_pass_validation() {
        let config = TechnobotConfig::default();
        config.validate().expect("defaults validate");
        assert_eq!(config.endpoints.intent_urls.len(), 2);
        assert_eq!(config.endpoints.timeout_secs, 10);
        assert_eq!(config.server.port, 7861);
    }

    #[test]
    fn loads_json5_with_comments_and_partial_sections() {
        let config = TechnobotConfig::load_from_str(
            r#"{
                // demo overrides
                endpoints: { intent_urls: ["http://localhost:9000/api/text2action"], timeout_secs: 3 },
                server: { port: 8100 },
            }"#,
        )
        .expect("load");
        assert_eq!(
            config.endpoints.intent_urls,
            vec!["http://localhost:9000/api/text2action".to_string()]
        );
        assert_eq!(config.endpoints.timeout_secs, 3);
        assert_eq!(config.server.port, 8100);
        // Untouched sections keep their defaults.
        assert_eq!(config.server.port_scan_limit, 10);
        assert_eq!(
            config.data.recommendations_path,
            "output/customer_recommendations_output.csv".to_string()
        );
    }

    #[test]
    fn load_from_path_round_trips() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("technobot.json5");
        fs::write(&path, r#"{ server: { port: 7900 } }"#).expect("write");
        let config = TechnobotConfig::load_from_path(&path).expect("load");
        assert_eq!(config.server.port, 7900);
    }

    #[test]
    fn empty_intent_urls_fail_validation() {
        let config = TechnobotConfig::builder()
            .endpoints(EndpointsConfig {
                intent_urls: Vec::new(),
                ..EndpointsConfig::default()
            })
            .build();
        let err = config.validate().expect_err("invalid");
        match err {
            ConfigError::Invalid(message) => {
                assert_eq!(message, "at least one intent URL is required".to_string())
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn zero_timeout_fails_validation() {
        let err = TechnobotConfig::load_from_str(r#"{ endpoints: { timeout_secs: 0 } }"#)
            .expect_err("invalid");
        assert!(matches!(err, ConfigError::Invalid(_)));
    }
}
