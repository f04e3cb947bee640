//! Configuration schema for TECHNOBOT.

use serde::{Deserialize, Serialize};

/// Root config for the TECHNOBOT services.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TechnobotConfig {
    #[serde(default, rename = "$schema")]
    pub schema: Option<String>,
    #[serde(default)]
    pub endpoints: EndpointsConfig,
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub explain: ExplainConfig,
}

impl TechnobotConfig {
    /// Start building a config programmatically with defaults applied.
    pub fn builder() -> TechnobotConfigBuilder {
        TechnobotConfigBuilder::new()
    }
}

/// Builder for assembling a `TechnobotConfig` in code.
#[derive(Debug, Default, Clone)]
pub struct TechnobotConfigBuilder {
    config: TechnobotConfig,
}

impl TechnobotConfigBuilder {
    /// Create a new builder seeded with default config values.
    pub fn new() -> Self {
        Self {
            config: TechnobotConfig::default(),
        }
    }

    /// Replace the remote endpoint configuration.
    pub fn endpoints(mut self, endpoints: EndpointsConfig) -> Self {
        self.config.endpoints = endpoints;
        self
    }

    /// Replace the data file configuration.
    pub fn data(mut self, data: DataConfig) -> Self {
        self.config.data = data;
        self
    }

    /// Replace the server configuration.
    pub fn server(mut self, server: ServerConfig) -> Self {
        self.config.server = server;
        self
    }

    /// Replace the explanation configuration.
    pub fn explain(mut self, explain: ExplainConfig) -> Self {
        self.config.explain = explain;
        self
    }

    /// Finalize and return the built `TechnobotConfig`.
    pub fn build(self) -> TechnobotConfig {
        self.config
    }
}

/// Remote endpoint locations and timeouts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointsConfig {
    /// Intent endpoint URLs tried in order until one answers.
    #[serde(default = "default_intent_urls")]
    pub intent_urls: Vec<String>,
    /// Clipboard extraction endpoint URL.
    #[serde(default = "default_extraction_url")]
    pub extraction_url: String,
    /// Generative-text endpoint URL.
    #[serde(default = "default_generation_url")]
    pub generation_url: String,
    /// Per-request timeout for intent and generation calls.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Per-request timeout for extraction calls.
    #[serde(default = "default_extraction_timeout_secs")]
    pub extraction_timeout_secs: u64,
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            intent_urls: default_intent_urls(),
            extraction_url: default_extraction_url(),
            generation_url: default_generation_url(),
            timeout_secs: default_timeout_secs(),
            extraction_timeout_secs: default_extraction_timeout_secs(),
        }
    }
}

/// Default primary/fallback intent URL pair.
fn default_intent_urls() -> Vec<String> {
    vec![
        "http://54.87.106.218/api/text2action".to_string(),
        "https://54.87.106.218/api/text2action".to_string(),
    ]
}

/// Default extraction endpoint URL.
fn default_extraction_url() -> String {
    "http://54.87.106.218/api/extract_transfer".to_string()
}

/// Default generation endpoint URL.
fn default_generation_url() -> String {
    "http://54.87.106.218/api/generate".to_string()
}

/// Default timeout for intent and generation calls.
fn default_timeout_secs() -> u64 {
    10
}

/// Default timeout for extraction calls.
fn default_extraction_timeout_secs() -> u64 {
    15
}

/// Locations of the customer data files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// CSV with recommendation output per customer.
    #[serde(default = "default_recommendations_path")]
    pub recommendations_path: String,
    /// CSV with raw user metadata. No service reads it; the path is
    /// accepted so both files of a data drop can be configured together.
    #[serde(default = "default_metadata_path")]
    pub metadata_path: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            recommendations_path: default_recommendations_path(),
            metadata_path: default_metadata_path(),
        }
    }
}

/// Default recommendations CSV path.
fn default_recommendations_path() -> String {
    "output/customer_recommendations_output.csv".to_string()
}

/// Default metadata CSV path.
fn default_metadata_path() -> String {
    "data/metadata_user.csv".to_string()
}

/// HTTP server bind settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address; the demo stays loopback-only.
    #[serde(default = "default_host")]
    pub host: String,
    /// First port to probe.
    #[serde(default = "default_port")]
    pub port: u16,
    /// How many consecutive ports to probe before giving up.
    #[serde(default = "default_port_scan_limit")]
    pub port_scan_limit: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            port_scan_limit: default_port_scan_limit(),
        }
    }
}

/// Default bind host.
fn default_host() -> String {
    "127.0.0.1".to_string()
}

/// Default starting port.
fn default_port() -> u16 {
    7861
}

/// Default port scan window.
fn default_port_scan_limit() -> u16 {
    10
}

/// Settings for the mocked feature-importance explanation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplainConfig {
    /// Feature names shown in the importance chart.
    #[serde(default = "default_feature_names")]
    pub feature_names: Vec<String>,
}

impl Default for ExplainConfig {
    fn default() -> Self {
        Self {
            feature_names: default_feature_names(),
        }
    }
}

/// Default credit features for the mocked importance chart.
fn default_feature_names() -> Vec<String> {
    [
        "age",
        "occupation",
        "marital_status",
        "adopted_products_count",
        "recommendation_success",
        "account_tenure",
        "monthly_balance",
    ]
    .iter()
    .map(|name| name.to_string())
    .collect()
}
