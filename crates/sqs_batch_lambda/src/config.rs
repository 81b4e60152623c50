use thiserror::Error;

pub const DEFAULT_REGION: &str = "us-east-1";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Json,
    Text,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("LOG_FORMAT must be `json` or `text`, got `{0}`")]
    InvalidLogFormat(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsumerConfig {
    /// Endpoint override for the SQS client, e.g. LocalStack or a VPC endpoint.
    pub sqs_endpoint_url: Option<String>,
    /// Region used when a batch carries no region attribute.
    pub default_region: String,
    pub log_format: LogFormat,
}

impl Default for ConsumerConfig {
    fn default() -> Self {
        Self {
            sqs_endpoint_url: None,
            default_region: DEFAULT_REGION.to_string(),
            log_format: LogFormat::default(),
        }
    }
}

impl ConsumerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let non_blank = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let log_format = match non_blank("LOG_FORMAT").map(|value| value.to_ascii_lowercase()) {
            None => LogFormat::default(),
            Some(value) if value == "json" => LogFormat::Json,
            Some(value) if value == "text" => LogFormat::Text,
            Some(value) => return Err(ConfigError::InvalidLogFormat(value)),
        };

        Ok(Self {
            sqs_endpoint_url: non_blank("SQS_ENDPOINT_URL"),
            default_region: non_blank("AWS_REGION").unwrap_or_else(|| DEFAULT_REGION.to_string()),
            log_format,
        })
    }
}
