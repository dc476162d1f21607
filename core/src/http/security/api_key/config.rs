//! API key strategy configuration.

use std::time::Duration;

use serde::{Deserialize, Deserializer};

use super::error::ConfigError;

/// Configuration for the API key strategy.
///
/// Fixed once the strategy is built. Every field has a default, so an empty
/// JSON object deserializes to [`ApiKeyStrategyConfig::default`].
///
/// # Example
/// ```ignore
/// let config = ApiKeyStrategyConfig::new()
///     .api_key_field("client[key]")
///     .api_key_header("X-Api-Key")
///     .pass_req_to_callback(true);
///
/// let config: ApiKeyStrategyConfig =
///     serde_json::from_str(r#"{"apiKeyHeader": "X-Api-Key", "verifyTimeoutMs": 2000}"#)?;
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ApiKeyStrategyConfig {
    /// Strategy name used for registration and logging.
    name: String,
    /// Body / query path of the API key.
    api_key_field: String,
    /// Body / query path of the API secret.
    api_secret_field: String,
    /// Header carrying the API key.
    api_key_header: String,
    /// Header carrying the API secret.
    api_secret_header: String,
    /// Whether the verifier also receives the request.
    pass_req_to_callback: bool,
    /// Upper bound on how long the verifier may take.
    #[serde(rename = "verifyTimeoutMs", deserialize_with = "millis")]
    verify_timeout: Option<Duration>,
}

impl Default for ApiKeyStrategyConfig {
    fn default() -> Self {
        Self {
            name: "localapikey".to_string(),
            api_key_field: "apiKey".to_string(),
            api_secret_field: "apiSecret".to_string(),
            api_key_header: "apiKey".to_string(),
            api_secret_header: "apiSecret".to_string(),
            pass_req_to_callback: false,
            verify_timeout: None,
        }
    }
}

impl ApiKeyStrategyConfig {
    /// Creates a new configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the strategy name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the body / query path of the API key (e.g. `user[apikey]`).
    pub fn api_key_field(mut self, field: impl Into<String>) -> Self {
        self.api_key_field = field.into();
        self
    }

    /// Sets the body / query path of the API secret.
    pub fn api_secret_field(mut self, field: impl Into<String>) -> Self {
        self.api_secret_field = field.into();
        self
    }

    /// Sets the header carrying the API key.
    pub fn api_key_header(mut self, header: impl Into<String>) -> Self {
        self.api_key_header = header.into();
        self
    }

    /// Sets the header carrying the API secret.
    pub fn api_secret_header(mut self, header: impl Into<String>) -> Self {
        self.api_secret_header = header.into();
        self
    }

    /// Sets whether the verifier receives the request before the credentials.
    pub fn pass_req_to_callback(mut self, pass: bool) -> Self {
        self.pass_req_to_callback = pass;
        self
    }

    /// Fails verifications that take longer than `timeout`.
    pub fn verify_timeout(mut self, timeout: Duration) -> Self {
        self.verify_timeout = Some(timeout);
        self
    }

    pub fn get_name(&self) -> &str {
        &self.name
    }

    pub fn get_api_key_field(&self) -> &str {
        &self.api_key_field
    }

    pub fn get_api_secret_field(&self) -> &str {
        &self.api_secret_field
    }

    pub fn get_api_key_header(&self) -> &str {
        &self.api_key_header
    }

    pub fn get_api_secret_header(&self) -> &str {
        &self.api_secret_header
    }

    pub fn should_pass_req_to_callback(&self) -> bool {
        self.pass_req_to_callback
    }

    pub fn get_verify_timeout(&self) -> Option<Duration> {
        self.verify_timeout
    }

    /// Checks that no field or header name is empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("api_key_field", &self.api_key_field),
            ("api_secret_field", &self.api_secret_field),
            ("api_key_header", &self.api_key_header),
            ("api_secret_header", &self.api_secret_header),
        ];
        match fields.iter().find(|(_, value)| value.is_empty()) {
            Some((field, _)) => Err(ConfigError::EmptyField { field: *field }),
            None => Ok(()),
        }
    }
}

fn millis<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<u64>::deserialize(deserializer)?.map(Duration::from_millis))
}
