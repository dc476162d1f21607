//! API key / secret strategy.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use super::config::ApiKeyStrategyConfig;
use super::credentials::Credentials;
use super::error::ConfigError;
use super::field::{extract_field, FieldPath, Lookup};
use super::verifier::{ApiKeyVerifier, RequestVerifier, VerifyOutcome};
use crate::http::security::action::{
    AuthAction, AuthenticateOptions, AuthenticationError, Failure,
};
use crate::http::security::config::Strategy;
use crate::http::security::request::RequestView;

const MISSING_KEY: &str = "Missing API Key";
const MISSING_SECRET: &str = "Missing API Secret";

enum Verifier<P, I> {
    Credentials(Arc<dyn ApiKeyVerifier<Principal = P, Info = I>>),
    WithRequest(Arc<dyn RequestVerifier<Principal = P, Info = I>>),
}

impl<P, I> Clone for Verifier<P, I> {
    fn clone(&self) -> Self {
        match self {
            Verifier::Credentials(v) => Verifier::Credentials(Arc::clone(v)),
            Verifier::WithRequest(v) => Verifier::WithRequest(Arc::clone(v)),
        }
    }
}

/// Authenticates requests carrying an API key and secret.
///
/// The key and secret are looked up in the body, then the query string, then
/// the headers. When both are present the verifier decides; otherwise the
/// attempt fails as a bad request without calling it.
///
/// # Example
///
/// ```ignore
/// use actix_apikey::http::security::api_key::{
///     verify_fn, ApiKeyStrategy, ApiKeyStrategyConfig, VerifyOutcome,
/// };
///
/// let strategy = ApiKeyStrategy::builder()
///     .config(ApiKeyStrategyConfig::new().api_key_header("X-Api-Key"))
///     .verifier(verify_fn(|credentials| async move {
///         if credentials.get_secret() == "s3cret" {
///             VerifyOutcome::<_, ()>::success(credentials.get_key().to_string())
///         } else {
///             VerifyOutcome::rejected()
///         }
///     }))
///     .build()?;
/// ```
pub struct ApiKeyStrategy<P, I = ()> {
    config: ApiKeyStrategyConfig,
    key_field: FieldPath,
    secret_field: FieldPath,
    key_header: FieldPath,
    secret_header: FieldPath,
    verifier: Verifier<P, I>,
}

impl<P, I> ApiKeyStrategy<P, I> {
    /// Creates a strategy with the default configuration.
    pub fn new<V>(verifier: V) -> Self
    where
        V: ApiKeyVerifier<Principal = P, Info = I> + 'static,
    {
        Self::from_parts(
            ApiKeyStrategyConfig::default(),
            Verifier::Credentials(Arc::new(verifier)),
        )
    }

    /// Starts building a strategy.
    pub fn builder() -> ApiKeyStrategyBuilder<P, I> {
        ApiKeyStrategyBuilder::new()
    }

    fn from_parts(config: ApiKeyStrategyConfig, verifier: Verifier<P, I>) -> Self {
        Self {
            key_field: FieldPath::parse(config.get_api_key_field()),
            secret_field: FieldPath::parse(config.get_api_secret_field()),
            key_header: FieldPath::parse(config.get_api_key_header()),
            secret_header: FieldPath::parse(config.get_api_secret_header()),
            config,
            verifier,
        }
    }

    pub fn get_config(&self) -> &ApiKeyStrategyConfig {
        &self.config
    }

    /// Pulls the key, then the secret, out of the request.
    fn extract_credentials(
        &self,
        req: &RequestView,
        options: &AuthenticateOptions,
    ) -> Result<Credentials, Failure<I>> {
        let missing = |default: &str| Failure::BadRequest {
            message: options
                .get_bad_request_message()
                .unwrap_or(default)
                .to_string(),
        };

        let key = match extract_field(req, &self.key_field, &self.key_header) {
            Lookup::Found(key) => key,
            Lookup::NotFound => return Err(missing(MISSING_KEY)),
        };
        let secret = match extract_field(req, &self.secret_field, &self.secret_header) {
            Lookup::Found(secret) => secret,
            Lookup::NotFound => return Err(missing(MISSING_SECRET)),
        };

        Ok(Credentials::new(key, secret))
    }

    async fn verify(&self, req: &RequestView, credentials: Credentials) -> VerifyOutcome<P, I> {
        match &self.verifier {
            Verifier::Credentials(verifier) => verifier.verify(credentials).await,
            Verifier::WithRequest(verifier) => verifier.verify(req, credentials).await,
        }
    }
}

impl<P, I> Clone for ApiKeyStrategy<P, I> {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            key_field: self.key_field.clone(),
            secret_field: self.secret_field.clone(),
            key_header: self.key_header.clone(),
            secret_header: self.secret_header.clone(),
            verifier: self.verifier.clone(),
        }
    }
}

impl<P, I> fmt::Debug for ApiKeyStrategy<P, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiKeyStrategy")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl<P, I> Strategy for ApiKeyStrategy<P, I>
where
    P: Send + 'static,
    I: Send + 'static,
{
    type Principal = P;
    type Info = I;

    fn name(&self) -> &str {
        self.config.get_name()
    }

    async fn authenticate(
        &self,
        req: &RequestView,
        options: &AuthenticateOptions,
    ) -> AuthAction<P, I> {
        let credentials = match self.extract_credentials(req, options) {
            Ok(credentials) => credentials,
            Err(failure) => {
                tracing::debug!(
                    strategy = self.name(),
                    path = req.get_path(),
                    "credentials missing from request"
                );
                return AuthAction::Fail(failure);
            }
        };

        let outcome = match self.config.get_verify_timeout() {
            Some(limit) => match tokio::time::timeout(limit, self.verify(req, credentials)).await {
                Ok(outcome) => outcome,
                Err(_) => {
                    tracing::warn!(strategy = self.name(), timeout = ?limit, "verification timed out");
                    return AuthAction::Error(AuthenticationError::Timeout(limit));
                }
            },
            None => self.verify(req, credentials).await,
        };

        match &outcome {
            VerifyOutcome::Error(e) => {
                tracing::error!(strategy = self.name(), error = %e, "verification failed")
            }
            VerifyOutcome::Rejected(_) => {
                tracing::warn!(strategy = self.name(), path = req.get_path(), "credentials rejected")
            }
            VerifyOutcome::Success { .. } => {
                tracing::debug!(strategy = self.name(), path = req.get_path(), "authenticated")
            }
        }

        outcome.into()
    }
}

/// Builder for [`ApiKeyStrategy`].
///
/// [`build`](Self::build) refuses to produce a strategy without a verifier,
/// or with a verifier that does not match `pass_req_to_callback`.
pub struct ApiKeyStrategyBuilder<P, I = ()> {
    config: ApiKeyStrategyConfig,
    verifier: Option<Verifier<P, I>>,
}

impl<P, I> Default for ApiKeyStrategyBuilder<P, I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P, I> ApiKeyStrategyBuilder<P, I> {
    pub fn new() -> Self {
        Self {
            config: ApiKeyStrategyConfig::default(),
            verifier: None,
        }
    }

    /// Sets the configuration.
    pub fn config(mut self, config: ApiKeyStrategyConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets a verifier that only sees the credentials.
    pub fn verifier<V>(mut self, verifier: V) -> Self
    where
        V: ApiKeyVerifier<Principal = P, Info = I> + 'static,
    {
        self.verifier = Some(Verifier::Credentials(Arc::new(verifier)));
        self
    }

    /// Sets a verifier that also sees the request.
    /// Requires `pass_req_to_callback(true)` in the configuration.
    pub fn request_verifier<V>(mut self, verifier: V) -> Self
    where
        V: RequestVerifier<Principal = P, Info = I> + 'static,
    {
        self.verifier = Some(Verifier::WithRequest(Arc::new(verifier)));
        self
    }

    /// Validates the configuration and builds the strategy.
    pub fn build(self) -> Result<ApiKeyStrategy<P, I>, ConfigError> {
        let verifier = self.verifier.ok_or(ConfigError::MissingVerifier)?;
        self.config.validate()?;

        let pass_req = self.config.should_pass_req_to_callback();
        match (&verifier, pass_req) {
            (Verifier::Credentials(_), true) => {
                return Err(ConfigError::VerifierShape {
                    pass_req_to_callback: true,
                    found: "does not take the request",
                })
            }
            (Verifier::WithRequest(_), false) => {
                return Err(ConfigError::VerifierShape {
                    pass_req_to_callback: false,
                    found: "takes the request",
                })
            }
            _ => {}
        }

        Ok(ApiKeyStrategy::from_parts(self.config, verifier))
    }
}
