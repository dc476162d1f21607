//! Application supplied credential verification.

use std::future::Future;

use async_trait::async_trait;

use super::credentials::Credentials;
use crate::http::security::action::{AuthAction, AuthenticationError, BoxError, Failure};
use crate::http::security::request::RequestView;

/// What a verifier decided about one set of credentials.
#[derive(Debug)]
pub enum VerifyOutcome<P, I> {
    /// Verification could not be carried out (storage down, ...).
    Error(BoxError),
    /// The credentials are not valid.
    Rejected(Option<I>),
    /// The credentials belong to `principal`.
    Success { principal: P, info: Option<I> },
}

impl<P, I> VerifyOutcome<P, I> {
    pub fn success(principal: P) -> Self {
        VerifyOutcome::Success {
            principal,
            info: None,
        }
    }

    pub fn success_with_info(principal: P, info: I) -> Self {
        VerifyOutcome::Success {
            principal,
            info: Some(info),
        }
    }

    pub fn rejected() -> Self {
        VerifyOutcome::Rejected(None)
    }

    pub fn rejected_with(info: I) -> Self {
        VerifyOutcome::Rejected(Some(info))
    }

    pub fn error(err: impl Into<BoxError>) -> Self {
        VerifyOutcome::Error(err.into())
    }

    /// Builds an outcome from the `(err, user, info)` triple of callback
    /// style code. An error wins over a principal.
    pub fn from_parts(err: Option<BoxError>, principal: Option<P>, info: Option<I>) -> Self {
        match (err, principal) {
            (Some(err), _) => VerifyOutcome::Error(err),
            (None, None) => VerifyOutcome::Rejected(info),
            (None, Some(principal)) => VerifyOutcome::Success { principal, info },
        }
    }
}

impl<P, I> From<VerifyOutcome<P, I>> for AuthAction<P, I> {
    fn from(outcome: VerifyOutcome<P, I>) -> Self {
        match outcome {
            VerifyOutcome::Error(err) => AuthAction::Error(AuthenticationError::Verify(err)),
            VerifyOutcome::Rejected(info) => AuthAction::Fail(Failure::Rejected(info)),
            VerifyOutcome::Success { principal, info } => AuthAction::Success { principal, info },
        }
    }
}

/// Verifies credentials on their own.
///
/// # Example
/// ```ignore
/// struct KeyStore { pool: PgPool }
///
/// #[async_trait]
/// impl ApiKeyVerifier for KeyStore {
///     type Principal = Client;
///     type Info = String;
///
///     async fn verify(&self, credentials: Credentials) -> VerifyOutcome<Client, String> {
///         match self.find(credentials.get_key(), credentials.get_secret()).await {
///             Ok(Some(client)) => VerifyOutcome::success(client),
///             Ok(None) => VerifyOutcome::rejected_with("unknown key".into()),
///             Err(e) => VerifyOutcome::error(e),
///         }
///     }
/// }
/// ```
#[async_trait]
pub trait ApiKeyVerifier: Send + Sync {
    type Principal;
    type Info;

    async fn verify(&self, credentials: Credentials) -> VerifyOutcome<Self::Principal, Self::Info>;
}

/// Verifies credentials with access to the request they came from.
///
/// Used when `pass_req_to_callback` is enabled.
#[async_trait]
pub trait RequestVerifier: Send + Sync {
    type Principal;
    type Info;

    async fn verify(
        &self,
        req: &RequestView,
        credentials: Credentials,
    ) -> VerifyOutcome<Self::Principal, Self::Info>;
}

/// [`ApiKeyVerifier`] backed by an async closure. See [`verify_fn`].
#[derive(Clone)]
pub struct FnVerifier<F>(F);

/// Wraps `f(credentials) -> impl Future<Output = VerifyOutcome>` as a verifier.
pub fn verify_fn<F, Fut, P, I>(f: F) -> FnVerifier<F>
where
    F: Fn(Credentials) -> Fut + Send + Sync,
    Fut: Future<Output = VerifyOutcome<P, I>> + Send + 'static,
{
    FnVerifier(f)
}

#[async_trait]
impl<F, Fut, P, I> ApiKeyVerifier for FnVerifier<F>
where
    F: Fn(Credentials) -> Fut + Send + Sync,
    Fut: Future<Output = VerifyOutcome<P, I>> + Send + 'static,
    P: Send + 'static,
    I: Send + 'static,
{
    type Principal = P;
    type Info = I;

    async fn verify(&self, credentials: Credentials) -> VerifyOutcome<P, I> {
        (self.0)(credentials).await
    }
}

/// [`RequestVerifier`] backed by a closure. See [`verify_with_request_fn`].
#[derive(Clone)]
pub struct FnRequestVerifier<F>(F);

/// Wraps `f(&request, credentials) -> impl Future<Output = VerifyOutcome>`.
///
/// The returned future may not borrow the request; copy what it needs first.
///
/// ```ignore
/// verify_with_request_fn(|req, credentials| {
///     let path = req.get_path().to_string();
///     async move { lookup(&path, credentials).await }
/// })
/// ```
pub fn verify_with_request_fn<F, Fut, P, I>(f: F) -> FnRequestVerifier<F>
where
    F: Fn(&RequestView, Credentials) -> Fut + Send + Sync,
    Fut: Future<Output = VerifyOutcome<P, I>> + Send + 'static,
{
    FnRequestVerifier(f)
}

#[async_trait]
impl<F, Fut, P, I> RequestVerifier for FnRequestVerifier<F>
where
    F: Fn(&RequestView, Credentials) -> Fut + Send + Sync,
    Fut: Future<Output = VerifyOutcome<P, I>> + Send + 'static,
    P: Send + 'static,
    I: Send + 'static,
{
    type Principal = P;
    type Info = I;

    async fn verify(&self, req: &RequestView, credentials: Credentials) -> VerifyOutcome<P, I> {
        (self.0)(req, credentials).await
    }
}
