//! Traits at the boundary between a strategy and its host.
//!
//! The host (here [`ApiKeyTransform`](crate::http::security::middleware::ApiKeyTransform))
//! calls [`Strategy::authenticate`] once per request and receives a single
//! [`AuthAction`]. Hosts that prefer callbacks implement [`ActionSink`] and use
//! [`AuthAction::report`].

use async_trait::async_trait;

use crate::http::security::action::{AuthAction, AuthenticateOptions, AuthenticationError, Failure};
use crate::http::security::request::RequestView;

/// A pluggable authentication method.
///
/// Implementations hold no per-request state, so one instance can serve any
/// number of concurrent requests.
#[async_trait]
pub trait Strategy: Send + Sync {
    /// The authenticated identity produced on success.
    type Principal: Send;
    /// Informational payload attached to successes and rejections.
    type Info: Send;

    /// Name the strategy is registered under.
    fn name(&self) -> &str;

    /// Runs one authentication attempt and returns its terminal action.
    async fn authenticate(
        &self,
        req: &RequestView,
        options: &AuthenticateOptions,
    ) -> AuthAction<Self::Principal, Self::Info>;
}

/// Call-style receiver for terminal actions.
pub trait ActionSink<P, I> {
    fn success(&mut self, principal: P, info: Option<I>);

    fn fail(&mut self, failure: Failure<I>);

    fn error(&mut self, err: AuthenticationError);
}
