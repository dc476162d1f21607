//! Terminal actions a strategy reports back to its host.

use std::error::Error as StdError;
use std::time::Duration;

use derive_more::Display;
use serde_json::Value;

use crate::http::security::config::ActionSink;

/// Opaque error produced by application code.
pub type BoxError = Box<dyn StdError + Send + Sync>;

/// Per-call options passed to [`Strategy::authenticate`](crate::http::security::Strategy::authenticate).
#[derive(Debug, Clone, Default)]
pub struct AuthenticateOptions {
    bad_request_message: Option<String>,
}

impl AuthenticateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the default "Missing API Key" / "Missing API Secret" messages.
    pub fn bad_request_message(mut self, message: impl Into<String>) -> Self {
        self.bad_request_message = Some(message.into());
        self
    }

    pub fn get_bad_request_message(&self) -> Option<&str> {
        self.bad_request_message.as_deref()
    }
}

/// Why an authentication attempt failed without an error.
#[derive(Debug, Clone, PartialEq)]
pub enum Failure<I> {
    /// Credentials were missing from the request. The verifier was not called.
    BadRequest { message: String },
    /// The verifier declined the credentials.
    Rejected(Option<I>),
}

/// Errors ending an authentication attempt with [`AuthAction::Error`].
#[derive(Debug, Display)]
pub enum AuthenticationError {
    /// The verifier reported an error. Carried unchanged.
    #[display("verification failed: {_0}")]
    Verify(BoxError),
    /// The verifier did not resolve within the configured limit.
    #[display("verification did not complete within {_0:?}")]
    Timeout(Duration),
}

// `Box<dyn Error>` is not itself an `Error`, so the source is exposed by hand.
impl StdError for AuthenticationError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            AuthenticationError::Verify(e) => Some(&**e),
            AuthenticationError::Timeout(_) => None,
        }
    }
}

/// The single terminal action of one authentication attempt.
#[derive(Debug)]
pub enum AuthAction<P, I> {
    Success { principal: P, info: Option<I> },
    Fail(Failure<I>),
    Error(AuthenticationError),
}

impl<P, I> AuthAction<P, I> {
    pub fn is_success(&self) -> bool {
        matches!(self, AuthAction::Success { .. })
    }

    /// Hands the action to a host that uses the `success` / `fail` / `error`
    /// call style. Exactly one of the three is called.
    pub fn report<S: ActionSink<P, I> + ?Sized>(self, sink: &mut S) {
        match self {
            AuthAction::Success { principal, info } => sink.success(principal, info),
            AuthAction::Fail(failure) => sink.fail(failure),
            AuthAction::Error(err) => sink.error(err),
        }
    }
}

/// Informational payloads that can carry a client facing message.
pub trait FailureInfo {
    fn message(&self) -> Option<&str> {
        None
    }
}

impl FailureInfo for () {}

impl FailureInfo for String {
    fn message(&self) -> Option<&str> {
        Some(self.as_str())
    }
}

impl FailureInfo for &'static str {
    fn message(&self) -> Option<&str> {
        Some(*self)
    }
}

/// Reads the `message` field, e.g. `{"message": "bad creds"}`.
impl FailureInfo for Value {
    fn message(&self) -> Option<&str> {
        self.get("message").and_then(Value::as_str)
    }
}
