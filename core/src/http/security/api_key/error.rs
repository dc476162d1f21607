//! API key strategy construction errors.

use derive_more::{Display, Error};

/// Errors raised while building an [`ApiKeyStrategy`](super::ApiKeyStrategy).
#[derive(Debug, Display, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// No verifier was supplied.
    #[display("API key strategy requires a verifier")]
    MissingVerifier,

    /// The verifier's shape does not match `pass_req_to_callback`.
    #[display("pass_req_to_callback is {pass_req_to_callback} but the verifier {found}")]
    VerifierShape {
        pass_req_to_callback: bool,
        found: &'static str,
    },

    /// A field or header name is empty.
    #[display("`{field}` must not be empty")]
    EmptyField { field: &'static str },
}

/// Returned by callback style verifiers whose completion handle was dropped
/// without being invoked.
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
#[display("verifier completion dropped before it was invoked")]
pub struct CompletionDropped;
