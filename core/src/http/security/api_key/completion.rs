//! Callback style verification.
//!
//! Code that reports its answer through a callback gets a [`Completion`]
//! handle instead. The handle is consumed when used, so the answer is given at
//! most once; dropping it unused turns into a [`CompletionDropped`] error.

use std::marker::PhantomData;

use async_trait::async_trait;
use tokio::sync::oneshot;

use super::credentials::Credentials;
use super::error::CompletionDropped;
use super::verifier::{ApiKeyVerifier, VerifyOutcome};
use crate::http::security::action::BoxError;

/// Single use completion handle handed to callback style verifiers.
#[derive(Debug)]
pub struct Completion<P, I> {
    sender: oneshot::Sender<VerifyOutcome<P, I>>,
}

impl<P, I> Completion<P, I> {
    /// Creates a handle together with the receiver that waits for it.
    pub fn channel() -> (Self, oneshot::Receiver<VerifyOutcome<P, I>>) {
        let (sender, receiver) = oneshot::channel();
        (Self { sender }, receiver)
    }

    /// Resolves the verification.
    pub fn complete(self, outcome: VerifyOutcome<P, I>) {
        if self.sender.send(outcome).is_err() {
            tracing::debug!("verification completed after the request was abandoned");
        }
    }

    /// Resolves with the `(err, user, info)` triple.
    pub fn done(self, err: Option<BoxError>, principal: Option<P>, info: Option<I>) {
        self.complete(VerifyOutcome::from_parts(err, principal, info));
    }
}

/// [`ApiKeyVerifier`] for callback style code. See [`verify_callback`].
pub struct CallbackVerifier<F, P, I> {
    f: F,
    _outcome: PhantomData<fn(Completion<P, I>)>,
}

impl<F: Clone, P, I> Clone for CallbackVerifier<F, P, I> {
    fn clone(&self) -> Self {
        CallbackVerifier {
            f: self.f.clone(),
            _outcome: PhantomData,
        }
    }
}

/// Wraps `f(credentials, completion)` as a verifier.
///
/// `f` may hand the completion to another task; the strategy waits until it
/// is used or dropped.
///
/// ```ignore
/// verify_callback(|credentials, done: Completion<Client, ()>| {
///     tokio::spawn(async move {
///         let client = store.find(credentials.get_key()).await;
///         done.done(None, client, None);
///     });
/// })
/// ```
pub fn verify_callback<F, P, I>(f: F) -> CallbackVerifier<F, P, I>
where
    F: Fn(Credentials, Completion<P, I>) + Send + Sync,
{
    CallbackVerifier {
        f,
        _outcome: PhantomData,
    }
}

#[async_trait]
impl<F, P, I> ApiKeyVerifier for CallbackVerifier<F, P, I>
where
    F: Fn(Credentials, Completion<P, I>) + Send + Sync,
    P: Send + 'static,
    I: Send + 'static,
{
    type Principal = P;
    type Info = I;

    async fn verify(&self, credentials: Credentials) -> VerifyOutcome<P, I> {
        let (completion, receiver) = Completion::channel();
        (self.f)(credentials, completion);
        match receiver.await {
            Ok(outcome) => outcome,
            Err(_) => VerifyOutcome::error(CompletionDropped),
        }
    }
}
