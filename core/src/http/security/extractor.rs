//! Extractors for the principal stored by [`ApiKeyTransform`](super::middleware::ApiKeyTransform).

use std::future::{ready, Ready};
use std::ops::Deref;

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};

use crate::http::error::AuthError;

/// Extractor for the authenticated principal.
///
/// # Usage
/// ```ignore
/// use actix_apikey::http::security::Authenticated;
///
/// async fn handler(client: Authenticated<Client>) -> impl Responder {
///     format!("Hello, {}!", client.name)
/// }
/// ```
///
/// # Errors
/// Returns `401 Unauthorized` if the request was not authenticated.
#[derive(Debug, Clone)]
pub struct Authenticated<P>(P);

impl<P> Authenticated<P> {
    pub fn new(principal: P) -> Self {
        Authenticated(principal)
    }

    /// Returns the inner principal.
    pub fn into_inner(self) -> P {
        self.0
    }
}

impl<P> Deref for Authenticated<P> {
    type Target = P;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<P: Clone + 'static> FromRequest for Authenticated<P> {
    type Error = AuthError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<Authenticated<P>>().cloned() {
            Some(principal) => ready(Ok(principal)),
            None => ready(Err(AuthError::unauthorized("Unauthorized", "API"))),
        }
    }
}

/// Optional extractor for the authenticated principal.
///
/// Yields `None` instead of failing when the request was not authenticated.
#[derive(Debug, Clone)]
pub struct OptionalAuthenticated<P>(Option<P>);

impl<P> OptionalAuthenticated<P> {
    pub fn into_inner(self) -> Option<P> {
        self.0
    }

    pub fn is_authenticated(&self) -> bool {
        self.0.is_some()
    }
}

impl<P> Deref for OptionalAuthenticated<P> {
    type Target = Option<P>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<P: Clone + 'static> FromRequest for OptionalAuthenticated<P> {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let principal = req
            .extensions()
            .get::<Authenticated<P>>()
            .map(|p| p.0.clone());
        ready(Ok(OptionalAuthenticated(principal)))
    }
}

/// Informational payload the verifier attached to a successful attempt.
///
/// Holds `None` when the verifier gave no info or the request was not
/// authenticated.
///
/// ```ignore
/// async fn handler(info: AuthenticationInfo<serde_json::Value>) -> impl Responder {
///     format!("plan: {:?}", info.as_ref().and_then(|i| i.get("plan")))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthenticationInfo<I>(Option<I>);

impl<I> AuthenticationInfo<I> {
    pub fn new(info: Option<I>) -> Self {
        AuthenticationInfo(info)
    }

    pub fn into_inner(self) -> Option<I> {
        self.0
    }
}

impl<I> Deref for AuthenticationInfo<I> {
    type Target = Option<I>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<I: Clone + 'static> FromRequest for AuthenticationInfo<I> {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let info = req
            .extensions()
            .get::<AuthenticationInfo<I>>()
            .and_then(|i| i.0.clone());
        ready(Ok(AuthenticationInfo(info)))
    }
}

/// Extension trait for reading the principal off an `HttpRequest`.
pub trait PrincipalExt {
    /// Returns a clone of the principal, if the request was authenticated.
    fn principal<P: Clone + 'static>(&self) -> Option<P>;

    fn is_authenticated_as<P: 'static>(&self) -> bool;
}

impl PrincipalExt for HttpRequest {
    fn principal<P: Clone + 'static>(&self) -> Option<P> {
        self.extensions()
            .get::<Authenticated<P>>()
            .map(|p| p.0.clone())
    }

    fn is_authenticated_as<P: 'static>(&self) -> bool {
        self.extensions().get::<Authenticated<P>>().is_some()
    }
}
