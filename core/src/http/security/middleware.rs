//! API key middleware for Actix Web.
//!
//! Runs a [`Strategy`] in front of the wrapped service and maps its terminal
//! action onto the HTTP exchange:
//!
//! | Action | Result |
//! |--------|--------|
//! | `Success` | principal stored as [`Authenticated`], info as [`AuthenticationInfo`], request forwarded |
//! | `Fail(BadRequest)` | `400 Bad Request` |
//! | `Fail(Rejected)` | `401 Unauthorized` with `WWW-Authenticate` |
//! | `Error` | `500 Internal Server Error` |
//!
//! Only JSON and form bodies are buffered, within the `PayloadConfig` limit
//! of the app. Other payloads reach the handler untouched.

use std::rc::Rc;
use std::sync::Arc;

use actix_service::{Service, Transform};
use actix_web::body::EitherBody;
use actix_web::dev::{Payload, ServiceRequest, ServiceResponse};
use actix_web::web::Bytes;
use actix_web::{Error, HttpMessage};
use futures::future::{ok, LocalBoxFuture, Ready};

use crate::http::error::AuthError;
use crate::http::security::action::{AuthAction, AuthenticateOptions, Failure, FailureInfo};
use crate::http::security::config::Strategy;
use crate::http::security::extractor::{Authenticated, AuthenticationInfo};
use crate::http::security::request::RequestView;

/// Middleware factory wrapping a [`Strategy`].
///
/// # Example
/// ```ignore
/// App::new()
///     .wrap(ApiKeyTransform::new(strategy).realm("Partner API"))
///     .service(my_api_endpoint)
/// ```
pub struct ApiKeyTransform<St> {
    strategy: Arc<St>,
    options: AuthenticateOptions,
    realm: String,
}

impl<St> ApiKeyTransform<St> {
    pub fn new(strategy: St) -> Self {
        Self::with_shared_strategy(Arc::new(strategy))
    }

    /// Uses a strategy shared with other parts of the application.
    pub fn with_shared_strategy(strategy: Arc<St>) -> Self {
        ApiKeyTransform {
            strategy,
            options: AuthenticateOptions::default(),
            realm: "API".to_string(),
        }
    }

    /// Sets the per-call options passed to the strategy.
    pub fn options(mut self, options: AuthenticateOptions) -> Self {
        self.options = options;
        self
    }

    /// Sets the realm announced in `WWW-Authenticate`.
    pub fn realm(mut self, realm: impl Into<String>) -> Self {
        self.realm = realm.into();
        self
    }
}

impl<St> Clone for ApiKeyTransform<St> {
    fn clone(&self) -> Self {
        ApiKeyTransform {
            strategy: Arc::clone(&self.strategy),
            options: self.options.clone(),
            realm: self.realm.clone(),
        }
    }
}

impl<S, B, St> Transform<S, ServiceRequest> for ApiKeyTransform<St>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
    St: Strategy + 'static,
    St::Principal: Clone + 'static,
    St::Info: FailureInfo + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = ApiKeyService<St, S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(ApiKeyService {
            strategy: Arc::clone(&self.strategy),
            options: Rc::new(self.options.clone()),
            realm: Rc::from(self.realm.as_str()),
            service: Rc::new(service),
        })
    }
}

/// API key middleware service.
pub struct ApiKeyService<St, S> {
    strategy: Arc<St>,
    options: Rc<AuthenticateOptions>,
    realm: Rc<str>,
    service: Rc<S>,
}

impl<St, S, B> Service<ServiceRequest> for ApiKeyService<St, S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
    St: Strategy + 'static,
    St::Principal: Clone + 'static,
    St::Info: FailureInfo + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    actix_web::dev::forward_ready!(service);

    fn call(&self, mut req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let strategy = Arc::clone(&self.strategy);
        let options = Rc::clone(&self.options);
        let realm = Rc::clone(&self.realm);

        Box::pin(async move {
            // Step 1: Buffer a readable body and put it back for the handler
            let view = if RequestView::reads_body_of(req.request()) {
                let body = req.extract::<Bytes>().await?;
                let view = RequestView::from_parts(req.request(), &body);
                req.set_payload(Payload::from(body));
                view
            } else {
                RequestView::from_request(req.request())
            };

            // Step 2: Authenticate
            let action = strategy.authenticate(&view, &options).await;

            // Step 3: Forward or answer
            let error = match action {
                AuthAction::Success { principal, info } => {
                    {
                        let mut extensions = req.extensions_mut();
                        extensions.insert(Authenticated::new(principal));
                        extensions.insert(AuthenticationInfo::new(info));
                    }
                    let res = service.call(req).await?;
                    return Ok(res.map_into_left_body());
                }
                AuthAction::Fail(Failure::BadRequest { message }) => AuthError::bad_request(message),
                AuthAction::Fail(Failure::Rejected(info)) => {
                    let message = info
                        .as_ref()
                        .and_then(FailureInfo::message)
                        .unwrap_or("Unauthorized: invalid API credentials");
                    AuthError::unauthorized(message, realm.as_ref())
                }
                AuthAction::Error(err) => {
                    tracing::error!(
                        strategy = strategy.name(),
                        path = req.path(),
                        error = %err,
                        "authentication error"
                    );
                    AuthError::Internal
                }
            };

            Ok(req.error_response(error).map_into_right_body())
        })
    }
}
