use actix_web::http::header::{self, HeaderValue};
use actix_web::{error, http::StatusCode, HttpResponse, HttpResponseBuilder};
use derive_more::{Display, Error};

/// HTTP facing authentication errors.
///
/// Each terminal failure of the strategy maps onto one of these when it runs
/// behind [`ApiKeyTransform`](crate::http::security::middleware::ApiKeyTransform).
#[derive(Debug, Display, Error)]
pub enum AuthError {
    /// Credentials were not present in the request.
    #[display("{message}")]
    BadRequest { message: String },

    /// The verifier declined the credentials.
    #[display("{message}")]
    Unauthorized { message: String, realm: String },

    /// The verifier failed. Details stay in the logs.
    #[display("authentication could not be completed")]
    Internal,
}

impl AuthError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        AuthError::BadRequest {
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>, realm: impl Into<String>) -> Self {
        AuthError::Unauthorized {
            message: message.into(),
            realm: realm.into(),
        }
    }
}

impl error::ResponseError for AuthError {
    fn status_code(&self) -> StatusCode {
        match *self {
            AuthError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AuthError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            AuthError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let body = serde_json::json!({
            "error": status.canonical_reason().unwrap_or("Error"),
            "message": self.to_string(),
        });

        let mut builder = HttpResponseBuilder::new(status);
        if let AuthError::Unauthorized { realm, .. } = self {
            if let Ok(challenge) = HeaderValue::from_str(&format!(r#"ApiKey realm="{}""#, realm)) {
                builder.insert_header((header::WWW_AUTHENTICATE, challenge));
            }
        }
        builder.json(body)
    }
}
