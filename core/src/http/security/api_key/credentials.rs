//! Extracted API key / secret pair.

use std::fmt;

/// The API key and secret found in one request.
///
/// Lives only for the duration of a single verification. `Debug` output
/// never contains the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    key: String,
    secret: String,
}

impl Credentials {
    pub fn new(key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            secret: secret.into(),
        }
    }

    /// Returns the API key.
    pub fn get_key(&self) -> &str {
        &self.key
    }

    /// Returns the API secret.
    pub fn get_secret(&self) -> &str {
        &self.secret
    }

    /// Splits into `(key, secret)`.
    pub fn into_parts(self) -> (String, String) {
        (self.key, self.secret)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("key", &self.key)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}
