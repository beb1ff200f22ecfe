//! Secure API credential management.
//!
//! Uses the `secrecy` crate to prevent accidental logging of secret keys
//! and ensures memory is zeroed on drop.

use crate::error::AuthError;
use crate::keys::{PrivateKey, SignatureAlgorithm};
use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;

/// API credentials for authenticated requests.
///
/// The api key is public and travels as a header on every call. Signing uses
/// the private key when one is configured, otherwise the shared secret.
#[derive(Clone, Default)]
pub struct ApiCredentials {
    api_key: Option<String>,
    secret_key: Option<SecretString>,
    private_key: Option<Arc<PrivateKey>>,
}

impl ApiCredentials {
    /// Load credentials from environment variables.
    ///
    /// Looks for:
    /// - `BINANCE_API_KEY` - The API key (public, required)
    /// - `BINANCE_SECRET_KEY` - The HMAC secret key (optional)
    /// - `BINANCE_PRIVATE_KEY` - PEM text of an Ed25519 or RSA key (optional)
    /// - `BINANCE_PRIVATE_KEY_PATH` - Path to the PEM file, if the text is not inlined
    /// - `BINANCE_PRIVATE_KEY_PASSPHRASE` - Passphrase of an encrypted key
    ///
    /// # Errors
    /// Returns `AuthError::MissingEnvVar` if the api key is not set, and a key
    /// error if the private key cannot be read or parsed.
    pub fn from_env() -> Result<Self, AuthError> {
        // Load .env file if present (ignores errors if file doesn't exist)
        dotenvy::dotenv().ok();

        let api_key = std::env::var("BINANCE_API_KEY")
            .map_err(|_| AuthError::MissingEnvVar("BINANCE_API_KEY".into()))?;

        let mut credentials = Self::api_key_only(api_key);
        credentials.secret_key = std::env::var("BINANCE_SECRET_KEY")
            .ok()
            .map(SecretString::from);

        let pem = match std::env::var("BINANCE_PRIVATE_KEY") {
            Ok(pem) => Some(pem),
            Err(_) => match std::env::var("BINANCE_PRIVATE_KEY_PATH") {
                Ok(path) => Some(std::fs::read_to_string(&path).map_err(|e| {
                    AuthError::InvalidPrivateKey(format!("cannot read {path}: {e}"))
                })?),
                Err(_) => None,
            },
        };

        if let Some(pem) = pem {
            let passphrase = std::env::var("BINANCE_PRIVATE_KEY_PASSPHRASE").ok();
            let key = PrivateKey::from_pem(&pem, passphrase.as_deref())?;
            credentials.private_key = Some(Arc::new(key));
        }

        Ok(credentials)
    }

    /// Create HMAC credentials from explicit values.
    ///
    /// Useful for testing or when credentials come from other sources.
    pub fn new(api_key: String, secret_key: String) -> Self {
        Self {
            api_key: Some(api_key),
            secret_key: Some(SecretString::from(secret_key)),
            private_key: None,
        }
    }

    /// Create credentials backed by an Ed25519 or RSA private key in PEM form.
    ///
    /// # Errors
    /// Returns an error if the key cannot be decrypted or parsed.
    pub fn with_private_key(
        api_key: String,
        private_key_pem: &str,
        passphrase: Option<&str>,
    ) -> Result<Self, AuthError> {
        let key = PrivateKey::from_pem(private_key_pem, passphrase)?;
        Ok(Self {
            api_key: Some(api_key),
            secret_key: None,
            private_key: Some(Arc::new(key)),
        })
    }

    /// Credentials carrying only an API key (no signing material).
    pub fn api_key_only(api_key: String) -> Self {
        Self {
            api_key: Some(api_key),
            ..Self::default()
        }
    }

    /// Credentials with nothing configured, for public market data.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Get the API key (public, safe to log).
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    /// True when both an api key and a shared secret are configured.
    pub fn check_credential(&self) -> bool {
        self.api_key.is_some() && self.secret_key.is_some()
    }

    /// True when some signing material (secret or private key) is configured.
    pub fn can_sign(&self) -> bool {
        self.secret_key.is_some() || self.private_key.is_some()
    }

    /// The algorithm a signed request will use, if any.
    pub fn signature_algorithm(&self) -> Option<SignatureAlgorithm> {
        match (&self.private_key, &self.secret_key) {
            (Some(key), _) => Some(key.algorithm()),
            (None, Some(_)) => Some(SignatureAlgorithm::HmacSha256),
            (None, None) => None,
        }
    }

    /// Expose the secret key for signing.
    ///
    /// **WARNING**: Only use this for cryptographic operations.
    /// Never log or display the return value.
    pub fn expose_secret(&self) -> Option<&str> {
        self.secret_key.as_ref().map(|s| s.expose_secret())
    }

    pub(crate) fn private_key(&self) -> Option<&PrivateKey> {
        self.private_key.as_deref()
    }
}

impl std::fmt::Debug for ApiCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiCredentials")
            .field("api_key", &self.api_key)
            .field("secret_key", &self.secret_key.as_ref().map(|_| "[REDACTED]"))
            .field("private_key", &self.private_key.as_ref().map(|k| k.algorithm()))
            .finish()
    }
}
