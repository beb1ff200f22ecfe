//! Request signing for Binance API.
//!
//! The scheme is picked from the configured credentials: a private key signs
//! with Ed25519 (or RSA when the key is not Ed25519), otherwise the shared
//! secret signs with HMAC-SHA256. Exactly one signature is produced per call.

use crate::credentials::ApiCredentials;
use crate::error::AuthError;
use crate::keys::SignatureAlgorithm;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Name of the query parameter carrying the signature.
pub const SIGNATURE_PARAM: &str = "signature";

/// Request signer for authenticated Binance API calls.
pub struct RequestSigner<'a> {
    credentials: &'a ApiCredentials,
}

impl<'a> RequestSigner<'a> {
    /// Create a new request signer with the given credentials.
    pub fn new(credentials: &'a ApiCredentials) -> Self {
        Self { credentials }
    }

    /// The algorithm `sign` will use.
    ///
    /// # Errors
    /// Returns `AuthError::MissingSigningKey` when neither a secret nor a
    /// private key is configured.
    pub fn algorithm(&self) -> Result<SignatureAlgorithm, AuthError> {
        self.credentials
            .signature_algorithm()
            .ok_or(AuthError::MissingSigningKey)
    }

    /// Sign a canonical query string.
    ///
    /// Asymmetric signatures are base64 encoded, HMAC signatures lowercase hex.
    pub fn sign(&self, message: &str) -> Result<String, AuthError> {
        if let Some(key) = self.credentials.private_key() {
            return key.sign(message.as_bytes());
        }

        match self.credentials.expose_secret() {
            Some(secret) => Ok(hmac_sha256_hex(secret, message)),
            None => Err(AuthError::MissingSigningKey),
        }
    }

    /// Sign `query` and return it with the url-encoded signature appended.
    ///
    /// The returned string starts with `query` byte for byte, so what the
    /// server verifies is exactly what was signed.
    pub fn sign_query(&self, query: &str) -> Result<String, AuthError> {
        let signature = self.sign(query)?;
        let encoded = serde_urlencoded::to_string([(SIGNATURE_PARAM, signature.as_str())])
            .map_err(|e| AuthError::Signing(e.to_string()))?;

        if query.is_empty() {
            Ok(encoded)
        } else {
            Ok(format!("{}&{}", query, encoded))
        }
    }
}

/// HMAC-SHA256 of `message` keyed by `secret`, as lowercase hex.
pub fn hmac_sha256_hex(secret: &str, message: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");

    mac.update(message.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}
