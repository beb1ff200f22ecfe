use thiserror::Error;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// A required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    /// The call requires an API key but none is configured.
    #[error("API key is required for this request")]
    MissingApiKey,

    /// Signing was requested without an API secret or a private key.
    #[error("Signing requires an API secret or a private key")]
    MissingSigningKey,

    /// The private key is encrypted and no passphrase was supplied.
    #[error("Private key is encrypted but no passphrase was given")]
    MissingPassphrase,

    /// The private key could not be read or decoded.
    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(String),

    /// The signature could not be produced.
    #[error("Signing failed: {0}")]
    Signing(String),
}
