//! Authentication and signing for exchange APIs.
//!
//! This crate provides secure credential management and request signing
//! for authenticated API calls to Binance.
//!
//! # Features
//!
//! - **Secure Credentials**: API secrets are wrapped in `SecretString` to prevent
//!   accidental logging and ensure memory is zeroed on drop.
//! - **Three signing schemes**: HMAC-SHA256 over a shared secret, Ed25519, and
//!   RSA (PKCS#1 v1.5, SHA-256). Private keys may be passphrase protected.
//! - **Environment Loading**: Credentials can be loaded from environment variables
//!   or a `.env` file.
//!
//! # Example
//!
//! ```rust,ignore
//! use auth::{ApiCredentials, RequestSigner};
//!
//! // Load credentials from environment
//! let credentials = ApiCredentials::from_env()?;
//!
//! // Create a signer
//! let signer = RequestSigner::new(&credentials);
//!
//! // Sign a canonical query string
//! let signed_query = signer.sign_query("symbol=BTCUSDT&timestamp=1499827319559")?;
//! ```

mod credentials;
mod error;
mod keys;
mod signer;

pub use credentials::ApiCredentials;
pub use error::AuthError;
pub use keys::{PrivateKey, SignatureAlgorithm};
pub use signer::{hmac_sha256_hex, RequestSigner, SIGNATURE_PARAM};
