//! Asymmetric private key loading.
//!
//! Keys arrive as PEM text. PKCS#8 (`PRIVATE KEY`), passphrase-protected
//! PKCS#8 (`ENCRYPTED PRIVATE KEY`) and PKCS#1 (`RSA PRIVATE KEY`) blocks are
//! accepted. PKCS#8 material is tried as Ed25519 first and falls back to RSA
//! when it does not parse as an Ed25519 key.

use crate::error::AuthError;
use aws_lc_rs::rand::SystemRandom;
use aws_lc_rs::rsa::KeyPair as RsaKeyPair;
use aws_lc_rs::signature::RSA_PKCS1_SHA256;
use base64::prelude::*;
use ed25519_dalek::pkcs8::DecodePrivateKey;
use ed25519_dalek::{Signer, SigningKey};
use pkcs8::EncryptedPrivateKeyInfo;

const ENCRYPTED_PKCS8_TAG: &str = "ENCRYPTED PRIVATE KEY";
const PKCS1_RSA_TAG: &str = "RSA PRIVATE KEY";

/// Signature scheme backing a set of credentials.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureAlgorithm {
    /// Shared-secret HMAC-SHA256, hex encoded.
    HmacSha256,
    /// Ed25519 over the raw payload, base64 encoded.
    Ed25519,
    /// RSA PKCS#1 v1.5 with SHA-256, base64 encoded.
    Rsa,
}

impl std::fmt::Display for SignatureAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HmacSha256 => write!(f, "hmac-sha256"),
            Self::Ed25519 => write!(f, "ed25519"),
            Self::Rsa => write!(f, "rsa"),
        }
    }
}

/// A parsed asymmetric private key.
pub enum PrivateKey {
    Ed25519(SigningKey),
    Rsa(RsaKeyPair),
}

/// DER bytes recovered from a PEM block.
struct KeyDer {
    bytes: Vec<u8>,
    pkcs1: bool,
}

impl PrivateKey {
    /// Parse a PEM private key, decrypting it with `passphrase` when needed.
    ///
    /// # Errors
    /// Returns `AuthError::MissingPassphrase` for an encrypted key without a
    /// passphrase, and `AuthError::InvalidPrivateKey` when the key is neither
    /// Ed25519 nor RSA or cannot be decrypted.
    pub fn from_pem(pem_text: &str, passphrase: Option<&str>) -> Result<Self, AuthError> {
        let der = decode_pem(pem_text, passphrase)?;

        if !der.pkcs1 {
            match SigningKey::from_pkcs8_der(&der.bytes) {
                Ok(key) => return Ok(Self::Ed25519(key)),
                Err(e) => {
                    tracing::debug!(error = %e, "Private key is not Ed25519, trying RSA");
                }
            }
        }

        let key_pair = if der.pkcs1 {
            RsaKeyPair::from_der(&der.bytes)
        } else {
            RsaKeyPair::from_pkcs8(&der.bytes)
        }
        .map_err(|e| AuthError::InvalidPrivateKey(format!("neither Ed25519 nor RSA: {e}")))?;

        Ok(Self::Rsa(key_pair))
    }

    /// The signature scheme this key produces.
    pub fn algorithm(&self) -> SignatureAlgorithm {
        match self {
            Self::Ed25519(_) => SignatureAlgorithm::Ed25519,
            Self::Rsa(_) => SignatureAlgorithm::Rsa,
        }
    }

    /// Sign `message` and return the base64-encoded signature.
    pub fn sign(&self, message: &[u8]) -> Result<String, AuthError> {
        match self {
            Self::Ed25519(key) => Ok(BASE64_STANDARD.encode(key.sign(message).to_bytes())),
            Self::Rsa(key_pair) => {
                let rng = SystemRandom::new();
                let mut signature = vec![0u8; key_pair.public_modulus_len()];
                key_pair
                    .sign(&RSA_PKCS1_SHA256, &rng, message, &mut signature)
                    .map_err(|_| AuthError::Signing("RSA signature generation failed".into()))?;
                Ok(BASE64_STANDARD.encode(signature))
            }
        }
    }
}

impl std::fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrivateKey")
            .field("algorithm", &self.algorithm())
            .field("key", &"[REDACTED]")
            .finish()
    }
}

fn decode_pem(pem_text: &str, passphrase: Option<&str>) -> Result<KeyDer, AuthError> {
    let block = pem::parse(pem_text.trim())
        .map_err(|e| AuthError::InvalidPrivateKey(format!("failed to parse PEM: {e}")))?;

    match block.tag() {
        ENCRYPTED_PKCS8_TAG => {
            let passphrase = passphrase.ok_or(AuthError::MissingPassphrase)?;
            let info = EncryptedPrivateKeyInfo::try_from(block.contents())
                .map_err(|e| AuthError::InvalidPrivateKey(e.to_string()))?;
            let document = info.decrypt(passphrase).map_err(|_| {
                AuthError::InvalidPrivateKey("failed to decrypt private key".into())
            })?;
            Ok(KeyDer {
                bytes: document.as_bytes().to_vec(),
                pkcs1: false,
            })
        }
        PKCS1_RSA_TAG => Ok(KeyDer {
            bytes: block.contents().to_vec(),
            pkcs1: true,
        }),
        tag if tag.ends_with("PRIVATE KEY") => Ok(KeyDer {
            bytes: block.contents().to_vec(),
            pkcs1: false,
        }),
        tag => Err(AuthError::InvalidPrivateKey(format!(
            "PEM block '{tag}' does not contain a private key"
        ))),
    }
}
