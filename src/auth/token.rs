use crate::types::{AppError, Result};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::rngs::OsRng;
use rand::TryRngCore;
use sha2::{Digest, Sha256};
use std::fmt;

/// Raw token entropy in bytes (128 bits).
pub const TOKEN_BYTES: usize = 16;

/// Length of a hex-encoded SHA-256 digest.
pub const DIGEST_LEN: usize = 64;

/// A freshly minted remember token together with its storable digest.
///
/// The raw value must only ever leave the process inside the remember
/// cookie, so `Debug` redacts it.
#[derive(Clone)]
pub struct RememberToken {
    raw: String,
    digest: String,
}

impl RememberToken {
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn digest(&self) -> &str {
        &self.digest
    }

    pub fn into_parts(self) -> (String, String) {
        (self.raw, self.digest)
    }
}

impl fmt::Debug for RememberToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RememberToken")
            .field("raw", &"[redacted]")
            .field("digest", &self.digest)
            .finish()
    }
}

/// Issues unguessable remember tokens and their one-way digests.
///
/// Tokens carry full entropy, so a plain SHA-256 is enough for the digest.
/// This is deliberately not the password hasher.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenIssuer;

impl TokenIssuer {
    pub fn new() -> Self {
        Self
    }

    /// Generates a URL-safe token from the operating system RNG.
    pub fn new_token(&self) -> Result<String> {
        let mut bytes = [0u8; TOKEN_BYTES];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| AppError::Internal(format!("Failed to read OS randomness: {}", e)))?;
        Ok(URL_SAFE_NO_PAD.encode(bytes))
    }

    /// Hashes a token using SHA256 for storage.
    pub fn digest(&self, token: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(token.as_bytes());
        hex::encode(hasher.finalize())
    }

    /// Mints a token and computes its digest in one step.
    pub fn mint(&self) -> Result<RememberToken> {
        let raw = self.new_token()?;
        let digest = self.digest(&raw);
        Ok(RememberToken { raw, digest })
    }
}
