//! HMAC signing for cookie payloads.
//!
//! Sessions and flash notices both travel in cookies as HS256 JWTs, so a
//! tampered or expired cookie is simply rejected on read.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::config::Config;
use crate::errors::AppResult;

/// Session claims payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// User id
    pub sub: i32,
    pub iat: i64,
    pub exp: i64,
}

impl SessionClaims {
    /// Claims for `user_id`, valid for `hours` from now.
    pub fn new(user_id: i32, hours: i64) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id,
            iat: now.timestamp(),
            exp: (now + Duration::hours(hours)).timestamp(),
        }
    }
}

/// Signs and verifies cookie payloads with the application secret
#[derive(Clone)]
pub struct TokenSigner {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenSigner {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.secret_key_bytes())
    }

    /// Sign claims into a compact token.
    ///
    /// The claims must carry an `exp` field.
    pub fn sign<T: Serialize>(&self, claims: &T) -> AppResult<String> {
        Ok(encode(&Header::default(), claims, &self.encoding)?)
    }

    /// Verify signature and expiry, returning the claims
    pub fn verify<T: DeserializeOwned>(&self, token: &str) -> AppResult<T> {
        let data = decode::<T>(token, &self.decoding, &Validation::default())?;
        Ok(data.claims)
    }
}

impl std::fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("TokenSigner([REDACTED])")
    }
}
