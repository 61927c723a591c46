//! Access and refresh token issuance
//!
//! Tokens are HS256 JWTs. Nothing is stored server side: a token is valid
//! while its signature checks out and it has not expired.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use crate::config::AuthConfig;
use crate::utils::errors::{EventsApiError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

/// Claims carried by both token kinds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    pub token_type: TokenType,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
    pub iss: String,
}

impl Claims {
    /// The user the token was issued for
    pub fn user_id(&self) -> Result<i64> {
        self.sub
            .parse()
            .map_err(|_| EventsApiError::Authentication(format!("Invalid token subject: {}", self.sub)))
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}

/// A freshly minted credential pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub refresh: String,
    pub access: String,
}

#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    issuer: String,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("issuer", &self.issuer)
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish_non_exhaustive()
    }
}

impl TokenService {
    pub fn new(secret: &str, issuer: impl Into<String>, access_ttl: Duration, refresh_ttl: Duration) -> Self {
        let issuer = issuer.into();
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "sub", "iss"]);
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            issuer,
            access_ttl,
            refresh_ttl,
        }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(
            &config.jwt_secret,
            config.issuer.clone(),
            Duration::seconds(config.access_token_ttl_seconds),
            Duration::seconds(config.refresh_token_ttl_seconds),
        )
    }

    /// Issue a new refresh/access pair for the user
    pub fn issue(&self, user_id: i64) -> Result<TokenPair> {
        Ok(TokenPair {
            refresh: self.sign(user_id, TokenType::Refresh, self.refresh_ttl)?,
            access: self.sign(user_id, TokenType::Access, self.access_ttl)?,
        })
    }

    /// Mint a new access token from a valid refresh token
    pub fn refresh_access(&self, refresh_token: &str) -> Result<String> {
        let claims = self.verify(refresh_token, TokenType::Refresh)?;
        self.sign(claims.user_id()?, TokenType::Access, self.access_ttl)
    }

    /// Check signature, issuer, expiry and kind; return the claims
    pub fn verify(&self, token: &str, expected: TokenType) -> Result<Claims> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)?;

        if data.claims.token_type != expected {
            return Err(EventsApiError::Authentication(format!(
                "Expected {:?} token, got {:?}",
                expected, data.claims.token_type
            )));
        }

        Ok(data.claims)
    }

    fn sign(&self, user_id: i64, token_type: TokenType, ttl: Duration) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            token_type,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
            jti: uuid::Uuid::new_v4().to_string(),
            iss: self.issuer.clone(),
        };

        Ok(encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?)
    }
}
