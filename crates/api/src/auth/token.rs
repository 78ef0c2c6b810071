//! Verification of identity-provider tokens.
//!
//! Production tokens are Firebase ID tokens: RS256 JWTs whose `kid` header
//! names one of the provider's published signing keys. For local development
//! and tests an HS256 shared-secret verifier accepts tokens with the same
//! claim layout. Both check audience, issuer and expiry, and both re-verify
//! on every call; only the provider's public keys are cached.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use jsonwebtoken::jwk::JwkSet;
use jsonwebtoken::{
    decode, decode_header, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use yakbot_core::types::UserId;

use crate::config::IdentityConfig;

/// A fetched key set is never consulted again for an unknown `kid` sooner than this.
const MIN_KEY_REFRESH_INTERVAL: Duration = Duration::from_secs(60);

/// Claims carried by an identity token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityClaims {
    /// Stable subject id assigned by the provider (Firebase `uid`).
    pub sub: String,
    pub aud: String,
    pub iss: String,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
}

/// The outcome of a successful verification: who the caller is upstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedIdentity {
    pub subject: UserId,
}

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("invalid token: {0}")]
    Invalid(#[from] jsonwebtoken::errors::Error),

    #[error("token header carries no key id")]
    MissingKeyId,

    #[error("token signed with unknown key '{0}'")]
    UnknownKey(String),

    #[error("token subject is empty")]
    EmptySubject,

    #[error("failed to fetch signing keys: {0}")]
    KeyFetch(#[from] reqwest::Error),
}

/// Audience and issuer every accepted token must carry.
#[derive(Debug, Clone)]
pub struct ExpectedClaims {
    pub audience: String,
    pub issuer: String,
}

impl ExpectedClaims {
    /// Firebase convention: audience is the project id, issuer is the
    /// project's securetoken URL.
    pub fn for_project(project_id: &str) -> Self {
        Self {
            audience: project_id.to_string(),
            issuer: format!("https://securetoken.google.com/{project_id}"),
        }
    }

    fn validation(&self, algorithm: Algorithm) -> Validation {
        let mut validation = Validation::new(algorithm);
        validation.set_audience(&[&self.audience]);
        validation.set_issuer(&[&self.issuer]);
        validation.set_required_spec_claims(&["exp", "sub", "aud", "iss"]);
        validation
    }
}

/// Verifies a raw bearer token and yields the provider identity behind it.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> Result<VerifiedIdentity, TokenError>;
}

fn identity_from(claims: IdentityClaims) -> Result<VerifiedIdentity, TokenError> {
    if claims.sub.trim().is_empty() {
        return Err(TokenError::EmptySubject);
    }
    Ok(VerifiedIdentity {
        subject: claims.sub,
    })
}

/// Build the verifier selected by configuration.
///
/// A configured shared secret wins; otherwise tokens are checked against the
/// provider's published keys.
pub fn build_verifier(config: &IdentityConfig) -> Arc<dyn TokenVerifier> {
    let expected = ExpectedClaims::for_project(&config.project_id);
    match &config.shared_secret {
        Some(secret) => {
            tracing::warn!("AUTH_SHARED_SECRET is set; accepting HS256 development tokens");
            Arc::new(SharedSecretVerifier::new(secret, expected))
        }
        None => Arc::new(FirebaseVerifier::new(
            reqwest::Client::new(),
            config.jwks_url.clone(),
            expected,
            Duration::from_secs(config.jwks_cache_ttl_secs),
        )),
    }
}

// ---------------------------------------------------------------------------
// Shared secret (HS256)
// ---------------------------------------------------------------------------

/// HS256 verifier for development environments and tests.
pub struct SharedSecretVerifier {
    key: DecodingKey,
    expected: ExpectedClaims,
}

impl SharedSecretVerifier {
    pub fn new(secret: &str, expected: ExpectedClaims) -> Self {
        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            expected,
        }
    }
}

#[async_trait]
impl TokenVerifier for SharedSecretVerifier {
    async fn verify(&self, token: &str) -> Result<VerifiedIdentity, TokenError> {
        let data = decode::<IdentityClaims>(
            token,
            &self.key,
            &self.expected.validation(Algorithm::HS256),
        )?;
        identity_from(data.claims)
    }
}

/// Mint an HS256 token accepted by a [`SharedSecretVerifier`] with the same
/// secret and expectations.
pub fn issue_shared_secret_token(
    subject: &str,
    lifetime: chrono::Duration,
    secret: &str,
    expected: &ExpectedClaims,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now();
    let claims = IdentityClaims {
        sub: subject.to_string(),
        aud: expected.audience.clone(),
        iss: expected.issuer.clone(),
        exp: (now + lifetime).timestamp(),
        iat: now.timestamp(),
    };
    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

// ---------------------------------------------------------------------------
// Firebase (RS256 against the published JWK set)
// ---------------------------------------------------------------------------

struct CachedKeys {
    keys: JwkSet,
    fetched_at: Instant,
}

/// RS256 verifier backed by the identity provider's JWK endpoint.
pub struct FirebaseVerifier {
    client: reqwest::Client,
    jwks_url: String,
    expected: ExpectedClaims,
    cache_ttl: Duration,
    cache: RwLock<Option<CachedKeys>>,
}

impl FirebaseVerifier {
    pub fn new(
        client: reqwest::Client,
        jwks_url: String,
        expected: ExpectedClaims,
        cache_ttl: Duration,
    ) -> Self {
        Self {
            client,
            jwks_url,
            expected,
            cache_ttl,
            cache: RwLock::new(None),
        }
    }

    /// Resolve the decoding key for `kid`, refreshing the key set when it is
    /// stale or does not know the key yet.
    async fn key_for(&self, kid: &str) -> Result<DecodingKey, TokenError> {
        {
            let cache = self.cache.read().await;
            if let Some(cached) = cache.as_ref() {
                let age = cached.fetched_at.elapsed();
                if age < self.cache_ttl {
                    if let Some(jwk) = cached.keys.find(kid) {
                        return Ok(DecodingKey::from_jwk(jwk)?);
                    }
                    if age < MIN_KEY_REFRESH_INTERVAL {
                        return Err(TokenError::UnknownKey(kid.to_string()));
                    }
                }
            }
        }

        let keys = self.fetch_keys().await?;
        let key = keys.find(kid).map(DecodingKey::from_jwk).transpose()?;
        *self.cache.write().await = Some(CachedKeys {
            keys,
            fetched_at: Instant::now(),
        });
        key.ok_or_else(|| TokenError::UnknownKey(kid.to_string()))
    }

    async fn fetch_keys(&self) -> Result<JwkSet, TokenError> {
        let keys = self
            .client
            .get(&self.jwks_url)
            .send()
            .await?
            .error_for_status()?
            .json::<JwkSet>()
            .await?;
        tracing::debug!(count = keys.keys.len(), "Fetched identity provider signing keys");
        Ok(keys)
    }
}

#[async_trait]
impl TokenVerifier for FirebaseVerifier {
    async fn verify(&self, token: &str) -> Result<VerifiedIdentity, TokenError> {
        let header = decode_header(token)?;
        let kid = header.kid.ok_or(TokenError::MissingKeyId)?;
        let key = self.key_for(&kid).await?;
        let data = decode::<IdentityClaims>(
            token,
            &key,
            &self.expected.validation(Algorithm::RS256),
        )?;
        identity_from(data.claims)
    }
}
