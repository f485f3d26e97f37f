//! Business logic for issuing, verifying and refreshing session tokens.

use chrono::Utc;
use tracing::instrument;
use uuid::Uuid;

use crate::auth::codec::{self, Header};
use crate::auth::models::{AuthError, Claims, TokenKind, TokenPair};
use crate::config::{AuthConfig, Environment};
use crate::domain::AccountId;
use crate::errors::Error;

/// Stateless issuer and verifier for access/refresh token pairs.
///
/// Tokens are self-contained: verification needs only the server secret and
/// the current time, so concurrent requests never contend on shared state.
#[derive(Clone)]
pub struct TokenService {
    secret: Vec<u8>,
    issuer: String,
    audience: String,
    access_ttl_seconds: i64,
    refresh_ttl_seconds: i64,
}

impl TokenService {
    pub fn from_config(config: &AuthConfig, environment: Environment) -> Self {
        Self {
            secret: config.token_secret(environment),
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
            access_ttl_seconds: config.access_ttl_seconds,
            refresh_ttl_seconds: config.refresh_ttl_seconds,
        }
    }

    /// Mint a fresh access/refresh pair for an account.
    ///
    /// The two payloads differ only in kind and lifetime; each carries its
    /// own random `jti`. An existing token is never mutated into a new one.
    #[instrument(skip(self, username, full_name), fields(account_id = %account_id))]
    pub fn issue_pair(
        &self,
        account_id: AccountId,
        username: &str,
        full_name: Option<&str>,
    ) -> Result<TokenPair, AuthError> {
        let now = Utc::now().timestamp();

        let access_token =
            self.issue(TokenKind::Access, account_id, username, full_name, now)?;
        let refresh_token =
            self.issue(TokenKind::Refresh, account_id, username, full_name, now)?;

        Ok(TokenPair { access_token, refresh_token })
    }

    /// Verify a token's signature and expiry, returning its claims.
    ///
    /// Any codec failure is reported as an invalid signature; an expired
    /// token with a valid signature is reported as expired.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let (_header, claims): (Header, Claims) =
            codec::decode(token, &self.secret).map_err(|_| AuthError::InvalidSignature)?;

        if claims.exp < Utc::now().timestamp() {
            return Err(AuthError::Expired);
        }

        Ok(claims)
    }

    /// Rotate a refresh token into a brand-new pair.
    ///
    /// The old refresh token is not invalidated server-side: tokens are
    /// stateless, so it remains usable until its own natural expiry.
    #[instrument(skip(self, refresh_token))]
    pub fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AuthError> {
        let claims = self.verify(refresh_token)?;

        if claims.kind != TokenKind::Refresh {
            return Err(AuthError::WrongTokenKind);
        }

        let account_id = claims.account_id().ok_or(AuthError::InvalidSignature)?;
        self.issue_pair(account_id, &claims.username, claims.full_name.as_deref())
    }

    fn issue(
        &self,
        kind: TokenKind,
        account_id: AccountId,
        username: &str,
        full_name: Option<&str>,
        now: i64,
    ) -> Result<String, AuthError> {
        let ttl = match kind {
            TokenKind::Access => self.access_ttl_seconds,
            TokenKind::Refresh => self.refresh_ttl_seconds,
        };

        let claims = Claims {
            user_id: account_id.to_string(),
            username: username.to_string(),
            full_name: full_name.map(str::to_string),
            kind,
            iat: now,
            exp: now + ttl,
            jti: Uuid::new_v4().to_string(),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
        };

        codec::encode(&Header::hs512(), &claims, &self.secret).map_err(|err| {
            AuthError::Persistence(Error::internal(format!("Failed to encode token: {}", err)))
        })
    }

    #[cfg(test)]
    pub(crate) fn signing_secret(&self) -> &[u8] {
        &self.secret
    }
}
