//! Request-time authentication gateway and its axum middleware.
//!
//! Extracts the bearer credential, verifies it through the token service,
//! loads the subject account and enforces the status gates, producing a
//! [`Principal`] for downstream handlers. A failure at any step is terminal
//! for the request and surfaces as a single opaque authentication error.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header::AUTHORIZATION, Request},
    middleware::Next,
    response::Response,
};
use tracing::{field, info_span, warn, Instrument};

use crate::api::error::ApiError;
use crate::auth::models::{AuthError, Principal, TokenKind};
use crate::auth::token_service::TokenService;
use crate::observability::metrics;
use crate::storage::repositories::AccountRepository;

/// Authorization schemes the platform accepts in the bearer header. Any
/// other scheme is rejected identically to a missing header.
pub const RECOGNIZED_SCHEMES: &[&str] = &["Bearer", "JWT"];

pub type GatewayState = Arc<AuthGateway>;

/// Authenticates one inbound request from its Authorization header.
pub struct AuthGateway {
    tokens: TokenService,
    accounts: Arc<dyn AccountRepository>,
}

impl AuthGateway {
    pub fn new(tokens: TokenService, accounts: Arc<dyn AccountRepository>) -> Self {
        Self { tokens, accounts }
    }

    /// Resolve an Authorization header value into a [`Principal`].
    ///
    /// Steps, each terminal on failure: extract the `"<scheme> <token>"`
    /// credential, verify the token, require the ACCESS kind, load the
    /// account, and apply the status gates in order (inactive, deleted,
    /// suspended, blocked). The account is re-read on every request so
    /// status changes since token issuance take effect immediately.
    pub async fn authenticate(&self, header: Option<&str>) -> Result<Principal, AuthError> {
        let header =
            header.map(str::trim).filter(|h| !h.is_empty()).ok_or(AuthError::MissingCredential)?;

        let (scheme, token) = header.split_once(' ').ok_or(AuthError::UnsupportedScheme)?;
        if !RECOGNIZED_SCHEMES.contains(&scheme) {
            return Err(AuthError::UnsupportedScheme);
        }

        let claims = self.tokens.verify(token.trim())?;

        if claims.kind != TokenKind::Access {
            return Err(AuthError::WrongTokenKind);
        }

        let account_id = claims.account_id().ok_or(AuthError::AccountNotFound)?;
        let account = self
            .accounts
            .get_account(account_id)
            .await
            .map_err(AuthError::from)?
            .ok_or(AuthError::AccountNotFound)?;

        if let Some(reason) = account.signin_block() {
            return Err(AuthError::AccountDisabled(reason));
        }

        Ok(Principal::from_account(&account, claims.exp))
    }
}

/// Middleware entry point that authenticates requests using the configured
/// [`AuthGateway`].
pub async fn authenticate(
    State(gateway): State<GatewayState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let span = info_span!(
        "auth_gateway.authenticate",
        http.method = %method,
        http.path = %path,
        auth.account_id = field::Empty
    );

    async move {
        let header =
            request.headers().get(AUTHORIZATION).and_then(|value| value.to_str().ok());

        match gateway.authenticate(header).await {
            Ok(principal) => {
                tracing::Span::current()
                    .record("auth.account_id", field::display(&principal.account_id));
                metrics::record_authentication("success");
                request.extensions_mut().insert(principal);
                Ok(next.run(request).await)
            }
            Err(err) => {
                metrics::record_authentication(err.metric_label());
                warn!(error = %err, "authentication failed");
                Err(ApiError::from(err))
            }
        }
    }
    .instrument(span)
    .await
}
