use auth::TokenError;
use axum::extract::Request;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::extract::CookieJar;

use super::handlers::ApiError;
use super::session::SessionCookiePolicy;
use crate::account::models::AccountId;
use crate::inbound::http::router::AppState;

pub const TOKEN_NOT_FOUND_MESSAGE: &str = "Authentication failed. Token not found";
pub const TOKEN_EXPIRED_MESSAGE: &str = "Token expired. Please log in again.";
pub const INVALID_TOKEN_MESSAGE: &str = "Invalid token";

/// Extension type to store the authenticated account in request extensions
#[derive(Debug, Clone)]
pub struct AuthenticatedAccount {
    pub account_id: AccountId,
    pub email: Option<String>,
}

impl From<TokenError> for ApiError {
    fn from(err: TokenError) -> Self {
        let message = match err {
            TokenError::Missing => TOKEN_NOT_FOUND_MESSAGE,
            TokenError::Expired => TOKEN_EXPIRED_MESSAGE,
            TokenError::Invalid(_) => INVALID_TOKEN_MESSAGE,
        };
        ApiError::Unauthorized(message.to_string())
    }
}

/// Middleware that validates the session token and adds the account to request extensions
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token(req.headers()).unwrap_or_default();

    let identity = state
        .authenticator
        .verify_access_token(&token)
        .map_err(|e| {
            tracing::warn!(error = %e, uri = %req.uri(), "Token verification failed");
            ApiError::from(e)
        })?;

    let account_id = AccountId::from_string(&identity.subject_id).map_err(|e| {
        tracing::warn!(error = %e, "Token subject is not an account id");
        ApiError::Unauthorized(INVALID_TOKEN_MESSAGE.to_string())
    })?;

    req.extensions_mut().insert(AuthenticatedAccount {
        account_id,
        email: identity.email().map(str::to_string),
    });

    Ok(next.run(req).await)
}

/// Session cookie first, then `Authorization: Bearer <token>`.
fn extract_token(headers: &HeaderMap) -> Option<String> {
    let jar = CookieJar::from_headers(headers);
    if let Some(token) = SessionCookiePolicy::token_from(&jar) {
        return Some(token.to_string());
    }

    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(|token| token.trim().to_string())
}
