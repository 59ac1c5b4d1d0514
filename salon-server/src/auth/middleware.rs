//! Authentication middleware
//!
//! Axum middleware resolving the session: extracts and validates the JWT
//! from `Authorization: Bearer <token>` and injects [`CurrentUser`] into
//! request extensions.
//!
//! # Paths that skip authentication
//!
//! - `OPTIONS *` (CORS preflight)
//! - non-`/api/` paths
//! - `/api/auth/login`, `/api/auth/register`
//! - `/api/health`
//! - `/api/image/{file}` (logos render on public pages)

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::auth::{CurrentUser, JwtService};
use crate::core::ServerState;
use crate::security_log;
use crate::utils::AppError;

fn is_public_api_route(path: &str) -> bool {
    path == "/api/auth/login"
        || path == "/api/auth/register"
        || path == "/api/health"
        || path.starts_with("/api/image/")
}

/// Require an authenticated session on all protected API routes
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = req.uri().path();

    // CORS preflight requests pass through
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    // Non-API routes fall through to their own handlers (404 etc.)
    if !path.starts_with("/api/") {
        return Ok(next.run(req).await);
    }

    if is_public_api_route(path) {
        return Ok(next.run(req).await);
    }

    let jwt_service = state.get_jwt_service();
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) => JwtService::extract_from_header(header)
            .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?,
        None => {
            security_log!("WARN", "auth_missing", uri = format!("{:?}", req.uri()));
            return Err(AppError::unauthorized());
        }
    };

    match jwt_service.validate_token(token) {
        Ok(claims) => {
            let user = CurrentUser::from(claims);
            req.extensions_mut().insert(user);
            Ok(next.run(req).await)
        }
        Err(e) => {
            security_log!(
                "WARN",
                "auth_failed",
                error = format!("{}", e),
                uri = format!("{:?}", req.uri())
            );

            match e {
                crate::auth::JwtError::ExpiredToken => Err(AppError::token_expired()),
                _ => Err(AppError::invalid_token("Invalid token")),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_route_list() {
        assert!(is_public_api_route("/api/auth/login"));
        assert!(is_public_api_route("/api/auth/register"));
        assert!(is_public_api_route("/api/health"));
        assert!(is_public_api_route("/api/image/abc.jpg"));
        assert!(!is_public_api_route("/api/auth/me"));
        assert!(!is_public_api_route("/api/organizations"));
    }
}
