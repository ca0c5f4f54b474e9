use crate::state::AppState;
use crate::utils::ApiError;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

/// Authenticated caller identity, attached as a request extension by
/// [`require_auth`] and pulled out by handlers as an extractor.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user_id: Uuid,
    pub tenant_id: Uuid,
    pub roles: Vec<String>,
}

impl AuthContext {
    pub fn has_role(&self, code: &str) -> bool {
        self.roles.iter().any(|r| r == code)
    }

    pub fn require_role(&self, code: &str) -> Result<(), ApiError> {
        if self.has_role(code) {
            Ok(())
        } else {
            Err(ApiError::Forbidden(format!("requires role {code}")))
        }
    }
}

impl<S> FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| ApiError::Unauthorized("missing authentication".to_string()))
    }
}

pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("missing authorization header".to_string()))?;

    let token = header.strip_prefix("Bearer ").ok_or_else(|| {
        ApiError::Unauthorized("invalid authorization format, expected 'Bearer <token>'".to_string())
    })?;

    let claims = state
        .jwt
        .validate_token(token)
        .map_err(|_| ApiError::Unauthorized("invalid or expired token".to_string()))?;

    let user_id = Uuid::parse_str(&claims.sub)
        .map_err(|_| ApiError::Unauthorized("malformed token subject".to_string()))?;
    let tenant_id = Uuid::parse_str(&claims.tenant_id)
        .map_err(|_| ApiError::Unauthorized("malformed token tenant".to_string()))?;

    request.extensions_mut().insert(AuthContext {
        user_id,
        tenant_id,
        roles: claims.roles,
    });

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_checks() {
        let ctx = AuthContext {
            user_id: Uuid::new_v4(),
            tenant_id: Uuid::new_v4(),
            roles: vec!["HR".to_string(), "ADMIN".to_string()],
        };
        assert!(ctx.has_role("ADMIN"));
        assert!(!ctx.has_role("AUDITOR"));
        assert!(ctx.require_role("HR").is_ok());
        assert!(matches!(
            ctx.require_role("AUDITOR"),
            Err(ApiError::Forbidden(_))
        ));
    }
}
