use crate::auth::{password, JwtManager};
use crate::database::{Repository, User};
use crate::utils::ApiError;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

pub struct AuthService {
    repository: Arc<Repository>,
    jwt: Arc<JwtManager>,
}

impl AuthService {
    pub fn new(repository: Arc<Repository>, jwt: Arc<JwtManager>) -> Self {
        Self { repository, jwt }
    }

    /// Verify credentials and issue a token. Every failure path returns
    /// the same message so callers cannot probe which emails exist.
    pub async fn authenticate(
        &self,
        email: &str,
        password_input: &str,
    ) -> Result<LoginResponse, ApiError> {
        let invalid = || ApiError::Unauthorized("invalid credentials".to_string());

        let user = self
            .repository
            .get_user_for_login(email)
            .await
            .map_err(|_| invalid())?;

        let hash = user.password_hash.clone().ok_or_else(invalid)?;
        let input = password_input.to_string();
        let verified = tokio::task::spawn_blocking(move || password::verify(&input, &hash))
            .await
            .map_err(|e| ApiError::InternalError(e.to_string()))?
            .map_err(|_| invalid())?;
        if !verified {
            return Err(invalid());
        }

        // A role lookup failure must not lock the user out; they get a
        // token with no roles and hit 403 on anything role-gated.
        let roles = self
            .repository
            .get_user_role_codes(user.tenant_id, user.id)
            .await
            .unwrap_or_default();

        let token = self
            .jwt
            .generate_token(user.id, user.tenant_id, roles)
            .map_err(|e| ApiError::InternalError(e.to_string()))?;

        debug!("Issued token for user {}", user.id);
        Ok(LoginResponse { token, user })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::DbPool;

    #[tokio::test]
    async fn unknown_email_yields_uniform_invalid_credentials() {
        let pool = DbPool::lazy("postgres://localhost:1/void").unwrap();
        let repository = Arc::new(Repository::new(pool));
        let jwt = Arc::new(JwtManager::new("test-secret", 24));
        let service = AuthService::new(repository, jwt);

        // The lazy pool cannot reach a server, so the lookup fails; the
        // caller must still see the uniform credentials error.
        let err = service
            .authenticate("nobody@example.com", "whatever")
            .await
            .unwrap_err();
        match err {
            ApiError::Unauthorized(msg) => assert_eq!(msg, "invalid credentials"),
            other => panic!("expected unauthorized, got {other:?}"),
        }
    }
}
