use crate::auth::password;
use crate::database::{Repository, User};
use crate::services::{AuditEvent, AuditService};
use crate::utils::{ApiError, Paginated, PaginationParams};
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

pub struct UserService {
    repository: Arc<Repository>,
    audit: Arc<AuditService>,
}

impl UserService {
    pub fn new(repository: Arc<Repository>, audit: Arc<AuditService>) -> Self {
        Self { repository, audit }
    }

    pub async fn create(
        &self,
        tenant_id: Uuid,
        actor_id: Uuid,
        employee_id: Uuid,
        email: &str,
        display_name: Option<&str>,
        raw_password: Option<String>,
    ) -> Result<User, ApiError> {
        // Employee link is tenant-scoped, same rule as manager references.
        self.repository
            .get_employee(tenant_id, employee_id)
            .await
            .map_err(|e| match e {
                sqlx::Error::RowNotFound => {
                    ApiError::BadRequest("employee not found in this tenant".to_string())
                }
                other => ApiError::from(other),
            })?;

        let password_hash = match raw_password {
            Some(raw) => Some(
                tokio::task::spawn_blocking(move || {
                    password::hash(&raw, password::ONBOARDING_COST)
                })
                .await
                .map_err(|e| ApiError::InternalError(e.to_string()))?
                .map_err(|e| ApiError::InternalError(e.to_string()))?,
            ),
            None => None,
        };

        let user = self
            .repository
            .create_user(
                tenant_id,
                Uuid::new_v4(),
                employee_id,
                email,
                display_name,
                password_hash.as_deref(),
            )
            .await?;

        self.audit
            .log(AuditEvent::new(
                tenant_id,
                actor_id,
                "CREATE",
                "Users",
                user.id,
                json!({ "email": user.email, "employeeId": user.employee_id }),
            ))
            .await;

        Ok(user)
    }

    pub async fn list(
        &self,
        tenant_id: Uuid,
        params: &PaginationParams,
    ) -> Result<Paginated<User>, ApiError> {
        let params = params.normalized();
        let total = self.repository.count_users(tenant_id, &params.search).await?;
        let users = self
            .repository
            .list_users(tenant_id, &params.search, params.limit(), params.offset())
            .await?;
        Ok(Paginated::new(users, &params, total))
    }

    pub async fn get(&self, tenant_id: Uuid, id: Uuid) -> Result<User, ApiError> {
        Ok(self.repository.get_user(tenant_id, id).await?)
    }

    pub async fn list_role_codes(
        &self,
        tenant_id: Uuid,
        user_id: Uuid,
    ) -> Result<Vec<String>, ApiError> {
        // Distinguish "no roles" from "no such user".
        self.repository.get_user(tenant_id, user_id).await?;
        Ok(self.repository.get_user_role_codes(tenant_id, user_id).await?)
    }

    pub async fn grant_role(
        &self,
        tenant_id: Uuid,
        actor_id: Uuid,
        user_id: Uuid,
        role_id: Uuid,
        business_unit_id: Option<Uuid>,
        department_id: Option<Uuid>,
    ) -> Result<(), ApiError> {
        self.repository.get_user(tenant_id, user_id).await?;
        self.repository
            .get_role(tenant_id, role_id)
            .await
            .map_err(|e| match e {
                sqlx::Error::RowNotFound => {
                    ApiError::BadRequest("role not found in this tenant".to_string())
                }
                other => ApiError::from(other),
            })?;

        self.repository
            .assign_user_role(
                tenant_id,
                user_id,
                role_id,
                business_unit_id,
                department_id,
                Some(actor_id),
            )
            .await?;

        self.audit
            .log(AuditEvent::new(
                tenant_id,
                actor_id,
                "GRANT_ROLE",
                "Users",
                user_id,
                json!({ "roleId": role_id }),
            ))
            .await;

        Ok(())
    }

    pub async fn revoke_role(
        &self,
        tenant_id: Uuid,
        actor_id: Uuid,
        user_id: Uuid,
        role_id: Uuid,
    ) -> Result<(), ApiError> {
        self.repository
            .revoke_user_role(tenant_id, user_id, role_id)
            .await?;

        self.audit
            .log(AuditEvent::new(
                tenant_id,
                actor_id,
                "REVOKE_ROLE",
                "Users",
                user_id,
                json!({ "roleId": role_id }),
            ))
            .await;

        Ok(())
    }
}
