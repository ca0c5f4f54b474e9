use crate::database::{Repository, Role};
use crate::services::{AuditEvent, AuditService};
use crate::utils::ApiError;
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

pub struct RoleService {
    repository: Arc<Repository>,
    audit: Arc<AuditService>,
}

impl RoleService {
    pub fn new(repository: Arc<Repository>, audit: Arc<AuditService>) -> Self {
        Self { repository, audit }
    }

    pub async fn create(
        &self,
        tenant_id: Uuid,
        actor_id: Uuid,
        code: &str,
        name: &str,
        description: Option<&str>,
    ) -> Result<Role, ApiError> {
        let role = self
            .repository
            .create_role(tenant_id, Uuid::new_v4(), code, name, description)
            .await?;

        self.audit
            .log(AuditEvent::new(
                tenant_id,
                actor_id,
                "CREATE",
                "Roles",
                role.id,
                json!({ "code": role.code, "name": role.name }),
            ))
            .await;

        Ok(role)
    }

    pub async fn list(&self, tenant_id: Uuid) -> Result<Vec<Role>, ApiError> {
        Ok(self.repository.list_roles(tenant_id).await?)
    }

    pub async fn get(&self, tenant_id: Uuid, id: Uuid) -> Result<Role, ApiError> {
        Ok(self.repository.get_role(tenant_id, id).await?)
    }
}
