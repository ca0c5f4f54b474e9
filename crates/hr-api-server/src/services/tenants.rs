use crate::database::{Repository, Tenant};
use crate::utils::ApiError;
use std::sync::Arc;
use uuid::Uuid;

pub struct TenantService {
    repository: Arc<Repository>,
}

impl TenantService {
    pub fn new(repository: Arc<Repository>) -> Self {
        Self { repository }
    }

    pub async fn create(&self, code: &str, name: &str) -> Result<Tenant, ApiError> {
        let tenant = self
            .repository
            .create_tenant(Uuid::new_v4(), code, name)
            .await?;
        Ok(tenant)
    }

    pub async fn list(&self) -> Result<Vec<Tenant>, ApiError> {
        Ok(self.repository.list_tenants().await?)
    }

    pub async fn get(&self, id: Uuid) -> Result<Tenant, ApiError> {
        Ok(self.repository.get_tenant(id).await?)
    }
}
