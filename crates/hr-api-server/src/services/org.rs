//! Organizational structure services: business units, departments and
//! job titles. Same shape for all three, create emits an audit event.

use crate::database::{BusinessUnit, Department, JobTitle, Repository};
use crate::services::{AuditEvent, AuditService};
use crate::utils::{ApiError, Paginated, PaginationParams};
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

pub struct BusinessUnitService {
    repository: Arc<Repository>,
    audit: Arc<AuditService>,
}

impl BusinessUnitService {
    pub fn new(repository: Arc<Repository>, audit: Arc<AuditService>) -> Self {
        Self { repository, audit }
    }

    pub async fn create(
        &self,
        tenant_id: Uuid,
        actor_id: Uuid,
        code: &str,
        name: &str,
    ) -> Result<BusinessUnit, ApiError> {
        let unit = self
            .repository
            .create_business_unit(tenant_id, Uuid::new_v4(), code, name)
            .await?;

        self.audit
            .log(AuditEvent::new(
                tenant_id,
                actor_id,
                "CREATE",
                "BusinessUnits",
                unit.id,
                json!({ "code": unit.code, "name": unit.name }),
            ))
            .await;

        Ok(unit)
    }

    pub async fn list(
        &self,
        tenant_id: Uuid,
        params: &PaginationParams,
    ) -> Result<Paginated<BusinessUnit>, ApiError> {
        let params = params.normalized();
        let total = self
            .repository
            .count_business_units(tenant_id, &params.search)
            .await?;
        let units = self
            .repository
            .list_business_units(tenant_id, &params.search, params.limit(), params.offset())
            .await?;
        Ok(Paginated::new(units, &params, total))
    }

    pub async fn get(&self, tenant_id: Uuid, id: Uuid) -> Result<BusinessUnit, ApiError> {
        Ok(self.repository.get_business_unit(tenant_id, id).await?)
    }
}

pub struct DepartmentService {
    repository: Arc<Repository>,
    audit: Arc<AuditService>,
}

impl DepartmentService {
    pub fn new(repository: Arc<Repository>, audit: Arc<AuditService>) -> Self {
        Self { repository, audit }
    }

    pub async fn create(
        &self,
        tenant_id: Uuid,
        actor_id: Uuid,
        parent_department_id: Option<Uuid>,
        code: Option<&str>,
        name: &str,
    ) -> Result<Department, ApiError> {
        // Parent must belong to the same tenant.
        if let Some(parent_id) = parent_department_id {
            self.repository
                .get_department(tenant_id, parent_id)
                .await
                .map_err(|e| match e {
                    sqlx::Error::RowNotFound => ApiError::BadRequest(
                        "parent department not found in this tenant".to_string(),
                    ),
                    other => ApiError::from(other),
                })?;
        }

        let department = self
            .repository
            .create_department(tenant_id, Uuid::new_v4(), parent_department_id, code, name)
            .await?;

        self.audit
            .log(AuditEvent::new(
                tenant_id,
                actor_id,
                "CREATE",
                "Departments",
                department.id,
                json!({ "code": department.code, "name": department.name }),
            ))
            .await;

        Ok(department)
    }

    pub async fn list(
        &self,
        tenant_id: Uuid,
        params: &PaginationParams,
    ) -> Result<Paginated<Department>, ApiError> {
        let params = params.normalized();
        let total = self
            .repository
            .count_departments(tenant_id, &params.search)
            .await?;
        let departments = self
            .repository
            .list_departments(tenant_id, &params.search, params.limit(), params.offset())
            .await?;
        Ok(Paginated::new(departments, &params, total))
    }

    pub async fn get(&self, tenant_id: Uuid, id: Uuid) -> Result<Department, ApiError> {
        Ok(self.repository.get_department(tenant_id, id).await?)
    }
}

pub struct JobTitleService {
    repository: Arc<Repository>,
    audit: Arc<AuditService>,
}

impl JobTitleService {
    pub fn new(repository: Arc<Repository>, audit: Arc<AuditService>) -> Self {
        Self { repository, audit }
    }

    pub async fn create(
        &self,
        tenant_id: Uuid,
        actor_id: Uuid,
        code: &str,
        name: &str,
        grade: Option<&str>,
    ) -> Result<JobTitle, ApiError> {
        let job_title = self
            .repository
            .create_job_title(tenant_id, Uuid::new_v4(), code, name, grade)
            .await?;

        self.audit
            .log(AuditEvent::new(
                tenant_id,
                actor_id,
                "CREATE",
                "JobTitles",
                job_title.id,
                json!({ "code": job_title.code, "name": job_title.name }),
            ))
            .await;

        Ok(job_title)
    }

    pub async fn list(
        &self,
        tenant_id: Uuid,
        params: &PaginationParams,
    ) -> Result<Paginated<JobTitle>, ApiError> {
        let params = params.normalized();
        let total = self
            .repository
            .count_job_titles(tenant_id, &params.search)
            .await?;
        let titles = self
            .repository
            .list_job_titles(tenant_id, &params.search, params.limit(), params.offset())
            .await?;
        Ok(Paginated::new(titles, &params, total))
    }

    pub async fn get(&self, tenant_id: Uuid, id: Uuid) -> Result<JobTitle, ApiError> {
        Ok(self.repository.get_job_title(tenant_id, id).await?)
    }
}
