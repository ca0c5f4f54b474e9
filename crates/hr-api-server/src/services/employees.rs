use crate::database::{Employee, EmployeeWithDetails, NewEmployee, Repository};
use crate::services::{AuditEvent, AuditService};
use crate::utils::{ApiError, Paginated, PaginationParams};
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct CreateEmployeeInput {
    pub employee_no: String,
    pub first_name: String,
    pub last_name: String,
    pub display_name: Option<String>,
    pub work_email: Option<String>,
    pub business_unit_id: Option<Uuid>,
    pub department_id: Option<Uuid>,
    pub job_title_id: Option<Uuid>,
    pub manager_id: Option<Uuid>,
}

pub struct EmployeeService {
    repository: Arc<Repository>,
    audit: Arc<AuditService>,
}

impl EmployeeService {
    pub fn new(repository: Arc<Repository>, audit: Arc<AuditService>) -> Self {
        Self { repository, audit }
    }

    pub async fn create(
        &self,
        tenant_id: Uuid,
        actor_id: Uuid,
        input: CreateEmployeeInput,
    ) -> Result<Employee, ApiError> {
        // Manager must resolve inside the caller's tenant, not just exist.
        if let Some(manager_id) = input.manager_id {
            self.repository
                .get_employee(tenant_id, manager_id)
                .await
                .map_err(|e| match e {
                    sqlx::Error::RowNotFound => {
                        ApiError::BadRequest("manager not found in this tenant".to_string())
                    }
                    other => ApiError::from(other),
                })?;
        }

        let employee = self
            .repository
            .create_employee(
                tenant_id,
                &NewEmployee {
                    id: Uuid::new_v4(),
                    employee_no: input.employee_no,
                    first_name: input.first_name,
                    last_name: input.last_name,
                    display_name: input.display_name,
                    work_email: input.work_email,
                    business_unit_id: input.business_unit_id,
                    department_id: input.department_id,
                    job_title_id: input.job_title_id,
                    manager_id: input.manager_id,
                },
            )
            .await?;

        self.audit
            .log(AuditEvent::new(
                tenant_id,
                actor_id,
                "CREATE",
                "Employees",
                employee.id,
                json!({
                    "employeeNo": employee.employee_no,
                    "firstName": employee.first_name,
                    "lastName": employee.last_name,
                }),
            ))
            .await;

        Ok(employee)
    }

    pub async fn list(
        &self,
        tenant_id: Uuid,
        params: &PaginationParams,
    ) -> Result<Paginated<Employee>, ApiError> {
        let params = params.normalized();
        let total = self
            .repository
            .count_employees(tenant_id, &params.search)
            .await?;
        let employees = self
            .repository
            .list_employees(tenant_id, &params.search, params.limit(), params.offset())
            .await?;
        Ok(Paginated::new(employees, &params, total))
    }

    pub async fn get_details(
        &self,
        tenant_id: Uuid,
        id: Uuid,
    ) -> Result<EmployeeWithDetails, ApiError> {
        Ok(self.repository.get_employee_with_details(tenant_id, id).await?)
    }

    /// The employee plus every transitive report under them. Returns 404
    /// when the root employee itself is missing.
    pub async fn hierarchy(&self, tenant_id: Uuid, id: Uuid) -> Result<Vec<Employee>, ApiError> {
        let employees = self.repository.get_employee_hierarchy(tenant_id, id).await?;
        if employees.is_empty() {
            return Err(ApiError::NotFound("employee not found".to_string()));
        }
        Ok(employees)
    }
}
