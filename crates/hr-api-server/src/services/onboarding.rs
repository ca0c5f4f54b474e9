use crate::auth::password;
use crate::database::{NewEmployee, NewOnboarding, Repository};
use crate::services::{AuditEvent, AuditService};
use crate::utils::ApiError;
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Validated onboarding input, already shaped by the handler layer.
#[derive(Debug, Clone)]
pub struct OnboardingInput {
    pub employee_no: String,
    pub first_name: String,
    pub last_name: String,
    pub display_name: Option<String>,
    pub business_unit_id: Option<Uuid>,
    pub department_id: Option<Uuid>,
    pub job_title_id: Option<Uuid>,
    pub manager_id: Option<Uuid>,
    pub email: String,
    pub password: String,
    pub initial_role_id: Uuid,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingResult {
    pub employee_id: Uuid,
    pub user_id: Uuid,
    pub email: String,
}

pub struct OnboardingService {
    repository: Arc<Repository>,
    audit: Arc<AuditService>,
}

impl OnboardingService {
    pub fn new(repository: Arc<Repository>, audit: Arc<AuditService>) -> Self {
        Self { repository, audit }
    }

    /// Run the atomic onboarding flow: employee, linked user account and
    /// initial role grant commit together or not at all. The audit event
    /// is emitted only after the commit.
    pub async fn execute(
        &self,
        tenant_id: Uuid,
        actor_id: Uuid,
        input: OnboardingInput,
    ) -> Result<OnboardingResult, ApiError> {
        let raw_password = input.password.clone();
        let password_hash = tokio::task::spawn_blocking(move || {
            password::hash(&raw_password, password::ONBOARDING_COST)
        })
        .await
        .map_err(|e| ApiError::InternalError(e.to_string()))?
        .map_err(|e| ApiError::InternalError(e.to_string()))?;

        let onboarding = NewOnboarding {
            employee: NewEmployee {
                id: Uuid::new_v4(),
                employee_no: input.employee_no.clone(),
                first_name: input.first_name,
                last_name: input.last_name,
                display_name: input.display_name,
                // The login email doubles as the work email.
                work_email: Some(input.email.clone()),
                business_unit_id: input.business_unit_id,
                department_id: input.department_id,
                job_title_id: input.job_title_id,
                manager_id: input.manager_id,
            },
            user_id: Uuid::new_v4(),
            email: input.email,
            password_hash,
            initial_role_id: input.initial_role_id,
        };

        self.repository
            .execute_onboarding(tenant_id, actor_id, &onboarding)
            .await
            .map_err(|e| match e {
                // The in-transaction lookups fail this way when the manager
                // or role does not exist in the caller's tenant.
                sqlx::Error::RowNotFound => ApiError::BadRequest(
                    "manager or role not found in this tenant".to_string(),
                ),
                other => ApiError::from(other),
            })?;

        info!(
            "Onboarded employee {} (user {}) in tenant {}",
            onboarding.employee.id, onboarding.user_id, tenant_id
        );

        self.audit
            .log(AuditEvent::new(
                tenant_id,
                actor_id,
                "ONBOARD",
                "Users",
                onboarding.user_id,
                json!({
                    "employeeId": onboarding.employee.id,
                    "employeeNo": onboarding.employee.employee_no,
                    "email": onboarding.email,
                    "initialRoleId": onboarding.initial_role_id,
                }),
            ))
            .await;

        Ok(OnboardingResult {
            employee_id: onboarding.employee.id,
            user_id: onboarding.user_id,
            email: onboarding.email,
        })
    }
}
