use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tenant {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessUnit {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub code: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub parent_department_id: Option<Uuid>,
    pub code: Option<String>,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobTitle {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub code: String,
    pub name: String,
    pub grade: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub employee_no: String,
    pub first_name: String,
    pub last_name: String,
    pub display_name: Option<String>,
    pub work_email: Option<String>,
    pub business_unit_id: Option<Uuid>,
    pub department_id: Option<Uuid>,
    pub job_title_id: Option<Uuid>,
    pub manager_id: Option<Uuid>,
    pub status: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub employee_id: Uuid,
    pub email: String,
    pub display_name: Option<String>,
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLog {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub actor_id: Uuid,
    pub action: String,
    pub entity_type: String,
    pub entity_id: Uuid,
    pub changes: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

/// Joined employee view with org reference summaries resolved.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeWithDetails {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub employee_no: String,
    pub first_name: String,
    pub last_name: String,
    pub display_name: Option<String>,
    pub work_email: Option<String>,
    pub status: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub business_unit: Option<CodeNameSummary>,
    pub department: Option<CodeNameSummary>,
    pub job_title: Option<JobTitleSummary>,
    pub manager: Option<ManagerSummary>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeNameSummary {
    pub id: Uuid,
    pub code: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobTitleSummary {
    pub id: Uuid,
    pub code: Option<String>,
    pub name: Option<String>,
    pub grade: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagerSummary {
    pub id: Uuid,
    pub employee_no: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub display_name: Option<String>,
}

/// Insert payload for a new employee row.
#[derive(Debug, Clone)]
pub struct NewEmployee {
    pub id: Uuid,
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

/// Everything the onboarding transaction needs to run, ids pre-minted by
/// the service so the result can be returned without re-reading.
#[derive(Debug, Clone)]
pub struct NewOnboarding {
    pub employee: NewEmployee,
    pub user_id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub initial_role_id: Uuid,
}

#[derive(Debug, Clone)]
pub struct AuditLogFilter {
    pub entity_type: Option<String>,
    pub action: Option<String>,
}
