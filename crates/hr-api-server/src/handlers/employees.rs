use crate::auth::AuthContext;
use crate::database::{Employee, EmployeeWithDetails};
use crate::services::employees::CreateEmployeeInput;
use crate::state::AppState;
use crate::utils::{ApiError, Paginated, PaginationParams};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmployeeRequest {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub employee_no: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub last_name: String,
    pub display_name: Option<String>,
    #[validate(email(message = "must be a valid email"))]
    pub work_email: Option<String>,
    pub business_unit_id: Option<Uuid>,
    pub department_id: Option<Uuid>,
    pub job_title_id: Option<Uuid>,
    pub manager_id: Option<Uuid>,
}

pub async fn create_employee(
    State(state): State<AppState>,
    ctx: AuthContext,
    Json(request): Json<CreateEmployeeRequest>,
) -> Result<(StatusCode, Json<Employee>), ApiError> {
    request.validate()?;
    let employee = state
        .employee_service
        .create(
            ctx.tenant_id,
            ctx.user_id,
            CreateEmployeeInput {
                employee_no: request.employee_no,
                first_name: request.first_name,
                last_name: request.last_name,
                display_name: request.display_name,
                work_email: request.work_email,
                business_unit_id: request.business_unit_id,
                department_id: request.department_id,
                job_title_id: request.job_title_id,
                manager_id: request.manager_id,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(employee)))
}

pub async fn list_employees(
    State(state): State<AppState>,
    ctx: AuthContext,
    Query(params): Query<PaginationParams>,
) -> Result<Json<Paginated<Employee>>, ApiError> {
    Ok(Json(
        state.employee_service.list(ctx.tenant_id, &params).await?,
    ))
}

pub async fn get_employee(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<Json<EmployeeWithDetails>, ApiError> {
    Ok(Json(
        state.employee_service.get_details(ctx.tenant_id, id).await?,
    ))
}

pub async fn get_employee_hierarchy(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Employee>>, ApiError> {
    Ok(Json(
        state.employee_service.hierarchy(ctx.tenant_id, id).await?,
    ))
}
