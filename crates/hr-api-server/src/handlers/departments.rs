use crate::auth::AuthContext;
use crate::database::Department;
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
pub struct CreateDepartmentRequest {
    pub parent_department_id: Option<Uuid>,
    pub code: Option<String>,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub name: String,
}

pub async fn create_department(
    State(state): State<AppState>,
    ctx: AuthContext,
    Json(request): Json<CreateDepartmentRequest>,
) -> Result<(StatusCode, Json<Department>), ApiError> {
    request.validate()?;
    let department = state
        .department_service
        .create(
            ctx.tenant_id,
            ctx.user_id,
            request.parent_department_id,
            request.code.as_deref(),
            &request.name,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(department)))
}

pub async fn list_departments(
    State(state): State<AppState>,
    ctx: AuthContext,
    Query(params): Query<PaginationParams>,
) -> Result<Json<Paginated<Department>>, ApiError> {
    Ok(Json(
        state.department_service.list(ctx.tenant_id, &params).await?,
    ))
}

pub async fn get_department(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<Json<Department>, ApiError> {
    Ok(Json(state.department_service.get(ctx.tenant_id, id).await?))
}
