use crate::auth::AuthContext;
use crate::database::User;
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
pub struct CreateUserRequest {
    pub employee_id: Uuid,
    #[validate(email(message = "must be a valid email"))]
    pub email: String,
    pub display_name: Option<String>,
    #[validate(length(min = 8, message = "must be at least 8 characters"))]
    pub password: Option<String>,
}

pub async fn create_user(
    State(state): State<AppState>,
    ctx: AuthContext,
    Json(request): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    request.validate()?;
    let user = state
        .user_service
        .create(
            ctx.tenant_id,
            ctx.user_id,
            request.employee_id,
            &request.email,
            request.display_name.as_deref(),
            request.password,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn list_users(
    State(state): State<AppState>,
    ctx: AuthContext,
    Query(params): Query<PaginationParams>,
) -> Result<Json<Paginated<User>>, ApiError> {
    Ok(Json(state.user_service.list(ctx.tenant_id, &params).await?))
}

pub async fn get_user(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<Json<User>, ApiError> {
    Ok(Json(state.user_service.get(ctx.tenant_id, id).await?))
}

pub async fn list_user_roles(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<String>>, ApiError> {
    Ok(Json(
        state.user_service.list_role_codes(ctx.tenant_id, id).await?,
    ))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrantRoleRequest {
    pub role_id: Uuid,
    pub business_unit_id: Option<Uuid>,
    pub department_id: Option<Uuid>,
}

pub async fn grant_user_role(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path(id): Path<Uuid>,
    Json(request): Json<GrantRoleRequest>,
) -> Result<StatusCode, ApiError> {
    ctx.require_role("ADMIN")?;
    state
        .user_service
        .grant_role(
            ctx.tenant_id,
            ctx.user_id,
            id,
            request.role_id,
            request.business_unit_id,
            request.department_id,
        )
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn revoke_user_role(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path((id, role_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, ApiError> {
    ctx.require_role("ADMIN")?;
    state
        .user_service
        .revoke_role(ctx.tenant_id, ctx.user_id, id, role_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
