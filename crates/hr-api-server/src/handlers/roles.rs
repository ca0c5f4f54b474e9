use crate::auth::AuthContext;
use crate::database::Role;
use crate::state::AppState;
use crate::utils::ApiError;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateRoleRequest {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub code: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub name: String,
    pub description: Option<String>,
}

pub async fn create_role(
    State(state): State<AppState>,
    ctx: AuthContext,
    Json(request): Json<CreateRoleRequest>,
) -> Result<(StatusCode, Json<Role>), ApiError> {
    ctx.require_role("ADMIN")?;
    request.validate()?;
    let role = state
        .role_service
        .create(
            ctx.tenant_id,
            ctx.user_id,
            &request.code,
            &request.name,
            request.description.as_deref(),
        )
        .await?;
    Ok((StatusCode::CREATED, Json(role)))
}

pub async fn list_roles(
    State(state): State<AppState>,
    ctx: AuthContext,
) -> Result<Json<Vec<Role>>, ApiError> {
    Ok(Json(state.role_service.list(ctx.tenant_id).await?))
}

pub async fn get_role(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<Json<Role>, ApiError> {
    Ok(Json(state.role_service.get(ctx.tenant_id, id).await?))
}
