use crate::database::Tenant;
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
pub struct CreateTenantRequest {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub code: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub name: String,
}

pub async fn create_tenant(
    State(state): State<AppState>,
    Json(request): Json<CreateTenantRequest>,
) -> Result<(StatusCode, Json<Tenant>), ApiError> {
    request.validate()?;
    let tenant = state
        .tenant_service
        .create(&request.code, &request.name)
        .await?;
    Ok((StatusCode::CREATED, Json(tenant)))
}

pub async fn list_tenants(
    State(state): State<AppState>,
) -> Result<Json<Vec<Tenant>>, ApiError> {
    Ok(Json(state.tenant_service.list().await?))
}

pub async fn get_tenant(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Tenant>, ApiError> {
    Ok(Json(state.tenant_service.get(id).await?))
}
