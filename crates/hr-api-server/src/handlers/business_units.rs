use crate::auth::AuthContext;
use crate::database::BusinessUnit;
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
pub struct CreateBusinessUnitRequest {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub code: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub name: String,
}

pub async fn create_business_unit(
    State(state): State<AppState>,
    ctx: AuthContext,
    Json(request): Json<CreateBusinessUnitRequest>,
) -> Result<(StatusCode, Json<BusinessUnit>), ApiError> {
    request.validate()?;
    let unit = state
        .business_unit_service
        .create(ctx.tenant_id, ctx.user_id, &request.code, &request.name)
        .await?;
    Ok((StatusCode::CREATED, Json(unit)))
}

pub async fn list_business_units(
    State(state): State<AppState>,
    ctx: AuthContext,
    Query(params): Query<PaginationParams>,
) -> Result<Json<Paginated<BusinessUnit>>, ApiError> {
    Ok(Json(
        state
            .business_unit_service
            .list(ctx.tenant_id, &params)
            .await?,
    ))
}

pub async fn get_business_unit(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<Json<BusinessUnit>, ApiError> {
    Ok(Json(
        state.business_unit_service.get(ctx.tenant_id, id).await?,
    ))
}
