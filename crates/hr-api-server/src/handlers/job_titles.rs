use crate::auth::AuthContext;
use crate::database::JobTitle;
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
pub struct CreateJobTitleRequest {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub code: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub name: String,
    pub grade: Option<String>,
}

pub async fn create_job_title(
    State(state): State<AppState>,
    ctx: AuthContext,
    Json(request): Json<CreateJobTitleRequest>,
) -> Result<(StatusCode, Json<JobTitle>), ApiError> {
    request.validate()?;
    let job_title = state
        .job_title_service
        .create(
            ctx.tenant_id,
            ctx.user_id,
            &request.code,
            &request.name,
            request.grade.as_deref(),
        )
        .await?;
    Ok((StatusCode::CREATED, Json(job_title)))
}

pub async fn list_job_titles(
    State(state): State<AppState>,
    ctx: AuthContext,
    Query(params): Query<PaginationParams>,
) -> Result<Json<Paginated<JobTitle>>, ApiError> {
    Ok(Json(
        state.job_title_service.list(ctx.tenant_id, &params).await?,
    ))
}

pub async fn get_job_title(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<Json<JobTitle>, ApiError> {
    Ok(Json(state.job_title_service.get(ctx.tenant_id, id).await?))
}
