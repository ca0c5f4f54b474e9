use crate::auth::AuthContext;
use crate::services::onboarding::{OnboardingInput, OnboardingResult};
use crate::state::AppState;
use crate::utils::ApiError;
use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OnboardRequest {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub employee_no: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub last_name: String,
    pub display_name: Option<String>,
    pub business_unit_id: Option<Uuid>,
    pub department_id: Option<Uuid>,
    pub job_title_id: Option<Uuid>,
    pub manager_id: Option<Uuid>,
    #[validate(email(message = "must be a valid email"))]
    pub email: String,
    #[validate(length(min = 8, message = "must be at least 8 characters"))]
    pub password: String,
    pub initial_role_id: Uuid,
}

pub async fn onboard(
    State(state): State<AppState>,
    ctx: AuthContext,
    Json(request): Json<OnboardRequest>,
) -> Result<(StatusCode, Json<OnboardingResult>), ApiError> {
    ctx.require_role("ADMIN")?;
    request.validate()?;

    info!(
        "Onboarding {} requested by user {}",
        request.employee_no, ctx.user_id
    );

    let result = state
        .onboarding_service
        .execute(
            ctx.tenant_id,
            ctx.user_id,
            OnboardingInput {
                employee_no: request.employee_no,
                first_name: request.first_name,
                last_name: request.last_name,
                display_name: request.display_name,
                business_unit_id: request.business_unit_id,
                department_id: request.department_id,
                job_title_id: request.job_title_id,
                manager_id: request.manager_id,
                email: request.email,
                password: request.password,
                initial_role_id: request.initial_role_id,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(result)))
}
