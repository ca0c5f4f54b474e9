use crate::services::auth::LoginResponse;
use crate::state::AppState;
use crate::utils::ApiError;
use axum::{extract::State, Json};
use serde::Deserialize;
use tracing::info;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "must be a valid email"))]
    pub email: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub password: String,
}

pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    request.validate()?;
    let response = state
        .auth_service
        .authenticate(&request.email, &request.password)
        .await?;
    info!("Login succeeded for user {}", response.user.id);
    Ok(Json(response))
}
