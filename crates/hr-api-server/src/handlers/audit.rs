use crate::auth::AuthContext;
use crate::database::{AuditLog, AuditLogFilter};
use crate::state::AppState;
use crate::utils::pagination::DEFAULT_PAGE_SIZE;
use crate::utils::{ApiError, Paginated, PaginationParams};
use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

// Pagination fields are spelled out here: serde's flatten does not mix
// with query-string deserialization of numeric fields.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_size")]
    pub size: i64,
    pub entity_type: Option<String>,
    pub action: Option<String>,
}

fn default_page() -> i64 {
    1
}

fn default_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

pub async fn list_audit_logs(
    State(state): State<AppState>,
    ctx: AuthContext,
    Query(query): Query<AuditLogQuery>,
) -> Result<Json<Paginated<AuditLog>>, ApiError> {
    let filter = AuditLogFilter {
        entity_type: query.entity_type,
        action: query.action,
    };
    let params = PaginationParams {
        page: query.page,
        size: query.size,
        search: String::new(),
    };
    Ok(Json(
        state
            .audit_service
            .list_logs(ctx.tenant_id, &filter, &params)
            .await?,
    ))
}
